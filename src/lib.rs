pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::{cli::LocalStorage, toml_config::TomlConfig};

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use app::console::Console;
pub use app::session::{Session, SessionOptions};
pub use core::{engine::StatsEngine, pipeline::TripPipeline};
pub use utils::error::{BikeshareError, Result};
