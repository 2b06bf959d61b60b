pub mod engine;
pub mod filter;
pub mod loader;
pub mod pager;
pub mod pipeline;
pub mod stats;

pub use crate::domain::model::{City, Filters, OptionalColumns, TripRecord, TripTable};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::domain::report::StatsReport;
pub use crate::utils::error::Result;
