pub mod cli;
pub mod toml_config;

use crate::core::pager::DEFAULT_PAGE_SIZE;
use crate::core::{City, ConfigProvider};
use crate::domain::model::{DayFilter, Filters, MonthFilter, OutputFormat};
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, validate_range, Validate};

pub const DEFAULT_DATA_DIR: &str = ".";
pub const MAX_PAGE_SIZE: usize = 100;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, clap::Parser)]
#[command(name = "bikeshare-stats")]
#[command(about = "Explore US bikeshare trip data for Chicago, New York City and Washington")]
pub struct CliConfig {
    /// Directory holding chicago.csv, new_york_city.csv and washington.csv
    /// (a config file's [data] dir wins over BIKESHARE_DATA_DIR but not over this flag)
    #[arg(long, env = "BIKESHARE_DATA_DIR")]
    pub data_dir: Option<String>,

    /// Set when `data_dir` was taken from `BIKESHARE_DATA_DIR`.
    #[arg(skip)]
    pub data_dir_from_env: bool,

    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Rows shown per page of raw data
    #[arg(long)]
    pub page_size: Option<usize>,

    /// How statistics are printed
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Skip the city prompt for the first analysis
    #[arg(long)]
    pub city: Option<City>,

    /// Month filter for the first analysis (requires --city)
    #[arg(long, requires = "city")]
    pub month: Option<MonthFilter>,

    /// Day filter for the first analysis (requires --city)
    #[arg(long, requires = "city")]
    pub day: Option<DayFilter>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Parses the process arguments, exiting with clap's usage message on error.
    pub fn parse_args() -> Self {
        match Self::try_parse_args_from(std::env::args_os()) {
            Ok(cli) => cli,
            Err(e) => e.exit(),
        }
    }

    pub fn try_parse_args_from<I, T>(args: I) -> std::result::Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        use clap::parser::ValueSource;
        use clap::{CommandFactory, FromArgMatches};

        let matches = Self::command().try_get_matches_from(args)?;
        let mut cli = Self::from_arg_matches(&matches)?;
        cli.data_dir_from_env =
            matches.value_source("data_dir") == Some(ValueSource::EnvVariable);
        Ok(cli)
    }

    /// Filters given on the command line, used instead of prompting once.
    pub fn preset_filters(&self) -> Option<Filters> {
        self.city.map(|city| {
            Filters::new(
                city,
                self.month.unwrap_or(MonthFilter::All),
                self.day.unwrap_or(DayFilter::All),
            )
        })
    }
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn data_dir(&self) -> &str {
        self.data_dir.as_deref().unwrap_or(DEFAULT_DATA_DIR)
    }

    fn city_file(&self, city: City) -> &str {
        city.default_file()
    }

    fn page_size(&self) -> usize {
        self.page_size.unwrap_or(DEFAULT_PAGE_SIZE)
    }

    fn output_format(&self) -> OutputFormat {
        self.format.unwrap_or_default()
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_common(self)
    }
}

/// Checks shared by every configuration source.
pub fn validate_common<C: ConfigProvider>(config: &C) -> Result<()> {
    validate_path("data_dir", config.data_dir())?;
    validate_range("page_size", config.page_size(), 1, MAX_PAGE_SIZE)?;
    Ok(())
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;
    use chrono::{Month, Weekday};
    use clap::Parser;

    #[test]
    fn test_defaults() {
        let config = CliConfig::try_parse_from(["bikeshare-stats"]).unwrap();
        assert_eq!(config.page_size(), 5);
        assert_eq!(config.output_format(), OutputFormat::Text);
        assert_eq!(config.city_file(City::NewYorkCity), "new_york_city.csv");
        assert!(config.preset_filters().is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_preset_filters_from_flags() {
        let config = CliConfig::try_parse_from([
            "bikeshare-stats",
            "--city",
            "new york city",
            "--month",
            "February",
            "--day",
            "friday",
            "--format",
            "json",
        ])
        .unwrap();

        assert_eq!(
            config.preset_filters(),
            Some(Filters::new(
                City::NewYorkCity,
                MonthFilter::Only(Month::February),
                DayFilter::Only(Weekday::Fri),
            ))
        );
        assert_eq!(config.output_format(), OutputFormat::Json);
    }

    #[test]
    fn test_invalid_flags_are_rejected() {
        assert!(CliConfig::try_parse_from(["bikeshare-stats", "--city", "boston"]).is_err());
        assert!(CliConfig::try_parse_from(["bikeshare-stats", "--month", "march"]).is_err());
    }

    #[test]
    fn test_data_dir_source_is_recorded() {
        let flag =
            CliConfig::try_parse_args_from(["bikeshare-stats", "--data-dir", "/srv/trips"])
                .unwrap();
        assert_eq!(flag.data_dir.as_deref(), Some("/srv/trips"));
        assert!(!flag.data_dir_from_env);

        std::env::set_var("BIKESHARE_DATA_DIR", ".");
        let env = CliConfig::try_parse_args_from(["bikeshare-stats"]).unwrap();
        let flag_over_env =
            CliConfig::try_parse_args_from(["bikeshare-stats", "--data-dir", "/srv/trips"])
                .unwrap();
        std::env::remove_var("BIKESHARE_DATA_DIR");

        assert_eq!(env.data_dir.as_deref(), Some("."));
        assert!(env.data_dir_from_env);
        assert!(!flag_over_env.data_dir_from_env);
    }

    #[test]
    fn test_page_size_validation() {
        let config =
            CliConfig::try_parse_from(["bikeshare-stats", "--page-size", "0"]).unwrap();
        assert!(config.validate().is_err());
    }
}
