use crate::config::{validate_common, DEFAULT_DATA_DIR};
use crate::core::pager::DEFAULT_PAGE_SIZE;
use crate::core::{City, ConfigProvider};
use crate::domain::model::OutputFormat;
use crate::utils::error::{BikeshareError, Result};
use crate::utils::validation::{validate_file_extensions, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub data: DataConfig,
    pub pager: Option<PagerConfig>,
    pub output: Option<OutputConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub dir: String,
    #[serde(default)]
    pub files: CityFiles,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            dir: default_data_dir(),
            files: CityFiles::default(),
        }
    }
}

/// Per-city file names; unset entries fall back to the standard names.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CityFiles {
    pub chicago: Option<String>,
    pub new_york_city: Option<String>,
    pub washington: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PagerConfig {
    pub page_size: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: Option<OutputFormat>,
}

fn default_data_dir() -> String {
    DEFAULT_DATA_DIR.to_string()
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| BikeshareError::ConfigError {
            message: format!("cannot read {}: {}", path.as_ref().display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| BikeshareError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${DATA_ROOT})
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| BikeshareError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// Command-line flags win over file values. `BIKESHARE_DATA_DIR` does
    /// not: the file's `[data] dir` is kept when the directory came from it.
    #[cfg(feature = "cli")]
    pub fn apply_cli_overrides(&mut self, cli: &crate::config::CliConfig) {
        match &cli.data_dir {
            Some(dir) if cli.data_dir_from_env => {
                tracing::debug!("Ignoring BIKESHARE_DATA_DIR={} in favour of [data] dir", dir);
            }
            Some(dir) => {
                tracing::info!("🔧 Data directory overridden to: {}", dir);
                self.data.dir = dir.clone();
            }
            None => {}
        }
        if let Some(page_size) = cli.page_size {
            self.pager = Some(PagerConfig {
                page_size: Some(page_size),
            });
        }
        if let Some(format) = cli.format {
            self.output = Some(OutputConfig {
                format: Some(format),
            });
        }
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_common(self)?;

        let files: Vec<&str> = City::ALL.iter().map(|city| self.city_file(*city)).collect();
        validate_file_extensions("data.files", &files, &["csv"])?;

        Ok(())
    }
}

impl ConfigProvider for TomlConfig {
    fn data_dir(&self) -> &str {
        &self.data.dir
    }

    fn city_file(&self, city: City) -> &str {
        let configured = match city {
            City::Chicago => &self.data.files.chicago,
            City::NewYorkCity => &self.data.files.new_york_city,
            City::Washington => &self.data.files.washington,
        };
        configured.as_deref().unwrap_or(city.default_file())
    }

    fn page_size(&self) -> usize {
        self.pager
            .as_ref()
            .and_then(|p| p.page_size)
            .unwrap_or(DEFAULT_PAGE_SIZE)
    }

    fn output_format(&self) -> OutputFormat {
        self.output
            .as_ref()
            .and_then(|o| o.format)
            .unwrap_or_default()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_toml_config() {
        let toml_content = r#"
[data]
dir = "./data"

[data.files]
new_york_city = "nyc_2017.csv"

[pager]
page_size = 10

[output]
format = "json"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.data_dir(), "./data");
        assert_eq!(config.city_file(City::NewYorkCity), "nyc_2017.csv");
        assert_eq!(config.city_file(City::Chicago), "chicago.csv");
        assert_eq!(config.page_size(), 10);
        assert_eq!(config.output_format(), OutputFormat::Json);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();

        assert_eq!(config.data_dir(), ".");
        assert_eq!(config.page_size(), 5);
        assert_eq!(config.output_format(), OutputFormat::Text);
        assert_eq!(config.city_file(City::Washington), "washington.csv");
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("BIKESHARE_TEST_DATA_ROOT", "/srv/bikeshare");

        let toml_content = r#"
[data]
dir = "${BIKESHARE_TEST_DATA_ROOT}/2017"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.data.dir, "/srv/bikeshare/2017");

        std::env::remove_var("BIKESHARE_TEST_DATA_ROOT");
    }

    #[test]
    fn test_config_validation() {
        let bad_extension = TomlConfig::from_toml_str(
            r#"
[data.files]
chicago = "chicago.xlsx"
"#,
        )
        .unwrap();
        assert!(bad_extension.validate().is_err());

        let bad_page_size = TomlConfig::from_toml_str(
            r#"
[pager]
page_size = 0
"#,
        )
        .unwrap();
        assert!(bad_page_size.validate().is_err());
    }

    #[test]
    fn test_invalid_toml_is_reported() {
        let err = TomlConfig::from_toml_str("[data\ndir = 1").unwrap_err();
        assert!(matches!(err, BikeshareError::ConfigValidationError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[data]
dir = "/tmp/trips"
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.data_dir(), "/tmp/trips");
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_cli_overrides() {
        use crate::config::CliConfig;

        let toml_content = r#"
[data]
dir = "/srv/from-file"
"#;
        let flags = CliConfig::try_parse_args_from([
            "bikeshare-stats",
            "--data-dir",
            "/srv/from-flag",
            "--page-size",
            "8",
        ])
        .unwrap();
        let mut config = TomlConfig::from_toml_str(toml_content).unwrap();
        config.apply_cli_overrides(&flags);
        assert_eq!(config.data_dir(), "/srv/from-flag");
        assert_eq!(config.page_size(), 8);

        let from_env = CliConfig {
            data_dir: Some("/srv/from-env".to_string()),
            data_dir_from_env: true,
            ..CliConfig::try_parse_args_from(["bikeshare-stats"]).unwrap()
        };
        let mut config = TomlConfig::from_toml_str(toml_content).unwrap();
        config.apply_cli_overrides(&from_env);
        assert_eq!(config.data_dir(), "/srv/from-file");
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let err = TomlConfig::from_file("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, BikeshareError::ConfigError { .. }));
    }
}
