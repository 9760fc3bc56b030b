use std::path::Path;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Clone, Deserialize, Debug)]
pub struct AppConfig {
    /// Line-delimited JSON file loaded when no path is given on the command line.
    #[serde(default)]
    pub dataset_path: Option<String>,
    /// Fail when a closed conversation id shows up again.
    #[serde(default)]
    pub strict_ordering: bool,
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            dataset_path: None,
            strict_ordering: false,
            log_filter: default_log_filter(),
        }
    }
}

pub fn get_config() -> Result<AppConfig, ConfigError> {
    let config = Config::builder()
        .add_source(File::with_name("config").required(false))
        .add_source(Environment::default())
        .build()?;

    config.try_deserialize()
}

/// Same layering as [`get_config`] but reading an explicit config file.
pub fn get_config_from(path: &Path) -> Result<AppConfig, ConfigError> {
    let config = Config::builder()
        .add_source(File::from(path).required(true))
        .add_source(Environment::default())
        .build()?;

    config.try_deserialize()
}
