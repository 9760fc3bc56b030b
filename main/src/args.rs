use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use common::utils::config::AppConfig;
use conversation_datasets::GroupingMode;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Path to the OrConvQA line-delimited JSON file
    #[arg(long, env = "ORCONVQA_DATASET")]
    pub dataset: Option<PathBuf>,

    /// Fail when a conversation id reappears after another conversation
    #[arg(long)]
    pub strict: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print conversation, turn and evidence counts
    Summary,
    /// Print one conversation as JSON
    Show {
        /// Position of the conversation in the file
        index: usize,
    },
    /// Stream conversation ids with their turn counts
    List,
}

pub struct ParsedArgs {
    pub dataset_path: PathBuf,
    pub mode: GroupingMode,
    pub command: Command,
}

impl Config {
    /// Merge command line flags over the file/environment configuration.
    pub fn resolve(self, app_config: &AppConfig) -> Result<ParsedArgs> {
        let dataset_path = self
            .dataset
            .or_else(|| app_config.dataset_path.as_ref().map(PathBuf::from))
            .ok_or_else(|| {
                anyhow!("no dataset given; pass --dataset or set dataset_path in the config")
            })?;

        let mode = if self.strict || app_config.strict_ordering {
            GroupingMode::Strict
        } else {
            GroupingMode::Trusting
        };

        Ok(ParsedArgs {
            dataset_path,
            mode,
            command: self.command,
        })
    }
}

pub fn parse(app_config: &AppConfig) -> Result<ParsedArgs> {
    Config::parse().resolve(app_config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_overrides_configured_dataset() {
        let app_config = AppConfig {
            dataset_path: Some("configured.txt".to_string()),
            ..AppConfig::default()
        };
        let parsed = Config::try_parse_from(["orconvqa", "--dataset", "cli.txt", "summary"])
            .unwrap()
            .resolve(&app_config)
            .unwrap();

        assert_eq!(parsed.dataset_path, PathBuf::from("cli.txt"));
        assert_eq!(parsed.mode, GroupingMode::Trusting);
        assert_eq!(parsed.command, Command::Summary);
    }

    #[test]
    fn falls_back_to_configured_dataset_and_strictness() {
        let app_config = AppConfig {
            dataset_path: Some("configured.txt".to_string()),
            strict_ordering: true,
            ..AppConfig::default()
        };
        let parsed = Config::try_parse_from(["orconvqa", "show", "3"])
            .unwrap()
            .resolve(&app_config)
            .unwrap();

        assert_eq!(parsed.dataset_path, PathBuf::from("configured.txt"));
        assert_eq!(parsed.mode, GroupingMode::Strict);
        assert_eq!(parsed.command, Command::Show { index: 3 });
    }

    #[test]
    fn missing_dataset_is_an_error() {
        let result = Config::try_parse_from(["orconvqa", "list"])
            .unwrap()
            .resolve(&AppConfig::default());
        assert!(result.is_err());
    }
}
