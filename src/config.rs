//! Configuration for the board.
//!
//! Settings are layered, highest priority first:
//! 1. CLI flags
//! 2. Environment variables (via clap `env`)
//! 3. TOML config file (`<config dir>/taskboard/config.toml`)
//! 4. Built-in defaults
//!
//! A missing default config file is not an error. A `--config` path that does
//! not exist is.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::cli::Cli;
use crate::fields::ViewMode;

const APP_DIR: &str = "taskboard";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// On-disk config. Every field is optional so a file may set only a few.
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    data_dir: Option<PathBuf>,
    log_level: Option<String>,
    log_file: Option<PathBuf>,
    default_view: Option<ViewMode>,
}

/// Fully resolved settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Directory holding `tasks.json`.
    pub data_dir: PathBuf,
    /// Default log filter.
    pub log_level: String,
    /// Where the board UI writes its log.
    pub log_file: PathBuf,
    /// Layout the board UI opens in.
    pub default_view: ViewMode,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            data_dir: default_data_dir(),
            log_level: "info".to_string(),
            log_file: std::env::temp_dir().join("taskboard.log"),
            default_view: ViewMode::Kanban,
        }
    }
}

impl Config {
    /// Resolve settings from the CLI (and its env fallbacks) and the config file.
    pub fn load(cli: &Cli) -> Result<Config, ConfigError> {
        let file = match &cli.config {
            Some(path) => Some(read_config_file(path)?),
            None => match default_config_path() {
                Some(path) if path.exists() => Some(read_config_file(&path)?),
                _ => None,
            },
        };
        Ok(Config::resolve(cli, file.unwrap_or_default()))
    }

    fn resolve(cli: &Cli, file: ConfigFile) -> Config {
        let defaults = Config::default();
        Config {
            data_dir: cli.data_dir.clone().or(file.data_dir).unwrap_or(defaults.data_dir),
            log_level: cli.log_level.clone().or(file.log_level).unwrap_or(defaults.log_level),
            log_file: cli.log_file.clone().or(file.log_file).unwrap_or(defaults.log_file),
            default_view: cli.view.or(file.default_view).unwrap_or(defaults.default_view),
        }
    }
}

fn read_config_file(path: &Path) -> Result<ConfigFile, ConfigError> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// `<config dir>/taskboard/config.toml`, if the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_DIR).join("config.toml"))
}

/// `<data dir>/taskboard`, or `./.taskboard` when there is no data dir.
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join(APP_DIR))
        .unwrap_or_else(|| PathBuf::from(".").join(format!(".{APP_DIR}")))
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("board").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = Config::resolve(&cli(&["list"]), ConfigFile::default());
        assert_eq!(config.log_level, "info");
        assert_eq!(config.default_view, ViewMode::Kanban);
        assert!(config.data_dir.ends_with(APP_DIR) || config.data_dir.ends_with(".taskboard"));
    }

    #[test]
    fn file_overrides_defaults_and_cli_overrides_file() {
        let file: ConfigFile = toml::from_str(
            r#"
            data_dir = "/srv/board"
            log_level = "debug"
            default_view = "list"
            "#,
        )
        .unwrap();

        let config = Config::resolve(&cli(&["--data-dir", "/tmp/other", "list"]), file);
        assert_eq!(config.data_dir, PathBuf::from("/tmp/other"));
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.default_view, ViewMode::List);
    }

    #[test]
    fn explicit_missing_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        let args = cli(&["--config", missing.to_str().unwrap(), "list"]);
        assert!(matches!(Config::load(&args), Err(ConfigError::ReadFile { .. })));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "colour = \"red\"\n").unwrap();
        let args = cli(&["--config", path.to_str().unwrap(), "list"]);
        assert!(matches!(Config::load(&args), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn explicit_config_file_is_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "default_view = \"list\"\nlog_file = \"/tmp/b.log\"\n").unwrap();
        let config = Config::load(&cli(&["--config", path.to_str().unwrap()])).unwrap();
        assert_eq!(config.default_view, ViewMode::List);
        assert_eq!(config.log_file, PathBuf::from("/tmp/b.log"));
    }
}
