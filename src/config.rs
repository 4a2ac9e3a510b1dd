use crate::core::report::Status;
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use tracing::debug;

pub const CONFIG_FILE_NAME: &str = "moodcheck.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub batch: BatchConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GeneralConfig {
    pub fail_on: FailOn,
    pub json: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            fail_on: FailOn::High,
            json: false,
        }
    }
}

/// Lowest severity bucket that turns the exit code into a failure.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum FailOn {
    None,
    Moderate,
    #[default]
    High,
}

impl fmt::Display for FailOn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Moderate => write!(f, "moderate"),
            Self::High => write!(f, "high"),
        }
    }
}

impl FailOn {
    pub fn is_triggered_by(self, status: Status) -> bool {
        match self {
            Self::None => false,
            Self::Moderate => status >= Status::Moderate,
            Self::High => status >= Status::High,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BatchConfig {
    pub extensions: Vec<String>,
    pub exclude: Vec<String>,
    pub max_file_size_kb: u64,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            extensions: vec!["json".to_string(), "toml".to_string()],
            exclude: vec![
                ".git".to_string(),
                "target".to_string(),
                "node_modules".to_string(),
            ],
            max_file_size_kb: 64,
        }
    }
}

pub fn load_config(cli_config_path: Option<&Path>, cwd: &Path) -> Result<Config> {
    if let Some(path) = cli_config_path {
        if !path.exists() {
            bail!(
                "config file not found at {} (passed with --config)",
                path.display()
            );
        }

        debug!(path = %path.display(), "loading config from --config");
        return read_config(path);
    }

    let local_path = cwd.join(CONFIG_FILE_NAME);
    if local_path.exists() {
        debug!(path = %local_path.display(), "loading local config");
        return read_config(&local_path);
    }

    debug!("no config file found, using defaults");
    Ok(Config::default())
}

pub fn write_default_config(path: &Path) -> Result<()> {
    if path.exists() {
        bail!(
            "refusing to overwrite existing config file: {}",
            path.display()
        );
    }

    let content = default_config_toml()?;
    fs::write(path, content).with_context(|| format!("failed writing {}", path.display()))?;
    Ok(())
}

pub fn default_config_toml() -> Result<String> {
    toml::to_string_pretty(&Config::default()).context("failed to serialize default config")
}

fn read_config(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed reading config file {}", path.display()))?;
    let config = toml::from_str::<Config>(&content)
        .with_context(|| format!("failed parsing config file {}", path.display()))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_round_trips_through_init() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);

        write_default_config(&path).unwrap();
        let loaded = load_config(None, dir.path()).unwrap();
        assert_eq!(loaded, Config::default());

        assert!(write_default_config(&path).is_err());
    }

    #[test]
    fn partial_config_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        fs::write(&path, "[general]\nfail_on = \"moderate\"\n").unwrap();

        let loaded = load_config(Some(&path), dir.path()).unwrap();
        assert_eq!(loaded.general.fail_on, FailOn::Moderate);
        assert!(!loaded.general.json);
        assert_eq!(loaded.batch, BatchConfig::default());
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(load_config(Some(&missing), dir.path()).is_err());
    }

    #[test]
    fn fail_on_thresholds() {
        assert!(!FailOn::None.is_triggered_by(Status::High));
        assert!(FailOn::Moderate.is_triggered_by(Status::Moderate));
        assert!(!FailOn::Moderate.is_triggered_by(Status::Low));
        assert!(FailOn::High.is_triggered_by(Status::High));
        assert!(!FailOn::High.is_triggered_by(Status::Moderate));
    }
}
