use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result as AnyResult};
use directories::ProjectDirs;
use log::debug;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Timeout for each call to sessiond, in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Backlight to use when a command does not name one
    #[serde(default)]
    pub backlight: Option<String>,

    /// Audio sink to use when a command does not name one. If unset, sessiond's default audio
    /// sink is used.
    #[serde(default)]
    pub audiosink: Option<String>,

    /// "Who" string for inhibitors added by `sessionctl inhibit`
    #[serde(default = "default_who")]
    pub who: String,
}

fn default_timeout_ms() -> u64 {
    25_000
}

fn default_who() -> String {
    "sessionctl".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            timeout_ms: default_timeout_ms(),
            backlight: None,
            audiosink: None,
            who: default_who(),
        }
    }
}

impl Config {
    /// Location of the config file when none is given on the command line.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("org", "sessiond", "sessionctl")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Loads the config file at `path`, or from [`Config::default_path`] if `path` is `None`.
    /// A missing default config file is not an error.
    pub fn load(path: Option<&Path>) -> AnyResult<Config> {
        match path {
            Some(path) => Config::read(path),
            None => match Config::default_path() {
                Some(ref path) if path.exists() => Config::read(path),
                _ => {
                    debug!("No config file found, using defaults");
                    Ok(Config::default())
                }
            },
        }
    }

    fn read(path: &Path) -> AnyResult<Config> {
        debug!("Loading config from {}", path.display());
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Could not read config file {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}
