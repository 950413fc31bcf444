//! `migen.toml` configuration.
//!
//! Lookup order: an explicit path, then `./migen.toml`, then
//! `<config_dir>/migen/config.toml`. Missing implicit files fall back to
//! defaults; a missing explicit file is an error.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::parser::ParseMode;
use crate::validate::{DEFAULT_SQL_MAX_LEN, DEFAULT_SQL_MIN_LEN, SqlLimits};

pub const CONFIG_FILE: &str = "migen.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Root for `migrations/` and the record history file.
    pub storage_root: PathBuf,
    pub strict: bool,
    pub sql_min_len: usize,
    pub sql_max_len: usize,
    /// Stamped on new records.
    pub created_by: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_root: PathBuf::from("storage/app"),
            strict: false,
            sql_min_len: DEFAULT_SQL_MIN_LEN,
            sql_max_len: DEFAULT_SQL_MAX_LEN,
            created_by: None,
        }
    }
}

impl Config {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::read(path);
        }
        for path in Self::candidate_paths() {
            if path.is_file() {
                return Self::read(&path);
            }
        }
        debug!("no config file found, using defaults");
        Ok(Self::default())
    }

    pub fn candidate_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(CONFIG_FILE)];
        if let Some(dir) = dirs::config_dir() {
            paths.push(dir.join("migen").join("config.toml"));
        }
        paths
    }

    fn read(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loaded config");
        Self::from_toml_str(&content)
    }

    pub fn parse_mode(&self) -> ParseMode {
        if self.strict {
            ParseMode::Strict
        } else {
            ParseMode::Lenient
        }
    }

    pub fn sql_limits(&self) -> SqlLimits {
        SqlLimits {
            min: self.sql_min_len,
            max: self.sql_max_len,
        }
    }
}
