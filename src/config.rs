//! Configuration Module
//! Input/output paths and filter tunables, loaded from JSON and overridden by CLI flags.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_FULL_INPUT: &str = "df_M30.csv";
pub const DEFAULT_LITTLE_INPUT: &str = "df_M30_little.csv";
pub const DEFAULT_OUTPUT: &str = "df_M30_little.csv";
pub const DEFAULT_ID_PATTERN: &str = "PM1.*1$";
pub const DEFAULT_ID_LENGTH: usize = 7;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Delimiter must be a single ASCII character, got {0:?}")]
    BadDelimiter(char),
    #[error("Invalid id pattern: {0}")]
    BadPattern(#[from] regex::Error),
    #[error("id_length must be greater than zero")]
    ZeroLength,
}

/// Run configuration. Every field has a default so a partial JSON file is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub data_dir: PathBuf,
    pub full_input: PathBuf,
    pub little_input: PathBuf,
    pub output: PathBuf,
    pub delimiter: char,
    pub id_pattern: String,
    pub id_length: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            full_input: PathBuf::from(DEFAULT_FULL_INPUT),
            little_input: PathBuf::from(DEFAULT_LITTLE_INPUT),
            output: PathBuf::from(DEFAULT_OUTPUT),
            delimiter: ';',
            id_pattern: DEFAULT_ID_PATTERN.to_string(),
            id_length: DEFAULT_ID_LENGTH,
        }
    }
}

impl Config {
    /// Load a JSON config file. Missing fields keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&text)?;
        Ok(config)
    }

    /// Check the tunables before any file is touched.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.delimiter_byte()?;
        self.id_regex()?;
        if self.id_length == 0 {
            return Err(ConfigError::ZeroLength);
        }
        Ok(())
    }

    pub fn delimiter_byte(&self) -> Result<u8, ConfigError> {
        if self.delimiter.is_ascii() {
            Ok(self.delimiter as u8)
        } else {
            Err(ConfigError::BadDelimiter(self.delimiter))
        }
    }

    pub fn id_regex(&self) -> Result<Regex, ConfigError> {
        Ok(Regex::new(&self.id_pattern)?)
    }

    pub fn full_input_path(&self) -> PathBuf {
        self.data_dir.join(&self.full_input)
    }

    pub fn little_input_path(&self) -> PathBuf {
        self.data_dir.join(&self.little_input)
    }

    pub fn output_path(&self) -> PathBuf {
        self.data_dir.join(&self.output)
    }
}
