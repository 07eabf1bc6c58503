// Configuration for chonkgrep
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

// Fragment length bounds
pub const DEFAULT_MAX_LENGTH: usize = 500;
pub const MIN_MAX_LENGTH: usize = 80;
pub const MAX_MAX_LENGTH: usize = 2000;

// Export defaults
pub const DEFAULT_CSV_NAME: &str = "results.csv";
pub const DEFAULT_LOG_NAME: &str = "results.log";
pub const CONFIG_FILE_NAME: &str = "chonkgrep.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub case_sensitive: bool,
    #[serde(default = "default_max_length")]
    pub max_length: usize,
    #[serde(default)]
    pub export: ExportConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ExportConfig {
    /// Always write a CSV here, even without `--csv`.
    pub csv: Option<PathBuf>,
    /// Always write a log here, even without `--log`.
    pub log: Option<PathBuf>,
}

fn default_max_length() -> usize { DEFAULT_MAX_LENGTH }

impl Default for Settings {
    fn default() -> Self {
        Self {
            case_sensitive: false,
            max_length: DEFAULT_MAX_LENGTH,
            export: ExportConfig::default(),
        }
    }
}

impl Settings {
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Loads an explicit config file, or `./chonkgrep.toml` when it exists.
    /// No file at all means defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let fallback = PathBuf::from(CONFIG_FILE_NAME);
                if !fallback.exists() {
                    return Ok(Self::default());
                }
                fallback
            }
        };
        let content = fs::read_to_string(&path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_toml(&content).with_context(|| format!("parsing config {}", path.display()))
    }

    /// Applies `CHONKGREP_MAX_LENGTH` and `CHONKGREP_CASE_SENSITIVE`.
    pub fn apply_env(&mut self) -> Result<()> {
        if let Ok(raw) = env::var("CHONKGREP_MAX_LENGTH") {
            self.max_length = raw
                .trim()
                .parse()
                .with_context(|| format!("CHONKGREP_MAX_LENGTH is not a number: {raw}"))?;
        }
        if let Ok(raw) = env::var("CHONKGREP_CASE_SENSITIVE") {
            self.case_sensitive = parse_flag(&raw)
                .with_context(|| format!("CHONKGREP_CASE_SENSITIVE is not a boolean: {raw}"))?;
        }
        Ok(())
    }

    pub fn clamped_max_length(&self) -> usize {
        clamp_max_length(self.max_length)
    }
}

pub fn clamp_max_length(len: usize) -> usize {
    len.clamp(MIN_MAX_LENGTH, MAX_MAX_LENGTH)
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
