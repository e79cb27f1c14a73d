use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read settings file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Which recognizer turns receipt files into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OcrBackendKind {
    /// Receipt files already contain recognized text.
    #[default]
    Plain,
    /// Run Tesseract on image files (needs the `tesseract` build feature).
    Tesseract,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OcrSettings {
    #[serde(default)]
    pub backend: OcrBackendKind,
    /// Tesseract language code
    #[serde(default = "default_language")]
    pub language: String,
    /// Tesseract tessdata directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_path: Option<String>,
}

impl Default for OcrSettings {
    fn default() -> Self {
        Self {
            backend: OcrBackendKind::default(),
            language: default_language(),
            data_path: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// `tracing` filter used when `RUST_LOG` is unset
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
    /// Tax percent given to items read from receipts
    #[serde(default)]
    pub default_tax_percent: f64,
    #[serde(default)]
    pub ocr: OcrSettings,
}

fn default_language() -> String {
    "eng".to_string()
}

fn default_log_filter() -> String {
    "warn".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter(),
            default_tax_percent: 0.0,
            ocr: OcrSettings::default(),
        }
    }
}

impl Settings {
    /// Load from `explicit` if given (it must exist), otherwise from the
    /// platform config directory if a file is there, otherwise defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => match default_path() {
                Some(path) if path.exists() => Self::from_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

fn default_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("com", "easesplit", "EaseSplit")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}
