use std::path::PathBuf;

use thiserror::Error;

use crate::app_dirs::AppDirError;

/// Errors that may occur while loading or saving the settings file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The app directory could not be resolved or created.
    #[error("Config directory unavailable: {0}")]
    AppDir(#[from] AppDirError),
    /// Failed to read the settings file.
    #[error("Failed to read {path}: {source}")]
    Read {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },
    /// Failed to write the settings file.
    #[error("Failed to write {path}: {source}")]
    Write {
        /// Path that failed to write.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },
    /// The settings file is not valid TOML for [`super::AppSettings`].
    #[error("Invalid config at {path}: {source}")]
    ParseToml {
        /// TOML file path.
        path: PathBuf,
        /// TOML parse error.
        source: toml::de::Error,
    },
    /// Failed to serialize settings to TOML.
    #[error("Failed to serialize config to TOML at {path}: {source}")]
    SerializeToml {
        /// TOML file path.
        path: PathBuf,
        /// TOML serialization error.
        source: toml::ser::Error,
    },
    /// The configured prediction service URL cannot be used as a base URL.
    #[error("Invalid prediction service URL '{url}': {reason}")]
    InvalidBaseUrl {
        /// Offending URL text.
        url: String,
        /// Why it was rejected.
        reason: String,
    },
}
