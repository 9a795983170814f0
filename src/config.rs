//! Application settings persisted as TOML under the app directory.

mod errors;

use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::app_dirs;
use crate::locale::Locale;

pub use errors::ConfigError;

/// Default filename used to store the app settings.
pub const CONFIG_FILE_NAME: &str = "config.toml";
/// Environment variable that replaces `service.base_url`.
pub const API_URL_ENV: &str = "CARDIOFORM_API_URL";

const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Settings loaded from `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    /// Language used for labels, messages and summaries.
    #[serde(default)]
    pub locale: Locale,
    /// Prediction service connection settings.
    #[serde(default)]
    pub service: ServiceSettings,
}

/// Where and how to reach the prediction service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_read_timeout_secs")]
    pub read_timeout_secs: u64,
    /// Upper bound on response bodies read from the service.
    #[serde(default = "default_max_response_bytes")]
    pub max_response_bytes: usize,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            connect_timeout_secs: default_connect_timeout_secs(),
            read_timeout_secs: default_read_timeout_secs(),
            max_response_bytes: default_max_response_bytes(),
        }
    }
}

impl ServiceSettings {
    /// Parse the base URL so endpoint paths can be joined onto it.
    ///
    /// A missing trailing slash is added, otherwise `Url::join` would drop
    /// the last path segment of deployments mounted under a prefix.
    pub fn endpoint_base(&self) -> Result<Url, ConfigError> {
        let trimmed = self.base_url.trim();
        let invalid = |reason: String| ConfigError::InvalidBaseUrl {
            url: trimmed.to_string(),
            reason,
        };
        let mut url = Url::parse(trimmed).map_err(|err| invalid(err.to_string()))?;
        if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
            return Err(invalid("expected an http(s) URL".to_string()));
        }
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(url)
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_read_timeout_secs() -> u64 {
    30
}

fn default_max_response_bytes() -> usize {
    1024 * 1024
}

/// Resolve the settings file path inside the app directory.
pub fn config_path() -> Result<PathBuf, ConfigError> {
    Ok(app_dirs::app_root_dir()?.join(CONFIG_FILE_NAME))
}

/// Load settings from disk, returning defaults if the file is missing.
///
/// `CARDIOFORM_API_URL` takes precedence over the stored base URL.
pub fn load_or_default() -> Result<AppSettings, ConfigError> {
    let settings = load_from_path(&config_path()?)?;
    Ok(apply_env_overrides(
        settings,
        std::env::var(API_URL_ENV).ok(),
    ))
}

/// Persist settings, replacing the previous file atomically.
pub fn save(settings: &AppSettings) -> Result<(), ConfigError> {
    save_to_path(settings, &config_path()?)
}

/// Store a language choice without touching the rest of the file.
///
/// The file is re-read so environment overrides and start-up fallbacks in
/// the running settings are never written back. A file that does not parse
/// is left as it is and the error returned.
pub fn save_locale(locale: Locale) -> Result<(), ConfigError> {
    save_locale_to_path(locale, &config_path()?)
}

fn save_locale_to_path(locale: Locale, path: &Path) -> Result<(), ConfigError> {
    let mut stored = load_from_path(path)?;
    if stored.locale == locale && path.exists() {
        return Ok(());
    }
    stored.locale = locale;
    save_to_path(&stored, path)
}

pub(crate) fn load_from_path(path: &Path) -> Result<AppSettings, ConfigError> {
    if !path.exists() {
        return Ok(AppSettings::default());
    }
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&text).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })
}

pub(crate) fn save_to_path(settings: &AppSettings, path: &Path) -> Result<(), ConfigError> {
    let data = toml::to_string_pretty(settings).map_err(|source| ConfigError::SerializeToml {
        path: path.to_path_buf(),
        source,
    })?;
    let write_err = |source: std::io::Error| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    };
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(dir).map_err(write_err)?;
    let mut file = tempfile::NamedTempFile::new_in(dir).map_err(write_err)?;
    file.write_all(data.as_bytes()).map_err(write_err)?;
    file.as_file().sync_all().map_err(write_err)?;
    file.persist(path).map_err(|err| write_err(err.error))?;
    Ok(())
}

fn apply_env_overrides(mut settings: AppSettings, api_url: Option<String>) -> AppSettings {
    if let Some(url) = api_url.filter(|url| !url.trim().is_empty()) {
        tracing::debug!(%url, "Using prediction service URL from {API_URL_ENV}");
        settings.service.base_url = url.trim().to_string();
    }
    settings
}
