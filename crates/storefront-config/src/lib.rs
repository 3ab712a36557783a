//! Configuration for the Storefront client.
//!
//! TOML file plus `STOREFRONT_` environment overrides, platform paths,
//! and translation into a ready [`StorefrontClient`] and [`TokenStore`].

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use thiserror::Error;
use tracing::debug;

use storefront_api::{Endpoints, StorefrontClient, TlsMode, TransportConfig};
use storefront_core::{JsonFileStore, KeyringStore, MemoryStore, TokenStore};

const QUALIFIER: &str = "com";
const ORGANIZATION: &str = "storefront";
const APPLICATION: &str = "storefront";

/// Keyring service name the session token is stored under.
pub const KEYRING_SERVICE: &str = "storefront";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("HTTP client setup failed: {0}")]
    Client(#[from] storefront_api::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiSettings,

    #[serde(default)]
    pub session: SessionSettings,

    #[serde(default)]
    pub ui: UiSettings,
}

/// Where the API lives and how to reach it.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ApiSettings {
    /// API root (e.g., "https://shop.example.com/api").
    pub base_url: String,

    pub login_path: String,

    pub products_path: String,

    /// Per-request timeout in seconds.
    pub timeout: u64,

    /// Accept invalid TLS certificates.
    pub insecure: bool,

    /// Path to a custom CA certificate.
    pub ca_cert: Option<PathBuf>,
}

impl Default for ApiSettings {
    fn default() -> Self {
        let endpoints = Endpoints::default();
        Self {
            base_url: "http://localhost:8080".into(),
            login_path: endpoints.login,
            products_path: endpoints.products,
            timeout: 30,
            insecure: false,
            ca_cert: None,
        }
    }
}

/// Which backend keeps the session token.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum StoreKind {
    /// JSON file in the platform data directory.
    #[default]
    File,
    /// OS keyring.
    Keyring,
    /// Process memory; the session ends with the process.
    Memory,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SessionSettings {
    pub store: StoreKind,

    /// Override the session file location (file store only).
    pub file: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct UiSettings {
    /// Navigation bar title.
    pub title: String,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            title: "Storefront".into(),
        }
    }
}

// ── Paths ───────────────────────────────────────────────────────────

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
}

fn home_fallback(parts: &[&str]) -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.extend(parts);
    p
}

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    project_dirs().map_or_else(
        || home_fallback(&[".config", APPLICATION, "config.toml"]),
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

/// Directory for the session file and logs.
pub fn data_dir() -> PathBuf {
    project_dirs().map_or_else(
        || home_fallback(&[".local", "share", APPLICATION]),
        |dirs| dirs.data_local_dir().to_path_buf(),
    )
}

/// Default session file for the file store.
pub fn session_path() -> PathBuf {
    data_dir().join("session.json")
}

/// Default log file.
pub fn log_path() -> PathBuf {
    data_dir().join("storefront.log")
}

// ── Config loading ──────────────────────────────────────────────────

/// Load config from `path` + environment. A missing file yields defaults.
///
/// Nested keys are addressed with a double underscore, e.g.
/// `STOREFRONT_API__BASE_URL`.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    debug!(path = %path.display(), "loading config");
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("STOREFRONT_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write it to `path`.
pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Translation ─────────────────────────────────────────────────────

impl ApiSettings {
    fn parsed_base_url(&self) -> Result<url::Url, ConfigError> {
        self.base_url.parse().map_err(|_| ConfigError::Validation {
            field: "api.base_url".into(),
            reason: format!("invalid URL: {}", self.base_url),
        })
    }

    fn transport(&self) -> TransportConfig {
        let tls = if self.insecure {
            TlsMode::DangerAcceptInvalid
        } else if let Some(ref ca_path) = self.ca_cert {
            TlsMode::CustomCa(ca_path.clone())
        } else {
            TlsMode::System
        };
        TransportConfig {
            tls,
            timeout: Duration::from_secs(self.timeout),
        }
    }
}

impl Config {
    /// Build the HTTP client described by `[api]`.
    pub fn to_client(&self) -> Result<StorefrontClient, ConfigError> {
        let base_url = self.api.parsed_base_url()?;
        if self.api.timeout == 0 {
            return Err(ConfigError::Validation {
                field: "api.timeout".into(),
                reason: "must be at least one second".into(),
            });
        }
        let endpoints = Endpoints {
            login: self.api.login_path.clone(),
            products: self.api.products_path.clone(),
        };
        Ok(StorefrontClient::new(
            base_url,
            endpoints,
            &self.api.transport(),
        )?)
    }

    /// Open the token store selected by `[session]`.
    pub fn token_store(&self) -> TokenStore {
        debug!(store = %self.session.store, "opening token store");
        match self.session.store {
            StoreKind::File => {
                let path = self.session.file.clone().unwrap_or_else(session_path);
                TokenStore::new(Arc::new(JsonFileStore::new(path)))
            }
            StoreKind::Keyring => TokenStore::new(Arc::new(KeyringStore::new(KEYRING_SERVICE))),
            StoreKind::Memory => TokenStore::new(Arc::new(MemoryStore::default())),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use pretty_assertions::assert_eq;
    use secrecy::{ExposeSecret, SecretString};

    use super::*;

    fn write(dir: &tempfile::TempDir, body: &str) -> PathBuf {
        let path = dir.path().join("config.toml");
        std::fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.api.login_path, "/auth/login");
        assert_eq!(cfg.api.products_path, "/products");
        assert_eq!(cfg.session.store, StoreKind::File);
    }

    #[test]
    fn file_values_override_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            &dir,
            r#"
            [api]
            base_url = "https://shop.example.com/api"
            timeout = 5

            [session]
            store = "memory"

            [ui]
            title = "My Shop"
            "#,
        );

        let cfg = load_config_from(&path).unwrap();

        assert_eq!(cfg.api.base_url, "https://shop.example.com/api");
        assert_eq!(cfg.api.timeout, 5);
        assert_eq!(cfg.api.login_path, "/auth/login");
        assert_eq!(cfg.session.store, StoreKind::Memory);
        assert_eq!(cfg.ui.title, "My Shop");
    }

    #[test]
    fn unknown_store_kind_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "[session]\nstore = \"cloud\"\n");
        assert!(matches!(
            load_config_from(&path),
            Err(ConfigError::Figment(_))
        ));
    }

    #[test]
    fn store_kind_parses_from_flag_text() {
        assert_eq!("keyring".parse::<StoreKind>().unwrap(), StoreKind::Keyring);
        assert_eq!(StoreKind::Memory.to_string(), "memory");
        assert!("cloud".parse::<StoreKind>().is_err());
    }

    #[test]
    fn saved_config_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut cfg = Config::default();
        cfg.ui.title = "Saved".into();
        cfg.session.store = StoreKind::Keyring;

        save_config_to(&cfg, &path).unwrap();

        assert_eq!(load_config_from(&path).unwrap(), cfg);
    }

    #[test]
    fn client_uses_configured_endpoints() {
        let mut cfg = Config::default();
        cfg.api.base_url = "https://shop.example.com/api".into();
        cfg.api.login_path = "/session".into();

        let client = cfg.to_client().unwrap();

        assert_eq!(client.base_url().as_str(), "https://shop.example.com/api");
        assert_eq!(client.endpoints().login, "/session");
        assert_eq!(client.endpoints().products, "/products");
    }

    #[test]
    fn invalid_base_url_is_a_validation_error() {
        let mut cfg = Config::default();
        cfg.api.base_url = "not a url".into();
        let err = cfg.to_client().unwrap_err();
        assert!(matches!(err, ConfigError::Validation { ref field, .. } if field == "api.base_url"));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let mut cfg = Config::default();
        cfg.api.timeout = 0;
        assert!(matches!(
            cfg.to_client(),
            Err(ConfigError::Validation { .. })
        ));
    }

    #[test]
    fn file_store_writes_to_configured_path() {
        let dir = tempfile::tempdir().unwrap();
        let session_file = dir.path().join("session.json");
        let mut cfg = Config::default();
        cfg.session.file = Some(session_file.clone());

        let tokens = cfg.token_store();
        tokens.set_token(&SecretString::from("abc")).unwrap();

        assert!(session_file.exists());
        let reopened = cfg.token_store();
        assert_eq!(
            reopened.get_token().unwrap().unwrap().expose_secret(),
            "abc"
        );
    }

    #[test]
    fn memory_store_starts_empty() {
        let mut cfg = Config::default();
        cfg.session.store = StoreKind::Memory;
        assert!(cfg.token_store().get_token().unwrap().is_none());
    }
}
