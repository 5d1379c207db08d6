//! Connection options and their sources.

use anyhow::{Context, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::ClassifierError;

/// Resolved options for talking to one registry. Built once, never mutated.
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionOptions {
    pub server: String,
    pub port: u16,
    pub use_ssl: bool,
    pub auth_user: Option<String>,
    pub auth_passwd: Option<String>,
    /// Verify the server certificate when `use_ssl` is on
    pub verify_tls: bool,
    pub timeout_secs: Option<u64>,
}

impl ConnectionOptions {
    /// Base URL such as `https://puppet:443`.
    pub fn base_url(&self) -> String {
        let scheme = if self.use_ssl { "https" } else { "http" };
        format!("{}://{}:{}", scheme, self.server, self.port)
    }
}

// Keeps the password out of logs.
impl fmt::Debug for ConnectionOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionOptions")
            .field("server", &self.server)
            .field("port", &self.port)
            .field("use_ssl", &self.use_ssl)
            .field("auth_user", &self.auth_user)
            .field("auth_passwd", &self.auth_passwd.as_ref().map(|_| "********"))
            .field("verify_tls", &self.verify_tls)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Partially specified options, as read from a config file or the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionSettings {
    #[serde(rename = "enc_server", default)]
    pub server: Option<String>,
    #[serde(rename = "enc_port", default)]
    pub port: Option<u16>,
    #[serde(rename = "enc_ssl", default)]
    pub use_ssl: Option<bool>,
    #[serde(rename = "enc_auth_user", default)]
    pub auth_user: Option<String>,
    #[serde(rename = "enc_auth_passwd", default)]
    pub auth_passwd: Option<String>,
    #[serde(rename = "enc_verify_tls", default)]
    pub verify_tls: Option<bool>,
    #[serde(rename = "enc_timeout", default)]
    pub timeout_secs: Option<u64>,
}

impl ConnectionSettings {
    /// Loads settings from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        debug!("Loading connection settings from {:?}", path);
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        let settings = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file {:?}", path))?;
        Ok(settings)
    }

    /// Loads settings from `path` if given, otherwise from the default location
    /// when that file exists.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => match default_config_path() {
                Some(path) if path.exists() => Self::load(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    /// Fields set in `self` win over those in `fallback`.
    pub fn merge(self, fallback: ConnectionSettings) -> ConnectionSettings {
        ConnectionSettings {
            server: self.server.or(fallback.server),
            port: self.port.or(fallback.port),
            use_ssl: self.use_ssl.or(fallback.use_ssl),
            auth_user: self.auth_user.or(fallback.auth_user),
            auth_passwd: self.auth_passwd.or(fallback.auth_passwd),
            verify_tls: self.verify_tls.or(fallback.verify_tls),
            timeout_secs: self.timeout_secs.or(fallback.timeout_secs),
        }
    }

    /// Validates the settings into [`ConnectionOptions`].
    pub fn resolve(self) -> Result<ConnectionOptions> {
        let server = self
            .server
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ClassifierError::Configuration("server is not set".to_string()))?;
        let port = self
            .port
            .filter(|p| *p != 0)
            .ok_or_else(|| ClassifierError::Configuration("port is not set".to_string()))?;

        if self.auth_passwd.is_some() && self.auth_user.is_none() {
            return Err(ClassifierError::Configuration(
                "auth password is set without an auth user".to_string(),
            )
            .into());
        }

        Ok(ConnectionOptions {
            server,
            port,
            use_ssl: self.use_ssl.unwrap_or(false),
            auth_user: self.auth_user,
            auth_passwd: self.auth_passwd,
            verify_tls: self.verify_tls.unwrap_or(false),
            timeout_secs: self.timeout_secs,
        })
    }
}

/// `<config_dir>/enc-classifier/config.json`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("enc-classifier").join("config.json"))
}
