//! Server settings loaded via OrthoConfig.
//!
//! Values come from `NOTICEBOARD_*` environment variables, an optional
//! configuration file, and command-line flags.

use std::net::SocketAddr;
use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::Deserialize;

/// Address used when `bind_addr` is unset.
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Errors raised while interpreting loaded settings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    /// `bind_addr` is not a socket address.
    #[error("invalid bind address {value:?}: {message}")]
    InvalidBindAddr { value: String, message: String },
}

/// Process-level configuration for the noticeboard server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "NOTICEBOARD")]
pub struct ServerSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection string. In-memory storage is used when unset.
    pub database_url: Option<String>,
    /// Apply embedded migrations before serving. See [`Self::migrate`].
    pub migrate: Option<bool>,
    /// JSON list of login accounts.
    pub accounts_file: Option<PathBuf>,
    /// JSON list of news items inserted at startup.
    pub news_file: Option<PathBuf>,
}

impl ServerSettings {
    /// The parsed listen address, falling back to [`DEFAULT_BIND_ADDR`].
    ///
    /// # Errors
    /// Returns [`SettingsError::InvalidBindAddr`] for unparsable input.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value
            .parse()
            .map_err(|err: std::net::AddrParseError| SettingsError::InvalidBindAddr {
                value: value.to_owned(),
                message: err.to_string(),
            })
    }

    /// Whether to apply embedded migrations, `true` unless switched off.
    #[must_use]
    pub fn migrate(&self) -> bool {
        self.migrate.unwrap_or(true)
    }

    /// The database URL, ignoring blank values.
    #[must_use]
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }
}
