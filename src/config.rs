//! Process configuration read once at startup.
//!
//! DESIGN
//! ======
//! Values come from the environment (a `.env` file is honored by `main`).
//! They are parsed into plain structs and handed to [`crate::state::AppState`];
//! request handlers never touch the environment.

use std::net::SocketAddr;
use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";
pub const DEFAULT_SMTP_PORT: u16 = 465;
pub const DEFAULT_SMTP_TIMEOUT_SECS: u64 = 10;

/// Relay behaviour: delivery switch, default inbox and SMTP credentials.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct RelayConfig {
    /// When false, requests are logged and acknowledged without sending.
    pub email_enabled: bool,
    /// Inbox used when a request carries no `to` override.
    pub default_to: Option<String>,
    pub smtp: SmtpSettings,
}

/// SMTP account and transport parameters.
#[derive(Clone, PartialEq, Eq)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    pub timeout_secs: u64,
    pub user: Option<String>,
    pub pass: Option<String>,
}

impl Default for SmtpSettings {
    fn default() -> Self {
        Self {
            host: DEFAULT_SMTP_HOST.to_owned(),
            port: DEFAULT_SMTP_PORT,
            timeout_secs: DEFAULT_SMTP_TIMEOUT_SECS,
            user: None,
            pass: None,
        }
    }
}

impl SmtpSettings {
    /// Both credentials, or `None` if either is missing.
    #[must_use]
    pub fn credentials(&self) -> Option<(&str, &str)> {
        Some((self.user.as_deref()?, self.pass.as_deref()?))
    }
}

// Credentials must never reach the logs.
impl std::fmt::Debug for SmtpSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("timeout_secs", &self.timeout_secs)
            .field("user", &self.user)
            .field("pass", &self.pass.as_ref().map(|_| "***"))
            .finish()
    }
}

impl std::fmt::Debug for RelayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RelayConfig")
            .field("email_enabled", &self.email_enabled)
            .field("default_to", &self.default_to)
            .field("smtp", &self.smtp)
            .finish()
    }
}

impl RelayConfig {
    /// Build relay config from environment variables.
    ///
    /// - `EMAIL_ENABLED`: `1/true/yes/on` enables delivery (default off)
    /// - `EMAIL_TO`: default destination
    /// - `SMTP_USER`, `SMTP_PASS`: account credentials
    /// - `SMTP_HOST`: default `smtp.gmail.com`
    /// - `SMTP_PORT`: default 465
    /// - `SMTP_TIMEOUT_SECS`: default 10
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            email_enabled: env_bool("EMAIL_ENABLED").unwrap_or(false),
            default_to: env_non_empty("EMAIL_TO"),
            smtp: SmtpSettings {
                host: env_non_empty("SMTP_HOST").unwrap_or_else(|| DEFAULT_SMTP_HOST.to_owned()),
                port: env_parse("SMTP_PORT", DEFAULT_SMTP_PORT),
                timeout_secs: env_parse("SMTP_TIMEOUT_SECS", DEFAULT_SMTP_TIMEOUT_SECS),
                user: env_non_empty("SMTP_USER"),
                pass: env_non_empty("SMTP_PASS"),
            },
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

/// Listener and static-site settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    /// Built landing page served for unmatched paths, if configured.
    pub website_dir: Option<PathBuf>,
}

impl ServerConfig {
    /// Build server config from `PORT` and `WEBSITE_DIR`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when `PORT` is set but not a valid port.
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = match std::env::var("PORT") {
            Ok(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::Invalid { key: "PORT", value: raw })?,
            Err(_) => DEFAULT_PORT,
        };
        let website_dir = env_non_empty("WEBSITE_DIR").map(PathBuf::from);
        Ok(Self { port, website_dir })
    }

    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}

pub(crate) fn env_bool(key: &str) -> Option<bool> {
    std::env::var(key)
        .ok()
        .and_then(|raw| match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Some(true),
            "0" | "false" | "no" | "off" => Some(false),
            _ => None,
        })
}

fn env_non_empty(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
