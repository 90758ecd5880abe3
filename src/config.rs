//! Global configuration parsing, validation, and credential loading.

use std::env;
use std::fs;
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tracing::warn;

use crate::{AppError, Result};

/// Outbound email settings for the contact form relay.
///
/// The provider credential is loaded at runtime from the environment
/// variable named by `api_key_env`, never from the TOML file.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub struct EmailConfig {
    /// Base URL of the transactional email API.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Fixed sender address.
    #[serde(default = "default_from")]
    pub from: String,
    /// Fixed owner address receiving contact messages.
    #[serde(default = "default_to")]
    pub to: String,
    /// Environment variable holding the provider credential.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    /// Upper bound on a single provider call.
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    /// Escape submitter fields before embedding them in the HTML body.
    #[serde(default = "default_true")]
    pub escape_html: bool,
    /// Provider credential (populated at runtime).
    #[serde(skip)]
    pub api_key: Option<String>,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            from: default_from(),
            to: default_to(),
            api_key_env: default_api_key_env(),
            timeout_seconds: default_timeout_seconds(),
            escape_html: true,
            api_key: None,
        }
    }
}

impl EmailConfig {
    /// Provider call timeout as a [`Duration`].
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

fn default_api_base_url() -> String {
    "https://api.resend.com".into()
}

fn default_from() -> String {
    "Portfolio Contact Form <onboarding@resend.dev>".into()
}

fn default_to() -> String {
    "pritosajayi@gmail.com".into()
}

fn default_api_key_env() -> String {
    "RESEND_API_KEY".into()
}

fn default_timeout_seconds() -> u64 {
    10
}

fn default_true() -> bool {
    true
}

fn default_http_host() -> String {
    "127.0.0.1".into()
}

fn default_http_port() -> u16 {
    3000
}

/// Global configuration parsed from `config.toml`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub struct GlobalConfig {
    /// Interface the HTTP server binds to.
    #[serde(default = "default_http_host")]
    pub http_host: String,
    /// HTTP port; 0 lets the OS pick one.
    #[serde(default = "default_http_port")]
    pub http_port: u16,
    /// External content table; the embedded table is used when absent.
    #[serde(default)]
    pub content_path: Option<PathBuf>,
    /// Contact form email relay settings.
    #[serde(default)]
    pub email: EmailConfig,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            http_host: default_http_host(),
            http_port: default_http_port(),
            content_path: None,
            email: EmailConfig::default(),
        }
    }
}

impl GlobalConfig {
    /// Load and validate configuration from a TOML file path.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if the file cannot be read or contains
    /// invalid TOML, or if validation fails.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .map_err(|err| AppError::Config(format!("failed to read config: {err}")))?;
        Self::from_toml_str(&raw)
    }

    /// Parse configuration from a TOML string and validate it.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if parsing or validation fails.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Load the email provider credential from the environment.
    ///
    /// An unset or empty variable leaves the credential absent. The
    /// contact endpoint then reports "service unavailable" on every call
    /// instead of the server refusing to start.
    pub fn load_credentials(&mut self) {
        self.email.api_key = load_credential(&self.email.api_key_env);
        if self.email.api_key.is_none() {
            warn!(
                env_key = %self.email.api_key_env,
                "email credential not set; contact form will report service unavailable"
            );
        }
    }

    /// Socket address the HTTP server binds to.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `http_host` is not an IP address.
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        let ip: IpAddr = self
            .http_host
            .parse()
            .map_err(|err| AppError::Config(format!("http_host invalid: {err}")))?;
        Ok(SocketAddr::new(ip, self.http_port))
    }

    fn validate(&self) -> Result<()> {
        self.bind_addr()?;

        if self.email.timeout_seconds == 0 {
            return Err(AppError::Config(
                "email.timeout_seconds must be greater than zero".into(),
            ));
        }

        for (field, value) in [
            ("email.from", &self.email.from),
            ("email.to", &self.email.to),
            ("email.api_key_env", &self.email.api_key_env),
        ] {
            if value.trim().is_empty() {
                return Err(AppError::Config(format!("{field} must not be empty")));
            }
        }

        let base = &self.email.api_base_url;
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(AppError::Config(format!(
                "email.api_base_url must be an http(s) URL, got {base}"
            )));
        }

        Ok(())
    }
}

/// Read a single credential from the environment; empty counts as unset.
fn load_credential(env_key: &str) -> Option<String> {
    env::var(env_key).ok().filter(|value| !value.is_empty())
}
