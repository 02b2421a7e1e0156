//! Client configuration.

use crate::error::{ClientError, ClientResult};
use serde::{Deserialize, Serialize};
use std::fmt;

fn default_timeout_secs() -> u64 {
    60
}

/// Connection settings for the remote API.
#[derive(Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Full JSON-RPC endpoint (e.g. `https://zabbix.example/api_jsonrpc.php`).
    pub url: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    /// API token. Takes precedence over username/password.
    #[serde(default)]
    pub token: Option<String>,
    /// Skip TLS certificate verification (testing only).
    #[serde(default)]
    pub tls_insecure: bool,
    /// Force every request through one sequential channel, for servers that
    /// race on concurrent writes.
    #[serde(default)]
    pub serialize: bool,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            username: None,
            password: None,
            token: None,
            tls_insecure: false,
            serialize: false,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("url", &self.url)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("tls_insecure", &self.tls_insecure)
            .field("serialize", &self.serialize)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// How the client authenticates.
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    Token(String),
    Password { username: String, password: String },
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credentials::Token(_) => f.write_str("Token(<redacted>)"),
            Credentials::Password { username, .. } => f
                .debug_struct("Password")
                .field("username", username)
                .finish_non_exhaustive(),
        }
    }
}

impl ClientConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_login(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    /// Reads settings from the environment.
    ///
    /// `ZABBIX_URL` / `ZABBIX_SERVER_URL`, `ZABBIX_USER` / `ZABBIX_USERNAME`,
    /// `ZABBIX_PASS` / `ZABBIX_PASSWORD` and `ZABBIX_TOKEN`. The first
    /// non-empty variable of each group wins. Missing values stay unset.
    pub fn from_env() -> Self {
        Self {
            url: env_any(&["ZABBIX_URL", "ZABBIX_SERVER_URL"]).unwrap_or_default(),
            username: env_any(&["ZABBIX_USER", "ZABBIX_USERNAME"]),
            password: env_any(&["ZABBIX_PASS", "ZABBIX_PASSWORD"]),
            token: env_any(&["ZABBIX_TOKEN"]),
            ..Default::default()
        }
    }

    /// Picks the credentials to authenticate with.
    ///
    /// A non-empty token wins; otherwise both username and password must be
    /// present.
    pub fn credentials(&self) -> ClientResult<Credentials> {
        if let Some(token) = non_empty(&self.token) {
            return Ok(Credentials::Token(token.to_string()));
        }
        match (non_empty(&self.username), non_empty(&self.password)) {
            (Some(username), Some(password)) => Ok(Credentials::Password {
                username: username.to_string(),
                password: password.to_string(),
            }),
            _ => Err(ClientError::MissingCredentials),
        }
    }

    /// Checks that the endpoint is an http(s) URL.
    pub fn validate(&self) -> ClientResult<()> {
        let url = self.url.trim();
        if url.is_empty() {
            return Err(ClientError::Config("url is required".into()));
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ClientError::Config(format!(
                "url must use http or https: {url}"
            )));
        }
        Ok(())
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

fn env_any(names: &[&str]) -> Option<String> {
    names
        .iter()
        .filter_map(|name| std::env::var(name).ok())
        .find(|v| !v.trim().is_empty())
}
