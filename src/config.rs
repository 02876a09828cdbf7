use std::env;
use std::time::Duration;

use reqwest::Url;

use crate::error::{ClientError, Result};

pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_SESSION_DB: &str = "sqlite://doro_session.db";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub api_base_url: Url,
    pub session_db_url: String,
    pub request_timeout: Duration,
}

impl ClientConfig {
    pub fn new(api_base_url: &str) -> Result<Self> {
        Ok(Self {
            api_base_url: parse_base_url(api_base_url)?,
            session_db_url: DEFAULT_SESSION_DB.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        })
    }

    pub fn new_from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source so tests do not
    /// have to touch the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base = lookup("DORO_API_BASE_URL").unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
        let session_db_url =
            lookup("DORO_SESSION_DB").unwrap_or_else(|| DEFAULT_SESSION_DB.to_string());
        let timeout_secs = match lookup("DORO_HTTP_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|_| {
                ClientError::Config(format!("DORO_HTTP_TIMEOUT_SECS is not a number: {}", raw))
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            api_base_url: parse_base_url(&base)?,
            session_db_url,
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }

    pub fn with_api_base_url(mut self, raw: &str) -> Result<Self> {
        self.api_base_url = parse_base_url(raw)?;
        Ok(self)
    }

    pub fn with_session_db(mut self, url: impl Into<String>) -> Self {
        self.session_db_url = url.into();
        self
    }
}

fn parse_base_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim())
        .map_err(|e| ClientError::Config(format!("invalid API base URL {}: {}", raw, e)))?;
    if url.cannot_be_a_base() {
        return Err(ClientError::Config(format!("API base URL cannot be a base: {}", raw)));
    }
    Ok(url)
}
