//! Host configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::time::Duration;

use crate::error::HostError;

pub const BACKEND_URL_VAR: &str = "GRADYZE_BACKEND_URL";
pub const PORT_VAR: &str = "PORT";
pub const PROXY_TIMEOUT_VAR: &str = "GRADYZE_PROXY_TIMEOUT_SECS";

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_PROXY_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostConfig {
    /// Base URL of the remote API, without a trailing `/`.
    pub backend_url: String,
    pub port: u16,
    pub proxy_timeout: Duration,
}

impl HostConfig {
    /// Build typed host config from environment variables.
    ///
    /// Required:
    /// - `GRADYZE_BACKEND_URL`: `http://` or `https://` base of the API
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `GRADYZE_PROXY_TIMEOUT_SECS`: default 30
    pub fn from_env() -> Result<Self, HostError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`HostConfig::from_env`] with an injectable variable source.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, HostError> {
        let backend_url = parse_backend_url(get(BACKEND_URL_VAR))?;
        let port = parse_or_default(PORT_VAR, get(PORT_VAR), DEFAULT_PORT)?;
        let timeout_secs = parse_or_default(PROXY_TIMEOUT_VAR, get(PROXY_TIMEOUT_VAR), DEFAULT_PROXY_TIMEOUT_SECS)?;
        if timeout_secs == 0 {
            return Err(HostError::InvalidVar {
                var: PROXY_TIMEOUT_VAR,
                value: "0".into(),
                reason: "must be at least one second",
            });
        }
        Ok(Self { backend_url, port, proxy_timeout: Duration::from_secs(timeout_secs) })
    }
}

fn parse_backend_url(raw: Option<String>) -> Result<String, HostError> {
    let raw = raw
        .filter(|v| !v.trim().is_empty())
        .ok_or(HostError::MissingVar { var: BACKEND_URL_VAR })?;
    let url = raw.trim().trim_end_matches('/').to_string();
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(HostError::InvalidVar { var: BACKEND_URL_VAR, value: raw, reason: "expected an http(s) URL" });
    }
    Ok(url)
}

fn parse_or_default<T: std::str::FromStr>(var: &'static str, raw: Option<String>, default: T) -> Result<T, HostError> {
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(default),
        Some(value) => value.parse::<T>().map_err(|_| HostError::InvalidVar {
            var,
            value: value.to_string(),
            reason: "not a number",
        }),
    }
}
