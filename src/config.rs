//! Server configuration parsed from environment variables.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

pub const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_AUTH_TIMEOUT_MS: u64 = 5000;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid {var}: {value:?} ({reason})")]
    Invalid { var: &'static str, value: String, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    pub auth_timeout: Duration,
}

impl ServerConfig {
    /// Build config from environment variables.
    ///
    /// Optional:
    /// - `HOST`: bind address, default `0.0.0.0`
    /// - `PORT`: default 5000
    /// - `AUTH_TIMEOUT_MS`: upper bound on one credential check, default 5000
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first malformed variable.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(
            std::env::var("HOST").ok().as_deref(),
            std::env::var("PORT").ok().as_deref(),
            std::env::var("AUTH_TIMEOUT_MS").ok().as_deref(),
        )
    }

    fn from_vars(host: Option<&str>, port: Option<&str>, auth_timeout_ms: Option<&str>) -> Result<Self, ConfigError> {
        Ok(Self {
            host: parse_host(host)?,
            port: parse_port(port)?,
            auth_timeout: parse_auth_timeout(auth_timeout_ms)?,
        })
    }

    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn invalid(var: &'static str, value: &str, reason: impl ToString) -> ConfigError {
    ConfigError::Invalid { var, value: value.to_owned(), reason: reason.to_string() }
}

fn parse_host(raw: Option<&str>) -> Result<IpAddr, ConfigError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(DEFAULT_HOST),
        Some(v) => v.parse().map_err(|e| invalid("HOST", v, e)),
    }
}

fn parse_port(raw: Option<&str>) -> Result<u16, ConfigError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(DEFAULT_PORT),
        Some(v) => v.parse().map_err(|e| invalid("PORT", v, e)),
    }
}

fn parse_auth_timeout(raw: Option<&str>) -> Result<Duration, ConfigError> {
    let ms = match raw.map(str::trim) {
        None | Some("") => DEFAULT_AUTH_TIMEOUT_MS,
        Some(v) => match v.parse::<u64>() {
            Ok(0) => return Err(invalid("AUTH_TIMEOUT_MS", v, "must be greater than zero")),
            Ok(ms) => ms,
            Err(e) => return Err(invalid("AUTH_TIMEOUT_MS", v, e)),
        },
    };
    Ok(Duration::from_millis(ms))
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
