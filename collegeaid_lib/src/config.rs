//! Environment-driven configuration, loaded once by the composition root.

use std::env;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use scorecard_api::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT};

use crate::cache::DEFAULT_TTL;

pub const API_KEY_VAR: &str = "DATAGOV_API_KEY";
pub const BASE_URL_VAR: &str = "SCORECARD_BASE_URL";
pub const TIMEOUT_VAR: &str = "SCORECARD_TIMEOUT_SECS";
pub const CACHE_TTL_VAR: &str = "COLLEGEAID_CACHE_TTL_SECS";
pub const HOST_VAR: &str = "HOST";
pub const PORT_VAR: &str = "PORT";

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5174;

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be a valid {expected}, got '{value}'")]
    InvalidValue {
        var: &'static str,
        expected: &'static str,
        value: String,
    },
    #[error("host '{0}' must be 'localhost' or an IPv4/IPv6 address")]
    InvalidHost(String),
}

/// Upstream and server settings.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// `None` is allowed at load time; requests then fail with a config error.
    pub api_key: Option<String>,
    pub base_url: String,
    pub request_timeout: Duration,
    pub cache_ttl: Duration,
    pub server: ServerConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: DEFAULT_TIMEOUT,
            cache_ttl: DEFAULT_TTL,
            server: ServerConfig::default(),
        }
    }
}

impl AppConfig {
    /// Reads `.env` (if present) and then the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let request_timeout = match non_empty(TIMEOUT_VAR) {
            Some(raw) => Duration::from_secs(parse_secs(TIMEOUT_VAR, &raw)?),
            None => defaults.request_timeout,
        };
        let cache_ttl = match non_empty(CACHE_TTL_VAR) {
            Some(raw) => Duration::from_secs(parse_secs(CACHE_TTL_VAR, &raw)?),
            None => defaults.cache_ttl,
        };
        let port = match non_empty(PORT_VAR) {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidValue {
                    var: PORT_VAR,
                    expected: "port number",
                    value: raw.clone(),
                })?,
            None => defaults.server.port,
        };

        Ok(Self {
            api_key: non_empty(API_KEY_VAR).map(|k| k.trim().to_string()),
            base_url: non_empty(BASE_URL_VAR).unwrap_or(defaults.base_url),
            request_timeout,
            cache_ttl,
            server: ServerConfig {
                host: non_empty(HOST_VAR).unwrap_or(defaults.server.host),
                port,
            },
        })
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

fn parse_secs(var: &'static str, raw: &str) -> Result<u64, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(secs),
        _ => Err(ConfigError::InvalidValue {
            var,
            expected: "positive number of seconds",
            value: raw.to_string(),
        }),
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }
        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|_| ConfigError::InvalidHost(self.host.clone()))?;
        Ok(SocketAddr::new(ip, self.port))
    }
}
