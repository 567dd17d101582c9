// Environment-driven configuration for the server and the client

use std::net::SocketAddr;
use thiserror::Error;

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

pub const PORT_VAR: &str = "PORT";
pub const PROVIDER_TIMEOUT_VAR: &str = "HOLIDAYS_PROVIDER_TIMEOUT_MS";
pub const API_URL_VAR: &str = "HOLIDAYS_API_URL";
pub const CLIENT_TIMEOUT_VAR: &str = "HOLIDAYS_CLIENT_TIMEOUT_MS";

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {value:?}")]
    InvalidValue { name: &'static str, value: String },
}

fn parse_var<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(name) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { name, value }),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub port: u16,
    pub provider_timeout_ms: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            provider_timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            port: parse_var(&lookup, PORT_VAR, DEFAULT_PORT)?,
            provider_timeout_ms: parse_var(&lookup, PROVIDER_TIMEOUT_VAR, DEFAULT_TIMEOUT_MS)?,
        })
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let base_url = match lookup(API_URL_VAR) {
            None => DEFAULT_API_URL.to_string(),
            Some(url) if url.starts_with("http://") || url.starts_with("https://") => {
                url.trim_end_matches('/').to_string()
            }
            Some(url) => {
                return Err(ConfigError::InvalidValue {
                    name: API_URL_VAR,
                    value: url,
                })
            }
        };

        Ok(Self {
            base_url,
            timeout_ms: parse_var(&lookup, CLIENT_TIMEOUT_VAR, DEFAULT_TIMEOUT_MS)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_server_defaults() {
        let config = ServerConfig::from_lookup(env(&[])).unwrap();
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.bind_addr().to_string(), "0.0.0.0:5000");
    }

    #[test]
    fn test_server_overrides() {
        let config =
            ServerConfig::from_lookup(env(&[("PORT", "8080"), (PROVIDER_TIMEOUT_VAR, "250")]))
                .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.provider_timeout_ms, 250);
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let result = ServerConfig::from_lookup(env(&[("PORT", "http")]));
        assert_eq!(
            result,
            Err(ConfigError::InvalidValue {
                name: "PORT",
                value: "http".to_string()
            })
        );
    }

    #[test]
    fn test_client_config() {
        let config = ClientConfig::from_lookup(env(&[])).unwrap();
        assert_eq!(config.base_url, "http://localhost:5000/api");
        assert_eq!(config.timeout_ms, 10_000);

        let config =
            ClientConfig::from_lookup(env(&[(API_URL_VAR, "https://holidays.example.com/api/")]))
                .unwrap();
        assert_eq!(config.base_url, "https://holidays.example.com/api");

        assert!(ClientConfig::from_lookup(env(&[(API_URL_VAR, "localhost:5000")])).is_err());
    }
}
