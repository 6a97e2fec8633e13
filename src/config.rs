use std::{env, net::SocketAddr};

use thiserror::Error;

use crate::mcp::dispatcher::NotificationErrorPolicy;

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    pub bind_port: u16,
    pub notification_errors: NotificationErrorPolicy,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("BIND_PORT must be a valid u16")]
    InvalidPort,
    #[error("MCP_NOTIFICATION_ERRORS must be one of: suppress, respond")]
    InvalidNotificationPolicy,
    #[error("invalid bind address or port")]
    InvalidSocket,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let bind_addr = lookup("BIND_ADDR")
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| "127.0.0.1".to_string());
        let bind_port = lookup("BIND_PORT")
            .map(|value| {
                value
                    .trim()
                    .parse::<u16>()
                    .map_err(|_| ConfigError::InvalidPort)
            })
            .transpose()?
            .unwrap_or(8080);
        let notification_errors = match lookup("MCP_NOTIFICATION_ERRORS")
            .map(|value| value.trim().to_ascii_lowercase())
            .filter(|value| !value.is_empty())
            .as_deref()
        {
            None | Some("suppress") => NotificationErrorPolicy::Suppress,
            Some("respond") => NotificationErrorPolicy::Respond,
            Some(_) => return Err(ConfigError::InvalidNotificationPolicy),
        };

        let config = Self {
            bind_addr,
            bind_port,
            notification_errors,
        };

        let _ = config.bind_socket()?;
        Ok(config)
    }

    pub fn bind_socket(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.bind_addr, self.bind_port)
            .parse::<SocketAddr>()
            .map_err(|_| ConfigError::InvalidSocket)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect::<HashMap<_, _>>();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn parse_defaults() {
        let config = Config::from_lookup(lookup(&[])).expect("config should parse");

        assert_eq!(config.bind_addr, "127.0.0.1");
        assert_eq!(config.bind_port, 8080);
        assert_eq!(config.notification_errors, NotificationErrorPolicy::Suppress);
    }

    #[test]
    fn invalid_port_fails() {
        let err = Config::from_lookup(lookup(&[("BIND_PORT", "70000")]))
            .expect_err("expected invalid port error");

        assert!(matches!(err, ConfigError::InvalidPort));
    }

    #[test]
    fn invalid_bind_addr_fails() {
        let err = Config::from_lookup(lookup(&[("BIND_ADDR", "not an address")]))
            .expect_err("expected invalid socket error");

        assert!(matches!(err, ConfigError::InvalidSocket));
    }

    #[test]
    fn notification_policy_parses_case_insensitively() {
        let config = Config::from_lookup(lookup(&[("MCP_NOTIFICATION_ERRORS", " Respond ")]))
            .expect("config should parse");

        assert_eq!(config.notification_errors, NotificationErrorPolicy::Respond);
    }

    #[test]
    fn unknown_notification_policy_fails() {
        let err = Config::from_lookup(lookup(&[("MCP_NOTIFICATION_ERRORS", "ignore")]))
            .expect_err("expected invalid policy error");

        assert!(matches!(err, ConfigError::InvalidNotificationPolicy));
    }

    #[test]
    fn bind_socket_combines_addr_and_port() {
        let config = Config::from_lookup(lookup(&[("BIND_ADDR", "0.0.0.0"), ("BIND_PORT", "9000")]))
            .expect("config should parse");

        assert_eq!(
            config.bind_socket().expect("valid socket"),
            "0.0.0.0:9000".parse::<SocketAddr>().expect("socket literal")
        );
    }
}
