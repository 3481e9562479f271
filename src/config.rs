use axum::http::HeaderValue;
use portfolio_email_lettre::SmtpSettings;
use portfolio_relay_http_api::HttpConfig;
use thiserror::Error;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3001;
const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:3000";
const DEFAULT_SMTP_URL: &str = "smtps://smtp.gmail.com";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{key} is invalid: {reason}")]
    Invalid { key: &'static str, reason: String },
}

#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub http: HttpConfig,
    pub smtp: SmtpSettings,
    /// Mailbox that receives every contact email.
    pub operator_address: String,
}

impl RelayConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let host = var("PORTFOLIO_HTTP_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match var("PORTFOLIO_HTTP_PORT") {
            Some(port) => port.parse::<u16>().map_err(|e| ConfigError::Invalid {
                key: "PORTFOLIO_HTTP_PORT",
                reason: e.to_string(),
            })?,
            None => DEFAULT_PORT,
        };
        let allowed_origin = var("PORTFOLIO_ALLOWED_ORIGIN")
            .unwrap_or_else(|| DEFAULT_ALLOWED_ORIGIN.to_string());
        let allowed_origin =
            HeaderValue::from_str(&allowed_origin).map_err(|e| ConfigError::Invalid {
                key: "PORTFOLIO_ALLOWED_ORIGIN",
                reason: e.to_string(),
            })?;

        let user = var("PORTFOLIO_SMTP_USER");
        let credentials = match (user.clone(), var("PORTFOLIO_SMTP_PASSWORD")) {
            (Some(user), Some(password)) => Some((user, password)),
            (Some(_), None) => return Err(ConfigError::Missing("PORTFOLIO_SMTP_PASSWORD")),
            (None, Some(_)) => return Err(ConfigError::Missing("PORTFOLIO_SMTP_USER")),
            (None, None) => None,
        };
        let from = var("PORTFOLIO_MAIL_FROM")
            .or(user)
            .ok_or(ConfigError::Missing("PORTFOLIO_MAIL_FROM"))?;
        let operator_address = var("PORTFOLIO_MAIL_TO").unwrap_or_else(|| from.clone());

        Ok(Self {
            http: HttpConfig {
                host,
                port,
                allowed_origin,
            },
            smtp: SmtpSettings {
                url: var("PORTFOLIO_SMTP_URL").unwrap_or_else(|| DEFAULT_SMTP_URL.to_string()),
                credentials,
                from,
            },
            operator_address,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<RelayConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        RelayConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[
            ("PORTFOLIO_SMTP_USER", "owner@example.com"),
            ("PORTFOLIO_SMTP_PASSWORD", "app-password"),
        ])
        .unwrap();

        assert_eq!(config.http.host, "0.0.0.0");
        assert_eq!(config.http.port, 3001);
        assert_eq!(config.http.allowed_origin, "http://localhost:3000");
        assert_eq!(config.smtp.url, "smtps://smtp.gmail.com");
        assert_eq!(config.smtp.from, "owner@example.com");
        assert_eq!(
            config.smtp.credentials,
            Some(("owner@example.com".to_string(), "app-password".to_string()))
        );
        assert_eq!(config.operator_address, "owner@example.com");
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("PORTFOLIO_HTTP_HOST", "127.0.0.1"),
            ("PORTFOLIO_HTTP_PORT", "8080"),
            ("PORTFOLIO_ALLOWED_ORIGIN", "https://portfolio.example"),
            ("PORTFOLIO_SMTP_URL", "smtp://localhost:1025"),
            ("PORTFOLIO_MAIL_FROM", "Portfolio <noreply@example.com>"),
            ("PORTFOLIO_MAIL_TO", "owner@example.com"),
        ])
        .unwrap();

        assert_eq!(config.http.host, "127.0.0.1");
        assert_eq!(config.http.port, 8080);
        assert_eq!(config.http.allowed_origin, "https://portfolio.example");
        assert_eq!(config.smtp.url, "smtp://localhost:1025");
        assert_eq!(config.smtp.credentials, None);
        assert_eq!(config.smtp.from, "Portfolio <noreply@example.com>");
        assert_eq!(config.operator_address, "owner@example.com");
    }

    #[test]
    fn test_sender_is_required() {
        assert_eq!(
            load(&[]).unwrap_err(),
            ConfigError::Missing("PORTFOLIO_MAIL_FROM")
        );
    }

    #[test]
    fn test_password_without_user() {
        assert_eq!(
            load(&[
                ("PORTFOLIO_SMTP_PASSWORD", "secret"),
                ("PORTFOLIO_MAIL_FROM", "owner@example.com"),
            ])
            .unwrap_err(),
            ConfigError::Missing("PORTFOLIO_SMTP_USER")
        );
    }

    #[test]
    fn test_invalid_port() {
        let err = load(&[
            ("PORTFOLIO_HTTP_PORT", "not-a-port"),
            ("PORTFOLIO_MAIL_FROM", "owner@example.com"),
        ])
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                key: "PORTFOLIO_HTTP_PORT",
                ..
            }
        ));
    }

    #[test]
    fn test_blank_values_count_as_unset() {
        let config = load(&[
            ("PORTFOLIO_HTTP_PORT", ""),
            ("PORTFOLIO_MAIL_FROM", "owner@example.com"),
        ])
        .unwrap();
        assert_eq!(config.http.port, 3001);
    }
}
