/*
 * Responsibility
 * - 環境変数や設定の読み込み (PORT, REGION, timeout, subscription seed など)
 * - 設定値のバリデーション (不足なら起動失敗)
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use crate::services::subscriptions::{Subscription, SubscriptionState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn parse(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn from_env() -> Self {
        Self::parse(&std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()))
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,

    // Region label for the subscription lifecycle gauge
    pub region: String,

    pub request_timeout: Duration,
    pub request_body_limit_bytes: usize,

    // Initial content of the in-memory subscription cache
    pub subscriptions: Vec<Subscription>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let port: u16 = std::env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(8443);

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::from_env();

        let region = std::env::var("REGION")
            .map_err(|_| ConfigError::Missing("REGION"))?
            .trim()
            .to_string();
        if region.is_empty() {
            return Err(ConfigError::Invalid("REGION"));
        }

        let request_timeout_seconds = std::env::var("REQUEST_TIMEOUT_SECONDS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(30);

        let request_body_limit_bytes = std::env::var("REQUEST_BODY_LIMIT_BYTES")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(4 * 1024 * 1024);

        let subscriptions =
            parse_subscriptions(&std::env::var("SUBSCRIPTIONS").unwrap_or_default())?;

        Ok(Self {
            addr,
            app_env,
            region,
            request_timeout: Duration::from_secs(request_timeout_seconds),
            request_body_limit_bytes,
            subscriptions,
        })
    }
}

/// Parse `id=State,id=State` into subscriptions.
///
/// State names outside the ARM set are kept as `Unrecognized`.
pub fn parse_subscriptions(raw: &str) -> Result<Vec<Subscription>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let (id, state) = entry
                .split_once('=')
                .ok_or(ConfigError::Invalid("SUBSCRIPTIONS"))?;
            let (id, state) = (id.trim(), state.trim());
            if id.is_empty() || state.is_empty() {
                return Err(ConfigError::Invalid("SUBSCRIPTIONS"));
            }
            Ok(Subscription::new(id, SubscriptionState::from(state)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_subscription_seed() {
        let subs = parse_subscriptions(" sub-1=Registered, sub-2 = Suspended ,,").unwrap();

        assert_eq!(
            subs,
            vec![
                Subscription::new("sub-1", SubscriptionState::Registered),
                Subscription::new("sub-2", SubscriptionState::Suspended),
            ]
        );
    }

    #[test]
    fn empty_seed_is_empty() {
        assert!(parse_subscriptions("").unwrap().is_empty());
    }

    #[test]
    fn malformed_seed_is_rejected() {
        for raw in ["sub-1", "=Registered", "sub-1="] {
            assert_eq!(
                parse_subscriptions(raw),
                Err(ConfigError::Invalid("SUBSCRIPTIONS"))
            );
        }
    }

    #[test]
    fn unknown_state_is_kept() {
        let subs = parse_subscriptions("sub-9=Frozen").unwrap();
        assert_eq!(
            subs[0].state,
            SubscriptionState::Unrecognized("Frozen".to_string())
        );
    }

    #[test]
    fn app_env_accepts_short_form() {
        assert!(AppEnv::parse("PROD").is_production());
        assert!(!AppEnv::parse("staging").is_production());
    }
}
