use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

use crate::workflows::pitch::payments::{
    DEFAULT_PREMIUM_AMOUNT_CENTS, DEFAULT_PREMIUM_CURRENCY, MOCK_PUBLISHABLE_KEY,
};
use crate::workflows::pitch::validation::{ValidationConfig, DEFAULT_MIN_COMPLETION_MS};
use crate::workflows::pitch::PremiumPricing;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub evaluation: EvaluationSettings,
    pub payments: PaymentSettings,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        let log_format = match env::var("APP_LOG_FORMAT") {
            Ok(raw) => LogFormat::parse(&raw).ok_or(ConfigError::InvalidLogFormat { value: raw })?,
            Err(_) => LogFormat::Compact,
        };

        let min_completion_ms =
            number_var("APP_MIN_COMPLETION_MS")?.unwrap_or(DEFAULT_MIN_COMPLETION_MS);
        let premium_amount_cents =
            number_var("APP_PREMIUM_AMOUNT_CENTS")?.unwrap_or(DEFAULT_PREMIUM_AMOUNT_CENTS);
        let premium_currency = env::var("APP_PREMIUM_CURRENCY")
            .map(|currency| currency.trim().to_ascii_lowercase())
            .unwrap_or_else(|_| DEFAULT_PREMIUM_CURRENCY.to_string());
        let publishable_key = env::var("APP_PAYMENT_PUBLISHABLE_KEY")
            .unwrap_or_else(|_| MOCK_PUBLISHABLE_KEY.to_string());

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig {
                log_level,
                log_format,
            },
            evaluation: EvaluationSettings { min_completion_ms },
            payments: PaymentSettings {
                premium_amount_cents,
                premium_currency,
                publishable_key,
            },
        })
    }
}

fn number_var(var: &'static str) -> Result<Option<i64>, ConfigError> {
    match env::var(var) {
        Ok(raw) => raw
            .trim()
            .parse::<i64>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidNumber { var }),
        Err(_) => Ok(None),
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Output shape of the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Json,
}

impl LogFormat {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" | "text" => Some(Self::Compact),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Tracing and metrics controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
    pub log_format: LogFormat,
}

/// Anti-gaming knobs applied to every submission.
#[derive(Debug, Clone)]
pub struct EvaluationSettings {
    pub min_completion_ms: i64,
}

impl EvaluationSettings {
    pub fn validation_config(&self) -> ValidationConfig {
        ValidationConfig::default().with_min_completion_ms(self.min_completion_ms)
    }
}

/// Premium pricing and the key handed to browser checkouts.
#[derive(Debug, Clone)]
pub struct PaymentSettings {
    pub premium_amount_cents: i64,
    pub premium_currency: String,
    pub publishable_key: String,
}

impl PaymentSettings {
    pub fn pricing(&self) -> PremiumPricing {
        PremiumPricing {
            amount: self.premium_amount_cents,
            currency: self.premium_currency.clone(),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidNumber { var: &'static str },
    InvalidLogFormat { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidNumber { var } => write!(f, "{var} must be a whole number"),
            ConfigError::InvalidLogFormat { value } => {
                write!(f, "APP_LOG_FORMAT '{value}' must be 'compact' or 'json'")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidNumber { .. }
            | ConfigError::InvalidLogFormat { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        for var in [
            "APP_ENV",
            "APP_HOST",
            "APP_PORT",
            "APP_LOG_LEVEL",
            "APP_LOG_FORMAT",
            "APP_MIN_COMPLETION_MS",
            "APP_PREMIUM_AMOUNT_CENTS",
            "APP_PREMIUM_CURRENCY",
            "APP_PAYMENT_PUBLISHABLE_KEY",
        ] {
            env::remove_var(var);
        }
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.telemetry.log_format, LogFormat::Compact);
        assert_eq!(config.evaluation.min_completion_ms, 180_000);
        assert_eq!(config.payments.pricing(), PremiumPricing::default());
        assert_eq!(config.payments.publishable_key, "pk_test_mock_key");
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
        reset_env();
    }

    #[test]
    fn reads_pricing_and_anti_gaming_overrides() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_ENV", "production");
        env::set_var("APP_LOG_FORMAT", "JSON");
        env::set_var("APP_MIN_COMPLETION_MS", "0");
        env::set_var("APP_PREMIUM_AMOUNT_CENTS", "1999");
        env::set_var("APP_PREMIUM_CURRENCY", "EUR");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.environment, AppEnvironment::Production);
        assert_eq!(config.telemetry.log_format, LogFormat::Json);
        assert_eq!(config.evaluation.validation_config().min_completion_ms, 0);
        assert_eq!(config.payments.premium_amount_cents, 1999);
        assert_eq!(config.payments.premium_currency, "eur");
        reset_env();
    }

    #[test]
    fn rejects_malformed_values() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_PORT", "eighty");
        assert!(matches!(AppConfig::load(), Err(ConfigError::InvalidPort)));

        reset_env();
        env::set_var("APP_PREMIUM_AMOUNT_CENTS", "9.99");
        assert!(matches!(
            AppConfig::load(),
            Err(ConfigError::InvalidNumber {
                var: "APP_PREMIUM_AMOUNT_CENTS"
            })
        ));

        reset_env();
        env::set_var("APP_LOG_FORMAT", "xml");
        assert!(matches!(
            AppConfig::load(),
            Err(ConfigError::InvalidLogFormat { .. })
        ));
        reset_env();
    }
}
