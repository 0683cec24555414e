use crate::format::Currency;
use crate::roi::ClassificationThresholds;
use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

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
    pub calculator: CalculatorConfig,
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

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            calculator: CalculatorConfig::from_env()?,
        })
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

/// Tracing and metrics controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Classification boundaries and report currency.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CalculatorConfig {
    pub thresholds: ClassificationThresholds,
    pub currency: Currency,
}

impl CalculatorConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = ClassificationThresholds::default();
        let thresholds = ClassificationThresholds {
            quick_win_min_roi: threshold("ROI_QUICK_WIN_MIN_ROI", defaults.quick_win_min_roi)?,
            quick_win_max_payback: threshold(
                "ROI_QUICK_WIN_MAX_PAYBACK",
                defaults.quick_win_max_payback,
            )?,
            medium_term_min_roi: threshold(
                "ROI_MEDIUM_TERM_MIN_ROI",
                defaults.medium_term_min_roi,
            )?,
            medium_term_max_payback: threshold(
                "ROI_MEDIUM_TERM_MAX_PAYBACK",
                defaults.medium_term_max_payback,
            )?,
        };

        let currency = match env::var("ROI_DEFAULT_CURRENCY") {
            Ok(raw) => raw
                .parse::<Currency>()
                .map_err(|_| ConfigError::InvalidCurrency { value: raw })?,
            Err(_) => Currency::default(),
        };

        Ok(Self {
            thresholds,
            currency,
        })
    }
}

fn threshold(key: &'static str, default: f64) -> Result<f64, ConfigError> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .ok_or(ConfigError::InvalidThreshold { key }),
        Err(_) => Ok(default),
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidThreshold { key: &'static str },
    InvalidCurrency { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidThreshold { key } => {
                write!(f, "{key} must be a finite number")
            }
            ConfigError::InvalidCurrency { value } => {
                write!(f, "ROI_DEFAULT_CURRENCY must be BRL or USD, found '{value}'")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidThreshold { .. }
            | ConfigError::InvalidCurrency { .. } => None,
        }
    }
}
