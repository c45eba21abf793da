use crate::screening::{ExchangeRates, OriginType};
use std::env;
use std::fmt;
use std::time::Duration;

/// Distinguishes runtime behavior for different stages of the tool.
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

/// Top-level configuration for a prospecting run.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub telemetry: TelemetryConfig,
    pub screening: ScreeningConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("PROSPECT_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let log_level = env::var("PROSPECT_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let min_sales_mm_usd = match env::var("PROSPECT_MIN_SALES_MM_USD") {
            Ok(raw) => raw
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|value| value.is_finite() && *value >= 0.0)
                .ok_or(ConfigError::InvalidThreshold { value: raw })?,
            Err(_) => DEFAULT_MIN_SALES_MM_USD,
        };

        let search_delay = match env::var("PROSPECT_SEARCH_DELAY_MS") {
            Ok(raw) => raw
                .trim()
                .parse::<u64>()
                .map(Duration::from_millis)
                .map_err(|_| ConfigError::InvalidDelay { value: raw })?,
            Err(_) => Duration::from_millis(DEFAULT_SEARCH_DELAY_MS),
        };

        let origin = match env::var("PROSPECT_ORIGIN") {
            Ok(raw) => {
                OriginType::from_label(&raw).ok_or(ConfigError::InvalidOrigin { value: raw })?
            }
            Err(_) => OriginType::Ranking,
        };

        let standard = ExchangeRates::standard();
        let rates = ExchangeRates {
            clp_per_usd: rate_from_env("PROSPECT_CLP_PER_USD", standard.clp_per_usd)?,
            clp_per_uf: rate_from_env("PROSPECT_CLP_PER_UF", standard.clp_per_uf)?,
        };

        Ok(Self {
            environment,
            telemetry: TelemetryConfig { log_level },
            screening: ScreeningConfig {
                min_sales_mm_usd,
                origin,
                search_delay,
                rates,
            },
        })
    }
}

const DEFAULT_MIN_SALES_MM_USD: f64 = 30.0;
const DEFAULT_SEARCH_DELAY_MS: u64 = 1_000;

fn rate_from_env(key: &'static str, default: f64) -> Result<f64, ConfigError> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|rate| rate.is_finite() && *rate > 0.0)
            .ok_or(ConfigError::InvalidRate { key, value: raw }),
        Err(_) => Ok(default),
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Run parameters the pipeline needs from its caller.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreeningConfig {
    /// Inclusive lower bound on estimated sales, in million USD.
    pub min_sales_mm_usd: f64,
    pub origin: OriginType,
    /// Fixed spacing between consecutive search invocations.
    pub search_delay: Duration,
    pub rates: ExchangeRates,
}

impl Default for ScreeningConfig {
    fn default() -> Self {
        Self {
            min_sales_mm_usd: DEFAULT_MIN_SALES_MM_USD,
            origin: OriginType::Ranking,
            search_delay: Duration::from_millis(DEFAULT_SEARCH_DELAY_MS),
            rates: ExchangeRates::standard(),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidThreshold { value: String },
    InvalidDelay { value: String },
    InvalidOrigin { value: String },
    InvalidRate { key: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidThreshold { value } => write!(
                f,
                "PROSPECT_MIN_SALES_MM_USD must be a non-negative number (got '{value}')"
            ),
            ConfigError::InvalidDelay { value } => write!(
                f,
                "PROSPECT_SEARCH_DELAY_MS must be a whole number of milliseconds (got '{value}')"
            ),
            ConfigError::InvalidOrigin { value } => write!(
                f,
                "PROSPECT_ORIGIN must be one of RANKING, TENDER, CONTRACT, MENTION (got '{value}')"
            ),
            ConfigError::InvalidRate { key, value } => {
                write!(f, "{key} must be a positive number (got '{value}')")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
