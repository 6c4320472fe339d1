use std::env;
use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use crate::assessment::market::ReferenceData;
use crate::assessment::scoring::{ScoreModel, ScoringConfig};

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
    pub scoring: ScoringConfig,
    /// JSON replacement for the built-in reference table.
    pub market_data_path: Option<PathBuf>,
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

        let model = match env::var("SCORE_MODEL") {
            Ok(value) => ScoreModel::parse(&value).ok_or(ConfigError::InvalidScoreModel { value })?,
            Err(_) => ScoreModel::default(),
        };
        let debt_trend_adjustment = match env::var("SCORE_DEBT_TREND_ADJUSTMENT") {
            Ok(value) => parse_flag("SCORE_DEBT_TREND_ADJUSTMENT", &value)?,
            Err(_) => false,
        };

        let market_data_path = env::var("MARKET_DATA_PATH")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            scoring: ScoringConfig {
                model,
                debt_trend_adjustment,
            },
            market_data_path,
        })
    }

    /// Reference table for the strategy generator: the configured file, else the built-in one.
    pub fn reference_data(&self) -> Result<ReferenceData, ConfigError> {
        let Some(path) = &self.market_data_path else {
            return Ok(ReferenceData::default());
        };

        let file = File::open(path).map_err(|source| ConfigError::MarketDataIo {
            path: path.clone(),
            source,
        })?;
        ReferenceData::from_reader(BufReader::new(file)).map_err(|source| {
            ConfigError::MarketDataFormat {
                path: path.clone(),
                source,
            }
        })
    }
}

fn parse_flag(variable: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::InvalidFlag {
            variable,
            value: value.to_string(),
        }),
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

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost {
        source: std::net::AddrParseError,
    },
    InvalidScoreModel {
        value: String,
    },
    InvalidFlag {
        variable: &'static str,
        value: String,
    },
    MarketDataIo {
        path: PathBuf,
        source: std::io::Error,
    },
    MarketDataFormat {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidScoreModel { value } => write!(
                f,
                "SCORE_MODEL must be `standard` or `extended`, got '{value}'"
            ),
            ConfigError::InvalidFlag { variable, value } => {
                write!(f, "{variable} must be a boolean flag, got '{value}'")
            }
            ConfigError::MarketDataIo { path, .. } => {
                write!(f, "MARKET_DATA_PATH '{}' could not be read", path.display())
            }
            ConfigError::MarketDataFormat { path, .. } => write!(
                f,
                "MARKET_DATA_PATH '{}' is not a valid reference table",
                path.display()
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort
            | ConfigError::InvalidScoreModel { .. }
            | ConfigError::InvalidFlag { .. } => None,
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::MarketDataIo { source, .. } => Some(source),
            ConfigError::MarketDataFormat { source, .. } => Some(source),
        }
    }
}
