use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

use crate::eligibility::{ConnectionType, ThresholdTable};

/// Environment variables overriding the minimum average consumption per connection type.
const THRESHOLD_VARIABLES: [(ConnectionType, &str); 3] = [
    (
        ConnectionType::SinglePhase,
        "APP_MIN_CONSUMPTION_SINGLE_PHASE",
    ),
    (ConnectionType::TwoPhase, "APP_MIN_CONSUMPTION_TWO_PHASE"),
    (
        ConnectionType::ThreePhase,
        "APP_MIN_CONSUMPTION_THREE_PHASE",
    ),
];

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
    pub thresholds: ThresholdTable,
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

        let mut thresholds = ThresholdTable::default();
        for (connection_type, variable) in THRESHOLD_VARIABLES {
            if let Some(minimum_kwh) = threshold_override(variable)? {
                thresholds = thresholds.with_minimum(connection_type, minimum_kwh);
            }
        }

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            thresholds,
        })
    }
}

fn threshold_override(variable: &'static str) -> Result<Option<u32>, ConfigError> {
    match env::var(variable) {
        Ok(raw) => raw
            .trim()
            .parse::<u32>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidThreshold { variable }),
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

/// Log filter controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidThreshold { variable: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidThreshold { variable } => {
                write!(f, "{variable} must be a non-negative whole number of kWh")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::InvalidThreshold { .. } => None,
            ConfigError::InvalidHost { source } => Some(source),
        }
    }
}

/// Serializes tests that mutate process environment variables.
#[cfg(test)]
pub(crate) fn env_guard() -> &'static std::sync::Mutex<()> {
    static GUARD: std::sync::OnceLock<std::sync::Mutex<()>> = std::sync::OnceLock::new();
    GUARD.get_or_init(|| std::sync::Mutex::new(()))
}
