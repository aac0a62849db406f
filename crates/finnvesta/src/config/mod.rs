use crate::pts::{
    PlanningError, PlanningParameters, DEFAULT_PLANNING_HORIZON_YEARS, DEFAULT_TARGET_PERCENTAGE,
    DEFAULT_TRIGGER_THRESHOLD,
};
use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

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
    /// Defaults applied when a request or command leaves planning knobs out.
    pub planning: PlanningParameters,
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

        let planning = PlanningParameters {
            trigger_threshold: env_number("PTS_TRIGGER_THRESHOLD", DEFAULT_TRIGGER_THRESHOLD)?,
            target_percentage: env_number("PTS_TARGET_PERCENTAGE", DEFAULT_TARGET_PERCENTAGE)?,
            planning_horizon_years: env_number(
                "PTS_HORIZON_YEARS",
                DEFAULT_PLANNING_HORIZON_YEARS,
            )?,
            reference_year: None,
        };
        planning.validate().map_err(ConfigError::InvalidPlanning)?;

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            planning,
        })
    }
}

fn env_number<T: FromStr>(var: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(var) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::InvalidNumber { var }),
        _ => Ok(default),
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

#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidNumber { var: &'static str },
    InvalidPlanning(PlanningError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidNumber { var } => write!(f, "{var} must be a number"),
            ConfigError::InvalidPlanning(err) => write!(f, "invalid planning defaults: {err}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::InvalidNumber { .. } => None,
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPlanning(err) => Some(err),
        }
    }
}

/// Serializes tests that read or write process environment variables.
#[cfg(test)]
pub(crate) fn env_guard() -> &'static std::sync::Mutex<()> {
    static GUARD: std::sync::OnceLock<std::sync::Mutex<()>> = std::sync::OnceLock::new();
    GUARD.get_or_init(|| std::sync::Mutex::new(()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    fn reset_env() {
        env::remove_var("APP_ENV");
        env::remove_var("APP_HOST");
        env::remove_var("APP_PORT");
        env::remove_var("APP_LOG_LEVEL");
        env::remove_var("PTS_TRIGGER_THRESHOLD");
        env::remove_var("PTS_TARGET_PERCENTAGE");
        env::remove_var("PTS_HORIZON_YEARS");
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
        assert_eq!(config.planning, PlanningParameters::default());
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
    fn reads_planning_defaults_from_env() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("PTS_TRIGGER_THRESHOLD", "0.55");
        env::set_var("PTS_TARGET_PERCENTAGE", "0.9");
        env::set_var("PTS_HORIZON_YEARS", "20");
        let config = AppConfig::load().expect("config loads");
        reset_env();

        assert_eq!(config.planning.trigger_threshold, 0.55);
        assert_eq!(config.planning.target_percentage, 0.9);
        assert_eq!(config.planning.planning_horizon_years, 20);
    }

    #[test]
    fn rejects_planning_defaults_outside_domain() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("PTS_HORIZON_YEARS", "40");
        let err = AppConfig::load().expect_err("horizon out of range");
        reset_env();

        assert!(matches!(
            err,
            ConfigError::InvalidPlanning(PlanningError::InvalidHorizon(40))
        ));
    }

    #[test]
    fn rejects_non_numeric_threshold() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("PTS_TRIGGER_THRESHOLD", "half");
        let err = AppConfig::load().expect_err("threshold is not a number");
        reset_env();

        assert!(matches!(
            err,
            ConfigError::InvalidNumber {
                var: "PTS_TRIGGER_THRESHOLD"
            }
        ));
    }
}
