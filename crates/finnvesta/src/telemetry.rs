use crate::config::TelemetryConfig;
use std::fmt;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
pub enum TelemetryError {
    EnvFilter { value: String, source: ParseError },
    Subscriber(Box<dyn std::error::Error + Send + Sync>),
}

impl fmt::Display for TelemetryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TelemetryError::EnvFilter { value, .. } => {
                write!(f, "APP_LOG_LEVEL '{}' is not a valid tracing filter", value)
            }
            TelemetryError::Subscriber(err) => {
                write!(f, "tracing subscriber already installed: {err}")
            }
        }
    }
}

impl std::error::Error for TelemetryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TelemetryError::EnvFilter { source, .. } => Some(source),
            TelemetryError::Subscriber(err) => Some(&**err),
        }
    }
}

/// Builds the log filter: `RUST_LOG` when set, the configured level otherwise.
pub fn env_filter(config: &TelemetryConfig) -> Result<EnvFilter, TelemetryError> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => {
            EnvFilter::try_new(&config.log_level).map_err(|source| TelemetryError::EnvFilter {
                value: config.log_level.clone(),
                source,
            })
        }
    }
}

/// Installs the global compact subscriber on stderr, leaving stdout to
/// command output. Call once per process.
pub fn init(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(config)?)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .with_ansi(false)
        .try_init()
        .map_err(TelemetryError::Subscriber)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::env_guard;

    #[test]
    fn accepts_directive_filters() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        std::env::remove_var("RUST_LOG");
        let config = TelemetryConfig {
            log_level: "finnvesta=debug,info".to_string(),
        };
        assert!(env_filter(&config).is_ok());
    }

    #[test]
    fn rejects_malformed_level() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        std::env::remove_var("RUST_LOG");
        let config = TelemetryConfig {
            log_level: "finnvesta=loud".to_string(),
        };
        let err = env_filter(&config).expect_err("filter is malformed");
        assert!(matches!(
            err,
            TelemetryError::EnvFilter { ref value, .. } if value == "finnvesta=loud"
        ));
    }

    #[test]
    fn rust_log_takes_precedence_over_configured_level() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        std::env::set_var("RUST_LOG", "warn");
        let config = TelemetryConfig {
            log_level: "finnvesta=loud".to_string(),
        };
        let filter = env_filter(&config);
        std::env::remove_var("RUST_LOG");

        assert!(filter.is_ok());
    }
}
