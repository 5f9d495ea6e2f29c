use super::config::ConfigError;
use crate::exchange::ExchangeError;
use std::fmt;

/// Errors that prevent the controller from running at all.
///
/// Problems inside a single cycle never surface here; they degrade to a
/// skipped cycle instead.
#[derive(Debug, Clone, PartialEq)]
pub enum ControllerError {
    /// The configuration failed validation
    Config(ConfigError),
    /// The exchange refused to start
    Exchange(ExchangeError),
}

impl fmt::Display for ControllerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControllerError::Config(err) => write!(f, "{}", err),
            ControllerError::Exchange(err) => write!(f, "Exchange unavailable: {}", err),
        }
    }
}

impl std::error::Error for ControllerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ControllerError::Config(err) => Some(err),
            ControllerError::Exchange(err) => Some(err),
        }
    }
}

impl From<ConfigError> for ControllerError {
    fn from(err: ConfigError) -> Self {
        ControllerError::Config(err)
    }
}

impl From<ExchangeError> for ControllerError {
    fn from(err: ExchangeError) -> Self {
        ControllerError::Exchange(err)
    }
}
