//! Error type for component construction.

use thiserror::Error;

/// Errors returned when a component is configured with values it cannot work with.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A configuration value is out of range, e.g. a window size of zero.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// Result alias used by fallible constructors in this crate.
pub type Result<T> = std::result::Result<T, Error>;
