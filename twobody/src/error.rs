//! Crate-wide error type.
//!
//! The integrator itself only fails when the engine is configured to reject
//! singular separations; everything else here comes from the outer I/O and
//! configuration layers.

use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Invalid user or API parameter.
    #[error("invalid parameter: {0}")]
    InvalidParam(String),

    /// The two bodies coincide (or nearly so) and the force law would divide by zero.
    /// Only raised under `SingularityPolicy::Reject`.
    #[error("singular separation between bodies (r^2 = {r2:e})")]
    SingularSeparation { r2: f64 },

    /// Scenario/config file could not be parsed.
    #[error("config error: {0}")]
    Config(#[from] serde_yaml::Error),

    /// Recorder output or config file I/O.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
