//! Numerical and physical parameters for the simulation
//!
//! The run constants are fixed at compile time:
//! - `G`: gravitational constant, close to the Gaussian gravitational constant
//! - `DT`: fixed step size
//! - `T_MAX`: end time of a batch run
//!
//! `Parameters` carries them at runtime so the benchmark and tests can
//! sweep the step size without touching the constants.

#![allow(non_snake_case)]

use crate::error::{Error, Result};

/// Gravitational constant in the simulation's arbitrary unit system
pub const G: f64 = 0.0172;

/// Fixed integration step
pub const DT: f64 = 1E-6;

/// End time for batch runs (inclusive)
pub const T_MAX: f64 = 1E-2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Parameters {
    pub G: f64, // gravitational constant
    pub dt: f64, // step size
    pub t_max: f64, // time end
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            G,
            dt: DT,
            t_max: T_MAX,
        }
    }
}

impl Parameters {
    /// All values finite, `dt > 0`, `t_max >= 0`
    pub fn validate(&self) -> Result<()> {
        if !self.G.is_finite() {
            return Err(Error::InvalidParam(format!("G must be finite, got {}", self.G)));
        }
        if !self.dt.is_finite() || self.dt <= 0.0 {
            return Err(Error::InvalidParam(format!("dt must be finite and > 0, got {}", self.dt)));
        }
        if !self.t_max.is_finite() || self.t_max < 0.0 {
            return Err(Error::InvalidParam(format!("t_max must be finite and >= 0, got {}", self.t_max)));
        }
        Ok(())
    }

    /// Number of steps needed to reach `t_max`, i.e. the last recorded step index.
    /// Rounded so that 1E-2 / 1E-6 gives 10000 and not 9999. Only meaningful after `validate`.
    pub fn total_steps(&self) -> u64 {
        (self.t_max / self.dt).round() as u64
    }

    /// Elapsed simulated time after `step` steps
    pub fn time_at(&self, step: u64) -> f64 {
        step as f64 * self.dt
    }

    /// Decimal places needed to print multiples of `dt` exactly, e.g. 6 for 1E-6.
    /// Only meaningful after `validate`.
    pub fn time_decimals(&self) -> usize {
        (-self.dt.log10() - 1e-9).ceil().max(0.0) as usize
    }
}
