//! Build a fully-initialized two-body scenario
//!
//! `Scenario` is the runtime bundle owning:
//! - engine settings (`Engine`)
//! - numerical parameters (`Parameters`)
//! - system state (`TwoBody` at the fixed initial conditions)
//! - the force law (`NewtonianGravity`)
//! - the number of steps taken so far, from which elapsed time is derived
//!
//! The batch driver owns it directly; the viewer inserts it into bevy as a
//! `Resource` and mutates it from a single system.

use bevy::prelude::Resource;

use crate::configuration::config::RunConfig;
use crate::error::Result;
use crate::simulation::engine::Engine;
use crate::simulation::forces::NewtonianGravity;
use crate::simulation::integrator::euler_integrator;
use crate::simulation::params::Parameters;
use crate::simulation::states::{Snapshot, TwoBody};

#[derive(Resource, Debug, Clone)]
pub struct Scenario {
    pub engine: Engine,
    pub parameters: Parameters,
    pub system: TwoBody,
    pub forces: NewtonianGravity,
    steps: u64,
}

impl Scenario {
    /// Fixed initial conditions with the compile-time parameters
    pub fn new(engine: Engine) -> Self {
        Self::assemble(engine, Parameters::default(), TwoBody::initial())
    }

    /// Fixed initial conditions with custom parameters.
    /// Fails with `Error::InvalidParam` if `parameters` do not validate.
    pub fn with_parameters(engine: Engine, parameters: Parameters) -> Result<Self> {
        Self::from_system(engine, parameters, TwoBody::initial())
    }

    /// Start from an arbitrary pair, e.g. to look at degenerate geometry
    pub fn from_system(engine: Engine, parameters: Parameters, system: TwoBody) -> Result<Self> {
        parameters.validate()?;
        Ok(Self::assemble(engine, parameters, system))
    }

    fn assemble(engine: Engine, parameters: Parameters, system: TwoBody) -> Self {
        let forces = NewtonianGravity { G: parameters.G };
        Self {
            engine,
            parameters,
            system,
            forces,
            steps: 0,
        }
    }

    pub fn build_scenario(cfg: &RunConfig) -> Self {
        Self::new(Engine::from(&cfg.engine))
    }

    /// Advance by exactly one step. On error nothing changes, the step count included.
    pub fn advance(&mut self) -> Result<()> {
        euler_integrator(&mut self.system, &self.forces, &self.engine, &self.parameters)?;
        self.steps += 1;
        Ok(())
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Elapsed simulated time, `steps * dt`
    pub fn time(&self) -> f64 {
        self.parameters.time_at(self.steps)
    }

    pub fn snapshot(&self) -> Snapshot {
        self.system.snapshot(self.time())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn advance_counts_steps_and_time() {
        let mut scenario = Scenario::new(Engine::default());
        assert_eq!(scenario.steps(), 0);
        assert_eq!(scenario.time(), 0.0);

        for _ in 0..3 {
            scenario.advance().unwrap();
        }
        assert_eq!(scenario.steps(), 3);
        assert!((scenario.time() - 3e-6).abs() < 1e-20);
    }

    #[test]
    fn invalid_parameters_refused() {
        for dt in [0.0, -1e-6, f64::NAN] {
            let params = Parameters { dt, ..Parameters::default() };
            let err = Scenario::with_parameters(Engine::default(), params).unwrap_err();
            assert!(matches!(err, Error::InvalidParam(_)), "dt = {dt}");
        }
    }

    #[test]
    fn build_from_config_uses_policy() {
        let mut cfg = RunConfig::default();
        cfg.engine.singularity = crate::configuration::config::SingularityPolicy::Reject;
        let scenario = Scenario::build_scenario(&cfg);
        assert_eq!(scenario.engine.singularity, cfg.engine.singularity);
        assert_eq!(scenario.system, TwoBody::initial());
    }
}
