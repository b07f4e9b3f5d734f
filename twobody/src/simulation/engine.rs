//! High-level runtime engine settings and run state
//!
//! `Engine` selects how the integrator treats coincident bodies.
//! `RunState` is the driver-side two-state machine: Running until the batch
//! bound is reached or the window closes, then Stopped for good.

use crate::configuration::config::{EngineConfig, SingularityPolicy};

#[derive(Debug, Clone, Default)]
pub struct Engine {
    pub singularity: SingularityPolicy, // propagate NaN (default) or reject the step
}

impl From<&EngineConfig> for Engine {
    fn from(cfg: &EngineConfig) -> Self {
        Self {
            singularity: cfg.singularity,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    #[default]
    Running,
    Stopped,
}

impl RunState {
    /// Move to Stopped. There is no way back to Running.
    pub fn stop(&mut self) {
        *self = RunState::Stopped;
    }

    pub fn is_running(&self) -> bool {
        *self == RunState::Running
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stop_is_terminal() {
        let mut state = RunState::default();
        assert!(state.is_running());
        state.stop();
        assert!(!state.is_running());
        state.stop();
        assert_eq!(state, RunState::Stopped);
    }
}
