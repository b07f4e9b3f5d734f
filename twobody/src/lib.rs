pub mod simulation;
pub mod configuration;
pub mod visualization;
pub mod benchmark;
pub mod error;

pub use simulation::states::{Particle, TwoBody, Snapshot, NVec2};
pub use simulation::forces::{Acceleration, NewtonianGravity};
pub use simulation::integrator::euler_integrator;
pub use simulation::engine::{Engine, RunState};
pub use simulation::params::{Parameters, G, DT, T_MAX};
pub use simulation::scenario::Scenario;
pub use simulation::driver::{run, run_batch, Recorder, FileRecorder, MemoryRecorder};

pub use configuration::config::{RunConfig, EngineConfig, ViewerConfig, SingularityPolicy, Mode};

pub use visualization::twobody_vis2d::{run_2d, to_screen};

pub use benchmark::benchmark::{bench_euler, bench_euler_curve, sensitivity_point};

pub use error::{Error, Result};
