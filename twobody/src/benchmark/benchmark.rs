use std::time::Instant;

use crate::simulation::engine::Engine;
use crate::simulation::params::Parameters;
use crate::simulation::scenario::Scenario;
use crate::error::Result;

/// Time the Euler step over increasing step counts
pub fn bench_euler() -> Result<()> {
    let counts = [1_000u64, 10_000, 100_000, 1_000_000];

    for steps in counts {
        let mut scenario = Scenario::new(Engine::default());

        // Warm up
        scenario.advance()?;

        let t0 = Instant::now();
        for _ in 0..steps {
            scenario.advance()?;
        }
        let per_step = t0.elapsed().as_secs_f64() / steps as f64;

        println!("steps = {steps:8}, per step = {:10.3} ns", per_step * 1e9);
    }
    Ok(())
}

/// One row of the step-size study
#[derive(Debug, Clone, Copy)]
pub struct CurvePoint {
    pub dt: f64,
    pub steps: u64,
    pub separation: f64, // |x2 - x1| at t_max
    pub momentum_error: f64, // |p(t_max) - p(0)|
    pub energy_drift: f64, // |E(t_max) - E(0)| / |E(0)|
}

/// Run the fixed initial conditions to `T_MAX` for one step size.
/// A non-positive or non-finite `dt` is an `Error::InvalidParam`.
pub fn sensitivity_point(dt: f64) -> Result<CurvePoint> {
    let params = Parameters { dt, ..Parameters::default() };
    let mut scenario = Scenario::with_parameters(Engine::default(), params)?;

    let p0 = scenario.system.total_momentum();
    let e0 = scenario.system.total_energy(params.G);

    let steps = params.total_steps();
    for _ in 0..steps {
        scenario.advance()?;
    }

    let e1 = scenario.system.total_energy(params.G);
    Ok(CurvePoint {
        dt,
        steps,
        separation: scenario.system.separation(),
        momentum_error: (scenario.system.total_momentum() - p0).norm(),
        energy_drift: ((e1 - e0) / e0).abs(),
    })
}

/// Step-size sensitivity of the Euler scheme at fixed t_max
/// Paste output directly into a spreadsheet to graph
pub fn bench_euler_curve() -> Result<()> {
    println!("dt,steps,separation,momentum_error,energy_drift");

    for dt in [1e-4, 5e-5, 1e-5, 5e-6, 1e-6] {
        let p = sensitivity_point(dt)?;
        println!(
            "{:e},{},{:.12},{:e},{:e}",
            p.dt, p.steps, p.separation, p.momentum_error, p.energy_drift
        );
    }
    Ok(())
}
