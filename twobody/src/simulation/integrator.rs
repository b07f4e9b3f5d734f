//! Fixed-step explicit Euler integrator for the two-body system
//!
//! One step is always acceleration -> velocity -> position. Only
//! `euler_integrator` is public so the three updates cannot be called
//! out of order or skipped.

use super::engine::Engine;
use super::forces::{separation_squared, Acceleration};
use super::params::Parameters;
use super::states::{NVec2, TwoBody};
use crate::configuration::config::SingularityPolicy;
use crate::error::{Error, Result};

/// Advance the pair by one step of `params.dt`.
///
/// - accelerations are recomputed from the current positions
/// - v_n+1 = v_n + a_n dt
/// - x_n+1 = x_n + v_n+1 dt + 1/2 a_n dt^2
///
/// The step does not read or advance time; the caller tracks it.
///
/// Under `SingularityPolicy::Reject` a zero separation or a non-finite
/// acceleration returns `Error::SingularSeparation` and leaves `sys` untouched.
/// Under `Propagate` this never fails.
pub fn euler_integrator<F: Acceleration>(
    sys: &mut TwoBody,
    forces: &F,
    engine: &Engine,
    params: &Parameters,
) -> Result<()> {
    let (a1, a2) = forces.acceleration(sys);

    if engine.singularity == SingularityPolicy::Reject {
        let r2 = separation_squared(sys);
        let finite = a1.iter().chain(a2.iter()).all(|c| c.is_finite());
        if r2 == 0.0 || !finite {
            return Err(Error::SingularSeparation { r2 });
        }
    }

    update_accelerations(sys, a1, a2);
    update_velocities(sys, params.dt);
    update_positions(sys, params.dt);
    Ok(())
}

fn update_accelerations(sys: &mut TwoBody, a1: NVec2, a2: NVec2) {
    sys.p1.a = a1;
    sys.p2.a = a2;
}

// error of v is O(dt^2)
fn update_velocities(sys: &mut TwoBody, dt: f64) {
    for p in [&mut sys.p1, &mut sys.p2] {
        p.v += p.a * dt;
    }
}

// error of x is O(dt^3); uses the velocity already updated this step.
// Evaluated left to right: (x + v dt) + 1/2 a dt^2.
fn update_positions(sys: &mut TwoBody, dt: f64) {
    let dt2 = dt * dt;
    for p in [&mut sys.p1, &mut sys.p2] {
        p.x = p.x + p.v * dt + 0.5 * p.a * dt2;
    }
}
