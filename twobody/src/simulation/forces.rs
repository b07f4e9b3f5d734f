//! Acceleration sources for the two-body engine
//!
//! Defines the pairwise acceleration trait and direct Newtonian gravity.
//! There is no softening: coincident bodies give a division by zero, which
//! the integrator handles according to the engine's `SingularityPolicy`.

#![allow(non_snake_case)]

use crate::simulation::states::{NVec2, TwoBody};

/// Trait for acceleration sources acting on the pair.
/// Returns the fresh accelerations `(a1, a2)`; reads positions and masses only.
pub trait Acceleration {
    fn acceleration(&self, sys: &TwoBody) -> (NVec2, NVec2);
}

/// Newtonian gravity between the two bodies, unsoftened
#[derive(Debug, Clone, Copy)]
pub struct NewtonianGravity {
    pub G: f64, // gravitational constant
}

impl Acceleration for NewtonianGravity {
    fn acceleration(&self, sys: &TwoBody) -> (NVec2, NVec2) {
        // displacement of body 2 with respect to body 1
        let d = sys.displacement();

        // r^2, then r^3 = (r^2)^1.5
        let r2 = d.x * d.x + d.y * d.y;
        let r3 = r2.powf(1.5);

        let m1 = sys.p1.m;
        let m2 = sys.p2.m;

        // a1 points along +d (toward body 2), scaled by the other body's mass
        let a1 = NVec2::new(self.G * m2 / r3 * d.x, self.G * m2 / r3 * d.y);
        // a2 points along -d
        let a2 = NVec2::new(-self.G * m1 / r3 * d.x, -self.G * m1 / r3 * d.y);

        (a1, a2)
    }
}

/// Squared separation used by the force law, exposed for the singularity check
pub fn separation_squared(sys: &TwoBody) -> f64 {
    let d = sys.displacement();
    d.x * d.x + d.y * d.y
}
