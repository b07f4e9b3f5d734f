//! Core state types for the two-body simulation.
//!
//! - `Particle`: one point mass with position, velocity and acceleration (`NVec2`)
//! - `TwoBody`: exactly two particles, owned and mutated only by the integrator
//! - `Snapshot`: an immutable between-steps copy consumed by recorders and renderers

use nalgebra::Vector2;
pub type NVec2 = Vector2<f64>;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub m: f64, // mass, constant for the whole run
    pub x: NVec2, // position
    pub v: NVec2, // velocity
    pub a: NVec2, // acceleration, recomputed every step
}

impl Particle {
    pub fn new(m: f64, x: NVec2, v: NVec2) -> Self {
        Self {
            m,
            x,
            v,
            a: NVec2::zeros(),
        }
    }

    /// Linear momentum m * v
    pub fn momentum(&self) -> NVec2 {
        self.m * self.v
    }

    /// Kinetic energy 1/2 m |v|^2
    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.m * self.v.norm_squared()
    }
}

/// The pair of bodies. There are always exactly two.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TwoBody {
    pub p1: Particle,
    pub p2: Particle,
}

impl TwoBody {
    /// Fixed initial conditions: unit masses, particle 1 at rest at the origin,
    /// particle 2 at (0.1, 0) moving tangentially with (0, 0.1).
    pub fn initial() -> Self {
        Self {
            p1: Particle::new(1.0, NVec2::new(0.0, 0.0), NVec2::new(0.0, 0.0)),
            p2: Particle::new(1.0, NVec2::new(0.1, 0.0), NVec2::new(0.0, 0.1)),
        }
    }

    /// Displacement of particle 2 relative to particle 1
    pub fn displacement(&self) -> NVec2 {
        self.p2.x - self.p1.x
    }

    pub fn separation(&self) -> f64 {
        self.displacement().norm()
    }

    /// Total linear momentum m1 v1 + m2 v2
    pub fn total_momentum(&self) -> NVec2 {
        self.p1.momentum() + self.p2.momentum()
    }

    /// Kinetic plus pair potential energy, -G m1 m2 / r for the potential part
    pub fn total_energy(&self, g: f64) -> f64 {
        let kinetic = self.p1.kinetic_energy() + self.p2.kinetic_energy();
        let potential = -g * self.p1.m * self.p2.m / self.separation();
        kinetic + potential
    }

    pub fn is_finite(&self) -> bool {
        [self.p1, self.p2]
            .iter()
            .all(|p| p.x.iter().chain(p.v.iter()).chain(p.a.iter()).all(|c| c.is_finite()))
    }

    /// Take a snapshot of the positions at elapsed time `t`
    pub fn snapshot(&self, t: f64) -> Snapshot {
        Snapshot {
            t,
            x1: self.p1.x.x,
            y1: self.p1.x.y,
            x2: self.p2.x.x,
            y2: self.p2.x.y,
        }
    }
}

/// Positions of both bodies at one instant, taken strictly between steps
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snapshot {
    pub t: f64,
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}
