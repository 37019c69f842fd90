//! Continuous (swept) collision detection
//!
//! Each query parameterizes the motion over one step as
//! `p(t) = start + (end − start)·t` and solves for the instants at which
//! the squared separation equals the squared contact distance. The earliest
//! entering contact in `[0, 1]` is reported; `None` means no collision
//! during the step.

mod quadratic;
mod sweep;

pub use quadratic::{quadratic_roots, quadratic_roots_within, QuadraticRoots};
pub use sweep::{collide_radius_radius, collide_radius_segment, ContinuousCollision, Segment};

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::foundation::math::EPSILON;

/// Tolerances for the collision queries
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionConfig {
    /// Magnitude below which a root snaps to zero and a coefficient or
    /// discriminant counts as zero
    pub epsilon: f64,
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self { epsilon: EPSILON }
    }
}

impl Config for CollisionConfig {}
