//! Physics module for continuous collision queries
//!
//! Bodies move linearly from a start position (`t = 0`) to an end
//! position (`t = 1`) over a step; queries report the earliest contact
//! fraction within that step.

pub mod collision;

pub use collision::{
    collide_radius_radius,
    collide_radius_segment,
    quadratic_roots,
    CollisionConfig,
    ContinuousCollision,
    QuadraticRoots,
    Segment,
};
