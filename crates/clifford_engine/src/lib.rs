//! # Clifford Engine
//!
//! Geometric algebra for game code: sparse multivectors, conformal points
//! and closed-form continuous collision queries built on them.
//!
//! ## Features
//!
//! - **Multivectors**: Immutable sparse values over canonical basis blades
//! - **Products**: Geometric, outer, inner, dot and contraction products
//! - **Versors**: Inverses, reflections, rotors and exponential-map rotations
//! - **Conformal Model**: Point embedding, distances and rotation rotors
//! - **Continuous Collision**: Time of impact for moving circles and segments
//!
//! ## Quick Start
//!
//! ```rust
//! use clifford_engine::prelude::*;
//!
//! fn main() -> Result<(), GeometryError> {
//!     let a: Multivector = "2o1 + o2".parse()?;
//!     assert_eq!(a.x(), 2.0);
//!     assert_eq!(a.y(), 1.0);
//!
//!     let sum = Multivector::from([2.0, 1.0]) + Multivector::from([1.0, 2.0]);
//!     assert!(sum.equals(&Multivector::from([3.0, 3.0])));
//!
//!     let toi = collide_radius_radius(
//!         &Multivector::from([-3.0, 0.0]), &Multivector::from([-1.0, 0.0]), 1.0,
//!         &Multivector::from([3.0, 0.0]), &Multivector::from([1.0, 0.0]), 1.0,
//!     );
//!     assert_eq!(toi, Some(1.0));
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod config;
pub mod algebra;
pub mod physics;

mod error;

pub use error::{ErrorKind, GeometryError};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        ErrorKind, GeometryError,
        algebra::{
            Blade, BasisCache, Canonical, Multivector, MultivectorSource, Product, Rotation,
            conformal,
        },
        config::{Config, ConfigError},
        foundation::math::{Vec2, Vec3, EPSILON},
        physics::collision::{
            collide_radius_radius, collide_radius_segment, quadratic_roots,
            CollisionConfig, ContinuousCollision, QuadraticRoots, Segment,
        },
    };
}
