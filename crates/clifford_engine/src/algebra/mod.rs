//! Geometric algebra over sparse multivectors
//!
//! Multivectors are sums of basis blades built from ortho-normal vectors
//! `o1, o2, …` (square to +1) and `i0, i1, …` (square to −1). Blades are
//! canonicalized through a shared [`BasisCache`], and all products are
//! grade-filtered views of the geometric product:
//!
//! | Product    | Keeps a term of grade `g` from grades `l * k` when |
//! |------------|----------------------------------------------------|
//! | geometric  | always                                             |
//! | outer      | `g == l + k`                                       |
//! | inner      | `g != l + k`                                       |
//! | dot        | `g == abs(k − l)`                                  |
//! | contract   | `g == k − l`                                       |

pub mod basis;
pub mod conformal;
pub mod multivector;
mod ops;
mod parse;
pub mod product;
pub mod versor;

pub use basis::{canonicalize, BasisCache, BasisVector, Blade, Canonical, Signature};
pub use multivector::{Multivector, MultivectorSource};
pub use product::Product;
pub use versor::{exp_blade, Rotation};
