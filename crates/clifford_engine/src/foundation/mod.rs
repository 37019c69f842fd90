//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the engine:
//! - Math aliases, tolerance constants and nalgebra interop
//! - Logging setup

pub mod math;
pub mod logging;
