//! Utility Module
//!
//! - [`OrbitControls`]: keyboard-driven camera orbiting a target

pub mod orbit_control;

pub use orbit_control::{OrbitControls, OrbitKeys};
