//! Scene Objects
//!
//! - [`Camera`]: perspective camera with dirty-flag matrix updates

pub mod camera;

pub use camera::{Camera, CameraUpdate};
