#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod config;
pub mod errors;
pub mod math;
pub mod scene;
pub mod shadow;
pub mod utils;

pub use config::SceneConfig;
pub use errors::{PenumbraError, Result};
pub use math::{BoundingBox, Frustum, FrustumCorner, LightBasis};
pub use scene::{Camera, CameraUpdate};
pub use shadow::{CascadeShadowCalculator, CascadeShadowUniforms, CascadedShadowFrame, DirectionalShadow, ShadowConfig};
pub use utils::orbit_control::{OrbitControls, OrbitKeys};

/// Commonly used types, re-exported for `use penumbra::prelude::*`.
pub mod prelude {
    pub use crate::config::SceneConfig;
    pub use crate::errors::{PenumbraError, Result};
    pub use crate::math::{BoundingBox, Frustum, FrustumCorner, LightBasis};
    pub use crate::scene::{Camera, CameraUpdate};
    pub use crate::shadow::*;
    pub use crate::utils::orbit_control::{OrbitControls, OrbitKeys};
    pub use glam::{Mat4, Vec3};
}
