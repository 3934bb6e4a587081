//! Cascaded Shadow Maps
//!
//! CPU side of directional-light shadow mapping.
//!
//! # Provided Functionality
//!
//! - Cascade split computation (Practical Split Scheme) and clip-space
//!   split thresholds
//! - Per-cascade orthographic light cameras fitted in light space
//! - Bias-adjusted depth-projection-view matrices and the uniform block
//!   consumed by the shading stage
//! - A single-map directional shadow for setups without cascades
//! - A per-frame orchestrator honouring camera dirty flags
//!
//! ```rust,ignore
//! use penumbra::prelude::*;
//!
//! let camera = Camera::new_perspective(45.0, 16.0 / 9.0, 0.1, 20.0)?;
//! let mut frame = CascadedShadowFrame::new(camera, Vec3::new(5.0, 2.0, 2.0), ShadowConfig::default())?;
//!
//! // every frame
//! frame.update();
//! upload(frame.uniforms().as_bytes());
//! ```

pub mod bias;
pub mod cascade;
pub mod config;
pub mod directional;
pub mod frame;
pub mod splits;
pub mod uniforms;

pub use bias::{BIAS_MATRIX, depth_bias_projection_view};
pub use cascade::{CascadeMatrices, CascadeShadowCalculator, OrthoExtents, fit_light_camera, sub_frustum_corners};
pub use config::{DepthRange, MAX_CASCADES, ShadowConfig, ShadowFiltering};
pub use directional::{DirectionalShadow, DirectionalShadowMatrices};
pub use frame::{CascadedShadowFrame, FrameUpdate};
pub use splits::{ClipSpaceSplits, SplitDistances, clip_space_split_distances, compute_split_distances};
pub use uniforms::{CascadeShadowUniforms, shader_defines, shadow_sampler_units};
