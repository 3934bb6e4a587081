//! Shadow Uniforms
//!
//! CPU-side mirror of the cascade data read by the shading stage:
//!
//! ```glsl
//! uniform mat4 u_depth_bias_projection_view[NUM_SPLITS];
//! uniform float u_clip_space_split_distances[NUM_SPLITS];
//! uniform sampler2D u_shadow_samplers[NUM_SPLITS];
//! uniform float u_color_factor;
//! ```

use std::ops::Range;

use bytemuck::{Pod, Zeroable};
use glam::Mat4;

use super::cascade::CascadeShadowCalculator;
use super::config::MAX_CASCADES;

pub const DEPTH_BIAS_PROJECTION_VIEW: &str = "u_depth_bias_projection_view";
pub const CLIP_SPACE_SPLIT_DISTANCES: &str = "u_clip_space_split_distances";
pub const SHADOW_SAMPLERS: &str = "u_shadow_samplers";
pub const COLOR_FACTOR: &str = "u_color_factor";

/// Cascade uniform block, sized to [`MAX_CASCADES`].
///
/// Only the first `cascade_count` entries are meaningful; the remaining
/// matrices are identity and the remaining distances zero.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct CascadeShadowUniforms {
    pub depth_bias_projection_view: [Mat4; MAX_CASCADES],
    pub clip_space_split_distances: [f32; MAX_CASCADES],
    pub cascade_count: u32,
    /// `1.0` tints each cascade for debugging, `0.0` renders normally.
    pub color_factor: f32,
    pub _padding: [u32; 2],
}

impl Default for CascadeShadowUniforms {
    fn default() -> Self {
        Self {
            depth_bias_projection_view: [Mat4::IDENTITY; MAX_CASCADES],
            clip_space_split_distances: [0.0; MAX_CASCADES],
            cascade_count: 0,
            color_factor: 0.0,
            _padding: [0; 2],
        }
    }
}

impl CascadeShadowUniforms {
    #[must_use]
    pub fn from_calculator(calculator: &CascadeShadowCalculator) -> Self {
        let mut uniforms = Self {
            cascade_count: calculator.cascade_count() as u32,
            color_factor: if calculator.config().show_cascade_colors { 1.0 } else { 0.0 },
            ..Self::default()
        };

        for (slot, matrix) in uniforms
            .depth_bias_projection_view
            .iter_mut()
            .zip(calculator.depth_bias_projection_views())
        {
            *slot = matrix;
        }
        for (slot, &distance) in uniforms
            .clip_space_split_distances
            .iter_mut()
            .zip(calculator.clip_space_split_distances())
        {
            *slot = distance;
        }

        uniforms
    }

    /// The meaningful prefix of the matrix array.
    #[must_use]
    pub fn active_matrices(&self) -> &[Mat4] {
        &self.depth_bias_projection_view[..self.active_count()]
    }

    #[must_use]
    pub fn active_split_distances(&self) -> &[f32] {
        &self.clip_space_split_distances[..self.active_count()]
    }

    fn active_count(&self) -> usize {
        (self.cascade_count as usize).min(MAX_CASCADES)
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}

/// Texture units bound to `u_shadow_samplers`, one per cascade.
#[must_use]
pub fn shadow_sampler_units(cascade_count: usize) -> Range<i32> {
    0..cascade_count as i32
}

/// Preprocessor defines for the object shader of a cascaded setup.
#[must_use]
pub fn shader_defines(cascade_count: usize) -> Vec<String> {
    vec!["USE_CSM".to_owned(), format!("NUM_SPLITS {cascade_count}")]
}
