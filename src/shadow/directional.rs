//! Single-Map Directional Shadow
//!
//! The non-cascaded fallback: one fixed orthographic volume that follows a
//! target (for example the player's ball) from a constant light direction.

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

use super::bias::depth_bias_projection_view;
use super::cascade::OrthoExtents;
use crate::errors::{PenumbraError, Result};

/// Fixed orthographic shadow volume placed `distance` units towards the light.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectionalShadow {
    pub width: f32,
    pub height: f32,
    pub near: f32,
    pub far: f32,
    pub distance: f32,
}

impl Default for DirectionalShadow {
    fn default() -> Self {
        Self {
            width: 10.0,
            height: 10.0,
            near: 0.0,
            far: 20.0,
            distance: 10.0,
        }
    }
}

/// Matrices of a single directional shadow map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalShadowMatrices {
    pub light_projection: Mat4,
    pub light_view: Mat4,
    pub depth_bias_projection_view: Mat4,
    pub light_position: Vec3,
}

impl DirectionalShadow {
    /// Rejects volumes that would produce non-finite matrices.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [("width", self.width), ("height", self.height), ("distance", self.distance)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(PenumbraError::InvalidShadowVolume { field, value });
            }
        }
        if !(self.near.is_finite() && self.near >= 0.0) {
            return Err(PenumbraError::InvalidShadowVolume {
                field: "near",
                value: self.near,
            });
        }
        if !(self.far.is_finite() && self.far > self.near) {
            return Err(PenumbraError::InvalidDepthRange {
                near: self.near,
                far: self.far,
            });
        }
        Ok(())
    }

    #[must_use]
    pub fn extents(&self) -> OrthoExtents {
        OrthoExtents {
            width: self.width,
            height: self.height,
            near: self.near,
            far: self.far,
        }
    }

    /// Places the light `distance` units from `target` along `light_direction`
    /// (pointing towards the light) and aims it at `target`.
    #[must_use]
    pub fn follow(&self, target: Vec3, light_direction: Vec3) -> DirectionalShadowMatrices {
        let direction = light_direction.normalize_or(Vec3::Y);
        let up = if direction.y.abs() > 0.99 { Vec3::X } else { Vec3::Y };

        let light_position = target + direction * self.distance;
        let light_view = Mat4::look_at_rh(light_position, target, up);
        let light_projection = self.extents().projection();

        DirectionalShadowMatrices {
            light_projection,
            light_view,
            depth_bias_projection_view: depth_bias_projection_view(&light_projection, &light_view),
            light_position,
        }
    }
}
