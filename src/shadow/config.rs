//! Shadow Configuration
//!
//! [`ShadowConfig`] gathers every tunable of the cascaded shadow setup in one
//! explicit value, so several independent shadow setups can coexist and tests
//! can vary the cascade count freely.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::errors::{PenumbraError, Result};

/// Maximum cascade count supported by the shading stage.
pub const MAX_CASCADES: usize = 4;

/// How shadow maps are stored and filtered by the shadow pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ShadowFiltering {
    /// Plain depth textures, rendered with front-face culling.
    Depth,
    /// Variance shadow maps (two-moment color targets), optionally blurred
    /// with a separable two-pass kernel.
    Variance {
        blur: bool,
        /// Kernel step in texels.
        blur_scale: f32,
    },
}

impl Default for ShadowFiltering {
    fn default() -> Self {
        Self::Variance {
            blur: true,
            blur_scale: 1.0,
        }
    }
}

/// Configuration of a cascaded shadow setup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShadowConfig {
    /// Number of cascades, `1..=MAX_CASCADES`.
    pub cascade_count: u32,
    /// Practical split scheme blend: `0.0` uniform, `1.0` logarithmic.
    pub split_lambda: f32,
    /// Shadow map resolution (square), passed to the shadow pass.
    pub map_size: u32,
    pub filtering: ShadowFiltering,
    /// Tint each cascade in the shading stage.
    pub show_cascade_colors: bool,
}

impl Default for ShadowConfig {
    fn default() -> Self {
        Self {
            cascade_count: 3,
            split_lambda: 0.5,
            map_size: 1024,
            filtering: ShadowFiltering::default(),
            show_cascade_colors: false,
        }
    }
}

impl ShadowConfig {
    /// Checks the preconditions of the split and cascade computations.
    pub fn validate(&self) -> Result<()> {
        if self.cascade_count == 0 || self.cascade_count as usize > MAX_CASCADES {
            return Err(PenumbraError::InvalidCascadeCount {
                count: self.cascade_count,
                max: MAX_CASCADES as u32,
            });
        }
        if !(0.0..=1.0).contains(&self.split_lambda) {
            return Err(PenumbraError::InvalidSplitLambda(self.split_lambda));
        }
        if self.map_size == 0 {
            return Err(PenumbraError::InvalidMapSize(self.map_size));
        }
        if let ShadowFiltering::Variance { blur_scale, .. } = self.filtering
            && !(blur_scale.is_finite() && blur_scale > 0.0)
        {
            return Err(PenumbraError::InvalidBlurScale(blur_scale));
        }
        Ok(())
    }

    #[inline]
    #[must_use]
    pub fn cascade_count(&self) -> usize {
        self.cascade_count as usize
    }

    #[must_use]
    pub fn is_variance(&self) -> bool {
        matches!(self.filtering, ShadowFiltering::Variance { .. })
    }

    /// Texture-space steps of the horizontal and vertical blur passes, or
    /// `None` when blurring is disabled.
    #[must_use]
    pub fn blur_steps(&self) -> Option<(Vec2, Vec2)> {
        match self.filtering {
            ShadowFiltering::Variance {
                blur: true,
                blur_scale,
            } => {
                let step = blur_scale / self.map_size as f32;
                Some((Vec2::new(step, 0.0), Vec2::new(0.0, step)))
            }
            _ => None,
        }
    }
}

/// Camera depth range covered by the cascades.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DepthRange {
    near: f32,
    far: f32,
}

impl DepthRange {
    pub fn new(near: f32, far: f32) -> Result<Self> {
        if near.is_finite() && far.is_finite() && near > 0.0 && far > near {
            Ok(Self { near, far })
        } else {
            Err(PenumbraError::InvalidDepthRange { near, far })
        }
    }

    #[inline]
    #[must_use]
    pub fn near(&self) -> f32 {
        self.near
    }

    #[inline]
    #[must_use]
    pub fn far(&self) -> f32 {
        self.far
    }

    #[inline]
    #[must_use]
    pub fn length(&self) -> f32 {
        self.far - self.near
    }

    /// Position of a view-space depth within the range, `0` at near and `1` at far.
    #[inline]
    #[must_use]
    pub fn fraction(&self, depth: f32) -> f32 {
        (depth - self.near) / self.length()
    }
}
