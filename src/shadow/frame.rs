//! Per-Frame Cascade Update
//!
//! [`CascadedShadowFrame`] ties a [`Camera`] to a [`CascadeShadowCalculator`]
//! and runs the dependent steps in order, skipping whatever did not change:
//!
//! 1. camera projection / view rebuild
//! 2. clip-space split thresholds (projection changed)
//! 3. frustum corners (projection or view changed)
//! 4. cascade light matrices and bias matrices (frustum changed)
//!
//! When nothing changed the previous frame's matrices stay valid and are
//! reused as-is.

use glam::Vec3;

use super::cascade::CascadeShadowCalculator;
use super::config::{DepthRange, ShadowConfig};
use super::uniforms::CascadeShadowUniforms;
use crate::errors::Result;
use crate::math::{Frustum, LightBasis};
use crate::scene::camera::Camera;

/// What [`CascadedShadowFrame::update`] recomputed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameUpdate {
    pub projection: bool,
    pub view: bool,
    pub cascades: bool,
}

#[derive(Debug, Clone)]
pub struct CascadedShadowFrame {
    camera: Camera,
    calculator: CascadeShadowCalculator,
    frustum: Frustum,
    uniforms: CascadeShadowUniforms,
    need_update_frustum: bool,
}

impl CascadedShadowFrame {
    /// Builds the shadow state for `camera` lit from `light_direction`
    /// (pointing towards the light).
    pub fn new(camera: Camera, light_direction: Vec3, config: ShadowConfig) -> Result<Self> {
        let light = LightBasis::new(light_direction, Vec3::Y)?;
        let calculator = CascadeShadowCalculator::new(config, camera.depth_range(), light)?;

        Ok(Self {
            camera,
            calculator,
            frustum: Frustum::default(),
            uniforms: CascadeShadowUniforms::default(),
            need_update_frustum: true,
        })
    }

    #[inline]
    #[must_use]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Mutable camera access; pose and projection changes are picked up by
    /// the next [`update`](Self::update).
    #[inline]
    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    #[inline]
    #[must_use]
    pub fn calculator(&self) -> &CascadeShadowCalculator {
        &self.calculator
    }

    #[inline]
    #[must_use]
    pub fn frustum(&self) -> &Frustum {
        &self.frustum
    }

    /// Uniforms as of the last [`update`](Self::update).
    #[inline]
    #[must_use]
    pub fn uniforms(&self) -> &CascadeShadowUniforms {
        &self.uniforms
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.camera.resize(width, height);
    }

    pub fn set_split_lambda(&mut self, lambda: f32) -> Result<()> {
        self.calculator.set_split_lambda(lambda)?;
        self.need_update_frustum = true;
        Ok(())
    }

    pub fn set_depth_range(&mut self, range: DepthRange) {
        self.camera.set_depth_range(range);
        self.calculator.set_depth_range(range);
    }

    pub fn set_light_direction(&mut self, light_direction: Vec3) -> Result<()> {
        self.calculator.set_light_direction(light_direction)?;
        self.need_update_frustum = true;
        Ok(())
    }

    /// Runs one frame of the update chain.
    pub fn update(&mut self) -> FrameUpdate {
        let camera_update = self.camera.update_matrices();

        if camera_update.projection {
            self.calculator
                .update_clip_space_splits(&self.camera.projection_matrix());
        }
        if camera_update.any() {
            self.need_update_frustum = true;
        }

        let cascades = std::mem::take(&mut self.need_update_frustum);
        if cascades {
            self.frustum = self.camera.frustum();
            self.calculator.update_cascades(&self.frustum);
            self.uniforms = CascadeShadowUniforms::from_calculator(&self.calculator);
            log::debug!(
                "Cascades refitted (projection: {}, view: {})",
                camera_update.projection,
                camera_update.view
            );
        }

        FrameUpdate {
            projection: camera_update.projection,
            view: camera_update.view,
            cascades,
        }
    }
}
