use std::borrow::Cow;

use glam::{Mat4, Vec3};

use crate::errors::{PenumbraError, Result};
use crate::math::Frustum;
use crate::shadow::config::DepthRange;

/// Which of the camera matrices were rebuilt by [`Camera::update_matrices`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CameraUpdate {
    pub projection: bool,
    pub view: bool,
}

impl CameraUpdate {
    #[inline]
    #[must_use]
    pub fn any(self) -> bool {
        self.projection || self.view
    }
}

/// Perspective camera with OpenGL clip depth (`[-1, 1]`).
///
/// Setters only mark matrices dirty; [`update_matrices`](Self::update_matrices)
/// rebuilds them once per frame.
#[derive(Debug, Clone)]
pub struct Camera {
    pub name: Cow<'static, str>,

    fov: f32,
    aspect: f32,
    range: DepthRange,

    position: Vec3,
    direction: Vec3,

    view_matrix: Mat4,
    projection_matrix: Mat4,
    view_projection_matrix: Mat4,

    need_update_projection_matrix: bool,
    need_update_view_matrix: bool,
}

impl Camera {
    /// Creates a camera at the origin looking down `-Z`.
    pub fn new_perspective(fov_degrees: f32, aspect: f32, near: f32, far: f32) -> Result<Self> {
        let mut camera = Self {
            name: Cow::Borrowed("Camera"),
            fov: 0.0,
            aspect: aspect.max(f32::EPSILON),
            range: DepthRange::new(near, far)?,
            position: Vec3::ZERO,
            direction: Vec3::NEG_Z,
            view_matrix: Mat4::IDENTITY,
            projection_matrix: Mat4::IDENTITY,
            view_projection_matrix: Mat4::IDENTITY,
            need_update_projection_matrix: true,
            need_update_view_matrix: true,
        };
        camera.set_fov(fov_degrees)?;
        Ok(camera)
    }

    /// Vertical field of view in radians.
    #[inline]
    #[must_use]
    pub fn fov(&self) -> f32 {
        self.fov
    }

    #[inline]
    #[must_use]
    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    #[inline]
    #[must_use]
    pub fn depth_range(&self) -> DepthRange {
        self.range
    }

    #[inline]
    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    #[inline]
    #[must_use]
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    #[inline]
    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        self.view_matrix
    }

    #[inline]
    #[must_use]
    pub fn projection_matrix(&self) -> Mat4 {
        self.projection_matrix
    }

    #[inline]
    #[must_use]
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.view_projection_matrix
    }

    /// Frustum of the current view-projection matrix.
    #[must_use]
    pub fn frustum(&self) -> Frustum {
        Frustum::from_matrix(self.view_projection_matrix)
    }

    pub fn set_fov(&mut self, fov_degrees: f32) -> Result<()> {
        if !(fov_degrees > 0.0 && fov_degrees < 180.0) {
            return Err(PenumbraError::InvalidFieldOfView(fov_degrees));
        }
        self.fov = fov_degrees.to_radians();
        self.need_update_projection_matrix = true;
        Ok(())
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect.max(f32::EPSILON);
        self.need_update_projection_matrix = true;
    }

    /// Keeps the perspective correct after a window resize.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.set_aspect(width as f32 / height.max(1) as f32);
    }

    pub fn set_depth_range(&mut self, range: DepthRange) {
        self.range = range;
        self.need_update_projection_matrix = true;
    }

    /// Moves the camera; the view is only invalidated when the pose changes.
    pub fn set_pose(&mut self, position: Vec3, direction: Vec3) {
        let direction = direction.normalize_or(Vec3::NEG_Z);
        if position != self.position || direction != self.direction {
            self.position = position;
            self.direction = direction;
            self.need_update_view_matrix = true;
        }
    }

    pub fn look_at(&mut self, target: Vec3) {
        self.set_pose(self.position, target - self.position);
    }

    /// Rebuilds the dirty matrices.
    pub fn update_matrices(&mut self) -> CameraUpdate {
        let update = CameraUpdate {
            projection: std::mem::take(&mut self.need_update_projection_matrix),
            view: std::mem::take(&mut self.need_update_view_matrix),
        };

        if update.projection {
            self.projection_matrix =
                Mat4::perspective_rh_gl(self.fov, self.aspect, self.range.near(), self.range.far());
        }
        if update.view {
            let up = if self.direction.y.abs() > 0.99 { Vec3::Z } else { Vec3::Y };
            self.view_matrix = Mat4::look_to_rh(self.position, self.direction, up);
        }
        if update.any() {
            self.view_projection_matrix = self.projection_matrix * self.view_matrix;
        }

        update
    }
}
