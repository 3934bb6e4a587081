use glam::{Mat3, Mat4, Vec3};

use crate::errors::{PenumbraError, Result};

/// Orthonormal frame of a directional light.
///
/// Columns are `[forward, up, side]`, where `forward` is the direction the
/// light travels (the negated direction *to* the light). In light space the
/// light therefore looks down `+X`, `Y` is its up axis and `Z` its side axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightBasis {
    direction: Vec3,
    basis: Mat3,
    inverse: Mat3,
}

impl LightBasis {
    /// Builds the basis for a light shining from `light_direction`
    /// (pointing from the scene towards the light).
    ///
    /// When the light is (anti)parallel to `world_up`, an arbitrary vector
    /// orthogonal to it is used as up instead.
    pub fn new(light_direction: Vec3, world_up: Vec3) -> Result<Self> {
        let direction = light_direction
            .try_normalize()
            .ok_or(PenumbraError::DegenerateLightDirection(light_direction.to_array()))?;
        let world_up = world_up.try_normalize().unwrap_or(Vec3::Y);

        let forward = -direction;
        let up_hint = if forward.dot(world_up).abs() > 0.99 {
            log::warn!("Light direction {direction} is parallel to up {world_up}, using fallback up axis");
            world_up.any_orthonormal_vector()
        } else {
            world_up
        };

        let side = forward.cross(up_hint).normalize();
        let up = side.cross(forward);
        let basis = Mat3::from_cols(forward, up, side);

        Ok(Self {
            direction,
            basis,
            inverse: basis.inverse(),
        })
    }

    /// Unit vector pointing from the scene towards the light.
    #[inline]
    #[must_use]
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Unit vector along which the light travels.
    #[inline]
    #[must_use]
    pub fn forward(&self) -> Vec3 {
        self.basis.x_axis
    }

    #[inline]
    #[must_use]
    pub fn up(&self) -> Vec3 {
        self.basis.y_axis
    }

    #[inline]
    #[must_use]
    pub fn side(&self) -> Vec3 {
        self.basis.z_axis
    }

    #[inline]
    #[must_use]
    pub fn matrix(&self) -> Mat3 {
        self.basis
    }

    #[inline]
    #[must_use]
    pub fn inverse(&self) -> Mat3 {
        self.inverse
    }

    #[inline]
    #[must_use]
    pub fn to_light_space(&self, world: Vec3) -> Vec3 {
        self.inverse * world
    }

    #[inline]
    #[must_use]
    pub fn to_world_space(&self, light: Vec3) -> Vec3 {
        self.basis * light
    }

    /// View matrix of a light camera placed at `eye` and oriented by this basis.
    #[must_use]
    pub fn view_matrix(&self, eye: Vec3) -> Mat4 {
        Mat4::look_to_rh(eye, self.forward(), self.up())
    }
}
