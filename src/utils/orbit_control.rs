use glam::{Quat, Vec3};

use crate::scene::camera::Camera;

/// Arrow keys held this frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrbitKeys {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

/// Keyboard-driven camera orbiting a (possibly moving) target.
///
/// `alpha` turns around the world Y axis, `theta` tilts the camera down
/// towards the target.
#[derive(Debug, Clone)]
pub struct OrbitControls {
    /// Radians per second.
    pub angle_velocity: f32,
    pub min_theta: f32,
    pub max_theta: f32,

    pub target: Vec3,
    pub distance: f32,
    alpha: f32,
    theta: f32,
    orientation: Quat,
}

impl OrbitControls {
    /// `theta` is clamped to `[min_theta, max_theta]`.
    #[must_use]
    pub fn new(target: Vec3, distance: f32, alpha: f32, theta: f32) -> Self {
        let min_theta = 0.1;
        let max_theta = 1.4;
        let mut controls = Self {
            angle_velocity: 1.0,
            min_theta,
            max_theta,

            target,
            distance,
            alpha,
            theta: if theta.is_nan() { min_theta } else { theta.clamp(min_theta, max_theta) },
            orientation: Quat::IDENTITY,
        };
        controls.update_orientation();
        controls
    }

    #[inline]
    #[must_use]
    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    #[inline]
    #[must_use]
    pub fn theta(&self) -> f32 {
        self.theta
    }

    /// Unit vector from the camera towards the target.
    #[must_use]
    pub fn direction(&self) -> Vec3 {
        self.orientation * Vec3::X
    }

    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.target - self.direction() * self.distance
    }

    /// Applies one frame of input and writes the resulting pose to `camera`.
    ///
    /// Only the first held key in left, right, up, down order is honoured.
    /// Returns `true` when the orientation changed.
    pub fn update(&mut self, camera: &mut Camera, keys: OrbitKeys, dt: f32) -> bool {
        let delta = self.angle_velocity * dt;

        let mut rotated = false;
        if keys.left {
            self.alpha += delta;
            rotated = true;
        } else if keys.right {
            self.alpha -= delta;
            rotated = true;
        } else if keys.up {
            if self.theta + delta < self.max_theta {
                self.theta += delta;
                rotated = true;
            }
        } else if keys.down && self.theta > delta + self.min_theta {
            self.theta -= delta;
            rotated = true;
        }

        if rotated {
            self.update_orientation();
        }

        // The target may have moved even without input
        camera.set_pose(self.position(), self.direction());
        rotated
    }

    fn update_orientation(&mut self) {
        let horizontal = Quat::from_axis_angle(Vec3::Y, -self.alpha);
        let vertical = Quat::from_axis_angle(Vec3::Z, -self.theta);
        self.orientation = horizontal * vertical;
    }
}
