//! Scene Configuration
//!
//! JSON description of a shadowed demo scene: camera, light and shadow
//! settings. Every field has a default, so partial files are accepted.
//!
//! ```json
//! {
//!     "camera": { "fov_degrees": 45.0, "near": 0.1, "far": 20.0 },
//!     "light": { "direction": [5.0, 2.0, 2.0] },
//!     "shadow": { "cascade_count": 3, "split_lambda": 0.5, "filtering": { "mode": "depth" } }
//! }
//! ```

use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::scene::camera::Camera;
use crate::shadow::{CascadedShadowFrame, DirectionalShadow, ShadowConfig};
use crate::utils::orbit_control::OrbitControls;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    /// Initial viewport size, used for the aspect ratio.
    pub width: u32,
    pub height: u32,
    /// Orbit distance from the target.
    pub distance: f32,
    pub alpha: f32,
    pub theta: f32,
    pub angle_velocity: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 45.0,
            near: 0.1,
            far: 20.0,
            width: 1280,
            height: 720,
            distance: 10.0,
            alpha: 0.0,
            theta: 0.5,
            angle_velocity: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightConfig {
    /// Direction towards the light; normalized on use.
    pub direction: Vec3,
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            direction: Vec3::new(5.0, 2.0, 2.0),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub camera: CameraConfig,
    pub light: LightConfig,
    pub shadow: ShadowConfig,
    /// Single-map fallback; when set, cascades are not used.
    pub directional_shadow: Option<DirectionalShadow>,
}

impl SceneConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.shadow.validate()?;
        if let Some(directional) = &config.directional_shadow {
            directional.validate()?;
        }
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        log::info!("Loading scene config from {}", path.display());
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn build_camera(&self) -> Result<Camera> {
        let cfg = &self.camera;
        let mut camera = Camera::new_perspective(cfg.fov_degrees, 1.0, cfg.near, cfg.far)?;
        camera.resize(cfg.width, cfg.height);
        Ok(camera)
    }

    #[must_use]
    pub fn build_orbit_controls(&self, target: Vec3) -> OrbitControls {
        let cfg = &self.camera;
        let mut controls = OrbitControls::new(target, cfg.distance, cfg.alpha, cfg.theta);
        controls.angle_velocity = cfg.angle_velocity;
        controls
    }

    pub fn build_shadow_frame(&self) -> Result<CascadedShadowFrame> {
        CascadedShadowFrame::new(self.build_camera()?, self.light.direction, self.shadow.clone())
    }
}
