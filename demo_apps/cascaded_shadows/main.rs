use anyhow::Context;
use glam::Vec3;
use penumbra::prelude::*;

/// Frames simulated per run at a fixed 60 Hz step.
const FRAME_COUNT: u32 = 240;
const DT: f32 = 1.0 / 60.0;

struct CascadedShadowsDemo {
    frame: CascadedShadowFrame,
    controls: OrbitControls,
    directional: Option<DirectionalShadow>,
    light_direction: Vec3,
}

impl CascadedShadowsDemo {
    fn init(config: &SceneConfig) -> anyhow::Result<Self> {
        let frame = config.build_shadow_frame()?;
        let controls = config.build_orbit_controls(Vec3::ZERO);

        log::info!(
            "{} cascades, lambda {}, {}x{} maps, splits {:?}",
            config.shadow.cascade_count,
            config.shadow.split_lambda,
            config.shadow.map_size,
            config.shadow.map_size,
            frame.calculator().split_distances()
        );
        log::info!("Shader defines: {:?}", shader_defines(config.shadow.cascade_count()));
        if let Some((horizontal, vertical)) = config.shadow.blur_steps() {
            log::info!("Variance blur steps: {horizontal} / {vertical}");
        }

        Ok(Self {
            frame,
            controls,
            directional: config.directional_shadow,
            light_direction: config.light.direction,
        })
    }

    fn update(&mut self, index: u32, keys: OrbitKeys) {
        self.controls.update(self.frame.camera_mut(), keys, DT);

        // Ball rolling across the floor
        if let Some(directional) = &self.directional {
            let t = index as f32 * DT;
            let target = Vec3::new(3.0 * t.cos(), 0.0, 3.0 * t.sin());
            let matrices = directional.follow(target, self.light_direction);
            log::trace!("Frame {index}: follow shadow eye {}", matrices.light_position);
            return;
        }

        let update = self.frame.update();
        if !update.cascades {
            return;
        }

        let uniforms = self.frame.uniforms();
        log::debug!(
            "Frame {index}: clip splits {:?}, {} bytes of uniforms",
            uniforms.active_split_distances(),
            uniforms.as_bytes().len()
        );
        for (i, cascade) in self.frame.calculator().cascades().iter().enumerate() {
            log::trace!(
                "  cascade {i}: {:.2} x {:.2} x {:.2}, eye {}",
                cascade.extents.width,
                cascade.extents.height,
                cascade.extents.far,
                cascade.light_position
            );
        }
    }
}

/// Scripted input: orbit left, tilt up, orbit right, then idle.
fn keys_for_frame(index: u32) -> OrbitKeys {
    let mut keys = OrbitKeys::default();
    match index / 60 {
        0 => keys.left = true,
        1 => keys.up = true,
        2 => keys.right = true,
        _ => {}
    }
    keys
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => SceneConfig::load(&path).with_context(|| format!("loading scene config {path}"))?,
        None => SceneConfig::default(),
    };

    let mut demo = CascadedShadowsDemo::init(&config)?;
    for index in 0..FRAME_COUNT {
        if index == FRAME_COUNT / 2 {
            log::info!("Resizing viewport to 1920x1080");
            demo.frame.resize(1920, 1080);
        }
        demo.update(index, keys_for_frame(index));
    }

    let camera = demo.frame.camera();
    log::info!(
        "Finished {FRAME_COUNT} frames, camera at {} (alpha {:.2}, theta {:.2})",
        camera.position(),
        demo.controls.alpha(),
        demo.controls.theta()
    );
    Ok(())
}
