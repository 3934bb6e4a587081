//! Cascade Matrix Tests
//!
//! Tests for:
//! - Sub-frustum carving by edge interpolation
//! - Union of cascades reconstructing the camera frustum
//! - Light camera placement and tight fitting in light space
//! - Idempotence of the cascade update
//! - Degenerate frusta

use glam::{Mat4, Vec3};

use penumbra::math::{FRUSTUM_EDGES, Frustum, FrustumCorner, LightBasis};
use penumbra::shadow::*;

const EPSILON: f32 = 1e-3;

fn approx_vec(a: Vec3, b: Vec3) -> bool {
    (a - b).length() < EPSILON * (1.0 + b.length())
}

/// Camera at the origin looking down -Z.
fn forward_camera_frustum(near: f32, far: f32) -> Frustum {
    let projection = Mat4::perspective_rh_gl(45.0_f32.to_radians(), 1.5, near, far);
    Frustum::from_matrix(projection)
}

fn orbit_camera_frustum() -> Frustum {
    let projection = Mat4::perspective_rh_gl(45.0_f32.to_radians(), 16.0 / 9.0, 0.1, 20.0);
    let view = Mat4::look_at_rh(Vec3::new(8.0, 4.5, 3.0), Vec3::ZERO, Vec3::Y);
    Frustum::from_matrix(projection * view)
}

fn make_calculator(config: ShadowConfig, near: f32, far: f32, light: Vec3) -> CascadeShadowCalculator {
    let range = DepthRange::new(near, far).expect("valid range");
    let light = LightBasis::new(light, Vec3::Y).expect("valid light");
    CascadeShadowCalculator::new(config, range, light).expect("valid config")
}

// ============================================================================
// sub_frustum_corners Tests
// ============================================================================

#[test]
fn sub_frustum_corners_lie_on_edges_at_fraction() {
    let frustum = orbit_camera_frustum();
    let (near_fraction, far_fraction) = (0.2, 0.65);
    let corners = sub_frustum_corners(&frustum, near_fraction, far_fraction);

    for (near, far) in FRUSTUM_EDGES {
        let a = frustum.corner(near);
        let b = frustum.corner(far);
        let edge = b - a;

        for (corner, fraction) in [(near, near_fraction), (far, far_fraction)] {
            let p = corners[corner.index()];
            let t = (p - a).dot(edge) / edge.length_squared();
            assert!((t - fraction).abs() < 1e-5, "{corner:?}: parameter {t}, expected {fraction}");
            let off_line = (p - a).cross(edge).length() / edge.length();
            assert!(off_line < 1e-4, "{corner:?} is {off_line} off its edge");
            assert!(approx_vec(p, a + edge * fraction));
        }
    }
}

#[test]
fn sub_frustum_corners_sit_at_split_depths() {
    let frustum = forward_camera_frustum(0.1, 20.0);
    let range = DepthRange::new(0.1, 20.0).unwrap();
    let splits = compute_split_distances(range, 3, 0.5);

    for i in 0..3 {
        let corners = sub_frustum_corners(&frustum, range.fraction(splits[i]), range.fraction(splits[i + 1]));
        for corner in FrustumCorner::ALL {
            let expected = if corner.is_near() { -splits[i] } else { -splits[i + 1] };
            let z = corners[corner.index()].z;
            assert!(
                (z - expected).abs() < EPSILON * (1.0 + expected.abs()),
                "cascade {i} {corner:?}: z = {z}, expected {expected}"
            );
        }
    }
}

#[test]
fn full_fractions_reconstruct_frustum() {
    let frustum = orbit_camera_frustum();
    let corners = sub_frustum_corners(&frustum, 0.0, 1.0);
    for corner in FrustumCorner::ALL {
        assert!(
            approx_vec(corners[corner.index()], frustum.corner(corner)),
            "{corner:?}: {} vs {}",
            corners[corner.index()],
            frustum.corner(corner)
        );
    }
}

#[test]
fn cascades_are_contiguous_and_cover_frustum() {
    let frustum = orbit_camera_frustum();
    let range = DepthRange::new(0.1, 20.0).unwrap();
    let splits = compute_split_distances(range, 4, 0.5);
    let slices: Vec<[Vec3; 8]> = (0..4)
        .map(|i| sub_frustum_corners(&frustum, range.fraction(splits[i]), range.fraction(splits[i + 1])))
        .collect();

    // First cascade starts on the near plane, last ends on the far plane
    for (near, far) in FRUSTUM_EDGES {
        assert!(approx_vec(slices[0][near.index()], frustum.corner(near)));
        assert!(approx_vec(slices[3][far.index()], frustum.corner(far)));
    }

    // Neighbouring cascades share their boundary corners exactly
    for i in 0..3 {
        for (near, far) in FRUSTUM_EDGES {
            assert_eq!(slices[i][far.index()], slices[i + 1][near.index()]);
        }
    }
}

// ============================================================================
// Light Camera Tests
// ============================================================================

#[test]
fn light_eye_lies_on_direction_ray() {
    // Symmetric frustum looking down -Z, light orthogonal to the view direction
    let mut calculator = make_calculator(ShadowConfig::default(), 0.1, 20.0, Vec3::X);
    calculator.update_cascades(&forward_camera_frustum(0.1, 20.0));

    for (i, cascade) in calculator.cascades().iter().enumerate() {
        let expected = cascade.center + Vec3::X * cascade.light_distance;
        assert!(
            approx_vec(cascade.light_position, expected),
            "cascade {i}: eye {} not on ray, expected {expected}",
            cascade.light_position
        );

        let eye_from_view = cascade.light_view.inverse().transform_point3(Vec3::ZERO);
        assert!(
            approx_vec(eye_from_view, expected),
            "cascade {i}: view matrix eye {eye_from_view}, expected {expected}"
        );
        assert!((cascade.light_distance - 0.5 * cascade.extents.far).abs() < 1e-5);
        assert_eq!(cascade.extents.near, 0.0);
    }
}

#[test]
fn light_view_looks_against_light_direction() {
    let light_direction = Vec3::new(5.0, 2.0, 2.0).normalize();
    let mut calculator = make_calculator(ShadowConfig::default(), 0.1, 20.0, light_direction);
    calculator.update_cascades(&orbit_camera_frustum());

    for cascade in calculator.cascades() {
        // View space looks down -Z; the light direction points back at the eye
        let back = cascade.light_view.transform_vector3(light_direction);
        assert!(approx_vec(back, Vec3::Z), "light direction in view space: {back}");
    }
}

#[test]
fn cascade_corners_fit_inside_light_clip_volume() {
    let config = ShadowConfig {
        cascade_count: 4,
        ..ShadowConfig::default()
    };
    let mut calculator = make_calculator(config, 0.1, 20.0, Vec3::new(0.825, 0.564, 0.0));
    let frustum = orbit_camera_frustum();
    calculator.update_cascades(&frustum);

    let range = calculator.depth_range();
    let splits = calculator.split_distances().to_vec();
    for (i, cascade) in calculator.cascades().iter().enumerate() {
        let corners = sub_frustum_corners(&frustum, range.fraction(splits[i]), range.fraction(splits[i + 1]));
        let projection_view = cascade.projection_view();

        let mut min = Vec3::splat(f32::MAX);
        let mut max = Vec3::splat(f32::MIN);
        for corner in corners {
            let ndc = projection_view.project_point3(corner);
            min = min.min(ndc);
            max = max.max(ndc);
        }

        // Tight: inside the clip cube and touching it on every face
        assert!(min.cmpge(Vec3::splat(-1.0 - EPSILON)).all(), "cascade {i} min {min}");
        assert!(max.cmple(Vec3::splat(1.0 + EPSILON)).all(), "cascade {i} max {max}");
        assert!((min + Vec3::ONE).abs().max_element() < EPSILON, "cascade {i} not tight: min {min}");
        assert!((max - Vec3::ONE).abs().max_element() < EPSILON, "cascade {i} not tight: max {max}");
    }
}

#[test]
fn depth_bias_matrices_map_into_texture_space() {
    let mut calculator = make_calculator(ShadowConfig::default(), 0.1, 20.0, Vec3::new(5.0, 2.0, 2.0));
    calculator.update_cascades(&orbit_camera_frustum());

    for cascade in calculator.cascades() {
        assert_eq!(
            cascade.depth_bias_projection_view,
            BIAS_MATRIX * cascade.light_projection * cascade.light_view
        );
        let uv = cascade.depth_bias_projection_view.project_point3(cascade.center);
        assert!(approx_vec(uv, Vec3::splat(0.5)), "center maps to {uv}");
    }
    assert_eq!(calculator.depth_bias_projection_views().len(), 3);
}

#[test]
fn later_cascades_cover_larger_areas() {
    let mut calculator = make_calculator(ShadowConfig::default(), 0.1, 20.0, Vec3::new(5.0, 2.0, 2.0));
    calculator.update_cascades(&orbit_camera_frustum());

    let areas: Vec<f32> = calculator
        .cascades()
        .iter()
        .map(|c| c.extents.width * c.extents.height)
        .collect();
    for i in 1..areas.len() {
        assert!(areas[i] > areas[i - 1], "areas should grow with distance: {areas:?}");
    }
}

// ============================================================================
// Calculator State Tests
// ============================================================================

#[test]
fn cascade_update_is_idempotent() {
    let mut calculator = make_calculator(ShadowConfig::default(), 0.1, 20.0, Vec3::new(5.0, 2.0, 2.0));
    let frustum = orbit_camera_frustum();

    calculator.update_cascades(&frustum);
    let first = calculator.cascades().to_vec();
    calculator.update_cascades(&frustum);
    assert_eq!(first.as_slice(), calculator.cascades());
}

#[test]
fn per_cascade_storage_sized_to_config() {
    for count in 1..=MAX_CASCADES as u32 {
        let config = ShadowConfig {
            cascade_count: count,
            ..ShadowConfig::default()
        };
        let calculator = make_calculator(config, 0.1, 20.0, Vec3::X);
        assert_eq!(calculator.cascade_count(), count as usize);
        assert_eq!(calculator.cascades().len(), count as usize);
        assert_eq!(calculator.clip_space_split_distances().len(), count as usize);
        assert_eq!(calculator.split_distances().len(), count as usize + 1);
    }
}

#[test]
fn calculator_rejects_invalid_config() {
    let range = DepthRange::new(0.1, 20.0).unwrap();
    let light = LightBasis::new(Vec3::X, Vec3::Y).unwrap();
    let config = ShadowConfig {
        cascade_count: 5,
        ..ShadowConfig::default()
    };
    assert!(CascadeShadowCalculator::new(config, range, light).is_err());
}

#[test]
fn lambda_change_recomputes_splits_and_clip_thresholds() {
    let mut calculator = make_calculator(ShadowConfig::default(), 1.0, 100.0, Vec3::X);
    let projection = Mat4::perspective_rh_gl(45.0_f32.to_radians(), 1.0, 1.0, 100.0);
    calculator.update_clip_space_splits(&projection);
    let before = calculator.clip_space_split_distances().to_vec();

    calculator.set_split_lambda(0.0).unwrap();
    assert!((calculator.split_distances()[1] - 34.0).abs() < 1e-4);
    let after = calculator.clip_space_split_distances().to_vec();
    assert_ne!(before, after);
    assert_eq!(after, clip_space_split_distances(&projection, calculator.split_distances()).to_vec());

    assert!(calculator.set_split_lambda(1.5).is_err());
    assert_eq!(calculator.config().split_lambda, 0.0, "failed update must not change config");
}

#[test]
fn degenerate_frustum_does_not_panic() {
    let mut calculator = make_calculator(ShadowConfig::default(), 0.1, 20.0, Vec3::X);
    calculator.update_cascades(&Frustum::from_corners([Vec3::ONE; 8]));

    for cascade in calculator.cascades() {
        assert_eq!(cascade.extents.width, 0.0);
        assert_eq!(cascade.extents.height, 0.0);
        assert_eq!(cascade.extents.far, 0.0);
        assert!(approx_vec(cascade.center, Vec3::ONE));
    }
}
