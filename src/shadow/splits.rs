//! Cascade Split Computation
//!
//! View-space split distances (Practical Split Scheme) and their clip-space
//! counterparts used by the shading stage for per-pixel cascade selection.

use glam::{Mat4, Vec3};
use smallvec::SmallVec;

use super::config::{DepthRange, MAX_CASCADES};

/// `N + 1` view-space split depths, `[near, ..., far]`.
pub type SplitDistances = SmallVec<[f32; MAX_CASCADES + 1]>;

/// One clip-space depth threshold per cascade.
pub type ClipSpaceSplits = SmallVec<[f32; MAX_CASCADES]>;

/// Computes cascade split distances using the Practical Split Scheme.
///
/// `lambda` blends between uniform (`0.0`) and logarithmic (`1.0`)
/// distribution. The result has `cascade_count + 1` entries; the first and
/// last are pinned to the range's near and far distances exactly.
#[must_use]
pub fn compute_split_distances(range: DepthRange, cascade_count: usize, lambda: f32) -> SplitDistances {
    debug_assert!(cascade_count >= 1 && cascade_count <= MAX_CASCADES);
    debug_assert!((0.0..=1.0).contains(&lambda));

    let near = range.near();
    let far = range.far();

    let mut splits: SplitDistances = (0..=cascade_count)
        .map(|i| {
            let fraction = i as f32 / cascade_count as f32;
            let exponential = near * (far / near).powf(fraction);
            let linear = near + (far - near) * fraction;
            lambda * exponential + (1.0 - lambda) * linear
        })
        .collect();

    // Rounding in powf may drift off the clip planes
    splits[0] = near;
    splits[cascade_count] = far;

    splits
}

/// Converts the far bound of every cascade to the camera's clip space.
///
/// The point `(0, 0, -far_bound)` (cameras look down `-Z`) is projected with
/// perspective division, so the result is an NDC depth.
#[must_use]
pub fn clip_space_split_distances(projection: &Mat4, split_distances: &[f32]) -> ClipSpaceSplits {
    split_distances
        .iter()
        .skip(1)
        .map(|&distance| projection.project_point3(Vec3::new(0.0, 0.0, -distance)).z)
        .collect()
}
