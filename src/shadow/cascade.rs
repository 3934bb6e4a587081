//! Cascade Matrix Builder
//!
//! Fits one orthographic light camera around each cascade's slice of the
//! camera frustum.
//!
//! The slices are carved directly from the eight full-frustum corners: each
//! of the four near-to-far edges is interpolated at the slice's near and far
//! fractions, which yields the slice's corners without rebuilding planes.
//! Those corners are taken to light space, bounded by an AABB, and the AABB
//! becomes the light's orthographic volume.

use glam::{Mat4, Vec3};
use smallvec::{SmallVec, smallvec};

use super::bias::depth_bias_projection_view;
use super::config::{DepthRange, MAX_CASCADES, ShadowConfig};
use super::splits::{ClipSpaceSplits, SplitDistances, clip_space_split_distances, compute_split_distances};
use crate::errors::Result;
use crate::math::{BoundingBox, FRUSTUM_EDGES, Frustum, LightBasis};

/// Extents of a symmetric orthographic light volume.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OrthoExtents {
    pub width: f32,
    pub height: f32,
    pub near: f32,
    pub far: f32,
}

impl OrthoExtents {
    /// Orthographic projection centered on the view axis (OpenGL clip depth).
    #[must_use]
    pub fn projection(&self) -> Mat4 {
        let half_width = 0.5 * self.width;
        let half_height = 0.5 * self.height;
        Mat4::orthographic_rh_gl(-half_width, half_width, -half_height, half_height, self.near, self.far)
    }

    /// Distance from the light eye to the middle of the depth range.
    #[inline]
    #[must_use]
    pub fn half_depth(&self) -> f32 {
        0.5 * (self.far - self.near)
    }
}

/// Light camera fitted to one cascade.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CascadeMatrices {
    pub light_projection: Mat4,
    pub light_view: Mat4,
    /// `bias * light_projection * light_view`.
    pub depth_bias_projection_view: Mat4,
    pub extents: OrthoExtents,
    /// World-space center of the fitted light-space box.
    pub center: Vec3,
    /// World-space eye position of the light camera.
    pub light_position: Vec3,
    /// Distance from `center` to `light_position` along the light direction.
    pub light_distance: f32,
}

impl Default for CascadeMatrices {
    fn default() -> Self {
        Self {
            light_projection: Mat4::IDENTITY,
            light_view: Mat4::IDENTITY,
            depth_bias_projection_view: Mat4::IDENTITY,
            extents: OrthoExtents::default(),
            center: Vec3::ZERO,
            light_position: Vec3::ZERO,
            light_distance: 0.0,
        }
    }
}

impl CascadeMatrices {
    #[inline]
    #[must_use]
    pub fn projection_view(&self) -> Mat4 {
        self.light_projection * self.light_view
    }
}

/// Corners of the frustum slice between `near_fraction` and `far_fraction`
/// of the full frustum's depth, in [`FrustumCorner`](crate::math::FrustumCorner) order.
#[must_use]
pub fn sub_frustum_corners(frustum: &Frustum, near_fraction: f32, far_fraction: f32) -> [Vec3; 8] {
    let mut corners = [Vec3::ZERO; 8];
    for (near, far) in FRUSTUM_EDGES {
        let origin = frustum.corner(near);
        let edge = frustum.corner(far) - origin;
        corners[near.index()] = origin + edge * near_fraction;
        corners[far.index()] = origin + edge * far_fraction;
    }
    corners
}

/// Fits an orthographic light camera around `corners`.
///
/// A degenerate corner set produces a degenerate projection; it is reported
/// in the log but not treated as an error.
#[must_use]
pub fn fit_light_camera(light: &LightBasis, corners: &[Vec3; 8]) -> CascadeMatrices {
    let bounds = BoundingBox::from_points(corners.iter().map(|&corner| light.to_light_space(corner)));
    let size = bounds.size();

    // Light space: +X forward, +Y up, +Z side
    let extents = OrthoExtents {
        width: size.z,
        height: size.y,
        near: 0.0,
        far: size.x,
    };
    if size.min_element() <= f32::EPSILON {
        log::warn!("Degenerate cascade bounds {size}, shadow map will collapse");
    }

    let light_projection = extents.projection();
    let center = light.to_world_space(bounds.center());
    let light_distance = extents.half_depth();
    let light_position = center + light.direction() * light_distance;
    let light_view = light.view_matrix(light_position);

    CascadeMatrices {
        light_projection,
        light_view,
        depth_bias_projection_view: depth_bias_projection_view(&light_projection, &light_view),
        extents,
        center,
        light_position,
        light_distance,
    }
}

/// Cascaded shadow state for one directional light and one camera.
///
/// Per-cascade sequences are sized to the configured cascade count at
/// construction and keep that length; index `i` refers to the same cascade
/// in [`split_distances`](Self::split_distances) (`i` and `i + 1`),
/// [`clip_space_split_distances`](Self::clip_space_split_distances) and
/// [`cascades`](Self::cascades).
#[derive(Debug, Clone)]
pub struct CascadeShadowCalculator {
    config: ShadowConfig,
    range: DepthRange,
    light: LightBasis,
    projection: Option<Mat4>,
    split_distances: SplitDistances,
    clip_space_splits: ClipSpaceSplits,
    cascades: SmallVec<[CascadeMatrices; MAX_CASCADES]>,
}

impl CascadeShadowCalculator {
    pub fn new(config: ShadowConfig, range: DepthRange, light: LightBasis) -> Result<Self> {
        config.validate()?;

        let count = config.cascade_count();
        let split_distances = compute_split_distances(range, count, config.split_lambda);
        log::debug!("Cascade splits for {count} cascades: {split_distances:?}");

        Ok(Self {
            config,
            range,
            light,
            projection: None,
            split_distances,
            clip_space_splits: smallvec![0.0; count],
            cascades: smallvec![CascadeMatrices::default(); count],
        })
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &ShadowConfig {
        &self.config
    }

    #[inline]
    #[must_use]
    pub fn cascade_count(&self) -> usize {
        self.cascades.len()
    }

    #[inline]
    #[must_use]
    pub fn depth_range(&self) -> DepthRange {
        self.range
    }

    #[inline]
    #[must_use]
    pub fn light(&self) -> &LightBasis {
        &self.light
    }

    /// View-space split depths, `cascade_count + 1` entries.
    #[inline]
    #[must_use]
    pub fn split_distances(&self) -> &[f32] {
        &self.split_distances
    }

    /// Clip-space far bound of each cascade.
    #[inline]
    #[must_use]
    pub fn clip_space_split_distances(&self) -> &[f32] {
        &self.clip_space_splits
    }

    #[inline]
    #[must_use]
    pub fn cascades(&self) -> &[CascadeMatrices] {
        &self.cascades
    }

    #[must_use]
    pub fn depth_bias_projection_views(&self) -> impl ExactSizeIterator<Item = Mat4> + '_ {
        self.cascades.iter().map(|cascade| cascade.depth_bias_projection_view)
    }

    /// Changes the split blend factor and recomputes the splits.
    pub fn set_split_lambda(&mut self, lambda: f32) -> Result<()> {
        let mut config = self.config.clone();
        config.split_lambda = lambda;
        config.validate()?;
        self.config = config;
        self.recompute_splits();
        Ok(())
    }

    /// Changes the camera depth range covered by the cascades.
    ///
    /// The projection passed to the next
    /// [`update_clip_space_splits`](Self::update_clip_space_splits) and the
    /// frustum passed to [`update_cascades`](Self::update_cascades) must use
    /// the same range.
    pub fn set_depth_range(&mut self, range: DepthRange) {
        self.range = range;
        self.recompute_splits();
    }

    /// Rebuilds the light basis for a new light direction.
    pub fn set_light_direction(&mut self, light_direction: Vec3) -> Result<()> {
        self.light = LightBasis::new(light_direction, Vec3::Y)?;
        Ok(())
    }

    /// Recomputes the clip-space split thresholds for a new camera projection.
    pub fn update_clip_space_splits(&mut self, projection: &Mat4) {
        self.projection = Some(*projection);
        self.clip_space_splits = clip_space_split_distances(projection, &self.split_distances);
    }

    /// Refits every cascade's light camera to the camera frustum.
    ///
    /// `frustum` must be the full camera frustum spanning the configured
    /// depth range.
    pub fn update_cascades(&mut self, frustum: &Frustum) {
        for (i, cascade) in self.cascades.iter_mut().enumerate() {
            let near_fraction = self.range.fraction(self.split_distances[i]);
            let far_fraction = self.range.fraction(self.split_distances[i + 1]);

            let corners = sub_frustum_corners(frustum, near_fraction, far_fraction);
            *cascade = fit_light_camera(&self.light, &corners);

            log::trace!(
                "Cascade {i}: fractions [{near_fraction}, {far_fraction}], extents {:?}",
                cascade.extents
            );
        }
    }

    fn recompute_splits(&mut self) {
        self.split_distances = compute_split_distances(self.range, self.cascade_count(), self.config.split_lambda);
        log::debug!("Cascade splits recomputed: {:?}", self.split_distances);
        if let Some(projection) = self.projection {
            self.clip_space_splits = clip_space_split_distances(&projection, &self.split_distances);
        }
    }
}
