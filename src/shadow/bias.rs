use glam::{Mat4, Vec4};

/// Maps clip space `[-1, 1]` to texture space `[0, 1]` on all three axes.
///
/// ```text
///     | 0.5 0.0 0.0 0.5 |
/// M = | 0.0 0.5 0.0 0.5 |
///     | 0.0 0.0 0.5 0.5 |
///     | 0.0 0.0 0.0 1.0 |
/// ```
pub const BIAS_MATRIX: Mat4 = Mat4::from_cols(
    Vec4::new(0.5, 0.0, 0.0, 0.0),
    Vec4::new(0.0, 0.5, 0.0, 0.0),
    Vec4::new(0.0, 0.0, 0.5, 0.0),
    Vec4::new(0.5, 0.5, 0.5, 1.0),
);

/// World space to shadow-map texture space for one light camera.
#[inline]
#[must_use]
pub fn depth_bias_projection_view(projection: &Mat4, view: &Mat4) -> Mat4 {
    BIAS_MATRIX * *projection * *view
}
