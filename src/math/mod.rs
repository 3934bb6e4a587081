//! Geometry Primitives
//!
//! CPU-side geometry used by shadow fitting:
//!
//! - [`Frustum`]: world-space corners of a camera frustum, in a named order
//! - [`BoundingBox`]: axis-aligned min/max accumulator
//! - [`LightBasis`]: orthonormal frame aligned to a directional light

pub mod bounding_box;
pub mod frustum;
pub mod light_basis;

pub use bounding_box::BoundingBox;
pub use frustum::{FRUSTUM_EDGES, Frustum, FrustumCorner};
pub use light_basis::LightBasis;
