use glam::{Mat4, Vec3};

/// Named corners of a view frustum.
///
/// The discriminant is the corner's index in [`Frustum::corners`]. Near-plane
/// corners come first, far-plane corners are stored in reverse rotational
/// order so that every corner pairs with `7 - index` on the opposite plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrustumCorner {
    NearTopLeft = 0,
    NearBottomLeft = 1,
    NearBottomRight = 2,
    NearTopRight = 3,
    FarTopRight = 4,
    FarBottomRight = 5,
    FarBottomLeft = 6,
    FarTopLeft = 7,
}

impl FrustumCorner {
    /// All corners in storage order.
    pub const ALL: [Self; 8] = [
        Self::NearTopLeft,
        Self::NearBottomLeft,
        Self::NearBottomRight,
        Self::NearTopRight,
        Self::FarTopRight,
        Self::FarBottomRight,
        Self::FarBottomLeft,
        Self::FarTopLeft,
    ];

    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The corner on the other plane connected to this one by a frustum edge.
    #[inline]
    #[must_use]
    pub const fn opposite(self) -> Self {
        Self::ALL[7 - self.index()]
    }

    #[inline]
    #[must_use]
    pub const fn is_near(self) -> bool {
        self.index() < 4
    }

    /// Position of this corner in the OpenGL NDC cube (`z = -1` is the near plane).
    #[must_use]
    pub const fn ndc(self) -> Vec3 {
        match self {
            Self::NearTopLeft => Vec3::new(-1.0, 1.0, -1.0),
            Self::NearBottomLeft => Vec3::new(-1.0, -1.0, -1.0),
            Self::NearBottomRight => Vec3::new(1.0, -1.0, -1.0),
            Self::NearTopRight => Vec3::new(1.0, 1.0, -1.0),
            Self::FarTopRight => Vec3::new(1.0, 1.0, 1.0),
            Self::FarBottomRight => Vec3::new(1.0, -1.0, 1.0),
            Self::FarBottomLeft => Vec3::new(-1.0, -1.0, 1.0),
            Self::FarTopLeft => Vec3::new(-1.0, 1.0, 1.0),
        }
    }
}

/// The four edges running from the near plane to the far plane.
pub const FRUSTUM_EDGES: [(FrustumCorner, FrustumCorner); 4] = [
    (FrustumCorner::NearTopLeft, FrustumCorner::FarTopLeft),
    (FrustumCorner::NearBottomLeft, FrustumCorner::FarBottomLeft),
    (FrustumCorner::NearBottomRight, FrustumCorner::FarBottomRight),
    (FrustumCorner::NearTopRight, FrustumCorner::FarTopRight),
];

/// World-space corners of a camera frustum.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Frustum {
    corners: [Vec3; 8],
}

impl Frustum {
    /// Extracts the frustum of a combined `projection * view` matrix.
    ///
    /// The NDC cube corners are un-projected through the inverse matrix, so
    /// any projection (perspective or orthographic) using OpenGL clip depth
    /// is supported.
    #[must_use]
    pub fn from_matrix(projection_view: Mat4) -> Self {
        let inverse = projection_view.inverse();
        Self {
            corners: FrustumCorner::ALL.map(|corner| inverse.project_point3(corner.ndc())),
        }
    }

    /// Builds a frustum directly from corners given in [`FrustumCorner`] order.
    #[must_use]
    pub const fn from_corners(corners: [Vec3; 8]) -> Self {
        Self { corners }
    }

    #[inline]
    #[must_use]
    pub const fn corners(&self) -> &[Vec3; 8] {
        &self.corners
    }

    #[inline]
    #[must_use]
    pub const fn corner(&self, corner: FrustumCorner) -> Vec3 {
        self.corners[corner.index()]
    }

    /// Average of the eight corners.
    #[must_use]
    pub fn center(&self) -> Vec3 {
        self.corners.iter().copied().sum::<Vec3>() / 8.0
    }
}
