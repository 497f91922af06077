//! Closed hazard rings

use crate::core_types::{GeoPoint, ZoneVertex};
use serde::{Deserialize, Serialize};

/// Minimum vertex count of a closed ring (triangle plus closing vertex)
pub const MIN_RING_VERTICES: usize = 4;

/// Why a ring or a ring operation was rejected
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeometryError {
    /// Fewer vertices than a closed ring needs
    #[error("ring has {count} vertices, at least {MIN_RING_VERTICES} required")]
    TooFewVertices {
        /// Vertices supplied
        count: usize,
    },

    /// First and last vertex differ
    #[error("ring is not closed")]
    OpenRing,

    /// A coordinate is NaN or infinite
    #[error("ring vertex {index} has a non-finite coordinate")]
    NonFiniteCoordinate {
        /// Offending vertex index
        index: usize,
    },

    /// All vertices are collinear or coincident
    #[error("ring encloses no area")]
    ZeroArea,

    /// The union produced no polygon
    #[error("union produced an empty geometry")]
    EmptyUnion,

    /// The geometry backend aborted on this input
    #[error("geometry backend failed: {0}")]
    Backend(String),
}

/// Closed ring of `[lon, lat]` vertices; the first vertex equals the last.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<ZoneVertex>", into = "Vec<ZoneVertex>")]
pub struct ZonePolygon(Vec<ZoneVertex>);

impl ZonePolygon {
    /// Validate an already-closed ring
    ///
    /// # Errors
    /// [`GeometryError::TooFewVertices`] or [`GeometryError::OpenRing`].
    pub fn from_ring(vertices: Vec<ZoneVertex>) -> Result<Self, GeometryError> {
        if vertices.len() < MIN_RING_VERTICES {
            return Err(GeometryError::TooFewVertices {
                count: vertices.len(),
            });
        }
        if vertices.first() != vertices.last() {
            return Err(GeometryError::OpenRing);
        }
        Ok(Self(vertices))
    }

    /// Close an open sequence of points by repeating the first one
    ///
    /// # Errors
    /// [`GeometryError::TooFewVertices`] when fewer than three points are given.
    pub fn close<I>(points: I) -> Result<Self, GeometryError>
    where
        I: IntoIterator<Item = GeoPoint>,
    {
        let mut vertices: Vec<ZoneVertex> = points.into_iter().map(ZoneVertex::from).collect();
        if let Some(&first) = vertices.first() {
            if vertices.last() != Some(&first) || vertices.len() == 1 {
                vertices.push(first);
            }
        }
        Self::from_ring(vertices)
    }

    /// Close a fixed-size sample of ring points; infallible for three or more
    #[must_use]
    pub fn close_sampled<const N: usize>(points: [GeoPoint; N]) -> Self {
        const { assert!(N + 1 >= MIN_RING_VERTICES) };
        let mut vertices: Vec<ZoneVertex> = Vec::with_capacity(N + 1);
        vertices.extend(points.map(ZoneVertex::from));
        vertices.push(vertices[0]);
        Self(vertices)
    }

    /// Vertices including the closing one
    #[must_use]
    pub fn vertices(&self) -> &[ZoneVertex] {
        &self.0
    }

    /// Vertex count including the closing one
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; kept for the `len`/`is_empty` pair
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Distinct vertices (the closing duplicate omitted)
    pub fn distinct_vertices(&self) -> impl Iterator<Item = &ZoneVertex> {
        self.0[..self.0.len() - 1].iter()
    }

    /// True when the first vertex equals the last
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.0.first() == self.0.last()
    }
}

impl TryFrom<Vec<ZoneVertex>> for ZonePolygon {
    type Error = GeometryError;

    fn try_from(vertices: Vec<ZoneVertex>) -> Result<Self, Self::Error> {
        Self::from_ring(vertices)
    }
}

impl From<ZonePolygon> for Vec<ZoneVertex> {
    fn from(polygon: ZonePolygon) -> Self {
        polygon.0
    }
}
