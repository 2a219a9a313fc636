mod circle;
mod polygon;

pub use circle::{CirclePath, CirclePoints};
pub use polygon::PolygonPath;

use crate::error::{GeometryError, Result};
use crate::math::Point2;

/// Direction of travel along a closed path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Follow the path in its vertex (or increasing-angle) order.
    #[default]
    Forward,
    /// Follow the path against its vertex (or increasing-angle) order.
    Reverse,
}

impl Direction {
    /// Maps a "reversed" toggle to a direction.
    #[must_use]
    pub fn from_reversed(reversed: bool) -> Self {
        if reversed {
            Self::Reverse
        } else {
            Self::Forward
        }
    }

    /// Returns `true` for [`Direction::Reverse`].
    #[must_use]
    pub fn is_reversed(self) -> bool {
        self == Self::Reverse
    }

    /// `+1.0` forward, `-1.0` reverse.
    #[must_use]
    pub fn sign(self) -> f64 {
        match self {
            Self::Forward => 1.0,
            Self::Reverse => -1.0,
        }
    }

    /// Steps a vertex index one position in this direction, wrapping around a
    /// loop of `count` vertices.
    #[must_use]
    pub fn step(self, index: usize, count: usize) -> usize {
        match self {
            Self::Forward => (index + 1) % count,
            Self::Reverse => (index + count - 1) % count,
        }
    }
}

/// A closed path that markers can trace.
///
/// A geometry is a read-only snapshot: switching shapes or moving vertices
/// replaces it wholesale.
#[derive(Debug, Clone, PartialEq)]
pub enum PathGeometry {
    /// A closed polygonal loop.
    Polygon(PolygonPath),
    /// A full circle.
    Circle(CirclePath),
}

impl PathGeometry {
    /// Creates a polygon path from its vertices.
    ///
    /// # Errors
    ///
    /// See [`PolygonPath::new`].
    pub fn polygon(vertices: Vec<Point2>) -> Result<Self> {
        PolygonPath::new(vertices).map(Self::Polygon)
    }

    /// Creates a circular path.
    ///
    /// # Errors
    ///
    /// See [`CirclePath::new`].
    pub fn circle(center: Point2, radius: f64) -> Result<Self> {
        CirclePath::new(center, radius).map(Self::Circle)
    }

    /// Human-readable kind, used in diagnostics.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Polygon(_) => "polygon",
            Self::Circle(_) => "circle",
        }
    }

    /// Total arc length of the closed path.
    #[must_use]
    pub fn total_length(&self) -> f64 {
        match self {
            Self::Polygon(polygon) => polygon.total_length(),
            Self::Circle(circle) => circle.total_length(),
        }
    }

    /// Cumulative arc length at a polygon vertex.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::NotPolygon` for circles, or the error of
    /// [`PolygonPath::length_at_vertex`].
    pub fn length_at_vertex(&self, index: usize) -> Result<f64> {
        match self {
            Self::Polygon(polygon) => polygon.length_at_vertex(index),
            Self::Circle(_) => Err(GeometryError::NotPolygon.into()),
        }
    }

    /// Number of vertices, or `None` for a circle.
    #[must_use]
    pub fn vertex_count(&self) -> Option<usize> {
        match self {
            Self::Polygon(polygon) => Some(polygon.vertex_count()),
            Self::Circle(_) => None,
        }
    }

    /// Ordered boundary points: the polygon vertices, or `circle_segments`
    /// evenly spaced points on a circle.
    #[must_use]
    pub fn boundary(&self, circle_segments: usize) -> Vec<Point2> {
        match self {
            Self::Polygon(polygon) => polygon.vertices().to_vec(),
            Self::Circle(circle) => circle.points(circle_segments).collect(),
        }
    }

    /// Returns `true` when both geometries are the same kind and, for polygons,
    /// have the same vertex count, so that existing marker cursors stay valid.
    #[must_use]
    pub fn is_cursor_compatible(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Polygon(a), Self::Polygon(b)) => a.vertex_count() == b.vertex_count(),
            (Self::Circle(_), Self::Circle(_)) => true,
            _ => false,
        }
    }
}
