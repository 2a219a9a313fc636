use tracing::warn;

use crate::error::{GeometryError, Result};
use crate::math::distance_2d::{lies_on_segment, point_to_segment_dist, project_onto_segment};
use crate::math::{Point2, LENGTH_EPSILON, TOLERANCE};

use super::Direction;

/// A closed polygonal path.
///
/// The vertex sequence loops back from the last vertex to the first, and its
/// order defines the forward direction of travel. Lengths are derived on demand
/// from the vertex snapshot; nothing is cached.
#[derive(Debug, Clone, PartialEq)]
pub struct PolygonPath {
    vertices: Vec<Point2>,
}

impl PolygonPath {
    /// Creates a closed polygonal path.
    ///
    /// # Errors
    ///
    /// Returns an error if fewer than three vertices are given, a coordinate is
    /// not finite, or the loop has zero length.
    pub fn new(vertices: Vec<Point2>) -> Result<Self> {
        if vertices.len() < 3 {
            return Err(GeometryError::Degenerate(format!(
                "polygon path needs at least 3 vertices, got {}",
                vertices.len()
            ))
            .into());
        }
        if vertices.iter().any(|v| !v.x.is_finite() || !v.y.is_finite()) {
            return Err(
                GeometryError::Degenerate("polygon vertex is not finite".into()).into(),
            );
        }

        let path = Self { vertices };
        if path.total_length() < TOLERANCE {
            return Err(
                GeometryError::Degenerate("polygon path has zero length".into()).into(),
            );
        }
        Ok(path)
    }

    /// Returns the vertices in traversal order.
    #[must_use]
    pub fn vertices(&self) -> &[Point2] {
        &self.vertices
    }

    /// Returns the number of vertices (and edges) of the loop.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the vertex at `index`.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::IndexOutOfRange` if `index >= vertex_count()`.
    pub fn vertex(&self, index: usize) -> Result<Point2> {
        self.vertices.get(index).copied().ok_or_else(|| {
            GeometryError::IndexOutOfRange {
                index,
                len: self.vertices.len(),
            }
            .into()
        })
    }

    /// Edge `i` runs from vertex `i` to vertex `i + 1`; edge `n - 1` closes the loop.
    fn edges(&self) -> impl Iterator<Item = (Point2, Point2)> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| (self.vertices[i], self.vertices[(i + 1) % n]))
    }

    /// Total arc length, including the closing edge.
    #[must_use]
    pub fn total_length(&self) -> f64 {
        self.edges().map(|(a, b)| (b - a).norm()).sum()
    }

    /// Arc length from vertex 0 to vertex `index`, walking forward without the
    /// closing edge.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::IndexOutOfRange` if `index >= vertex_count()`.
    pub fn length_at_vertex(&self, index: usize) -> Result<f64> {
        if index >= self.vertices.len() {
            return Err(GeometryError::IndexOutOfRange {
                index,
                len: self.vertices.len(),
            }
            .into());
        }
        Ok(self.edges().take(index).map(|(a, b)| (b - a).norm()).sum())
    }

    /// Returns the point `length` units along the path from vertex 0, and the
    /// vertex a marker placed there should head for when travelling in `direction`.
    ///
    /// Lengths that overshoot the total by less than [`LENGTH_EPSILON`] are
    /// clamped onto the end of the loop.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::LengthOutOfRange` if `length` is negative, not
    /// finite, or beyond the total length.
    pub fn position_at_length(&self, length: f64, direction: Direction) -> Result<(Point2, usize)> {
        let total = self.total_length();
        if !length.is_finite() || length < 0.0 || length > total + LENGTH_EPSILON {
            return Err(GeometryError::LengthOutOfRange { length, total }.into());
        }
        let length = length.min(total);

        let n = self.vertices.len();
        let mut walked = 0.0;
        for (i, (a, b)) in self.edges().enumerate() {
            let seg_len = (b - a).norm();
            let seg_start = walked;
            walked += seg_len;

            if walked >= length || i == n - 1 {
                let t = if seg_len < TOLERANCE {
                    0.0
                } else {
                    ((length - seg_start) / seg_len).clamp(0.0, 1.0)
                };
                let position = a + (b - a) * t;
                let next = match direction {
                    Direction::Forward => (i + 1) % n,
                    Direction::Reverse => i,
                };
                return Ok((position, next));
            }
        }

        Err(GeometryError::LengthOutOfRange { length, total }.into())
    }

    /// Returns the fraction of the loop covered when travelling from vertex 0 to
    /// `point`, in `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::Unresolved` if no edge contains the point.
    pub fn try_progress_fraction(&self, point: &Point2) -> Result<f64> {
        let total = self.total_length();
        let mut walked = 0.0;
        for (a, b) in self.edges() {
            if lies_on_segment(point, &a, &b) {
                let along = (point - a).norm();
                return Ok(((walked + along) / total).clamp(0.0, 1.0));
            }
            walked += (b - a).norm();
        }
        Err(GeometryError::Unresolved {
            x: point.x,
            y: point.y,
        }
        .into())
    }

    /// Returns the fraction of the loop covered at `point`, measured along
    /// edge `edge` (from vertex `edge` to the next one).
    ///
    /// The point is projected onto that edge, so the result does not depend on
    /// which other edges the point happens to touch near a corner. Vertex 0 maps
    /// to `0` regardless of the edge it is reached on.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::IndexOutOfRange` if `edge >= vertex_count()`.
    pub fn progress_along_edge(&self, point: &Point2, edge: usize) -> Result<f64> {
        let start = self.vertex(edge)?;
        let end = self.vertices[(edge + 1) % self.vertices.len()];
        let along = project_onto_segment(point, &start, &end) * (end - start).norm();

        let total = self.total_length();
        let length = self.length_at_vertex(edge)? + along;
        if length >= total - LENGTH_EPSILON {
            return Ok(0.0);
        }
        Ok((length / total).clamp(0.0, 1.0))
    }

    /// Like [`try_progress_fraction`](Self::try_progress_fraction), but never fails.
    ///
    /// Points off the path resolve to their projection onto the nearest edge.
    #[must_use]
    pub fn progress_fraction(&self, point: &Point2) -> f64 {
        match self.try_progress_fraction(point) {
            Ok(fraction) => fraction,
            Err(err) => {
                let fraction = self.nearest_progress_fraction(point);
                warn!(%err, fraction, "using nearest edge for progress");
                fraction
            }
        }
    }

    fn nearest_progress_fraction(&self, point: &Point2) -> f64 {
        let total = self.total_length();
        let mut walked = 0.0;
        let mut best_dist = f64::INFINITY;
        let mut best_length = 0.0;

        for (a, b) in self.edges() {
            let seg_len = (b - a).norm();
            let dist = point_to_segment_dist(point, &a, &b);
            if dist < best_dist {
                best_dist = dist;
                best_length = walked + project_onto_segment(point, &a, &b) * seg_len;
            }
            walked += seg_len;
        }

        (best_length / total).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::TracerError;
    use approx::assert_abs_diff_eq;

    const EPS: f64 = 1e-9;

    /// Side-2 square, counter-clockwise from the origin.
    fn square() -> PolygonPath {
        PolygonPath::new(vec![
            Point2::new(0.0, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(2.0, 2.0),
            Point2::new(0.0, 2.0),
        ])
        .unwrap()
    }

    /// 3-4-5 right triangle.
    fn triangle() -> PolygonPath {
        PolygonPath::new(vec![
            Point2::new(0.0, 0.0),
            Point2::new(3.0, 0.0),
            Point2::new(3.0, 4.0),
        ])
        .unwrap()
    }

    #[test]
    fn rejects_too_few_vertices() {
        let result = PolygonPath::new(vec![Point2::origin(), Point2::new(1.0, 0.0)]);
        assert!(matches!(
            result,
            Err(TracerError::Geometry(GeometryError::Degenerate(_)))
        ));
    }

    #[test]
    fn rejects_collapsed_loop() {
        let p = Point2::new(1.0, 1.0);
        assert!(PolygonPath::new(vec![p, p, p]).is_err());
    }

    #[test]
    fn rejects_non_finite_vertex() {
        let result = PolygonPath::new(vec![
            Point2::origin(),
            Point2::new(f64::NAN, 0.0),
            Point2::new(1.0, 1.0),
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn total_length_includes_closing_edge() {
        assert_abs_diff_eq!(square().total_length(), 8.0, epsilon = EPS);
        assert_abs_diff_eq!(triangle().total_length(), 12.0, epsilon = EPS);
    }

    #[test]
    fn length_at_vertex_is_cumulative() {
        let tri = triangle();
        assert_abs_diff_eq!(tri.length_at_vertex(0).unwrap(), 0.0, epsilon = EPS);
        assert_abs_diff_eq!(tri.length_at_vertex(1).unwrap(), 3.0, epsilon = EPS);
        assert_abs_diff_eq!(tri.length_at_vertex(2).unwrap(), 7.0, epsilon = EPS);
    }

    #[test]
    fn length_at_vertex_out_of_range() {
        let result = square().length_at_vertex(4);
        assert!(matches!(
            result,
            Err(TracerError::Geometry(GeometryError::IndexOutOfRange { index: 4, len: 4 }))
        ));
    }

    #[test]
    fn position_at_zero_is_first_vertex() {
        let (p, next) = square().position_at_length(0.0, Direction::Forward).unwrap();
        assert_abs_diff_eq!(p, Point2::new(0.0, 0.0), epsilon = EPS);
        assert_eq!(next, 1);
    }

    #[test]
    fn position_at_total_returns_to_first_vertex() {
        let sq = square();
        let (p, next) = sq
            .position_at_length(sq.total_length(), Direction::Forward)
            .unwrap();
        assert_abs_diff_eq!(p, Point2::new(0.0, 0.0), epsilon = EPS);
        assert_eq!(next, 0);
    }

    #[test]
    fn position_interpolates_inside_edge() {
        let (p, next) = triangle().position_at_length(5.0, Direction::Forward).unwrap();
        assert_abs_diff_eq!(p, Point2::new(3.0, 2.0), epsilon = EPS);
        assert_eq!(next, 2);
    }

    #[test]
    fn position_on_closing_edge() {
        // Closing edge of the triangle runs (3,4) → (0,0), length 5, starting at 7.
        let (p, next) = triangle().position_at_length(9.5, Direction::Forward).unwrap();
        assert_abs_diff_eq!(p, Point2::new(1.5, 2.0), epsilon = EPS);
        assert_eq!(next, 0);

        let (_, next) = triangle().position_at_length(9.5, Direction::Reverse).unwrap();
        assert_eq!(next, 2);
    }

    #[test]
    fn reverse_cursor_points_at_edge_start() {
        let (p, next) = square().position_at_length(3.0, Direction::Reverse).unwrap();
        assert_abs_diff_eq!(p, Point2::new(2.0, 1.0), epsilon = EPS);
        assert_eq!(next, 1);
    }

    #[test]
    fn position_clamps_tiny_overshoot() {
        let sq = square();
        let (p, _) = sq
            .position_at_length(sq.total_length() + LENGTH_EPSILON * 0.5, Direction::Forward)
            .unwrap();
        assert_abs_diff_eq!(p, Point2::new(0.0, 0.0), epsilon = EPS);
    }

    #[test]
    fn position_rejects_out_of_range_lengths() {
        let sq = square();
        assert!(sq.position_at_length(8.5, Direction::Forward).is_err());
        assert!(sq.position_at_length(-0.1, Direction::Forward).is_err());
        assert!(sq.position_at_length(f64::NAN, Direction::Forward).is_err());
    }

    #[test]
    fn progress_of_vertices() {
        let sq = square();
        assert_abs_diff_eq!(sq.progress_fraction(&Point2::new(0.0, 0.0)), 0.0, epsilon = EPS);
        assert_abs_diff_eq!(sq.progress_fraction(&Point2::new(2.0, 0.0)), 0.25, epsilon = EPS);
        assert_abs_diff_eq!(sq.progress_fraction(&Point2::new(2.0, 2.0)), 0.5, epsilon = EPS);
        assert_abs_diff_eq!(sq.progress_fraction(&Point2::new(0.0, 2.0)), 0.75, epsilon = EPS);
    }

    #[test]
    fn progress_on_closing_edge_approaches_one() {
        let sq = square();
        let f = sq.try_progress_fraction(&Point2::new(0.0, 0.001)).unwrap();
        assert!(f > 0.999 && f <= 1.0, "f={f}");
    }

    #[test]
    fn progress_matches_position_at_length() {
        let tri = triangle();
        for k in 0..12 {
            let length = f64::from(k);
            let (p, _) = tri.position_at_length(length, Direction::Forward).unwrap();
            let f = tri.try_progress_fraction(&p).unwrap();
            assert_abs_diff_eq!(f, length / 12.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn progress_along_edge_past_sharp_corner() {
        let tri = triangle();
        // Just past the 37° corner at (3,4), heading back to the origin.
        let p = Point2::new(3.0 - 0.006, 4.0 - 0.008);
        let at_corner = tri.progress_along_edge(&Point2::new(3.0, 4.0), 2).unwrap();
        let past = tri.progress_along_edge(&p, 2).unwrap();
        assert_abs_diff_eq!(at_corner, 7.0 / 12.0, epsilon = EPS);
        assert_abs_diff_eq!(past, 7.01 / 12.0, epsilon = EPS);
    }

    #[test]
    fn progress_along_closing_edge_wraps_at_first_vertex() {
        let sq = square();
        let near_end = sq.progress_along_edge(&Point2::new(0.0, 0.001), 3).unwrap();
        assert!(near_end > 0.999 && near_end < 1.0, "near_end={near_end}");
        assert_abs_diff_eq!(sq.progress_along_edge(&Point2::origin(), 3).unwrap(), 0.0);
        assert!(sq.progress_along_edge(&Point2::origin(), 4).is_err());
    }

    #[test]
    fn progress_off_path_is_unresolved() {
        let result = square().try_progress_fraction(&Point2::new(1.0, 1.0));
        assert!(matches!(
            result,
            Err(TracerError::Geometry(GeometryError::Unresolved { .. }))
        ));
    }

    #[test]
    fn progress_off_path_falls_back_to_nearest_edge() {
        // (1, -0.5) projects onto the first edge at (1, 0), one unit into a loop of 8.
        let f = square().progress_fraction(&Point2::new(1.0, -0.5));
        assert_abs_diff_eq!(f, 0.125, epsilon = EPS);
    }
}
