use std::f64::consts::TAU;
use std::iter::FusedIterator;

use crate::error::{GeometryError, Result};
use crate::math::{Point2, TOLERANCE};

/// A circular path.
///
/// Angles are measured counter-clockwise from the +X axis in the usual
/// trigonometric sense, but the Y component is subtracted from the center
/// (screen convention):
///
/// `P(θ) = (cx + r·cos θ, cy − r·sin θ)`
///
/// Tracing and outline generation both go through [`CirclePath::point_at_angle`],
/// so they always agree on the orientation.
#[derive(Debug, Clone, PartialEq)]
pub struct CirclePath {
    center: Point2,
    radius: f64,
}

impl CirclePath {
    /// Creates a new circular path.
    ///
    /// # Errors
    ///
    /// Returns an error if the radius is not positive and finite, or the center
    /// is not finite.
    pub fn new(center: Point2, radius: f64) -> Result<Self> {
        if !radius.is_finite() || radius < TOLERANCE {
            return Err(
                GeometryError::Degenerate("circle radius must be positive".into()).into(),
            );
        }
        if !center.x.is_finite() || !center.y.is_finite() {
            return Err(
                GeometryError::Degenerate("circle center is not finite".into()).into(),
            );
        }
        Ok(Self { center, radius })
    }

    /// Returns the center of the circle.
    #[must_use]
    pub fn center(&self) -> &Point2 {
        &self.center
    }

    /// Returns the radius of the circle.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Circumference of the circle.
    #[must_use]
    pub fn total_length(&self) -> f64 {
        TAU * self.radius
    }

    /// Evaluates the circle at `angle` radians. The angle need not be wrapped.
    #[must_use]
    pub fn point_at_angle(&self, angle: f64) -> Point2 {
        Point2::new(
            self.center.x + angle.cos() * self.radius,
            self.center.y - angle.sin() * self.radius,
        )
    }

    /// Maps an unbounded angle to the fraction of a full turn, in `[0, 1)`.
    #[must_use]
    pub fn progress_fraction(angle: f64) -> f64 {
        let fraction = angle.rem_euclid(TAU) / TAU;
        // rem_euclid can round up to exactly TAU for tiny negative angles.
        if fraction >= 1.0 {
            0.0
        } else {
            fraction
        }
    }

    /// Returns `count` points spaced evenly by angle, starting at angle 0.
    #[must_use]
    pub fn points(&self, count: usize) -> CirclePoints {
        CirclePoints {
            circle: self.clone(),
            index: 0,
            count,
        }
    }
}

/// Iterator over evenly spaced points of a [`CirclePath`].
///
/// Produced by [`CirclePath::points`]. Finite and not restartable.
#[derive(Debug, Clone)]
pub struct CirclePoints {
    circle: CirclePath,
    index: usize,
    count: usize,
}

impl Iterator for CirclePoints {
    type Item = Point2;

    #[allow(clippy::cast_precision_loss)]
    fn next(&mut self) -> Option<Point2> {
        if self.index >= self.count {
            return None;
        }
        let angle = TAU * self.index as f64 / self.count as f64;
        self.index += 1;
        Some(self.circle.point_at_angle(angle))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.count - self.index;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for CirclePoints {}

impl FusedIterator for CirclePoints {}
