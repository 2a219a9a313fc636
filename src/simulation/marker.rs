use crate::error::{GeometryError, Result};
use crate::geometry::{CirclePath, Direction, PathGeometry, PolygonPath};
use crate::math::distance_2d::move_towards;
use crate::math::{Point2, ARRIVAL_TOLERANCE};

/// Where a marker is heading next on its path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cursor {
    /// Index of the polygon vertex the marker is moving towards.
    Vertex(usize),
    /// Absolute angle on a circle, in radians. Accumulates without wrapping.
    Angle(f64),
}

/// A single entity tracing a path.
///
/// A marker only reads the geometry it is given and only writes its own
/// fields, so advancing several markers never needs synchronization.
#[derive(Debug, Clone)]
pub struct Marker {
    position: Point2,
    cursor: Cursor,
    speed: f64,
    direction: Direction,
    tracing: bool,
}

impl Marker {
    /// Creates a marker at the origin with the given motion settings.
    ///
    /// The marker must be seeded onto a path before it is advanced.
    #[must_use]
    pub fn new(speed: f64, direction: Direction, tracing: bool) -> Self {
        Self {
            position: Point2::origin(),
            cursor: Cursor::Vertex(0),
            speed,
            direction,
            tracing,
        }
    }

    /// Current position.
    #[must_use]
    pub fn position(&self) -> &Point2 {
        &self.position
    }

    /// Current cursor.
    #[must_use]
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Current speed (length units per second on polygons, radians per second on circles).
    #[must_use]
    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Current direction of travel.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Whether the marker moves on [`advance`](Self::advance).
    #[must_use]
    pub fn is_tracing(&self) -> bool {
        self.tracing
    }

    /// Sets the speed used by later [`advance`](Self::advance) calls.
    pub fn set_speed(&mut self, speed: f64) {
        self.speed = speed;
    }

    /// Starts or stops the marker.
    pub fn set_tracing(&mut self, tracing: bool) {
        self.tracing = tracing;
    }

    /// Changes the direction of travel without moving the marker.
    ///
    /// On a polygon the target vertex shifts one step in the new direction, so
    /// the marker turns around on its current edge instead of jumping.
    pub fn set_direction(&mut self, direction: Direction, geometry: &PathGeometry) {
        if direction == self.direction {
            return;
        }
        self.direction = direction;
        if let (Cursor::Vertex(next), Some(count)) = (self.cursor, geometry.vertex_count()) {
            self.cursor = Cursor::Vertex(direction.step(next % count, count));
        }
    }

    /// Places the marker `length` units along a polygon path.
    ///
    /// # Errors
    ///
    /// Returns an error if `length` is outside the path.
    pub fn seed_at_length(&mut self, polygon: &PolygonPath, length: f64) -> Result<()> {
        let (position, next) = polygon.position_at_length(length, self.direction)?;
        self.position = position;
        self.cursor = Cursor::Vertex(next);
        Ok(())
    }

    /// Places the marker at `angle` radians on a circle.
    pub fn seed_at_angle(&mut self, circle: &CirclePath, angle: f64) {
        self.position = circle.point_at_angle(angle);
        self.cursor = Cursor::Angle(angle);
    }

    /// Moves the marker from `from` onto `to`, a replacement snapshot of the
    /// same kind.
    ///
    /// On a polygon the marker keeps its fraction of the loop; on a circle it
    /// keeps its angle.
    ///
    /// # Errors
    ///
    /// Returns an error if the cursor does not fit either geometry.
    pub fn carry_over(&mut self, from: &PathGeometry, to: &PathGeometry) -> Result<()> {
        match (to, self.cursor) {
            (PathGeometry::Polygon(polygon), Cursor::Vertex(_)) => {
                let progress = self.progress(from)?;
                self.seed_at_length(polygon, progress * polygon.total_length())
            }
            (PathGeometry::Circle(circle), Cursor::Angle(angle)) => {
                self.seed_at_angle(circle, angle);
                Ok(())
            }
            _ => Err(GeometryError::CursorMismatch {
                expected: to.kind_name(),
            }
            .into()),
        }
    }

    /// Advances the marker by `dt` seconds along `geometry`.
    ///
    /// On a polygon the marker steps towards its target vertex without
    /// overshooting and retargets once it arrives. On a circle the angle
    /// accumulates by `speed · dt`.
    ///
    /// # Errors
    ///
    /// Returns an error if the cursor does not fit the geometry.
    pub fn advance(&mut self, geometry: &PathGeometry, dt: f64) -> Result<()> {
        if !self.tracing || dt <= 0.0 {
            return Ok(());
        }

        match (geometry, self.cursor) {
            (PathGeometry::Polygon(polygon), Cursor::Vertex(next)) => {
                let target = polygon.vertex(next)?;
                self.position = move_towards(&self.position, &target, self.speed * dt);
                if (target - self.position).norm() < ARRIVAL_TOLERANCE {
                    let next = self.direction.step(next, polygon.vertex_count());
                    self.cursor = Cursor::Vertex(next);
                }
                Ok(())
            }
            (PathGeometry::Circle(circle), Cursor::Angle(angle)) => {
                let angle = angle + self.direction.sign() * self.speed * dt;
                self.cursor = Cursor::Angle(angle);
                self.position = circle.point_at_angle(angle);
                Ok(())
            }
            _ => Err(GeometryError::CursorMismatch {
                expected: geometry.kind_name(),
            }
            .into()),
        }
    }

    /// Fraction of the loop between the path start and the marker, in `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns an error if the cursor does not fit the geometry.
    pub fn progress(&self, geometry: &PathGeometry) -> Result<f64> {
        match (geometry, self.cursor) {
            (PathGeometry::Polygon(polygon), Cursor::Vertex(next)) => {
                // Forward markers travel the edge ending at `next`, reverse
                // markers the edge starting there.
                let count = polygon.vertex_count();
                let edge = match self.direction {
                    Direction::Forward => (next % count + count - 1) % count,
                    Direction::Reverse => next % count,
                };
                polygon.progress_along_edge(&self.position, edge)
            }
            (PathGeometry::Circle(_), Cursor::Angle(angle)) => {
                Ok(CirclePath::progress_fraction(angle))
            }
            _ => Err(GeometryError::CursorMismatch {
                expected: geometry.kind_name(),
            }
            .into()),
        }
    }
}
