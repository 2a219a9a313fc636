mod marker;
mod marker_set;
mod removal;

pub use marker::{Cursor, Marker};
pub use marker_set::{MarkerId, MarkerSet};
pub use removal::RemovalTimer;

use crate::math::Point2;

/// Render-facing view of one marker, taken once per frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerSnapshot {
    /// Arena id of the marker.
    pub id: MarkerId,
    /// Current position on the path.
    pub position: Point2,
    /// Fraction of the loop travelled from the path start, in `[0, 1]`.
    pub progress: f64,
}
