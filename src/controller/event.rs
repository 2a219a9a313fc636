use crate::math::Point2;

use super::ShapeId;

/// Notification for collaborators outside the core (highlighting, outline
/// drawing, drop animations). Drained with
/// [`PathTracer::drain_events`](super::PathTracer::drain_events).
#[derive(Debug, Clone, PartialEq)]
pub enum TracerEvent {
    /// A new shape became active.
    ShapeSelected { shape: ShapeId },
    /// The vertex snapshot of the active shape was replaced.
    GeometryUpdated { shape: ShapeId },
    /// The outline should be drawn through these boundary points.
    OutlineChanged { points: Vec<Point2> },
    /// The outline should be hidden.
    OutlineCleared,
    /// Markers left the path and will return after `delay` seconds.
    RemovalStarted { delay: f64 },
    /// Markers are back on the path and evenly spaced.
    RemovalFinished,
}
