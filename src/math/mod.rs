pub mod distance_2d;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Distance below which a marker counts as having reached its target vertex.
pub const ARRIVAL_TOLERANCE: f64 = 0.01;

/// Slack allowed when testing whether a point lies on a segment
/// (`|pa| + |pb| - |ab|`).
pub const ON_SEGMENT_TOLERANCE: f64 = 0.01;

/// Minimum normalized dot product for a point to count as collinear with a segment.
pub const COLLINEAR_DOT: f64 = 0.99;

/// Slack allowed past the end of a path when walking it by arc length.
pub const LENGTH_EPSILON: f64 = 1e-6;
