use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::gradient::Gradient;
use crate::math::Point2;

/// Settings supplied to a [`PathTracer`](crate::controller::PathTracer) at startup.
///
/// Every field has a default, so partial documents deserialize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TracerConfig {
    /// Marker radius; two radii of path length are reserved per marker.
    pub marker_radius: f64,
    /// Initial speed of every marker.
    pub default_speed: f64,
    /// Center of the built-in circle path.
    pub circle_center: Point2,
    /// Radius of the built-in circle path.
    pub circle_radius: f64,
    /// Number of points used to approximate a circle outline.
    pub outline_segments: usize,
    /// Seconds markers stay off the path after a temporary removal.
    pub removal_delay: f64,
    /// Whether markers move right away.
    pub start_tracing: bool,
    /// Whether markers start travelling in reverse.
    pub start_reversed: bool,
    /// Whether outline notifications are emitted.
    pub show_outline: bool,
    /// Color ramp for marker progress.
    pub gradient: Gradient,
}

impl Default for TracerConfig {
    fn default() -> Self {
        Self {
            marker_radius: 0.5,
            default_speed: 2.0,
            circle_center: Point2::new(0.0, 2.0),
            circle_radius: 2.0,
            outline_segments: 36,
            removal_delay: 3.0,
            start_tracing: false,
            start_reversed: false,
            show_outline: false,
            gradient: Gradient::default(),
        }
    }
}

impl TracerConfig {
    /// Checks that every value is usable.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        if !(self.marker_radius.is_finite() && self.marker_radius > 0.0) {
            return Err(invalid(format!("marker_radius must be positive, got {}", self.marker_radius)));
        }
        if !(self.default_speed.is_finite() && self.default_speed >= 0.0) {
            return Err(invalid(format!(
                "default_speed must be non-negative, got {}",
                self.default_speed
            )));
        }
        if !(self.circle_radius.is_finite() && self.circle_radius > 0.0) {
            return Err(invalid(format!("circle_radius must be positive, got {}", self.circle_radius)));
        }
        if !(self.circle_center.x.is_finite() && self.circle_center.y.is_finite()) {
            return Err(invalid("circle_center must be finite".into()));
        }
        if self.outline_segments < 3 {
            return Err(invalid(format!(
                "outline_segments must be at least 3, got {}",
                self.outline_segments
            )));
        }
        if !(self.removal_delay.is_finite() && self.removal_delay >= 0.0) {
            return Err(invalid(format!(
                "removal_delay must be non-negative, got {}",
                self.removal_delay
            )));
        }
        Ok(())
    }
}

fn invalid(message: String) -> crate::error::TracerError {
    ConfigError::Invalid(message).into()
}
