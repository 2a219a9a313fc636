use serde::{Deserialize, Serialize};

/// Linear RGB color.
pub type Rgb = [f32; 3];

/// Two-stop color ramp used to tint markers by their progress.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Gradient {
    /// Color at progress 0.
    pub start: Rgb,
    /// Color at progress 1.
    pub end: Rgb,
}

impl Default for Gradient {
    /// Blue at the start of the path, red at the end.
    fn default() -> Self {
        Self {
            start: [0.0, 0.0, 1.0],
            end: [1.0, 0.0, 0.0],
        }
    }
}

impl Gradient {
    /// Creates a gradient between two colors.
    #[must_use]
    pub fn new(start: Rgb, end: Rgb) -> Self {
        Self { start, end }
    }

    /// Interpolates the ramp at `t`, clamped to `[0, 1]`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn sample(&self, t: f64) -> Rgb {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let t = t as f32;
        std::array::from_fn(|i| self.start[i] + (self.end[i] - self.start[i]) * t)
    }
}
