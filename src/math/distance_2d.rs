use super::{Point2, COLLINEAR_DOT, ON_SEGMENT_TOLERANCE, TOLERANCE};

/// Returns the parameter `t ∈ [0, 1]` of the point on segment `a → b`
/// closest to `p`.
#[must_use]
pub fn project_onto_segment(p: &Point2, a: &Point2, b: &Point2) -> f64 {
    let ab = b - a;
    let len_sq = ab.norm_squared();

    if len_sq < TOLERANCE * TOLERANCE {
        // Degenerate segment (zero length).
        return 0.0;
    }

    ((p - a).dot(&ab) / len_sq).clamp(0.0, 1.0)
}

/// Returns the minimum distance from `p` to the line segment `a → b`.
#[must_use]
pub fn point_to_segment_dist(p: &Point2, a: &Point2, b: &Point2) -> f64 {
    let t = project_onto_segment(p, a, b);
    let closest = a + (b - a) * t;
    (p - closest).norm()
}

/// Tests whether `p` lies on segment `a → b`.
///
/// The point must either coincide with `a`, or point along the segment
/// direction (normalized dot product at least [`COLLINEAR_DOT`]) with
/// `|pa| + |pb|` exceeding `|ab|` by no more than [`ON_SEGMENT_TOLERANCE`].
#[must_use]
pub fn lies_on_segment(p: &Point2, a: &Point2, b: &Point2) -> bool {
    let ap = p - a;
    let ab = b - a;
    let to_point = ap.norm();

    if to_point < TOLERANCE {
        return true;
    }

    let seg_len = ab.norm();
    if seg_len < TOLERANCE {
        return false;
    }

    let dot = ap.dot(&ab) / (to_point * seg_len);
    let to_end = (b - p).norm();
    dot >= COLLINEAR_DOT && to_point + to_end - seg_len <= ON_SEGMENT_TOLERANCE
}

/// Moves `current` towards `target` by at most `max_delta`, never overshooting.
#[must_use]
pub fn move_towards(current: &Point2, target: &Point2, max_delta: f64) -> Point2 {
    let delta = target - current;
    let dist = delta.norm();

    if dist <= max_delta || dist < TOLERANCE {
        return *target;
    }

    current + delta * (max_delta / dist)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-10;

    // ── point_to_segment_dist tests ──

    #[test]
    fn segment_dist_perpendicular_projection() {
        // Point (1, 1) to segment (0,0)→(2,0). Closest at (1,0), dist = 1.
        let d = point_to_segment_dist(
            &Point2::new(1.0, 1.0),
            &Point2::new(0.0, 0.0),
            &Point2::new(2.0, 0.0),
        );
        assert!((d - 1.0).abs() < TOL, "d={d}");
    }

    #[test]
    fn segment_dist_endpoint_closest() {
        let d = point_to_segment_dist(
            &Point2::new(-1.0, 0.0),
            &Point2::new(0.0, 0.0),
            &Point2::new(2.0, 0.0),
        );
        assert!((d - 1.0).abs() < TOL, "d={d}");
    }

    #[test]
    fn segment_dist_degenerate() {
        // Zero-length segment: distance is point-to-point.
        let d = point_to_segment_dist(
            &Point2::new(3.0, 4.0),
            &Point2::origin(),
            &Point2::origin(),
        );
        assert!((d - 5.0).abs() < TOL, "d={d}");
    }

    // ── lies_on_segment tests ──

    #[test]
    fn on_segment_interior() {
        assert!(lies_on_segment(
            &Point2::new(0.5, 0.0),
            &Point2::new(0.0, 0.0),
            &Point2::new(2.0, 0.0),
        ));
    }

    #[test]
    fn on_segment_at_start_and_end() {
        let a = Point2::new(0.0, 0.0);
        let b = Point2::new(0.0, 3.0);
        assert!(lies_on_segment(&a, &a, &b));
        assert!(lies_on_segment(&b, &a, &b));
    }

    #[test]
    fn off_segment_behind_start() {
        assert!(!lies_on_segment(
            &Point2::new(-0.5, 0.0),
            &Point2::new(0.0, 0.0),
            &Point2::new(2.0, 0.0),
        ));
    }

    #[test]
    fn off_segment_past_end() {
        assert!(!lies_on_segment(
            &Point2::new(2.5, 0.0),
            &Point2::new(0.0, 0.0),
            &Point2::new(2.0, 0.0),
        ));
    }

    #[test]
    fn off_segment_sideways() {
        assert!(!lies_on_segment(
            &Point2::new(1.0, 0.5),
            &Point2::new(0.0, 0.0),
            &Point2::new(2.0, 0.0),
        ));
    }

    // ── move_towards tests ──

    #[test]
    fn move_towards_partial_step() {
        let p = move_towards(&Point2::origin(), &Point2::new(4.0, 0.0), 1.5);
        assert!((p - Point2::new(1.5, 0.0)).norm() < TOL);
    }

    #[test]
    fn move_towards_never_overshoots() {
        let target = Point2::new(0.0, 1.0);
        let p = move_towards(&Point2::origin(), &target, 10.0);
        assert!((p - target).norm() < TOL);
    }

    #[test]
    fn move_towards_zero_step_stays() {
        let start = Point2::new(1.0, 2.0);
        let p = move_towards(&start, &Point2::new(5.0, 5.0), 0.0);
        assert!((p - start).norm() < TOL);
    }
}
