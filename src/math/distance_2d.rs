use super::Point2;

/// Returns the minimum distance from point `p` to the line segment `[a, b]`.
#[must_use]
pub fn point_to_segment_dist(a: &Point2, b: &Point2, p: &Point2) -> f64 {
    let ba = b - a;
    let len_sq = ba.norm_squared();

    if len_sq < 1e-20 {
        // Degenerate segment (zero length).
        return (p - a).norm();
    }

    // Project point onto the infinite line, clamp to [0, 1].
    let t = (p - a).dot(&ba) / len_sq;
    let t = t.clamp(0.0, 1.0);

    (a + ba * t - p).norm()
}
