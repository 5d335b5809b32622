use super::line_2d::ImplicitLine;
use super::{Point2, Vector2};

/// The two lines through `external` tangent to the circle of `radius`
/// centred at `center`.
///
/// Closed form after "A Programmer's Geometry", p. 30. The returned normals
/// are unit length, so each line satisfies the [`ImplicitLine`] contract.
///
/// Returns `None` when `external` coincides with `center` or lies strictly
/// inside the circle (beyond `tol`). When `external` sits on the circle
/// within `tol`, the two tangents degenerate to a single line, duplicated.
#[must_use]
pub fn circle_tangents(
    center: &Point2,
    external: &Point2,
    radius: f64,
    tol: f64,
) -> Option<(ImplicitLine, ImplicitLine)> {
    let kj = center - external;
    let dist_sq = kj.norm_squared();

    if dist_sq < tol * tol {
        // Centre and point coincide.
        return None;
    }

    let root = dist_sq - radius * radius;
    if root < -tol * tol {
        // Point strictly inside the circle.
        return None;
    }

    let inv = 1.0 / dist_sq;
    let (d1, d2) = if root < tol * tol {
        // Point on the circle: one tangent, reported twice.
        let d = -kj * radius * inv;
        (d, d)
    } else {
        let root = root.sqrt();
        (
            inv * Vector2::new(-kj.y * root - radius * kj.x, kj.x * root - radius * kj.y),
            inv * Vector2::new(-kj.y * root + radius * kj.x, kj.x * root + radius * kj.y),
        )
    };

    // Offsets chosen so both lines pass through the external point.
    Some((
        ImplicitLine::new(d1, -d1.dot(&external.coords)),
        ImplicitLine::new(d2, -d2.dot(&external.coords)),
    ))
}
