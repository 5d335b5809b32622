use super::{Point2, Vector2};

/// A 2D line in implicit form: `normal · p + offset = 0`.
///
/// The normal is unit length, so [`ImplicitLine::side`] is the signed
/// distance from the line and its sign tells which half-plane a point
/// lies in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImplicitLine {
    pub normal: Vector2,
    pub offset: f64,
}

impl ImplicitLine {
    /// Creates a line directly from a normal and an offset.
    #[must_use]
    pub fn new(normal: Vector2, offset: f64) -> Self {
        Self { normal, offset }
    }

    /// Builds the implicit equation of the infinite line through `a` and `b`.
    ///
    /// The normal is `(b - a) / |b - a|` rotated 90° counter-clockwise, so
    /// points to the left of `a → b` get a positive side value.
    ///
    /// Returns `None` when `|b - a| < tol` (degenerate chord).
    #[must_use]
    pub fn through(a: &Point2, b: &Point2, tol: f64) -> Option<Self> {
        let len = (b - a).norm();
        if len < tol {
            return None;
        }
        Some(Self::from_chord(a, b, len))
    }

    /// Like [`ImplicitLine::through`], but substitutes `tol` for the chord
    /// length when `a` and `b` nearly coincide instead of failing.
    ///
    /// The resulting near-zero normal makes every downstream crossing test
    /// degenerate (and therefore skipped), which is what callers that must
    /// not abort rely on.
    #[must_use]
    pub fn through_clamped(a: &Point2, b: &Point2, tol: f64) -> Self {
        let len = (b - a).norm().max(tol);
        Self::from_chord(a, b, len)
    }

    fn from_chord(a: &Point2, b: &Point2, len: f64) -> Self {
        let d = (b - a) / len;
        let offset = (a.x * b.y - b.x * a.y) / len;
        Self {
            normal: Vector2::new(-d.y, d.x),
            offset,
        }
    }

    /// Evaluates `normal · p + offset`: zero on the line, signed distance
    /// elsewhere.
    #[must_use]
    pub fn side(&self, p: &Point2) -> f64 {
        self.normal.dot(&p.coords) + self.offset
    }

    /// Parameter `t` at which the ray `origin + dir * t` crosses this line,
    /// or `None` when the ray is parallel to it within `tol`.
    #[must_use]
    pub fn ray_crossing(&self, origin: &Point2, dir: &Vector2, tol: f64) -> Option<f64> {
        let denom = self.normal.dot(dir);
        if denom.abs() <= tol {
            return None;
        }
        Some(-self.side(origin) / denom)
    }
}
