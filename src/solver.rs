use crate::math::line_2d::ImplicitLine;
use crate::math::tangent_2d::circle_tangents;
use crate::math::{Point2, Vector2, RADIUS_EPSILON};

/// Sentinel for a bound no obstacle has tightened yet. Large but finite so
/// an unconstrained resolve still produces arithmetic-safe coordinates.
const UNBOUNDED: f64 = 1.0e100;

/// Finds the farthest admissible break point along the perpendicular
/// bisector of one segment.
///
/// For a directed segment `a → b` and a clearance radius, the solver is fed
/// every other point and segment of the curve set and maintains two
/// independent one-sided bounds `t_max ≥ 0 ≥ t_min` on the bisector
/// parameter `p = mid + axis · t`. Each obstacle tightens the bound on its
/// own side of the segment line toward zero; a bound never crosses zero.
/// [`SplitSolver::resolve`] then picks the larger-magnitude displacement.
#[derive(Debug)]
pub struct SplitSolver {
    a: Point2,
    b: Point2,
    /// Implicit form of the line through `a` and `b`; its unit normal is the
    /// bisector direction.
    seg_line: ImplicitLine,
    /// Implicit form of the perpendicular bisector itself.
    bisector: ImplicitLine,
    mid: Point2,
    /// Half the segment length.
    half: f64,
    radius: f64,
    /// Working tolerance, `radius * RADIUS_EPSILON`.
    tol: f64,
    t_max: f64,
    t_min: f64,
}

impl SplitSolver {
    /// Sets up the solver for the segment `a → b` with the given clearance
    /// radius.
    ///
    /// A (near-)zero-length segment is tolerated: the degenerate lines built
    /// from it make every constraint test a no-op and the resolve collapses
    /// to the midpoint.
    #[must_use]
    pub fn new(a: Point2, b: Point2, radius: f64) -> Self {
        let tol = radius * RADIUS_EPSILON;
        let mid = Point2::from((a.coords + b.coords) * 0.5);
        let seg_line = ImplicitLine::through_clamped(&a, &b, tol);
        let bisector = ImplicitLine::through_clamped(&mid, &(mid + seg_line.normal), tol);
        let half = 0.5 * (b - a).norm();
        Self {
            a,
            b,
            seg_line,
            bisector,
            mid,
            half,
            radius,
            tol,
            t_max: UNBOUNDED,
            t_min: -UNBOUNDED,
        }
    }

    /// Unit direction of the bisector (the segment line's normal).
    #[must_use]
    pub fn axis(&self) -> Vector2 {
        self.seg_line.normal
    }

    /// Tightens the bounds against a single obstacle point.
    ///
    /// Only obstacles within the band `(0, half + radius)` along the
    /// bisector on either endpoint's side can force the new segments too
    /// close; anything further away already clears the radius. For each
    /// endpoint on the obstacle's side of the bisector, the two tangents
    /// from the endpoint to the clearance circle about the obstacle are
    /// intersected with the bisector and the crossing tightens the bound.
    pub fn constrain_point(&mut self, p: &Point2) {
        let neg_side = self.seg_line.side(p) < 0.0;
        for (end, sign) in [(self.a, 1.0), (self.b, -1.0)] {
            let along = self.bisector.side(p) * sign;
            if along > 0.0 && along < self.half + self.radius {
                if let Some((t1, t2)) = circle_tangents(p, &end, self.radius, self.tol) {
                    self.apply_tangent(&t1, neg_side);
                    self.apply_tangent(&t2, neg_side);
                }
            }
        }
    }

    fn apply_tangent(&mut self, tangent: &ImplicitLine, neg_side: bool) {
        let axis = self.axis();
        let Some(t) = tangent.ray_crossing(&self.mid, &axis, self.tol) else {
            return;
        };
        if neg_side {
            if t < self.tol {
                self.t_min = self.t_min.max(t).min(0.0);
            }
        } else if t > -self.tol {
            self.t_max = self.t_max.min(t).max(0.0);
        }
    }

    /// Tightens the bounds against an obstacle segment `p → q`.
    ///
    /// Only segments whose carrier line crosses the bisector within the
    /// segment's own `[0, 1]` range constrain the break point; the exact
    /// back-off from the crossing is `radius / sin(angle between the
    /// segment and the bisector axis)`.
    pub fn constrain_segment(&mut self, p: &Point2, q: &Point2) {
        let d = q - p;

        // Parameter along p → q where the obstacle crosses the bisector.
        let denom = d.dot(&self.bisector.normal);
        if denom.abs() < self.tol {
            return;
        }
        let u = -self.bisector.side(p) / denom;
        if !(0.0..=1.0).contains(&u) {
            return;
        }

        let Some(carrier) = ImplicitLine::through(p, q, self.tol) else {
            return;
        };
        let axis = self.axis();
        let Some(t) = carrier.ray_crossing(&self.mid, &axis, self.tol) else {
            return;
        };

        // The sine is clamped below so a near-parallel obstacle collapses
        // the bound to zero rather than dividing by nothing.
        let cos = (d / d.norm()).dot(&axis);
        let sin = (1.0 - cos * cos).max(0.0).sqrt();
        let back = self.radius / sin.max(self.tol);

        if t < 0.0 {
            self.t_min = self.t_min.max(t + back).min(0.0);
        } else {
            self.t_max = self.t_max.min(t - back).max(0.0);
        }
    }

    /// The chosen break point: the larger-magnitude admissible displacement
    /// from the midpoint, ties broken toward the positive side.
    #[must_use]
    pub fn resolve(&self) -> Point2 {
        let t = if self.t_min.abs() > self.t_max.abs() {
            self.t_min
        } else {
            self.t_max
        };
        self.mid + self.axis() * t
    }
}
