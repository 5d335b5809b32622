pub mod distance_2d;
pub mod line_2d;
pub mod tangent_2d;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Relative epsilon for radius-sensitive computations.
///
/// The solver works at many scales as the clearance radius shrinks between
/// subdivision passes, so its tolerances are `radius * RADIUS_EPSILON`
/// rather than an absolute constant.
pub const RADIUS_EPSILON: f64 = 1e-8;
