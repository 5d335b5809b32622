pub mod chain;
pub mod curveset;
pub mod error;
pub mod math;
pub mod solver;

pub use error::{Result, SpacefillError};
