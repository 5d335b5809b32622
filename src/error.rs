use thiserror::Error;

/// Top-level error type for the spacefill engine.
#[derive(Debug, Error)]
pub enum SpacefillError {
    #[error(transparent)]
    Chain(#[from] ChainError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors related to chain structure and curve-set lookups.
#[derive(Debug, Error)]
pub enum ChainError {
    #[error("chain must contain at least one point")]
    Empty,

    #[error("node not found in chain")]
    NodeNotFound,

    #[error("segment has no successor node")]
    MissingSuccessor,

    #[error("chain {0} not found in curve set")]
    ChainNotFound(usize),
}

/// Errors related to subdivision parameters.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("parameter {parameter} = {value} is out of range [{min}, {max}]")]
    ParameterOutOfRange {
        parameter: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}

/// Convenience type alias for results using [`SpacefillError`].
pub type Result<T> = std::result::Result<T, SpacefillError>;
