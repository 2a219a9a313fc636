use thiserror::Error;

/// Top-level error type for the path tracer.
#[derive(Debug, Error)]
pub enum TracerError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Marker(#[from] MarkerError),

    #[error(transparent)]
    Control(#[from] ControlError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors related to path geometry queries.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("vertex index {index} is out of range for a path with {len} vertices")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("length {length} is outside the path length [0, {total}]")]
    LengthOutOfRange { length: f64, total: f64 },

    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("no path segment contains point ({x}, {y})")]
    Unresolved { x: f64, y: f64 },

    #[error("marker cursor does not match the {expected} path")]
    CursorMismatch { expected: &'static str },

    #[error("operation is only defined for polygon paths")]
    NotPolygon,
}

/// Errors related to marker membership.
#[derive(Debug, Error)]
pub enum MarkerError {
    #[error("marker capacity of {max} reached for the current path")]
    CapacityExceeded { max: usize },

    #[error("no markers to remove")]
    EmptySet,
}

/// Errors reported by the controller surface.
#[derive(Debug, Error)]
pub enum ControlError {
    #[error("unknown shape: {0}")]
    UnknownShape(String),

    #[error("temporary removal already in progress")]
    AlreadyInProgress,

    #[error("invalid {parameter}: {value}")]
    InvalidParameter { parameter: &'static str, value: f64 },
}

/// Errors related to tracer configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Convenience type alias for results using [`TracerError`].
pub type Result<T> = std::result::Result<T, TracerError>;
