use thiserror::Error;

#[derive(Debug, Error)]
pub enum SurfError {
    #[error("{operation} is not supported by {surface}")]
    Unsupported {
        surface: &'static str,
        operation: &'static str,
    },

    #[error("Index {index} out of range (len {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Local coordinate ({u}, {v}) lies in a singular region")]
    SingularRegion { u: f64, v: f64 },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SurfError>;
