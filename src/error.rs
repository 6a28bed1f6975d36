use thiserror::Error;

/// Errors raised by the data generators and the analysis helpers built on them.
///
/// Generation is pure arithmetic, so the only failure is a bad parameter.
/// Clamping metrics into their physical range is normal behaviour and never
/// produces an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl GenerationError {
    pub fn invalid(message: impl Into<String>) -> Self {
        GenerationError::InvalidArgument(message.into())
    }
}

pub type GenerationResult<T> = Result<T, GenerationError>;
