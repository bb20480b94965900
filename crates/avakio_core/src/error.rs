use thiserror::Error;

/// Failure to read a CSS color string.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    #[error("empty color string")]
    Empty,

    #[error("invalid hex color `{0}`")]
    InvalidHex(String),

    #[error("invalid functional color `{0}`")]
    InvalidFunction(String),

    #[error("unsupported color syntax `{0}`")]
    Unsupported(String),
}
