use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormatterError {
    /// The calendar backend could not render the expanded pattern.
    #[error("Unable to render pattern: {pattern}")]
    Render { pattern: String },
    #[error("Time out of range: {0}")]
    OutOfRange(i64),
    #[error("Nanoseconds out of range: {0}")]
    InvalidNanos(u64),
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl FormatterError {
    pub(crate) fn render(pattern: &str) -> Self {
        Self::Render {
            pattern: pattern.to_string(),
        }
    }
}
