use thiserror::Error;

/// Crate specific Errors implementation.
#[derive(Debug, Error, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CronError {
    /// One of the five mandatory schedule fields is absent from the input.
    #[error("missing mandatory schedule field: {0}")]
    MissingField(String),
    /// A field contains an out-of-range value or a token of unacceptable shape.
    #[error("invalid schedule syntax: {0}")]
    Syntax(String),
}
