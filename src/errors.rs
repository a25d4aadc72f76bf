use thiserror::Error;

/// Errors that can surface while turning a statement export into a ledger.
///
/// Row-level problems are never reported here: malformed rows are dropped
/// by the parser and the caller only sees a shorter transaction list.
#[derive(Error, Debug)]
pub enum StatementParseError {
    /// The declared file type is not a delimited text export
    #[error("Unsupported file format")]
    UnsupportedFormat,

    /// The builder was asked to parse without any content, whatever type was declared
    #[error("Statement content is required")]
    MissingContent,

    // ── Configuration ───────────────────────────────────────────────────────────

    /// A JSON configuration document could not be deserialized
    #[error("Invalid parser configuration: {0}")]
    InvalidConfig(#[from] serde_json::Error),
}

/// Convenience alias for results carrying our main error type
pub type StatementResult<T> = Result<T, StatementParseError>;
