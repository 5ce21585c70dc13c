use thiserror::Error;

/// Errors raised by catalog lookups and list operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    /// Index or position outside the valid range.
    #[error("index {index} out of range (len {len})")]
    OutOfRange { index: usize, len: usize },

    /// Position is not currently offered in the available pool.
    #[error("position {position} is not in the available pool")]
    InvalidOperand { position: usize },

    /// Catalog has no item with this name.
    #[error("no catalog item named '{name}'")]
    NotFound { name: String },

    /// Persistence collaborator reported a failure.
    #[error("persistence failed: {message}")]
    Persistence { message: String },
}

pub type Result<T> = std::result::Result<T, SelectionError>;
