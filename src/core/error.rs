use thiserror::Error;

/// Errors surfaced to the caller of a session operation.
/// Neither variant changes any state.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Send attempted with blank text and nothing staged.
    #[error("message must carry text or a file")]
    EmptyMessage,
    /// Mode id outside the fixed catalog. The catalog is closed, so this is a caller bug.
    #[error("unknown mode: {0}")]
    UnknownMode(String),
}
