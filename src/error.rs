use thiserror::Error;

/// Errors that can occur when accessing a heterogeneous container
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContainerError {
    /// Attempted to access an erased value with a type that doesn't match what was stored
    #[error("type mismatch: expected `{expected}`, found `{found}`")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },
    /// The position does not refer to a live element
    #[error("position {index} is out of bounds (len {len})")]
    OutOfBounds { index: usize, len: usize },
    /// The container never stored a value of the requested type
    #[error("no bucket registered for `{type_name}`")]
    MissingBucket { type_name: &'static str },
}
