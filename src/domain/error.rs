//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent violations of the tree's own limits.
/// These are independent of infrastructure concerns.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The snapshot header is a signed 32-bit count.
    #[error("tree has {0} nodes, snapshot count is limited to i32::MAX")]
    TooManyNodes(usize),
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
