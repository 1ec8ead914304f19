//! Errors raised by hierarchy traversals.

use thiserror::Error;

/// Hard failures. Unknown identifiers and dangling parents are not errors;
/// they produce empty or truncated results.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HierarchyError {
    /// A traversal reached an identifier already on its current path.
    #[error("cycle detected at identifier {id}")]
    CycleDetected { id: String },
}

pub type HierarchyResult<T> = Result<T, HierarchyError>;
