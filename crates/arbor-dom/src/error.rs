//! Tree operation errors

/// Result type for tree operations
pub type DomResult<T> = Result<T, DomError>;

/// Tree operation errors
///
/// Every failure is local to the requested operation: the tree is left in
/// its prior valid state, never partially mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    /// Id references a destroyed or unknown node
    #[error("node not found")]
    NotFound,

    /// Structural edit would make a node its own ancestor
    #[error("edit would create a cycle")]
    CycleDetected,

    /// Strict link attempted on a node that already has a parent
    #[error("node is already attached to a parent")]
    AlreadyAttached,

    /// Edit references a parent/child pair that is not current
    #[error("node is not a child of the given parent")]
    NotAChild,

    /// Operation applied to an incompatible node kind
    #[error("operation is not valid for this node kind")]
    WrongKind,
}
