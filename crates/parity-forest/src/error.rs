use thiserror::Error;

/// Errors raised by tree operations.
///
/// Every check runs before the tree is touched, so a failed call leaves the
/// tree exactly as it was.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// Insert called without a key.
    #[error("Provided data is null")]
    NullValue,
    /// Parity trees reserve `0` as the vacant-slot marker.
    #[error("Value must be greater than or equal to {min}, got {value}")]
    ValueTooSmall { value: i64, min: i64 },
    /// Rotation called with an absent (or out-of-range) node.
    #[error("The child or parent node is missing")]
    MissingNode,
    /// Rotation called on two nodes that are not parent and child.
    #[error("Node {child} is not a child of node {parent}")]
    NotRelated { child: u32, parent: u32 },
}
