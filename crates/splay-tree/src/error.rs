use std::collections::TryReserveError;

#[derive(Debug, thiserror::Error)]
pub enum SplayError {
    #[error("invalid argument: node {node} is absent from the tree")]
    InvalidArgument { node: u32 },
    #[error("node arena could not grow: {0}")]
    AllocationFailed(#[from] TryReserveError),
    #[error("node arena is limited to {limit} slots")]
    CapacityExceeded { limit: usize },
    #[error("order violated at node {node}")]
    OrderViolation { node: u32 },
    #[error("parent/child links disagree at node {node}")]
    BrokenLink { node: u32 },
    #[error("tree holds {actual} reachable nodes but counts {expected}")]
    LengthMismatch { expected: usize, actual: usize },
}
