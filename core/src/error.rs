use thiserror::Error;

use crate::{NodeId, NodeIndex};

pub type Result<T> = std::result::Result<T, GraphError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GraphError {
    #[error("unknown edge type: {0}")]
    UnknownEdgeType(String),
    #[error("node {0} not found")]
    NodeNotFound(NodeId),
    #[error("graph has no edge from {from} to {to}")]
    EdgeNotFound { from: NodeId, to: NodeId },
    #[error("weight {0} is outside the closed range [0, 1]")]
    WeightOutOfRange(f64),
    #[error(
        "overflow: precision {precision} with {type_count} edge types needs more than 65536 packed states"
    )]
    Overflow { precision: u32, type_count: usize },
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("node index {0} was never assigned")]
    IndexOutOfBounds(NodeIndex),
    #[error("node index space exhausted")]
    CapacityExceeded,
}
