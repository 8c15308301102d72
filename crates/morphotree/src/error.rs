use thiserror::Error;

use crate::tree::NodeId;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("Image size mismatch: domain has {expected} points, image has {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    #[error("Cannot build a tree over an empty domain")]
    EmptyDomain,

    #[error("Node {0} does not exist")]
    InvalidNode(NodeId),
}

pub type Result<T> = std::result::Result<T, TreeError>;
