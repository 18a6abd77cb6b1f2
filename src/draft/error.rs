use thiserror::Error;

use crate::draft::NodeId;

pub type DraftResult<T> = std::result::Result<T, DraftError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("UnknownModule: {0}")]
    UnknownModule(NodeId),

    #[error("UnknownLesson: {lesson} in module {module}")]
    UnknownLesson { module: NodeId, lesson: NodeId },

    #[error("NotAPermutation: new {scope} order does not match the current {scope} set")]
    NotAPermutation { scope: &'static str },

    #[error("InvalidPatch: {0}")]
    InvalidPatch(&'static str),

    #[error("DragOutOfBounds: index {index} in a list of {len}")]
    DragOutOfBounds { index: usize, len: usize },
}
