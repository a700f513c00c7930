//! Error kinds raised by the graph core.
//!
//! None of these are fatal: the command boundary turns them into the
//! prompt's error flag, and pointer dispatch has no failure path.

use crate::id::VertexId;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// A selector or argument names a label no live vertex carries.
    #[error("unknown vertex label: {0}")]
    UnknownLabel(u32),
    /// An operator argument is not a valid label or color token.
    #[error("malformed argument: {0}")]
    MalformedArgument(String),
    /// Edge construction referenced a vertex that is not live.
    #[error("invalid vertex reference: {0}")]
    InvalidReference(VertexId),
    /// Persisted settings could not be read or a value had the wrong type.
    #[error("settings error: {0}")]
    Settings(String),
}

pub type Result<T, E = GraphError> = std::result::Result<T, E>;
