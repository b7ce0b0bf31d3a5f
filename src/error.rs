//! Error types for the traversal core.
//!
//! These errors indicate a query or programming defect rather than a
//! transient fault: they propagate immediately to the caller and no
//! component catches and suppresses them.

use thiserror::Error;

use crate::types::{EdgeId, EntityId};

/// Errors that can occur while manipulating paths, traversers, or
/// side-effects.
#[derive(Debug, Error)]
pub enum TraversalError {
    /// A label lookup on a path found no matching entry.
    #[error("label not found in path: {0}")]
    LabelNotFound(String),

    /// The from-label of a sub-path was not found on any entry.
    #[error("could not locate sub-path from-label: {0}")]
    SubPathFromLabelNotFound(String),

    /// The to-label of a sub-path was not found on any entry.
    #[error("could not locate sub-path to-label: {0}")]
    SubPathToLabelNotFound(String),

    /// The sub-path endpoints resolved out of order.
    #[error("could not isolate sub-path: {from} comes after {to}")]
    SubPathOutOfOrder {
        /// The from-label supplied to the sub-path.
        from: String,
        /// The to-label supplied to the sub-path.
        to: String,
    },

    /// A loop counter was requested under a name that is not the
    /// traverser's registered loop scope.
    #[error("loop name not defined: {0}")]
    UndefinedLoopName(String),

    /// A side-effect key was read with no stored value and no default.
    #[error("side-effect not found: {0}")]
    SideEffectNotFound(String),

    /// An entity reference could not be resolved against the graph.
    #[error("could not resolve entity reference: {0:?}")]
    UnresolvedEntity(EntityId),

    /// An edge reference could not be resolved against the graph.
    #[error("could not resolve edge reference: {0:?}")]
    UnresolvedEdge(EdgeId),
}

/// Result alias for traversal operations.
pub type TraversalResult<T> = Result<T, TraversalError>;
