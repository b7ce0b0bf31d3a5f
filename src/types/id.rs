//! Identifiers naming graph elements inside a traversal.
//!
//! Element equality throughout the crate is id-based, and paths can carry
//! elements in reference form ([`Value::EntityRef`](super::Value::EntityRef)
//! / [`Value::EdgeRef`](super::Value::EdgeRef)): these ids are what those
//! references store and what an
//! [`ElementLookup`](crate::path::ElementLookup) resolves back into
//! snapshots.

use serde::{Deserialize, Serialize};

/// Identifies one entity (node). Two entity values with the same id are the
/// same element, whatever else they carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(u64);

impl EntityId {
    /// Wraps a raw id.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// The raw id.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl From<u64> for EntityId {
    fn from(id: u64) -> Self {
        Self::new(id)
    }
}

/// Identifies one edge (relationship).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EdgeId(u64);

impl EdgeId {
    /// Wraps a raw id.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// The raw id.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl From<u64> for EdgeId {
    fn from(id: u64) -> Self {
        Self::new(id)
    }
}
