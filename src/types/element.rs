//! Graph element types carried through traversals.
//!
//! An [`Entity`] or [`Edge`] appearing in a path or traverser is a detached
//! snapshot: it carries its identifier, labels/type, and a copy of its
//! properties, and is fully usable without a live graph handle. Element
//! identity (and therefore element equality inside [`Value`](super::Value))
//! is determined by the identifier alone.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{EdgeId, EntityId, Value};

/// An entity (node) snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Unique identifier for this entity.
    pub id: EntityId,
    /// Labels that categorize this entity.
    pub labels: Vec<String>,
    /// Properties stored on this entity.
    pub properties: HashMap<String, Value>,
}

impl Entity {
    /// Create a new entity with the given ID.
    #[must_use]
    pub fn new(id: EntityId) -> Self {
        Self { id, labels: Vec::new(), properties: HashMap::new() }
    }

    /// Add a label to this entity.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.labels.push(label.into());
        self
    }

    /// Add a property to this entity.
    #[must_use]
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Check if this entity has a specific label.
    #[must_use]
    pub fn has_label(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }

    /// Get a property value by key.
    #[must_use]
    pub fn get_property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }
}

/// An edge (relationship) snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// Unique identifier for this edge.
    pub id: EdgeId,
    /// The source entity.
    pub source: EntityId,
    /// The target entity.
    pub target: EntityId,
    /// The relationship type.
    pub edge_type: String,
    /// Properties stored on this edge.
    pub properties: HashMap<String, Value>,
}

impl Edge {
    /// Create a new edge between two entities.
    #[must_use]
    pub fn new(
        id: EdgeId,
        source: EntityId,
        target: EntityId,
        edge_type: impl Into<String>,
    ) -> Self {
        Self { id, source, target, edge_type: edge_type.into(), properties: HashMap::new() }
    }

    /// Add a property to this edge.
    #[must_use]
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Get a property value by key.
    #[must_use]
    pub fn get_property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }
}
