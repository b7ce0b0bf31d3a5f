//! The lightweight pointer path variant.

use serde::{Deserialize, Serialize};

use crate::error::{TraversalError, TraversalResult};
use crate::types::{Edge, EdgeId, Entity, EntityId, Value};

use super::detached::DetachedPath;
use super::segment::{extend_last_labels, extend_segments, retract_segments, Segment};
use super::Path;

/// Resolves element references against a live graph.
///
/// Implementations typically wrap a storage transaction; the traversal core
/// only needs id-to-snapshot lookup.
pub trait ElementLookup {
    /// Fetches the entity snapshot for an id, if the entity exists.
    fn entity(&self, id: EntityId) -> Option<Entity>;

    /// Fetches the edge snapshot for an id, if the edge exists.
    fn edge(&self, id: EdgeId) -> Option<Edge>;
}

/// A path that stores graph elements as bare id references.
///
/// Cheap to carry and transmit when a live graph handle is available on the
/// receiving side; [`resolve`](ReferencePath::resolve) materializes it into a
/// [`DetachedPath`] by looking every reference up. Because element equality
/// is id-based, a reference path compares equal to the snapshot it was taken
/// from.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReferencePath {
    segments: Vec<Segment>,
}

impl ReferencePath {
    /// Creates an empty path.
    #[must_use]
    pub fn new() -> Self {
        Self { segments: Vec::new() }
    }

    /// Converts any path variant into reference form, stripping element
    /// snapshots down to their ids.
    #[must_use]
    pub fn from_path(path: &dyn Path) -> Self {
        let mut segments = Vec::with_capacity(path.size());
        for (value, labels) in path.objects().into_iter().zip(path.labels()) {
            segments.push(Segment::new(to_reference(&value), labels));
        }
        Self { segments }
    }

    /// Materializes the path by resolving every element reference through
    /// `lookup`.
    ///
    /// # Errors
    ///
    /// Returns [`TraversalError::UnresolvedEntity`] or
    /// [`TraversalError::UnresolvedEdge`] when a referenced element no
    /// longer exists.
    pub fn resolve(&self, lookup: &dyn ElementLookup) -> TraversalResult<DetachedPath> {
        let mut segments = Vec::with_capacity(self.segments.len());
        for segment in &self.segments {
            segments.push(Segment::new(
                resolve_value(segment.value(), lookup)?,
                segment.labels().to_vec(),
            ));
        }
        Ok(DetachedPath::from_segments(segments))
    }
}

fn to_reference(value: &Value) -> Value {
    match value {
        Value::Entity(e) => Value::EntityRef(e.id),
        Value::Edge(e) => Value::EdgeRef(e.id),
        Value::Array(values) => Value::Array(values.iter().map(to_reference).collect()),
        other => other.clone(),
    }
}

fn resolve_value(value: &Value, lookup: &dyn ElementLookup) -> TraversalResult<Value> {
    match value {
        Value::EntityRef(id) => lookup
            .entity(*id)
            .map(Value::Entity)
            .ok_or(TraversalError::UnresolvedEntity(*id)),
        Value::EdgeRef(id) => {
            lookup.edge(*id).map(Value::Edge).ok_or(TraversalError::UnresolvedEdge(*id))
        }
        Value::Array(values) => values
            .iter()
            .map(|v| resolve_value(v, lookup))
            .collect::<TraversalResult<Vec<_>>>()
            .map(Value::Array),
        other => Ok(other.clone()),
    }
}

impl Path for ReferencePath {
    fn size(&self) -> usize {
        self.segments.len()
    }

    fn objects(&self) -> Vec<Value> {
        self.segments.iter().map(|s| s.value().clone()).collect()
    }

    fn labels(&self) -> Vec<Vec<String>> {
        self.segments.iter().map(|s| s.labels().to_vec()).collect()
    }

    fn extend(mut self: Box<Self>, value: Value, labels: Vec<String>) -> Box<dyn Path> {
        extend_segments(&mut self.segments, to_reference(&value), labels);
        self
    }

    fn extend_labels(mut self: Box<Self>, labels: Vec<String>) -> Box<dyn Path> {
        extend_last_labels(&mut self.segments, labels);
        self
    }

    fn retract(mut self: Box<Self>, labels: &[String]) -> Box<dyn Path> {
        retract_segments(&mut self.segments, labels);
        self
    }

    fn clone_path(&self) -> Box<dyn Path> {
        Box::new(self.clone())
    }
}
