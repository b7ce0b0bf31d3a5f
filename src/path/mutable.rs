//! The growable path variant.

use serde::{Deserialize, Serialize};

use crate::types::Value;

use super::segment::{extend_last_labels, extend_segments, retract_segments, Segment};
use super::Path;

/// A path that mutates in place.
///
/// This is the variant a live traverser carries. It is confined to a single
/// traverser lineage: [`Traverser::split`](crate::traverser::Traverser::split)
/// deep-copies it so sibling forks never alias each other's history.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MutablePath {
    segments: Vec<Segment>,
}

impl MutablePath {
    /// Creates an empty path.
    #[must_use]
    pub fn new() -> Self {
        Self { segments: Vec::new() }
    }

    /// Appends a new entry holding `value` under `labels`.
    pub fn extend(&mut self, value: Value, labels: Vec<String>) -> &mut Self {
        extend_segments(&mut self.segments, value, labels);
        self
    }

    /// Adds `labels` to the current last entry. No-op on an empty path.
    pub fn extend_labels(&mut self, labels: Vec<String>) -> &mut Self {
        extend_last_labels(&mut self.segments, labels);
        self
    }

    /// Removes `labels` from every entry, dropping entries whose label set
    /// becomes empty.
    pub fn retract(&mut self, labels: &[String]) -> &mut Self {
        retract_segments(&mut self.segments, labels);
        self
    }
}

impl Path for MutablePath {
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
        MutablePath::extend(&mut self, value, labels);
        self
    }

    fn extend_labels(mut self: Box<Self>, labels: Vec<String>) -> Box<dyn Path> {
        MutablePath::extend_labels(&mut self, labels);
        self
    }

    fn retract(mut self: Box<Self>, labels: &[String]) -> Box<dyn Path> {
        MutablePath::retract(&mut self, labels);
        self
    }

    fn clone_path(&self) -> Box<dyn Path> {
        Box::new(self.clone())
    }
}
