//! The self-contained snapshot path variant.

use serde::{Deserialize, Serialize};

use crate::types::Value;

use super::segment::{extend_last_labels, extend_segments, retract_segments, Segment};
use super::Path;

/// A path snapshot that is safe to transmit or retain independent of any
/// live execution context.
///
/// This is the serialization unit handed across a worker or network boundary
/// in distributed execution: every entry holds its value outright, so the
/// path is fully resolvable without a graph handle.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DetachedPath {
    segments: Vec<Segment>,
}

impl DetachedPath {
    /// Creates an empty path.
    #[must_use]
    pub fn new() -> Self {
        Self { segments: Vec::new() }
    }

    /// Snapshots any path variant into a detached copy.
    #[must_use]
    pub fn from_path(path: &dyn Path) -> Self {
        let mut segments = Vec::with_capacity(path.size());
        for (value, labels) in path.objects().into_iter().zip(path.labels()) {
            segments.push(Segment::new(value, labels));
        }
        Self { segments }
    }

    pub(crate) fn from_segments(segments: Vec<Segment>) -> Self {
        Self { segments }
    }
}

impl Path for DetachedPath {
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
        extend_segments(&mut self.segments, value, labels);
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
