//! Storage shared by the vec-backed path variants.

use serde::{Deserialize, Serialize};

use crate::types::Value;

/// One path entry: a value and its ordered set of labels.
///
/// Labels behave like an insertion-ordered set: duplicates are dropped on
/// insert, order is preserved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Segment {
    value: Value,
    labels: Vec<String>,
}

impl Segment {
    pub(crate) fn new(value: Value, labels: Vec<String>) -> Self {
        let mut segment = Self { value, labels: Vec::with_capacity(labels.len()) };
        segment.add_labels(labels);
        segment
    }

    pub(crate) fn value(&self) -> &Value {
        &self.value
    }

    pub(crate) fn labels(&self) -> &[String] {
        &self.labels
    }

    pub(crate) fn into_parts(self) -> (Value, Vec<String>) {
        (self.value, self.labels)
    }

    pub(crate) fn add_labels(&mut self, labels: Vec<String>) {
        for label in labels {
            if !self.labels.contains(&label) {
                self.labels.push(label);
            }
        }
    }
}

/// Appends a new segment to `segments`.
pub(crate) fn extend_segments(segments: &mut Vec<Segment>, value: Value, labels: Vec<String>) {
    segments.push(Segment::new(value, labels));
}

/// Adds `labels` to the last segment. No-op when `segments` is empty.
pub(crate) fn extend_last_labels(segments: &mut [Segment], labels: Vec<String>) {
    if let Some(last) = segments.last_mut() {
        last.add_labels(labels);
    }
}

/// Removes `labels` from every segment, dropping segments whose label set
/// becomes empty. Segments that had no labels to begin with are kept.
pub(crate) fn retract_segments(segments: &mut Vec<Segment>, labels: &[String]) {
    segments.retain_mut(|segment| {
        if segment.labels.is_empty() {
            return true;
        }
        segment.labels.retain(|l| !labels.contains(l));
        !segment.labels.is_empty()
    });
}
