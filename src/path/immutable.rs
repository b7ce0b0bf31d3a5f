//! The persistent path variant.

use std::sync::Arc;

use crate::types::Value;

use super::segment::Segment;
use super::Path;

/// A path that never mutates: every modification returns a new instance and
/// shares structure with the original, so discarding the return value is a
/// no-op.
///
/// Entries are held as a parent-linked chain of reference-counted nodes;
/// extending is O(1), materializing `objects()`/`labels()` walks the chain.
#[derive(Debug, Clone, Default)]
pub struct ImmutablePath {
    head: Option<Arc<Node>>,
}

#[derive(Debug)]
struct Node {
    value: Value,
    labels: Vec<String>,
    parent: Option<Arc<Node>>,
    depth: usize,
}

impl ImmutablePath {
    /// Creates an empty path.
    #[must_use]
    pub fn new() -> Self {
        Self { head: None }
    }

    /// Returns a new path with one more entry holding `value` under `labels`.
    #[must_use]
    pub fn extend(&self, value: Value, labels: Vec<String>) -> Self {
        let segment = Segment::new(value, labels);
        let (value, labels) = segment.into_parts();
        Self {
            head: Some(Arc::new(Node {
                value,
                labels,
                parent: self.head.clone(),
                depth: self.head.as_ref().map_or(0, |n| n.depth) + 1,
            })),
        }
    }

    /// Returns a new path whose last entry additionally carries `labels`.
    /// Returns an unchanged path when this path is empty.
    #[must_use]
    pub fn extend_labels(&self, labels: Vec<String>) -> Self {
        let Some(head) = &self.head else {
            return self.clone();
        };
        let mut merged = head.labels.clone();
        for label in labels {
            if !merged.contains(&label) {
                merged.push(label);
            }
        }
        Self {
            head: Some(Arc::new(Node {
                value: head.value.clone(),
                labels: merged,
                parent: head.parent.clone(),
                depth: head.depth,
            })),
        }
    }

    /// Returns a new path with `labels` removed from every entry; entries
    /// whose label set becomes empty are dropped.
    #[must_use]
    pub fn retract(&self, labels: &[String]) -> Self {
        let mut retained = Self::new();
        for (value, entry_labels) in self.objects().into_iter().zip(Path::labels(self)) {
            if entry_labels.is_empty() {
                retained = retained.extend(value, entry_labels);
                continue;
            }
            let surviving: Vec<String> =
                entry_labels.into_iter().filter(|l| !labels.contains(l)).collect();
            if !surviving.is_empty() {
                retained = retained.extend(value, surviving);
            }
        }
        retained
    }
}

impl Path for ImmutablePath {
    fn size(&self) -> usize {
        self.head.as_ref().map_or(0, |n| n.depth)
    }

    fn objects(&self) -> Vec<Value> {
        let mut values = Vec::with_capacity(self.size());
        let mut node = self.head.as_deref();
        while let Some(n) = node {
            values.push(n.value.clone());
            node = n.parent.as_deref();
        }
        values.reverse();
        values
    }

    fn labels(&self) -> Vec<Vec<String>> {
        let mut labels = Vec::with_capacity(self.size());
        let mut node = self.head.as_deref();
        while let Some(n) = node {
            labels.push(n.labels.clone());
            node = n.parent.as_deref();
        }
        labels.reverse();
        labels
    }

    fn extend(self: Box<Self>, value: Value, labels: Vec<String>) -> Box<dyn Path> {
        Box::new(ImmutablePath::extend(&self, value, labels))
    }

    fn extend_labels(self: Box<Self>, labels: Vec<String>) -> Box<dyn Path> {
        Box::new(ImmutablePath::extend_labels(&self, labels))
    }

    fn retract(self: Box<Self>, labels: &[String]) -> Box<dyn Path> {
        Box::new(ImmutablePath::retract(&self, labels))
    }

    fn clone_path(&self) -> Box<dyn Path> {
        Box::new(self.clone())
    }
}
