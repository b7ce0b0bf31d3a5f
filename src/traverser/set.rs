//! Equality-driven compaction of logically-duplicate traversers.

use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::Hasher;

use super::Traverser;

/// An insertion-ordered working set that folds equal traversers into one
/// representative with summed bulk.
///
/// Barrier-like steps collect their upstream into a `TraverserSet` so that
/// logically-duplicate traversers are processed once. Folding is purely an
/// optimization and never changes observable results: a traverser whose
/// sack cannot be merged reports
/// [`is_foldable`](Traverser::is_foldable)` == false`, is never grouped,
/// and passes through as its own entry.
#[derive(Debug, Default)]
pub struct TraverserSet {
    entries: Vec<Traverser>,
    // Fold-key hash to candidate indices; unfoldable entries are not
    // indexed. The key covers only merge-invariant fields (no sack), so a
    // representative stays findable after merges rewrite its sack; the
    // equality scan within a bucket settles sack content.
    index: HashMap<u64, Vec<usize>>,
}

impl TraverserSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a traverser, folding it into an existing equal entry if one
    /// exists.
    pub fn add(&mut self, traverser: Traverser) {
        if traverser.is_foldable() {
            let key = fold_key(&traverser);
            if let Some(candidates) = self.index.get(&key) {
                for &i in candidates {
                    if self.entries[i] == traverser {
                        self.entries[i].merge(&traverser);
                        return;
                    }
                }
            }
            self.index.entry(key).or_default().push(self.entries.len());
        }
        self.entries.push(traverser);
    }

    /// Number of distinct entries.
    #[must_use]
    pub fn size(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the set holds no traversers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total multiplicity across all entries.
    #[must_use]
    pub fn bulk_size(&self) -> u64 {
        self.entries.iter().map(Traverser::bulk).sum()
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Traverser> {
        self.entries.iter()
    }
}

impl IntoIterator for TraverserSet {
    type Item = Traverser;
    type IntoIter = std::vec::IntoIter<Traverser>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a TraverserSet {
    type Item = &'a Traverser;
    type IntoIter = std::slice::Iter<'a, Traverser>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Extend<Traverser> for TraverserSet {
    fn extend<I: IntoIterator<Item = Traverser>>(&mut self, iter: I) {
        for traverser in iter {
            self.add(traverser);
        }
    }
}

fn fold_key(traverser: &Traverser) -> u64 {
    let mut hasher = DefaultHasher::new();
    traverser.hash_identity(&mut hasher);
    hasher.finish()
}
