//! Ordered, labeled visitation history.
//!
//! A path is a sequence of entries `(value, labels)` recording every element
//! a traverser has visited. Four interchangeable variants implement the
//! [`Path`] trait:
//!
//! - [`MutablePath`] - growable, mutates in place; confined to a single
//!   traverser lineage.
//! - [`ImmutablePath`] - persistent, every modification returns a new path
//!   and shares structure with the original.
//! - [`DetachedPath`] - self-contained snapshot, safe to transmit or retain
//!   independent of any live execution context.
//! - [`ReferencePath`] - lightweight pointer form that stores graph elements
//!   as bare ids and defers materialization to an [`ElementLookup`].
//!
//! Equality, hashing, and [`pop_equals`](Path::pop_equals) are implemented
//! once against the trait, so the variants cannot drift apart in behavior:
//! two paths are equal, regardless of variant, iff their value sequences are
//! identical in order and their per-entry label sets are identical as sets.

mod detached;
mod immutable;
mod mutable;
mod reference;
mod segment;


use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::error::{TraversalError, TraversalResult};
use crate::types::Value;

pub use detached::DetachedPath;
pub use immutable::ImmutablePath;
pub use mutable::MutablePath;
pub use reference::{ElementLookup, ReferencePath};

pub(crate) use segment::Segment;

/// Disambiguation mode for multi-valued label lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pop {
    /// The first (earliest) value recorded under the label.
    First,
    /// The last (most recent) value recorded under the label.
    Last,
    /// Every value recorded under the label, in path order.
    All,
}

/// The selection a [`Pop`]-qualified lookup produces for one label.
///
/// `First`/`Last` select a single value (`None` when the label is absent);
/// `All` selects the ordered list of every value (empty when absent).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PopSelection {
    /// A single value, or `None` if the label is absent.
    Single(Option<Value>),
    /// Every value under the label, in path order.
    List(Vec<Value>),
}

/// An ordered, labeled visitation history.
///
/// The read side of the trait (`size`, `objects`, `labels`, and everything
/// derived from them) is shared by all variants. The extension methods
/// consume and return `Box<dyn Path>` so an identical operation sequence can
/// be replayed against any variant; each concrete type additionally exposes
/// its natural inherent API (`&mut self` for [`MutablePath`], `&self -> Self`
/// for [`ImmutablePath`]).
pub trait Path: fmt::Debug + Send + Sync {
    /// Number of entries in the path.
    fn size(&self) -> usize;

    /// All values in path order.
    fn objects(&self) -> Vec<Value>;

    /// The ordered label set of each entry, in path order.
    fn labels(&self) -> Vec<Vec<String>>;

    /// Appends a new entry holding `value` under `labels`.
    fn extend(self: Box<Self>, value: Value, labels: Vec<String>) -> Box<dyn Path>;

    /// Adds `labels` to the current last entry. No-op on an empty path.
    fn extend_labels(self: Box<Self>, labels: Vec<String>) -> Box<dyn Path>;

    /// Removes every label in `labels` from every entry. Entries whose label
    /// set becomes empty are removed from the path entirely; entries that
    /// had no labels to begin with remain.
    fn retract(self: Box<Self>, labels: &[String]) -> Box<dyn Path>;

    /// An independent copy, usable after further mutation of the source.
    fn clone_path(&self) -> Box<dyn Path>;

    /// Returns `true` if the path has no entries.
    fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// The most recently visited value.
    fn head(&self) -> Option<Value> {
        self.objects().pop()
    }

    /// Returns `true` if no value repeats among the path's objects.
    /// Label repetition is irrelevant to simplicity.
    fn is_simple(&self) -> bool {
        let objects = self.objects();
        for (i, a) in objects.iter().enumerate() {
            if objects[i + 1..].contains(a) {
                return false;
            }
        }
        true
    }

    /// Returns `true` if any entry carries the label.
    fn has_label(&self, label: &str) -> bool {
        self.labels().iter().any(|set| contains_label(set, label))
    }

    /// Positional access into the value sequence.
    fn object(&self, index: usize) -> Option<Value> {
        self.objects().into_iter().nth(index)
    }

    /// Looks up a label across all entries.
    ///
    /// A single occurrence resolves to that entry's value; multiple
    /// occurrences resolve to a [`Value::Array`] of every value in path
    /// order.
    ///
    /// # Errors
    ///
    /// Returns [`TraversalError::LabelNotFound`] if no entry carries the
    /// label.
    fn get(&self, label: &str) -> TraversalResult<Value> {
        let mut matches = self.all(label);
        match matches.len() {
            0 => Err(TraversalError::LabelNotFound(label.to_owned())),
            1 => Ok(matches.swap_remove(0)),
            _ => Ok(Value::Array(matches)),
        }
    }

    /// The earliest value recorded under the label, if any.
    fn first(&self, label: &str) -> Option<Value> {
        self.objects()
            .into_iter()
            .zip(self.labels())
            .find(|(_, set)| contains_label(set, label))
            .map(|(value, _)| value)
    }

    /// The most recent value recorded under the label, if any.
    fn last(&self, label: &str) -> Option<Value> {
        self.objects()
            .into_iter()
            .zip(self.labels())
            .filter(|(_, set)| contains_label(set, label))
            .map(|(value, _)| value)
            .next_back()
    }

    /// Every value recorded under the label, in path order. Empty when the
    /// label is absent.
    fn all(&self, label: &str) -> Vec<Value> {
        self.objects()
            .into_iter()
            .zip(self.labels())
            .filter(|(_, set)| contains_label(set, label))
            .map(|(value, _)| value)
            .collect()
    }

    /// The [`Pop`]-qualified selection for a label. Absence is a valid
    /// outcome here, never an error.
    fn get_pop(&self, pop: Pop, label: &str) -> PopSelection {
        match pop {
            Pop::First => PopSelection::Single(self.first(label)),
            Pop::Last => PopSelection::Single(self.last(label)),
            Pop::All => PopSelection::List(self.all(label)),
        }
    }

    /// Isolates the contiguous slice of the path between two labels.
    ///
    /// The from-index resolves to the last occurrence of `from_label` (0 when
    /// `None`); the to-index resolves to the last occurrence of `to_label`
    /// (the final entry when `None`). The returned path is independent of
    /// the source and keeps the full original label sets of its entries.
    ///
    /// # Errors
    ///
    /// Returns [`TraversalError::SubPathFromLabelNotFound`] or
    /// [`TraversalError::SubPathToLabelNotFound`] when a supplied endpoint
    /// label is absent, and [`TraversalError::SubPathOutOfOrder`] when the
    /// resolved from-index falls after the to-index.
    fn sub_path(
        &self,
        from_label: Option<&str>,
        to_label: Option<&str>,
    ) -> TraversalResult<MutablePath> {
        let objects = self.objects();
        let labels = self.labels();
        if objects.is_empty() {
            return match (from_label, to_label) {
                (Some(l), _) => Err(TraversalError::SubPathFromLabelNotFound(l.to_owned())),
                (None, Some(l)) => Err(TraversalError::SubPathToLabelNotFound(l.to_owned())),
                (None, None) => Ok(MutablePath::new()),
            };
        }

        let from_index = match from_label {
            None => 0,
            Some(l) => last_index_of(&labels, l)
                .ok_or_else(|| TraversalError::SubPathFromLabelNotFound(l.to_owned()))?,
        };
        let to_index = match to_label {
            None => objects.len() - 1,
            Some(l) => last_index_of(&labels, l)
                .ok_or_else(|| TraversalError::SubPathToLabelNotFound(l.to_owned()))?,
        };
        if from_index > to_index {
            return Err(TraversalError::SubPathOutOfOrder {
                from: from_label.unwrap_or("<head>").to_owned(),
                to: to_label.unwrap_or("<tail>").to_owned(),
            });
        }

        let mut sub = MutablePath::new();
        for (value, entry_labels) in objects
            .into_iter()
            .zip(labels)
            .skip(from_index)
            .take(to_index - from_index + 1)
        {
            sub.extend(value, entry_labels);
        }
        Ok(sub)
    }

    /// Label-projected equality under a [`Pop`] mode.
    ///
    /// For every label appearing in either path, both paths' selections
    /// under `pop` must be equal. `All` requires full ordered-list equality
    /// per label; `First`/`Last` compare only the designated value, so paths
    /// that share a convergent final (or initial) value per label are
    /// pop-equal even when their interior history differs.
    fn pop_equals(&self, pop: Pop, other: &dyn Path) -> bool {
        let mut union: Vec<String> = Vec::new();
        for set in self.labels().into_iter().chain(other.labels()) {
            for label in set {
                if !union.contains(&label) {
                    union.push(label);
                }
            }
        }
        union
            .iter()
            .all(|label| self.get_pop(pop, label) == other.get_pop(pop, label))
    }

    /// Structural equality shared by all variants: identical value sequence
    /// and, entry by entry, identical label sets (as sets).
    fn eq_path(&self, other: &dyn Path) -> bool {
        self.size() == other.size()
            && self.objects() == other.objects()
            && self
                .labels()
                .into_iter()
                .zip(other.labels())
                .all(|(a, b)| label_sets_equal(&a, &b))
    }

    /// Hash consistent with [`eq_path`](Self::eq_path) across all variants.
    fn hash_path(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        for (value, mut labels) in self.objects().into_iter().zip(self.labels()) {
            value.hash(&mut hasher);
            labels.sort();
            labels.hash(&mut hasher);
        }
        hasher.finish()
    }
}

impl PartialEq for dyn Path {
    fn eq(&self, other: &Self) -> bool {
        self.eq_path(other)
    }
}

// Lets `Box<dyn Path>` values be compared directly inside `assert_eq!` and
// friends, which otherwise hit rust-lang/rust#31740.
impl PartialEq<&Self> for Box<dyn Path> {
    fn eq(&self, other: &&Self) -> bool {
        self.eq_path(other.as_ref())
    }
}

fn contains_label(set: &[String], label: &str) -> bool {
    set.iter().any(|l| l == label)
}

fn last_index_of(labels: &[Vec<String>], label: &str) -> Option<usize> {
    labels.iter().rposition(|set| contains_label(set, label))
}

fn label_sets_equal(a: &[String], b: &[String]) -> bool {
    // Labels within an entry are distinct, so equal length plus containment
    // is full set equality.
    a.len() == b.len() && a.iter().all(|l| b.contains(l))
}

/// Generates `PartialEq` between every pair of path variants, all routed
/// through the shared [`Path::eq_path`] algorithm.
macro_rules! impl_cross_variant_eq {
    ($($lhs:ty),+ $(,)?) => {
        impl_cross_variant_eq!(@outer ($($lhs),+); ($($lhs),+));
    };
    (@outer ($($lhs:ty),+); $rhs:tt) => {
        $(impl_cross_variant_eq!(@inner $lhs; $rhs);)+
    };
    (@inner $lhs:ty; ($($rhs:ty),+)) => {
        $(
            impl PartialEq<$rhs> for $lhs {
                fn eq(&self, other: &$rhs) -> bool {
                    self.eq_path(other)
                }
            }
        )+
    };
}

impl_cross_variant_eq!(MutablePath, ImmutablePath, DetachedPath, ReferencePath);

impl Eq for MutablePath {}
impl Eq for ImmutablePath {}
impl Eq for DetachedPath {}
impl Eq for ReferencePath {}

macro_rules! impl_path_hash {
    ($($variant:ty),+ $(,)?) => {
        $(
            impl Hash for $variant {
                fn hash<H: Hasher>(&self, state: &mut H) {
                    state.write_u64(self.hash_path());
                }
            }
        )+
    };
}

impl_path_hash!(MutablePath, ImmutablePath, DetachedPath, ReferencePath);
