//! The per-element execution token of a traversal.
//!
//! A traverser wraps the value currently being processed together with all
//! of its execution state: an optional visitation path, a bulk count (the
//! multiplicity it represents after folding), a shared reference to the
//! run's side-effect registry, an optional local accumulator (the sack),
//! and a loop counter for the active loop scope.
//!
//! Ownership is deliberate: the side-effect reference is shared by every
//! traverser of one run, while the path and sack are owned and deep-copied
//! on [`split`](Traverser::split) so sibling forks never alias mutable
//! state.

mod set;

use std::hash::{Hash, Hasher};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{TraversalError, TraversalResult};
use crate::path::{MutablePath, Path};
use crate::side_effects::SideEffects;
use crate::types::Value;

pub use set::TraverserSet;

/// The unit of computation flowing through every step of a traversal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Traverser {
    value: Value,
    path: Option<MutablePath>,
    bulk: u64,
    sack: Option<Value>,
    loops: u32,
    loop_name: Option<String>,
    // Severed by serialization: a traverser that crosses a worker boundary
    // comes back without its registry until the receiving side reattaches
    // one.
    #[serde(skip)]
    side_effects: Option<Arc<SideEffects>>,
}

impl Traverser {
    /// Creates a path-less traverser with bulk 1. The sack is initialized
    /// from the registry's factory if one is configured.
    #[must_use]
    pub fn new(value: Value, side_effects: &Arc<SideEffects>) -> Self {
        Self {
            value,
            path: None,
            bulk: 1,
            sack: side_effects.initial_sack(),
            loops: 0,
            loop_name: None,
            side_effects: Some(Arc::clone(side_effects)),
        }
    }

    /// Creates a path-tracking traverser whose path starts with the value
    /// under `labels`.
    #[must_use]
    pub fn new_with_path(
        value: Value,
        labels: Vec<String>,
        side_effects: &Arc<SideEffects>,
    ) -> Self {
        let mut traverser = Self::new(value, side_effects);
        let mut path = MutablePath::new();
        path.extend(traverser.value.clone(), labels);
        traverser.path = Some(path);
        traverser
    }

    /// The value the traverser currently references.
    #[inline]
    #[must_use]
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// The traverser's visitation history, if path tracking is on.
    #[inline]
    #[must_use]
    pub fn path(&self) -> Option<&MutablePath> {
        self.path.as_ref()
    }

    /// The multiplicity this traverser represents.
    #[inline]
    #[must_use]
    pub fn bulk(&self) -> u64 {
        self.bulk
    }

    /// Sets the multiplicity.
    pub fn set_bulk(&mut self, bulk: u64) {
        self.bulk = bulk;
    }

    /// The local accumulator, if present.
    #[inline]
    #[must_use]
    pub fn sack(&self) -> Option<&Value> {
        self.sack.as_ref()
    }

    /// Writes the local accumulator.
    pub fn set_sack(&mut self, value: Value) {
        self.sack = Some(value);
    }

    /// The run's side-effect registry. `None` after the reference has been
    /// severed by a serialization boundary.
    #[inline]
    #[must_use]
    pub fn side_effects(&self) -> Option<&Arc<SideEffects>> {
        self.side_effects.as_ref()
    }

    /// Reattaches a side-effect registry, e.g. after deserialization on a
    /// worker that holds the run's registry.
    pub fn attach_side_effects(&mut self, side_effects: Arc<SideEffects>) {
        self.side_effects = Some(side_effects);
    }

    /// The counter of the active loop scope.
    #[inline]
    #[must_use]
    pub fn loops(&self) -> u32 {
        self.loops
    }

    /// The loop counter under an explicit scope name. A `None` name always
    /// resolves to the active scope.
    ///
    /// # Errors
    ///
    /// Returns [`TraversalError::UndefinedLoopName`] when the supplied name
    /// does not match the registered scope.
    pub fn loops_for(&self, loop_name: Option<&str>) -> TraversalResult<u32> {
        match loop_name {
            None => Ok(self.loops),
            Some(name) if self.loop_name.as_deref() == Some(name) => Ok(self.loops),
            Some(name) => Err(TraversalError::UndefinedLoopName(name.to_owned())),
        }
    }

    /// Registers the active loop scope's name.
    pub fn init_loops(&mut self, loop_name: impl Into<String>) {
        self.loop_name = Some(loop_name.into());
    }

    /// Increments the loop counter.
    pub fn incr_loops(&mut self) {
        self.loops += 1;
    }

    /// Resets the loop counter to zero.
    pub fn reset_loops(&mut self) {
        self.loops = 0;
    }

    /// Produces a child traverser for fan-out.
    ///
    /// The child references `value`, shares the side-effect registry,
    /// deep-copies the path and extends it with the new value under the
    /// owning step's `labels`, copies bulk and loop state, and derives its
    /// sack through the configured split function (copying the sack
    /// unchanged when none is configured).
    #[must_use]
    pub fn split(&self, value: Value, labels: &[String]) -> Self {
        let mut child = self.clone();
        if let Some(path) = child.path.as_mut() {
            path.extend(value.clone(), labels.to_vec());
        }
        child.value = value;
        child.sack = self.split_sack();
        child
    }

    /// Produces an identical child traverser, as barrier steps do when they
    /// re-emit a working set. The sack still goes through the configured
    /// split function.
    #[must_use]
    pub fn split_unchanged(&self) -> Self {
        let mut child = self.clone();
        child.sack = self.split_sack();
        child
    }

    /// Folds a returning fork into this traverser: bulks are summed and the
    /// sacks are combined through the configured merge function. Without a
    /// merge function the receiver's sack is left unchanged.
    pub fn merge(&mut self, other: &Traverser) {
        self.bulk += other.bulk;
        if let (Some(sack), Some(other_sack)) = (&self.sack, &other.sack) {
            if let Some(merger) = self.side_effects.as_ref().and_then(|se| se.sack_merger()) {
                self.sack = Some(merger(sack, other_sack));
            }
        }
    }

    /// Whether this traverser may fold with an equal one.
    ///
    /// A traverser carrying a non-absent sack with no merge function
    /// available (either none was configured, or the side-effect reference
    /// was severed by serialization) is never considered equal to any other,
    /// so diverging sack values are never silently discarded.
    #[must_use]
    pub fn is_foldable(&self) -> bool {
        self.sack.is_none()
            || self.side_effects.as_ref().is_some_and(|se| se.sack_merger().is_some())
    }

    fn split_sack(&self) -> Option<Value> {
        let sack = self.sack.as_ref()?;
        match self.side_effects.as_ref().and_then(|se| se.sack_splitter()) {
            Some(splitter) => Some(splitter(sack)),
            None => Some(sack.clone()),
        }
    }

    /// Hashes the merge-invariant identity: everything folding equality
    /// compares except the sack. [`merge`](Self::merge) rewrites the sack,
    /// so an index keyed on this stays valid across merges while one keyed
    /// on the full hash would not.
    pub(crate) fn hash_identity<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
        if let Some(path) = &self.path {
            state.write_u64(path.hash_path());
        }
        self.loops.hash(state);
        self.loop_name.hash(state);
    }
}

/// Folding equality: value, path, loop state, and sack content must all be
/// equal, and both traversers must be [foldable](Traverser::is_foldable).
/// Bulk is deliberately excluded - folding is exactly the act of summing
/// bulks of otherwise equal traversers.
impl PartialEq for Traverser {
    fn eq(&self, other: &Self) -> bool {
        self.is_foldable()
            && other.is_foldable()
            && self.value == other.value
            && self.path == other.path
            && self.loops == other.loops
            && self.loop_name == other.loop_name
            && self.sack == other.sack
    }
}

impl Hash for Traverser {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.hash_identity(state);
        self.sack.hash(state);
    }
}
