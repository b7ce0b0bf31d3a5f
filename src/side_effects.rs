//! Shared keyed storage visible to all traversers of one traversal run.
//!
//! Every traverser of a run holds the same `Arc<SideEffects>`; the registry
//! is never copied. Keys are lazily populated via get-or-create with a
//! default factory, and a key always resolves to the same backing entry for
//! the run's lifetime. A key may be registered with a reducer, which is what
//! distributed execution uses to reconcile per-partition registries between
//! supersteps ([`reduce_with`](SideEffects::reduce_with)).
//!
//! The registry also carries the run's sack configuration: an initial-value
//! factory, a split function, and a merge function. Absence of any of these
//! disables the corresponding traverser behavior.

use std::collections::HashMap;
use std::fmt;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::debug;

use crate::error::{TraversalError, TraversalResult};
use crate::types::Value;

/// Produces the initial sack value for each new traverser.
pub type SackFactory = Box<dyn Fn() -> Value + Send + Sync>;

/// Derives a child traverser's sack from its parent's on split.
pub type SackSplitter = Box<dyn Fn(&Value) -> Value + Send + Sync>;

/// Combines two sacks when traversers merge, and reduces side-effect values
/// when a key is registered with a reducer. Must be commutative for keys
/// reduced across partitions.
pub type Reducer = Box<dyn Fn(&Value, &Value) -> Value + Send + Sync>;

/// The side-effect registry of one traversal run.
pub struct SideEffects {
    values: RwLock<HashMap<String, Value>>,
    reducers: RwLock<HashMap<String, Reducer>>,
    sack_initial: Option<SackFactory>,
    sack_splitter: Option<SackSplitter>,
    sack_merger: Option<Reducer>,
}

impl SideEffects {
    /// Creates an empty registry with no sack configuration.
    #[must_use]
    pub fn new() -> Self {
        Self {
            values: RwLock::new(HashMap::new()),
            reducers: RwLock::new(HashMap::new()),
            sack_initial: None,
            sack_splitter: None,
            sack_merger: None,
        }
    }

    /// Configures the initial sack value factory.
    #[must_use]
    pub fn with_sack_initial(mut self, factory: impl Fn() -> Value + Send + Sync + 'static) -> Self {
        self.sack_initial = Some(Box::new(factory));
        self
    }

    /// Configures the sack split function.
    #[must_use]
    pub fn with_sack_splitter(
        mut self,
        splitter: impl Fn(&Value) -> Value + Send + Sync + 'static,
    ) -> Self {
        self.sack_splitter = Some(Box::new(splitter));
        self
    }

    /// Configures the sack merge function.
    #[must_use]
    pub fn with_sack_merger(
        mut self,
        merger: impl Fn(&Value, &Value) -> Value + Send + Sync + 'static,
    ) -> Self {
        self.sack_merger = Some(Box::new(merger));
        self
    }

    /// Invokes the initial sack factory, if one is configured.
    #[must_use]
    pub fn initial_sack(&self) -> Option<Value> {
        self.sack_initial.as_ref().map(|f| f())
    }

    /// The configured sack split function, if any.
    #[must_use]
    pub fn sack_splitter(&self) -> Option<&SackSplitter> {
        self.sack_splitter.as_ref()
    }

    /// The configured sack merge function, if any.
    #[must_use]
    pub fn sack_merger(&self) -> Option<&Reducer> {
        self.sack_merger.as_ref()
    }

    /// Registers a key with an optional initial value and an optional
    /// reducer applied by [`add`](Self::add).
    pub fn register(&self, key: impl Into<String>, initial: Option<Value>, reducer: Option<Reducer>) {
        let key = key.into();
        if let Some(value) = initial {
            self.write_values().insert(key.clone(), value);
        }
        if let Some(reducer) = reducer {
            self.write_reducers().insert(key, reducer);
        }
    }

    /// Reads the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`TraversalError::SideEffectNotFound`] when the key has no
    /// stored value.
    pub fn get(&self, key: &str) -> TraversalResult<Value> {
        self.read_values()
            .get(key)
            .cloned()
            .ok_or_else(|| TraversalError::SideEffectNotFound(key.to_owned()))
    }

    /// Returns the value stored under `key`, invoking `default` exactly once
    /// to populate it if absent.
    pub fn get_or_create(&self, key: &str, default: impl FnOnce() -> Value) -> Value {
        self.write_values().entry(key.to_owned()).or_insert_with(default).clone()
    }

    /// Stores `value` under `key`, replacing any existing value.
    pub fn set(&self, key: impl Into<String>, value: Value) {
        self.write_values().insert(key.into(), value);
    }

    /// Folds `value` into the entry under `key`.
    ///
    /// When the key has a registered reducer and an existing value, the
    /// reducer combines them; otherwise the value is stored as-is.
    pub fn add(&self, key: &str, value: Value) {
        let reducers = self.read_reducers();
        let mut values = self.write_values();
        let folded = match (values.get(key), reducers.get(key)) {
            (Some(existing), Some(reducer)) => reducer(existing, &value),
            _ => value,
        };
        values.insert(key.to_owned(), folded);
    }

    /// Returns `true` if `key` has a stored value.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.read_values().contains_key(key)
    }

    /// All keys with stored values.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.read_values().keys().cloned().collect()
    }

    /// Folds every entry of a per-partition registry into this one via
    /// [`add`](Self::add), applying registered reducers. This is the
    /// explicit reduction step run between supersteps in bulk-synchronous
    /// execution.
    pub fn reduce_with(&self, other: &SideEffects) {
        let entries: Vec<(String, Value)> =
            other.read_values().iter().map(|(k, v)| (k.clone(), v.clone())).collect();
        debug!(keys = entries.len(), "reducing side-effect registries");
        for (key, value) in entries {
            self.add(&key, value);
        }
    }

    fn read_values(&self) -> RwLockReadGuard<'_, HashMap<String, Value>> {
        self.values.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_values(&self) -> RwLockWriteGuard<'_, HashMap<String, Value>> {
        self.values.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn read_reducers(&self) -> RwLockReadGuard<'_, HashMap<String, Reducer>> {
        self.reducers.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_reducers(&self) -> RwLockWriteGuard<'_, HashMap<String, Reducer>> {
        self.reducers.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for SideEffects {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SideEffects {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SideEffects")
            .field("values", &*self.read_values())
            .field("sack_initial", &self.sack_initial.is_some())
            .field("sack_splitter", &self.sack_splitter.is_some())
            .field("sack_merger", &self.sack_merger.is_some())
            .finish_non_exhaustive()
    }
}
