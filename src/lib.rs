//! Wayline
//!
//! The execution core of a lazily-evaluated, step-pipeline graph traversal
//! engine: the path/traverser state model that flows through every step of
//! a traversal and carries all per-element execution state.
//!
//! # Modules
//!
//! - [`types`] - Runtime values and graph element snapshots/references
//! - [`path`] - Ordered, labeled visitation history in four variants
//! - [`traverser`] - The per-element execution token and the fold engine
//! - [`side_effects`] - Shared keyed storage for one traversal run
//! - [`step`] - The pull interface steps consume traversers through
//! - [`error`] - Error types
//!
//! # Quick Start
//!
//! ```
//! use std::sync::Arc;
//!
//! use wayline::{
//!     BarrierStep, FlatMapStep, InjectStep, Path, SideEffects, Step, Value,
//! };
//!
//! let side_effects = Arc::new(SideEffects::new());
//! let source = InjectStep::new(
//!     vec![Value::Int(1), Value::Int(2)],
//!     Arc::clone(&side_effects),
//! )
//! .with_path_tracking()
//! .with_labels(vec!["start".into()]);
//!
//! let doubled = FlatMapStep::new(Box::new(source), |t| {
//!     let n = t.value().as_int().unwrap_or(0);
//!     vec![Value::Int(n * 2)]
//! })
//! .with_labels(vec!["doubled".into()]);
//!
//! let mut pipeline = BarrierStep::new(Box::new(doubled));
//! while let Some(traverser) = pipeline.next().unwrap() {
//!     let path = traverser.path().unwrap();
//!     assert_eq!(path.size(), 2);
//!     assert!(path.has_label("start"));
//! }
//! ```

pub mod error;
pub mod path;
pub mod side_effects;
pub mod step;
pub mod traverser;
pub mod types;

// Re-export commonly used types
pub use error::{TraversalError, TraversalResult};
pub use path::{
    DetachedPath, ElementLookup, ImmutablePath, MutablePath, Path, Pop, PopSelection,
    ReferencePath,
};
pub use side_effects::SideEffects;
pub use step::{BarrierStep, BoxedStep, FlatMapStep, InjectStep, Step};
pub use traverser::{Traverser, TraverserSet};
pub use types::{Edge, EdgeId, Entity, EntityId, Value};
