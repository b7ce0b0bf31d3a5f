//! The pull interface between steps and traversers.
//!
//! A traversal is a chain of steps; each step synchronously requests the
//! next traverser from its upstream step, reads or extends its path,
//! optionally touches the side-effect registry or the sack, optionally
//! forks it, and hands it downstream. There is no background work and no
//! implicit parallelism inside one traversal run; abandoning a traversal is
//! simply ceasing to pull from it.
//!
//! Concrete filter/map/aggregate steps live outside this crate. The three
//! steps here are the generic machinery every pipeline needs: a source
//! ([`InjectStep`]), a fan-out point ([`FlatMapStep`]), and a folding
//! barrier ([`BarrierStep`]).

use std::collections::VecDeque;
use std::sync::Arc;

use tracing::debug;

use crate::error::TraversalResult;
use crate::side_effects::SideEffects;
use crate::traverser::{Traverser, TraverserSet};
use crate::types::Value;

/// A boxed step, the form steps are chained in.
pub type BoxedStep = Box<dyn Step>;

/// One stage of a traversal pipeline.
pub trait Step {
    /// Pulls the next traverser, or `None` when the step is exhausted.
    ///
    /// # Errors
    ///
    /// Propagates any [`TraversalError`](crate::error::TraversalError)
    /// raised while producing the traverser; errors are never caught and
    /// suppressed inside the pipeline.
    fn next(&mut self) -> TraversalResult<Option<Traverser>>;

    /// The step's display name.
    fn name(&self) -> &'static str;

    /// The labels this step stamps onto the paths of traversers it emits.
    fn labels(&self) -> &[String] {
        &[]
    }

    /// Rewinds the step (and its upstream) to its initial state.
    fn reset(&mut self);
}

/// Source step that starts one traverser per injected value.
pub struct InjectStep {
    values: Vec<Value>,
    side_effects: Arc<SideEffects>,
    labels: Vec<String>,
    track_paths: bool,
    cursor: usize,
}

impl InjectStep {
    /// Creates a source over `values` for the run owning `side_effects`.
    #[must_use]
    pub fn new(values: Vec<Value>, side_effects: Arc<SideEffects>) -> Self {
        Self { values, side_effects, labels: Vec::new(), track_paths: false, cursor: 0 }
    }

    /// Stamps emitted traversers' paths with `labels`.
    #[must_use]
    pub fn with_labels(mut self, labels: Vec<String>) -> Self {
        self.labels = labels;
        self
    }

    /// Enables path tracking on emitted traversers.
    #[must_use]
    pub fn with_path_tracking(mut self) -> Self {
        self.track_paths = true;
        self
    }
}

impl Step for InjectStep {
    fn next(&mut self) -> TraversalResult<Option<Traverser>> {
        let Some(value) = self.values.get(self.cursor) else {
            return Ok(None);
        };
        self.cursor += 1;
        let traverser = if self.track_paths {
            Traverser::new_with_path(value.clone(), self.labels.clone(), &self.side_effects)
        } else {
            Traverser::new(value.clone(), &self.side_effects)
        };
        Ok(Some(traverser))
    }

    fn name(&self) -> &'static str {
        "Inject"
    }

    fn labels(&self) -> &[String] {
        &self.labels
    }

    fn reset(&mut self) {
        self.cursor = 0;
    }
}

/// Fan-out step: maps each upstream traverser to zero or more values, each
/// emitted as a [`split`](Traverser::split) child.
pub struct FlatMapStep {
    input: BoxedStep,
    map: Box<dyn FnMut(&Traverser) -> Vec<Value>>,
    labels: Vec<String>,
    pending: VecDeque<Traverser>,
}

impl FlatMapStep {
    /// Creates a fan-out step over `input`.
    #[must_use]
    pub fn new(input: BoxedStep, map: impl FnMut(&Traverser) -> Vec<Value> + 'static) -> Self {
        Self { input, map: Box::new(map), labels: Vec::new(), pending: VecDeque::new() }
    }

    /// Stamps split children's paths with `labels`.
    #[must_use]
    pub fn with_labels(mut self, labels: Vec<String>) -> Self {
        self.labels = labels;
        self
    }
}

impl Step for FlatMapStep {
    fn next(&mut self) -> TraversalResult<Option<Traverser>> {
        loop {
            if let Some(child) = self.pending.pop_front() {
                return Ok(Some(child));
            }
            let Some(parent) = self.input.next()? else {
                return Ok(None);
            };
            for value in (self.map)(&parent) {
                self.pending.push_back(parent.split(value, &self.labels));
            }
        }
    }

    fn name(&self) -> &'static str {
        "FlatMap"
    }

    fn labels(&self) -> &[String] {
        &self.labels
    }

    fn reset(&mut self) {
        self.pending.clear();
        self.input.reset();
    }
}

/// Barrier step: drains its upstream into a [`TraverserSet`], folding
/// logically-duplicate traversers into one with summed bulk, then re-emits
/// the compacted working set.
pub struct BarrierStep {
    input: BoxedStep,
    drained: Option<std::vec::IntoIter<Traverser>>,
}

impl BarrierStep {
    /// Creates a barrier over `input`.
    #[must_use]
    pub fn new(input: BoxedStep) -> Self {
        Self { input, drained: None }
    }
}

impl Step for BarrierStep {
    fn next(&mut self) -> TraversalResult<Option<Traverser>> {
        if self.drained.is_none() {
            let mut set = TraverserSet::new();
            while let Some(traverser) = self.input.next()? {
                set.add(traverser);
            }
            debug!(entries = set.size(), bulk = set.bulk_size(), "barrier folded working set");
            self.drained = Some(set.into_iter());
        }
        Ok(self.drained.as_mut().and_then(Iterator::next))
    }

    fn name(&self) -> &'static str {
        "Barrier"
    }

    fn reset(&mut self) {
        self.drained = None;
        self.input.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inject(values: Vec<Value>) -> BoxedStep {
        Box::new(InjectStep::new(values, Arc::new(SideEffects::new())))
    }

    #[test]
    fn inject_emits_each_value_once() {
        let mut step = inject(vec![Value::Int(1), Value::Int(2)]);
        assert_eq!(step.next().unwrap().unwrap().value(), &Value::Int(1));
        assert_eq!(step.next().unwrap().unwrap().value(), &Value::Int(2));
        assert!(step.next().unwrap().is_none());

        step.reset();
        assert_eq!(step.next().unwrap().unwrap().value(), &Value::Int(1));
    }

    #[test]
    fn flat_map_fans_out_via_split() {
        let input = inject(vec![Value::Int(1), Value::Int(2)]);
        let mut step = FlatMapStep::new(input, |t| {
            let n = t.value().as_int().unwrap_or(0);
            vec![Value::Int(n * 10), Value::Int(n * 10 + 1)]
        });

        let mut out = Vec::new();
        while let Some(t) = step.next().unwrap() {
            out.push(t.value().clone());
        }
        assert_eq!(
            out,
            vec![Value::Int(10), Value::Int(11), Value::Int(20), Value::Int(21)]
        );
    }

    #[test]
    fn flat_map_drops_empty_expansions() {
        let input = inject(vec![Value::Int(1), Value::Int(2), Value::Int(3)]);
        let mut step = FlatMapStep::new(input, |t| {
            if t.value().as_int().unwrap_or(0) % 2 == 0 {
                vec![]
            } else {
                vec![t.value().clone()]
            }
        });

        let mut out = Vec::new();
        while let Some(t) = step.next().unwrap() {
            out.push(t.value().clone());
        }
        assert_eq!(out, vec![Value::Int(1), Value::Int(3)]);
    }

    #[test]
    fn barrier_folds_duplicates() {
        let input = inject(vec![Value::Int(7), Value::Int(7), Value::Int(8)]);
        let mut step = BarrierStep::new(input);

        let first = step.next().unwrap().expect("folded entry");
        assert_eq!(first.value(), &Value::Int(7));
        assert_eq!(first.bulk(), 2);
        let second = step.next().unwrap().expect("second entry");
        assert_eq!(second.value(), &Value::Int(8));
        assert_eq!(second.bulk(), 1);
        assert!(step.next().unwrap().is_none());
    }
}
