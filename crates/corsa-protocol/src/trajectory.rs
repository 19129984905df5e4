use serde::{Deserialize, Serialize};

use crate::{State, StateIndex};

/// Time-ordered sequence of states produced by planning.
///
/// Rows are one reporting interval apart, except that the final row may
/// close a shortened interval so the trajectory ends exactly on the
/// requested horizon. The first row is the ego state at planning start.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Trajectory {
    states: Vec<State>,
}

impl Trajectory {
    pub fn new() -> Self {
        Self { states: Vec::new() }
    }

    pub fn with_capacity(rows: usize) -> Self {
        Self {
            states: Vec::with_capacity(rows),
        }
    }

    pub fn push(&mut self, state: State) {
        self.states.push(state);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn state(&self, row: usize) -> Option<&State> {
        self.states.get(row)
    }

    pub fn first(&self) -> Option<&State> {
        self.states.first()
    }

    pub fn last(&self) -> Option<&State> {
        self.states.last()
    }

    pub fn states(&self) -> &[State] {
        &self.states
    }

    /// Field value at `(row, index)`; panics if `row` is out of bounds.
    #[inline]
    pub fn at(&self, row: usize, index: StateIndex) -> f64 {
        self.states[row].get(index)
    }

    /// Total time covered, i.e. last row time minus first row time.
    pub fn duration(&self) -> f64 {
        match (self.states.first(), self.states.last()) {
            (Some(first), Some(last)) => last.time() - first.time(),
            _ => 0.0,
        }
    }
}
