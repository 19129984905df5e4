use serde::{Deserialize, Serialize};

/// Named indices into a [`State`] vector.
///
/// Dynamics models may define states with more entries, but the first
/// [`MIN_STATE_SIZE`] slots always carry these fields in this order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StateIndex {
    Time = 0,
    X = 1,
    Y = 2,
    Theta = 3,
    Vel = 4,
}

/// Smallest state dimension any dynamics model accepts.
pub const MIN_STATE_SIZE: usize = 5;

/// Full kinematic description of an agent at one instant.
///
/// Immutable by convention: everything outside a dynamics model derives new
/// states via [`State::with`] or the constructors, never by in-place edits.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct State(Vec<f64>);

impl State {
    pub fn new(values: Vec<f64>) -> Self {
        Self(values)
    }

    /// All-zero state of the minimum dimension.
    pub fn zeroed() -> Self {
        Self(vec![0.0; MIN_STATE_SIZE])
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn values(&self) -> &[f64] {
        &self.0
    }

    pub fn into_values(self) -> Vec<f64> {
        self.0
    }

    #[inline]
    pub fn get(&self, index: StateIndex) -> f64 {
        self.0[index as usize]
    }

    /// Copy of this state with one named field replaced.
    pub fn with(&self, index: StateIndex, value: f64) -> Self {
        let mut values = self.0.clone();
        values[index as usize] = value;
        Self(values)
    }

    #[inline]
    pub fn time(&self) -> f64 {
        self.get(StateIndex::Time)
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.get(StateIndex::X)
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.get(StateIndex::Y)
    }

    #[inline]
    pub fn theta(&self) -> f64 {
        self.get(StateIndex::Theta)
    }

    #[inline]
    pub fn vel(&self) -> f64 {
        self.get(StateIndex::Vel)
    }
}

/// Control command vector consumed by a dynamics model.
///
/// Owned by whichever primitive produced it; recomputed every interval.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Input(Vec<f64>);

impl Input {
    pub fn new(values: Vec<f64>) -> Self {
        Self(values)
    }

    /// All-zero input of the given dimension.
    pub fn zeroed(size: usize) -> Self {
        Self(vec![0.0; size])
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn values(&self) -> &[f64] {
        &self.0
    }

    #[inline]
    pub fn get(&self, i: usize) -> f64 {
        self.0[i]
    }
}
