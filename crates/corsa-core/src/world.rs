use corsa_protocol::State;

/// Read-only view of the world as observed by the ego agent.
///
/// The core intentionally requires only these two queries; anything
/// satisfying them can drive planning, including synthetic worlds in tests.
pub trait ObservedWorld {
    fn current_ego_state(&self) -> State;
    fn world_time(&self) -> f64;
}

/// A frozen snapshot view.
///
/// The planner hands one of these to the active primitive on every
/// reporting interval, so primitives observe the trajectory as it unfolds.
/// It is also the natural world double for tests and benchmarks.
#[derive(Clone, Debug)]
pub struct FixedWorld {
    state: State,
    time: f64,
}

impl FixedWorld {
    pub fn new(state: State, time: f64) -> Self {
        Self { state, time }
    }
}

impl ObservedWorld for FixedWorld {
    fn current_ego_state(&self) -> State {
        self.state.clone()
    }

    fn world_time(&self) -> f64 {
        self.time
    }
}
