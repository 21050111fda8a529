//! State contract for domains that support search.

use std::fmt::{self, Debug, Display};

/// Trait for problem states the engine can search over.
///
/// # Contract
///
/// - `Ord` must be a total order consistent with `Eq`: two states compare
///   `Equal` exactly when they are `==`. The engine uses the order only as a
///   lookup key; it never affects expansion order.
/// - `successors` returns every state reachable in one legal transition. It
///   must be finite, deterministic and free of side effects.
/// - `heuristic` must be non-negative. For the returned path to be optimal it
///   must also never overestimate the true remaining cost (admissibility);
///   the engine does not check this.
/// - `step_cost` must be non-negative. Unit cost by default.
pub trait SearchState: Clone + Ord + Debug {
    /// All states directly reachable from `self`.
    fn successors(&self) -> Vec<Self>;

    /// Whether this state satisfies the goal.
    fn is_goal(&self) -> bool;

    /// Estimated remaining cost from this state to any goal.
    fn heuristic(&self) -> i64;

    /// Cost of the transition `self -> to`.
    fn step_cost(&self, _to: &Self) -> i64 {
        1
    }
}

/// Wraps a state and reports a zero heuristic everywhere.
///
/// Turns A* into uniform-cost search for any domain without touching the
/// domain's own implementation.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UniformCost<S>(pub S);

impl<S> UniformCost<S> {
    /// Unwrap the inner state.
    #[must_use]
    pub fn into_inner(self) -> S {
        self.0
    }
}

impl<S: Display> Display for UniformCost<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl<S: SearchState> SearchState for UniformCost<S> {
    fn successors(&self) -> Vec<Self> {
        self.0.successors().into_iter().map(UniformCost).collect()
    }

    fn is_goal(&self) -> bool {
        self.0.is_goal()
    }

    fn heuristic(&self) -> i64 {
        0
    }

    fn step_cost(&self, to: &Self) -> i64 {
        self.0.step_cost(&to.0)
    }
}
