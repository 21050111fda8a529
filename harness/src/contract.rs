//! World contract: the minimal trait a world must implement.
//!
//! A world names itself and hands out its start state. Everything about
//! moves, goals and costs lives on the state type. Worlds may NOT drive the
//! search, record transcripts or compute digests (those are runner
//! concerns).

use std::fmt::Display;

use wayfind_search::contract::{SearchState, UniformCost};

/// Typed failure for world construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorldError {
    /// A road or endpoint names a stop that was never declared.
    UnknownStop { name: String },
    /// The same stop name was declared twice.
    DuplicateStop { name: String },
    /// No start stop was declared.
    MissingStart,
    /// No goal stop was declared.
    MissingGoal,
}

impl std::fmt::Display for WorldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownStop { name } => write!(f, "unknown stop {name:?}"),
            Self::DuplicateStop { name } => write!(f, "stop {name:?} declared twice"),
            Self::MissingStart => write!(f, "no start stop declared"),
            Self::MissingGoal => write!(f, "no goal stop declared"),
        }
    }
}

impl std::error::Error for WorldError {}

/// The contract a world must implement to be run by the harness runner.
///
/// `State` must render for humans (`Display`) since the runner reports the
/// solution path as text.
pub trait WorldV1 {
    type State: SearchState + Display;

    /// Unique world identifier (e.g., `"river_crossing"`).
    fn world_id(&self) -> &str;

    /// The state the search starts from.
    fn start_state(&self) -> Self::State;
}

/// Runs the wrapped world with a zero heuristic (uniform-cost search).
#[derive(Debug, Clone, Copy, Default)]
pub struct Uniform<W>(pub W);

impl<W: WorldV1> WorldV1 for Uniform<W> {
    type State = UniformCost<W::State>;

    fn world_id(&self) -> &str {
        self.0.world_id()
    }

    fn start_state(&self) -> Self::State {
        UniformCost(self.0.start_state())
    }
}
