//! Typed search errors.
//!
//! `SearchError` covers pre-flight policy failures and State contract
//! violations. "No path" and "budget exhausted" are regular terminal
//! statuses ([`crate::search::SearchStatus`]), never errors.

/// Typed failure for search setup or a broken State contract.
///
/// State values are carried as their `Debug` rendering so the error stays
/// independent of the state type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// A reserved policy option was selected.
    UnsupportedPolicyMode { detail: String },
    /// A policy field holds a value the engine cannot run with.
    InvalidPolicy { detail: String },
    /// `SearchState::heuristic` returned a negative estimate.
    NegativeHeuristic { state: String, value: i64 },
    /// `SearchState::step_cost` returned a negative cost.
    NegativeStepCost { from: String, to: String, cost: i64 },
    /// `Ord` reported two states equal while `==` disagreed.
    InconsistentStateOrder { probe: String, stored: String },
    /// Canonical serialization of a transcript failed.
    Transcript { detail: String },
}

impl std::fmt::Display for SearchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedPolicyMode { detail } => {
                write!(f, "unsupported policy mode: {detail}")
            }
            Self::InvalidPolicy { detail } => write!(f, "invalid search policy: {detail}"),
            Self::NegativeHeuristic { state, value } => {
                write!(f, "heuristic of {state} is negative ({value})")
            }
            Self::NegativeStepCost { from, to, cost } => {
                write!(f, "step cost {from} -> {to} is negative ({cost})")
            }
            Self::InconsistentStateOrder { probe, stored } => write!(
                f,
                "state order is inconsistent with equality: {probe} compares equal to {stored} but is not =="
            ),
            Self::Transcript { detail } => write!(f, "transcript serialization failed: {detail}"),
        }
    }
}

impl std::error::Error for SearchError {}
