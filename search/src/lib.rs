//! Wayfind Search: a generic A* engine with in-place cost revision.
//!
//! Depends only on `wayfind_kernel` (for canonical transcript bytes).
//!
//! # Crate dependency graph
//!
//! ```text
//! wayfind_kernel  ←  wayfind_search  ←  wayfind_harness
//! (canon, hash)      (engine)            (worlds, runner, program)
//! ```
//!
//! # Key types
//!
//! - [`contract::SearchState`] -- what a domain must implement
//! - [`graph::SearchGraph`] -- one node per distinct state, arena-owned
//! - [`frontier::Frontier`] -- `f`-ordered queue with logarithmic re-key
//! - [`search::SearchDriver`] -- the expand / generate / revise loop
//! - [`trace::TraceSink`] -- observational hooks ([`trace::LogTrace`],
//!   [`transcript::TranscriptRecorder`])
//! - [`policy::SearchPolicyV1`] -- goal test, revision and budget options
//!
//! # Known limitations
//!
//! - Optimality requires an admissible heuristic; it is not checked.
//! - With the default policy the first *generated* goal ends the search.
//! - Cost revision propagates only through recorded children, not through
//!   every graph edge of an improved node.

#![forbid(unsafe_code)]

pub mod contract;
pub mod error;
pub mod frontier;
pub mod graph;
pub mod node;
pub mod policy;
pub mod search;
pub mod trace;
pub mod transcript;
