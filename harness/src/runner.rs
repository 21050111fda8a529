//! Harness runner: drives a world through the search engine and packages
//! the result as a [`RunReportV1`].
//!
//! The runner uses ONLY engine APIs: `search`, `TranscriptRecorder`,
//! `SearchOutcome`. It does not implement any search logic itself.
//!
//! # Pipeline
//!
//! ```text
//! policy.validate() → world.start_state()
//!   → search(start, policy, Tee(recorder, caller_trace))
//!   → recorder.finish() → transcript.digest()
//!   → render path → RunReportV1
//! ```

use std::fmt::Display;

use wayfind_kernel::canon::canonical_json_bytes;
use wayfind_kernel::hash::ContentHash;
use wayfind_search::error::SearchError;
use wayfind_search::policy::SearchPolicyV1;
use wayfind_search::search::{search, SearchStats, SearchStatus};
use wayfind_search::trace::{NoopTrace, Tee, TraceSink};
use wayfind_search::transcript::TranscriptRecorder;

use crate::contract::{WorldError, WorldV1};

/// Error during a harness run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunError {
    /// World construction or lookup failed.
    World(WorldError),
    /// The engine rejected the policy or caught a contract violation.
    Search(SearchError),
}

impl std::fmt::Display for RunError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::World(e) => write!(f, "world error: {e}"),
            Self::Search(e) => write!(f, "search error: {e}"),
        }
    }
}

impl std::error::Error for RunError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::World(e) => Some(e),
            Self::Search(e) => Some(e),
        }
    }
}

impl From<WorldError> for RunError {
    fn from(e: WorldError) -> Self {
        Self::World(e)
    }
}

impl From<SearchError> for RunError {
    fn from(e: SearchError) -> Self {
        Self::Search(e)
    }
}

/// Summary of one world run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReportV1 {
    pub world_id: String,
    pub policy_digest: ContentHash,
    pub status: SearchStatus,
    /// States root to goal, rendered with `Display`. `None` without a goal.
    pub path: Option<Vec<String>>,
    pub stats: SearchStats,
    pub node_count: usize,
    pub transcript_digest: ContentHash,
}

impl RunReportV1 {
    /// Termination label (`goal_found`, `exhausted`, `budget_exceeded`).
    #[must_use]
    pub fn termination(&self) -> &'static str {
        self.status.as_str()
    }

    #[must_use]
    pub fn is_goal_reached(&self) -> bool {
        self.path.is_some()
    }

    /// Number of transitions on the solution path.
    #[must_use]
    pub fn path_length(&self) -> Option<usize> {
        self.path.as_ref().map(|p| p.len().saturating_sub(1))
    }

    /// The solution path joined with ` -> `.
    #[must_use]
    pub fn rendered_path(&self) -> Option<String> {
        self.path.as_ref().map(render_path)
    }

    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "node_count": self.node_count,
            "path": self.path,
            "path_length": self.path_length(),
            "policy_digest": self.policy_digest.as_str(),
            "stats": {
                "expansions": self.stats.expansions,
                "frontier_high_water": self.stats.frontier_high_water,
                "nodes_generated": self.stats.nodes_generated,
                "regenerations": self.stats.regenerations,
                "revisions": self.stats.revisions,
                "successors_seen": self.stats.successors_seen,
            },
            "termination": self.termination(),
            "transcript_digest": self.transcript_digest.as_str(),
            "world_id": self.world_id,
        })
    }

    /// Serialize to canonical JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Transcript`] (wrapped) if canonicalization fails.
    pub fn to_canonical_json_bytes(&self) -> Result<Vec<u8>, RunError> {
        canonical_json_bytes(&self.to_json_value()).map_err(|e| {
            RunError::Search(SearchError::Transcript {
                detail: e.to_string(),
            })
        })
    }
}

/// Join states with ` -> `, in the order given.
#[must_use]
pub fn render_path<'a, S, I>(states: I) -> String
where
    S: Display + 'a,
    I: IntoIterator<Item = &'a S>,
{
    states
        .into_iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" -> ")
}

/// Run `world` under `policy` with no extra observer.
///
/// # Errors
///
/// Returns [`RunError::Search`] if the policy is invalid or the world's
/// states break the search contract.
pub fn run_world<W: WorldV1>(world: &W, policy: &SearchPolicyV1) -> Result<RunReportV1, RunError> {
    run_world_traced(world, policy, &mut NoopTrace)
}

/// Run `world` under `policy`, forwarding every trace event to `trace` as
/// well as to the transcript recorder.
///
/// # Errors
///
/// Same as [`run_world`].
pub fn run_world_traced<W: WorldV1>(
    world: &W,
    policy: &SearchPolicyV1,
    trace: &mut dyn TraceSink<W::State>,
) -> Result<RunReportV1, RunError> {
    let mut recorder = TranscriptRecorder::new();
    let outcome = search(world.start_state(), policy, &mut Tee(&mut recorder, trace))?;

    let path = outcome
        .goal_path()
        .map(|states| states.into_iter().map(ToString::to_string).collect());
    let status = outcome.status();
    let stats = outcome.stats();
    let node_count = outcome.graph().len();

    let transcript = recorder.finish(policy, &outcome)?;
    let transcript_digest = transcript.digest()?;

    log::info!(
        "{}: {} after {} expansion(s)",
        world.world_id(),
        status.as_str(),
        stats.expansions
    );

    Ok(RunReportV1 {
        world_id: world.world_id().to_string(),
        policy_digest: policy.digest()?,
        status,
        path,
        stats,
        node_count,
        transcript_digest,
    })
}
