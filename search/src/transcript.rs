//! `SearchTranscriptV1`: a machine-checkable record of one search run.
//!
//! [`TranscriptRecorder`] is a [`TraceSink`] that keeps every hook call as a
//! [`TranscriptEventV1`]. Finishing it against the outcome yields a
//! transcript whose canonical JSON bytes (and therefore digest) are identical
//! for identical runs. States appear as their `Debug` rendering.

use wayfind_kernel::canon::canonical_json_bytes;
use wayfind_kernel::hash::{canonical_hash, ContentHash, HashDomain};

use crate::error::SearchError;
use crate::node::Node;
use crate::policy::SearchPolicyV1;
use crate::search::{SearchOutcome, SearchStats, SearchStatus};
use crate::trace::{FrontierView, TraceSink};

/// One frontier entry as seen in a snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontierEntryV1 {
    pub node_id: usize,
    pub g: i64,
    pub h: i64,
    pub f: i64,
}

/// A recorded trace event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranscriptEventV1 {
    FrontierSnapshot {
        entries: Vec<FrontierEntryV1>,
    },
    Expand {
        node_id: usize,
        state: String,
        g: i64,
    },
    Generate {
        node_id: usize,
        state: String,
        is_new: bool,
        was_updated: bool,
        g: i64,
        h: i64,
    },
    Revise {
        node_id: usize,
        old_g: i64,
        new_g: i64,
        parent: Option<usize>,
    },
    Goal {
        node_id: usize,
        g: i64,
    },
    Exhausted,
    BudgetExceeded {
        expansions: u64,
    },
}

/// Trace sink that records every event in order.
#[derive(Debug, Clone, Default)]
pub struct TranscriptRecorder {
    events: Vec<TranscriptEventV1>,
}

impl TranscriptRecorder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Events recorded so far.
    #[must_use]
    pub fn events(&self) -> &[TranscriptEventV1] {
        &self.events
    }

    /// Bind the recorded events to the run's policy and outcome.
    ///
    /// # Errors
    ///
    /// The policy digest cannot be computed.
    pub fn finish<S>(
        self,
        policy: &SearchPolicyV1,
        outcome: &SearchOutcome<S>,
    ) -> Result<SearchTranscriptV1, SearchError> {
        let path = outcome
            .goal_path_ids()
            .map(|ids| ids.into_iter().map(|id| id.index()).collect());
        Ok(SearchTranscriptV1 {
            policy_digest: policy.digest()?,
            events: self.events,
            status: outcome.status(),
            stats: outcome.stats(),
            node_count: outcome.graph().len(),
            goal_path: path,
        })
    }
}

fn label<S: std::fmt::Debug>(node: &Node<S>) -> String {
    format!("{:?}", node.state())
}

impl<S: std::fmt::Debug> TraceSink<S> for TranscriptRecorder {
    fn on_frontier_snapshot(&mut self, frontier: &FrontierView<'_, S>) {
        let entries = frontier
            .entries()
            .map(|(key, node)| FrontierEntryV1 {
                node_id: node.id().index(),
                g: node.g(),
                h: node.h(),
                f: key.f_cost,
            })
            .collect();
        self.events
            .push(TranscriptEventV1::FrontierSnapshot { entries });
    }

    fn on_expand(&mut self, node: &Node<S>) {
        self.events.push(TranscriptEventV1::Expand {
            node_id: node.id().index(),
            state: label(node),
            g: node.g(),
        });
    }

    fn on_generate(&mut self, node: &Node<S>, is_new: bool, was_updated: bool) {
        self.events.push(TranscriptEventV1::Generate {
            node_id: node.id().index(),
            state: label(node),
            is_new,
            was_updated,
            g: node.g(),
            h: node.h(),
        });
    }

    fn on_revise(&mut self, node: &Node<S>, old_g: i64) {
        self.events.push(TranscriptEventV1::Revise {
            node_id: node.id().index(),
            old_g,
            new_g: node.g(),
            parent: node.parent().map(crate::node::NodeId::index),
        });
    }

    fn on_goal(&mut self, node: &Node<S>) {
        self.events.push(TranscriptEventV1::Goal {
            node_id: node.id().index(),
            g: node.g(),
        });
    }

    fn on_exhausted(&mut self) {
        self.events.push(TranscriptEventV1::Exhausted);
    }

    fn on_budget_exceeded(&mut self, expansions: u64) {
        self.events
            .push(TranscriptEventV1::BudgetExceeded { expansions });
    }
}

/// A finished transcript.
#[derive(Debug, Clone)]
pub struct SearchTranscriptV1 {
    pub policy_digest: ContentHash,
    pub events: Vec<TranscriptEventV1>,
    pub status: SearchStatus,
    pub stats: SearchStats,
    pub node_count: usize,
    /// Node ids root to goal, when a goal was reached.
    pub goal_path: Option<Vec<usize>>,
}

impl SearchTranscriptV1 {
    /// Serialize to canonical JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Transcript`] if canonicalization fails.
    pub fn to_canonical_json_bytes(&self) -> Result<Vec<u8>, SearchError> {
        canonical_json_bytes(&self.to_json_value()).map_err(|e| SearchError::Transcript {
            detail: e.to_string(),
        })
    }

    /// Content digest of the canonical bytes.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Transcript`] if canonicalization fails.
    pub fn digest(&self) -> Result<ContentHash, SearchError> {
        let bytes = self.to_canonical_json_bytes()?;
        Ok(canonical_hash(HashDomain::SearchTranscript, &bytes))
    }

    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "events": self.events.iter().map(event_to_json).collect::<Vec<_>>(),
            "goal_path": self.goal_path,
            "node_count": self.node_count,
            "policy_digest": self.policy_digest.as_str(),
            "stats": stats_to_json(&self.stats),
            "status": status_to_json(self.status),
        })
    }
}

fn event_to_json(e: &TranscriptEventV1) -> serde_json::Value {
    match e {
        TranscriptEventV1::FrontierSnapshot { entries } => serde_json::json!({
            "entries": entries
                .iter()
                .map(|x| serde_json::json!({"f": x.f, "g": x.g, "h": x.h, "node_id": x.node_id}))
                .collect::<Vec<_>>(),
            "type": "frontier_snapshot",
        }),
        TranscriptEventV1::Expand { node_id, state, g } => {
            serde_json::json!({"g": g, "node_id": node_id, "state": state, "type": "expand"})
        }
        TranscriptEventV1::Generate {
            node_id,
            state,
            is_new,
            was_updated,
            g,
            h,
        } => serde_json::json!({
            "g": g,
            "h": h,
            "is_new": is_new,
            "node_id": node_id,
            "state": state,
            "type": "generate",
            "was_updated": was_updated,
        }),
        TranscriptEventV1::Revise {
            node_id,
            old_g,
            new_g,
            parent,
        } => serde_json::json!({
            "new_g": new_g,
            "node_id": node_id,
            "old_g": old_g,
            "parent": parent,
            "type": "revise",
        }),
        TranscriptEventV1::Goal { node_id, g } => {
            serde_json::json!({"g": g, "node_id": node_id, "type": "goal"})
        }
        TranscriptEventV1::Exhausted => serde_json::json!({"type": "exhausted"}),
        TranscriptEventV1::BudgetExceeded { expansions } => {
            serde_json::json!({"expansions": expansions, "type": "budget_exceeded"})
        }
    }
}

fn status_to_json(s: SearchStatus) -> serde_json::Value {
    match s {
        SearchStatus::GoalFound { node } => {
            serde_json::json!({"node_id": node.index(), "type": s.as_str()})
        }
        SearchStatus::BudgetExceeded { expansions } => {
            serde_json::json!({"expansions": expansions, "type": s.as_str()})
        }
        SearchStatus::Running | SearchStatus::Exhausted => serde_json::json!({"type": s.as_str()}),
    }
}

fn stats_to_json(s: &SearchStats) -> serde_json::Value {
    serde_json::json!({
        "expansions": s.expansions,
        "frontier_high_water": s.frontier_high_water,
        "nodes_generated": s.nodes_generated,
        "regenerations": s.regenerations,
        "revisions": s.revisions,
        "successors_seen": s.successors_seen,
    })
}
