//! Search policy types.

use wayfind_kernel::canon::canonical_json_bytes;
use wayfind_kernel::hash::{canonical_hash, ContentHash, HashDomain};

use crate::error::SearchError;

/// Search configuration.
///
/// The default reproduces the classic engine: stop at the first generated
/// goal, skip a move straight back to the parent, propagate cost revisions
/// through recorded children, no expansion budget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPolicyV1 {
    /// When a goal state ends the search.
    pub goal_test: GoalTestV1,
    /// Skip a successor equal to the expanded node's parent state.
    pub skip_predecessor: bool,
    /// How a cheaper path to an existing node is handled.
    pub revision: RevisionPolicyV1,
    /// Hard cap on expansions (`None` = unbounded).
    pub max_expansions: Option<u64>,
}

impl SearchPolicyV1 {
    /// Pre-flight validation.
    ///
    /// # Errors
    ///
    /// - [`SearchError::UnsupportedPolicyMode`] for the reserved
    ///   [`RevisionPolicyV1::FullRelaxation`].
    /// - [`SearchError::InvalidPolicy`] for `max_expansions == Some(0)`.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.revision == RevisionPolicyV1::FullRelaxation {
            return Err(SearchError::UnsupportedPolicyMode {
                detail: "RevisionPolicyV1::FullRelaxation is reserved".into(),
            });
        }
        if self.max_expansions == Some(0) {
            return Err(SearchError::InvalidPolicy {
                detail: "max_expansions must be at least 1 when set".into(),
            });
        }
        Ok(())
    }

    /// JSON form used for transcripts and digests.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "goal_test": self.goal_test.as_str(),
            "max_expansions": self.max_expansions,
            "revision": self.revision.as_str(),
            "skip_predecessor": self.skip_predecessor,
        })
    }

    /// Content digest of the canonical JSON form.
    ///
    /// # Errors
    ///
    /// [`SearchError::InvalidPolicy`] if the JSON form cannot be
    /// canonicalised.
    pub fn digest(&self) -> Result<ContentHash, SearchError> {
        let bytes = canonical_json_bytes(&self.to_json()).map_err(|e| SearchError::InvalidPolicy {
            detail: format!("policy is not canonical JSON: {e}"),
        })?;
        Ok(canonical_hash(HashDomain::SearchPolicy, &bytes))
    }
}

impl Default for SearchPolicyV1 {
    fn default() -> Self {
        Self {
            goal_test: GoalTestV1::OnGeneration,
            skip_predecessor: true,
            revision: RevisionPolicyV1::RecordedChildren,
            max_expansions: None,
        }
    }
}

/// When a goal ends the search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoalTestV1 {
    /// The first newly generated goal node wins. Optimal only when that goal
    /// would also have been the next minimum popped.
    OnGeneration,
    /// Strict A* termination: the popped minimum is tested.
    OnExpansion,
}

impl GoalTestV1 {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::OnGeneration => "on_generation",
            Self::OnExpansion => "on_expansion",
        }
    }
}

/// Handling of a cheaper path to an already generated node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevisionPolicyV1 {
    /// Lower `g`, re-parent, re-key, and push the improvement through the
    /// node's recorded children. Propagation does not follow graph edges
    /// that were never recorded as children.
    RecordedChildren,
    /// The first cost found for a node is final.
    Disabled,
    /// Reserved. Selecting this is a hard error.
    FullRelaxation,
}

impl RevisionPolicyV1 {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::RecordedChildren => "recorded_children",
            Self::Disabled => "disabled",
            Self::FullRelaxation => "full_relaxation",
        }
    }
}
