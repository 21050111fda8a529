//! Search driver: the expand / generate / revise loop.
//!
//! The driver owns the graph and the frontier for exactly one run. Each
//! [`SearchDriver::step`] pops the best frontier entry, generates its
//! successors, registers new nodes and offers a cost revision to nodes that
//! already exist. The run ends in one of three terminal statuses; none of
//! them is an error.

use crate::contract::SearchState;
use crate::error::SearchError;
use crate::frontier::Frontier;
use crate::graph::SearchGraph;
use crate::node::{Node, NodeId, NodePhase};
use crate::policy::{GoalTestV1, RevisionPolicyV1, SearchPolicyV1};
use crate::trace::{FrontierView, TraceSink};

/// Driver state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStatus {
    /// More expansions are possible.
    Running,
    /// A goal node was reached.
    GoalFound { node: NodeId },
    /// The frontier emptied without a goal ("no solution reachable").
    Exhausted,
    /// `max_expansions` was hit before a goal or exhaustion.
    BudgetExceeded { expansions: u64 },
}

impl SearchStatus {
    #[must_use]
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Running)
    }

    /// The goal node, when the status is `GoalFound`.
    #[must_use]
    pub fn goal(self) -> Option<NodeId> {
        match self {
            Self::GoalFound { node } => Some(node),
            _ => None,
        }
    }

    /// Stable label used in transcripts and fixture output.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::GoalFound { .. } => "goal_found",
            Self::Exhausted => "exhausted",
            Self::BudgetExceeded { .. } => "budget_exceeded",
        }
    }
}

/// Counters collected over one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Frontier pops.
    pub expansions: u64,
    /// Successor states considered (after self-loop and predecessor skips).
    pub successors_seen: u64,
    /// Nodes created, root included.
    pub nodes_generated: u64,
    /// Successors that mapped to an existing node.
    pub regenerations: u64,
    /// Individual `g` decreases, top-level and propagated.
    pub revisions: u64,
    /// Largest frontier size observed.
    pub frontier_high_water: u64,
}

/// A single search run over states of type `S`.
#[derive(Debug)]
pub struct SearchDriver<S> {
    graph: SearchGraph<S>,
    frontier: Frontier,
    policy: SearchPolicyV1,
    status: SearchStatus,
    stats: SearchStats,
    /// Set when `new` found the start state to be a goal; `on_goal` is
    /// reported by the first `step`.
    goal_unreported: bool,
}

impl<S: SearchState> SearchDriver<S> {
    /// Validate `policy` and seed graph and frontier with the root.
    ///
    /// Under [`GoalTestV1::OnGeneration`] a start state that is already a
    /// goal is never generated, so it is tested here and the driver starts
    /// in `GoalFound`.
    ///
    /// # Errors
    ///
    /// Policy validation failures, or [`SearchError::NegativeHeuristic`] for
    /// the start state.
    pub fn new(start: S, policy: SearchPolicyV1) -> Result<Self, SearchError> {
        policy.validate()?;

        let mut graph = SearchGraph::new();
        let (root, _) = graph.get_or_create(start, None, 0)?;
        let mut frontier = Frontier::new();
        frontier.insert(root, graph.node(root).f());

        let root_is_goal =
            policy.goal_test == GoalTestV1::OnGeneration && graph.node(root).state().is_goal();
        let status = if root_is_goal {
            SearchStatus::GoalFound { node: root }
        } else {
            SearchStatus::Running
        };

        Ok(Self {
            graph,
            frontier,
            policy,
            status,
            stats: SearchStats {
                nodes_generated: 1,
                ..SearchStats::default()
            },
            goal_unreported: root_is_goal,
        })
    }

    /// Advance by one expansion (or one terminal transition).
    ///
    /// Once a terminal status is reached further calls return it unchanged.
    ///
    /// # Errors
    ///
    /// A State contract violation detected while expanding.
    pub fn step(&mut self, trace: &mut dyn TraceSink<S>) -> Result<SearchStatus, SearchError> {
        if self.goal_unreported {
            self.goal_unreported = false;
            if let Some(goal) = self.status.goal() {
                trace.on_goal(self.graph.node(goal));
            }
        }
        if self.status.is_terminal() {
            return Ok(self.status);
        }

        if self.frontier.is_empty() {
            self.status = SearchStatus::Exhausted;
            trace.on_exhausted();
            return Ok(self.status);
        }

        if let Some(max) = self.policy.max_expansions {
            if self.stats.expansions >= max {
                self.status = SearchStatus::BudgetExceeded {
                    expansions: self.stats.expansions,
                };
                trace.on_budget_exceeded(self.stats.expansions);
                return Ok(self.status);
            }
        }

        trace.on_frontier_snapshot(&FrontierView::new(&self.graph, &self.frontier));

        let Some(current) = self.frontier.pop_min() else {
            self.status = SearchStatus::Exhausted;
            trace.on_exhausted();
            return Ok(self.status);
        };
        self.graph.node_mut(current).phase = NodePhase::Expanded;
        self.stats.expansions += 1;
        trace.on_expand(self.graph.node(current));

        if self.policy.goal_test == GoalTestV1::OnExpansion
            && self.graph.node(current).state().is_goal()
        {
            return Ok(self.finish_goal(current, trace));
        }

        self.expand(current, trace)?;
        Ok(self.status)
    }

    /// Step until a terminal status and hand back the result.
    ///
    /// # Errors
    ///
    /// A State contract violation detected while expanding.
    pub fn run(mut self, trace: &mut dyn TraceSink<S>) -> Result<SearchOutcome<S>, SearchError> {
        log::debug!(
            "search start: root {:?}, policy {}",
            self.graph.node(NodeId(0)).state(),
            self.policy.to_json()
        );
        while !self.step(trace)?.is_terminal() {}
        self.stats.frontier_high_water = self.frontier.high_water();
        log::debug!(
            "search end: {} after {} expansion(s), {} node(s)",
            self.status.as_str(),
            self.stats.expansions,
            self.graph.len()
        );
        Ok(SearchOutcome {
            graph: self.graph,
            status: self.status,
            stats: self.stats,
        })
    }

    fn expand(&mut self, current: NodeId, trace: &mut dyn TraceSink<S>) -> Result<(), SearchError> {
        let node = self.graph.node(current);
        let successors = node.state().successors();
        let predecessor = node.parent().map(|p| self.graph.node(p).state().clone());

        for successor in successors {
            let node = self.graph.node(current);
            if successor == *node.state() {
                continue;
            }
            if self.policy.skip_predecessor && predecessor.as_ref() == Some(&successor) {
                continue;
            }

            let cost = node.state().step_cost(&successor);
            if cost < 0 {
                return Err(SearchError::NegativeStepCost {
                    from: format!("{:?}", node.state()),
                    to: format!("{successor:?}"),
                    cost,
                });
            }
            // Read g per successor: a revision earlier in this loop may have
            // lowered it.
            let candidate_g = node.g().saturating_add(cost);
            self.stats.successors_seen += 1;

            let (id, is_new) = self.graph.get_or_create(successor, Some(current), cost)?;
            let mut was_updated = false;
            if is_new {
                self.stats.nodes_generated += 1;
                self.frontier.insert(id, self.graph.node(id).f());
            } else {
                self.stats.regenerations += 1;
                was_updated = self.revise(id, current, candidate_g, trace)?;
            }

            self.graph.node_mut(current).children.push(id);
            trace.on_generate(self.graph.node(id), is_new, was_updated);

            if is_new
                && self.policy.goal_test == GoalTestV1::OnGeneration
                && self.graph.node(id).state().is_goal()
            {
                self.finish_goal(id, trace);
                return Ok(());
            }
        }
        Ok(())
    }

    /// Offer `target` a path through `via` costing `new_g`.
    ///
    /// On improvement the node is re-parented and re-keyed, and the new cost
    /// is pushed depth-first through its recorded children. Only the children
    /// list is followed, so descendants reachable by edges that were never
    /// recorded keep their old cost. Returns whether `target` itself changed.
    fn revise(
        &mut self,
        target: NodeId,
        via: NodeId,
        new_g: i64,
        trace: &mut dyn TraceSink<S>,
    ) -> Result<bool, SearchError> {
        if self.policy.revision == RevisionPolicyV1::Disabled
            || new_g >= self.graph.node(target).g()
        {
            return Ok(false);
        }

        let mut revised_target = false;
        let mut work = vec![(target, via, new_g)];
        while let Some((id, parent, g)) = work.pop() {
            if g >= self.graph.node(id).g() {
                continue;
            }
            // Re-parenting onto a descendant would close a parent cycle.
            // Non-negative costs keep g non-decreasing down a parent chain,
            // so only a graph whose costs were altered by hand gets here.
            if self.graph.is_ancestor(id, parent) {
                log::warn!("skipping revision of {id}: {parent} is its descendant");
                continue;
            }

            let node = self.graph.node_mut(id);
            let old_g = node.g;
            let old_f = node.f();
            node.g = g;
            node.parent = Some(parent);
            node.revisions += 1;

            let node = self.graph.node(id);
            self.frontier.re_key(id, old_f, node.f());
            self.stats.revisions += 1;
            revised_target |= id == target;
            trace.on_revise(node, old_g);

            // Reverse so the first recorded child is revised first.
            for &child in node.children().iter().rev() {
                let child_state = self.graph.node(child).state();
                let cost = node.state().step_cost(child_state);
                if cost < 0 {
                    return Err(SearchError::NegativeStepCost {
                        from: format!("{:?}", node.state()),
                        to: format!("{child_state:?}"),
                        cost,
                    });
                }
                work.push((child, id, g.saturating_add(cost)));
            }
        }
        Ok(revised_target)
    }

    fn finish_goal(&mut self, goal: NodeId, trace: &mut dyn TraceSink<S>) -> SearchStatus {
        self.status = SearchStatus::GoalFound { node: goal };
        trace.on_goal(self.graph.node(goal));
        self.status
    }
}

impl<S> SearchDriver<S> {
    #[must_use]
    pub fn status(&self) -> SearchStatus {
        self.status
    }

    #[must_use]
    pub fn graph(&self) -> &SearchGraph<S> {
        &self.graph
    }

    #[must_use]
    pub fn frontier(&self) -> &Frontier {
        &self.frontier
    }

    #[must_use]
    pub fn policy(&self) -> &SearchPolicyV1 {
        &self.policy
    }

    /// Counters so far. `frontier_high_water` is filled in by `run`.
    #[must_use]
    pub fn stats(&self) -> SearchStats {
        SearchStats {
            frontier_high_water: self.frontier.high_water(),
            ..self.stats
        }
    }
}

/// Result of a finished run. Owns every node the run created.
#[derive(Debug, Clone)]
pub struct SearchOutcome<S> {
    graph: SearchGraph<S>,
    status: SearchStatus,
    stats: SearchStats,
}

impl<S> SearchOutcome<S> {
    #[must_use]
    pub fn status(&self) -> SearchStatus {
        self.status
    }

    #[must_use]
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    #[must_use]
    pub fn graph(&self) -> &SearchGraph<S> {
        &self.graph
    }

    #[must_use]
    pub fn into_graph(self) -> SearchGraph<S> {
        self.graph
    }

    #[must_use]
    pub fn is_goal_reached(&self) -> bool {
        self.status.goal().is_some()
    }

    /// The goal node, if one was reached.
    #[must_use]
    pub fn goal(&self) -> Option<&Node<S>> {
        self.status.goal().map(|id| self.graph.node(id))
    }

    /// Node ids from root to goal.
    #[must_use]
    pub fn goal_path_ids(&self) -> Option<Vec<NodeId>> {
        self.status.goal().map(|id| self.graph.path_to(id))
    }

    /// States from root to goal, following `parent` links.
    #[must_use]
    pub fn goal_path(&self) -> Option<Vec<&S>> {
        self.goal_path_ids().map(|ids| {
            ids.into_iter()
                .map(|id| self.graph.node(id).state())
                .collect()
        })
    }

    /// Number of transitions on the goal path.
    #[must_use]
    pub fn path_length(&self) -> Option<usize> {
        self.goal_path_ids().map(|ids| ids.len().saturating_sub(1))
    }
}

/// Run a complete search from `start`.
///
/// # Errors
///
/// Pre-flight policy errors and State contract violations. Failing to find
/// a goal is reported through [`SearchOutcome::status`], not as an error.
pub fn search<S: SearchState>(
    start: S,
    policy: &SearchPolicyV1,
    trace: &mut dyn TraceSink<S>,
) -> Result<SearchOutcome<S>, SearchError> {
    SearchDriver::new(start, policy.clone())?.run(trace)
}
