//! Observational trace hooks for the search loop.
//!
//! A [`TraceSink`] sees every frontier snapshot, expansion, generation,
//! revision and terminal event. Nothing a sink does can influence the
//! search: hooks take shared references and return nothing.

use crate::frontier::Frontier;
use crate::graph::SearchGraph;
use crate::node::{FrontierKey, Node, NodeId};

/// Read-only view of the frontier at the start of an iteration.
pub struct FrontierView<'a, S> {
    graph: &'a SearchGraph<S>,
    frontier: &'a Frontier,
}

impl<'a, S> FrontierView<'a, S> {
    pub(crate) fn new(graph: &'a SearchGraph<S>, frontier: &'a Frontier) -> Self {
        Self { graph, frontier }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.frontier.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frontier.is_empty()
    }

    /// Frontier entries in pop order.
    pub fn entries(&self) -> impl Iterator<Item = (FrontierKey, &'a Node<S>)> + 'a {
        let graph = self.graph;
        self.frontier
            .iter()
            .map(move |(key, id)| (key, graph.node(id)))
    }

    /// Node ids in pop order.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + 'a {
        let frontier = self.frontier;
        frontier.iter().map(|(_, id)| id)
    }
}

/// Event hooks called by the search driver. All default to no-ops.
pub trait TraceSink<S> {
    /// Called before each pop with the full frontier.
    fn on_frontier_snapshot(&mut self, _frontier: &FrontierView<'_, S>) {}

    /// A node was popped and is about to be expanded.
    fn on_expand(&mut self, _node: &Node<S>) {}

    /// A successor was fetched or created. `was_updated` is true when an
    /// existing node's cost was revised by this generation.
    fn on_generate(&mut self, _node: &Node<S>, _is_new: bool, _was_updated: bool) {}

    /// A node's `g` was lowered from `old_g` (top-level or propagated).
    fn on_revise(&mut self, _node: &Node<S>, _old_g: i64) {}

    /// The search ended at this goal node.
    fn on_goal(&mut self, _node: &Node<S>) {}

    /// The frontier emptied with no goal.
    fn on_exhausted(&mut self) {}

    /// The expansion budget ran out.
    fn on_budget_exceeded(&mut self, _expansions: u64) {}
}

/// Sink that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTrace;

impl<S> TraceSink<S> for NoopTrace {}

/// Sink that forwards every event to the `log` facade.
///
/// Frontier snapshots go to `trace`, expansion and generation to `debug`,
/// terminal events to `info`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogTrace;

impl<S: std::fmt::Debug> TraceSink<S> for LogTrace {
    fn on_frontier_snapshot(&mut self, frontier: &FrontierView<'_, S>) {
        if !log::log_enabled!(log::Level::Trace) {
            return;
        }
        log::trace!("frontier holds {} node(s)", frontier.len());
        for (key, node) in frontier.entries() {
            log::trace!(
                "  {} {:?} h={} g={} f={}",
                node.id(),
                node.state(),
                node.h(),
                node.g(),
                key.f_cost
            );
        }
    }

    fn on_expand(&mut self, node: &Node<S>) {
        log::debug!("expand {} {:?} g={}", node.id(), node.state(), node.g());
    }

    fn on_generate(&mut self, node: &Node<S>, is_new: bool, was_updated: bool) {
        let kind = match (is_new, was_updated) {
            (true, _) => "new node",
            (false, true) => "regenerated, updated",
            (false, false) => "regenerated, no update",
        };
        log::debug!(
            "generated {} {:?} ({kind}) g={} h={} f={}",
            node.id(),
            node.state(),
            node.g(),
            node.h(),
            node.f()
        );
    }

    fn on_revise(&mut self, node: &Node<S>, old_g: i64) {
        log::debug!("revised {} g {old_g} -> {}", node.id(), node.g());
    }

    fn on_goal(&mut self, node: &Node<S>) {
        log::info!("goal reached at {} {:?} g={}", node.id(), node.state(), node.g());
    }

    fn on_exhausted(&mut self) {
        log::info!("frontier exhausted, no path to goal");
    }

    fn on_budget_exceeded(&mut self, expansions: u64) {
        log::info!("expansion budget exhausted after {expansions} expansion(s)");
    }
}

impl<S, T: TraceSink<S> + ?Sized> TraceSink<S> for &mut T {
    fn on_frontier_snapshot(&mut self, frontier: &FrontierView<'_, S>) {
        (**self).on_frontier_snapshot(frontier);
    }

    fn on_expand(&mut self, node: &Node<S>) {
        (**self).on_expand(node);
    }

    fn on_generate(&mut self, node: &Node<S>, is_new: bool, was_updated: bool) {
        (**self).on_generate(node, is_new, was_updated);
    }

    fn on_revise(&mut self, node: &Node<S>, old_g: i64) {
        (**self).on_revise(node, old_g);
    }

    fn on_goal(&mut self, node: &Node<S>) {
        (**self).on_goal(node);
    }

    fn on_exhausted(&mut self) {
        (**self).on_exhausted();
    }

    fn on_budget_exceeded(&mut self, expansions: u64) {
        (**self).on_budget_exceeded(expansions);
    }
}

/// Sink that forwards every event to two sinks, first `.0` then `.1`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Tee<A, B>(pub A, pub B);

impl<S, A: TraceSink<S>, B: TraceSink<S>> TraceSink<S> for Tee<A, B> {
    fn on_frontier_snapshot(&mut self, frontier: &FrontierView<'_, S>) {
        self.0.on_frontier_snapshot(frontier);
        self.1.on_frontier_snapshot(frontier);
    }

    fn on_expand(&mut self, node: &Node<S>) {
        self.0.on_expand(node);
        self.1.on_expand(node);
    }

    fn on_generate(&mut self, node: &Node<S>, is_new: bool, was_updated: bool) {
        self.0.on_generate(node, is_new, was_updated);
        self.1.on_generate(node, is_new, was_updated);
    }

    fn on_revise(&mut self, node: &Node<S>, old_g: i64) {
        self.0.on_revise(node, old_g);
        self.1.on_revise(node, old_g);
    }

    fn on_goal(&mut self, node: &Node<S>) {
        self.0.on_goal(node);
        self.1.on_goal(node);
    }

    fn on_exhausted(&mut self) {
        self.0.on_exhausted();
        self.1.on_exhausted();
    }

    fn on_budget_exceeded(&mut self, expansions: u64) {
        self.0.on_budget_exceeded(expansions);
        self.1.on_budget_exceeded(expansions);
    }
}
