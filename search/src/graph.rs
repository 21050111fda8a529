//! `SearchGraph`: the generated-set registry.
//!
//! Owns every node created during a run in an arena, keyed by state. There is
//! exactly one node per distinct state; nodes are never removed and are all
//! released together when the graph is dropped.

use std::collections::BTreeMap;

use crate::contract::SearchState;
use crate::error::SearchError;
use crate::node::{Node, NodeId};

/// Arena of search nodes with a state-keyed index.
#[derive(Debug, Clone)]
pub struct SearchGraph<S> {
    nodes: Vec<Node<S>>,
    index: BTreeMap<S, NodeId>,
}

impl<S: SearchState> SearchGraph<S> {
    /// Create an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            index: BTreeMap::new(),
        }
    }

    /// Fetch the node for `state`, creating it if the state is new.
    ///
    /// A new node gets `g = parent.g + step_cost` (or `0` without a parent)
    /// and `h = state.heuristic()`. An existing node is returned untouched;
    /// cost revision is a separate step. Returns `(id, is_new)`.
    ///
    /// # Errors
    ///
    /// - [`SearchError::NegativeHeuristic`] if a new state's heuristic is `< 0`.
    /// - [`SearchError::NegativeStepCost`] if `step_cost < 0` for a new child.
    /// - [`SearchError::InconsistentStateOrder`] if the index finds a stored
    ///   state that `Ord` calls equal but `==` does not.
    ///
    /// # Panics
    ///
    /// Panics if `parent` is not an id issued by this graph.
    pub fn get_or_create(
        &mut self,
        state: S,
        parent: Option<NodeId>,
        step_cost: i64,
    ) -> Result<(NodeId, bool), SearchError> {
        if let Some(&existing) = self.index.get(&state) {
            let stored = &self.nodes[existing.0].state;
            if *stored != state {
                return Err(SearchError::InconsistentStateOrder {
                    probe: format!("{state:?}"),
                    stored: format!("{stored:?}"),
                });
            }
            return Ok((existing, false));
        }

        let h = state.heuristic();
        if h < 0 {
            return Err(SearchError::NegativeHeuristic {
                state: format!("{state:?}"),
                value: h,
            });
        }

        let g = match parent {
            None => 0,
            Some(p) => {
                let parent_node = &self.nodes[p.0];
                if step_cost < 0 {
                    return Err(SearchError::NegativeStepCost {
                        from: format!("{:?}", parent_node.state),
                        to: format!("{state:?}"),
                        cost: step_cost,
                    });
                }
                parent_node.g.saturating_add(step_cost)
            }
        };

        let id = NodeId(self.nodes.len());
        self.index.insert(state.clone(), id);
        self.nodes.push(Node::new(id, state, g, h, parent));
        Ok((id, true))
    }
}

impl<S: Ord> SearchGraph<S> {
    /// Whether `state` has been generated.
    #[must_use]
    pub fn contains(&self, state: &S) -> bool {
        self.index.contains_key(state)
    }

    /// The node id registered for `state`, if any.
    #[must_use]
    pub fn lookup(&self, state: &S) -> Option<NodeId> {
        self.index.get(state).copied()
    }
}

impl<S> SearchGraph<S> {
    /// The node with `id`, if it exists.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node<S>> {
        self.nodes.get(id.0)
    }

    /// The node with `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not issued by this graph.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &Node<S> {
        &self.nodes[id.0]
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node<S> {
        &mut self.nodes[id.0]
    }

    /// The root node id (the first node created), if any.
    #[must_use]
    pub fn root(&self) -> Option<NodeId> {
        if self.nodes.is_empty() {
            None
        } else {
            Some(NodeId(0))
        }
    }

    /// Number of generated nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &Node<S>> {
        self.nodes.iter()
    }

    /// Follow `parent` links from `id` back to the root.
    ///
    /// Returns ids root first. The walk is capped at the node count, so a
    /// corrupted parent chain yields a truncated path instead of a hang.
    #[must_use]
    pub fn path_to(&self, id: NodeId) -> Vec<NodeId> {
        let mut path = Vec::new();
        let mut current = Some(id);
        while let Some(at) = current {
            if path.len() > self.nodes.len() {
                break;
            }
            path.push(at);
            current = self.nodes[at.0].parent;
        }
        path.reverse();
        path
    }

    /// Whether `ancestor` lies on the parent chain of `of` (inclusive).
    #[must_use]
    pub fn is_ancestor(&self, ancestor: NodeId, of: NodeId) -> bool {
        let mut current = Some(of);
        let mut steps = 0usize;
        while let Some(at) = current {
            if at == ancestor {
                return true;
            }
            steps += 1;
            if steps > self.nodes.len() {
                return false;
            }
            current = self.nodes[at.0].parent;
        }
        false
    }
}

impl<S: SearchState> Default for SearchGraph<S> {
    fn default() -> Self {
        Self::new()
    }
}
