//! Search nodes and the frontier ordering key.

/// Stable index of a node in the search graph arena.
///
/// Ids are assigned in creation order starting at 0 (the root), so they also
/// serve as the deterministic creation counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Position of the node in the arena.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// Where a node is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodePhase {
    /// Generated, waiting in the frontier.
    Frontier,
    /// Popped and expanded. Never re-enters the frontier.
    Expanded,
}

/// A search-graph vertex wrapping one state.
///
/// `h` is fixed at creation. `g` only ever decreases; `f` is always derived.
/// `parent` and `children` are arena indices, never owning links.
#[derive(Debug, Clone)]
pub struct Node<S> {
    pub(crate) id: NodeId,
    pub(crate) state: S,
    pub(crate) g: i64,
    pub(crate) h: i64,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) phase: NodePhase,
    pub(crate) revisions: u32,
}

impl<S> Node<S> {
    pub(crate) fn new(id: NodeId, state: S, g: i64, h: i64, parent: Option<NodeId>) -> Self {
        Self {
            id,
            state,
            g,
            h,
            parent,
            children: Vec::new(),
            phase: NodePhase::Frontier,
            revisions: 0,
        }
    }

    #[must_use]
    pub fn id(&self) -> NodeId {
        self.id
    }

    #[must_use]
    pub fn state(&self) -> &S {
        &self.state
    }

    /// Cheapest known path cost from the root.
    #[must_use]
    pub fn g(&self) -> i64 {
        self.g
    }

    /// Heuristic estimate computed when the node was created.
    #[must_use]
    pub fn h(&self) -> i64 {
        self.h
    }

    /// Total projected cost `g + h` (the frontier ordering key).
    #[must_use]
    pub fn f(&self) -> i64 {
        self.g.saturating_add(self.h)
    }

    /// Current best-known parent (`None` only for the root).
    #[must_use]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Nodes generated while this node was expanded, in generation order.
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    #[must_use]
    pub fn phase(&self) -> NodePhase {
        self.phase
    }

    /// Number of times a cheaper path lowered this node's `g`.
    #[must_use]
    pub fn revisions(&self) -> u32 {
        self.revisions
    }

    /// Whether the node's cost was ever improved in place.
    #[must_use]
    pub fn is_revised(&self) -> bool {
        self.revisions > 0
    }

    #[must_use]
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

/// The frontier ordering key: `(f_cost, seq)`.
///
/// Lower `f_cost` first; ties go to the entry inserted earlier. `seq` is
/// assigned by the frontier on every insert and re-key, so keys are unique.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrontierKey {
    pub f_cost: i64,
    pub seq: u64,
}
