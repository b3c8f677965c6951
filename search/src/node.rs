//! Search nodes, the per-invocation node arena, and the frontier ordering key.

use crate::contract::Cost;

/// Handle of a node inside a [`NodeArena`].
///
/// Parent links are plain handles: the arena alone owns node storage and is
/// discarded wholesale when the search invocation returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// Arena index of the node.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An immutable search node.
///
/// Costs are attached with [`SearchNode::with_costs`] before the node is
/// stored; once a node is in the arena its costs never change. A cheaper path
/// to the same state is a new node.
#[derive(Debug, Clone)]
pub struct SearchNode<S, A> {
    /// Full state at this node.
    pub state: S,
    /// Parent handle (`None` for the root).
    pub parent: Option<NodeId>,
    /// The action that produced this node from its parent (`None` for the root).
    pub action: Option<A>,
    /// Cumulative path cost from the root.
    pub g: Cost,
    /// Heuristic estimate, computed once at creation.
    pub h: Cost,
}

impl<S, A> SearchNode<S, A> {
    /// The root node for `state` (`g = 0`).
    #[must_use]
    pub fn root(state: S) -> Self {
        Self {
            state,
            parent: None,
            action: None,
            g: 0,
            h: 0,
        }
    }

    /// A child of `parent` reached by `action`. Costs start at zero.
    #[must_use]
    pub fn child(parent: NodeId, state: S, action: A) -> Self {
        Self {
            state,
            parent: Some(parent),
            action: Some(action),
            g: 0,
            h: 0,
        }
    }

    /// Attach path cost and heuristic estimate.
    #[must_use]
    pub fn with_costs(mut self, g: Cost, h: Cost) -> Self {
        self.g = g;
        self.h = h;
        self
    }

    /// Compute `f = g + h` (the frontier ordering key).
    #[must_use]
    pub fn f(&self) -> Cost {
        self.g.saturating_add(self.h)
    }
}

/// Owner of every node created during one search invocation.
#[derive(Debug)]
pub struct NodeArena<S, A> {
    nodes: Vec<SearchNode<S, A>>,
}

impl<S, A> NodeArena<S, A> {
    /// Create an empty arena.
    #[must_use]
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Store a node and return its handle.
    ///
    /// # Panics
    ///
    /// Panics if the node's parent handle does not refer to an already stored
    /// node.
    pub fn alloc(&mut self, node: SearchNode<S, A>) -> NodeId {
        let id = NodeId(self.nodes.len());
        if let Some(parent) = node.parent {
            assert!(parent < id, "parent {parent} must precede child {id}");
        }
        self.nodes.push(node);
        id
    }

    /// Borrow a node.
    ///
    /// # Panics
    ///
    /// Panics if `id` did not come from this arena.
    #[must_use]
    pub fn get(&self, id: NodeId) -> &SearchNode<S, A> {
        &self.nodes[id.index()]
    }

    /// Number of stored nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the arena is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl<S, A: Clone> NodeArena<S, A> {
    /// Reconstruct the ordered actions from the root to `id`.
    ///
    /// Every parent handle is strictly smaller than its child's (enforced by
    /// [`NodeArena::alloc`]), so the walk terminates in at most `len()` steps.
    #[must_use]
    pub fn reconstruct_path(&self, id: NodeId) -> Vec<A> {
        let mut actions = Vec::new();
        let mut current = Some(id);
        while let Some(node_id) = current {
            let node = self.get(node_id);
            if let Some(action) = &node.action {
                actions.push(action.clone());
            }
            current = node.parent;
        }
        actions.reverse();
        actions
    }
}

impl<S, A> Default for NodeArena<S, A> {
    fn default() -> Self {
        Self::new()
    }
}

/// The frontier ordering key: `(f, -g, creation_order)`.
///
/// Lower `f` first; among equal `f`, larger `g` first (the more progressed
/// path); remaining ties go to the older node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrontierKey {
    pub f: Cost,
    pub g: Cost,
    pub creation_order: u64,
}

impl FrontierKey {
    /// Key for `node`, stamped with its creation order.
    #[must_use]
    pub fn of<S, A>(node: &SearchNode<S, A>, creation_order: u64) -> Self {
        Self {
            f: node.f(),
            g: node.g,
            creation_order,
        }
    }
}

impl PartialOrd for FrontierKey {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierKey {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.f
            .cmp(&other.f)
            .then(other.g.cmp(&self.g))
            .then(self.creation_order.cmp(&other.creation_order))
    }
}
