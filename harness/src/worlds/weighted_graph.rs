//! `WeightedGraph`: explicit directed graph with non-negative edge weights.
//!
//! Nodes are `u32` labels. Actions are `(from, to)` pairs so a returned path
//! reads as its edge list. Successors are emitted in edge insertion order,
//! which lets tests control discovery order exactly.

use std::collections::{BTreeMap, BTreeSet};

use waypoint_search::contract::{Cost, EdgeCost, SearchDomain, Successor};
use waypoint_search::error::SearchError;

/// Directed weighted graph with a set of goal nodes.
#[derive(Debug, Clone, Default)]
pub struct WeightedGraph {
    edges: BTreeMap<u32, Vec<(u32, EdgeCost)>>,
    goals: BTreeSet<u32>,
}

impl WeightedGraph {
    /// Empty graph with no goals.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a directed edge.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::MalformedInput`] if `cost` is negative.
    pub fn edge(mut self, from: u32, to: u32, cost: i64) -> Result<Self, SearchError> {
        let cost = EdgeCost::new(cost)?;
        self.edges.entry(from).or_default().push((to, cost));
        Ok(self)
    }

    /// Add edges in both directions with the same weight.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::MalformedInput`] if `cost` is negative.
    pub fn undirected(self, a: u32, b: u32, cost: i64) -> Result<Self, SearchError> {
        self.edge(a, b, cost)?.edge(b, a, cost)
    }

    /// Mark `node` as a goal.
    #[must_use]
    pub fn goal(mut self, node: u32) -> Self {
        self.goals.insert(node);
        self
    }

    /// Every node mentioned by an edge or a goal, ascending.
    #[must_use]
    pub fn nodes(&self) -> BTreeSet<u32> {
        let mut nodes: BTreeSet<u32> = self.goals.clone();
        for (from, out) in &self.edges {
            nodes.insert(*from);
            nodes.extend(out.iter().map(|(to, _)| *to));
        }
        nodes
    }

    /// Outgoing `(to, cost)` pairs of `node` in insertion order.
    #[must_use]
    pub fn outgoing(&self, node: u32) -> Vec<(u32, Cost)> {
        self.edges
            .get(&node)
            .map(|out| out.iter().map(|(to, c)| (*to, c.get())).collect())
            .unwrap_or_default()
    }
}

impl SearchDomain for WeightedGraph {
    type State = u32;
    type Action = (u32, u32);

    fn domain_id(&self) -> &str {
        "weighted_graph:v1"
    }

    fn successors(&self, state: &u32) -> Vec<Successor<u32, (u32, u32)>> {
        self.edges
            .get(state)
            .map(|out| {
                out.iter()
                    .map(|(to, cost)| Successor::weighted(*to, (*state, *to), *cost))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn is_goal(&self, state: &u32) -> bool {
        self.goals.contains(state)
    }
}
