//! Crafted domains and instrumented wrappers for lock tests.

use std::cell::RefCell;
use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use waypoint_harness::worlds::weighted_graph::WeightedGraph;
use waypoint_search::contract::{Cost, SearchDomain, Successor};

/// Wraps a domain and counts how often each state's successors are
/// requested. The engine asks for successors exactly when it expands a
/// node, so a count above one means a state was expanded twice.
pub struct CountingDomain<D: SearchDomain> {
    inner: D,
    calls: RefCell<HashMap<D::State, usize>>,
}

impl<D: SearchDomain> CountingDomain<D> {
    pub fn new(inner: D) -> Self {
        Self {
            inner,
            calls: RefCell::new(HashMap::new()),
        }
    }

    /// Highest per-state expansion count seen so far.
    pub fn max_expansions_per_state(&self) -> usize {
        self.calls.borrow().values().copied().max().unwrap_or(0)
    }

    /// Number of distinct states expanded.
    pub fn distinct_expanded(&self) -> usize {
        self.calls.borrow().len()
    }

    /// Total successor requests.
    pub fn total_calls(&self) -> usize {
        self.calls.borrow().values().sum()
    }
}

impl<D: SearchDomain> SearchDomain for CountingDomain<D> {
    type State = D::State;
    type Action = D::Action;

    fn domain_id(&self) -> &str {
        self.inner.domain_id()
    }

    fn successors(&self, state: &D::State) -> Vec<Successor<D::State, D::Action>> {
        *self.calls.borrow_mut().entry(state.clone()).or_insert(0) += 1;
        self.inner.successors(state)
    }

    fn is_goal(&self, state: &D::State) -> bool {
        self.inner.is_goal(state)
    }
}

/// The non-negative integers with a single `+1` edge each and no goal.
/// Search over it never exhausts, so only a deadline or budget stops it.
pub struct EndlessLine;

impl SearchDomain for EndlessLine {
    type State = u64;
    type Action = ();

    fn domain_id(&self) -> &str {
        "endless_line"
    }

    fn successors(&self, state: &u64) -> Vec<Successor<u64, ()>> {
        vec![Successor::unit(state + 1, ())]
    }

    fn is_goal(&self, _state: &u64) -> bool {
        false
    }
}

/// 4-connected `width × height` grid with blocked cells, unit step cost.
/// Start is the top-left corner, goal the bottom-right.
pub struct Grid {
    pub width: i32,
    pub height: i32,
    pub blocked: Vec<(i32, i32)>,
}

impl Grid {
    pub fn goal(&self) -> (i32, i32) {
        (self.width - 1, self.height - 1)
    }

    /// Manhattan distance to the goal: admissible and consistent here.
    pub fn manhattan(&self, &(x, y): &(i32, i32)) -> Cost {
        let (gx, gy) = self.goal();
        Cost::from(x.abs_diff(gx) + y.abs_diff(gy))
    }
}

impl SearchDomain for Grid {
    type State = (i32, i32);
    type Action = char;

    fn domain_id(&self) -> &str {
        "grid"
    }

    fn successors(&self, &(x, y): &(i32, i32)) -> Vec<Successor<(i32, i32), char>> {
        [('N', 0, -1), ('S', 0, 1), ('W', -1, 0), ('E', 1, 0)]
            .into_iter()
            .map(|(label, dx, dy)| (label, (x + dx, y + dy)))
            .filter(|&(_, (nx, ny))| {
                (0..self.width).contains(&nx)
                    && (0..self.height).contains(&ny)
                    && !self.blocked.contains(&(nx, ny))
            })
            .map(|(label, next)| Successor::unit(next, label))
            .collect()
    }

    fn is_goal(&self, state: &(i32, i32)) -> bool {
        *state == self.goal()
    }
}

/// Seeded random directed graph on `0..nodes` with `out_degree` edges per
/// node and weights in `0..=max_cost`. Node `nodes - 1` is the goal.
pub fn random_graph(seed: u64, nodes: u32, out_degree: u32, max_cost: i64) -> WeightedGraph {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut graph = WeightedGraph::new().goal(nodes - 1);
    for from in 0..nodes {
        for _ in 0..out_degree {
            let to = rng.random_range(0..nodes);
            let cost = rng.random_range(0..=max_cost);
            graph = graph
                .edge(from, to, cost)
                .unwrap_or_else(|e| panic!("generated weight {cost} rejected: {e}"));
        }
    }
    graph
}
