//! Shared regimes and helpers for the waypoint benchmark suites.

use waypoint_harness::worlds::heuristics::HeuristicKind;
use waypoint_harness::worlds::sliding_puzzle::{Board, Move, SlidingPuzzle};
use waypoint_harness::worlds::weighted_graph::WeightedGraph;
use waypoint_search::frontier::{Frontier, FrontierEntry};
use waypoint_search::node::{FrontierKey, NodeArena, SearchNode};
use waypoint_search::policy::SearchPolicy;
use waypoint_search::search::{search, SearchResult};

/// One 8-puzzle benchmark instance.
pub struct PuzzleRegime {
    pub name: String,
    pub start: Board,
    pub heuristic: HeuristicKind,
}

/// Seed used for every benchmark scramble.
pub const REGIME_SEED: u64 = 7;

/// Scrambles of increasing depth crossed with every heuristic.
///
/// The zero heuristic is skipped beyond 20 moves: uniform-cost search at
/// that depth dominates the suite's runtime without adding information.
///
/// # Panics
///
/// Panics if the 3×3 board cannot be built.
#[must_use]
pub fn puzzle_regimes() -> Vec<PuzzleRegime> {
    let mut regimes = Vec::new();
    for m in [10usize, 20, 30] {
        let (start, _) = Board::scrambled(3, m, REGIME_SEED).expect("3x3 board");
        for heuristic in HeuristicKind::ALL {
            if heuristic == HeuristicKind::Zero && m > 20 {
                continue;
            }
            regimes.push(PuzzleRegime {
                name: format!("m{m}/{heuristic}"),
                start: start.clone(),
                heuristic,
            });
        }
    }
    regimes
}

/// Solve a regime with an unbounded policy.
///
/// # Panics
///
/// Panics if the policy is rejected.
#[must_use]
pub fn run_puzzle(regime: &PuzzleRegime) -> SearchResult<Move> {
    search(
        &SlidingPuzzle::eight(),
        regime.start.clone(),
        &regime.heuristic,
        &SearchPolicy::unbounded(),
    )
    .expect("unbounded policy is valid")
}

/// A `side × side` grid graph with unit right/down edges and a cheap
/// diagonal shortcut every few cells, goal at the far corner.
///
/// # Panics
///
/// Panics if an edge weight is rejected (all weights are non-negative).
#[must_use]
pub fn lattice_graph(side: u32) -> WeightedGraph {
    let id = |x: u32, y: u32| y * side + x;
    let mut graph = WeightedGraph::new().goal(id(side - 1, side - 1));
    for y in 0..side {
        for x in 0..side {
            if x + 1 < side {
                graph = graph.undirected(id(x, y), id(x + 1, y), 2).expect("weight");
            }
            if y + 1 < side {
                graph = graph.undirected(id(x, y), id(x, y + 1), 2).expect("weight");
            }
            if x + 1 < side && y + 1 < side && (x + y) % 3 == 0 {
                graph = graph.edge(id(x, y), id(x + 1, y + 1), 3).expect("weight");
            }
        }
    }
    graph
}

/// `n` frontier entries with scattered `(f, g)` keys, plus the arena that
/// owns their nodes.
#[must_use]
pub fn frontier_entries(n: u64) -> Vec<FrontierEntry<u64>> {
    let mut arena: NodeArena<u64, ()> = NodeArena::new();
    (0..n)
        .map(|i| {
            let g = (i * 7_919) % 1_000;
            let h = (i * 104_729) % 500;
            let node = SearchNode::root(i).with_costs(g, h);
            let key = FrontierKey::of(&node, i);
            let id = arena.alloc(node);
            FrontierEntry {
                state: i,
                key,
                node: id,
            }
        })
        .collect()
}

/// Fill a frontier and drain it, returning the number of entries popped.
#[must_use]
pub fn fill_and_drain(entries: Vec<FrontierEntry<u64>>) -> usize {
    let mut frontier = Frontier::new();
    for entry in entries {
        frontier.insert(entry);
    }
    let mut popped = 0;
    while frontier.extract_min().is_some() {
        popped += 1;
    }
    popped
}
