//! Heuristic capability.

use crate::contract::Cost;

/// Estimate of the remaining cost from a state to the nearest goal.
///
/// The search loop evaluates the heuristic exactly once per generated node.
/// Admissibility (never overestimating) and consistency (triangle inequality
/// across edges) are preconditions for cost-optimal results; the loop itself
/// works with any non-negative estimate.
pub trait Heuristic<S> {
    /// Estimate the cost-to-goal of `state`.
    fn estimate(&self, state: &S) -> Cost;
}

/// Plain functions and closures are heuristics.
impl<S, F> Heuristic<S> for F
where
    F: Fn(&S) -> Cost,
{
    fn estimate(&self, state: &S) -> Cost {
        self(state)
    }
}

/// Constant-zero heuristic: turns best-first search into uniform-cost search.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroHeuristic;

impl<S> Heuristic<S> for ZeroHeuristic {
    fn estimate(&self, _state: &S) -> Cost {
        0
    }
}
