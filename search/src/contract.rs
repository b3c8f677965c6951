//! Search domain contract trait.

use std::hash::Hash;

use crate::error::{ReplayError, SearchError};

/// Path and heuristic cost. Unsigned: negative costs cannot be represented.
pub type Cost = u64;

/// A non-negative edge cost.
///
/// The only fallible constructor is [`EdgeCost::new`], which rejects negative
/// values. Negative edges would break both the frontier ordering and the
/// finality of explored states, so they are refused before they can reach
/// the search loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeCost(Cost);

impl EdgeCost {
    /// Cost of a single unweighted move.
    pub const UNIT: Self = Self(1);

    /// Construct an edge cost from a signed weight.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::MalformedInput`] if `weight` is negative.
    pub fn new(weight: i64) -> Result<Self, SearchError> {
        Cost::try_from(weight)
            .map(Self)
            .map_err(|_| SearchError::MalformedInput {
                detail: format!("negative edge cost {weight}"),
            })
    }

    /// Construct an edge cost from an unsigned weight (infallible).
    #[must_use]
    pub const fn from_unsigned(weight: Cost) -> Self {
        Self(weight)
    }

    /// The cost value.
    #[must_use]
    pub const fn get(self) -> Cost {
        self.0
    }
}

impl Default for EdgeCost {
    fn default() -> Self {
        Self::UNIT
    }
}

/// One outgoing edge produced by [`SearchDomain::successors`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Successor<S, A> {
    /// The state reached by taking `action`.
    pub state: S,
    /// The action that produces `state` from the expanded state.
    pub action: A,
    /// Cost of the edge.
    pub cost: EdgeCost,
}

impl<S, A> Successor<S, A> {
    /// A successor reached by a unit-cost edge.
    #[must_use]
    pub fn unit(state: S, action: A) -> Self {
        Self {
            state,
            action,
            cost: EdgeCost::UNIT,
        }
    }

    /// A successor reached by an edge of the given cost.
    #[must_use]
    pub fn weighted(state: S, action: A, cost: EdgeCost) -> Self {
        Self {
            state,
            action,
            cost,
        }
    }
}

/// Trait for problems that support best-first search.
///
/// # Contract
///
/// - `State` is the canonical identity of a configuration: two states are
///   the same search state iff they compare equal, regardless of the path
///   that produced them. `Hash` must agree with `Eq`.
/// - `successors` must be finite and deterministic for a given state. It may
///   be empty (goal or dead end). It should not return the state itself unless
///   the domain genuinely has no-op moves.
/// - `is_goal` must be a pure function of the state.
pub trait SearchDomain {
    /// Canonical, hashable state identity.
    type State: Clone + Eq + Hash;
    /// Action labels recorded on the returned path.
    type Action: Clone;

    /// Stable identifier for the domain (echoed into reports).
    fn domain_id(&self) -> &str;

    /// Enumerate the outgoing edges of `state`.
    fn successors(&self, state: &Self::State) -> Vec<Successor<Self::State, Self::Action>>;

    /// Test whether `state` satisfies the goal.
    fn is_goal(&self, state: &Self::State) -> bool;
}

/// Replay `actions` from `start`, matching each action against the
/// successors of the current state.
///
/// Returns the final state and the accumulated path cost.
///
/// # Errors
///
/// Returns [`ReplayError::IllegalAction`] with the offending index if an
/// action is not produced by `successors` at that point.
pub fn replay<D>(
    domain: &D,
    start: &D::State,
    actions: &[D::Action],
) -> Result<(D::State, Cost), ReplayError>
where
    D: SearchDomain + ?Sized,
    D::Action: PartialEq,
{
    let mut state = start.clone();
    let mut cost: Cost = 0;
    for (index, action) in actions.iter().enumerate() {
        let next = domain
            .successors(&state)
            .into_iter()
            .find(|s| &s.action == action)
            .ok_or(ReplayError::IllegalAction { index })?;
        cost = cost.saturating_add(next.cost.get());
        state = next.state;
    }
    Ok((state, cost))
}
