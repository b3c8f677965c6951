//! Search entry point and expansion loop.
//!
//! [`SearchRun`] owns every structure of one invocation (node arena,
//! frontier, explored set, counters). Nothing is shared between runs, so
//! independent searches may execute on different threads as long as each
//! has its own `SearchRun`.

use std::time::{Duration, Instant};

use crate::contract::{Cost, SearchDomain};
use crate::error::SearchError;
use crate::explored::ExploredSet;
use crate::frontier::{Frontier, FrontierEntry};
use crate::heuristic::Heuristic;
use crate::node::{FrontierKey, NodeArena, NodeId, SearchNode};
use crate::policy::SearchPolicy;

/// What a finished search reports to its caller.
///
/// `TimedOut` never carries a partial path: an interrupted search makes no
/// claim about solvability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome<A> {
    /// Applying `actions` in order to the start state reaches a goal.
    Succeeded { actions: Vec<A>, cost: Cost },
    /// The frontier emptied: no goal is reachable from the start state.
    Exhausted,
    /// The deadline or expansion budget was hit first.
    TimedOut,
}

impl<A> SearchOutcome<A> {
    /// Whether a path was found.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded { .. })
    }

    /// The solution actions, if any.
    #[must_use]
    pub fn actions(&self) -> Option<&[A]> {
        match self {
            Self::Succeeded { actions, .. } => Some(actions),
            Self::Exhausted | Self::TimedOut => None,
        }
    }

    /// Stable lowercase label (`succeeded`, `exhausted`, `timed_out`).
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Succeeded { .. } => "succeeded",
            Self::Exhausted => "exhausted",
            Self::TimedOut => "timed_out",
        }
    }
}

/// Why the search loop stopped. Finer-grained than [`SearchOutcome`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationReason {
    /// A popped node satisfied the goal test.
    GoalReached { node: NodeId },
    /// Frontier emptied without finding a goal.
    FrontierExhausted,
    /// The wall-clock deadline passed.
    DeadlineExceeded,
    /// `max_expansions` was hit.
    ExpansionBudgetExceeded,
}

/// Search state machine. `Running` is the only non-terminal state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchStatus<A> {
    Running,
    Done {
        reason: TerminationReason,
        outcome: SearchOutcome<A>,
    },
}

impl<A> SearchStatus<A> {
    /// Whether the search has reached a terminal state.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done { .. })
    }
}

/// Per-invocation instrumentation counters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Root plus every successor produced by the domain.
    pub nodes_generated: u64,
    /// Nodes popped and expanded (goal pops are not expansions).
    pub expansions: u64,
    /// Children inserted as new open nodes.
    pub frontier_inserts: u64,
    /// Children that replaced an open node for the same state.
    pub frontier_replacements: u64,
    /// Children discarded because a cheaper path was already open.
    pub duplicates_discarded: u64,
    /// Children skipped because their state was already explored.
    pub explored_skips: u64,
    /// Largest frontier size reached so far.
    pub frontier_high_water: u64,
    /// Number of explored states.
    pub explored_size: u64,
    /// Wall-clock time from construction to termination.
    pub elapsed: Duration,
}

/// One frontier pop followed by successor processing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpansionEvent {
    /// Total order of expansions.
    pub order: u64,
    pub node: NodeId,
    pub parent: Option<NodeId>,
    pub g: Cost,
    pub h: Cost,
    pub f: Cost,
    pub inserted: u32,
    pub replaced: u32,
    pub discarded: u32,
    pub skipped: u32,
}

/// Result of a search execution.
#[derive(Debug, Clone)]
pub struct SearchResult<A> {
    pub outcome: SearchOutcome<A>,
    pub termination: TerminationReason,
    pub stats: SearchStats,
    /// Ordered expansion log (empty unless the policy records it).
    pub expansions: Vec<ExpansionEvent>,
}

impl<A> SearchResult<A> {
    /// Returns `true` if the search found a path.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.outcome.is_success()
    }
}

/// One search invocation, advanced one loop iteration at a time.
pub struct SearchRun<'a, D: SearchDomain, H: ?Sized> {
    domain: &'a D,
    heuristic: &'a H,
    max_expansions: Option<u64>,
    record_expansions: bool,
    started: Instant,
    deadline: Option<Instant>,
    arena: NodeArena<D::State, D::Action>,
    frontier: Frontier<D::State>,
    explored: ExploredSet<D::State>,
    stats: SearchStats,
    expansions: Vec<ExpansionEvent>,
    status: SearchStatus<D::Action>,
    span: tracing::Span,
}

impl<'a, D, H> SearchRun<'a, D, H>
where
    D: SearchDomain,
    H: Heuristic<D::State> + ?Sized,
{
    /// Validate the policy, start the clock and open the root node.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidPolicy`] if the policy's time limit
    /// cannot be turned into a deadline.
    pub fn new(
        domain: &'a D,
        start: D::State,
        heuristic: &'a H,
        policy: &SearchPolicy,
    ) -> Result<Self, SearchError> {
        let started = Instant::now();
        let deadline = policy.deadline_from(started)?;

        let mut run = Self {
            domain,
            heuristic,
            max_expansions: policy.max_expansions,
            record_expansions: policy.record_expansions,
            started,
            deadline,
            arena: NodeArena::new(),
            frontier: Frontier::new(),
            explored: ExploredSet::new(),
            stats: SearchStats::default(),
            expansions: Vec::new(),
            status: SearchStatus::Running,
            span: tracing::info_span!("search", domain = domain.domain_id()),
        };

        let h = heuristic.estimate(&start);
        let root = SearchNode::root(start).with_costs(0, h);
        run.stats.nodes_generated = 1;
        run.open(root);
        run.sync_sizes();
        Ok(run)
    }

    /// Current state of the state machine.
    #[must_use]
    pub fn status(&self) -> &SearchStatus<D::Action> {
        &self.status
    }

    /// Counters so far, including frontier high water and explored size as
    /// of the last completed step.
    #[must_use]
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Number of open nodes.
    #[must_use]
    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    /// Number of explored states.
    #[must_use]
    pub fn explored_len(&self) -> usize {
        self.explored.len()
    }

    /// Advance one loop iteration. A no-op once the search is terminal.
    pub fn step(&mut self) -> &SearchStatus<D::Action> {
        if !self.status.is_terminal() {
            let span = self.span.clone();
            let _enter = span.enter();
            if let Some((reason, outcome)) = self.advance() {
                self.status = SearchStatus::Done { reason, outcome };
            }
        }
        &self.status
    }

    /// Drive the search to a terminal state.
    pub fn run(mut self) -> SearchResult<D::Action> {
        let span = self.span.clone();
        let _enter = span.enter();

        let (reason, outcome) = loop {
            if let SearchStatus::Done { reason, outcome } =
                std::mem::replace(&mut self.status, SearchStatus::Running)
            {
                break (reason, outcome);
            }
            if let Some(done) = self.advance() {
                break done;
            }
        };

        SearchResult {
            outcome,
            termination: reason,
            stats: self.stats,
            expansions: self.expansions,
        }
    }

    /// One iteration of the loop. Returns `Some` when the search terminates.
    fn advance(&mut self) -> Option<(TerminationReason, SearchOutcome<D::Action>)> {
        if let Some(deadline) = self.deadline {
            if Instant::now() >= deadline {
                return Some(self.finish(TerminationReason::DeadlineExceeded, SearchOutcome::TimedOut));
            }
        }
        if let Some(cap) = self.max_expansions {
            if self.stats.expansions >= cap {
                return Some(self.finish(
                    TerminationReason::ExpansionBudgetExceeded,
                    SearchOutcome::TimedOut,
                ));
            }
        }

        let Some(current) = self.frontier.extract_min() else {
            return Some(self.finish(TerminationReason::FrontierExhausted, SearchOutcome::Exhausted));
        };

        let node = self.arena.get(current.node);
        if self.domain.is_goal(&node.state) {
            let cost = node.g;
            let actions = self.arena.reconstruct_path(current.node);
            return Some(self.finish(
                TerminationReason::GoalReached { node: current.node },
                SearchOutcome::Succeeded { actions, cost },
            ));
        }

        let (g, h, f, parent) = (node.g, node.h, node.f(), node.parent);
        let successors = self.domain.successors(&node.state);
        self.explored.insert(current.state);
        self.stats.expansions += 1;
        self.stats.nodes_generated += successors.len() as u64;
        tracing::trace!(node = %current.node, g, f, successors = successors.len(), "expand");

        let mut event = ExpansionEvent {
            order: self.stats.expansions - 1,
            node: current.node,
            parent,
            g,
            h,
            f,
            inserted: 0,
            replaced: 0,
            discarded: 0,
            skipped: 0,
        };

        for successor in successors {
            if self.explored.contains(&successor.state) {
                self.stats.explored_skips += 1;
                event.skipped += 1;
                continue;
            }

            let child_g = g.saturating_add(successor.cost.get());
            let held = self.frontier.peek_cost(&successor.state);
            if let Some((held_g, _)) = held {
                // Equal-cost rediscoveries replace the open node: the most
                // recently found path wins ties.
                if child_g > held_g {
                    self.stats.duplicates_discarded += 1;
                    event.discarded += 1;
                    continue;
                }
            }

            let child_h = self.heuristic.estimate(&successor.state);
            let child = SearchNode::child(current.node, successor.state, successor.action)
                .with_costs(child_g, child_h);
            if held.is_some() {
                self.reopen(child);
                self.stats.frontier_replacements += 1;
                event.replaced += 1;
            } else {
                self.open(child);
                self.stats.frontier_inserts += 1;
                event.inserted += 1;
            }
        }

        if self.record_expansions {
            self.expansions.push(event);
        }
        self.sync_sizes();
        None
    }

    fn entry_for(&mut self, node: SearchNode<D::State, D::Action>) -> FrontierEntry<D::State> {
        let key = FrontierKey::of(&node, self.arena.len() as u64);
        let state = node.state.clone();
        let id = self.arena.alloc(node);
        FrontierEntry {
            state,
            key,
            node: id,
        }
    }

    fn open(&mut self, node: SearchNode<D::State, D::Action>) {
        let entry = self.entry_for(node);
        let inserted = self.frontier.insert(entry);
        debug_assert!(inserted, "open() called for a state that is already open");
    }

    fn reopen(&mut self, node: SearchNode<D::State, D::Action>) {
        let entry = self.entry_for(node);
        let displaced = self.frontier.replace(entry);
        debug_assert!(displaced.is_some(), "reopen() called for a state that is not open");
    }

    fn sync_sizes(&mut self) {
        self.stats.frontier_high_water = self.frontier.high_water() as u64;
        self.stats.explored_size = self.explored.len() as u64;
    }

    fn finish(
        &mut self,
        reason: TerminationReason,
        outcome: SearchOutcome<D::Action>,
    ) -> (TerminationReason, SearchOutcome<D::Action>) {
        self.stats.elapsed = self.started.elapsed();
        self.sync_sizes();
        tracing::debug!(
            ?reason,
            outcome = outcome.label(),
            expansions = self.stats.expansions,
            nodes_generated = self.stats.nodes_generated,
            elapsed_us = u64::try_from(self.stats.elapsed.as_micros()).unwrap_or(u64::MAX),
            "search finished"
        );
        (reason, outcome)
    }
}

/// Run best-first search from `start` to completion.
///
/// # Errors
///
/// Returns [`SearchError::InvalidPolicy`] only for pre-flight policy
/// validation failures. Every runtime termination (goal, exhaustion,
/// deadline, budget) is reported through [`SearchResult::outcome`].
pub fn search<D, H>(
    domain: &D,
    start: D::State,
    heuristic: &H,
    policy: &SearchPolicy,
) -> Result<SearchResult<D::Action>, SearchError>
where
    D: SearchDomain,
    H: Heuristic<D::State> + ?Sized,
{
    Ok(SearchRun::new(domain, start, heuristic, policy)?.run())
}
