//! Deadline and budget termination: an interrupted search reports
//! `TimedOut`, never `Exhausted`, and carries no partial path.

use std::time::Duration;

use lock_tests::domains::EndlessLine;

use waypoint_harness::worlds::heuristics::HeuristicKind;
use waypoint_harness::worlds::sliding_puzzle::{check_solution, Board, SlidingPuzzle};
use waypoint_search::heuristic::ZeroHeuristic;
use waypoint_search::policy::SearchPolicy;
use waypoint_search::search::{search, SearchOutcome, SearchRun, TerminationReason};

#[test]
fn zero_deadline_times_out_before_any_expansion() {
    let policy = SearchPolicy::unbounded().with_time_limit(Duration::ZERO);
    let result = search(&EndlessLine, 0, &ZeroHeuristic, &policy).unwrap();
    assert_eq!(result.outcome, SearchOutcome::TimedOut);
    assert_eq!(result.termination, TerminationReason::DeadlineExceeded);
    assert_eq!(result.stats.expansions, 0);
}

#[test]
fn short_deadline_stops_endless_search() {
    let policy = SearchPolicy::unbounded().with_time_limit(Duration::from_millis(20));
    let result = search(&EndlessLine, 0, &ZeroHeuristic, &policy).unwrap();
    assert_eq!(result.outcome, SearchOutcome::TimedOut);
    assert_eq!(result.termination, TerminationReason::DeadlineExceeded);
    assert!(result.stats.elapsed >= Duration::from_millis(20));
}

#[test]
fn expansion_budget_is_exact() {
    let policy = SearchPolicy::unbounded().with_max_expansions(250);
    let result = search(&EndlessLine, 0, &ZeroHeuristic, &policy).unwrap();
    assert_eq!(result.outcome, SearchOutcome::TimedOut);
    assert_eq!(result.termination, TerminationReason::ExpansionBudgetExceeded);
    assert_eq!(result.stats.expansions, 250);
    assert_eq!(result.stats.nodes_generated, 251);
}

#[test]
fn stepping_matches_running() {
    let policy = SearchPolicy::unbounded().with_max_expansions(10);
    let mut run = SearchRun::new(&EndlessLine, 0, &ZeroHeuristic, &policy).unwrap();
    let mut steps = 0;
    while !run.step().is_terminal() {
        steps += 1;
    }
    assert_eq!(steps, 10);
    assert_eq!(run.explored_len(), 10);
    assert_eq!(run.frontier_len(), 1);

    let result = run.run();
    assert_eq!(result.termination, TerminationReason::ExpansionBudgetExceeded);
    assert_eq!(result.stats.expansions, 10);
}

#[test]
fn growing_deadlines_eventually_solve_the_puzzle() {
    let domain = SlidingPuzzle::eight();
    let (start, _) = Board::scrambled(3, 20, 4).unwrap();

    let mut limit = Duration::from_micros(1);
    let mut timed_out = 0;
    let solution = loop {
        let policy = SearchPolicy::unbounded().with_time_limit(limit);
        let result = search(&domain, start.clone(), &HeuristicKind::Zero, &policy).unwrap();
        match result.outcome {
            SearchOutcome::Succeeded { actions, .. } => break actions,
            SearchOutcome::TimedOut => timed_out += 1,
            SearchOutcome::Exhausted => panic!("solvable puzzle reported exhausted at {limit:?}"),
        }
        assert!(limit < Duration::from_secs(120), "never solved");
        limit *= 2;
    };

    assert!(check_solution(&start, &solution));
    assert!(solution.len() <= 20);
    // A 1µs limit cannot cover a search of a 20-move scramble.
    assert!(timed_out >= 1);
}

#[test]
fn deadline_on_finite_unsolvable_board_times_out_not_exhausts() {
    // Odd permutation parity: the goal is unreachable, but the reachable
    // space is finite and would exhaust given enough time.
    let domain = SlidingPuzzle::eight();
    let start = Board::from_tiles(3, vec![2, 1, 3, 4, 5, 6, 7, 8, 0]).unwrap();
    let policy = SearchPolicy::unbounded().with_time_limit(Duration::from_millis(2));
    let result = search(&domain, start, &HeuristicKind::Manhattan, &policy).unwrap();
    assert_eq!(result.outcome, SearchOutcome::TimedOut);
    assert_eq!(result.termination, TerminationReason::DeadlineExceeded);
    assert!(result.stats.explored_size < 181_440);
}

#[test]
fn stepped_puzzle_run_reports_live_sizes() {
    let domain = SlidingPuzzle::eight();
    let (start, _) = Board::scrambled(3, 20, 11).unwrap();
    let policy = SearchPolicy::unbounded();
    let mut run = SearchRun::new(&domain, start, &HeuristicKind::Zero, &policy).unwrap();
    for _ in 0..20 {
        assert!(!run.step().is_terminal(), "uniform-cost search ended early");
    }
    let stats = run.stats();
    assert_eq!(stats.expansions, 20);
    assert_eq!(stats.explored_size, run.explored_len() as u64);
    assert!(stats.frontier_high_water >= run.frontier_len() as u64);
    assert!(stats.frontier_high_water > 0);
}
