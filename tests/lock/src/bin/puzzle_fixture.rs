//! Binary that solves a fixed 8-puzzle scramble with every heuristic and
//! prints deterministic output lines for cross-process verification.
//!
//! Usage: `puzzle_fixture`
//!
//! Output: key=value lines, one block per heuristic, followed by the digest
//! of a small batch evaluation. Timing never appears in the output.

use tracing_subscriber::EnvFilter;

use waypoint_harness::runner::{evaluate, EvaluationConfig};
use waypoint_harness::worlds::heuristics::HeuristicKind;
use waypoint_harness::worlds::sliding_puzzle::{Board, SlidingPuzzle};
use waypoint_search::contract::SearchDomain;
use waypoint_search::policy::SearchPolicy;
use waypoint_search::report::SearchReport;
use waypoint_search::search::search;

const SCRAMBLE_LENGTH: usize = 18;
const SEED: u64 = 42;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let domain = SlidingPuzzle::eight();
    let (start, scramble) =
        Board::scrambled(3, SCRAMBLE_LENGTH, SEED).expect("3x3 board is supported");
    let policy = SearchPolicy::unbounded().recording();

    println!("domain_id={}", domain.domain_id());
    println!(
        "start={}",
        start
            .tiles()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",")
    );
    println!("scramble_length={}", scramble.len());

    for kind in HeuristicKind::ALL {
        let result = search(&domain, start.clone(), &kind, &policy).expect("policy is valid");
        let report = SearchReport::new(domain.domain_id(), &policy, &result);
        let solution = result
            .outcome
            .actions()
            .map(|actions| {
                actions
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(",")
            })
            .unwrap_or_default();

        println!("{kind}.outcome={}", result.outcome.label());
        println!("{kind}.solution={solution}");
        println!("{kind}.nodes_generated={}", result.stats.nodes_generated);
        println!("{kind}.expansions={}", result.stats.expansions);
        println!(
            "{kind}.report_digest={}",
            report.digest().expect("report is canonical")
        );
    }

    let evaluation = evaluate(&EvaluationConfig {
        scramble_lengths: vec![6, 12],
        seeds: vec![0, 1],
        ..EvaluationConfig::default()
    })
    .expect("evaluation config is valid");
    println!(
        "evaluation_digest={}",
        evaluation.digest().expect("evaluation report is canonical")
    );
}
