//! Search domains and heuristics for the harness runner.

pub mod heuristics;
pub mod sliding_puzzle;
pub mod weighted_graph;
