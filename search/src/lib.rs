//! Waypoint Search: domain-agnostic informed best-first (A*) search.
//!
//! This crate provides the search engine only. Concrete problems plug in
//! through [`SearchDomain`](contract::SearchDomain) and
//! [`Heuristic`](heuristic::Heuristic); the harness crate supplies puzzle
//! domains, heuristic families and batch evaluation.
//!
//! # Crate dependency graph
//!
//! ```text
//! waypoint_search  ←  waypoint_harness
//! (frontier, loop)    (domains, heuristics, evaluation)
//! ```
//!
//! # Key types
//!
//! - [`SearchNode`](node::SearchNode) / [`NodeArena`](node::NodeArena): immutable nodes owned by a per-run arena
//! - [`Frontier`](frontier::Frontier): indexed min-heap ordered by `(f, -g)`
//! - [`ExploredSet`](explored::ExploredSet): closed set, never re-expanded
//! - [`SearchRun`](search::SearchRun): the loop as a steppable state machine
//! - [`SearchPolicy`](policy::SearchPolicy): deadline and budget configuration
//! - [`SearchReport`](report::SearchReport): canonical JSON audit record

#![forbid(unsafe_code)]

pub mod contract;
pub mod digest;
pub mod error;
pub mod explored;
pub mod frontier;
pub mod heuristic;
pub mod node;
pub mod policy;
pub mod report;
pub mod search;
