//! Waypoint Harness: concrete domains and batch evaluation for the engine.
//!
//! The harness supplies what the engine leaves out: a sliding
//! tile puzzle with reproducible scrambles, its heuristic family, an
//! explicit weighted graph, and a runner that solves a grid of scrambled
//! instances and aggregates the results.
//!
//! The harness does NOT implement search. Every solve goes through
//! [`waypoint_search::search::search`].

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod runner;
pub mod worlds;
