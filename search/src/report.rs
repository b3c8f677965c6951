//! `SearchReport`: canonical audit record of one search invocation.
//!
//! The report echoes the policy, the termination reason, the solution and
//! the counters, plus the expansion log when one was recorded. Wall-clock
//! time is excluded: identical inputs yield identical bytes and digest.

use std::fmt::Display;

use crate::digest::{canonical_hash, canonical_json_bytes, CanonError, DOMAIN_SEARCH_REPORT};
use crate::policy::SearchPolicy;
use crate::search::{ExpansionEvent, SearchOutcome, SearchResult, SearchStats, TerminationReason};

/// The complete, deterministic search audit record.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchReport {
    value: serde_json::Value,
}

impl SearchReport {
    /// Build the report for `result`. Actions are rendered with `Display`.
    #[must_use]
    pub fn new<A: Display>(domain_id: &str, policy: &SearchPolicy, result: &SearchResult<A>) -> Self {
        let value = serde_json::json!({
            "domain_id": domain_id,
            "policy": policy_to_json(policy),
            "outcome": result.outcome.label(),
            "termination_reason": termination_reason_to_json(result.termination),
            "solution": solution_to_json(&result.outcome),
            "counters": stats_to_json(&result.stats),
            "expansions": result.expansions.iter().map(expansion_to_json).collect::<Vec<_>>(),
        });
        Self { value }
    }

    /// The report as a JSON value.
    #[must_use]
    pub fn as_json(&self) -> &serde_json::Value {
        &self.value
    }

    /// Serialize the report to canonical JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if serialization fails.
    pub fn to_canonical_json_bytes(&self) -> Result<Vec<u8>, CanonError> {
        canonical_json_bytes(&self.value)
    }

    /// Domain-separated digest of the canonical bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if serialization fails.
    pub fn digest(&self) -> Result<String, CanonError> {
        let bytes = self.to_canonical_json_bytes()?;
        Ok(canonical_hash(DOMAIN_SEARCH_REPORT, &bytes))
    }
}

fn policy_to_json(policy: &SearchPolicy) -> serde_json::Value {
    serde_json::json!({
        "max_expansions": policy.max_expansions,
        "record_expansions": policy.record_expansions,
        "time_limit_ms": policy
            .time_limit
            .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX)),
    })
}

fn termination_reason_to_json(reason: TerminationReason) -> serde_json::Value {
    match reason {
        TerminationReason::GoalReached { node } => {
            serde_json::json!({"node_id": node.index(), "type": "goal_reached"})
        }
        TerminationReason::FrontierExhausted => serde_json::json!({"type": "frontier_exhausted"}),
        TerminationReason::DeadlineExceeded => serde_json::json!({"type": "deadline_exceeded"}),
        TerminationReason::ExpansionBudgetExceeded => {
            serde_json::json!({"type": "expansion_budget_exceeded"})
        }
    }
}

fn solution_to_json<A: Display>(outcome: &SearchOutcome<A>) -> serde_json::Value {
    match outcome {
        SearchOutcome::Succeeded { actions, cost } => serde_json::json!({
            "actions": actions.iter().map(ToString::to_string).collect::<Vec<_>>(),
            "cost": cost,
            "length": actions.len(),
        }),
        SearchOutcome::Exhausted | SearchOutcome::TimedOut => serde_json::Value::Null,
    }
}

fn stats_to_json(stats: &SearchStats) -> serde_json::Value {
    serde_json::json!({
        "duplicates_discarded": stats.duplicates_discarded,
        "expansions": stats.expansions,
        "explored_size": stats.explored_size,
        "explored_skips": stats.explored_skips,
        "frontier_high_water": stats.frontier_high_water,
        "frontier_inserts": stats.frontier_inserts,
        "frontier_replacements": stats.frontier_replacements,
        "nodes_generated": stats.nodes_generated,
    })
}

fn expansion_to_json(e: &ExpansionEvent) -> serde_json::Value {
    serde_json::json!({
        "discarded": e.discarded,
        "f": e.f,
        "g": e.g,
        "h": e.h,
        "inserted": e.inserted,
        "node_id": e.node.index(),
        "order": e.order,
        "parent_id": e.parent.map(crate::node::NodeId::index),
        "replaced": e.replaced,
        "skipped": e.skipped,
    })
}
