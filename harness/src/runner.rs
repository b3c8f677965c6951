//! Batch evaluation: scramble boards, solve them with each heuristic, and
//! aggregate the results.
//!
//! # Pipeline
//!
//! ```text
//! EvaluationConfig::validate()
//!   → for m in scramble_lengths, heuristic in heuristics, seed in seeds:
//!       PuzzleInstance::generate(side, m, seed) → solve() → EvaluationRecord
//!   → EvaluationReport { records } → summaries() / to_json_value() / digest()
//! ```
//!
//! Instances run sequentially and every `solve` starts a fresh search, so
//! no state leaks between instances. Timing appears in the JSON view but
//! never in the canonical bytes or digest.

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use waypoint_search::digest::{
    canonical_hash, canonical_json_bytes, CanonError, DOMAIN_EVALUATION_REPORT,
};
use waypoint_search::error::SearchError;
use waypoint_search::policy::SearchPolicy;
use waypoint_search::search::{search, SearchOutcome};

use crate::worlds::heuristics::HeuristicKind;
use crate::worlds::sliding_puzzle::{check_solution, Board, BoardError, Move, SlidingPuzzle};

/// Error during an evaluation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunError {
    /// The search engine rejected its input or policy.
    Search(SearchError),
    /// Board construction failed.
    Board(BoardError),
    /// The evaluation configuration is unusable.
    InvalidConfig { detail: String },
    /// Canonical JSON serialization failed.
    CanonFailed { detail: String },
    /// Writing the report failed.
    Io { detail: String },
}

impl std::fmt::Display for RunError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Search(e) => write!(f, "search error: {e}"),
            Self::Board(e) => write!(f, "board error: {e}"),
            Self::InvalidConfig { detail } => write!(f, "invalid evaluation config: {detail}"),
            Self::CanonFailed { detail } => write!(f, "canonical JSON error: {detail}"),
            Self::Io { detail } => write!(f, "I/O error: {detail}"),
        }
    }
}

impl std::error::Error for RunError {}

impl From<SearchError> for RunError {
    fn from(e: SearchError) -> Self {
        Self::Search(e)
    }
}

impl From<BoardError> for RunError {
    fn from(e: BoardError) -> Self {
        Self::Board(e)
    }
}

impl From<CanonError> for RunError {
    fn from(e: CanonError) -> Self {
        Self::CanonFailed {
            detail: e.to_string(),
        }
    }
}

/// Experiment grid. The default mirrors the classic 8-puzzle study:
/// scrambles of 10 to 50 moves, seeds 0 to 9, all four heuristics, and a
/// 60 second limit per instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluationConfig {
    pub side: u8,
    pub scramble_lengths: Vec<usize>,
    pub seeds: Vec<u64>,
    pub heuristics: Vec<HeuristicKind>,
    pub policy: SearchPolicy,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            side: 3,
            scramble_lengths: vec![10, 20, 30, 40, 50],
            seeds: (0..10).collect(),
            heuristics: HeuristicKind::ALL.to_vec(),
            policy: SearchPolicy::default(),
        }
    }
}

impl EvaluationConfig {
    /// Check the grid before running anything.
    ///
    /// # Errors
    ///
    /// Returns [`RunError::InvalidConfig`] for an empty axis,
    /// [`RunError::Board`] for an unsupported side and [`RunError::Search`]
    /// for an invalid policy.
    pub fn validate(&self) -> Result<(), RunError> {
        SlidingPuzzle::new(self.side)?;
        self.policy.validate()?;
        for (axis, empty) in [
            ("scramble_lengths", self.scramble_lengths.is_empty()),
            ("seeds", self.seeds.is_empty()),
            ("heuristics", self.heuristics.is_empty()),
        ] {
            if empty {
                return Err(RunError::InvalidConfig {
                    detail: format!("{axis} is empty"),
                });
            }
        }
        Ok(())
    }

    /// Number of instances the grid will run.
    #[must_use]
    pub fn instance_count(&self) -> usize {
        self.scramble_lengths.len() * self.seeds.len() * self.heuristics.len()
    }
}

/// One scrambled start board and how it was produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PuzzleInstance {
    pub scramble_length: usize,
    pub seed: u64,
    pub board: Board,
}

impl PuzzleInstance {
    /// Scramble the solved board of side `side` with `scramble_length` seeded moves.
    ///
    /// # Errors
    ///
    /// Returns [`RunError::Board`] if `side` is out of range.
    pub fn generate(side: u8, scramble_length: usize, seed: u64) -> Result<Self, RunError> {
        let (board, _) = Board::scrambled(side, scramble_length, seed)?;
        Ok(Self {
            scramble_length,
            seed,
            board,
        })
    }
}

/// Result of solving one instance with one heuristic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluationRecord {
    pub scramble_length: usize,
    pub seed: u64,
    pub heuristic: HeuristicKind,
    pub outcome: SearchOutcome<Move>,
    /// The returned actions replay from the start board to the solved board.
    pub correct: bool,
    pub solution_length: Option<usize>,
    pub nodes_generated: u64,
    pub expansions: u64,
    /// Wall-clock time the engine spent on this instance, measured with a
    /// monotonic clock. Includes time the process was descheduled, so it
    /// is not CPU time; compare it only across runs on the same machine.
    pub wall_time: Duration,
}

impl EvaluationRecord {
    fn deterministic_json(&self) -> serde_json::Value {
        serde_json::json!({
            "correct": self.correct,
            "expansions": self.expansions,
            "heuristic": self.heuristic.name(),
            "nodes_generated": self.nodes_generated,
            "outcome": self.outcome.label(),
            "scramble_length": self.scramble_length,
            "seed": self.seed,
            "solution": self
                .outcome
                .actions()
                .map(|actions| actions.iter().map(ToString::to_string).collect::<Vec<_>>()),
            "solution_length": self.solution_length,
        })
    }

    fn to_json_value(&self) -> serde_json::Value {
        let mut value = self.deterministic_json();
        value["wall_time_us"] =
            serde_json::json!(u64::try_from(self.wall_time.as_micros()).unwrap_or(u64::MAX));
        value
    }
}

/// Solve one instance with `heuristic` under `policy`.
///
/// # Errors
///
/// Returns [`RunError::Board`] for an unsupported board side and
/// [`RunError::Search`] if the policy is rejected.
pub fn solve(
    instance: &PuzzleInstance,
    heuristic: HeuristicKind,
    policy: &SearchPolicy,
) -> Result<EvaluationRecord, RunError> {
    let domain = SlidingPuzzle::new(instance.board.side())?;
    let result = search(&domain, instance.board.clone(), &heuristic, policy)?;

    let correct = result
        .outcome
        .actions()
        .is_some_and(|actions| check_solution(&instance.board, actions));
    let solution_length = result.outcome.actions().map(<[Move]>::len);

    tracing::debug!(
        m = instance.scramble_length,
        seed = instance.seed,
        heuristic = heuristic.name(),
        outcome = result.outcome.label(),
        nodes = result.stats.nodes_generated,
        "instance solved"
    );

    Ok(EvaluationRecord {
        scramble_length: instance.scramble_length,
        seed: instance.seed,
        heuristic,
        correct,
        solution_length,
        nodes_generated: result.stats.nodes_generated,
        expansions: result.stats.expansions,
        wall_time: result.stats.elapsed,
        outcome: result.outcome,
    })
}

/// Run the full grid in `(scramble_length, heuristic, seed)` order.
///
/// # Errors
///
/// Returns [`RunError`] if the configuration is invalid.
pub fn evaluate(config: &EvaluationConfig) -> Result<EvaluationReport, RunError> {
    config.validate()?;
    let span = tracing::info_span!(
        "evaluate",
        side = config.side,
        instances = config.instance_count()
    );
    let _guard = span.enter();

    let mut records = Vec::with_capacity(config.instance_count());
    for &m in &config.scramble_lengths {
        for &heuristic in &config.heuristics {
            for &seed in &config.seeds {
                let instance = PuzzleInstance::generate(config.side, m, seed)?;
                records.push(solve(&instance, heuristic, &config.policy)?);
            }
        }
    }

    let solved = records.iter().filter(|r| r.outcome.is_success()).count();
    tracing::info!(records = records.len(), solved, "evaluation complete");
    Ok(EvaluationReport {
        side: config.side,
        records,
    })
}

/// Aggregate over all seeds for one `(scramble_length, heuristic)` cell.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationSummary {
    pub scramble_length: usize,
    pub heuristic: HeuristicKind,
    pub instances: usize,
    pub solved: usize,
    pub correct: usize,
    /// Mean over solved instances only; `None` when nothing was solved.
    pub mean_solution_length: Option<f64>,
    pub mean_nodes_generated: f64,
    /// Mean wall-clock time, see [`EvaluationRecord::wall_time`].
    pub mean_wall_time: Duration,
}

impl EvaluationSummary {
    fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "correct": self.correct,
            "heuristic": self.heuristic.name(),
            "instances": self.instances,
            "mean_wall_time_us": u64::try_from(self.mean_wall_time.as_micros()).unwrap_or(u64::MAX),
            "mean_nodes_generated": self.mean_nodes_generated,
            "mean_solution_length": self.mean_solution_length,
            "scramble_length": self.scramble_length,
            "solved": self.solved,
        })
    }
}

/// All records of one evaluation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluationReport {
    pub side: u8,
    pub records: Vec<EvaluationRecord>,
}

impl EvaluationReport {
    /// Per-cell aggregates, ordered by scramble length then heuristic.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn summaries(&self) -> Vec<EvaluationSummary> {
        let mut cells: BTreeMap<(usize, HeuristicKind), Vec<&EvaluationRecord>> = BTreeMap::new();
        for record in &self.records {
            cells
                .entry((record.scramble_length, record.heuristic))
                .or_default()
                .push(record);
        }

        cells
            .into_iter()
            .map(|((scramble_length, heuristic), group)| {
                let instances = group.len();
                let lengths: Vec<usize> = group.iter().filter_map(|r| r.solution_length).collect();
                let mean_solution_length = (!lengths.is_empty())
                    .then(|| lengths.iter().sum::<usize>() as f64 / lengths.len() as f64);
                let nodes: u64 = group.iter().map(|r| r.nodes_generated).sum();
                let wall_time: Duration = group.iter().map(|r| r.wall_time).sum();
                EvaluationSummary {
                    scramble_length,
                    heuristic,
                    instances,
                    solved: lengths.len(),
                    correct: group.iter().filter(|r| r.correct).count(),
                    mean_solution_length,
                    mean_nodes_generated: nodes as f64 / instances as f64,
                    mean_wall_time: wall_time / u32::try_from(instances).unwrap_or(u32::MAX),
                }
            })
            .collect()
    }

    /// Full JSON view: records with timing plus summaries.
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "records": self.records.iter().map(EvaluationRecord::to_json_value).collect::<Vec<_>>(),
            "side": self.side,
            "summaries": self
                .summaries()
                .iter()
                .map(EvaluationSummary::to_json_value)
                .collect::<Vec<_>>(),
        })
    }

    /// Canonical bytes of the timing-free portion (records without
    /// wall time; summaries are derived and left out).
    ///
    /// # Errors
    ///
    /// Returns [`RunError::CanonFailed`] if serialization fails.
    pub fn to_canonical_json_bytes(&self) -> Result<Vec<u8>, RunError> {
        let value = serde_json::json!({
            "records": self
                .records
                .iter()
                .map(EvaluationRecord::deterministic_json)
                .collect::<Vec<_>>(),
            "side": self.side,
        });
        Ok(canonical_json_bytes(&value)?)
    }

    /// Domain-separated digest of [`Self::to_canonical_json_bytes`].
    ///
    /// # Errors
    ///
    /// Returns [`RunError::CanonFailed`] if serialization fails.
    pub fn digest(&self) -> Result<String, RunError> {
        let bytes = self.to_canonical_json_bytes()?;
        Ok(canonical_hash(DOMAIN_EVALUATION_REPORT, &bytes))
    }

    /// Write the full JSON view (pretty-printed, with digest) to `path`
    /// via a temp file and rename.
    ///
    /// # Errors
    ///
    /// Returns [`RunError::Io`] on filesystem failure.
    pub fn write_json(&self, path: &Path) -> Result<(), RunError> {
        let mut value = self.to_json_value();
        value["digest"] = serde_json::Value::String(self.digest()?);
        let bytes = serde_json::to_vec_pretty(&value).map_err(|e| RunError::CanonFailed {
            detail: e.to_string(),
        })?;

        let dir = path.parent().ok_or_else(|| RunError::Io {
            detail: "no parent directory".into(),
        })?;
        let temp_path = dir.join(format!(
            ".tmp_{}",
            path.file_name().unwrap_or_default().to_string_lossy()
        ));
        std::fs::write(&temp_path, &bytes).map_err(|e| RunError::Io {
            detail: format!("write {}: {e}", temp_path.display()),
        })?;
        std::fs::rename(&temp_path, path).map_err(|e| RunError::Io {
            detail: format!("rename {} -> {}: {e}", temp_path.display(), path.display()),
        })?;
        Ok(())
    }
}
