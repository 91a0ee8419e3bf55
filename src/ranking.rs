//! Scores algorithms against each other and picks the best one.
//!
//! An algorithm earns a criterion's points when its value ties or beats the
//! table minimum for that criterion, so several algorithms can earn the same
//! points.

use serde::Serialize;
use tracing::{debug, instrument};

use crate::algorithm::AlgorithmKind;
use crate::error::RankingError;
use crate::stat::{AlgorithmMetrics, Comparison};

pub const PATH_LENGTH_POINTS: u32 = 20;
pub const EXEC_TIME_POINTS: u32 = 20;
pub const EXPLORED_NODES_POINTS: u32 = 15;
pub const PATH_COST_POINTS: u32 = 20;
pub const MEMORY_POINTS: u32 = 15;
pub const OPTIMAL_POINTS: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Score {
    pub algorithm: AlgorithmKind,
    pub points: u32,
}

/// Table minimum of every criterion.
struct Minimums {
    path_length: usize,
    exec_time_ms: f64,
    explored_nodes: usize,
    path_cost: usize,
    memory: f64,
}

impl Minimums {
    fn of(table: &[AlgorithmMetrics]) -> Self {
        Minimums {
            path_length: table.iter().map(|m| m.path_length).min().unwrap_or(0),
            exec_time_ms: table.iter().map(|m| m.exec_time_ms).fold(f64::INFINITY, f64::min),
            explored_nodes: table.iter().map(|m| m.explored_nodes).min().unwrap_or(0),
            path_cost: table.iter().map(|m| m.path_cost).min().unwrap_or(0),
            memory: table.iter().map(|m| m.memory).fold(f64::INFINITY, f64::min),
        }
    }

    fn score(&self, metrics: &AlgorithmMetrics) -> u32 {
        let mut points = 0;
        if metrics.path_length <= self.path_length {
            points += PATH_LENGTH_POINTS;
        }
        if metrics.exec_time_ms <= self.exec_time_ms {
            points += EXEC_TIME_POINTS;
        }
        if metrics.explored_nodes <= self.explored_nodes {
            points += EXPLORED_NODES_POINTS;
        }
        if metrics.path_cost <= self.path_cost {
            points += PATH_COST_POINTS;
        }
        if metrics.memory <= self.memory {
            points += MEMORY_POINTS;
        }
        if metrics.is_optimal {
            points += OPTIMAL_POINTS;
        }
        points
    }
}

/// Score every algorithm of the table, in table order.
pub fn score_table(table: &[AlgorithmMetrics]) -> Result<Vec<Score>, RankingError> {
    if table.is_empty() {
        return Err(RankingError::EmptyTable);
    }
    let minimums = Minimums::of(table);
    Ok(table
        .iter()
        .map(|metrics| Score {
            algorithm: metrics.algorithm,
            points: minimums.score(metrics),
        })
        .collect())
}

/// The algorithm with the strictly highest score. On a tie the first one in
/// table order is returned; callers should not rely on which.
#[instrument(skip_all, level = "debug")]
pub fn select_best(table: &[AlgorithmMetrics]) -> Result<&AlgorithmMetrics, RankingError> {
    let scores = score_table(table)?;
    let mut best = 0;
    for (index, score) in scores.iter().enumerate() {
        debug!("{} scored {}", score.algorithm, score.points);
        if score.points > scores[best].points {
            best = index;
        }
    }
    Ok(&table[best])
}

/// A comparison with its scores and winner, as written to the JSON report.
#[derive(Debug, Clone, Serialize)]
pub struct Report<'a> {
    #[serde(flatten)]
    pub comparison: &'a Comparison,
    pub scores: Vec<Score>,
    pub best: Option<AlgorithmKind>,
}

impl<'a> Report<'a> {
    /// Scores and best are empty when no algorithm reached the goal.
    pub fn new(comparison: &'a Comparison) -> Self {
        let scores = score_table(&comparison.metrics).unwrap_or_default();
        let best = select_best(&comparison.metrics)
            .ok()
            .map(|metrics| metrics.algorithm);
        Report {
            comparison,
            scores,
            best,
        }
    }
}
