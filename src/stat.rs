use std::time::Instant;

use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::algorithm::{AlgorithmKind, SearchAlgorithm};
use crate::common::{manhattan, Cell, Path};
use crate::map::Maze;

/// Default number of timed repetitions per algorithm.
pub const DEFAULT_TIMING_RUNS: usize = 10;

/// Derived statistics of one algorithm on one maze.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlgorithmMetrics {
    pub algorithm: AlgorithmKind,
    pub path: Path,
    pub path_length: usize,
    pub path_cost: usize,
    pub explored_nodes: usize,
    pub exec_time_ms: f64,
    pub memory: f64,
    pub is_optimal: bool,
    pub success_rate: f64,
}

impl AlgorithmMetrics {
    pub fn new(
        algorithm: AlgorithmKind,
        path: Path,
        explored_nodes: usize,
        exec_time_ms: f64,
    ) -> Self {
        AlgorithmMetrics {
            algorithm,
            path_length: path.len(),
            path_cost: path_cost(&path),
            explored_nodes,
            exec_time_ms,
            memory: explored_nodes as f64 * algorithm.memory_coefficient(),
            is_optimal: algorithm.is_optimal(),
            success_rate: if path.is_empty() { 0.0 } else { 100.0 },
            path,
        }
    }

    pub(crate) fn print(&self) {
        info!(
            "{}: {} steps | Cost: {} | {} explored | Time: {:.2} ms",
            self.algorithm, self.path_length, self.path_cost, self.explored_nodes, self.exec_time_ms
        );
    }
}

/// Sum of the Manhattan distance between consecutive cells.
pub fn path_cost(path: &[Cell]) -> usize {
    path.windows(2).map(|pair| manhattan(pair[0], pair[1])).sum()
}

/// Outcome of running a set of algorithms on one maze.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Comparison {
    /// Algorithms that found a path, in run order.
    pub metrics: Vec<AlgorithmMetrics>,
    /// Algorithms that found no path. They are not scored.
    pub failures: Vec<AlgorithmKind>,
}

impl Comparison {
    pub fn get(&self, algorithm: AlgorithmKind) -> Option<&AlgorithmMetrics> {
        self.metrics.iter().find(|m| m.algorithm == algorithm)
    }
}

/// Mean wall-clock time of `runs` calls to `solve`, in milliseconds.
fn average_time_ms(solver: &mut dyn SearchAlgorithm, maze: &Maze, runs: usize) -> f64 {
    let runs = runs.max(1);
    let mut total_ns = 0u128;
    for _ in 0..runs {
        let start_time = Instant::now();
        solver.solve(maze);
        total_ns += start_time.elapsed().as_nanos();
    }
    total_ns as f64 / runs as f64 / 1_000_000.0
}

/// Run every algorithm once to capture its path and explored cells, then
/// `timing_runs` more times to average its execution time.
#[instrument(skip_all, level = "debug", fields(width = maze.width(), height = maze.height()))]
pub fn compare_algorithms(
    maze: &Maze,
    algorithms: &[AlgorithmKind],
    timing_runs: usize,
) -> Comparison {
    let mut comparison = Comparison::default();

    for &algorithm in algorithms {
        let mut solver = algorithm.solver();
        let path = match solver.search(maze) {
            Ok(path) => path,
            Err(err) => {
                warn!("{err}");
                comparison.failures.push(algorithm);
                continue;
            }
        };
        let explored_nodes = solver.explored_nodes().len();

        let exec_time_ms = average_time_ms(solver.as_mut(), maze, timing_runs);
        debug!("{algorithm} averaged {exec_time_ms:.4} ms over {timing_runs} runs");

        let metrics = AlgorithmMetrics::new(algorithm, path, explored_nodes, exec_time_ms);
        metrics.print();
        comparison.metrics.push(metrics);
    }

    comparison
}
