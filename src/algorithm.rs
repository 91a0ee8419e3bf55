mod astar;
mod bfs;
mod dfs;
mod ids;
mod ucs;

pub use astar::AStar;
pub use bfs::Bfs;
pub use dfs::Dfs;
pub use ids::Ids;
pub use ucs::Ucs;

use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::common::{Cell, Path};
use crate::error::SearchError;
use crate::map::Maze;

/// The five search strategies, in the order they are compared.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum AlgorithmKind {
    Bfs,
    Dfs,
    Ids,
    Ucs,
    #[value(name = "astar")]
    AStar,
}

impl AlgorithmKind {
    pub const ALL: [AlgorithmKind; 5] = [
        AlgorithmKind::Bfs,
        AlgorithmKind::Dfs,
        AlgorithmKind::Ids,
        AlgorithmKind::Ucs,
        AlgorithmKind::AStar,
    ];

    pub fn label(self) -> &'static str {
        match self {
            AlgorithmKind::Bfs => "BFS",
            AlgorithmKind::Dfs => "DFS",
            AlgorithmKind::Ids => "IDS",
            AlgorithmKind::Ucs => "UCS",
            AlgorithmKind::AStar => "AStar",
        }
    }

    /// Relative weighting factor applied to the explored-node count. Not a
    /// physical memory measurement.
    pub fn memory_coefficient(self) -> f64 {
        match self {
            AlgorithmKind::Bfs => BFS_MEMORY_COEFFICIENT,
            AlgorithmKind::Dfs => DFS_MEMORY_COEFFICIENT,
            AlgorithmKind::Ids => IDS_MEMORY_COEFFICIENT,
            AlgorithmKind::Ucs => UCS_MEMORY_COEFFICIENT,
            AlgorithmKind::AStar => ASTAR_MEMORY_COEFFICIENT,
        }
    }

    /// Whether the strategy always returns a minimum-cost path on a unit-cost grid.
    pub fn is_optimal(self) -> bool {
        matches!(
            self,
            AlgorithmKind::Bfs | AlgorithmKind::Ucs | AlgorithmKind::AStar
        )
    }

    pub fn solver(self) -> Box<dyn SearchAlgorithm> {
        match self {
            AlgorithmKind::Bfs => Box::<Bfs>::default(),
            AlgorithmKind::Dfs => Box::<Dfs>::default(),
            AlgorithmKind::Ids => Box::<Ids>::default(),
            AlgorithmKind::Ucs => Box::<Ucs>::default(),
            AlgorithmKind::AStar => Box::<AStar>::default(),
        }
    }
}

impl fmt::Display for AlgorithmKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

pub const BFS_MEMORY_COEFFICIENT: f64 = 2.0;
pub const DFS_MEMORY_COEFFICIENT: f64 = 1.5;
pub const IDS_MEMORY_COEFFICIENT: f64 = 1.2;
pub const UCS_MEMORY_COEFFICIENT: f64 = 2.5;
pub const ASTAR_MEMORY_COEFFICIENT: f64 = 3.0;

/// Shared contract of every grid search strategy.
///
/// A solver keeps no state between calls except the explored cells of its
/// last run, which `solve` overwrites.
pub trait SearchAlgorithm {
    fn kind(&self) -> AlgorithmKind;

    /// Search from the maze start to its goal. Returns an empty path when the
    /// goal is unreachable.
    fn solve(&mut self, maze: &Maze) -> Path;

    /// Cells discovered by the last `solve`, in first-discovery order.
    fn explored_nodes(&self) -> &[Cell];

    fn search(&mut self, maze: &Maze) -> Result<Path, SearchError> {
        let path = self.solve(maze);
        if path.is_empty() {
            Err(SearchError::PathNotFound {
                algorithm: self.kind(),
            })
        } else {
            Ok(path)
        }
    }
}
