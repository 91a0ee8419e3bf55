//! Error types for maze construction, searching and ranking.

use crate::algorithm::AlgorithmKind;
use crate::common::Cell;
use thiserror::Error;

/// Error when building or loading a maze.
#[derive(Debug, Error)]
pub enum MazeError {
    /// The grid has no rows or no columns.
    #[error("Maze grid must have at least one row and one column")]
    Empty,

    /// A row does not match the width of the first row.
    #[error("Maze row {row} has {got} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        got: usize,
    },

    /// Occupancy values are 0 (free) or 1 (wall).
    #[error("Invalid occupancy value {value} at {cell:?}, expected 0 or 1")]
    InvalidCell { cell: Cell, value: u8 },

    #[error("{role} {cell:?} is outside the {width}x{height} maze")]
    OutOfBounds {
        role: &'static str,
        cell: Cell,
        width: usize,
        height: usize,
    },

    #[error("{role} {cell:?} is a wall")]
    Blocked { role: &'static str, cell: Cell },

    /// The map file header is missing or malformed.
    #[error("Malformed map header at line {line}: {reason}")]
    Header { line: usize, reason: String },

    #[error("Unknown map tile '{glyph}' at {cell:?}")]
    UnknownTile { glyph: char, cell: Cell },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Structured outcome of a search that did not reach the goal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("[{algorithm}] No path found")]
    PathNotFound { algorithm: AlgorithmKind },
}

/// Errors for ranking a metrics table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RankingError {
    /// Ranking requires at least one successful algorithm result.
    #[error("Cannot rank an empty metrics table")]
    EmptyTable,
}
