use super::{AlgorithmKind, SearchAlgorithm};
use crate::common::{construct_path, step, Cell, Explored, ParentMap, Path, DIRECTIONS};
use crate::map::Maze;

use std::collections::HashSet;
use tracing::{debug, instrument, trace};

/// Depth-first search with an explicit stack. No optimality guarantee.
#[derive(Debug, Default)]
pub struct Dfs {
    explored_nodes: Vec<Cell>,
}

impl SearchAlgorithm for Dfs {
    fn kind(&self) -> AlgorithmKind {
        AlgorithmKind::Dfs
    }

    #[instrument(skip_all, name = "dfs", fields(start = ?maze.start(), goal = ?maze.goal()), level = "debug")]
    fn solve(&mut self, maze: &Maze) -> Path {
        let (start, goal) = (maze.start(), maze.goal());

        let mut stack = vec![start];
        let mut visited = HashSet::from([start]);
        let mut parents = ParentMap::from([(start, None)]);
        let mut explored = Explored::starting_at(start);

        while let Some(current) = stack.pop() {
            trace!("expand node: {current:?}");
            if current == goal {
                self.explored_nodes = explored.into_vec();
                return construct_path(&parents, current);
            }

            // Pushed in direction order, so the last direction is expanded first.
            for direction in DIRECTIONS {
                let Some(neighbor) = step(current, direction, maze.width(), maze.height()) else {
                    continue;
                };
                if !maze.is_walkable(neighbor.0, neighbor.1) || !visited.insert(neighbor) {
                    continue;
                }
                stack.push(neighbor);
                parents.insert(neighbor, Some(current));
                explored.record(neighbor);
            }
        }

        debug!("cannot find solution");
        self.explored_nodes = explored.into_vec();
        Vec::new()
    }

    fn explored_nodes(&self) -> &[Cell] {
        &self.explored_nodes
    }
}
