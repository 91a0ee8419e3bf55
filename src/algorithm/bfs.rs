use super::{AlgorithmKind, SearchAlgorithm};
use crate::common::{construct_path, step, Cell, Explored, ParentMap, Path, DIRECTIONS};
use crate::map::Maze;

use std::collections::{HashSet, VecDeque};
use tracing::{debug, instrument, trace};

/// Breadth-first search. Shortest path by cell count.
#[derive(Debug, Default)]
pub struct Bfs {
    explored_nodes: Vec<Cell>,
}

impl SearchAlgorithm for Bfs {
    fn kind(&self) -> AlgorithmKind {
        AlgorithmKind::Bfs
    }

    #[instrument(skip_all, name = "bfs", fields(start = ?maze.start(), goal = ?maze.goal()), level = "debug")]
    fn solve(&mut self, maze: &Maze) -> Path {
        let (start, goal) = (maze.start(), maze.goal());

        let mut queue = VecDeque::from([start]);
        let mut visited = HashSet::from([start]);
        let mut parents = ParentMap::from([(start, None)]);
        let mut explored = Explored::starting_at(start);

        while let Some(current) = queue.pop_front() {
            trace!("expand node: {current:?}");
            if current == goal {
                self.explored_nodes = explored.into_vec();
                return construct_path(&parents, current);
            }

            for direction in DIRECTIONS {
                let Some(neighbor) = step(current, direction, maze.width(), maze.height()) else {
                    continue;
                };
                if !maze.is_walkable(neighbor.0, neighbor.1) || !visited.insert(neighbor) {
                    continue;
                }
                queue.push_back(neighbor);
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::tests::{assert_valid_path, init_tracing, open_maze};

    #[test]
    fn test_bfs_open_grid() {
        init_tracing();
        let maze = open_maze(3, 3, (0, 0), (2, 2));
        let mut bfs = Bfs::default();
        let path = bfs.solve(&maze);
        assert_valid_path(&maze, &path);
        assert_eq!(path.len(), 5);
        // Every cell is discovered before the goal is dequeued.
        assert_eq!(bfs.explored_nodes().len(), 9);
        assert_eq!(bfs.explored_nodes()[..3], [(0, 0), (0, 1), (1, 0)]);
    }

    // S # .
    // . # .
    // . . G
    #[test]
    fn test_bfs_detour() {
        init_tracing();
        let maze = Maze::new(
            vec![vec![0, 1, 0], vec![0, 1, 0], vec![0, 0, 0]],
            (0, 0),
            (2, 2),
        )
        .unwrap();
        let path = Bfs::default().solve(&maze);
        assert_eq!(path, vec![(0, 0), (0, 1), (0, 2), (1, 2), (2, 2)]);
    }
}
