use super::{AlgorithmKind, SearchAlgorithm};
use crate::common::{construct_path, step, Cell, Explored, ParentMap, Path, DIRECTIONS};
use crate::map::Maze;

use std::collections::HashSet;
use tracing::{debug, instrument, trace};

/// Iterative deepening depth-first search.
///
/// Runs a depth-limited search for every limit from 0 up to `width * height`,
/// each with a fresh visited set and parent map, and stops at the first limit
/// that reaches the goal.
#[derive(Debug, Default)]
pub struct Ids {
    explored_nodes: Vec<Cell>,
}

/// One level of the depth-limited search: the cell being expanded, the depth
/// budget left below it and the next direction to try.
struct Frame {
    cell: Cell,
    remaining: usize,
    next_direction: usize,
}

enum Limited {
    Found,
    /// The depth limit pruned at least one branch.
    CutOff,
    /// The whole reachable region was searched without hitting the limit.
    Exhausted,
}

impl SearchAlgorithm for Ids {
    fn kind(&self) -> AlgorithmKind {
        AlgorithmKind::Ids
    }

    #[instrument(skip_all, name = "ids", fields(start = ?maze.start(), goal = ?maze.goal()), level = "debug")]
    fn solve(&mut self, maze: &Maze) -> Path {
        let start = maze.start();
        let max_depth = maze.width() * maze.height();

        for limit in 0..=max_depth {
            let mut parents = ParentMap::from([(start, None)]);
            let mut explored = Explored::starting_at(start);

            let outcome = depth_limited_search(maze, limit, &mut parents, &mut explored);
            self.explored_nodes = explored.into_vec();
            match outcome {
                Limited::Found => {
                    debug!("found goal at depth limit {limit}");
                    return construct_path(&parents, maze.goal());
                }
                Limited::CutOff => trace!("depth limit {limit} exhausted"),
                // Deeper limits would repeat the same search.
                Limited::Exhausted => break,
            }
        }

        debug!("cannot find solution");
        Vec::new()
    }

    fn explored_nodes(&self) -> &[Cell] {
        &self.explored_nodes
    }
}

/// Depth-limited search with an explicit frame stack. A cell is marked visited
/// when it is entered with depth budget left, and stays marked for the rest of
/// this limit.
fn depth_limited_search(
    maze: &Maze,
    limit: usize,
    parents: &mut ParentMap,
    explored: &mut Explored,
) -> Limited {
    let (start, goal) = (maze.start(), maze.goal());
    if start == goal {
        return Limited::Found;
    }
    if limit == 0 {
        return Limited::CutOff;
    }

    let mut visited = HashSet::from([start]);
    let mut stack = vec![Frame {
        cell: start,
        remaining: limit,
        next_direction: 0,
    }];
    let mut cut_off = false;

    while let Some(frame) = stack.last_mut() {
        let Some(&direction) = DIRECTIONS.get(frame.next_direction) else {
            stack.pop();
            continue;
        };
        frame.next_direction += 1;
        let (current, remaining) = (frame.cell, frame.remaining);

        let Some(neighbor) = step(current, direction, maze.width(), maze.height()) else {
            continue;
        };
        if !maze.is_walkable(neighbor.0, neighbor.1) || visited.contains(&neighbor) {
            continue;
        }

        parents.insert(neighbor, Some(current));
        explored.record(neighbor);
        if neighbor == goal {
            return Limited::Found;
        }

        if remaining > 1 {
            visited.insert(neighbor);
            stack.push(Frame {
                cell: neighbor,
                remaining: remaining - 1,
                next_direction: 0,
            });
        } else {
            cut_off = true;
        }
    }

    if cut_off {
        Limited::CutOff
    } else {
        Limited::Exhausted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::tests::{assert_valid_path, init_tracing, open_maze, walled_off_maze};

    #[test]
    fn test_ids_open_grid() {
        init_tracing();
        let maze = open_maze(3, 3, (0, 0), (2, 2));
        let path = Ids::default().solve(&maze);
        assert_eq!(path, vec![(0, 0), (0, 1), (0, 2), (1, 2), (2, 2)]);
    }

    #[test]
    fn test_ids_depth_limits() {
        let maze = open_maze(3, 3, (0, 0), (2, 2));

        let mut parents = ParentMap::from([((0, 0), None)]);
        let mut explored = Explored::starting_at((0, 0));
        assert!(matches!(
            depth_limited_search(&maze, 3, &mut parents, &mut explored),
            Limited::CutOff
        ));

        let mut parents = ParentMap::from([((0, 0), None)]);
        let mut explored = Explored::starting_at((0, 0));
        assert!(matches!(
            depth_limited_search(&maze, 4, &mut parents, &mut explored),
            Limited::Found
        ));
        assert_valid_path(&maze, &construct_path(&parents, (2, 2)));
    }

    #[test]
    fn test_ids_stops_when_region_exhausted() {
        let maze = walled_off_maze();
        let mut parents = ParentMap::from([((0, 0), None)]);
        let mut explored = Explored::starting_at((0, 0));
        assert!(matches!(
            depth_limited_search(&maze, 10, &mut parents, &mut explored),
            Limited::Exhausted
        ));

        let mut ids = Ids::default();
        assert!(ids.solve(&maze).is_empty());
        assert_eq!(ids.explored_nodes().len(), 4);
    }

    // Long winding corridor, deeper than the grid is wide or tall.
    #[test]
    fn test_ids_winding_corridor() {
        init_tracing();
        let maze = Maze::new(
            vec![
                vec![0, 1, 0, 0, 0],
                vec![0, 1, 0, 1, 0],
                vec![0, 0, 0, 1, 0],
            ],
            (0, 0),
            (4, 2),
        )
        .unwrap();
        let path = Ids::default().solve(&maze);
        assert_valid_path(&maze, &path);
        assert_eq!(path.len(), 11);
    }
}
