use super::{AlgorithmKind, SearchAlgorithm};
use crate::common::{construct_path, manhattan, step, Cell, Explored, ParentMap, Path, DIRECTIONS};
use crate::map::Maze;

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};
use tracing::{debug, instrument, trace};

/// A* search guided by the Manhattan distance to the goal.
#[derive(Debug, Default)]
pub struct AStar {
    explored_nodes: Vec<Cell>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Node {
    position: Cell,
    f_cost: usize,
    g_cost: usize,
}

// Lowest f first, then lowest g, then smallest (x, y).
impl Ord for Node {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f_cost
            .cmp(&self.f_cost)
            .then_with(|| other.g_cost.cmp(&self.g_cost))
            .then_with(|| other.position.cmp(&self.position))
    }
}

impl PartialOrd for Node {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Admissible and consistent on a 4-connected unit-cost grid.
pub fn heuristic(position: Cell, goal: Cell) -> usize {
    manhattan(position, goal)
}

impl SearchAlgorithm for AStar {
    fn kind(&self) -> AlgorithmKind {
        AlgorithmKind::AStar
    }

    #[instrument(skip_all, name = "a_star", fields(start = ?maze.start(), goal = ?maze.goal()), level = "debug")]
    fn solve(&mut self, maze: &Maze) -> Path {
        let (start, goal) = (maze.start(), maze.goal());

        let mut open_list = BinaryHeap::new();
        let mut closed_list = HashSet::new();
        let mut g_cost = HashMap::from([(start, 0)]);
        let mut parents = ParentMap::from([(start, None)]);
        let mut explored = Explored::starting_at(start);

        open_list.push(Node {
            position: start,
            f_cost: heuristic(start, goal),
            g_cost: 0,
        });

        while let Some(current) = open_list.pop() {
            if !closed_list.insert(current.position) {
                continue;
            }
            trace!("expand node: {current:?}");

            if current.position == goal {
                self.explored_nodes = explored.into_vec();
                return construct_path(&parents, current.position);
            }

            // Assuming uniform cost.
            let tentative_g_cost = current.g_cost + 1;

            for direction in DIRECTIONS {
                let Some(neighbor) = step(current.position, direction, maze.width(), maze.height())
                else {
                    continue;
                };
                if !maze.is_walkable(neighbor.0, neighbor.1) {
                    continue;
                }
                if tentative_g_cost >= *g_cost.get(&neighbor).unwrap_or(&usize::MAX) {
                    continue;
                }

                g_cost.insert(neighbor, tentative_g_cost);
                parents.insert(neighbor, Some(current.position));
                explored.record(neighbor);
                open_list.push(Node {
                    position: neighbor,
                    f_cost: tentative_g_cost + heuristic(neighbor, goal),
                    g_cost: tentative_g_cost,
                });
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
    use crate::algorithm::tests::{assert_valid_path, init_tracing, open_maze, random_mazes};
    use crate::algorithm::Ucs;

    // Ideal Path
    // [(2, 2), (1, 2), (0, 2), (0, 1), (0, 0)]
    // or
    // [(2, 2), (2, 1), (2, 0), (1, 0), (0, 0)]
    #[test]
    fn test_a_star_open_grid() {
        init_tracing();
        let maze = open_maze(3, 3, (2, 2), (0, 0));
        let mut a_star = AStar::default();
        let path = a_star.solve(&maze);
        debug!("{path:?}");
        assert_valid_path(&maze, &path);
        assert_eq!(path.len(), 5);
    }

    #[test]
    fn test_a_star_straight_line_explores_little() {
        init_tracing();
        let maze = open_maze(5, 5, (0, 2), (4, 2));
        let mut a_star = AStar::default();
        let path = a_star.solve(&maze);
        assert_eq!(path, vec![(0, 2), (1, 2), (2, 2), (3, 2), (4, 2)]);
        // Each expansion along the row discovers the cells above and below it.
        assert_eq!(a_star.explored_nodes().len(), 13);
    }

    #[test]
    fn test_node_order() {
        let mut open_list = BinaryHeap::new();
        let pushed = [((3, 0), 4, 1), ((0, 0), 4, 2), ((2, 0), 3, 3), ((1, 0), 4, 1)];
        for (position, f_cost, g_cost) in pushed {
            open_list.push(Node {
                position,
                f_cost,
                g_cost,
            });
        }
        let order: Vec<Cell> = std::iter::from_fn(|| open_list.pop().map(|n| n.position)).collect();
        // (1, 0) was pushed after (3, 0) but wins the f and g tie on position.
        assert_eq!(order, vec![(2, 0), (1, 0), (3, 0), (0, 0)]);
    }

    #[test]
    fn test_a_star_equal_cost_paths_prefer_smaller_cells() {
        let maze = open_maze(2, 2, (1, 1), (0, 0));
        let mut a_star = AStar::default();
        // (1, 0) is pushed before (0, 1); both have f 2 and g 1, so (0, 1) goes first.
        assert_eq!(a_star.solve(&maze), vec![(1, 1), (0, 1), (0, 0)]);
    }

    #[test]
    fn test_a_star_explores_no_more_than_ucs() {
        let mut mazes = random_mazes(40, 11);
        mazes.push(Maze::reference());
        for maze in mazes {
            let mut a_star = AStar::default();
            let mut ucs = Ucs::default();
            let a_star_path = a_star.solve(&maze);
            let ucs_path = ucs.solve(&maze);
            assert_eq!(a_star_path.len(), ucs_path.len());
            if !a_star_path.is_empty() {
                assert!(
                    a_star.explored_nodes().len() <= ucs.explored_nodes().len(),
                    "{maze:?}"
                );
            }
        }
    }
}
