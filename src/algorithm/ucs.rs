use super::{AlgorithmKind, SearchAlgorithm};
use crate::common::{construct_path, Cell, Explored, ParentMap, Path};
use crate::map::Maze;

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};
use tracing::{debug, instrument, trace};

/// Uniform-cost (Dijkstra) search over unit-cost moves.
#[derive(Debug, Default)]
pub struct Ucs {
    explored_nodes: Vec<Cell>,
}

/// Frontier entry. Lowest cost pops first; among equal costs the entry
/// inserted first wins.
#[derive(Debug, Clone, PartialEq, Eq)]
struct FrontierEntry {
    cost: usize,
    sequence: usize,
    cell: Cell,
    predecessor: Option<Cell>,
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Cost of moving between two adjacent cells.
fn step_cost(_from: Cell, _to: Cell) -> usize {
    1
}

impl SearchAlgorithm for Ucs {
    fn kind(&self) -> AlgorithmKind {
        AlgorithmKind::Ucs
    }

    #[instrument(skip_all, name = "ucs", fields(start = ?maze.start(), goal = ?maze.goal()), level = "debug")]
    fn solve(&mut self, maze: &Maze) -> Path {
        let (start, goal) = (maze.start(), maze.goal());

        let mut frontier = BinaryHeap::new();
        let mut sequence = 0;
        let mut cost_so_far = HashMap::from([(start, 0)]);
        let mut parents = ParentMap::new();
        let mut finalized = HashSet::new();
        let mut explored = Explored::starting_at(start);

        frontier.push(FrontierEntry {
            cost: 0,
            sequence,
            cell: start,
            predecessor: None,
        });

        while let Some(FrontierEntry {
            cost,
            cell: current,
            predecessor,
            ..
        }) = frontier.pop()
        {
            // A cheaper duplicate of this cell was already processed.
            if !finalized.insert(current) {
                continue;
            }
            trace!("expand node: {current:?} cost {cost}");
            parents.insert(current, predecessor);

            if current == goal {
                self.explored_nodes = explored.into_vec();
                return construct_path(&parents, current);
            }

            for neighbor in maze.neighbors(current.0, current.1) {
                let new_cost = cost + step_cost(current, neighbor);
                if cost_so_far
                    .get(&neighbor)
                    .is_some_and(|&known| known <= new_cost)
                {
                    continue;
                }
                cost_so_far.insert(neighbor, new_cost);
                explored.record(neighbor);
                sequence += 1;
                frontier.push(FrontierEntry {
                    cost: new_cost,
                    sequence,
                    cell: neighbor,
                    predecessor: Some(current),
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
