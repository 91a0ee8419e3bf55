use std::collections::{HashMap, HashSet};

/// Grid coordinate `(x, y)`, `x` being the column and `y` the row.
pub type Cell = (usize, usize);

/// Ordered cells from start to goal inclusive. Empty means no path was found.
pub type Path = Vec<Cell>;

/// Predecessor of every reached cell. The start maps to `None`.
pub(crate) type ParentMap = HashMap<Cell, Option<Cell>>;

/// Up, down, left, right. Every solver expands neighbors in this order.
pub(crate) const DIRECTIONS: [(i64, i64); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];

pub fn manhattan(a: Cell, b: Cell) -> usize {
    a.0.abs_diff(b.0) + a.1.abs_diff(b.1)
}

/// Apply a direction to a cell, returning `None` when the result leaves the
/// `width` x `height` rectangle.
pub(crate) fn step(cell: Cell, (dx, dy): (i64, i64), width: usize, height: usize) -> Option<Cell> {
    let new_x = cell.0 as i64 + dx;
    let new_y = cell.1 as i64 + dy;
    if new_x >= 0 && new_y >= 0 && new_x < width as i64 && new_y < height as i64 {
        Some((new_x as usize, new_y as usize))
    } else {
        None
    }
}

/// Walk the parent map back from `goal` and return the path in start-to-goal order.
pub(crate) fn construct_path(parents: &ParentMap, goal: Cell) -> Path {
    let mut path = vec![goal];
    let mut current = goal;
    while let Some(&Some(prev)) = parents.get(&current) {
        path.push(prev);
        current = prev;
    }
    path.reverse();
    path
}

/// Cells in first-discovery order. A cell is recorded at most once.
#[derive(Debug, Default)]
pub(crate) struct Explored {
    order: Vec<Cell>,
    seen: HashSet<Cell>,
}

impl Explored {
    pub(crate) fn starting_at(start: Cell) -> Self {
        let mut explored = Explored::default();
        explored.record(start);
        explored
    }

    /// Returns `true` the first time `cell` is recorded.
    pub(crate) fn record(&mut self, cell: Cell) -> bool {
        if self.seen.insert(cell) {
            self.order.push(cell);
            true
        } else {
            false
        }
    }

    pub(crate) fn into_vec(self) -> Vec<Cell> {
        self.order
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manhattan() {
        assert_eq!(manhattan((0, 0), (2, 2)), 4);
        assert_eq!(manhattan((5, 1), (2, 3)), 5);
        assert_eq!(manhattan((3, 3), (3, 3)), 0);
    }

    #[test]
    fn test_step_respects_bounds() {
        assert_eq!(step((0, 0), (0, -1), 3, 3), None);
        assert_eq!(step((0, 0), (-1, 0), 3, 3), None);
        assert_eq!(step((2, 2), (1, 0), 3, 3), None);
        assert_eq!(step((1, 1), (0, 1), 3, 3), Some((1, 2)));
    }

    #[test]
    fn test_construct_path() {
        let mut parents = ParentMap::new();
        parents.insert((0, 0), None);
        parents.insert((1, 0), Some((0, 0)));
        parents.insert((1, 1), Some((1, 0)));
        assert_eq!(
            construct_path(&parents, (1, 1)),
            vec![(0, 0), (1, 0), (1, 1)]
        );
        assert_eq!(construct_path(&parents, (0, 0)), vec![(0, 0)]);
    }

    #[test]
    fn test_explored_records_once() {
        let mut explored = Explored::starting_at((0, 0));
        assert!(explored.record((1, 0)));
        assert!(!explored.record((0, 0)));
        assert!(!explored.record((1, 0)));
        assert!(explored.record((2, 0)));
        assert_eq!(explored.into_vec(), vec![(0, 0), (1, 0), (2, 0)]);
    }
}
