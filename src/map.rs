use std::fs;

use tracing::debug;

use crate::common::{step, Cell, DIRECTIONS};
use crate::error::MazeError;

/// Static maze of the reference system, 0 free and 1 wall, indexed `[y][x]`.
const REFERENCE_GRID: [[u8; 20]; 12] = [
    [0, 0, 0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0],
    [0, 1, 1, 1, 0, 1, 0, 1, 0, 1, 0, 1, 1, 1, 0, 1, 0, 1, 1, 0],
    [0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 1, 0],
    [1, 1, 0, 1, 1, 1, 1, 1, 0, 1, 1, 1, 0, 1, 1, 1, 0, 1, 1, 0],
    [0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0],
    [0, 1, 1, 1, 0, 1, 0, 1, 1, 1, 1, 1, 0, 1, 0, 1, 1, 1, 1, 1],
    [0, 0, 0, 1, 0, 1, 0, 0, 0, 0, 0, 1, 0, 1, 0, 0, 0, 0, 0, 0],
    [1, 1, 0, 1, 0, 1, 1, 1, 1, 1, 0, 1, 0, 1, 1, 1, 1, 1, 0, 1],
    [0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 1, 1, 1, 0, 1, 1, 1, 1, 1, 1, 1, 0, 1, 1, 1, 1, 1, 1, 1],
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 0],
];

/// `type`, `height`, `width` and `map` precede the rows of a map file.
const MAP_HEADER_LINES: usize = 4;

/// Rectangular grid of free cells and walls with a fixed start and goal.
///
/// A `Maze` is validated once on construction and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Maze {
    width: usize,
    height: usize,
    walls: Vec<Vec<bool>>,
    start: Cell,
    goal: Cell,
}

impl Maze {
    /// Build a maze from rows of occupancy values (0 free, 1 wall).
    pub fn new(rows: Vec<Vec<u8>>, start: Cell, goal: Cell) -> Result<Self, MazeError> {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.len());
        if width == 0 {
            return Err(MazeError::Empty);
        }

        let mut walls = Vec::with_capacity(height);
        for (y, row) in rows.into_iter().enumerate() {
            if row.len() != width {
                return Err(MazeError::Ragged {
                    row: y,
                    expected: width,
                    got: row.len(),
                });
            }
            let mut wall_row = Vec::with_capacity(width);
            for (x, value) in row.into_iter().enumerate() {
                match value {
                    0 => wall_row.push(false),
                    1 => wall_row.push(true),
                    _ => return Err(MazeError::InvalidCell { cell: (x, y), value }),
                }
            }
            walls.push(wall_row);
        }

        let maze = Maze {
            width,
            height,
            walls,
            start,
            goal,
        };
        maze.check_endpoint("start", start)?;
        maze.check_endpoint("goal", goal)?;
        Ok(maze)
    }

    /// The fixed 20x12 maze, start in the top-left corner and goal in the bottom-right.
    pub fn reference() -> Self {
        let walls = REFERENCE_GRID
            .iter()
            .map(|row| row.iter().map(|&value| value == 1).collect())
            .collect();
        Maze {
            width: 20,
            height: 12,
            walls,
            start: (0, 0),
            goal: (19, 11),
        }
    }

    /// Load an octile map file. Start and goal default to the top-left and
    /// bottom-right corners.
    pub fn from_file(
        path: &str,
        start: Option<Cell>,
        goal: Option<Cell>,
    ) -> Result<Self, MazeError> {
        let content = fs::read_to_string(path)?;
        debug!("loaded map file {path}");
        Self::from_map_str(&content, start, goal)
    }

    /// Parse the octile map format:
    ///
    /// ```text
    /// type octile
    /// height 3
    /// width 4
    /// map
    /// ..@.
    /// ....
    /// .@..
    /// ```
    pub fn from_map_str(
        content: &str,
        start: Option<Cell>,
        goal: Option<Cell>,
    ) -> Result<Self, MazeError> {
        let mut lines = content.lines().enumerate();

        let _type = next_header(&mut lines, 1, "type")?;
        let height = parse_dimension(2, next_header(&mut lines, 2, "height")?)?;
        let width = parse_dimension(3, next_header(&mut lines, 3, "width")?)?;
        let _map = next_header(&mut lines, 4, "map")?;

        // Capacity follows the rows present, never the declared height.
        let mut rows = Vec::new();
        for (_, line) in lines.take(height) {
            let y = rows.len();
            let row = line
                .trim_end()
                .chars()
                .enumerate()
                .map(|(x, glyph)| match glyph {
                    '.' | 'G' | 'S' => Ok(0),
                    '@' | 'O' | 'T' | 'W' => Ok(1),
                    _ => Err(MazeError::UnknownTile { glyph, cell: (x, y) }),
                })
                .collect::<Result<Vec<u8>, _>>()?;
            rows.push(row);
        }

        if rows.len() != height {
            return Err(MazeError::Header {
                line: MAP_HEADER_LINES + rows.len() + 1,
                reason: format!("declared height {height}, found {} rows", rows.len()),
            });
        }
        if let Some((y, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != width) {
            return Err(MazeError::Ragged {
                row: y,
                expected: width,
                got: row.len(),
            });
        }

        let start = start.unwrap_or((0, 0));
        let goal = goal.unwrap_or((width.saturating_sub(1), height.saturating_sub(1)));
        Self::new(rows, start, goal)
    }

    /// Same grid with another start and goal.
    pub fn with_endpoints(mut self, start: Cell, goal: Cell) -> Result<Self, MazeError> {
        self.check_endpoint("start", start)?;
        self.check_endpoint("goal", goal)?;
        self.start = start;
        self.goal = goal;
        Ok(self)
    }

    fn check_endpoint(&self, role: &'static str, cell: Cell) -> Result<(), MazeError> {
        if cell.0 >= self.width || cell.1 >= self.height {
            return Err(MazeError::OutOfBounds {
                role,
                cell,
                width: self.width,
                height: self.height,
            });
        }
        if self.walls[cell.1][cell.0] {
            return Err(MazeError::Blocked { role, cell });
        }
        Ok(())
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn start(&self) -> Cell {
        self.start
    }

    pub fn goal(&self) -> Cell {
        self.goal
    }

    /// `true` when `(x, y)` is inside the grid and not a wall.
    pub fn is_walkable(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height && !self.walls[y][x]
    }

    /// Walkable 4-neighbors of `(x, y)` in up, down, left, right order.
    pub fn neighbors(&self, x: usize, y: usize) -> Vec<Cell> {
        DIRECTIONS
            .iter()
            .filter_map(|&direction| step((x, y), direction, self.width, self.height))
            .filter(|&(nx, ny)| !self.walls[ny][nx])
            .collect()
    }
}

fn next_header<'a>(
    lines: &mut impl Iterator<Item = (usize, &'a str)>,
    line_number: usize,
    key: &str,
) -> Result<&'a str, MazeError> {
    let (_, line) = lines.next().ok_or_else(|| MazeError::Header {
        line: line_number,
        reason: format!("missing '{key}' line"),
    })?;
    let line = line.trim();
    if !line.starts_with(key) {
        return Err(MazeError::Header {
            line: line_number,
            reason: format!("expected '{key}', found '{line}'"),
        });
    }
    Ok(line)
}

fn parse_dimension(line_number: usize, line: &str) -> Result<usize, MazeError> {
    line.split_whitespace()
        .last()
        .and_then(|value| value.parse::<usize>().ok())
        .filter(|&value| value > 0)
        .ok_or_else(|| MazeError::Header {
            line: line_number,
            reason: format!("invalid dimension in '{line}'"),
        })
}
