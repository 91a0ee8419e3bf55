//! Plain-text presentation of solutions and of the comparison table.
//!
//! Rendering only consumes finished results; it never affects a search.

use std::collections::HashSet;
use std::fmt::Write;

use crate::common::Cell;
use crate::map::Maze;
use crate::ranking::Score;
use crate::stat::AlgorithmMetrics;

/// Draw `path` over the maze: `#` wall, `.` free, `*` path, `S` start, `G` goal.
pub fn render_path(maze: &Maze, path: &[Cell], label: &str) -> String {
    if path.is_empty() {
        return format!("{label} - No path to animate!\n");
    }

    let on_path: HashSet<Cell> = path.iter().copied().collect();
    let mut out = format!("{label} - Path Length: {}\n", path.len());
    for y in 0..maze.height() {
        for x in 0..maze.width() {
            let glyph = if (x, y) == maze.start() {
                'S'
            } else if (x, y) == maze.goal() {
                'G'
            } else if !maze.is_walkable(x, y) {
                '#'
            } else if on_path.contains(&(x, y)) {
                '*'
            } else {
                '.'
            };
            out.push(glyph);
        }
        out.push('\n');
    }
    out
}

/// One row per algorithm with its metrics and score.
pub fn comparison_table(table: &[AlgorithmMetrics], scores: &[Score]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", "=".repeat(88));
    let _ = writeln!(out, "ALGORITHM COMPARISON");
    let _ = writeln!(out, "{}", "=".repeat(88));
    let _ = writeln!(
        out,
        "{:<10} {:<8} {:<8} {:<10} {:<10} {:<10} {:<10} {:<10} {:<6}",
        "Algorithm",
        "Steps",
        "Cost",
        "Explored",
        "Time(ms)",
        "Memory",
        "Optimal",
        "Success",
        "Score"
    );
    let _ = writeln!(out, "{}", "-".repeat(88));

    for metrics in table {
        let score = scores
            .iter()
            .find(|s| s.algorithm == metrics.algorithm)
            .map_or(0, |s| s.points);
        let success = format!("{:.1}%", metrics.success_rate);
        let _ = writeln!(
            out,
            "{:<10} {:<8} {:<8} {:<10} {:<10.2} {:<10.0} {:<10} {:<10} {:<6}",
            metrics.algorithm.label(),
            metrics.path_length,
            metrics.path_cost,
            metrics.explored_nodes,
            metrics.exec_time_ms,
            metrics.memory,
            if metrics.is_optimal { "YES" } else { "NO" },
            success,
            score,
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::AlgorithmKind;

    #[test]
    fn test_render_path() {
        let maze = Maze::new(
            vec![vec![0, 1, 0], vec![0, 1, 0], vec![0, 0, 0]],
            (0, 0),
            (2, 2),
        )
        .unwrap();
        let path = [(0, 0), (0, 1), (0, 2), (1, 2), (2, 2)];
        let rendered = render_path(&maze, &path, "BFS Algorithm");
        assert_eq!(rendered, "BFS Algorithm - Path Length: 5\nS#.\n*#.\n**G\n");
    }

    #[test]
    fn test_render_empty_path() {
        let maze = Maze::reference();
        assert_eq!(
            render_path(&maze, &[], "DFS Algorithm"),
            "DFS Algorithm - No path to animate!\n"
        );
    }

    #[test]
    fn test_comparison_table() {
        let table = vec![AlgorithmMetrics::new(
            AlgorithmKind::AStar,
            vec![(0, 0), (1, 0)],
            3,
            0.25,
        )];
        let scores = [Score {
            algorithm: AlgorithmKind::AStar,
            points: 100,
        }];
        let rendered = comparison_table(&table, &scores);
        let row = rendered.lines().last().unwrap();
        let columns: Vec<&str> = row.split_whitespace().collect();
        assert_eq!(
            columns,
            vec!["AStar", "2", "1", "3", "0.25", "9", "YES", "100.0%", "100"]
        );
    }
}
