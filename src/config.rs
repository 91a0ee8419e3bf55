use std::collections::HashSet;

use anyhow::{anyhow, Context};
use clap::Parser;
use serde::Deserialize;

use crate::algorithm::AlgorithmKind;
use crate::common::Cell;
use crate::map::Maze;
use crate::stat::DEFAULT_TIMING_RUNS;

#[derive(Parser, Debug, Default)]
#[command(
    name = "Maze Search",
    about = "Compare classical graph search algorithms on a grid maze.",
    version = "1.0"
)]
pub struct Cli {
    #[arg(long, help = "Path to a YAML config file")]
    pub config: Option<String>,

    #[arg(long, help = "Path to an octile map file (reference maze when omitted)")]
    pub map_path: Option<String>,

    #[arg(long, help = "Start cell as x,y", value_parser = parse_cell)]
    pub start: Option<Cell>,

    #[arg(long, help = "Goal cell as x,y", value_parser = parse_cell)]
    pub goal: Option<Cell>,

    #[arg(long, help = "Timed repetitions per algorithm")]
    pub timing_runs: Option<usize>,

    #[arg(
        long,
        help = "Algorithms to compare",
        value_enum,
        use_value_delimiter = true
    )]
    pub algorithms: Vec<AlgorithmKind>,

    #[arg(
        long,
        help = "Render the solution of these algorithms",
        value_enum,
        use_value_delimiter = true
    )]
    pub show: Vec<AlgorithmKind>,

    #[arg(long, help = "Render the solution of the best algorithm", default_value_t = false)]
    pub show_best: bool,

    #[arg(long, help = "Write the comparison as JSON to this file")]
    pub output_path: Option<String>,

    #[arg(long, help = "Log filter, e.g. info or maze_search=debug")]
    pub log_level: Option<String>,
}

fn parse_cell(value: &str) -> Result<Cell, String> {
    let (x, y) = value
        .split_once(',')
        .ok_or_else(|| format!("expected x,y, got '{value}'"))?;
    let x = x.trim().parse::<usize>().map_err(|e| format!("invalid x '{x}': {e}"))?;
    let y = y.trim().parse::<usize>().map_err(|e| format!("invalid y '{y}': {e}"))?;
    Ok((x, y))
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub map_path: Option<String>,
    pub start: Option<Cell>,
    pub goal: Option<Cell>,
    pub timing_runs: usize,
    pub algorithms: Vec<AlgorithmKind>,
    pub show: Vec<AlgorithmKind>,
    pub show_best: bool,
    pub output_path: Option<String>,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            map_path: None,
            start: None,
            goal: None,
            timing_runs: DEFAULT_TIMING_RUNS,
            algorithms: AlgorithmKind::ALL.to_vec(),
            show: Vec::new(),
            show_best: false,
            output_path: None,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    pub fn from_yaml_str(yaml: &str) -> anyhow::Result<Self> {
        serde_yaml::from_str(yaml).context("invalid YAML config")
    }

    /// Values given on the command line replace the ones from the config file.
    pub fn override_from_command_line(mut self, cli: &Cli) -> anyhow::Result<Self> {
        if let Some(map_path) = &cli.map_path {
            self.map_path = Some(map_path.clone());
        }
        if cli.start.is_some() {
            self.start = cli.start;
        }
        if cli.goal.is_some() {
            self.goal = cli.goal;
        }
        if let Some(timing_runs) = cli.timing_runs {
            self.timing_runs = timing_runs;
        }
        if !cli.algorithms.is_empty() {
            self.algorithms = cli.algorithms.clone();
        }
        if !cli.show.is_empty() {
            self.show = cli.show.clone();
        }
        self.show_best |= cli.show_best;
        if let Some(output_path) = &cli.output_path {
            self.output_path = Some(output_path.clone());
        }
        if let Some(log_level) = &cli.log_level {
            self.log_level = log_level.clone();
        }

        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.timing_runs == 0 {
            return Err(anyhow!("Timing runs must be at least 1, got 0"));
        }
        if self.algorithms.is_empty() {
            return Err(anyhow!("At least one algorithm must be selected"));
        }
        let mut seen = HashSet::new();
        if let Some(duplicate) = self.algorithms.iter().find(|&&kind| !seen.insert(kind)) {
            return Err(anyhow!("Algorithm {duplicate} is selected more than once"));
        }
        Ok(())
    }

    /// Build the maze to search: the map file when configured, else the
    /// reference maze.
    pub fn load_maze(&self) -> anyhow::Result<Maze> {
        match &self.map_path {
            Some(map_path) => Maze::from_file(map_path, self.start, self.goal)
                .with_context(|| format!("error with map file: {map_path}")),
            None => {
                let reference = Maze::reference();
                let (start, goal) = (
                    self.start.unwrap_or(reference.start()),
                    self.goal.unwrap_or(reference.goal()),
                );
                reference
                    .with_endpoints(start, goal)
                    .context("invalid start or goal for the reference maze")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.timing_runs, 10);
        assert_eq!(config.algorithms, AlgorithmKind::ALL.to_vec());
        assert!(config.validate().is_ok());
        assert_eq!(config.load_maze().unwrap(), Maze::reference());
    }

    #[test]
    fn test_from_yaml_str() {
        let yaml = "
timing_runs: 3
algorithms: [bfs, astar]
show: [dfs]
start: [0, 2]
";
        let config = Config::from_yaml_str(yaml).unwrap();
        assert_eq!(config.timing_runs, 3);
        assert_eq!(config.algorithms, vec![AlgorithmKind::Bfs, AlgorithmKind::AStar]);
        assert_eq!(config.show, vec![AlgorithmKind::Dfs]);
        assert_eq!(config.start, Some((0, 2)));
        assert_eq!(config.log_level, "info");

        let maze = config.load_maze().unwrap();
        assert_eq!(maze.start(), (0, 2));
        assert_eq!(maze.goal(), (19, 11));

        assert!(Config::from_yaml_str("unknown_key: 1").is_err());
    }

    #[test]
    fn test_override_from_command_line() {
        let cli = Cli::parse_from([
            "maze_search",
            "--timing-runs",
            "5",
            "--algorithms",
            "ucs,ids",
            "--goal",
            "4,0",
            "--show-best",
        ]);
        let config = Config::default().override_from_command_line(&cli).unwrap();
        assert_eq!(config.timing_runs, 5);
        assert_eq!(config.algorithms, vec![AlgorithmKind::Ucs, AlgorithmKind::Ids]);
        assert_eq!(config.goal, Some((4, 0)));
        assert!(config.show_best);
        assert_eq!(config.load_maze().unwrap().goal(), (4, 0));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let zero_runs = Config {
            timing_runs: 0,
            ..Config::default()
        };
        assert!(zero_runs.validate().is_err());

        let duplicated = Config {
            algorithms: vec![AlgorithmKind::Bfs, AlgorithmKind::Bfs],
            ..Config::default()
        };
        assert!(duplicated.validate().is_err());

        let cli = Cli {
            timing_runs: Some(0),
            ..Cli::default()
        };
        assert!(Config::default().override_from_command_line(&cli).is_err());
    }

    #[test]
    fn test_load_maze_rejects_wall_goal() {
        let config = Config {
            goal: Some((5, 0)),
            ..Config::default()
        };
        assert!(config.load_maze().is_err());
    }

    #[test]
    fn test_parse_cell() {
        assert_eq!(parse_cell("3,4"), Ok((3, 4)));
        assert_eq!(parse_cell(" 1 , 2 "), Ok((1, 2)));
        assert!(parse_cell("3").is_err());
        assert!(parse_cell("a,1").is_err());
    }
}
