//! Shortest-path planning over 4-connected occupancy grids.
//!
//! Both searches operate on the implicit unit-cost graph whose nodes are the
//! traversable cells of an [`OccupancyGrid`] and whose edges connect
//! orthogonal neighbors. A* with the Manhattan heuristic is the default;
//! breadth-first search is kept as a reference implementation, and the two
//! always agree on path length. "No path" is an ordinary [`None`], never an
//! error.

mod astar;
mod bfs;
mod command;
mod search;

pub use astar::astar;
pub use bfs::bfs;
pub use command::{to_commands, Command};
pub use search::Path;

use std::fmt;

use serde::{Deserialize, Serialize};

use gridnav_grid::{GridCoord, OccupancyGrid};

/// Search algorithm selector.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    #[default]
    AStar,
    Bfs,
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Algorithm::AStar => write!(f, "astar"),
            Algorithm::Bfs => write!(f, "bfs"),
        }
    }
}

/// Plan a minimum-step path from `start` to `goal` with the chosen algorithm.
///
/// Returns `None` when either endpoint is out of bounds or an obstacle, or
/// when no traversable route exists.
pub fn find_path(
    grid: &OccupancyGrid,
    start: GridCoord,
    goal: GridCoord,
    algorithm: Algorithm,
) -> Option<Path> {
    match algorithm {
        Algorithm::AStar => astar(grid, start, goal),
        Algorithm::Bfs => bfs(grid, start, goal),
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::grid_with_obstacles;

    #[test]
    fn start_equals_goal_is_a_single_cell_path() {
        let grid = grid_with_obstacles(3, 3, &[]);
        for algorithm in [Algorithm::AStar, Algorithm::Bfs] {
            let path = find_path(&grid, (1, 1), (1, 1), algorithm).expect("trivial path");
            assert_eq!(path, vec![(1, 1)]);
            assert!(to_commands(&path).is_empty());
        }
    }

    #[test]
    fn obstacle_goal_is_rejected() {
        let grid = grid_with_obstacles(4, 4, &[(3, 3)]);
        assert_eq!(find_path(&grid, (0, 0), (3, 3), Algorithm::AStar), None);
        assert_eq!(find_path(&grid, (0, 0), (3, 3), Algorithm::Bfs), None);
    }

    #[test]
    fn obstacle_start_is_rejected() {
        let grid = grid_with_obstacles(4, 4, &[(0, 0)]);
        assert_eq!(find_path(&grid, (0, 0), (3, 3), Algorithm::AStar), None);
    }

    #[test]
    fn out_of_bounds_endpoints_are_rejected() {
        let grid = grid_with_obstacles(4, 4, &[]);
        assert_eq!(find_path(&grid, (4, 0), (3, 3), Algorithm::AStar), None);
        assert_eq!(find_path(&grid, (0, 0), (0, 4), Algorithm::Bfs), None);
    }

    #[test]
    fn algorithm_selector_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Algorithm::AStar).unwrap(), "\"astar\"");
        assert_eq!(serde_json::to_string(&Algorithm::Bfs).unwrap(), "\"bfs\"");
        assert_eq!(Algorithm::AStar.to_string(), "astar");
    }
}
