//! Shared machinery for the grid searches.

use gridnav_grid::{GridCoord, OccupancyGrid};

/// Ordered cell sequence from start (inclusive) to goal (inclusive).
/// A single-element path means start == goal.
pub type Path = Vec<GridCoord>;

/// Expansion order: up, down, left, right. Fixed so that equal-cost
/// frontiers resolve the same way on every run.
const STEPS: [(i64, i64); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

pub(crate) enum Endpoints {
    /// An endpoint is out of bounds or an obstacle.
    Rejected,
    /// Start and goal coincide.
    Trivial,
    /// A real search is needed.
    Search,
}

/// Endpoint validation shared by both searches. Obstacle cells are rejected
/// as start just as they are as goal.
pub(crate) fn check_endpoints(
    grid: &OccupancyGrid,
    start: GridCoord,
    goal: GridCoord,
) -> Endpoints {
    if !grid.is_traversable(start.0, start.1) || !grid.is_traversable(goal.0, goal.1) {
        return Endpoints::Rejected;
    }
    if start == goal {
        return Endpoints::Trivial;
    }
    Endpoints::Search
}

/// Traversable orthogonal neighbors of `cell`, in the fixed expansion order.
pub(crate) fn neighbors(
    grid: &OccupancyGrid,
    (row, col): GridCoord,
) -> impl Iterator<Item = GridCoord> + '_ {
    STEPS.iter().filter_map(move |&(dr, dc)| {
        let r = row as i64 + dr;
        let c = col as i64 + dc;
        if r < 0 || c < 0 {
            return None;
        }
        let (r, c) = (r as usize, c as usize);
        grid.is_traversable(r, c).then_some((r, c))
    })
}

/// Walk the predecessor table back from `goal` and return the forward path.
pub(crate) fn reconstruct(
    prev: &[Option<GridCoord>],
    n_cols: usize,
    start: GridCoord,
    goal: GridCoord,
) -> Path {
    let mut path = vec![goal];
    let mut cell = goal;
    while cell != start {
        cell = prev[cell.0 * n_cols + cell.1].expect("reached cell has a predecessor");
        path.push(cell);
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::grid_with_obstacles;

    #[test]
    fn neighbors_respect_bounds_and_obstacles() {
        let grid = grid_with_obstacles(3, 3, &[(0, 1)]);
        let from_corner: Vec<_> = neighbors(&grid, (0, 0)).collect();
        assert_eq!(from_corner, vec![(1, 0)]);

        let from_center: Vec<_> = neighbors(&grid, (1, 1)).collect();
        assert_eq!(from_center, vec![(2, 1), (1, 0), (1, 2)]);
    }

    #[test]
    fn reconstruct_orders_start_to_goal() {
        // 1x3 strip: (0,0) -> (0,1) -> (0,2).
        let prev = vec![None, Some((0, 0)), Some((0, 1))];
        assert_eq!(
            reconstruct(&prev, 3, (0, 0), (0, 2)),
            vec![(0, 0), (0, 1), (0, 2)]
        );
    }
}
