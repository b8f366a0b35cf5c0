//! Breadth-first search, the unweighted reference planner.

use std::collections::VecDeque;

use log::debug;

use gridnav_grid::{GridCoord, OccupancyGrid};

use crate::search::{check_endpoints, neighbors, reconstruct, Endpoints, Path};

/// Minimum-step path from `start` to `goal`, or `None` when no route exists
/// or an endpoint is invalid. Returns on the first dequeue of the goal.
pub fn bfs(grid: &OccupancyGrid, start: GridCoord, goal: GridCoord) -> Option<Path> {
    match check_endpoints(grid, start, goal) {
        Endpoints::Rejected => return None,
        Endpoints::Trivial => return Some(vec![start]),
        Endpoints::Search => (),
    }

    let n_cols = grid.n_cols();
    let n = grid.n_rows() * n_cols;
    let idx = |(r, c): GridCoord| r * n_cols + c;

    let mut visited = vec![false; n];
    let mut prev: Vec<Option<GridCoord>> = vec![None; n];
    let mut queue = VecDeque::new();
    visited[idx(start)] = true;
    queue.push_back(start);

    while let Some(cell) = queue.pop_front() {
        if cell == goal {
            let path = reconstruct(&prev, n_cols, start, goal);
            debug!("bfs: {:?} -> {:?}, {} cells", start, goal, path.len());
            return Some(path);
        }
        for nb in neighbors(grid, cell) {
            if !visited[idx(nb)] {
                visited[idx(nb)] = true;
                prev[idx(nb)] = Some(cell);
                queue.push_back(nb);
            }
        }
    }

    debug!("bfs: {:?} -> {:?}, queue exhausted", start, goal);
    None
}
