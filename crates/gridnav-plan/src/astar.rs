//! A* over the 4-connected grid graph.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use log::debug;

use gridnav_grid::{GridCoord, OccupancyGrid};

use crate::search::{check_endpoints, neighbors, reconstruct, Endpoints, Path};

/// Manhattan distance. Admissible and consistent for unit-cost 4-connected
/// grids, so the first goal extraction is optimal.
fn manhattan(a: GridCoord, b: GridCoord) -> u32 {
    (a.0.abs_diff(b.0) + a.1.abs_diff(b.1)) as u32
}

/// Minimum-step path from `start` to `goal`, or `None` when no route exists
/// or an endpoint is invalid.
pub fn astar(grid: &OccupancyGrid, start: GridCoord, goal: GridCoord) -> Option<Path> {
    match check_endpoints(grid, start, goal) {
        Endpoints::Rejected => return None,
        Endpoints::Trivial => return Some(vec![start]),
        Endpoints::Search => (),
    }

    let n_cols = grid.n_cols();
    let n = grid.n_rows() * n_cols;
    let idx = |(r, c): GridCoord| r * n_cols + c;

    let mut g = vec![u32::MAX; n];
    let mut prev: Vec<Option<GridCoord>> = vec![None; n];
    let mut closed = vec![false; n];

    // Entries order by (f, insertion sequence): equal-f ties resolve FIFO,
    // which keeps the extracted path reproducible across runs.
    let mut seq = 0u64;
    let mut open = BinaryHeap::new();
    g[idx(start)] = 0;
    open.push(Reverse((manhattan(start, goal), seq, start)));

    let mut expanded = 0usize;
    while let Some(Reverse((_, _, cell))) = open.pop() {
        if cell == goal {
            let path = reconstruct(&prev, n_cols, start, goal);
            debug!(
                "astar: {:?} -> {:?}, {} cells, {} expanded",
                start,
                goal,
                path.len(),
                expanded
            );
            return Some(path);
        }
        if closed[idx(cell)] {
            continue;
        }
        closed[idx(cell)] = true;
        expanded += 1;

        let g_next = g[idx(cell)] + 1;
        for nb in neighbors(grid, cell) {
            if g_next < g[idx(nb)] {
                g[idx(nb)] = g_next;
                prev[idx(nb)] = Some(cell);
                seq += 1;
                open.push(Reverse((g_next + manhattan(nb, goal), seq, nb)));
            }
        }
    }

    debug!("astar: {:?} -> {:?}, frontier exhausted", start, goal);
    None
}
