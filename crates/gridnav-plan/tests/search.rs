//! Cross-checks between the planners and an independent distance baseline.

use gridnav_plan::{astar, bfs, to_commands, Command};

use gridnav_grid::{CellLabel, GridCoord, OccupancyGrid};

fn grid_with_obstacles(n_rows: usize, n_cols: usize, obstacles: &[GridCoord]) -> OccupancyGrid {
    let mut grid = OccupancyGrid::new(n_rows, n_cols).expect("grid dims");
    for &(row, col) in obstacles {
        grid.set(row, col, CellLabel::Obstacle).expect("in bounds");
    }
    grid
}

/// Plain level-by-level flood from `start`; deliberately shares no code with
/// the planners.
fn flood_distance(grid: &OccupancyGrid, start: GridCoord, goal: GridCoord) -> Option<usize> {
    let mut dist = vec![None; grid.n_rows() * grid.n_cols()];
    let idx = |(r, c): GridCoord| r * grid.n_cols() + c;
    dist[idx(start)] = Some(0usize);
    let mut frontier = vec![start];
    let mut steps = 0;
    while !frontier.is_empty() {
        steps += 1;
        let mut next = Vec::new();
        for &(r, c) in &frontier {
            let mut push = |nr: usize, nc: usize| {
                if grid.is_traversable(nr, nc) && dist[idx((nr, nc))].is_none() {
                    dist[idx((nr, nc))] = Some(steps);
                    next.push((nr, nc));
                }
            };
            if r > 0 {
                push(r - 1, c);
            }
            push(r + 1, c);
            if c > 0 {
                push(r, c - 1);
            }
            push(r, c + 1);
        }
        frontier = next;
    }
    dist[idx(goal)]
}

#[test]
fn planners_agree_with_the_flood_baseline() {
    let cases: &[(usize, usize, &[GridCoord])] = &[
        (5, 5, &[]),
        (5, 5, &[(2, 1), (2, 2)]),
        (7, 4, &[(0, 1), (1, 1), (2, 1), (4, 2), (5, 2), (6, 2)]),
        (6, 6, &[(1, 0), (1, 1), (1, 2), (1, 3), (1, 4), (3, 5), (3, 4), (3, 3)]),
        (3, 9, &[(1, 4)]),
    ];
    for &(rows, cols, obstacles) in cases {
        let grid = grid_with_obstacles(rows, cols, obstacles);
        let start = (0, 0);
        let goal = (rows - 1, cols - 1);

        let expected = flood_distance(&grid, start, goal);
        let a = astar(&grid, start, goal);
        let b = bfs(&grid, start, goal);
        match expected {
            Some(d) => {
                let a = a.expect("astar finds the reachable goal");
                let b = b.expect("bfs finds the reachable goal");
                assert_eq!(a.len(), d + 1, "astar length, {rows}x{cols}");
                assert_eq!(b.len(), d + 1, "bfs length, {rows}x{cols}");
            }
            None => {
                assert_eq!(a, None);
                assert_eq!(b, None);
            }
        }
    }
}

#[test]
fn empty_grid_commands_split_nine_and_nine() {
    let grid = grid_with_obstacles(10, 10, &[]);
    let path = astar(&grid, (0, 0), (9, 9)).expect("path exists");
    assert_eq!(path.len(), 19);

    let commands = to_commands(&path);
    assert_eq!(commands.len(), 18);
    let downs = commands.iter().filter(|&&c| c == Command::Down).count();
    let rights = commands.iter().filter(|&&c| c == Command::Right).count();
    assert_eq!(downs, 9);
    assert_eq!(rights, 9);
}

#[test]
fn detour_path_translates_to_eight_commands() {
    let grid = grid_with_obstacles(5, 5, &[(2, 1), (2, 2)]);
    let path = astar(&grid, (0, 0), (4, 4)).expect("path exists");
    let commands = to_commands(&path);
    assert_eq!(commands.len(), 8);
    assert!(!commands.contains(&Command::Up));
}
