//! The canonical discrete map.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::GridError;

/// Integer cell coordinate, `(row, col)`.
pub type GridCoord = (usize, usize);

/// Cell labels held by the occupancy grid.
///
/// `Goal` is a query-time annotation for display and reporting; it is
/// traversable and never produced by a classifier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellLabel {
    #[default]
    Free,
    Obstacle,
    Robot,
    Goal,
}

/// Per-label cell counts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellCounts {
    pub free: usize,
    pub obstacle: usize,
    pub robot: usize,
}

/// An `n_rows x n_cols` labeled map.
///
/// The grid is the single owner of robot-location truth: at most one cell
/// holds `Robot` at a time, and [`find_robot`](Self::find_robot) scans the
/// cells on every call rather than trusting a cache that mutation could
/// silently invalidate.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OccupancyGrid {
    n_rows: usize,
    n_cols: usize,
    cells: Vec<CellLabel>,
}

impl OccupancyGrid {
    /// Create a grid with every cell `Free`.
    pub fn new(n_rows: usize, n_cols: usize) -> Result<Self, GridError> {
        if n_rows == 0 || n_cols == 0 {
            return Err(GridError::EmptyGrid {
                rows: n_rows,
                cols: n_cols,
            });
        }
        Ok(Self {
            n_rows,
            n_cols,
            cells: vec![CellLabel::Free; n_rows * n_cols],
        })
    }

    #[inline]
    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    #[inline]
    pub fn n_cols(&self) -> usize {
        self.n_cols
    }

    #[inline]
    pub fn in_bounds(&self, row: usize, col: usize) -> bool {
        row < self.n_rows && col < self.n_cols
    }

    fn index(&self, row: usize, col: usize) -> Result<usize, GridError> {
        if !self.in_bounds(row, col) {
            return Err(GridError::OutOfBounds {
                row,
                col,
                rows: self.n_rows,
                cols: self.n_cols,
            });
        }
        Ok(row * self.n_cols + col)
    }

    /// Label of one cell.
    pub fn get(&self, row: usize, col: usize) -> Result<CellLabel, GridError> {
        Ok(self.cells[self.index(row, col)?])
    }

    /// Assign one cell's label.
    ///
    /// Assigning `Robot` clears any previous robot cell to `Free`, so the
    /// single-robot invariant holds by construction.
    pub fn set(&mut self, row: usize, col: usize, label: CellLabel) -> Result<(), GridError> {
        let idx = self.index(row, col)?;
        if label == CellLabel::Robot {
            for cell in &mut self.cells {
                if *cell == CellLabel::Robot {
                    *cell = CellLabel::Free;
                }
            }
        }
        self.cells[idx] = label;
        Ok(())
    }

    /// True iff the cell is in bounds and not an obstacle.
    pub fn is_traversable(&self, row: usize, col: usize) -> bool {
        self.in_bounds(row, col) && self.cells[row * self.n_cols + col] != CellLabel::Obstacle
    }

    /// Current robot cell, found by a fresh scan.
    pub fn find_robot(&self) -> Option<GridCoord> {
        self.cells
            .iter()
            .position(|&c| c == CellLabel::Robot)
            .map(|idx| (idx / self.n_cols, idx % self.n_cols))
    }

    /// All obstacle cells.
    pub fn obstacles(&self) -> BTreeSet<GridCoord> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, &c)| c == CellLabel::Obstacle)
            .map(|(idx, _)| (idx / self.n_cols, idx % self.n_cols))
            .collect()
    }

    /// Count cells per label. `Goal` cells count as free for this summary,
    /// matching their traversability.
    pub fn counts(&self) -> CellCounts {
        let mut counts = CellCounts::default();
        for &c in &self.cells {
            match c {
                CellLabel::Free | CellLabel::Goal => counts.free += 1,
                CellLabel::Obstacle => counts.obstacle += 1,
                CellLabel::Robot => counts.robot += 1,
            }
        }
        counts
    }

    /// Bulk-replace all cells from a row-major label array.
    pub fn load_from_labels(&mut self, labels: &[CellLabel]) -> Result<(), GridError> {
        let expected = self.n_rows * self.n_cols;
        if labels.len() != expected {
            return Err(GridError::DimensionMismatch {
                expected,
                got: labels.len(),
                rows: self.n_rows,
                cols: self.n_cols,
            });
        }
        self.cells.clear();
        self.cells.extend_from_slice(labels);
        Ok(())
    }
}

impl fmt::Display for OccupancyGrid {
    /// ASCII map: `.` free, `#` obstacle, `R` robot, `G` goal, followed by
    /// the per-label counts.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.n_rows {
            for col in 0..self.n_cols {
                let ch = match self.cells[row * self.n_cols + col] {
                    CellLabel::Free => '.',
                    CellLabel::Obstacle => '#',
                    CellLabel::Robot => 'R',
                    CellLabel::Goal => 'G',
                };
                write!(f, "{ch} ")?;
            }
            writeln!(f)?;
        }
        let counts = self.counts();
        write!(
            f,
            "free={} obstacles={} robot={}",
            counts.free, counts.obstacle, counts.robot
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_grid_is_all_free() {
        let grid = OccupancyGrid::new(3, 4).expect("grid");
        let counts = grid.counts();
        assert_eq!(counts, CellCounts { free: 12, obstacle: 0, robot: 0 });
        assert!(grid.find_robot().is_none());
    }

    #[test]
    fn robot_assignment_is_exclusive() {
        let mut grid = OccupancyGrid::new(4, 4).expect("grid");
        grid.set(0, 0, CellLabel::Robot).expect("set");
        grid.set(2, 3, CellLabel::Robot).expect("set");

        assert_eq!(grid.find_robot(), Some((2, 3)));
        assert_eq!(grid.get(0, 0), Ok(CellLabel::Free));
        assert_eq!(grid.counts().robot, 1);
    }

    #[test]
    fn find_robot_is_idempotent() {
        let mut grid = OccupancyGrid::new(5, 5).expect("grid");
        grid.set(3, 1, CellLabel::Robot).expect("set");
        assert_eq!(grid.find_robot(), grid.find_robot());
    }

    #[test]
    fn find_robot_tracks_mutation() {
        let mut grid = OccupancyGrid::new(5, 5).expect("grid");
        grid.set(1, 1, CellLabel::Robot).expect("set");
        assert_eq!(grid.find_robot(), Some((1, 1)));

        grid.set(1, 1, CellLabel::Free).expect("set");
        assert_eq!(grid.find_robot(), None);
    }

    #[test]
    fn traversability_ignores_goal_and_robot() {
        let mut grid = OccupancyGrid::new(3, 3).expect("grid");
        grid.set(0, 1, CellLabel::Obstacle).expect("set");
        grid.set(1, 1, CellLabel::Goal).expect("set");
        grid.set(2, 2, CellLabel::Robot).expect("set");

        assert!(!grid.is_traversable(0, 1));
        assert!(grid.is_traversable(1, 1));
        assert!(grid.is_traversable(2, 2));
        assert!(!grid.is_traversable(3, 0));
    }

    #[test]
    fn obstacles_enumerates_all() {
        let mut grid = OccupancyGrid::new(3, 3).expect("grid");
        grid.set(0, 2, CellLabel::Obstacle).expect("set");
        grid.set(2, 0, CellLabel::Obstacle).expect("set");
        let obstacles = grid.obstacles();
        assert_eq!(obstacles.len(), 2);
        assert!(obstacles.contains(&(0, 2)) && obstacles.contains(&(2, 0)));
    }

    #[test]
    fn load_rejects_wrong_dimensions() {
        let mut grid = OccupancyGrid::new(2, 2).expect("grid");
        let labels = vec![CellLabel::Free; 5];
        assert!(matches!(
            grid.load_from_labels(&labels),
            Err(GridError::DimensionMismatch { expected: 4, got: 5, .. })
        ));
    }

    #[test]
    fn get_out_of_bounds_fails() {
        let grid = OccupancyGrid::new(2, 2).expect("grid");
        assert!(matches!(
            grid.get(2, 0),
            Err(GridError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn display_renders_the_map() {
        let mut grid = OccupancyGrid::new(2, 2).expect("grid");
        grid.set(0, 0, CellLabel::Robot).expect("set");
        grid.set(1, 1, CellLabel::Obstacle).expect("set");
        let text = grid.to_string();
        assert!(text.contains('R') && text.contains('#'));
        assert!(text.contains("obstacles=1"));
    }
}
