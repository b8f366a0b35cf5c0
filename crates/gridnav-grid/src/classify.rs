//! Cell classification interface.
//!
//! Classification internals (color thresholds, texture measures) live with
//! the caller; this crate treats the classifier as an opaque oracle and
//! trusts its single verdict per cell without re-validation. If a cell could
//! match both the robot and obstacle criteria, resolving that is the
//! classifier's internal tie-break (robot takes precedence by convention).

use log::info;
use serde::{Deserialize, Serialize};

use crate::{CellLabel, CellView, GridError, GridMapper, OccupancyGrid};

/// Classifier verdict for one cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellClass {
    #[default]
    Empty,
    Obstacle,
    Robot,
}

impl From<CellClass> for CellLabel {
    fn from(class: CellClass) -> Self {
        match class {
            CellClass::Empty => CellLabel::Free,
            CellClass::Obstacle => CellLabel::Obstacle,
            CellClass::Robot => CellLabel::Robot,
        }
    }
}

/// External oracle labeling one cell at a time.
pub trait CellClassifier {
    fn classify(&self, cell: &CellView<'_>) -> CellClass;
}

impl<F: Fn(&CellView<'_>) -> CellClass> CellClassifier for F {
    fn classify(&self, cell: &CellView<'_>) -> CellClass {
        self(cell)
    }
}

/// Classify every cell of the mapper's grid and build the occupancy grid.
pub fn build_occupancy_grid(
    mapper: &GridMapper<'_>,
    classifier: &dyn CellClassifier,
) -> Result<OccupancyGrid, GridError> {
    let mut labels = Vec::with_capacity(mapper.n_rows() * mapper.n_cols());
    for row in 0..mapper.n_rows() {
        for col in 0..mapper.n_cols() {
            let view = mapper.cell_view(row, col)?;
            labels.push(CellLabel::from(classifier.classify(&view)));
        }
    }

    let mut grid = OccupancyGrid::new(mapper.n_rows(), mapper.n_cols())?;
    grid.load_from_labels(&labels)?;

    let counts = grid.counts();
    info!(
        "occupancy grid built: {} free, {} obstacle(s), robot {}",
        counts.free,
        counts.obstacle,
        if counts.robot > 0 { "found" } else { "missing" }
    );
    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridnav_core::GrayImage;

    #[test]
    fn builds_grid_from_mean_intensity() {
        // 2x2 grid over a 20x20 image: dark top-left cell, bright elsewhere.
        let img = GrayImage::from_fn(20, 20, |x, y| if x < 10 && y < 10 { 10 } else { 250 });
        let mapper = GridMapper::new(img.view(), 2, 2).expect("mapper");

        let classifier = |cell: &CellView<'_>| {
            let n = (cell.width() * cell.height()) as u32;
            let mean = cell.pixels().map(u32::from).sum::<u32>() / n;
            if mean < 128 {
                CellClass::Obstacle
            } else {
                CellClass::Empty
            }
        };

        let grid = build_occupancy_grid(&mapper, &classifier).expect("grid");
        assert_eq!(grid.get(0, 0), Ok(CellLabel::Obstacle));
        assert_eq!(grid.get(1, 1), Ok(CellLabel::Free));
        assert_eq!(grid.counts().obstacle, 1);
    }

    /// Replays a fixed verdict sequence in the row-major cell order.
    struct Scripted {
        verdicts: Vec<CellClass>,
        next: std::cell::Cell<usize>,
    }

    impl CellClassifier for Scripted {
        fn classify(&self, _cell: &CellView<'_>) -> CellClass {
            let i = self.next.get();
            self.next.set(i + 1);
            self.verdicts[i]
        }
    }

    #[test]
    fn robot_verdict_lands_in_the_grid() {
        let img = GrayImage::new(9, 9);
        let mapper = GridMapper::new(img.view(), 3, 3).expect("mapper");

        let mut verdicts = vec![CellClass::Empty; 9];
        verdicts[4] = CellClass::Robot;
        verdicts[8] = CellClass::Obstacle;
        let classifier = Scripted {
            verdicts,
            next: std::cell::Cell::new(0),
        };

        let grid = build_occupancy_grid(&mapper, &classifier).expect("grid");
        assert_eq!(grid.find_robot(), Some((1, 1)));
        assert_eq!(grid.get(2, 2), Ok(CellLabel::Obstacle));
        assert_eq!(grid.counts().free, 7);
    }
}
