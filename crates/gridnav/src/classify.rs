//! Default mean-intensity cell classifier.

use gridnav_grid::{CellClass, CellClassifier, CellView};

/// Classifies cells by mean gray level: near-black cells are the robot
/// marker, moderately dark cells are obstacles, the rest are empty.
///
/// This is tuned for the repo examples (bright floor, dark obstacles, a
/// near-black robot marker) and is expected to be replaced by callers with
/// scene-specific classification.
#[derive(Clone, Copy, Debug)]
pub struct IntensityClassifier {
    /// Mean strictly below this is the robot.
    pub robot_threshold: u8,
    /// Mean strictly below this (and at or above the robot threshold) is an
    /// obstacle.
    pub obstacle_threshold: u8,
}

impl Default for IntensityClassifier {
    fn default() -> Self {
        Self {
            robot_threshold: 50,
            obstacle_threshold: 128,
        }
    }
}

impl IntensityClassifier {
    fn mean(cell: &CellView<'_>) -> u8 {
        let mut sum = 0u64;
        let mut count = 0u64;
        for v in cell.pixels() {
            sum += u64::from(v);
            count += 1;
        }
        if count == 0 {
            return u8::MAX;
        }
        (sum / count) as u8
    }
}

impl CellClassifier for IntensityClassifier {
    fn classify(&self, cell: &CellView<'_>) -> CellClass {
        let mean = Self::mean(cell);
        if mean < self.robot_threshold {
            CellClass::Robot
        } else if mean < self.obstacle_threshold {
            CellClass::Obstacle
        } else {
            CellClass::Empty
        }
    }
}
