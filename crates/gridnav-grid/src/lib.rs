//! Grid discretization and the occupancy grid.
//!
//! [`GridMapper`] partitions a rectified top-down image into equally sized
//! cells and maps between pixels and cell coordinates. A [`CellClassifier`]
//! (an external oracle as far as this crate is concerned) labels each cell,
//! and [`OccupancyGrid`] holds the resulting discrete map that planning runs
//! against.

mod classify;
mod error;
mod mapper;
mod occupancy;

pub use classify::{build_occupancy_grid, CellClass, CellClassifier};
pub use error::GridError;
pub use mapper::{CellBounds, CellView, GridMapper};
pub use occupancy::{CellCounts, CellLabel, GridCoord, OccupancyGrid};
