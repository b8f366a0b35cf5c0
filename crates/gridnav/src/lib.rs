//! High-level facade crate for the `gridnav-*` workspace.
//!
//! This crate provides:
//! - stable, convenient re-exports of the underlying pipeline crates
//! - the end-to-end [`plan_route`] pipeline: corner location, perspective
//!   rectification, grid discretization, cell classification, path planning
//!   and command translation in one call
//! - (feature-gated) helpers that run the pipeline on an `image::GrayImage`
//!
//! ## Quickstart
//!
//! ```no_run
//! use gridnav::{plan_route, Algorithm, IntensityClassifier, RouteRequest};
//! use gridnav::locate::{ContourLocator, ContourParams};
//! use image::ImageReader;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let img = ImageReader::open("overhead.png")?.decode()?.to_luma8();
//! let mut locator = ContourLocator::new(ContourParams::default());
//! let classifier = IntensityClassifier::default();
//!
//! let mut request = RouteRequest::new(10, 10, (9, 9));
//! request.algorithm = Algorithm::AStar;
//!
//! let result = plan_route(&gridnav::route::gray_view(&img), &mut locator, &classifier, &request)?;
//! println!("robot at {:?}, path: {:?}", result.robot, result.path);
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - `gridnav::core`: image buffers, corner sets, homography rectification.
//! - `gridnav::locate`: manual, fiducial and contour corner locators.
//! - `gridnav::grid`: grid mapper, cell classification, occupancy grid.
//! - `gridnav::plan`: A*/BFS planning and command translation.
//! - `gridnav::route` (feature `image`): end-to-end helpers from `image::GrayImage`.

pub use gridnav_core as core;
pub use gridnav_grid as grid;
pub use gridnav_locate as locate;
pub use gridnav_plan as plan;

pub use gridnav_core::{CornerSet, GrayImage, GrayImageView, Transform};
pub use gridnav_grid::{
    build_occupancy_grid, CellClass, CellClassifier, CellLabel, GridCoord, GridMapper,
    OccupancyGrid,
};
pub use gridnav_locate::{CornerLocator, LocatorKind};
pub use gridnav_plan::{find_path, to_commands, Algorithm, Command, Path};

mod classify;
mod pipeline;

pub use classify::IntensityClassifier;
pub use pipeline::{plan_route, PipelineError, RouteRequest, RouteResult};

#[cfg(feature = "image")]
pub mod route;
