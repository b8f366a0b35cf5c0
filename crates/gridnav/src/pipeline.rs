//! The end-to-end routing pipeline.
//!
//! Strictly linear: corner location -> perspective rectification -> grid
//! discretization -> cell classification -> path planning -> command
//! translation. An unreachable goal is reported through
//! [`RouteResult::path`] being `None`; only earlier stages produce errors.

use log::info;
use serde::Serialize;

use gridnav_core::{
    rectify, resample, CornerSet, GeometryError, GrayImage, GrayImageView, Transform,
};
use gridnav_grid::{
    build_occupancy_grid, CellClassifier, GridCoord, GridError, GridMapper, OccupancyGrid,
};
use gridnav_locate::{CornerLocator, LocateError};
use gridnav_plan::{find_path, to_commands, Algorithm, Command, Path};

/// Errors from the pipeline stages up to and including grid construction.
#[derive(thiserror::Error, Debug)]
pub enum PipelineError {
    #[error("image input unavailable: {0}")]
    InputUnavailable(String),

    #[error("no robot cell in the occupancy grid")]
    RobotNotFound,

    #[error(transparent)]
    Locate(#[from] LocateError),

    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Grid(#[from] GridError),
}

/// Configuration for one routing run.
#[derive(Clone, Copy, Debug)]
pub struct RouteRequest {
    pub n_rows: usize,
    pub n_cols: usize,
    pub goal: GridCoord,
    /// Rectified image size; the grid is laid over this canvas.
    pub warp_width: usize,
    pub warp_height: usize,
    pub algorithm: Algorithm,
    /// Skip the homography and only resample the raw image to the warp size.
    /// For cameras already mounted square over the working area.
    pub skip_rectify: bool,
}

impl RouteRequest {
    pub fn new(n_rows: usize, n_cols: usize, goal: GridCoord) -> Self {
        Self {
            n_rows,
            n_cols,
            goal,
            warp_width: 480,
            warp_height: 480,
            algorithm: Algorithm::default(),
            skip_rectify: false,
        }
    }
}

/// Everything one routing run produced.
#[derive(Clone, Debug, Serialize)]
pub struct RouteResult {
    pub corners: CornerSet,
    /// The rectified (or resampled) frame the grid was laid over. Skipped in
    /// serialized output.
    #[serde(skip)]
    pub rectified: GrayImage,
    pub grid: OccupancyGrid,
    pub robot: GridCoord,
    pub goal: GridCoord,
    /// `None` means no traversable route exists (or the goal is blocked).
    pub path: Option<Path>,
    /// Empty whenever `path` is `None` or trivial.
    pub commands: Vec<Command>,
}

/// Run the full pipeline on a grayscale image.
pub fn plan_route(
    image: &GrayImageView<'_>,
    locator: &mut dyn CornerLocator,
    classifier: &dyn CellClassifier,
    request: &RouteRequest,
) -> Result<RouteResult, PipelineError> {
    let corners = locator.locate(image)?;
    info!("working area corners: {:?}", corners.points());

    let rectified = rectify_stage(image, &corners, request)?;
    let mapper = GridMapper::new(rectified.view(), request.n_rows, request.n_cols)?;
    let grid = build_occupancy_grid(&mapper, classifier)?;
    let robot = grid.find_robot().ok_or(PipelineError::RobotNotFound)?;

    let path = find_path(&grid, robot, request.goal, request.algorithm);
    let commands = path.as_deref().map(to_commands).unwrap_or_default();
    match &path {
        Some(p) => info!(
            "route {:?} -> {:?}: {} cells, {} command(s)",
            robot,
            request.goal,
            p.len(),
            commands.len()
        ),
        None => info!("no route from {:?} to {:?}", robot, request.goal),
    }

    Ok(RouteResult {
        corners,
        rectified,
        grid,
        robot,
        goal: request.goal,
        path,
        commands,
    })
}

fn rectify_stage(
    image: &GrayImageView<'_>,
    corners: &CornerSet,
    request: &RouteRequest,
) -> Result<GrayImage, PipelineError> {
    if request.skip_rectify {
        return Ok(resample(image, request.warp_width, request.warp_height));
    }
    let transform = Transform::from_corners(corners, request.warp_width, request.warp_height)?;
    Ok(rectify(image, &transform, request.warp_width, request.warp_height))
}
