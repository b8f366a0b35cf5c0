//! Command-line front end: load an overhead frame, locate the working area,
//! build the occupancy grid and print the route.

use std::error::Error;
use std::io::{self, BufRead, Write as _};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use log::LevelFilter;
use nalgebra::Point2;

use gridnav::locate::{
    ContourLocator, ContourParams, FiducialLocator, FiducialParams, ManualSelection, Polarity,
    SelectionSource,
};
use gridnav::route::route_image;
use gridnav::{
    Algorithm, CornerLocator, GridCoord, IntensityClassifier, PipelineError, RouteRequest,
    RouteResult,
};

#[derive(Parser, Debug)]
#[command(
    name = "gridnav",
    about = "Overhead-camera occupancy-grid route planning",
    version
)]
struct Cli {
    /// Input overhead image (any format the `image` crate decodes).
    #[arg(
        short = 'i',
        long = "image",
        value_name = "PATH",
        conflicts_with = "camera",
        required_unless_present = "camera"
    )]
    image: Option<PathBuf>,

    /// Capture one frame from this camera device index instead of a file.
    #[arg(long, value_name = "INDEX")]
    camera: Option<u32>,

    /// Grid rows.
    #[arg(long, default_value_t = 10)]
    rows: usize,

    /// Grid columns.
    #[arg(long, default_value_t = 10)]
    cols: usize,

    /// Goal cell as two numbers: row col.
    #[arg(
        long,
        value_name = "N",
        num_args = 2,
        required_unless_present = "manual_goal"
    )]
    goal: Option<Vec<usize>>,

    /// Read the goal cell from standard input instead of --goal.
    #[arg(long = "manual-goal")]
    manual_goal: bool,

    /// Working-area corner location strategy.
    #[arg(long = "corners", value_enum, default_value_t = CornersArg::Contour)]
    corners: CornersArg,

    /// Foreground polarity of the working-area outline (contour strategy).
    #[arg(long, value_enum, default_value_t = PolarityArg::Dark)]
    polarity: PolarityArg,

    /// Search algorithm.
    #[arg(long, value_enum, default_value_t = AlgorithmArg::Astar)]
    algorithm: AlgorithmArg,

    /// Mean gray level below which a cell is the robot.
    #[arg(long = "robot-threshold", value_name = "0-255", default_value_t = 50)]
    robot_threshold: u8,

    /// Mean gray level below which a cell is an obstacle.
    #[arg(long = "obstacle-threshold", value_name = "0-255", default_value_t = 128)]
    obstacle_threshold: u8,

    /// Rectified (warped) frame side length in pixels.
    #[arg(long = "warp-size", value_name = "PX", default_value_t = 480)]
    warp_size: usize,

    /// Skip perspective rectification and grid the raw frame directly.
    #[arg(long = "skip-homography")]
    skip_homography: bool,

    /// Print the full result as JSON instead of the text summary.
    #[arg(long)]
    json: bool,

    /// Write a route visualization image to this path.
    #[arg(short = 'o', long = "output", value_name = "PATH")]
    output: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum CornersArg {
    Manual,
    Fiducial,
    Contour,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PolarityArg {
    Dark,
    Bright,
}

impl From<PolarityArg> for Polarity {
    fn from(arg: PolarityArg) -> Self {
        match arg {
            PolarityArg::Dark => Polarity::Dark,
            PolarityArg::Bright => Polarity::Bright,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum AlgorithmArg {
    Astar,
    Bfs,
}

impl From<AlgorithmArg> for Algorithm {
    fn from(arg: AlgorithmArg) -> Self {
        match arg {
            AlgorithmArg::Astar => Algorithm::AStar,
            AlgorithmArg::Bfs => Algorithm::Bfs,
        }
    }
}

/// Prompts on stderr and reads one `x y` pair per corner from stdin.
/// EOF or an unparsable line aborts the selection.
struct StdinSelection;

impl SelectionSource for StdinSelection {
    fn select(&mut self, prompt: &str) -> Option<Point2<f32>> {
        eprint!("select {prompt} corner (x y): ");
        let _ = io::stderr().flush();
        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line).ok()? == 0 {
            return None;
        }
        let mut parts = line.split_whitespace();
        let x: f32 = parts.next()?.parse().ok()?;
        let y: f32 = parts.next()?.parse().ok()?;
        Some(Point2::new(x, y))
    }
}

fn read_goal_from_stdin() -> Result<GridCoord, Box<dyn Error>> {
    eprint!("goal cell (row col): ");
    let _ = io::stderr().flush();
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    let mut parts = line.split_whitespace();
    let row = parts
        .next()
        .ok_or("expected goal as: row col")?
        .parse::<usize>()?;
    let col = parts
        .next()
        .ok_or("expected goal as: row col")?
        .parse::<usize>()?;
    Ok((row, col))
}

fn build_locator(cli: &Cli) -> Box<dyn CornerLocator> {
    match cli.corners {
        CornersArg::Manual => Box::new(ManualSelection::new(StdinSelection)),
        CornersArg::Fiducial => Box::new(FiducialLocator::new(FiducialParams::default())),
        CornersArg::Contour => Box::new(ContourLocator::new(ContourParams {
            polarity: cli.polarity.into(),
            ..ContourParams::default()
        })),
    }
}

/// Grayscale frame with the grid, obstacles, route and endpoints tinted.
fn render_route(result: &RouteResult, out: &Path) -> Result<(), Box<dyn Error>> {
    const OBSTACLE: [u8; 3] = [200, 40, 40];
    const ROUTE: [u8; 3] = [40, 180, 40];
    const ROBOT: [u8; 3] = [40, 90, 220];
    const GOAL: [u8; 3] = [230, 180, 30];

    let frame = &result.rectified;
    let (width, height) = (frame.width, frame.height);
    let mut canvas = image::RgbImage::from_fn(width as u32, height as u32, |x, y| {
        let v = frame.data[y as usize * width + x as usize];
        image::Rgb([v, v, v])
    });

    let n_rows = result.grid.n_rows();
    let n_cols = result.grid.n_cols();
    let cell_w = width / n_cols;
    let cell_h = height / n_rows;
    // Same boundary policy as the grid mapper: the last row/column absorbs
    // the remainder pixels.
    let cell_rect = |(row, col): GridCoord| {
        let x1 = if col + 1 == n_cols { width } else { (col + 1) * cell_w };
        let y1 = if row + 1 == n_rows { height } else { (row + 1) * cell_h };
        (col * cell_w, row * cell_h, x1, y1)
    };
    let mut tint = |cell: GridCoord, color: [u8; 3]| {
        let (x0, y0, x1, y1) = cell_rect(cell);
        for y in y0..y1 {
            for x in x0..x1 {
                let p = canvas.get_pixel_mut(x as u32, y as u32);
                for (channel, target) in p.0.iter_mut().zip(color) {
                    *channel = (u16::from(*channel) / 2 + u16::from(target) / 2) as u8;
                }
            }
        }
    };

    for cell in result.grid.obstacles() {
        tint(cell, OBSTACLE);
    }
    if let Some(path) = &result.path {
        for &cell in path {
            tint(cell, ROUTE);
        }
    }
    tint(result.robot, ROBOT);
    tint(result.goal, GOAL);

    for row in 1..n_rows {
        for x in 0..width {
            canvas.put_pixel(x as u32, (row * cell_h) as u32, image::Rgb([40, 40, 40]));
        }
    }
    for col in 1..n_cols {
        for y in 0..height {
            canvas.put_pixel((col * cell_w) as u32, y as u32, image::Rgb([40, 40, 40]));
        }
    }

    canvas.save(out)?;
    Ok(())
}

fn print_summary(result: &RouteResult) {
    println!("{}", result.grid);
    println!("robot: {:?}  goal: {:?}", result.robot, result.goal);
    match &result.path {
        Some(path) => {
            println!("path: {} cells, {} command(s)", path.len(), result.commands.len());
            let moves: Vec<String> = result.commands.iter().map(ToString::to_string).collect();
            println!("commands: {}", moves.join(" "));
        }
        None => println!("no path to the goal"),
    }
}

fn run(cli: &Cli) -> Result<bool, Box<dyn Error>> {
    if let Some(index) = cli.camera {
        return Err(Box::new(PipelineError::InputUnavailable(format!(
            "camera {index} capture is not built in; pass --image <PATH>"
        ))));
    }
    let image_path = match &cli.image {
        Some(p) => p,
        None => return Err("either --image or --camera is required".into()),
    };
    let img = image::ImageReader::open(image_path)?.decode()?.to_luma8();

    let goal = match &cli.goal {
        Some(pair) => (pair[0], pair[1]),
        None => read_goal_from_stdin()?,
    };
    if goal.0 >= cli.rows || goal.1 >= cli.cols {
        return Err(format!(
            "goal cell ({}, {}) outside the {}x{} grid",
            goal.0, goal.1, cli.rows, cli.cols
        )
        .into());
    }

    let mut request = RouteRequest::new(cli.rows, cli.cols, goal);
    request.warp_width = cli.warp_size;
    request.warp_height = cli.warp_size;
    request.algorithm = cli.algorithm.into();
    request.skip_rectify = cli.skip_homography;

    let classifier = IntensityClassifier {
        robot_threshold: cli.robot_threshold,
        obstacle_threshold: cli.obstacle_threshold,
    };
    let mut locator = build_locator(cli);

    let result = match route_image(&img, locator.as_mut(), &classifier, &request) {
        Ok(result) => result,
        Err(PipelineError::RobotNotFound) => {
            eprintln!("hint: no cell classified as the robot; try raising --robot-threshold");
            return Err(Box::new(PipelineError::RobotNotFound));
        }
        Err(err) => return Err(Box::new(err)),
    };

    if let Some(out) = &cli.output {
        render_route(&result, out)?;
    }
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_summary(&result);
    }
    Ok(result.path.is_some())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let level = match cli.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    let _ = gridnav::core::init_with_level(level);

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(2),
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
