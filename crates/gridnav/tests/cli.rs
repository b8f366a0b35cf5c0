//! End-to-end runs of the `gridnav` binary on synthetic scenes.

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Overhead view: dark floor, a bright 300x300 working sheet at (50,50),
/// and on the sheet a near-black robot patch plus a mid-gray obstacle.
///
/// The robot patch sits 2 px inside the sheet so the sheet outline stays a
/// clean quad for the contour locator; the patch still dominates the first
/// grid cell's mean intensity.
fn write_scene(dir: &Path, with_robot: bool) -> std::path::PathBuf {
    let img = image::GrayImage::from_fn(400, 400, |x, y| {
        let v = if with_robot && (52..110).contains(&x) && (52..110).contains(&y) {
            20
        } else if (168..234).contains(&x) && (168..234).contains(&y) {
            80
        } else if (50..350).contains(&x) && (50..350).contains(&y) {
            250
        } else {
            10
        };
        image::Luma([v])
    });
    let path = dir.join("scene.png");
    img.save(&path).expect("write scene");
    path
}

fn gridnav() -> Command {
    Command::cargo_bin("gridnav").expect("binary built")
}

fn scene_args<'a>(cmd: &'a mut Command, scene: &Path) -> &'a mut Command {
    cmd.arg("--image")
        .arg(scene)
        .args(["--rows", "5", "--cols", "5"])
        .args(["--corners", "contour", "--polarity", "bright"])
        .args(["--warp-size", "100"])
}

#[test]
fn routes_and_prints_commands() {
    let dir = TempDir::new().expect("tempdir");
    let scene = write_scene(dir.path(), true);

    let mut cmd = gridnav();
    scene_args(&mut cmd, &scene)
        .args(["--goal", "4", "4"])
        .assert()
        .success()
        .stdout(predicate::str::contains("path: 9 cells, 8 command(s)"))
        .stdout(predicate::str::contains("commands:"));
}

#[test]
fn json_output_carries_the_route() {
    let dir = TempDir::new().expect("tempdir");
    let scene = write_scene(dir.path(), true);

    let mut cmd = gridnav();
    let output = scene_args(&mut cmd, &scene)
        .args(["--goal", "4", "4", "--json"])
        .output()
        .expect("run binary");
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid json");
    assert_eq!(value["robot"], serde_json::json!([0, 0]));
    assert_eq!(value["goal"], serde_json::json!([4, 4]));
    assert_eq!(value["path"].as_array().expect("path array").len(), 9);
    assert_eq!(value["commands"].as_array().expect("commands").len(), 8);
}

#[test]
fn bfs_agrees_with_astar_on_length() {
    let dir = TempDir::new().expect("tempdir");
    let scene = write_scene(dir.path(), true);

    for algorithm in ["astar", "bfs"] {
        let mut cmd = gridnav();
        scene_args(&mut cmd, &scene)
            .args(["--goal", "4", "4", "--algorithm", algorithm])
            .assert()
            .success()
            .stdout(predicate::str::contains("path: 9 cells"));
    }
}

#[test]
fn blocked_goal_exits_with_code_two() {
    let dir = TempDir::new().expect("tempdir");
    let scene = write_scene(dir.path(), true);

    let mut cmd = gridnav();
    scene_args(&mut cmd, &scene)
        .args(["--goal", "2", "2"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("no path to the goal"));
}

#[test]
fn camera_capture_is_unavailable() {
    gridnav()
        .args(["--camera", "0", "--goal", "0", "0"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("unavailable"));
}

#[test]
fn missing_robot_prints_a_hint() {
    let dir = TempDir::new().expect("tempdir");
    let scene = write_scene(dir.path(), false);

    let mut cmd = gridnav();
    scene_args(&mut cmd, &scene)
        .args(["--goal", "4", "4"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("--robot-threshold"));
}

#[test]
fn goal_outside_the_grid_is_an_error() {
    let dir = TempDir::new().expect("tempdir");
    let scene = write_scene(dir.path(), true);

    let mut cmd = gridnav();
    scene_args(&mut cmd, &scene)
        .args(["--goal", "9", "9"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("outside"));
}

#[test]
fn writes_the_visualization_image() {
    let dir = TempDir::new().expect("tempdir");
    let scene = write_scene(dir.path(), true);
    let out = dir.path().join("route.png");

    let mut cmd = gridnav();
    scene_args(&mut cmd, &scene)
        .args(["--goal", "4", "4"])
        .arg("--output")
        .arg(&out)
        .assert()
        .success();

    let rendered = image::ImageReader::open(&out)
        .expect("open rendered file")
        .decode()
        .expect("decode rendered file");
    assert_eq!(rendered.width(), 100);
    assert_eq!(rendered.height(), 100);
}

#[test]
fn manual_corners_read_from_stdin() {
    let dir = TempDir::new().expect("tempdir");
    let img = image::GrayImage::from_fn(100, 100, |x, y| {
        image::Luma([if x < 20 && y < 20 { 20 } else { 250 }])
    });
    let scene = dir.path().join("square.png");
    img.save(&scene).expect("write scene");

    gridnav()
        .arg("--image")
        .arg(&scene)
        .args(["--rows", "5", "--cols", "5"])
        .args(["--corners", "manual", "--skip-homography"])
        .args(["--warp-size", "100"])
        .args(["--goal", "0", "4"])
        .write_stdin("0 0\n99 0\n99 99\n0 99\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("path: 5 cells, 4 command(s)"));
}
