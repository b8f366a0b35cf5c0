//! Translation of cell paths into primitive directional moves.

use std::fmt;

use serde::{Deserialize, Serialize};

use gridnav_grid::GridCoord;

/// One primitive robot move between orthogonally adjacent cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Command {
    Up,
    Down,
    Left,
    Right,
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Up => write!(f, "up"),
            Command::Down => write!(f, "down"),
            Command::Left => write!(f, "left"),
            Command::Right => write!(f, "right"),
        }
    }
}

/// Translate a planner path into the command sequence that drives it.
///
/// A single-cell path yields an empty sequence.
///
/// # Panics
///
/// Panics if consecutive cells are not orthogonally adjacent; planner output
/// always satisfies this.
pub fn to_commands(path: &[GridCoord]) -> Vec<Command> {
    path.windows(2)
        .map(|pair| {
            let (r1, c1) = pair[0];
            let (r2, c2) = pair[1];
            match (r2 as i64 - r1 as i64, c2 as i64 - c1 as i64) {
                (-1, 0) => Command::Up,
                (1, 0) => Command::Down,
                (0, -1) => Command::Left,
                (0, 1) => Command::Right,
                _ => panic!("cells {:?} and {:?} are not adjacent", pair[0], pair[1]),
            }
        })
        .collect()
}
