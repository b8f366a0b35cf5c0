//! Manual corner selection.
//!
//! The UI that actually collects clicks is an external collaborator; this
//! module only defines the blocking prompt contract and the fixed selection
//! order. Cancellation is an explicit, recoverable abort.

use gridnav_core::{CornerSet, GrayImageView};
use log::info;
use nalgebra::Point2;

use crate::{CornerLocator, LocateError};

/// Prompted corner roles, in selection order.
pub const CORNER_PROMPTS: [&str; 4] = ["top-left", "top-right", "bottom-right", "bottom-left"];

/// Blocking source of operator-selected points.
///
/// `select` returns `None` when the operator aborts (ESC or equivalent);
/// the locator surfaces that as [`LocateError::Cancelled`].
pub trait SelectionSource {
    fn select(&mut self, prompt: &str) -> Option<Point2<f32>>;
}

/// Collects exactly four points in the prompted TL, TR, BR, BL order.
pub struct ManualSelection<S> {
    source: S,
}

impl<S: SelectionSource> ManualSelection<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }
}

impl<S: SelectionSource> CornerLocator for ManualSelection<S> {
    fn locate(&mut self, _image: &GrayImageView<'_>) -> Result<CornerSet, LocateError> {
        let mut points = [Point2::new(0.0_f32, 0.0); 4];
        for (slot, prompt) in points.iter_mut().zip(CORNER_PROMPTS) {
            match self.source.select(prompt) {
                Some(p) => *slot = p,
                None => return Err(LocateError::Cancelled),
            }
        }

        info!("manual corner selection complete");
        // Ordered like every other strategy; the prompts ask for a fixed
        // order but the operator is not trusted to follow it.
        Ok(CornerSet::ordered(points))
    }
}

/// A selection source that replays a fixed point list. Intended for tests
/// and scripted runs.
#[derive(Clone, Debug, Default)]
pub struct ScriptedSelection {
    points: Vec<Point2<f32>>,
    next: usize,
}

impl ScriptedSelection {
    pub fn new(points: Vec<Point2<f32>>) -> Self {
        Self { points, next: 0 }
    }
}

impl SelectionSource for ScriptedSelection {
    fn select(&mut self, _prompt: &str) -> Option<Point2<f32>> {
        let p = self.points.get(self.next).copied();
        self.next += 1;
        p
    }
}
