//! Corner location strategies for the overhead routing pipeline.
//!
//! Three interchangeable strategies produce the four boundary corners of the
//! working area:
//! - [`ManualSelection`]: four operator clicks in prompted order,
//! - [`FiducialLocator`]: square binary markers with ids 0..=3 at the corners,
//! - [`ContourLocator`]: the largest four-vertex region outline.
//!
//! Every strategy canonicalizes its result through
//! [`CornerSet::ordered`](gridnav_core::CornerSet::ordered), so downstream
//! code never special-cases the detection method.

mod binary;
mod contour;
mod dictionary;
mod error;
mod fiducial;
mod manual;
mod polygon;
mod regions;

use gridnav_core::{CornerSet, GrayImageView};
use serde::{Deserialize, Serialize};

pub use binary::{binarize, otsu_threshold, Polarity};
pub use contour::{ContourLocator, ContourParams};
pub use dictionary::{rotate_code, Dictionary, GRIDNAV_4X4};
pub use error::LocateError;
pub use fiducial::{FiducialLocator, FiducialParams, MarkerObservation, Matcher, MatchResult};
pub use manual::{ManualSelection, ScriptedSelection, SelectionSource, CORNER_PROMPTS};
pub use polygon::{polygon_area, simplify_polygon};
pub use regions::{convex_hull, find_regions, Region};

/// One capability shared by all strategies: turn an image into a canonical
/// corner set, or fail for this invocation.
pub trait CornerLocator {
    fn locate(&mut self, image: &GrayImageView<'_>) -> Result<CornerSet, LocateError>;
}

/// Tagged strategy selector for callers that configure by value (CLI, config
/// files) rather than by constructing a locator directly.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocatorKind {
    #[default]
    Manual,
    Fiducial,
    Contour,
}
