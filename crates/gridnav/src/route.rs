//! End-to-end helpers operating on decoded `image` buffers.

use gridnav_core::GrayImageView;
use gridnav_grid::CellClassifier;
use gridnav_locate::CornerLocator;

use crate::pipeline::{plan_route, PipelineError, RouteRequest, RouteResult};

/// Convert an `image::GrayImage` into the lightweight `gridnav-core` view type.
pub fn gray_view(img: &::image::GrayImage) -> GrayImageView<'_> {
    GrayImageView {
        width: img.width() as usize,
        height: img.height() as usize,
        data: img.as_raw(),
    }
}

/// Run the full routing pipeline on a decoded grayscale image.
pub fn route_image(
    img: &::image::GrayImage,
    locator: &mut dyn CornerLocator,
    classifier: &dyn CellClassifier,
    request: &RouteRequest,
) -> Result<RouteResult, PipelineError> {
    plan_route(&gray_view(img), locator, classifier, request)
}
