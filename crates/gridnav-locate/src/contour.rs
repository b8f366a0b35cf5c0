//! Contour-based corner location: largest four-vertex region outline.

use gridnav_core::{CornerSet, GrayImageView};
use log::{debug, info};
use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::binary::{binarize, otsu_threshold, Polarity};
use crate::polygon::{polygon_area, simplify_polygon};
use crate::regions::{convex_hull, find_regions};
use crate::{CornerLocator, LocateError};

/// Parameters for contour corner detection.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct ContourParams {
    /// Minimum polygon area in pixels for a valid working-area candidate.
    pub min_area: f32,
    /// Foreground polarity of the thresholded outline.
    pub polarity: Polarity,
    /// Douglas-Peucker tolerance as a fraction of the hull perimeter.
    pub epsilon_frac: f32,
    /// Regions below this pixel count are discarded before hull fitting.
    pub min_region_pixels: usize,
}

impl Default for ContourParams {
    fn default() -> Self {
        Self {
            min_area: 10_000.0,
            polarity: Polarity::Dark,
            epsilon_frac: 0.02,
            min_region_pixels: 64,
        }
    }
}

/// Finds the largest closed 4-vertex polygon above the area threshold and
/// returns its corners.
#[derive(Clone, Debug, Default)]
pub struct ContourLocator {
    params: ContourParams,
}

impl ContourLocator {
    pub fn new(params: ContourParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &ContourParams {
        &self.params
    }
}

impl CornerLocator for ContourLocator {
    fn locate(&mut self, image: &GrayImageView<'_>) -> Result<CornerSet, LocateError> {
        let quads = quad_candidates(
            image,
            self.params.polarity,
            self.params.min_region_pixels,
            self.params.epsilon_frac,
        );

        let best = quads
            .into_iter()
            .map(|q| (polygon_area(&q), q))
            .filter(|(area, _)| *area >= self.params.min_area)
            .max_by(|(a, _), (b, _)| a.total_cmp(b));

        match best {
            Some((area, quad)) => {
                info!("contour corners found (area {area:.0} px)");
                Ok(CornerSet::ordered(quad))
            }
            None => Err(LocateError::not_found(format!(
                "no 4-vertex outline with area >= {:.0} px",
                self.params.min_area
            ))),
        }
    }
}

/// All four-vertex region outlines in the image, canonically ordered.
///
/// Shared between the contour locator (largest quad wins) and the fiducial
/// locator (every quad is a marker candidate).
pub(crate) fn quad_candidates(
    image: &GrayImageView<'_>,
    polarity: Polarity,
    min_region_pixels: usize,
    epsilon_frac: f32,
) -> Vec<[Point2<f32>; 4]> {
    let threshold = otsu_threshold(image);
    let mask = binarize(image, threshold, polarity);
    let regions = find_regions(&mask, image.width, image.height, min_region_pixels);
    debug!(
        "threshold {threshold}: {} candidate region(s) above {min_region_pixels} px",
        regions.len()
    );

    let mut quads = Vec::new();
    for region in &regions {
        let hull = convex_hull(&region.boundary);
        if hull.len() < 4 {
            continue;
        }

        let perimeter: f32 = (0..hull.len())
            .map(|i| {
                let a = hull[i];
                let b = hull[(i + 1) % hull.len()];
                ((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt()
            })
            .sum();

        let simplified = simplify_polygon(&hull, epsilon_frac * perimeter);
        if simplified.len() != 4 {
            continue;
        }

        let quad = [simplified[0], simplified[1], simplified[2], simplified[3]];
        quads.push(CornerSet::ordered(quad).points());
    }

    quads
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridnav_core::GrayImage;

    fn scene_with_dark_quad() -> GrayImage {
        // Dark filled quadrilateral on a light floor.
        GrayImage::from_fn(200, 200, |x, y| {
            let inside = x >= 30 && x <= 170 && y >= 40 && y <= 160;
            if inside {
                20
            } else {
                230
            }
        })
    }

    #[test]
    fn locates_the_rectangle_corners() {
        let img = scene_with_dark_quad();
        let mut locator = ContourLocator::new(ContourParams {
            min_area: 1000.0,
            ..ContourParams::default()
        });
        let corners = locator.locate(&img.view()).expect("corners");

        let tl = corners.top_left();
        let br = corners.bottom_right();
        assert!((tl.x - 30.0).abs() <= 2.0 && (tl.y - 40.0).abs() <= 2.0);
        assert!((br.x - 170.0).abs() <= 2.0 && (br.y - 160.0).abs() <= 2.0);
    }

    #[test]
    fn area_threshold_rejects_small_outlines() {
        let img = scene_with_dark_quad();
        let mut locator = ContourLocator::new(ContourParams {
            min_area: 1e9,
            ..ContourParams::default()
        });
        assert!(matches!(
            locator.locate(&img.view()),
            Err(LocateError::CornersNotFound { .. })
        ));
    }

    #[test]
    fn blank_image_has_no_corners() {
        let img = GrayImage::from_fn(100, 100, |_, _| 255);
        let mut locator = ContourLocator::default();
        assert!(locator.locate(&img.view()).is_err());
    }

    #[test]
    fn round_blob_is_not_a_quad() {
        let img = GrayImage::from_fn(200, 200, |x, y| {
            let dx = x as f32 - 100.0;
            let dy = y as f32 - 100.0;
            if (dx * dx + dy * dy).sqrt() < 70.0 {
                20
            } else {
                230
            }
        });
        let mut locator = ContourLocator::new(ContourParams {
            min_area: 1000.0,
            ..ContourParams::default()
        });
        assert!(locator.locate(&img.view()).is_err());
    }
}
