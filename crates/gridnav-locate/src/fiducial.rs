//! Fiducial-marker corner location.
//!
//! The four working-area corners carry square binary markers with ids 0..=3
//! mapped to top-left, top-right, bottom-right, bottom-left. Detection finds
//! quad outlines, samples each quad's module grid through a per-quad
//! perspective transform, and matches the observed code against the embedded
//! dictionary in all four rotations.

use gridnav_core::{sample_bilinear, CornerSet, GrayImageView, Transform};
use log::{debug, info};
use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::binary::Polarity;
use crate::contour::quad_candidates;
use crate::dictionary::{rotate_code, Dictionary, GRIDNAV_4X4};
use crate::{CornerLocator, LocateError};

/// A dictionary match for an observed code.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MatchResult {
    /// Marker id in the dictionary.
    pub id: u32,
    /// Rotation `0..=3` such that `observed == rotate(dict_code, rotation)`.
    pub rotation: u8,
    /// Hamming distance after rotation.
    pub hamming: u8,
}

/// Brute-force matcher over a fixed dictionary with precomputed rotations.
#[derive(Clone, Debug)]
pub struct Matcher {
    dict: Dictionary,
    max_hamming: u8,
    rotated: Vec<[u16; 4]>,
}

impl Matcher {
    pub fn new(dict: Dictionary, max_hamming: u8) -> Self {
        let rotated = dict
            .codes
            .iter()
            .map(|&base| {
                [
                    base,
                    rotate_code(base, dict.size, 1),
                    rotate_code(base, dict.size, 2),
                    rotate_code(base, dict.size, 3),
                ]
            })
            .collect();
        Self {
            dict,
            max_hamming,
            rotated,
        }
    }

    #[inline]
    pub fn dictionary(&self) -> Dictionary {
        self.dict
    }

    /// Best match within the Hamming budget, if any.
    pub fn match_code(&self, observed: u16) -> Option<MatchResult> {
        let mut best: Option<MatchResult> = None;
        for (id, rots) in self.rotated.iter().enumerate() {
            for (rot, &cand) in rots.iter().enumerate() {
                let h = (observed ^ cand).count_ones() as u8;
                if h > self.max_hamming {
                    continue;
                }
                if best.is_none_or(|prev| h < prev.hamming) {
                    best = Some(MatchResult {
                        id: id as u32,
                        rotation: rot as u8,
                        hamming: h,
                    });
                    if h == 0 {
                        return best;
                    }
                }
            }
        }
        best
    }
}

/// One decoded marker.
#[derive(Clone, Copy, Debug)]
pub struct MarkerObservation {
    pub id: u32,
    pub rotation: u8,
    pub hamming: u8,
    /// Center of the marker quad in image coordinates.
    pub center: Point2<f32>,
    /// Quad corners in canonical order.
    pub corners: [Point2<f32>; 4],
}

/// Parameters for fiducial corner detection.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct FiducialParams {
    /// Marker border width in modules.
    pub border_bits: usize,
    /// Canonical sampling resolution per module, in pixels.
    pub px_per_module: f32,
    /// Required fraction of black border modules.
    pub min_border_score: f32,
    /// Maximum Hamming distance accepted by the matcher.
    pub max_hamming: u8,
    /// Regions below this pixel count are not considered marker quads.
    pub min_region_pixels: usize,
    /// Douglas-Peucker tolerance as a fraction of the hull perimeter.
    pub epsilon_frac: f32,
}

impl Default for FiducialParams {
    fn default() -> Self {
        Self {
            border_bits: 1,
            px_per_module: 8.0,
            min_border_score: 0.85,
            max_hamming: GRIDNAV_4X4.max_correction_bits,
            min_region_pixels: 36,
            epsilon_frac: 0.03,
        }
    }
}

/// Locates the working area from corner markers with ids 0..=3.
#[derive(Clone, Debug)]
pub struct FiducialLocator {
    params: FiducialParams,
    matcher: Matcher,
}

impl Default for FiducialLocator {
    fn default() -> Self {
        Self::new(FiducialParams::default())
    }
}

impl FiducialLocator {
    pub fn new(params: FiducialParams) -> Self {
        let matcher = Matcher::new(GRIDNAV_4X4, params.max_hamming);
        Self { params, matcher }
    }

    pub fn with_dictionary(params: FiducialParams, dict: Dictionary) -> Self {
        let matcher = Matcher::new(dict, params.max_hamming);
        Self { params, matcher }
    }

    pub fn params(&self) -> &FiducialParams {
        &self.params
    }

    /// Decode every marker visible in the image, best observation per id.
    pub fn detect_markers(&self, image: &GrayImageView<'_>) -> Vec<MarkerObservation> {
        let quads = quad_candidates(
            image,
            Polarity::Dark,
            self.params.min_region_pixels,
            self.params.epsilon_frac,
        );
        debug!("{} marker quad candidate(s)", quads.len());

        let mut best: Vec<Option<MarkerObservation>> =
            vec![None; self.matcher.dictionary().codes.len()];
        for quad in quads {
            let Some(obs) = self.decode_quad(image, &quad) else {
                continue;
            };
            let slot = &mut best[obs.id as usize];
            if slot.is_none_or(|prev| obs.hamming < prev.hamming) {
                *slot = Some(obs);
            }
        }

        best.into_iter().flatten().collect()
    }

    fn decode_quad(
        &self,
        image: &GrayImageView<'_>,
        quad: &[Point2<f32>; 4],
    ) -> Option<MarkerObservation> {
        let dict = self.matcher.dictionary();
        let modules = dict.size + 2 * self.params.border_bits;
        let side = (modules as f32 * self.params.px_per_module).round() as usize;

        let corners = CornerSet::ordered(*quad);
        let mapper = Transform::from_corners(&corners, side, side).ok()?;

        // Mean intensity per module, sampled on a 3x3 grid inside the
        // module's inner 60%.
        let module_px = (side - 1) as f32 / modules as f32;
        let mut means = vec![0.0_f32; modules * modules];
        for my in 0..modules {
            for mx in 0..modules {
                let mut acc = 0.0;
                for sy in 0..3 {
                    for sx in 0..3 {
                        let u = (mx as f32 + 0.2 + 0.3 * sx as f32) * module_px;
                        let v = (my as f32 + 0.2 + 0.3 * sy as f32) * module_px;
                        let p = mapper.apply_inverse(Point2::new(u, v));
                        acc += sample_bilinear(image, p.x, p.y);
                    }
                }
                means[my * modules + mx] = acc / 9.0;
            }
        }

        // Split black/white at the midpoint of the observed range. The
        // border is black and the interior carries both colors, so the range
        // is wide whenever the quad really is a marker.
        let (lo, hi) = means
            .iter()
            .fold((f32::MAX, f32::MIN), |(lo, hi), &m| (lo.min(m), hi.max(m)));
        if hi - lo < 20.0 {
            return None;
        }
        let split = (lo + hi) * 0.5;

        let b = self.params.border_bits;
        let mut border_total = 0usize;
        let mut border_black = 0usize;
        let mut code = 0u16;
        for my in 0..modules {
            for mx in 0..modules {
                let black = means[my * modules + mx] < split;
                let inner = mx >= b && mx < modules - b && my >= b && my < modules - b;
                if inner {
                    let bit = ((my - b) * dict.size + (mx - b)) as u16;
                    if black {
                        code |= 1 << bit;
                    }
                } else {
                    border_total += 1;
                    border_black += black as usize;
                }
            }
        }

        if (border_black as f32) < self.params.min_border_score * border_total as f32 {
            return None;
        }

        let m = self.matcher.match_code(code)?;
        let pts = corners.points();
        let center = Point2::new(
            pts.iter().map(|p| p.x).sum::<f32>() / 4.0,
            pts.iter().map(|p| p.y).sum::<f32>() / 4.0,
        );

        Some(MarkerObservation {
            id: m.id,
            rotation: m.rotation,
            hamming: m.hamming,
            center,
            corners: pts,
        })
    }
}

impl CornerLocator for FiducialLocator {
    fn locate(&mut self, image: &GrayImageView<'_>) -> Result<CornerSet, LocateError> {
        let markers = self.detect_markers(image);

        let mut centers: [Option<Point2<f32>>; 4] = [None; 4];
        for obs in &markers {
            if obs.id < 4 {
                centers[obs.id as usize] = Some(obs.center);
            }
        }

        let found = centers.iter().flatten().count();
        if found < 4 {
            return Err(LocateError::MissingMarkers { found });
        }

        info!("all four corner markers decoded");
        let pts = centers.map(|c| c.unwrap_or_else(|| Point2::new(0.0, 0.0)));
        Ok(CornerSet::ordered(pts))
    }
}
