//! Canonical ordering of working-area corners.

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Exactly four boundary points in the canonical order
/// top-left, top-right, bottom-right, bottom-left.
///
/// The ordering is always derived geometrically by [`CornerSet::ordered`];
/// downstream code never needs to know which detection strategy produced the
/// points or in what order it emitted them.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CornerSet {
    points: [[f32; 2]; 4],
}

impl CornerSet {
    /// Canonicalize four points.
    ///
    /// Top-left has the minimal `x + y` sum, bottom-right the maximal sum;
    /// top-right has the minimal `y - x` difference, bottom-left the maximal.
    pub fn ordered(points: [Point2<f32>; 4]) -> Self {
        let sum = |p: &Point2<f32>| p.x + p.y;
        let diff = |p: &Point2<f32>| p.y - p.x;

        let tl = points
            .iter()
            .min_by(|a, b| sum(a).total_cmp(&sum(b)))
            .copied()
            .unwrap_or(points[0]);
        let br = points
            .iter()
            .max_by(|a, b| sum(a).total_cmp(&sum(b)))
            .copied()
            .unwrap_or(points[2]);
        let tr = points
            .iter()
            .min_by(|a, b| diff(a).total_cmp(&diff(b)))
            .copied()
            .unwrap_or(points[1]);
        let bl = points
            .iter()
            .max_by(|a, b| diff(a).total_cmp(&diff(b)))
            .copied()
            .unwrap_or(points[3]);

        Self {
            points: [[tl.x, tl.y], [tr.x, tr.y], [br.x, br.y], [bl.x, bl.y]],
        }
    }

    /// Points in canonical order TL, TR, BR, BL.
    #[inline]
    pub fn points(&self) -> [Point2<f32>; 4] {
        self.points.map(|[x, y]| Point2::new(x, y))
    }

    #[inline]
    pub fn top_left(&self) -> Point2<f32> {
        self.points()[0]
    }

    #[inline]
    pub fn top_right(&self) -> Point2<f32> {
        self.points()[1]
    }

    #[inline]
    pub fn bottom_right(&self) -> Point2<f32> {
        self.points()[2]
    }

    #[inline]
    pub fn bottom_left(&self) -> Point2<f32> {
        self.points()[3]
    }
}
