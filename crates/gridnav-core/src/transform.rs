//! Planar perspective transform between the source image and the rectified
//! top-down view.

use log::debug;
use nalgebra::{Matrix3, Point2, SMatrix, SVector, Vector3};

use crate::{sample_bilinear_u8, CornerSet, GeometryError, GrayImage, GrayImageView};

/// A 3x3 projective transform mapping source-image coordinates to
/// rectified-image coordinates, computed once per pipeline invocation and
/// immutable afterwards.
///
/// Both directions are solved at construction so that warping (which walks
/// destination pixels and samples the source) never needs a fallible inverse
/// later on.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    src_to_rect: Matrix3<f64>,
    rect_to_src: Matrix3<f64>,
}

impl Transform {
    /// Solve the transform that maps `corners` onto the axis-aligned
    /// rectangle `(0,0) .. (width-1, height-1)`, corner for corner.
    ///
    /// Fails with [`GeometryError::Degenerate`] when the corners are
    /// collinear or duplicated.
    pub fn from_corners(
        corners: &CornerSet,
        width: usize,
        height: usize,
    ) -> Result<Self, GeometryError> {
        if width == 0 || height == 0 {
            return Err(GeometryError::InvalidSize { width, height });
        }

        let w = (width - 1) as f32;
        let h = (height - 1) as f32;
        let dst = [
            Point2::new(0.0, 0.0),
            Point2::new(w, 0.0),
            Point2::new(w, h),
            Point2::new(0.0, h),
        ];

        let src_to_rect =
            solve_homography_4pt(&corners.points(), &dst).ok_or(GeometryError::Degenerate)?;
        let rect_to_src = src_to_rect
            .try_inverse()
            .ok_or(GeometryError::Degenerate)?;

        debug!("perspective transform solved for {width}x{height} output");

        Ok(Self {
            src_to_rect,
            rect_to_src,
        })
    }

    /// Map a source-image point into rectified coordinates.
    #[inline]
    pub fn apply(&self, p: Point2<f32>) -> Point2<f32> {
        project(&self.src_to_rect, p)
    }

    /// Map a rectified point back into source-image coordinates.
    #[inline]
    pub fn apply_inverse(&self, p: Point2<f32>) -> Point2<f32> {
        project(&self.rect_to_src, p)
    }

    /// Row-major matrix entries, source-to-rectified direction.
    pub fn to_array(&self) -> [[f64; 3]; 3] {
        let m = &self.src_to_rect;
        [
            [m[(0, 0)], m[(0, 1)], m[(0, 2)]],
            [m[(1, 0)], m[(1, 1)], m[(1, 2)]],
            [m[(2, 0)], m[(2, 1)], m[(2, 2)]],
        ]
    }
}

#[inline]
fn project(h: &Matrix3<f64>, p: Point2<f32>) -> Point2<f32> {
    let v = h * Vector3::new(p.x as f64, p.y as f64, 1.0);
    Point2::new((v[0] / v[2]) as f32, (v[1] / v[2]) as f32)
}

/// Hartley normalization: translate the centroid to the origin and scale so
/// the mean distance from it is sqrt(2). Conditions the 8x8 solve.
fn normalize4(pts: &[Point2<f32>; 4]) -> ([Point2<f64>; 4], Matrix3<f64>) {
    let mut cx = 0.0_f64;
    let mut cy = 0.0_f64;
    for p in pts {
        cx += p.x as f64;
        cy += p.y as f64;
    }
    cx /= 4.0;
    cy /= 4.0;

    let mut mean_dist = 0.0_f64;
    for p in pts {
        mean_dist += ((p.x as f64 - cx).powi(2) + (p.y as f64 - cy).powi(2)).sqrt();
    }
    mean_dist /= 4.0;

    let s = if mean_dist > 1e-12 {
        2.0_f64.sqrt() / mean_dist
    } else {
        1.0
    };
    let t = Matrix3::new(s, 0.0, -s * cx, 0.0, s, -s * cy, 0.0, 0.0, 1.0);

    let mut out = [Point2::new(0.0_f64, 0.0); 4];
    for (o, p) in out.iter_mut().zip(pts) {
        let v = t * Vector3::new(p.x as f64, p.y as f64, 1.0);
        *o = Point2::new(v[0], v[1]);
    }
    (out, t)
}

/// Direct linear transform for exactly four correspondences, `h33 = 1`.
///
/// For each pair `(x,y) -> (u,v)`:
///   `h11 x + h12 y + h13 - u h31 x - u h32 y = u`
///   `h21 x + h22 y + h23 - v h31 x - v h32 y = v`
fn solve_homography_4pt(src: &[Point2<f32>; 4], dst: &[Point2<f32>; 4]) -> Option<Matrix3<f64>> {
    let (src_n, t_src) = normalize4(src);
    let (dst_n, t_dst) = normalize4(dst);

    let mut a = SMatrix::<f64, 8, 8>::zeros();
    let mut b = SVector::<f64, 8>::zeros();

    for k in 0..4 {
        let (x, y) = (src_n[k].x, src_n[k].y);
        let (u, v) = (dst_n[k].x, dst_n[k].y);

        let r = 2 * k;
        a[(r, 0)] = x;
        a[(r, 1)] = y;
        a[(r, 2)] = 1.0;
        a[(r, 6)] = -u * x;
        a[(r, 7)] = -u * y;
        b[r] = u;

        a[(r + 1, 3)] = x;
        a[(r + 1, 4)] = y;
        a[(r + 1, 5)] = 1.0;
        a[(r + 1, 6)] = -v * x;
        a[(r + 1, 7)] = -v * y;
        b[r + 1] = v;
    }

    let x = a.lu().solve(&b)?;
    let hn = Matrix3::new(x[0], x[1], x[2], x[3], x[4], x[5], x[6], x[7], 1.0);

    // Denormalize: H = T_dst^-1 * Hn * T_src, scaled so h33 = 1.
    let h = t_dst.try_inverse()? * hn * t_src;
    let s = h[(2, 2)];
    if s.abs() < 1e-12 {
        return None;
    }
    Some(h / s)
}

/// Warp the source into the rectified rectangle: for each destination pixel,
/// map back through the transform and sample bilinearly.
///
/// The output is always exactly `width x height`; preserving the source
/// aspect ratio is the caller's concern.
pub fn rectify(
    src: &GrayImageView<'_>,
    transform: &Transform,
    width: usize,
    height: usize,
) -> GrayImage {
    let mut out = GrayImage::new(width, height);
    for y in 0..height {
        for x in 0..width {
            let p = transform.apply_inverse(Point2::new(x as f32, y as f32));
            out.put(x, y, sample_bilinear_u8(src, p.x, p.y));
        }
    }
    out
}

/// Plain bilinear resample to `width x height`, for inputs that are already
/// top-down and only need size normalization.
///
/// Sample coordinates are clamped to the source so border pixels replicate
/// the edge instead of mixing with the zero padding when upsampling.
pub fn resample(src: &GrayImageView<'_>, width: usize, height: usize) -> GrayImage {
    let sx = src.width as f32 / width as f32;
    let sy = src.height as f32 / height as f32;
    let max_x = (src.width.saturating_sub(1)) as f32;
    let max_y = (src.height.saturating_sub(1)) as f32;
    GrayImage::from_fn(width, height, |x, y| {
        let u = ((x as f32 + 0.5) * sx - 0.5).clamp(0.0, max_x);
        let v = ((y as f32 + 0.5) * sy - 0.5).clamp(0.0, max_y);
        sample_bilinear_u8(src, u, v)
    })
}
