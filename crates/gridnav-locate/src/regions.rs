//! Connected foreground regions and their outlines.

use nalgebra::Point2;
use std::collections::VecDeque;

/// One 8-connected foreground region.
#[derive(Clone, Debug)]
pub struct Region {
    /// Number of foreground pixels.
    pub pixel_count: usize,
    /// Boundary pixels: foreground pixels with at least one 4-neighbor that
    /// is background or outside the image.
    pub boundary: Vec<Point2<f32>>,
}

/// Extract all 8-connected regions from a row-major 0/1 mask.
///
/// Regions smaller than `min_pixels` are dropped early to keep candidate
/// lists short on noisy inputs.
pub fn find_regions(mask: &[u8], width: usize, height: usize, min_pixels: usize) -> Vec<Region> {
    assert_eq!(mask.len(), width * height, "mask length mismatch");

    let mut seen = vec![false; mask.len()];
    let mut regions = Vec::new();

    for start in 0..mask.len() {
        if mask[start] == 0 || seen[start] {
            continue;
        }

        let mut pixels = Vec::new();
        let mut queue = VecDeque::new();
        seen[start] = true;
        queue.push_back(start);

        while let Some(idx) = queue.pop_front() {
            pixels.push(idx);
            let x = (idx % width) as i64;
            let y = (idx / width) as i64;

            for dy in -1..=1_i64 {
                for dx in -1..=1_i64 {
                    if dx == 0 && dy == 0 {
                        continue;
                    }
                    let (nx, ny) = (x + dx, y + dy);
                    if nx < 0 || ny < 0 || nx >= width as i64 || ny >= height as i64 {
                        continue;
                    }
                    let nidx = ny as usize * width + nx as usize;
                    if mask[nidx] != 0 && !seen[nidx] {
                        seen[nidx] = true;
                        queue.push_back(nidx);
                    }
                }
            }
        }

        if pixels.len() < min_pixels {
            continue;
        }

        let boundary = pixels
            .iter()
            .filter(|&&idx| is_boundary(mask, width, height, idx))
            .map(|&idx| Point2::new((idx % width) as f32, (idx / width) as f32))
            .collect();

        regions.push(Region {
            pixel_count: pixels.len(),
            boundary,
        });
    }

    regions
}

fn is_boundary(mask: &[u8], width: usize, height: usize, idx: usize) -> bool {
    let x = (idx % width) as i64;
    let y = (idx / width) as i64;
    for (dx, dy) in [(1, 0), (-1, 0), (0, 1), (0, -1)] {
        let (nx, ny) = (x + dx, y + dy);
        if nx < 0 || ny < 0 || nx >= width as i64 || ny >= height as i64 {
            return true;
        }
        if mask[ny as usize * width + nx as usize] == 0 {
            return true;
        }
    }
    false
}

/// Convex hull via Andrew's monotone chain, counter-clockwise in image
/// coordinates (y grows downwards), without the repeated first point.
pub fn convex_hull(points: &[Point2<f32>]) -> Vec<Point2<f32>> {
    let mut pts: Vec<Point2<f32>> = points.to_vec();
    pts.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
    pts.dedup_by(|a, b| a.x == b.x && a.y == b.y);

    if pts.len() < 3 {
        return pts;
    }

    let cross = |o: &Point2<f32>, a: &Point2<f32>, b: &Point2<f32>| {
        (a.x - o.x) * (b.y - o.y) - (a.y - o.y) * (b.x - o.x)
    };

    let mut lower: Vec<Point2<f32>> = Vec::new();
    for p in &pts {
        while lower.len() >= 2 && cross(&lower[lower.len() - 2], &lower[lower.len() - 1], p) <= 0.0
        {
            lower.pop();
        }
        lower.push(*p);
    }

    let mut upper: Vec<Point2<f32>> = Vec::new();
    for p in pts.iter().rev() {
        while upper.len() >= 2 && cross(&upper[upper.len() - 2], &upper[upper.len() - 1], p) <= 0.0
        {
            upper.pop();
        }
        upper.push(*p);
    }

    lower.pop();
    upper.pop();
    lower.extend(upper);
    lower
}
