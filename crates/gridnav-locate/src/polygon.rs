//! Closed-polygon simplification and measures.

use nalgebra::Point2;

/// Signed shoelace area, absolute value. Vertices in boundary order.
pub fn polygon_area(vertices: &[Point2<f32>]) -> f32 {
    if vertices.len() < 3 {
        return 0.0;
    }
    let mut twice = 0.0_f32;
    for i in 0..vertices.len() {
        let a = vertices[i];
        let b = vertices[(i + 1) % vertices.len()];
        twice += a.x * b.y - b.x * a.y;
    }
    twice.abs() * 0.5
}

/// Simplify a closed polygon with Douglas-Peucker.
///
/// The polygon is split at its two mutually farthest vertices and each open
/// chain is simplified independently, then the chains are rejoined. `epsilon`
/// is the maximum allowed perpendicular deviation in pixels.
pub fn simplify_polygon(vertices: &[Point2<f32>], epsilon: f32) -> Vec<Point2<f32>> {
    let n = vertices.len();
    if n <= 3 {
        return vertices.to_vec();
    }

    // Farthest pair as split anchors.
    let (mut ai, mut bi) = (0, 1);
    let mut best = -1.0_f32;
    for i in 0..n {
        for j in (i + 1)..n {
            let d = dist_sq(vertices[i], vertices[j]);
            if d > best {
                best = d;
                ai = i;
                bi = j;
            }
        }
    }

    let chain_a: Vec<Point2<f32>> = (ai..=bi).map(|i| vertices[i]).collect();
    let chain_b: Vec<Point2<f32>> = (bi..n + ai + 1).map(|i| vertices[i % n]).collect();

    let mut out = douglas_peucker(&chain_a, epsilon);
    let tail = douglas_peucker(&chain_b, epsilon);
    // Both chains contain the split anchors; drop the duplicates.
    out.extend(tail.into_iter().skip(1).take_while(|p| *p != vertices[ai]));
    out
}

/// Douglas-Peucker on an open polyline; the endpoints always survive.
pub(crate) fn douglas_peucker(points: &[Point2<f32>], epsilon: f32) -> Vec<Point2<f32>> {
    if points.len() <= 2 {
        return points.to_vec();
    }

    let first = points[0];
    let last = points[points.len() - 1];

    let mut max_dist = 0.0_f32;
    let mut max_idx = 0;
    for (i, p) in points.iter().enumerate().skip(1).take(points.len() - 2) {
        let d = perpendicular_distance(*p, first, last);
        if d > max_dist {
            max_dist = d;
            max_idx = i;
        }
    }

    if max_dist <= epsilon {
        return vec![first, last];
    }

    let mut left = douglas_peucker(&points[..=max_idx], epsilon);
    let right = douglas_peucker(&points[max_idx..], epsilon);
    left.pop(); // shared split vertex
    left.extend(right);
    left
}

fn dist_sq(a: Point2<f32>, b: Point2<f32>) -> f32 {
    (a.x - b.x).powi(2) + (a.y - b.y).powi(2)
}

fn perpendicular_distance(p: Point2<f32>, a: Point2<f32>, b: Point2<f32>) -> f32 {
    let len_sq = dist_sq(a, b);
    if len_sq < 1e-12 {
        return dist_sq(p, a).sqrt();
    }
    let cross = (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x);
    cross.abs() / len_sq.sqrt()
}
