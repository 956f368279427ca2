//! Ramer-Douglas-Peucker polyline simplification.

use crate::shape::Point;

/// Reduce a polyline to a subsequence whose deviation from the original
/// stays within `tolerance`. First and last points are always kept;
/// sequences of length <= 2 are returned unchanged.
pub fn simplify(points: &[Point], tolerance: f64) -> Vec<Point> {
    if points.len() <= 2 {
        return points.to_vec();
    }

    let mut max_dist = 0.0;
    let mut max_idx = 0;
    let first = points[0];
    let last = points[points.len() - 1];

    for (i, p) in points.iter().enumerate().take(points.len() - 1).skip(1) {
        let d = point_to_segment_distance(*p, first, last);
        if d > max_dist {
            max_dist = d;
            max_idx = i;
        }
    }

    if max_dist > tolerance {
        let mut left = simplify(&points[..=max_idx], tolerance);
        let right = simplify(&points[max_idx..], tolerance);
        left.pop(); // split point is shared once
        left.extend(right);
        left
    } else {
        vec![first, last]
    }
}

fn point_to_segment_distance(point: Point, seg_start: Point, seg_end: Point) -> f64 {
    let dx = seg_end.x - seg_start.x;
    let dy = seg_end.y - seg_start.y;
    let len_sq = dx * dx + dy * dy;

    if len_sq < 1e-12 {
        return ((point.x - seg_start.x).powi(2) + (point.y - seg_start.y).powi(2)).sqrt();
    }

    let t = ((point.x - seg_start.x) * dx + (point.y - seg_start.y) * dy) / len_sq;
    let t = t.clamp(0.0, 1.0);

    let proj_x = seg_start.x + t * dx;
    let proj_y = seg_start.y + t * dy;

    ((point.x - proj_x).powi(2) + (point.y - proj_y).powi(2)).sqrt()
}
