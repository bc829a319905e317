//! Centerline synthesis from paired left/right markers.

use ndarray::Array2;

use crate::tracker::cone_tracker::TrackerConfig;
use crate::tracker::fallback::ResolvedPair;
use crate::tracker::point::{Point, midpoint};

/// Compute the `|left.y - right.y|` matrix between left and right centroids.
pub fn vertical_distance(left: &[Point], right: &[Point]) -> Array2<f32> {
    let mut dists = Array2::zeros((left.len(), right.len()));
    for (i, l) in left.iter().enumerate() {
        for (j, r) in right.iter().enumerate() {
            dists[[i, j]] = (l.y - r.y).abs();
        }
    }
    dists
}

/// Pair each left centroid with the right centroid closest in `y`, keeping
/// only pairs strictly closer than `threshold`. Returns the pair midpoints
/// ordered nearest to the vehicle first.
///
/// A right centroid may serve several left centroids.
pub fn pair_markers(left: &[Point], right: &[Point], threshold: f32) -> Vec<Point> {
    let dists = vertical_distance(left, right);

    let mut centers: Vec<Point> = dists
        .rows()
        .into_iter()
        .enumerate()
        .filter_map(|(i, row)| {
            let mut best: Option<(usize, f32)> = None;
            for (j, &d) in row.iter().enumerate() {
                if best.is_none_or(|(_, bd)| d < bd) {
                    best = Some((j, d));
                }
            }
            match best {
                Some((j, d)) if d < threshold => Some(midpoint(&left[i], &right[j])),
                _ => None,
            }
        })
        .collect();

    centers.sort_by(|a, b| b.y.total_cmp(&a.y));
    centers
}

/// Centerline estimate for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct PathEstimate {
    /// Centerline points, nearest to the vehicle first. Never empty.
    pub points: Vec<Point>,
    /// Whether `points` came from paired markers rather than the resolved primaries
    pub paired: bool,
    /// Lookahead point blended into the target
    pub lookahead: Option<Point>,
    /// Point the steering is computed against
    pub target: Point,
}

impl PathEstimate {
    /// Build the centerline from all filtered centroids, falling back to the
    /// midpoint of the resolved primaries when no pair qualifies.
    pub fn synthesize(
        left: &[Point],
        right: &[Point],
        resolved: &ResolvedPair,
        config: &TrackerConfig,
    ) -> Self {
        let mut points = pair_markers(left, right, config.pairing_threshold);
        let paired = !points.is_empty();
        if !paired {
            points.push(midpoint(&resolved.left.position, &resolved.right.position));
        }

        let nearest = points[0];
        let lookahead = points
            .get(config.lookahead_index)
            .or_else(|| points.first())
            .copied();

        let target = match lookahead {
            Some(ahead) => Point::from(
                nearest.coords * config.nearest_weight + ahead.coords * config.lookahead_weight,
            ),
            None => nearest,
        };

        Self {
            points,
            paired,
            lookahead,
            target,
        }
    }

    /// Nearest centerline point.
    pub fn nearest(&self) -> Point {
        self.points[0]
    }
}
