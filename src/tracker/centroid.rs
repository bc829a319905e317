//! Area filtering and centroid extraction for raw blob observations.

use tracing::trace;

use crate::tracker::marker::{MarkerClass, MarkerObservation};
use crate::tracker::point::Point;

/// Drop blobs smaller than `min_area` or with zero `m00`, and reduce the
/// survivors to their centroids.
pub fn filter_centroids(
    class: MarkerClass,
    observations: &[MarkerObservation],
    min_area: f32,
) -> Vec<Point> {
    observations
        .iter()
        .filter_map(|obs| {
            if obs.area < min_area {
                trace!(class = class.as_str(), area = obs.area, "blob below minimum area");
                return None;
            }
            match obs.moments.centroid() {
                Some((x, y)) => Some(Point::new(x as f32, y as f32)),
                None => {
                    trace!(class = class.as_str(), "degenerate blob with zero m00");
                    None
                }
            }
        })
        .collect()
}
