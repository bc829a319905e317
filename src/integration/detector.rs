//! Trait for marker detection backends.

use crate::tracker::{MarkerClass, MarkerDetections, MarkerObservation};

/// Trait for marker detection backends.
///
/// Implement this trait to feed any image-processing backend into the tracker.
/// Implementations return blobs for both marker classes, already restricted
/// to the region of interest.
///
/// # Example
///
/// ```ignore
/// use conetrack_rs::{MarkerDetections, MarkerSource};
///
/// struct HsvThresholdDetector {
///     // color ranges, ignore mask...
/// }
///
/// impl MarkerSource for HsvThresholdDetector {
///     type Error = std::io::Error;
///
///     fn detect(&mut self, input: &[u8], width: u32, height: u32) -> Result<MarkerDetections, Self::Error> {
///         // Threshold, find contours, compute moments
///         Ok(MarkerDetections::default())
///     }
/// }
/// ```
pub trait MarkerSource {
    /// Error type for detection failures.
    type Error;

    /// Run detection on a raw frame.
    ///
    /// # Arguments
    /// * `input` - Raw pixel bytes (format depends on implementation)
    /// * `width` - Frame width in pixels
    /// * `height` - Frame height in pixels
    fn detect(
        &mut self,
        input: &[u8],
        width: u32,
        height: u32,
    ) -> Result<MarkerDetections, Self::Error>;
}

/// Helper trait for converting backend-specific outputs to [`MarkerDetections`].
pub trait IntoDetections {
    fn into_detections(self) -> MarkerDetections;
}

impl IntoDetections for MarkerDetections {
    fn into_detections(self) -> MarkerDetections {
        self
    }
}

impl IntoDetections for Vec<(MarkerClass, MarkerObservation)> {
    fn into_detections(self) -> MarkerDetections {
        let mut detections = MarkerDetections::default();
        for (class, observation) in self {
            detections.push(class, observation);
        }
        detections
    }
}
