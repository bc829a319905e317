//! SteeringPipeline for combining marker detection with cone tracking.

use tracing::info;

use crate::error::{ConfigError, FrameError, PipelineError};
use crate::integration::evaluation::SteeringEvaluator;
use crate::tracker::{ConeTracker, FrameSize, SteeringResult, TrackerConfig};

use super::MarkerSource;

/// Bundles a [`MarkerSource`] with a [`ConeTracker`].
///
/// One pipeline serves one frame stream. Frames from several sources must be
/// serialized before reaching it.
pub struct SteeringPipeline<D: MarkerSource> {
    detector: D,
    tracker: ConeTracker,
}

impl<D: MarkerSource> SteeringPipeline<D> {
    /// Create a new pipeline with the given detector and tracker config.
    pub fn new(detector: D, config: TrackerConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            detector,
            tracker: ConeTracker::new(config)?,
        })
    }

    /// Create a new pipeline with default tracker configuration.
    pub fn with_default_config(detector: D) -> Self {
        Self {
            detector,
            tracker: ConeTracker::with_default_config(),
        }
    }

    /// Process a single frame and return its steering value.
    ///
    /// `verbose` only adds a diagnostic log event; the returned value and
    /// the tracker state are the same either way.
    ///
    /// # Arguments
    /// * `input` - Raw pixel bytes
    /// * `width` - Frame width in pixels
    /// * `height` - Frame height in pixels
    /// * `verbose` - Emit a per-frame diagnostic summary
    pub fn compute_steering(
        &mut self,
        input: &[u8],
        width: u32,
        height: u32,
        verbose: bool,
    ) -> Result<SteeringResult, PipelineError<D::Error>> {
        let frame = FrameSize::new(width, height);
        if frame.is_empty() {
            return Err(FrameError::EmptyFrame { width, height }.into());
        }

        let detections = self
            .detector
            .detect(input, width, height)
            .map_err(PipelineError::Detection)?;
        let result = self.tracker.update(&detections, frame);

        if verbose {
            report(&result);
        }
        Ok(result)
    }

    /// Like [`compute_steering`](Self::compute_steering), also scoring the
    /// result against a ground-truth steering value.
    pub fn compute_steering_with_truth(
        &mut self,
        input: &[u8],
        width: u32,
        height: u32,
        verbose: bool,
        ground_truth: f32,
        evaluator: &mut SteeringEvaluator,
    ) -> Result<SteeringResult, PipelineError<D::Error>> {
        let result = self.compute_steering(input, width, height, verbose)?;
        evaluator.record(result.steering, ground_truth);
        Ok(result)
    }

    /// Get a reference to the underlying detector.
    pub fn detector(&self) -> &D {
        &self.detector
    }

    /// Get a mutable reference to the underlying detector.
    pub fn detector_mut(&mut self) -> &mut D {
        &mut self.detector
    }

    /// Get a reference to the underlying tracker.
    pub fn tracker(&self) -> &ConeTracker {
        &self.tracker
    }

    /// Get a mutable reference to the underlying tracker.
    pub fn tracker_mut(&mut self) -> &mut ConeTracker {
        &mut self.tracker
    }
}

fn report(result: &SteeringResult) {
    info!(
        frame_id = result.frame_id,
        visibility = ?result.visibility,
        left_x = result.left.position.x,
        left_y = result.left.position.y,
        left_source = result.left.resolution.as_str(),
        right_x = result.right.position.x,
        right_y = result.right.position.y,
        right_source = result.right.resolution.as_str(),
        path_points = result.path.len(),
        target_x = result.target.x,
        target_y = result.target.y,
        raw = result.raw,
        steering = result.steering,
        direction = result.direction().as_str(),
        "steering computed"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracker::{MarkerDetections, MarkerObservation};

    struct MockDetector {
        detections: MarkerDetections,
    }

    impl MarkerSource for MockDetector {
        type Error = std::convert::Infallible;

        fn detect(
            &mut self,
            _input: &[u8],
            _width: u32,
            _height: u32,
        ) -> Result<MarkerDetections, Self::Error> {
            Ok(self.detections.clone())
        }
    }

    #[derive(Debug, thiserror::Error)]
    #[error("camera disconnected")]
    struct CameraError;

    struct FailingDetector;

    impl MarkerSource for FailingDetector {
        type Error = CameraError;

        fn detect(
            &mut self,
            _input: &[u8],
            _width: u32,
            _height: u32,
        ) -> Result<MarkerDetections, Self::Error> {
            Err(CameraError)
        }
    }

    fn centered_detector() -> MockDetector {
        MockDetector {
            detections: MarkerDetections::new(
                vec![MarkerObservation::from_centroid(100.0, 400.0, 120.0)],
                vec![MarkerObservation::from_centroid(500.0, 400.0, 120.0)],
            ),
        }
    }

    #[test]
    fn test_steering_pipeline() {
        let mut pipeline = SteeringPipeline::with_default_config(centered_detector());
        let result = pipeline.compute_steering(&[], 600, 480, false).unwrap();
        assert!(result.steering.abs() < 1e-4);
        assert_eq!(pipeline.tracker().state().track_width.len(), 1);
    }

    #[test]
    fn test_verbose_does_not_change_result() {
        let mut quiet = SteeringPipeline::with_default_config(centered_detector());
        let mut loud = SteeringPipeline::with_default_config(centered_detector());
        for _ in 0..3 {
            let a = quiet.compute_steering(&[], 640, 480, false).unwrap();
            let b = loud.compute_steering(&[], 640, 480, true).unwrap();
            assert_eq!(a, b);
        }
        assert_eq!(quiet.tracker().state(), loud.tracker().state());
    }

    #[test]
    fn test_empty_frame_rejected() {
        let mut pipeline = SteeringPipeline::with_default_config(centered_detector());
        let err = pipeline.compute_steering(&[], 640, 0, false).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Frame(FrameError::EmptyFrame {
                width: 640,
                height: 0
            })
        ));
        assert_eq!(pipeline.tracker().state().frame_id, 0);
    }

    #[test]
    fn test_detector_error_propagates() {
        let mut pipeline = SteeringPipeline::with_default_config(FailingDetector);
        let err = pipeline.compute_steering(&[], 640, 480, false).unwrap_err();
        assert!(matches!(err, PipelineError::Detection(CameraError)));
        assert_eq!(err.to_string(), "marker detection failed");
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = TrackerConfig {
            lookahead_weight: 0.5,
            ..TrackerConfig::default()
        };
        assert!(SteeringPipeline::new(centered_detector(), config).is_err());
    }

    #[test]
    fn test_with_truth_records() {
        let mut pipeline = SteeringPipeline::with_default_config(centered_detector());
        let mut evaluator = SteeringEvaluator::default();
        pipeline
            .compute_steering_with_truth(&[], 600, 480, false, 0.05, &mut evaluator)
            .unwrap();
        assert_eq!(evaluator.recorded(), 1);
        assert_eq!(evaluator.accuracy_percent(), Some(100.0));
    }
}
