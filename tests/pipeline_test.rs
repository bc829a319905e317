use std::collections::VecDeque;

use conetrack_rs::{
    IntoDetections, MarkerClass, MarkerDetections, MarkerSource, ObservationBuilder,
    PipelineError, SteeringEvaluator, SteeringPipeline, TrackerConfig,
};

/// Replays pre-recorded detections, one per frame.
struct ReplayDetector {
    frames: VecDeque<MarkerDetections>,
}

#[derive(Debug, thiserror::Error)]
#[error("recording exhausted")]
struct Exhausted;

impl MarkerSource for ReplayDetector {
    type Error = Exhausted;

    fn detect(
        &mut self,
        _input: &[u8],
        _width: u32,
        _height: u32,
    ) -> Result<MarkerDetections, Self::Error> {
        self.frames.pop_front().ok_or(Exhausted)
    }
}

fn recording() -> VecDeque<MarkerDetections> {
    let blob = |x: f32, y: f32| ObservationBuilder::new().area(90.0).centroid(x, y).build();
    vec![
        vec![
            (MarkerClass::Left, blob(100.0, 400.0)),
            (MarkerClass::Right, blob(540.0, 400.0)),
        ],
        vec![(MarkerClass::Right, blob(560.0, 410.0))],
        vec![],
        vec![
            (MarkerClass::Left, blob(60.0, 420.0)),
            (MarkerClass::Left, blob(140.0, 320.0)),
            (MarkerClass::Right, blob(500.0, 415.0)),
            (MarkerClass::Right, blob(460.0, 330.0)),
        ],
    ]
    .into_iter()
    .map(IntoDetections::into_detections)
    .collect()
}

#[test]
fn test_replay_until_exhausted() {
    let detector = ReplayDetector {
        frames: recording(),
    };
    let mut pipeline = SteeringPipeline::new(detector, TrackerConfig::default()).unwrap();
    let pixels = vec![0u8; 640 * 480 * 4];

    let mut results = Vec::new();
    loop {
        match pipeline.compute_steering(&pixels, 640, 480, true) {
            Ok(result) => results.push(result),
            Err(PipelineError::Detection(Exhausted)) => break,
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    assert_eq!(results.len(), 4);
    assert_eq!(pipeline.tracker().state().frame_id, 4);
    assert!(results.iter().all(|r| r.steering.is_finite()));
    assert_eq!(pipeline.tracker().state().track_width.len(), 2);
}

#[test]
fn test_evaluate_against_ground_truth() {
    let detector = ReplayDetector {
        frames: recording(),
    };
    let mut pipeline = SteeringPipeline::with_default_config(detector);
    let mut evaluator = SteeringEvaluator::default();

    for truth in [0.0, -0.02, 0.0, 0.01] {
        pipeline
            .compute_steering_with_truth(&[], 640, 480, false, truth, &mut evaluator)
            .unwrap();
    }

    assert_eq!(evaluator.recorded(), 4);
    assert_eq!(evaluator.scored(), 2);
    assert!(evaluator.rmse().unwrap().is_finite());
    assert!(evaluator.accuracy_percent().is_some());
}
