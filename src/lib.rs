//! Cone tracking and steering estimation.
//!
//! Two colored marker classes bound the drivable corridor. Each frame the
//! detector hands over blobs for both classes, and [`ConeTracker`] turns them
//! into a smoothed steering value while keeping last-known positions and a
//! rolling track-width estimate across frames.

pub mod error;
pub mod integration;
pub mod tracker;

pub use error::{ConfigError, FrameError, PipelineError};
pub use integration::{
    IntoDetections, MarkerSource, ObservationBuilder, SteeringEvaluator, SteeringPipeline,
};
pub use tracker::{
    BlobMoments, ConeTracker, FrameSize, FrameVisibility, MarkerClass, MarkerDetections,
    MarkerObservation, Point, Resolution, SteeringDirection, SteeringResult, TrackerConfig,
    TrackerState,
};
