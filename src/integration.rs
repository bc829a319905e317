//! Integration module for connecting marker detection backends with the cone tracker.
//!
//! Color segmentation, region-of-interest masking and contour extraction live
//! behind [`MarkerSource`]; this module only consumes their output.

mod builder;
mod detector;
mod evaluation;
mod pipeline;

pub use builder::ObservationBuilder;
pub use detector::{IntoDetections, MarkerSource};
pub use evaluation::{DEFAULT_TOLERANCE, SteeringEvaluator};
pub use pipeline::SteeringPipeline;
