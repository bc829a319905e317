mod centroid;
mod cone_tracker;
mod fallback;
mod marker;
mod path;
mod point;
mod state;
mod steering;
mod track_width;

pub use centroid::filter_centroids;
pub use cone_tracker::{ConeTracker, SteeringDirection, SteeringResult, TrackerConfig};
pub use fallback::{FrameVisibility, Primaries, Resolution, ResolvedMarker, ResolvedPair, resolve};
pub use marker::{BlobMoments, MarkerClass, MarkerDetections, MarkerObservation};
pub use path::{PathEstimate, pair_markers, vertical_distance};
pub use point::{FrameSize, Point, midpoint};
pub use state::{LastKnown, MissingFrames, TrackerState};
pub use steering::SteeringCalculator;
pub use track_width::TrackWidthEstimator;
