//! Per-frame cone tracking and steering estimation.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::ConfigError;
use crate::tracker::centroid::filter_centroids;
use crate::tracker::fallback::{self, FrameVisibility, Primaries, ResolvedMarker};
use crate::tracker::marker::{MarkerClass, MarkerDetections};
use crate::tracker::path::PathEstimate;
use crate::tracker::point::{FrameSize, Point};
use crate::tracker::state::TrackerState;
use crate::tracker::steering::SteeringCalculator;

/// Configuration for the [`ConeTracker`].
///
/// Pixel magnitudes are tuned for a 640x480 camera and should be rescaled
/// for other resolutions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Blobs with a smaller area are treated as noise
    pub min_blob_area: f32,
    /// Number of track widths kept for the rolling estimate
    pub track_width_capacity: usize,
    /// Track width assumed before both boundaries were seen together
    pub default_track_width: f32,
    /// Maximum vertical distance for pairing a left and a right marker (exclusive)
    pub pairing_threshold: f32,
    /// Weight of the nearest centerline point in the steering target
    pub nearest_weight: f32,
    /// Weight of the lookahead point in the steering target
    pub lookahead_weight: f32,
    /// Index of the lookahead point among centerline points, nearest first
    pub lookahead_index: usize,
    /// Steering per pixel of lateral error for a target at the bottom row
    pub base_scale: f32,
    /// Weight of the previous output in the smoothing filter
    pub smoothing_previous_weight: f32,
    /// Weight of the new raw value in the smoothing filter
    pub smoothing_raw_weight: f32,
    /// Row of the default marker positions, as a fraction of image height
    pub baseline_row_fraction: f32,
    /// Consecutive missing frames after which a class is reported as lost
    pub missing_warn_frames: u32,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            min_blob_area: 50.0,
            track_width_capacity: 10,
            default_track_width: 350.0,
            pairing_threshold: 100.0,
            nearest_weight: 0.7,
            lookahead_weight: 0.3,
            lookahead_index: 2,
            base_scale: 0.001,
            smoothing_previous_weight: 0.3,
            smoothing_raw_weight: 0.7,
            baseline_row_fraction: 0.75,
            missing_warn_frames: 30,
        }
    }
}

impl TrackerConfig {
    /// Load a YAML config file. Missing fields take their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&contents)
    }

    pub fn from_yaml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: TrackerConfig = serde_yaml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        non_negative("min_blob_area", self.min_blob_area)?;
        positive("default_track_width", self.default_track_width)?;
        positive("pairing_threshold", self.pairing_threshold)?;
        if self.track_width_capacity == 0 {
            return Err(ConfigError::invalid("track_width_capacity", "must be at least 1"));
        }
        if !self.base_scale.is_finite() {
            return Err(ConfigError::invalid("base_scale", "must be finite"));
        }
        unit("nearest_weight", self.nearest_weight)?;
        unit("lookahead_weight", self.lookahead_weight)?;
        sums_to_one("lookahead_weight", self.nearest_weight, self.lookahead_weight)?;
        unit("smoothing_previous_weight", self.smoothing_previous_weight)?;
        unit("smoothing_raw_weight", self.smoothing_raw_weight)?;
        sums_to_one(
            "smoothing_raw_weight",
            self.smoothing_previous_weight,
            self.smoothing_raw_weight,
        )?;
        unit("baseline_row_fraction", self.baseline_row_fraction)?;
        Ok(())
    }

    fn steering(&self) -> SteeringCalculator {
        SteeringCalculator::new(
            self.base_scale,
            self.smoothing_previous_weight,
            self.smoothing_raw_weight,
        )
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ConfigError::invalid(
            field,
            format!("{value} is not a finite non-negative number"),
        ));
    }
    Ok(())
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ConfigError::invalid(
            field,
            format!("{value} is not a finite positive number"),
        ));
    }
    Ok(())
}

fn unit(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(ConfigError::invalid(field, format!("{value} is outside [0, 1]")));
    }
    Ok(())
}

fn sums_to_one(field: &'static str, a: f32, b: f32) -> Result<(), ConfigError> {
    if (a + b - 1.0).abs() > 1e-4 {
        return Err(ConfigError::invalid(
            field,
            format!("weights {a} and {b} do not sum to 1"),
        ));
    }
    Ok(())
}

/// Turn direction implied by a steering value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SteeringDirection {
    Left,
    Right,
    Straight,
}

impl SteeringDirection {
    pub fn from_value(steering: f32) -> Self {
        if steering > 0.0 {
            SteeringDirection::Left
        } else if steering < 0.0 {
            SteeringDirection::Right
        } else {
            SteeringDirection::Straight
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SteeringDirection::Left => "left",
            SteeringDirection::Right => "right",
            SteeringDirection::Straight => "straight",
        }
    }
}

/// Output of one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct SteeringResult {
    /// Smoothed steering value, positive steers left
    pub steering: f32,
    /// Steering before smoothing
    pub raw: f32,
    /// Centerline point the steering was computed against
    pub target: Point,
    pub left: ResolvedMarker,
    pub right: ResolvedMarker,
    pub visibility: FrameVisibility,
    /// Centerline points, nearest first
    pub path: Vec<Point>,
    pub frame_id: u64,
}

impl SteeringResult {
    pub fn direction(&self) -> SteeringDirection {
        SteeringDirection::from_value(self.steering)
    }
}

/// Tracks both boundary classes across frames and emits one steering value
/// per frame.
///
/// Frames must be fed sequentially; the tracker holds no locks.
#[derive(Debug, Clone)]
pub struct ConeTracker {
    state: TrackerState,
    config: TrackerConfig,
    steering: SteeringCalculator,
}

impl ConeTracker {
    pub fn new(config: TrackerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_valid(config))
    }

    pub fn with_default_config() -> Self {
        Self::from_valid(TrackerConfig::default())
    }

    fn from_valid(config: TrackerConfig) -> Self {
        Self {
            state: TrackerState::new(config.track_width_capacity, config.default_track_width),
            steering: config.steering(),
            config,
        }
    }

    /// Process one frame of detections.
    pub fn update(&mut self, detections: &MarkerDetections, frame: FrameSize) -> SteeringResult {
        self.state.frame_id += 1;

        let left = filter_centroids(MarkerClass::Left, &detections.left, self.config.min_blob_area);
        let right = filter_centroids(
            MarkerClass::Right,
            &detections.right,
            self.config.min_blob_area,
        );

        let primaries = Primaries::select(&left, &right);
        self.update_missing(&primaries);
        primaries.commit(&mut self.state.last_known);
        if let Some(width) = primaries.width() {
            self.state.track_width.push(width);
        }

        let resolved = fallback::resolve(
            &primaries,
            &self.state.last_known,
            self.state.track_width.estimated_width(),
            frame,
            frame.height_f32() * self.config.baseline_row_fraction,
        );

        let path = PathEstimate::synthesize(&left, &right, &resolved, &self.config);

        let raw = self.steering.raw(&path.target, frame);
        let steering = self.steering.smooth(self.state.previous_steering, raw);
        self.state.previous_steering = steering;

        debug!(
            frame_id = self.state.frame_id,
            left_blobs = left.len(),
            right_blobs = right.len(),
            paired = path.paired,
            target_x = path.target.x,
            target_y = path.target.y,
            raw,
            steering,
            "frame processed"
        );

        SteeringResult {
            steering,
            raw,
            target: path.target,
            left: resolved.left,
            right: resolved.right,
            visibility: resolved.visibility,
            path: path.points,
            frame_id: self.state.frame_id,
        }
    }

    fn update_missing(&mut self, primaries: &Primaries) {
        for class in MarkerClass::ALL {
            let missing = &mut self.state.missing_frames[class];
            if primaries.get(class).is_some() {
                *missing = 0;
                continue;
            }
            *missing = missing.saturating_add(1);
            if *missing == self.config.missing_warn_frames {
                warn!(
                    class = class.as_str(),
                    frames = *missing,
                    "marker class not observed, steering on fallback positions"
                );
            }
        }
    }

    /// Forget all tracking history.
    pub fn reset(&mut self) {
        self.state.reset();
    }

    pub fn state(&self) -> &TrackerState {
        &self.state
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Current track width estimate.
    pub fn estimated_width(&self) -> f32 {
        self.state.track_width.estimated_width()
    }
}

impl Default for ConeTracker {
    fn default() -> Self {
        Self::with_default_config()
    }
}
