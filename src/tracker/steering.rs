//! Steering value from a centerline target.

use crate::tracker::point::{FrameSize, Point};

/// Converts a target point into a smoothed, signed steering value.
///
/// Positive values steer left: the target lies left of the image center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SteeringCalculator {
    pub base_scale: f32,
    pub previous_weight: f32,
    pub raw_weight: f32,
}

impl SteeringCalculator {
    pub fn new(base_scale: f32, previous_weight: f32, raw_weight: f32) -> Self {
        Self {
            base_scale,
            previous_weight,
            raw_weight,
        }
    }

    /// Scale factor that grows as the target moves away from the vehicle.
    #[inline]
    pub fn scale(&self, target_y: f32, frame: FrameSize) -> f32 {
        let h = frame.height_f32();
        if h <= 0.0 {
            return self.base_scale;
        }
        self.base_scale * (1.0 + (h - target_y) / h)
    }

    /// Unsmoothed steering for `target`.
    pub fn raw(&self, target: &Point, frame: FrameSize) -> f32 {
        (frame.center_x() - target.x) * self.scale(target.y, frame)
    }

    /// First-order exponential smoothing against the previous output.
    #[inline]
    pub fn smooth(&self, previous: f32, raw: f32) -> f32 {
        self.previous_weight * previous + self.raw_weight * raw
    }
}
