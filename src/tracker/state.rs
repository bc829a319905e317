//! Tracking state carried from one frame to the next.

use std::ops::{Index, IndexMut};

use crate::tracker::marker::MarkerClass;
use crate::tracker::point::Point;
use crate::tracker::track_width::TrackWidthEstimator;

/// Last observed primary position per class, `None` before the first sighting.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LastKnown([Option<Point>; 2]);

impl LastKnown {
    pub fn get(&self, class: MarkerClass) -> Option<Point> {
        self.0[class.index()]
    }

    pub fn set(&mut self, class: MarkerClass, point: Point) {
        self.0[class.index()] = Some(point);
    }

    pub fn clear(&mut self) {
        self.0 = [None, None];
    }
}

/// Per-class counter of consecutive frames without an observation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MissingFrames([u32; 2]);

impl Index<MarkerClass> for MissingFrames {
    type Output = u32;

    fn index(&self, class: MarkerClass) -> &u32 {
        &self.0[class.index()]
    }
}

impl IndexMut<MarkerClass> for MissingFrames {
    fn index_mut(&mut self, class: MarkerClass) -> &mut u32 {
        &mut self.0[class.index()]
    }
}

/// State owned by a single [`ConeTracker`](crate::ConeTracker).
#[derive(Debug, Clone, PartialEq)]
pub struct TrackerState {
    /// Last observed primary per class
    pub last_known: LastKnown,
    /// Rolling history of simultaneously visible boundary separations
    pub track_width: TrackWidthEstimator,
    /// Last emitted steering value
    pub previous_steering: f32,
    /// Consecutive frames each class went unobserved
    pub missing_frames: MissingFrames,
    /// Number of frames processed
    pub frame_id: u64,
}

impl TrackerState {
    pub fn new(track_width_capacity: usize, default_track_width: f32) -> Self {
        Self {
            last_known: LastKnown::default(),
            track_width: TrackWidthEstimator::new(track_width_capacity, default_track_width),
            previous_steering: 0.0,
            missing_frames: MissingFrames::default(),
            frame_id: 0,
        }
    }

    pub fn reset(&mut self) {
        self.last_known.clear();
        self.track_width.clear();
        self.previous_steering = 0.0;
        self.missing_frames = MissingFrames::default();
        self.frame_id = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let state = TrackerState::new(10, 350.0);
        assert_eq!(state.last_known.get(MarkerClass::Left), None);
        assert_eq!(state.last_known.get(MarkerClass::Right), None);
        assert_eq!(state.previous_steering, 0.0);
        assert!(state.track_width.is_empty());
    }

    #[test]
    fn test_reset() {
        let mut state = TrackerState::new(10, 350.0);
        state.last_known.set(MarkerClass::Left, Point::new(1.0, 2.0));
        state.track_width.push(300.0);
        state.previous_steering = 0.4;
        state.missing_frames[MarkerClass::Right] = 3;
        state.reset();
        assert_eq!(state, TrackerState::new(10, 350.0));
    }
}
