//! Rolling estimate of the horizontal separation between the two boundaries.

use std::collections::VecDeque;

/// Bounded FIFO of recent track widths.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackWidthEstimator {
    history: VecDeque<f32>,
    capacity: usize,
    default_width: f32,
}

impl TrackWidthEstimator {
    /// Create an estimator keeping at most `capacity` widths.
    pub fn new(capacity: usize, default_width: f32) -> Self {
        Self {
            history: VecDeque::with_capacity(capacity),
            capacity,
            default_width,
        }
    }

    /// Record a width, evicting the oldest entry once at capacity.
    pub fn push(&mut self, width: f32) {
        if self.capacity == 0 {
            return;
        }
        if self.history.len() == self.capacity {
            self.history.pop_front();
        }
        self.history.push_back(width);
    }

    /// Mean of the recorded widths, or the default when nothing was recorded.
    pub fn estimated_width(&self) -> f32 {
        if self.history.is_empty() {
            return self.default_width;
        }
        self.history.iter().sum::<f32>() / self.history.len() as f32
    }

    /// Recorded widths, oldest first.
    pub fn widths(&self) -> impl ExactSizeIterator<Item = f32> + '_ {
        self.history.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.history.clear();
    }
}
