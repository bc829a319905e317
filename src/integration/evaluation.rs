//! Scoring computed steering against recorded ground truth.

/// Maximum absolute error for a frame to count as within range.
pub const DEFAULT_TOLERANCE: f32 = 0.09;

/// Accumulates computed/ground-truth steering pairs.
///
/// Frames whose ground truth is exactly zero are recorded for the RMSE but
/// not scored for accuracy, since the recordings use zero for "no request".
#[derive(Debug, Clone)]
pub struct SteeringEvaluator {
    tolerance: f32,
    recorded: usize,
    scored: usize,
    within_range: usize,
    squared_error_sum: f64,
    max_abs_truth: f32,
}

impl Default for SteeringEvaluator {
    fn default() -> Self {
        Self::new(DEFAULT_TOLERANCE)
    }
}

impl SteeringEvaluator {
    pub fn new(tolerance: f32) -> Self {
        Self {
            tolerance,
            recorded: 0,
            scored: 0,
            within_range: 0,
            squared_error_sum: 0.0,
            max_abs_truth: 0.0,
        }
    }

    /// Record one frame. Returns whether the frame was within tolerance,
    /// or `None` when it was not scored.
    pub fn record(&mut self, computed: f32, ground_truth: f32) -> Option<bool> {
        let error = (computed - ground_truth) as f64;
        self.recorded += 1;
        self.squared_error_sum += error * error;
        self.max_abs_truth = self.max_abs_truth.max(ground_truth.abs());

        if ground_truth == 0.0 {
            return None;
        }
        self.scored += 1;
        let within = (computed - ground_truth).abs() <= self.tolerance;
        if within {
            self.within_range += 1;
        }
        Some(within)
    }

    /// Share of scored frames within tolerance, in percent.
    pub fn accuracy_percent(&self) -> Option<f64> {
        if self.scored == 0 {
            return None;
        }
        Some(self.within_range as f64 / self.scored as f64 * 100.0)
    }

    /// Root mean squared error over all recorded frames.
    pub fn rmse(&self) -> Option<f64> {
        if self.recorded == 0 {
            return None;
        }
        Some((self.squared_error_sum / self.recorded as f64).sqrt())
    }

    /// `100 * (1 - rmse / max|ground truth|)`, clamped to [0, 100].
    pub fn relative_accuracy_percent(&self) -> Option<f64> {
        let rmse = self.rmse()?;
        if self.max_abs_truth == 0.0 {
            return None;
        }
        let pct = 100.0 * (1.0 - rmse / self.max_abs_truth as f64);
        Some(pct.clamp(0.0, 100.0))
    }

    pub fn recorded(&self) -> usize {
        self.recorded
    }

    pub fn scored(&self) -> usize {
        self.scored
    }

    pub fn within_range(&self) -> usize {
        self.within_range
    }

    pub fn tolerance(&self) -> f32 {
        self.tolerance
    }
}
