//! Builder for creating MarkerObservation objects from various input formats.

use crate::tracker::{BlobMoments, MarkerObservation};

/// Builder for creating [`MarkerObservation`] objects from various input formats.
#[derive(Debug, Clone, Default)]
pub struct ObservationBuilder {
    moments: BlobMoments,
    area: Option<f32>,
}

impl ObservationBuilder {
    /// Create a new observation builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set raw spatial moments (m00, m10, m01).
    pub fn moments(mut self, m00: f64, m10: f64, m01: f64) -> Self {
        self.moments = BlobMoments::new(m00, m10, m01);
        self
    }

    /// Set the centroid directly. Uses the area set so far as `m00`, so call
    /// [`area`](Self::area) first when both are known.
    pub fn centroid(mut self, x: f32, y: f32) -> Self {
        let m00 = self.area.map_or(1.0, f64::from);
        self.moments = BlobMoments::new(m00, x as f64 * m00, y as f64 * m00);
        self
    }

    /// Set the centroid from a bounding box in TLWH format (left, top, width, height).
    pub fn bbox(self, left: f32, top: f32, width: f32, height: f32) -> Self {
        let with_area = if self.area.is_none() {
            self.area(width * height)
        } else {
            self
        };
        with_area.centroid(left + width / 2.0, top + height / 2.0)
    }

    /// Set the blob area. Defaults to `m00` when not set.
    pub fn area(mut self, area: f32) -> Self {
        self.area = Some(area);
        self
    }

    /// Build the final [`MarkerObservation`].
    pub fn build(self) -> MarkerObservation {
        let area = self.area.unwrap_or(self.moments.m00 as f32);
        MarkerObservation::new(self.moments, area)
    }
}
