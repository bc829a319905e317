//! Marker classes and per-frame observations.

use std::ops::{Index, IndexMut};

/// Boundary of the drivable corridor a marker belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerClass {
    /// Left boundary of the corridor
    Left,
    /// Right boundary of the corridor
    Right,
}

impl MarkerClass {
    pub const ALL: [MarkerClass; 2] = [MarkerClass::Left, MarkerClass::Right];

    /// The class on the opposite side of the corridor.
    #[inline]
    pub fn other(self) -> Self {
        match self {
            MarkerClass::Left => MarkerClass::Right,
            MarkerClass::Right => MarkerClass::Left,
        }
    }

    /// Horizontal direction pointing away from the other class: -1 for left, +1 for right.
    #[inline]
    pub fn outward_sign(self) -> f32 {
        match self {
            MarkerClass::Left => -1.0,
            MarkerClass::Right => 1.0,
        }
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        match self {
            MarkerClass::Left => 0,
            MarkerClass::Right => 1,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MarkerClass::Left => "left",
            MarkerClass::Right => "right",
        }
    }
}

/// Raw spatial moments of a detected blob.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BlobMoments {
    /// Zeroth moment (area sum)
    pub m00: f64,
    /// First moment along x
    pub m10: f64,
    /// First moment along y
    pub m01: f64,
}

impl BlobMoments {
    #[inline]
    pub fn new(m00: f64, m10: f64, m01: f64) -> Self {
        Self { m00, m10, m01 }
    }

    /// Centroid `(m10 / m00, m01 / m00)`, or `None` for a degenerate blob.
    pub fn centroid(&self) -> Option<(f64, f64)> {
        if self.m00 == 0.0 {
            return None;
        }
        Some((self.m10 / self.m00, self.m01 / self.m00))
    }
}

/// One detected blob for one marker class in the current frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerObservation {
    /// Blob moments used to compute the centroid
    pub moments: BlobMoments,
    /// Blob area as reported by the detector
    pub area: f32,
}

impl MarkerObservation {
    pub fn new(moments: BlobMoments, area: f32) -> Self {
        Self { moments, area }
    }

    /// Observation of a blob with known centroid and area.
    pub fn from_centroid(x: f32, y: f32, area: f32) -> Self {
        let m00 = area as f64;
        Self {
            moments: BlobMoments::new(m00, x as f64 * m00, y as f64 * m00),
            area,
        }
    }
}

/// Detector output for both marker classes in a single frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarkerDetections {
    pub left: Vec<MarkerObservation>,
    pub right: Vec<MarkerObservation>,
}

impl MarkerDetections {
    pub fn new(left: Vec<MarkerObservation>, right: Vec<MarkerObservation>) -> Self {
        Self { left, right }
    }

    pub fn is_empty(&self) -> bool {
        self.left.is_empty() && self.right.is_empty()
    }

    pub fn push(&mut self, class: MarkerClass, observation: MarkerObservation) {
        self[class].push(observation);
    }
}

impl Index<MarkerClass> for MarkerDetections {
    type Output = Vec<MarkerObservation>;

    fn index(&self, class: MarkerClass) -> &Self::Output {
        match class {
            MarkerClass::Left => &self.left,
            MarkerClass::Right => &self.right,
        }
    }
}

impl IndexMut<MarkerClass> for MarkerDetections {
    fn index_mut(&mut self, class: MarkerClass) -> &mut Self::Output {
        match class {
            MarkerClass::Left => &mut self.left,
            MarkerClass::Right => &mut self.right,
        }
    }
}
