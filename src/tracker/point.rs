/// Pixel-space point. `y` grows downward, toward the vehicle.
pub type Point = nalgebra::Point2<f32>;

/// Midpoint of two points.
#[inline]
pub fn midpoint(a: &Point, b: &Point) -> Point {
    nalgebra::center(a, b)
}

/// Image dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameSize {
    pub width: u32,
    pub height: u32,
}

impl FrameSize {
    #[inline]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Horizontal center of the image.
    #[inline]
    pub fn center_x(&self) -> f32 {
        self.width as f32 / 2.0
    }

    #[inline]
    pub fn height_f32(&self) -> f32 {
        self.height as f32
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}
