//! Primary marker selection and the fallback policy for missing classes.
//!
//! Every frame yields a definite position for both classes. The rules are
//! checked in a fixed order:
//!
//! 1. The class was observed this frame: use its primary.
//! 2. Only the other class was observed: mirror it outward by the track width.
//! 3. Neither was observed but a last-known position exists: hold it, and
//!    mirror the class that has never been seen from it.
//! 4. Nothing has ever been seen: place both symmetrically about the image
//!    center at a fixed row.

use tracing::debug;

use crate::tracker::marker::MarkerClass;
use crate::tracker::point::{FrameSize, Point};
use crate::tracker::state::LastKnown;

/// Nearest-to-vehicle centroid per class for the current frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Primaries {
    pub left: Option<Point>,
    pub right: Option<Point>,
}

impl Primaries {
    /// Pick the centroid with the largest `y` for each class. Ties keep the
    /// first centroid in input order.
    pub fn select(left: &[Point], right: &[Point]) -> Self {
        Self {
            left: nearest(left),
            right: nearest(right),
        }
    }

    pub fn get(&self, class: MarkerClass) -> Option<Point> {
        match class {
            MarkerClass::Left => self.left,
            MarkerClass::Right => self.right,
        }
    }

    /// Overwrite the last-known position of every class observed this frame.
    pub fn commit(&self, last_known: &mut LastKnown) {
        for class in MarkerClass::ALL {
            if let Some(point) = self.get(class) {
                last_known.set(class, point);
            }
        }
    }

    /// Horizontal separation when both classes were observed.
    pub fn width(&self) -> Option<f32> {
        match (self.left, self.right) {
            (Some(left), Some(right)) => Some((right.x - left.x).abs()),
            _ => None,
        }
    }
}

fn nearest(points: &[Point]) -> Option<Point> {
    let mut best: Option<Point> = None;
    for &p in points {
        match best {
            Some(b) if p.y <= b.y => {}
            _ => best = Some(p),
        }
    }
    best
}

/// Which markers are available this frame, from the fallback's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameVisibility {
    /// Both classes observed
    BothPresent,
    /// Only the left class observed
    LeftOnly,
    /// Only the right class observed
    RightOnly,
    /// Neither observed, at least one last-known position exists
    NeitherKnown,
    /// Neither observed and neither ever seen
    NeitherUnknown,
}

impl FrameVisibility {
    pub fn classify(primaries: &Primaries, last_known: &LastKnown) -> Self {
        match (primaries.left, primaries.right) {
            (Some(_), Some(_)) => FrameVisibility::BothPresent,
            (Some(_), None) => FrameVisibility::LeftOnly,
            (None, Some(_)) => FrameVisibility::RightOnly,
            (None, None) => {
                let known = MarkerClass::ALL
                    .iter()
                    .any(|&class| last_known.get(class).is_some());
                if known {
                    FrameVisibility::NeitherKnown
                } else {
                    FrameVisibility::NeitherUnknown
                }
            }
        }
    }
}

/// Rule that produced a resolved position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Observed this frame
    Observed,
    /// Synthesized from the opposite class and the track width
    MirroredFromOther,
    /// Held from the last observation
    LastKnown,
    /// Default position before anything was seen
    Baseline,
}

impl Resolution {
    pub fn as_str(&self) -> &'static str {
        match self {
            Resolution::Observed => "observed",
            Resolution::MirroredFromOther => "mirrored",
            Resolution::LastKnown => "last_known",
            Resolution::Baseline => "baseline",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedMarker {
    pub position: Point,
    pub resolution: Resolution,
}

impl ResolvedMarker {
    fn new(position: Point, resolution: Resolution) -> Self {
        Self {
            position,
            resolution,
        }
    }
}

/// Definite positions for both classes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedPair {
    pub left: ResolvedMarker,
    pub right: ResolvedMarker,
    pub visibility: FrameVisibility,
}

impl ResolvedPair {
    pub fn get(&self, class: MarkerClass) -> &ResolvedMarker {
        match class {
            MarkerClass::Left => &self.left,
            MarkerClass::Right => &self.right,
        }
    }
}

/// Place `class` outward of `anchor` by `width`, on the same row.
fn mirror(class: MarkerClass, anchor: Point, width: f32) -> Point {
    Point::new(anchor.x + class.outward_sign() * width, anchor.y)
}

/// Resolve a position for both classes.
///
/// `track_width` is the current width estimate (already defaulted when no
/// history exists) and `baseline_y` the row used before anything was seen.
pub fn resolve(
    primaries: &Primaries,
    last_known: &LastKnown,
    track_width: f32,
    frame: FrameSize,
    baseline_y: f32,
) -> ResolvedPair {
    let visibility = FrameVisibility::classify(primaries, last_known);

    let (left, right) = match (primaries.left, primaries.right) {
        (Some(l), Some(r)) => (
            ResolvedMarker::new(l, Resolution::Observed),
            ResolvedMarker::new(r, Resolution::Observed),
        ),
        (Some(l), None) => anchored(MarkerClass::Left, l, Resolution::Observed, track_width),
        (None, Some(r)) => anchored(MarkerClass::Right, r, Resolution::Observed, track_width),
        (None, None) => match (
            last_known.get(MarkerClass::Left),
            last_known.get(MarkerClass::Right),
        ) {
            (Some(l), Some(r)) => (
                ResolvedMarker::new(l, Resolution::LastKnown),
                ResolvedMarker::new(r, Resolution::LastKnown),
            ),
            (Some(l), None) => anchored(MarkerClass::Left, l, Resolution::LastKnown, track_width),
            (None, Some(r)) => anchored(MarkerClass::Right, r, Resolution::LastKnown, track_width),
            (None, None) => baseline(track_width, frame, baseline_y),
        },
    };

    debug!(
        ?visibility,
        left = left.resolution.as_str(),
        right = right.resolution.as_str(),
        "resolved marker positions"
    );

    ResolvedPair {
        left,
        right,
        visibility,
    }
}

/// Keep `anchor` for `anchor_class` and mirror the opposite class from it.
/// Returns `(left, right)`.
fn anchored(
    anchor_class: MarkerClass,
    anchor: Point,
    resolution: Resolution,
    track_width: f32,
) -> (ResolvedMarker, ResolvedMarker) {
    let kept = ResolvedMarker::new(anchor, resolution);
    let mirrored = ResolvedMarker::new(
        mirror(anchor_class.other(), anchor, track_width),
        Resolution::MirroredFromOther,
    );
    match anchor_class {
        MarkerClass::Left => (kept, mirrored),
        MarkerClass::Right => (mirrored, kept),
    }
}

fn baseline(
    track_width: f32,
    frame: FrameSize,
    baseline_y: f32,
) -> (ResolvedMarker, ResolvedMarker) {
    let center = Point::new(frame.center_x(), baseline_y);
    let half = track_width / 2.0;
    (
        ResolvedMarker::new(mirror(MarkerClass::Left, center, half), Resolution::Baseline),
        ResolvedMarker::new(mirror(MarkerClass::Right, center, half), Resolution::Baseline),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: FrameSize = FrameSize {
        width: 600,
        height: 480,
    };

    fn primaries(left: Option<(f32, f32)>, right: Option<(f32, f32)>) -> Primaries {
        Primaries {
            left: left.map(|(x, y)| Point::new(x, y)),
            right: right.map(|(x, y)| Point::new(x, y)),
        }
    }

    #[test]
    fn test_select_nearest() {
        let left = [Point::new(10.0, 100.0), Point::new(20.0, 300.0), Point::new(30.0, 200.0)];
        let p = Primaries::select(&left, &[]);
        assert_eq!(p.left, Some(Point::new(20.0, 300.0)));
        assert_eq!(p.right, None);
    }

    #[test]
    fn test_select_tie_keeps_first() {
        let right = [Point::new(400.0, 300.0), Point::new(450.0, 300.0)];
        let p = Primaries::select(&[], &right);
        assert_eq!(p.right, Some(Point::new(400.0, 300.0)));
    }

    #[test]
    fn test_commit_only_observed() {
        let mut last_known = LastKnown::default();
        last_known.set(MarkerClass::Right, Point::new(1.0, 1.0));
        primaries(Some((100.0, 400.0)), None).commit(&mut last_known);
        assert_eq!(last_known.get(MarkerClass::Left), Some(Point::new(100.0, 400.0)));
        assert_eq!(last_known.get(MarkerClass::Right), Some(Point::new(1.0, 1.0)));
    }

    #[test]
    fn test_both_present() {
        let p = primaries(Some((100.0, 400.0)), Some((500.0, 400.0)));
        let r = resolve(&p, &LastKnown::default(), 350.0, FRAME, 360.0);
        assert_eq!(r.visibility, FrameVisibility::BothPresent);
        assert_eq!(r.left.position, Point::new(100.0, 400.0));
        assert_eq!(r.right.position, Point::new(500.0, 400.0));
        assert_eq!(r.left.resolution, Resolution::Observed);
    }

    #[test]
    fn test_left_missing_mirrors_right() {
        let p = primaries(None, Some((500.0, 400.0)));
        let r = resolve(&p, &LastKnown::default(), 350.0, FRAME, 360.0);
        assert_eq!(r.visibility, FrameVisibility::RightOnly);
        assert_eq!(r.left.position, Point::new(150.0, 400.0));
        assert_eq!(r.left.resolution, Resolution::MirroredFromOther);
    }

    #[test]
    fn test_right_missing_ignores_last_known() {
        let mut last_known = LastKnown::default();
        last_known.set(MarkerClass::Right, Point::new(580.0, 300.0));
        let p = primaries(Some((100.0, 400.0)), None);
        let r = resolve(&p, &last_known, 300.0, FRAME, 360.0);
        assert_eq!(r.visibility, FrameVisibility::LeftOnly);
        assert_eq!(r.right.position, Point::new(400.0, 400.0));
    }

    #[test]
    fn test_neither_with_one_known() {
        let mut last_known = LastKnown::default();
        last_known.set(MarkerClass::Right, Point::new(500.0, 380.0));
        let r = resolve(&Primaries::default(), &last_known, 350.0, FRAME, 360.0);
        assert_eq!(r.visibility, FrameVisibility::NeitherKnown);
        assert_eq!(r.right.resolution, Resolution::LastKnown);
        assert_eq!(r.right.position, Point::new(500.0, 380.0));
        assert_eq!(r.left.position, Point::new(150.0, 380.0));
        assert_eq!(r.left.resolution, Resolution::MirroredFromOther);
    }

    #[test]
    fn test_neither_with_both_known_holds_both() {
        let mut last_known = LastKnown::default();
        last_known.set(MarkerClass::Left, Point::new(90.0, 410.0));
        last_known.set(MarkerClass::Right, Point::new(510.0, 390.0));
        let r = resolve(&Primaries::default(), &last_known, 350.0, FRAME, 360.0);
        assert_eq!(r.left.position, Point::new(90.0, 410.0));
        assert_eq!(r.right.position, Point::new(510.0, 390.0));
        assert_eq!(r.left.resolution, Resolution::LastKnown);
        assert_eq!(r.right.resolution, Resolution::LastKnown);
    }

    #[test]
    fn test_neither_unknown_baseline() {
        let r = resolve(&Primaries::default(), &LastKnown::default(), 350.0, FRAME, 360.0);
        assert_eq!(r.visibility, FrameVisibility::NeitherUnknown);
        assert_eq!(r.left.position, Point::new(125.0, 360.0));
        assert_eq!(r.right.position, Point::new(475.0, 360.0));
        assert_eq!(r.left.resolution, Resolution::Baseline);
    }

    #[test]
    fn test_width() {
        assert_eq!(primaries(Some((500.0, 0.0)), Some((100.0, 0.0))).width(), Some(400.0));
        assert_eq!(primaries(None, Some((100.0, 0.0))).width(), None);
    }
}
