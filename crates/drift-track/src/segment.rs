//! Line-segment geometry in the (longitude, latitude) plane.
//!
//! A [`Segment`] treats longitude as x and latitude as y and works in plain
//! plane coordinates; callers convert a projected foot back to geodesic
//! distance afterwards.  This small-angle treatment is accurate for the
//! closely spaced waypoints of a coastal track.

use drift_core::GeoPoint;

/// A 2-D line segment between two consecutive track waypoints.
///
/// Derived data (`dom`, `rng`, `slope`) is computed once at construction;
/// segments are read-only afterwards.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Segment {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    /// Longitude interval `(min(x1, x2), max(x1, x2))`.
    pub dom: (f64, f64),
    /// Latitude interval `(min(y1, y2), max(y1, y2))`.
    pub rng: (f64, f64),
    /// Rise over run in the lon-lat plane; `None` marks a vertical segment
    /// (both endpoints share a longitude).
    pub slope: Option<f64>,
}

impl Segment {
    /// Build a segment from plane coordinates, x = longitude, y = latitude.
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        let dom = if x1 <= x2 { (x1, x2) } else { (x2, x1) };
        let rng = if y1 <= y2 { (y1, y2) } else { (y2, y1) };
        let slope = if x1 - x2 != 0.0 {
            Some((y1 - y2) / (x1 - x2))
        } else {
            None
        };
        Self { x1, y1, x2, y2, dom, rng, slope }
    }

    /// Build a segment between two geographic waypoints.
    pub fn from_endpoints(a: GeoPoint, b: GeoPoint) -> Self {
        Self::new(a.lon, a.lat, b.lon, b.lat)
    }

    /// `true` iff `(x, y)` lies inside the segment's bounding box, bounds
    /// inclusive.
    ///
    /// Used to decide whether a perpendicular foot on the infinite line
    /// lands within the finite segment.  Exact for axis-aligned segments;
    /// for steep diagonals the box can admit a foot that is past the
    /// segment along its length.  Known approximation, kept for parity
    /// with the reference behavior.
    #[inline]
    pub fn contains_projection(&self, x: f64, y: f64) -> bool {
        self.dom.0 <= x && x <= self.dom.1 && self.rng.0 <= y && y <= self.rng.1
    }

    /// Perpendicular foot of `(x, y)` on the segment's infinite line,
    /// returned as `(x, y)` plane coordinates.
    ///
    /// Keep the intercept-difference arrangement below as written:
    /// algebraically equivalent rearrangements round differently for
    /// near-vertical and near-horizontal slopes.
    pub fn project(&self, x: f64, y: f64) -> (f64, f64) {
        match self.slope {
            // Vertical: the foot shares the segment's longitude.
            None => (self.x1, y),
            // Horizontal: the foot shares the segment's latitude.
            Some(m) if m == 0.0 => (x, self.y1),
            Some(m) => {
                let norm_slope = -1.0 / m;
                let slope_d = norm_slope - m;
                let int_d = (m * -self.x1 + self.y1) - (norm_slope * -x + y);
                let x_int = int_d / slope_d;
                let y_int = norm_slope * (x_int - x) + y;
                (x_int, y_int)
            }
        }
    }
}
