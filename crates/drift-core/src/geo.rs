//! Geographic coordinate type and spatial utilities.
//!
//! `GeoPoint` uses `f64` (double-precision) latitude/longitude.  The
//! perpendicular-projection algebra in `drift-track` divides slope
//! differences that approach zero for near-vertical and near-horizontal
//! segments; single precision visibly perturbs those intersection solves,
//! so everything downstream stays in `f64`.

/// A WGS-84 geographic coordinate in decimal degrees.
///
/// `NaN` components are legal and mean "no recorded position": every
/// distance computed from such a point is `NaN` rather than an error, so
/// batch queries over partially invalid data run to completion.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    #[inline]
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// `true` iff both coordinates are finite (not NaN, not infinite).
    #[inline]
    pub fn is_finite(self) -> bool {
        self.lat.is_finite() && self.lon.is_finite()
    }

    /// Haversine great-circle distance in metres.
    ///
    /// Spherical approximation (mean Earth radius); accurate to ~0.5 % of
    /// the true ellipsoidal distance, which is ample at the few-hundred-km
    /// scale of a coastal track.  Non-finite inputs propagate through the
    /// trig chain and yield `NaN` — this never panics.
    pub fn distance_m(self, other: GeoPoint) -> f64 {
        const R: f64 = 6_371_000.0; // mean Earth radius, metres

        let d_lat = (other.lat - self.lat).to_radians();
        let d_lon = (other.lon - self.lon).to_radians();

        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();

        let a = (d_lat * 0.5).sin().powi(2)
            + lat1.cos() * lat2.cos() * (d_lon * 0.5).sin().powi(2);

        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        R * c
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lon)
    }
}

// ── GeoRect ───────────────────────────────────────────────────────────────────

/// An axis-aligned latitude/longitude rectangle.
///
/// Used as the spatial domain of a particle set: derived from observed
/// positions, padded for display margins, or supplied by the caller as the
/// valid region a dataset must stay inside.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoRect {
    pub south: f64,
    pub north: f64,
    pub west: f64,
    pub east: f64,
}

impl GeoRect {
    pub fn new(south: f64, north: f64, west: f64, east: f64) -> Self {
        Self { south, north, west, east }
    }

    /// Smallest rectangle covering every finite point in `points`.
    ///
    /// Points with a non-finite coordinate are skipped.  Returns `None`
    /// when no finite point exists.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = GeoPoint>,
    {
        let mut rect: Option<GeoRect> = None;
        for p in points {
            if !p.is_finite() {
                continue;
            }
            rect = Some(match rect {
                None => GeoRect::new(p.lat, p.lat, p.lon, p.lon),
                Some(r) => GeoRect::new(
                    r.south.min(p.lat),
                    r.north.max(p.lat),
                    r.west.min(p.lon),
                    r.east.max(p.lon),
                ),
            });
        }
        rect
    }

    /// Expand every side outward by `degrees`.
    pub fn pad(self, degrees: f64) -> Self {
        Self {
            south: self.south - degrees,
            north: self.north + degrees,
            west: self.west - degrees,
            east: self.east + degrees,
        }
    }

    /// Inclusive containment.  A point with a NaN coordinate is never
    /// contained.
    #[inline]
    pub fn contains(&self, p: GeoPoint) -> bool {
        p.lat >= self.south && p.lat <= self.north && p.lon >= self.west && p.lon <= self.east
    }
}

impl std::fmt::Display for GeoRect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{:.4}..{:.4}]x[{:.4}..{:.4}]",
            self.south, self.north, self.west, self.east
        )
    }
}
