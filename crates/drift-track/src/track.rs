//! The proximity track: waypoints, labels, thresholds, and the two
//! proximity queries.
//!
//! A [`ProximityTrack`] is built once from a finalized waypoint list via
//! [`TrackBuilder`] and is read-only afterwards.  Both queries are pure:
//! they borrow `&self` and allocate only their results, so a track can be
//! shared across threads freely.

use drift_core::{GeoPoint, WaypointId};

use crate::error::{TrackError, TrackResult};
use crate::index::WaypointIndex;
use crate::segment::Segment;

// ── Query configuration ───────────────────────────────────────────────────────

/// Which segments `closest_distance_m` considers as projection candidates.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SegmentSearch {
    /// Only the one or two segments adjacent to the nearest waypoint.
    ///
    /// O(1) per query and correct when waypoints are roughly evenly spaced
    /// and the polyline does not self-intersect; a pathological layout can
    /// make the reported distance too large.
    #[default]
    Adjacent,

    /// Every segment in the track.  O(N) per query; use when the waypoint
    /// layout violates the `Adjacent` assumptions.
    Exhaustive,
}

/// Distance defining "near" for [`ProximityTrack::count_near`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Threshold {
    /// One radius in metres shared by every waypoint.
    Uniform(f64),
    /// An individual radius per waypoint, index-aligned with the waypoint
    /// sequence.  Length is validated at build time.
    PerWaypoint(Vec<f64>),
}

impl Threshold {
    #[inline]
    fn for_waypoint(&self, id: WaypointId) -> f64 {
        match self {
            Threshold::Uniform(m) => *m,
            Threshold::PerWaypoint(v) => v[id.index()],
        }
    }
}

impl Default for Threshold {
    fn default() -> Self {
        Threshold::Uniform(0.0)
    }
}

// ── TrackBuilder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`ProximityTrack`].
///
/// # Example
///
/// ```
/// use drift_core::GeoPoint;
/// use drift_track::TrackBuilder;
///
/// let track = TrackBuilder::new()
///     .waypoint(GeoPoint::new(32.55, -117.13))
///     .waypoint(GeoPoint::new(32.60, -117.10))
///     .generate_segments(true)
///     .threshold_m(500.0)
///     .build()
///     .unwrap();
/// assert_eq!(track.len(), 2);
/// ```
#[derive(Default)]
pub struct TrackBuilder {
    waypoints: Vec<GeoPoint>,
    labels: Option<Vec<String>>,
    threshold: Threshold,
    generate_segments: bool,
    search: SegmentSearch,
}

impl TrackBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one waypoint to the track order.
    pub fn waypoint(mut self, p: GeoPoint) -> Self {
        self.waypoints.push(p);
        self
    }

    /// Append a sequence of waypoints in order.
    pub fn waypoints<I>(mut self, points: I) -> Self
    where
        I: IntoIterator<Item = GeoPoint>,
    {
        self.waypoints.extend(points);
        self
    }

    /// Attach display labels, index-aligned with the waypoints.  The count
    /// must match the waypoint count exactly or `build` fails.
    pub fn labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.labels = Some(labels.into_iter().map(Into::into).collect());
        self
    }

    /// One "near" radius in metres shared by all waypoints.
    pub fn threshold_m(mut self, metres: f64) -> Self {
        self.threshold = Threshold::Uniform(metres);
        self
    }

    /// Individual "near" radii, index-aligned with the waypoints.
    pub fn thresholds_m(mut self, metres: Vec<f64>) -> Self {
        self.threshold = Threshold::PerWaypoint(metres);
        self
    }

    /// Build polyline segments between consecutive waypoints so
    /// `closest_distance_m` can measure against the track line, not just
    /// its vertices.
    pub fn generate_segments(mut self, generate: bool) -> Self {
        self.generate_segments = generate;
        self
    }

    /// Candidate-segment policy for `closest_distance_m`.
    pub fn search(mut self, search: SegmentSearch) -> Self {
        self.search = search;
        self
    }

    /// Validate and build.
    ///
    /// Fails on an empty waypoint list, a non-finite waypoint coordinate,
    /// or label/threshold sequences whose length does not match the
    /// waypoint count.
    pub fn build(self) -> TrackResult<ProximityTrack> {
        if let Some(labels) = &self.labels {
            if labels.len() != self.waypoints.len() {
                return Err(TrackError::LabelCountMismatch {
                    waypoints: self.waypoints.len(),
                    labels: labels.len(),
                });
            }
        }
        if let Threshold::PerWaypoint(v) = &self.threshold {
            if v.len() != self.waypoints.len() {
                return Err(TrackError::ThresholdCountMismatch {
                    waypoints: self.waypoints.len(),
                    thresholds: v.len(),
                });
            }
        }

        let index = WaypointIndex::build(&self.waypoints, self.generate_segments)?;

        Ok(ProximityTrack {
            waypoints: self.waypoints,
            labels: self.labels,
            threshold: self.threshold,
            search: self.search,
            index,
        })
    }
}

// ── ProximityTrack ────────────────────────────────────────────────────────────

/// A fixed reference track of geographic waypoints with proximity queries.
///
/// Owns its waypoint, label, segment, and index data exclusively; callers
/// supply query positions by value and receive freshly computed results.
#[derive(Debug)]
pub struct ProximityTrack {
    waypoints: Vec<GeoPoint>,
    labels: Option<Vec<String>>,
    threshold: Threshold,
    search: SegmentSearch,
    index: WaypointIndex,
}

impl ProximityTrack {
    pub fn builder() -> TrackBuilder {
        TrackBuilder::new()
    }

    /// Number of waypoints (≥ 1).
    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    pub fn waypoints(&self) -> &[GeoPoint] {
        &self.waypoints
    }

    pub fn labels(&self) -> Option<&[String]> {
        self.labels.as_deref()
    }

    /// Label of one waypoint, when labels were supplied.
    pub fn label(&self, id: WaypointId) -> Option<&str> {
        self.labels.as_ref().map(|l| l[id.index()].as_str())
    }

    /// The "near" radius in effect for one waypoint.
    pub fn threshold_m(&self, id: WaypointId) -> f64 {
        self.threshold.for_waypoint(id)
    }

    /// The polyline segments, empty when segment generation was disabled.
    pub fn segments(&self) -> &[Segment] {
        self.index.segments()
    }

    /// Nearest waypoint to `pos` by planar lat/lon distance, or `None` for
    /// a non-finite query position.
    pub fn nearest_waypoint(&self, pos: GeoPoint) -> Option<WaypointId> {
        if !pos.is_finite() {
            return None;
        }
        self.index.nearest(pos.lat, pos.lon)
    }

    /// Shortest geodesic distance in metres from `pos` to the track.
    ///
    /// Finds the nearest waypoint, projects `pos` onto the candidate
    /// segments around it (per [`SegmentSearch`]), and returns the minimum
    /// over the valid segment feet and the nearest waypoint itself.  The
    /// result is therefore never larger than the nearest-waypoint distance,
    /// and equals it exactly when segments are disabled or no projection
    /// lands on its segment.
    ///
    /// A non-finite query coordinate yields `NaN`, never a panic: batch
    /// callers filter afterwards.
    pub fn closest_distance_m(&self, pos: GeoPoint) -> f64 {
        if !pos.is_finite() {
            return f64::NAN;
        }
        let Some(idx) = self.index.nearest(pos.lat, pos.lon) else {
            return f64::NAN;
        };

        let mut least = f64::INFINITY;
        match self.search {
            SegmentSearch::Adjacent => {
                let candidates = [
                    self.index.segment_ending_at(idx),
                    self.index.segment_starting_at(idx),
                ];
                for seg in candidates.into_iter().flatten() {
                    self.consider_segment(pos, seg, &mut least);
                }
            }
            SegmentSearch::Exhaustive => {
                for seg in self.index.segments() {
                    self.consider_segment(pos, seg, &mut least);
                }
            }
        }

        let to_waypoint = pos.distance_m(self.waypoints[idx.index()]);
        if to_waypoint < least {
            least = to_waypoint;
        }
        least
    }

    /// Count, per waypoint, how many of `positions` fall within that
    /// waypoint's threshold radius.
    ///
    /// All-pairs O(M·N); counts are index-aligned with the waypoint
    /// sequence.  Positions with non-finite coordinates produce NaN
    /// distances, compare false against every threshold, and so are
    /// skipped without aborting the batch.
    pub fn count_near<I>(&self, positions: I) -> Vec<u64>
    where
        I: IntoIterator<Item = GeoPoint>,
    {
        let mut counts = vec![0u64; self.waypoints.len()];
        for pos in positions {
            self.accumulate_near(pos, &mut counts);
        }
        counts
    }

    /// Rayon-parallel [`count_near`](Self::count_near) over a position
    /// slice.  Identical results to the serial version.
    #[cfg(feature = "parallel")]
    pub fn par_count_near(&self, positions: &[GeoPoint]) -> Vec<u64> {
        use rayon::prelude::*;

        positions
            .par_iter()
            .fold(
                || vec![0u64; self.waypoints.len()],
                |mut counts, pos| {
                    self.accumulate_near(*pos, &mut counts);
                    counts
                },
            )
            .reduce(
                || vec![0u64; self.waypoints.len()],
                |mut a, b| {
                    for (x, y) in a.iter_mut().zip(b) {
                        *x += y;
                    }
                    a
                },
            )
    }

    fn accumulate_near(&self, pos: GeoPoint, counts: &mut [u64]) {
        for (i, waypoint) in self.waypoints.iter().enumerate() {
            let id = WaypointId(i as u32);
            if pos.distance_m(*waypoint) <= self.threshold.for_waypoint(id) {
                counts[i] += 1;
            }
        }
    }

    fn consider_segment(&self, pos: GeoPoint, seg: &Segment, least: &mut f64) {
        let (lon_int, lat_int) = seg.project(pos.lon, pos.lat);
        if seg.contains_projection(lon_int, lat_int) {
            let d = pos.distance_m(GeoPoint::new(lat_int, lon_int));
            if d < *least {
                *least = d;
            }
        }
    }
}
