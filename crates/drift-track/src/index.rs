//! R-tree index over a track's waypoints.
//!
//! Nearest-waypoint lookup uses planar Euclidean distance on the raw
//! `(lat, lon)` pair as a 2-D key.  At the few-hundred-km scale of a track
//! the planar metric and the geodesic one agree on which waypoint is
//! closest, so no projection is applied before indexing.

use rstar::{AABB, PointDistance, RTree, RTreeObject};

use drift_core::{GeoPoint, WaypointId};

use crate::error::{TrackError, TrackResult};
use crate::segment::Segment;

// ── R-tree waypoint entry ─────────────────────────────────────────────────────

/// Entry stored in the R-tree: a 2-D `[lat, lon]` point with the waypoint's
/// position in the track order.
#[derive(Clone, Debug)]
struct WaypointEntry {
    point: [f64; 2], // [lat, lon]
    id: WaypointId,
}

impl RTreeObject for WaypointEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for WaypointEntry {
    /// Squared Euclidean distance in lat/lon space.
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dlat = self.point[0] - point[0];
        let dlon = self.point[1] - point[1];
        dlat * dlat + dlon * dlon
    }
}

// ── WaypointIndex ─────────────────────────────────────────────────────────────

/// Spatial index over an ordered waypoint sequence, with the optional
/// polyline segments joining consecutive waypoints.
///
/// Built once, never mutated; all queries take `&self`.
#[derive(Debug)]
pub struct WaypointIndex {
    rtree: RTree<WaypointEntry>,
    segments: Vec<Segment>,
    len: usize,
}

impl WaypointIndex {
    /// Index `points` in order.  When `generate_segments` is set, also
    /// build the N−1 segments between consecutive waypoints (none for a
    /// single-waypoint track).
    ///
    /// Rejects an empty sequence (nearest-neighbor queries would be
    /// undefined) and any waypoint with a non-finite coordinate (an R-tree
    /// keyed on NaN cannot answer queries).
    pub fn build(points: &[GeoPoint], generate_segments: bool) -> TrackResult<Self> {
        if points.is_empty() {
            return Err(TrackError::EmptyWaypoints);
        }
        if let Some(index) = points.iter().position(|p| !p.is_finite()) {
            return Err(TrackError::NonFiniteWaypoint { index });
        }

        let entries: Vec<WaypointEntry> = points
            .iter()
            .enumerate()
            .map(|(i, p)| WaypointEntry {
                point: [p.lat, p.lon],
                id: WaypointId(i as u32),
            })
            .collect();

        let segments = if generate_segments {
            points
                .windows(2)
                .map(|pair| Segment::from_endpoints(pair[0], pair[1]))
                .collect()
        } else {
            Vec::new()
        };

        Ok(Self {
            rtree: RTree::bulk_load(entries),
            segments,
            len: points.len(),
        })
    }

    /// Number of indexed waypoints (≥ 1).
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Nearest waypoint to `(lat, lon)` by planar Euclidean distance.
    ///
    /// Deterministic for identical inputs; ties resolve by the R-tree's
    /// traversal order.  `None` is impossible for a built index (the
    /// constructor rejects empty sequences) but is surfaced rather than
    /// unwrapped.
    pub fn nearest(&self, lat: f64, lon: f64) -> Option<WaypointId> {
        self.rtree.nearest_neighbor(&[lat, lon]).map(|e| e.id)
    }

    /// The polyline segments, in track order.  Empty when segment
    /// generation was disabled or the track has a single waypoint.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Segment arriving at `id` from its predecessor, if any.
    pub fn segment_ending_at(&self, id: WaypointId) -> Option<&Segment> {
        match id.index() {
            0 => None,
            i => self.segments.get(i - 1),
        }
    }

    /// Segment leaving `id` toward its successor, if any.
    pub fn segment_starting_at(&self, id: WaypointId) -> Option<&Segment> {
        self.segments.get(id.index())
    }
}
