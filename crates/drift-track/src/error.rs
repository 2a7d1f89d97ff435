//! Track-subsystem error type.
//!
//! Every variant is a construction-time failure: queries against a built
//! track never error, they degrade to `NaN` results or skipped samples.

use thiserror::Error;

/// Errors produced when building a [`ProximityTrack`](crate::ProximityTrack)
/// or [`WaypointIndex`](crate::WaypointIndex).
#[derive(Debug, Error)]
pub enum TrackError {
    #[error("a track requires at least one waypoint")]
    EmptyWaypoints,

    #[error("{labels} labels supplied for {waypoints} waypoints")]
    LabelCountMismatch { waypoints: usize, labels: usize },

    #[error("{thresholds} thresholds supplied for {waypoints} waypoints")]
    ThresholdCountMismatch { waypoints: usize, thresholds: usize },

    #[error("waypoint {index} has a non-finite coordinate")]
    NonFiniteWaypoint { index: usize },
}

pub type TrackResult<T> = Result<T, TrackError>;
