//! `drift-track` — waypoint track geometry and proximity queries.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                 |
//! |-------------|----------------------------------------------------------|
//! | [`segment`] | `Segment` (lon-lat plane geometry, projection)           |
//! | [`index`]   | `WaypointIndex` (R-tree + polyline segments)             |
//! | [`track`]   | `ProximityTrack`, `TrackBuilder`, `Threshold`, `SegmentSearch` |
//! | [`error`]   | `TrackError`, `TrackResult<T>`                           |
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                    |
//! |------------|-----------------------------------------------------------|
//! | `parallel` | Rayon-parallel batch counting (`par_count_near`).         |
//! | `serde`    | Derives `Serialize`/`Deserialize` on public data types.   |

pub mod error;
pub mod index;
pub mod segment;
pub mod track;

#[cfg(test)]
mod tests;

pub use error::{TrackError, TrackResult};
pub use index::WaypointIndex;
pub use segment::Segment;
pub use track::{ProximityTrack, SegmentSearch, Threshold, TrackBuilder};
