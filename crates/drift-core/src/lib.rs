//! `drift-core` — foundational types for the `rust_drift` proximity toolkit.
//!
//! This crate is a dependency of every other `drift-*` crate.  It
//! intentionally has no `drift-*` dependencies and no required external
//! ones (only optional `serde`).
//!
//! # What lives here
//!
//! | Module   | Contents                                      |
//! |----------|-----------------------------------------------|
//! | [`geo`]  | `GeoPoint`, haversine distance, `GeoRect`     |
//! | [`ids`]  | `WaypointId`, `ParticleId`                    |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                              |
//! |---------|-----------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types. |

pub mod geo;
pub mod ids;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use geo::{GeoPoint, GeoRect};
pub use ids::{ParticleId, WaypointId};
