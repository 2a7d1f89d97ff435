//! `drift-particles` — Structure-of-Arrays particle trajectory storage.
//!
//! # Crate layout
//!
//! | Module    | Contents                                  |
//! |-----------|-------------------------------------------|
//! | [`set`]   | `ParticleSet` (SoA positions × steps)     |
//! | [`error`] | `ParticlesError`, `ParticlesResult<T>`    |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                              |
//! |---------|-----------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types. |

pub mod error;
pub mod set;


pub use error::{ParticlesError, ParticlesResult};
pub use set::ParticleSet;
