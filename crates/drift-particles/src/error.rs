//! Particle-storage error type.

use thiserror::Error;

use drift_core::{GeoPoint, ParticleId};

/// Errors produced by `drift-particles`.
#[derive(Debug, Error)]
pub enum ParticlesError {
    #[error("{array} array has {actual} values, expected {particles} particles x {steps} steps = {expected}")]
    ShapeMismatch {
        array: &'static str,
        particles: usize,
        steps: usize,
        expected: usize,
        actual: usize,
    },

    #[error("{particle} leaves the domain at step {step}: {position}")]
    OutOfBounds {
        particle: ParticleId,
        step: usize,
        position: GeoPoint,
    },

    #[error("observation times [{earliest}, {latest}] exceed the allowed range [{min_s}, {max_s}]")]
    TimeOutOfBounds {
        earliest: f64,
        latest: f64,
        min_s: f64,
        max_s: f64,
    },
}

pub type ParticlesResult<T> = Result<T, ParticlesError>;
