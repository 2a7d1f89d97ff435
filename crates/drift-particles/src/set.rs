//! Structure-of-Arrays storage for particle trajectories over time.
//!
//! # Data layout
//!
//! All arrays are flat, row-major `[particle][step]`:
//!
//! ```text
//! lat[ particle * steps + step ]
//! ```
//!
//! so one particle's trajectory is a contiguous slice and one time step is
//! a stride-`steps` column.  `NaN` marks "no recorded position/time" at
//! that step (a particle not yet spawned, or already removed); every query
//! skips such cells rather than failing.

use drift_core::{GeoPoint, GeoRect, ParticleId};

use crate::error::{ParticlesError, ParticlesResult};

/// An immutable batch of particle trajectories: `particles` rows of
/// `steps` sampled positions with their observation times in seconds.
///
/// Produced by the external simulation/loading layer; this crate only
/// validates shape and answers read queries.
#[derive(Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParticleSet {
    particles: usize,
    steps: usize,
    lat: Vec<f64>,
    lon: Vec<f64>,
    time_s: Vec<f64>,
}

impl ParticleSet {
    /// Wrap pre-computed flat arrays.
    ///
    /// Every array must hold exactly `particles * steps` values in
    /// row-major `[particle][step]` order.
    pub fn from_arrays(
        particles: usize,
        steps: usize,
        lat: Vec<f64>,
        lon: Vec<f64>,
        time_s: Vec<f64>,
    ) -> ParticlesResult<Self> {
        let expected = particles * steps;
        for (array, actual) in [
            ("lat", lat.len()),
            ("lon", lon.len()),
            ("time_s", time_s.len()),
        ] {
            if actual != expected {
                return Err(ParticlesError::ShapeMismatch {
                    array,
                    particles,
                    steps,
                    expected,
                    actual,
                });
            }
        }
        Ok(Self { particles, steps, lat, lon, time_s })
    }

    pub fn particles(&self) -> usize {
        self.particles
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    #[inline]
    fn idx(&self, particle: usize, step: usize) -> usize {
        particle * self.steps + step
    }

    /// Position of one particle at one step (possibly NaN-valued).
    #[inline]
    pub fn position(&self, particle: ParticleId, step: usize) -> GeoPoint {
        let i = self.idx(particle.index(), step);
        GeoPoint::new(self.lat[i], self.lon[i])
    }

    /// Observation time of one particle at one step, seconds (possibly NaN).
    #[inline]
    pub fn time_s(&self, particle: ParticleId, step: usize) -> f64 {
        self.time_s[self.idx(particle.index(), step)]
    }

    /// One particle's full trajectory in step order.
    pub fn track_of(&self, particle: ParticleId) -> impl Iterator<Item = GeoPoint> + '_ {
        (0..self.steps).map(move |step| self.position(particle, step))
    }

    /// Every particle's position at one step, in particle order.  NaN rows
    /// are included; downstream proximity queries skip them.
    pub fn positions_at(&self, step: usize) -> impl Iterator<Item = GeoPoint> + '_ {
        (0..self.particles).map(move |p| {
            let i = self.idx(p, step);
            GeoPoint::new(self.lat[i], self.lon[i])
        })
    }

    /// All positions across all particles and steps, row-major.
    pub fn all_positions(&self) -> impl Iterator<Item = GeoPoint> + '_ {
        self.lat
            .iter()
            .zip(self.lon.iter())
            .map(|(&lat, &lon)| GeoPoint::new(lat, lon))
    }

    /// The timestamp of one step: the first finite observation time across
    /// particles, or `None` when no particle has a record at that step.
    pub fn time_at(&self, step: usize) -> Option<f64> {
        (0..self.particles)
            .map(|p| self.time_s[self.idx(p, step)])
            .find(|t| t.is_finite())
    }

    /// Smallest rectangle covering every finite recorded position, or
    /// `None` when the set holds no finite position at all.
    pub fn domain(&self) -> Option<GeoRect> {
        GeoRect::from_points(self.all_positions())
    }

    /// Verify that every finite recorded position lies inside `rect`.
    ///
    /// Reports the first escaping particle, matching the policy that shape
    /// and range misuse surfaces before queries run.
    pub fn check_within(&self, rect: &GeoRect) -> ParticlesResult<()> {
        for p in 0..self.particles {
            for step in 0..self.steps {
                let i = self.idx(p, step);
                let position = GeoPoint::new(self.lat[i], self.lon[i]);
                if position.is_finite() && !rect.contains(position) {
                    return Err(ParticlesError::OutOfBounds {
                        particle: ParticleId(p as u32),
                        step,
                        position,
                    });
                }
            }
        }
        Ok(())
    }

    /// Verify that every finite observation time lies in `[min_s, max_s]`.
    pub fn check_time_within(&self, min_s: f64, max_s: f64) -> ParticlesResult<()> {
        let mut earliest = f64::INFINITY;
        let mut latest = f64::NEG_INFINITY;
        for &t in &self.time_s {
            if t.is_finite() {
                earliest = earliest.min(t);
                latest = latest.max(t);
            }
        }
        // No finite observation: nothing to violate.
        if earliest > latest {
            return Ok(());
        }
        if earliest < min_s || latest > max_s {
            return Err(ParticlesError::TimeOutOfBounds { earliest, latest, min_s, max_s });
        }
        Ok(())
    }
}
