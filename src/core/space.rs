use crate::core::particle::Particle;
use crate::error::{Error, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// Square periodic (toroidal) domain `[0, limit) x [0, limit)`.
///
/// A particle leaving one edge re-enters from the opposite edge. The side
/// length is validated once at construction so that every later modulo
/// operation works on a finite, strictly positive divisor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Space {
    limit: f64,
}

impl Space {
    /// Create a domain with side length `limit`.
    ///
    /// Errors:
    /// - `Error::InvalidDomain` if `limit` is NaN, infinite, zero or negative.
    pub fn new(limit: f64) -> Result<Self> {
        if !limit.is_finite() || limit <= 0.0 {
            log::debug!("rejecting periodic domain with limit {limit}");
            return Err(Error::InvalidDomain(format!(
                "limit must be finite and > 0, got {limit}"
            )));
        }
        Ok(Self { limit })
    }

    /// Side length of the domain.
    #[inline]
    pub fn limit(&self) -> f64 {
        self.limit
    }

    /// Reduce a coordinate into `[0, limit)`.
    ///
    /// `rem_euclid` can round a tiny negative input up to exactly `limit`;
    /// that value is the same point as `0` on the torus.
    #[inline]
    pub fn wrap(&self, coord: f64) -> f64 {
        let r = coord.rem_euclid(self.limit);
        if r >= self.limit {
            0.0
        } else {
            r
        }
    }

    /// Whether `(x, y)` lies inside `[0, limit) x [0, limit)`.
    #[inline]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        (0.0..self.limit).contains(&x) && (0.0..self.limit).contains(&y)
    }

    /// Shortest signed separation equivalent to `delta` under periodic wrap,
    /// in `[-limit/2, limit/2]`.
    #[inline]
    pub fn minimum_image(&self, delta: f64) -> f64 {
        let d = delta.rem_euclid(self.limit);
        if d > 0.5 * self.limit {
            d - self.limit
        } else {
            d
        }
    }

    /// Draw a particle with a uniform position over the domain, a uniform
    /// heading in `[0, 2π)` and the given speed magnitude.
    pub fn random_particle<R: Rng + ?Sized>(&self, rng: &mut R, speed: f64) -> Particle {
        let x = self.wrap(rng.random_range(0.0..self.limit));
        let y = self.wrap(rng.random_range(0.0..self.limit));
        let angle = rng.random_range(0.0..TAU);
        Particle::new(x, y, speed, angle)
    }
}

impl TryFrom<f64> for Space {
    type Error = Error;

    fn try_from(limit: f64) -> Result<Self> {
        Self::new(limit)
    }
}

impl From<Space> for f64 {
    fn from(space: Space) -> f64 {
        space.limit
    }
}
