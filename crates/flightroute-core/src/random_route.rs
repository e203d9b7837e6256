//! Randomized route generation for `RAND` placeholders.

use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::models::LatLon;
use crate::spatial::{bearing, haversine_distance, offset_by_bearing, METERS_PER_NM};
use crate::traits::RandomRouteGenerator;

/// Shape of generated routes.
#[derive(Debug, Clone)]
pub struct RandomRouteConfig {
    /// Target distance between consecutive points in meters
    pub leg_length_m: f64,
    /// Maximum sideways displacement as a fraction of `leg_length_m`
    pub max_lateral_ratio: f64,
    /// Upper bound on interior points per route
    pub max_interior_points: usize,
}

impl Default for RandomRouteConfig {
    fn default() -> Self {
        Self {
            leg_length_m: 120.0 * METERS_PER_NM,
            max_lateral_ratio: 0.35,
            max_interior_points: 24,
        }
    }
}

/// Random route generator. Each instance owns its RNG, so a seeded
/// instance replays the same routes.
pub struct RandomRoutes {
    config: RandomRouteConfig,
    rng: Mutex<StdRng>,
}

impl RandomRoutes {
    pub fn new(config: RandomRouteConfig) -> Self {
        Self {
            config,
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }

    pub fn with_seed(config: RandomRouteConfig, seed: u64) -> Self {
        Self {
            config,
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl RandomRouteGenerator for RandomRoutes {
    /// Walks the great circle from `from` to `to` in roughly equal legs and
    /// pushes every interior point off the track by a random amount.
    fn sample(&self, from: LatLon, to: LatLon) -> Vec<LatLon> {
        let distance = haversine_distance(from.lat, from.lon, to.lat, to.lon);
        let leg_length = self.config.leg_length_m.max(1.0);
        let legs = ((distance / leg_length).ceil() as usize)
            .clamp(1, self.config.max_interior_points + 1);

        let course = bearing(from.lat, from.lon, to.lat, to.lon);
        let max_offset = leg_length * self.config.max_lateral_ratio.max(0.0);
        let step = distance / legs as f64;

        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let mut points = Vec::with_capacity(legs + 1);
        points.push(from);
        for k in 1..legs {
            let (lat, lon) = offset_by_bearing(from.lat, from.lon, step * k as f64, course);
            let lateral = rng.random_range(-max_offset..=max_offset);
            let (lat, lon) =
                offset_by_bearing(lat, lon, lateral, course + std::f64::consts::FRAC_PI_2);
            points.push(LatLon::new(lat, lon));
        }
        points.push(to);
        points
    }
}
