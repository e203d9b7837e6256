//! CLI configuration from environment.

use std::env;
use std::path::PathBuf;

use flightroute_core::spatial::METERS_PER_NM;
use flightroute_core::RandomRouteConfig;

#[derive(Debug, Clone)]
pub struct Config {
    pub navdata_path: PathBuf,
    /// Fixed seed for `RAND` generation; a fresh seed per run when unset.
    pub rand_seed: Option<u64>,
    pub rand_leg_nm: f64,
    pub rand_lateral: f64,
}

impl Default for Config {
    fn default() -> Self {
        let random = RandomRouteConfig::default();
        Self {
            navdata_path: PathBuf::from("navdata.json"),
            rand_seed: None,
            rand_leg_nm: random.leg_length_m / METERS_PER_NM,
            rand_lateral: random.max_lateral_ratio,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`Config::from_env`] with an arbitrary variable source.
    /// Unparseable values fall back to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            navdata_path: lookup("FLIGHTROUTE_NAVDATA")
                .map(PathBuf::from)
                .unwrap_or(defaults.navdata_path),
            rand_seed: lookup("FLIGHTROUTE_RAND_SEED").and_then(|s| s.parse().ok()),
            rand_leg_nm: lookup("FLIGHTROUTE_RAND_LEG_NM")
                .and_then(|s| s.parse().ok())
                .filter(|nm: &f64| *nm > 0.0)
                .unwrap_or(defaults.rand_leg_nm),
            rand_lateral: lookup("FLIGHTROUTE_RAND_LATERAL")
                .and_then(|s| s.parse().ok())
                .filter(|ratio: &f64| *ratio >= 0.0)
                .unwrap_or(defaults.rand_lateral),
        }
    }

    pub fn random_route_config(&self) -> RandomRouteConfig {
        RandomRouteConfig {
            leg_length_m: self.rand_leg_nm * METERS_PER_NM,
            max_lateral_ratio: self.rand_lateral,
            ..RandomRouteConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let config = config(&[]);
        assert_eq!(config.navdata_path, PathBuf::from("navdata.json"));
        assert_eq!(config.rand_seed, None);
        assert!((config.rand_leg_nm - 120.0).abs() < 1e-9);
        assert!((config.rand_lateral - 0.35).abs() < 1e-9);
    }

    #[test]
    fn variables_override_defaults() {
        let config = config(&[
            ("FLIGHTROUTE_NAVDATA", "/data/nav.json"),
            ("FLIGHTROUTE_RAND_SEED", "42"),
            ("FLIGHTROUTE_RAND_LEG_NM", "60"),
            ("FLIGHTROUTE_RAND_LATERAL", "0.1"),
        ]);
        assert_eq!(config.navdata_path, PathBuf::from("/data/nav.json"));
        assert_eq!(config.rand_seed, Some(42));

        let random = config.random_route_config();
        assert!((random.leg_length_m - 60.0 * METERS_PER_NM).abs() < 1e-6);
        assert!((random.max_lateral_ratio - 0.1).abs() < 1e-9);
        assert_eq!(
            random.max_interior_points,
            RandomRouteConfig::default().max_interior_points
        );
    }

    #[test]
    fn invalid_values_fall_back() {
        let config = config(&[
            ("FLIGHTROUTE_RAND_SEED", "soon"),
            ("FLIGHTROUTE_RAND_LEG_NM", "-5"),
            ("FLIGHTROUTE_RAND_LATERAL", "wide"),
        ]);
        assert_eq!(config.rand_seed, None);
        assert!((config.rand_leg_nm - 120.0).abs() < 1e-9);
        assert!((config.rand_lateral - 0.35).abs() < 1e-9);
    }
}
