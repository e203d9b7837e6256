//! Spatial math for route distances, random leg placement and
//! coordinate-derived waypoint identifiers.

use crate::models::LatLon;

/// Mean Earth radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Meters in one nautical mile.
pub const METERS_PER_NM: f64 = 1_852.0;

/// Calculate the great-circle distance between two points using the Haversine formula.
///
/// # Arguments
/// * `lat1`, `lon1` - First point coordinates in decimal degrees
/// * `lat2`, `lon2` - Second point coordinates in decimal degrees
///
/// # Returns
/// Distance in meters
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let dphi = (lat2 - lat1).to_radians();
    let dlambda = (lon2 - lon1).to_radians();
    let a = (dphi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (dlambda / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_M * a.sqrt().atan2((1.0 - a).sqrt())
}

/// Calculate bearing from point 1 to point 2 in radians.
/// Returns bearing in radians, 0 = north, π/2 = east.
pub fn bearing(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let delta_lambda = (lon2 - lon1).to_radians();

    let x = delta_lambda.sin() * phi2.cos();
    let y = phi1.cos() * phi2.sin() - phi1.sin() * phi2.cos() * delta_lambda.cos();

    x.atan2(y)
}

/// Offset a position by distance and bearing.
///
/// # Arguments
/// * `lat`, `lon` - Starting position in degrees
/// * `distance_m` - Distance in meters
/// * `bearing_rad` - Bearing in radians (0 = north, π/2 = east)
///
/// # Returns
/// (new_lat, new_lon) in degrees
pub fn offset_by_bearing(lat: f64, lon: f64, distance_m: f64, bearing_rad: f64) -> (f64, f64) {
    if distance_m.abs() <= f64::EPSILON {
        return (lat, lon);
    }

    let lat1 = lat.to_radians();
    let lon1 = lon.to_radians();
    let angular_distance = distance_m / EARTH_RADIUS_M;

    let sin_lat1 = lat1.sin();
    let cos_lat1 = lat1.cos();
    let sin_ad = angular_distance.sin();
    let cos_ad = angular_distance.cos();

    let sin_lat2 = sin_lat1 * cos_ad + cos_lat1 * sin_ad * bearing_rad.cos();
    let lat2 = sin_lat2.clamp(-1.0, 1.0).asin();

    let y = bearing_rad.sin() * sin_ad * cos_lat1;
    let x = cos_ad - sin_lat1 * sin_lat2;
    let mut lon2 = lon1 + y.atan2(x);
    lon2 =
        (lon2 + std::f64::consts::PI).rem_euclid(2.0 * std::f64::consts::PI) - std::f64::consts::PI;

    (lat2.to_degrees(), lon2.to_degrees())
}

// ==== Coordinate identifiers ====
// Unnamed positions (random route points) get a name derived from the
// position alone, so the same point always gets the same identifier.

/// Build a waypoint identifier for an unnamed position.
///
/// Whole-degree positions use the ARINC 424 five character form:
/// `5040N` is 50N 040W, `5040E` 50N 040E, `5040S` 50S 040E and `5040W`
/// 50S 040W. When the longitude is 100 or more the letter moves between the
/// two numbers (`50N40` is 50N 140W).
///
/// Everything else uses the ICAO degrees/minutes form, e.g. `4620N05805W`.
pub fn latlon_ident(position: LatLon) -> String {
    let lat_minutes = (position.lat.abs() * 60.0).round() as u32;
    let lon_minutes = (position.lon.abs() * 60.0).round() as u32;
    let north = position.lat >= 0.0;
    let east = position.lon >= 0.0;

    if lat_minutes % 60 == 0 && lon_minutes % 60 == 0 {
        let lat_deg = lat_minutes / 60;
        let lon_deg = lon_minutes / 60;
        let letter = match (north, east) {
            (true, false) => 'N',
            (true, true) => 'E',
            (false, true) => 'S',
            (false, false) => 'W',
        };
        return if lon_deg < 100 {
            format!("{lat_deg:02}{lon_deg:02}{letter}")
        } else {
            format!("{lat_deg:02}{letter}{:02}", lon_deg % 100)
        };
    }

    format!(
        "{:02}{:02}{}{:03}{:02}{}",
        lat_minutes / 60,
        lat_minutes % 60,
        if north { 'N' } else { 'S' },
        lon_minutes / 60,
        lon_minutes % 60,
        if east { 'E' } else { 'W' },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_haversine_known_distance() {
        // ~111km between these points (1 degree latitude)
        let dist = haversine_distance(0.0, 0.0, 1.0, 0.0);
        assert!((dist - 111_194.0).abs() < 100.0);
    }

    #[test]
    fn test_haversine_same_point() {
        let dist = haversine_distance(40.0, -80.0, 40.0, -80.0);
        assert!(dist < 0.001);
    }

    #[test]
    fn offset_by_bearing_round_trips_distance() {
        let (lat, lon) = offset_by_bearing(40.0, -80.0, 50_000.0, 90.0_f64.to_radians());
        let dist = haversine_distance(40.0, -80.0, lat, lon);
        assert!((dist - 50_000.0).abs() < 1.0, "got {dist}");
        let brg = bearing(40.0, -80.0, lat, lon).to_degrees();
        assert!((brg - 90.0).abs() < 0.5, "got {brg}");
    }

    #[test]
    fn whole_degree_positions_use_five_letter_form() {
        assert_eq!(latlon_ident(LatLon::new(50.0, -40.0)), "5040N");
        assert_eq!(latlon_ident(LatLon::new(50.0, 40.0)), "5040E");
        assert_eq!(latlon_ident(LatLon::new(-50.0, 40.0)), "5040S");
        assert_eq!(latlon_ident(LatLon::new(-50.0, -40.0)), "5040W");
        assert_eq!(latlon_ident(LatLon::new(50.0, -140.0)), "50N40");
        assert_eq!(latlon_ident(LatLon::new(7.0, 105.0)), "07E05");
    }

    #[test]
    fn fractional_positions_use_degrees_minutes_form() {
        assert_eq!(
            latlon_ident(LatLon::new(46.0 + 20.0 / 60.0, -(58.0 + 5.0 / 60.0))),
            "4620N05805W"
        );
        assert_eq!(latlon_ident(LatLon::new(-0.5, 179.25)), "0030S17915E");
    }
}
