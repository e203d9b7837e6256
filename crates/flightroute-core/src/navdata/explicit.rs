//! Explicit route text: waypoints, airways between waypoints, and `DCT`.

use crate::error::RouteError;
use crate::models::{LatLon, Route, Via};
use crate::navdata::NavData;
use crate::traits::WaypointResolver;

const DIRECT: &str = "DCT";

impl WaypointResolver for NavData {
    /// `ALPHA J1 ECHOO DCT HOTEL` flies ALPHA along J1 to ECHOO, then direct
    /// to HOTEL. Two waypoints in a row are joined direct as well. Repeated
    /// identifiers resolve to the instance nearest the previous point.
    fn resolve_explicit(&self, tokens: &[String], near: LatLon) -> Result<Route, RouteError> {
        let mut route = Route::new();
        let mut last: Option<usize> = None;
        let mut airway: Option<&str> = None;
        let mut reference = near;

        for token in tokens {
            let token = token.as_str();
            if token == DIRECT {
                continue;
            }
            if let Some(from) = last {
                if airway.is_none() && self.airway(token).is_some() {
                    airway = Some(token);
                    continue;
                }
                if let Some(name) = airway.take() {
                    let to = self.follow_airway(&mut route, name, from, token)?;
                    last = Some(to);
                    reference = self.fixes().get(to).position();
                    continue;
                }
            }

            let index = self
                .fixes()
                .nearest(token, Some(reference))
                .ok_or_else(|| RouteError::UnknownWaypoint(token.to_string()))?;
            route.push_back(self.fixes().get(index).clone(), Via::Direct);
            last = Some(index);
            reference = self.fixes().get(index).position();
        }

        // An airway has to end on a waypoint.
        if let Some(name) = airway {
            return Err(RouteError::UnknownWaypoint(name.to_string()));
        }
        Ok(route)
    }
}

impl NavData {
    /// Append the fixes of `airway` after `from` up to and including `ident`,
    /// in whichever direction the airway has to be flown.
    fn follow_airway(
        &self,
        route: &mut Route,
        airway: &str,
        from: usize,
        ident: &str,
    ) -> Result<usize, RouteError> {
        let not_on_airway = |ident: &str| RouteError::NotOnAirway {
            airway: airway.to_string(),
            ident: ident.to_string(),
        };
        let chain = self.airway(airway).unwrap_or(&[]);

        let start = chain
            .iter()
            .position(|&fix| fix == from)
            .ok_or_else(|| not_on_airway(&self.fixes().get(from).ident))?;
        let end = chain
            .iter()
            .position(|&fix| self.fixes().get(fix).ident == ident)
            .ok_or_else(|| {
                if self.fixes().contains(ident) {
                    not_on_airway(ident)
                } else {
                    RouteError::UnknownWaypoint(ident.to_string())
                }
            })?;

        let via = Via::Airway(airway.to_string());
        let steps: Vec<usize> = if start <= end {
            chain[start + 1..=end].to_vec()
        } else {
            chain[end..start].iter().rev().copied().collect()
        };
        for fix in steps {
            route.push_back(self.fixes().get(fix).clone(), via.clone());
        }
        Ok(chain[end])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NAV: &str = r#"{
        "waypoints": [
            {"ident": "ALPHA", "lat": 40.0, "lon": -79.0},
            {"ident": "BRAVO", "lat": 40.5, "lon": -78.0},
            {"ident": "CHRLI", "lat": 40.0, "lon": -77.0},
            {"ident": "DELTA", "lat": 39.5, "lon": -76.0},
            {"ident": "DELTA", "lat": 10.0, "lon": 10.0}
        ],
        "airways": [{"ident": "J1", "fixes": ["ALPHA", "BRAVO", "CHRLI"]}]
    }"#;

    fn tokens(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn resolve(items: &[&str]) -> Result<Route, RouteError> {
        let nav = NavData::from_json(NAV).unwrap();
        nav.resolve_explicit(&tokens(items), LatLon::new(40.0, -80.0))
    }

    #[test]
    fn airway_is_expanded_between_waypoints() {
        let route = resolve(&["ALPHA", "J1", "CHRLI"]).unwrap();
        assert_eq!(route.idents(), vec!["ALPHA", "BRAVO", "CHRLI"]);
        assert_eq!(route.to_string(), "ALPHA J1 CHRLI");
    }

    #[test]
    fn airway_can_be_flown_backwards() {
        let route = resolve(&["CHRLI", "J1", "ALPHA"]).unwrap();
        assert_eq!(route.idents(), vec!["CHRLI", "BRAVO", "ALPHA"]);
    }

    #[test]
    fn consecutive_waypoints_and_dct_join_direct() {
        let route = resolve(&["ALPHA", "DCT", "CHRLI", "DELTA"]).unwrap();
        assert_eq!(route.to_string(), "ALPHA DCT CHRLI DCT DELTA");
        assert_eq!(route.last_waypoint().unwrap().lat, 39.5);
    }

    #[test]
    fn unknown_waypoint_is_reported() {
        assert_eq!(
            resolve(&["ALPHA", "ZULU"]),
            Err(RouteError::UnknownWaypoint("ZULU".into()))
        );
    }

    #[test]
    fn waypoint_off_airway_is_reported() {
        assert_eq!(
            resolve(&["ALPHA", "J1", "DELTA"]),
            Err(RouteError::NotOnAirway {
                airway: "J1".into(),
                ident: "DELTA".into()
            })
        );
    }
}
