//! Printable and JSON renderings of a composed route.

use std::fmt;

use flightroute_core::spatial::METERS_PER_NM;
use flightroute_core::Route;
use serde::Serialize;

/// One row of the waypoint table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WaypointRow {
    pub ident: String,
    pub lat: f64,
    pub lon: f64,
    /// Leg label towards the next waypoint, absent on the last row.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub via: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteSummary {
    /// Flight plan text, airway runs collapsed.
    pub route: String,
    pub distance_nm: f64,
    pub waypoints: Vec<WaypointRow>,
}

impl RouteSummary {
    pub fn new(route: &Route) -> Self {
        let waypoints = route
            .nodes()
            .iter()
            .map(|node| WaypointRow {
                ident: node.waypoint.ident.clone(),
                lat: node.waypoint.lat,
                lon: node.waypoint.lon,
                via: node.via_to_next.as_ref().map(ToString::to_string),
            })
            .collect();

        Self {
            route: route.to_string(),
            distance_nm: route.total_distance_m() / METERS_PER_NM,
            waypoints,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for RouteSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.route)?;
        writeln!(f, "{:.1} nm, {} waypoints", self.distance_nm, self.waypoints.len())?;
        for row in &self.waypoints {
            writeln!(
                f,
                "  {:<11} {:>9.4} {:>10.4}  {}",
                row.ident,
                row.lat,
                row.lon,
                row.via.as_deref().unwrap_or("")
            )?;
        }
        Ok(())
    }
}
