//! Core data models for route composition.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::spatial::haversine_distance;

/// A position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

impl LatLon {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Great-circle distance to `other` in meters.
    pub fn distance_m(&self, other: &LatLon) -> f64 {
        haversine_distance(self.lat, self.lon, other.lat, other.lon)
    }
}

/// A named point. Two waypoints are the same point when both the
/// identifier and the position match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub ident: String,
    pub lat: f64,
    pub lon: f64,
}

impl Waypoint {
    pub fn new(ident: impl Into<String>, position: LatLon) -> Self {
        Self {
            ident: ident.into(),
            lat: position.lat,
            lon: position.lon,
        }
    }

    /// Waypoint at a runway threshold, named airport + runway (`KAAA09`).
    pub fn runway(airport: &str, runway: &str, position: LatLon) -> Self {
        Self::new(format!("{airport}{runway}"), position)
    }

    pub fn position(&self) -> LatLon {
        LatLon::new(self.lat, self.lon)
    }
}

/// How a leg between two consecutive waypoints is flown.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "name", rename_all = "lowercase")]
pub enum Via {
    Airway(String),
    Procedure(String),
    Direct,
}

impl fmt::Display for Via {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Via::Airway(name) | Via::Procedure(name) => f.write_str(name),
            Via::Direct => f.write_str("DCT"),
        }
    }
}

/// Departure (SID) or arrival (STAR) procedure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProcedureKind {
    Departure,
    Arrival,
}

impl fmt::Display for ProcedureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcedureKind::Departure => f.write_str("departure"),
            ProcedureKind::Arrival => f.write_str("arrival"),
        }
    }
}

/// One waypoint of a route and the label of the leg leaving it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteNode {
    pub waypoint: Waypoint,
    /// `None` only on the last node.
    pub via_to_next: Option<Via>,
}

/// An ordered, contiguous sequence of waypoints joined by labelled legs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Route {
    nodes: Vec<RouteNode>,
}

impl Route {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_waypoint(waypoint: Waypoint) -> Self {
        Self {
            nodes: vec![RouteNode {
                waypoint,
                via_to_next: None,
            }],
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> &[RouteNode] {
        &self.nodes
    }

    pub fn waypoints(&self) -> impl Iterator<Item = &Waypoint> {
        self.nodes.iter().map(|node| &node.waypoint)
    }

    pub fn idents(&self) -> Vec<&str> {
        self.waypoints().map(|wpt| wpt.ident.as_str()).collect()
    }

    /// Legs as (from, via, to) triples.
    pub fn legs(&self) -> impl Iterator<Item = (&Waypoint, &Via, &Waypoint)> {
        self.nodes.windows(2).filter_map(|pair| {
            pair[0]
                .via_to_next
                .as_ref()
                .map(|via| (&pair[0].waypoint, via, &pair[1].waypoint))
        })
    }

    pub fn first_waypoint(&self) -> Option<&Waypoint> {
        self.nodes.first().map(|node| &node.waypoint)
    }

    pub fn last_waypoint(&self) -> Option<&Waypoint> {
        self.nodes.last().map(|node| &node.waypoint)
    }

    /// Swap the first waypoint for `waypoint`, keeping its outgoing leg.
    pub fn replace_first(&mut self, waypoint: Waypoint) {
        if let Some(first) = self.nodes.first_mut() {
            first.waypoint = waypoint;
        }
    }

    /// Swap the last waypoint for `waypoint`.
    pub fn replace_last(&mut self, waypoint: Waypoint) {
        if let Some(last) = self.nodes.last_mut() {
            last.waypoint = waypoint;
        }
    }

    /// Append `waypoint`, reached from the current last waypoint via `via`.
    /// On an empty route `via` is ignored.
    pub fn push_back(&mut self, waypoint: Waypoint, via: Via) {
        if let Some(last) = self.nodes.last_mut() {
            last.via_to_next = Some(via);
        }
        self.nodes.push(RouteNode {
            waypoint,
            via_to_next: None,
        });
    }

    /// Prepend `waypoint`, leaving it towards the current first waypoint via `via`.
    /// On an empty route `via` is ignored.
    pub fn push_front(&mut self, waypoint: Waypoint, via: Via) {
        let via_to_next = if self.nodes.is_empty() { None } else { Some(via) };
        self.nodes.insert(
            0,
            RouteNode {
                waypoint,
                via_to_next,
            },
        );
    }

    /// Append `other` to this route.
    ///
    /// A waypoint shared at the boundary is kept once and takes the outgoing
    /// label of `other`'s first node. Otherwise the two routes are joined
    /// with a direct leg. Either side may be empty.
    pub fn merge(&mut self, other: Route) {
        let mut incoming = other.nodes.into_iter();
        let Some(head) = incoming.next() else {
            return;
        };
        match self.nodes.last_mut() {
            None => self.nodes.push(head),
            Some(last) if last.waypoint == head.waypoint => {
                last.via_to_next = head.via_to_next;
            }
            Some(last) => {
                last.via_to_next = Some(Via::Direct);
                self.nodes.push(head);
            }
        }
        self.nodes.extend(incoming);
    }

    pub fn total_distance_m(&self) -> f64 {
        self.legs()
            .map(|(from, _, to)| from.position().distance_m(&to.position()))
            .sum()
    }
}

/// Flight plan notation: runs of legs on the same airway or procedure are
/// collapsed to their end point, direct legs are listed one by one.
impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(first) = self.nodes.first() else {
            return Ok(());
        };
        write!(f, "{}", first.waypoint.ident)?;

        let legs: Vec<_> = self.legs().collect();
        for (i, (_, via, to)) in legs.iter().enumerate() {
            let continues = matches!(legs.get(i + 1), Some((_, next, _)) if next == via)
                && **via != Via::Direct;
            if !continues {
                write!(f, " {} {}", via, to.ident)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wpt(ident: &str, lat: f64, lon: f64) -> Waypoint {
        Waypoint::new(ident, LatLon::new(lat, lon))
    }

    fn route(points: &[(&str, f64, f64)], via: Via) -> Route {
        let mut route = Route::new();
        for (ident, lat, lon) in points {
            route.push_back(wpt(ident, *lat, *lon), via.clone());
        }
        route
    }

    #[test]
    fn merge_keeps_shared_boundary_once() {
        let mut a = route(&[("A", 0.0, 0.0), ("B", 0.0, 1.0)], Via::Airway("J1".into()));
        let b = route(&[("B", 0.0, 1.0), ("C", 0.0, 2.0)], Via::Airway("J2".into()));

        a.merge(b);

        assert_eq!(a.idents(), vec!["A", "B", "C"]);
        assert_eq!(a.nodes()[1].via_to_next, Some(Via::Airway("J2".into())));
        assert_eq!(a.nodes()[2].via_to_next, None);
    }

    #[test]
    fn replacing_ends_keeps_leg_labels() {
        let mut a = route(&[("A", 0.0, 0.0), ("B", 0.0, 1.0)], Via::Airway("J1".into()));
        a.replace_first(wpt("A", 5.0, 5.0));
        a.replace_last(wpt("B", 6.0, 6.0));

        assert_eq!(a.first_waypoint(), Some(&wpt("A", 5.0, 5.0)));
        assert_eq!(a.last_waypoint(), Some(&wpt("B", 6.0, 6.0)));
        assert_eq!(a.nodes()[0].via_to_next, Some(Via::Airway("J1".into())));

        let mut empty = Route::new();
        empty.replace_first(wpt("A", 0.0, 0.0));
        assert!(empty.is_empty());
    }

    #[test]
    fn merge_joins_distinct_boundaries_direct() {
        let mut a = route(&[("A", 0.0, 0.0), ("B", 0.0, 1.0)], Via::Airway("J1".into()));
        let b = route(&[("C", 0.0, 2.0), ("D", 0.0, 3.0)], Via::Airway("J2".into()));

        a.merge(b);

        assert_eq!(a.idents(), vec!["A", "B", "C", "D"]);
        assert_eq!(a.nodes()[1].via_to_next, Some(Via::Direct));
    }

    #[test]
    fn same_ident_at_different_position_is_not_shared() {
        let mut a = Route::from_waypoint(wpt("B", 0.0, 1.0));
        a.merge(Route::from_waypoint(wpt("B", 10.0, 1.0)));
        assert_eq!(a.len(), 2);
    }

    #[test]
    fn merge_with_empty_routes_is_identity() {
        let original = route(&[("A", 0.0, 0.0), ("B", 0.0, 1.0)], Via::Direct);

        let mut left = original.clone();
        left.merge(Route::new());
        assert_eq!(left, original);

        let mut right = Route::new();
        right.merge(original.clone());
        assert_eq!(right, original);
    }

    #[test]
    fn push_front_labels_new_first_leg() {
        let mut r = Route::from_waypoint(wpt("B", 0.0, 1.0));
        r.push_front(wpt("A", 0.0, 0.0), Via::Direct);
        assert_eq!(r.idents(), vec!["A", "B"]);
        assert_eq!(r.nodes()[0].via_to_next, Some(Via::Direct));

        let mut empty = Route::new();
        empty.push_front(wpt("A", 0.0, 0.0), Via::Direct);
        assert_eq!(empty.nodes()[0].via_to_next, None);
    }

    #[test]
    fn display_collapses_airway_runs() {
        let mut r = Route::from_waypoint(wpt("KAAA09", 40.0, -80.0));
        r.push_back(wpt("ALPHA", 40.0, -79.0), Via::Procedure("AAA1".into()));
        r.push_back(wpt("BRAVO", 40.5, -78.0), Via::Airway("J1".into()));
        r.push_back(wpt("CHRLI", 40.0, -77.0), Via::Airway("J1".into()));
        r.push_back(wpt("4030N07630W", 40.5, -76.5), Via::Direct);
        r.push_back(wpt("KBBB27", 40.0, -70.0), Via::Direct);

        assert_eq!(
            r.to_string(),
            "KAAA09 AAA1 ALPHA J1 CHRLI DCT 4030N07630W DCT KBBB27"
        );
    }

    #[test]
    fn total_distance_sums_legs() {
        let r = route(&[("A", 0.0, 0.0), ("B", 1.0, 0.0), ("C", 2.0, 0.0)], Via::Direct);
        assert!((r.total_distance_m() - 2.0 * 111_194.0).abs() < 200.0);
    }
}
