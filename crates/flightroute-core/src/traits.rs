//! Interfaces the composer consumes. Implementations are passed in by
//! reference for each request; see [`crate::navdata`] and
//! [`crate::random_route`] for the bundled ones.

use crate::error::RouteError;
use crate::models::{LatLon, Route, Waypoint};

/// Looks up runway threshold positions.
pub trait AirportDirectory {
    fn runway_position(&self, airport: &str, runway: &str) -> Result<LatLon, RouteError>;
}

/// Turns a run of explicit names into a flyable route.
pub trait WaypointResolver {
    /// `near` breaks ties between waypoints sharing an identifier.
    fn resolve_explicit(&self, tokens: &[String], near: LatLon) -> Result<Route, RouteError>;
}

/// Result of pulling a procedure off one end of a token run.
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    /// Runway to join point (departures) or join point to runway (arrivals).
    pub route: Route,
    /// Tokens left once the procedure name, if any, is removed.
    pub remaining: Vec<String>,
}

/// Departure or arrival procedure source.
pub trait ProcedureExtractor {
    /// Names of the procedures usable from `runway`.
    fn available(&self, airport: &str, runway: &str) -> Vec<String>;

    fn extract(
        &self,
        tokens: &[String],
        airport: &str,
        runway: &str,
        runway_waypoint: &Waypoint,
    ) -> Result<Extraction, RouteError>;
}

/// An airport end of a path search.
#[derive(Debug, Clone, Copy)]
pub struct RunwayEndpoint<'a> {
    pub airport: &'a str,
    pub runway: &'a str,
    pub procedures: &'a [String],
}

/// Shortest path search over the airway network. `None` means no connection.
pub trait Pathfinder {
    fn find_path(&self, from: &Waypoint, to: &Waypoint) -> Option<Route>;

    /// Origin runway, through one of its departure procedures, to `to`.
    fn find_path_from_origin(&self, origin: &RunwayEndpoint<'_>, to: &Waypoint) -> Option<Route>;

    /// `from`, through one of the arrival procedures, to the destination runway.
    fn find_path_to_destination(
        &self,
        from: &Waypoint,
        destination: &RunwayEndpoint<'_>,
    ) -> Option<Route>;

    fn find_full_path(
        &self,
        origin: &RunwayEndpoint<'_>,
        destination: &RunwayEndpoint<'_>,
    ) -> Option<Route>;
}

/// Produces a randomized polyline between two positions, endpoints included.
pub trait RandomRouteGenerator {
    fn sample(&self, from: LatLon, to: LatLon) -> Vec<LatLon>;
}

/// Every collaborator one composition needs.
#[derive(Clone, Copy)]
pub struct Collaborators<'a> {
    pub directory: &'a dyn AirportDirectory,
    pub resolver: &'a dyn WaypointResolver,
    pub departures: &'a dyn ProcedureExtractor,
    pub arrivals: &'a dyn ProcedureExtractor,
    pub pathfinder: &'a dyn Pathfinder,
    pub random: &'a dyn RandomRouteGenerator,
}
