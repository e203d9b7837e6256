//! Route composition: segment, resolve, fill, then stitch.
//!
//! The two passes must stay ordered. Every explicit segment is resolved
//! before any placeholder is filled, because a placeholder anchors on the
//! boundary waypoints of its resolved neighbours.

use tracing::debug;

use crate::error::RouteError;
use crate::gap_filler::fill_gaps;
use crate::models::{Route, Waypoint};
use crate::resolver::{resolve_segments, SegmentRoute};
use crate::segmenter::split_segments;
use crate::traits::Collaborators;

/// A route to compose between two runways.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteRequest {
    pub tokens: Vec<String>,
    pub origin_airport: String,
    pub origin_runway: String,
    pub dest_airport: String,
    pub dest_runway: String,
}

impl RouteRequest {
    pub fn new<S: AsRef<str>>(
        tokens: &[S],
        origin_airport: &str,
        origin_runway: &str,
        dest_airport: &str,
        dest_runway: &str,
    ) -> Self {
        Self {
            tokens: tokens.iter().map(|t| t.as_ref().to_string()).collect(),
            origin_airport: origin_airport.to_string(),
            origin_runway: origin_runway.to_string(),
            dest_airport: dest_airport.to_string(),
            dest_runway: dest_runway.to_string(),
        }
    }
}

/// Per-request state shared by both passes.
#[derive(Debug, Clone)]
pub struct RouteContext<'r> {
    pub request: &'r RouteRequest,
    pub origin: Waypoint,
    pub destination: Waypoint,
}

/// Composes routes from tokens mixing explicit names with `AUTO`/`RAND`.
pub struct RouteComposer<'a> {
    collaborators: Collaborators<'a>,
}

impl<'a> RouteComposer<'a> {
    pub fn new(collaborators: Collaborators<'a>) -> Self {
        Self { collaborators }
    }

    /// Compose the full route for `request`.
    ///
    /// The first error aborts the request; no partial route is returned.
    pub fn compose(&self, request: &RouteRequest) -> Result<Route, RouteError> {
        let segments = split_segments(&request.tokens)?;
        let context = self.context(request)?;
        debug!(
            segments = segments.len(),
            origin = %context.origin.ident,
            destination = %context.destination.ident,
            "composing route"
        );

        let mut slots = resolve_segments(&self.collaborators, &context, &segments)?;
        debug!(
            pending = slots
                .iter()
                .filter(|slot| matches!(slot, SegmentRoute::Pending(_)))
                .count(),
            "explicit segments resolved"
        );

        fill_gaps(&self.collaborators, &context, &mut slots)?;
        let route = connect_all(slots)?;
        debug!(waypoints = route.len(), "route composed");
        Ok(route)
    }

    fn context<'r>(&self, request: &'r RouteRequest) -> Result<RouteContext<'r>, RouteError> {
        let directory = self.collaborators.directory;
        let origin = directory.runway_position(&request.origin_airport, &request.origin_runway)?;
        let destination = directory.runway_position(&request.dest_airport, &request.dest_runway)?;

        Ok(RouteContext {
            request,
            origin: Waypoint::runway(&request.origin_airport, &request.origin_runway, origin),
            destination: Waypoint::runway(&request.dest_airport, &request.dest_runway, destination),
        })
    }
}

/// Merge every slot into one route, in order. A single slot comes back
/// unchanged; a pending slot means a pass was skipped.
pub fn connect_all(slots: Vec<SegmentRoute>) -> Result<Route, RouteError> {
    let mut route = Route::new();
    for (index, slot) in slots.into_iter().enumerate() {
        match slot {
            SegmentRoute::Resolved(part) => route.merge(part),
            SegmentRoute::Pending(command) => {
                return Err(RouteError::Composition(format!(
                    "segment {index} ({command}) reached the composer unresolved"
                )));
            }
        }
    }
    Ok(route)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LatLon, Via};
    use crate::segmenter::Command;

    fn route(idents: &[(&str, f64)]) -> Route {
        let mut route = Route::new();
        for (ident, lon) in idents {
            route.push_back(Waypoint::new(*ident, LatLon::new(0.0, *lon)), Via::Direct);
        }
        route
    }

    #[test]
    fn waypoint_count_drops_shared_boundaries() {
        let a = route(&[("A", 0.0), ("B", 1.0)]);
        let b = route(&[("B", 1.0), ("C", 2.0), ("D", 3.0)]);
        let c = route(&[("E", 4.0), ("F", 5.0)]);
        let total = a.len() + b.len() + c.len();

        let composed = connect_all(vec![
            SegmentRoute::Resolved(a),
            SegmentRoute::Resolved(b),
            SegmentRoute::Resolved(c),
        ])
        .unwrap();

        assert_eq!(composed.len(), total - 1);
        assert_eq!(composed.idents(), vec!["A", "B", "C", "D", "E", "F"]);
    }

    #[test]
    fn single_slot_is_returned_unchanged() {
        let only = route(&[("A", 0.0), ("B", 1.0)]);
        let composed = connect_all(vec![SegmentRoute::Resolved(only.clone())]).unwrap();
        assert_eq!(composed, only);
    }

    #[test]
    fn pending_slot_is_a_composition_error() {
        let result = connect_all(vec![
            SegmentRoute::Resolved(route(&[("A", 0.0)])),
            SegmentRoute::Pending(Command::Rand),
        ]);
        assert!(matches!(result, Err(RouteError::Composition(_))));
    }
}
