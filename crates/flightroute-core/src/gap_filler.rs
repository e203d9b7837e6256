//! Second pass: fill `AUTO` and `RAND` placeholders between resolved neighbours.
//!
//! `AUTO` threads published procedures when it touches a runway, the same way
//! a dispatcher would file it. `RAND` never attaches procedures; at a runway it
//! joins the threshold directly.

use tracing::{debug, trace};

use crate::composer::RouteContext;
use crate::error::RouteError;
use crate::models::{LatLon, Route, Via, Waypoint};
use crate::resolver::SegmentRoute;
use crate::segmenter::Command;
use crate::spatial::latlon_ident;
use crate::traits::{Collaborators, RunwayEndpoint};

/// Waypoints bounding a gap.
#[derive(Debug, Clone, PartialEq)]
pub struct AnchorPair {
    pub start: Waypoint,
    pub end: Waypoint,
}

/// Resolve every pending slot, left to right.
pub fn fill_gaps(
    collaborators: &Collaborators<'_>,
    context: &RouteContext<'_>,
    slots: &mut [SegmentRoute],
) -> Result<(), RouteError> {
    let count = slots.len();

    for index in 0..count {
        let SegmentRoute::Pending(command) = slots[index] else {
            continue;
        };
        let is_first = index == 0;
        let is_last = index + 1 == count;

        let route = anchors(context, slots, index)
            .and_then(|anchors| {
                debug!(
                    index,
                    %command,
                    start = %anchors.start.ident,
                    end = %anchors.end.ident,
                    "filling gap"
                );
                match command {
                    Command::Auto => {
                        fill_auto(collaborators, context, &anchors, is_first, is_last)
                    }
                    Command::Rand => Ok(fill_rand(
                        collaborators,
                        context,
                        &anchors,
                        is_first,
                        is_last,
                    )),
                }
            })
            .map_err(|err| err.in_segment(index, command.into()))?;

        trace!(index, waypoints = route.len(), "gap filled");
        slots[index] = SegmentRoute::Resolved(route);
    }

    Ok(())
}

/// Anchors come from the neighbouring slots, or the runway waypoints at the
/// ends of the route. A neighbour still pending has no boundary to offer.
pub fn anchors(
    context: &RouteContext<'_>,
    slots: &[SegmentRoute],
    index: usize,
) -> Result<AnchorPair, RouteError> {
    let start = if index == 0 {
        context.origin.clone()
    } else {
        neighbour(slots, index - 1, Route::last_waypoint)?
    };
    let end = if index + 1 == slots.len() {
        context.destination.clone()
    } else {
        neighbour(slots, index + 1, Route::first_waypoint)?
    };
    Ok(AnchorPair { start, end })
}

fn neighbour(
    slots: &[SegmentRoute],
    index: usize,
    boundary: fn(&Route) -> Option<&Waypoint>,
) -> Result<Waypoint, RouteError> {
    match &slots[index] {
        SegmentRoute::Resolved(route) => boundary(route).cloned().ok_or_else(|| {
            RouteError::Composition(format!("segment {index} resolved to an empty route"))
        }),
        SegmentRoute::Pending(command) => Err(RouteError::Composition(format!(
            "segment {index} ({command}) is unresolved and cannot anchor its neighbour"
        ))),
    }
}

fn fill_auto(
    collaborators: &Collaborators<'_>,
    context: &RouteContext<'_>,
    anchors: &AnchorPair,
    is_first: bool,
    is_last: bool,
) -> Result<Route, RouteError> {
    let request = context.request;
    let pathfinder = collaborators.pathfinder;

    let departures = if is_first {
        collaborators
            .departures
            .available(&request.origin_airport, &request.origin_runway)
    } else {
        Vec::new()
    };
    let arrivals = if is_last {
        collaborators
            .arrivals
            .available(&request.dest_airport, &request.dest_runway)
    } else {
        Vec::new()
    };
    let origin = RunwayEndpoint {
        airport: &request.origin_airport,
        runway: &request.origin_runway,
        procedures: &departures,
    };
    let destination = RunwayEndpoint {
        airport: &request.dest_airport,
        runway: &request.dest_runway,
        procedures: &arrivals,
    };

    let found = match (is_first, is_last) {
        (true, true) => pathfinder.find_full_path(&origin, &destination),
        (true, false) => pathfinder.find_path_from_origin(&origin, &anchors.end),
        (false, true) => pathfinder.find_path_to_destination(&anchors.start, &destination),
        (false, false) => pathfinder.find_path(&anchors.start, &anchors.end),
    };

    found.ok_or_else(|| RouteError::NoPathFound {
        from: anchors.start.ident.clone(),
        to: anchors.end.ident.clone(),
    })
}

fn fill_rand(
    collaborators: &Collaborators<'_>,
    context: &RouteContext<'_>,
    anchors: &AnchorPair,
    is_first: bool,
    is_last: bool,
) -> Route {
    let points = collaborators
        .random
        .sample(anchors.start.position(), anchors.end.position());

    let mut route = polyline_route(&points);
    if is_first {
        route.push_front(context.origin.clone(), Via::Direct);
    }
    if is_last {
        route.push_back(context.destination.clone(), Via::Direct);
    }
    route
}

/// Interior points of `points` as coordinate-named waypoints joined direct.
/// The first and last points repeat the anchors and are dropped.
pub fn polyline_route(points: &[LatLon]) -> Route {
    let mut route = Route::new();
    if points.len() < 3 {
        return route;
    }
    for point in &points[1..points.len() - 1] {
        route.push_back(Waypoint::new(latlon_ident(*point), *point), Via::Direct);
    }
    route
}
