//! First pass: resolve every explicit segment, leave placeholders pending.

use tracing::trace;

use crate::composer::RouteContext;
use crate::error::{RouteError, SegmentKind};
use crate::models::Route;
use crate::segmenter::{Command, Segment};
use crate::traits::Collaborators;

/// Per-segment result slot.
#[derive(Debug, Clone, PartialEq)]
pub enum SegmentRoute {
    Resolved(Route),
    Pending(Command),
}

/// Resolve all explicit segments. Procedures are attached only to the first
/// (departure) and last (arrival) segment, and only when that segment is
/// explicit; boundary placeholders are handled by the gap filler.
pub fn resolve_segments(
    collaborators: &Collaborators<'_>,
    context: &RouteContext<'_>,
    segments: &[Segment],
) -> Result<Vec<SegmentRoute>, RouteError> {
    let last = segments.len().saturating_sub(1);

    segments
        .iter()
        .enumerate()
        .map(|(index, segment)| match segment {
            Segment::Command(command) => Ok(SegmentRoute::Pending(*command)),
            Segment::Explicit(tokens) => {
                resolve_explicit(collaborators, context, tokens, index == 0, index == last)
                    .map(SegmentRoute::Resolved)
                    .map_err(|err| err.in_segment(index, SegmentKind::Explicit))
            }
        })
        .collect()
}

/// Runway side of an explicit segment, and whether its edge token was
/// consumed as a procedure name.
struct Edge {
    route: Route,
    consumed: bool,
}

fn resolve_explicit(
    collaborators: &Collaborators<'_>,
    context: &RouteContext<'_>,
    tokens: &[String],
    is_first: bool,
    is_last: bool,
) -> Result<Route, RouteError> {
    let request = context.request;
    let mut tokens = tokens.to_vec();

    let departure = if is_first {
        let extraction = collaborators.departures.extract(
            &tokens,
            &request.origin_airport,
            &request.origin_runway,
            &context.origin,
        )?;
        let consumed = extraction.remaining.len() < tokens.len();
        tokens = extraction.remaining;
        Some(Edge {
            route: extraction.route,
            consumed,
        })
    } else {
        None
    };

    let arrival = if is_last {
        let extraction = collaborators.arrivals.extract(
            &tokens,
            &request.dest_airport,
            &request.dest_runway,
            &context.destination,
        )?;
        let consumed = extraction.remaining.len() < tokens.len();
        tokens = extraction.remaining;
        Some(Edge {
            route: extraction.route,
            consumed,
        })
    } else {
        None
    };

    let interior = if tokens.is_empty() {
        Route::new()
    } else {
        collaborators
            .resolver
            .resolve_explicit(&tokens, context.origin.position())?
    };
    trace!(tokens = ?tokens, waypoints = interior.len(), "resolved explicit run");

    // A kept edge token is looked up by both the extractor and the resolver;
    // the interior's instance is the one the route flies.
    let mut route = match departure {
        Some(mut edge) => {
            if let Some(first) = interior.first_waypoint() {
                if !edge.consumed && edge.route.last_waypoint().is_some_and(|w| w.ident == first.ident) {
                    edge.route.replace_last(first.clone());
                }
            }
            edge.route
        }
        None => Route::new(),
    };
    let interior_last = interior.last_waypoint().cloned();
    route.merge(interior);

    if let Some(mut edge) = arrival {
        if let Some(last) = interior_last {
            if !edge.consumed && edge.route.first_waypoint().is_some_and(|w| w.ident == last.ident) {
                edge.route.replace_first(last);
            }
        }
        route.merge(edge.route);
    }
    Ok(route)
}
