//! Flight route composition.
//!
//! Builds a continuous runway-to-runway route from tokens that mix explicit
//! waypoints, airways and procedures with the `AUTO` (shortest path) and
//! `RAND` (random path) placeholders.

pub mod composer;
pub mod error;
pub mod gap_filler;
pub mod models;
pub mod navdata;
pub mod random_route;
pub mod resolver;
pub mod segmenter;
pub mod spatial;
pub mod traits;

pub use composer::{connect_all, RouteComposer, RouteContext, RouteRequest};
pub use error::{RouteError, SegmentKind};
pub use gap_filler::AnchorPair;
pub use models::{LatLon, ProcedureKind, Route, RouteNode, Via, Waypoint};
pub use navdata::{NavData, NavDataError};
pub use random_route::{RandomRouteConfig, RandomRoutes};
pub use resolver::SegmentRoute;
pub use segmenter::{split_segments, Command, Segment};
pub use spatial::{haversine_distance, latlon_ident};
pub use traits::{
    AirportDirectory, Collaborators, Extraction, Pathfinder, ProcedureExtractor,
    RandomRouteGenerator, RunwayEndpoint, WaypointResolver,
};
