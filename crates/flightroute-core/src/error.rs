//! Errors raised while composing a route.

use std::fmt;

use thiserror::Error;

use crate::models::ProcedureKind;

/// Which kind of segment a failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentKind {
    Explicit,
    Auto,
    Rand,
}

impl fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SegmentKind::Explicit => f.write_str("explicit"),
            SegmentKind::Auto => f.write_str("AUTO"),
            SegmentKind::Rand => f.write_str("RAND"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RouteError {
    #[error("route contains no entries")]
    EmptyRoute,

    #[error("unknown waypoint '{0}'")]
    UnknownWaypoint(String),

    #[error("unknown runway {runway} at {airport}")]
    UnknownRunway { airport: String, runway: String },

    #[error("waypoint '{ident}' is not on airway {airway}")]
    NotOnAirway { airway: String, ident: String },

    #[error("no {kind} procedure '{name}' for runway {runway} at {airport}")]
    ProcedureNotFound {
        kind: ProcedureKind,
        name: String,
        airport: String,
        runway: String,
    },

    #[error("no path found from {from} to {to}")]
    NoPathFound { from: String, to: String },

    #[error("route composition failed: {0}")]
    Composition(String),

    #[error("segment {index} ({kind}): {source}")]
    Segment {
        index: usize,
        kind: SegmentKind,
        #[source]
        source: Box<RouteError>,
    },
}

impl RouteError {
    /// Tag a collaborator failure with the segment that triggered it.
    pub fn in_segment(self, index: usize, kind: SegmentKind) -> Self {
        RouteError::Segment {
            index,
            kind,
            source: Box::new(self),
        }
    }

    /// The innermost error, with segment tags peeled off.
    pub fn root_cause(&self) -> &RouteError {
        match self {
            RouteError::Segment { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segment_tag_reports_index_kind_and_cause() {
        let err = RouteError::NoPathFound {
            from: "ALPHA".into(),
            to: "HOTEL".into(),
        }
        .in_segment(2, SegmentKind::Auto);

        assert_eq!(
            err.to_string(),
            "segment 2 (AUTO): no path found from ALPHA to HOTEL"
        );
        assert!(matches!(err.root_cause(), RouteError::NoPathFound { .. }));
    }
}
