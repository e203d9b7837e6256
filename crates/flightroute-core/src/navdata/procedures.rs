//! SID and STAR tables.

use std::sync::Arc;

use crate::error::RouteError;
use crate::models::{ProcedureKind, Route, Via, Waypoint};
use crate::navdata::FixIndex;
use crate::traits::{Extraction, ProcedureExtractor};

#[derive(Debug, Clone)]
pub struct Procedure {
    pub airport: String,
    pub name: String,
    /// Empty means every runway.
    pub runways: Vec<String>,
    /// Fix indices in flying order.
    pub fixes: Vec<usize>,
}

impl Procedure {
    pub fn serves(&self, runway: &str) -> bool {
        self.runways.is_empty() || self.runways.iter().any(|r| r == runway)
    }
}

#[derive(Debug, Clone)]
pub struct ProcedureTable {
    kind: ProcedureKind,
    fixes: Arc<FixIndex>,
    procedures: Vec<Procedure>,
}

impl ProcedureTable {
    pub fn new(kind: ProcedureKind, fixes: Arc<FixIndex>, procedures: Vec<Procedure>) -> Self {
        Self {
            kind,
            fixes,
            procedures,
        }
    }

    fn named(&self, airport: &str, name: &str) -> impl Iterator<Item = &Procedure> {
        let name = name.to_string();
        let airport = airport.to_string();
        self.procedures
            .iter()
            .filter(move |p| p.airport == airport && p.name == name)
    }

    /// The procedure `name` at `airport` usable from `runway`.
    pub fn find(&self, airport: &str, name: &str, runway: &str) -> Option<&Procedure> {
        self.named(airport, name).find(|p| p.serves(runway))
    }

    /// Route between the runway waypoint and the procedure's far end, in
    /// flying order.
    pub fn procedure_route(&self, procedure: &Procedure, runway_waypoint: &Waypoint) -> Route {
        let via = Via::Procedure(procedure.name.clone());
        let fixes = procedure.fixes.iter().map(|&index| self.fixes.get(index).clone());
        let mut route = Route::new();
        match self.kind {
            ProcedureKind::Departure => {
                route.push_back(runway_waypoint.clone(), via.clone());
                for fix in fixes {
                    route.push_back(fix, via.clone());
                }
            }
            ProcedureKind::Arrival => {
                for fix in fixes {
                    route.push_back(fix, via.clone());
                }
                route.push_back(runway_waypoint.clone(), via);
            }
        }
        route
    }

    /// Runway joined direct to the nearest instance of `ident`.
    fn direct_route(&self, ident: &str, runway_waypoint: &Waypoint) -> Result<Route, RouteError> {
        let index = self
            .fixes
            .nearest(ident, Some(runway_waypoint.position()))
            .ok_or_else(|| RouteError::UnknownWaypoint(ident.to_string()))?;
        let fix = self.fixes.get(index).clone();

        let mut route = Route::from_waypoint(runway_waypoint.clone());
        match self.kind {
            ProcedureKind::Departure => route.push_back(fix, Via::Direct),
            ProcedureKind::Arrival => route.push_front(fix, Via::Direct),
        }
        Ok(route)
    }
}

impl ProcedureExtractor for ProcedureTable {
    fn available(&self, airport: &str, runway: &str) -> Vec<String> {
        self.procedures
            .iter()
            .filter(|p| p.airport == airport && p.serves(runway))
            .map(|p| p.name.clone())
            .collect()
    }

    /// Departures look at the first token, arrivals at the last. A token
    /// naming one of the airport's procedures is consumed; otherwise the
    /// runway is joined direct to that waypoint and the tokens are kept.
    fn extract(
        &self,
        tokens: &[String],
        airport: &str,
        runway: &str,
        runway_waypoint: &Waypoint,
    ) -> Result<Extraction, RouteError> {
        let edge = match self.kind {
            ProcedureKind::Departure => tokens.first(),
            ProcedureKind::Arrival => tokens.last(),
        };
        let Some(edge) = edge else {
            return Ok(Extraction {
                route: Route::from_waypoint(runway_waypoint.clone()),
                remaining: Vec::new(),
            });
        };

        if self.named(airport, edge).next().is_none() {
            return Ok(Extraction {
                route: self.direct_route(edge, runway_waypoint)?,
                remaining: tokens.to_vec(),
            });
        }

        let procedure =
            self.find(airport, edge, runway)
                .ok_or_else(|| RouteError::ProcedureNotFound {
                    kind: self.kind,
                    name: edge.clone(),
                    airport: airport.to_string(),
                    runway: runway.to_string(),
                })?;

        let remaining = match self.kind {
            ProcedureKind::Departure => tokens[1..].to_vec(),
            ProcedureKind::Arrival => tokens[..tokens.len() - 1].to_vec(),
        };
        Ok(Extraction {
            route: self.procedure_route(procedure, runway_waypoint),
            remaining,
        })
    }
}
