//! In-memory navigation database.
//!
//! Loaded from a JSON document and implementing every collaborator the
//! composer needs: runway lookup, explicit resolution, SID/STAR extraction
//! and airway pathfinding.

mod explicit;
mod fixes;
mod graph;
mod procedures;

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::RouteError;
use crate::models::{LatLon, ProcedureKind, Waypoint};
use crate::traits::{AirportDirectory, Collaborators, RandomRouteGenerator};

pub use fixes::FixIndex;
pub use graph::AirwayGraph;
pub use procedures::{Procedure, ProcedureTable};

#[derive(Debug, Error)]
pub enum NavDataError {
    #[error("failed to read navigation data: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse navigation data: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("{owner} references unknown fix '{ident}'")]
    UnknownFix { owner: String, ident: String },

    #[error("{kind} procedure {name} references unknown airport {airport}")]
    UnknownAirport {
        kind: ProcedureKind,
        name: String,
        airport: String,
    },
}

/// On-disk layout.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NavDataFile {
    #[serde(default)]
    pub waypoints: Vec<Waypoint>,
    #[serde(default)]
    pub airways: Vec<AirwayRecord>,
    #[serde(default)]
    pub airports: Vec<AirportRecord>,
    #[serde(default)]
    pub sids: Vec<ProcedureRecord>,
    #[serde(default)]
    pub stars: Vec<ProcedureRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AirwayRecord {
    pub ident: String,
    /// Fix identifiers in airway order
    pub fixes: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AirportRecord {
    pub icao: String,
    pub runways: Vec<RunwayRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunwayRecord {
    pub ident: String,
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcedureRecord {
    pub airport: String,
    pub name: String,
    /// Runways served; empty means every runway
    #[serde(default)]
    pub runways: Vec<String>,
    /// Fixes in flying order, runway excluded
    pub fixes: Vec<String>,
}

pub struct NavData {
    fixes: Arc<FixIndex>,
    runways: HashMap<String, HashMap<String, LatLon>>,
    airways: HashMap<String, Vec<usize>>,
    graph: AirwayGraph,
    departures: ProcedureTable,
    arrivals: ProcedureTable,
}

impl NavData {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, NavDataError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, NavDataError> {
        let file: NavDataFile = serde_json::from_str(raw)?;
        Self::build(file)
    }

    pub fn build(file: NavDataFile) -> Result<Self, NavDataError> {
        let fixes = Arc::new(FixIndex::new(file.waypoints));

        let runways: HashMap<String, HashMap<String, LatLon>> = file
            .airports
            .into_iter()
            .map(|airport| {
                let runways = airport
                    .runways
                    .into_iter()
                    .map(|rwy| (rwy.ident, LatLon::new(rwy.lat, rwy.lon)))
                    .collect();
                (airport.icao, runways)
            })
            .collect();

        let mut airways = HashMap::new();
        for record in file.airways {
            let chain = resolve_chain(&fixes, &record.fixes, None, &record.ident)?;
            airways.insert(record.ident, chain);
        }
        let graph = AirwayGraph::new(&fixes, &airways);

        let departures =
            build_table(ProcedureKind::Departure, file.sids, &fixes, &runways)?;
        let arrivals = build_table(ProcedureKind::Arrival, file.stars, &fixes, &runways)?;

        tracing::debug!(
            fixes = fixes.len(),
            airways = airways.len(),
            airports = runways.len(),
            "navigation data loaded"
        );

        Ok(Self {
            fixes,
            runways,
            airways,
            graph,
            departures,
            arrivals,
        })
    }

    pub fn fixes(&self) -> &FixIndex {
        &self.fixes
    }

    pub fn departures(&self) -> &ProcedureTable {
        &self.departures
    }

    pub fn arrivals(&self) -> &ProcedureTable {
        &self.arrivals
    }

    /// Fix indices of `airway` in airway order.
    pub fn airway(&self, ident: &str) -> Option<&[usize]> {
        self.airways.get(ident).map(Vec::as_slice)
    }

    /// Wire this database and `random` up as composer collaborators.
    pub fn collaborators<'a>(&'a self, random: &'a dyn RandomRouteGenerator) -> Collaborators<'a> {
        Collaborators {
            directory: self,
            resolver: self,
            departures: &self.departures,
            arrivals: &self.arrivals,
            pathfinder: self,
            random,
        }
    }
}

impl AirportDirectory for NavData {
    fn runway_position(&self, airport: &str, runway: &str) -> Result<LatLon, RouteError> {
        self.runways
            .get(airport)
            .and_then(|runways| runways.get(runway))
            .copied()
            .ok_or_else(|| RouteError::UnknownRunway {
                airport: airport.to_string(),
                runway: runway.to_string(),
            })
    }
}

/// Resolve a list of identifiers, each to the instance nearest the one
/// before it.
fn resolve_chain(
    fixes: &FixIndex,
    idents: &[String],
    start: Option<LatLon>,
    owner: &str,
) -> Result<Vec<usize>, NavDataError> {
    let mut near = start;
    idents
        .iter()
        .map(|ident| {
            let index = fixes
                .nearest(ident, near)
                .ok_or_else(|| NavDataError::UnknownFix {
                    owner: owner.to_string(),
                    ident: ident.clone(),
                })?;
            near = Some(fixes.get(index).position());
            Ok(index)
        })
        .collect()
}

fn build_table(
    kind: ProcedureKind,
    records: Vec<ProcedureRecord>,
    fixes: &Arc<FixIndex>,
    runways: &HashMap<String, HashMap<String, LatLon>>,
) -> Result<ProcedureTable, NavDataError> {
    let mut procedures = Vec::with_capacity(records.len());
    for record in records {
        let airport_runways =
            runways
                .get(&record.airport)
                .ok_or_else(|| NavDataError::UnknownAirport {
                    kind,
                    name: record.name.clone(),
                    airport: record.airport.clone(),
                })?;
        let reference = airport_runways.values().next().copied();

        // Arrivals are resolved backwards from the runway end.
        let chain = match kind {
            ProcedureKind::Departure => {
                resolve_chain(fixes, &record.fixes, reference, &record.name)?
            }
            ProcedureKind::Arrival => {
                let reversed: Vec<String> = record.fixes.iter().rev().cloned().collect();
                let mut chain = resolve_chain(fixes, &reversed, reference, &record.name)?;
                chain.reverse();
                chain
            }
        };

        procedures.push(Procedure {
            airport: record.airport,
            name: record.name,
            runways: record.runways,
            fixes: chain,
        });
    }
    Ok(ProcedureTable::new(kind, Arc::clone(fixes), procedures))
}
