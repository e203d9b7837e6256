//! Airway network and shortest path search.

use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashMap};

use crate::models::{LatLon, Route, Via, Waypoint};
use crate::navdata::{FixIndex, NavData};
use crate::traits::{AirportDirectory, Pathfinder, RunwayEndpoint};

#[derive(Debug, Clone)]
struct Edge {
    to: usize,
    airway: String,
    distance_m: f64,
}

/// Fixes connected along their airways, both directions.
#[derive(Debug, Clone, Default)]
pub struct AirwayGraph {
    edges: Vec<Vec<Edge>>,
}

#[derive(Debug, Clone, Copy)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct OpenNode {
    cost: FloatOrd,
    node: usize,
}

/// Where a search may start or stop: a network fix plus the route that
/// leads to it (sources) or away from it (targets), and that route's length.
#[derive(Debug, Clone)]
struct Terminal {
    node: usize,
    cost_m: f64,
    route: Route,
}

impl AirwayGraph {
    pub fn new(fixes: &FixIndex, airways: &HashMap<String, Vec<usize>>) -> Self {
        let mut edges: Vec<Vec<Edge>> = vec![Vec::new(); fixes.len()];
        for (ident, chain) in airways {
            for pair in chain.windows(2) {
                let (a, b) = (pair[0], pair[1]);
                let distance_m = fixes.get(a).position().distance_m(&fixes.get(b).position());
                edges[a].push(Edge {
                    to: b,
                    airway: ident.clone(),
                    distance_m,
                });
                edges[b].push(Edge {
                    to: a,
                    airway: ident.clone(),
                    distance_m,
                });
            }
        }
        Self { edges }
    }

    pub fn is_connected(&self, node: usize) -> bool {
        self.edges.get(node).is_some_and(|edges| !edges.is_empty())
    }

    /// Dijkstra from every source at once; the best target wins once its
    /// own trailing cost is added.
    fn search(&self, fixes: &FixIndex, sources: &[Terminal], targets: &[Terminal]) -> Option<Route> {
        let count = self.edges.len();
        let mut best = vec![f64::INFINITY; count];
        let mut came_from: Vec<Option<(usize, usize)>> = vec![None; count];
        let mut root: Vec<usize> = vec![0; count];
        let mut open_set: BinaryHeap<Reverse<OpenNode>> = BinaryHeap::new();

        for (index, source) in sources.iter().enumerate() {
            if source.cost_m < best[source.node] {
                best[source.node] = source.cost_m;
                root[source.node] = index;
                open_set.push(Reverse(OpenNode {
                    cost: FloatOrd(source.cost_m),
                    node: source.node,
                }));
            }
        }

        while let Some(Reverse(current)) = open_set.pop() {
            if current.cost.0 > best[current.node] + 1e-9 {
                continue;
            }
            for (edge_index, edge) in self.edges[current.node].iter().enumerate() {
                let cost = current.cost.0 + edge.distance_m;
                if cost < best[edge.to] {
                    best[edge.to] = cost;
                    came_from[edge.to] = Some((current.node, edge_index));
                    root[edge.to] = root[current.node];
                    open_set.push(Reverse(OpenNode {
                        cost: FloatOrd(cost),
                        node: edge.to,
                    }));
                }
            }
        }

        let target = targets
            .iter()
            .filter(|t| best[t.node].is_finite())
            .min_by(|a, b| (best[a.node] + a.cost_m).total_cmp(&(best[b.node] + b.cost_m)))?;

        let mut chain = vec![target.node];
        let mut labels = Vec::new();
        let mut current = target.node;
        while let Some((previous, edge_index)) = came_from[current] {
            labels.push(self.edges[previous][edge_index].airway.clone());
            chain.push(previous);
            current = previous;
        }
        chain.reverse();
        labels.reverse();

        let mut network = Route::from_waypoint(fixes.get(chain[0]).clone());
        for (node, airway) in chain[1..].iter().zip(labels) {
            network.push_back(fixes.get(*node).clone(), Via::Airway(airway));
        }

        let mut route = sources[root[chain[0]]].route.clone();
        route.merge(network);
        route.merge(target.route.clone());
        Some(route)
    }
}

impl NavData {
    fn fix_terminal(&self, waypoint: &Waypoint) -> Option<Terminal> {
        let node = self.fixes().locate(waypoint)?;
        Some(Terminal {
            node,
            cost_m: 0.0,
            route: Route::from_waypoint(self.fixes().get(node).clone()),
        })
    }

    /// Fix on the airway network closest to `position`.
    fn nearest_connected(&self, position: LatLon) -> Option<usize> {
        (0..self.fixes().len())
            .filter(|&node| self.graph.is_connected(node))
            .min_by(|&a, &b| {
                let da = position.distance_m(&self.fixes().get(a).position());
                let db = position.distance_m(&self.fixes().get(b).position());
                da.total_cmp(&db)
            })
    }

    /// One terminal per usable procedure, or a direct link to the closest
    /// network fix when the runway has none.
    fn runway_terminals(&self, endpoint: &RunwayEndpoint<'_>, departing: bool) -> Vec<Terminal> {
        let Ok(position) = self.runway_position(endpoint.airport, endpoint.runway) else {
            return Vec::new();
        };
        let runway = Waypoint::runway(endpoint.airport, endpoint.runway, position);
        let table = if departing {
            self.departures()
        } else {
            self.arrivals()
        };

        let mut terminals: Vec<Terminal> = endpoint
            .procedures
            .iter()
            .filter_map(|name| table.find(endpoint.airport, name, endpoint.runway))
            .filter_map(|procedure| {
                let node = if departing {
                    *procedure.fixes.last()?
                } else {
                    *procedure.fixes.first()?
                };
                let route = table.procedure_route(procedure, &runway);
                Some(Terminal {
                    node,
                    cost_m: route.total_distance_m(),
                    route,
                })
            })
            .collect();

        if terminals.is_empty() {
            if let Some(node) = self.nearest_connected(position) {
                let fix = self.fixes().get(node).clone();
                let mut route = Route::from_waypoint(runway);
                if departing {
                    route.push_back(fix, Via::Direct);
                } else {
                    route.push_front(fix, Via::Direct);
                }
                terminals.push(Terminal {
                    node,
                    cost_m: route.total_distance_m(),
                    route,
                });
            }
        }
        terminals
    }
}

impl Pathfinder for NavData {
    fn find_path(&self, from: &Waypoint, to: &Waypoint) -> Option<Route> {
        let source = self.fix_terminal(from)?;
        let target = self.fix_terminal(to)?;
        self.graph.search(self.fixes(), &[source], &[target])
    }

    fn find_path_from_origin(&self, origin: &RunwayEndpoint<'_>, to: &Waypoint) -> Option<Route> {
        let sources = self.runway_terminals(origin, true);
        let target = self.fix_terminal(to)?;
        self.graph.search(self.fixes(), &sources, &[target])
    }

    fn find_path_to_destination(
        &self,
        from: &Waypoint,
        destination: &RunwayEndpoint<'_>,
    ) -> Option<Route> {
        let source = self.fix_terminal(from)?;
        let targets = self.runway_terminals(destination, false);
        self.graph.search(self.fixes(), &[source], &targets)
    }

    fn find_full_path(
        &self,
        origin: &RunwayEndpoint<'_>,
        destination: &RunwayEndpoint<'_>,
    ) -> Option<Route> {
        let sources = self.runway_terminals(origin, true);
        let targets = self.runway_terminals(destination, false);
        self.graph.search(self.fixes(), &sources, &targets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Two ways from ALPHA to DELTA: the short one along J1, the long one
    // around the loop on J2.
    const NAV: &str = r#"{
        "waypoints": [
            {"ident": "ALPHA", "lat": 40.0, "lon": -79.0},
            {"ident": "BRAVO", "lat": 40.0, "lon": -78.0},
            {"ident": "DELTA", "lat": 40.0, "lon": -77.0},
            {"ident": "LOOPY", "lat": 42.0, "lon": -78.0},
            {"ident": "ISLND", "lat": 30.0, "lon": -60.0}
        ],
        "airways": [
            {"ident": "J1", "fixes": ["ALPHA", "BRAVO", "DELTA"]},
            {"ident": "J2", "fixes": ["ALPHA", "LOOPY", "DELTA"]}
        ],
        "airports": [
            {"icao": "KAAA", "runways": [{"ident": "09", "lat": 40.0, "lon": -80.0}]},
            {"icao": "KDDD", "runways": [{"ident": "27", "lat": 40.0, "lon": -76.0}]}
        ],
        "sids": [{"airport": "KAAA", "name": "AAA1", "runways": ["09"], "fixes": ["ALPHA"]}]
    }"#;

    fn nav() -> NavData {
        NavData::from_json(NAV).unwrap()
    }

    fn fix(nav: &NavData, ident: &str) -> Waypoint {
        let index = nav.fixes().nearest(ident, None).unwrap();
        nav.fixes().get(index).clone()
    }

    #[test]
    fn shortest_airway_path_is_chosen() {
        let nav = nav();
        let route = nav.find_path(&fix(&nav, "ALPHA"), &fix(&nav, "DELTA")).unwrap();
        assert_eq!(route.to_string(), "ALPHA J1 DELTA");
        assert_eq!(route.idents(), vec!["ALPHA", "BRAVO", "DELTA"]);
    }

    #[test]
    fn disconnected_fix_has_no_path() {
        let nav = nav();
        assert!(nav.find_path(&fix(&nav, "ALPHA"), &fix(&nav, "ISLND")).is_none());
    }

    #[test]
    fn origin_path_threads_the_departure_procedure() {
        let nav = nav();
        let procedures = vec!["AAA1".to_string()];
        let origin = RunwayEndpoint {
            airport: "KAAA",
            runway: "09",
            procedures: &procedures,
        };

        let route = nav
            .find_path_from_origin(&origin, &fix(&nav, "DELTA"))
            .unwrap();
        assert_eq!(route.to_string(), "KAAA09 AAA1 ALPHA J1 DELTA");
    }

    #[test]
    fn runway_without_procedures_joins_nearest_fix_direct() {
        let nav = nav();
        let origin = RunwayEndpoint {
            airport: "KAAA",
            runway: "09",
            procedures: &[],
        };
        let destination = RunwayEndpoint {
            airport: "KDDD",
            runway: "27",
            procedures: &[],
        };

        let route = nav.find_full_path(&origin, &destination).unwrap();
        assert_eq!(route.to_string(), "KAAA09 DCT ALPHA J1 DELTA DCT KDDD27");
    }
}
