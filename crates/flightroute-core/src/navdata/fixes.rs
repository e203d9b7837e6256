//! Waypoint table with identifier lookup.

use std::collections::HashMap;

use crate::models::{LatLon, Waypoint};

#[derive(Debug, Clone, Default)]
pub struct FixIndex {
    waypoints: Vec<Waypoint>,
    by_ident: HashMap<String, Vec<usize>>,
}

impl FixIndex {
    pub fn new(waypoints: Vec<Waypoint>) -> Self {
        let mut by_ident: HashMap<String, Vec<usize>> = HashMap::new();
        for (index, waypoint) in waypoints.iter().enumerate() {
            by_ident.entry(waypoint.ident.clone()).or_default().push(index);
        }
        Self {
            waypoints,
            by_ident,
        }
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    pub fn get(&self, index: usize) -> &Waypoint {
        &self.waypoints[index]
    }

    pub fn contains(&self, ident: &str) -> bool {
        self.by_ident.contains_key(ident)
    }

    /// All indices carrying `ident`.
    pub fn candidates(&self, ident: &str) -> &[usize] {
        self.by_ident.get(ident).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The instance of `ident` closest to `near`, or the first one listed
    /// when there is no reference point.
    pub fn nearest(&self, ident: &str, near: Option<LatLon>) -> Option<usize> {
        let candidates = self.candidates(ident);
        match near {
            None => candidates.first().copied(),
            Some(near) => candidates.iter().copied().min_by(|&a, &b| {
                let da = near.distance_m(&self.waypoints[a].position());
                let db = near.distance_m(&self.waypoints[b].position());
                da.total_cmp(&db)
            }),
        }
    }

    /// Index of this exact waypoint, falling back to the nearest instance of
    /// its identifier.
    pub fn locate(&self, waypoint: &Waypoint) -> Option<usize> {
        let candidates = self.candidates(&waypoint.ident);
        candidates
            .iter()
            .copied()
            .find(|&index| self.waypoints[index] == *waypoint)
            .or_else(|| self.nearest(&waypoint.ident, Some(waypoint.position())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearest_picks_closest_duplicate() {
        let index = FixIndex::new(vec![
            Waypoint::new("DUP", LatLon::new(10.0, 10.0)),
            Waypoint::new("DUP", LatLon::new(40.0, -80.0)),
            Waypoint::new("ONE", LatLon::new(0.0, 0.0)),
        ]);

        assert_eq!(index.nearest("DUP", None), Some(0));
        assert_eq!(index.nearest("DUP", Some(LatLon::new(41.0, -79.0))), Some(1));
        assert_eq!(index.nearest("NONE", None), None);
        assert_eq!(
            index.locate(&Waypoint::new("DUP", LatLon::new(40.0, -80.0))),
            Some(1)
        );
    }

    #[test]
    fn empty_index_has_no_candidates() {
        let index = FixIndex::new(Vec::new());
        assert!(index.is_empty());
        assert!(!index.contains("ALPHA"));
        assert_eq!(index.nearest("ALPHA", None), None);
    }
}
