//! The city map: named nodes with coordinates and directed connections.
//!
//! Wraps a petgraph `DiGraph` plus a `HashMap<City, NodeIndex>` for O(1) node
//! lookup by name, alongside the coordinate table. The map is built once per
//! search session and never mutated while a search runs.

use std::collections::HashMap;

use petgraph::graph::{DiGraph, NodeIndex};
use thiserror::Error;

use crate::types::{City, Coordinates};

/// Failed lookup into the map. A missing city is always surfaced, never
/// treated as "coordinates (0, 0)" or "no connections".
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MapError {
    #[error("city '{0}' has no known coordinates")]
    UnknownCity(City),

    #[error("connection references city '{to}' (from '{from}') with no known coordinates")]
    UnknownConnection { from: City, to: City },
}

/// Directed map of cities. Immutable during a search.
#[derive(Debug, Clone)]
pub struct CityMap {
    digraph: DiGraph<City, ()>,
    /// Maps city → petgraph NodeIndex.
    node_index: HashMap<City, NodeIndex>,
    locations: HashMap<City, Coordinates>,
}

impl CityMap {
    pub fn new() -> Self {
        Self {
            digraph: DiGraph::new(),
            node_index: HashMap::new(),
            locations: HashMap::new(),
        }
    }

    /// Build a map from the two independent tables the loader produces.
    ///
    /// Every city referenced as a connection target must appear in the
    /// locations table; a dangling reference is reported, not dropped.
    /// Within one city, connection order is preserved.
    pub fn from_parts(
        locations: HashMap<City, Coordinates>,
        connections: HashMap<City, Vec<City>>,
    ) -> Result<Self, MapError> {
        let mut map = Self::new();
        for (city, coords) in locations {
            map.insert_city(city, coords);
        }
        for (from, successors) in connections {
            if !map.node_index.contains_key(&from) {
                return Err(MapError::UnknownCity(from));
            }
            for to in successors {
                map.connect(&from, &to)?;
            }
        }
        Ok(map)
    }

    fn insert_city(&mut self, city: City, coords: Coordinates) {
        if self.node_index.contains_key(&city) {
            self.locations.insert(city, coords);
            return;
        }
        let idx = self.digraph.add_node(city.clone());
        self.node_index.insert(city.clone(), idx);
        self.locations.insert(city, coords);
    }

    fn connect(&mut self, from: &City, to: &City) -> Result<(), MapError> {
        let from_idx = self.node_index[from];
        let to_idx = *self
            .node_index
            .get(to)
            .ok_or_else(|| MapError::UnknownConnection {
                from: from.clone(),
                to: to.clone(),
            })?;
        self.digraph.add_edge(from_idx, to_idx, ());
        Ok(())
    }

    /// Coordinates of `city`, or an error if the map has never heard of it.
    pub fn coordinates_of(&self, city: &City) -> Result<Coordinates, MapError> {
        self.locations
            .get(city)
            .copied()
            .ok_or_else(|| MapError::UnknownCity(city.clone()))
    }

    /// Cities directly reachable from `city`, in connection-file order.
    ///
    /// A city with no outgoing connections (or absent from the map) yields an
    /// empty list; absence is only an error for coordinate lookups.
    pub fn successors(&self, city: &City) -> Vec<City> {
        match self.node_index.get(city) {
            None => vec![],
            Some(&idx) => {
                // petgraph iterates neighbors most-recently-added first;
                // reverse to restore insertion order.
                let mut result: Vec<City> = self
                    .digraph
                    .neighbors(idx)
                    .map(|n| self.digraph[n].clone())
                    .collect();
                result.reverse();
                result
            }
        }
    }

    pub fn contains(&self, city: &City) -> bool {
        self.node_index.contains_key(city)
    }

    /// All cities, sorted by name.
    pub fn cities(&self) -> Vec<City> {
        let mut cities: Vec<City> = self.node_index.keys().cloned().collect();
        cities.sort();
        cities
    }

    pub fn city_count(&self) -> usize {
        self.digraph.node_count()
    }

    pub fn connection_count(&self) -> usize {
        self.digraph.edge_count()
    }
}

impl Default for CityMap {
    fn default() -> Self {
        Self::new()
    }
}

/// Euclidean distance between two points.
pub fn distance(a: Coordinates, b: Coordinates) -> f64 {
    let dx = f64::from(a.x() - b.x());
    let dy = f64::from(a.y() - b.y());
    (dx * dx + dy * dy).sqrt()
}

/// Euclidean length of a path through `cities`. A path of fewer than two
/// cities has length zero.
pub fn path_length(cities: &[City], map: &CityMap) -> Result<f64, MapError> {
    let mut total = 0.0;
    for pair in cities.windows(2) {
        let from = map.coordinates_of(&pair[0])?;
        let to = map.coordinates_of(&pair[1])?;
        total += distance(from, to);
    }
    Ok(total)
}

// ─── Tests ───────────────────────────────────────────────────────────────────
