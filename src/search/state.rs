//! Per-city search bookkeeping.
//!
//! One `CityInfo` exists per discovered city and lives in a `StateArena` for
//! the duration of a search. The open and found sets hold arena ids, so an
//! in-place update is visible through both without aliased ownership.

use std::collections::HashMap;

use crate::map::distance;
use crate::types::{City, Coordinates, Heuristic, ValidationError};

/// Index of a `CityInfo` inside the arena.
pub type StateId = usize;

/// Search bookkeeping for one discovered city.
#[derive(Debug, Clone)]
pub struct CityInfo {
    city: City,
    prev: Option<City>,
    goal: City,

    city_coords: Coordinates,
    prev_coords: Option<Coordinates>,
    goal_coords: Coordinates,

    cost_from_start: f64,
    /// Estimated remaining cost. Computed on first use, then cached.
    to_goal: Option<f64>,
    total_estimate: f64,

    explored: bool,
    heuristic: Heuristic,
}

impl CityInfo {
    /// Create the record for a freshly discovered city.
    ///
    /// `prev` is `None` only for the start city. `cost_from_start` must be
    /// non-negative; the total estimate is derived immediately.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        city: City,
        prev: Option<City>,
        goal: City,
        city_coords: Coordinates,
        prev_coords: Option<Coordinates>,
        goal_coords: Coordinates,
        cost_from_start: f64,
        heuristic: Heuristic,
    ) -> Result<Self, ValidationError> {
        if cost_from_start < 0.0 {
            return Err(ValidationError::NegativeCost {
                value: cost_from_start,
            });
        }
        let mut info = Self {
            city,
            prev,
            goal,
            city_coords,
            prev_coords,
            goal_coords,
            cost_from_start,
            to_goal: None,
            total_estimate: 0.0,
            explored: false,
            heuristic,
        };
        info.total_estimate = info.cost_from_start + info.to_goal();
        Ok(info)
    }

    pub fn city(&self) -> &City {
        &self.city
    }

    pub fn prev(&self) -> Option<&City> {
        self.prev.as_ref()
    }

    pub fn goal(&self) -> &City {
        &self.goal
    }

    pub fn coordinates(&self) -> Coordinates {
        self.city_coords
    }

    pub fn prev_coordinates(&self) -> Option<Coordinates> {
        self.prev_coords
    }

    pub fn cost_from_start(&self) -> f64 {
        self.cost_from_start
    }

    pub fn total_estimate(&self) -> f64 {
        self.total_estimate
    }

    pub fn is_explored(&self) -> bool {
        self.explored
    }

    pub fn mark_explored(&mut self) {
        self.explored = true;
    }

    /// Remaining-cost estimate for this city under the configured heuristic.
    pub fn to_goal(&mut self) -> f64 {
        if let Some(cached) = self.to_goal {
            return cached;
        }
        let value = match self.heuristic {
            Heuristic::Distance => distance(self.city_coords, self.goal_coords),
            Heuristic::Hops => 1.0,
        };
        self.to_goal = Some(value);
        value
    }

    /// Record that a cheaper path reaches this city through `prev`.
    pub fn set_prev(&mut self, prev: City, prev_coords: Coordinates) {
        self.prev = Some(prev);
        self.prev_coords = Some(prev_coords);
    }

    /// Lower the cost from start, recomputing the total estimate.
    ///
    /// Negative values and raises are rejected; the state stays unchanged.
    pub fn set_cost_from_start(&mut self, value: f64) -> Result<(), ValidationError> {
        if value < 0.0 {
            return Err(ValidationError::NegativeCost { value });
        }
        if value > self.cost_from_start {
            return Err(ValidationError::RaisedCost {
                current: self.cost_from_start,
                offered: value,
            });
        }
        self.cost_from_start = value;
        self.total_estimate = value + self.to_goal();
        Ok(())
    }
}

/// Owns every `CityInfo` discovered during one search, indexed by city.
///
/// Records are never removed; the whole arena is dropped when the search
/// ends. Iteration follows discovery order.
#[derive(Debug, Default)]
pub struct StateArena {
    states: Vec<CityInfo>,
    index: HashMap<City, StateId>,
}

impl StateArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record for a not-yet-discovered city, returning its id.
    ///
    /// Callers check `id_of` first; a second insert for the same city keeps
    /// the original record and returns its id.
    pub fn insert(&mut self, info: CityInfo) -> StateId {
        if let Some(&id) = self.index.get(info.city()) {
            return id;
        }
        let id = self.states.len();
        self.index.insert(info.city().clone(), id);
        self.states.push(info);
        id
    }

    pub fn id_of(&self, city: &City) -> Option<StateId> {
        self.index.get(city).copied()
    }

    pub fn contains(&self, city: &City) -> bool {
        self.index.contains_key(city)
    }

    pub fn get(&self, id: StateId) -> &CityInfo {
        &self.states[id]
    }

    pub fn get_mut(&mut self, id: StateId) -> &mut CityInfo {
        &mut self.states[id]
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// All records in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = &CityInfo> {
        self.states.iter()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
