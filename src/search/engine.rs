//! The best-first search loop.
//!
//! One engine runs one search: it owns the arena and the open set, consumes
//! the map read-only, reports progress through an observer, and suspends at
//! pacing gates. All state mutation happens on the thread calling `run`.

use thiserror::Error;

use crate::map::{distance, path_length, CityMap, MapError};
use crate::types::{City, Coordinates, Heuristic, Pace, ValidationError};

use super::events::{SearchEvent, SearchObserver};
use super::frontier::select_best;
use super::pacing::Pacer;
use super::state::{CityInfo, StateArena, StateId};

/// Everything fixed for the duration of one search.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub start: City,
    pub goal: City,
    pub heuristic: Heuristic,
    pub pace: Pace,
}

/// The search hit state it cannot continue from. Distinct from both a
/// no-path outcome and cancellation: a fault means the map and the search
/// bookkeeping disagree, and the loop aborts rather than continue on
/// corrupted state.
#[derive(Debug, Error)]
pub enum SearchFault {
    #[error(transparent)]
    Map(#[from] MapError),

    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

/// How a search ended.
#[derive(Debug, Clone, PartialEq)]
pub enum Termination {
    /// `path` runs start to goal; `length` is its Euclidean length.
    PathFound { path: Vec<City>, length: f64 },
    /// The goal is unreachable. A normal outcome, not an error.
    NoPath,
    /// The controller abandoned the search; no result either way.
    Cancelled,
}

/// Single-search state machine: `Idle` on construction, `Running` inside
/// `run`, terminal on return.
pub struct SearchEngine<'a> {
    map: &'a CityMap,
    config: SearchConfig,
    arena: StateArena,
    /// Discovered, not yet expanded. Holds arena ids in discovery order.
    open: Vec<StateId>,
    /// Cost-from-start of the goal once discovered; the early-exit bound.
    goal_cost: Option<f64>,
}

impl<'a> SearchEngine<'a> {
    pub fn new(map: &'a CityMap, config: SearchConfig) -> Self {
        Self {
            map,
            config,
            arena: StateArena::new(),
            open: Vec::new(),
            goal_cost: None,
        }
    }

    /// Run the search to a terminal outcome.
    ///
    /// Blocks at pacing gates; a cancellation observed there abandons the
    /// run. A lookup failure during expansion aborts with a fault.
    pub fn run(
        &mut self,
        pacer: &Pacer,
        observer: &mut dyn SearchObserver,
    ) -> Result<Termination, SearchFault> {
        let start = self.config.start.clone();
        let goal = self.config.goal.clone();

        tracing::info!(%start, %goal, heuristic = ?self.config.heuristic, "search started");
        observer.on_event(&SearchEvent::Started {
            start: start.clone(),
            goal: goal.clone(),
            heuristic: self.config.heuristic,
        });

        let start_coords = self.map.coordinates_of(&start)?;
        let goal_coords = self.map.coordinates_of(&goal)?;
        let start_info = CityInfo::new(
            start.clone(),
            None,
            goal.clone(),
            start_coords,
            None,
            goal_coords,
            0.0,
            self.config.heuristic,
        )?;
        let start_id = self.arena.insert(start_info);
        self.open.push(start_id);

        while !self.open.is_empty() {
            observer.on_event(&self.frontier_snapshot());

            if pacer.gate().is_err() {
                return self.abandon(observer);
            }

            let Some(best_id) = select_best(&self.open, &self.arena) else {
                break;
            };

            // Once the goal is known at cost D, no frontier entry whose
            // estimate already reaches D can lead to a better path. With the
            // Hops heuristic the constant-1 estimate can overestimate, so
            // this cutoff may keep a sub-optimal path there; kept as-is.
            if let Some(bound) = self.goal_cost {
                if self.arena.get(best_id).total_estimate() >= bound {
                    break;
                }
            }

            let best_city = self.arena.get(best_id).city().clone();
            let best_coords = self.arena.get(best_id).coordinates();
            let best_cost = self.arena.get(best_id).cost_from_start();

            tracing::debug!(city = %best_city, cost = best_cost, "expanding");
            observer.on_event(&SearchEvent::BestSelected {
                city: best_city.clone(),
                cost_from_start: best_cost,
                total_estimate: self.arena.get(best_id).total_estimate(),
            });

            let successors = self.map.successors(&best_city);
            observer.on_event(&SearchEvent::EdgesChecked {
                from: best_city.clone(),
                to: successors.clone(),
            });

            if pacer.gate().is_err() {
                return self.abandon(observer);
            }

            for next in successors {
                self.relax(&best_city, best_coords, best_cost, next, &goal_coords, observer)?;
            }

            if pacer.gate().is_err() {
                return self.abandon(observer);
            }

            self.arena.get_mut(best_id).mark_explored();
            self.open.retain(|&id| id != best_id);
            observer.on_event(&SearchEvent::CityExplored { city: best_city });
        }

        if self.arena.contains(&goal) {
            let path = self.reconstruct(&goal)?;
            let length = path_length(&path, self.map)?;
            tracing::info!(hops = path.len(), length, "path found");
            observer.on_event(&SearchEvent::PathFound {
                path: path.clone(),
                length,
            });
            observer.on_event(&SearchEvent::Ended);
            Ok(Termination::PathFound { path, length })
        } else {
            tracing::info!("no path between start and goal");
            observer.on_event(&SearchEvent::NoPath);
            observer.on_event(&SearchEvent::Ended);
            Ok(Termination::NoPath)
        }
    }

    /// Examine one connection of the city under expansion.
    fn relax(
        &mut self,
        from: &City,
        from_coords: Coordinates,
        from_cost: f64,
        next: City,
        goal_coords: &Coordinates,
        observer: &mut dyn SearchObserver,
    ) -> Result<(), SearchFault> {
        // Every map lookup during expansion is fallible and handled; a miss
        // here means the adjacency and location tables disagree.
        let next_coords = self.map.coordinates_of(&next)?;
        let edge_cost = match self.config.heuristic {
            Heuristic::Distance => distance(from_coords, next_coords),
            Heuristic::Hops => 1.0,
        };
        let candidate = from_cost + edge_cost;
        let is_goal = next == self.config.goal;

        match self.arena.id_of(&next) {
            Some(id) => {
                let known = self.arena.get(id).cost_from_start();
                if candidate < known {
                    let info = self.arena.get_mut(id);
                    info.set_prev(from.clone(), from_coords);
                    info.set_cost_from_start(candidate)?;
                    if is_goal {
                        self.goal_cost = Some(candidate);
                    }
                    observer.on_event(&SearchEvent::CityUpdated {
                        city: next,
                        old_cost: known,
                        new_cost: candidate,
                    });
                } else {
                    observer.on_event(&SearchEvent::CityRejected {
                        city: next,
                        offered_cost: candidate,
                        kept_cost: known,
                    });
                }
            }
            None => {
                let info = CityInfo::new(
                    next.clone(),
                    Some(from.clone()),
                    self.config.goal.clone(),
                    next_coords,
                    Some(from_coords),
                    *goal_coords,
                    candidate,
                    self.config.heuristic,
                )?;
                let total_estimate = info.total_estimate();
                let id = self.arena.insert(info);
                self.open.push(id);
                if is_goal {
                    self.goal_cost = Some(candidate);
                }
                observer.on_event(&SearchEvent::CityAdded {
                    city: next,
                    cost_from_start: candidate,
                    total_estimate,
                });
            }
        }
        Ok(())
    }

    /// Walk predecessor links goal → start, then reverse.
    fn reconstruct(&self, goal: &City) -> Result<Vec<City>, SearchFault> {
        let mut path = Vec::new();
        let mut cursor = Some(goal.clone());
        while let Some(city) = cursor {
            let id = self
                .arena
                .id_of(&city)
                .ok_or_else(|| MapError::UnknownCity(city.clone()))?;
            path.push(city);
            cursor = self.arena.get(id).prev().cloned();
        }
        path.reverse();
        Ok(path)
    }

    fn frontier_snapshot(&self) -> SearchEvent {
        SearchEvent::Frontier {
            found: self.arena.iter().map(|info| info.city().clone()).collect(),
            open: self
                .open
                .iter()
                .map(|&id| self.arena.get(id).city().clone())
                .collect(),
        }
    }

    /// The found and open sets are discarded untouched; no outcome either way.
    fn abandon(&self, observer: &mut dyn SearchObserver) -> Result<Termination, SearchFault> {
        tracing::info!("search cancelled");
        observer.on_event(&SearchEvent::Ended);
        Ok(Termination::Cancelled)
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
