//! Observation events emitted while a search runs.
//!
//! Every payload is a copy-on-emit snapshot; an observer never sees live
//! engine state and cannot influence control decisions.

use crossbeam_channel::Sender;

use crate::types::{City, Heuristic};

/// One engine-internal happening, reported as it occurs.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchEvent {
    /// The search was configured and is about to run.
    Started {
        start: City,
        goal: City,
        heuristic: Heuristic,
    },
    /// Snapshot of the found and open sets at the top of an iteration.
    Frontier { found: Vec<City>, open: Vec<City> },
    /// The frontier city chosen for expansion.
    BestSelected {
        city: City,
        cost_from_start: f64,
        total_estimate: f64,
    },
    /// The outgoing connections about to be examined.
    EdgesChecked { from: City, to: Vec<City> },
    /// A city was discovered for the first time.
    CityAdded {
        city: City,
        cost_from_start: f64,
        total_estimate: f64,
    },
    /// A cheaper path to an already-discovered city was recorded.
    CityUpdated {
        city: City,
        old_cost: f64,
        new_cost: f64,
    },
    /// A candidate path was not better than the known one.
    CityRejected {
        city: City,
        offered_cost: f64,
        kept_cost: f64,
    },
    /// The expanded city left the open set.
    CityExplored { city: City },
    /// The goal was reached; `path` runs start to goal.
    PathFound { path: Vec<City>, length: f64 },
    /// The open set emptied without the goal ever being discovered.
    NoPath,
    /// The engine stopped, for any reason including cancellation.
    Ended,
}

/// Sink for search events.
///
/// Observers must be non-blocking or offload their own slow work; the engine
/// emits each event exactly once and never retries delivery.
pub trait SearchObserver: Send {
    fn on_event(&mut self, event: &SearchEvent);
}

/// Discards everything. Useful for headless runs and tests.
#[derive(Debug, Default)]
pub struct NullObserver;

impl SearchObserver for NullObserver {
    fn on_event(&mut self, _event: &SearchEvent) {}
}

/// Forwards events over a channel; a disconnected receiver drops them.
impl SearchObserver for Sender<SearchEvent> {
    fn on_event(&mut self, event: &SearchEvent) {
        let _ = self.send(event.clone());
    }
}

/// Collects events into a vector. Intended for tests and replay.
impl SearchObserver for Vec<SearchEvent> {
    fn on_event(&mut self, event: &SearchEvent) {
        self.push(event.clone());
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
