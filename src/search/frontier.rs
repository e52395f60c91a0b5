//! Frontier selection: which open city gets expanded next.

use super::state::{StateArena, StateId};

/// Pick the open city with the smallest total estimate.
///
/// Ties resolve to the earliest-discovered candidate: the scan keeps the
/// first minimum it finds, which makes expansion order deterministic for a
/// fixed map and configuration. Returns `None` only for an empty open set.
pub fn select_best(open: &[StateId], arena: &StateArena) -> Option<StateId> {
    let mut best: Option<(StateId, f64)> = None;
    for &id in open {
        let estimate = arena.get(id).total_estimate();
        match best {
            None => best = Some((id, estimate)),
            Some((_, minimal)) if estimate < minimal => best = Some((id, estimate)),
            Some(_) => {}
        }
    }
    best.map(|(id, _)| id)
}

// ─── Tests ───────────────────────────────────────────────────────────────────
