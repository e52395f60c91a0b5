//! Runs a search on a dedicated worker thread.
//!
//! The worker owns all mutable search state; the caller keeps a
//! `SearchHandle` for pacing, cancellation, and the event stream. The map is
//! shared read-only through an `Arc`, so a renderer may keep reading it while
//! the search runs.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;

use crossbeam_channel::Receiver;

use crate::map::CityMap;

use super::engine::{SearchConfig, SearchEngine, SearchFault, Termination};
use super::events::SearchEvent;
use super::pacing::{pace_channel, PaceController};

/// Control surface for one in-flight search.
pub struct SearchHandle {
    controller: PaceController,
    running: Arc<AtomicBool>,
    events: Receiver<SearchEvent>,
    worker: Option<JoinHandle<Result<Termination, SearchFault>>>,
}

/// Start a search on its own worker thread.
pub fn spawn_search(map: Arc<CityMap>, config: SearchConfig) -> SearchHandle {
    let (controller, pacer) = pace_channel(config.pace);
    let (event_tx, event_rx) = crossbeam_channel::unbounded();
    let running = Arc::new(AtomicBool::new(true));

    let worker_running = Arc::clone(&running);
    let worker = std::thread::spawn(move || {
        let mut observer = event_tx;
        let mut engine = SearchEngine::new(&map, config);
        let result = engine.run(&pacer, &mut observer);
        worker_running.store(false, Ordering::Release);
        result
    });

    SearchHandle {
        controller,
        running,
        events: event_rx,
        worker: Some(worker),
    }
}

impl SearchHandle {
    /// Whether the worker is still inside the search loop.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Grant one advance permit. A no-op unless the search was configured
    /// with `Pace::Steps`.
    pub fn advance_one_step(&self) {
        self.controller.advance_one_step();
    }

    /// Ask the worker to abandon the search at its next gate.
    pub fn request_cancel(&self) {
        self.controller.request_cancel();
    }

    /// The event stream. Disconnects once the worker finishes.
    pub fn events(&self) -> &Receiver<SearchEvent> {
        &self.events
    }

    /// A clone of the pacing controller, for a separate signalling thread.
    pub fn controller(&self) -> PaceController {
        self.controller.clone()
    }

    /// Wait for the worker and return how the search ended.
    pub fn join(mut self) -> Result<Termination, SearchFault> {
        // Taken exactly once; Drop sees None afterwards.
        let worker = self.worker.take().expect("worker already joined");
        match worker.join() {
            Ok(result) => result,
            Err(panic) => std::panic::resume_unwind(panic),
        }
    }
}

impl Drop for SearchHandle {
    fn drop(&mut self) {
        // An abandoned handle must not leave the worker gated forever.
        if self.worker.is_some() {
            self.controller.request_cancel();
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
