//! Pacing and cancellation between semantic search steps.
//!
//! The worker suspends at gate points according to the configured pace. The
//! controlling side holds a `PaceController` and communicates through two
//! channels: a bounded(1) advance-permit channel (one permit, one step; a
//! permit sent while one is pending is dropped) and a cancel channel. All
//! waits block on channel operations, there is no polling loop.

use std::time::Duration;

use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender, TryRecvError};

use crate::types::Pace;

/// Suspension interval per gate under `Pace::Slow`.
pub const SLOW_STEP_DELAY: Duration = Duration::from_millis(500);

/// The search was abandoned by the controller. Not an error and not a search
/// outcome: a cancelled run reports neither a path nor its absence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cancelled;

/// Worker-side gate. Owned and polled only by the search worker.
pub struct Pacer {
    pace: Pace,
    advance_rx: Receiver<()>,
    cancel_rx: Receiver<()>,
}

/// Controller-side handle. Cloneable; dropping every clone cancels the
/// worker at its next gate.
#[derive(Debug, Clone)]
pub struct PaceController {
    advance_tx: Sender<()>,
    cancel_tx: Sender<()>,
}

/// Create a connected controller/pacer pair for one search.
pub fn pace_channel(pace: Pace) -> (PaceController, Pacer) {
    let (advance_tx, advance_rx) = bounded(1);
    let (cancel_tx, cancel_rx) = bounded(1);
    (
        PaceController {
            advance_tx,
            cancel_tx,
        },
        Pacer {
            pace,
            advance_rx,
            cancel_rx,
        },
    )
}

impl PaceController {
    /// Grant one advance permit. Meaningful only under `Pace::Steps`; in the
    /// other modes the permit is never consumed. Granting while a permit is
    /// already pending is a no-op, so repeated signals advance one step each
    /// at most.
    pub fn advance_one_step(&self) {
        let _ = self.advance_tx.try_send(());
    }

    /// Ask the worker to stop at its next gate or iteration boundary.
    pub fn request_cancel(&self) {
        let _ = self.cancel_tx.try_send(());
    }
}

impl Pacer {
    pub fn pace(&self) -> Pace {
        self.pace
    }

    /// Suspend per the configured pace. Returns `Err(Cancelled)` once a
    /// cancellation request (or a fully dropped controller) is observed.
    pub fn gate(&self) -> Result<(), Cancelled> {
        match self.pace {
            Pace::Fast => match self.cancel_rx.try_recv() {
                Ok(()) => Err(Cancelled),
                Err(TryRecvError::Disconnected) => Err(Cancelled),
                Err(TryRecvError::Empty) => Ok(()),
            },
            Pace::Slow => match self.cancel_rx.recv_timeout(SLOW_STEP_DELAY) {
                Ok(()) => Err(Cancelled),
                Err(RecvTimeoutError::Disconnected) => Err(Cancelled),
                Err(RecvTimeoutError::Timeout) => Ok(()),
            },
            Pace::Steps => crossbeam_channel::select! {
                recv(self.advance_rx) -> permit => match permit {
                    Ok(()) => Ok(()),
                    Err(_) => Err(Cancelled),
                },
                recv(self.cancel_rx) -> _ => Err(Cancelled),
            },
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Instant;

    #[test]
    fn test_fast_gate_never_blocks() {
        let (_controller, pacer) = pace_channel(Pace::Fast);
        let started = Instant::now();
        for _ in 0..100 {
            pacer.gate().unwrap();
        }
        assert!(started.elapsed() < SLOW_STEP_DELAY);
    }

    #[test]
    fn test_fast_gate_observes_cancel() {
        let (controller, pacer) = pace_channel(Pace::Fast);
        controller.request_cancel();
        assert_eq!(pacer.gate(), Err(Cancelled));
    }

    #[test]
    fn test_slow_gate_waits_then_proceeds() {
        let (_controller, pacer) = pace_channel(Pace::Slow);
        let started = Instant::now();
        pacer.gate().unwrap();
        assert!(started.elapsed() >= SLOW_STEP_DELAY);
    }

    #[test]
    fn test_slow_gate_wakes_early_on_cancel() {
        let (controller, pacer) = pace_channel(Pace::Slow);
        controller.request_cancel();
        let started = Instant::now();
        assert_eq!(pacer.gate(), Err(Cancelled));
        assert!(started.elapsed() < SLOW_STEP_DELAY);
    }

    #[test]
    fn test_steps_gate_blocks_until_advanced() {
        let (controller, pacer) = pace_channel(Pace::Steps);
        let handle = thread::spawn(move || pacer.gate());
        thread::sleep(Duration::from_millis(50));
        controller.advance_one_step();
        assert_eq!(handle.join().unwrap(), Ok(()));
    }

    #[test]
    fn test_steps_permit_is_single_use() {
        let (controller, pacer) = pace_channel(Pace::Steps);
        controller.advance_one_step();
        pacer.gate().unwrap();

        // Second gate must block again; unblock it with a cancel.
        let handle = thread::spawn(move || pacer.gate());
        thread::sleep(Duration::from_millis(50));
        assert!(!handle.is_finished());
        controller.request_cancel();
        assert_eq!(handle.join().unwrap(), Err(Cancelled));
    }

    #[test]
    fn test_steps_repeated_advance_grants_one_permit() {
        let (controller, pacer) = pace_channel(Pace::Steps);
        controller.advance_one_step();
        controller.advance_one_step();
        controller.advance_one_step();
        pacer.gate().unwrap();

        let handle = thread::spawn(move || pacer.gate());
        thread::sleep(Duration::from_millis(50));
        // Only one permit was banked despite three signals.
        assert!(!handle.is_finished());
        controller.request_cancel();
        assert_eq!(handle.join().unwrap(), Err(Cancelled));
    }

    #[test]
    fn test_dropped_controller_cancels() {
        let (controller, pacer) = pace_channel(Pace::Steps);
        drop(controller);
        assert_eq!(pacer.gate(), Err(Cancelled));
    }
}
