//! The best-first search: per-city state, frontier selection, the step loop,
//! pacing, and the threaded runner.

pub mod engine;
pub mod events;
pub mod frontier;
pub mod pacing;
pub mod runner;
pub mod state;

pub use engine::{SearchConfig, SearchEngine, SearchFault, Termination};
pub use events::{NullObserver, SearchEvent, SearchObserver};
pub use pacing::{pace_channel, Cancelled, PaceController, Pacer, SLOW_STEP_DELAY};
pub use runner::{spawn_search, SearchHandle};
