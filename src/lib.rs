//! path-finder — step-wise A* path finding over named city maps.
//!
//! A map is a set of named cities with coordinates in `[0, 800]²` and
//! directed connections, loaded from a pair of plain-text files. One search
//! explores the map best-first from a start city towards a goal city,
//! reporting every internal step as an observation event, paced either at
//! full speed, at a fixed delay, or one externally-granted step at a time.
//!
//! ```no_run
//! use std::sync::Arc;
//! use path_finder::{load_map, spawn_search, Heuristic, Pace, SearchConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let map = Arc::new(load_map(
//!     "locations.txt".as_ref(),
//!     "connections.txt".as_ref(),
//! )?);
//! let handle = spawn_search(
//!     Arc::clone(&map),
//!     SearchConfig {
//!         start: path_finder::City::new("Helsinki")?,
//!         goal: path_finder::City::new("Utsjoki")?,
//!         heuristic: Heuristic::Distance,
//!         pace: Pace::Fast,
//!     },
//! );
//! for event in handle.events().iter() {
//!     println!("{event:?}");
//! }
//! println!("{:?}", handle.join()?);
//! # Ok(())
//! # }
//! ```

pub mod loader;
pub mod map;
pub mod narrate;
pub mod search;
pub mod types;

pub use loader::{load_map, LoadError};
pub use map::{distance, path_length, CityMap, MapError};
pub use narrate::Narrator;
pub use search::{
    spawn_search, SearchConfig, SearchEngine, SearchEvent, SearchFault, SearchHandle, Termination,
};
pub use types::{City, Coordinates, Heuristic, Pace, ValidationError};
