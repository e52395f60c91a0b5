//! End-to-end scenarios: files on disk through the loader, the threaded
//! runner, and the narrator.

use std::sync::Arc;
use std::time::Duration;

use path_finder::{
    load_map, spawn_search, City, Heuristic, Narrator, Pace, SearchConfig, SearchEvent,
    Termination,
};

fn city(name: &str) -> City {
    City::new(name).unwrap()
}

fn write_map(locations: &str, connections: &str) -> (tempfile::TempDir, Arc<path_finder::CityMap>) {
    let dir = tempfile::tempdir().unwrap();
    let loc = dir.path().join("locations.txt");
    let con = dir.path().join("connections.txt");
    std::fs::write(&loc, locations).unwrap();
    std::fs::write(&con, connections).unwrap();
    let map = Arc::new(load_map(&loc, &con).unwrap());
    (dir, map)
}

fn config(from: &str, to: &str, pace: Pace) -> SearchConfig {
    SearchConfig {
        start: city(from),
        goal: city(to),
        heuristic: Heuristic::Distance,
        pace,
    }
}

#[test]
fn test_chain_path_from_files() {
    let (_dir, map) = write_map(
        "S 0 0\nM 10 0\nG 20 0\nEND\n",
        "S 1 M\nM 1 G\nEND\n",
    );
    let handle = spawn_search(map, config("S", "G", Pace::Fast));
    let outcome = handle.join().unwrap();
    assert_eq!(
        outcome,
        Termination::PathFound {
            path: vec![city("S"), city("M"), city("G")],
            length: 20.0,
        }
    );
}

#[test]
fn test_unreachable_goal_from_files() {
    // G exists on the map but nothing leads to it.
    let (_dir, map) = write_map(
        "S 0 0\nM 10 0\nG 20 0\nEND\n",
        "S 1 M\nM 1 S\nG 0\nEND\n",
    );
    let handle = spawn_search(map, config("S", "G", Pace::Fast));
    assert_eq!(handle.join().unwrap(), Termination::NoPath);
}

#[test]
fn test_narrated_run_produces_full_commentary() {
    let (_dir, map) = write_map(
        "S 0 0\nM 10 0\nG 20 0\nEND\n",
        "S 1 M\nM 1 G\nEND\n",
    );
    let handle = spawn_search(map, config("S", "G", Pace::Fast));

    let mut narrator = Narrator::new(Vec::new());
    for event in handle.events().iter() {
        narrator.narrate(&event);
    }
    handle.join().unwrap();

    let text = String::from_utf8(narrator.into_inner()).unwrap();
    assert!(text.contains("Searching for a path: S -> G"));
    assert!(text.contains("Next best city: S"));
    assert!(text.contains("Optimal path: S -> M -> G"));
    assert!(text.contains("Total length: 20.00"));
}

#[test]
fn test_step_gated_run_to_completion() {
    let (_dir, map) = write_map(
        "S 0 0\nG 10 0\nEND\n",
        "S 1 G\nEND\n",
    );
    let handle = spawn_search(map, config("S", "G", Pace::Steps));

    let mut events = Vec::new();
    loop {
        handle.advance_one_step();
        match handle.events().recv_timeout(Duration::from_millis(200)) {
            Ok(event) => events.push(event),
            Err(crossbeam_channel::RecvTimeoutError::Timeout) => continue,
            Err(crossbeam_channel::RecvTimeoutError::Disconnected) => break,
        }
    }
    assert!(events.contains(&SearchEvent::Ended));
    assert!(matches!(
        handle.join().unwrap(),
        Termination::PathFound { .. }
    ));
}

#[test]
fn test_cancellation_is_an_abandonment() {
    let (_dir, map) = write_map(
        "S 0 0\nM 10 0\nG 20 0\nEND\n",
        "S 1 M\nM 1 G\nEND\n",
    );
    let handle = spawn_search(map, config("S", "G", Pace::Steps));
    handle.request_cancel();

    let events: Vec<SearchEvent> = handle.events().iter().collect();
    assert!(!events
        .iter()
        .any(|e| matches!(e, SearchEvent::PathFound { .. } | SearchEvent::NoPath)));
    assert_eq!(handle.join().unwrap(), Termination::Cancelled);
}
