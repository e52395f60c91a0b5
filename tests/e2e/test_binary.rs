//! Integration tests for the path-finder binary.
//!
//! These run the compiled CLI against small map files on disk and check the
//! narrated output and exit codes.

use std::path::Path;
use std::process::Command;

const BIN: &str = env!("CARGO_BIN_EXE_path-finder");

fn write_chain_map(dir: &Path) -> (std::path::PathBuf, std::path::PathBuf) {
    let loc = dir.join("locations.txt");
    let con = dir.join("connections.txt");
    std::fs::write(&loc, "S 0 0\nM 10 0\nG 20 0\nEND\n").unwrap();
    std::fs::write(&con, "S 1 M\nM 1 G\nEND\n").unwrap();
    (loc, con)
}

fn run(args: &[&str]) -> std::process::Output {
    Command::new(BIN)
        .args(args)
        .output()
        .expect("failed to run binary")
}

#[test]
fn test_finds_chain_path() {
    let dir = tempfile::tempdir().unwrap();
    let (loc, con) = write_chain_map(dir.path());

    let output = run(&[
        "--locations",
        loc.to_str().unwrap(),
        "--connections",
        con.to_str().unwrap(),
        "--from",
        "S",
        "--to",
        "G",
    ]);
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Optimal path: S -> M -> G"));
    assert!(stdout.contains("S -> M -> G (20.00)"));
}

#[test]
fn test_quiet_prints_only_the_outcome() {
    let dir = tempfile::tempdir().unwrap();
    let (loc, con) = write_chain_map(dir.path());

    let output = run(&[
        "--locations",
        loc.to_str().unwrap(),
        "--connections",
        con.to_str().unwrap(),
        "--from",
        "S",
        "--to",
        "G",
        "--quiet",
    ]);
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.trim(), "S -> M -> G (20.00)");
}

#[test]
fn test_no_path_exit_code() {
    let dir = tempfile::tempdir().unwrap();
    let loc = dir.path().join("locations.txt");
    let con = dir.path().join("connections.txt");
    std::fs::write(&loc, "S 0 0\nG 20 0\nEND\n").unwrap();
    std::fs::write(&con, "S 0\nG 0\nEND\n").unwrap();

    let output = run(&[
        "--locations",
        loc.to_str().unwrap(),
        "--connections",
        con.to_str().unwrap(),
        "--from",
        "S",
        "--to",
        "G",
    ]);
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("no path"));
}

#[test]
fn test_corrupt_locations_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let loc = dir.path().join("locations.txt");
    let con = dir.path().join("connections.txt");
    // Missing END terminator.
    std::fs::write(&loc, "S 0 0\n").unwrap();
    std::fs::write(&con, "S 0\nEND\n").unwrap();

    let output = run(&[
        "--locations",
        loc.to_str().unwrap(),
        "--connections",
        con.to_str().unwrap(),
        "--from",
        "S",
        "--to",
        "S",
    ]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("missing END terminator"));
}

#[test]
fn test_unknown_city_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let (loc, con) = write_chain_map(dir.path());

    let output = run(&[
        "--locations",
        loc.to_str().unwrap(),
        "--connections",
        con.to_str().unwrap(),
        "--from",
        "S",
        "--to",
        "Nowhere",
    ]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("not on the map"));
}
