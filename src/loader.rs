//! Reads the locations and connections file formats.
//!
//! A locations file is lines of `<name> <x> <y>` terminated by a line `END`.
//! A connections file is lines of `<name> <count> <succ1> ... <succN>`
//! terminated by `END`. Anything else is a corrupt file.

use std::collections::HashMap;
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

use crate::map::{CityMap, MapError};
use crate::types::{City, Coordinates, ValidationError};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{path}:{line}: malformed line: '{text}'")]
    MalformedLine {
        path: String,
        line: usize,
        text: String,
    },

    #[error("{path}:{line}: expected {expected} connections, found {found}")]
    ConnectionCount {
        path: String,
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("{path}:{line}: city '{city}' appears twice")]
    DuplicateCity {
        path: String,
        line: usize,
        city: String,
    },

    #[error("{path}: missing END terminator")]
    MissingTerminator { path: String },

    #[error("{path}:{line}: {source}")]
    Invalid {
        path: String,
        line: usize,
        #[source]
        source: ValidationError,
    },

    #[error(transparent)]
    Map(#[from] MapError),
}

fn location_line() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\S+)\s+(-?\d+)\s+(-?\d+)$").unwrap())
}

fn connection_line() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\S+)\s+(\d+)((?:\s+\S+)*)$").unwrap())
}

/// Parse locations file content. `path` is used for error labelling only.
pub fn parse_locations(src: &str, path: &str) -> Result<HashMap<City, Coordinates>, LoadError> {
    let mut locations = HashMap::new();
    for (number, raw) in src.lines().enumerate() {
        let line = raw.trim();
        let number = number + 1;
        if line == "END" {
            return Ok(locations);
        }
        let caps = location_line()
            .captures(line)
            .ok_or_else(|| LoadError::MalformedLine {
                path: path.to_string(),
                line: number,
                text: line.to_string(),
            })?;
        // The pattern guarantees a digit string; only the i32 range can fail.
        let x: i32 = caps[2].parse().map_err(|_| LoadError::MalformedLine {
            path: path.to_string(),
            line: number,
            text: line.to_string(),
        })?;
        let y: i32 = caps[3].parse().map_err(|_| LoadError::MalformedLine {
            path: path.to_string(),
            line: number,
            text: line.to_string(),
        })?;
        let city = validated(City::new(&caps[1]), path, number)?;
        let coords = validated(Coordinates::new(x, y), path, number)?;
        if locations.insert(city, coords).is_some() {
            return Err(LoadError::DuplicateCity {
                path: path.to_string(),
                line: number,
                city: caps[1].to_string(),
            });
        }
    }
    Err(LoadError::MissingTerminator {
        path: path.to_string(),
    })
}

/// Parse connections file content. `path` is used for error labelling only.
pub fn parse_connections(src: &str, path: &str) -> Result<HashMap<City, Vec<City>>, LoadError> {
    let mut connections = HashMap::new();
    for (number, raw) in src.lines().enumerate() {
        let line = raw.trim();
        let number = number + 1;
        if line == "END" {
            return Ok(connections);
        }
        let caps = connection_line()
            .captures(line)
            .ok_or_else(|| LoadError::MalformedLine {
                path: path.to_string(),
                line: number,
                text: line.to_string(),
            })?;
        let expected: usize = caps[2].parse().map_err(|_| LoadError::MalformedLine {
            path: path.to_string(),
            line: number,
            text: line.to_string(),
        })?;
        let names: Vec<&str> = caps
            .get(3)
            .map(|m| m.as_str().split_whitespace().collect())
            .unwrap_or_default();
        if names.len() != expected {
            return Err(LoadError::ConnectionCount {
                path: path.to_string(),
                line: number,
                expected,
                found: names.len(),
            });
        }
        let city = validated(City::new(&caps[1]), path, number)?;
        let mut successors = Vec::with_capacity(names.len());
        for name in names {
            successors.push(validated(City::new(name), path, number)?);
        }
        if connections.insert(city, successors).is_some() {
            return Err(LoadError::DuplicateCity {
                path: path.to_string(),
                line: number,
                city: caps[1].to_string(),
            });
        }
    }
    Err(LoadError::MissingTerminator {
        path: path.to_string(),
    })
}

fn validated<T>(
    result: Result<T, ValidationError>,
    path: &str,
    line: usize,
) -> Result<T, LoadError> {
    result.map_err(|source| LoadError::Invalid {
        path: path.to_string(),
        line,
        source,
    })
}

/// Read and parse a locations file.
pub fn read_locations(path: &Path) -> Result<HashMap<City, Coordinates>, LoadError> {
    let src = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_locations(&src, &path.display().to_string())
}

/// Read and parse a connections file.
pub fn read_connections(path: &Path) -> Result<HashMap<City, Vec<City>>, LoadError> {
    let src = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_connections(&src, &path.display().to_string())
}

/// Read both files and assemble the validated map.
pub fn load_map(locations_path: &Path, connections_path: &Path) -> Result<CityMap, LoadError> {
    let locations = read_locations(locations_path)?;
    let connections = read_connections(connections_path)?;
    tracing::debug!(
        cities = locations.len(),
        connected = connections.len(),
        "map files parsed"
    );
    Ok(CityMap::from_parts(locations, connections)?)
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn city(name: &str) -> City {
        City::new(name).unwrap()
    }

    #[test]
    fn test_parse_locations_basic() {
        let src = "Helsinki 100 200\nEspoo 50 210\nEND\n";
        let locations = parse_locations(src, "loc.txt").unwrap();
        assert_eq!(locations.len(), 2);
        assert_eq!(
            locations[&city("Helsinki")],
            Coordinates::new(100, 200).unwrap()
        );
    }

    #[test]
    fn test_parse_locations_ignores_lines_after_end() {
        let src = "A 1 2\nEND\ngarbage here\n";
        assert_eq!(parse_locations(src, "loc.txt").unwrap().len(), 1);
    }

    #[test]
    fn test_parse_locations_missing_end() {
        let err = parse_locations("A 1 2\n", "loc.txt").unwrap_err();
        assert!(matches!(err, LoadError::MissingTerminator { .. }));
    }

    #[test]
    fn test_parse_locations_malformed_line() {
        let err = parse_locations("A 1\nEND\n", "loc.txt").unwrap_err();
        assert!(matches!(err, LoadError::MalformedLine { line: 1, .. }));

        let err = parse_locations("A one 2\nEND\n", "loc.txt").unwrap_err();
        assert!(matches!(err, LoadError::MalformedLine { .. }));
    }

    #[test]
    fn test_parse_locations_out_of_range_coordinate() {
        let err = parse_locations("A 1 900\nEND\n", "loc.txt").unwrap_err();
        assert!(matches!(
            err,
            LoadError::Invalid {
                line: 1,
                source: ValidationError::CoordinateOutOfRange { axis: 'y', .. },
                ..
            }
        ));
    }

    #[test]
    fn test_parse_locations_duplicate_city() {
        let err = parse_locations("A 1 2\nA 3 4\nEND\n", "loc.txt").unwrap_err();
        assert!(matches!(err, LoadError::DuplicateCity { line: 2, .. }));
    }

    #[test]
    fn test_parse_connections_basic() {
        let src = "A 2 B C\nB 1 C\nC 0\nEND\n";
        let connections = parse_connections(src, "con.txt").unwrap();
        assert_eq!(connections[&city("A")], vec![city("B"), city("C")]);
        assert_eq!(connections[&city("C")], Vec::<City>::new());
    }

    #[test]
    fn test_parse_connections_count_mismatch() {
        let err = parse_connections("A 3 B C\nEND\n", "con.txt").unwrap_err();
        assert!(matches!(
            err,
            LoadError::ConnectionCount {
                expected: 3,
                found: 2,
                ..
            }
        ));
    }

    #[test]
    fn test_parse_connections_missing_end() {
        let err = parse_connections("A 1 B\n", "con.txt").unwrap_err();
        assert!(matches!(err, LoadError::MissingTerminator { .. }));
    }

    #[test]
    fn test_load_map_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let loc = dir.path().join("locations.txt");
        let con = dir.path().join("connections.txt");
        std::fs::write(&loc, "A 0 0\nB 3 4\nEND\n").unwrap();
        std::fs::write(&con, "A 1 B\nEND\n").unwrap();

        let map = load_map(&loc, &con).unwrap();
        assert_eq!(map.city_count(), 2);
        assert_eq!(map.successors(&city("A")), vec![city("B")]);
    }

    #[test]
    fn test_load_map_dangling_connection_reported() {
        let dir = tempfile::tempdir().unwrap();
        let loc = dir.path().join("locations.txt");
        let con = dir.path().join("connections.txt");
        std::fs::write(&loc, "A 0 0\nEND\n").unwrap();
        std::fs::write(&con, "A 1 Ghost\nEND\n").unwrap();

        let err = load_map(&loc, &con).unwrap_err();
        assert!(matches!(
            err,
            LoadError::Map(MapError::UnknownConnection { .. })
        ));
    }

    #[test]
    fn test_read_locations_missing_file() {
        let err = read_locations(Path::new("/no/such/file.txt")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }
}
