//! Core value types: City, Coordinates, Heuristic, Pace.
//!
//! Construction and mutation validate their inputs; an out-of-range value is
//! rejected and the previous value kept, never clamped.

use std::fmt;

use thiserror::Error;

/// Inclusive coordinate range accepted on both axes.
pub const COORD_MIN: i32 = 0;
pub const COORD_MAX: i32 = 800;

/// Maximum length of a city name, in characters.
pub const NAME_MAX_LEN: usize = 80;

// ─── Errors ──────────────────────────────────────────────────────────────────

/// Rejected construction or mutation of a core value.
///
/// The operation that produced this error is a no-op: the offending value has
/// not been applied anywhere.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("coordinate {axis} = {value} is outside [{COORD_MIN}, {COORD_MAX}]")]
    CoordinateOutOfRange { axis: char, value: i32 },

    #[error("city name must be 1..={NAME_MAX_LEN} characters, got {len}")]
    BadNameLength { len: usize },

    #[error("cost from start must be non-negative, got {value}")]
    NegativeCost { value: f64 },

    #[error("cost from start may only be lowered: {current} -> {offered} rejected")]
    RaisedCost { current: f64, offered: f64 },
}

// ─── City ────────────────────────────────────────────────────────────────────

/// A named location. Identity, equality, and hashing are by name only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct City(String);

impl City {
    /// Create a city. The name must be 1..=80 characters.
    pub fn new(name: impl Into<String>) -> Result<Self, ValidationError> {
        let name = name.into();
        let len = name.chars().count();
        if len == 0 || len > NAME_MAX_LEN {
            return Err(ValidationError::BadNameLength { len });
        }
        Ok(Self(name))
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ─── Coordinates ─────────────────────────────────────────────────────────────

/// A point on the map. Both axes are confined to `[0, 800]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coordinates {
    x: i32,
    y: i32,
}

impl Coordinates {
    /// Create a coordinate pair, rejecting values outside `[0, 800]`.
    pub fn new(x: i32, y: i32) -> Result<Self, ValidationError> {
        check_axis('x', x)?;
        check_axis('y', y)?;
        Ok(Self { x, y })
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    /// Replace the x coordinate. On a range violation the old value is kept.
    pub fn set_x(&mut self, x: i32) -> Result<(), ValidationError> {
        check_axis('x', x)?;
        self.x = x;
        Ok(())
    }

    /// Replace the y coordinate. On a range violation the old value is kept.
    pub fn set_y(&mut self, y: i32) -> Result<(), ValidationError> {
        check_axis('y', y)?;
        self.y = y;
        Ok(())
    }
}

fn check_axis(axis: char, value: i32) -> Result<(), ValidationError> {
    if !(COORD_MIN..=COORD_MAX).contains(&value) {
        return Err(ValidationError::CoordinateOutOfRange { axis, value });
    }
    Ok(())
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

// ─── Search knobs ────────────────────────────────────────────────────────────

/// How the remaining cost to the goal is estimated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum Heuristic {
    /// Straight-line Euclidean distance to the goal. Admissible.
    Distance,
    /// A constant 1, standing in for "one more edge to the goal". Not a true
    /// hop estimate and not admissible; kept for parity with the original.
    Hops,
}

/// How the engine paces itself between semantic steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum Pace {
    /// Suspend at every gate until an external advance permit arrives.
    Steps,
    /// Sleep a fixed interval at every gate. The "watch it run" mode.
    Slow,
    /// Never suspend.
    Fast,
}

// ─── Tests ───────────────────────────────────────────────────────────────────
