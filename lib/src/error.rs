//! All kinds of errors in this crate.

use crate::cells::Coord;
use displaydoc::Display;
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// All kinds of errors in this crate.
#[derive(Clone, Debug, PartialEq, Eq, Display, Error)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Error {
    /// Width and height should be positive, got {width}x{height}.
    InvalidDimension { width: isize, height: isize },
    /// Invalid rule {rule:?}: unexpected character {found:?}.
    InvalidRule { rule: String, found: char },
    /// Malformed pattern at line {line}, column {column}: unexpected {found:?}.
    MalformedPattern {
        line: usize,
        column: usize,
        found: String,
    },
    /// Malformed pattern header: {0:?}.
    MalformedHeader(String),
    /// A {width}x{height} pattern cannot hold {cells} cells.
    InvalidPatternSize {
        width: usize,
        height: usize,
        cells: usize,
    },
    /// Unknown preset pattern: {0:?}.
    UnknownPreset(String),
    /// Cell {0:?} is outside the grid.
    OutOfBounds(Coord),
}
