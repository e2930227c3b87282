//! Cells in the cellular automaton.

use std::ops::Not;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Possible states of a cell.
///
/// In the grid a cell is stored as its `u8` value:
/// `0` for [`Dead`](State::Dead), `1` for [`Alive`](State::Alive).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum State {
    /// The dead state.
    #[default]
    Dead = 0,
    /// The alive state.
    Alive = 1,
}

impl State {
    /// Reads a stored cell value. Anything nonzero counts as alive.
    #[inline]
    pub fn from_u8(value: u8) -> Self {
        if value == 0 {
            State::Dead
        } else {
            State::Alive
        }
    }

    /// Whether the state is [`Alive`](State::Alive).
    #[inline]
    pub fn is_alive(self) -> bool {
        self == State::Alive
    }
}

impl From<State> for u8 {
    #[inline]
    fn from(state: State) -> Self {
        state as u8
    }
}

impl From<bool> for State {
    #[inline]
    fn from(alive: bool) -> Self {
        if alive {
            State::Alive
        } else {
            State::Dead
        }
    }
}

/// Flips the state.
impl Not for State {
    type Output = Self;

    #[inline]
    fn not(self) -> Self::Output {
        match self {
            State::Alive => State::Dead,
            State::Dead => State::Alive,
        }
    }
}

/// The coordinates of a cell.
///
/// `(x-coordinate, y-coordinate)`, both 0-indexed.
/// They are signed so that pointer positions outside the grid
/// can be passed in as is.
pub type Coord = (isize, isize);
