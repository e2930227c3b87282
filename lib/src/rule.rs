//! Life-like rules.
//!
//! A rule is written as `B<digits>/S<digits>`, e.g. `B3/S23` for
//! Conway's Game of Life. See
//! [this article on LifeWiki](https://conwaylife.com/wiki/Rulestring).

use crate::error::Error;
use bitflags::bitflags;
use log::debug;
use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

bitflags! {
    /// A set of neighbor counts, from `0` to `8`.
    #[derive(Default)]
    #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
    pub struct NeighborCounts: u16 {
        const N0 = 1 << 0;
        const N1 = 1 << 1;
        const N2 = 1 << 2;
        const N3 = 1 << 3;
        const N4 = 1 << 4;
        const N5 = 1 << 5;
        const N6 = 1 << 6;
        const N7 = 1 << 7;
        const N8 = 1 << 8;
    }
}

impl NeighborCounts {
    /// The set containing only `count`.
    ///
    /// Returns `None` if `count` is larger than `8`.
    #[inline]
    pub fn single(count: u8) -> Option<Self> {
        if count <= 8 {
            Self::from_bits(1 << count)
        } else {
            None
        }
    }

    /// Whether the set contains `count`.
    #[inline]
    pub fn has(self, count: u8) -> bool {
        count <= 8 && self.bits() & (1 << count) != 0
    }

    /// The counts in the set, in increasing order.
    pub fn counts(self) -> impl Iterator<Item = u8> {
        (0..=8).filter(move |&n| self.has(n))
    }
}

/// A totalistic Life-like rule on the Moore neighborhood.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rule {
    /// Neighbor counts that bring a dead cell to life.
    pub birth: NeighborCounts,
    /// Neighbor counts that keep a living cell alive.
    pub survival: NeighborCounts,
}

/// Conway's Game of Life, `B3/S23`.
impl Default for Rule {
    fn default() -> Self {
        Rule {
            birth: NeighborCounts::N3,
            survival: NeighborCounts::N2 | NeighborCounts::N3,
        }
    }
}

impl Rule {
    /// Constructs a new rule from the birth and survival sets.
    pub fn new(birth: NeighborCounts, survival: NeighborCounts) -> Self {
        Rule { birth, survival }
    }

    /// The state of a cell in the next generation, given whether it is alive
    /// now and how many of its neighbors are alive.
    #[inline]
    pub fn transition(&self, alive: bool, neighbors: u8) -> bool {
        if alive {
            self.survival.has(neighbors)
        } else {
            self.birth.has(neighbors)
        }
    }

    /// Parses the digits after the `B` or `S` of one segment.
    fn parse_counts(rule: &str, digits: &str) -> Result<NeighborCounts, Error> {
        digits.chars().try_fold(NeighborCounts::empty(), |set, c| {
            c.to_digit(10)
                .and_then(|n| NeighborCounts::single(n as u8))
                .map(|n| set | n)
                .ok_or_else(|| Error::InvalidRule {
                    rule: rule.to_string(),
                    found: c,
                })
        })
    }
}

/// Parses a rule string.
///
/// The string is split on `/`. A segment starting with `B` gives the birth
/// counts, one starting with `S` the survival counts; letters are
/// case-insensitive and the order of the segments doesn't matter. A missing
/// segment means an empty set. Other segments are ignored.
impl FromStr for Rule {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut rule = Rule::new(NeighborCounts::empty(), NeighborCounts::empty());
        for segment in s.split('/') {
            let mut chars = segment.chars();
            match chars.next().map(|c| c.to_ascii_uppercase()) {
                Some('B') => rule.birth = Self::parse_counts(s, chars.as_str())?,
                Some('S') => rule.survival = Self::parse_counts(s, chars.as_str())?,
                _ => debug!("Ignoring segment {:?} of rule {:?}", segment, s),
            }
        }
        Ok(rule)
    }
}

impl Display for Rule {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("B")?;
        for n in self.birth.counts() {
            write!(f, "{}", n)?;
        }
        f.write_str("/S")?;
        for n in self.survival.counts() {
            write!(f, "{}", n)?;
        }
        Ok(())
    }
}
