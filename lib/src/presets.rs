//! Built-in patterns.

use crate::{error::Error, rle::Pattern};
use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Built-in patterns, all for `B3/S23`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Preset {
    /// The smallest spaceship.
    Glider,
    /// The lightweight spaceship.
    Lwss,
    /// Gosper's glider gun, with period 30.
    GosperGun,
}

impl Preset {
    /// All presets.
    pub const ALL: [Preset; 3] = [Preset::Glider, Preset::Lwss, Preset::GosperGun];

    /// The short name used on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Preset::Glider => "glider",
            Preset::Lwss => "lwss",
            Preset::GosperGun => "gosper",
        }
    }

    /// The pattern in RLE format.
    pub fn rle(self) -> &'static str {
        match self {
            Preset::Glider => {
                "#N Glider\n\
                 x = 3, y = 3, rule = B3/S23\n\
                 bob$2bo$3o!"
            }
            Preset::Lwss => {
                "#N Lightweight Spaceship\n\
                 x = 5, y = 4, rule = B3/S23\n\
                 2b2o$o3bo$o2bo$b4o!"
            }
            Preset::GosperGun => {
                "#N Gosper Glider Gun\n\
                 x = 36, y = 9, rule = B3/S23\n\
                 24bo$22bobo$12b2o6b2o12b2o$11bo3bo4b2o12b2o$2o8bo5bo3b2o$\
                 2o8bo3bob2o4bobo$10bo5bo7bo$11bo3bo$12b2o!"
            }
        }
    }

    /// The decoded pattern.
    pub fn pattern(self) -> Pattern {
        // The texts above are known to be well-formed.
        self.rle()
            .parse()
            .unwrap_or_else(|e| unreachable!("preset {} is malformed: {}", self.name(), e))
    }
}

impl Display for Preset {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Preset::ALL
            .iter()
            .copied()
            .find(|preset| preset.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::UnknownPreset(s.to_string()))
    }
}
