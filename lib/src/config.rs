//! World configuration.

use crate::{error::Error, world::World};
use educe::Educe;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// World configuration.
///
/// The world will be generated from this configuration.
#[derive(Clone, Debug, Educe, PartialEq, Eq)]
#[educe(Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Config {
    /// Width.
    #[educe(Default = 64)]
    pub width: isize,

    /// Height.
    #[educe(Default = 64)]
    pub height: isize,

    /// The rule string of the cellular automaton.
    #[educe(Default = "B3/S23")]
    pub rule_string: String,
}

impl Config {
    /// Sets up a new configuration with given size.
    pub fn new(width: isize, height: isize) -> Self {
        Config {
            width,
            height,
            ..Config::default()
        }
    }

    /// Sets the rule string.
    pub fn set_rule_string<S: ToString>(mut self, rule_string: S) -> Self {
        self.rule_string = rule_string.to_string();
        self
    }

    /// Creates a new empty world from the configuration.
    ///
    /// Returns an error if the size is not positive
    /// or the rule string is invalid.
    pub fn world(&self) -> Result<World, Error> {
        World::new(self.width, self.height, &self.rule_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default() -> Result<(), Error> {
        let world = Config::default().world()?;
        assert_eq!((world.width(), world.height()), (64, 64));
        assert_eq!(world.rule().to_string(), "B3/S23");
        Ok(())
    }

    #[test]
    fn builder() -> Result<(), Error> {
        let world = Config::new(8, 4).set_rule_string("B36/S23").world()?;
        assert_eq!(world.cells().len(), 32);
        assert_eq!(world.rule().to_string(), "B36/S23");
        Ok(())
    }

    #[test]
    fn invalid() {
        assert!(matches!(
            Config::new(0, 4).world(),
            Err(Error::InvalidDimension { .. })
        ));
        assert!(matches!(
            Config::new(4, 4).set_rule_string("B3/S2a").world(),
            Err(Error::InvalidRule { found: 'a', .. })
        ));
    }
}
