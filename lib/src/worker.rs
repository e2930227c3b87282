//! Driving a world through messages.
//!
//! When the world runs behind a message-passing boundary, e.g. in a web
//! worker, the front end sends [`Request`]s and receives [`Response`]s.
//! A [`Worker`] owns the world and handles one request at a time.

use crate::{cells::State, config::Config, error::Error, rle::Pattern, world::World};
use log::{debug, error};
use rand::{rngs::StdRng, SeedableRng};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Requests sent to a [`Worker`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Request {
    /// Replaces the world with an empty one.
    Configure {
        width: isize,
        height: isize,
        rule: String,
    },
    /// Sets a new rule, keeping the cells.
    SetRule(String),
    /// Kills every cell.
    Clear,
    /// Fills the grid at random.
    Randomize,
    /// Flips the state of a cell.
    ToggleCell { x: isize, y: isize },
    /// Sets the state of a cell.
    SetCell { x: isize, y: isize, state: State },
    /// Advances one generation.
    Step,
    /// Clears the world and draws a pattern.
    ///
    /// `origin` is the position of the top left corner of the pattern.
    /// `None` means the pattern is centered.
    LoadPattern {
        pattern: Pattern,
        origin: Option<(isize, isize)>,
    },
}

/// The state of the world after a request.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Snapshot {
    pub width: usize,
    pub height: usize,
    /// All cells, row by row.
    pub cells: Vec<u8>,
    pub generation: u64,
}

impl From<&World> for Snapshot {
    fn from(world: &World) -> Self {
        Snapshot {
            width: world.width(),
            height: world.height(),
            cells: world.cells().to_vec(),
            generation: world.generation(),
        }
    }
}

/// Responses sent back by a [`Worker`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Response {
    /// The request succeeded.
    UpdateWorld(Snapshot),
    /// The request failed and the world is unchanged.
    Failed(Error),
}

/// Owns a world and applies requests to it.
pub struct Worker {
    world: World,
    rng: StdRng,
}

impl Worker {
    /// A worker with the default configuration, seeded from the system.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// A worker with the default configuration and a fixed random seed.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        let world = Config::default()
            .world()
            .unwrap_or_else(|e| unreachable!("default configuration is invalid: {}", e));
        Worker { world, rng }
    }

    /// The world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Handles a request.
    pub fn handle(&mut self, request: Request) -> Response {
        debug!("Handling {:?}", request);
        let result = match request {
            Request::Configure {
                width,
                height,
                rule,
            } => Config::new(width, height)
                .set_rule_string(rule)
                .world()
                .map(|world| self.world = world),
            Request::SetRule(rule) => self.world.set_rule(&rule),
            Request::Clear => {
                self.world.clear();
                Ok(())
            }
            Request::Randomize => {
                self.world.randomize_with(&mut self.rng);
                Ok(())
            }
            Request::ToggleCell { x, y } => {
                self.world.toggle_cell(x, y);
                Ok(())
            }
            Request::SetCell { x, y, state } => {
                self.world.set_cell(x, y, state);
                Ok(())
            }
            Request::Step => {
                self.world.step();
                Ok(())
            }
            Request::LoadPattern { pattern, origin } => {
                match origin {
                    Some((x, y)) => self.world.load_pattern(&pattern, x, y),
                    None => {
                        self.world.load_pattern_centered(&pattern);
                    }
                }
                Ok(())
            }
        };
        match result {
            Ok(()) => Response::UpdateWorld(Snapshot::from(&self.world)),
            Err(e) => {
                error!("{}", e);
                Response::Failed(e)
            }
        }
    }
}

impl Default for Worker {
    fn default() -> Self {
        Self::new()
    }
}
