//! A two-state cellular automaton on a toroidal grid, with an
//! [RLE](https://conwaylife.com/wiki/Run_Length_Encoded) pattern loader.
//!
//! ```
//! use lifegrid_lib::{Config, Pattern};
//!
//! let mut world = Config::new(16, 16).set_rule_string("B3/S23").world()?;
//! let glider: Pattern = "x = 3, y = 3\nbob$2bo$3o!".parse()?;
//! world.load_pattern(&glider, 1, 1);
//! world.step_n(4);
//! assert_eq!(world.population(), 5);
//! # Ok::<(), lifegrid_lib::Error>(())
//! ```

mod cells;
mod config;
mod error;
pub mod path;
mod presets;
mod rle;
mod rule;
mod world;
pub mod worker;

pub use cells::{Coord, State};
pub use config::Config;
pub use error::Error;
pub use presets::Preset;
pub use rle::{Pattern, RleDecoder};
pub use rule::{NeighborCounts, Rule};
pub use world::World;
