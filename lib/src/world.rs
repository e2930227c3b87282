//! The world.

use crate::{
    cells::State,
    error::Error,
    rle::Pattern,
    rule::Rule,
};
use log::trace;
use rand::Rng;
use std::{
    fmt::{self, Display, Formatter},
    mem,
};

/// The world.
///
/// A `width` × `height` grid of two-state cells whose edges wrap around,
/// so that the grid is a torus. Cells are stored row by row, the cell at
/// `(x, y)` having index `y * width + x`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct World {
    /// Width.
    width: usize,

    /// Height.
    height: usize,

    /// The rule of the cellular automaton.
    rule: Rule,

    /// The current generation. Every value is `0` or `1`.
    cells: Vec<u8>,

    /// A buffer for computing the next generation.
    ///
    /// Swapped with [`cells`](#structfield.cells) after each step.
    next: Vec<u8>,

    /// Number of steps since the grid was last reset.
    generation: u64,
}

impl World {
    /// Creates an empty world with the given size and rule string.
    ///
    /// Returns an error if the width or height is not positive,
    /// or the rule string is invalid.
    pub fn new(width: isize, height: isize, rule_string: &str) -> Result<Self, Error> {
        let rule = rule_string.parse()?;
        Self::with_rule(width, height, rule)
    }

    /// Creates an empty world with the given size and rule.
    pub fn with_rule(width: isize, height: isize, rule: Rule) -> Result<Self, Error> {
        let size = match width.checked_mul(height) {
            Some(size) if width > 0 && height > 0 => size as usize,
            _ => return Err(Error::InvalidDimension { width, height }),
        };
        Ok(World {
            width: width as usize,
            height: height as usize,
            rule,
            cells: vec![0; size],
            next: vec![0; size],
            generation: 0,
        })
    }

    /// Width.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height.
    pub fn height(&self) -> usize {
        self.height
    }

    /// The rule of the cellular automaton.
    pub fn rule(&self) -> Rule {
        self.rule
    }

    /// All cells in the current generation, row by row.
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    /// Number of steps since the last [`clear`](Self::clear),
    /// [`randomize`](Self::randomize) or pattern load.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Number of living cells.
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&c| c != 0).count()
    }

    /// Parses and sets a new rule. The cells are kept as they are.
    ///
    /// If the rule string is invalid, the old rule is kept
    /// and an error is returned.
    pub fn set_rule(&mut self, rule_string: &str) -> Result<(), Error> {
        self.rule = rule_string.parse()?;
        Ok(())
    }

    /// Replaces the rule with an already parsed one.
    pub fn replace_rule(&mut self, rule: Rule) {
        self.rule = rule;
    }

    /// Kills every cell.
    pub fn clear(&mut self) {
        self.cells.fill(0);
        self.generation = 0;
    }

    /// Fills the grid at random.
    ///
    /// `draw` should return numbers in `[0, 1)`; each cell is set alive
    /// when its draw is below `0.5`, so the probability of either state is `1/2`.
    pub fn randomize<F: FnMut() -> f64>(&mut self, mut draw: F) {
        for cell in self.cells.iter_mut() {
            *cell = u8::from(State::from(draw() < 0.5));
        }
        self.generation = 0;
    }

    /// Fills the grid at random, drawing from `rng`.
    pub fn randomize_with<R: Rng>(&mut self, rng: &mut R) {
        self.randomize(|| rng.gen::<f64>())
    }

    /// The index of a cell, or `None` if it is outside the grid.
    #[inline]
    fn index(&self, x: isize, y: isize) -> Option<usize> {
        if x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height {
            Some(y as usize * self.width + x as usize)
        } else {
            None
        }
    }

    /// Gets the state of a cell. Returns `None` if there is no such cell.
    pub fn get_cell(&self, x: isize, y: isize) -> Option<State> {
        self.index(x, y).map(|i| State::from_u8(self.cells[i]))
    }

    /// Sets the state of a cell.
    ///
    /// Does nothing if the cell is outside the grid.
    pub fn set_cell(&mut self, x: isize, y: isize, state: State) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = state.into();
        }
    }

    /// Flips the state of a cell.
    ///
    /// Does nothing if the cell is outside the grid.
    pub fn toggle_cell(&mut self, x: isize, y: isize) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = 1 - self.cells[i];
        }
    }

    /// Number of living cells among the eight neighbors of `(x, y)`,
    /// wrapping around the edges.
    pub fn count_neighbors(&self, x: isize, y: isize) -> u8 {
        let (width, height) = (self.width as isize, self.height as isize);
        let mut count = 0;
        for dy in -1..=1 {
            for dx in -1..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let nx = (x + dx).rem_euclid(width) as usize;
                let ny = (y + dy).rem_euclid(height) as usize;
                count += self.cells[ny * self.width + nx];
            }
        }
        count
    }

    /// Advances the world by one generation.
    ///
    /// Every cell of the next generation is computed from the current one;
    /// no cell sees a neighbor that was already updated in the same step.
    pub fn step(&mut self) {
        for y in 0..self.height {
            for x in 0..self.width {
                let index = y * self.width + x;
                let alive = self.cells[index] != 0;
                let neighbors = self.count_neighbors(x as isize, y as isize);
                self.next[index] = u8::from(self.rule.transition(alive, neighbors));
            }
        }
        mem::swap(&mut self.cells, &mut self.next);
        self.generation += 1;
        trace!("Generation {}", self.generation);
    }

    /// Advances the world by `n` generations.
    pub fn step_n(&mut self, n: u64) {
        for _ in 0..n {
            self.step();
        }
    }

    /// Clears the world, then draws the living cells of `pattern`
    /// with its top left corner at `(origin_x, origin_y)`.
    ///
    /// Cells falling outside the grid are dropped, not wrapped.
    pub fn load_pattern(&mut self, pattern: &Pattern, origin_x: isize, origin_y: isize) {
        self.clear();
        for (x, y) in pattern.alive_cells() {
            self.set_cell(origin_x + x as isize, origin_y + y as isize, State::Alive);
        }
    }

    /// Clears the world, then draws `pattern` in the middle of the grid.
    ///
    /// Returns the origin used.
    pub fn load_pattern_centered(&mut self, pattern: &Pattern) -> (isize, isize) {
        let origin_x = (self.width as isize - pattern.width() as isize).div_euclid(2);
        let origin_y = (self.height as isize - pattern.height() as isize).div_euclid(2);
        self.load_pattern(pattern, origin_x, origin_y);
        (origin_x, origin_y)
    }

    /// The current generation as a pattern of the same size.
    pub fn to_pattern(&self) -> Pattern {
        Pattern::new(self.width, self.height, self.cells.clone())
            .with_rule(self.rule.to_string())
    }
}

/// Displays the world in
/// [Plaintext](https://conwaylife.com/wiki/Plaintext) format.
///
/// * **Dead** cells are represented by `.`;
/// * **Living** cells are represented by `o`.
impl Display for World {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.width) {
            for &cell in row {
                f.write_str(if cell == 0 { "." } else { "o" })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alive(world: &World) -> Vec<(isize, isize)> {
        let mut cells = Vec::new();
        for y in 0..world.height() as isize {
            for x in 0..world.width() as isize {
                if world.get_cell(x, y) == Some(State::Alive) {
                    cells.push((x, y));
                }
            }
        }
        cells
    }

    #[test]
    fn new_world_is_empty() -> Result<(), Error> {
        let world = World::new(7, 3, "B3/S23")?;
        assert_eq!(world.cells().len(), 21);
        assert!(world.cells().iter().all(|&c| c == 0));
        assert_eq!(world.generation(), 0);
        Ok(())
    }

    #[test]
    fn non_positive() {
        assert_eq!(
            World::new(0, 5, "B3/S23"),
            Err(Error::InvalidDimension {
                width: 0,
                height: 5
            })
        );
        assert!(World::new(5, -1, "B3/S23").is_err());
    }

    #[test]
    fn too_large() {
        assert_eq!(
            World::new(isize::MAX, 2, "B3/S23"),
            Err(Error::InvalidDimension {
                width: isize::MAX,
                height: 2
            })
        );
        assert!(World::new(-2, isize::MIN, "B3/S23").is_err());
    }

    #[test]
    fn set_rule_keeps_old_rule_on_error() -> Result<(), Error> {
        let mut world = World::new(10, 10, "B36/S23")?;
        world.toggle_cell(1, 1);
        assert!(world.set_rule("B3X/S23").is_err());
        assert_eq!(world.rule().to_string(), "B36/S23");
        world.set_rule("B2/S")?;
        assert_eq!(world.rule().to_string(), "B2/S");
        assert_eq!(world.get_cell(1, 1), Some(State::Alive));
        Ok(())
    }

    #[test]
    fn toggle_and_set() -> Result<(), Error> {
        let mut world = World::new(10, 10, "B3/S23")?;
        world.toggle_cell(0, 0);
        assert_eq!(world.cells()[0], 1);
        world.toggle_cell(0, 0);
        assert_eq!(world.cells()[0], 0);
        world.set_cell(1, 1, State::Alive);
        assert_eq!(world.cells()[11], 1);
        world.set_cell(1, 1, State::Dead);
        assert_eq!(world.cells()[11], 0);
        Ok(())
    }

    #[test]
    fn out_of_bounds_is_ignored() -> Result<(), Error> {
        let mut world = World::new(4, 4, "B3/S23")?;
        world.set_cell(-1, 0, State::Alive);
        world.set_cell(4, 0, State::Alive);
        world.toggle_cell(0, 4);
        world.toggle_cell(0, -3);
        assert_eq!(world.population(), 0);
        assert_eq!(world.get_cell(4, 0), None);
        Ok(())
    }

    #[test]
    fn neighbors_in_the_middle() -> Result<(), Error> {
        let mut world = World::new(10, 10, "B3/S23")?;
        for y in 4..=6 {
            for x in 4..=6 {
                world.set_cell(x, y, State::Alive);
            }
        }
        assert_eq!(world.count_neighbors(5, 5), 8);
        assert_eq!(world.count_neighbors(4, 4), 3);
        Ok(())
    }

    #[test]
    fn neighbors_wrap_around() -> Result<(), Error> {
        let mut world = World::new(10, 10, "B3/S23")?;
        for &(x, y) in &[(0, 0), (9, 0), (0, 9), (9, 9)] {
            world.set_cell(x, y, State::Alive);
        }
        assert_eq!(world.count_neighbors(0, 0), 3);
        assert_eq!(world.count_neighbors(9, 9), 3);
        Ok(())
    }

    #[test]
    fn blinker() -> Result<(), Error> {
        let mut world = World::new(5, 5, "B3/S23")?;
        world.set_cell(2, 1, State::Alive);
        world.set_cell(2, 2, State::Alive);
        world.set_cell(2, 3, State::Alive);
        world.step();
        assert_eq!(alive(&world), vec![(1, 2), (2, 2), (3, 2)]);
        assert_eq!(world.get_cell(2, 1), Some(State::Dead));
        assert_eq!(world.get_cell(2, 3), Some(State::Dead));
        assert_eq!(world.generation(), 1);
        world.step();
        assert_eq!(alive(&world), vec![(2, 1), (2, 2), (2, 3)]);
        Ok(())
    }

    #[test]
    fn glider_wraps_around() -> Result<(), Error> {
        let mut world = World::new(6, 6, "B3/S23")?;
        // A glider heading south-east.
        for &(x, y) in &[(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)] {
            world.set_cell(x, y, State::Alive);
        }
        let start = alive(&world);
        // After 24 generations it has moved 6 cells each way,
        // all the way around the torus.
        world.step_n(24);
        assert_eq!(alive(&world), start);
        assert_eq!(world.population(), 5);
        Ok(())
    }

    #[test]
    fn clear() -> Result<(), Error> {
        let mut world = World::new(4, 4, "B36/S23")?;
        world.randomize(|| 0.0);
        world.step();
        world.clear();
        assert_eq!(world.population(), 0);
        assert_eq!(world.generation(), 0);
        assert_eq!(world.rule().to_string(), "B36/S23");
        Ok(())
    }

    #[test]
    fn randomize_uses_draws() -> Result<(), Error> {
        let mut world = World::new(4, 1, "B3/S23")?;
        let mut draws = vec![0.1, 0.7, 0.5, 0.49].into_iter();
        world.randomize(|| draws.next().unwrap_or(0.9));
        assert_eq!(world.cells(), &[1, 0, 0, 1]);
        Ok(())
    }

    #[test]
    fn display() -> Result<(), Error> {
        let mut world = World::new(3, 2, "B3/S23")?;
        world.set_cell(1, 0, State::Alive);
        world.set_cell(2, 1, State::Alive);
        assert_eq!(world.to_string(), ".o.\n..o\n");
        Ok(())
    }
}
