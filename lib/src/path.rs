//! A* search on a grid with walls.
//!
//! Moves go to the four orthogonal neighbors and cost `1` each; the
//! heuristic is the Manhattan distance, so the route found is a shortest one.

use crate::{cells::Coord, error::Error};
use log::debug;
use std::{cmp::Reverse, collections::BinaryHeap};

/// Up, right, down, left.
const DIRECTIONS: [Coord; 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];

/// A rectangular grid of free cells and walls. The edges don't wrap.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Maze {
    cols: usize,
    rows: usize,
    walls: Vec<bool>,
}

impl Maze {
    /// Creates a maze without walls.
    pub fn new(cols: isize, rows: isize) -> Result<Self, Error> {
        let size = match cols.checked_mul(rows) {
            Some(size) if cols > 0 && rows > 0 => size as usize,
            _ => {
                return Err(Error::InvalidDimension {
                    width: cols,
                    height: rows,
                })
            }
        };
        Ok(Maze {
            cols: cols as usize,
            rows: rows as usize,
            walls: vec![false; size],
        })
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    fn index(&self, (x, y): Coord) -> Option<usize> {
        if x >= 0 && y >= 0 && (x as usize) < self.cols && (y as usize) < self.rows {
            Some(y as usize * self.cols + x as usize)
        } else {
            None
        }
    }

    fn coord(&self, index: usize) -> Coord {
        ((index % self.cols) as isize, (index / self.cols) as isize)
    }

    /// Whether there is a wall at `coord`. Everything outside the maze is a wall.
    pub fn is_wall(&self, coord: Coord) -> bool {
        self.index(coord).map_or(true, |i| self.walls[i])
    }

    /// Puts or removes a wall. Does nothing outside the maze.
    pub fn set_wall(&mut self, coord: Coord, wall: bool) {
        if let Some(i) = self.index(coord) {
            self.walls[i] = wall;
        }
    }

    /// Flips a cell between wall and free. Does nothing outside the maze.
    pub fn toggle_wall(&mut self, coord: Coord) {
        if let Some(i) = self.index(coord) {
            self.walls[i] = !self.walls[i];
        }
    }

    /// Removes all walls.
    pub fn clear_walls(&mut self) {
        self.walls.fill(false);
    }
}

/// The result of a search.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Route {
    /// Whether the end was reached.
    pub found: bool,

    /// The cells from the one after the start to the end, inclusive.
    ///
    /// Empty if the end was not reached, or if it is the start.
    pub path: Vec<Coord>,

    /// Cells in the order they were expanded, without the start.
    pub visited: Vec<Coord>,
}

fn manhattan((x0, y0): Coord, (x1, y1): Coord) -> usize {
    ((x0 - x1).abs() + (y0 - y1).abs()) as usize
}

/// Finds a shortest route from `start` to `end` that avoids walls.
///
/// Returns an error if `start` or `end` is outside the maze.
pub fn find_path(maze: &Maze, start: Coord, end: Coord) -> Result<Route, Error> {
    let start_index = maze.index(start).ok_or(Error::OutOfBounds(start))?;
    let end_index = maze.index(end).ok_or(Error::OutOfBounds(end))?;

    let size = maze.cols * maze.rows;
    let mut cost = vec![usize::MAX; size];
    let mut parent = vec![None; size];
    let mut closed = vec![false; size];
    let mut visited = Vec::new();

    // Ties on the estimate are broken by insertion order.
    let mut open = BinaryHeap::new();
    let mut inserted = 0_usize;
    cost[start_index] = 0;
    open.push(Reverse((manhattan(start, end), inserted, start_index)));

    while let Some(Reverse((_, _, current))) = open.pop() {
        if closed[current] {
            continue;
        }
        if current == end_index {
            let mut path = Vec::new();
            let mut index = current;
            while let Some(prev) = parent[index] {
                path.push(maze.coord(index));
                index = prev;
            }
            path.reverse();
            debug!(
                "Found a route of length {} after visiting {} cells",
                path.len(),
                visited.len()
            );
            return Ok(Route {
                found: true,
                path,
                visited,
            });
        }
        closed[current] = true;
        if current != start_index {
            visited.push(maze.coord(current));
        }

        let (x, y) = maze.coord(current);
        for (dx, dy) in DIRECTIONS {
            let next = (x + dx, y + dy);
            let next_index = match maze.index(next) {
                Some(i) if !closed[i] && !maze.walls[i] => i,
                _ => continue,
            };
            let new_cost = cost[current] + 1;
            if new_cost < cost[next_index] {
                cost[next_index] = new_cost;
                parent[next_index] = Some(current);
                inserted += 1;
                open.push(Reverse((
                    new_cost + manhattan(next, end),
                    inserted,
                    next_index,
                )));
            }
        }
    }

    debug!("No route after visiting {} cells", visited.len());
    Ok(Route {
        found: false,
        path: Vec::new(),
        visited,
    })
}
