//! Board geometry
//!
//! Cells are stored in row-major order with row 0 at the bottom, so the id of
//! `(x, y)` is `y * width + x`:
//! ```text
//! y=2: [ 6][ 7][ 8]
//! y=1: [ 3][ 4][ 5]
//! y=0: [ 0][ 1][ 2]
//!      x=0  1   2
//! ```

use engine_config::Coord;
use serde::{Deserialize, Serialize};

use crate::GameError;

/// Dense cell index, `y * width + x`
pub type CellId = u16;

/// Snake move, numbered as on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Direction {
    Up = 0,
    Right = 1,
    Down = 2,
    Left = 3,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// `(dx, dy)` of a move
    #[inline]
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, 1),
            Direction::Right => (1, 0),
            Direction::Down => (0, -1),
            Direction::Left => (-1, 0),
        }
    }
}

impl TryFrom<usize> for Direction {
    type Error = GameError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Direction::ALL
            .get(value)
            .copied()
            .ok_or(GameError::UnknownAction(value))
    }
}

impl From<Direction> for usize {
    fn from(d: Direction) -> usize {
        d.index()
    }
}

/// Board dimensions and topology
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    pub width: usize,
    pub height: usize,
    pub wrapped: bool,
}

impl Board {
    pub fn new(width: usize, height: usize, wrapped: bool) -> Self {
        Self {
            width,
            height,
            wrapped,
        }
    }

    #[inline]
    pub fn area(&self) -> usize {
        self.width * self.height
    }

    #[inline]
    pub fn cell(&self, x: usize, y: usize) -> CellId {
        (y * self.width + x) as CellId
    }

    #[inline]
    pub fn coords(&self, cell: CellId) -> (usize, usize) {
        let c = cell as usize;
        (c % self.width, c / self.width)
    }

    /// Whether signed coordinates lie on the board, ignoring wrapping
    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    /// Cell id of a validated config coordinate
    pub fn from_coord(&self, coord: &Coord) -> CellId {
        self.cell(coord[0] as usize, coord[1] as usize)
    }

    /// Target of a move, `None` when it leaves an unwrapped board
    #[inline]
    pub fn step_from(&self, cell: CellId, dir: Direction) -> Option<CellId> {
        let (x, y) = self.coords(cell);
        let (dx, dy) = dir.delta();
        let (nx, ny) = (x as i32 + dx, y as i32 + dy);
        if self.wrapped {
            let nx = nx.rem_euclid(self.width as i32) as usize;
            let ny = ny.rem_euclid(self.height as i32) as usize;
            Some(self.cell(nx, ny))
        } else if self.contains(nx, ny) {
            Some(self.cell(nx as usize, ny as usize))
        } else {
            None
        }
    }

    /// Reachable neighbours of a cell in `Direction::ALL` order
    pub fn neighbours(&self, cell: CellId) -> impl Iterator<Item = CellId> + '_ {
        Direction::ALL
            .into_iter()
            .filter_map(move |d| self.step_from(cell, d))
    }

    pub fn is_corner(&self, cell: CellId) -> bool {
        let (x, y) = self.coords(cell);
        (x == 0 || x + 1 == self.width) && (y == 0 || y + 1 == self.height)
    }

    /// Manhattan distance to the centre cell on odd boards
    pub fn centre_distance(&self, cell: CellId) -> usize {
        let (x, y) = self.coords(cell);
        let (cx, cy) = ((self.width - 1) / 2, (self.height - 1) / 2);
        x.abs_diff(cx) + y.abs_diff(cy)
    }

    pub fn centre(&self) -> CellId {
        self.cell((self.width - 1) / 2, (self.height - 1) / 2)
    }
}
