//! Per-episode game state
//!
//! Bodies are index lists into the board's cell space and food/hazards are
//! dense maps, so cloning a state is a handful of flat copies.

use std::collections::VecDeque;

use serde::Serialize;

use crate::board::{Board, CellId};

/// A single snake, body stored head first
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snake {
    pub(crate) body: VecDeque<CellId>,
    pub(crate) health: u32,
    pub(crate) max_health: u32,
    pub(crate) alive: bool,
}

impl Snake {
    /// `body` is head first and must not be empty; `head` and `tail` index it.
    pub fn new(body: VecDeque<CellId>, health: u32, max_health: u32, alive: bool) -> Self {
        Self {
            body,
            health,
            max_health,
            alive,
        }
    }

    pub fn body(&self) -> &VecDeque<CellId> {
        &self.body
    }

    pub fn head(&self) -> CellId {
        self.body[0]
    }

    pub fn tail(&self) -> CellId {
        self.body[self.body.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn health(&self) -> u32 {
        self.health
    }

    pub fn max_health(&self) -> u32 {
        self.max_health
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// The last two segments share a cell, so the tail stays put next turn
    pub fn tail_stacked(&self) -> bool {
        let n = self.body.len();
        n >= 2 && self.body[n - 1] == self.body[n - 2]
    }

    /// Cells that still block movement next turn.
    ///
    /// A moving tail frees its cell unless it is stacked or snakes never shrink.
    pub fn blocking_cells(&self, constrictor: bool) -> impl Iterator<Item = CellId> + '_ {
        let vacates = !constrictor && !self.tail_stacked() && self.body.len() > 1;
        let n = if vacates {
            self.body.len() - 1
        } else {
            self.body.len()
        };
        self.body.iter().take(n).copied()
    }
}

/// Rectangle not yet covered by the royale hazard, inclusive bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SafeZone {
    pub min_x: usize,
    pub max_x: usize,
    pub min_y: usize,
    pub max_y: usize,
}

impl SafeZone {
    pub fn full(board: &Board) -> Self {
        Self {
            min_x: 0,
            max_x: board.width - 1,
            min_y: 0,
            max_y: board.height - 1,
        }
    }
}

/// Authoritative state of one episode
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct State {
    pub(crate) turn: u32,
    pub(crate) snakes: Vec<Snake>,
    pub(crate) food: Vec<bool>,
    pub(crate) food_count: usize,
    pub(crate) hazards: Vec<bool>,
    pub(crate) safe_zone: SafeZone,
    /// Number of royale shrinks so far, selects the next edge
    pub(crate) shrinks: u32,
    pub(crate) terminal: bool,
}

impl State {
    pub(crate) fn empty(board: &Board, turn: u32) -> Self {
        Self {
            turn,
            snakes: Vec::new(),
            food: vec![false; board.area()],
            food_count: 0,
            hazards: vec![false; board.area()],
            safe_zone: SafeZone::full(board),
            shrinks: 0,
            terminal: false,
        }
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn snakes(&self) -> &[Snake] {
        &self.snakes
    }

    pub fn is_terminal(&self) -> bool {
        self.terminal
    }

    pub fn has_food(&self, cell: CellId) -> bool {
        self.food[cell as usize]
    }

    pub fn has_hazard(&self, cell: CellId) -> bool {
        self.hazards[cell as usize]
    }

    pub fn food_count(&self) -> usize {
        self.food_count
    }

    pub fn food_cells(&self) -> impl Iterator<Item = CellId> + '_ {
        self.food
            .iter()
            .enumerate()
            .filter(|&(_, &f)| f)
            .map(|(i, _)| i as CellId)
    }

    pub fn hazard_cells(&self) -> impl Iterator<Item = CellId> + '_ {
        self.hazards
            .iter()
            .enumerate()
            .filter(|&(_, &h)| h)
            .map(|(i, _)| i as CellId)
    }

    pub fn safe_zone(&self) -> SafeZone {
        self.safe_zone
    }

    /// Ids of alive snakes, ascending
    pub fn alive_players(&self) -> Vec<usize> {
        self.snakes
            .iter()
            .enumerate()
            .filter(|(_, s)| s.alive)
            .map(|(p, _)| p)
            .collect()
    }

    pub fn num_alive(&self) -> usize {
        self.snakes.iter().filter(|s| s.alive).count()
    }

    pub(crate) fn add_food(&mut self, cell: CellId) {
        if !self.food[cell as usize] {
            self.food[cell as usize] = true;
            self.food_count += 1;
        }
    }

    pub(crate) fn remove_food(&mut self, cell: CellId) {
        if self.food[cell as usize] {
            self.food[cell as usize] = false;
            self.food_count -= 1;
        }
    }

    /// Cells covered by alive snakes
    pub fn occupied(&self, area: usize) -> Vec<bool> {
        let mut occupied = vec![false; area];
        for snake in self.snakes.iter().filter(|s| s.alive) {
            for &c in &snake.body {
                occupied[c as usize] = true;
            }
        }
        occupied
    }

    /// Cells free for spawning food: no alive snake, food or hazard
    pub fn free_cells(&self, area: usize) -> Vec<CellId> {
        let occupied = self.occupied(area);
        (0..area)
            .filter(|&c| !occupied[c] && !self.food[c] && !self.hazards[c])
            .map(|c| c as CellId)
            .collect()
    }
}
