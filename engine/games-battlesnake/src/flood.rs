//! Breadth-first flood fills over the board
//!
//! Blocked cells (snake bodies) receive a distance when reached but are never
//! expanded, so a body cell is one step past the last free cell before it.

use std::collections::VecDeque;

use crate::board::{Board, CellId};

/// Distance of unreached cells
pub const UNREACHED: u32 = u32::MAX;

/// Owner value of cells no source reaches strictly first
pub const NEUTRAL: usize = usize::MAX;

/// Shortest path length from `start` to every cell
pub fn distances(board: &Board, start: CellId, blocked: &[bool]) -> Vec<u32> {
    let mut dist = vec![UNREACHED; board.area()];
    let mut queue = VecDeque::with_capacity(board.area());
    dist[start as usize] = 0;
    queue.push_back(start);

    while let Some(cell) = queue.pop_front() {
        let d = dist[cell as usize];
        if cell != start && blocked[cell as usize] {
            continue;
        }
        for next in board.neighbours(cell) {
            if dist[next as usize] == UNREACHED {
                dist[next as usize] = d + 1;
                queue.push_back(next);
            }
        }
    }
    dist
}

/// Smallest distance in `dist` over `targets`, if any target is reachable
pub fn nearest(dist: &[u32], targets: impl IntoIterator<Item = CellId>) -> Option<u32> {
    targets
        .into_iter()
        .map(|c| dist[c as usize])
        .filter(|&d| d != UNREACHED)
        .min()
}

/// Voronoi partition from several sources.
///
/// Every cell belongs to the source that reaches it strictly first. Cells
/// reached at the same distance by different owners are [`NEUTRAL`], as is
/// everything that can only be reached through them. Unreached cells are
/// `NEUTRAL` too.
pub fn area_control(board: &Board, sources: &[(usize, CellId)], blocked: &[bool]) -> Vec<usize> {
    let mut dist = vec![UNREACHED; board.area()];
    let mut owner = vec![NEUTRAL; board.area()];
    let mut is_source = vec![false; board.area()];
    let mut queue = VecDeque::with_capacity(board.area());

    for &(player, cell) in sources {
        let c = cell as usize;
        if dist[c] == UNREACHED {
            dist[c] = 0;
            owner[c] = player;
            is_source[c] = true;
            queue.push_back(cell);
        } else if owner[c] != player {
            owner[c] = NEUTRAL;
        }
    }

    while let Some(cell) = queue.pop_front() {
        let c = cell as usize;
        if !is_source[c] && blocked[c] {
            continue;
        }
        let d = dist[c];
        for next in board.neighbours(cell) {
            let n = next as usize;
            if dist[n] == UNREACHED {
                dist[n] = d + 1;
                owner[n] = owner[c];
                queue.push_back(next);
            } else if dist[n] == d + 1 && owner[n] != owner[c] {
                owner[n] = NEUTRAL;
            }
        }
    }
    owner
}
