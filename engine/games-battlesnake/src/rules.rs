//! Turn resolution
//!
//! One turn runs in a fixed order: move, grow, eat, lose health, eliminate,
//! spawn food, shrink the royale zone, advance the turn, then eliminate snakes
//! that are left without a legal move. The order fixes the sequence of random
//! draws, so it must not change.

use engine_config::GameConfig;
use rand_chacha::ChaCha20Rng;
use serde::Serialize;
use tracing::debug;

use crate::board::{Board, CellId, Direction};
use crate::spawn;
use crate::state::State;

/// Why a snake was eliminated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EliminationCause {
    OutOfBounds,
    OutOfHealth,
    SelfCollision,
    BodyCollision { by: usize },
    HeadToHead { by: usize },
    NoLegalMove,
}

impl EliminationCause {
    /// Opponent credited with the elimination, if any
    pub fn killer(&self) -> Option<usize> {
        match *self {
            EliminationCause::BodyCollision { by } | EliminationCause::HeadToHead { by } => Some(by),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Elimination {
    pub player: usize,
    pub cause: EliminationCause,
}

/// Royale edge covered by a shrink
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ShrinkEdge {
    Left,
    Right,
    Down,
    Up,
}

/// Edges are taken in this order, cyclically
pub const SHRINK_ORDER: [ShrinkEdge; 4] = [
    ShrinkEdge::Left,
    ShrinkEdge::Right,
    ShrinkEdge::Down,
    ShrinkEdge::Up,
];

/// Legal moves of a player, in `Direction::ALL` order.
///
/// A move is legal when it stays on the board and its target is not covered
/// by an alive snake, except for tail cells that move away this turn.
pub fn legal_actions(state: &State, board: &Board, config: &GameConfig, player: usize) -> Vec<Direction> {
    let Some(snake) = state.snakes.get(player).filter(|s| s.alive) else {
        return Vec::new();
    };
    if config.all_actions_legal {
        return Direction::ALL.to_vec();
    }

    let head = snake.head();
    let targets: Vec<(Direction, CellId)> = Direction::ALL
        .into_iter()
        .filter_map(|d| board.step_from(head, d).map(|t| (d, t)))
        .collect();
    let mut blocked = [false; 4];
    for other in state.snakes.iter().filter(|s| s.alive) {
        for cell in other.blocking_cells(config.constrictor) {
            for (i, &(_, target)) in targets.iter().enumerate() {
                if target == cell {
                    blocked[i] = true;
                }
            }
        }
    }
    targets
        .iter()
        .enumerate()
        .filter(|&(i, _)| !blocked[i])
        .map(|(_, &(d, _))| d)
        .collect()
}

/// Apply one validated joint move and return the eliminations of the turn.
///
/// `moves` pairs every alive player with its direction.
pub(crate) fn resolve_turn(
    state: &mut State,
    board: &Board,
    config: &GameConfig,
    moves: &[(usize, Direction)],
    rng: &mut ChaCha20Rng,
) -> Vec<Elimination> {
    let n = state.snakes.len();
    let mut out_of_bounds = vec![false; n];
    let mut ate = vec![false; n];

    // move heads, keep the tail of growing snakes
    for &(player, dir) in moves {
        let Some(target) = board.step_from(state.snakes[player].head(), dir) else {
            out_of_bounds[player] = true;
            continue;
        };
        ate[player] = state.has_food(target);
        let grows = config.constrictor || ate[player];
        let snake = &mut state.snakes[player];
        snake.body.push_front(target);
        if !grows {
            snake.body.pop_back();
        }
    }

    // eat, then lose health; snakes sharing a food cell all eat it
    for &(player, _) in moves {
        if out_of_bounds[player] {
            continue;
        }
        let head = state.snakes[player].head();
        let on_hazard = state.has_hazard(head);
        let snake = &mut state.snakes[player];
        if config.constrictor || ate[player] {
            snake.health = snake.max_health;
        } else {
            snake.health = snake.health.saturating_sub(1);
            if on_hazard {
                snake.health = snake.health.saturating_sub(config.hazard_damage);
            }
        }
    }

    for &(player, _) in moves {
        if ate[player] {
            let head = state.snakes[player].head();
            state.remove_food(head);
        }
    }

    let mut eliminations = Vec::new();
    let mut contenders = Vec::with_capacity(moves.len());
    for &(player, _) in moves {
        if out_of_bounds[player] {
            eliminations.push(Elimination {
                player,
                cause: EliminationCause::OutOfBounds,
            });
        } else if state.snakes[player].health == 0 {
            eliminations.push(Elimination {
                player,
                cause: EliminationCause::OutOfHealth,
            });
        } else {
            contenders.push(player);
        }
    }
    eliminations.extend(collisions(state, &contenders));
    for e in &eliminations {
        state.snakes[e.player].alive = false;
        debug!(player = e.player, cause = ?e.cause, turn = state.turn, "snake eliminated");
    }

    spawn::spawn_food(state, board, config, rng);

    let completed = state.turn + 1;
    if config.royale && completed % config.shrink_n_turns == 0 {
        if let Some(edge) = shrink_royale(state, board) {
            debug!(?edge, turn = completed, "royale zone shrunk");
        }
    }
    state.turn = completed;

    eliminations.extend(eliminate_stuck(state, board, config));
    eliminations
}

/// Collisions among snakes that survived bounds and health checks.
///
/// All snakes are judged against the same post-move bodies.
fn collisions(state: &State, contenders: &[usize]) -> Vec<Elimination> {
    let mut out = Vec::new();
    for &player in contenders {
        let snake = &state.snakes[player];
        let head = snake.head();

        let cause = if snake.body.iter().skip(1).any(|&c| c == head) {
            Some(EliminationCause::SelfCollision)
        } else if let Some(&by) = contenders
            .iter()
            .find(|&&q| q != player && state.snakes[q].body.iter().skip(1).any(|&c| c == head))
        {
            Some(EliminationCause::BodyCollision { by })
        } else {
            contenders
                .iter()
                .find(|&&q| {
                    q != player
                        && state.snakes[q].head() == head
                        && state.snakes[q].len() >= snake.len()
                })
                .map(|&by| EliminationCause::HeadToHead { by })
        };
        if let Some(cause) = cause {
            out.push(Elimination { player, cause });
        }
    }
    out
}

/// Eliminate alive snakes without any legal move.
pub(crate) fn eliminate_stuck(state: &mut State, board: &Board, config: &GameConfig) -> Vec<Elimination> {
    if config.all_actions_legal {
        return Vec::new();
    }
    let stuck: Vec<Elimination> = state
        .alive_players()
        .into_iter()
        .filter(|&p| legal_actions(state, board, config, p).is_empty())
        .map(|player| Elimination {
            player,
            cause: EliminationCause::NoLegalMove,
        })
        .collect();
    for e in &stuck {
        state.snakes[e.player].alive = false;
        debug!(player = e.player, turn = state.turn, "snake has no legal move");
    }
    stuck
}

/// Game ends when nobody is left, or only one snake in a multiplayer game.
pub(crate) fn update_terminal(state: &mut State, num_players: usize) {
    let alive = state.num_alive();
    state.terminal = alive == 0 || (num_players > 1 && alive < 2);
}

/// Cover the next edge of the safe zone with hazards.
///
/// Edges whose axis is down to a single line are skipped.
pub(crate) fn shrink_royale(state: &mut State, board: &Board) -> Option<ShrinkEdge> {
    let zone = state.safe_zone;
    if zone.min_x == zone.max_x && zone.min_y == zone.max_y {
        return None;
    }
    loop {
        let edge = SHRINK_ORDER[(state.shrinks % 4) as usize];
        state.shrinks += 1;
        let zone = &mut state.safe_zone;
        let line: Vec<CellId> = match edge {
            ShrinkEdge::Left | ShrinkEdge::Right if zone.min_x == zone.max_x => continue,
            ShrinkEdge::Down | ShrinkEdge::Up if zone.min_y == zone.max_y => continue,
            ShrinkEdge::Left => {
                let x = zone.min_x;
                zone.min_x += 1;
                (zone.min_y..=zone.max_y).map(|y| board.cell(x, y)).collect()
            }
            ShrinkEdge::Right => {
                let x = zone.max_x;
                zone.max_x -= 1;
                (zone.min_y..=zone.max_y).map(|y| board.cell(x, y)).collect()
            }
            ShrinkEdge::Down => {
                let y = zone.min_y;
                zone.min_y += 1;
                (zone.min_x..=zone.max_x).map(|x| board.cell(x, y)).collect()
            }
            ShrinkEdge::Up => {
                let y = zone.max_y;
                zone.max_y -= 1;
                (zone.min_x..=zone.max_x).map(|x| board.cell(x, y)).collect()
            }
        };
        for cell in line {
            state.hazards[cell as usize] = true;
        }
        return Some(edge);
    }
}
