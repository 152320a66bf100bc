//! Initial placement and per-turn food spawning
//!
//! Random placement follows the standard Battlesnake layout: heads on fixed
//! start points on boards of at least 7x7, one food diagonal to every snake
//! and one in the centre.

use std::collections::VecDeque;

use engine_config::GameConfig;
use rand::seq::SliceRandom;
use rand::Rng;
use rand_chacha::ChaCha20Rng;
use tracing::{debug, warn};

use crate::board::{Board, CellId};
use crate::state::{Snake, State};
use crate::GameError;

/// Smallest board side with fixed start points
pub const START_POINTS_MIN_SIDE: usize = 7;

/// Spawn at most one food on a free cell.
///
/// Below `min_food` a food is always placed. Otherwise one draw decides
/// whether `food_spawn_chance` percent hits, and a second draw picks the cell.
pub(crate) fn spawn_food(state: &mut State, board: &Board, config: &GameConfig, rng: &mut ChaCha20Rng) {
    let free = state.free_cells(board.area());
    if free.is_empty() {
        if state.food_count < config.min_food {
            warn!(
                food = state.food_count,
                min_food = config.min_food,
                "no free cell to spawn food"
            );
        }
        return;
    }
    if state.food_count < config.min_food {
        let cell = free[rng.gen_range(0..free.len())];
        state.add_food(cell);
    } else if rng.gen_range(0..100) < config.food_spawn_chance {
        let cell = free[rng.gen_range(0..free.len())];
        state.add_food(cell);
    }
}

/// Build the initial state of an episode
pub(crate) fn initial_state(
    board: &Board,
    config: &GameConfig,
    rng: &mut ChaCha20Rng,
) -> Result<State, GameError> {
    let mut state = State::empty(board, config.init_turns_played);
    for coord in &config.init_hazards {
        state.hazards[board.from_coord(coord) as usize] = true;
    }

    let heads = match &config.init_snake_pos {
        Some(bodies) => {
            state.snakes = fixed_snakes(board, config, bodies);
            None
        }
        None => {
            let heads = random_heads(&state, board, config.num_players, rng)?;
            state.snakes = heads
                .iter()
                .enumerate()
                .map(|(p, &head)| {
                    let body: VecDeque<CellId> = std::iter::repeat(head)
                        .take(config.init_snake_len[p])
                        .collect();
                    Snake::new(
                        body,
                        config.init_snake_health[p],
                        config.max_snake_health[p],
                        config.init_snakes_alive[p],
                    )
                })
                .collect();
            Some(heads)
        }
    };

    match &config.init_food_pos {
        Some(food) => {
            for coord in food {
                state.add_food(board.from_coord(coord));
            }
        }
        None => random_food(&mut state, board, config, rng),
    }

    if heads.is_some() {
        check_placement(&state, board, config.init_food_pos.is_none())?;
    }
    Ok(state)
}

fn fixed_snakes(board: &Board, config: &GameConfig, bodies: &[Vec<engine_config::Coord>]) -> Vec<Snake> {
    bodies
        .iter()
        .enumerate()
        .map(|(p, coords)| {
            let mut body: VecDeque<CellId> = coords.iter().map(|c| board.from_coord(c)).collect();
            while body.len() < config.init_snake_len[p] {
                let tail = body[body.len() - 1];
                body.push_back(tail);
            }
            Snake::new(
                body,
                config.init_snake_health[p],
                config.max_snake_health[p],
                config.init_snakes_alive[p],
            )
        })
        .collect()
}

/// Head cells for randomly placed snakes
fn random_heads(
    state: &State,
    board: &Board,
    num_players: usize,
    rng: &mut ChaCha20Rng,
) -> Result<Vec<CellId>, GameError> {
    let mut heads = Vec::with_capacity(num_players);
    if board.width >= START_POINTS_MIN_SIDE && board.height >= START_POINTS_MIN_SIDE {
        let (mn, mx) = (1, board.width - 2);
        let md = (board.width - 1) / 2;
        let mut corners = vec![
            board.cell(mn, mn),
            board.cell(mn, mx),
            board.cell(mx, mn),
            board.cell(mx, mx),
        ];
        let mut cardinal = vec![
            board.cell(mn, md),
            board.cell(md, mn),
            board.cell(md, mx),
            board.cell(mx, md),
        ];
        corners.shuffle(rng);
        cardinal.shuffle(rng);
        heads.extend(corners.into_iter().chain(cardinal).take(num_players));
    }

    while heads.len() < num_players {
        let free: Vec<CellId> = (0..board.area() as CellId)
            .filter(|&c| !heads.contains(&c) && !state.has_hazard(c))
            .collect();
        if free.is_empty() {
            return Err(GameError::InvariantViolation(format!(
                "no free cell for snake {} of {}",
                heads.len(),
                num_players
            )));
        }
        heads.push(free[rng.gen_range(0..free.len())]);
    }
    Ok(heads)
}

/// One food diagonal to every alive snake, the centre, then up to `min_food`
fn random_food(state: &mut State, board: &Board, config: &GameConfig, rng: &mut ChaCha20Rng) {
    let heads: Vec<CellId> = state
        .snakes
        .iter()
        .filter(|s| s.alive)
        .map(|s| s.head())
        .collect();
    for head in heads {
        let (hx, hy) = board.coords(head);
        let occupied = state.occupied(board.area());
        let centre_dist = board.centre_distance(head);
        let candidates: Vec<CellId> = [(-1, -1), (-1, 1), (1, -1), (1, 1)]
            .into_iter()
            .map(|(dx, dy)| (hx as i32 + dx, hy as i32 + dy))
            .filter(|&(x, y)| board.contains(x, y))
            .map(|(x, y)| board.cell(x as usize, y as usize))
            .filter(|&c| {
                !occupied[c as usize]
                    && !state.has_food(c)
                    && !state.has_hazard(c)
                    && !board.is_corner(c)
                    && board.centre_distance(c) >= centre_dist
            })
            .collect();
        if !candidates.is_empty() {
            let cell = candidates[rng.gen_range(0..candidates.len())];
            state.add_food(cell);
        }
    }

    let centre = board.centre();
    let occupied = state.occupied(board.area());
    if !occupied[centre as usize] && !state.has_hazard(centre) {
        state.add_food(centre);
    }

    while state.food_count < config.min_food {
        let free = state.free_cells(board.area());
        if free.is_empty() {
            warn!(
                food = state.food_count,
                min_food = config.min_food,
                "board too full to place initial food"
            );
            break;
        }
        let cell = free[rng.gen_range(0..free.len())];
        state.add_food(cell);
    }
    debug!(food = state.food_count, "initial food placed");
}

/// Randomly placed snakes and food must not overlap
fn check_placement(state: &State, board: &Board, random_food: bool) -> Result<(), GameError> {
    let mut owner: Vec<Option<usize>> = vec![None; board.area()];
    for (p, snake) in state.snakes.iter().enumerate() {
        for &c in &snake.body {
            match owner[c as usize] {
                Some(q) if q != p => {
                    return Err(GameError::InvariantViolation(format!(
                        "snakes {q} and {p} overlap at cell {c}"
                    )))
                }
                _ => owner[c as usize] = Some(p),
            }
        }
    }
    for c in state.food_cells() {
        if let Some(p) = owner[c as usize] {
            return Err(GameError::InvariantViolation(format!(
                "food at cell {c} overlaps snake {p}"
            )));
        }
        if random_food && state.has_hazard(c) {
            return Err(GameError::InvariantViolation(format!(
                "food at cell {c} overlaps a hazard"
            )));
        }
    }
    Ok(())
}
