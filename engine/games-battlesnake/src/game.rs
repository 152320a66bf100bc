//! Battlesnake game implementing the simultaneous-move engine trait

use std::sync::Arc;

use engine_config::{GameConfig, LayerLayout, RawGameConfig};
use engine_core::typed::{EngineId, SimultaneousGame, StepOutcome};
use engine_core::GameMetadata;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use serde::Serialize;
use tracing::{debug, trace};

use crate::board::{Board, Direction};
use crate::encoding::{Encoder, Observation};
use crate::rewards::compute_rewards;
use crate::rules::{self, Elimination};
use crate::state::{Snake, State};
use crate::{render, spawn, GameError};

/// Information about a resolved turn
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepInfo {
    /// Turn counter after the step
    pub turn: u32,
    pub eliminations: Vec<Elimination>,
}

/// A Battlesnake episode
///
/// The configuration and channel layout are shared between clones, the state
/// and random source are owned. Cloning produces an independent branch.
#[derive(Debug, Clone)]
pub struct BattleSnake {
    config: Arc<GameConfig>,
    encoder: Arc<Encoder>,
    board: Board,
    state: State,
    rng: ChaCha20Rng,
}

impl BattleSnake {
    /// Create a game seeded from system entropy
    pub fn new(config: impl Into<Arc<GameConfig>>) -> Result<Self, GameError> {
        Self::from_rng(config.into(), ChaCha20Rng::from_entropy())
    }

    /// Create a reproducible game
    pub fn with_seed(config: impl Into<Arc<GameConfig>>, seed: u64) -> Result<Self, GameError> {
        Self::from_rng(config.into(), ChaCha20Rng::seed_from_u64(seed))
    }

    /// Finalize a raw configuration and create a reproducible game
    pub fn from_raw(raw: RawGameConfig, seed: u64) -> Result<Self, GameError> {
        Self::with_seed(raw.finalize()?, seed)
    }

    fn from_rng(config: Arc<GameConfig>, rng: ChaCha20Rng) -> Result<Self, GameError> {
        let board = Board::new(config.w, config.h, config.wrapped);
        let encoder = Arc::new(Encoder::new(&config));
        let mut game = Self {
            state: State::empty(&board, config.init_turns_played),
            config,
            encoder,
            board,
            rng,
        };
        game.reset()?;
        Ok(game)
    }

    /// Reseed the random source without touching the state
    pub fn set_seed(&mut self, seed: u64) {
        self.rng = ChaCha20Rng::seed_from_u64(seed);
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn layout(&self) -> &LayerLayout {
        self.encoder.layout()
    }

    pub fn turn(&self) -> u32 {
        self.state.turn
    }

    pub fn snake(&self, player: usize) -> Option<&Snake> {
        self.state.snakes.get(player)
    }

    /// `[C, H, W]` shape of one player's observation
    pub fn obs_shape(&self) -> [usize; 3] {
        let (h, w) = self.encoder.plane_shape(&self.config);
        [self.encoder.layers().len(), h, w]
    }

    /// Observations of all players at turn
    pub fn get_obs(&self) -> Observation {
        let players = self.players_at_turn();
        self.encoder
            .encode(&self.state, &self.board, &self.config, &players)
    }

    pub fn render(&self) -> String {
        render::render(&self.state, &self.board)
    }

    /// Legal moves of a player; empty when the snake is dead
    pub fn legal_moves(&self, player: usize) -> Vec<Direction> {
        rules::legal_actions(&self.state, &self.board, &self.config, player)
    }

    /// Step with raw action indices
    pub fn step_indices(&mut self, joint: &[usize]) -> Result<StepOutcome<StepInfo>, GameError> {
        let joint = joint
            .iter()
            .map(|&a| Direction::try_from(a))
            .collect::<Result<Vec<_>, _>>()?;
        self.step(&joint)
    }

    fn validate(&self, players: &[usize], joint: &[Direction]) -> Result<(), GameError> {
        if self.state.terminal {
            return Err(GameError::GameOver);
        }
        if joint.len() != players.len() {
            return Err(GameError::WrongActionCount {
                expected: players.len(),
                actual: joint.len(),
            });
        }
        if !self.config.all_actions_legal {
            for (&player, &action) in players.iter().zip(joint) {
                if !self.legal_moves(player).contains(&action) {
                    return Err(GameError::InvalidAction { player, action });
                }
            }
        }
        Ok(())
    }
}

impl SimultaneousGame for BattleSnake {
    type Action = Direction;
    type Info = StepInfo;
    type Error = GameError;

    fn engine_id(&self) -> EngineId {
        EngineId {
            env_id: "battlesnake".to_string(),
            build_id: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    fn metadata(&self) -> GameMetadata {
        let n = self.config.num_players;
        let mut modes = Vec::new();
        if self.config.wrapped {
            modes.push("wrapped");
        }
        if self.config.royale {
            modes.push("royale");
        }
        if self.config.constrictor {
            modes.push("constrictor");
        }
        let mode = if modes.is_empty() {
            "standard".to_string()
        } else {
            modes.join("+")
        };
        GameMetadata::new("battlesnake", "Battlesnake")
            .with_board(self.config.w, self.config.h)
            .with_actions(self.config.num_actions)
            .with_observation(self.obs_shape().to_vec(), self.layout().names().to_vec())
            .with_players(
                n,
                (0..n).map(|p| format!("Snake {p}")).collect(),
                (0..n)
                    .map(|p| char::from_digit((p % 10) as u32, 10).unwrap_or('?'))
                    .collect(),
            )
            .with_description(format!(
                "{} {}x{} with {} snakes",
                mode, self.config.w, self.config.h, n
            ))
    }

    fn num_players(&self) -> usize {
        self.config.num_players
    }

    fn reset(&mut self) -> Result<(), GameError> {
        let mut state = spawn::initial_state(&self.board, &self.config, &mut self.rng)?;
        let stuck = rules::eliminate_stuck(&mut state, &self.board, &self.config);
        rules::update_terminal(&mut state, self.config.num_players);
        debug!(
            players = self.config.num_players,
            turn = state.turn,
            stuck = stuck.len(),
            food = state.food_count,
            "game reset"
        );
        self.state = state;
        Ok(())
    }

    fn step(&mut self, joint: &[Direction]) -> Result<StepOutcome<StepInfo>, GameError> {
        let players = self.players_at_turn();
        self.validate(&players, joint)?;

        let moves: Vec<(usize, Direction)> = players.iter().copied().zip(joint.iter().copied()).collect();
        let eliminations =
            rules::resolve_turn(&mut self.state, &self.board, &self.config, &moves, &mut self.rng);
        rules::update_terminal(&mut self.state, self.config.num_players);

        let alive: Vec<bool> = self.state.snakes.iter().map(|s| s.alive).collect();
        let rewards = compute_rewards(&self.config.reward, &eliminations, &alive, self.state.terminal);
        trace!(
            turn = self.state.turn,
            alive = self.state.num_alive(),
            done = self.state.terminal,
            "step"
        );

        Ok(StepOutcome {
            rewards,
            done: self.state.terminal,
            info: StepInfo {
                turn: self.state.turn,
                eliminations,
            },
        })
    }

    fn players_at_turn(&self) -> Vec<usize> {
        self.state.alive_players()
    }

    fn available_actions(&self, player: usize) -> Vec<Direction> {
        self.legal_moves(player)
    }

    fn is_terminal(&self) -> bool {
        self.state.terminal
    }
}
