//! Battlesnake simulation engine
//!
//! Snakes move simultaneously on a bounded or wrapped board, eat food, grow,
//! take hazard damage and are eliminated by walls, starvation and collisions.
//! Royale mode grows a hazard ring over time, constrictor mode keeps every
//! snake at full length and health.
//!
//! # Actions
//!
//! Each player at turn submits one [`Direction`]: `Up` (y+1), `Right` (x+1),
//! `Down` (y-1) or `Left` (x-1), encoded as 0 to 3. Joint actions are ordered
//! like
//! [`players_at_turn`](engine_core::SimultaneousGame::players_at_turn).
//!
//! # Usage
//!
//! ```rust
//! use engine_config::RawGameConfig;
//! use engine_core::SimultaneousGame;
//! use games_battlesnake::BattleSnake;
//!
//! let mut game = BattleSnake::from_raw(RawGameConfig::default(), 42).unwrap();
//! let joint: Vec<_> = game
//!     .players_at_turn()
//!     .iter()
//!     .map(|&p| game.available_actions(p)[0])
//!     .collect();
//! let outcome = game.step(&joint).unwrap();
//! assert_eq!(outcome.rewards.len(), 2);
//! let obs = game.get_obs();
//! assert_eq!(obs.shape[1], game.layout().len());
//! ```

pub mod board;
pub mod encoding;
pub mod flood;
pub mod game;
pub mod render;
pub mod rewards;
pub mod rules;
pub mod spawn;
pub mod state;

pub use board::{Board, CellId, Direction};
pub use encoding::{Encoder, Layer, Observation, SnakeLayer};
pub use game::{BattleSnake, StepInfo};
pub use rewards::compute_rewards;
pub use rules::{legal_actions, Elimination, EliminationCause, ShrinkEdge, SHRINK_ORDER};
pub use state::{SafeZone, Snake, State};

/// Errors raised by the game
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("invalid action {action:?} for player {player}")]
    InvalidAction { player: usize, action: Direction },
    #[error("unknown action index {0}, expected 0-3")]
    UnknownAction(usize),
    #[error("expected {expected} actions, one per player at turn, got {actual}")]
    WrongActionCount { expected: usize, actual: usize },
    #[error("invariant violated: {0}")]
    InvariantViolation(String),
    #[error("game is over")]
    GameOver,
    #[error(transparent)]
    Config(#[from] engine_config::ConfigError),
}
