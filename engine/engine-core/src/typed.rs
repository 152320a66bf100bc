//! Typed simultaneous-move game trait
//!
//! Every player at turn submits one action and the game resolves all of them
//! at once. Games own their state and random source, so a clone is a fully
//! independent branch that search and draw-avoidance code can step freely.

use crate::metadata::GameMetadata;

/// Engine identification information
#[derive(Debug, Clone, PartialEq)]
pub struct EngineId {
    pub env_id: String,
    pub build_id: String,
}

/// Result of resolving one joint action
#[derive(Debug, Clone, PartialEq)]
pub struct StepOutcome<I> {
    /// One reward per player id (not per player at turn)
    pub rewards: Vec<f32>,
    /// Whether the game reached a terminal state
    pub done: bool,
    /// Game specific information about the transition
    pub info: I,
}

/// Main trait for simultaneous-move games
///
/// Joint actions are indexed by position in [`SimultaneousGame::players_at_turn`],
/// so `joint[i]` is the action of `players_at_turn()[i]`.
///
/// # Example
///
/// ```rust
/// # use engine_core::typed::*;
/// # use engine_core::GameMetadata;
/// #[derive(Debug, Clone)]
/// struct Matching {
///     done: bool,
/// }
///
/// impl SimultaneousGame for Matching {
///     type Action = u8;
///     type Info = ();
///     type Error = std::convert::Infallible;
///
///     fn engine_id(&self) -> EngineId {
///         EngineId { env_id: "matching".into(), build_id: "0.1.0".into() }
///     }
///     fn metadata(&self) -> GameMetadata {
///         GameMetadata::new("matching", "Matching Pennies").with_actions(2)
///     }
///     fn num_players(&self) -> usize { 2 }
///     fn reset(&mut self) -> Result<(), Self::Error> {
///         self.done = false;
///         Ok(())
///     }
///     fn step(&mut self, joint: &[u8]) -> Result<StepOutcome<()>, Self::Error> {
///         self.done = true;
///         let r = if joint[0] == joint[1] { 1.0 } else { -1.0 };
///         Ok(StepOutcome { rewards: vec![r, -r], done: true, info: () })
///     }
///     fn players_at_turn(&self) -> Vec<usize> {
///         if self.done { Vec::new() } else { vec![0, 1] }
///     }
///     fn available_actions(&self, _player: usize) -> Vec<u8> { vec![0, 1] }
///     fn is_terminal(&self) -> bool { self.done }
/// }
///
/// let mut game = Matching { done: false };
/// let outcome = game.step(&[1, 1]).unwrap();
/// assert_eq!(outcome.rewards, vec![1.0, -1.0]);
/// ```
pub trait SimultaneousGame: Clone + std::fmt::Debug + Send + Sync + 'static {
    /// Action type - small and Copy
    type Action: Copy + PartialEq + std::fmt::Debug + Send + Sync + 'static;

    /// Per-step information returned alongside rewards
    type Info: Clone + std::fmt::Debug + Send + Sync + 'static;

    /// Error raised by reset and step
    type Error: std::error::Error + Send + Sync + 'static;

    /// Get engine identification information
    fn engine_id(&self) -> EngineId;

    /// Get game metadata for trainers and tooling
    fn metadata(&self) -> GameMetadata;

    /// Number of players the game was configured with
    fn num_players(&self) -> usize;

    /// Reinitialize the game from its configuration
    fn reset(&mut self) -> Result<(), Self::Error>;

    /// Resolve one joint action
    ///
    /// On error the game state is left unchanged.
    fn step(&mut self, joint: &[Self::Action]) -> Result<StepOutcome<Self::Info>, Self::Error>;

    /// Ids of the players that still act, ascending
    fn players_at_turn(&self) -> Vec<usize>;

    /// Number of players that still act
    fn num_players_at_turn(&self) -> usize {
        self.players_at_turn().len()
    }

    /// Legal actions of a player in a fixed order
    fn available_actions(&self, player: usize) -> Vec<Self::Action>;

    /// Whether the game is over
    fn is_terminal(&self) -> bool;

    /// Independent deep copy of the game, including its random source
    fn get_copy(&self) -> Self {
        self.clone()
    }
}
