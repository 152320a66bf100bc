//! Game metadata for configuration and tooling
//!
//! This module provides descriptive metadata about a configured game that
//! trainers, search code, and debugging tools can use to configure themselves
//! without inspecting the game's internals.

use serde::{Deserialize, Serialize};

/// Metadata about a configured game
///
/// This struct contains all the information needed to:
/// - Allocate network inputs (obs_shape, layer_names)
/// - Configure action heads (num_actions)
/// - Label players in logs and renderings (player_names, player_symbols)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameMetadata {
    /// Environment identifier (e.g., "battlesnake")
    pub env_id: String,

    /// Human-readable display name
    pub display_name: String,

    /// Board width in cells
    pub board_width: usize,

    /// Board height in cells
    pub board_height: usize,

    /// Number of possible actions per player
    pub num_actions: usize,

    /// Number of players in the game
    pub player_count: usize,

    /// Display names for each player
    pub player_names: Vec<String>,

    /// Single-character symbols for each player, as used by text renderings
    pub player_symbols: Vec<char>,

    /// Shape of one player's observation, channel first (`[C, H, W]`)
    pub obs_shape: Vec<usize>,

    /// Observation channel names in channel order
    pub layer_names: Vec<String>,

    /// Brief description of the game variant
    pub description: String,
}

impl GameMetadata {
    /// Create a new GameMetadata with required fields
    pub fn new(env_id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            env_id: env_id.into(),
            display_name: display_name.into(),
            board_width: 0,
            board_height: 0,
            num_actions: 0,
            player_count: 2,
            player_names: vec!["Player 1".to_string(), "Player 2".to_string()],
            player_symbols: vec!['1', '2'],
            obs_shape: Vec::new(),
            layer_names: Vec::new(),
            description: String::new(),
        }
    }

    /// Builder method for board dimensions
    pub fn with_board(mut self, width: usize, height: usize) -> Self {
        self.board_width = width;
        self.board_height = height;
        self
    }

    /// Builder method for action count
    pub fn with_actions(mut self, num_actions: usize) -> Self {
        self.num_actions = num_actions;
        self
    }

    /// Builder method for the per-player observation shape and channel names
    pub fn with_observation(mut self, obs_shape: Vec<usize>, layer_names: Vec<String>) -> Self {
        self.obs_shape = obs_shape;
        self.layer_names = layer_names;
        self
    }

    /// Builder method for player information
    pub fn with_players(mut self, count: usize, names: Vec<String>, symbols: Vec<char>) -> Self {
        self.player_count = count;
        self.player_names = names;
        self.player_symbols = symbols;
        self
    }

    /// Builder method for description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Get the total number of board cells
    pub fn board_size(&self) -> usize {
        self.board_width * self.board_height
    }

    /// Number of f32 values in one player's observation
    pub fn obs_size(&self) -> usize {
        if self.obs_shape.is_empty() {
            0
        } else {
            self.obs_shape.iter().product()
        }
    }

    /// Channel index of a named observation layer
    pub fn layer_index(&self, name: &str) -> Option<usize> {
        self.layer_names.iter().position(|n| n == name)
    }
}
