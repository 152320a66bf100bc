//! Configuration struct definitions.
//!
//! `RawGameConfig` is the loosely specified input: every field that the
//! finalize step derives from other fields is optional. Serde defaults pull
//! from the embedded defaults file.

use crate::defaults;
use serde::{Deserialize, Serialize};

/// Board coordinate `[x, y]`, origin bottom-left.
pub type Coord = [i32; 2];

// ============================================================================
// Serde default functions (required for #[serde(default = "...")])
// These call the accessor functions from defaults module
// ============================================================================

fn d_num_actions() -> usize {
    defaults::num_actions()
}
fn d_num_players() -> usize {
    defaults::num_players()
}
fn d_w() -> usize {
    defaults::width()
}
fn d_h() -> usize {
    defaults::height()
}
fn d_all_actions_legal() -> bool {
    defaults::all_actions_legal()
}
fn d_min_food() -> usize {
    defaults::min_food()
}
fn d_food_spawn_chance() -> u32 {
    defaults::food_spawn_chance()
}
fn d_init_turns_played() -> u32 {
    defaults::init_turns_played()
}
fn d_wrapped() -> bool {
    defaults::wrapped()
}
fn d_royale() -> bool {
    defaults::royale()
}
fn d_constrictor() -> bool {
    defaults::constrictor()
}
fn d_shrink_n_turns() -> u32 {
    defaults::shrink_n_turns()
}
fn d_hazard_damage() -> u32 {
    defaults::hazard_damage()
}
fn d_kill_reward() -> f32 {
    defaults::kill_reward()
}

// ============================================================================
// Configuration Structs
// ============================================================================

/// Unvalidated game configuration, as read from battlesnake.toml or built in code.
///
/// Call [`RawGameConfig::finalize`] to apply derived defaults and validate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawGameConfig {
    #[serde(default = "d_num_actions")]
    pub num_actions: usize,
    #[serde(default = "d_num_players")]
    pub num_players: usize,
    // board
    #[serde(default = "d_w")]
    pub w: usize,
    #[serde(default = "d_h")]
    pub h: usize,
    // encoding
    pub ec: EncodingConfig,
    // snakes
    #[serde(default = "d_all_actions_legal")]
    pub all_actions_legal: bool,
    pub max_snake_health: Option<Vec<u32>>,
    // food
    #[serde(default = "d_min_food")]
    pub min_food: usize,
    /// Percent chance (0-100) of spawning one extra food per turn.
    #[serde(default = "d_food_spawn_chance")]
    pub food_spawn_chance: u32,
    // game state initialization
    #[serde(default = "d_init_turns_played")]
    pub init_turns_played: u32,
    /// `None` means every snake starts alive.
    pub init_snakes_alive: Option<Vec<bool>>,
    /// Bodies head-first, one list per player. `None` spawns snakes randomly.
    pub init_snake_pos: Option<Vec<Vec<Coord>>>,
    /// `None` spawns food randomly, an empty list spawns no food.
    pub init_food_pos: Option<Vec<Coord>>,
    pub init_snake_health: Option<Vec<u32>>,
    pub init_snake_len: Option<Vec<usize>>,
    // rewards
    pub reward: RewardConfig,
    // special game modes
    #[serde(default = "d_wrapped")]
    pub wrapped: bool,
    #[serde(default = "d_royale")]
    pub royale: bool,
    #[serde(default = "d_constrictor")]
    pub constrictor: bool,
    #[serde(default = "d_shrink_n_turns")]
    pub shrink_n_turns: u32,
    #[serde(default = "d_hazard_damage")]
    pub hazard_damage: u32,
    pub init_hazards: Option<Vec<Coord>>,
    pub view_radius: Option<u32>,
}

impl Default for RawGameConfig {
    fn default() -> Self {
        Self {
            num_actions: defaults::num_actions(),
            num_players: defaults::num_players(),
            w: defaults::width(),
            h: defaults::height(),
            ec: EncodingConfig::default(),
            all_actions_legal: defaults::all_actions_legal(),
            max_snake_health: None,
            min_food: defaults::min_food(),
            food_spawn_chance: defaults::food_spawn_chance(),
            init_turns_played: defaults::init_turns_played(),
            init_snakes_alive: None,
            init_snake_pos: None,
            init_food_pos: None,
            init_snake_health: None,
            init_snake_len: None,
            reward: RewardConfig::default(),
            wrapped: defaults::wrapped(),
            royale: defaults::royale(),
            constrictor: defaults::constrictor(),
            shrink_n_turns: defaults::shrink_n_turns(),
            hazard_damage: defaults::hazard_damage(),
            init_hazards: None,
            view_radius: None,
        }
    }
}

/// Feature flags selecting the observation layers.
///
/// The flag names are part of the observation wire contract, see
/// [`crate::encoding_layer_indices`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncodingConfig {
    pub include_current_food: bool,
    pub include_next_food: bool,
    pub include_board: bool,
    pub include_number_of_turns: bool,
    pub include_distance_map: bool,
    pub include_hazards: bool,
    pub include_num_food_on_board: bool,
    /// Collapse all opponents into a single snake slot.
    pub compress_enemies: bool,
    pub include_snake_body: bool,
    pub include_snake_body_as_one_hot: bool,
    pub include_snake_head: bool,
    pub include_snake_tail: bool,
    pub include_snake_health: bool,
    pub include_snake_length: bool,
    pub include_area_control: bool,
    pub include_food_distance: bool,
    pub include_tail_distance: bool,
    pub include_view_mask: bool,
    /// Center the observation on the observing snake's head.
    pub centered: bool,
    /// Overrides the spawn chance used by the next-food layer when non-negative.
    pub fixed_food_spawn_chance: f32,
}

impl Default for EncodingConfig {
    fn default() -> Self {
        defaults::encoding()
    }
}

/// Reward policy applied after every step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RewardConfig {
    /// +1 for the last survivor, -1 for dying, 0 for simultaneous wipe-outs.
    #[default]
    Standard,
    /// Standard rewards plus `kill_reward` for every elimination a snake causes.
    Kill {
        #[serde(default = "d_kill_reward")]
        kill_reward: f32,
    },
}

impl RewardConfig {
    pub fn kill() -> Self {
        RewardConfig::Kill {
            kill_reward: defaults::kill_reward(),
        }
    }
}
