//! Default configuration values loaded from config.defaults.toml.
//!
//! The defaults file is embedded at compile time so every consumer of the
//! engine starts from the same baseline game.

use once_cell::sync::Lazy;
use serde::Deserialize;

use crate::structs::EncodingConfig;

/// The embedded defaults TOML file (loaded at compile time)
const DEFAULTS_TOML: &str = include_str!("../../../config.defaults.toml");

/// Parsed defaults structure (parsed once at first use)
static DEFAULTS: Lazy<DefaultsConfig> = Lazy::new(|| {
    toml::from_str(DEFAULTS_TOML).expect("config.defaults.toml should be valid TOML")
});

// ============================================================================
// Internal structs for parsing config.defaults.toml
// ============================================================================

#[derive(Debug, Deserialize)]
struct DefaultsConfig {
    game: GameDefaults,
    encoding: EncodingDefaults,
    reward: RewardDefaults,
}

#[derive(Debug, Deserialize)]
struct GameDefaults {
    num_actions: usize,
    num_players: usize,
    w: usize,
    h: usize,
    all_actions_legal: bool,
    min_food: usize,
    food_spawn_chance: u32,
    init_turns_played: u32,
    snake_health: u32,
    snake_len: usize,
    wrapped: bool,
    royale: bool,
    constrictor: bool,
    shrink_n_turns: u32,
    hazard_damage: u32,
}

#[derive(Debug, Deserialize)]
struct EncodingDefaults {
    include_current_food: bool,
    include_next_food: bool,
    include_board: bool,
    include_number_of_turns: bool,
    include_distance_map: bool,
    include_hazards: bool,
    include_num_food_on_board: bool,
    compress_enemies: bool,
    include_snake_body: bool,
    include_snake_body_as_one_hot: bool,
    include_snake_head: bool,
    include_snake_tail: bool,
    include_snake_health: bool,
    include_snake_length: bool,
    include_area_control: bool,
    include_food_distance: bool,
    include_tail_distance: bool,
    include_view_mask: bool,
    centered: bool,
    fixed_food_spawn_chance: f32,
}

#[derive(Debug, Deserialize)]
struct RewardDefaults {
    kill_reward: f32,
}

// ============================================================================
// Public accessor functions
// ============================================================================

// Game
pub fn num_actions() -> usize {
    DEFAULTS.game.num_actions
}
pub fn num_players() -> usize {
    DEFAULTS.game.num_players
}
pub fn width() -> usize {
    DEFAULTS.game.w
}
pub fn height() -> usize {
    DEFAULTS.game.h
}
pub fn all_actions_legal() -> bool {
    DEFAULTS.game.all_actions_legal
}
pub fn min_food() -> usize {
    DEFAULTS.game.min_food
}
pub fn food_spawn_chance() -> u32 {
    DEFAULTS.game.food_spawn_chance
}
pub fn init_turns_played() -> u32 {
    DEFAULTS.game.init_turns_played
}
pub fn snake_health() -> u32 {
    DEFAULTS.game.snake_health
}
pub fn snake_len() -> usize {
    DEFAULTS.game.snake_len
}
pub fn wrapped() -> bool {
    DEFAULTS.game.wrapped
}
pub fn royale() -> bool {
    DEFAULTS.game.royale
}
pub fn constrictor() -> bool {
    DEFAULTS.game.constrictor
}
pub fn shrink_n_turns() -> u32 {
    DEFAULTS.game.shrink_n_turns
}
pub fn hazard_damage() -> u32 {
    DEFAULTS.game.hazard_damage
}

// Encoding
pub fn encoding() -> EncodingConfig {
    let e = &DEFAULTS.encoding;
    EncodingConfig {
        include_current_food: e.include_current_food,
        include_next_food: e.include_next_food,
        include_board: e.include_board,
        include_number_of_turns: e.include_number_of_turns,
        include_distance_map: e.include_distance_map,
        include_hazards: e.include_hazards,
        include_num_food_on_board: e.include_num_food_on_board,
        compress_enemies: e.compress_enemies,
        include_snake_body: e.include_snake_body,
        include_snake_body_as_one_hot: e.include_snake_body_as_one_hot,
        include_snake_head: e.include_snake_head,
        include_snake_tail: e.include_snake_tail,
        include_snake_health: e.include_snake_health,
        include_snake_length: e.include_snake_length,
        include_area_control: e.include_area_control,
        include_food_distance: e.include_food_distance,
        include_tail_distance: e.include_tail_distance,
        include_view_mask: e.include_view_mask,
        centered: e.centered,
        fixed_food_spawn_chance: e.fixed_food_spawn_chance,
    }
}

// Reward
pub fn kill_reward() -> f32 {
    DEFAULTS.reward.kill_reward
}
