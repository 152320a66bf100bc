//! Named encoding and game presets.

use crate::structs::{EncodingConfig, RawGameConfig, RewardConfig};

impl EncodingConfig {
    /// Food, board, and one body/head/tail slot per snake.
    pub fn simple() -> Self {
        Self::default()
    }

    /// Ordered bodies with health and length, no search features.
    pub fn vanilla() -> Self {
        Self {
            include_snake_body: false,
            include_snake_body_as_one_hot: true,
            include_snake_tail: false,
            include_snake_health: true,
            include_snake_length: true,
            ..Self::default()
        }
    }

    /// Full-information encoding with flood-fill features, centered on the observer.
    pub fn best() -> Self {
        Self {
            include_hazards: true,
            compress_enemies: true,
            include_snake_body: false,
            include_snake_body_as_one_hot: true,
            include_snake_health: true,
            include_snake_length: true,
            include_area_control: true,
            include_food_distance: true,
            include_tail_distance: true,
            centered: true,
            ..Self::default()
        }
    }

    /// Partial-observability encoding for games with a view radius.
    pub fn best_restricted() -> Self {
        Self {
            include_distance_map: true,
            include_hazards: true,
            compress_enemies: true,
            include_snake_body: false,
            include_snake_body_as_one_hot: true,
            include_snake_health: true,
            include_snake_length: true,
            include_tail_distance: true,
            include_view_mask: true,
            centered: true,
            ..Self::default()
        }
    }
}

/// Two-player game on an 11x11 board.
pub fn duel_config() -> RawGameConfig {
    let mut ec = EncodingConfig::best();
    ec.compress_enemies = false;
    RawGameConfig {
        w: 11,
        h: 11,
        num_players: 2,
        min_food: 1,
        food_spawn_chance: 15,
        ec,
        init_snake_len: Some(vec![3, 3]),
        all_actions_legal: false,
        reward: RewardConfig::Standard,
        ..RawGameConfig::default()
    }
}

/// Four-player game on an 11x11 board with kill rewards.
pub fn standard_config() -> RawGameConfig {
    RawGameConfig {
        w: 11,
        h: 11,
        num_players: 4,
        min_food: 1,
        food_spawn_chance: 15,
        ec: EncodingConfig::best(),
        init_snake_len: Some(vec![3, 3, 3, 3]),
        all_actions_legal: false,
        reward: RewardConfig::kill(),
        ..RawGameConfig::default()
    }
}

/// Four-player game on a 15x15 board where each snake sees 5 cells around its head.
pub fn restricted_standard_config() -> RawGameConfig {
    RawGameConfig {
        w: 15,
        h: 15,
        num_players: 4,
        min_food: 1,
        food_spawn_chance: 15,
        ec: EncodingConfig::best_restricted(),
        init_snake_len: Some(vec![3, 3, 3, 3]),
        all_actions_legal: false,
        reward: RewardConfig::kill(),
        view_radius: Some(5),
        ..RawGameConfig::default()
    }
}

/// Two-player restricted-view game on a 15x15 board.
pub fn restricted_duel_config() -> RawGameConfig {
    let mut ec = EncodingConfig::best_restricted();
    ec.compress_enemies = false;
    RawGameConfig {
        w: 15,
        h: 15,
        num_players: 2,
        min_food: 1,
        food_spawn_chance: 15,
        ec,
        init_snake_len: Some(vec![3, 3]),
        all_actions_legal: false,
        reward: RewardConfig::Standard,
        view_radius: Some(5),
        ..RawGameConfig::default()
    }
}
