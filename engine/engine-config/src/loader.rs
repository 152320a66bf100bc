//! Configuration loading logic.
//!
//! Handles loading game configs from files and applying environment variable overrides.

use crate::RawGameConfig;
use std::path::Path;
use tracing::{debug, info, warn};

/// Standard locations to search for battlesnake.toml
pub const CONFIG_SEARCH_PATHS: &[&str] = &[
    "battlesnake.toml",    // Current directory
    "../battlesnake.toml", // Parent directory (when running from subdirectory)
];

/// Load the game configuration from battlesnake.toml.
///
/// Searches for battlesnake.toml in the following order:
/// 1. Path specified by BATTLESNAKE_CONFIG environment variable
/// 2. Current directory (battlesnake.toml)
/// 3. Parent directory (../battlesnake.toml)
///
/// After loading, environment variable overrides are applied. The result
/// still has to be finalized.
pub fn load_config() -> RawGameConfig {
    // Check for explicit config path
    if let Ok(path) = std::env::var("BATTLESNAKE_CONFIG") {
        let path = Path::new(&path);
        if path.exists() {
            info!("Loading config from BATTLESNAKE_CONFIG: {}", path.display());
            return load_from_path(path);
        }
        warn!(
            "BATTLESNAKE_CONFIG={} not found, searching defaults",
            path.display()
        );
    }

    // Search default locations
    for path_str in CONFIG_SEARCH_PATHS {
        let path = Path::new(path_str);
        if path.exists() {
            info!("Loading config from {}", path.display());
            return load_from_path(path);
        }
    }

    // Fall back to defaults
    debug!("No battlesnake.toml found, using built-in defaults");
    apply_env_overrides(RawGameConfig::default())
}

/// Load configuration from a specific path.
pub fn load_from_path(path: &Path) -> RawGameConfig {
    match std::fs::read_to_string(path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(config) => apply_env_overrides(config),
            Err(e) => {
                warn!("Failed to parse {}: {}, using defaults", path.display(), e);
                apply_env_overrides(RawGameConfig::default())
            }
        },
        Err(e) => {
            warn!("Failed to read {}: {}, using defaults", path.display(), e);
            apply_env_overrides(RawGameConfig::default())
        }
    }
}

/// Macro to reduce env override boilerplate
macro_rules! env_override {
    // Parseable field (usize, u32, bool, f32, etc.)
    ($target:expr, $key:expr, parse) => {
        if let Ok(v) =
            std::env::var($key).and_then(|s| s.parse().map_err(|_| std::env::VarError::NotPresent))
        {
            $target = v;
        }
    };
    // Optional parseable field (Option<u32>, etc.)
    ($target:expr, $key:expr, optional_parse) => {
        if let Ok(v) =
            std::env::var($key).and_then(|s| s.parse().map_err(|_| std::env::VarError::NotPresent))
        {
            $target = Some(v);
        }
    };
}

/// Apply environment variable overrides to a configuration.
///
/// Environment variables follow the pattern: BATTLESNAKE_<SECTION>_<KEY>
/// with sections GAME and ENCODING. Per-player and position lists can only
/// be set from the file.
pub fn apply_env_overrides(mut config: RawGameConfig) -> RawGameConfig {
    // Game
    env_override!(config.num_players, "BATTLESNAKE_GAME_NUM_PLAYERS", parse);
    env_override!(config.w, "BATTLESNAKE_GAME_W", parse);
    env_override!(config.h, "BATTLESNAKE_GAME_H", parse);
    env_override!(
        config.all_actions_legal,
        "BATTLESNAKE_GAME_ALL_ACTIONS_LEGAL",
        parse
    );
    env_override!(config.min_food, "BATTLESNAKE_GAME_MIN_FOOD", parse);
    env_override!(
        config.food_spawn_chance,
        "BATTLESNAKE_GAME_FOOD_SPAWN_CHANCE",
        parse
    );
    env_override!(
        config.init_turns_played,
        "BATTLESNAKE_GAME_INIT_TURNS_PLAYED",
        parse
    );
    env_override!(config.wrapped, "BATTLESNAKE_GAME_WRAPPED", parse);
    env_override!(config.royale, "BATTLESNAKE_GAME_ROYALE", parse);
    env_override!(config.constrictor, "BATTLESNAKE_GAME_CONSTRICTOR", parse);
    env_override!(
        config.shrink_n_turns,
        "BATTLESNAKE_GAME_SHRINK_N_TURNS",
        parse
    );
    env_override!(
        config.hazard_damage,
        "BATTLESNAKE_GAME_HAZARD_DAMAGE",
        parse
    );
    env_override!(
        config.view_radius,
        "BATTLESNAKE_GAME_VIEW_RADIUS",
        optional_parse
    );

    // Encoding
    env_override!(
        config.ec.compress_enemies,
        "BATTLESNAKE_ENCODING_COMPRESS_ENEMIES",
        parse
    );
    env_override!(config.ec.centered, "BATTLESNAKE_ENCODING_CENTERED", parse);
    env_override!(
        config.ec.include_board,
        "BATTLESNAKE_ENCODING_INCLUDE_BOARD",
        parse
    );
    env_override!(
        config.ec.include_distance_map,
        "BATTLESNAKE_ENCODING_INCLUDE_DISTANCE_MAP",
        parse
    );
    env_override!(
        config.ec.include_view_mask,
        "BATTLESNAKE_ENCODING_INCLUDE_VIEW_MASK",
        parse
    );
    env_override!(
        config.ec.fixed_food_spawn_chance,
        "BATTLESNAKE_ENCODING_FIXED_FOOD_SPAWN_CHANCE",
        parse
    );

    config
}
