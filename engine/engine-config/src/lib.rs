//! Battlesnake game configuration.
//!
//! This crate provides the configuration model shared by the engine crates:
//! the raw input struct, its finalize/validate step, named presets, and the
//! observation layer layout derived from the encoding flags.
//!
//! # Configuration Priority
//!
//! Settings are loaded with the following priority (highest to lowest):
//! 1. Environment variables (`BATTLESNAKE_<SECTION>_<KEY>`)
//! 2. battlesnake.toml file
//! 3. Built-in defaults
//!
//! # Environment Variable Override Pattern
//!
//! ```text
//! BATTLESNAKE_<SECTION>_<KEY>=value
//!
//! Examples:
//!     BATTLESNAKE_GAME_NUM_PLAYERS=4
//!     BATTLESNAKE_GAME_WRAPPED=true
//!     BATTLESNAKE_ENCODING_CENTERED=false
//! ```

mod defaults;
mod layout;
mod loader;
mod presets;
mod structs;
mod validate;

pub use defaults::*;
pub use layout::{encoding_layer_indices, LayerLayout};
pub use loader::{apply_env_overrides, load_config, load_from_path, CONFIG_SEARCH_PATHS};
pub use presets::{duel_config, restricted_duel_config, restricted_standard_config, standard_config};
pub use structs::*;
pub use validate::{ConfigError, GameConfig};

#[cfg(test)]
mod tests;
