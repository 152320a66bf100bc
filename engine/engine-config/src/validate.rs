//! Finalization and validation of game configurations.
//!
//! `RawGameConfig::finalize` fills every derived default and then checks the
//! invariants below. The resulting [`GameConfig`] is never mutated by the engine.

use std::collections::HashSet;

use crate::defaults;
use crate::structs::{Coord, EncodingConfig, RawGameConfig, RewardConfig};

/// Raised when a configuration violates an invariant. Never recovered.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid board: {0}")]
    Board(String),
    #[error("invalid spawn configuration: {0}")]
    Spawn(String),
    #[error("`{field}` has {actual} entries, expected one per player ({expected})")]
    PlayerCount {
        field: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("invalid health: {0}")]
    Health(String),
    #[error("incompatible game modes: {0}")]
    Mode(String),
    #[error("invalid encoding: {0}")]
    Encoding(String),
    #[error("invalid value for `{field}`: {reason}")]
    Value { field: &'static str, reason: String },
}

/// Fully resolved, validated game configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub num_actions: usize,
    pub num_players: usize,
    pub w: usize,
    pub h: usize,
    pub ec: EncodingConfig,
    pub all_actions_legal: bool,
    pub max_snake_health: Vec<u32>,
    pub min_food: usize,
    pub food_spawn_chance: u32,
    pub init_turns_played: u32,
    pub init_snakes_alive: Vec<bool>,
    pub init_snake_pos: Option<Vec<Vec<Coord>>>,
    pub init_food_pos: Option<Vec<Coord>>,
    pub init_snake_health: Vec<u32>,
    pub init_snake_len: Vec<usize>,
    pub reward: RewardConfig,
    pub wrapped: bool,
    pub royale: bool,
    pub constrictor: bool,
    pub shrink_n_turns: u32,
    pub hazard_damage: u32,
    pub init_hazards: Vec<Coord>,
    pub view_radius: Option<u32>,
}

impl RawGameConfig {
    /// Apply derived defaults (including the constrictor overrides) and validate.
    pub fn finalize(self) -> Result<GameConfig, ConfigError> {
        let n = self.num_players;
        let mut config = GameConfig {
            num_actions: self.num_actions,
            num_players: n,
            w: self.w,
            h: self.h,
            ec: self.ec,
            all_actions_legal: self.all_actions_legal,
            max_snake_health: self
                .max_snake_health
                .unwrap_or_else(|| vec![defaults::snake_health(); n]),
            min_food: self.min_food,
            food_spawn_chance: self.food_spawn_chance,
            init_turns_played: self.init_turns_played,
            init_snakes_alive: self.init_snakes_alive.unwrap_or_else(|| vec![true; n]),
            init_snake_pos: self.init_snake_pos,
            init_food_pos: self.init_food_pos,
            init_snake_health: self
                .init_snake_health
                .unwrap_or_else(|| vec![defaults::snake_health(); n]),
            init_snake_len: self
                .init_snake_len
                .unwrap_or_else(|| vec![defaults::snake_len(); n]),
            reward: self.reward,
            wrapped: self.wrapped,
            royale: self.royale,
            constrictor: self.constrictor,
            shrink_n_turns: self.shrink_n_turns,
            hazard_damage: self.hazard_damage,
            init_hazards: self.init_hazards.unwrap_or_default(),
            view_radius: self.view_radius,
        };

        if config.constrictor {
            // Snakes are permanently at full length and health.
            let full = config.w * config.h + 1;
            config.init_snake_len = vec![full; n];
            config.init_snake_health = vec![full as u32; n];
            config.max_snake_health = vec![full as u32; n];
            config.init_hazards.clear();
            config.init_food_pos = Some(Vec::new());
            config.food_spawn_chance = 0;
            config.min_food = 0;
        }

        config.validate()?;
        Ok(config)
    }
}

impl GameConfig {
    /// Total number of board cells.
    pub fn area(&self) -> usize {
        self.w * self.h
    }

    /// Whether snakes and food spawn at random positions.
    pub fn spawns_randomly(&self) -> bool {
        self.init_snake_pos.is_none()
    }

    /// Check every configuration invariant.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_board()?;
        self.validate_spawns()?;
        self.validate_players()?;
        self.validate_modes()?;
        self.validate_encoding()
    }

    fn validate_board(&self) -> Result<(), ConfigError> {
        if self.w == 0 || self.h == 0 {
            return Err(ConfigError::Board(format!(
                "board must have at least one cell, got {}x{}",
                self.w, self.h
            )));
        }
        if self.area() > u16::MAX as usize {
            return Err(ConfigError::Board(format!(
                "board of {} cells exceeds the {} cell limit",
                self.area(),
                u16::MAX
            )));
        }
        if self.num_actions != 4 {
            return Err(ConfigError::Value {
                field: "num_actions",
                reason: format!("snakes have exactly 4 actions, got {}", self.num_actions),
            });
        }
        if self.food_spawn_chance > 100 {
            return Err(ConfigError::Value {
                field: "food_spawn_chance",
                reason: format!("percent chance must be <= 100, got {}", self.food_spawn_chance),
            });
        }
        if self.shrink_n_turns == 0 {
            return Err(ConfigError::Value {
                field: "shrink_n_turns",
                reason: "must be at least 1".into(),
            });
        }
        for cell in &self.init_hazards {
            self.check_in_bounds("init_hazards", cell)?;
        }
        Ok(())
    }

    fn validate_spawns(&self) -> Result<(), ConfigError> {
        if let Some(food) = &self.init_food_pos {
            if food.len() < self.min_food {
                return Err(ConfigError::Spawn(format!(
                    "{} fixed food cells but min_food is {}",
                    food.len(),
                    self.min_food
                )));
            }
            if !food.is_empty() && self.init_snake_pos.is_none() {
                return Err(ConfigError::Spawn(
                    "cannot spawn snakes randomly and food fixed".into(),
                ));
            }
            for cell in food {
                self.check_in_bounds("init_food_pos", cell)?;
            }
        }
        if let Some(bodies) = &self.init_snake_pos {
            if bodies.len() != self.num_players {
                return Err(ConfigError::PlayerCount {
                    field: "init_snake_pos",
                    expected: self.num_players,
                    actual: bodies.len(),
                });
            }
            if self.init_food_pos.is_none() {
                return Err(ConfigError::Spawn(
                    "cannot spawn snakes fixed and food randomly".into(),
                ));
            }
            self.validate_fixed_bodies(bodies)?;
        }
        let odd_square = self.w == self.h && self.w % 2 == 1;
        if !odd_square && (self.init_snake_pos.is_none() || self.init_food_pos.is_none()) {
            return Err(ConfigError::Spawn(format!(
                "cannot spawn randomly on a {}x{} board, odd square boards only",
                self.w, self.h
            )));
        }
        Ok(())
    }

    fn validate_fixed_bodies(&self, bodies: &[Vec<Coord>]) -> Result<(), ConfigError> {
        let mut owner_of: HashSet<Coord> = HashSet::new();
        for (player, body) in bodies.iter().enumerate() {
            if body.is_empty() {
                return Err(ConfigError::Spawn(format!("snake {player} has an empty body")));
            }
            let mut own: HashSet<Coord> = HashSet::new();
            for cell in body {
                self.check_in_bounds("init_snake_pos", cell)?;
                own.insert(*cell);
            }
            for cell in &own {
                if !owner_of.insert(*cell) {
                    return Err(ConfigError::Spawn(format!(
                        "snake {player} overlaps another snake at {cell:?}"
                    )));
                }
            }
        }
        if let Some(food) = &self.init_food_pos {
            if let Some(cell) = food.iter().find(|cell| owner_of.contains(*cell)) {
                return Err(ConfigError::Spawn(format!("food at {cell:?} overlaps a snake")));
            }
        }
        Ok(())
    }

    fn validate_players(&self) -> Result<(), ConfigError> {
        if self.num_players == 0 {
            return Err(ConfigError::Value {
                field: "num_players",
                reason: "at least one player is required".into(),
            });
        }
        let n = self.num_players;
        let check = |field: &'static str, actual: usize| {
            if actual == n {
                Ok(())
            } else {
                Err(ConfigError::PlayerCount {
                    field,
                    expected: n,
                    actual,
                })
            }
        };
        check("init_snake_health", self.init_snake_health.len())?;
        check("max_snake_health", self.max_snake_health.len())?;
        check("init_snake_len", self.init_snake_len.len())?;
        check("init_snakes_alive", self.init_snakes_alive.len())?;

        for p in 0..n {
            if self.max_snake_health[p] < self.init_snake_health[p] {
                return Err(ConfigError::Health(format!(
                    "snake {p} starts with {} health above its maximum {}",
                    self.init_snake_health[p], self.max_snake_health[p]
                )));
            }
            if self.init_snake_len[p] == 0 {
                return Err(ConfigError::Value {
                    field: "init_snake_len",
                    reason: format!("snake {p} has zero length"),
                });
            }
        }
        Ok(())
    }

    fn validate_modes(&self) -> Result<(), ConfigError> {
        if self.wrapped && self.ec.include_board {
            return Err(ConfigError::Mode(
                "wrapped boards have no borders, disable include_board".into(),
            ));
        }
        if self.royale && self.w != self.h {
            return Err(ConfigError::Mode("royale only works on square boards".into()));
        }
        if self.constrictor {
            if !self.init_hazards.is_empty() {
                return Err(ConfigError::Mode("constrictor does not work with hazards".into()));
            }
            if self.royale {
                return Err(ConfigError::Mode("constrictor does not work with royale".into()));
            }
        }
        Ok(())
    }

    fn validate_encoding(&self) -> Result<(), ConfigError> {
        let ec = &self.ec;
        if ec.centered && (self.w != self.h || self.w % 2 != 1) {
            return Err(ConfigError::Encoding(
                "can only center observations on odd square boards".into(),
            ));
        }
        if self.view_radius.is_some() {
            if !ec.include_distance_map {
                return Err(ConfigError::Encoding(
                    "view_radius needs the distance map to compute the view mask".into(),
                ));
            }
            if ec.include_area_control {
                return Err(ConfigError::Encoding(
                    "view_radius cannot be combined with area control".into(),
                ));
            }
            if ec.include_food_distance {
                return Err(ConfigError::Encoding(
                    "view_radius cannot be combined with food distance".into(),
                ));
            }
            if ec.include_num_food_on_board {
                return Err(ConfigError::Encoding(
                    "view_radius cannot be combined with the food count".into(),
                ));
            }
        }
        if ec.include_view_mask && self.view_radius.is_none() {
            return Err(ConfigError::Encoding(
                "include_view_mask requires view_radius".into(),
            ));
        }
        Ok(())
    }

    fn check_in_bounds(&self, field: &'static str, cell: &Coord) -> Result<(), ConfigError> {
        let [x, y] = *cell;
        if x < 0 || y < 0 || x as usize >= self.w || y as usize >= self.h {
            return Err(ConfigError::Value {
                field,
                reason: format!("{cell:?} lies outside the {}x{} board", self.w, self.h),
            });
        }
        Ok(())
    }
}
