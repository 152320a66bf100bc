//! Observation channel layout.
//!
//! The layout is a strict function of the encoding flags and the player
//! count. Layer names and their order are a wire contract shared with
//! trained models, so the checks below must stay in this order.

use serde::Serialize;

use crate::validate::GameConfig;

/// Ordered mapping from layer name to channel index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayerLayout {
    names: Vec<String>,
    snake_slots: usize,
}

impl LayerLayout {
    /// Number of channels.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Channel index of a layer, if it is part of the encoding.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    /// Layer names in channel order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Number of snake slots (2 when enemies are compressed).
    pub fn snake_slots(&self) -> usize {
        self.snake_slots
    }

    /// `(name, channel)` pairs in channel order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.names.iter().enumerate().map(|(i, n)| (n.as_str(), i))
    }

    fn push(&mut self, name: impl Into<String>) {
        self.names.push(name.into());
    }
}

/// Build the channel layout for a configuration.
pub fn encoding_layer_indices(config: &GameConfig) -> LayerLayout {
    let ec = &config.ec;
    let snake_slots = if ec.compress_enemies {
        2
    } else {
        config.num_players
    };
    let mut layout = LayerLayout {
        names: Vec::new(),
        snake_slots,
    };

    // general layers for all snakes
    let general = [
        (ec.include_current_food, "current_food"),
        (ec.include_next_food, "next_food"),
        (ec.include_board, "board"),
        (ec.include_number_of_turns, "number_of_turns"),
        (ec.include_distance_map, "distance_map"),
        (ec.include_hazards, "hazards"),
        (ec.include_num_food_on_board, "num_food_on_board"),
    ];
    for (enabled, name) in general {
        if enabled {
            layout.push(name);
        }
    }

    // snake specific layers
    let per_snake = [
        (ec.include_snake_body, "snake_body"),
        (ec.include_snake_body_as_one_hot, "snake_body_as_one_hot"),
        (ec.include_snake_head, "snake_head"),
        (ec.include_snake_tail, "snake_tail"),
        (ec.include_snake_health, "snake_health"),
        (ec.include_snake_length, "snake_length"),
        (ec.include_area_control, "area_control"),
        (ec.include_food_distance, "food_distance"),
        (ec.include_tail_distance, "tail_distance"),
    ];
    for slot in 0..snake_slots {
        for (enabled, name) in per_snake {
            if enabled {
                layout.push(format!("{slot}_{name}"));
            }
        }
    }

    if ec.include_view_mask {
        layout.push("view_mask");
    }
    layout
}
