//! Tests for the configuration module.

use super::*;
use std::io::Write;

fn fixed_duel(w: usize, h: usize) -> RawGameConfig {
    RawGameConfig {
        w,
        h,
        init_snake_pos: Some(vec![vec![[0, 0], [0, 1]], vec![[w as i32 - 1, 0]]]),
        init_food_pos: Some(vec![]),
        min_food: 0,
        ..RawGameConfig::default()
    }
}

#[test]
fn test_default_config() {
    let config = RawGameConfig::default();
    assert_eq!(config.num_players, 2);
    assert_eq!(config.num_actions, 4);
    assert_eq!((config.w, config.h), (5, 5));
    assert_eq!(config.min_food, 1);
    assert_eq!(config.food_spawn_chance, 15);
    assert_eq!(config.shrink_n_turns, 25);
    assert_eq!(config.hazard_damage, 14);
    assert!(!config.all_actions_legal);
    assert_eq!(config.reward, RewardConfig::Standard);
    assert_eq!(config.ec, EncodingConfig::simple());
}

#[test]
fn test_finalize_fills_player_vectors() {
    let config = RawGameConfig {
        num_players: 3,
        w: 7,
        h: 7,
        ..RawGameConfig::default()
    }
    .finalize()
    .unwrap();

    assert_eq!(config.init_snake_health, vec![100, 100, 100]);
    assert_eq!(config.max_snake_health, vec![100, 100, 100]);
    assert_eq!(config.init_snake_len, vec![3, 3, 3]);
    assert_eq!(config.init_snakes_alive, vec![true, true, true]);
    assert!(config.init_hazards.is_empty());
    assert!(config.spawns_randomly());
}

#[test]
fn test_constrictor_overrides() {
    let config = RawGameConfig {
        w: 3,
        h: 3,
        constrictor: true,
        init_snake_len: Some(vec![3, 3]),
        init_snake_health: Some(vec![5, 5]),
        ..RawGameConfig::default()
    }
    .finalize()
    .unwrap();

    assert_eq!(config.init_snake_len, vec![10, 10]);
    assert_eq!(config.init_snake_health, vec![10, 10]);
    assert_eq!(config.max_snake_health, vec![10, 10]);
    assert_eq!(config.init_food_pos, Some(vec![]));
    assert_eq!(config.food_spawn_chance, 0);
    assert_eq!(config.min_food, 0);
}

#[test]
fn test_random_snakes_with_fixed_food_rejected() {
    let err = RawGameConfig {
        init_food_pos: Some(vec![[2, 2]]),
        ..RawGameConfig::default()
    }
    .finalize()
    .unwrap_err();
    assert!(matches!(err, ConfigError::Spawn(_)));
}

#[test]
fn test_fixed_snakes_with_random_food_rejected() {
    let mut raw = fixed_duel(5, 5);
    raw.init_food_pos = None;
    assert!(matches!(raw.finalize(), Err(ConfigError::Spawn(_))));
}

#[test]
fn test_random_spawn_needs_odd_square_board() {
    for (w, h) in [(6, 6), (5, 7)] {
        let err = RawGameConfig {
            w,
            h,
            ..RawGameConfig::default()
        }
        .finalize()
        .unwrap_err();
        assert!(matches!(err, ConfigError::Spawn(_)), "{w}x{h}: {err}");
    }
    // explicit positions make any shape valid
    assert!(fixed_duel(6, 4).finalize().is_ok());
}

#[test]
fn test_fixed_food_below_min_food_rejected() {
    let mut raw = fixed_duel(5, 5);
    raw.min_food = 2;
    raw.init_food_pos = Some(vec![[3, 3]]);
    assert!(matches!(raw.finalize(), Err(ConfigError::Spawn(_))));
}

#[test]
fn test_overlapping_fixed_snakes_rejected() {
    let mut raw = fixed_duel(5, 5);
    raw.init_snake_pos = Some(vec![vec![[1, 1], [1, 2]], vec![[1, 2], [2, 2]]]);
    assert!(matches!(raw.finalize(), Err(ConfigError::Spawn(_))));
}

#[test]
fn test_out_of_bounds_position_rejected() {
    let mut raw = fixed_duel(5, 5);
    raw.init_food_pos = Some(vec![[5, 0]]);
    assert!(matches!(
        raw.finalize(),
        Err(ConfigError::Value {
            field: "init_food_pos",
            ..
        })
    ));
}

#[test]
fn test_player_vector_length_checked() {
    let err = RawGameConfig {
        init_snake_len: Some(vec![3, 3, 3]),
        ..RawGameConfig::default()
    }
    .finalize()
    .unwrap_err();
    assert_eq!(
        err,
        ConfigError::PlayerCount {
            field: "init_snake_len",
            expected: 2,
            actual: 3
        }
    );
}

#[test]
fn test_health_above_max_rejected() {
    let err = RawGameConfig {
        init_snake_health: Some(vec![100, 120]),
        ..RawGameConfig::default()
    }
    .finalize()
    .unwrap_err();
    assert!(matches!(err, ConfigError::Health(_)));
}

#[test]
fn test_mode_conflicts() {
    let wrapped_with_board = RawGameConfig {
        wrapped: true,
        ..RawGameConfig::default()
    };
    assert!(matches!(
        wrapped_with_board.finalize(),
        Err(ConfigError::Mode(_))
    ));

    let mut royale_rect = fixed_duel(7, 5);
    royale_rect.royale = true;
    assert!(matches!(royale_rect.finalize(), Err(ConfigError::Mode(_))));

    let constrictor_royale = RawGameConfig {
        constrictor: true,
        royale: true,
        ..RawGameConfig::default()
    };
    assert!(matches!(
        constrictor_royale.finalize(),
        Err(ConfigError::Mode(_))
    ));
}

#[test]
fn test_constrictor_drops_hazards() {
    // finalize clears the hazards before validation, matching the mode overrides
    let config = RawGameConfig {
        constrictor: true,
        init_hazards: Some(vec![[0, 0]]),
        ..RawGameConfig::default()
    }
    .finalize()
    .unwrap();
    assert!(config.init_hazards.is_empty());
}

#[test]
fn test_view_radius_requirements() {
    let mut ec = EncodingConfig::simple();
    let without_distance = RawGameConfig {
        view_radius: Some(2),
        ec: ec.clone(),
        ..RawGameConfig::default()
    };
    assert!(matches!(
        without_distance.finalize(),
        Err(ConfigError::Encoding(_))
    ));

    ec.include_distance_map = true;
    ec.include_area_control = true;
    let with_area_control = RawGameConfig {
        view_radius: Some(2),
        ec: ec.clone(),
        ..RawGameConfig::default()
    };
    assert!(matches!(
        with_area_control.finalize(),
        Err(ConfigError::Encoding(_))
    ));

    ec.include_area_control = false;
    let ok = RawGameConfig {
        view_radius: Some(2),
        ec,
        ..RawGameConfig::default()
    };
    assert!(ok.finalize().is_ok());
}

#[test]
fn test_view_mask_requires_radius() {
    let mut ec = EncodingConfig::simple();
    ec.include_view_mask = true;
    let raw = RawGameConfig {
        ec,
        ..RawGameConfig::default()
    };
    assert!(matches!(raw.finalize(), Err(ConfigError::Encoding(_))));
}

#[test]
fn test_centered_requires_odd_square() {
    let mut raw = fixed_duel(6, 6);
    raw.ec.centered = true;
    assert!(matches!(raw.finalize(), Err(ConfigError::Encoding(_))));
}

#[test]
fn test_presets_are_valid() {
    for raw in [
        duel_config(),
        standard_config(),
        restricted_standard_config(),
        restricted_duel_config(),
    ] {
        let players = raw.num_players;
        let config = raw.finalize().unwrap();
        assert_eq!(config.init_snake_len.len(), players);
    }
}

#[test]
fn test_simple_layout() {
    let config = RawGameConfig::default().finalize().unwrap();
    let layout = encoding_layer_indices(&config);
    let names: Vec<&str> = layout.names().iter().map(String::as_str).collect();
    assert_eq!(
        names,
        vec![
            "current_food",
            "board",
            "0_snake_body",
            "0_snake_head",
            "0_snake_tail",
            "1_snake_body",
            "1_snake_head",
            "1_snake_tail",
        ]
    );
    assert_eq!(layout.index_of("1_snake_head"), Some(6));
    assert_eq!(layout.index_of("hazards"), None);
}

#[test]
fn test_layout_depends_only_on_flags() {
    let small = RawGameConfig {
        ec: EncodingConfig::best(),
        ..RawGameConfig::default()
    }
    .finalize()
    .unwrap();
    let large = RawGameConfig {
        w: 11,
        h: 11,
        num_players: 4,
        ec: EncodingConfig::best(),
        ..RawGameConfig::default()
    }
    .finalize()
    .unwrap();

    // compressed enemies keep two snake slots regardless of player count
    let a = encoding_layer_indices(&small);
    let b = encoding_layer_indices(&large);
    assert_eq!(a, b);
    assert_eq!(a.snake_slots(), 2);
    assert_eq!(a.len(), 3 + 2 * 8);
}

#[test]
fn test_layout_general_order_and_view_mask_last() {
    let config = restricted_duel_config().finalize().unwrap();
    let layout = encoding_layer_indices(&config);
    assert_eq!(layout.index_of("current_food"), Some(0));
    assert_eq!(layout.index_of("board"), Some(1));
    assert_eq!(layout.index_of("distance_map"), Some(2));
    assert_eq!(layout.index_of("hazards"), Some(3));
    assert_eq!(layout.index_of("0_snake_body_as_one_hot"), Some(4));
    assert_eq!(layout.index_of("view_mask"), Some(layout.len() - 1));
    assert_eq!(layout.snake_slots(), 2);
}

#[test]
fn test_parse_config_toml() {
    let toml_content = r#"
num_players = 4
w = 7
h = 7
royale = true
init_snake_len = [3, 3, 4, 4]

[ec]
include_hazards = true
compress_enemies = true

[reward]
kind = "kill"
kill_reward = 0.25
"#;
    let raw: RawGameConfig = toml::from_str(toml_content).unwrap();
    assert_eq!(raw.num_players, 4);
    assert!(raw.royale);
    assert_eq!(raw.init_snake_len, Some(vec![3, 3, 4, 4]));
    assert!(raw.ec.include_hazards);
    assert!(raw.ec.include_current_food); // Default
    assert_eq!(raw.reward, RewardConfig::Kill { kill_reward: 0.25 });
    assert_eq!(raw.min_food, 1); // Default

    let config = raw.finalize().unwrap();
    assert_eq!(config.max_snake_health, vec![100; 4]);
}

#[test]
fn test_parse_fixed_positions() {
    let toml_content = r#"
w = 3
h = 3
constrictor = true
init_snake_pos = [[[0, 1], [1, 1], [0, 2]], [[2, 2], [2, 1], [2, 0]]]
"#;
    let raw: RawGameConfig = toml::from_str(toml_content).unwrap();
    let config = raw.finalize().unwrap();
    assert_eq!(
        config.init_snake_pos.as_ref().map(|b| b[1][0]),
        Some([2, 2])
    );
}

#[test]
fn test_kill_reward_default() {
    let raw: RawGameConfig = toml::from_str("[reward]\nkind = \"kill\"\n").unwrap();
    assert_eq!(raw.reward, RewardConfig::Kill { kill_reward: 0.5 });
}

#[test]
fn test_load_from_path() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "w = 9\nh = 9\nnum_players = 3").unwrap();

    let raw = load_from_path(file.path());
    assert_eq!((raw.w, raw.h, raw.num_players), (9, 9, 3));
}

#[test]
fn test_load_from_unparsable_path_uses_defaults() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "w = \"wide\"").unwrap();

    let raw = load_from_path(file.path());
    assert_eq!(raw.w, 5);
}

#[test]
fn test_battlesnake_env_overrides() {
    std::env::set_var("BATTLESNAKE_GAME_HAZARD_DAMAGE", "7");
    std::env::set_var("BATTLESNAKE_GAME_VIEW_RADIUS", "3");
    std::env::set_var("BATTLESNAKE_ENCODING_FIXED_FOOD_SPAWN_CHANCE", "0.5");

    let raw = apply_env_overrides(RawGameConfig::default());
    assert_eq!(raw.hazard_damage, 7);
    assert_eq!(raw.view_radius, Some(3));
    assert!((raw.ec.fixed_food_spawn_chance - 0.5).abs() < f32::EPSILON);

    std::env::remove_var("BATTLESNAKE_GAME_HAZARD_DAMAGE");
    std::env::remove_var("BATTLESNAKE_GAME_VIEW_RADIUS");
    std::env::remove_var("BATTLESNAKE_ENCODING_FIXED_FOOD_SPAWN_CHANCE");
}
