//! Observation encoding
//!
//! Every player at turn gets one `[C, H, W]` stack of planes, rows indexed by
//! `y` and columns by `x`. Snake slot 0 always holds the observer, slot `k`
//! holds player `(observer + k) % n`, or every opponent at once when enemies
//! are compressed. Planes are built in board space first, masked by the view
//! radius and then projected, centred on the observer's head if requested.

use std::sync::Arc;

use engine_config::{GameConfig, LayerLayout};

use crate::board::{Board, CellId};
use crate::flood::{self, UNREACHED};
use crate::state::{Snake, State};

/// Per-snake plane kinds, in layout order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnakeLayer {
    Body,
    BodyAsOneHot,
    Head,
    Tail,
    Health,
    Length,
    AreaControl,
    FoodDistance,
    TailDistance,
}

impl SnakeLayer {
    fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "snake_body" => SnakeLayer::Body,
            "snake_body_as_one_hot" => SnakeLayer::BodyAsOneHot,
            "snake_head" => SnakeLayer::Head,
            "snake_tail" => SnakeLayer::Tail,
            "snake_health" => SnakeLayer::Health,
            "snake_length" => SnakeLayer::Length,
            "area_control" => SnakeLayer::AreaControl,
            "food_distance" => SnakeLayer::FoodDistance,
            "tail_distance" => SnakeLayer::TailDistance,
            _ => return None,
        })
    }
}

/// One observation channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    CurrentFood,
    NextFood,
    Board,
    NumberOfTurns,
    DistanceMap,
    Hazards,
    NumFoodOnBoard,
    Snake { slot: usize, kind: SnakeLayer },
    ViewMask,
}

impl Layer {
    fn parse(name: &str) -> Option<Self> {
        Some(match name {
            "current_food" => Layer::CurrentFood,
            "next_food" => Layer::NextFood,
            "board" => Layer::Board,
            "number_of_turns" => Layer::NumberOfTurns,
            "distance_map" => Layer::DistanceMap,
            "hazards" => Layer::Hazards,
            "num_food_on_board" => Layer::NumFoodOnBoard,
            "view_mask" => Layer::ViewMask,
            _ => {
                let (slot, kind) = name.split_once('_')?;
                Layer::Snake {
                    slot: slot.parse().ok()?,
                    kind: SnakeLayer::from_name(kind)?,
                }
            }
        })
    }
}

/// Encoded observations of all players at turn
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    /// Row-major `[players, C, H, W]` values
    pub data: Vec<f32>,
    pub shape: [usize; 4],
    /// Observing player of each leading index
    pub players: Vec<usize>,
    pub layout: Arc<LayerLayout>,
}

impl Observation {
    /// Planes of the `index`-th observer
    pub fn player(&self, index: usize) -> &[f32] {
        let size = self.shape[1] * self.shape[2] * self.shape[3];
        &self.data[index * size..(index + 1) * size]
    }

    pub fn plane(&self, index: usize, channel: usize) -> &[f32] {
        let size = self.shape[2] * self.shape[3];
        let start = (index * self.shape[1] + channel) * size;
        &self.data[start..start + size]
    }

    /// Plane of a named layer, if it is part of the layout
    pub fn layer(&self, index: usize, name: &str) -> Option<&[f32]> {
        self.layout.index_of(name).map(|c| self.plane(index, c))
    }

    pub fn value(&self, index: usize, channel: usize, row: usize, col: usize) -> f32 {
        self.plane(index, channel)[row * self.shape[3] + col]
    }
}

/// Parsed channel layout of a configuration
#[derive(Debug)]
pub struct Encoder {
    layout: Arc<LayerLayout>,
    layers: Vec<Layer>,
    uses_area_control: bool,
    uses_head_distances: bool,
}

impl Encoder {
    pub fn new(config: &GameConfig) -> Self {
        let layout = Arc::new(engine_config::encoding_layer_indices(config));
        let layers: Vec<Layer> = layout.names().iter().filter_map(|n| Layer::parse(n)).collect();
        debug_assert_eq!(layers.len(), layout.len());
        let uses = |k: SnakeLayer| {
            layers
                .iter()
                .any(|l| matches!(l, Layer::Snake { kind, .. } if *kind == k))
        };
        Self {
            uses_area_control: uses(SnakeLayer::AreaControl),
            uses_head_distances: uses(SnakeLayer::FoodDistance) || uses(SnakeLayer::TailDistance),
            layout,
            layers,
        }
    }

    pub fn layout(&self) -> &Arc<LayerLayout> {
        &self.layout
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Spatial size of one plane
    pub fn plane_shape(&self, config: &GameConfig) -> (usize, usize) {
        if config.ec.centered {
            (2 * config.h - 1, 2 * config.w - 1)
        } else {
            (config.h, config.w)
        }
    }

    pub fn encode(&self, state: &State, board: &Board, config: &GameConfig, players: &[usize]) -> Observation {
        let (height, width) = self.plane_shape(config);
        let channels = self.layers.len();
        let mut data = vec![0.0; players.len() * channels * height * width];
        let shared = Shared::new(self, state, board, config);

        let plane_size = height * width;
        for (index, &observer) in players.iter().enumerate() {
            let planes = self.board_planes(&shared, observer);
            let head = state.snakes[observer].head();
            for (c, plane) in planes.iter().enumerate() {
                let start = (index * channels + c) * plane_size;
                project(
                    plane,
                    &mut data[start..start + plane_size],
                    board,
                    config.ec.centered,
                    head,
                );
            }
        }

        Observation {
            data,
            shape: [players.len(), channels, height, width],
            players: players.to_vec(),
            layout: Arc::clone(&self.layout),
        }
    }

    /// All channels of one observer in board space
    fn board_planes(&self, shared: &Shared<'_>, observer: usize) -> Vec<Vec<f32>> {
        let Shared {
            state,
            board,
            config,
            ..
        } = *shared;
        let area = board.area();
        let areaf = area as f32;
        let head = state.snakes[observer].head();
        let observer_dist = flood::distances(board, head, &shared.occupied);

        let mut planes: Vec<Vec<f32>> = self
            .layers
            .iter()
            .map(|layer| match *layer {
                Layer::CurrentFood => state.food.iter().map(|&f| f as u8 as f32).collect(),
                Layer::NextFood => shared.next_food.clone(),
                Layer::Board => vec![1.0; area],
                Layer::NumberOfTurns => vec![state.turn as f32 / areaf; area],
                Layer::DistanceMap => observer_dist
                    .iter()
                    .map(|&d| if d == UNREACHED { 1.0 } else { d as f32 / areaf })
                    .collect(),
                Layer::Hazards => state.hazards.iter().map(|&h| h as u8 as f32).collect(),
                Layer::NumFoodOnBoard => vec![state.food_count as f32 / areaf; area],
                Layer::Snake { slot, kind } => {
                    let mut plane = vec![0.0; area];
                    for member in slot_members(slot, observer, config) {
                        shared.paint(&mut plane, member, kind);
                    }
                    plane
                }
                Layer::ViewMask => Vec::new(),
            })
            .collect();

        if let Some(radius) = config.view_radius {
            let mask: Vec<f32> = observer_dist
                .iter()
                .map(|&d| (d != UNREACHED && d <= radius) as u8 as f32)
                .collect();
            for (layer, plane) in self.layers.iter().zip(planes.iter_mut()) {
                if *layer == Layer::ViewMask {
                    plane.clone_from(&mask);
                } else {
                    for (v, m) in plane.iter_mut().zip(&mask) {
                        *v *= m;
                    }
                }
            }
        }
        planes
    }
}

/// Players drawn into a snake slot for `observer`
fn slot_members(slot: usize, observer: usize, config: &GameConfig) -> Vec<usize> {
    let n = config.num_players;
    if config.ec.compress_enemies && slot == 1 {
        (1..n).map(|k| (observer + k) % n).collect()
    } else if slot < n {
        vec![(observer + slot) % n]
    } else {
        Vec::new()
    }
}

/// Observer-independent data computed once per encode
struct Shared<'a> {
    state: &'a State,
    board: &'a Board,
    config: &'a GameConfig,
    occupied: Vec<bool>,
    next_food: Vec<f32>,
    owner: Vec<usize>,
    head_dist: Vec<Option<Vec<u32>>>,
}

impl<'a> Shared<'a> {
    fn new(encoder: &Encoder, state: &'a State, board: &'a Board, config: &'a GameConfig) -> Self {
        let area = board.area();
        let occupied = state.occupied(area);

        let next_food = if encoder.layers.contains(&Layer::NextFood) {
            next_food_plane(state, config, area)
        } else {
            Vec::new()
        };

        let owner = if encoder.uses_area_control {
            let sources: Vec<(usize, CellId)> = state
                .snakes
                .iter()
                .enumerate()
                .filter(|(_, s)| s.alive)
                .map(|(p, s)| (p, s.head()))
                .collect();
            flood::area_control(board, &sources, &occupied)
        } else {
            Vec::new()
        };

        let head_dist = state
            .snakes
            .iter()
            .map(|s| {
                (encoder.uses_head_distances && s.alive)
                    .then(|| flood::distances(board, s.head(), &occupied))
            })
            .collect();

        Self {
            state,
            board,
            config,
            occupied,
            next_food,
            owner,
            head_dist,
        }
    }

    /// Draw one snake into a plane, keeping the larger value where slots overlap
    fn paint(&self, plane: &mut [f32], player: usize, kind: SnakeLayer) {
        let snake: &Snake = &self.state.snakes[player];
        if !snake.alive {
            return;
        }
        let areaf = self.board.area() as f32;
        let len = snake.len();
        let mut put = |cell: CellId, value: f32| {
            let v = &mut plane[cell as usize];
            *v = v.max(value);
        };

        match kind {
            SnakeLayer::Body => snake.body.iter().for_each(|&c| put(c, 1.0)),
            SnakeLayer::BodyAsOneHot => {
                for (i, &c) in snake.body.iter().enumerate() {
                    put(c, (len - i) as f32 / areaf);
                }
            }
            SnakeLayer::Head => put(snake.head(), 1.0),
            SnakeLayer::Tail => put(snake.tail(), 1.0),
            SnakeLayer::Health => {
                let value = if snake.max_health == 0 {
                    0.0
                } else {
                    snake.health as f32 / snake.max_health as f32
                };
                snake.body.iter().for_each(|&c| put(c, value));
            }
            SnakeLayer::Length => {
                let value = len as f32 / areaf;
                snake.body.iter().for_each(|&c| put(c, value));
            }
            SnakeLayer::AreaControl => {
                for (c, &o) in self.owner.iter().enumerate() {
                    if o == player {
                        put(c as CellId, 1.0);
                    }
                }
            }
            SnakeLayer::FoodDistance | SnakeLayer::TailDistance => {
                let Some(dist) = &self.head_dist[player] else {
                    return;
                };
                let d = if kind == SnakeLayer::FoodDistance {
                    flood::nearest(dist, self.state.food_cells())
                } else {
                    flood::nearest(dist, [snake.tail()])
                };
                if let Some(d) = d {
                    let value = 1.0 - d as f32 / areaf;
                    snake.body.iter().for_each(|&c| put(c, value));
                }
            }
        }
    }
}

/// Probability that each free cell receives food next turn
fn next_food_plane(state: &State, config: &GameConfig, area: usize) -> Vec<f32> {
    let mut plane = vec![0.0; area];
    let free = state.free_cells(area);
    if free.is_empty() {
        return plane;
    }
    let chance = if config.ec.fixed_food_spawn_chance >= 0.0 {
        config.ec.fixed_food_spawn_chance
    } else if state.food_count < config.min_food {
        1.0
    } else {
        config.food_spawn_chance as f32 / 100.0
    };
    let value = chance / free.len() as f32;
    for c in free {
        plane[c as usize] = value;
    }
    plane
}

/// Copy a board-space plane into an output plane
fn project(plane: &[f32], out: &mut [f32], board: &Board, centered: bool, head: CellId) {
    let (w, h) = (board.width, board.height);
    if !centered {
        out.copy_from_slice(plane);
        return;
    }
    let (hx, hy) = board.coords(head);
    let out_w = 2 * w - 1;
    for row in 0..(2 * h - 1) {
        for col in 0..out_w {
            let x = hx as i32 + col as i32 - (w as i32 - 1);
            let y = hy as i32 + row as i32 - (h as i32 - 1);
            let cell = if board.wrapped {
                Some(board.cell(
                    x.rem_euclid(w as i32) as usize,
                    y.rem_euclid(h as i32) as usize,
                ))
            } else if board.contains(x, y) {
                Some(board.cell(x as usize, y as usize))
            } else {
                None
            };
            if let Some(cell) = cell {
                out[row * out_w + col] = plane[cell as usize];
            }
        }
    }
}
