//! Lossless state featurization: per-player stacks of feature planes.
//!
//! Each player receives an array of shape `[width, height, channels]` where
//! the channels are, in order:
//!
//! - one location plane per player, the observing player first
//! - four orientation planes per player (north, south, east, west), same order
//! - static terrain: pot, counter, onion dispenser, tomato dispenser,
//!   dish dispenser, serving location
//! - dynamic objects: onions in pot, tomatoes in pot, onions in soup,
//!   tomatoes in soup, soup cook time remaining, soup done, dishes, onions,
//!   tomatoes
//! - urgency: all ones once fewer than [`URGENCY_THRESHOLD`] steps remain

use ndarray::{Array3, ArrayD};

use super::layout::Terrain;
use super::{Ingredient, ObjectState, OvercookedGridworld, OvercookedState, Position};

/// Remaining-steps threshold below which the urgency plane is set
pub const URGENCY_THRESHOLD: u32 = 40;

const TERRAIN_CHANNELS: [(Terrain, &str); 6] = [
    (Terrain::Pot, "pot_loc"),
    (Terrain::Counter, "counter_loc"),
    (Terrain::OnionDispenser, "onion_disp_loc"),
    (Terrain::TomatoDispenser, "tomato_disp_loc"),
    (Terrain::DishDispenser, "dish_disp_loc"),
    (Terrain::Serving, "serve_loc"),
];

const VARIABLE_CHANNELS: [&str; 9] = [
    "onions_in_pot",
    "tomatoes_in_pot",
    "onions_in_soup",
    "tomatoes_in_soup",
    "soup_cook_time_remaining",
    "soup_done",
    "dishes",
    "onions",
    "tomatoes",
];

// Offsets into VARIABLE_CHANNELS
const ONIONS_IN_POT: usize = 0;
const TOMATOES_IN_POT: usize = 1;
const ONIONS_IN_SOUP: usize = 2;
const TOMATOES_IN_SOUP: usize = 3;
const SOUP_COOK_TIME_REMAINING: usize = 4;
const SOUP_DONE: usize = 5;
const DISHES: usize = 6;
const ONIONS: usize = 7;
const TOMATOES: usize = 8;

/// Number of feature planes for a game with `num_players` players
pub fn num_lossless_channels(num_players: usize) -> usize {
    num_players * 5 + TERRAIN_CHANNELS.len() + VARIABLE_CHANNELS.len() + 1
}

/// Names of the feature planes, in channel order
pub fn lossless_channel_names(num_players: usize) -> Vec<String> {
    let mut names = Vec::with_capacity(num_lossless_channels(num_players));
    for i in 0..num_players {
        names.push(format!("player_{}_loc", i));
    }
    for i in 0..num_players {
        for d in ["north", "south", "east", "west"] {
            names.push(format!("player_{}_orientation_{}", i, d));
        }
    }
    names.extend(TERRAIN_CHANNELS.iter().map(|(_, n)| n.to_string()));
    names.extend(VARIABLE_CHANNELS.iter().map(|n| n.to_string()));
    names.push("urgency".to_string());
    names
}

impl OvercookedGridworld {
    /// Shape of each player's lossless encoding
    pub fn lossless_encoding_shape(&self) -> [usize; 3] {
        [
            self.width(),
            self.height(),
            num_lossless_channels(self.num_players()),
        ]
    }

    /// Encode `state` once per player, from that player's point of view.
    ///
    /// `horizon` drives the urgency plane.
    pub fn lossless_state_encoding(&self, state: &OvercookedState, horizon: u32) -> Vec<ArrayD<f32>> {
        let shared = self.shared_planes(state, horizon);
        (0..state.players.len())
            .map(|ego| self.encode_for_player(state, ego, &shared).into_dyn())
            .collect()
    }

    /// Planes that do not depend on the observing player
    fn shared_planes(&self, state: &OvercookedState, horizon: u32) -> Array3<f32> {
        let n = state.players.len();
        let base = n * 5;
        let mut planes = Array3::<f32>::zeros((self.width(), self.height(), num_lossless_channels(n)));

        for (c, (terrain, _)) in TERRAIN_CHANNELS.iter().enumerate() {
            for (x, y) in self.layout().positions_of(*terrain) {
                planes[[x, y, base + c]] = 1.0;
            }
        }

        let var = base + TERRAIN_CHANNELS.len();
        let pots = self.layout().positions_of(Terrain::Pot);
        for (pos, obj) in state.all_objects() {
            let (x, y) = pos;
            match obj {
                ObjectState::Soup(soup) => {
                    let in_pot = pots.contains(&pos);
                    let (onions, tomatoes) = if in_pot && soup.is_idle() {
                        (ONIONS_IN_POT, TOMATOES_IN_POT)
                    } else {
                        (ONIONS_IN_SOUP, TOMATOES_IN_SOUP)
                    };
                    planes[[x, y, var + onions]] += soup.count(Ingredient::Onion) as f32;
                    planes[[x, y, var + tomatoes]] += soup.count(Ingredient::Tomato) as f32;
                    if soup.is_cooking() {
                        planes[[x, y, var + SOUP_COOK_TIME_REMAINING]] += soup.cook_time_remaining() as f32;
                    }
                    if soup.is_ready() {
                        planes[[x, y, var + SOUP_DONE]] += 1.0;
                    }
                }
                ObjectState::Dish => planes[[x, y, var + DISHES]] += 1.0,
                ObjectState::Onion => planes[[x, y, var + ONIONS]] += 1.0,
                ObjectState::Tomato => planes[[x, y, var + TOMATOES]] += 1.0,
            }
        }

        if horizon.saturating_sub(state.timestep) < URGENCY_THRESHOLD {
            let urgency = var + VARIABLE_CHANNELS.len();
            planes
                .slice_mut(ndarray::s![.., .., urgency])
                .fill(1.0);
        }

        planes
    }

    fn encode_for_player(&self, state: &OvercookedState, ego: usize, shared: &Array3<f32>) -> Array3<f32> {
        let n = state.players.len();
        let mut planes = shared.clone();

        // Observer first, then the others in their original order
        let order = std::iter::once(ego).chain((0..n).filter(|&i| i != ego));
        for (slot, idx) in order.enumerate() {
            let player = &state.players[idx];
            let (x, y): Position = player.position;
            planes[[x, y, slot]] = 1.0;
            planes[[x, y, n + slot * 4 + player.orientation.index()]] = 1.0;
        }

        planes
    }
}
