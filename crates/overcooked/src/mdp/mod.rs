//! The Overcooked kitchen simulation.
//!
//! - `Layout` parses kitchens and provides the five built-in ones
//! - `OvercookedGridworld` owns the rules: start states, transitions, rendering
//!   and the lossless featurization
//! - `OvercookedEnv` drives finite-horizon episodes over a shared gridworld

mod actions;
mod config;
mod encoding;
mod gridworld;
pub mod layout;
mod overcooked_env;
mod state;

pub use actions::{format_actions, Action, Direction, Position};
pub use config::{EnvConfig, MdpParams, RewardShaping};
pub use encoding::{lossless_channel_names, num_lossless_channels, URGENCY_THRESHOLD};
pub use gridworld::{OvercookedGridworld, TransitionInfo};
pub use layout::{Layout, Terrain, LAYOUT_NAMES};
pub use overcooked_env::{OvercookedEnv, Transition};
pub use state::{Ingredient, ObjectState, OvercookedState, PlayerState, Recipe, Soup};
