//! # Overcooked
//!
//! A grid-world kitchen simulation for cooperative multi-agent RL.
//!
//! ## Overview
//!
//! This crate provides:
//! - Kitchen layouts (five built-in, or parsed from text)
//! - The `OvercookedGridworld` MDP: interaction rules, movement and collisions,
//!   pot cooking, order fulfilment and reward computation
//! - `OvercookedEnv`, a finite-horizon episode driver around the MDP
//! - A lossless, per-player tensor featurization of states
//! - The `MultiAgentEnv` trait, observation/action spaces and metric loggers
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use overcooked::prelude::*;
//!
//! let mdp = Arc::new(OvercookedGridworld::from_layout_name("cramped_room")?);
//! let mut env = OvercookedEnv::from_mdp(mdp.clone(), EnvConfig::default());
//! env.reset(None);
//!
//! let joint = [Action::Move(Direction::North), Action::Interact];
//! let transition = env.step(&joint)?;
//! let features = mdp.lossless_state_encoding(&transition.state, env.horizon());
//! ```

pub mod env;
pub mod log;
pub mod mdp;
pub mod spaces;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::env::{EnvInfo, EpisodeInfo, EpisodeStats, MultiAgentEnv, StepResult};
    pub use crate::log::{ConsoleLogger, MetricLogger, NoOpLogger};
    pub use crate::mdp::{
        Action, Direction, EnvConfig, Layout, MdpParams, ObjectState, OvercookedEnv,
        OvercookedGridworld, OvercookedState, PlayerState, Position,
    };
    pub use crate::spaces::{Discrete, DynSpace, MultiDiscrete, Space};
    pub use crate::{OvercookedError, Result};
}

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Error types for the library
#[derive(Debug, thiserror::Error)]
pub enum OvercookedError {
    #[error("Unknown layout: {0}")]
    UnknownLayout(String),

    #[error("Invalid layout '{name}': {reason}")]
    InvalidLayout { name: String, reason: String },

    #[error("Invalid action index: {0}")]
    InvalidAction(usize),

    #[error("Wrong number of actions: expected {expected}, got {actual}")]
    WrongNumberOfActions { expected: usize, actual: usize },

    #[error("Trying to step on a finished episode; call reset() first")]
    EpisodeDone,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = core::result::Result<T, OvercookedError>;
