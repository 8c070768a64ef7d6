//! Environment traits and wrappers.
//!
//! Provides the `MultiAgentEnv` trait implemented by the two-agent adapter,
//! plus the `EpisodeStats` wrapper.

mod traits;
mod wrappers;

pub use traits::{EnvInfo, EpisodeInfo, MultiAgentEnv, StepResult};
pub use wrappers::EpisodeStats;
