//! Core environment trait definitions.

use crate::spaces::DynSpace;
use crate::Result;
use ndarray::ArrayD;

/// Episode totals reported on the final step of an episode
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EpisodeInfo {
    /// Team sparse return
    pub ep_sparse_r: f32,
    /// Team shaped return
    pub ep_shaped_r: f32,
    pub ep_sparse_r_by_agent: Vec<f32>,
    pub ep_shaped_r_by_agent: Vec<f32>,
    /// Episode length in timesteps
    pub ep_length: u32,
}

/// Information returned from environment steps
#[derive(Clone, Debug, Default)]
pub struct EnvInfo {
    /// Sparse reward earned by each agent this step
    pub sparse_r_by_agent: Vec<f32>,
    /// Shaped reward earned by each agent this step
    pub shaped_r_by_agent: Vec<f32>,
    /// Per-agent episode totals (final step only)
    pub episode: Option<EpisodeInfo>,
    /// Episode return (if done)
    pub episode_return: Option<f32>,
    /// Episode length (if done)
    pub episode_length: Option<f32>,
    /// Custom metrics (kept minimal for performance)
    pub extra: smallvec::SmallVec<[(&'static str, f32); 4]>,
}

impl EnvInfo {
    /// Create empty info
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach per-agent rewards for this step
    pub fn with_agent_rewards(mut self, sparse: Vec<f32>, shaped: Vec<f32>) -> Self {
        self.sparse_r_by_agent = sparse;
        self.shaped_r_by_agent = shaped;
        self
    }

    /// Attach episode totals
    pub fn with_episode(mut self, episode: EpisodeInfo) -> Self {
        self.episode = Some(episode);
        self
    }

    /// Add episode stats
    pub fn with_episode_stats(mut self, ret: f32, len: u32) -> Self {
        self.episode_return = Some(ret);
        self.episode_length = Some(len as f32);
        self
    }

    /// Add a custom metric (use rarely)
    pub fn with_extra(mut self, key: &'static str, value: f32) -> Self {
        self.extra.push((key, value));
        self
    }

    /// Get a value by key (including defaults)
    pub fn get(&self, key: &str) -> Option<f32> {
        match key {
            "episode_return" => self.episode_return,
            "episode_length" => self.episode_length,
            "ep_sparse_r" => self.episode.as_ref().map(|e| e.ep_sparse_r),
            "ep_shaped_r" => self.episode.as_ref().map(|e| e.ep_shaped_r),
            "ep_length" => self.episode.as_ref().map(|e| e.ep_length as f32),
            _ => self.extra.iter().find(|(k, _)| k == &key).map(|(_, v)| *v),
        }
    }
}

/// Result from a single multi-agent environment step
#[derive(Clone, Debug)]
pub struct StepResult {
    /// Observation for each agent, in agent order
    pub observations: Vec<ArrayD<f32>>,
    /// Shared team reward
    pub reward: f32,
    /// Whether the episode terminated
    pub terminated: bool,
    /// Whether the episode was truncated
    pub truncated: bool,
    /// Additional info
    pub info: EnvInfo,
}

impl StepResult {
    /// Check if episode is done (terminated or truncated)
    pub fn done(&self) -> bool {
        self.terminated || self.truncated
    }
}

/// Core trait for cooperative multi-agent environments with a shared reward.
///
/// Every agent acts on every step; actions are discrete indices into the
/// per-agent action space.
///
/// # Example
///
/// ```rust,ignore
/// use overcooked::env::MultiAgentEnv;
///
/// let (observations, _) = env.reset(Some(0));
/// let result = env.step(&[0, 5])?;
/// println!("reward = {}", result.reward);
/// ```
pub trait MultiAgentEnv: Send {
    /// Observation space of a single agent
    fn observation_space(&self) -> DynSpace;

    /// Action space of a single agent
    fn action_space(&self) -> DynSpace;

    /// Number of agents acting each step
    fn num_agents(&self) -> usize;

    /// Reset the environment to initial state
    ///
    /// # Arguments
    /// * `seed` - Optional random seed for reproducibility
    ///
    /// # Returns
    /// Tuple of (per-agent initial observations, info)
    fn reset(&mut self, seed: Option<u64>) -> (Vec<ArrayD<f32>>, EnvInfo);

    /// Take a single step with one action index per agent
    fn step(&mut self, actions: &[usize]) -> Result<StepResult>;

    /// Optional: Render the environment
    fn render(&self) -> Option<String> {
        None
    }

    /// Optional: Close the environment and free resources
    fn close(&mut self) {}

    /// Check if environment is done and needs reset
    fn is_done(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_info_get() {
        let info = EnvInfo::new()
            .with_episode(EpisodeInfo {
                ep_sparse_r: 40.0,
                ep_shaped_r: 12.0,
                ep_length: 400,
                ..Default::default()
            })
            .with_extra("soups", 2.0);

        assert_eq!(info.get("ep_sparse_r"), Some(40.0));
        assert_eq!(info.get("ep_length"), Some(400.0));
        assert_eq!(info.get("soups"), Some(2.0));
        assert_eq!(info.get("episode_return"), None);
        assert_eq!(info.get("missing"), None);
    }
}
