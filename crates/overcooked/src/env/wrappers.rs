//! Environment wrappers for common functionality.

use super::{EnvInfo, MultiAgentEnv, StepResult};
use crate::spaces::DynSpace;
use crate::Result;
use ndarray::ArrayD;

/// Wrapper that tracks episode statistics (team return and length).
///
/// Adds `episode_return` and `episode_length` to info on episode completion.
pub struct EpisodeStats<E: MultiAgentEnv> {
    env: E,
    episode_return: f32,
    episode_length: u32,
}

impl<E: MultiAgentEnv> EpisodeStats<E> {
    /// Wrap an environment with episode statistics tracking
    pub fn new(env: E) -> Self {
        Self {
            env,
            episode_return: 0.0,
            episode_length: 0,
        }
    }

    /// Get a reference to the inner environment
    pub fn inner(&self) -> &E {
        &self.env
    }

    /// Get a mutable reference to the inner environment
    pub fn inner_mut(&mut self) -> &mut E {
        &mut self.env
    }
}

impl<E: MultiAgentEnv> MultiAgentEnv for EpisodeStats<E> {
    fn observation_space(&self) -> DynSpace {
        self.env.observation_space()
    }

    fn action_space(&self) -> DynSpace {
        self.env.action_space()
    }

    fn num_agents(&self) -> usize {
        self.env.num_agents()
    }

    fn reset(&mut self, seed: Option<u64>) -> (Vec<ArrayD<f32>>, EnvInfo) {
        self.episode_return = 0.0;
        self.episode_length = 0;
        self.env.reset(seed)
    }

    fn step(&mut self, actions: &[usize]) -> Result<StepResult> {
        let mut result = self.env.step(actions)?;

        self.episode_return += result.reward;
        self.episode_length += 1;

        if result.done() {
            result.info = result
                .info
                .with_episode_stats(self.episode_return, self.episode_length);

            // Reset internal counters (env will be reset externally)
            self.episode_return = 0.0;
            self.episode_length = 0;
        }

        Ok(result)
    }

    fn render(&self) -> Option<String> {
        self.env.render()
    }

    fn close(&mut self) {
        self.env.close()
    }

    fn is_done(&self) -> bool {
        self.env.is_done()
    }
}
