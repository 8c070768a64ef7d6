//! Finite-horizon episode driver around the Overcooked MDP.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;

use super::{Action, EnvConfig, OvercookedGridworld, OvercookedState};
use crate::env::{EnvInfo, EpisodeInfo};
use crate::{OvercookedError, Result};

/// Outcome of a single `OvercookedEnv::step`
#[derive(Clone, Debug)]
pub struct Transition {
    /// State after the joint action
    pub state: OvercookedState,
    /// Team sparse reward for this step
    pub reward: f32,
    /// Whether the horizon has been reached
    pub done: bool,
    pub info: EnvInfo,
}

/// Runs episodes of a fixed horizon on a shared MDP.
///
/// The environment starts in the standard start state; `reset` starts a new
/// episode and clears the episode accumulators.
pub struct OvercookedEnv {
    mdp: Arc<OvercookedGridworld>,
    horizon: u32,
    random_start: bool,
    state: OvercookedState,
    rng: StdRng,
    ep_sparse_by_agent: Vec<f32>,
    ep_shaped_by_agent: Vec<f32>,
    ep_soups_delivered: u32,
}

impl OvercookedEnv {
    /// Create an environment over `mdp`.
    ///
    /// Only the episode settings of `config` are used here; the kitchen rules
    /// come from the MDP itself.
    pub fn from_mdp(mdp: Arc<OvercookedGridworld>, config: EnvConfig) -> Self {
        let n = mdp.num_players();
        let state = mdp.get_standard_start_state();
        Self {
            mdp,
            horizon: config.horizon,
            random_start: config.random_start,
            state,
            rng: StdRng::from_entropy(),
            ep_sparse_by_agent: vec![0.0; n],
            ep_shaped_by_agent: vec![0.0; n],
            ep_soups_delivered: 0,
        }
    }

    pub fn mdp(&self) -> &Arc<OvercookedGridworld> {
        &self.mdp
    }

    pub fn horizon(&self) -> u32 {
        self.horizon
    }

    /// Current state
    pub fn state(&self) -> &OvercookedState {
        &self.state
    }

    /// Whether the episode has reached the horizon
    pub fn is_done(&self) -> bool {
        self.state.timestep >= self.horizon
    }

    /// Start a new episode.
    ///
    /// `seed` reseeds the start-state RNG, which only matters with random starts.
    pub fn reset(&mut self, seed: Option<u64>) {
        if let Some(s) = seed {
            self.rng = StdRng::seed_from_u64(s);
        }

        self.state = if self.random_start {
            self.mdp.get_random_start_state(&mut self.rng)
        } else {
            self.mdp.get_standard_start_state()
        };
        self.ep_sparse_by_agent.iter_mut().for_each(|r| *r = 0.0);
        self.ep_shaped_by_agent.iter_mut().for_each(|r| *r = 0.0);
        self.ep_soups_delivered = 0;

        tracing::debug!(layout = self.mdp.layout_name(), "Environment reset");
    }

    /// Advance the episode by one joint action
    pub fn step(&mut self, joint_action: &[Action]) -> Result<Transition> {
        if self.is_done() {
            return Err(OvercookedError::EpisodeDone);
        }

        let (next, transition) = self.mdp.get_state_transition(&self.state, joint_action)?;
        self.state = next;

        for (acc, r) in self
            .ep_sparse_by_agent
            .iter_mut()
            .zip(&transition.sparse_reward_by_agent)
        {
            *acc += r;
        }
        for (acc, r) in self
            .ep_shaped_by_agent
            .iter_mut()
            .zip(&transition.shaped_reward_by_agent)
        {
            *acc += r;
        }

        self.ep_soups_delivered += transition.soups_delivered;

        let reward = transition.sparse_reward();
        let done = self.is_done();

        let mut info = EnvInfo::new()
            .with_agent_rewards(transition.sparse_reward_by_agent, transition.shaped_reward_by_agent);

        if done {
            let episode = EpisodeInfo {
                ep_sparse_r: self.ep_sparse_by_agent.iter().sum(),
                ep_shaped_r: self.ep_shaped_by_agent.iter().sum(),
                ep_sparse_r_by_agent: self.ep_sparse_by_agent.clone(),
                ep_shaped_r_by_agent: self.ep_shaped_by_agent.clone(),
                ep_length: self.state.timestep,
            };
            tracing::info!(
                layout = self.mdp.layout_name(),
                ep_sparse_r = episode.ep_sparse_r,
                ep_shaped_r = episode.ep_shaped_r,
                ep_length = episode.ep_length,
                "Episode finished"
            );
            info = info
                .with_episode(episode)
                .with_extra("soups_delivered", self.ep_soups_delivered as f32);
        }

        Ok(Transition {
            state: self.state.clone(),
            reward,
            done,
            info,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mdp::Direction;

    fn env_with_horizon(horizon: u32) -> OvercookedEnv {
        let mdp = Arc::new(OvercookedGridworld::from_layout_name("cramped_room").unwrap());
        OvercookedEnv::from_mdp(mdp, EnvConfig::default().with_horizon(horizon))
    }

    #[test]
    fn test_episode_ends_at_horizon() {
        let mut env = env_with_horizon(3);
        env.reset(None);

        let stay = [Action::Stay, Action::Stay];
        assert!(!env.step(&stay).unwrap().done);
        assert!(!env.step(&stay).unwrap().done);

        let last = env.step(&stay).unwrap();
        assert!(last.done);
        let episode = last.info.episode.as_ref().expect("episode summary on final step");
        assert_eq!(episode.ep_length, 3);
        assert_eq!(episode.ep_sparse_r, 0.0);
        assert_eq!(last.info.get("soups_delivered"), Some(0.0));

        assert!(matches!(env.step(&stay), Err(OvercookedError::EpisodeDone)));

        env.reset(None);
        assert_eq!(env.state().timestep, 0);
        assert!(env.step(&stay).is_ok());
    }

    #[test]
    fn test_shaped_rewards_accumulate() {
        let mut env = env_with_horizon(5);
        env.reset(None);

        // Player 1 grabs an onion from (4, 1) and drops it into the pot at (2, 0)
        let script = [
            [Action::Stay, Action::Move(Direction::East)],
            [Action::Stay, Action::Interact],
            [Action::Stay, Action::Move(Direction::West)],
            [Action::Stay, Action::Move(Direction::North)],
            [Action::Stay, Action::Interact],
        ];
        let mut last = None;
        for joint in &script {
            last = Some(env.step(joint).unwrap());
        }
        let last = last.unwrap();
        assert!(last.done);
        assert_eq!(last.reward, 0.0);
        assert_eq!(last.info.shaped_r_by_agent, vec![0.0, 3.0]);

        let episode = last.info.episode.unwrap();
        assert_eq!(episode.ep_shaped_r, 3.0);
        assert_eq!(episode.ep_shaped_r_by_agent, vec![0.0, 3.0]);
    }

    #[test]
    fn test_random_start_is_seeded() {
        let mdp = Arc::new(OvercookedGridworld::from_layout_name("counter_circuit").unwrap());
        let config = EnvConfig::default().with_random_start(true);
        let mut a = OvercookedEnv::from_mdp(mdp.clone(), config.clone());
        let mut b = OvercookedEnv::from_mdp(mdp, config);

        a.reset(Some(11));
        b.reset(Some(11));
        assert_eq!(a.state(), b.state());
    }

    #[test]
    fn test_wrong_arity_is_rejected() {
        let mut env = env_with_horizon(10);
        env.reset(None);
        assert!(matches!(
            env.step(&[Action::Stay]),
            Err(OvercookedError::WrongNumberOfActions { .. })
        ));
        assert_eq!(env.state().timestep, 0);
    }

    #[test]
    fn test_delivery_count_reported_at_episode_end() {
        let mut env = env_with_horizon(2);
        env.reset(None);

        // Player 0 stands at (3, 2) facing the serving window with a soup
        let mut state = env.state().clone();
        let mut soup = crate::mdp::Soup::new(20);
        soup.add_ingredient(crate::mdp::Ingredient::Onion);
        state.players[0].position = (3, 2);
        state.players[0].orientation = Direction::South;
        state.players[0].held_object = Some(crate::mdp::ObjectState::Soup(soup));
        env.state = state;

        let first = env.step(&[Action::Interact, Action::Stay]).unwrap();
        assert_eq!(first.reward, 0.0);
        assert_eq!(first.info.get("soups_delivered"), None);

        let last = env.step(&[Action::Stay, Action::Stay]).unwrap();
        assert!(last.done);
        assert_eq!(last.info.get("soups_delivered"), Some(1.0));

        env.reset(None);
        env.step(&[Action::Stay, Action::Stay]).unwrap();
        let last = env.step(&[Action::Stay, Action::Stay]).unwrap();
        assert_eq!(last.info.get("soups_delivered"), Some(0.0));
    }
}
