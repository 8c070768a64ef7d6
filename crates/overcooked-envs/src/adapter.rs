//! The `Overcooked` adapter: index-based stepping over `OvercookedEnv`.

use std::sync::Arc;

use ndarray::ArrayD;
use overcooked::env::{EnvInfo, MultiAgentEnv, StepResult};
use overcooked::mdp::{Action, EnvConfig, OvercookedEnv, OvercookedGridworld, OvercookedState};
use overcooked::spaces::{Box as BoxSpace, Discrete, DynSpace, MultiDiscrete};
use overcooked::{OvercookedError, Result};

/// Episode length used by `Overcooked::new`
pub const DEFAULT_HORIZON: u32 = 400;

/// Action for each discrete index
pub const ACTION_MAP: [Action; Action::NUM_ACTIONS] = Action::ALL;

const NUM_AGENTS: usize = 2;

/// Two-agent Overcooked environment driven by action indices
pub struct Overcooked {
    pub(crate) mdp: Arc<OvercookedGridworld>,
    pub(crate) env: OvercookedEnv,
}

impl Overcooked {
    /// Create an environment for a built-in layout with a 400-step horizon.
    ///
    /// # Errors
    /// `UnknownLayout` if `layout_name` is not a built-in layout.
    pub fn new(layout_name: &str) -> Result<Self> {
        Self::with_config(layout_name, EnvConfig::default().with_horizon(DEFAULT_HORIZON))
    }

    /// Create an environment for a built-in layout with custom settings
    pub fn with_config(layout_name: &str, config: EnvConfig) -> Result<Self> {
        config.validate()?;
        let mdp = Arc::new(OvercookedGridworld::from_layout_name_with(
            layout_name,
            config.mdp.clone(),
        )?);
        if mdp.num_players() != NUM_AGENTS {
            return Err(OvercookedError::InvalidLayout {
                name: layout_name.to_string(),
                reason: format!("expected {} players, found {}", NUM_AGENTS, mdp.num_players()),
            });
        }
        let env = OvercookedEnv::from_mdp(mdp.clone(), config);

        tracing::info!(
            layout = mdp.layout_name(),
            width = mdp.width(),
            height = mdp.height(),
            horizon = env.horizon(),
            "Overcooked environment initialized"
        );

        Ok(Self { mdp, env })
    }

    pub fn mdp(&self) -> &OvercookedGridworld {
        &self.mdp
    }

    pub fn env(&self) -> &OvercookedEnv {
        &self.env
    }

    /// Current simulation state
    pub fn state(&self) -> &OvercookedState {
        self.env.state()
    }

    /// Look up the action for a discrete index
    pub fn action(&self, index: usize) -> Result<Action> {
        Action::from_index(index).ok_or(OvercookedError::InvalidAction(index))
    }

    /// Joint action space of both players
    pub fn joint_action_space(&self) -> MultiDiscrete {
        MultiDiscrete::joint(NUM_AGENTS, ACTION_MAP.len())
    }

    /// Start a new episode and return each player's featurized view
    pub fn reset(&mut self) -> Vec<ArrayD<f32>> {
        self.reset_seeded(None)
    }

    /// Like `reset`, reseeding the start-state RNG first
    pub fn reset_seeded(&mut self, seed: Option<u64>) -> Vec<ArrayD<f32>> {
        self.env.reset(seed);
        self.featurize(self.env.state())
    }

    /// Apply one action per player.
    ///
    /// Returns the featurized next state, the team reward, whether the
    /// horizon was reached and the step info. `truncated` is always false.
    pub fn step(&mut self, action_player_1: usize, action_player_2: usize) -> Result<StepResult> {
        let joint = [self.action(action_player_1)?, self.action(action_player_2)?];
        let transition = self.env.step(&joint)?;

        Ok(StepResult {
            observations: self.featurize(&transition.state),
            reward: transition.reward,
            terminated: transition.done,
            truncated: false,
            info: transition.info,
        })
    }

    fn featurize(&self, state: &OvercookedState) -> Vec<ArrayD<f32>> {
        self.mdp.lossless_state_encoding(state, self.env.horizon())
    }
}

impl MultiAgentEnv for Overcooked {
    fn observation_space(&self) -> DynSpace {
        let params = self.mdp.params();
        let high = params.cook_time.max(params.max_ingredients as u32).max(1) as f32;
        DynSpace::Box(BoxSpace::uniform(&self.mdp.lossless_encoding_shape(), 0.0, high))
    }

    fn action_space(&self) -> DynSpace {
        DynSpace::Discrete(Discrete::new(ACTION_MAP.len()))
    }

    fn num_agents(&self) -> usize {
        NUM_AGENTS
    }

    fn reset(&mut self, seed: Option<u64>) -> (Vec<ArrayD<f32>>, EnvInfo) {
        (self.reset_seeded(seed), EnvInfo::new())
    }

    fn step(&mut self, actions: &[usize]) -> Result<StepResult> {
        match actions {
            [a1, a2] => Overcooked::step(self, *a1, *a2),
            _ => Err(OvercookedError::WrongNumberOfActions {
                expected: NUM_AGENTS,
                actual: actions.len(),
            }),
        }
    }

    fn render(&self) -> Option<String> {
        Some(self.mdp.state_string(self.env.state()))
    }

    fn is_done(&self) -> bool {
        self.env.is_done()
    }
}
