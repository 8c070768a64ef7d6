//! MDP and environment configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::Ingredient;
use crate::{OvercookedError, Result};

/// Shaped (dense) reward bonuses handed out for useful intermediate steps
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewardShaping {
    /// Putting an ingredient into a pot
    pub placement_in_pot: f32,
    /// Picking up a dish while a soup is cooking or ready and no spare dish is out
    pub dish_pickup: f32,
    /// Scooping a ready soup out of a pot
    pub soup_pickup: f32,
}

impl Default for RewardShaping {
    fn default() -> Self {
        Self {
            placement_in_pot: 3.0,
            dish_pickup: 3.0,
            soup_pickup: 5.0,
        }
    }
}

/// Parameters of the kitchen rules
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MdpParams {
    /// Ticks a pot needs to finish a soup once cooking has started
    pub cook_time: u32,
    /// Maximum ingredients per pot
    pub max_ingredients: usize,
    /// Sparse reward for delivering a soup that matches an order
    pub delivery_reward: f32,
    /// Orders available at the start of every episode
    pub start_orders: Vec<Vec<Ingredient>>,
    pub shaping: RewardShaping,
}

impl Default for MdpParams {
    fn default() -> Self {
        Self {
            cook_time: 20,
            max_ingredients: 3,
            delivery_reward: 20.0,
            start_orders: vec![vec![Ingredient::Onion; 3]],
            shaping: RewardShaping::default(),
        }
    }
}

impl MdpParams {
    /// Check parameter consistency
    pub fn validate(&self) -> Result<()> {
        if self.cook_time == 0 {
            return Err(OvercookedError::Config("cook_time must be positive".to_string()));
        }
        if self.max_ingredients == 0 {
            return Err(OvercookedError::Config(
                "max_ingredients must be positive".to_string(),
            ));
        }
        for order in &self.start_orders {
            if order.is_empty() || order.len() > self.max_ingredients {
                return Err(OvercookedError::Config(format!(
                    "order {:?} must have between 1 and {} ingredients",
                    order, self.max_ingredients
                )));
            }
        }
        Ok(())
    }
}

/// Configuration for an `OvercookedEnv`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvConfig {
    /// Episode length in timesteps
    pub horizon: u32,
    /// Spawn players on random floor cells instead of the layout start cells
    pub random_start: bool,
    pub mdp: MdpParams,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            horizon: 400,
            random_start: false,
            mdp: MdpParams::default(),
        }
    }
}

impl EnvConfig {
    /// Load and validate a configuration from a JSON file.
    ///
    /// Missing fields take their default values.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path.as_ref())?;
        let config: EnvConfig = serde_json::from_reader(std::io::BufReader::new(file))?;
        config.validate()?;
        tracing::info!(path = %path.as_ref().display(), horizon = config.horizon, "Loaded environment config");
        Ok(config)
    }

    /// Check configuration consistency
    pub fn validate(&self) -> Result<()> {
        if self.horizon == 0 {
            return Err(OvercookedError::Config("horizon must be positive".to_string()));
        }
        self.mdp.validate()
    }

    /// Set the episode horizon
    pub fn with_horizon(mut self, horizon: u32) -> Self {
        self.horizon = horizon;
        self
    }

    /// Enable or disable random start positions
    pub fn with_random_start(mut self, random_start: bool) -> Self {
        self.random_start = random_start;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = EnvConfig::default();
        assert_eq!(config.horizon, 400);
        assert_eq!(config.mdp.cook_time, 20);
        assert_eq!(config.mdp.start_orders, vec![vec![Ingredient::Onion; 3]]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let json = r#"{ "horizon": 50, "mdp": { "cook_time": 5 } }"#;
        let config: EnvConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.horizon, 50);
        assert_eq!(config.mdp.cook_time, 5);
        assert_eq!(config.mdp.delivery_reward, 20.0);
        assert_eq!(config.mdp.shaping.soup_pickup, 5.0);
    }

    #[test]
    fn test_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "horizon": 10, "random_start": true, "mdp": {{ "start_orders": [["onion", "tomato"]] }} }}"#
        )
        .unwrap();

        let config = EnvConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.horizon, 10);
        assert!(config.random_start);
        assert_eq!(
            config.mdp.start_orders,
            vec![vec![Ingredient::Onion, Ingredient::Tomato]]
        );
    }

    #[test]
    fn test_validation_errors() {
        let config = EnvConfig::default().with_horizon(0);
        assert!(matches!(config.validate(), Err(OvercookedError::Config(_))));

        let mut config = EnvConfig::default();
        config.mdp.start_orders = vec![vec![Ingredient::Onion; 4]];
        assert!(matches!(config.validate(), Err(OvercookedError::Config(_))));
    }
}
