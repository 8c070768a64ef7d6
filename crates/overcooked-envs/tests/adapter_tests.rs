//! End-to-end tests of the two-agent adapter.

use overcooked::env::{EpisodeStats, MultiAgentEnv};
use overcooked::mdp::{Direction, EnvConfig, ObjectState, LAYOUT_NAMES};
use overcooked::OvercookedError;
use overcooked_envs::Overcooked;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const NORTH: usize = 0;
const SOUTH: usize = 1;
const EAST: usize = 2;
const WEST: usize = 3;
const STAY: usize = 4;
const INTERACT: usize = 5;

#[test]
fn test_reset_shapes_for_every_layout() {
    for name in LAYOUT_NAMES {
        let mut env = Overcooked::new(name).unwrap();
        let obs = env.reset();
        let (w, h) = (env.mdp().width(), env.mdp().height());
        assert_eq!(obs.len(), 2, "{}", name);
        for o in &obs {
            assert_eq!(o.shape(), &[w, h, 26], "{}", name);
        }
    }
}

#[test]
fn test_cramped_room_dimensions() {
    let mut env = Overcooked::new("cramped_room").unwrap();
    let obs = env.reset();
    assert_eq!(obs[0].shape(), &[5, 4, 26]);
    assert_eq!(env.state().timestep, 0);
    assert_eq!(env.env().horizon(), 400);
}

#[test]
fn test_step_applies_both_actions() {
    let mut env = Overcooked::new("cramped_room").unwrap();
    env.reset();

    // Player 0 moves north from (1, 2); player 1 moves east into a dispenser
    let result = env.step(NORTH, EAST).unwrap();
    let players = &env.state().players;
    assert_eq!(players[0].position, (1, 1));
    assert_eq!(players[0].orientation, Direction::North);
    assert_eq!(players[1].position, (3, 1));
    assert_eq!(players[1].orientation, Direction::East);

    assert_eq!(result.reward, 0.0);
    assert!(!result.terminated);
    assert!(!result.truncated);
    assert_eq!(result.observations.len(), 2);
    assert_eq!(result.observations[0][[1, 1, 0]], 1.0);
    assert_eq!(result.info.sparse_r_by_agent, vec![0.0, 0.0]);
}

#[test]
fn test_collision_keeps_positions() {
    let mut env = Overcooked::new("cramped_room").unwrap();
    env.reset();
    env.step(EAST, STAY).unwrap();
    // Player 0 at (2, 2) and player 1 at (3, 1) both target (2, 1)
    env.step(NORTH, WEST).unwrap();

    let players = &env.state().players;
    assert_eq!(players[0].position, (2, 2));
    assert_eq!(players[1].position, (3, 1));
    assert_eq!(players[0].orientation, Direction::North);
    assert_eq!(players[1].orientation, Direction::West);
}

#[test]
fn test_episode_ends_at_horizon() {
    let mut env = Overcooked::with_config("cramped_room", EnvConfig::default().with_horizon(10)).unwrap();
    env.reset();

    for t in 1..=10 {
        let result = env.step(STAY, STAY).unwrap();
        assert_eq!(result.terminated, t == 10);
        assert!(!result.truncated);
    }
    assert!(env.is_done());
    assert!(matches!(env.step(STAY, STAY), Err(OvercookedError::EpisodeDone)));

    env.reset();
    assert!(!env.is_done());
    assert!(env.step(STAY, STAY).is_ok());
}

#[test]
fn test_full_soup_cycle_delivers_reward() {
    let mut env = Overcooked::new("cramped_room").unwrap();
    env.reset();

    // Player 1 carries three onions from (4, 1) into the pot at (2, 0)
    for _ in 0..3 {
        for a2 in [EAST, INTERACT, WEST, NORTH, INTERACT] {
            env.step(STAY, a2).unwrap();
        }
    }
    let pot = env.state().soup_at((2, 0)).unwrap();
    assert_eq!(pot.ingredients().len(), 3);

    // Player 1 starts cooking while player 0 turns to the dish dispenser
    env.step(SOUTH, INTERACT).unwrap();
    assert!(env.state().soup_at((2, 0)).unwrap().is_cooking());

    // Player 0 takes a dish; player 1 makes room at the pot
    let result = env.step(INTERACT, EAST).unwrap();
    assert_eq!(result.info.shaped_r_by_agent, vec![3.0, 0.0]);
    assert_eq!(env.state().players[0].held_object, Some(ObjectState::Dish));

    // Player 0 walks to (2, 1) and faces the pot
    for a1 in [NORTH, EAST, NORTH] {
        env.step(a1, STAY).unwrap();
    }
    assert_eq!(env.state().players[0].position, (2, 1));

    while !env.state().soup_at((2, 0)).unwrap().is_ready() {
        env.step(STAY, STAY).unwrap();
    }

    let result = env.step(INTERACT, STAY).unwrap();
    assert_eq!(result.info.shaped_r_by_agent, vec![5.0, 0.0]);
    assert!(matches!(
        env.state().players[0].held_object,
        Some(ObjectState::Soup(_))
    ));

    // Carry the soup to the serving window at (3, 3)
    for a1 in [SOUTH, EAST, SOUTH] {
        env.step(a1, STAY).unwrap();
    }
    let result = env.step(INTERACT, STAY).unwrap();
    assert_eq!(result.reward, 20.0);
    assert_eq!(result.info.sparse_r_by_agent, vec![20.0, 0.0]);
    assert!(env.state().players[0].held_object.is_none());
}

#[test]
fn test_episode_stats_over_random_policy() {
    let config = EnvConfig::default().with_horizon(25);
    let mut env = EpisodeStats::new(Overcooked::with_config("coordination_ring", config).unwrap());
    let mut rng = StdRng::seed_from_u64(7);

    env.reset(Some(7));
    let mut steps = 0;
    loop {
        let actions = [rng.gen_range(0..6), rng.gen_range(0..6)];
        let result = env.step(&actions).unwrap();
        steps += 1;
        if result.done() {
            assert_eq!(result.info.get("episode_length"), Some(25.0));
            assert_eq!(result.info.get("ep_length"), Some(25.0));
            assert!(result.info.get("episode_return").is_some());
            break;
        }
    }
    assert_eq!(steps, 25);
    assert!(env.is_done());
}

#[test]
fn test_seeded_random_start_is_reproducible() {
    let config = EnvConfig::default().with_random_start(true);
    let mut a = Overcooked::with_config("counter_circuit", config.clone()).unwrap();
    let mut b = Overcooked::with_config("counter_circuit", config).unwrap();

    let obs_a = a.reset_seeded(Some(3));
    let obs_b = b.reset_seeded(Some(3));
    assert_eq!(a.state(), b.state());
    assert_eq!(obs_a, obs_b);
}

#[test]
fn test_invalid_config_rejected() {
    let config = EnvConfig::default().with_horizon(0);
    assert!(matches!(
        Overcooked::with_config("cramped_room", config),
        Err(OvercookedError::Config(_))
    ));
}
