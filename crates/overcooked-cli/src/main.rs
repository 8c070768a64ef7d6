//! Overcooked CLI
//!
//! Command-line driver for the two-agent Overcooked environment.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

use overcooked::env::{EpisodeStats, MultiAgentEnv};
use overcooked::log::{ConsoleLogger, MetricLogger, NoOpLogger};
use overcooked::mdp::{EnvConfig, Layout, LAYOUT_NAMES};
use overcooked::spaces::Space;
use overcooked_envs::Overcooked;

const SECTION_WIDTH: usize = 27;

#[derive(Parser)]
#[command(name = "overcooked")]
#[command(version, about = "Overcooked - two-agent cooperative kitchen environment", long_about = None)]
struct Cli {
    /// JSON file with environment settings (horizon, random starts, kitchen rules)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a layout, print its diagnostics and take a step
    Demo {
        /// Layout name
        #[arg(default_value = "cramped_room")]
        layout: String,

        /// Action index for player 1
        #[arg(long, default_value = "0")]
        p1: usize,

        /// Action index for player 2
        #[arg(long, default_value = "2")]
        p2: usize,

        /// Number of steps to take
        #[arg(long, default_value = "1")]
        steps: usize,
    },

    /// List available layouts
    List,

    /// Evaluate a uniform-random joint policy
    Eval {
        /// Layout name
        #[arg(default_value = "cramped_room")]
        layout: String,

        /// Number of episodes
        #[arg(long, default_value = "10")]
        episodes: usize,

        /// Seed for the action sampler
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Only report the final averages
        #[arg(long)]
        quiet: bool,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Demo { layout, p1, p2, steps } => {
            demo(&layout, config, p1, p2, steps)?;
        }
        Commands::List => {
            list_layouts()?;
        }
        Commands::Eval {
            layout,
            episodes,
            seed,
            quiet,
        } => {
            eval(&layout, config, episodes, seed, quiet)?;
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<EnvConfig> {
    match path {
        Some(p) => EnvConfig::from_json_file(p)
            .with_context(|| format!("failed to load config from {}", p.display())),
        None => Ok(EnvConfig::default()),
    }
}

fn section(title: &str) {
    let bar = "=".repeat(SECTION_WIDTH);
    println!("{} {} {}", bar, title, bar);
}

fn demo(layout: &str, config: EnvConfig, p1: usize, p2: usize, steps: usize) -> Result<()> {
    tracing::info!(layout, p1, p2, steps, "Running demo");

    let mut env = Overcooked::with_config(layout, config)?;
    env.print_init_summary();

    let features = env.reset();

    section("STATE INFO");
    env.print_state_info();

    section("STATE AS FEATURES");
    println!("{}", features.len());
    let shapes: Vec<String> = features.iter().map(|f| format!("{:?}", f.shape())).collect();
    println!("[{}]", shapes.join(", "));

    section("LAYOUT");
    env.visualize_layout();

    section("AVAILABLE ACTIONS");
    env.display_actions();

    println!("{}", "=".repeat(54));
    for step in 0..steps {
        if env.is_done() {
            tracing::info!(step, "Episode finished, stopping demo");
            break;
        }
        println!("Taking a step");
        let result = env.step(p1, p2)?;

        env.visualize_layout();
        println!("{}", result.reward);
        println!("{}", result.done());
    }

    Ok(())
}

fn eval(layout: &str, config: EnvConfig, episodes: usize, seed: u64, quiet: bool) -> Result<()> {
    tracing::info!(layout, episodes, seed, "Starting evaluation (random policy)");

    let mut env = EpisodeStats::new(Overcooked::with_config(layout, config)?);
    let joint_space = env.inner().joint_action_space();
    let mut rng = StdRng::seed_from_u64(seed);
    let logger: Box<dyn MetricLogger> = if quiet {
        Box::new(NoOpLogger)
    } else {
        Box::new(ConsoleLogger::new())
    };

    let mut total_return = 0.0;
    let mut total_shaped = 0.0;

    for ep in 0..episodes {
        env.reset(Some(seed.wrapping_add(ep as u64)));

        loop {
            let actions = joint_space.sample(&mut rng);
            let result = env.step(&actions)?;
            if result.done() {
                total_return += result.info.get("episode_return").unwrap_or(0.0);
                total_shaped += result.info.get("ep_shaped_r").unwrap_or(0.0);
                logger.log_episode(&result.info, ep as u64);
                break;
            }
        }
    }

    let n = episodes.max(1) as f32;
    tracing::info!(
        avg_return = total_return / n,
        avg_shaped_return = total_shaped / n,
        "Evaluation complete"
    );
    logger.close();

    Ok(())
}

fn list_layouts() -> Result<()> {
    println!("Available layouts:");
    println!();
    for name in LAYOUT_NAMES {
        let layout = Layout::named(name)?;
        println!(
            "  {:<24}{}x{}, {} players",
            name,
            layout.width(),
            layout.height(),
            layout.num_players()
        );
    }
    Ok(())
}
