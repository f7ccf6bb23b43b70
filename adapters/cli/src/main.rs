#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots the Snake game.

mod config;
mod session;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use snake_rendering::{BoardGeometry, Palette, Presentation, RenderingBackend};
use snake_rendering_macroquad::MacroquadBackend;
use snake_world::{query, World};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::{config::load_config, session::Session};

/// Whether presentation waits for the display refresh.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum VsyncMode {
    /// Synchronise with the display.
    On,
    /// Render as fast as possible.
    Off,
}

/// Classic Snake on a grid.
#[derive(Debug, Parser)]
#[command(name = "snake", version)]
struct Args {
    /// TOML file overriding board size, snake length or tick interval.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Seed for food placement; random when omitted.
    #[arg(long)]
    seed: Option<u64>,
    /// Speed factor the first game starts with.
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    speed: u32,
    /// Start moving immediately instead of waiting for Play.
    #[arg(long)]
    start_running: bool,
    /// Vertical synchronisation.
    #[arg(long, value_enum, default_value_t = VsyncMode::On)]
    vsync: VsyncMode,
    /// Image manifest for the game-over banner.
    #[arg(long, value_name = "PATH", default_value = "assets/manifest.toml")]
    assets: PathBuf,
}

/// Entry point for the Snake command-line interface.
fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let config = load_config(args.config.as_deref())?;
    let seed = args.seed.unwrap_or_else(rand::random);
    let world = World::new(config, seed).context("failed to create the game world")?;
    info!(seed, "{}", query::welcome_banner(&world));

    let geometry =
        BoardGeometry::from_board(&config.board).context("failed to lay out the board")?;
    let mut session = Session::new(world, args.speed, args.start_running);
    let presentation = Presentation::new("Snake", geometry, Palette::default(), session.frame());

    MacroquadBackend::new()
        .with_vsync(args.vsync == VsyncMode::On)
        .with_manifest_path(Some(args.assets))
        .run(presentation, move |dt, input, frame| {
            session.update(dt, input, frame);
        })
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn arguments_are_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn defaults_start_paused_at_speed_one() {
        let args = Args::try_parse_from(["snake"]).expect("no arguments are required");

        assert_eq!(args.speed, 1);
        assert!(!args.start_running);
        assert_eq!(args.vsync, VsyncMode::On);
        assert_eq!(args.seed, None);
        assert_eq!(args.assets, PathBuf::from("assets/manifest.toml"));
    }

    #[test]
    fn all_flags_parse() {
        let args = Args::try_parse_from([
            "snake",
            "--config",
            "snake.toml",
            "--seed",
            "42",
            "--speed",
            "3",
            "--start-running",
            "--vsync",
            "off",
        ])
        .expect("flags are valid");

        assert_eq!(args.config, Some(PathBuf::from("snake.toml")));
        assert_eq!(args.seed, Some(42));
        assert_eq!(args.speed, 3);
        assert!(args.start_running);
        assert_eq!(args.vsync, VsyncMode::Off);
    }

    #[test]
    fn zero_speed_is_rejected() {
        assert!(Args::try_parse_from(["snake", "--speed", "0"]).is_err());
    }
}
