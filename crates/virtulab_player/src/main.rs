// SPDX-License-Identifier: MIT OR Apache-2.0
//! `VirtuLab` Player - interactive science-experiment simulations
//!
//! A headless front end for the `VirtuLab` experiments:
//! - Steps through each procedure on the terminal
//! - Plays the tween routines on a real-time frame clock
//! - Prints captions, notices and the completion overlay
//!
//! Usage: `virtulab_player <experiment>` where `<experiment>` is a catalog
//! slug such as `elodea` or `fermentation`.

mod backend;
mod frame_clock;
mod player;

use backend::RenderBackend;
use player::Player;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn main() {
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive("virtulab_player=info".parse().unwrap())
        .add_directive("virtulab_sequencer=info".parse().unwrap());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting VirtuLab player v{}", env!("CARGO_PKG_VERSION"));

    let Some(slug) = std::env::args().nth(1) else {
        eprintln!("Usage: virtulab_player <experiment>");
        list_experiments();
        std::process::exit(2);
    };
    let Some(experiment) = virtulab_experiments::find(&slug) else {
        eprintln!("Unknown experiment: {slug}");
        list_experiments();
        std::process::exit(2);
    };

    RenderBackend::detect().advise();

    let mut player = match Player::new(experiment) {
        Ok(player) => player,
        Err(e) => {
            tracing::error!("Failed to set up {slug}: {e}");
            std::process::exit(1);
        }
    };
    if let Err(e) = player.run() {
        tracing::error!("Player crashed: {e}");
        std::process::exit(1);
    }
}

fn list_experiments() {
    eprintln!("Available experiments:");
    for experiment in virtulab_experiments::EXPERIMENTS {
        eprintln!("  {:14} {}", experiment.slug, experiment.title);
    }
}
