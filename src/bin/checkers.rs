// Copyright 2021 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::path::PathBuf;

use anyhow::Context;
use checkers::{driver, Color, Difficulty, MatchConfig, PlayMode};
use structopt::StructOpt;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Play checkers from the terminal.
#[derive(Debug, StructOpt)]
struct Options {
    /// JSON match configuration to start from.
    #[structopt(short, long)]
    config: Option<PathBuf>,
    /// Play against the computer at this difficulty (easy, medium or hard).
    #[structopt(long)]
    ai: Option<Difficulty>,
    /// The color the computer plays.
    #[structopt(long, default_value = "black")]
    ai_color: Color,
    /// Seed for the computer's random choices.
    #[structopt(long)]
    seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("setting default subscriber failed")?;

    let args = Options::from_args();
    let mut config = match args.config {
        Some(ref path) => MatchConfig::from_file(path)?,
        None => MatchConfig::default(),
    };

    if let Some(difficulty) = args.ai {
        config.mode = PlayMode::VsAi {
            ai_color: args.ai_color,
            difficulty,
        };
    }

    if args.seed.is_some() {
        config.seed = args.seed;
    }

    driver::run(config)
}
