// Copyright 2021 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use anyhow::Context;
use checkers::{play, Color, Difficulty, GameSession, Strategist};
use rand::{rngs::SmallRng, SeedableRng};
use structopt::StructOpt;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Plays the computer against itself and reports the results.
#[derive(Debug, StructOpt)]
struct Options {
    /// Difficulty of the white player.
    #[structopt(long, default_value = "hard")]
    white: Difficulty,
    /// Difficulty of the black player.
    #[structopt(long, default_value = "medium")]
    black: Difficulty,
    /// Number of games to play.
    #[structopt(short, long, default_value = "1")]
    games: u32,
    /// Seed for the random choices of both players.
    #[structopt(long)]
    seed: Option<u64>,
    /// Give up on a game after this many turns.
    #[structopt(long, default_value = "400")]
    max_turns: u32,
}

fn main() -> anyhow::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("setting default subscriber failed")?;

    let args = Options::from_args();
    let mut rng = match args.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_entropy(),
    };

    let white = Strategist::new(args.white);
    let black = Strategist::new(args.black);
    let (mut white_wins, mut black_wins, mut unfinished) = (0, 0, 0);
    for game in 1..=args.games {
        let span = tracing::info_span!("game", game);
        let _enter = span.enter();

        let mut session = GameSession::new(Color::White);
        let mut turns = 0;
        while !session.is_over() && turns < args.max_turns {
            let strategist = match session.turn() {
                Color::White => &white,
                Color::Black => &black,
            };
            play::play_turn(&mut session, strategist, &mut rng)?;
            turns += 1;
        }

        match session.winner() {
            Some(Color::White) => white_wins += 1,
            Some(Color::Black) => black_wins += 1,
            None => unfinished += 1,
        }

        println!("===========================");
        print!("{}", session.board());
        println!("===========================");
        match session.winner() {
            Some(winner) => println!("game {}: {} wins after {} turns", game, winner, turns),
            None => println!("game {}: no result after {} turns", game, turns),
        }
    }

    println!("{:<15} {}", format!("White ({}):", args.white), white_wins);
    println!("{:<15} {}", format!("Black ({}):", args.black), black_wins);
    println!("{:<15} {}", "Unfinished:", unfinished);
    Ok(())
}
