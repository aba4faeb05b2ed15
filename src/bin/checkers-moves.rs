// Copyright 2021 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::{fs, path::PathBuf};

use anyhow::Context;
use checkers::{movegen, Board, Color};
use structopt::StructOpt;

/// Prints the legal moves of one side, after the mandatory capture rule has been applied.
#[derive(Debug, StructOpt)]
struct Options {
    /// File containing a board diagram. The starting position is used if absent.
    #[structopt(name = "DIAGRAM")]
    diagram: Option<PathBuf>,
    /// The side to generate moves for.
    #[structopt(short, long, default_value = "white")]
    color: Color,
    /// Print the moves as JSON.
    #[structopt(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    let ops = Options::from_args();
    let board = match ops.diagram {
        Some(ref path) => {
            let diagram = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            Board::from_diagram(diagram)?
        }
        None => Board::start(),
    };

    let moves = movegen::generate_moves(ops.color, &board).moves();
    if ops.json {
        println!("{}", serde_json::to_string_pretty(&moves)?);
    } else {
        for mov in moves {
            println!("{}", mov);
        }
    }

    Ok(())
}
