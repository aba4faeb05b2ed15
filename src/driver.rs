// Copyright 2021 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A line-oriented command loop for playing a match from a terminal.
//!
//! Commands:
//!  * `new [local|easy|medium|hard]`: start a new match, optionally changing the mode,
//!  * `board`: print the board and whose turn it is,
//!  * `moves`: list the legal moves of the side to move,
//!  * `select <row> <col>`: select a piece,
//!  * `move <row> <col>`: move the selected piece,
//!  * `advance`: apply the next jump of a multi-jump in progress,
//!  * `ai`: let the computer play its turn,
//!  * `quit`.
//!
//! When playing against the computer, it replies on its own as soon as the human's turn ends.

use std::io::{self, BufRead, Write};

use anyhow::{anyhow, Context};

use crate::{
    ai::Difficulty,
    config::{MatchConfig, PlayMode},
    core::Color,
    game::MoveResult,
    play::Match,
};

pub fn run(config: MatchConfig) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    run_with(config, stdin.lock(), stdout.lock())
}

pub fn run_with<R: BufRead, W: Write>(config: MatchConfig, input: R, mut output: W) -> anyhow::Result<()> {
    let mut driver = Driver::new(config);
    driver.start(&mut output)?;
    for maybe_line in input.lines() {
        let line = maybe_line?;
        let components: Vec<_> = line.split_whitespace().collect();
        let (&command, arguments) = components.split_first().unwrap_or((&"", &[]));
        let result = match (command, arguments) {
            ("", []) => Ok(()),
            ("quit", []) => break,
            ("new", args) => driver.handle_new(args, &mut output),
            ("board", []) => driver.handle_board(&mut output),
            ("moves", []) => driver.handle_moves(&mut output),
            ("select", [row, col]) => driver.handle_select(row, col, &mut output),
            ("move", [row, col]) => driver.handle_move(row, col, &mut output),
            ("advance", []) => driver.handle_advance(&mut output),
            ("ai", []) => driver.handle_ai(&mut output),
            _ => Err(anyhow!("unrecognized command: {}", line.trim())),
        };

        if let Err(e) = result {
            writeln!(output, "error: {:#}", e)?;
        }

        output.flush()?;
    }

    Ok(())
}

struct Driver {
    config: MatchConfig,
    game: Match,
}

impl Driver {
    fn new(config: MatchConfig) -> Driver {
        let game = Match::new(&config);
        Driver { config, game }
    }

    fn start<W: Write>(&mut self, out: &mut W) -> anyhow::Result<()> {
        writeln!(out, "{}", self.game.session().board())?;
        writeln!(out, "{} to move", self.game.session().turn())?;
        self.reply(out)
    }

    fn handle_new<W: Write>(&mut self, args: &[&str], out: &mut W) -> anyhow::Result<()> {
        match args {
            [] => {}
            ["local"] => self.config.mode = PlayMode::Local,
            [difficulty] => {
                let difficulty: Difficulty = difficulty.parse()?;
                self.config.mode = PlayMode::vs_ai(difficulty);
            }
            _ => return Err(anyhow!("usage: new [local|easy|medium|hard]")),
        }

        self.game = Match::new(&self.config);
        self.start(out)
    }

    fn handle_board<W: Write>(&mut self, out: &mut W) -> anyhow::Result<()> {
        let session = self.game.session();
        writeln!(out, "{}", session.board())?;
        match session.winner() {
            Some(winner) => writeln!(out, "game over, {} wins", winner)?,
            None => writeln!(out, "{} to move ({:?})", session.turn(), session.state())?,
        }

        Ok(())
    }

    fn handle_moves<W: Write>(&mut self, out: &mut W) -> anyhow::Result<()> {
        let moves = self.game.session().legal_moves();
        if moves.is_empty() {
            writeln!(out, "no legal moves")?;
        }

        for mov in moves.moves() {
            writeln!(out, "{}", mov)?;
        }

        Ok(())
    }

    fn handle_select<W: Write>(&mut self, row: &str, col: &str, out: &mut W) -> anyhow::Result<()> {
        let (row, col) = parse_coordinates(row, col)?;
        let selection = self.game.session_mut().select(row, col)?;
        writeln!(out, "selected {}", selection.square)?;
        for mov in &selection.moves {
            writeln!(out, "  {}", mov)?;
        }

        Ok(())
    }

    fn handle_move<W: Write>(&mut self, row: &str, col: &str, out: &mut W) -> anyhow::Result<()> {
        let (row, col) = parse_coordinates(row, col)?;
        let mover = self.game.session().turn();
        let result = self.game.session_mut().move_to(row, col)?;
        report(mover, &result, out)?;
        self.reply(out)
    }

    fn handle_advance<W: Write>(&mut self, out: &mut W) -> anyhow::Result<()> {
        let mover = self.game.session().turn();
        let result = self.game.session_mut().advance_chain()?;
        report(mover, &result, out)?;
        self.reply(out)
    }

    fn handle_ai<W: Write>(&mut self, out: &mut W) -> anyhow::Result<()> {
        let mover = self.game.session().turn();
        for result in self.game.play_ai_turn()? {
            report(mover, &result, out)?;
        }

        Ok(())
    }

    /// Lets the computer move if it is its turn.
    fn reply<W: Write>(&mut self, out: &mut W) -> anyhow::Result<()> {
        if self.game.ai_to_move() {
            self.handle_ai(out)?;
        }

        Ok(())
    }
}

fn parse_coordinates(row: &str, col: &str) -> anyhow::Result<(i32, i32)> {
    let row = row
        .parse()
        .with_context(|| format!("invalid row: {}", row))?;
    let col = col
        .parse()
        .with_context(|| format!("invalid column: {}", col))?;
    Ok((row, col))
}

fn report<W: Write>(mover: Color, result: &MoveResult, out: &mut W) -> anyhow::Result<()> {
    write!(out, "{}: {} -> {}", mover, result.step.from, result.step.to)?;
    if let Some(captured) = result.captured {
        write!(out, " x {}", captured.square())?;
    }

    if result.promoted {
        write!(out, " (crowned)")?;
    }

    writeln!(out)?;
    if result.chain_continues {
        writeln!(out, "the capture continues, use `advance`")?;
    }

    if result.must_continue {
        writeln!(out, "{} must keep capturing from {}", mover, result.step.to)?;
    }

    if let Some(winner) = result.winner {
        writeln!(out, "game over, {} wins", winner)?;
    } else if result.turn_ended {
        writeln!(out, "{} to move", mover.toggle())?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_script(config: MatchConfig, script: &str) -> String {
        let mut output = Vec::new();
        run_with(config, script.as_bytes(), &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn local_moves() {
        let output = run_script(MatchConfig::default(), "select 2 1\nmove 3 2\nboard\n");
        assert!(output.contains("selected (2, 1)"));
        assert!(output.contains("white: (2, 1) -> (3, 2)"));
        assert!(output.contains("black to move (AwaitingSelection)"));
    }

    #[test]
    fn rejected_commands_keep_running() {
        let output = run_script(
            MatchConfig::default(),
            "select 5 0\nmove 3 2\nselect two 1\nfly\nadvance\nselect 2 1\n",
        );
        assert!(output.contains("error: invalid selection"));
        assert!(output.contains("error: illegal command: no piece is selected"));
        assert!(output.contains("error: invalid row: two"));
        assert!(output.contains("error: unrecognized command: fly"));
        assert!(output.contains("error: illegal command: no capture sequence is in progress"));
        assert!(output.contains("selected (2, 1)"));
    }

    #[test]
    fn quit_stops_reading() {
        let output = run_script(MatchConfig::default(), "quit\nselect 2 1\n");
        assert!(!output.contains("selected"));
    }

    #[test]
    fn moves_lists_start_position() {
        let output = run_script(MatchConfig::default(), "moves\n");
        assert_eq!(7, output.lines().filter(|l| l.contains("->")).count());
    }

    #[test]
    fn ai_replies() {
        let config = MatchConfig {
            seed: Some(9),
            ..MatchConfig::default()
        };
        let output = run_script(config, "new hard\nselect 2 1\nmove 3 2\n");
        assert!(output.contains("white: (2, 1) -> (3, 2)"));
        assert!(output.contains("black: "));
        assert!(output.ends_with("white to move\n"));
    }

    #[test]
    fn ai_moving_first() {
        let config = MatchConfig {
            mode: PlayMode::VsAi {
                ai_color: Color::White,
                difficulty: Difficulty::Easy,
            },
            first_to_move: Color::White,
            seed: Some(3),
        };
        let output = run_script(config, "ai\n");
        assert!(output.contains("white: "));
        assert!(output.contains("black to move"));
        assert!(output.contains("error: illegal command: it is not the AI's turn"));
    }

    #[test]
    fn bad_new() {
        let output = run_script(MatchConfig::default(), "new impossible\nnew easy hard\n");
        assert!(output.contains("error: unknown difficulty: impossible"));
        assert!(output.contains("error: usage: new"));
    }
}
