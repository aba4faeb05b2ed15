// Copyright 2021 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Move selection for computer-controlled players.
//!
//! A strategist never looks ahead. Each difficulty tier narrows the set of legal moves with a few static
//! preferences and then picks uniformly at random among whatever is left.

use std::str::FromStr;

use derive_more::Display;
use rand::{seq::SliceRandom, Rng};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{core::Move, moveset::MoveSet, Board};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DifficultyParseError {
    #[error("unknown difficulty: {0}")]
    Unknown(String),
}

#[derive(Copy, Clone, Debug, Display, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Uniformly random among all legal moves.
    #[display(fmt = "easy")]
    Easy,
    /// Prefers the captures that take the most pieces.
    #[display(fmt = "medium")]
    Medium,
    /// Like `Medium`, but also steers men towards promotion.
    #[display(fmt = "hard")]
    Hard,
}

impl FromStr for Difficulty {
    type Err = DifficultyParseError;

    fn from_str(s: &str) -> Result<Difficulty, DifficultyParseError> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(DifficultyParseError::Unknown(s.to_owned())),
        }
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Difficulty::Medium
    }
}

/// A stateless move picker for one difficulty tier.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Strategist {
    difficulty: Difficulty,
}

impl Strategist {
    pub fn new(difficulty: Difficulty) -> Strategist {
        Strategist { difficulty }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Picks one move out of `moves`, or `None` if there are none. `board` is only read, to find out which pieces
    /// are kings.
    pub fn choose_move<R: Rng + ?Sized>(
        &self,
        moves: &MoveSet,
        board: &Board,
        rng: &mut R,
    ) -> Option<Move> {
        let all = moves.moves();
        let candidates = match self.difficulty {
            Difficulty::Easy => all,
            Difficulty::Medium => most_captures(all),
            Difficulty::Hard => {
                if moves.has_capture() {
                    let best = most_captures(all);
                    prefer(best, |mov| promotes(board, mov))
                } else {
                    // Every man move is forward, so each one makes progress towards promotion.
                    prefer(all, |mov| is_man_move(board, mov))
                }
            }
        };

        let choice = candidates.choose(rng).cloned();
        if let Some(ref mov) = choice {
            tracing::debug!(
                "{} strategist picked {} out of {} candidates",
                self.difficulty,
                mov,
                candidates.len()
            );
        }

        choice
    }
}

/// Keeps the captures that take the most pieces. Leaves `moves` alone if nothing captures.
fn most_captures(moves: Vec<Move>) -> Vec<Move> {
    let max = moves.iter().map(|m| m.captured().len()).max().unwrap_or(0);
    if max == 0 {
        return moves;
    }

    moves
        .into_iter()
        .filter(|m| m.captured().len() == max)
        .collect()
}

/// Narrows `moves` to those matching `pred`, unless none do.
fn prefer<F>(moves: Vec<Move>, pred: F) -> Vec<Move>
where
    F: Fn(&Move) -> bool,
{
    let preferred: Vec<Move> = moves.iter().filter(|&m| pred(m)).cloned().collect();
    if preferred.is_empty() {
        moves
    } else {
        preferred
    }
}

fn is_man_move(board: &Board, mov: &Move) -> bool {
    board
        .piece_at(mov.source())
        .map_or(false, |piece| !piece.is_king())
}

/// Whether the move crowns the man making it.
fn promotes(board: &Board, mov: &Move) -> bool {
    board.piece_at(mov.source()).map_or(false, |piece| {
        !piece.is_king() && mov.destination().row() == piece.color().promotion_row()
    })
}
