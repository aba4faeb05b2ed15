// Copyright 2017-2021 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The `checkers` engine and library.
//!
//! `checkers` plays two-player English draughts on an 8x8 board: men move and capture diagonally forward, kings in
//! all four directions, captures are mandatory and chain into multi-jumps, and a man reaching the far row is crowned.
//! As a library, it generates legal moves, runs the turn state machine of a game and picks moves for computer
//! players at three difficulty levels. As an executable, it plays a match over a simple line-oriented command loop.

pub mod ai;
pub mod board;
pub mod config;
pub mod core;
pub mod driver;
pub mod game;
pub mod movegen;
pub mod moveset;
pub mod play;

pub use crate::ai::{Difficulty, Strategist};
pub use crate::board::Board;
pub use crate::core::{Color, Move, Piece, Square, Step};
pub use crate::config::{MatchConfig, PlayMode};
pub use crate::game::{GameError, GameSession, MoveResult, Selection, State};
pub use crate::moveset::{MoveSet, PieceMoves};
pub use crate::play::Match;
