// Copyright 2021 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Module `core` contains core datatypes and data structures used pervasively throughout `checkers`.

mod r#move;
mod piece;
mod tables;
mod types;

pub use piece::{Piece, PieceParseError};
pub use r#move::{Move, Step};
pub use types::{
    colors, directions, squares, AllSquares, Color, ColorParseError, Diagonals, Direction, Square,
    SquareParseError, BOARD_SIZE,
};

pub(crate) use tables::{jump_landing, neighbor};
