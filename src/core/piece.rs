// Copyright 2017-2021 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::core::{Color, Diagonals, Square};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PieceParseError {
    #[error("invalid char: {0}")]
    InvalidChar(char),
}

/// A single checker. A piece keeps its identity for the whole game: moving it updates its square and promoting it
/// sets its king flag, but it is never re-created. Pieces are owned by the board.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Piece {
    color: Color,
    square: Square,
    king: bool,
}

impl Piece {
    pub fn man(color: Color, square: Square) -> Piece {
        Piece {
            color,
            square,
            king: false,
        }
    }

    pub fn king(color: Color, square: Square) -> Piece {
        Piece {
            color,
            square,
            king: true,
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn square(&self) -> Square {
        self.square
    }

    pub fn row(&self) -> u8 {
        self.square.row()
    }

    pub fn col(&self) -> u8 {
        self.square.col()
    }

    pub fn is_king(&self) -> bool {
        self.king
    }

    /// The diagonals this piece may move and capture along: forward only for a man, all four for a king.
    pub fn diagonals(&self) -> Diagonals {
        if self.king {
            Diagonals::ALL
        } else {
            self.color.forward()
        }
    }

    /// Returns true if this piece is a man standing on its promotion row.
    pub fn should_promote(&self) -> bool {
        !self.king && self.square.row() == self.color.promotion_row()
    }

    pub(crate) fn move_to(&mut self, square: Square) {
        self.square = square;
    }

    /// Promotes this piece to a king. Returns true if the piece was not already a king.
    pub(crate) fn crown(&mut self) -> bool {
        let promoted = !self.king;
        self.king = true;
        promoted
    }

    /// Parses a board diagram character into a piece standing on `square`.
    pub(crate) fn from_char(value: char, square: Square) -> Result<Option<Piece>, PieceParseError> {
        let piece = match value {
            '.' => return Ok(None),
            'b' => Piece::man(Color::Black, square),
            'B' => Piece::king(Color::Black, square),
            'w' => Piece::man(Color::White, square),
            'W' => Piece::king(Color::White, square),
            c => return Err(PieceParseError::InvalidChar(c)),
        };

        Ok(Some(piece))
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match (self.color, self.king) {
            (Color::Black, false) => 'b',
            (Color::Black, true) => 'B',
            (Color::White, false) => 'w',
            (Color::White, true) => 'W',
        };

        write!(f, "{}", c)
    }
}
