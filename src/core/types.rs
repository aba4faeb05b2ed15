// Copyright 2017-2021 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::{convert::TryFrom, fmt, str::FromStr};

use bitflags::bitflags;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of rows (and columns) on the board.
pub const BOARD_SIZE: u8 = 8;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SquareParseError {
    #[error("square out of range: ({0}, {1})")]
    OutOfRange(i32, i32),
    #[error("invalid coordinate: {0}")]
    InvalidCoordinate(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ColorParseError {
    #[error("unknown color: {0}")]
    Unknown(String),
}

/// A square on the checkerboard, addressed by row and column. Row 0 is the top of the board, where White's men
/// start; Black starts at the bottom and moves towards row 0.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Square {
    row: u8,
    col: u8,
}

impl Square {
    /// Creates a square from a row and column, returning `None` if the coordinates fall off of the board.
    pub const fn new(row: i32, col: i32) -> Option<Square> {
        if row < 0 || col < 0 || row >= BOARD_SIZE as i32 || col >= BOARD_SIZE as i32 {
            return None;
        }

        Some(Square {
            row: row as u8,
            col: col as u8,
        })
    }

    pub(in crate::core) const fn from_index(index: usize) -> Square {
        Square {
            row: (index / BOARD_SIZE as usize) as u8,
            col: (index % BOARD_SIZE as usize) as u8,
        }
    }

    pub const fn row(self) -> u8 {
        self.row
    }

    pub const fn col(self) -> u8 {
        self.col
    }

    pub const fn index(self) -> usize {
        self.row as usize * BOARD_SIZE as usize + self.col as usize
    }

    /// Dark squares are the only squares that pieces may occupy.
    pub const fn is_dark(self) -> bool {
        (self.row + self.col) % 2 == 1
    }

    /// Returns the diagonal neighbor of this square in the given direction, if it is on the board.
    pub fn towards(self, dir: Direction) -> Option<Square> {
        crate::core::neighbor(self, dir)
    }

    /// Returns the square two diagonal steps away in the given direction: the landing square of a jump over the
    /// neighbor in that direction.
    pub fn jump_towards(self, dir: Direction) -> Option<Square> {
        crate::core::jump_landing(self, dir)
    }

    /// Returns the diagonal direction leading from this square to `other`, if the two lie on a common diagonal.
    pub fn direction_to(self, other: Square) -> Option<Direction> {
        let dr = other.row as i32 - self.row as i32;
        let dc = other.col as i32 - self.col as i32;
        if dr == 0 || dr.abs() != dc.abs() {
            return None;
        }

        Direction::from_signs(dr.signum(), dc.signum())
    }
}

impl TryFrom<(i32, i32)> for Square {
    type Error = SquareParseError;

    fn try_from((row, col): (i32, i32)) -> Result<Self, Self::Error> {
        Square::new(row, col).ok_or(SquareParseError::OutOfRange(row, col))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    #[display(fmt = "white")]
    White,
    #[display(fmt = "black")]
    Black,
}

impl Color {
    pub fn toggle(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// The row on which a man of this color is promoted to a king.
    pub const fn promotion_row(self) -> u8 {
        match self {
            Color::White => BOARD_SIZE - 1,
            Color::Black => 0,
        }
    }

    /// The diagonals a man of this color may move along.
    pub const fn forward(self) -> Diagonals {
        match self {
            Color::White => Diagonals::SOUTH,
            Color::Black => Diagonals::NORTH,
        }
    }

    /// Returns true if moving from `from` to `to` brings a man of this color closer to its promotion row.
    pub fn is_forward(self, from: Square, to: Square) -> bool {
        match self {
            Color::White => to.row() > from.row(),
            Color::Black => to.row() < from.row(),
        }
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "white" | "w" => Ok(Color::White),
            "black" | "b" => Ok(Color::Black),
            other => Err(ColorParseError::Unknown(other.to_owned())),
        }
    }
}

/// The four diagonal directions. North is towards row 0.
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    NorthWest,
    NorthEast,
    SouthWest,
    SouthEast,
}

impl Direction {
    /// Returns the (row, column) offset of a single step in this direction.
    pub const fn as_vector(self) -> (i32, i32) {
        match self {
            Direction::NorthWest => (-1, -1),
            Direction::NorthEast => (-1, 1),
            Direction::SouthWest => (1, -1),
            Direction::SouthEast => (1, 1),
        }
    }

    pub const fn flag(self) -> Diagonals {
        match self {
            Direction::NorthWest => Diagonals::NORTH_WEST,
            Direction::NorthEast => Diagonals::NORTH_EAST,
            Direction::SouthWest => Diagonals::SOUTH_WEST,
            Direction::SouthEast => Diagonals::SOUTH_EAST,
        }
    }

    const fn from_signs(dr: i32, dc: i32) -> Option<Direction> {
        match (dr, dc) {
            (-1, -1) => Some(Direction::NorthWest),
            (-1, 1) => Some(Direction::NorthEast),
            (1, -1) => Some(Direction::SouthWest),
            (1, 1) => Some(Direction::SouthEast),
            _ => None,
        }
    }
}

bitflags! {
    /// A set of diagonal directions.
    pub struct Diagonals: u8 {
        const NONE = 0;
        const NORTH_WEST = 0b0000_0001;
        const NORTH_EAST = 0b0000_0010;
        const NORTH = Self::NORTH_WEST.bits | Self::NORTH_EAST.bits;
        const SOUTH_WEST = 0b0000_0100;
        const SOUTH_EAST = 0b0000_1000;
        const SOUTH = Self::SOUTH_WEST.bits | Self::SOUTH_EAST.bits;
        const ALL = Self::NORTH.bits | Self::SOUTH.bits;
    }
}

impl Diagonals {
    /// Iterates over the directions contained in this set, in a fixed order.
    pub fn iter(self) -> impl Iterator<Item = Direction> {
        directions().filter(move |dir| self.contains(dir.flag()))
    }
}

pub fn directions() -> ::std::array::IntoIter<Direction, 4> {
    [
        Direction::NorthWest,
        Direction::NorthEast,
        Direction::SouthWest,
        Direction::SouthEast,
    ]
    .into_iter()
}

pub fn colors() -> ::std::array::IntoIter<Color, 2> {
    [Color::White, Color::Black].into_iter()
}

pub struct AllSquares(usize);

impl Iterator for AllSquares {
    type Item = Square;

    fn next(&mut self) -> Option<Self::Item> {
        let limit = BOARD_SIZE as usize * BOARD_SIZE as usize;
        if self.0 >= limit {
            None
        } else {
            let next = self.0;
            self.0 += 1;
            Some(Square::from_index(next))
        }
    }
}

pub fn squares() -> AllSquares {
    AllSquares(0)
}
