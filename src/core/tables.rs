// Copyright 2017-2021 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Precomputed diagonal neighbor tables, so that move generation never has to bounds-check coordinates by hand.

use crate::core::*;

const NUM_SQUARES: usize = BOARD_SIZE as usize * BOARD_SIZE as usize;

struct DiagonalTable {
    table: [[Option<Square>; 4]; NUM_SQUARES],
}

impl DiagonalTable {
    /// Builds a table of squares `distance` diagonal steps away from every square, in every direction.
    fn new(distance: i32) -> DiagonalTable {
        let mut dt = DiagonalTable {
            table: [[None; 4]; NUM_SQUARES],
        };

        for sq in squares() {
            for dir in directions() {
                let (dr, dc) = dir.as_vector();
                dt.table[sq.index()][dir as usize] = Square::new(
                    sq.row() as i32 + dr * distance,
                    sq.col() as i32 + dc * distance,
                );
            }
        }

        dt
    }

    fn lookup(&self, sq: Square, dir: Direction) -> Option<Square> {
        self.table[sq.index()][dir as usize]
    }
}

lazy_static::lazy_static! {
    static ref NEIGHBOR_TABLE: DiagonalTable = DiagonalTable::new(1);
    static ref JUMP_TABLE: DiagonalTable = DiagonalTable::new(2);
}

pub fn neighbor(sq: Square, dir: Direction) -> Option<Square> {
    NEIGHBOR_TABLE.lookup(sq, dir)
}

pub fn jump_landing(sq: Square, dir: Direction) -> Option<Square> {
    JUMP_TABLE.lookup(sq, dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(row: i32, col: i32) -> Square {
        Square::new(row, col).unwrap()
    }

    #[test]
    fn corner_neighbors() {
        assert_eq!(Some(sq(1, 1)), neighbor(sq(0, 0), Direction::SouthEast));
        assert_eq!(None, neighbor(sq(0, 0), Direction::NorthWest));
        assert_eq!(None, neighbor(sq(0, 0), Direction::NorthEast));
        assert_eq!(None, neighbor(sq(0, 0), Direction::SouthWest));
    }

    #[test]
    fn jumps() {
        assert_eq!(Some(sq(2, 2)), jump_landing(sq(4, 4), Direction::NorthWest));
        assert_eq!(Some(sq(6, 6)), jump_landing(sq(4, 4), Direction::SouthEast));
        assert_eq!(None, jump_landing(sq(1, 4), Direction::NorthEast));
        assert_eq!(None, jump_landing(sq(6, 6), Direction::SouthEast));
    }

    #[test]
    fn square_helpers_use_tables() {
        assert_eq!(Some(sq(3, 4)), sq(4, 3).towards(Direction::NorthEast));
        assert_eq!(Some(sq(2, 5)), sq(4, 3).jump_towards(Direction::NorthEast));
    }
}
