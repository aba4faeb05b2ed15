// Copyright 2017-2021 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::fmt;

use thiserror::Error;

use crate::core::{self, *};

/// Number of rows at each end of the board that are filled with men at the start of a game.
const STARTING_ROWS: u8 = 3;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("no piece at {0}")]
    NoPiece(Square),
    #[error("square {0} is already occupied")]
    Occupied(Square),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DiagramParseError {
    #[error("expected 8 rows, found {0}")]
    WrongRowCount(usize),
    #[error("row {row} has {len} cells, expected 8")]
    WrongRowLength { row: usize, len: usize },
    #[error(transparent)]
    Piece(#[from] PieceParseError),
}

/// The checkerboard: an 8x8 grid in which each cell is either empty or holds exactly one piece. The board owns every
/// piece on it; a piece's recorded square always names the cell that holds it.
///
/// Pieces removed by captures are kept in a "recently captured" list until `clear_captured` is called, so that a
/// presentation layer can still show them leaving the board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    cells: [Option<Piece>; BOARD_SIZE as usize * BOARD_SIZE as usize],
    captured: Vec<Piece>,
}

impl Board {
    /// Creates an empty board.
    pub fn new() -> Board {
        Board {
            cells: [None; BOARD_SIZE as usize * BOARD_SIZE as usize],
            captured: Vec::new(),
        }
    }

    /// Creates a board in the standard starting position: White's men on the dark squares of rows 0-2, Black's men
    /// on the dark squares of rows 5-7.
    pub fn start() -> Board {
        let mut board = Board::new();
        for sq in core::squares().filter(|sq| sq.is_dark()) {
            let color = if sq.row() < STARTING_ROWS {
                Color::White
            } else if sq.row() >= BOARD_SIZE - STARTING_ROWS {
                Color::Black
            } else {
                continue;
            };

            board.cells[sq.index()] = Some(Piece::man(color, sq));
        }

        board
    }

    /// Parses a board diagram: one line per row, top row first, one character per cell. `.` is an empty cell, `b`
    /// and `w` are black and white men, `B` and `W` are black and white kings. Whitespace within a line and blank
    /// lines are ignored.
    pub fn from_diagram(diagram: impl AsRef<str>) -> Result<Board, DiagramParseError> {
        let rows: Vec<Vec<char>> = diagram
            .as_ref()
            .lines()
            .map(|line| line.chars().filter(|c| !c.is_whitespace()).collect::<Vec<_>>())
            .filter(|row| !row.is_empty())
            .collect();

        if rows.len() != BOARD_SIZE as usize {
            return Err(DiagramParseError::WrongRowCount(rows.len()));
        }

        let mut board = Board::new();
        for (r, row) in rows.iter().enumerate() {
            if row.len() != BOARD_SIZE as usize {
                return Err(DiagramParseError::WrongRowLength {
                    row: r,
                    len: row.len(),
                });
            }

            for (c, &cell) in row.iter().enumerate() {
                let sq = Square::new(r as i32, c as i32)
                    .ok_or(DiagramParseError::WrongRowLength { row: r, len: row.len() })?;
                board.cells[sq.index()] = Piece::from_char(cell, sq)?;
            }
        }

        Ok(board)
    }

    /// Returns the piece at the given coordinates. Coordinates that fall off of the board are simply empty.
    pub fn get_checker(&self, row: i32, col: i32) -> Option<&Piece> {
        Square::new(row, col).and_then(|sq| self.piece_at(sq))
    }

    pub fn piece_at(&self, square: Square) -> Option<&Piece> {
        self.cells[square.index()].as_ref()
    }

    pub fn is_empty(&self, square: Square) -> bool {
        self.cells[square.index()].is_none()
    }

    /// Places a piece on the square it records as its own.
    pub fn add_piece(&mut self, piece: Piece) -> Result<(), BoardError> {
        let cell = &mut self.cells[piece.square().index()];
        if cell.is_some() {
            return Err(BoardError::Occupied(piece.square()));
        }

        *cell = Some(piece);
        Ok(())
    }

    /// Relocates the piece on `from` to `to`. This neither removes captured pieces nor promotes the piece; both are
    /// separate operations. Moving a piece onto its own square is permitted and leaves the board unchanged.
    pub fn apply_move(&mut self, from: Square, to: Square) -> Result<&Piece, BoardError> {
        if from != to && !self.is_empty(to) {
            return Err(BoardError::Occupied(to));
        }

        let mut piece = self.cells[from.index()]
            .take()
            .ok_or(BoardError::NoPiece(from))?;
        piece.move_to(to);
        let placed: &Piece = self.cells[to.index()].insert(piece);
        Ok(placed)
    }

    /// Removes the pieces on the given squares from the board, returning them. Empty squares are skipped. Removed
    /// pieces are also appended to the recently captured list.
    pub fn remove_captured(&mut self, squares: &[Square]) -> Vec<Piece> {
        let removed: Vec<Piece> = squares
            .iter()
            .filter_map(|sq| self.cells[sq.index()].take())
            .collect();
        self.captured.extend_from_slice(&removed);
        removed
    }

    /// Crowns the piece on `square` if it is a man standing on its promotion row. Returns true if a promotion
    /// happened; kings and men elsewhere are left untouched.
    pub fn promote(&mut self, square: Square) -> bool {
        match self.cells[square.index()].as_mut() {
            Some(piece) if piece.should_promote() => piece.crown(),
            _ => false,
        }
    }

    /// Pieces removed since the last call to `clear_captured`, in removal order.
    pub fn captured(&self) -> &[Piece] {
        &self.captured
    }

    pub fn clear_captured(&mut self) {
        self.captured.clear();
    }

    /// Empties the recently captured list, returning what it held.
    pub(crate) fn take_captured(&mut self) -> Vec<Piece> {
        std::mem::take(&mut self.captured)
    }

    /// Replaces the recently captured list.
    pub(crate) fn restore_captured(&mut self, captured: Vec<Piece>) {
        self.captured = captured;
    }

    /// Iterates over every piece of the given color, in row-major order.
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = &Piece> + '_ {
        self.cells
            .iter()
            .filter_map(Option::as_ref)
            .filter(move |piece| piece.color() == color)
    }

    pub fn count(&self, color: Color) -> usize {
        self.pieces(color).count()
    }

    /// Returns the winner by material: if one color has no pieces left, the other color wins.
    pub fn winner(&self) -> Option<Color> {
        if self.count(Color::White) == 0 {
            return Some(Color::Black);
        }

        if self.count(Color::Black) == 0 {
            return Some(Color::White);
        }

        None
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "  ")?;
        for col in 0..BOARD_SIZE {
            write!(f, " {} ", col)?;
        }

        writeln!(f)?;
        for row in 0..BOARD_SIZE {
            write!(f, "{} ", row)?;
            for col in 0..BOARD_SIZE {
                match self.get_checker(row as i32, col as i32) {
                    Some(piece) => write!(f, " {} ", piece)?,
                    None => write!(f, " . ")?,
                }
            }

            writeln!(f)?;
        }

        Ok(())
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}
