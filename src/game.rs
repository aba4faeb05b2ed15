// Copyright 2021 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The turn state machine for a single game.
//!
//! A session moves between four states:
//!  1. `AwaitingSelection`, where the side to move has to pick one of its pieces,
//!  2. `PieceSelected`, where a piece has been picked and a destination is expected,
//!  3. `ChainCapturing`, where a multi-jump has been chosen and its individual jumps are being applied one at a time,
//!  4. `GameOver`, which is terminal.
//!
//! A multi-jump is committed one jump per call: `move_to` applies the first jump and `advance_chain` applies each
//! following one. A caller that doesn't care about the individual jumps can call `advance_chain` until
//! `chain_continues` is false, or use `play`, which does this itself.

use std::collections::VecDeque;

use serde::Serialize;
use thiserror::Error;

use crate::{
    board::BoardError,
    core::*,
    movegen,
    moveset::{MoveSet, PieceMoves},
    Board,
};

#[derive(Copy, Clone, Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("({0}, {1}) is not on the board")]
    OutOfBounds(i32, i32),
    #[error("there is no piece on {0}")]
    Empty(Square),
    #[error("the piece on {0} belongs to the opponent")]
    Opponent(Square),
    #[error("a capture is available elsewhere and the piece on {0} cannot capture")]
    MustCapture(Square),
    #[error("the piece on {0} must continue capturing")]
    MustContinue(Square),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("invalid selection: {0}")]
    InvalidSelection(SelectionError),
    #[error("invalid destination: ({row}, {col}) is not a legal move for the piece on {from}")]
    InvalidDestination { from: Square, row: i32, col: i32 },
    #[error("illegal command: {0}")]
    IllegalStateTransition(&'static str),
    #[error(transparent)]
    Board(#[from] BoardError),
}

/// The externally visible state of a session.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum State {
    AwaitingSelection,
    PieceSelected,
    ChainCapturing,
    GameOver,
}

/// The result of an accepted selection: the selected square and everything the piece on it may do.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Selection {
    pub square: Square,
    pub moves: Vec<Move>,
    /// Set when the piece is finishing a capture sequence and no other piece may be selected.
    pub forced: bool,
}

/// The result of an accepted move or chain step.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MoveResult {
    /// The step that was applied.
    pub step: Step,
    /// The piece removed by this step, if it was a jump.
    pub captured: Option<Piece>,
    /// More jumps of the chosen multi-jump remain to be applied with `advance_chain`.
    pub chain_continues: bool,
    /// The moving piece has landed on a square from which it can capture again. It stays selected and the turn
    /// does not pass.
    pub must_continue: bool,
    pub turn_ended: bool,
    /// The moving piece was crowned by this step.
    pub promoted: bool,
    pub game_over: bool,
    pub winner: Option<Color>,
}

#[derive(Clone, Debug)]
enum Phase {
    AwaitingSelection,
    PieceSelected {
        square: Square,
        moves: PieceMoves,
        forced: bool,
    },
    ChainCapturing {
        steps: VecDeque<Step>,
        captured_any: bool,
    },
    GameOver {
        winner: Color,
    },
}

/// A single game of checkers, from the first move to the last.
#[derive(Clone, Debug)]
pub struct GameSession {
    board: Board,
    turn: Color,
    phase: Phase,
}

impl GameSession {
    /// Starts a new game from the standard starting position.
    pub fn new(first_to_move: Color) -> GameSession {
        GameSession::with_board(Board::start(), first_to_move)
    }

    /// Starts a game from an arbitrary board. If the side to move already has no pieces or no moves, the session
    /// begins in the game over state.
    pub fn with_board(board: Board, turn: Color) -> GameSession {
        let mut session = GameSession {
            board,
            turn,
            phase: Phase::AwaitingSelection,
        };

        if let Some(winner) = session.check_termination() {
            session.phase = Phase::GameOver { winner };
        }

        session
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The color whose turn it is.
    pub fn turn(&self) -> Color {
        self.turn
    }

    pub fn state(&self) -> State {
        match self.phase {
            Phase::AwaitingSelection => State::AwaitingSelection,
            Phase::PieceSelected { .. } => State::PieceSelected,
            Phase::ChainCapturing { .. } => State::ChainCapturing,
            Phase::GameOver { .. } => State::GameOver,
        }
    }

    pub fn is_over(&self) -> bool {
        matches!(self.phase, Phase::GameOver { .. })
    }

    pub fn winner(&self) -> Option<Color> {
        match self.phase {
            Phase::GameOver { winner } => Some(winner),
            _ => None,
        }
    }

    /// The square of the currently selected piece.
    pub fn selected(&self) -> Option<Square> {
        match &self.phase {
            Phase::PieceSelected { square, .. } => Some(*square),
            Phase::ChainCapturing { steps, .. } => steps.front().map(|step| step.from),
            _ => None,
        }
    }

    /// Jumps of the current multi-jump that have not been applied yet.
    pub fn pending_steps(&self) -> Vec<Step> {
        match &self.phase {
            Phase::ChainCapturing { steps, .. } => steps.iter().copied().collect(),
            _ => Vec::new(),
        }
    }

    /// The moves available to the side to move. While a piece is obliged to continue capturing, only that piece's
    /// moves are returned; while a chain is being applied or after the game has ended, there are none.
    pub fn legal_moves(&self) -> MoveSet {
        match &self.phase {
            Phase::AwaitingSelection
            | Phase::PieceSelected {
                forced: false, ..
            } => movegen::generate_moves(self.turn, &self.board),
            Phase::PieceSelected {
                square,
                forced: true,
                ..
            } => movegen::generate_moves(self.turn, &self.board).restricted_to(*square),
            Phase::ChainCapturing { .. } | Phase::GameOver { .. } => MoveSet::new(),
        }
    }

    /// Selects the piece at the given coordinates.
    ///
    /// A piece is selectable if it belongs to the side to move and, when any capture is available to that side, it
    /// can capture. Selecting another of one's own pieces replaces the current selection, unless the current piece
    /// is in the middle of a capture sequence. A rejected selection leaves the session unchanged.
    pub fn select(&mut self, row: i32, col: i32) -> Result<Selection, GameError> {
        let forced_square = match &self.phase {
            Phase::GameOver { .. } => {
                return Err(self.reject(GameError::IllegalStateTransition("the game is over")))
            }
            Phase::ChainCapturing { .. } => {
                return Err(self.reject(GameError::IllegalStateTransition(
                    "a capture sequence is in progress",
                )))
            }
            Phase::PieceSelected {
                square,
                forced: true,
                ..
            } => Some(*square),
            _ => None,
        };

        let square = match Square::new(row, col) {
            Some(square) => square,
            None => {
                return Err(self.reject(GameError::InvalidSelection(
                    SelectionError::OutOfBounds(row, col),
                )))
            }
        };

        if let Some(forced) = forced_square {
            if forced != square {
                return Err(self.reject(GameError::InvalidSelection(
                    SelectionError::MustContinue(forced),
                )));
            }

            return Ok(self.selection());
        }

        let piece = match self.board.piece_at(square) {
            Some(piece) => *piece,
            None => {
                return Err(self.reject(GameError::InvalidSelection(SelectionError::Empty(square))))
            }
        };

        if piece.color() != self.turn {
            return Err(self.reject(GameError::InvalidSelection(SelectionError::Opponent(
                square,
            ))));
        }

        let all = movegen::generate_moves(self.turn, &self.board);
        let moves = all.for_piece(square).cloned().unwrap_or_default();
        if all.has_capture() && moves.is_empty() {
            return Err(self.reject(GameError::InvalidSelection(
                SelectionError::MustCapture(square),
            )));
        }

        tracing::debug!("{} selected {} with {} moves", self.turn, square, moves.len());
        self.phase = Phase::PieceSelected {
            square,
            moves,
            forced: false,
        };
        Ok(self.selection())
    }

    /// Drops the current selection. A piece that must continue capturing cannot be deselected.
    pub fn deselect(&mut self) -> Result<(), GameError> {
        match self.phase {
            Phase::PieceSelected { forced: false, .. } => {
                self.phase = Phase::AwaitingSelection;
                Ok(())
            }
            Phase::PieceSelected { forced: true, .. } => Err(self.reject(
                GameError::IllegalStateTransition("the selected piece must continue capturing"),
            )),
            _ => Err(self.reject(GameError::IllegalStateTransition("no piece is selected"))),
        }
    }

    /// Moves the selected piece to the given coordinates, which must be one of its legal destinations.
    ///
    /// A simple move or single jump is applied completely. For a multi-jump, only the first jump is applied and the
    /// session enters `ChainCapturing`; the rest are applied by `advance_chain`.
    pub fn move_to(&mut self, row: i32, col: i32) -> Result<MoveResult, GameError> {
        let (from, moves) = match &self.phase {
            Phase::PieceSelected { square, moves, .. } => (*square, moves),
            Phase::AwaitingSelection => {
                return Err(self.reject(GameError::IllegalStateTransition("no piece is selected")))
            }
            Phase::ChainCapturing { .. } => {
                return Err(self.reject(GameError::IllegalStateTransition(
                    "a capture sequence is in progress",
                )))
            }
            Phase::GameOver { .. } => {
                return Err(self.reject(GameError::IllegalStateTransition("the game is over")))
            }
        };

        let to = match Square::new(row, col) {
            Some(to) if moves.contains(to) => to,
            _ => return Err(self.reject(GameError::InvalidDestination { from, row, col })),
        };

        let captured = moves.get(to).unwrap_or_default();
        let mov = if captured.is_empty() {
            Move::quiet(from, to)
        } else {
            Move::capture(from, to, captured.to_vec())
        };

        tracing::debug!("{} plays {}", self.turn, mov);
        if mov.is_multi_jump() {
            tracing::debug!("{} jumps will be applied one at a time", mov.captured().len());
        }

        let previous = std::mem::replace(
            &mut self.phase,
            Phase::ChainCapturing {
                steps: mov.steps().into(),
                captured_any: mov.is_capture(),
            },
        );

        let recently_captured = self.board.take_captured();
        self.advance_chain().map_err(|err| {
            self.phase = previous;
            self.board.restore_captured(recently_captured);
            err
        })
    }

    /// Applies the next jump of the multi-jump in progress. When the last jump has been applied, the turn ends
    /// unless the piece is obliged to keep capturing.
    pub fn advance_chain(&mut self) -> Result<MoveResult, GameError> {
        let (step, remaining, captured_any) = match &self.phase {
            Phase::ChainCapturing {
                steps,
                captured_any,
            } => match steps.front() {
                Some(step) => (*step, steps.len() - 1, *captured_any),
                None => {
                    return Err(self.reject(GameError::IllegalStateTransition(
                        "no capture sequence is in progress",
                    )))
                }
            },
            _ => {
                return Err(self.reject(GameError::IllegalStateTransition(
                    "no capture sequence is in progress",
                )))
            }
        };

        self.board.apply_move(step.from, step.to)?;
        let captured = match step.captured {
            Some(victim) => self.board.remove_captured(&[victim]).pop(),
            None => None,
        };
        let promoted = self.board.promote(step.to);
        if promoted {
            tracing::info!("{} man promoted on {}", self.turn, step.to);
        }

        if let Phase::ChainCapturing { steps, .. } = &mut self.phase {
            steps.pop_front();
        }

        let mut result = MoveResult {
            step,
            captured,
            chain_continues: remaining > 0,
            must_continue: false,
            turn_ended: false,
            promoted,
            game_over: false,
            winner: None,
        };

        if remaining == 0 {
            self.finish_move(step.to, captured_any, &mut result);
        }

        Ok(result)
    }

    /// Convenience wrapper that selects the piece on `from`, moves it to `to` and applies the whole chain. On
    /// failure the session is left as it was.
    pub fn play(&mut self, from: Square, to: Square) -> Result<Vec<MoveResult>, GameError> {
        let previous = self.phase.clone();
        self.select(from.row() as i32, from.col() as i32)?;
        let first = match self.move_to(to.row() as i32, to.col() as i32) {
            Ok(result) => result,
            Err(err) => {
                self.phase = previous;
                return Err(err);
            }
        };

        let mut results = vec![first];
        while results.last().map_or(false, |r| r.chain_continues) {
            results.push(self.advance_chain()?);
        }

        Ok(results)
    }

    /// Runs the end-of-move logic once the piece on `landed` has completed its move: either the piece is obliged to
    /// continue capturing, or the turn passes and the game may end.
    fn finish_move(&mut self, landed: Square, captured_any: bool, result: &mut MoveResult) {
        if captured_any {
            let moves = movegen::generate_piece_moves(&self.board, landed);
            if moves.has_capture() {
                tracing::debug!("{} must continue capturing from {}", self.turn, landed);
                self.phase = Phase::PieceSelected {
                    square: landed,
                    moves,
                    forced: true,
                };
                result.must_continue = true;
                return;
            }
        }

        self.turn = self.turn.toggle();
        self.phase = Phase::AwaitingSelection;
        result.turn_ended = true;
        tracing::info!("turn passes to {}", self.turn);
        if let Some(winner) = self.check_termination() {
            tracing::info!("game over, {} wins", winner);
            self.phase = Phase::GameOver { winner };
            result.game_over = true;
            result.winner = Some(winner);
        }
    }

    /// Returns the winner if the side to move has lost, either by having no pieces or no legal moves.
    fn check_termination(&self) -> Option<Color> {
        if let Some(winner) = self.board.winner() {
            return Some(winner);
        }

        if movegen::generate_moves(self.turn, &self.board).is_empty() {
            return Some(self.turn.toggle());
        }

        None
    }

    fn selection(&self) -> Selection {
        match &self.phase {
            Phase::PieceSelected {
                square,
                moves,
                forced,
            } => Selection {
                square: *square,
                moves: moves.to_moves(*square),
                forced: *forced,
            },
            _ => unreachable!("selection requested without a selected piece"),
        }
    }

    fn reject(&self, err: GameError) -> GameError {
        tracing::warn!("rejected command in state {:?}: {}", self.state(), err);
        err
    }
}

impl Default for GameSession {
    fn default() -> Self {
        GameSession::new(Color::White)
    }
}
