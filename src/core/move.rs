// Copyright 2017-2021 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::fmt;

use serde::Serialize;

use crate::core::Square;

/// A move, recognized by the checkers engine: a directed edge from the square of the moving piece to its final
/// landing square, along with the squares of every piece captured on the way there.
///
/// ## Captures
/// The captured squares are kept in path order, so the first entry is the piece jumped first. A quiet move has no
/// captures, a single jump has one, and a resolved multi-jump has one per jump.
///
/// Captured squares are lookup handles into the board the move was generated from. They are only meaningful until
/// the board is next mutated and should never be kept across turns.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Move {
    from: Square,
    to: Square,
    captured: Vec<Square>,
}

/// A single jump within a multi-jump, or the only step of a simple move.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Step {
    pub from: Square,
    pub to: Square,
    pub captured: Option<Square>,
}

impl Move {
    /// Constructs a new quiet move from the source square to the destination square.
    pub fn quiet(from: Square, to: Square) -> Move {
        Move {
            from,
            to,
            captured: Vec::new(),
        }
    }

    /// Constructs a new capture move from the source square to the destination square, jumping the pieces on
    /// `captured` in order.
    pub fn capture(from: Square, to: Square, captured: Vec<Square>) -> Move {
        debug_assert!(!captured.is_empty());
        Move { from, to, captured }
    }

    /// Returns the source square of this move.
    pub fn source(&self) -> Square {
        self.from
    }

    /// Returns the destination square of this move.
    pub fn destination(&self) -> Square {
        self.to
    }

    /// Returns the squares of the pieces captured by this move, in the order they are jumped.
    pub fn captured(&self) -> &[Square] {
        &self.captured
    }

    /// Returns whether or not this move is a quiet move.
    pub fn is_quiet(&self) -> bool {
        self.captured.is_empty()
    }

    /// Returns whether or not this move is a capture move.
    pub fn is_capture(&self) -> bool {
        !self.captured.is_empty()
    }

    /// Returns whether or not this move jumps more than one piece.
    pub fn is_multi_jump(&self) -> bool {
        self.captured.len() > 1
    }

    /// Splits this move into the single steps that make it up.
    ///
    /// Each jump lands on the square diagonally beyond the piece it captures, continuing along the line from the
    /// current square through the captured square. A quiet move is a single step without a capture. The last step
    /// always lands on this move's destination.
    pub fn steps(&self) -> Vec<Step> {
        if self.captured.is_empty() {
            return vec![Step {
                from: self.from,
                to: self.to,
                captured: None,
            }];
        }

        let mut steps = Vec::with_capacity(self.captured.len());
        let mut current = self.from;
        for &victim in &self.captured {
            let landing = current
                .direction_to(victim)
                .and_then(|dir| victim.towards(dir))
                .unwrap_or(self.to);
            steps.push(Step {
                from: current,
                to: landing,
                captured: Some(victim),
            });
            current = landing;
        }

        debug_assert_eq!(current, self.to, "capture path does not end on destination");
        steps
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)?;
        if !self.captured.is_empty() {
            write!(f, " x")?;
            for victim in &self.captured {
                write!(f, " {}", victim)?;
            }
        }

        Ok(())
    }
}
