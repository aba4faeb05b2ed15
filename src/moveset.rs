// Copyright 2021 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Aggregated legal-move maps, per piece and per color.

use std::collections::{btree_map::Entry, BTreeMap};

use crate::core::{Move, Square};

/// The legal destinations of a single piece, each mapped to the squares of the pieces captured on the way there.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PieceMoves {
    destinations: BTreeMap<Square, Vec<Square>>,
}

impl PieceMoves {
    pub fn new() -> PieceMoves {
        PieceMoves::default()
    }

    /// Records a destination. When two capture paths reach the same destination, the path capturing more pieces is
    /// kept; on a tie the path recorded first is kept.
    pub fn insert(&mut self, to: Square, captured: Vec<Square>) {
        match self.destinations.entry(to) {
            Entry::Vacant(entry) => {
                entry.insert(captured);
            }
            Entry::Occupied(mut entry) => {
                if captured.len() > entry.get().len() {
                    entry.insert(captured);
                }
            }
        }
    }

    /// Returns the captured squares for the given destination, or `None` if it is not a legal destination.
    pub fn get(&self, to: Square) -> Option<&[Square]> {
        self.destinations.get(&to).map(Vec::as_slice)
    }

    pub fn contains(&self, to: Square) -> bool {
        self.destinations.contains_key(&to)
    }

    pub fn has_capture(&self) -> bool {
        self.destinations.values().any(|captured| !captured.is_empty())
    }

    /// Drops every quiet destination.
    pub fn retain_captures(&mut self) {
        self.destinations.retain(|_, captured| !captured.is_empty());
    }

    pub fn iter(&self) -> impl Iterator<Item = (Square, &[Square])> + '_ {
        self.destinations
            .iter()
            .map(|(&to, captured)| (to, captured.as_slice()))
    }

    /// Materializes the moves of the piece standing on `from`.
    pub fn to_moves(&self, from: Square) -> Vec<Move> {
        self.iter()
            .map(|(to, captured)| build_move(from, to, captured))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.destinations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.destinations.is_empty()
    }
}

/// Every legal move of one color, keyed by the square of the moving piece. Pieces without legal moves have no
/// entry.
///
/// A MoveSet produced by `movegen::generate_moves` has the mandatory capture rule applied: if any piece can
/// capture, no entry in the set is a quiet move.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MoveSet {
    pieces: BTreeMap<Square, PieceMoves>,
}

impl MoveSet {
    pub fn new() -> MoveSet {
        MoveSet::default()
    }

    /// Adds the moves of the piece on `from`. Empty move maps are not recorded.
    pub fn insert_piece(&mut self, from: Square, moves: PieceMoves) {
        if !moves.is_empty() {
            self.pieces.insert(from, moves);
        }
    }

    pub fn for_piece(&self, from: Square) -> Option<&PieceMoves> {
        self.pieces.get(&from)
    }

    /// Looks up a single move by its endpoints.
    pub fn get(&self, from: Square, to: Square) -> Option<Move> {
        let captured = self.for_piece(from)?.get(to)?;
        Some(build_move(from, to, captured))
    }

    pub fn contains(&self, from: Square, to: Square) -> bool {
        self.for_piece(from).map_or(false, |moves| moves.contains(to))
    }

    pub fn has_capture(&self) -> bool {
        self.pieces.values().any(PieceMoves::has_capture)
    }

    /// Applies the mandatory capture rule: if any piece has a capture available, every quiet move is dropped, and
    /// with it every piece left without a move.
    pub fn apply_mandatory_capture(&mut self) {
        if !self.has_capture() {
            return;
        }

        for moves in self.pieces.values_mut() {
            moves.retain_captures();
        }

        self.pieces.retain(|_, moves| !moves.is_empty());
    }

    /// Returns a MoveSet containing only the moves of the piece on `from`.
    pub fn restricted_to(&self, from: Square) -> MoveSet {
        let mut restricted = MoveSet::new();
        if let Some(moves) = self.for_piece(from) {
            restricted.insert_piece(from, moves.clone());
        }

        restricted
    }

    /// Squares of the pieces that have at least one legal move.
    pub fn pieces(&self) -> impl Iterator<Item = Square> + '_ {
        self.pieces.keys().copied()
    }

    /// Flattens this set into a list of moves, ordered by source then destination square.
    pub fn moves(&self) -> Vec<Move> {
        self.pieces
            .iter()
            .flat_map(|(&from, moves)| moves.to_moves(from))
            .collect()
    }

    /// Total number of moves across all pieces.
    pub fn len(&self) -> usize {
        self.pieces.values().map(PieceMoves::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }
}

fn build_move(from: Square, to: Square, captured: &[Square]) -> Move {
    if captured.is_empty() {
        Move::quiet(from, to)
    } else {
        Move::capture(from, to, captured.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(row: i32, col: i32) -> Square {
        Square::new(row, col).unwrap()
    }

    #[test]
    fn longest_path_wins_collision() {
        let mut moves = PieceMoves::new();
        moves.insert(sq(4, 1), vec![sq(5, 2)]);
        moves.insert(sq(4, 1), vec![sq(5, 4), sq(3, 4), sq(3, 2)]);
        moves.insert(sq(4, 1), vec![sq(5, 0)]);
        assert_eq!(
            Some(&[sq(5, 4), sq(3, 4), sq(3, 2)][..]),
            moves.get(sq(4, 1))
        );
    }

    #[test]
    fn first_path_wins_tie() {
        let mut moves = PieceMoves::new();
        moves.insert(sq(2, 3), vec![sq(5, 2), sq(3, 2)]);
        moves.insert(sq(2, 3), vec![sq(5, 4), sq(3, 4)]);
        assert_eq!(Some(&[sq(5, 2), sq(3, 2)][..]), moves.get(sq(2, 3)));
    }

    #[test]
    fn mandatory_capture_filter() {
        let mut quiet = PieceMoves::new();
        quiet.insert(sq(4, 1), vec![]);
        let mut mixed = PieceMoves::new();
        mixed.insert(sq(4, 3), vec![]);
        mixed.insert(sq(3, 4), vec![sq(4, 5)]);

        let mut set = MoveSet::new();
        set.insert_piece(sq(5, 0), quiet);
        set.insert_piece(sq(5, 2), mixed);
        set.insert_piece(sq(5, 4), PieceMoves::new());
        assert_eq!(3, set.len());

        set.apply_mandatory_capture();
        assert_eq!(1, set.len());
        assert!(set.for_piece(sq(5, 0)).is_none());
        assert_eq!(
            vec![Move::capture(sq(5, 2), sq(3, 4), vec![sq(4, 5)])],
            set.moves()
        );
    }

    #[test]
    fn quiet_only_untouched() {
        let mut quiet = PieceMoves::new();
        quiet.insert(sq(4, 1), vec![]);
        let mut set = MoveSet::new();
        set.insert_piece(sq(5, 0), quiet);
        let before = set.clone();
        set.apply_mandatory_capture();
        assert_eq!(before, set);
        assert_eq!(Some(Move::quiet(sq(5, 0), sq(4, 1))), set.get(sq(5, 0), sq(4, 1)));
        assert!(!set.contains(sq(5, 0), sq(4, 3)));
    }

    #[test]
    fn restriction() {
        let mut a = PieceMoves::new();
        a.insert(sq(4, 1), vec![]);
        let mut b = PieceMoves::new();
        b.insert(sq(4, 3), vec![]);
        let mut set = MoveSet::new();
        set.insert_piece(sq(5, 0), a);
        set.insert_piece(sq(5, 2), b);
        let only = set.restricted_to(sq(5, 2));
        assert_eq!(vec![sq(5, 2)], only.pieces().collect::<Vec<_>>());
        assert!(set.restricted_to(sq(0, 0)).is_empty());
    }
}
