// Copyright 2021 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Legal move generation.
//!
//! Moves are generated per piece by walking the diagonals the piece may use. Captures are discovered by a recursive
//! scan: every jump lands on a square from which the scan continues, carrying the list of pieces captured along
//! that particular path. Each landing square becomes a destination in its own right, so a piece may stop partway
//! through a chain; the game session then forces it to keep jumping.
use crate::core::*;
use crate::moveset::{MoveSet, PieceMoves};
use crate::Board;

/// Generates the legal moves of the piece on `from`. If the piece has any capture available only its captures are
/// returned; otherwise its quiet moves are. An empty square has no moves.
pub fn generate_piece_moves(board: &Board, from: Square) -> PieceMoves {
    let mut moves = PieceMoves::new();
    let piece = match board.piece_at(from) {
        Some(&piece) => piece,
        None => return moves,
    };

    generate_captures(board, &piece, from, &[], &mut moves);
    if moves.is_empty() {
        generate_quiet_moves(board, &piece, &mut moves);
    }

    moves
}

/// Recursively discovers capture paths for `piece`, currently standing (hypothetically) on `at` after having jumped
/// the pieces in `path`.
///
/// A piece may not be jumped twice on one path, which bounds the recursion by the number of opposing pieces. Squares
/// vacated along the path, the piece's own starting square and the squares of already-jumped pieces, count as empty
/// landing squares, matching the board as it will be once the earlier jumps are applied.
fn generate_captures(
    board: &Board,
    piece: &Piece,
    at: Square,
    path: &[Square],
    moves: &mut PieceMoves,
) {
    for dir in piece.diagonals().iter() {
        let (victim, landing) = match (at.towards(dir), at.jump_towards(dir)) {
            (Some(victim), Some(landing)) => (victim, landing),
            _ => continue,
        };

        let is_enemy = board
            .piece_at(victim)
            .map_or(false, |other| other.color() != piece.color());
        if !is_enemy || path.contains(&victim) {
            continue;
        }

        let landing_open =
            board.is_empty(landing) || landing == piece.square() || path.contains(&landing);
        if !landing_open {
            continue;
        }

        // Each branch owns its own copy of the path.
        let mut next_path = path.to_vec();
        next_path.push(victim);
        moves.insert(landing, next_path.clone());
        generate_captures(board, piece, landing, &next_path, moves);
    }
}

fn generate_quiet_moves(board: &Board, piece: &Piece, moves: &mut PieceMoves) {
    for dir in piece.diagonals().iter() {
        if let Some(target) = piece.square().towards(dir) {
            if board.is_empty(target) {
                moves.insert(target, Vec::new());
            }
        }
    }
}

/// Generates every legal move for the given color, with the mandatory capture rule applied across all of its
/// pieces.
pub fn generate_moves(us: Color, board: &Board) -> MoveSet {
    let mut moves = MoveSet::new();
    for piece in board.pieces(us) {
        moves.insert_piece(piece.square(), generate_piece_moves(board, piece.square()));
    }

    moves.apply_mandatory_capture();
    moves
}

/// Returns true if any piece of the given color has a capture available.
pub fn has_capture(us: Color, board: &Board) -> bool {
    board
        .pieces(us)
        .any(|piece| generate_piece_moves(board, piece.square()).has_capture())
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::{generate_moves, generate_piece_moves, has_capture};
    use crate::core::*;
    use crate::Board;

    fn sq(row: i32, col: i32) -> Square {
        Square::new(row, col).unwrap()
    }

    fn assert_moves_generated(diagram: &'static str, us: Color, moves: &[Move]) {
        let board = Board::from_diagram(diagram).unwrap();
        let generated = generate_moves(us, &board).moves();
        let expected: HashSet<_> = moves.iter().collect();
        let actual: HashSet<_> = generated.iter().collect();
        if expected != actual {
            println!("{}", board);
            for mov in actual.difference(&expected) {
                println!("   unexpected > {}", mov);
            }
            for mov in expected.difference(&actual) {
                println!("   missing    > {}", mov);
            }
            panic!()
        }
    }

    fn assert_piece_moves(board: &Board, from: Square, moves: &[Move]) {
        let generated = generate_piece_moves(board, from).to_moves(from);
        let expected: HashSet<_> = moves.iter().collect();
        let actual: HashSet<_> = generated.iter().collect();
        if expected != actual {
            println!("{}", board);
            println!("moves: {:?}", generated);
            panic!()
        }
    }

    mod starting_position {
        use super::*;

        #[test]
        fn black_edge_man() {
            let board = Board::start();
            assert_piece_moves(&board, sq(5, 0), &[Move::quiet(sq(5, 0), sq(4, 1))]);
        }

        #[test]
        fn white_man() {
            let board = Board::start();
            assert_piece_moves(
                &board,
                sq(2, 1),
                &[
                    Move::quiet(sq(2, 1), sq(3, 0)),
                    Move::quiet(sq(2, 1), sq(3, 2)),
                ],
            );
        }

        #[test]
        fn blocked_men_have_no_moves() {
            let board = Board::start();
            assert!(generate_piece_moves(&board, sq(6, 1)).is_empty());
            assert!(generate_piece_moves(&board, sq(0, 1)).is_empty());
            assert!(generate_piece_moves(&board, sq(4, 4)).is_empty());
        }

        #[test]
        fn seven_moves_each() {
            let board = Board::start();
            assert_eq!(7, generate_moves(Color::Black, &board).len());
            assert_eq!(7, generate_moves(Color::White, &board).len());
            assert!(!has_capture(Color::Black, &board));
        }
    }

    mod men {
        use super::*;

        #[test]
        fn black_moves_north() {
            assert_moves_generated(
                "
                ........
                ........
                ........
                ........
                ...b....
                ........
                ........
                ........
                ",
                Color::Black,
                &[
                    Move::quiet(sq(4, 3), sq(3, 2)),
                    Move::quiet(sq(4, 3), sq(3, 4)),
                ],
            );
        }

        #[test]
        fn white_moves_south() {
            assert_moves_generated(
                "
                ........
                ........
                ........
                ..w.....
                ........
                ........
                ........
                ........
                ",
                Color::White,
                &[
                    Move::quiet(sq(3, 2), sq(4, 1)),
                    Move::quiet(sq(3, 2), sq(4, 3)),
                ],
            );
        }

        #[test]
        fn men_do_not_capture_backwards() {
            assert_moves_generated(
                "
                ........
                ........
                ........
                ..b.....
                ...w....
                ........
                ........
                ........
                ",
                Color::Black,
                &[
                    Move::quiet(sq(3, 2), sq(2, 1)),
                    Move::quiet(sq(3, 2), sq(2, 3)),
                ],
            );
        }

        #[test]
        fn single_capture() {
            let mut board = Board::new();
            board.add_piece(Piece::man(Color::Black, sq(4, 4))).unwrap();
            board.add_piece(Piece::man(Color::White, sq(3, 3))).unwrap();
            board.add_piece(Piece::man(Color::Black, sq(6, 0))).unwrap();
            assert_piece_moves(
                &board,
                sq(4, 4),
                &[Move::capture(sq(4, 4), sq(2, 2), vec![sq(3, 3)])],
            );

            let all = generate_moves(Color::Black, &board);
            assert!(all.for_piece(sq(6, 0)).is_none());
            assert_eq!(
                vec![Move::capture(sq(4, 4), sq(2, 2), vec![sq(3, 3)])],
                all.moves()
            );
        }

        #[test]
        fn capture_blocked_by_occupied_landing() {
            assert_moves_generated(
                "
                ........
                ........
                .w......
                ..w.....
                ...b....
                ........
                ........
                ........
                ",
                Color::Black,
                &[Move::quiet(sq(4, 3), sq(3, 4))],
            );
        }

        #[test]
        fn no_capture_off_board() {
            assert_moves_generated(
                "
                ........
                w.......
                .b......
                ........
                ........
                ........
                ........
                ........
                ",
                Color::Black,
                &[Move::quiet(sq(2, 1), sq(1, 2))],
            );
        }

        #[test]
        fn friendly_pieces_are_not_captured() {
            assert_moves_generated(
                "
                ........
                ........
                ........
                ........
                ...b....
                ....b...
                ........
                ........
                ",
                Color::Black,
                &[
                    Move::quiet(sq(4, 3), sq(3, 2)),
                    Move::quiet(sq(4, 3), sq(3, 4)),
                    Move::quiet(sq(5, 4), sq(4, 5)),
                ],
            );
        }

        #[test]
        fn double_jump_with_partial_stop() {
            assert_moves_generated(
                "
                ........
                ........
                ........
                ..w.....
                ........
                ..w.....
                ...b....
                ........
                ",
                Color::Black,
                &[
                    Move::capture(sq(6, 3), sq(4, 1), vec![sq(5, 2)]),
                    Move::capture(sq(6, 3), sq(2, 3), vec![sq(5, 2), sq(3, 2)]),
                ],
            );
        }

        #[test]
        fn branching_chain() {
            // After the first jump the man can continue either left or right.
            assert_moves_generated(
                "
                ........
                ........
                ........
                ..w.w...
                ........
                ....w...
                .....b..
                ........
                ",
                Color::Black,
                &[
                    Move::capture(sq(6, 5), sq(4, 3), vec![sq(5, 4)]),
                    Move::capture(sq(6, 5), sq(2, 1), vec![sq(5, 4), sq(3, 2)]),
                    Move::capture(sq(6, 5), sq(2, 5), vec![sq(5, 4), sq(3, 4)]),
                ],
            );
        }
    }

    mod kings {
        use super::*;

        #[test]
        fn king_moves_all_directions() {
            assert_moves_generated(
                "
                ........
                ........
                ........
                ........
                ...B....
                ........
                ........
                ........
                ",
                Color::Black,
                &[
                    Move::quiet(sq(4, 3), sq(3, 2)),
                    Move::quiet(sq(4, 3), sq(3, 4)),
                    Move::quiet(sq(4, 3), sq(5, 2)),
                    Move::quiet(sq(4, 3), sq(5, 4)),
                ],
            );
        }

        #[test]
        fn king_captures_backwards() {
            assert_moves_generated(
                "
                ........
                ........
                ........
                ....W...
                .....b..
                ........
                ........
                ........
                ",
                Color::White,
                &[Move::capture(sq(3, 4), sq(5, 6), vec![sq(4, 5)])],
            );
        }

        #[test]
        fn double_jump() {
            let mut board = Board::new();
            board.add_piece(Piece::king(Color::Black, sq(5, 5))).unwrap();
            board.add_piece(Piece::man(Color::White, sq(4, 4))).unwrap();
            board.add_piece(Piece::man(Color::White, sq(2, 2))).unwrap();
            assert_piece_moves(
                &board,
                sq(5, 5),
                &[
                    Move::capture(sq(5, 5), sq(3, 3), vec![sq(4, 4)]),
                    Move::capture(sq(5, 5), sq(1, 1), vec![sq(4, 4), sq(2, 2)]),
                ],
            );
        }

        #[test]
        fn longest_path_wins_on_collision() {
            // Four white men around the black king; paths circle the diamond in both directions and meet.
            let board = Board::from_diagram(
                "
                ........
                ........
                ........
                ..w.w...
                ........
                ..w.w...
                ...B....
                ........
                ",
            )
            .unwrap();
            let moves = generate_piece_moves(&board, sq(6, 3));
            assert_eq!(
                Some(&[sq(5, 4), sq(3, 4), sq(3, 2)][..]),
                moves.get(sq(4, 1))
            );
            assert_eq!(
                Some(&[sq(5, 2), sq(3, 2), sq(3, 4)][..]),
                moves.get(sq(4, 5))
            );
            assert_eq!(Some(&[sq(5, 2), sq(3, 2)][..]), moves.get(sq(2, 3)));
            assert_eq!(
                Some(&[sq(5, 2), sq(3, 2), sq(3, 4), sq(5, 4)][..]),
                moves.get(sq(6, 3))
            );
            assert_eq!(4, moves.len());
        }
    }

    mod mandatory_capture {
        use super::*;

        #[test]
        fn quiet_moves_dropped_everywhere() {
            let board = Board::from_diagram(
                "
                ........
                ........
                ........
                ........
                .....w..
                ....b...
                ........
                b.b.....
                ",
            )
            .unwrap();
            let moves = generate_moves(Color::Black, &board);
            assert!(has_capture(Color::Black, &board));
            assert!(moves.moves().iter().all(Move::is_capture));
            assert_eq!(
                vec![Move::capture(sq(5, 4), sq(3, 6), vec![sq(4, 5)])],
                moves.moves()
            );
        }

        #[test]
        fn every_capturing_piece_kept() {
            let board = Board::from_diagram(
                "
                ........
                ........
                ........
                ........
                .w...w..
                b...b...
                ........
                ........
                ",
            )
            .unwrap();
            let moves = generate_moves(Color::Black, &board);
            assert_eq!(2, moves.len());
            assert!(moves.contains(sq(5, 0), sq(3, 2)));
            assert!(moves.contains(sq(5, 4), sq(3, 6)));
        }

        #[test]
        fn no_moves_when_blocked() {
            let board = Board::from_diagram(
                "
                ........
                ........
                ........
                ........
                ........
                ..w.....
                .w......
                b.......
                ",
            )
            .unwrap();
            assert!(generate_moves(Color::Black, &board).is_empty());
        }
    }
}
