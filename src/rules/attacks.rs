//! Attack and check detection.

use crate::game_state::board_pool::{BoardHandle, BoardPool};
use crate::game_state::chess_types::Color;
use crate::game_state::packed_board::PackedBoard;
use crate::geometry::reachability::reachable_squares;
use crate::geometry::square::Square;
use crate::rules::piece_rules::can_attack;

/// Whether any `attacker` piece threatens `target`.
///
/// Only squares some piece type could reach `target` from are inspected, and only
/// attacks count: a pawn's forward push or a king's castling move never threatens.
pub fn is_attacked(board: &PackedBoard, target: &Square, attacker: Color) -> bool {
    reachable_squares(target).iter().any(|origin| {
        board
            .occupant(origin)
            .is_some_and(|piece| piece.color == attacker && can_attack(board, origin, target, piece))
    })
}

/// Whether `color`'s king is attacked.
#[inline]
pub fn is_in_check(board: &PackedBoard, color: Color) -> bool {
    is_attacked(board, board.king_square(color), color.opposite())
}

pub fn is_square_attacked(
    pool: &BoardPool,
    handle: &BoardHandle,
    target: &Square,
    attacker: Color,
) -> bool {
    pool.read(handle, |board| is_attacked(board, target, attacker))
}

pub fn is_king_in_check(pool: &BoardPool, handle: &BoardHandle, color: Color) -> bool {
    pool.read(handle, |board| is_in_check(board, color))
}
