//! Per-piece movement rules with occupancy, ignoring self-check.
//!
//! Two flavours exist. `can_move` answers "may this piece move there", including
//! quiet pawn pushes, en passant and castling. `can_attack` answers "does this piece
//! threaten that square", which is what check detection and castling-path safety
//! need: pawns threaten their forward diagonals whatever stands there, and a king
//! only threatens adjacent squares.

use crate::game_state::chess_rules::KING_START_COLUMN;
use crate::game_state::chess_types::{CastlingSide, Color, Piece, PieceKind};
use crate::game_state::packed_board::PackedBoard;
use crate::geometry::square::Square;
use crate::rules::attacks::is_attacked;

/// Whether `piece`, standing on `from`, may move to `to`.
pub fn can_move(board: &PackedBoard, from: &Square, to: &Square, piece: Piece) -> bool {
    match piece.kind {
        PieceKind::Pawn => pawn_can_move(board, from, to, piece.color),
        PieceKind::King => {
            is_adjacent(from, to) || king_can_castle(board, from, to, piece.color)
        }
        _ => can_attack(board, from, to, piece),
    }
}

/// Whether `piece`, standing on `from`, threatens `to`.
pub fn can_attack(board: &PackedBoard, from: &Square, to: &Square, piece: Piece) -> bool {
    let (row_delta, column_delta) = deltas(from, to);

    match piece.kind {
        PieceKind::Pawn => row_delta == piece.color.forward() && column_delta.abs() == 1,
        PieceKind::Knight => {
            matches!((row_delta.abs(), column_delta.abs()), (1, 2) | (2, 1))
        }
        PieceKind::Bishop => is_diagonal(from, to) && path_is_clear(board, from, to),
        PieceKind::Rook => is_orthogonal(from, to) && path_is_clear(board, from, to),
        PieceKind::Queen => {
            (is_diagonal(from, to) || is_orthogonal(from, to)) && path_is_clear(board, from, to)
        }
        PieceKind::King => is_adjacent(from, to),
    }
}

fn pawn_can_move(board: &PackedBoard, from: &Square, to: &Square, color: Color) -> bool {
    let (row_delta, column_delta) = deltas(from, to);
    let forward = color.forward();
    let target_occupied = board.occupant(to).is_some();

    let single_step = column_delta == 0 && row_delta == forward && !target_occupied;
    let double_step = || {
        from.row() == color.pawn_row()
            && column_delta == 0
            && row_delta == 2 * forward
            && !target_occupied
            && from
                .offset(forward, 0)
                .is_some_and(|crossed| board.occupant(crossed).is_none())
    };
    let capture = column_delta.abs() == 1 && row_delta == forward && target_occupied;
    let en_passant = || {
        column_delta.abs() == 1
            && row_delta == forward
            && !target_occupied
            && to.row() == color.en_passant_capture_row()
            && board.en_passant_column() == Some(to.column())
    };

    single_step || capture || double_step() || en_passant()
}

/// Two-column king move from the starting square. The right must still be held,
/// the rook must be on its corner, every square between king and rook must be
/// empty, and neither the king's square nor the crossed square may be attacked.
/// Landing on an attacked square is caught by the self-check simulation.
fn king_can_castle(board: &PackedBoard, from: &Square, to: &Square, color: Color) -> bool {
    let (row_delta, column_delta) = deltas(from, to);
    if row_delta != 0
        || column_delta.abs() != 2
        || from.row() != color.home_row()
        || from.column() != KING_START_COLUMN
    {
        return false;
    }

    let side = CastlingSide::from_column_delta(column_delta);
    if !board.can_castle(color, side) {
        return false;
    }

    let row = from.row();
    let rook_column = side.rook_column();
    if board.occupant(Square::at(row, rook_column)) != Some(Piece::new(color, PieceKind::Rook)) {
        return false;
    }

    let (low, high) = if rook_column < from.column() {
        (rook_column + 1, from.column())
    } else {
        (from.column() + 1, rook_column)
    };
    if (low..high).any(|column| board.occupant(Square::at(row, column)).is_some()) {
        return false;
    }

    let crossed = Square::at(row, (from.column() as i8 + column_delta.signum()) as u8);
    let attacker = color.opposite();
    !is_attacked(board, from, attacker) && !is_attacked(board, crossed, attacker)
}

#[inline]
fn deltas(from: &Square, to: &Square) -> (i8, i8) {
    (
        to.row() as i8 - from.row() as i8,
        to.column() as i8 - from.column() as i8,
    )
}

#[inline]
fn is_adjacent(from: &Square, to: &Square) -> bool {
    let (row_delta, column_delta) = deltas(from, to);
    row_delta.abs() <= 1 && column_delta.abs() <= 1 && (row_delta, column_delta) != (0, 0)
}

#[inline]
fn is_diagonal(from: &Square, to: &Square) -> bool {
    let (row_delta, column_delta) = deltas(from, to);
    row_delta != 0 && row_delta.abs() == column_delta.abs()
}

#[inline]
fn is_orthogonal(from: &Square, to: &Square) -> bool {
    let (row_delta, column_delta) = deltas(from, to);
    (row_delta == 0) != (column_delta == 0)
}

/// Every square strictly between two aligned squares is empty.
fn path_is_clear(board: &PackedBoard, from: &Square, to: &Square) -> bool {
    let (row_delta, column_delta) = deltas(from, to);
    let row_step = row_delta.signum();
    let column_step = column_delta.signum();

    let mut current = from;
    loop {
        current = match current.offset(row_step, column_step) {
            Some(next) => next,
            None => return false,
        };
        if current == to {
            return true;
        }
        if board.occupant(current).is_some() {
            return false;
        }
    }
}
