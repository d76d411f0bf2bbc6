//! Full move legality.
//!
//! A move is legal when it passes the ownership check, the piece's own movement
//! rule, and leaves the mover's king unattacked once played on a scratch copy. The
//! scratch copy is the single legality gate; move generation and search reuse it
//! through `valid_board_handle` instead of re-deriving legality.

use crate::errors::ChessResult;
use crate::game_state::board_pool::{BoardHandle, BoardPool, ScopedBoard};
use crate::game_state::packed_board::PackedBoard;
use crate::geometry::square::Square;
use crate::rules::attacks::is_in_check;
use crate::rules::piece_rules::can_move;

/// Ownership and movement rules, without the self-check test.
pub fn passes_piece_rules(board: &PackedBoard, from: &Square, to: &Square) -> bool {
    let active = board.active_color();
    let Some(piece) = board.occupant(from) else {
        return false;
    };
    if piece.color != active {
        return false;
    }
    if board.occupant(to).is_some_and(|target| target.color == active) {
        return false;
    }
    can_move(board, from, to, piece)
}

/// Plays `from -> to` on a fresh board and hands it back if the move is legal.
///
/// The returned board is owned by the caller and goes back to the pool when it is
/// dropped. Pawns reaching the last row are promoted to a queen.
pub fn valid_board_handle<'p>(
    pool: &'p BoardPool,
    handle: &BoardHandle,
    from: &Square,
    to: &Square,
) -> ChessResult<Option<ScopedBoard<'p>>> {
    if !pool.read(handle, |board| passes_piece_rules(board, from, to)) {
        return Ok(None);
    }

    let successor = pool.acquire_scoped()?;
    pool.copy(handle, &successor);
    pool.commit_move(&successor, from, to, None);

    let mover = pool.active_color(handle);
    if pool.read(&successor, |board| is_in_check(board, mover)) {
        return Ok(None);
    }
    Ok(Some(successor))
}

/// Whether moving the active color's piece on `from` to `to` is legal.
pub fn validate_move(
    pool: &BoardPool,
    handle: &BoardHandle,
    from: &Square,
    to: &Square,
) -> ChessResult<bool> {
    Ok(valid_board_handle(pool, handle, from, to)?.is_some())
}

#[cfg(test)]
mod tests {
    use super::{valid_board_handle, validate_move};
    use crate::game_state::board_pool::BoardPool;
    use crate::game_state::chess_types::{Color, Piece, PieceKind};
    use crate::geometry::square::Square;
    use crate::utils::fen_parser::parse_fen;

    fn at(row: u8, column: u8) -> &'static Square {
        Square::at(row, column)
    }

    #[test]
    fn ownership_is_checked_first() {
        let pool = BoardPool::with_capacity(2);
        let board = pool.acquire_scoped().expect("slot available");
        pool.initialize(&board);

        // Dark piece while Light is to move.
        assert!(!validate_move(&pool, &board, at(6, 4), at(4, 4)).expect("pool has room"));
        // Empty origin.
        assert!(!validate_move(&pool, &board, at(3, 3), at(4, 3)).expect("pool has room"));
        // Own piece on the destination.
        assert!(!validate_move(&pool, &board, at(0, 0), at(1, 0)).expect("pool has room"));
        assert!(validate_move(&pool, &board, at(0, 6), at(2, 5)).expect("pool has room"));
    }

    #[test]
    fn pinned_pieces_cannot_expose_the_king() {
        let pool = BoardPool::with_capacity(2);
        let board = pool.acquire_scoped().expect("slot available");
        // Light bishop on e2 pinned by the rook on e8.
        pool.load(&board, parse_fen("4r1k1/8/8/8/8/8/4B3/4K3 w - - 0 1").expect("valid fen"));

        assert!(!validate_move(&pool, &board, at(1, 4), at(2, 3)).expect("pool has room"));
        assert!(validate_move(&pool, &board, at(0, 4), at(0, 3)).expect("pool has room"));
        assert_eq!(pool.available(), 1);
    }

    #[test]
    fn successor_reflects_the_move() {
        let pool = BoardPool::with_capacity(2);
        let board = pool.acquire_scoped().expect("slot available");
        pool.initialize(&board);

        let successor = valid_board_handle(&pool, &board, at(1, 4), at(3, 4))
            .expect("pool has room")
            .expect("e2e4 is legal");
        assert_eq!(pool.active_color(&successor), Color::Dark);
        assert_eq!(
            pool.occupant(&successor, at(3, 4)),
            Some(Piece::new(Color::Light, PieceKind::Pawn))
        );
        // The source board is untouched.
        assert_eq!(pool.active_color(&board), Color::Light);
        assert_eq!(pool.available(), 0);

        drop(successor);
        assert_eq!(pool.available(), 1);
    }

    #[test]
    fn rejected_moves_release_their_scratch_board() {
        let pool = BoardPool::with_capacity(2);
        let board = pool.acquire_scoped().expect("slot available");
        pool.load(&board, parse_fen("4r1k1/8/8/8/8/8/4B3/4K3 w - - 0 1").expect("valid fen"));

        assert!(valid_board_handle(&pool, &board, at(1, 4), at(2, 5))
            .expect("pool has room")
            .is_none());
        assert_eq!(pool.available(), 1);
    }
}
