use crate::errors::ChessResult;
use crate::game_state::board_pool::{BoardHandle, BoardPool};
use crate::game_state::chess_types::BoardStatus;
use crate::move_generation::move_generator::valid_moves;
use crate::rules::attacks::is_king_in_check;

/// Classifies the position for the side to move.
///
/// Never returns `BoardStatus::Invalid`; that value only reports rejected moves.
pub fn board_status(pool: &BoardPool, handle: &BoardHandle) -> ChessResult<BoardStatus> {
    let in_check = is_king_in_check(pool, handle, pool.active_color(handle));
    let has_move = has_valid_move(pool, handle)?;

    Ok(match (in_check, has_move) {
        (false, true) => BoardStatus::Standard,
        (true, true) => BoardStatus::Check,
        (true, false) => BoardStatus::Checkmate,
        (false, false) => BoardStatus::Stalemate,
    })
}

/// Whether the side to move has at least one legal move.
pub fn has_valid_move(pool: &BoardPool, handle: &BoardHandle) -> ChessResult<bool> {
    Ok(valid_moves(pool, handle).next().transpose()?.is_some())
}

#[cfg(test)]
mod tests {
    use super::board_status;
    use crate::game_state::board_pool::BoardPool;
    use crate::game_state::chess_types::BoardStatus;
    use crate::utils::fen_parser::parse_fen;

    fn status_of(fen: &str) -> BoardStatus {
        let pool = BoardPool::new();
        let board = pool.acquire_scoped().expect("slot available");
        pool.load(&board, parse_fen(fen).expect("valid fen"));
        let status = board_status(&pool, &board).expect("pool has room");
        drop(board);
        assert_eq!(pool.in_use(), 0);
        status
    }

    #[test]
    fn opening_is_standard() {
        assert_eq!(
            status_of("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"),
            BoardStatus::Standard
        );
    }

    #[test]
    fn check_with_escape() {
        assert_eq!(status_of("4k3/8/8/8/8/8/8/4R1K1 b - - 0 1"), BoardStatus::Check);
    }

    #[test]
    fn back_rank_mate() {
        assert_eq!(status_of("R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1"), BoardStatus::Checkmate);
    }

    #[test]
    fn cornered_king_is_stalemated() {
        assert_eq!(status_of("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1"), BoardStatus::Stalemate);
    }
}
