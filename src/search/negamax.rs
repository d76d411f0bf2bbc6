use crate::errors::ChessResult;
use crate::game_state::board_pool::{BoardHandle, BoardPool};
use crate::game_state::chess_types::BoardStatus;
use crate::move_generation::move_generator::valid_board_handles;
use crate::rules::board_status::board_status;
use crate::search::board_scoring::BoardScorer;

/// Score of the side to move when it is checkmated.
pub const CHECKMATE_SCORE: i32 = -10_000;
pub const STALEMATE_SCORE: i32 = 0;

/// Bound meaning "nothing found yet". Negating it never overflows.
pub const UNBOUNDED: i32 = -i32::MAX;

/// Fail-soft negamax with pruning.
///
/// `own_best` is the best score the side to move is already guaranteed elsewhere in
/// the tree and `opponent_best` the same for the opponent. A line is abandoned as
/// soon as the opponent would never allow it, i.e. once its negation drops to
/// `opponent_best` or below. Terminal positions are scored before the depth check.
pub fn negamax<S: BoardScorer + ?Sized>(
    pool: &BoardPool,
    handle: &BoardHandle,
    depth: u8,
    own_best: i32,
    opponent_best: i32,
    scorer: &S,
) -> ChessResult<i32> {
    let status = board_status(pool, handle)?;
    match status {
        BoardStatus::Checkmate => return Ok(CHECKMATE_SCORE),
        BoardStatus::Stalemate => return Ok(STALEMATE_SCORE),
        BoardStatus::Standard | BoardStatus::Check => {}
        BoardStatus::Invalid => unreachable!("position classification never yields Invalid"),
    }

    if depth == 0 {
        return Ok(pool.read(handle, |board| scorer.score(board, status)));
    }

    let mut best = own_best;
    for successor in valid_board_handles(pool, handle) {
        let successor = successor?;
        let score = -negamax(pool, &successor, depth - 1, opponent_best, best, scorer)?;
        if score > best {
            if -score <= opponent_best {
                return Ok(score);
            }
            best = score;
        }
    }
    Ok(best)
}

#[cfg(test)]
mod tests {
    use super::{negamax, CHECKMATE_SCORE, UNBOUNDED};
    use crate::errors::ChessResult;
    use crate::game_state::board_pool::{BoardHandle, BoardPool};
    use crate::game_state::chess_types::BoardStatus;
    use crate::move_generation::move_generator::valid_board_handles;
    use crate::rules::board_status::board_status;
    use crate::search::board_scoring::{BoardScorer, PositionalMaterialScorer};
    use crate::utils::fen_parser::parse_fen;

    /// Plain negamax without pruning.
    fn exhaustive(pool: &BoardPool, handle: &BoardHandle, depth: u8) -> ChessResult<i32> {
        let status = board_status(pool, handle)?;
        match status {
            BoardStatus::Checkmate => return Ok(CHECKMATE_SCORE),
            BoardStatus::Stalemate => return Ok(0),
            _ => {}
        }
        if depth == 0 {
            return Ok(pool.read(handle, |board| PositionalMaterialScorer.score(board, status)));
        }
        let mut best = UNBOUNDED;
        for successor in valid_board_handles(pool, handle) {
            let successor = successor?;
            best = best.max(-exhaustive(pool, &successor, depth - 1)?);
        }
        Ok(best)
    }

    fn compare(fen: &str, depth: u8) {
        let pool = BoardPool::new();
        let board = pool.acquire_scoped().expect("slot available");
        pool.load(&board, parse_fen(fen).expect("valid fen"));

        let pruned = negamax(&pool, &board, depth, UNBOUNDED, UNBOUNDED, &PositionalMaterialScorer)
            .expect("pool has room");
        let full = exhaustive(&pool, &board, depth).expect("pool has room");
        assert_eq!(pruned, full, "{fen} at depth {depth}");
        assert_eq!(pool.in_use(), 1, "search leaked boards");
    }

    #[test]
    fn pruning_preserves_the_root_score() {
        for depth in 0..=3 {
            compare("4k3/8/8/3q4/8/2N5/8/4K2R w K - 0 1", depth);
            compare("r3k3/1p6/8/8/8/8/1P6/4K2R b Kq - 0 1", depth);
        }
        compare("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1", 2);
    }

    #[test]
    fn terminal_positions_ignore_depth() {
        let pool = BoardPool::new();
        let board = pool.acquire_scoped().expect("slot available");

        pool.load(&board, parse_fen("R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1").expect("valid fen"));
        for depth in [0, 3] {
            let score = negamax(&pool, &board, depth, UNBOUNDED, UNBOUNDED, &PositionalMaterialScorer)
                .expect("pool has room");
            assert_eq!(score, CHECKMATE_SCORE);
        }

        pool.load(&board, parse_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").expect("valid fen"));
        let score = negamax(&pool, &board, 2, UNBOUNDED, UNBOUNDED, &PositionalMaterialScorer)
            .expect("pool has room");
        assert_eq!(score, 0);
    }

    #[test]
    fn mate_in_one_is_seen_at_depth_two() {
        let pool = BoardPool::new();
        let board = pool.acquire_scoped().expect("slot available");
        pool.load(&board, parse_fen("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1").expect("valid fen"));

        let score = negamax(&pool, &board, 2, UNBOUNDED, UNBOUNDED, &PositionalMaterialScorer)
            .expect("pool has room");
        assert_eq!(score, -CHECKMATE_SCORE);
    }
}
