use crate::errors::ChessResult;
use crate::game_state::board_pool::{BoardHandle, BoardPool};
use crate::game_state::chess_types::{ChessMove, PieceKind};
use crate::move_generation::move_generator::valid_successors;
use crate::rules::attacks::is_king_in_check;
use crate::rules::board_status::has_valid_move;

/// Leaf statistics of a perft walk.
///
/// Promotions are always to a queen, so positions with under-promotions diverge
/// from published totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: u64,
    pub captures: u64,
    pub en_passant: u64,
    pub castles: u64,
    pub checks: u64,
    pub checkmates: u64,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.checks += rhs.checks;
        self.checkmates += rhs.checkmates;
    }
}

/// Number of leaf positions `depth` plies below `handle`.
pub fn perft(pool: &BoardPool, handle: &BoardHandle, depth: u8) -> ChessResult<u64> {
    if depth == 0 {
        return Ok(1);
    }

    let mut nodes = 0;
    for successor in valid_successors(pool, handle) {
        let (_, successor) = successor?;
        nodes += perft(pool, &successor, depth - 1)?;
    }
    Ok(nodes)
}

/// Like [`perft`] but also classifies the moves leading to each leaf.
pub fn perft_counts(pool: &BoardPool, handle: &BoardHandle, depth: u8) -> ChessResult<PerftCounts> {
    if depth == 0 {
        return Ok(PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        });
    }

    let mut total = PerftCounts::default();
    for successor in valid_successors(pool, handle) {
        let (chess_move, successor) = successor?;
        if depth == 1 {
            total.merge(classify_leaf(pool, handle, &successor, chess_move)?);
        } else {
            total.merge(perft_counts(pool, &successor, depth - 1)?);
        }
    }
    Ok(total)
}

fn classify_leaf(
    pool: &BoardPool,
    before: &BoardHandle,
    after: &BoardHandle,
    chess_move: ChessMove,
) -> ChessResult<PerftCounts> {
    let mut counts = PerftCounts {
        nodes: 1,
        ..PerftCounts::default()
    };

    let mover = pool.occupant(before, chess_move.from);
    let target = pool.occupant(before, chess_move.to);
    let column_shift = chess_move.to.column().abs_diff(chess_move.from.column());

    match mover.map(|piece| piece.kind) {
        Some(PieceKind::Pawn) if column_shift == 1 && target.is_none() => {
            counts.captures += 1;
            counts.en_passant += 1;
        }
        Some(PieceKind::King) if column_shift == 2 => counts.castles += 1,
        _ if target.is_some() => counts.captures += 1,
        _ => {}
    }

    let defender = pool.active_color(after);
    if is_king_in_check(pool, after, defender) {
        counts.checks += 1;
        if !has_valid_move(pool, after)? {
            counts.checkmates += 1;
        }
    }

    Ok(counts)
}

#[cfg(test)]
mod tests {
    use super::{perft, perft_counts, PerftCounts};
    use crate::game_state::board_pool::BoardPool;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;
    use crate::utils::fen_parser::parse_fen;

    fn perft_from(fen: &str, depth: u8) -> u64 {
        let pool = BoardPool::new();
        let board = pool.acquire_scoped().expect("slot available");
        pool.load(&board, parse_fen(fen).expect("valid fen"));
        let nodes = perft(&pool, &board, depth).expect("pool has room");
        drop(board);
        assert_eq!(pool.in_use(), 0, "perft leaked boards");
        nodes
    }

    fn counts_from(fen: &str, depth: u8) -> PerftCounts {
        let pool = BoardPool::new();
        let board = pool.acquire_scoped().expect("slot available");
        pool.load(&board, parse_fen(fen).expect("valid fen"));
        let counts = perft_counts(&pool, &board, depth).expect("pool has room");
        counts
    }

    #[test]
    fn opening_perft() {
        assert_eq!(perft_from(STARTING_POSITION_FEN, 1), 20);
        assert_eq!(perft_from(STARTING_POSITION_FEN, 2), 400);
        assert_eq!(perft_from(STARTING_POSITION_FEN, 3), 8_902);
    }

    #[test]
    fn kiwipete_perft() {
        let fen = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
        assert_eq!(
            counts_from(fen, 1),
            PerftCounts {
                nodes: 48,
                captures: 8,
                en_passant: 0,
                castles: 2,
                checks: 0,
                checkmates: 0,
            }
        );
        assert_eq!(
            counts_from(fen, 2),
            PerftCounts {
                nodes: 2_039,
                captures: 351,
                en_passant: 1,
                castles: 91,
                checks: 3,
                checkmates: 0,
            }
        );
    }

    #[test]
    fn rook_and_pawn_endgame_perft() {
        let fen = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1";
        assert_eq!(perft_from(fen, 1), 14);
        assert_eq!(perft_from(fen, 2), 191);
        assert_eq!(perft_from(fen, 3), 2_812);
    }

    #[test]
    fn opening_depth_three_counts() {
        let counts = counts_from(STARTING_POSITION_FEN, 3);
        assert_eq!(counts.nodes, 8_902);
        assert_eq!(counts.captures, 34);
        assert_eq!(counts.checks, 12);
        assert_eq!(counts.checkmates, 0);
    }
}
