//! Lazy move enumeration.
//!
//! Three layers, each built on the one before:
//! - [`potential_moves`]: every geometric target of every active-color piece.
//! - [`valid_moves`]: the potential moves that pass full legality.
//! - [`valid_board_handles`]: the successor boards of those legal moves.
//!
//! Every iterator is created fresh per call, is finite, and stops for good after
//! yielding an error.

use crate::errors::ChessResult;
use crate::game_state::board_pool::{BoardHandle, BoardPool, ScopedBoard};
use crate::game_state::chess_rules::KING_START_COLUMN;
use crate::game_state::chess_types::{CastlingSide, ChessMove, PieceKind};
use crate::game_state::packed_board::PackedBoard;
use crate::geometry::reachability::reachable_squares_for;
use crate::geometry::square::Square;
use crate::geometry::square_set::{SquareSet, SquareSetIter};
use crate::rules::move_validation::{valid_board_handle, validate_move};

/// Geometric candidates from a snapshot of the board.
#[derive(Debug, Clone)]
pub struct PotentialMoves {
    board: PackedBoard,
    origins: SquareSetIter,
    from: Option<&'static Square>,
    targets: SquareSetIter,
}

impl PotentialMoves {
    pub fn new(board: PackedBoard) -> Self {
        let active = board.active_color();
        let origins = board
            .pieces()
            .filter(|(_, piece)| piece.color == active)
            .fold(0u64, |bits, (square, _)| bits | square.bit());

        Self {
            board,
            origins: SquareSet::from_bits(origins).iter(),
            from: None,
            targets: SquareSet::EMPTY.iter(),
        }
    }
}

impl Iterator for PotentialMoves {
    type Item = ChessMove;

    fn next(&mut self) -> Option<ChessMove> {
        loop {
            if let Some(from) = self.from {
                if let Some(to) = self.targets.next() {
                    return Some(ChessMove::new(from, to));
                }
            }
            let from = self.origins.next()?;
            self.from = Some(from);
            self.targets = candidate_targets(&self.board, from).iter();
        }
    }
}

/// Geometric reach of the piece on `from`, plus the castling squares for a king
/// still on its starting square.
fn candidate_targets(board: &PackedBoard, from: &Square) -> SquareSet {
    let Some(piece) = board.occupant(from) else {
        return SquareSet::EMPTY;
    };
    let reach = reachable_squares_for(from, piece.color, piece.kind);

    if piece.kind == PieceKind::King
        && from.row() == piece.color.home_row()
        && from.column() == KING_START_COLUMN
    {
        let castling_bits = CastlingSide::ALL
            .iter()
            .filter(|side| board.can_castle(piece.color, **side))
            .map(|side| {
                let column = if side.rook_column() > KING_START_COLUMN {
                    KING_START_COLUMN + 2
                } else {
                    KING_START_COLUMN - 2
                };
                Square::at(from.row(), column).bit()
            })
            .fold(0u64, |bits, bit| bits | bit);
        return reach.union(SquareSet::from_bits(castling_bits));
    }

    reach
}

pub fn potential_moves(pool: &BoardPool, handle: &BoardHandle) -> PotentialMoves {
    PotentialMoves::new(pool.snapshot(handle))
}

/// Legal moves for the side to move.
#[derive(Debug)]
pub struct ValidMoves<'p, 'h> {
    pool: &'p BoardPool,
    handle: &'h BoardHandle,
    candidates: PotentialMoves,
    failed: bool,
}

impl Iterator for ValidMoves<'_, '_> {
    type Item = ChessResult<ChessMove>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        for candidate in self.candidates.by_ref() {
            match validate_move(self.pool, self.handle, candidate.from, candidate.to) {
                Ok(true) => return Some(Ok(candidate)),
                Ok(false) => {}
                Err(err) => {
                    self.failed = true;
                    return Some(Err(err));
                }
            }
        }
        None
    }
}

pub fn valid_moves<'p, 'h>(pool: &'p BoardPool, handle: &'h BoardHandle) -> ValidMoves<'p, 'h> {
    ValidMoves {
        pool,
        handle,
        candidates: potential_moves(pool, handle),
        failed: false,
    }
}

/// Legal moves paired with the boards they produce.
///
/// Each yielded board is owned by the caller and is released when dropped.
#[derive(Debug)]
pub struct ValidSuccessors<'p, 'h> {
    pool: &'p BoardPool,
    handle: &'h BoardHandle,
    candidates: PotentialMoves,
    failed: bool,
}

impl<'p> Iterator for ValidSuccessors<'p, '_> {
    type Item = ChessResult<(ChessMove, ScopedBoard<'p>)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        for candidate in self.candidates.by_ref() {
            match valid_board_handle(self.pool, self.handle, candidate.from, candidate.to) {
                Ok(Some(successor)) => return Some(Ok((candidate, successor))),
                Ok(None) => {}
                Err(err) => {
                    self.failed = true;
                    return Some(Err(err));
                }
            }
        }
        None
    }
}

pub fn valid_successors<'p, 'h>(
    pool: &'p BoardPool,
    handle: &'h BoardHandle,
) -> ValidSuccessors<'p, 'h> {
    ValidSuccessors {
        pool,
        handle,
        candidates: potential_moves(pool, handle),
        failed: false,
    }
}

/// Successor boards of every legal move.
#[derive(Debug)]
pub struct ValidBoardHandles<'p, 'h> {
    successors: ValidSuccessors<'p, 'h>,
}

impl<'p> Iterator for ValidBoardHandles<'p, '_> {
    type Item = ChessResult<ScopedBoard<'p>>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.successors
            .next()
            .map(|result| result.map(|(_, successor)| successor))
    }
}

pub fn valid_board_handles<'p, 'h>(
    pool: &'p BoardPool,
    handle: &'h BoardHandle,
) -> ValidBoardHandles<'p, 'h> {
    ValidBoardHandles {
        successors: valid_successors(pool, handle),
    }
}
