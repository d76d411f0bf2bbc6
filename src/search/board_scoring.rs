//! Static position evaluation.
//!
//! Search delegates leaf scoring to the `BoardScorer` trait so heuristics can be
//! swapped without touching the search code.

use crate::game_state::chess_types::{BoardStatus, Color, PieceKind};
use crate::game_state::packed_board::PackedBoard;

pub trait BoardScorer: Send + Sync {
    /// Score from the perspective of the side to move. `status` is the already
    /// computed classification of `board`.
    fn score(&self, board: &PackedBoard, status: BoardStatus) -> i32;
}

/// Material with small bonuses for advanced pawns and knights.
#[derive(Debug, Clone, Copy, Default)]
pub struct PositionalMaterialScorer;

impl PositionalMaterialScorer {
    pub const CHECK_PENALTY: i32 = 5;

    #[inline]
    pub const fn piece_value(piece: PieceKind) -> i32 {
        match piece {
            PieceKind::Pawn => 10,
            PieceKind::Knight => 30,
            PieceKind::Bishop => 30,
            PieceKind::Rook => 50,
            PieceKind::Queen => 90,
            PieceKind::King => 10_000,
        }
    }

    /// Bonus for a piece standing on (`row`, `column`).
    #[inline]
    pub const fn placement_bonus(color: Color, kind: PieceKind, row: u8, column: u8) -> i32 {
        if !color.is_past_midpoint(row) {
            return 0;
        }
        match kind {
            PieceKind::Pawn if column >= 2 && column <= 5 => 3,
            PieceKind::Pawn | PieceKind::Knight => 1,
            _ => 0,
        }
    }

    fn side_total(board: &PackedBoard, color: Color) -> i32 {
        board
            .pieces()
            .filter(|(_, piece)| piece.color == color)
            .map(|(square, piece)| {
                Self::piece_value(piece.kind)
                    + Self::placement_bonus(color, piece.kind, square.row(), square.column())
            })
            .sum()
    }
}

impl BoardScorer for PositionalMaterialScorer {
    fn score(&self, board: &PackedBoard, status: BoardStatus) -> i32 {
        let mover = board.active_color();
        let mut score = Self::side_total(board, mover) - Self::side_total(board, mover.opposite());
        if status == BoardStatus::Check {
            score -= Self::CHECK_PENALTY;
        }
        score
    }
}
