//! Square geometry lookups.
//!
//! All tables are computed at compile time and depend only on the square and the
//! piece type, never on a live position.

use crate::game_state::chess_types::{Color, PieceKind};
use crate::geometry::sliding_rays::{BISHOP_RAYS, QUEEN_RAYS, ROOK_RAYS};
use crate::geometry::square::Square;
use crate::geometry::square_set::SquareSet;
use crate::geometry::step_moves::{DARK_PAWN_REACH, KING_REACH, KNIGHT_REACH, LIGHT_PAWN_REACH};

/// Union of every piece geometry. King and pawn reach are subsets of the queen rays.
pub const ANY_PIECE_REACH: [u64; 64] = generate_any_piece_reach();

const fn generate_any_piece_reach() -> [u64; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        table[sq] = QUEEN_RAYS[sq] | KNIGHT_REACH[sq];
        sq += 1;
    }

    table
}

/// Every square some piece type could reach from `from` on an empty board.
///
/// Read in reverse, these are all the squares a piece could attack `from` from.
#[inline]
pub fn reachable_squares(from: &Square) -> SquareSet {
    SquareSet::from_bits(ANY_PIECE_REACH[from.index()])
}

/// Squares a `color` `kind` could reach from `from` on an empty board.
#[inline]
pub fn reachable_squares_for(from: &Square, color: Color, kind: PieceKind) -> SquareSet {
    let index = from.index();
    let bits = match kind {
        PieceKind::Pawn => match color {
            Color::Light => LIGHT_PAWN_REACH[index],
            Color::Dark => DARK_PAWN_REACH[index],
        },
        PieceKind::Knight => KNIGHT_REACH[index],
        PieceKind::Bishop => BISHOP_RAYS[index],
        PieceKind::Rook => ROOK_RAYS[index],
        PieceKind::Queen => QUEEN_RAYS[index],
        PieceKind::King => KING_REACH[index],
    };
    SquareSet::from_bits(bits)
}
