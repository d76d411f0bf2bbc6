//! Value types shared by every layer of the engine.

use std::fmt;

use crate::geometry::square::Square;
use crate::utils::algebraic::move_to_long_algebraic;

/// Side to move. `Light` plays White and starts on rows 0 and 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Light,
    Dark,
}

impl Color {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Color::Light => 0,
            Color::Dark => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::Light => Color::Dark,
            Color::Dark => Color::Light,
        }
    }

    /// Packed encoding. Zero is reserved for "no color".
    #[inline]
    pub const fn code(self) -> u8 {
        match self {
            Color::Light => 1,
            Color::Dark => 2,
        }
    }

    #[inline]
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Color::Light),
            2 => Some(Color::Dark),
            _ => None,
        }
    }

    /// Row holding this color's king and rooks at the start of the game.
    #[inline]
    pub const fn home_row(self) -> u8 {
        match self {
            Color::Light => 0,
            Color::Dark => 7,
        }
    }

    /// Row this color's pawns start on.
    #[inline]
    pub const fn pawn_row(self) -> u8 {
        match self {
            Color::Light => 1,
            Color::Dark => 6,
        }
    }

    /// Row this color's pawns promote on.
    #[inline]
    pub const fn promotion_row(self) -> u8 {
        self.opposite().home_row()
    }

    /// Row a pawn of this color lands on when capturing en passant.
    #[inline]
    pub const fn en_passant_capture_row(self) -> u8 {
        match self {
            Color::Light => 5,
            Color::Dark => 2,
        }
    }

    /// Row delta of a single pawn step.
    #[inline]
    pub const fn forward(self) -> i8 {
        match self {
            Color::Light => 1,
            Color::Dark => -1,
        }
    }

    /// True once `row` lies in the opponent's half of the board.
    #[inline]
    pub const fn is_past_midpoint(self, row: u8) -> bool {
        match self {
            Color::Light => row >= 4,
            Color::Dark => row <= 3,
        }
    }
}

/// Piece kind. The empty square is not a kind: it is `None` wherever an
/// occupant is optional, so geometry can never be requested for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

/// Packed code of an empty square.
pub const EMPTY_CODE: u8 = 0;

impl PieceKind {
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            PieceKind::Pawn => 0,
            PieceKind::Knight => 1,
            PieceKind::Bishop => 2,
            PieceKind::Rook => 3,
            PieceKind::Queen => 4,
            PieceKind::King => 5,
        }
    }

    #[inline]
    pub const fn code(self) -> u8 {
        self.index() as u8 + 1
    }

    /// Decodes a packed kind. `EMPTY_CODE` and out-of-range codes decode to `None`.
    #[inline]
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(PieceKind::Pawn),
            2 => Some(PieceKind::Knight),
            3 => Some(PieceKind::Bishop),
            4 => Some(PieceKind::Rook),
            5 => Some(PieceKind::Queen),
            6 => Some(PieceKind::King),
            _ => None,
        }
    }

    #[inline]
    pub const fn is_promotion_target(self) -> bool {
        matches!(
            self,
            PieceKind::Knight | PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen
        )
    }

    pub const fn to_char(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }

    pub const fn from_char(ch: char) -> Option<Self> {
        match ch.to_ascii_lowercase() {
            'p' => Some(PieceKind::Pawn),
            'n' => Some(PieceKind::Knight),
            'b' => Some(PieceKind::Bishop),
            'r' => Some(PieceKind::Rook),
            'q' => Some(PieceKind::Queen),
            'k' => Some(PieceKind::King),
            _ => None,
        }
    }
}

/// An occupant of a square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
}

impl Piece {
    #[inline]
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        Self { color, kind }
    }
}

/// Which rook a king castles with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastlingSide {
    KingSide,
    QueenSide,
}

impl CastlingSide {
    pub const ALL: [CastlingSide; 2] = [CastlingSide::KingSide, CastlingSide::QueenSide];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            CastlingSide::KingSide => 0,
            CastlingSide::QueenSide => 1,
        }
    }

    /// Column of the rook's original corner.
    #[inline]
    pub const fn rook_column(self) -> u8 {
        match self {
            CastlingSide::KingSide => 7,
            CastlingSide::QueenSide => 0,
        }
    }

    #[inline]
    pub const fn from_rook_column(column: u8) -> Option<Self> {
        match column {
            7 => Some(CastlingSide::KingSide),
            0 => Some(CastlingSide::QueenSide),
            _ => None,
        }
    }

    #[inline]
    pub const fn from_column_delta(delta: i8) -> Self {
        if delta > 0 {
            CastlingSide::KingSide
        } else {
            CastlingSide::QueenSide
        }
    }
}

/// Outcome of a position for the side to move, or of a move attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoardStatus {
    Standard,
    Check,
    Checkmate,
    Stalemate,
    /// A rejected move attempt. Never produced by classifying a position.
    Invalid,
}

/// A move between two squares with an optional promotion kind.
///
/// `promotion` is only consulted when a pawn reaches its last row; `None` promotes
/// to a queen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChessMove {
    pub from: &'static Square,
    pub to: &'static Square,
    pub promotion: Option<PieceKind>,
}

impl ChessMove {
    #[inline]
    pub const fn new(from: &'static Square, to: &'static Square) -> Self {
        Self {
            from,
            to,
            promotion: None,
        }
    }

    #[inline]
    pub const fn with_promotion(self, promotion: PieceKind) -> Self {
        Self {
            promotion: Some(promotion),
            ..self
        }
    }
}

impl fmt::Display for ChessMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&move_to_long_algebraic(self))
    }
}

#[cfg(test)]
mod tests {
    use super::{CastlingSide, Color, PieceKind, EMPTY_CODE};

    #[test]
    fn empty_code_is_not_a_piece_kind() {
        assert_eq!(PieceKind::from_code(EMPTY_CODE), None);
        assert_eq!(PieceKind::from_code(7), None);
        for kind in PieceKind::ALL {
            assert_eq!(PieceKind::from_code(kind.code()), Some(kind));
        }
    }

    #[test]
    fn rows_are_mirrored_between_colors() {
        assert_eq!(Color::Light.promotion_row(), Color::Dark.home_row());
        assert_eq!(Color::Dark.promotion_row(), Color::Light.home_row());
        assert_eq!(Color::Light.pawn_row() as i8 + Color::Light.forward(), 2);
        assert_eq!(Color::Dark.pawn_row() as i8 + Color::Dark.forward(), 5);
        assert!(Color::Light.is_past_midpoint(4));
        assert!(!Color::Dark.is_past_midpoint(4));
    }

    #[test]
    fn castling_side_follows_king_direction() {
        assert_eq!(CastlingSide::from_column_delta(2), CastlingSide::KingSide);
        assert_eq!(CastlingSide::from_column_delta(-2), CastlingSide::QueenSide);
        assert_eq!(CastlingSide::from_rook_column(3), None);
    }
}
