//! Bit-packed board record.
//!
//! A position fits in 67 bytes:
//! - bytes `0..64`: one occupant per square, `(color_code << 3) | kind_code`, zero
//!   for an empty square.
//! - byte 64: Light king square, `(row << 3) | column`.
//! - byte 65: Dark king square and side to move, `(row << 5) | (column << 2) | color_code`.
//! - byte 66: en-passant column in the high nibble (8 means none) and one
//!   availability bit per castling right in the low nibble.
//!
//! The king squares are a cache maintained by `set_occupant`; they are never
//! recovered by scanning the board.

use crate::game_state::chess_rules::MAJOR_PIECE_ORDER;
use crate::game_state::chess_types::{CastlingSide, Color, Piece, PieceKind, EMPTY_CODE};
use crate::geometry::square::{Square, SQUARES};

pub const BOARD_BYTES: usize = 67;

const LIGHT_KING_BYTE: usize = 64;
const DARK_KING_AND_TURN_BYTE: usize = 65;
const RIGHTS_BYTE: usize = 66;
const NO_EN_PASSANT: u8 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PackedBoard {
    bytes: [u8; BOARD_BYTES],
}

impl Default for PackedBoard {
    fn default() -> Self {
        Self::empty()
    }
}

impl PackedBoard {
    /// A board with no pieces, Light to move, no castling rights and no en-passant
    /// target. Kings must be placed before the board is used for play.
    pub fn empty() -> Self {
        let mut board = Self {
            bytes: [0; BOARD_BYTES],
        };
        board.set_active_color(Color::Light);
        board.set_en_passant_column(None);
        board
    }

    /// The standard opening position.
    pub fn opening() -> Self {
        let mut board = Self::empty();

        for (column, kind) in MAJOR_PIECE_ORDER.iter().enumerate() {
            let column = column as u8;
            for color in [Color::Light, Color::Dark] {
                board.set_occupant(
                    Square::at(color.home_row(), column),
                    Some(Piece::new(color, *kind)),
                );
                board.set_occupant(
                    Square::at(color.pawn_row(), column),
                    Some(Piece::new(color, PieceKind::Pawn)),
                );
            }
        }

        for color in [Color::Light, Color::Dark] {
            for side in CastlingSide::ALL {
                board.set_castling_right(color, side, true);
            }
        }

        board
    }

    #[inline]
    pub fn active_color(&self) -> Color {
        let code = self.bytes[DARK_KING_AND_TURN_BYTE] & 0b11;
        match Color::from_code(code) {
            Some(color) => color,
            None => panic!("corrupt board: invalid side-to-move code {code}"),
        }
    }

    #[inline]
    pub fn set_active_color(&mut self, color: Color) {
        let byte = &mut self.bytes[DARK_KING_AND_TURN_BYTE];
        *byte = (*byte & 0b1111_1100) | color.code();
    }

    /// Cached king square for `color`.
    #[inline]
    pub fn king_square(&self, color: Color) -> &'static Square {
        let square = match color {
            Color::Light => {
                let byte = self.bytes[LIGHT_KING_BYTE];
                Square::at(byte >> 3, byte & 0b111)
            }
            Color::Dark => {
                let byte = self.bytes[DARK_KING_AND_TURN_BYTE];
                Square::at(byte >> 5, (byte >> 2) & 0b111)
            }
        };
        debug_assert_eq!(
            self.occupant(square),
            Some(Piece::new(color, PieceKind::King)),
            "king cache for {color:?} is out of sync with the board"
        );
        square
    }

    #[inline]
    pub fn can_castle(&self, color: Color, side: CastlingSide) -> bool {
        self.bytes[RIGHTS_BYTE] & castling_mask(color, side) != 0
    }

    #[inline]
    pub fn set_castling_right(&mut self, color: Color, side: CastlingSide, allowed: bool) {
        let mask = castling_mask(color, side);
        if allowed {
            self.bytes[RIGHTS_BYTE] |= mask;
        } else {
            self.bytes[RIGHTS_BYTE] &= !mask;
        }
    }

    /// Column of the pawn that just advanced two squares, if any.
    #[inline]
    pub fn en_passant_column(&self) -> Option<u8> {
        match self.bytes[RIGHTS_BYTE] >> 4 {
            NO_EN_PASSANT => None,
            column => Some(column),
        }
    }

    #[inline]
    pub fn set_en_passant_column(&mut self, column: Option<u8>) {
        let value = match column {
            Some(column) => {
                debug_assert!(column < 8);
                column
            }
            None => NO_EN_PASSANT,
        };
        let byte = &mut self.bytes[RIGHTS_BYTE];
        *byte = (value << 4) | (*byte & 0b1111);
    }

    #[inline]
    pub fn occupant(&self, square: &Square) -> Option<Piece> {
        let byte = self.bytes[square.index()];
        let kind = PieceKind::from_code(byte & 0b111)?;
        match Color::from_code(byte >> 3) {
            Some(color) => Some(Piece::new(color, kind)),
            None => panic!("corrupt board: {kind:?} on {square} has no color"),
        }
    }

    /// Places (or clears) an occupant. Placing a king also moves its cached square.
    #[inline]
    pub fn set_occupant(&mut self, square: &Square, occupant: Option<Piece>) {
        self.bytes[square.index()] = match occupant {
            Some(piece) => (piece.color.code() << 3) | piece.kind.code(),
            None => EMPTY_CODE,
        };

        if let Some(Piece {
            color,
            kind: PieceKind::King,
        }) = occupant
        {
            match color {
                Color::Light => {
                    self.bytes[LIGHT_KING_BYTE] = (square.row() << 3) | square.column();
                }
                Color::Dark => {
                    let byte = &mut self.bytes[DARK_KING_AND_TURN_BYTE];
                    *byte = (square.row() << 5) | (square.column() << 2) | (*byte & 0b11);
                }
            }
        }
    }

    /// Every occupied square with its piece, in index order.
    pub fn pieces(&self) -> impl Iterator<Item = (&'static Square, Piece)> + '_ {
        SQUARES
            .iter()
            .filter_map(|square| self.occupant(square).map(|piece| (square, piece)))
    }

    /// Applies a move without any legality checking.
    ///
    /// Handles double pawn steps, castling rook relocation, en-passant removal,
    /// promotion (queen when `promotion` is `None`) and castling-right bookkeeping,
    /// then passes the turn. Callers must have validated the move first.
    pub fn commit_move(&mut self, from: &Square, to: &Square, promotion: Option<PieceKind>) {
        let mover = match self.occupant(from) {
            Some(piece) => piece,
            None => panic!("commit_move called with empty origin {from}"),
        };

        let row_delta = to.row() as i8 - from.row() as i8;
        let column_delta = to.column() as i8 - from.column() as i8;

        if mover.kind == PieceKind::Pawn && row_delta.abs() == 2 {
            self.set_en_passant_column(Some(from.column()));
        } else {
            self.set_en_passant_column(None);

            let castling = mover.kind == PieceKind::King && column_delta.abs() == 2;
            let en_passant = mover.kind == PieceKind::Pawn
                && column_delta.abs() == 1
                && self.occupant(to).is_none();

            if castling {
                let side = CastlingSide::from_column_delta(column_delta);
                let crossed_column = (from.column() as i8 + column_delta.signum()) as u8;
                self.set_occupant(Square::at(from.row(), side.rook_column()), None);
                self.set_occupant(
                    Square::at(from.row(), crossed_column),
                    Some(Piece::new(mover.color, PieceKind::Rook)),
                );
            } else if en_passant {
                self.set_occupant(Square::at(from.row(), to.column()), None);
            }
        }

        let placed = if mover.kind == PieceKind::Pawn && to.row() == mover.color.promotion_row() {
            Piece::new(mover.color, promotion.unwrap_or(PieceKind::Queen))
        } else {
            mover
        };
        self.set_occupant(from, None);
        self.set_occupant(to, Some(placed));

        let opponent = mover.color.opposite();
        if mover.kind == PieceKind::King {
            for side in CastlingSide::ALL {
                self.set_castling_right(mover.color, side, false);
            }
        } else if mover.kind == PieceKind::Rook && from.row() == mover.color.home_row() {
            if let Some(side) = CastlingSide::from_rook_column(from.column()) {
                self.set_castling_right(mover.color, side, false);
            }
        }
        if to.row() == opponent.home_row() {
            if let Some(side) = CastlingSide::from_rook_column(to.column()) {
                self.set_castling_right(opponent, side, false);
            }
        }

        self.set_active_color(opponent);
    }
}

#[inline]
const fn castling_mask(color: Color, side: CastlingSide) -> u8 {
    1 << (color.index() * 2 + side.index())
}
