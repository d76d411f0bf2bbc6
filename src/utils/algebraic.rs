//! Long algebraic coordinates.
//!
//! Converts between human-readable coordinates (`e4`, `e2e4`, `e7e8q`) and the
//! interned squares and moves used by the engine.

use crate::errors::{ChessErrors, ChessResult};
use crate::game_state::chess_types::{ChessMove, PieceKind};
use crate::geometry::square::Square;

/// Convert a coordinate such as "e4" to its square.
#[inline]
pub fn algebraic_to_square(square: &str) -> ChessResult<&'static Square> {
    let bytes = square.as_bytes();
    if bytes.len() != 2 {
        return Err(ChessErrors::InvalidAlgebraicString(format!(
            "square must be two characters: {square}"
        )));
    }

    let file = bytes[0];
    let rank = bytes[1];

    if !(b'a'..=b'h').contains(&file) {
        return Err(ChessErrors::InvalidAlgebraicString(format!(
            "invalid file '{}' in {square}",
            file as char
        )));
    }
    if !(b'1'..=b'8').contains(&rank) {
        return Err(ChessErrors::InvalidAlgebraicString(format!(
            "invalid rank '{}' in {square}",
            rank as char
        )));
    }

    Ok(Square::at(rank - b'1', file - b'a'))
}

#[inline]
pub fn square_to_algebraic(square: &Square) -> String {
    let file_char = char::from(b'a' + square.column());
    let rank_char = char::from(b'1' + square.row());
    format!("{file_char}{rank_char}")
}

pub fn move_to_long_algebraic(chess_move: &ChessMove) -> String {
    let mut out = square_to_algebraic(chess_move.from);
    out.push_str(&square_to_algebraic(chess_move.to));
    if let Some(kind) = chess_move.promotion {
        out.push(kind.to_char());
    }
    out
}

/// Parse "e2e4" or "e7e8q". Only knight, bishop, rook and queen promotions parse.
pub fn parse_long_algebraic(text: &str) -> ChessResult<ChessMove> {
    if !text.is_ascii() || !(4..=5).contains(&text.len()) {
        return Err(ChessErrors::InvalidAlgebraicString(text.to_owned()));
    }

    let from = algebraic_to_square(&text[0..2])?;
    let to = algebraic_to_square(&text[2..4])?;
    let chess_move = ChessMove::new(from, to);

    let Some(promotion_char) = text[4..].chars().next() else {
        return Ok(chess_move);
    };
    let kind = PieceKind::from_char(promotion_char)
        .ok_or_else(|| ChessErrors::InvalidAlgebraicString(text.to_owned()))?;
    if !kind.is_promotion_target() {
        return Err(ChessErrors::InvalidPromotionPiece(kind));
    }
    Ok(chess_move.with_promotion(kind))
}
