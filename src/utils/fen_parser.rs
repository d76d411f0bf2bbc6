//! FEN-to-board parser.
//!
//! The halfmove clock and fullmove number are optional and ignored: the engine
//! does not track them.

use crate::errors::{ChessErrors, ChessResult};
use crate::game_state::chess_types::{CastlingSide, Color, Piece, PieceKind};
use crate::game_state::packed_board::PackedBoard;
use crate::geometry::square::Square;
use crate::rules::attacks::is_in_check;
use crate::utils::algebraic::algebraic_to_square;

pub fn parse_fen(fen: &str) -> ChessResult<PackedBoard> {
    let mut parts = fen.split_whitespace();

    let board_part = parts.next().ok_or_else(|| fen_error("missing board layout"))?;
    let side_part = parts.next().ok_or_else(|| fen_error("missing side to move"))?;
    let castling_part = parts.next().ok_or_else(|| fen_error("missing castling rights"))?;
    let en_passant_part = parts.next().ok_or_else(|| fen_error("missing en-passant square"))?;

    for clock in parts.by_ref().take(2) {
        clock
            .parse::<u16>()
            .map_err(|_| fen_error(&format!("invalid move counter: {clock}")))?;
    }
    if parts.next().is_some() {
        return Err(fen_error("extra trailing fields"));
    }

    let mut board = PackedBoard::empty();
    parse_board(board_part, &mut board)?;
    board.set_active_color(parse_side_to_move(side_part)?);
    parse_castling_rights(castling_part, &mut board)?;
    board.set_en_passant_column(parse_en_passant_column(en_passant_part, &board)?);

    // The side that just moved may not have left its own king attacked.
    if is_in_check(&board, board.active_color().opposite()) {
        return Err(fen_error("side not to move is in check"));
    }

    Ok(board)
}

fn fen_error(message: &str) -> ChessErrors {
    ChessErrors::InvalidFenString(message.to_owned())
}

fn parse_board(board_part: &str, board: &mut PackedBoard) -> ChessResult<()> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(fen_error("board layout must contain 8 ranks"));
    }

    let mut kings = [0usize; 2];

    for (fen_rank_idx, rank_str) in ranks.iter().enumerate() {
        let row = 7 - fen_rank_idx as u8;
        let mut column = 0u8;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(ChessErrors::InvalidFenToken(ch));
                }
                column += empty_count as u8;
                if column > 8 {
                    return Err(fen_error("board rank has too many files"));
                }
                continue;
            }

            let piece = piece_from_fen_char(ch).ok_or(ChessErrors::InvalidFenToken(ch))?;
            if column >= 8 {
                return Err(fen_error("board rank has too many files"));
            }
            if piece.kind == PieceKind::King {
                kings[piece.color.index()] += 1;
            }

            board.set_occupant(Square::at(row, column), Some(piece));
            column += 1;
        }

        if column != 8 {
            return Err(fen_error("board rank does not sum to 8 files"));
        }
    }

    if kings != [1, 1] {
        return Err(fen_error("each side needs exactly one king"));
    }
    Ok(())
}

fn parse_side_to_move(side_part: &str) -> ChessResult<Color> {
    match side_part {
        "w" => Ok(Color::Light),
        "b" => Ok(Color::Dark),
        _ => Err(fen_error(&format!("invalid side to move: {side_part}"))),
    }
}

fn parse_castling_rights(castling_part: &str, board: &mut PackedBoard) -> ChessResult<()> {
    if castling_part == "-" {
        return Ok(());
    }

    for ch in castling_part.chars() {
        let (color, side) = match ch {
            'K' => (Color::Light, CastlingSide::KingSide),
            'Q' => (Color::Light, CastlingSide::QueenSide),
            'k' => (Color::Dark, CastlingSide::KingSide),
            'q' => (Color::Dark, CastlingSide::QueenSide),
            _ => return Err(ChessErrors::InvalidFenToken(ch)),
        };
        board.set_castling_right(color, side, true);
    }

    Ok(())
}

/// The en-passant square must sit on the row the side to move would capture onto,
/// with the opposing pawn just past it and both squares it crossed empty.
fn parse_en_passant_column(en_passant_part: &str, board: &PackedBoard) -> ChessResult<Option<u8>> {
    if en_passant_part == "-" {
        return Ok(None);
    }

    let active = board.active_color();
    let square = algebraic_to_square(en_passant_part)?;
    if square.row() != active.en_passant_capture_row() {
        return Err(fen_error(&format!(
            "en-passant square {en_passant_part} does not match the side to move"
        )));
    }

    let forward = active.forward();
    let pawn_square = square.offset(-forward, 0);
    let origin_square = square.offset(forward, 0);
    let pawn = pawn_square.and_then(|pawn_square| board.occupant(pawn_square));
    let origin = origin_square.and_then(|origin_square| board.occupant(origin_square));
    if pawn != Some(Piece::new(active.opposite(), PieceKind::Pawn))
        || board.occupant(square).is_some()
        || origin_square.is_none()
        || origin.is_some()
    {
        return Err(fen_error(&format!(
            "en-passant square {en_passant_part} has no pawn that just advanced two squares"
        )));
    }
    Ok(Some(square.column()))
}

fn piece_from_fen_char(ch: char) -> Option<Piece> {
    let color = if ch.is_ascii_uppercase() {
        Color::Light
    } else if ch.is_ascii_lowercase() {
        Color::Dark
    } else {
        return None;
    };

    PieceKind::from_char(ch).map(|kind| Piece::new(color, kind))
}

#[cfg(test)]
mod tests {
    use super::parse_fen;
    use crate::errors::ChessErrors;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;
    use crate::game_state::chess_types::{CastlingSide, Color, Piece, PieceKind};
    use crate::game_state::packed_board::PackedBoard;
    use crate::geometry::square::Square;

    #[test]
    fn starting_fen_matches_opening_board() {
        let board = parse_fen(STARTING_POSITION_FEN).expect("starting FEN should parse");
        assert_eq!(board, PackedBoard::opening());
    }

    #[test]
    fn parses_every_field() {
        let board = parse_fen("4k3/8/8/3pP3/8/8/8/R3K3 w Q d6").expect("FEN should parse");

        assert_eq!(board.active_color(), Color::Light);
        assert_eq!(board.en_passant_column(), Some(3));
        assert!(board.can_castle(Color::Light, CastlingSide::QueenSide));
        assert!(!board.can_castle(Color::Light, CastlingSide::KingSide));
        assert!(!board.can_castle(Color::Dark, CastlingSide::QueenSide));
        assert_eq!(board.king_square(Color::Dark), Square::at(7, 4));
        assert_eq!(
            board.occupant(Square::at(4, 4)),
            Some(Piece::new(Color::Light, PieceKind::Pawn))
        );
    }

    #[test]
    fn rejects_malformed_input() {
        assert!(matches!(
            parse_fen("4k3/8/8/8/8/8/8/4K3"),
            Err(ChessErrors::InvalidFenString(_))
        ));
        assert_eq!(
            parse_fen("4k3/8/8/8/8/8/8/4X3 w - -"),
            Err(ChessErrors::InvalidFenToken('X'))
        );
        assert!(parse_fen("4k3/8/8/8/8/8/8/4K4 w - -").is_err());
        assert!(parse_fen("4k3/8/8/8/8/8/8/8 w - -").is_err());
        assert!(parse_fen("4k3/8/8/8/8/8/8/4K3 w - e3").is_err());
        assert!(parse_fen("4k3/8/8/8/8/8/8/4K3 w - - x 1").is_err());
        assert!(matches!(
            parse_fen("4k3/8/8/8/8/8/8/4RK2 w - - 0 1"),
            Err(ChessErrors::InvalidFenString(_))
        ));
    }

    #[test]
    fn en_passant_square_needs_a_pawn_that_just_advanced() {
        let board = parse_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1").expect("FEN should parse");
        assert_eq!(board.en_passant_column(), Some(3));

        // A king behind the square, not a pawn.
        assert!(matches!(
            parse_fen("8/8/8/3kP3/8/8/8/4K3 w - d6 0 1"),
            Err(ChessErrors::InvalidFenString(_))
        ));
        // Nothing behind the square.
        assert!(parse_fen("4k3/8/8/4P3/8/8/8/4K3 w - d6 0 1").is_err());
        // Own pawn behind the square.
        assert!(parse_fen("4k3/8/8/3PP3/8/8/8/4K3 w - d6 0 1").is_err());
        // Target square occupied.
        assert!(parse_fen("4k3/8/3n4/3pP3/8/8/8/4K3 w - d6 0 1").is_err());
        // Origin square occupied.
        assert!(parse_fen("4k3/3n4/8/3pP3/8/8/8/4K3 w - d6 0 1").is_err());
        // Same checks from the other side.
        assert!(parse_fen("4k3/8/8/8/3pP3/8/8/4K3 b - e3 0 1").is_ok());
        assert!(parse_fen("4k3/8/8/8/3p4/8/8/4K3 b - e3 0 1").is_err());
    }
}
