use crate::game_state::chess_types::{CastlingSide, Color, Piece};
use crate::game_state::packed_board::PackedBoard;
use crate::geometry::square::Square;
use crate::utils::algebraic::square_to_algebraic;

/// Board to FEN. Move counters are not tracked and are always written as `0 1`.
pub fn generate_fen(board: &PackedBoard) -> String {
    let side_to_move = match board.active_color() {
        Color::Light => "w",
        Color::Dark => "b",
    };

    format!(
        "{} {} {} {} 0 1",
        generate_board_field(board),
        side_to_move,
        generate_castling_field(board),
        generate_en_passant_field(board)
    )
}

fn generate_board_field(board: &PackedBoard) -> String {
    let mut out = String::new();

    for row in (0..8).rev() {
        let mut empty_count = 0u8;

        for column in 0..8 {
            match board.occupant(Square::at(row, column)) {
                Some(piece) => {
                    if empty_count > 0 {
                        out.push(char::from(b'0' + empty_count));
                        empty_count = 0;
                    }
                    out.push(piece_to_fen_char(piece));
                }
                None => empty_count += 1,
            }
        }

        if empty_count > 0 {
            out.push(char::from(b'0' + empty_count));
        }

        if row > 0 {
            out.push('/');
        }
    }

    out
}

fn piece_to_fen_char(piece: Piece) -> char {
    let base = piece.kind.to_char();
    match piece.color {
        Color::Light => base.to_ascii_uppercase(),
        Color::Dark => base,
    }
}

fn generate_castling_field(board: &PackedBoard) -> String {
    let mut out = String::new();

    for (color, side, ch) in [
        (Color::Light, CastlingSide::KingSide, 'K'),
        (Color::Light, CastlingSide::QueenSide, 'Q'),
        (Color::Dark, CastlingSide::KingSide, 'k'),
        (Color::Dark, CastlingSide::QueenSide, 'q'),
    ] {
        if board.can_castle(color, side) {
            out.push(ch);
        }
    }

    if out.is_empty() {
        out.push('-');
    }

    out
}

fn generate_en_passant_field(board: &PackedBoard) -> String {
    let Some(column) = board.en_passant_column() else {
        return "-".to_owned();
    };

    let row = board.active_color().en_passant_capture_row();
    square_to_algebraic(Square::at(row, column))
}

#[cfg(test)]
mod tests {
    use super::generate_fen;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;
    use crate::game_state::packed_board::PackedBoard;
    use crate::geometry::square::Square;
    use crate::utils::fen_parser::parse_fen;

    #[test]
    fn starting_position_fen() {
        assert_eq!(generate_fen(&PackedBoard::opening()), STARTING_POSITION_FEN);
    }

    #[test]
    fn custom_position_survives_a_reparse() {
        let fen = "r1bqk2r/pppp1ppp/2n2n2/2b1p3/2B1P3/2N2N2/PPPP1PPP/R1BQ1RK1 b kq - 0 1";
        let parsed = parse_fen(fen).expect("custom FEN should parse");
        assert_eq!(generate_fen(&parsed), fen);
    }

    #[test]
    fn en_passant_square_follows_the_side_to_move() {
        let mut board = PackedBoard::opening();
        board.commit_move(Square::at(1, 4), Square::at(3, 4), None);
        assert_eq!(
            generate_fen(&board),
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1"
        );
    }
}
