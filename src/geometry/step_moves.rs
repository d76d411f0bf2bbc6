//! Fixed-offset reach tables for knights, kings and pawns.

pub const KNIGHT_REACH: [u64; 64] = generate_knight_reach();
pub const KING_REACH: [u64; 64] = generate_king_reach();
pub const LIGHT_PAWN_REACH: [u64; 64] = generate_pawn_reach(1, 1);
pub const DARK_PAWN_REACH: [u64; 64] = generate_pawn_reach(-1, 6);

const fn generate_knight_reach() -> [u64; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let row = (sq / 8) as i32;
        let column = (sq % 8) as i32;
        let mut reach = 0u64;

        reach |= set_if_valid(row + 2, column + 1);
        reach |= set_if_valid(row + 1, column + 2);
        reach |= set_if_valid(row - 1, column + 2);
        reach |= set_if_valid(row - 2, column + 1);
        reach |= set_if_valid(row - 2, column - 1);
        reach |= set_if_valid(row - 1, column - 2);
        reach |= set_if_valid(row + 1, column - 2);
        reach |= set_if_valid(row + 2, column - 1);

        table[sq] = reach;
        sq += 1;
    }

    table
}

const fn generate_king_reach() -> [u64; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let row = (sq / 8) as i32;
        let column = (sq % 8) as i32;
        let mut reach = 0u64;

        reach |= set_if_valid(row - 1, column - 1);
        reach |= set_if_valid(row - 1, column);
        reach |= set_if_valid(row - 1, column + 1);
        reach |= set_if_valid(row, column - 1);
        reach |= set_if_valid(row, column + 1);
        reach |= set_if_valid(row + 1, column - 1);
        reach |= set_if_valid(row + 1, column);
        reach |= set_if_valid(row + 1, column + 1);

        table[sq] = reach;
        sq += 1;
    }

    table
}

/// Forward step, both forward diagonals, and the double step from the home row.
const fn generate_pawn_reach(forward: i32, home_row: i32) -> [u64; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let row = (sq / 8) as i32;
        let column = (sq % 8) as i32;
        let mut reach = 0u64;

        reach |= set_if_valid(row + forward, column - 1);
        reach |= set_if_valid(row + forward, column);
        reach |= set_if_valid(row + forward, column + 1);
        if row == home_row {
            reach |= set_if_valid(row + 2 * forward, column);
        }

        table[sq] = reach;
        sq += 1;
    }

    table
}

const fn set_if_valid(row: i32, column: i32) -> u64 {
    if row < 0 || row > 7 || column < 0 || column > 7 {
        return 0;
    }

    1u64 << (row * 8 + column)
}

#[cfg(test)]
mod tests {
    use super::{DARK_PAWN_REACH, KING_REACH, KNIGHT_REACH, LIGHT_PAWN_REACH};

    #[test]
    fn knight_reach_from_d4_has_eight_targets() {
        assert_eq!(KNIGHT_REACH[27].count_ones(), 8);
        assert_eq!(KNIGHT_REACH[0].count_ones(), 2);
    }

    #[test]
    fn king_reach_from_a1_has_three_targets() {
        assert_eq!(KING_REACH[0].count_ones(), 3);
    }

    #[test]
    fn pawns_reach_two_squares_only_from_home_row() {
        let e2 = 12usize;
        let expected = (1u64 << 19) | (1u64 << 20) | (1u64 << 21) | (1u64 << 28);
        assert_eq!(LIGHT_PAWN_REACH[e2], expected);

        let e3 = 20usize;
        assert_eq!(LIGHT_PAWN_REACH[e3].count_ones(), 3);

        let a7 = 48usize;
        let expected = (1u64 << 40) | (1u64 << 41) | (1u64 << 32);
        assert_eq!(DARK_PAWN_REACH[a7], expected);
        assert_eq!(DARK_PAWN_REACH[0], 0);
    }
}
