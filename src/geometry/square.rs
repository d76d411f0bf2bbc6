//! Interned board squares.
//!
//! Exactly 64 `Square` values exist, stored in the `SQUARES` static. Every lookup
//! hands out a `&'static Square` into that table, so resolving the same row and
//! column twice always yields the same instance.

use std::fmt;

use crate::utils::algebraic::square_to_algebraic;

/// An immutable (row, column) pair. Row 0 is Light's back rank, column 0 the a-file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    row: u8,
    column: u8,
}

pub static SQUARES: [Square; 64] = generate_squares();

const fn generate_squares() -> [Square; 64] {
    let mut table = [Square { row: 0, column: 0 }; 64];
    let mut sq = 0usize;

    while sq < 64 {
        table[sq] = Square {
            row: (sq / 8) as u8,
            column: (sq % 8) as u8,
        };
        sq += 1;
    }

    table
}

impl Square {
    /// Resolves the canonical square. Panics when either coordinate is outside `0..8`.
    #[inline]
    pub fn at(row: u8, column: u8) -> &'static Square {
        assert!(
            row < 8 && column < 8,
            "square ({row}, {column}) is off the board"
        );
        &SQUARES[row as usize * 8 + column as usize]
    }

    /// Like [`Square::at`] for signed coordinates, returning `None` off the board.
    #[inline]
    pub fn try_at(row: i8, column: i8) -> Option<&'static Square> {
        if (0..8).contains(&row) && (0..8).contains(&column) {
            Some(&SQUARES[row as usize * 8 + column as usize])
        } else {
            None
        }
    }

    #[inline]
    pub fn from_index(index: usize) -> &'static Square {
        &SQUARES[index]
    }

    #[inline]
    pub const fn row(&self) -> u8 {
        self.row
    }

    #[inline]
    pub const fn column(&self) -> u8 {
        self.column
    }

    /// Index into 64-entry tables, `row * 8 + column`.
    #[inline]
    pub const fn index(&self) -> usize {
        self.row as usize * 8 + self.column as usize
    }

    #[inline]
    pub const fn bit(&self) -> u64 {
        1u64 << self.index()
    }

    #[inline]
    pub fn offset(&self, d_row: i8, d_column: i8) -> Option<&'static Square> {
        Square::try_at(self.row as i8 + d_row, self.column as i8 + d_column)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&square_to_algebraic(self))
    }
}

#[cfg(test)]
mod tests {
    use super::{Square, SQUARES};

    #[test]
    fn resolving_a_square_twice_yields_the_same_instance() {
        for row in 0..8 {
            for column in 0..8 {
                let first = Square::at(row, column);
                let second = Square::at(row, column);
                assert!(std::ptr::eq(first, second));
                assert!(std::ptr::eq(first, Square::from_index(first.index())));
                assert_eq!((first.row(), first.column()), (row, column));
            }
        }
    }

    #[test]
    fn offsets_stay_on_the_board() {
        let a1 = Square::at(0, 0);
        assert_eq!(a1.offset(-1, 0), None);
        assert!(std::ptr::eq(a1.offset(1, 1).unwrap(), &SQUARES[9]));
        assert_eq!(Square::try_at(8, 0), None);
    }

    #[test]
    #[should_panic(expected = "off the board")]
    fn resolving_off_board_coordinates_panics() {
        let _ = Square::at(8, 3);
    }
}
