use crate::{
    constants::{COLUMN, NUM_FILES, ROW},
    types::Square,
};

impl Square {
    #[rustfmt::skip]
    pub fn iter() -> impl Iterator<Item = Square> {
        [
            Square::A1, Square::B1, Square::C1, Square::D1, Square::E1, Square::F1, Square::G1, Square::H1,
            Square::A2, Square::B2, Square::C2, Square::D2, Square::E2, Square::F2, Square::G2, Square::H2,
            Square::A3, Square::B3, Square::C3, Square::D3, Square::E3, Square::F3, Square::G3, Square::H3,
            Square::A4, Square::B4, Square::C4, Square::D4, Square::E4, Square::F4, Square::G4, Square::H4,
            Square::A5, Square::B5, Square::C5, Square::D5, Square::E5, Square::F5, Square::G5, Square::H5,
            Square::A6, Square::B6, Square::C6, Square::D6, Square::E6, Square::F6, Square::G6, Square::H6,
            Square::A7, Square::B7, Square::C7, Square::D7, Square::E7, Square::F7, Square::G7, Square::H7,
            Square::A8, Square::B8, Square::C8, Square::D8, Square::E8, Square::F8, Square::G8, Square::H8,
        ].into_iter()
    }

    /// 0-indexed (0-7); row 0 is White's back rank
    pub fn row(self) -> u8 {
        ROW[self as usize]
    }

    /// 0-indexed (0-7); column 0 is file `a`
    pub fn col(self) -> u8 {
        COLUMN[self as usize]
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Rows and columns must be in 0-7; movement code bounds-checks before
    /// calling this.
    pub fn from_row_col(row: u8, col: u8) -> Square {
        debug_assert!(row < 8 && col < 8);

        // SAFETY: row*8+col is in range 0-63, which matches the enum variants
        unsafe { std::mem::transmute::<u8, Square>(row * NUM_FILES as u8 + col) }
    }

    /// The square shifted by (row, column) deltas, or None if off the board.
    pub fn offset(self, d_row: i32, d_col: i32) -> Option<Square> {
        let row = self.row() as i32 + d_row;
        let col = self.col() as i32 + d_col;

        if (0..8).contains(&row) && (0..8).contains(&col) {
            Some(Square::from_row_col(row as u8, col as u8))
        } else {
            None
        }
    }
}

impl TryFrom<u8> for Square {
    type Error = &'static str;

    /// Converts from a number representing the square index
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if value > 63 {
            return Err("Square index out of range (must be 0-63)");
        }

        // SAFETY: We've verified value is in range 0-63, which matches our enum variants
        Ok(unsafe { std::mem::transmute::<u8, Square>(value) })
    }
}
