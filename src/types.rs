use crate::error::EngineError;

#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[rustfmt::skip]
pub enum Square {
  A1 = 0, B1, C1, D1, E1, F1, G1, H1,
  A2, B2, C2, D2, E2, F2, G2, H2,
  A3, B3, C3, D3, E3, F3, G3, H3,
  A4, B4, C4, D4, E4, F4, G4, H4,
  A5, B5, C5, D5, E5, F5, G5, H5,
  A6, B6, C6, D6, E6, F6, G6, H6,
  A7, B7, C7, D7, E7, F7, G7, H7,
  A8, B8, C8, D8, E8, F8, G8, H8,
}

#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Piece {
    Pawn = 0,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
    Empty,
}

#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Side {
    White = 0,
    Black = 1,
}

impl Side {
    pub fn iter() -> impl Iterator<Item = Side> {
        [Side::White, Side::Black].into_iter()
    }

    pub fn opponent(self) -> Side {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }

    /// Pawn-advance direction as a row delta.
    pub fn forward(self) -> i32 {
        match self {
            Side::White => 1,
            Side::Black => -1,
        }
    }

    /// Pawn home rank (the rank a double push starts from).
    pub fn pawn_start_row(self) -> u8 {
        match self {
            Side::White => 1,
            Side::Black => 6,
        }
    }

    /// The rank a pawn promotes on.
    pub fn promotion_row(self) -> u8 {
        match self {
            Side::White => 7,
            Side::Black => 0,
        }
    }

    pub fn back_row(self) -> u8 {
        match self {
            Side::White => 0,
            Side::Black => 7,
        }
    }
}

impl TryFrom<u8> for Side {
    type Error = &'static str;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if value > 1 {
            return Err("Side index out of range (must be 0-1)");
        }

        Ok(unsafe { std::mem::transmute::<u8, Side>(value) })
    }
}

/// A move instruction. The effect (capture, castling, en passant) is
/// inferred from the position at make time.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub promote: Option<Piece>,
}

impl Move {
    pub fn new(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            promote: None,
        }
    }

    pub fn promotion(from: Square, to: Square, promote: Piece) -> Self {
        Self {
            from,
            to,
            promote: Some(promote),
        }
    }

    /// Parse long algebraic notation, e.g. "e2e4" or "e7e8q".
    pub fn from_text(text: &str) -> Result<Move, EngineError> {
        let bytes = text.as_bytes();

        if bytes.len() < 4 || bytes.len() > 5 {
            return Err(EngineError::InvalidMoveText(text.to_string()));
        }

        let in_range = bytes[0].wrapping_sub(b'a') < 8
            && bytes[1].wrapping_sub(b'1') < 8
            && bytes[2].wrapping_sub(b'a') < 8
            && bytes[3].wrapping_sub(b'1') < 8;

        if !in_range {
            return Err(EngineError::InvalidMoveText(text.to_string()));
        }

        let from_col = bytes[0] - b'a';
        let from_row = bytes[1] - b'1';
        let to_col = bytes[2] - b'a';
        let to_row = bytes[3] - b'1';

        let promote = if bytes.len() == 5 {
            match bytes[4] {
                b'q' => Some(Piece::Queen),
                b'r' => Some(Piece::Rook),
                b'b' => Some(Piece::Bishop),
                b'n' => Some(Piece::Knight),
                _ => return Err(EngineError::InvalidMoveText(text.to_string())),
            }
        } else {
            None
        };

        Ok(Move {
            from: Square::from_row_col(from_row, from_col),
            to: Square::from_row_col(to_row, to_col),
            promote,
        })
    }

    /// Long algebraic notation, e.g. "e2e4" or "e7e8q".
    pub fn text(&self) -> String {
        let mut result = format!(
            "{}{}{}{}",
            (self.from.col() + b'a') as char,
            (self.from.row() + b'1') as char,
            (self.to.col() + b'a') as char,
            (self.to.row() + b'1') as char,
        );

        if let Some(piece) = self.promote {
            result.push(match piece {
                Piece::Knight => 'n',
                Piece::Bishop => 'b',
                Piece::Rook => 'r',
                _ => 'q',
            });
        }

        result
    }
}

/// Everything `unmake_move` needs to restore the previous position exactly.
#[derive(Copy, Clone, Debug)]
pub struct Undo {
    /// Occupant of the destination square before the move (can be `Empty`).
    pub capture: Piece,
    /// Kind of the moving piece before any promotion.
    pub moved: Piece,
    /// Castle permissions before the move.
    pub castle: u8,
    /// Side to move before the move.
    pub side: Side,
    /// En-passant target before the move.
    pub en_passant: Option<Square>,
    /// The move was an en-passant capture; the victim sits beside the
    /// destination, not on it.
    pub en_passant_capture: bool,
    /// Zobrist key before the move, restored verbatim.
    pub hash: u64,
}

/// Restoration record for a null move (a conceptual pass).
#[derive(Copy, Clone, Debug)]
pub struct NullUndo {
    pub en_passant: Option<Square>,
    pub hash: u64,
}
