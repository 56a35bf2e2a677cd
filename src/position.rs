use std::fmt;

use crate::{
    constants::{CASTLE_MASK, INIT_BOARD, INIT_COLOR, NUM_SQUARES},
    error::EngineError,
    types::{Move, NullUndo, Piece, Side, Square, Undo},
    zobrist,
};

/// The one live position. Mutated in place by make/unmake; the search
/// guarantees every make is paired with an unmake on all control paths.
pub struct Position {
    /// Piece kind per square; `Piece::Empty` for vacant squares.
    pub value: [Piece; NUM_SQUARES],
    /// Owning side per square; `None` for vacant squares.
    pub color: [Option<Side>; NUM_SQUARES],
    /// Side to move.
    pub side: Side,
    /// Castle permissions: bit 0 WK, bit 1 WQ, bit 2 BK, bit 3 BQ.
    pub castle: u8,
    /// The square a double pawn push passed over, if the last move was one.
    pub en_passant: Option<Square>,
    /// Incrementally maintained Zobrist fingerprint.
    pub hash: u64,
}

impl Position {
    pub fn empty() -> Self {
        Self {
            value: [Piece::Empty; NUM_SQUARES],
            color: [None; NUM_SQUARES],
            side: Side::White,
            castle: 0,
            en_passant: None,
            hash: 0,
        }
    }

    /// The standard starting arrangement, White to move, all four castle
    /// rights available.
    pub fn starting() -> Self {
        let mut position = Self::empty();

        for square in 0..NUM_SQUARES {
            if INIT_BOARD[square] < 6 {
                position.value[square] =
                    Piece::try_from(INIT_BOARD[square]).expect("starting board table is valid");
                position.color[square] =
                    Some(Side::try_from(INIT_COLOR[square]).expect("starting color table is valid"));
            }
        }

        position.castle = 0b1111;
        position.hash = zobrist::compute(&position);
        position
    }

    /// Parse the first four FEN fields (placement, side, castling,
    /// en passant). Move counters are accepted and ignored.
    pub fn from_fen(fen: &str) -> Result<Self, EngineError> {
        let mut fields = fen.split_whitespace();

        let placement = fields
            .next()
            .ok_or_else(|| EngineError::InvalidFen(fen.to_string()))?;

        let mut position = Self::empty();
        let mut row: i32 = 7;
        let mut col: i32 = 0;

        for ch in placement.chars() {
            match ch {
                '/' => {
                    row -= 1;
                    col = 0;
                }
                '1'..='8' => col += ch as i32 - '0' as i32,
                _ => {
                    let piece = Piece::from_letter(ch)
                        .ok_or_else(|| EngineError::InvalidFen(fen.to_string()))?;

                    if !(0..8).contains(&row) || !(0..8).contains(&col) {
                        return Err(EngineError::InvalidFen(fen.to_string()));
                    }

                    let side = if ch.is_ascii_uppercase() {
                        Side::White
                    } else {
                        Side::Black
                    };

                    let square = Square::from_row_col(row as u8, col as u8).index();
                    position.value[square] = piece;
                    position.color[square] = Some(side);
                    col += 1;
                }
            }
        }

        position.side = match fields.next() {
            Some("w") | None => Side::White,
            Some("b") => Side::Black,
            Some(other) => return Err(EngineError::InvalidFen(other.to_string())),
        };

        if let Some(castling) = fields.next() {
            for ch in castling.chars() {
                match ch {
                    'K' => position.castle |= 0b0001,
                    'Q' => position.castle |= 0b0010,
                    'k' => position.castle |= 0b0100,
                    'q' => position.castle |= 0b1000,
                    '-' => {}
                    _ => return Err(EngineError::InvalidFen(fen.to_string())),
                }
            }
        }

        match fields.next() {
            Some("-") | None => {}
            Some(target) => {
                let bytes = target.as_bytes();

                if bytes.len() != 2
                    || bytes[0].wrapping_sub(b'a') >= 8
                    || bytes[1].wrapping_sub(b'1') >= 8
                {
                    return Err(EngineError::InvalidFen(fen.to_string()));
                }

                position.en_passant =
                    Some(Square::from_row_col(bytes[1] - b'1', bytes[0] - b'a'));
            }
        }

        position.hash = zobrist::compute(&position);
        Ok(position)
    }

    pub fn piece_at(&self, square: Square) -> Piece {
        self.value[square.index()]
    }

    pub fn side_at(&self, square: Square) -> Option<Side> {
        self.color[square.index()]
    }

    pub fn king_square(&self, side: Side) -> Square {
        for square in Square::iter() {
            if self.value[square.index()] == Piece::King
                && self.color[square.index()] == Some(side)
            {
                return square;
            }
        }

        unreachable!("each side always has exactly one king")
    }

    /// Whether `side` still owns a knight, bishop, rook or queen. Null-move
    /// pruning is unsound without one (zugzwang).
    pub fn has_non_pawn_piece(&self, side: Side) -> bool {
        (0..NUM_SQUARES).any(|square| {
            self.color[square] == Some(side)
                && matches!(
                    self.value[square],
                    Piece::Knight | Piece::Bishop | Piece::Rook | Piece::Queen
                )
        })
    }

    /// Whether the move takes a piece, counting en passant (whose
    /// destination square is empty).
    pub fn is_capture(&self, mv: Move) -> bool {
        if self.value[mv.to.index()] != Piece::Empty {
            return true;
        }

        self.value[mv.from.index()] == Piece::Pawn
            && mv.from.col() != mv.to.col()
            && self.en_passant == Some(mv.to)
    }

    fn place_piece(&mut self, square: Square, piece: Piece, side: Side) {
        self.value[square.index()] = piece;
        self.color[square.index()] = Some(side);
        self.hash ^= zobrist::keys().piece[side as usize][piece as usize][square.index()];
    }

    fn remove_piece(&mut self, square: Square) {
        let piece = self.value[square.index()];

        if let Some(side) = self.color[square.index()] {
            self.hash ^= zobrist::keys().piece[side as usize][piece as usize][square.index()];
        }

        self.value[square.index()] = Piece::Empty;
        self.color[square.index()] = None;
    }

    /// Grid write without touching the hash; unmake restores the prior
    /// hash verbatim from the undo record.
    fn set_raw(&mut self, square: Square, piece: Piece, side: Option<Side>) {
        self.value[square.index()] = piece;
        self.color[square.index()] = side;
    }

    /// Apply a move in place and return the undo record that reverses it.
    ///
    /// The caller must only pass moves produced by the move generator for
    /// this position.
    pub fn make_move(&mut self, mv: Move) -> Undo {
        let keys = zobrist::keys();

        let mut undo = Undo {
            capture: self.value[mv.to.index()],
            moved: self.value[mv.from.index()],
            castle: self.castle,
            side: self.side,
            en_passant: self.en_passant,
            en_passant_capture: false,
            hash: self.hash,
        };

        let mover = self.side;

        if let Some(target) = self.en_passant.take() {
            self.hash ^= keys.en_passant[target.col() as usize];
        }

        self.hash ^= keys.castling[self.castle as usize];

        // A pawn landing diagonally on an empty square that equals the prior
        // en-passant target takes the pawn beside the destination.
        if undo.moved == Piece::Pawn
            && mv.from.col() != mv.to.col()
            && undo.capture == Piece::Empty
            && undo.en_passant == Some(mv.to)
        {
            let victim = Square::from_row_col(mv.from.row(), mv.to.col());
            self.remove_piece(victim);
            undo.en_passant_capture = true;
        }

        if undo.capture != Piece::Empty {
            self.remove_piece(mv.to);
        }

        let mut placed = undo.moved;

        if undo.moved == Piece::Pawn && mv.to.row() == mover.promotion_row() {
            if let Some(promote) = mv.promote {
                placed = promote;
            }
        }

        // Covers king moves, rook moves off a home corner, and a rook being
        // captured on one.
        self.castle &= CASTLE_MASK[mv.from.index()] & CASTLE_MASK[mv.to.index()];

        // Castling: the king travels two files; bring the rook across.
        if undo.moved == Piece::King && mv.from.col().abs_diff(mv.to.col()) == 2 {
            let row = mv.from.row();

            let (rook_from, rook_to) = if mv.to.col() == 6 {
                (Square::from_row_col(row, 7), Square::from_row_col(row, 5))
            } else {
                (Square::from_row_col(row, 0), Square::from_row_col(row, 3))
            };

            self.remove_piece(rook_from);
            self.place_piece(rook_to, Piece::Rook, mover);
        }

        if undo.moved == Piece::Pawn && mv.from.row().abs_diff(mv.to.row()) == 2 {
            let passed_row = (mv.from.row() + mv.to.row()) / 2;
            self.en_passant = Some(Square::from_row_col(passed_row, mv.from.col()));
        }

        self.remove_piece(mv.from);
        self.place_piece(mv.to, placed, mover);

        self.hash ^= keys.castling[self.castle as usize];

        if let Some(target) = self.en_passant {
            self.hash ^= keys.en_passant[target.col() as usize];
        }

        self.hash ^= keys.side;
        self.side = mover.opponent();

        undo
    }

    /// Exact inverse of `make_move`, driven by the undo record. Must be
    /// called with the same move, in LIFO order.
    pub fn unmake_move(&mut self, mv: Move, undo: Undo) {
        let mover = undo.side;

        self.side = undo.side;
        self.castle = undo.castle;
        self.en_passant = undo.en_passant;

        // Lift the piece off the destination and put the original kind back
        // on the source; this reverses promotion.
        self.set_raw(mv.to, Piece::Empty, None);
        self.set_raw(mv.from, undo.moved, Some(mover));

        if undo.moved == Piece::King && mv.from.col().abs_diff(mv.to.col()) == 2 {
            let row = mv.from.row();

            let (rook_from, rook_to) = if mv.to.col() == 6 {
                (Square::from_row_col(row, 7), Square::from_row_col(row, 5))
            } else {
                (Square::from_row_col(row, 0), Square::from_row_col(row, 3))
            };

            self.set_raw(rook_to, Piece::Empty, None);
            self.set_raw(rook_from, Piece::Rook, Some(mover));
        }

        if undo.en_passant_capture {
            let victim = Square::from_row_col(mv.from.row(), mv.to.col());
            self.set_raw(victim, Piece::Pawn, Some(mover.opponent()));
        } else if undo.capture != Piece::Empty {
            self.set_raw(mv.to, undo.capture, Some(mover.opponent()));
        }

        self.hash = undo.hash;
    }

    /// Conceptually pass the move: flip the side, clear the en-passant
    /// target, keep everything else.
    pub fn make_null_move(&mut self) -> NullUndo {
        let keys = zobrist::keys();

        let undo = NullUndo {
            en_passant: self.en_passant,
            hash: self.hash,
        };

        if let Some(target) = self.en_passant.take() {
            self.hash ^= keys.en_passant[target.col() as usize];
        }

        self.hash ^= keys.side;
        self.side = self.side.opponent();

        undo
    }

    pub fn unmake_null_move(&mut self, undo: NullUndo) {
        self.side = self.side.opponent();
        self.en_passant = undo.en_passant;
        self.hash = undo.hash;
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (0..8).rev() {
            write!(f, "{} ", row + 1)?;

            for col in 0..8 {
                let square = Square::from_row_col(row, col).index();
                let letter = match self.color[square] {
                    Some(Side::White) => self.value[square].letter(),
                    Some(Side::Black) => self.value[square].letter().to_ascii_lowercase(),
                    None => '.',
                };

                write!(f, "{letter} ")?;
            }

            writeln!(f)?;
        }

        write!(f, "  a b c d e f g h")
    }
}
