use crate::{
    constants::{DIAGONAL_DIRECTIONS, KING_OFFSETS, KNIGHT_OFFSETS, ORTHOGONAL_DIRECTIONS},
    position::Position,
    types::{Piece, Side, Square},
};

/// Whether any piece of `by` pseudo-attacks the square, regardless of whose
/// move it is or of pins.
pub fn is_attacked(position: &Position, target: Square, by: Side) -> bool {
    // Pawns attack from the rank behind the target, relative to their motion.
    let pawn_row = target.row() as i32 - by.forward();

    for d_col in [-1, 1] {
        let col = target.col() as i32 + d_col;

        if (0..8).contains(&pawn_row) && (0..8).contains(&col) {
            let square = Square::from_row_col(pawn_row as u8, col as u8);

            if position.piece_at(square) == Piece::Pawn && position.side_at(square) == Some(by) {
                return true;
            }
        }
    }

    for (d_row, d_col) in KNIGHT_OFFSETS {
        if let Some(square) = target.offset(d_row, d_col) {
            if position.piece_at(square) == Piece::Knight && position.side_at(square) == Some(by) {
                return true;
            }
        }
    }

    // Diagonal rays: bishop or queen, stopping at the first occupied square.
    for (d_row, d_col) in DIAGONAL_DIRECTIONS {
        let mut square = target;

        while let Some(next) = square.offset(d_row, d_col) {
            square = next;
            let piece = position.piece_at(square);

            if piece != Piece::Empty {
                if position.side_at(square) == Some(by)
                    && matches!(piece, Piece::Bishop | Piece::Queen)
                {
                    return true;
                }

                break;
            }
        }
    }

    // Orthogonal rays: rook or queen.
    for (d_row, d_col) in ORTHOGONAL_DIRECTIONS {
        let mut square = target;

        while let Some(next) = square.offset(d_row, d_col) {
            square = next;
            let piece = position.piece_at(square);

            if piece != Piece::Empty {
                if position.side_at(square) == Some(by)
                    && matches!(piece, Piece::Rook | Piece::Queen)
                {
                    return true;
                }

                break;
            }
        }
    }

    for (d_row, d_col) in KING_OFFSETS {
        if let Some(square) = target.offset(d_row, d_col) {
            if position.piece_at(square) == Piece::King && position.side_at(square) == Some(by) {
                return true;
            }
        }
    }

    false
}

pub fn is_in_check(position: &Position, side: Side) -> bool {
    is_attacked(position, position.king_square(side), side.opponent())
}

/// Whether the piece standing on `from` pseudo-attacks `target`.
pub fn piece_attacks(position: &Position, from: Square, target: Square) -> bool {
    if from == target {
        return false;
    }

    let d_row = target.row() as i32 - from.row() as i32;
    let d_col = target.col() as i32 - from.col() as i32;

    match position.piece_at(from) {
        Piece::Pawn => {
            let side = match position.side_at(from) {
                Some(side) => side,
                None => return false,
            };

            d_row == side.forward() && d_col.abs() == 1
        }
        Piece::Knight => (d_row.abs() == 2 && d_col.abs() == 1) || (d_row.abs() == 1 && d_col.abs() == 2),
        Piece::King => d_row.abs() <= 1 && d_col.abs() <= 1,
        Piece::Bishop => d_row.abs() == d_col.abs() && ray_is_clear(position, from, target),
        Piece::Rook => (d_row == 0 || d_col == 0) && ray_is_clear(position, from, target),
        Piece::Queen => {
            (d_row == 0 || d_col == 0 || d_row.abs() == d_col.abs())
                && ray_is_clear(position, from, target)
        }
        Piece::Empty => false,
    }
}

/// No occupied square strictly between two aligned squares.
pub fn ray_is_clear(position: &Position, from: Square, to: Square) -> bool {
    let d_row = (to.row() as i32 - from.row() as i32).signum();
    let d_col = (to.col() as i32 - from.col() as i32).signum();

    let mut square = from;

    while let Some(next) = square.offset(d_row, d_col) {
        if next == to {
            return true;
        }

        if position.piece_at(next) != Piece::Empty {
            return false;
        }

        square = next;
    }

    false
}
