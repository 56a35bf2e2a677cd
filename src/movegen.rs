use crate::{
    attacks::{is_attacked, is_in_check},
    constants::{DIAGONAL_DIRECTIONS, KING_OFFSETS, KNIGHT_OFFSETS, ORTHOGONAL_DIRECTIONS},
    position::Position,
    types::{Move, Piece, Side, Square},
};

/// All legal moves for the side to move, in pseudo-legal enumeration order
/// (squares row-major, then the piece's offset order). Move ordering in the
/// search builds on this order being stable.
pub fn legal_moves(position: &mut Position) -> Vec<Move> {
    let side = position.side;
    let mut moves = pseudo_legal_moves(position);

    moves.retain(|&mv| {
        let undo = position.make_move(mv);
        let legal = !is_in_check(position, side);
        position.unmake_move(mv, undo);
        legal
    });

    moves
}

pub fn pseudo_legal_moves(position: &Position) -> Vec<Move> {
    let mut moves = Vec::with_capacity(48);
    let side = position.side;

    for square in Square::iter() {
        if position.side_at(square) != Some(side) {
            continue;
        }

        match position.piece_at(square) {
            Piece::Pawn => pawn_moves(position, square, &mut moves),
            Piece::Knight => offset_moves(position, square, &KNIGHT_OFFSETS, &mut moves),
            Piece::Bishop => ray_moves(position, square, &DIAGONAL_DIRECTIONS, &mut moves),
            Piece::Rook => ray_moves(position, square, &ORTHOGONAL_DIRECTIONS, &mut moves),
            Piece::Queen => {
                ray_moves(position, square, &ORTHOGONAL_DIRECTIONS, &mut moves);
                ray_moves(position, square, &DIAGONAL_DIRECTIONS, &mut moves);
            }
            Piece::King => {
                offset_moves(position, square, &KING_OFFSETS, &mut moves);
                castling_moves(position, square, &mut moves);
            }
            Piece::Empty => {}
        }
    }

    moves
}

/// A pawn move onto the last rank expands into the four promotions.
fn push_pawn_move(side: Side, from: Square, to: Square, moves: &mut Vec<Move>) {
    if to.row() == side.promotion_row() {
        for promote in [Piece::Queen, Piece::Rook, Piece::Bishop, Piece::Knight] {
            moves.push(Move::promotion(from, to, promote));
        }
    } else {
        moves.push(Move::new(from, to));
    }
}

fn pawn_moves(position: &Position, from: Square, moves: &mut Vec<Move>) {
    let side = position.color[from.index()].expect("pawn square is occupied");
    let forward = side.forward();

    if let Some(one_up) = from.offset(forward, 0) {
        if position.piece_at(one_up) == Piece::Empty {
            push_pawn_move(side, from, one_up, moves);

            // Two squares, only from the home rank and only through air.
            if from.row() == side.pawn_start_row() {
                if let Some(two_up) = from.offset(2 * forward, 0) {
                    if position.piece_at(two_up) == Piece::Empty {
                        moves.push(Move::new(from, two_up));
                    }
                }
            }
        }
    }

    for d_col in [-1, 1] {
        if let Some(target) = from.offset(forward, d_col) {
            let occupant = position.piece_at(target);

            if occupant != Piece::Empty && position.side_at(target) != Some(side) {
                push_pawn_move(side, from, target, moves);
            } else if occupant == Piece::Empty && position.en_passant == Some(target) {
                moves.push(Move::new(from, target));
            }
        }
    }
}

fn offset_moves(
    position: &Position,
    from: Square,
    offsets: &[(i32, i32)],
    moves: &mut Vec<Move>,
) {
    let side = position.color[from.index()].expect("source square is occupied");

    for &(d_row, d_col) in offsets {
        if let Some(to) = from.offset(d_row, d_col) {
            if position.side_at(to) != Some(side) {
                moves.push(Move::new(from, to));
            }
        }
    }
}

fn ray_moves(
    position: &Position,
    from: Square,
    directions: &[(i32, i32)],
    moves: &mut Vec<Move>,
) {
    let side = position.color[from.index()].expect("source square is occupied");

    for &(d_row, d_col) in directions {
        let mut square = from;

        while let Some(to) = square.offset(d_row, d_col) {
            square = to;

            match position.side_at(to) {
                None => moves.push(Move::new(from, to)),
                Some(occupant_side) => {
                    if occupant_side != side {
                        moves.push(Move::new(from, to));
                    }

                    break;
                }
            }
        }
    }
}

/// Castling needs the right, empty squares between king and rook, and the
/// king's start, pass-through and destination squares all unattacked.
fn castling_moves(position: &Position, from: Square, moves: &mut Vec<Move>) {
    let side = position.color[from.index()].expect("king square is occupied");
    let row = side.back_row();

    if from != Square::from_row_col(row, 4) {
        return;
    }

    let enemy = side.opponent();

    let (kingside_right, queenside_right) = match side {
        Side::White => (0b0001, 0b0010),
        Side::Black => (0b0100, 0b1000),
    };

    if position.castle & kingside_right != 0 {
        let f_square = Square::from_row_col(row, 5);
        let g_square = Square::from_row_col(row, 6);

        if position.piece_at(f_square) == Piece::Empty
            && position.piece_at(g_square) == Piece::Empty
            && !is_attacked(position, from, enemy)
            && !is_attacked(position, f_square, enemy)
            && !is_attacked(position, g_square, enemy)
        {
            moves.push(Move::new(from, g_square));
        }
    }

    if position.castle & queenside_right != 0 {
        let d_square = Square::from_row_col(row, 3);
        let c_square = Square::from_row_col(row, 2);
        let b_square = Square::from_row_col(row, 1);

        if position.piece_at(d_square) == Piece::Empty
            && position.piece_at(c_square) == Piece::Empty
            && position.piece_at(b_square) == Piece::Empty
            && !is_attacked(position, from, enemy)
            && !is_attacked(position, d_square, enemy)
            && !is_attacked(position, c_square, enemy)
        {
            moves.push(Move::new(from, c_square));
        }
    }
}

/// Count of leaf positions reachable in exactly `depth` plies of legal play.
pub fn perft(position: &mut Position, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let mut nodes = 0;

    for mv in legal_moves(position) {
        let undo = position.make_move(mv);
        nodes += perft(position, depth - 1);
        position.unmake_move(mv, undo);
    }

    nodes
}
