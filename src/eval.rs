use crate::{
    attacks::{is_attacked, is_in_check, piece_attacks, ray_is_clear},
    constants::{
        BISHOP_PAIR_BONUS, BISHOP_SCORE, CHECK_GIVEN_BONUS, CONNECTED_ROOKS_BONUS,
        CORNER_KING_BONUS, DEVELOPED_MINOR_BONUS, DOUBLED_PAWN_PENALTY, DRAW_SCORE, ENDGAME_LEAD,
        ENDGAME_MATERIAL, FLIPPED_BOARD_SQUARE, IN_CHECK_PENALTY, KING_CENTRAL_PENALTY,
        KING_ENDGAME_SCORE, KING_NO_DEFENDERS_PENALTY, KING_NO_ESCAPE_PENALTY,
        KING_OFFSETS, KING_ONE_ESCAPE_PENALTY, KING_OPEN_FILE_PENALTY, KING_SCORE,
        KING_SEMI_OPEN_FILE_PENALTY, KING_ZONE_ATTACK_CAP, KING_ZONE_ATTACK_UNIT,
        KING_ZONE_WEIGHT, KNIGHT_SCORE, MATE_BASE,
        NUM_FILES, PASSED_BONUS, PASSED_DEFENDED_BONUS, PASSED_PATH_CLEAR_BONUS, PAWN_SCORE,
        PAWN_SHIELD_BONUS, PAWN_SHIELD_FAR_BONUS, PIECE_NEAR_ENEMY_KING_BONUS, QUEEN_ROOK_BATTERY_BONUS,
        QUEEN_SCORE, ROOK_OPEN_FILE_BONUS, ROOK_SCORE, ROOK_SEMI_OPEN_FILE_BONUS,
        ROOK_SEVENTH_BONUS, UNDEVELOPED_MINOR_PENALTY,
    },
    position::Position,
    types::{Piece, Side, Square},
};

/// Static score in centipawns, positive favouring White.
pub fn evaluate(position: &Position) -> i32 {
    let white = SideEval::collect(position, Side::White);
    let black = SideEval::collect(position, Side::Black);

    let endgame = white.non_pawn_material + black.non_pawn_material < ENDGAME_MATERIAL;

    let mut score = side_score(position, &white, &black, endgame)
        - side_score(position, &black, &white, endgame);

    if endgame {
        let white_total = white.material();
        let black_total = black.material();

        if white_total - black_total > ENDGAME_LEAD {
            score += mating_drive(white.king, black.king);
        } else if black_total - white_total > ENDGAME_LEAD {
            score -= mating_drive(black.king, white.king);
        }
    }

    // The side not to move is never in check, so at most one side is.
    if is_in_check(position, position.side) {
        let swing = CHECK_GIVEN_BONUS + IN_CHECK_PENALTY;

        score += match position.side {
            Side::White => -swing,
            Side::Black => swing,
        };
    }

    score
}

/// The evaluator seen from the side to move, as negamax wants it.
pub fn evaluate_for_side(position: &Position) -> i32 {
    match position.side {
        Side::White => evaluate(position),
        Side::Black => -evaluate(position),
    }
}

/// Score for a position with no legal moves: mated or stalemated. The ply
/// term makes shorter forced mates larger in absolute value.
pub fn evaluate_terminal(position: &Position, ply: usize) -> i32 {
    if is_in_check(position, position.side) {
        -(MATE_BASE - ply as i32)
    } else {
        DRAW_SCORE
    }
}

/// Per-side piece census gathered in one board sweep.
struct SideEval {
    side: Side,
    pawn_files: [i32; NUM_FILES],
    pawns: Vec<Square>,
    knights: Vec<Square>,
    bishops: Vec<Square>,
    rooks: Vec<Square>,
    queens: Vec<Square>,
    king: Square,
    pawn_material: i32,
    non_pawn_material: i32,
    /// Material plus piece-square bonuses for everything but the king.
    piece_score: i32,
}

impl SideEval {
    fn collect(position: &Position, side: Side) -> Self {
        let mut eval = Self {
            side,
            pawn_files: [0; NUM_FILES],
            pawns: Vec::with_capacity(8),
            knights: Vec::with_capacity(2),
            bishops: Vec::with_capacity(2),
            rooks: Vec::with_capacity(2),
            queens: Vec::with_capacity(1),
            king: Square::A1,
            pawn_material: 0,
            non_pawn_material: 0,
            piece_score: 0,
        };

        for square in Square::iter() {
            if position.side_at(square) != Some(side) {
                continue;
            }

            let piece = position.piece_at(square);
            let table_index = match side {
                Side::White => square.index(),
                Side::Black => FLIPPED_BOARD_SQUARE[square.index()] as usize,
            };

            match piece {
                Piece::Pawn => {
                    eval.pawn_files[square.col() as usize] += 1;
                    eval.pawns.push(square);
                    eval.pawn_material += piece.value();
                    eval.piece_score += piece.value() + PAWN_SCORE[table_index];
                }
                Piece::Knight => {
                    eval.knights.push(square);
                    eval.non_pawn_material += piece.value();
                    eval.piece_score += piece.value() + KNIGHT_SCORE[table_index];
                }
                Piece::Bishop => {
                    eval.bishops.push(square);
                    eval.non_pawn_material += piece.value();
                    eval.piece_score += piece.value() + BISHOP_SCORE[table_index];
                }
                Piece::Rook => {
                    eval.rooks.push(square);
                    eval.non_pawn_material += piece.value();
                    eval.piece_score += piece.value() + ROOK_SCORE[table_index];
                }
                Piece::Queen => {
                    eval.queens.push(square);
                    eval.non_pawn_material += piece.value();
                    eval.piece_score += piece.value() + QUEEN_SCORE[table_index];
                }
                Piece::King => eval.king = square,
                Piece::Empty => {}
            }
        }

        eval
    }

    fn material(&self) -> i32 {
        self.pawn_material + self.non_pawn_material
    }

    /// Rank from this side's own perspective (0 = back rank).
    fn relative_row(&self, square: Square) -> usize {
        match self.side {
            Side::White => square.row() as usize,
            Side::Black => 7 - square.row() as usize,
        }
    }

    fn minor_pieces(&self) -> impl Iterator<Item = Square> + '_ {
        self.knights.iter().chain(self.bishops.iter()).copied()
    }

    fn heavy_and_minor_pieces(&self) -> impl Iterator<Item = Square> + '_ {
        self.knights
            .iter()
            .chain(self.bishops.iter())
            .chain(self.rooks.iter())
            .chain(self.queens.iter())
            .copied()
    }
}

fn side_score(position: &Position, own: &SideEval, enemy: &SideEval, endgame: bool) -> i32 {
    let mut score = own.piece_score;

    let king_index = match own.side {
        Side::White => own.king.index(),
        Side::Black => FLIPPED_BOARD_SQUARE[own.king.index()] as usize,
    };

    score += if endgame {
        KING_ENDGAME_SCORE[king_index]
    } else {
        KING_SCORE[king_index]
    };

    score += pawn_structure(position, own, enemy);
    score += piece_placement(position, own, enemy);

    if !endgame {
        score += king_safety(position, own, enemy);
        score += activity(own, enemy);
    }

    score
}

fn pawn_structure(position: &Position, own: &SideEval, enemy: &SideEval) -> i32 {
    let mut score = 0;

    for file in 0..NUM_FILES {
        if own.pawn_files[file] > 1 {
            score -= (own.pawn_files[file] - 1) * DOUBLED_PAWN_PENALTY;
        }
    }

    let forward = own.side.forward();

    for &pawn in &own.pawns {
        if !is_passed(own, enemy, pawn) {
            continue;
        }

        score += PASSED_BONUS[own.relative_row(pawn)];

        if promotion_path_clear(position, own.side, pawn) {
            score += PASSED_PATH_CLEAR_BONUS;
        }

        // A friendly pawn one step behind on an adjacent file guards it.
        let defended = [-1, 1].iter().any(|&d_col| {
            pawn.offset(-forward, d_col).is_some_and(|square| {
                position.piece_at(square) == Piece::Pawn
                    && position.side_at(square) == Some(own.side)
            })
        });

        if defended {
            score += PASSED_DEFENDED_BONUS;
        }
    }

    score
}

/// No enemy pawn on this file or either adjacent file, ahead of the pawn.
fn is_passed(own: &SideEval, enemy: &SideEval, pawn: Square) -> bool {
    let pawn_col = pawn.col() as i32;

    enemy.pawns.iter().all(|&other| {
        let col_gap = (other.col() as i32 - pawn_col).abs();

        if col_gap > 1 {
            return true;
        }

        match own.side {
            Side::White => other.row() <= pawn.row(),
            Side::Black => other.row() >= pawn.row(),
        }
    })
}

fn promotion_path_clear(position: &Position, side: Side, pawn: Square) -> bool {
    let forward = side.forward();
    let mut square = pawn;

    while let Some(next) = square.offset(forward, 0) {
        if position.piece_at(next) != Piece::Empty {
            return false;
        }

        square = next;
    }

    true
}

fn piece_placement(position: &Position, own: &SideEval, enemy: &SideEval) -> i32 {
    let mut score = 0;

    if own.bishops.len() >= 2 {
        score += BISHOP_PAIR_BONUS;
    }

    for &rook in &own.rooks {
        let file = rook.col() as usize;

        if own.pawn_files[file] == 0 {
            score += if enemy.pawn_files[file] == 0 {
                ROOK_OPEN_FILE_BONUS
            } else {
                ROOK_SEMI_OPEN_FILE_BONUS
            };
        }

        if own.relative_row(rook) == 6 {
            score += ROOK_SEVENTH_BONUS;
        }
    }

    if own.rooks.len() >= 2 {
        let (first, second) = (own.rooks[0], own.rooks[1]);

        if (first.row() == second.row() || first.col() == second.col())
            && ray_is_clear(position, first, second)
        {
            score += CONNECTED_ROOKS_BONUS;
        }
    }

    'battery: for &queen in &own.queens {
        for &rook in &own.rooks {
            let aligned = queen.row() == rook.row() || queen.col() == rook.col();

            if aligned && ray_is_clear(position, queen, rook) {
                score += QUEEN_ROOK_BATTERY_BONUS;
                break 'battery;
            }
        }
    }

    let back = own.side.back_row();

    for &knight in &own.knights {
        if knight == Square::from_row_col(back, 1) || knight == Square::from_row_col(back, 6) {
            score -= UNDEVELOPED_MINOR_PENALTY;
        }
    }

    for &bishop in &own.bishops {
        if bishop == Square::from_row_col(back, 2) || bishop == Square::from_row_col(back, 5) {
            score -= UNDEVELOPED_MINOR_PENALTY;
        }
    }

    for minor in own.minor_pieces() {
        if minor.row() != back {
            score += DEVELOPED_MINOR_BONUS;
        }
    }

    score
}

fn king_safety(position: &Position, own: &SideEval, enemy: &SideEval) -> i32 {
    let mut score = 0;

    let king = own.king;
    let king_col = king.col() as i32;
    let forward = own.side.forward();

    // Pawn shield in front of a castled king; a pawn one square advanced
    // still counts, for less.
    if king_col <= 2 || king_col >= 5 {
        for d_col in -1..=1 {
            let col = king_col + d_col;

            if !(0..8).contains(&col) {
                continue;
            }

            let near = king.offset(forward, d_col);
            let far = king.offset(2 * forward, d_col);

            if near.is_some_and(|square| {
                position.piece_at(square) == Piece::Pawn
                    && position.side_at(square) == Some(own.side)
            }) {
                score += PAWN_SHIELD_BONUS;
            }

            if far.is_some_and(|square| {
                position.piece_at(square) == Piece::Pawn
                    && position.side_at(square) == Some(own.side)
            }) {
                score += PAWN_SHIELD_FAR_BONUS;
            }
        }
    }

    // Open and half-open files beside the king invite heavy pieces in.
    for d_col in -1..=1 {
        let col = king_col + d_col;

        if !(0..8).contains(&col) {
            continue;
        }

        let file = col as usize;

        if own.pawn_files[file] == 0 {
            score -= if enemy.pawn_files[file] == 0 {
                KING_OPEN_FILE_PENALTY
            } else {
                KING_SEMI_OPEN_FILE_PENALTY
            };
        }
    }

    if (3..=4).contains(&king_col) && own.relative_row(king) <= 1 {
        score -= KING_CENTRAL_PENALTY;
    }

    // Enemy pieces bearing on the 3x3 zone around the king, weighted by
    // attacker kind.
    let mut attack_units = 0;

    for attacker in enemy.heavy_and_minor_pieces() {
        let weight = KING_ZONE_WEIGHT[position.piece_at(attacker) as usize];

        for d_row in -1..=1 {
            for d_col in -1..=1 {
                if let Some(zone_square) = king.offset(d_row, d_col) {
                    if piece_attacks(position, attacker, zone_square) {
                        attack_units += weight;
                    }
                }
            }
        }
    }

    score -= (attack_units * KING_ZONE_ATTACK_UNIT).min(KING_ZONE_ATTACK_CAP);

    let escape_squares = KING_OFFSETS
        .iter()
        .filter_map(|&(d_row, d_col)| king.offset(d_row, d_col))
        .filter(|&square| {
            position.side_at(square) != Some(own.side)
                && !is_attacked(position, square, enemy.side)
        })
        .count();

    match escape_squares {
        0 => score -= KING_NO_ESCAPE_PENALTY,
        1 => score -= KING_ONE_ESCAPE_PENALTY,
        _ => {}
    }

    score
}

fn activity(own: &SideEval, enemy: &SideEval) -> i32 {
    let mut score = 0;

    for piece in own.heavy_and_minor_pieces() {
        if chebyshev(piece, enemy.king) <= 2 {
            score += PIECE_NEAR_ENEMY_KING_BONUS;
        }
    }

    let defenders = own
        .heavy_and_minor_pieces()
        .filter(|&piece| chebyshev(piece, own.king) <= 2)
        .count();

    if defenders == 0 {
        score -= KING_NO_DEFENDERS_PENALTY;
    }

    score
}

/// Reward herding the losing king toward a corner and marching the winning
/// king up to it.
fn mating_drive(winner_king: Square, loser_king: Square) -> i32 {
    let row = loser_king.row() as i32;
    let col = loser_king.col() as i32;

    // Chebyshev distance from the four centre squares.
    let row_distance = (3 - row).max(row - 4).max(0);
    let col_distance = (3 - col).max(col - 4).max(0);
    let centre_distance = row_distance.max(col_distance);

    let mut bonus = centre_distance * 10;
    bonus += (7 - chebyshev(winner_king, loser_king)) * 8;

    let on_corner = matches!(
        loser_king,
        Square::A1 | Square::H1 | Square::A8 | Square::H8
    );

    if on_corner {
        bonus += CORNER_KING_BONUS;
    }

    bonus
}

fn chebyshev(a: Square, b: Square) -> i32 {
    let d_row = (a.row() as i32 - b.row() as i32).abs();
    let d_col = (a.col() as i32 - b.col() as i32).abs();
    d_row.max(d_col)
}
