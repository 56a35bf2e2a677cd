/// NOTE: 1 ply = one move by a single player

pub const NUM_SQUARES: usize = 64;
pub const NUM_PIECE_TYPES: usize = 6;
pub const NUM_SIDES: usize = 2;
pub const NUM_RANKS: usize = 8;
pub const NUM_FILES: usize = 8;

/// Hard limit for search depth (in ply). Used to size arrays with per-depth information.
pub const MAX_PLY: usize = 64;

/// Depth cap handed to the iterative deepener by the driver.
pub const DEFAULT_MAX_DEPTH: u16 = 32;

// Time
pub const DEFAULT_MOVETIME_MS: u64 = 1000;

// Search
pub const INFINITY_SCORE: i32 = 1_000_000;
pub const MATE_BASE: i32 = 100_000;
/// Scores beyond this are treated as forced mates.
pub const MATE_RANGE: i32 = MATE_BASE - 1000;
pub const DRAW_SCORE: i32 = 0;
pub const CONTEMPT: i32 = 25;
pub const NULL_MIN_DEPTH: i32 = 3;
pub const NULL_REDUCTION: i32 = 3;
pub const QUIESCENCE_DEPTH: i32 = 8;
pub const ASPIRATION_MIN_DEPTH: u16 = 5;
pub const ASPIRATION_WINDOW: i32 = 50;
pub const MAX_HISTORY_SCORE: i32 = 10_000;

// Move ordering
pub const PROMOTION_ORDER_SCORE: i32 = 1000;
pub const KILLER_ORDER_SCORE: i32 = 800;
pub const CASTLE_ORDER_SCORE: i32 = 50;
pub const KING_MOVE_ORDER_SCORE: i32 = -20;
pub const ROOK_MOVE_ORDER_SCORE: i32 = -10;
pub const MINOR_DEVELOP_ORDER_SCORE: i32 = 10;
pub const HISTORY_ORDER_CAP: i32 = 700;

// Hash table configuration
pub const DEFAULT_HASH_MB: usize = 64;

// Opening book
pub const BOOK_MAX_PLIES: usize = 12;

// Evaluation
pub const ENDGAME_MATERIAL: i32 = 1500;
pub const ENDGAME_LEAD: i32 = 200;
pub const DOUBLED_PAWN_PENALTY: i32 = 15;
pub const PASSED_PATH_CLEAR_BONUS: i32 = 20;
pub const PASSED_DEFENDED_BONUS: i32 = 15;
pub const BISHOP_PAIR_BONUS: i32 = 50;
pub const ROOK_OPEN_FILE_BONUS: i32 = 25;
pub const ROOK_SEMI_OPEN_FILE_BONUS: i32 = 15;
pub const CONNECTED_ROOKS_BONUS: i32 = 25;
pub const QUEEN_ROOK_BATTERY_BONUS: i32 = 30;
pub const UNDEVELOPED_MINOR_PENALTY: i32 = 10;
pub const DEVELOPED_MINOR_BONUS: i32 = 8;
pub const ROOK_SEVENTH_BONUS: i32 = 30;
pub const PAWN_SHIELD_BONUS: i32 = 10;
pub const PAWN_SHIELD_FAR_BONUS: i32 = 5;
pub const KING_OPEN_FILE_PENALTY: i32 = 25;
pub const KING_SEMI_OPEN_FILE_PENALTY: i32 = 15;
pub const KING_CENTRAL_PENALTY: i32 = 30;
pub const KING_ZONE_ATTACK_UNIT: i32 = 4;
pub const KING_ZONE_ATTACK_CAP: i32 = 60;
pub const KING_NO_ESCAPE_PENALTY: i32 = 25;
pub const KING_ONE_ESCAPE_PENALTY: i32 = 15;
pub const KING_NO_DEFENDERS_PENALTY: i32 = 15;
pub const PIECE_NEAR_ENEMY_KING_BONUS: i32 = 8;
pub const CORNER_KING_BONUS: i32 = 20;
pub const CHECK_GIVEN_BONUS: i32 = 10;
pub const IN_CHECK_PENALTY: i32 = 10;

/// Attack weight per king-zone square, indexed by `Piece`.
pub const KING_ZONE_WEIGHT: [i32; NUM_PIECE_TYPES] = [0, 2, 2, 3, 5, 0];

/// Passed-pawn bonus indexed by the pawn's rank from its own side's perspective.
pub const PASSED_BONUS: [i32; NUM_RANKS] = [0, 8, 8, 15, 30, 60, 100, 0];

// Piece-movement offsets, as (row, column) deltas. Ray walks stop at the
// first occupied square; leapers test each offset once.
pub const KNIGHT_OFFSETS: [(i32, i32); 8] = [
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
];

pub const KING_OFFSETS: [(i32, i32); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

pub const DIAGONAL_DIRECTIONS: [(i32, i32); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

pub const ORTHOGONAL_DIRECTIONS: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Starting arrangement. 0-5 index `Piece`; 6 is an empty square.
#[rustfmt::skip]
pub const INIT_BOARD: [u8; NUM_SQUARES] = [
    3, 1, 2, 4, 5, 2, 1, 3,
    0, 0, 0, 0, 0, 0, 0, 0,
    6, 6, 6, 6, 6, 6, 6, 6,
    6, 6, 6, 6, 6, 6, 6, 6,
    6, 6, 6, 6, 6, 6, 6, 6,
    6, 6, 6, 6, 6, 6, 6, 6,
    0, 0, 0, 0, 0, 0, 0, 0,
    3, 1, 2, 4, 5, 2, 1, 3
];

/// Side owning each starting square. 0 = White, 1 = Black, 6 = none.
#[rustfmt::skip]
pub const INIT_COLOR: [u8; NUM_SQUARES] = [
    0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0,
    6, 6, 6, 6, 6, 6, 6, 6,
    6, 6, 6, 6, 6, 6, 6, 6,
    6, 6, 6, 6, 6, 6, 6, 6,
    6, 6, 6, 6, 6, 6, 6, 6,
    1, 1, 1, 1, 1, 1, 1, 1,
    1, 1, 1, 1, 1, 1, 1, 1
];

#[rustfmt::skip]
pub const ROW: [u8; NUM_SQUARES] = [
    0, 0, 0, 0, 0, 0, 0, 0,
    1, 1, 1, 1, 1, 1, 1, 1,
    2, 2, 2, 2, 2, 2, 2, 2,
    3, 3, 3, 3, 3, 3, 3, 3,
    4, 4, 4, 4, 4, 4, 4, 4,
    5, 5, 5, 5, 5, 5, 5, 5,
    6, 6, 6, 6, 6, 6, 6, 6,
    7, 7, 7, 7, 7, 7, 7, 7
];

#[rustfmt::skip]
pub const COLUMN: [u8; NUM_SQUARES] = [
    0, 1, 2, 3, 4, 5, 6, 7,
    0, 1, 2, 3, 4, 5, 6, 7,
    0, 1, 2, 3, 4, 5, 6, 7,
    0, 1, 2, 3, 4, 5, 6, 7,
    0, 1, 2, 3, 4, 5, 6, 7,
    0, 1, 2, 3, 4, 5, 6, 7,
    0, 1, 2, 3, 4, 5, 6, 7,
    0, 1, 2, 3, 4, 5, 6, 7
];

/// Vertical mirror, used to read the White-perspective tables for Black.
#[rustfmt::skip]
pub const FLIPPED_BOARD_SQUARE: [u8; NUM_SQUARES] = [
    56, 57, 58, 59, 60, 61, 62, 63,
    48, 49, 50, 51, 52, 53, 54, 55,
    40, 41, 42, 43, 44, 45, 46, 47,
    32, 33, 34, 35, 36, 37, 38, 39,
    24, 25, 26, 27, 28, 29, 30, 31,
    16, 17, 18, 19, 20, 21, 22, 23,
     8,  9, 10, 11, 12, 13, 14, 15,
     0,  1,  2,  3,  4,  5,  6,  7
];

/// Used to determine the castling permissions after a move.
/// We logical-AND the castle bits with the CASTLE_MASK bits for
/// both of the move's squares.
///
/// If castle is 1 (white can castle kingside), and we play a move
/// where the rook on h1 gets captured, we AND castle with
/// CASTLE_MASK[7] (1&14).
///
/// Castle becomes 0 and white can't castle kingside anymore.
///
/// 0001 white kingside  (14: 1110)
/// 0010 white queenside (13: 1101)
/// 0100 black kingside  (11: 1011)
/// 1000 black queenside (7: 0111)
///
/// 12: 1100
///  3: 0011
/// 15: 1111
#[rustfmt::skip]
pub const CASTLE_MASK: [u8; NUM_SQUARES] = [
    13, 15, 15, 15, 12, 15, 15, 14,
    15, 15, 15, 15, 15, 15, 15, 15,
    15, 15, 15, 15, 15, 15, 15, 15,
    15, 15, 15, 15, 15, 15, 15, 15,
    15, 15, 15, 15, 15, 15, 15, 15,
    15, 15, 15, 15, 15, 15, 15, 15,
    15, 15, 15, 15, 15, 15, 15, 15,
     7, 15, 15, 15,  3, 15, 15, 11
];

// Piece-square tables, White's perspective: row 0 is White's back rank.
// Black pieces read them through FLIPPED_BOARD_SQUARE.

/// A1 - H8
#[rustfmt::skip]
pub const PAWN_SCORE: [i32; NUM_SQUARES] = [
     0,  0,  0,   0,   0,  0,  0,  0,
     5, 10, 10, -20, -20, 10, 10,  5,
     5, -5,-10,   0,   0,-10, -5,  5,
     0,  0,  0,  20,  20,  0,  0,  0,
     5,  5, 10,  25,  25, 10,  5,  5,
    10, 10, 20,  30,  30, 20, 10, 10,
    50, 50, 50,  50,  50, 50, 50, 50,
     0,  0,  0,   0,   0,  0,  0,  0
];

#[rustfmt::skip]
pub const KNIGHT_SCORE: [i32; NUM_SQUARES] = [
    -50,-40,-30,-30,-30,-30,-40,-50,
    -40,-20,  0,  0,  0,  0,-20,-40,
    -30,  5, 10, 15, 15, 10,  5,-30,
    -30,  0, 15, 20, 20, 15,  0,-30,
    -30,  0, 15, 20, 20, 15,  0,-30,
    -30,  5, 10, 15, 15, 10,  5,-30,
    -40,-20,  0,  5,  5,  0,-20,-40,
    -50,-40,-30,-30,-30,-30,-40,-50
];

#[rustfmt::skip]
pub const BISHOP_SCORE: [i32; NUM_SQUARES] = [
    -20,-10,-10,-10,-10,-10,-10,-20,
    -10,  0,  5,  0,  0,  5,  0,-10,
    -10,  5,  5, 10, 10,  5,  5,-10,
    -10,  0, 10, 15, 15, 10,  0,-10,
    -10,  5, 10, 15, 15, 10,  5,-10,
    -10,  0,  5, 10, 10,  5,  0,-10,
    -10,  0,  0,  0,  0,  0,  0,-10,
    -20,-10,-10,-10,-10,-10,-10,-20
];

#[rustfmt::skip]
pub const ROOK_SCORE: [i32; NUM_SQUARES] = [
     0,  0,  5, 10, 10,  5,  0,  0,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
     5, 10, 10, 10, 10, 10, 10,  5,
     0,  0,  0,  0,  0,  0,  0,  0
];

#[rustfmt::skip]
pub const QUEEN_SCORE: [i32; NUM_SQUARES] = [
    -20,-10,-10, -5, -5,-10,-10,-20,
    -10,  0,  0,  0,  0,  0,  0,-10,
    -10,  0,  5,  5,  5,  5,  0,-10,
     -5,  0,  5,  5,  5,  5,  0, -5,
      0,  0,  5,  5,  5,  5,  0, -5,
    -10,  5,  5,  5,  5,  5,  0,-10,
    -10,  0,  5,  0,  0,  0,  0,-10,
    -20,-10,-10, -5, -5,-10,-10,-20
];

#[rustfmt::skip]
pub const KING_SCORE: [i32; NUM_SQUARES] = [
     20, 30, 10,  0,  0, 10, 30, 20,
     20, 20,  0,  0,  0,  0, 20, 20,
    -10,-20,-20,-20,-20,-20,-20,-10,
    -20,-30,-30,-40,-40,-30,-30,-20,
    -30,-40,-40,-50,-50,-40,-40,-30,
    -30,-40,-40,-50,-50,-40,-40,-30,
    -30,-40,-40,-50,-50,-40,-40,-30,
    -30,-40,-40,-50,-50,-40,-40,-30
];

/// Centralisation table the king switches to once the game is an endgame.
#[rustfmt::skip]
pub const KING_ENDGAME_SCORE: [i32; NUM_SQUARES] = [
     0,  8, 16, 18, 18, 16,  8,  0,
     8, 16, 24, 32, 32, 24, 16,  8,
    16, 24, 32, 40, 40, 32, 24, 16,
    25, 32, 40, 48, 48, 40, 32, 25,
    25, 32, 40, 48, 48, 40, 32, 25,
    16, 24, 32, 40, 40, 32, 24, 16,
     8, 16, 24, 32, 32, 24, 16,  8,
     0,  8, 16, 18, 18, 16,  8,  0
];
