use std::sync::OnceLock;

use crate::{
    constants::{NUM_FILES, NUM_SQUARES},
    position::Position,
    types::{Piece, Side},
};

/// Fixed seed so every invocation derives identical keys; a history file
/// hashed today matches one hashed tomorrow.
const ZOBRIST_SEED: u64 = 0x0C0F_FEE1_2345_6789;

/// Random-key tables combined by XOR into a 64-bit position fingerprint.
pub struct ZobristKeys {
    /// [side][piece][square]; the trailing row is never read (no key for
    /// an empty square).
    pub piece: [[[u64; NUM_SQUARES]; 7]; 2],
    /// XORed in iff Black is to move.
    pub side: u64,
    /// Indexed by the castle nibble: bit 0 WK, bit 1 WQ, bit 2 BK, bit 3 BQ.
    pub castling: [u64; 16],
    /// Indexed by the en-passant target file.
    pub en_passant: [u64; NUM_FILES],
}

static ZOBRIST_KEYS: OnceLock<ZobristKeys> = OnceLock::new();

/// The splitmix64 mixer; deterministic for a given seed.
fn splitmix64(state: &mut u64) -> u64 {
    *state = state.wrapping_add(0x9e37_79b9_7f4a_7c15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

impl ZobristKeys {
    fn generate() -> Self {
        let mut state = ZOBRIST_SEED;

        let mut piece = [[[0u64; NUM_SQUARES]; 7]; 2];

        for side_keys in piece.iter_mut() {
            for piece_keys in side_keys.iter_mut() {
                for square_key in piece_keys.iter_mut() {
                    *square_key = splitmix64(&mut state);
                }
            }
        }

        let side = splitmix64(&mut state);

        let mut castling = [0u64; 16];
        for key in castling.iter_mut() {
            *key = splitmix64(&mut state);
        }

        let mut en_passant = [0u64; NUM_FILES];
        for key in en_passant.iter_mut() {
            *key = splitmix64(&mut state);
        }

        Self {
            piece,
            side,
            castling,
            en_passant,
        }
    }
}

pub fn keys() -> &'static ZobristKeys {
    ZOBRIST_KEYS.get_or_init(ZobristKeys::generate)
}

/// Fingerprint recomputed from scratch. The authoritative value is kept
/// incrementally by make/unmake; this must agree with it exactly.
pub fn compute(position: &Position) -> u64 {
    let keys = keys();
    let mut hash = 0u64;

    for square in 0..NUM_SQUARES {
        let piece = position.value[square];

        if piece != Piece::Empty {
            if let Some(side) = position.color[square] {
                hash ^= keys.piece[side as usize][piece as usize][square];
            }
        }
    }

    if position.side == Side::Black {
        hash ^= keys.side;
    }

    hash ^= keys.castling[position.castle as usize];

    if let Some(target) = position.en_passant {
        hash ^= keys.en_passant[target.col() as usize];
    }

    hash
}
