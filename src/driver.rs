//! One invocation, one move: rebuild the game from the history file, pick a
//! reply by book or search, and write it back out.

use std::fs;
use std::io::ErrorKind;

use tracing::{info, warn};

use crate::{
    engine::{Engine, RepetitionHistory, SearchSettings},
    error::EngineError,
    movegen::legal_moves,
    openings,
    position::Position,
    types::Move,
};

use crate::constants::{BOOK_MAX_PLIES, DEFAULT_HASH_MB};

/// The game reconstructed from a history file.
pub struct GameState {
    pub position: Position,
    /// Every position hash seen so far, starting position included; the
    /// search extends this along its own path.
    pub repetition: RepetitionHistory,
    /// The accepted moves, in long algebraic text.
    pub history: Vec<String>,
}

/// Replay a history file's contents from the starting position. Lines that
/// do not match a legal move are reported and skipped; the rest of the file
/// is still applied.
pub fn reconstruct(history_text: &str) -> GameState {
    let mut position = Position::starting();
    let mut repetition = RepetitionHistory::new();
    let mut history = Vec::new();

    repetition.push(position.hash);

    for line in history_text.lines() {
        let text = line.trim();

        if text.is_empty() {
            continue;
        }

        match find_legal_move(&mut position, text) {
            Some(mv) => {
                position.make_move(mv);
                repetition.push(position.hash);
                history.push(mv.text());
            }
            None => warn!(line = text, "skipping illegal move in history"),
        }
    }

    GameState {
        position,
        repetition,
        history,
    }
}

/// Read and replay the history file. A missing file means a fresh game.
pub fn reconstruct_from_file(path: &str) -> Result<GameState, EngineError> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(reconstruct(&text)),
        Err(error) if error.kind() == ErrorKind::NotFound => {
            warn!(path, "history file not found, assuming starting position");
            Ok(reconstruct(""))
        }
        Err(source) => Err(EngineError::HistoryRead {
            path: path.to_string(),
            source,
        }),
    }
}

/// Match move text against the current legal moves. A promotion suffix must
/// agree when present; a bare pawn move to the last rank promotes to queen.
pub fn find_legal_move(position: &mut Position, text: &str) -> Option<Move> {
    let wanted = Move::from_text(text).ok()?;

    legal_moves(position).into_iter().find(|&mv| {
        mv.from == wanted.from
            && mv.to == wanted.to
            && match wanted.promote {
                Some(promote) => mv.promote == Some(promote),
                None => mv.promote.is_none() || mv.promote == Some(crate::types::Piece::Queen),
            }
    })
}

/// Pick the move to play: the opening book while the game is young, the
/// search otherwise. Returns None when the side to move has no legal moves.
pub fn choose_move(state: &mut GameState, settings: &SearchSettings) -> Option<Move> {
    if legal_moves(&mut state.position).is_empty() {
        return None;
    }

    if state.history.len() <= BOOK_MAX_PLIES {
        if let Some(reply) = openings::book_move(&state.history) {
            if let Some(mv) = find_legal_move(&mut state.position, reply) {
                info!(reply, "book move");
                return Some(mv);
            }
        }
    }

    let mut engine = Engine::new(DEFAULT_HASH_MB);
    engine.repetition = std::mem::take(&mut state.repetition);

    let report = engine.find_best_move(&mut state.position, settings);

    state.repetition = std::mem::take(&mut engine.repetition);

    if let Some(mv) = report.best_move {
        info!(
            depth = report.depth,
            score = report.score,
            nodes = report.nodes,
            best = %mv.text(),
            "search finished"
        );

        // The search only returns generator moves, but the move is about to
        // leave the process; re-check before trusting it.
        if find_legal_move(&mut state.position, &mv.text()).is_some() {
            return Some(mv);
        }
    }

    None
}

/// Write the chosen move in long algebraic form, newline-terminated,
/// overwriting the file.
pub fn write_move_file(path: &str, mv: Move) -> Result<(), EngineError> {
    fs::write(path, format!("{}\n", mv.text())).map_err(|source| EngineError::MoveWrite {
        path: path.to_string(),
        source,
    })
}
