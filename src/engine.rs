use std::collections::HashMap;

use tracing::debug;

use crate::{
    attacks::is_in_check,
    constants::{
        ASPIRATION_MIN_DEPTH, ASPIRATION_WINDOW, CASTLE_ORDER_SCORE, CONTEMPT, DEFAULT_HASH_MB,
        DRAW_SCORE, HISTORY_ORDER_CAP, INFINITY_SCORE, KILLER_ORDER_SCORE, KING_MOVE_ORDER_SCORE,
        MATE_RANGE, MAX_HISTORY_SCORE, MAX_PLY, MINOR_DEVELOP_ORDER_SCORE, NULL_MIN_DEPTH,
        NULL_REDUCTION, NUM_SIDES, NUM_SQUARES, PROMOTION_ORDER_SCORE, QUIESCENCE_DEPTH,
        ROOK_MOVE_ORDER_SCORE,
    },
    eval::{evaluate_for_side, evaluate_terminal},
    hash::{Bound, HashTable},
    movegen::legal_moves,
    position::Position,
    time::TimeManager,
    types::{Move, Piece, Side},
};

/// Zobrist keys of the game so far plus the active search path, with a
/// count map for O(1) occurrence queries.
#[derive(Default)]
pub struct RepetitionHistory {
    stack: Vec<u64>,
    counts: HashMap<u64, u32>,
}

impl RepetitionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, hash: u64) {
        self.stack.push(hash);
        *self.counts.entry(hash).or_insert(0) += 1;
    }

    pub fn pop(&mut self) {
        if let Some(hash) = self.stack.pop() {
            if let Some(count) = self.counts.get_mut(&hash) {
                *count -= 1;

                if *count == 0 {
                    self.counts.remove(&hash);
                }
            }
        }
    }

    /// How many times this position has occurred.
    pub fn count(&self, hash: u64) -> u32 {
        self.counts.get(&hash).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }
}

pub struct SearchSettings {
    pub max_depth: u16,
    /// Milliseconds; 0 means no deadline.
    pub movetime_ms: u64,
}

pub struct SearchReport {
    pub best_move: Option<Move>,
    pub score: i32,
    pub depth: u16,
    pub nodes: u64,
}

/// Search state that lives for one invocation: transposition table, killer
/// and history tables, repetition history and the clock.
pub struct Engine {
    pub tt: HashTable,
    pub repetition: RepetitionHistory,
    killers: [[Option<Move>; 2]; MAX_PLY],
    history_table: [[[i32; NUM_SQUARES]; NUM_SQUARES]; NUM_SIDES],
    time_manager: TimeManager,
    aborted: bool,
    nodes: u64,
}

impl Engine {
    pub fn new(hash_mb: usize) -> Self {
        Self {
            tt: HashTable::new(hash_mb),
            repetition: RepetitionHistory::new(),
            killers: [[None; 2]; MAX_PLY],
            history_table: [[[0; NUM_SQUARES]; NUM_SQUARES]; NUM_SIDES],
            time_manager: TimeManager::unlimited(),
            aborted: false,
            nodes: 0,
        }
    }

    /// Iterative deepening driver. Each completed iteration's move is
    /// authoritative; an aborted iteration's result is discarded.
    pub fn find_best_move(
        &mut self,
        position: &mut Position,
        settings: &SearchSettings,
    ) -> SearchReport {
        self.killers = [[None; 2]; MAX_PLY];
        self.history_table = [[[0; NUM_SQUARES]; NUM_SQUARES]; NUM_SIDES];
        self.time_manager = TimeManager::new(settings.movetime_ms);
        self.aborted = false;
        self.nodes = 0;

        let root_moves = legal_moves(position);

        if root_moves.is_empty() {
            return SearchReport {
                best_move: None,
                score: evaluate_terminal(position, 0),
                depth: 0,
                nodes: 0,
            };
        }

        // Safety fallback if not even depth 1 finishes in time.
        let mut best_move = root_moves[0];
        let mut best_score = -INFINITY_SCORE;
        let mut completed_depth = 0;

        for depth in 1..=settings.max_depth {
            if depth > 1 && self.time_manager.is_time_up() {
                break;
            }

            let mut alpha = -INFINITY_SCORE;
            let mut beta = INFINITY_SCORE;

            if depth >= ASPIRATION_MIN_DEPTH && best_score.abs() < MATE_RANGE {
                alpha = best_score - ASPIRATION_WINDOW;
                beta = best_score + ASPIRATION_WINDOW;
            }

            let (mut score, mut mv) = self.search_root(position, depth, alpha, beta);

            // A result at or outside the aspiration window is unreliable;
            // repeat with the full window.
            if !self.aborted && (score <= alpha || score >= beta) {
                (score, mv) = self.search_root(position, depth, -INFINITY_SCORE, INFINITY_SCORE);
            }

            if self.aborted {
                break;
            }

            if let Some(mv) = mv {
                best_move = mv;
                best_score = score;
                completed_depth = depth;
            }

            debug!(
                depth,
                score,
                nodes = self.nodes,
                best = %best_move.text(),
                "completed iteration"
            );

            if best_score.abs() >= MATE_RANGE {
                break;
            }
        }

        SearchReport {
            best_move: Some(best_move),
            score: best_score,
            depth: completed_depth,
            nodes: self.nodes,
        }
    }

    fn search_root(
        &mut self,
        position: &mut Position,
        depth: u16,
        mut alpha: i32,
        beta: i32,
    ) -> (i32, Option<Move>) {
        let depth = depth as i32;
        let mut moves = legal_moves(position);

        if moves.is_empty() {
            return (evaluate_terminal(position, 0), None);
        }

        let tt_move = self.tt.probe(position.hash).and_then(|entry| entry.best_move);
        self.order_moves(position, &mut moves, tt_move, depth);

        let mut best_score = -INFINITY_SCORE;
        let mut best_move = None;

        for mv in moves {
            let undo = position.make_move(mv);
            let score = self.score_child(position, depth - 1, 0, alpha, beta, false);
            position.unmake_move(mv, undo);

            if self.aborted {
                return (0, None);
            }

            if score > best_score {
                best_score = score;
                best_move = Some(mv);
            }

            if score > alpha {
                alpha = score;
            }

            if alpha >= beta {
                break;
            }
        }

        (best_score, best_move)
    }

    /// Repetition bookkeeping shared by the root and interior loops. Called
    /// with the move already made; returns the move's score from the
    /// mover's perspective.
    fn score_child(
        &mut self,
        position: &mut Position,
        depth: i32,
        ply: usize,
        alpha: i32,
        beta: i32,
        reduced: bool,
    ) -> i32 {
        let child_hash = position.hash;
        let prior_occurrences = self.repetition.count(child_hash);

        // This move would produce a third occurrence: a draw, taken with
        // contempt, without searching.
        if prior_occurrences >= 2 {
            return DRAW_SCORE - CONTEMPT;
        }

        self.repetition.push(child_hash);

        let mut score = if reduced {
            -self.negamax(position, depth, ply + 1, -alpha - 1, -alpha)
        } else {
            -self.negamax(position, depth, ply + 1, -beta, -alpha)
        };

        self.repetition.pop();

        // Second occurrence while ahead: walk away from shuffling lines,
        // harder the bigger the advantage.
        if prior_occurrences == 1 && score > DRAW_SCORE - CONTEMPT {
            score -= repeat_penalty(score);
        }

        score
    }

    fn negamax(
        &mut self,
        position: &mut Position,
        depth: i32,
        ply: usize,
        mut alpha: i32,
        mut beta: i32,
    ) -> i32 {
        self.nodes += 1;

        if self.time_manager.is_time_up() {
            self.aborted = true;
            return 0;
        }

        if depth <= 0 {
            return self.quiescence(position, ply, QUIESCENCE_DEPTH, alpha, beta);
        }

        let original_alpha = alpha;
        let mut tt_move = None;

        if let Some(entry) = self.tt.probe(position.hash) {
            tt_move = entry.best_move;

            if entry.depth as i32 >= depth {
                match entry.flag {
                    Bound::Exact => return entry.value,
                    Bound::Lower => alpha = alpha.max(entry.value),
                    Bound::Upper => beta = beta.min(entry.value),
                }

                if alpha >= beta {
                    return entry.value;
                }
            }
        }

        let in_check = is_in_check(position, position.side);

        // Null move: hand the opponent a free shot. Unsound in check or in
        // pawn endings, and pointless in mate-score windows.
        if !in_check
            && depth >= NULL_MIN_DEPTH + NULL_REDUCTION
            && position.has_non_pawn_piece(position.side)
            && beta.abs() < MATE_RANGE
        {
            let null_depth = depth - 1 - NULL_REDUCTION;

            if null_depth > 0 {
                let undo = position.make_null_move();
                let score = -self.negamax(position, null_depth, ply + 1, -beta, -beta + 1);
                position.unmake_null_move(undo);

                if self.aborted {
                    return 0;
                }

                if score >= beta {
                    return beta;
                }
            }
        }

        let mut moves = legal_moves(position);

        if moves.is_empty() {
            return evaluate_terminal(position, ply);
        }

        self.order_moves(position, &mut moves, tt_move, depth);

        let mut best_score = -INFINITY_SCORE;
        let mut best_move = None;

        for (index, &mv) in moves.iter().enumerate() {
            let is_capture = position.is_capture(mv);
            let is_promotion = mv.promote.is_some();

            let undo = position.make_move(mv);

            let gives_check = is_in_check(position, position.side);
            // Bounded so a long checking sequence cannot extend forever.
            let extension = i32::from(gives_check && ply < MAX_PLY);

            let late_quiet = index >= 4
                && depth >= 3
                && !is_capture
                && !is_promotion
                && !in_check
                && !gives_check;

            let score = if late_quiet {
                // Reduced null-window probe first; anything interesting is
                // re-searched at full depth and width.
                let reduction = if depth <= 6 { 1 } else { 2 };

                let reduced_score = self.score_child(
                    position,
                    depth - 1 - reduction + extension,
                    ply,
                    alpha,
                    beta,
                    true,
                );

                if reduced_score > alpha && !self.aborted {
                    self.score_child(position, depth - 1 + extension, ply, alpha, beta, false)
                } else {
                    reduced_score
                }
            } else {
                self.score_child(position, depth - 1 + extension, ply, alpha, beta, false)
            };

            position.unmake_move(mv, undo);

            if self.aborted {
                return 0;
            }

            if score > best_score {
                best_score = score;
                best_move = Some(mv);
            }

            if score > alpha {
                alpha = score;
            }

            if alpha >= beta {
                if !is_capture && !is_promotion {
                    self.record_killer(mv, depth);
                    self.bump_history(position.side, mv, depth);
                }

                break;
            }
        }

        if !self.aborted {
            let flag = if best_score <= original_alpha {
                Bound::Upper
            } else if best_score >= beta {
                Bound::Lower
            } else {
                Bound::Exact
            };

            self.tt
                .store(position.hash, depth as i16, best_score, flag, best_move);
        }

        best_score
    }

    /// Captures-and-checks extension of the main search, so the horizon
    /// never cuts a tactic in half. In check, every evasion is searched and
    /// standing pat is not an option.
    fn quiescence(
        &mut self,
        position: &mut Position,
        ply: usize,
        qdepth: i32,
        mut alpha: i32,
        beta: i32,
    ) -> i32 {
        self.nodes += 1;

        if self.time_manager.is_time_up() {
            self.aborted = true;
            return 0;
        }

        let in_check = is_in_check(position, position.side);

        if in_check {
            let mut moves = legal_moves(position);

            if moves.is_empty() {
                return evaluate_terminal(position, ply);
            }

            if qdepth <= 0 {
                return evaluate_for_side(position);
            }

            self.order_moves(position, &mut moves, None, 0);

            let mut best_score = -INFINITY_SCORE;

            for mv in moves {
                let undo = position.make_move(mv);
                let score = -self.quiescence(position, ply + 1, qdepth - 1, -beta, -alpha);
                position.unmake_move(mv, undo);

                if self.aborted {
                    return 0;
                }

                best_score = best_score.max(score);
                alpha = alpha.max(score);

                if alpha >= beta {
                    return beta;
                }
            }

            return best_score;
        }

        let stand_pat = evaluate_for_side(position);

        if stand_pat >= beta {
            return beta;
        }

        if stand_pat > alpha {
            alpha = stand_pat;
        }

        if qdepth <= 0 {
            return alpha;
        }

        let mut moves = legal_moves(position);
        self.order_moves(position, &mut moves, None, 0);

        for mv in moves {
            let is_capture = position.is_capture(mv);

            let undo = position.make_move(mv);
            let gives_check = is_in_check(position, position.side);

            // Quiet moves only earn a look here if they give check.
            if !is_capture && !gives_check {
                position.unmake_move(mv, undo);
                continue;
            }

            let score = -self.quiescence(position, ply + 1, qdepth - 1, -beta, -alpha);
            position.unmake_move(mv, undo);

            if self.aborted {
                return 0;
            }

            if score >= beta {
                return beta;
            }

            if score > alpha {
                alpha = score;
            }
        }

        alpha
    }

    /// Sort for the search loop: the table's best move first, then by the
    /// heuristic score, stably so the generator's order breaks ties.
    fn order_moves(
        &self,
        position: &Position,
        moves: &mut [Move],
        tt_move: Option<Move>,
        depth: i32,
    ) {
        moves.sort_by_key(|&mv| {
            if Some(mv) == tt_move {
                return i32::MIN;
            }

            -self.order_score(position, mv, depth)
        });
    }

    fn order_score(&self, position: &Position, mv: Move, depth: i32) -> i32 {
        if mv.promote.is_some() {
            return PROMOTION_ORDER_SCORE;
        }

        if position.is_capture(mv) {
            let victim = if position.piece_at(mv.to) == Piece::Empty {
                Piece::Pawn // en passant
            } else {
                position.piece_at(mv.to)
            };

            return 10 * victim.value() - position.piece_at(mv.from).value();
        }

        let slot = (depth.max(0) as usize).min(MAX_PLY - 1);

        if self.killers[slot].contains(&Some(mv)) {
            return KILLER_ORDER_SCORE;
        }

        let mover = position.piece_at(mv.from);

        if mover == Piece::King {
            return if mv.from.col().abs_diff(mv.to.col()) == 2 {
                CASTLE_ORDER_SCORE
            } else {
                KING_MOVE_ORDER_SCORE
            };
        }

        if mover == Piece::Rook {
            return ROOK_MOVE_ORDER_SCORE;
        }

        if matches!(mover, Piece::Knight | Piece::Bishop) {
            if let Some(side) = position.side_at(mv.from) {
                if mv.from.row() == side.back_row() {
                    return MINOR_DEVELOP_ORDER_SCORE;
                }
            }
        }

        let side = position.side as usize;
        let history = self.history_table[side][mv.from.index()][mv.to.index()];

        (history / 15).min(HISTORY_ORDER_CAP)
    }

    /// A quiet cutoff move becomes the depth's killer; the old first slot
    /// shifts down unless the move is already there.
    fn record_killer(&mut self, mv: Move, depth: i32) {
        let slot = (depth.max(0) as usize).min(MAX_PLY - 1);

        if self.killers[slot][0] != Some(mv) {
            self.killers[slot][1] = self.killers[slot][0];
            self.killers[slot][0] = Some(mv);
        }
    }

    fn bump_history(&mut self, side: Side, mv: Move, depth: i32) {
        let entry =
            &mut self.history_table[side as usize][mv.from.index()][mv.to.index()];

        *entry = (*entry + depth * depth).min(MAX_HISTORY_SCORE);
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(DEFAULT_HASH_MB)
    }
}

/// Graded disincentive for steering a winning position into a second
/// occurrence of an earlier one.
fn repeat_penalty(score: i32) -> i32 {
    if score > 300 {
        150
    } else if score > 200 {
        100
    } else if score > 100 {
        75
    } else if score > 50 {
        50
    } else if score > 0 {
        25
    } else {
        0
    }
}
