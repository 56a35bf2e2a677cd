
use std::time::Instant;

use chess_king::{
    constants::MATE_RANGE,
    engine::{Engine, SearchSettings},
    position::Position,
};
use test_utils::*;

fn settings(max_depth: u16) -> SearchSettings {
    SearchSettings {
        max_depth,
        movetime_ms: 0,
    }
}

/// Search a position at fixed depth with no clock and return the move text.
fn best_move_text(position: &mut Position, max_depth: u16) -> String {
    let mut engine = Engine::new(16);
    engine.repetition.push(position.hash);

    let report = engine.find_best_move(position, &settings(max_depth));

    report.best_move.expect("position has legal moves").text()
}

mod tactics {
    use super::*;

    #[test]
    fn finds_the_scholars_mate() {
        let mut position =
            position_from_history(&["e2e4", "e7e5", "f1c4", "b8c6", "d1h5", "g8f6"]);

        assert_eq!(best_move_text(&mut position, 3), "h5f7");
    }

    #[test]
    fn finds_a_back_rank_mate_in_one() {
        let mut position = Position::from_fen("6k1/5ppp/8/8/8/8/8/R3K3 w - -").unwrap();

        assert_eq!(best_move_text(&mut position, 3), "a1a8");
    }

    #[test]
    fn mate_score_is_reported_in_the_mate_range() {
        let mut position = Position::from_fen("6k1/5ppp/8/8/8/8/8/R3K3 w - -").unwrap();

        let mut engine = Engine::new(16);
        let report = engine.find_best_move(&mut position, &settings(4));

        assert!(report.score >= MATE_RANGE);
    }

    #[test]
    fn prefers_the_shorter_mate() {
        // Queen and rook against a bare king: Qh2 mates at once, while
        // slower mating lines abound. The search must take the quick one.
        let fen = "7k/8/5K2/8/8/8/1Q6/6R1 w - -";
        let mut position = Position::from_fen(fen).unwrap();

        let choice = best_move_text(&mut position, 5);

        let mut check = Position::from_fen(fen).unwrap();
        let mv = find_move(&mut check, &choice).expect("search returns a legal move");
        check.make_move(mv);

        assert!(
            chess_king::movegen::legal_moves(&mut check).is_empty(),
            "{choice} is not an immediate mate"
        );
    }

    #[test]
    fn wins_the_hanging_queen() {
        // Black's queen sits en prise on d5 with nothing defending it.
        let mut position = Position::from_fen("4k3/8/8/3q4/8/8/3R4/4K3 w - -").unwrap();

        assert_eq!(best_move_text(&mut position, 4), "d2d5");
    }
}

mod safety {
    use super::*;

    #[test]
    fn avoids_stalemating_a_won_position() {
        // White is up a queen; Qb6 would freeze the cornered king with no
        // check and throw the win away for a draw.
        let mut position = Position::from_fen("k7/8/8/8/8/1Q6/8/4K3 w - -").unwrap();

        let choice = best_move_text(&mut position, 4);
        assert_ne!(choice, "b3b6");
    }

    #[test]
    fn returns_a_move_even_at_depth_one() {
        let mut position = Position::starting();
        let choice = best_move_text(&mut position, 1);

        assert!(find_move(&mut Position::starting(), &choice).is_some());
    }

    #[test]
    fn reports_no_move_when_mated() {
        let mut position = Position::from_fen("R3k3/8/4K3/8/8/8/8/8 b - -").unwrap();

        let mut engine = Engine::new(16);
        let report = engine.find_best_move(&mut position, &settings(3));

        assert!(report.best_move.is_none());
        assert!(report.score <= -MATE_RANGE);
    }
}

mod time_control {
    use super::*;

    #[test]
    fn honours_the_deadline_with_headroom() {
        let mut position = Position::starting();
        let mut engine = Engine::new(16);

        let budget_ms = 150;
        let started = Instant::now();

        let report = engine.find_best_move(
            &mut position,
            &SearchSettings {
                max_depth: 64,
                movetime_ms: budget_ms,
            },
        );

        let elapsed = started.elapsed().as_millis() as u64;

        assert!(report.best_move.is_some());
        // Generous epsilon: one node between polls plus scheduling noise.
        assert!(elapsed < budget_ms + 250, "took {elapsed}ms");
    }

    #[test]
    fn zero_budget_means_no_deadline() {
        let mut position = Position::starting();
        let mut engine = Engine::new(16);

        let report = engine.find_best_move(&mut position, &settings(3));

        assert_eq!(report.depth, 3);
        assert!(report.best_move.is_some());
    }
}

mod determinism {
    use super::*;

    #[test]
    fn fixed_depth_search_is_reproducible() {
        let first = best_move_text(&mut Position::starting(), 4);
        let second = best_move_text(&mut Position::starting(), 4);

        assert_eq!(first, second);
    }

    #[test]
    fn warm_transposition_table_agrees_with_the_cold_search() {
        let mut engine = Engine::new(16);
        let mut position = Position::starting();

        let cold = engine.find_best_move(&mut position, &settings(4));
        let warm = engine.find_best_move(&mut position, &settings(4));

        assert_eq!(cold.best_move, warm.best_move);
        assert_eq!(cold.score, warm.score);
        assert!(warm.nodes <= cold.nodes, "table hits should prune work");
    }
}

mod zugzwang {
    use super::*;

    #[test]
    fn pawn_ending_searches_deeply_without_null_pruning() {
        // With only pawns left, null-move pruning is switched off; a deep
        // search of this mutual-zugzwang ending must still complete and
        // must not drop the c-pawn.
        let mut position = Position::from_fen("8/8/8/2k5/8/1K6/2P5/8 w - -").unwrap();

        let choice = best_move_text(&mut position, 8);

        // Walking the king away abandons the pawn to Kc5-c4xc2.
        assert_ne!(choice, "b3a2");
        assert_ne!(choice, "b3b2");
    }
}
