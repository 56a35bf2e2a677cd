
use std::fs;

use chess_king::{
    driver::{self, GameState},
    engine::SearchSettings,
    movegen::legal_moves,
    types::Side,
};

fn settings(max_depth: u16) -> SearchSettings {
    SearchSettings {
        max_depth,
        movetime_ms: 0,
    }
}

fn choose(state: &mut GameState, max_depth: u16) -> String {
    driver::choose_move(state, &settings(max_depth))
        .expect("a move is available")
        .text()
}

mod reconstruction {
    use super::*;

    #[test]
    fn empty_history_is_the_starting_position() {
        let mut state = driver::reconstruct("");

        assert_eq!(state.position.side, Side::White);
        assert_eq!(legal_moves(&mut state.position).len(), 20);
        assert_eq!(state.repetition.len(), 1);
        assert!(state.history.is_empty());
    }

    #[test]
    fn one_reply_later_black_also_has_twenty_moves() {
        let mut state = driver::reconstruct("e2e4\n");

        assert_eq!(state.position.side, Side::Black);
        assert_eq!(legal_moves(&mut state.position).len(), 20);
    }

    #[test]
    fn whitespace_and_blank_lines_are_ignored() {
        let state = driver::reconstruct("  e2e4  \r\n\n\t e7e5 \n");

        assert_eq!(state.history, vec!["e2e4", "e7e5"]);
        assert_eq!(state.position.side, Side::White);
    }

    #[test]
    fn illegal_lines_are_skipped_and_replay_continues() {
        let state = driver::reconstruct("e2e4\ne2e5\nxyzw\ne7e5\n");

        assert_eq!(state.history, vec!["e2e4", "e7e5"]);
    }

    #[test]
    fn every_replayed_position_lands_in_the_repetition_history() {
        let state = driver::reconstruct("e2e4\ne7e5\ng1f3\n");

        // Start position plus three replayed ones.
        assert_eq!(state.repetition.len(), 4);
        assert_eq!(state.repetition.count(state.position.hash), 1);
    }

    #[test]
    fn missing_history_file_means_a_fresh_game() {
        let state =
            driver::reconstruct_from_file("/nonexistent/path/history.txt").expect("not an error");

        assert!(state.history.is_empty());
        assert_eq!(state.position.side, Side::White);
    }

    #[test]
    fn promotion_suffix_selects_the_piece() {
        let text = "a2a4\nh7h5\na4a5\nh5h4\na5a6\nh4h3\na6b7\nh3g2\nb7a8r\n";
        let state = driver::reconstruct(text);

        assert_eq!(state.history.last().map(String::as_str), Some("b7a8r"));
        assert_eq!(
            state.position.piece_at(chess_king::types::Square::A8),
            chess_king::types::Piece::Rook
        );
    }
}

mod choosing {
    use super::*;

    #[test]
    fn opening_move_comes_from_the_book() {
        let mut state = driver::reconstruct("");
        assert_eq!(choose(&mut state, 1), "e2e4");
    }

    #[test]
    fn book_reply_to_e4_is_a_legal_black_move() {
        let mut state = driver::reconstruct("e2e4\n");
        let reply = choose(&mut state, 1);

        assert_eq!(reply, "e7e5");
    }

    #[test]
    fn off_book_choice_comes_from_the_search_and_is_legal() {
        let mut state = driver::reconstruct("h2h3\na7a6\nh3h4\n");

        let reply = choose(&mut state, 1);
        let legal = legal_moves(&mut state.position);

        assert!(legal.iter().any(|mv| mv.text() == reply));
    }

    #[test]
    fn finds_the_scholars_mate_through_the_driver() {
        let mut state = driver::reconstruct("e2e4\ne7e5\nf1c4\nb8c6\nd1h5\ng8f6\n");

        assert_eq!(choose(&mut state, 4), "h5f7");
    }

    #[test]
    fn reports_no_move_after_a_mate() {
        // Fool's mate; White is mated, nothing to play.
        let mut state = driver::reconstruct("f2f3\ne7e5\ng2g4\nd8h4\n");

        assert!(legal_moves(&mut state.position).is_empty());
        assert!(driver::choose_move(&mut state, &settings(3)).is_none());
    }
}

mod output {
    use super::*;

    #[test]
    fn move_file_is_a_single_newline_terminated_line() {
        let path = std::env::temp_dir().join(format!("chess_king_move_{}.txt", std::process::id()));
        let path = path.to_str().expect("temp path is valid UTF-8");

        let mut state = driver::reconstruct("");
        let mv = driver::choose_move(&mut state, &settings(1)).expect("opening move exists");

        driver::write_move_file(path, mv).expect("write succeeds");
        assert_eq!(fs::read_to_string(path).unwrap(), format!("{}\n", mv.text()));

        // Overwrites, never appends.
        driver::write_move_file(path, mv).expect("write succeeds");
        assert_eq!(fs::read_to_string(path).unwrap(), format!("{}\n", mv.text()));

        let _ = fs::remove_file(path);
    }
}
