
use chess_king::{
    attacks::is_in_check,
    movegen::{legal_moves, pseudo_legal_moves},
    position::Position,
    types::{Piece, Side, Square},
};
use test_utils::*;

mod counts {
    use super::*;

    #[test]
    fn starting_position_has_twenty_moves() {
        let mut position = Position::starting();
        assert_eq!(legal_moves(&mut position).len(), 20);
    }

    #[test]
    fn black_has_twenty_replies_to_e4() {
        let mut position = position_from_history(&["e2e4"]);

        assert_eq!(position.side, Side::Black);
        assert_eq!(legal_moves(&mut position).len(), 20);
    }

    #[test]
    fn generation_order_is_stable() {
        let mut position = Position::starting();

        let first = legal_move_texts(&mut position);
        let second = legal_move_texts(&mut position);

        assert_eq!(first, second);
    }

    #[test]
    fn no_generated_move_leaves_own_king_in_check() {
        // White's e-pawn is pinned against the king by the rook on e7.
        let mut position = Position::from_fen("4k3/4r3/8/8/8/8/4P3/4K3 w - -").unwrap();

        for mv in legal_moves(&mut position) {
            let undo = position.make_move(mv);
            assert!(
                !is_in_check(&position, Side::White),
                "{} leaves the king in check",
                mv.text()
            );
            position.unmake_move(mv, undo);
        }

        // The pinned pawn may still advance along the file, never capture away.
        let texts = legal_move_texts(&mut position);
        assert!(texts.contains(&"e2e3".to_string()));
    }
}

mod pawns {
    use super::*;

    #[test]
    fn promotions_expand_to_four_moves() {
        let mut position = Position::from_fen("8/P6k/8/8/8/8/8/K7 w - -").unwrap();

        let texts = legal_move_texts(&mut position);

        for suffix in ["q", "r", "b", "n"] {
            assert!(texts.contains(&format!("a7a8{suffix}")));
        }
    }

    #[test]
    fn double_push_requires_clear_path() {
        let mut position = Position::from_fen("4k3/8/8/8/8/4n3/4P3/4K3 w - -").unwrap();
        let texts = legal_move_texts(&mut position);

        assert!(!texts.contains(&"e2e3".to_string()));
        assert!(!texts.contains(&"e2e4".to_string()));
    }

    #[test]
    fn en_passant_capture_is_generated() {
        let mut position = position_from_history(&["e2e4", "a7a6", "e4e5", "d7d5"]);

        assert_eq!(position.en_passant, Some(Square::D6));
        assert!(legal_move_texts(&mut position).contains(&"e5d6".to_string()));
    }

    #[test]
    fn en_passant_round_trip_restores_position() {
        let mut position = position_from_history(&["e2e4", "a7a6", "e4e5", "d7d5"]);
        let before = position_from_history(&["e2e4", "a7a6", "e4e5", "d7d5"]);

        let mv = find_move(&mut position, "e5d6").expect("en passant is legal");
        let undo = position.make_move(mv);

        // The captured pawn leaves d5, not d6.
        assert_eq!(position.piece_at(Square::D5), Piece::Empty);
        assert_eq!(position.piece_at(Square::D6), Piece::Pawn);

        position.unmake_move(mv, undo);
        assert!(positions_equal(&position, &before));
    }

    #[test]
    fn en_passant_window_closes_after_one_move() {
        let mut position =
            position_from_history(&["e2e4", "a7a6", "e4e5", "d7d5", "b1c3", "a6a5"]);

        assert_eq!(position.en_passant, None);
        assert!(!legal_move_texts(&mut position).contains(&"e5d6".to_string()));
    }
}

mod castling {
    use super::*;

    #[test]
    fn kingside_castle_is_generated_when_clear() {
        let mut position =
            position_from_history(&["e2e4", "e7e5", "g1f3", "b8c6", "f1c4", "f8c5"]);

        assert!(legal_move_texts(&mut position).contains(&"e1g1".to_string()));
    }

    #[test]
    fn castle_execution_moves_the_rook() {
        let mut position =
            position_from_history(&["e2e4", "e7e5", "g1f3", "b8c6", "f1c4", "f8c5", "e1g1"]);

        assert_eq!(position.piece_at(Square::G1), Piece::King);
        assert_eq!(position.piece_at(Square::F1), Piece::Rook);
        assert_eq!(position.piece_at(Square::H1), Piece::Empty);
        assert_eq!(position.castle & 0b0011, 0);
    }

    #[test]
    fn castling_through_attacked_square_is_illegal() {
        // Black rook on f8 covers f1, the king's pass-through square.
        let mut position =
            Position::from_fen("4kr2/8/8/8/8/8/8/4K2R w K -").unwrap();

        assert!(!legal_move_texts(&mut position).contains(&"e1g1".to_string()));
    }

    #[test]
    fn castling_out_of_check_is_illegal() {
        let mut position = Position::from_fen("4k3/8/8/8/8/8/4r3/4K2R w K -").unwrap();

        assert!(!legal_move_texts(&mut position).contains(&"e1g1".to_string()));
    }

    #[test]
    fn castling_then_queen_raid_keeps_rights_cleared() {
        // White castles kingside, then Black's queen raids the back rank.
        // Both White rights were cleared by the king move and must stay
        // cleared, with the hash agreeing.
        let position = position_from_history(&[
            "g1f3", "e7e5", "g2g3", "d8f6", "f1g2", "f6f3", "e1g1", "f3g2",
        ]);

        assert_eq!(position.castle & 0b0011, 0);
        assert_eq!(position.hash, chess_king::zobrist::compute(&position));
    }

    #[test]
    fn capturing_an_unmoved_rook_clears_that_right() {
        let mut position = Position::from_fen("4k3/8/8/8/8/6n1/8/R3K2R b KQ -").unwrap();

        make(&mut position, "g3h1");

        assert_eq!(position.castle & 0b0001, 0, "kingside right is gone");
        assert_ne!(position.castle & 0b0010, 0, "queenside right survives");
        assert_eq!(position.hash, chess_king::zobrist::compute(&position));
    }
}

mod sliders {
    use super::*;

    #[test]
    fn rays_stop_at_the_first_occupied_square() {
        let mut position = Position::from_fen("4k3/8/8/3p4/8/3R4/8/4K3 w - -").unwrap();
        let texts = legal_move_texts(&mut position);

        assert!(texts.contains(&"d3d4".to_string()));
        assert!(texts.contains(&"d3d5".to_string())); // capture ends the ray
        assert!(!texts.contains(&"d3d6".to_string()));
    }

    #[test]
    fn friendly_piece_blocks_without_a_capture() {
        let mut position = Position::starting();
        let texts = legal_move_texts(&mut position);

        // Rooks and bishops are boxed in at the start.
        assert!(!texts.iter().any(|text| text.starts_with("a1")));
        assert!(!texts.iter().any(|text| text.starts_with("c1")));
    }
}

mod pseudo_legal {
    use super::*;

    #[test]
    fn legality_filter_only_removes_moves() {
        let mut position = Position::from_fen("4k3/4r3/8/8/8/8/4P3/4K3 w - -").unwrap();

        let pseudo = pseudo_legal_moves(&position);
        let legal = legal_moves(&mut position);

        assert!(legal.len() <= pseudo.len());

        for mv in &legal {
            assert!(pseudo.contains(mv));
        }
    }
}
