
use rand::{rngs::StdRng, Rng, SeedableRng};

use chess_king::{
    movegen::legal_moves,
    position::Position,
    types::Side,
    zobrist,
};
use test_utils::*;

mod keys {
    use super::*;

    #[test]
    fn starting_hash_is_reproducible() {
        // Keys come from a fixed seed; the same position always hashes the
        // same across invocations.
        let first = Position::starting();
        let second = Position::starting();

        assert_ne!(first.hash, 0);
        assert_eq!(first.hash, second.hash);
    }

    #[test]
    fn side_to_move_changes_the_hash() {
        let white_to_move = Position::from_fen("4k3/8/8/8/8/8/8/4K3 w - -").unwrap();
        let black_to_move = Position::from_fen("4k3/8/8/8/8/8/8/4K3 b - -").unwrap();

        assert_ne!(white_to_move.hash, black_to_move.hash);
    }

    #[test]
    fn castle_rights_change_the_hash() {
        let all = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq -").unwrap();
        let none = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w - -").unwrap();

        assert_ne!(all.hash, none.hash);
    }

    #[test]
    fn en_passant_file_changes_the_hash() {
        let without = Position::from_fen("4k3/8/8/8/4Pp2/8/8/4K3 b - -").unwrap();
        let with = Position::from_fen("4k3/8/8/8/4Pp2/8/8/4K3 b - e3").unwrap();

        assert_ne!(without.hash, with.hash);
    }
}

mod incremental {
    use super::*;

    #[test]
    fn make_move_updates_hash_incrementally() {
        let mut position = Position::starting();
        make(&mut position, "e2e4");

        assert_eq!(position.hash, zobrist::compute(&position));
    }

    #[test]
    fn transpositions_hash_identically() {
        let first = position_from_history(&["g1f3", "g8f6", "b1c3", "b8c6"]);
        let second = position_from_history(&["b1c3", "b8c6", "g1f3", "g8f6"]);

        assert_eq!(first.hash, second.hash);
    }

    #[test]
    fn same_squares_different_en_passant_state_differ() {
        // A double push and a pair of single pushes reach the same squares,
        // but only the double push leaves an en-passant target.
        let double = position_from_history(&["e2e4", "a7a6", "b1c3", "d7d5"]);
        let single = position_from_history(&["e2e4", "a7a6", "b1c3", "d7d6"]);

        assert_ne!(double.hash, single.hash);
    }

    #[test]
    fn castling_round_trip_restores_hash() {
        let mut position =
            position_from_history(&["e2e4", "e7e5", "g1f3", "b8c6", "f1c4", "f8c5"]);
        let expected = position.hash;

        let mv = find_move(&mut position, "e1g1").expect("castling is legal");
        let undo = position.make_move(mv);
        assert_eq!(position.hash, zobrist::compute(&position));

        position.unmake_move(mv, undo);
        assert_eq!(position.hash, expected);
    }

    #[test]
    fn promotion_round_trip_restores_hash() {
        let mut position = Position::from_fen("8/P6k/8/8/8/8/8/K7 w - -").unwrap();
        let expected = position.hash;

        let mv = find_move(&mut position, "a7a8q").expect("promotion is legal");
        let undo = position.make_move(mv);
        assert_eq!(position.hash, zobrist::compute(&position));

        position.unmake_move(mv, undo);
        assert_eq!(position.hash, expected);
    }
}

mod round_trips {
    use super::*;

    #[test]
    fn every_legal_move_round_trips_from_the_start() {
        let mut position = Position::starting();
        let reference = Position::starting();

        for mv in legal_moves(&mut position) {
            let undo = position.make_move(mv);
            position.unmake_move(mv, undo);

            assert!(
                positions_equal(&position, &reference),
                "{} did not round-trip",
                mv.text()
            );
        }
    }

    #[test]
    fn random_playouts_keep_incremental_hash_consistent() {
        // Drive a few hundred random games; after every make the
        // incremental hash must match a from-scratch computation, and after
        // the unmake cascade the start position must return exactly.
        let mut rng = StdRng::seed_from_u64(20_240_601);

        for _ in 0..50 {
            let mut position = Position::starting();
            let reference = Position::starting();
            let mut line = Vec::new();

            for _ in 0..60 {
                let moves = legal_moves(&mut position);

                if moves.is_empty() {
                    break;
                }

                let mv = moves[rng.gen_range(0..moves.len())];
                let undo = position.make_move(mv);
                line.push((mv, undo));

                assert_eq!(
                    position.hash,
                    zobrist::compute(&position),
                    "incremental hash drifted after {}",
                    mv.text()
                );
            }

            for (mv, undo) in line.into_iter().rev() {
                position.unmake_move(mv, undo);
            }

            assert!(positions_equal(&position, &reference));
        }
    }

    #[test]
    fn side_not_to_move_is_never_in_check_along_random_play() {
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..20 {
            let mut position = Position::starting();

            for _ in 0..40 {
                let moves = legal_moves(&mut position);

                if moves.is_empty() {
                    break;
                }

                let mv = moves[rng.gen_range(0..moves.len())];
                position.make_move(mv);

                let resting = position.side.opponent();
                assert!(
                    !chess_king::attacks::is_in_check(&position, resting),
                    "{:?} is in check off-move",
                    resting
                );
            }
        }
    }
}

mod invariants {
    use super::*;

    #[test]
    fn exactly_one_king_per_side_survives_play() {
        let position = position_from_history(&["e2e4", "e7e5", "d1h5", "b8c6", "h5f7"]);

        for side in [Side::White, Side::Black] {
            let kings = (0..64)
                .filter(|&square| {
                    position.value[square] == chess_king::types::Piece::King
                        && position.color[square] == Some(side)
                })
                .count();

            assert_eq!(kings, 1);
        }
    }
}
