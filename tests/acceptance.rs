//! End-to-end acceptance scenarios from spec §8 that exercise the public
//! `Engine`/`Position` surface rather than any one subsystem's internals.

use std::time::Duration;

use plum_chess::eval::material_psqt::MaterialPsqtEvaluator;
use plum_chess::movegen::perft::perft;
use plum_chess::search::{Engine, SearchLimits};
use plum_chess::Position;

fn quick_limits(max_depth: u8) -> SearchLimits {
    SearchLimits {
        max_depth,
        min_depth: max_depth,
        use_opening_book: false,
        use_tablebase: false,
        max_time: Duration::from_secs(30),
        ..SearchLimits::default()
    }
}

#[test]
fn mate_in_one_is_found_and_scored_above_the_mate_threshold() {
    let mut position = Position::from_fen("6k1/5ppp/8/8/8/8/5PPP/R5K1 w - - 0 1").unwrap();
    let mut engine = Engine::new(MaterialPsqtEvaluator::default());

    let outcome = engine.best_move(&mut position, &quick_limits(2));

    assert_eq!(outcome.best_move.unwrap().to_long_algebraic(), "a1a8");
    assert!(outcome.score >= 1_000_000);
}

#[test]
fn engine_walks_into_a_stalemate_trap_rather_than_a_winning_line() {
    // Black to move, a single king versus a queen and king: every legal
    // king move is a stalemate, so the engine cannot do better than a draw.
    let mut position = Position::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
    let mut engine = Engine::new(MaterialPsqtEvaluator::default());

    let outcome = engine.best_move(&mut position, &quick_limits(2));

    assert_eq!(outcome.best_move, None, "black has no legal moves: stalemate");
    assert_eq!(outcome.score, 0);
}

#[test]
fn threefold_repetition_is_detected_after_the_same_position_recurs() {
    let mut position = Position::startpos();
    let knight_shuffle = ["g1f3", "g8f6", "f3g1", "f6g8"];

    // Play the shuffle twice: the starting position then recurs a second
    // and third time (once per full shuffle), each via a reversible move.
    for _ in 0..2 {
        for lan in knight_shuffle {
            let (from, to, _) = plum_chess::Move::from_long_algebraic_untyped(lan).unwrap();
            let moves = plum_chess::movegen::generate_legal_moves(&position);
            let mv = moves
                .contains_from_to(from, to)
                .expect("shuffle move should be legal");
            position.make(mv);
        }
    }

    assert!(position.is_threefold_repetition());
}

#[test]
fn perft_matches_published_reference_counts_for_every_required_scenario() {
    let mut startpos = Position::startpos();
    assert_eq!(perft(&mut startpos, 1), 20);
    assert_eq!(perft(&mut startpos, 2), 400);
    assert_eq!(perft(&mut startpos, 3), 8_902);
    assert_eq!(perft(&mut startpos, 4), 197_281);

    let mut kiwipete =
        Position::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1")
            .unwrap();
    assert_eq!(perft(&mut kiwipete, 1), 48);
    assert_eq!(perft(&mut kiwipete, 2), 2_039);
    assert_eq!(perft(&mut kiwipete, 3), 97_862);

    let mut en_passant_discovered =
        Position::from_fen("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1").unwrap();
    assert_eq!(perft(&mut en_passant_discovered, 1), 14);
    assert_eq!(perft(&mut en_passant_discovered, 4), 43_238);

    let mut promotion_heavy =
        Position::from_fen("n1n5/PPPk4/8/8/8/8/4Kppp/5N1N b - - 0 1").unwrap();
    assert_eq!(perft(&mut promotion_heavy, 1), 24);
    assert_eq!(perft(&mut promotion_heavy, 3), 62_379);
}

/// The four deepest published reference counts from spec §8, each an order
/// of magnitude slower than the depths above; kept in a separate `#[ignore]`
/// test so the default `cargo test` run stays fast while these are still
/// one `cargo test -- --ignored` away from being checked.
#[test]
#[ignore]
fn perft_matches_published_reference_counts_at_the_deepest_published_depths() {
    let mut startpos = Position::startpos();
    assert_eq!(perft(&mut startpos, 5), 4_865_609);

    let mut kiwipete =
        Position::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1")
            .unwrap();
    assert_eq!(perft(&mut kiwipete, 4), 4_085_603);

    let mut en_passant_discovered =
        Position::from_fen("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1").unwrap();
    assert_eq!(perft(&mut en_passant_discovered, 5), 674_624);

    let mut promotion_heavy =
        Position::from_fen("n1n5/PPPk4/8/8/8/8/4Kppp/5N1N b - - 0 1").unwrap();
    assert_eq!(perft(&mut promotion_heavy, 5), 3_605_103);
}

#[test]
fn iterative_deepening_reuses_the_same_engine_across_successive_moves() {
    let mut position = Position::startpos();
    let mut engine = Engine::new(MaterialPsqtEvaluator::default());
    let limits = quick_limits(3);

    let first = engine.best_move(&mut position, &limits);
    assert!(first.best_move.is_some());
    position.make(first.best_move.unwrap());

    let second = engine.best_move(&mut position, &limits);
    assert!(second.best_move.is_some());
    assert!(second.tt_stats.stores > 0);
}
