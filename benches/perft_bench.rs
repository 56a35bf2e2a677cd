use criterion::{criterion_group, criterion_main, Criterion};

use chess_king::{movegen::perft, position::Position};

fn perft_benchmarks(c: &mut Criterion) {
    c.bench_function("perft starting depth 3", |b| {
        let mut position = Position::starting();
        b.iter(|| perft(&mut position, 3))
    });

    c.bench_function("perft kiwipete depth 2", |b| {
        let mut position = Position::from_fen(
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq -",
        )
        .unwrap();
        b.iter(|| perft(&mut position, 2))
    });
}

criterion_group!(benches, perft_benchmarks);
criterion_main!(benches);
