// This file is part of the echiquier library.
// Copyright (C) 2024 The echiquier developers
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <http://www.gnu.org/licenses/>.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use echiquier::{perft, Position, Square, Strictness, Variant};

const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
const MIDDLEGAME: &str = "rn1qkb1r/pbp2ppp/1p2p3/3n4/8/2N2NP1/PP1PPPBP/R1BQ1RK1 b kq - 0 1";

fn fen(fen: &str) -> Position {
    Position::from_fen(Variant::Regular, fen, Strictness::Strict).expect("valid fen")
}

fn bench_perft(c: &mut Criterion) {
    let mut group = c.benchmark_group("perft");
    group.sample_size(10);

    let start = Position::default();
    for depth in [3, 4] {
        group.bench_with_input(BenchmarkId::new("start", depth), &depth, |b, &depth| {
            b.iter(|| perft(black_box(&start), depth));
        });
    }

    let kiwipete = fen(KIWIPETE);
    group.bench_function("kiwipete/3", |b| {
        b.iter(|| assert_eq!(perft(black_box(&kiwipete), 3), 97_862));
    });

    group.finish();
}

fn bench_generate_moves(c: &mut Criterion) {
    let pos = fen(MIDDLEGAME);
    c.bench_function("generate_moves", |b| {
        b.iter(|| {
            // Fresh copy, so that cached legality is computed every time.
            let pos = black_box(pos.clone());
            assert_eq!(pos.moves().len(), 39);
        });
    });
}

fn bench_play(c: &mut Criterion) {
    let pos = fen(MIDDLEGAME);
    let m = pos
        .parse_uci("f8e7", Strictness::Strict)
        .expect("legal move");
    c.bench_function("play", |b| {
        b.iter(|| {
            let mut pos = black_box(pos.clone());
            pos.play(black_box(&m));
            pos
        });
    });
}

fn bench_san(c: &mut Criterion) {
    let pos = fen("r2q1rk1/pb1nbppp/5n2/1p2p3/3NP3/P1NB4/1P2QPPP/R1BR2K1 w - - 0 1");
    let m = pos
        .parse_uci("c3b5", Strictness::Strict)
        .expect("legal move");
    assert_eq!(m.to(), Square::B5);

    c.bench_function("san", |b| b.iter(|| pos.san(black_box(&m))));
    c.bench_function("parse_san", |b| {
        b.iter(|| pos.parse_san(black_box("Ncxb5"), Strictness::Strict))
    });
}

fn bench_play_sans(c: &mut Criterion) {
    let pgn = [
        "e4", "e5", "Nf3", "Nc6", "Bc4", "Nf6", "Ng5", "d5", "exd5", "Na5", "Bb5+", "c6", "dxc6",
        "bxc6", "Ba4", "Ba6", "d3", "Bc5", "O-O", "O-O", "Nc3", "Qc7", "Nge4", "Be7", "Nxf6+",
        "Bxf6", "Ne4", "Be7", "Re1", "Rad8", "f3", "c5", "Be3", "c4", "Qc1", "cxd3", "cxd3", "Qb8",
        "Nf2", "Bxd3", "Nxd3", "Rxd3", "Qc2", "Rxe3", "Rxe3", "Qb6", "Re1", "Bc5", "Qe4", "f5",
        "Qxe5", "f4", "Qd5+", "Kh8", "Kh1", "Bxe3", "b3", "Qd8", "Rd1", "Qxd5", "Rxd5", "Nb7",
        "b4", "Rd8", "Rxd8+", "Nxd8", "Bd7", "Kg8", "a4", "Kf8", "g4", "Ke7", "Bf5", "h6", "h4",
        "Nf7", "h5", "Nd6", "Bd3", "Ke6", "Kg2", "Kd5", "Kh3", "Nf7", "b5", "Bb6", "Kg2", "Kc5",
        "Kf1", "Ne5", "Be2", "Kb4", "Bd1", "Nc4", "Ke2", "Ne3", "g5", "hxg5", "Kd2", "Nxd1",
        "Kxd1", "Kxa4", "Kd2", "Kxb5", "Kd3", "a5", "Ke4", "a4", "Kf5", "a3", "h6", "gxh6",
    ];

    c.bench_function("play_sans", |b| {
        b.iter(|| {
            let mut pos = Position::default();
            for san in black_box(pgn) {
                assert!(pos.play_notation(san), "{san}");
            }
            pos
        });
    });
}

fn bench_fen(c: &mut Criterion) {
    let pos = fen(KIWIPETE);
    c.bench_function("fen", |b| b.iter(|| black_box(&pos).fen()));
    c.bench_function("parse_fen", |b| {
        b.iter(|| Position::from_fen(Variant::Regular, black_box(KIWIPETE), Strictness::Strict))
    });
}

criterion_group!(
    benches,
    bench_perft,
    bench_generate_moves,
    bench_play,
    bench_san,
    bench_play_sans,
    bench_fen,
);
criterion_main!(benches);
