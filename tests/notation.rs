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

use echiquier::{
    errors::NotationErrorKind, FenOptions, Position, Square, Strictness, Variant,
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct Record {
    fen: String,
    uci: String,
    san: String,
}

fn play(pos: &mut Position, sans: &[&str]) {
    for san in sans {
        assert!(pos.play_notation(san), "{san} in {}", pos.fen());
    }
}

#[test]
fn test_notation_table() {
    let mut reader = csv::Reader::from_path("tests/data/notation.csv").expect("notation table");
    for record in reader.deserialize() {
        let record: Record = record.expect("valid record");
        let pos: Position = record.fen.parse().expect("valid fen");

        let m = pos
            .parse_uci(&record.uci, Strictness::Strict)
            .expect("legal uci");
        assert_eq!(pos.san(&m), record.san, "{record:?}");
        assert_eq!(pos.uci(&m), record.uci, "{record:?}");
        assert_eq!(
            pos.parse_san(&record.san, Strictness::Strict),
            Ok(m),
            "{record:?}"
        );
        assert!(pos.moves().contains(&m), "{record:?}");

        let figurine = pos.figurine(&m);
        assert_eq!(pos.parse_figurine(&figurine, Strictness::Strict), Ok(m));
    }
}

#[test]
fn test_moves_have_unique_notation() {
    let mut pos = Position::default();
    play(&mut pos, &["e4", "e5", "Nf3", "Nc6", "Bb5", "a6", "Ba4", "Nf6", "O-O"]);

    let moves = pos.moves();
    for m in &moves {
        let san = pos.san(m);
        assert_eq!(pos.parse_san(&san, Strictness::Strict), Ok(*m), "{san}");
        let uci = pos.uci(m);
        assert_eq!(pos.parse_uci(&uci, Strictness::Strict), Ok(*m), "{uci}");
    }
}

#[test]
fn test_start_position_round_trip() {
    let fen = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
    assert_eq!(Position::default().fen(), fen);

    let pos = Position::from_fen(Variant::Regular, fen, Strictness::Strict).expect("valid fen");
    assert_eq!(pos, Position::default());
    assert_eq!(pos.fen(), fen);
}

#[test]
fn test_blocked_queen() {
    let pos = Position::default();
    let err = pos
        .parse_san("Qh5", Strictness::Relaxed)
        .expect_err("queen is blocked by its own pawn");
    assert_eq!(*err.kind(), NotationErrorKind::NoCandidate);

    // The queen reaches d3 but is pinned to its king.
    let pinned = Position::from_fen(
        Variant::Regular,
        "k3r3/8/8/8/8/8/4Q3/4K3 w - - 0 1",
        Strictness::Strict,
    )
    .expect("valid fen");
    let err = pinned
        .parse_san("Qd3", Strictness::Relaxed)
        .expect_err("queen is pinned");
    assert_eq!(*err.kind(), NotationErrorKind::IllegalMove);

    let mut pos = Position::default();
    play(&mut pos, &["d4", "e5"]);
    assert!(!pos.play_notation("Qh5"));

    let mut pos = Position::default();
    play(&mut pos, &["e4", "e5", "Bc4", "Nc6", "Qh5"]);
    assert!(!pos.is_checkmate());
    assert!(!pos.is_check());
    assert!(pos.has_move());
}

#[test]
fn test_fools_mate() {
    let mut pos = Position::default();
    play(&mut pos, &["f3", "e5", "g4", "Qh4#"]);
    assert!(pos.is_check());
    assert!(pos.is_checkmate());
    assert!(!pos.is_stalemate());
    assert!(pos.moves().is_empty());
}

#[test]
fn test_en_passant() {
    let mut pos = Position::default();
    play(&mut pos, &["e4", "a6", "e5", "d5"]);
    assert_eq!(pos.effective_en_passant(), Some(echiquier::File::D));

    let m = pos.parse_san("exd6", Strictness::Strict).expect("en passant");
    assert!(m.is_en_passant());
    assert_eq!(m.en_passant_square(), Some(Square::D5));

    pos.play(&m);
    assert_eq!(pos.piece_at(Square::D5), None);
    assert!(pos.piece_at(Square::D6).is_some());
    assert_eq!(pos.piece_at(Square::E5), None);
}

#[test]
fn test_castling_rights() {
    let mut pos = Position::default();
    play(&mut pos, &["e4", "e5", "Nf3", "Nc6", "Bc4", "Bc5"]);

    let m = pos.parse_san("O-O", Strictness::Strict).expect("castling");
    assert!(m.is_castling());
    assert_eq!(m.to(), Square::G1);
    assert_eq!(m.rook_to(), Some(Square::F1));

    let mut after = pos.clone();
    after.play(&m);
    assert_eq!(
        after.piece_at(Square::G1),
        Some(echiquier::Role::King.of(echiquier::Color::White))
    );
    assert_eq!(
        after.piece_at(Square::F1),
        Some(echiquier::Role::Rook.of(echiquier::Color::White))
    );

    play(&mut pos, &["Ke2", "Ke7", "Ke1", "Ke8"]);
    let err = pos
        .parse_san("O-O", Strictness::Relaxed)
        .expect_err("rights are gone");
    assert!(matches!(err.kind(), NotationErrorKind::IllegalCastling(_)));
    assert_eq!(
        pos.fen(),
        "r1bqk1nr/pppp1ppp/2n5/2b1p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w - - 0 1"
    );
}

#[test]
fn test_chess960_518() {
    let pos = Position::chess960(518).expect("valid scharnagl number");
    assert_eq!(pos.board(), Position::default().board());
    assert_eq!(
        pos.fen_with(&FenOptions {
            regular_fen_if_possible: true,
            ..FenOptions::default()
        }),
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"
    );
    assert_eq!(
        pos.fen(),
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w AHah - 0 1"
    );
}

#[test]
fn test_errors_carry_context() {
    let pos = Position::default();
    let err = pos
        .parse_san("Nf6", Strictness::Relaxed)
        .expect_err("no knight reaches f6");
    assert_eq!(*err.kind(), NotationErrorKind::NoCandidate);
    assert_eq!(err.notation(), "Nf6");
    assert_eq!(err.fen(), pos.fen());

    let err: echiquier::Error = pos
        .parse_uci("e2e5", Strictness::Relaxed)
        .expect_err("illegal pawn move")
        .into();
    assert!(err.to_string().contains("e2e5"));
}
