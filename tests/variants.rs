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
    errors::NotationErrorKind, Color, File, FenOptions, Position, Role, Square, Strictness,
    Variant,
};

fn pos(text: &str) -> Position {
    text.parse().expect("valid fen")
}

#[test]
fn test_variant_names() {
    for variant in Variant::ALL {
        assert_eq!(Variant::from_name(variant.name()), Some(variant));
    }
    assert_eq!(Variant::from_name("crazyhouse"), None);
}

#[test]
fn test_variant_prefix_round_trip() {
    for text in [
        "antichess:rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w - - 0 1",
        "horde:rnbqkbnr/pppppppp/8/1PP2PP1/PPPPPPPP/PPPPPPPP/PPPPPPPP/PPPPPPPP w kq - 0 1",
        "chess960:bqnb1rkr/pp3ppp/3ppn2/2p5/5P2/P2P4/NPP1P1PP/BQ1BNRKR w FHfh - 0 1",
        "no-king:8/pppppppp/8/8/8/8/PPPPPPPP/8 w - - 0 1",
    ] {
        let pos = pos(text);
        let options = FenOptions {
            with_variant: true,
            ..FenOptions::default()
        };
        assert_eq!(pos.fen_with(&options), text);
    }
}

#[test]
fn test_antichess_captures_are_mandatory() {
    let pos = pos("antichess:rnbqkbnr/pppp1ppp/8/4p3/3P4/8/PPP1PPPP/RNBQKBNR w - - 0 2");
    let moves = pos.moves();
    assert_eq!(moves.len(), 1);
    assert_eq!(moves[0].from(), Square::D4);
    assert!(moves[0].is_capture());

    let err = pos
        .parse_san("e3", Strictness::Relaxed)
        .expect_err("capture is mandatory");
    assert_eq!(*err.kind(), NotationErrorKind::IllegalMove);
}

#[test]
fn test_antichess_kings_are_not_royal() {
    let pos = pos("antichess:8/8/8/8/8/8/8/Kk6 w - - 0 1");
    assert!(pos.is_legal());
    assert!(!pos.is_check());
    assert_eq!(pos.king_square(Color::White), None);

    let m = pos.parse_uci("a1b1", Strictness::Strict).expect("king takes king");
    assert_eq!(m.captured_piece(), Some(Role::King.of(Color::Black)));
}

#[test]
fn test_antichess_end_of_game() {
    // Blocked: no moves, the side to move has won.
    let blocked = pos("antichess:8/8/8/8/8/p7/P7/8 w - - 0 1");
    assert!(blocked.is_legal());
    assert!(blocked.is_checkmate());
    assert!(!blocked.is_stalemate());

    let empty = pos("antichess:8/8/8/8/8/8/8/k7 w - - 0 1");
    assert!(empty.is_legal());
    assert!(empty.is_checkmate());

    // The side that just moved must keep a piece.
    assert!(!pos("antichess:8/8/8/8/8/8/8/K7 w - - 0 1").is_legal());
}

#[test]
fn test_horde_end_of_game() {
    let mated = pos("horde:4k3/8/8/8/8/8/8/8 w - - 0 1");
    assert!(mated.is_legal());
    assert!(mated.is_checkmate());
    assert!(!mated.is_stalemate());

    let blocked = pos("horde:4k3/8/8/8/8/p7/P7/8 w - - 0 1");
    assert!(blocked.is_stalemate());
    assert!(!blocked.is_checkmate());

    assert!(!pos("horde:4k3/8/8/8/8/8/8/8 b - - 0 1").is_legal());
}

#[test]
fn test_horde_pawns_on_first_rank() {
    let mut pos = pos("horde:4k3/8/8/8/8/1p6/8/P7 w - - 0 1");
    assert!(pos.is_legal());
    assert_eq!(pos.moves().len(), 2);

    let m = pos.parse_uci("a1a3", Strictness::Strict).expect("double push");
    pos.play(&m);
    assert_eq!(pos.en_passant(), None);

    let mut pos = self::pos("horde:4k3/8/8/8/1p6/8/P7/8 w - - 0 1");
    assert!(pos.play_notation("a4"));
    assert_eq!(pos.en_passant(), Some(File::A));
    assert!(pos.play_notation("bxa3"));
}

#[test]
fn test_king_count() {
    let fen = "4k3/8/8/8/8/8/8/4K3 w - - 0 1";
    let both = |variant| Position::from_fen(variant, fen, Strictness::Relaxed).expect("valid fen");
    assert!(both(Variant::Regular).is_legal());
    assert!(!both(Variant::NoKing).is_legal());
    assert!(!both(Variant::WhiteKingOnly).is_legal());
    assert!(!both(Variant::BlackKingOnly).is_legal());

    let white_only = Position::from_fen(
        Variant::WhiteKingOnly,
        "8/pppppppp/8/8/8/8/8/4K3 w - - 0 1",
        Strictness::Relaxed,
    )
    .expect("valid fen");
    assert!(white_only.is_legal());
    assert!(!white_only.is_check());
    assert_eq!(white_only.moves().len(), 5);
}

#[test]
fn test_chess960_king_and_rook_swap() {
    let mut pos = pos("chess960:4k3/8/8/8/8/8/8/5KR1 w G - 0 1");
    let m = pos.parse_san("O-O", Strictness::Strict).expect("castling");
    assert_eq!(pos.uci(&m), "f1g1");

    pos.play(&m);
    assert_eq!(pos.piece_at(Square::G1), Some(Role::King.of(Color::White)));
    assert_eq!(pos.piece_at(Square::F1), Some(Role::Rook.of(Color::White)));
    assert!(pos.castling_files(Color::White).is_empty());
}
