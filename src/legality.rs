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

use tracing::trace;

use crate::{
    attacks,
    bitboard::Bitboard,
    castling_side::{CastlingFiles, CastlingSide},
    color::{ByColor, Color},
    m::{Move, MoveKind},
    position::{cached, Position},
    role::Role,
    square::{File, Rank, Square},
    variant::{KingCount, Variant},
};

/// The first inconsistency found in a position.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum Violation {
    KingCount { color: Color },
    NoPieces { color: Color },
    OppositeCheck,
    PawnsOnBackrank,
    InvalidCastling { color: Color },
    InvalidEnPassant,
}

impl Position {
    /// Tests if the position is self-consistent under its variant.
    ///
    /// Checks in order, stopping at the first failure:
    ///
    /// 1. Each color has as many kings as the variant expects.
    /// 2. In antichess the side that just moved has a piece left. In horde
    ///    White has a piece left when Black is to move.
    /// 3. The royal king of the side not to move is not attacked.
    /// 4. No pawn stands on the first or last rank (horde allows White pawns
    ///    on the first rank).
    /// 5. Every castling flag points at a rook of its color on the back
    ///    rank, next to a king on its home rank. Unless Chess960, the king
    ///    stands on the e-file and the rook in a corner.
    /// 6. The en passant file, if any, points at an opposing pawn that could
    ///    just have advanced two squares.
    ///
    /// The verdict is cached until the next mutation.
    pub fn is_legal(&self) -> bool {
        cached(&self.legal, || match self.check_legality() {
            Ok(()) => true,
            Err(violation) => {
                trace!(?violation, board = %self.board.board_fen(), turn = %self.turn, "illegal position");
                false
            }
        })
    }

    fn check_legality(&self) -> Result<(), Violation> {
        for color in Color::ALL {
            let kings = self.board.by_piece(Role::King.of(color)).count();
            let expected = match self.variant.king_count(color) {
                KingCount::None => kings == 0,
                KingCount::One => kings == 1,
                KingCount::Any => true,
            };
            if !expected {
                return Err(Violation::KingCount { color });
            }
        }

        let mover = !self.turn;
        match self.variant {
            Variant::Antichess if self.board.by_color(mover).is_empty() => {
                return Err(Violation::NoPieces { color: mover });
            }
            Variant::Horde
                if self.turn.is_black() && self.board.by_color(Color::White).is_empty() =>
            {
                return Err(Violation::NoPieces {
                    color: Color::White,
                });
            }
            _ => (),
        }

        if let Some(king) = self.king_square(mover) {
            if self.is_attacked(king, self.turn) {
                return Err(Violation::OppositeCheck);
            }
        }

        let mut backranks = Bitboard::from_rank(Rank::First) | Bitboard::from_rank(Rank::Eighth);
        if self.variant.has_wide_pawn_zone(Color::White) {
            backranks &= !(Bitboard::from_rank(Rank::First) & self.board.by_color(Color::White));
        }
        if (self.board.by_role(Role::Pawn) & backranks).any() {
            return Err(Violation::PawnsOnBackrank);
        }

        for color in Color::ALL {
            if self.castling_geometry(color) != *self.castling.get(color) {
                return Err(Violation::InvalidCastling { color });
            }
        }

        if let Some(file) = self.en_passant {
            let pushed = Square::from_coords(file, Rank::Fifth.relative_to(self.turn));
            let skipped = Square::from_coords(file, Rank::Sixth.relative_to(self.turn));
            let origin = Square::from_coords(file, Rank::Seventh.relative_to(self.turn));
            if self.board.piece_at(pushed) != Some(Role::Pawn.of(mover))
                || self.board.occupied().contains(skipped)
                || self.board.occupied().contains(origin)
            {
                return Err(Violation::InvalidEnPassant);
            }
        }

        Ok(())
    }

    /// The square of the royal king of `color`.
    ///
    /// `None` if the variant gives `color` no royal king, or if the board
    /// does not hold exactly one king of that color.
    pub fn king_square(&self, color: Color) -> Option<Square> {
        *cached(&self.kings, || {
            ByColor::new_with(|color| {
                if self.variant.has_royal_king(color) {
                    self.board.by_piece(Role::King.of(color)).single_square()
                } else {
                    None
                }
            })
        })
        .get(color)
    }

    /// The home square of a king of `color` that may still castle.
    pub(crate) fn castling_king(&self, color: Color) -> Option<Square> {
        if !self.variant.allows_castling(color) {
            return None;
        }
        let king = (self.board.by_piece(Role::King.of(color))
            & Bitboard::from_rank(color.backrank()))
        .single_square()?;
        if !self.variant.is_chess960() && king.file() != File::E {
            return None;
        }
        Some(king)
    }

    /// The raw castling flags of `color` that point at a rook next to a
    /// king on its home rank. Outside Chess960 only corner rooks count.
    pub(crate) fn castling_geometry(&self, color: Color) -> CastlingFiles {
        let Some(king) = self.castling_king(color) else {
            return CastlingFiles::empty();
        };
        let rook = Role::Rook.of(color);
        let chess960 = self.variant.is_chess960();
        self.castling
            .get(color)
            .files()
            .filter(|&file| {
                (chess960 || file == File::A || file == File::H)
                    && file != king.file()
                    && self.board.piece_at(Square::from_coords(file, color.backrank()))
                        == Some(rook)
            })
            .fold(CastlingFiles::empty(), |acc, file| {
                acc | CastlingFiles::from_file(file)
            })
    }

    /// The castling flags of `color` that could be exercised once the path
    /// is clear: corner rooks in regular chess, and in Chess960 a single
    /// flagged rook on each side of the king.
    pub(crate) fn exercisable_castling(&self, color: Color) -> CastlingFiles {
        let geometry = self.castling_geometry(color);
        let Some(king) = self.castling_king(color) else {
            return CastlingFiles::empty();
        };
        if !self.variant.is_chess960() {
            return geometry;
        }
        CastlingSide::ALL
            .into_iter()
            .filter_map(|side| geometry.on_side(king.file(), side).single_file())
            .fold(CastlingFiles::empty(), |acc, file| {
                acc | CastlingFiles::from_file(file)
            })
    }

    /// The castling rights of `color` that are backed by the board.
    ///
    /// Empty for illegal positions. Castling may still be impossible right
    /// now because of blocking pieces or attacked squares; see
    /// [`Position::is_move_legal()`].
    pub fn effective_castling(&self, color: Color) -> CastlingFiles {
        *cached(&self.effective_castling, || {
            if self.is_legal() {
                ByColor::new_with(|color| self.exercisable_castling(color))
            } else {
                ByColor::default()
            }
        })
        .get(color)
    }

    /// The en passant file, if some pawn of the side to move can actually
    /// capture en passant.
    pub fn effective_en_passant(&self) -> Option<File> {
        cached(&self.effective_en_passant, || {
            if !self.is_legal() {
                return None;
            }
            let file = self.en_passant?;
            let to = Square::from_coords(file, Rank::Sixth.relative_to(self.turn));
            let captured = Square::from_coords(file, Rank::Fifth.relative_to(self.turn));
            let pawn = Role::Pawn.of(self.turn);
            let capturers = self.board.by_piece(pawn) & attacks::pawn_attacks(!self.turn, to);
            capturers
                .into_iter()
                .any(|from| {
                    self.is_king_safe_after(&Move::new(
                        from,
                        to,
                        pawn,
                        MoveKind::EnPassant { captured },
                    ))
                })
                .then_some(file)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Strictness;

    fn fen(variant: Variant, fen: &str) -> Position {
        Position::from_fen(variant, fen, Strictness::Relaxed).expect("valid fen")
    }

    #[test]
    fn test_king_counts() {
        assert!(fen(Variant::Regular, "4k3/8/8/8/8/8/8/4K3 w - - 0 1").is_legal());
        assert!(!fen(Variant::Regular, "4k3/8/8/8/8/8/8/8 w - - 0 1").is_legal());
        assert!(!fen(Variant::Regular, "4k3/8/8/8/8/8/8/3KK3 w - - 0 1").is_legal());
        assert!(fen(Variant::NoKing, "8/8/8/8/8/8/8/4R3 w - - 0 1").is_legal());
        assert!(!fen(Variant::NoKing, "4k3/8/8/8/8/8/8/4R3 w - - 0 1").is_legal());
        assert!(fen(Variant::WhiteKingOnly, "8/8/8/8/8/8/8/4K3 b - - 0 1").is_legal());
        assert!(!fen(Variant::BlackKingOnly, "8/8/8/8/8/8/8/4K3 b - - 0 1").is_legal());
        assert!(fen(Variant::Antichess, "8/8/8/8/8/8/8/2KKK3 b - - 0 1").is_legal());
    }

    #[test]
    fn test_piece_presence() {
        assert!(!fen(Variant::Antichess, "8/8/8/8/8/8/8/4r3 b - - 0 1").is_legal());
        assert!(fen(Variant::Antichess, "8/8/8/8/8/8/8/4r3 w - - 0 1").is_legal());
        assert!(!fen(Variant::Horde, "4k3/8/8/8/8/8/8/8 b - - 0 1").is_legal());
        assert!(fen(Variant::Horde, "4k3/8/8/8/8/8/8/8 w - - 0 1").is_legal());
    }

    #[test]
    fn test_opposite_check() {
        let pos = fen(Variant::Regular, "4k3/8/8/8/8/8/8/4RK2 w - - 0 1");
        assert!(!pos.is_legal());
        assert_eq!(pos.effective_castling(Color::White), CastlingFiles::empty());
        assert!(fen(Variant::Regular, "4k3/8/8/8/8/8/8/4RK2 b - - 0 1").is_legal());
    }

    #[test]
    fn test_pawns_on_backrank() {
        assert!(!fen(Variant::Regular, "4k3/8/8/8/8/8/8/P3K3 w - - 0 1").is_legal());
        assert!(!fen(Variant::Regular, "p3k3/8/8/8/8/8/8/4K3 w - - 0 1").is_legal());
        assert!(fen(Variant::Horde, "4k3/8/8/8/8/8/8/P7 w - - 0 1").is_legal());
        assert!(!fen(Variant::Horde, "p3k3/8/8/8/8/8/8/P7 w - - 0 1").is_legal());
    }

    #[test]
    fn test_castling_flags() {
        assert!(fen(Variant::Regular, "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").is_legal());
        assert!(!fen(Variant::Regular, "r3k2r/8/8/8/8/8/8/R4K1R w KQkq - 0 1").is_legal());
        assert!(!fen(Variant::Regular, "r3k3/8/8/8/8/8/8/R3K2R w KQkq - 0 1").is_legal());

        let mut pos = fen(Variant::Regular, "4k3/8/8/8/8/8/8/1R2K2R w K - 0 1");
        pos.set_castling(Color::White, File::B, true);
        assert!(!pos.is_legal());

        let pos = fen(Variant::Chess960, "1r2k1r1/8/8/8/8/8/8/1R2K1R1 w GBgb - 0 1");
        assert!(pos.is_legal());
        assert_eq!(
            pos.effective_castling(Color::Black),
            CastlingFiles::B | CastlingFiles::G
        );
    }

    #[test]
    fn test_chess960_effective_castling() {
        let mut pos = fen(Variant::Chess960, "4k3/8/8/8/8/8/8/RR2K3 w AB - 0 1");
        assert!(pos.is_legal());
        assert_eq!(pos.effective_castling(Color::White), CastlingFiles::empty());
        pos.set_castling(Color::White, File::A, false);
        assert_eq!(pos.effective_castling(Color::White), CastlingFiles::B);
    }

    #[test]
    fn test_en_passant() {
        let pos = fen(
            Variant::Regular,
            "rnbqkbnr/1pp1pppp/p7/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 3",
        );
        assert!(pos.is_legal());
        assert_eq!(pos.effective_en_passant(), Some(File::D));

        let pos = fen(Variant::Regular, "4k3/8/8/3p4/8/8/8/4K3 w - d6 0 1");
        assert!(pos.is_legal());
        assert_eq!(pos.effective_en_passant(), None);

        assert!(!fen(Variant::Regular, "4k3/8/8/4P3/8/8/8/4K3 w - d6 0 1").is_legal());
        assert!(!fen(Variant::Regular, "4k3/3p4/8/3pP3/8/8/8/4K3 w - d6 0 1").is_legal());
    }

    #[test]
    fn test_pinned_en_passant() {
        // Capturing would expose the king on the fifth rank.
        let pos = fen(Variant::Regular, "8/8/8/K2pP2r/8/8/8/7k w - d6 0 1");
        assert!(pos.is_legal());
        assert_eq!(pos.effective_en_passant(), None);
    }

    #[test]
    fn test_idempotent() {
        let pos = fen(Variant::Regular, "4k3/8/8/8/8/8/8/4K3 w - - 0 1");
        let before = pos.clone();
        assert_eq!(pos.is_legal(), pos.is_legal());
        assert_eq!(pos, before);
    }
}
