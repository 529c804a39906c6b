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

//! Parse and write moves in Universal Chess Interface representation.
//!
//! # Examples
//!
//! ```
//! use echiquier::{uci::Uci, Position, Square, Strictness};
//!
//! let uci: Uci = "g1f3".parse()?;
//! assert_eq!(uci.from, Square::G1);
//!
//! let pos = Position::default();
//! let m = pos.parse_uci("g1f3", Strictness::Strict)?;
//! assert_eq!(pos.uci(&m), "g1f3");
//! # Ok::<_, echiquier::Error>(())
//! ```

use alloc::string::{String, ToString};
use core::{fmt, str::FromStr};

use crate::{
    castling_side::CastlingSide,
    errors::{IllegalArgument, InvalidNotation, NotationErrorKind},
    m::Move,
    movegen::MoveStatus,
    position::Position,
    role::Role,
    square::Square,
    types::Strictness,
};

/// How castling moves are written.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum UciCastling {
    /// `e1g1`: the king moves to its destination square.
    KingToDestination,
    /// `e1h1`: the king takes its own rook, as in Chess960.
    KingTakesRook,
}

/// A move in UCI notation, without position context.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub struct Uci {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<Role>,
}

impl Uci {
    /// Parses `[a-h][1-8][a-h][1-8][qrbnk]?`.
    pub fn from_ascii(s: &[u8]) -> Option<Uci> {
        let (squares, promotion) = match *s {
            [ref squares @ .., promotion] if s.len() == 5 => (squares, Some(promotion)),
            _ => (s, None),
        };
        let [from @ .., _, _] = squares else {
            return None;
        };
        if from.len() != 2 {
            return None;
        }
        let promotion = match promotion {
            Some(ch) => match Role::from_char(char::from(ch)) {
                Some(Role::Pawn) | None => return None,
                Some(role) if ch.is_ascii_lowercase() => Some(role),
                Some(_) => return None,
            },
            None => None,
        };
        Some(Uci {
            from: Square::from_ascii(from)?,
            to: Square::from_ascii(&squares[2..])?,
            promotion,
        })
    }
}

impl FromStr for Uci {
    type Err = IllegalArgument;

    fn from_str(s: &str) -> Result<Uci, IllegalArgument> {
        Uci::from_ascii(s.trim().as_bytes()).ok_or(IllegalArgument::new("Uci::from_str"))
    }
}

impl fmt::Display for Uci {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(promotion) = self.promotion {
            write!(f, "{}", promotion.char())?;
        }
        Ok(())
    }
}

impl Position {
    /// Writes `m` in UCI notation. Castling is written as king takes rook
    /// in Chess960 and as king to destination otherwise.
    pub fn uci(&self, m: &Move) -> String {
        let castling = if self.variant.is_chess960() {
            UciCastling::KingTakesRook
        } else {
            UciCastling::KingToDestination
        };
        self.uci_with(m, castling)
    }

    pub fn uci_with(&self, m: &Move, castling: UciCastling) -> String {
        let to = match (castling, m.rook_from()) {
            (UciCastling::KingTakesRook, Some(rook_from)) => rook_from,
            _ => m.to(),
        };
        Uci {
            from: m.from(),
            to,
            promotion: m.promotion(),
        }
        .to_string()
    }

    /// Resolves a move in UCI notation.
    ///
    /// Outside of Chess960, relaxed mode also accepts castling written as
    /// king takes rook. In Chess960, strict mode requires it.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidNotation`] if the text is malformed or the move is
    /// not legal.
    ///
    /// # Examples
    ///
    /// ```
    /// use echiquier::{Position, Strictness};
    ///
    /// let pos: Position = "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1".parse()?;
    /// let castling = pos.parse_uci("e1g1", Strictness::Strict)?;
    /// assert!(castling.is_castling());
    /// assert_eq!(pos.parse_uci("e1h1", Strictness::Relaxed)?, castling);
    /// assert!(pos.parse_uci("e1h1", Strictness::Strict).is_err());
    /// # Ok::<_, echiquier::Error>(())
    /// ```
    pub fn parse_uci(&self, text: &str, strictness: Strictness) -> Result<Move, InvalidNotation> {
        let err = |kind| InvalidNotation::new(self.fen(), text, kind);

        let uci: Uci = text
            .parse()
            .map_err(|_| err(NotationErrorKind::InvalidSyntax))?;
        if !self.is_legal() {
            return Err(err(NotationErrorKind::IllegalPosition));
        }

        let m = match self.is_move_legal(uci.from, uci.to) {
            MoveStatus::Legal(m) => {
                if uci.promotion.is_some() {
                    return Err(err(NotationErrorKind::UnexpectedPromotion));
                }
                if strictness.is_strict()
                    && self.variant.is_chess960()
                    && m.rook_from().is_some_and(|rook_from| rook_from != uci.to)
                {
                    return Err(err(NotationErrorKind::KingTakesRookRequired));
                }
                m
            }
            // In Chess960 UCI, castling is always king takes rook.
            MoveStatus::Castle960(choice) => choice.king_move(),
            MoveStatus::Promotion(choice) => {
                let role = uci
                    .promotion
                    .ok_or_else(|| err(NotationErrorKind::MissingPromotion))?;
                choice
                    .promote(role)
                    .ok_or_else(|| err(NotationErrorKind::IllegalPromotion(role)))?
            }
            MoveStatus::Illegal => {
                if strictness.is_strict() || self.variant.is_chess960() {
                    return Err(err(NotationErrorKind::IllegalMove));
                }
                self.king_takes_rook(uci.from, uci.to)
                    .ok_or_else(|| err(NotationErrorKind::IllegalMove))?
            }
        };
        Ok(m)
    }

    /// Castling written as the king taking its own rook.
    fn king_takes_rook(&self, king: Square, rook: Square) -> Option<Move> {
        if self.king_square(self.turn) != Some(king)
            || self.board.piece_at(rook) != Some(Role::Rook.of(self.turn))
        {
            return None;
        }
        self.castling_move(CastlingSide::of_rook(king.file(), rook.file()))
            .filter(|m| m.rook_from() == Some(rook))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variant::Variant;

    fn kind(pos: &Position, uci: &str, strictness: Strictness) -> NotationErrorKind {
        pos.parse_uci(uci, strictness)
            .expect_err("notation must be rejected")
            .kind()
            .clone()
    }

    #[test]
    fn test_syntax() {
        for uci in ["e2e4", "a7a8q", "h2h1n", "b7b8k"] {
            assert_eq!(uci.parse::<Uci>().expect("valid uci").to_string(), uci);
        }
        for uci in ["", "e2", "e2e4e5", "a7a8Q", "a7a8p", "i2i4", "e0e1", "0000"] {
            assert!(uci.parse::<Uci>().is_err(), "{uci}");
        }
    }

    #[test]
    fn test_round_trip() {
        let pos = Position::default();
        for m in pos.moves() {
            let uci = pos.uci(&m);
            assert_eq!(pos.parse_uci(&uci, Strictness::Strict), Ok(m));
        }
    }

    #[test]
    fn test_promotion() {
        let pos: Position = "4k3/1P6/8/8/8/8/8/4K3 w - - 0 1".parse().expect("valid fen");
        let m = pos.parse_uci("b7b8n", Strictness::Strict).expect("underpromotion");
        assert_eq!(m.promotion(), Some(Role::Knight));
        assert_eq!(pos.uci(&m), "b7b8n");
        assert_eq!(
            kind(&pos, "b7b8", Strictness::Relaxed),
            NotationErrorKind::MissingPromotion
        );
        assert_eq!(
            kind(&pos, "b7b8k", Strictness::Relaxed),
            NotationErrorKind::IllegalPromotion(Role::King)
        );
        assert_eq!(
            kind(&pos, "e1e2q", Strictness::Relaxed),
            NotationErrorKind::UnexpectedPromotion
        );
    }

    #[test]
    fn test_castling() {
        let pos: Position = "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1".parse().expect("valid fen");
        let m = pos.parse_uci("e1c1", Strictness::Strict).expect("castling");
        assert_eq!(m.castling_side(), Some(CastlingSide::QueenSide));
        assert_eq!(pos.uci(&m), "e1c1");
        assert_eq!(pos.uci_with(&m, UciCastling::KingTakesRook), "e1a1");
        assert_eq!(pos.parse_uci("e1a1", Strictness::Relaxed), Ok(m));
        assert_eq!(
            kind(&pos, "e1a1", Strictness::Strict),
            NotationErrorKind::IllegalMove
        );
    }

    #[test]
    fn test_chess960_castling() {
        let pos = Position::from_fen(
            Variant::Chess960,
            "4k3/8/8/8/8/8/8/RK6 w A - 0 1",
            Strictness::Relaxed,
        )
        .expect("valid fen");

        let castling = pos.parse_uci("b1a1", Strictness::Strict).expect("king takes rook");
        assert!(castling.is_castling());
        assert_eq!(pos.uci(&castling), "b1a1");
        assert_eq!(
            pos.uci_with(&castling, UciCastling::KingToDestination),
            "b1c1"
        );

        // b1c1 is a plain king move in Chess960.
        let m = pos.parse_uci("b1c1", Strictness::Strict).expect("king move");
        assert!(!m.is_castling());
    }

    #[test]
    fn test_chess960_king_takes_rook_required() {
        let pos = Position::from_fen(
            Variant::Chess960,
            "4k3/8/8/8/8/8/8/4K2R w H - 0 1",
            Strictness::Relaxed,
        )
        .expect("valid fen");
        assert_eq!(
            kind(&pos, "e1g1", Strictness::Strict),
            NotationErrorKind::KingTakesRookRequired
        );
        let m = pos.parse_uci("e1g1", Strictness::Relaxed).expect("relaxed castling");
        assert_eq!(pos.uci(&m), "e1h1");
    }

    #[test]
    fn test_illegal() {
        let pos = Position::default();
        assert_eq!(kind(&pos, "e2e5", Strictness::Relaxed), NotationErrorKind::IllegalMove);
        assert_eq!(kind(&pos, "e7e5", Strictness::Relaxed), NotationErrorKind::IllegalMove);
        assert_eq!(kind(&pos, "e2e", Strictness::Relaxed), NotationErrorKind::InvalidSyntax);
    }
}
