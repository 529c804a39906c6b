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

//! Chess variants.
//!
//! All variants share one [`Position`](crate::Position) type. The rules
//! that differ between them are answered by the queries on [`Variant`].

use core::{fmt, str::FromStr};

use crate::{color::Color, errors::IllegalArgument, role::Role};

/// Rule set a position is played under.
#[derive(Debug, Eq, PartialEq, Hash, Clone, Copy, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Variant {
    /// Standard chess.
    #[default]
    Regular,
    /// Fischer random chess: shuffled back rank, castling with any rook.
    Chess960,
    /// Standard rules, but neither side has a king.
    NoKing,
    /// Only White has a king.
    WhiteKingOnly,
    /// Only Black has a king.
    BlackKingOnly,
    /// Captures are mandatory and the king is an ordinary piece.
    Antichess,
    /// White plays a horde of pawns without a king against a regular army.
    Horde,
}

/// How many kings of one color a legal position holds.
#[derive(Debug, Eq, PartialEq, Clone, Copy)]
pub(crate) enum KingCount {
    None,
    One,
    Any,
}

impl Variant {
    /// The lowercase name, as used in FEN prefixes like `chess960:`.
    pub const fn name(self) -> &'static str {
        match self {
            Variant::Regular => "regular",
            Variant::Chess960 => "chess960",
            Variant::NoKing => "no-king",
            Variant::WhiteKingOnly => "white-king-only",
            Variant::BlackKingOnly => "black-king-only",
            Variant::Antichess => "antichess",
            Variant::Horde => "horde",
        }
    }

    pub fn from_name(name: &str) -> Option<Variant> {
        Variant::ALL.into_iter().find(|variant| variant.name() == name)
    }

    pub(crate) const fn king_count(self, color: Color) -> KingCount {
        match (self, color) {
            (Variant::Antichess, _) => KingCount::Any,
            (Variant::Regular | Variant::Chess960, _) => KingCount::One,
            (Variant::NoKing, _) => KingCount::None,
            (Variant::WhiteKingOnly, Color::White) => KingCount::One,
            (Variant::WhiteKingOnly, Color::Black) => KingCount::None,
            (Variant::BlackKingOnly | Variant::Horde, Color::White) => KingCount::None,
            (Variant::BlackKingOnly | Variant::Horde, Color::Black) => KingCount::One,
        }
    }

    /// Tests if the king of `color` is royal: it may not be left in check
    /// and checkmating it ends the game.
    pub const fn has_royal_king(self, color: Color) -> bool {
        matches!(self.king_count(color), KingCount::One)
    }

    /// Tests if castling rights are meaningful for `color`.
    pub const fn allows_castling(self, color: Color) -> bool {
        self.has_royal_king(color)
    }

    /// Tests if castling rooks may start on any file.
    pub const fn is_chess960(self) -> bool {
        matches!(self, Variant::Chess960)
    }

    /// Tests if a capture must be played whenever one is available.
    pub const fn captures_are_mandatory(self) -> bool {
        matches!(self, Variant::Antichess)
    }

    /// Pieces a pawn of this variant may promote to.
    pub fn promotion_roles(self) -> &'static [Role] {
        match self {
            Variant::Antichess => &[Role::Queen, Role::Rook, Role::Bishop, Role::Knight, Role::King],
            _ => &[Role::Queen, Role::Rook, Role::Bishop, Role::Knight],
        }
    }

    /// Tests if a pawn of `color` may stand on its own back rank and push
    /// two squares from there.
    pub const fn has_wide_pawn_zone(self, color: Color) -> bool {
        matches!((self, color), (Variant::Horde, Color::White))
    }

    /// Tests if the variant has a standard initial position.
    pub const fn has_start_position(self) -> bool {
        !matches!(
            self,
            Variant::NoKing | Variant::WhiteKingOnly | Variant::BlackKingOnly
        )
    }

    pub const ALL: [Variant; 7] = [
        Variant::Regular,
        Variant::Chess960,
        Variant::NoKing,
        Variant::WhiteKingOnly,
        Variant::BlackKingOnly,
        Variant::Antichess,
        Variant::Horde,
    ];
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Variant {
    type Err = IllegalArgument;

    fn from_str(s: &str) -> Result<Variant, IllegalArgument> {
        Variant::from_name(s).ok_or(IllegalArgument::new("Variant::from_str"))
    }
}
