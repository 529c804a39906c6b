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

use core::{fmt, str::FromStr};

use crate::{color::Color, errors::IllegalArgument, role::Role};

/// A piece with [`Color`] and [`Role`].
#[allow(missing_docs)]
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Piece {
    pub color: Color,
    pub role: Role,
}

impl Piece {
    /// FEN letter: uppercase for White, lowercase for Black.
    pub fn char(self) -> char {
        self.color.fold_wb(self.role.upper_char(), self.role.char())
    }

    pub fn from_char(ch: char) -> Option<Piece> {
        Role::from_char(ch).map(|role| role.of(Color::from_white(ch.is_ascii_uppercase())))
    }

    /// Unicode chess glyph of the piece.
    pub const fn figurine(self) -> char {
        match (self.color, self.role) {
            (Color::White, Role::King) => '♔',
            (Color::White, Role::Queen) => '♕',
            (Color::White, Role::Rook) => '♖',
            (Color::White, Role::Bishop) => '♗',
            (Color::White, Role::Knight) => '♘',
            (Color::White, Role::Pawn) => '♙',
            (Color::Black, Role::King) => '♚',
            (Color::Black, Role::Queen) => '♛',
            (Color::Black, Role::Rook) => '♜',
            (Color::Black, Role::Bishop) => '♝',
            (Color::Black, Role::Knight) => '♞',
            (Color::Black, Role::Pawn) => '♟',
        }
    }

    pub const fn from_figurine(ch: char) -> Option<Piece> {
        let (color, role) = match ch {
            '♔' => (Color::White, Role::King),
            '♕' => (Color::White, Role::Queen),
            '♖' => (Color::White, Role::Rook),
            '♗' => (Color::White, Role::Bishop),
            '♘' => (Color::White, Role::Knight),
            '♙' => (Color::White, Role::Pawn),
            '♚' => (Color::Black, Role::King),
            '♛' => (Color::Black, Role::Queen),
            '♜' => (Color::Black, Role::Rook),
            '♝' => (Color::Black, Role::Bishop),
            '♞' => (Color::Black, Role::Knight),
            '♟' => (Color::Black, Role::Pawn),
            _ => return None,
        };
        Some(Piece { color, role })
    }
}

/// How forgiving a decoder is.
///
/// `Relaxed` accepts common deviations from canonical notation, such as
/// castling written with zeros or a promotion without `=`. `Strict` accepts
/// only the canonical form an encoder of this crate would produce.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash, Default)]
pub enum Strictness {
    #[default]
    Relaxed,
    Strict,
}

impl Strictness {
    #[inline]
    pub const fn is_strict(self) -> bool {
        matches!(self, Strictness::Strict)
    }
}

/// Two letters, color then role, as in `wk` or `bp`.
impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.color.char(), self.role.char())
    }
}

impl FromStr for Piece {
    type Err = IllegalArgument;

    fn from_str(s: &str) -> Result<Piece, IllegalArgument> {
        let mut chars = s.chars();
        match (
            chars.next().and_then(Color::from_char),
            chars.next().filter(char::is_ascii_lowercase).and_then(Role::from_char),
            chars.next(),
        ) {
            (Some(color), Some(role), None) => Ok(role.of(color)),
            _ => Err(IllegalArgument::new("Piece::from_str")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_piece_letters() {
        assert_eq!(Piece::from_char('K'), Some(Role::King.of(Color::White)));
        assert_eq!(Piece::from_char('p'), Some(Role::Pawn.of(Color::Black)));
        assert_eq!(Piece::from_char('x'), None);
        assert_eq!(Role::Queen.of(Color::Black).char(), 'q');
    }

    #[test]
    fn test_piece_from_str() {
        assert_eq!("wk".parse::<Piece>(), Ok(Role::King.of(Color::White)));
        assert_eq!("bn".parse::<Piece>(), Ok(Role::Knight.of(Color::Black)));
        assert!("wK".parse::<Piece>().is_err());
        assert!("wkk".parse::<Piece>().is_err());
        assert!("xk".parse::<Piece>().is_err());
    }

    #[test]
    fn test_figurine() {
        for color in Color::ALL {
            for role in Role::ALL {
                let piece = role.of(color);
                assert_eq!(Piece::from_figurine(piece.figurine()), Some(piece));
            }
        }
    }
}
