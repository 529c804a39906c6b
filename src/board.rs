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

use core::fmt::{self, Write as _};

use crate::{
    attacks,
    bitboard::Bitboard,
    color::{ByColor, Color},
    role::Role,
    square::{File, Rank, Square},
    types::Piece,
};

/// Piece positions on a board.
///
/// # Examples
///
/// ```
/// use echiquier::{Board, Color, Role, Square};
///
/// let board = Board::standard();
/// // r n b q k b n r
/// // p p p p p p p p
/// // . . . . . . . .
/// // . . . . . . . .
/// // . . . . . . . .
/// // . . . . . . . .
/// // P P P P P P P P
/// // R N B Q K B N R
///
/// assert_eq!(board.piece_at(Square::E8), Some(Role::King.of(Color::Black)));
/// ```
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct Board {
    by_role: [Bitboard; 6],
    by_color: ByColor<Bitboard>,
    occupied: Bitboard,
}

const STANDARD_BACK_RANK: [Role; 8] = [
    Role::Rook,
    Role::Knight,
    Role::Bishop,
    Role::Queen,
    Role::King,
    Role::Bishop,
    Role::Knight,
    Role::Rook,
];

impl Board {
    /// A board without pieces.
    pub const fn empty() -> Board {
        Board {
            by_role: [Bitboard::EMPTY; 6],
            by_color: ByColor {
                white: Bitboard::EMPTY,
                black: Bitboard::EMPTY,
            },
            occupied: Bitboard::EMPTY,
        }
    }

    /// The standard starting arrangement.
    pub fn standard() -> Board {
        Board::from_back_rank(&STANDARD_BACK_RANK)
    }

    /// Pawns on the second and seventh ranks, and the given back rank
    /// mirrored for both colors.
    pub fn from_back_rank(back_rank: &[Role; 8]) -> Board {
        let mut board = Board::empty();
        for (file, &role) in File::ALL.into_iter().zip(back_rank) {
            for color in Color::ALL {
                board.set_piece_at(
                    Square::from_coords(file, color.backrank()),
                    role.of(color),
                );
                board.set_piece_at(
                    Square::from_coords(file, Rank::Second.relative_to(color)),
                    Role::Pawn.of(color),
                );
            }
        }
        board
    }

    /// The horde starting arrangement: 36 white pawns against a regular
    /// black army.
    pub fn horde() -> Board {
        let mut board = Board::empty();
        for (file, &role) in File::ALL.into_iter().zip(&STANDARD_BACK_RANK) {
            board.set_piece_at(Square::from_coords(file, Rank::Eighth), role.of(Color::Black));
            board.set_piece_at(
                Square::from_coords(file, Rank::Seventh),
                Role::Pawn.of(Color::Black),
            );
            for rank in [Rank::First, Rank::Second, Rank::Third, Rank::Fourth] {
                board.set_piece_at(Square::from_coords(file, rank), Role::Pawn.of(Color::White));
            }
        }
        for file in [File::B, File::C, File::F, File::G] {
            board.set_piece_at(
                Square::from_coords(file, Rank::Fifth),
                Role::Pawn.of(Color::White),
            );
        }
        board
    }

    #[inline]
    pub const fn occupied(&self) -> Bitboard {
        self.occupied
    }

    #[inline]
    pub const fn by_color(&self, color: Color) -> Bitboard {
        *self.by_color.get(color)
    }

    #[inline]
    pub const fn by_role(&self, role: Role) -> Bitboard {
        self.by_role[role as usize]
    }

    #[inline]
    pub fn by_piece(&self, piece: Piece) -> Bitboard {
        self.by_color(piece.color) & self.by_role(piece.role)
    }

    pub fn color_at(&self, sq: Square) -> Option<Color> {
        if self.by_color.white.contains(sq) {
            Some(Color::White)
        } else if self.by_color.black.contains(sq) {
            Some(Color::Black)
        } else {
            None
        }
    }

    pub fn role_at(&self, sq: Square) -> Option<Role> {
        if !self.occupied.contains(sq) {
            return None;
        }
        Role::ALL
            .into_iter()
            .find(|&role| self.by_role(role).contains(sq))
    }

    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        Some(Piece {
            color: self.color_at(sq)?,
            role: self.role_at(sq)?,
        })
    }

    /// Removes and returns the piece on `sq`, if any.
    pub fn remove_piece_at(&mut self, sq: Square) -> Option<Piece> {
        let piece = self.piece_at(sq);
        if let Some(piece) = piece {
            self.by_role[piece.role as usize].discard(sq);
            self.by_color.get_mut(piece.color).discard(sq);
            self.occupied.discard(sq);
        }
        piece
    }

    /// Puts `piece` on `sq`, replacing whatever stood there.
    pub fn set_piece_at(&mut self, sq: Square, piece: Piece) {
        self.remove_piece_at(sq);
        self.by_role[piece.role as usize].add(sq);
        self.by_color.get_mut(piece.color).add(sq);
        self.occupied.add(sq);
    }

    /// Pieces of `color` that attack `sq`, given the occupancy `occupied`
    /// for sliding pieces.
    pub fn attackers_to(&self, sq: Square, color: Color, occupied: Bitboard) -> Bitboard {
        let rooks_and_queens = self.by_role(Role::Rook) | self.by_role(Role::Queen);
        let bishops_and_queens = self.by_role(Role::Bishop) | self.by_role(Role::Queen);

        self.by_color(color)
            & ((attacks::rook_attacks(sq, occupied) & rooks_and_queens)
                | (attacks::bishop_attacks(sq, occupied) & bishops_and_queens)
                | (attacks::knight_attacks(sq) & self.by_role(Role::Knight))
                | (attacks::king_attacks(sq) & self.by_role(Role::King))
                | (attacks::pawn_attacks(!color, sq) & self.by_role(Role::Pawn)))
    }

    /// Writes the placement field of a FEN.
    pub fn board_fen(&self) -> BoardFen<'_> {
        BoardFen { board: self }
    }
}

impl Default for Board {
    fn default() -> Board {
        Board::standard()
    }
}

/// Displays the placement field of a FEN. See [`Board::board_fen()`].
#[derive(Debug)]
pub struct BoardFen<'b> {
    board: &'b Board,
}

impl fmt::Display for BoardFen<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in Rank::ALL.into_iter().rev() {
            let mut empty = 0;
            for file in File::ALL {
                match self.board.piece_at(Square::from_coords(file, rank)) {
                    Some(piece) => {
                        if empty > 0 {
                            write!(f, "{empty}")?;
                            empty = 0;
                        }
                        f.write_char(piece.char())?;
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                write!(f, "{empty}")?;
            }
            if rank > Rank::First {
                f.write_char('/')?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in Rank::ALL.into_iter().rev() {
            for file in File::ALL {
                let sq = Square::from_coords(file, rank);
                f.write_char(self.piece_at(sq).map_or('.', Piece::char))?;
                f.write_char(if file < File::H { ' ' } else { '\n' })?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn test_piece_at() {
        let board = Board::standard();
        assert_eq!(board.piece_at(Square::A2), Some(Role::Pawn.of(Color::White)));
        assert_eq!(board.piece_at(Square::B1), Some(Role::Knight.of(Color::White)));
        assert_eq!(board.piece_at(Square::E5), None);
    }

    #[test]
    fn test_set_piece_at() {
        let mut board = Board::empty();
        board.set_piece_at(Square::A3, Role::Pawn.of(Color::White));
        board.set_piece_at(Square::A3, Role::Queen.of(Color::Black));
        assert_eq!(board.piece_at(Square::A3), Some(Role::Queen.of(Color::Black)));
        assert_eq!(board.occupied().count(), 1);
        assert_eq!(board.by_role(Role::Pawn), Bitboard::EMPTY);
        assert_eq!(board.remove_piece_at(Square::A3), Some(Role::Queen.of(Color::Black)));
        assert_eq!(board, Board::empty());
    }

    #[test]
    fn test_board_fen() {
        assert_eq!(
            Board::standard().board_fen().to_string(),
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR"
        );
        assert_eq!(
            Board::horde().board_fen().to_string(),
            "rnbqkbnr/pppppppp/8/1PP2PP1/PPPPPPPP/PPPPPPPP/PPPPPPPP/PPPPPPPP"
        );
        assert_eq!(Board::empty().board_fen().to_string(), "8/8/8/8/8/8/8/8");
    }

    #[test]
    fn test_attackers_to() {
        let board = Board::standard();
        let attackers = board.attackers_to(Square::F3, Color::White, board.occupied());
        assert_eq!(
            attackers,
            Bitboard::from(Square::G1).with(Square::E2).with(Square::G2)
        );
        assert!(board
            .attackers_to(Square::E4, Color::White, board.occupied())
            .is_empty());
    }
}
