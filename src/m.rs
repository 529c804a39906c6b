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

use arrayvec::ArrayVec;

use crate::{
    castling_side::CastlingSide, color::Color, role::Role, square::Square, types::Piece,
};

/// What kind of move a [`Move`] is, with the data that kind needs.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum MoveKind {
    /// A piece moves, possibly capturing whatever stood on the target.
    Regular { capture: Option<Role> },
    /// The king moves to the c- or g-file and the rook jumps next to it.
    Castling { rook_from: Square, rook_to: Square },
    /// A pawn captures the pawn that just passed it.
    EnPassant { captured: Square },
    /// A pawn reaches the last rank and turns into `promotion`.
    Promotion {
        promotion: Role,
        capture: Option<Role>,
    },
}

/// A fully resolved legal move in a specific position.
///
/// Moves are only produced by [`Position`](crate::Position): by its move
/// generator, by [`Position::is_move_legal()`](crate::Position::is_move_legal)
/// and by the notation decoders. They carry everything needed to play them
/// and to write them in any notation.
///
/// # Display
///
/// `Move` implements [`Display`](fmt::Display) using long algebraic notation,
/// e.g. `Ng1-f3`, `e5xd6` or `O-O`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Move {
    from: Square,
    to: Square,
    piece: Piece,
    kind: MoveKind,
}

impl Move {
    pub(crate) const fn new(from: Square, to: Square, piece: Piece, kind: MoveKind) -> Move {
        Move {
            from,
            to,
            piece,
            kind,
        }
    }

    #[inline]
    pub const fn from(&self) -> Square {
        self.from
    }

    /// The target square. For castling moves this is the square the king
    /// lands on.
    #[inline]
    pub const fn to(&self) -> Square {
        self.to
    }

    #[inline]
    pub const fn kind(&self) -> MoveKind {
        self.kind
    }

    #[inline]
    pub const fn color(&self) -> Color {
        self.piece.color
    }

    /// The piece standing on the origin square.
    #[inline]
    pub const fn moving_piece(&self) -> Piece {
        self.piece
    }

    /// The piece standing on the target square after the move.
    pub const fn final_piece(&self) -> Piece {
        match self.kind {
            MoveKind::Promotion { promotion, .. } => promotion.of(self.piece.color),
            _ => self.piece,
        }
    }

    /// The captured piece, if any.
    pub const fn captured_piece(&self) -> Option<Piece> {
        match self.kind {
            MoveKind::Regular { capture: Some(role) }
            | MoveKind::Promotion {
                capture: Some(role),
                ..
            } => Some(role.of(self.piece.color.other())),
            MoveKind::EnPassant { .. } => Some(Role::Pawn.of(self.piece.color.other())),
            _ => None,
        }
    }

    #[inline]
    pub const fn is_capture(&self) -> bool {
        self.captured_piece().is_some()
    }

    #[inline]
    pub const fn is_castling(&self) -> bool {
        matches!(self.kind, MoveKind::Castling { .. })
    }

    #[inline]
    pub const fn is_en_passant(&self) -> bool {
        matches!(self.kind, MoveKind::EnPassant { .. })
    }

    #[inline]
    pub const fn is_promotion(&self) -> bool {
        matches!(self.kind, MoveKind::Promotion { .. })
    }

    pub const fn promotion(&self) -> Option<Role> {
        match self.kind {
            MoveKind::Promotion { promotion, .. } => Some(promotion),
            _ => None,
        }
    }

    /// The origin of the castling rook.
    pub const fn rook_from(&self) -> Option<Square> {
        match self.kind {
            MoveKind::Castling { rook_from, .. } => Some(rook_from),
            _ => None,
        }
    }

    /// The destination of the castling rook.
    pub const fn rook_to(&self) -> Option<Square> {
        match self.kind {
            MoveKind::Castling { rook_to, .. } => Some(rook_to),
            _ => None,
        }
    }

    pub fn castling_side(&self) -> Option<CastlingSide> {
        match self.kind {
            MoveKind::Castling { rook_from, .. } => Some(CastlingSide::of_rook(
                self.from.file(),
                rook_from.file(),
            )),
            _ => None,
        }
    }

    /// The square of the pawn removed by an en passant capture.
    pub const fn en_passant_square(&self) -> Option<Square> {
        match self.kind {
            MoveKind::EnPassant { captured } => Some(captured),
            _ => None,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(side) = self.castling_side() {
            return f.write_str(side.san());
        }
        if self.piece.role != Role::Pawn {
            f.write_char(self.piece.role.upper_char())?;
        }
        write!(
            f,
            "{}{}{}",
            self.from,
            if self.is_capture() { 'x' } else { '-' },
            self.to
        )?;
        if let Some(promotion) = self.promotion() {
            write!(f, "={}", promotion.upper_char())?;
        }
        Ok(())
    }
}

/// A container for moves that can be stored inline on the stack.
///
/// The capacity is chosen to fit all legal moves in all variants.
pub type MoveList = ArrayVec<Move, 512>;
