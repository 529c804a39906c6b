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

use core::ops;

use bitflags::bitflags;

use crate::{
    color::Color,
    square::{File, Square},
};

/// `KingSide` (O-O) or `QueenSide` (O-O-O).
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum CastlingSide {
    KingSide,
    QueenSide,
}

impl CastlingSide {
    #[inline]
    pub const fn is_queen_side(self) -> bool {
        matches!(self, CastlingSide::QueenSide)
    }

    #[inline]
    pub const fn is_king_side(self) -> bool {
        matches!(self, CastlingSide::KingSide)
    }

    /// The side of a king on `king` that a rook on `rook` belongs to.
    #[inline]
    pub fn of_rook(king: File, rook: File) -> CastlingSide {
        if rook > king {
            CastlingSide::KingSide
        } else {
            CastlingSide::QueenSide
        }
    }

    pub const fn king_to_file(self) -> File {
        match self {
            CastlingSide::KingSide => File::G,
            CastlingSide::QueenSide => File::C,
        }
    }

    pub const fn rook_to_file(self) -> File {
        match self {
            CastlingSide::KingSide => File::F,
            CastlingSide::QueenSide => File::D,
        }
    }

    pub const fn king_to(self, color: Color) -> Square {
        Square::from_coords(self.king_to_file(), color.backrank())
    }

    pub const fn rook_to(self, color: Color) -> Square {
        Square::from_coords(self.rook_to_file(), color.backrank())
    }

    /// `O-O` or `O-O-O`.
    pub const fn san(self) -> &'static str {
        match self {
            CastlingSide::KingSide => "O-O",
            CastlingSide::QueenSide => "O-O-O",
        }
    }

    #[must_use]
    #[inline]
    pub const fn other(self) -> CastlingSide {
        match self {
            CastlingSide::KingSide => CastlingSide::QueenSide,
            CastlingSide::QueenSide => CastlingSide::KingSide,
        }
    }

    /// `KingSide` and `QueenSide`, in this order.
    pub const ALL: [CastlingSide; 2] = [CastlingSide::KingSide, CastlingSide::QueenSide];
}

impl ops::Not for CastlingSide {
    type Output = CastlingSide;

    #[inline]
    fn not(self) -> CastlingSide {
        self.other()
    }
}

bitflags! {
    /// Files of the back rank whose rook still carries castling rights,
    /// kept per color.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
    pub struct CastlingFiles: u8 {
        const A = 1 << 0;
        const B = 1 << 1;
        const C = 1 << 2;
        const D = 1 << 3;
        const E = 1 << 4;
        const F = 1 << 5;
        const G = 1 << 6;
        const H = 1 << 7;
    }
}

impl CastlingFiles {
    #[inline]
    pub const fn from_file(file: File) -> CastlingFiles {
        CastlingFiles::from_bits_retain(1 << file as u8)
    }

    #[inline]
    pub fn has(self, file: File) -> bool {
        self.contains(CastlingFiles::from_file(file))
    }

    /// Flagged files in ascending order.
    pub fn files(self) -> impl DoubleEndedIterator<Item = File> {
        File::ALL.into_iter().filter(move |&file| self.has(file))
    }

    /// Flagged files on one side of a king standing on `king`.
    pub fn on_side(self, king: File, side: CastlingSide) -> CastlingFiles {
        self.files()
            .filter(|&file| file != king && CastlingSide::of_rook(king, file) == side)
            .fold(CastlingFiles::empty(), |acc, file| acc | CastlingFiles::from_file(file))
    }

    /// The single flagged file, if exactly one is set.
    pub fn single_file(self) -> Option<File> {
        if self.bits().count_ones() == 1 {
            File::try_new(self.bits().trailing_zeros())
        } else {
            None
        }
    }
}
