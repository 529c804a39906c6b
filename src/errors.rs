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

//! Error types.
//!
//! Three families of failures exist: [`IllegalArgument`] for inputs outside
//! an operation's domain, [`InvalidFen`] for text that is not a valid FEN,
//! and [`InvalidNotation`] for move text that does not denote a legal move.
//! [`Error`] wraps all of them.

use alloc::string::String;
use core::{error, fmt};

use crate::{
    castling_side::CastlingSide,
    color::Color,
    role::Role,
    square::{File, Rank},
};

/// An accessor or constructor received an argument outside of its domain.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IllegalArgument {
    operation: &'static str,
}

impl IllegalArgument {
    pub(crate) const fn new(operation: &'static str) -> IllegalArgument {
        IllegalArgument { operation }
    }

    /// The name of the operation that rejected its argument.
    pub fn operation(&self) -> &'static str {
        self.operation
    }
}

impl fmt::Display for IllegalArgument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "illegal argument in {}", self.operation)
    }
}

impl error::Error for IllegalArgument {}

/// Reason a FEN string was rejected.
#[derive(Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum FenErrorKind {
    WrongFieldCount { found: usize },
    WrongRankCount { found: usize },
    UnexpectedBoardCharacter { ch: char, rank: Rank },
    WrongRankLength { rank: Rank },
    InvalidTurn,
    InvalidCastling,
    NonCanonicalCastling,
    UnexercisableCastling { color: Color, file: File },
    InvalidEnPassant,
    WrongEnPassantRank { expected: Rank },
    InvalidHalfmoves,
    InvalidFullmoves,
}

impl fmt::Display for FenErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            FenErrorKind::WrongFieldCount { found } => {
                write!(f, "expected 6 space-separated fields, found {found}")
            }
            FenErrorKind::WrongRankCount { found } => {
                write!(f, "expected 8 ranks in the board field, found {found}")
            }
            FenErrorKind::UnexpectedBoardCharacter { ch, rank } => {
                write!(f, "unexpected character {ch:?} on rank {rank}")
            }
            FenErrorKind::WrongRankLength { rank } => {
                write!(f, "rank {rank} does not describe exactly 8 squares")
            }
            FenErrorKind::InvalidTurn => f.write_str("turn must be 'w' or 'b'"),
            FenErrorKind::InvalidCastling => f.write_str("invalid castling field"),
            FenErrorKind::NonCanonicalCastling => {
                f.write_str("castling letters are not in canonical order")
            }
            FenErrorKind::UnexercisableCastling { color, file } => {
                write!(f, "{color} castling right on the {file}-file is not exercisable")
            }
            FenErrorKind::InvalidEnPassant => f.write_str("invalid en passant field"),
            FenErrorKind::WrongEnPassantRank { expected } => {
                write!(f, "en passant square must be on rank {expected}")
            }
            FenErrorKind::InvalidHalfmoves => f.write_str("invalid halfmove clock"),
            FenErrorKind::InvalidFullmoves => f.write_str("invalid fullmove number"),
        }
    }
}

/// A string could not be parsed as FEN.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InvalidFen {
    fen: String,
    kind: FenErrorKind,
}

impl InvalidFen {
    pub(crate) fn new(fen: &str, kind: FenErrorKind) -> InvalidFen {
        InvalidFen {
            fen: fen.into(),
            kind,
        }
    }

    /// The rejected text.
    pub fn fen(&self) -> &str {
        &self.fen
    }

    pub fn kind(&self) -> &FenErrorKind {
        &self.kind
    }
}

impl fmt::Display for InvalidFen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid fen {:?}: {}", self.fen, self.kind)
    }
}

impl error::Error for InvalidFen {}

/// Reason a move notation was rejected.
#[derive(Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum NotationErrorKind {
    InvalidSyntax,
    /// Syntax accepted only in relaxed mode.
    RelaxedSyntax,
    IllegalPosition,
    IllegalCastling(CastlingSide),
    NoCandidate,
    AmbiguousMove,
    IllegalMove,
    MissingPromotion,
    UnexpectedPromotion,
    IllegalPromotion(Role),
    WrongDisambiguation,
    MissingCaptureMarker,
    UnexpectedCaptureMarker,
    WrongSuffix { expected: Option<char> },
    KingTakesRookRequired,
}

impl fmt::Display for NotationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            NotationErrorKind::InvalidSyntax => f.write_str("invalid syntax"),
            NotationErrorKind::RelaxedSyntax => {
                f.write_str("syntax is not accepted in strict mode")
            }
            NotationErrorKind::IllegalPosition => f.write_str("position is not legal"),
            NotationErrorKind::IllegalCastling(side) => write!(f, "{} is not legal", side.san()),
            NotationErrorKind::NoCandidate => {
                f.write_str("no piece of that kind can reach the target square")
            }
            NotationErrorKind::AmbiguousMove => {
                f.write_str("several pieces can reach the target square")
            }
            NotationErrorKind::IllegalMove => f.write_str("illegal move"),
            NotationErrorKind::MissingPromotion => f.write_str("promotion piece is missing"),
            NotationErrorKind::UnexpectedPromotion => f.write_str("move is not a promotion"),
            NotationErrorKind::IllegalPromotion(role) => {
                write!(f, "cannot promote to {}", role.upper_char())
            }
            NotationErrorKind::WrongDisambiguation => {
                f.write_str("disambiguation is not the minimal one")
            }
            NotationErrorKind::MissingCaptureMarker => f.write_str("capture marker 'x' is missing"),
            NotationErrorKind::UnexpectedCaptureMarker => {
                f.write_str("capture marker 'x' on a non-capture")
            }
            NotationErrorKind::WrongSuffix { expected: Some(suffix) } => {
                write!(f, "expected suffix '{suffix}'")
            }
            NotationErrorKind::WrongSuffix { expected: None } => {
                f.write_str("unexpected check suffix")
            }
            NotationErrorKind::KingTakesRookRequired => {
                f.write_str("chess960 castling must be written as king takes rook")
            }
        }
    }
}

/// A move notation could not be resolved in a position.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InvalidNotation {
    fen: String,
    notation: String,
    kind: NotationErrorKind,
}

impl InvalidNotation {
    pub(crate) fn new(fen: String, notation: &str, kind: NotationErrorKind) -> InvalidNotation {
        InvalidNotation {
            fen,
            notation: notation.into(),
            kind,
        }
    }

    /// FEN of the position the notation was resolved in.
    pub fn fen(&self) -> &str {
        &self.fen
    }

    pub fn notation(&self) -> &str {
        &self.notation
    }

    pub fn kind(&self) -> &NotationErrorKind {
        &self.kind
    }
}

impl fmt::Display for InvalidNotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid move notation {:?} in {}: {}",
            self.notation, self.fen, self.kind
        )
    }
}

impl error::Error for InvalidNotation {}

/// Any error raised by this crate.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Error {
    IllegalArgument(IllegalArgument),
    InvalidFen(InvalidFen),
    InvalidNotation(InvalidNotation),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::IllegalArgument(err) => err.fmt(f),
            Error::InvalidFen(err) => err.fmt(f),
            Error::InvalidNotation(err) => err.fmt(f),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::IllegalArgument(err) => Some(err),
            Error::InvalidFen(err) => Some(err),
            Error::InvalidNotation(err) => Some(err),
        }
    }
}

impl From<IllegalArgument> for Error {
    fn from(err: IllegalArgument) -> Error {
        Error::IllegalArgument(err)
    }
}

impl From<InvalidFen> for Error {
    fn from(err: InvalidFen) -> Error {
        Error::InvalidFen(err)
    }
}

impl From<InvalidNotation> for Error {
    fn from(err: InvalidNotation) -> Error {
        Error::InvalidNotation(err)
    }
}
