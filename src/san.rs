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

//! Read and write Standard Algebraic Notation, with letters or figurines.
//!
//! # Examples
//!
//! Parse and write SANs without a position:
//!
//! ```
//! use echiquier::san::SanPlus;
//!
//! let san: SanPlus = "Nbd7+".parse()?;
//! assert_eq!(san.to_string(), "Nbd7+");
//! # Ok::<_, echiquier::IllegalArgument>(())
//! ```
//!
//! Resolve a SAN in a position and write it back:
//!
//! ```
//! use echiquier::{Position, Square, Strictness};
//!
//! let pos = Position::default();
//! let m = pos.parse_san("Nf3", Strictness::Strict)?;
//! assert_eq!(m.from(), Square::G1);
//!
//! assert_eq!(pos.san(&m), "Nf3");
//! assert_eq!(pos.figurine(&m), "♘f3");
//! # Ok::<_, echiquier::InvalidNotation>(())
//! ```

use alloc::string::String;
use core::{
    fmt::{self, Write as _},
    str::FromStr,
};

use arrayvec::ArrayVec;

use crate::{
    attacks,
    bitboard::Bitboard,
    castling_side::CastlingSide,
    color::Color,
    errors::{IllegalArgument, InvalidNotation, NotationErrorKind},
    m::Move,
    movegen::MoveStatus,
    position::Position,
    role::Role,
    square::{File, Rank, Square},
    types::{Piece, Strictness},
};

/// Whether pieces are written as English letters or Unicode glyphs.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash, Default)]
pub enum NotationStyle {
    /// `Nf3`, `exd8=Q`.
    #[default]
    Letters,
    /// `♘f3`, `exd8=♕`, with glyphs in the color of the moving side.
    Figurine,
}

impl NotationStyle {
    fn piece_char(self, role: Role, color: Color) -> char {
        match self {
            NotationStyle::Letters => role.upper_char(),
            NotationStyle::Figurine => role.of(color).figurine(),
        }
    }

    fn role_from_char(self, ch: char) -> Option<Role> {
        if ch.is_ascii_uppercase() {
            return Role::from_char(ch);
        }
        match self {
            NotationStyle::Letters => None,
            NotationStyle::Figurine => Piece::from_figurine(ch).map(|p| p.role),
        }
    }
}

/// A move in Standard Algebraic Notation, without check suffix.
#[derive(Clone, Eq, PartialEq, Debug, Hash)]
pub enum San {
    /// A piece or pawn move. For pawns, `file` is the origin file of a
    /// capture.
    Normal {
        role: Role,
        file: Option<File>,
        rank: Option<Rank>,
        capture: bool,
        to: Square,
        promotion: Option<Role>,
    },
    Castle(CastlingSide),
}

impl San {
    fn write_to<W: fmt::Write>(&self, f: &mut W, style: NotationStyle, color: Color) -> fmt::Result {
        match *self {
            San::Normal {
                role,
                file,
                rank,
                capture,
                to,
                promotion,
            } => {
                if role != Role::Pawn {
                    f.write_char(style.piece_char(role, color))?;
                }
                if let Some(file) = file {
                    f.write_char(file.char())?;
                }
                if let Some(rank) = rank {
                    f.write_char(rank.char())?;
                }
                if capture {
                    f.write_char('x')?;
                }
                write!(f, "{to}")?;
                if let Some(promotion) = promotion {
                    f.write_char('=')?;
                    f.write_char(style.piece_char(promotion, color))?;
                }
                Ok(())
            }
            San::Castle(side) => f.write_str(side.san()),
        }
    }
}

impl fmt::Display for San {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_to(f, NotationStyle::Letters, Color::White)
    }
}

impl FromStr for San {
    type Err = IllegalArgument;

    fn from_str(s: &str) -> Result<San, IllegalArgument> {
        match lex(s, NotationStyle::Letters) {
            Some(Lexed { san, suffix: None, .. }) => Ok(san),
            _ => Err(IllegalArgument::new("San::from_str")),
        }
    }
}

/// Check (`+`) or checkmate (`#`).
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum Suffix {
    Check,
    Checkmate,
}

impl Suffix {
    pub const fn char(self) -> char {
        match self {
            Suffix::Check => '+',
            Suffix::Checkmate => '#',
        }
    }

    pub const fn from_char(ch: char) -> Option<Suffix> {
        match ch {
            '+' => Some(Suffix::Check),
            '#' => Some(Suffix::Checkmate),
            _ => None,
        }
    }
}

impl fmt::Display for Suffix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char(self.char())
    }
}

/// A [`San`] and possibly a check or checkmate suffix.
#[derive(Clone, Eq, PartialEq, Debug, Hash)]
pub struct SanPlus {
    pub san: San,
    pub suffix: Option<Suffix>,
}

impl SanPlus {
    fn write_to<W: fmt::Write>(&self, f: &mut W, style: NotationStyle, color: Color) -> fmt::Result {
        self.san.write_to(f, style, color)?;
        if let Some(suffix) = self.suffix {
            f.write_char(suffix.char())?;
        }
        Ok(())
    }

    /// Writes the move in `style`, with figurines in the color of the
    /// moving side.
    pub fn to_notation(&self, style: NotationStyle, color: Color) -> String {
        let mut s = String::new();
        let _ = self.write_to(&mut s, style, color);
        s
    }
}

impl fmt::Display for SanPlus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_to(f, NotationStyle::Letters, Color::White)
    }
}

impl FromStr for SanPlus {
    type Err = IllegalArgument;

    fn from_str(s: &str) -> Result<SanPlus, IllegalArgument> {
        lex(s, NotationStyle::Letters)
            .map(|Lexed { san, suffix, .. }| SanPlus { san, suffix })
            .ok_or(IllegalArgument::new("SanPlus::from_str"))
    }
}

/// Result of lexing, remembering whether a relaxed spelling was used.
struct Lexed {
    san: San,
    suffix: Option<Suffix>,
    relaxed: bool,
}

fn lex(text: &str, style: NotationStyle) -> Option<Lexed> {
    let mut chars = ArrayVec::<char, 8>::new();
    for ch in text.trim().chars() {
        chars.try_push(ch).ok()?;
    }

    let suffix = chars.last().copied().and_then(Suffix::from_char);
    if suffix.is_some() {
        chars.pop();
    }

    let (san, relaxed) = match chars.as_slice() {
        ['O', '-', 'O'] => (San::Castle(CastlingSide::KingSide), false),
        ['O', '-', 'O', '-', 'O'] => (San::Castle(CastlingSide::QueenSide), false),
        ['0', '-', '0'] => (San::Castle(CastlingSide::KingSide), true),
        ['0', '-', '0', '-', '0'] => (San::Castle(CastlingSide::QueenSide), true),
        [first, rest @ ..] => match style.role_from_char(*first) {
            Some(Role::Pawn) => return None,
            Some(role) => (lex_piece_move(role, rest)?, false),
            None => lex_pawn_move(&chars, style)?,
        },
        [] => return None,
    };

    Some(Lexed {
        san,
        suffix,
        relaxed,
    })
}

fn lex_square(chars: &[char]) -> Option<Square> {
    match *chars {
        [file, rank] => Some(Square::from_coords(
            File::from_char(file)?,
            Rank::from_char(rank)?,
        )),
        _ => None,
    }
}

fn lex_piece_move(role: Role, chars: &[char]) -> Option<San> {
    let [body @ .., _, _] = chars else {
        return None;
    };
    let to = lex_square(&chars[body.len()..])?;

    let (body, capture) = match body {
        [body @ .., 'x'] => (body, true),
        _ => (body, false),
    };

    let (file, rank) = match *body {
        [] => (None, None),
        [ch] => match File::from_char(ch) {
            Some(file) => (Some(file), None),
            None => (None, Some(Rank::from_char(ch)?)),
        },
        [file, rank] => (Some(File::from_char(file)?), Some(Rank::from_char(rank)?)),
        _ => return None,
    };

    Some(San::Normal {
        role,
        file,
        rank,
        capture,
        to,
        promotion: None,
    })
}

fn lex_pawn_move(chars: &[char], style: NotationStyle) -> Option<(San, bool)> {
    let (body, promotion, relaxed) = match *chars {
        [ref body @ .., '=', ch] => (body, Some(style.role_from_char(ch)?), false),
        [ref body @ .., ch] if style.role_from_char(ch).is_some() => {
            (body, style.role_from_char(ch), true)
        }
        _ => (chars, None, false),
    };
    if promotion == Some(Role::Pawn) {
        return None;
    }

    let (file, capture, to) = match *body {
        [file, 'x', ref to @ ..] => (Some(File::from_char(file)?), true, lex_square(to)?),
        _ => (None, false, lex_square(body)?),
    };

    Some((
        San::Normal {
            role: Role::Pawn,
            file,
            rank: None,
            capture,
            to,
            promotion,
        },
        relaxed,
    ))
}

impl Position {
    /// Writes `m` in Standard Algebraic Notation with letters.
    ///
    /// `m` must be legal in this position.
    ///
    /// # Examples
    ///
    /// ```
    /// use echiquier::Position;
    ///
    /// let mut pos = Position::default();
    /// for san in ["f3", "e5", "g4"] {
    ///     assert!(pos.play_notation(san));
    /// }
    /// let m = pos.parse_san("Qh4#", Default::default())?;
    /// assert_eq!(pos.san(&m), "Qh4#");
    /// # Ok::<_, echiquier::InvalidNotation>(())
    /// ```
    pub fn san(&self, m: &Move) -> String {
        self.notation(m, NotationStyle::Letters)
    }

    /// Writes `m` in Standard Algebraic Notation with figurines.
    pub fn figurine(&self, m: &Move) -> String {
        self.notation(m, NotationStyle::Figurine)
    }

    pub fn notation(&self, m: &Move, style: NotationStyle) -> String {
        self.san_plus(m).to_notation(style, m.color())
    }

    /// The [`SanPlus`] of the legal move `m`, with minimal disambiguation
    /// and a suffix if it gives check.
    pub fn san_plus(&self, m: &Move) -> SanPlus {
        SanPlus {
            san: self.san_of(m),
            suffix: self.suffix_after(m),
        }
    }

    fn san_of(&self, m: &Move) -> San {
        if let Some(side) = m.castling_side() {
            return San::Castle(side);
        }
        let role = m.moving_piece().role;
        let (file, rank) = if role == Role::Pawn {
            (m.is_capture().then(|| m.from().file()), None)
        } else {
            self.disambiguation(m)
        };
        San::Normal {
            role,
            file,
            rank,
            capture: m.is_capture(),
            to: m.to(),
            promotion: m.promotion(),
        }
    }

    /// Smallest origin hint that tells `m` apart from moves of other pieces
    /// of the same kind to the same square.
    fn disambiguation(&self, m: &Move) -> (Option<File>, Option<Rank>) {
        let piece = m.moving_piece();
        let from = m.from();
        let others = (self.attackers(m.to(), piece.color) & self.board.by_piece(piece))
            .without(from)
            .into_iter()
            .filter(|&sq| !self.is_pinned_away(sq, m.to()))
            .collect::<Bitboard>();

        if others.is_empty() {
            (None, None)
        } else if (others & Bitboard::from_file(from.file())).is_empty() {
            (Some(from.file()), None)
        } else if (others & Bitboard::from_rank(from.rank())).is_empty() {
            (None, Some(from.rank()))
        } else {
            (Some(from.file()), Some(from.rank()))
        }
    }

    /// Whether the piece on `sq` is pinned to its royal king and `to` leaves
    /// the pin line.
    fn is_pinned_away(&self, sq: Square, to: Square) -> bool {
        let Some(color) = self.board.color_at(sq) else {
            return false;
        };
        let Some(king) = self.king_square(color) else {
            return false;
        };
        let line = attacks::ray(king, sq);
        if line.is_empty() || line.contains(to) {
            return false;
        }

        let them = self.board.by_color(!color);
        let occupied = self.board.occupied().without(sq);
        let queens = self.board.by_role(Role::Queen);
        let snipers = ((attacks::rook_attacks(king, occupied)
            & (self.board.by_role(Role::Rook) | queens))
            | (attacks::bishop_attacks(king, occupied)
                & (self.board.by_role(Role::Bishop) | queens)))
            & them
            & line;

        snipers
            .into_iter()
            .any(|sniper| attacks::between(king, sniper).contains(sq))
    }

    fn suffix_after(&self, m: &Move) -> Option<Suffix> {
        let mut after = self.clone();
        after.play(m);
        if !after.is_check() {
            None
        } else if after.has_move() {
            Some(Suffix::Check)
        } else {
            Some(Suffix::Checkmate)
        }
    }

    /// Resolves a move in Standard Algebraic Notation with letters.
    ///
    /// In relaxed mode, castling may be written with zeros, the `=` before
    /// a promotion may be omitted, a redundant disambiguation is accepted
    /// and capture markers and check suffixes are not verified. In strict
    /// mode the text must be exactly what [`Position::san()`] would write.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidNotation`] with the reason the text does not
    /// resolve to a unique legal move.
    ///
    /// # Examples
    ///
    /// ```
    /// use echiquier::{Position, Strictness, errors::NotationErrorKind};
    ///
    /// let pos = Position::default();
    /// assert!(pos.parse_san("e4", Strictness::Strict).is_ok());
    ///
    /// let err = pos.parse_san("Qh5", Strictness::Relaxed).unwrap_err();
    /// assert_eq!(*err.kind(), NotationErrorKind::NoCandidate);
    /// ```
    pub fn parse_san(&self, text: &str, strictness: Strictness) -> Result<Move, InvalidNotation> {
        self.parse_notation(text, strictness, NotationStyle::Letters)
    }

    /// Resolves a move in Standard Algebraic Notation with figurines.
    ///
    /// Uppercase letters are accepted in place of glyphs.
    ///
    /// # Errors
    ///
    /// See [`Position::parse_san()`].
    pub fn parse_figurine(
        &self,
        text: &str,
        strictness: Strictness,
    ) -> Result<Move, InvalidNotation> {
        self.parse_notation(text, strictness, NotationStyle::Figurine)
    }

    pub fn parse_notation(
        &self,
        text: &str,
        strictness: Strictness,
        style: NotationStyle,
    ) -> Result<Move, InvalidNotation> {
        let err = |kind| InvalidNotation::new(self.fen(), text, kind);

        let lexed = lex(text, style).ok_or_else(|| err(NotationErrorKind::InvalidSyntax))?;
        if strictness.is_strict() && lexed.relaxed {
            return Err(err(NotationErrorKind::RelaxedSyntax));
        }
        if !self.is_legal() {
            return Err(err(NotationErrorKind::IllegalPosition));
        }

        let m = match lexed.san {
            San::Castle(side) => self
                .castling_move(side)
                .ok_or_else(|| err(NotationErrorKind::IllegalCastling(side)))?,
            San::Normal {
                role: Role::Pawn,
                file,
                to,
                promotion,
                ..
            } => self.resolve_pawn_move(file, to, promotion).map_err(err)?,
            San::Normal {
                role,
                file,
                rank,
                capture,
                to,
                promotion,
            } => {
                if promotion.is_some() {
                    return Err(err(NotationErrorKind::UnexpectedPromotion));
                }
                let m = self.resolve_piece_move(role, file, rank, to).map_err(err)?;
                if strictness.is_strict() {
                    if capture && !m.is_capture() {
                        return Err(err(NotationErrorKind::UnexpectedCaptureMarker));
                    }
                    if !capture && m.is_capture() {
                        return Err(err(NotationErrorKind::MissingCaptureMarker));
                    }
                    if self.disambiguation(&m) != (file, rank) {
                        return Err(err(NotationErrorKind::WrongDisambiguation));
                    }
                }
                m
            }
        };

        if strictness.is_strict() {
            let expected = self.suffix_after(&m);
            if expected != lexed.suffix {
                return Err(err(NotationErrorKind::WrongSuffix {
                    expected: expected.map(Suffix::char),
                }));
            }
        }

        Ok(m)
    }

    fn resolve_piece_move(
        &self,
        role: Role,
        file: Option<File>,
        rank: Option<Rank>,
        to: Square,
    ) -> Result<Move, NotationErrorKind> {
        let mut candidates = self.board.by_piece(role.of(self.turn));
        if let Some(file) = file {
            candidates &= Bitboard::from_file(file);
        }
        if let Some(rank) = rank {
            candidates &= Bitboard::from_rank(rank);
        }
        let candidates = candidates & self.attackers(to, self.turn);
        if candidates.is_empty() {
            return Err(NotationErrorKind::NoCandidate);
        }

        let mut found = None;
        for from in candidates {
            let m = match self.is_move_legal(from, to) {
                MoveStatus::Legal(m) if !m.is_castling() => m,
                MoveStatus::Castle960(choice) => choice.king_move(),
                _ => continue,
            };
            if found.is_some() {
                return Err(NotationErrorKind::AmbiguousMove);
            }
            found = Some(m);
        }
        found.ok_or(NotationErrorKind::IllegalMove)
    }

    fn resolve_pawn_move(
        &self,
        capture_from: Option<File>,
        to: Square,
        promotion: Option<Role>,
    ) -> Result<Move, NotationErrorKind> {
        let us = self.turn;
        let pawn = Role::Pawn.of(us);
        let backward = -us.forward();

        let from = match capture_from {
            Some(file) => Square::from_coords(file, to.rank()).offset(0, backward),
            None => to.offset(0, backward).and_then(|single| {
                if self.board.piece_at(single).is_none() {
                    single.offset(0, backward)
                } else {
                    Some(single)
                }
            }),
        };
        let from = from
            .filter(|&sq| self.board.piece_at(sq) == Some(pawn))
            .ok_or(NotationErrorKind::NoCandidate)?;

        match self.is_move_legal(from, to) {
            MoveStatus::Legal(m) => match promotion {
                Some(_) => Err(NotationErrorKind::UnexpectedPromotion),
                None => Ok(m),
            },
            MoveStatus::Promotion(choice) => match promotion {
                Some(role) => choice
                    .promote(role)
                    .ok_or(NotationErrorKind::IllegalPromotion(role)),
                None => Err(NotationErrorKind::MissingPromotion),
            },
            _ => Err(NotationErrorKind::IllegalMove),
        }
    }
}
