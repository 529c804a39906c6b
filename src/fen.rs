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

//! Parse and write Forsyth-Edwards-Notation.
//!
//! # Examples
//!
//! Parse and write a FEN:
//!
//! ```
//! use echiquier::{fen::Fen, Position};
//!
//! let fen: Fen = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1".parse()?;
//! assert!(fen.position.is_legal());
//! assert_eq!(fen.to_string(), "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1");
//! # Ok::<_, echiquier::InvalidFen>(())
//! ```
//!
//! Chess960 castling rights are written with file letters, or in the
//! regular style on request:
//!
//! ```
//! use echiquier::{fen::FenOptions, Position};
//!
//! let pos = Position::chess960(518)?;
//! assert_eq!(pos.fen(), "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w AHah - 0 1");
//! assert_eq!(
//!     pos.fen_with(&FenOptions {
//!         regular_fen_if_possible: true,
//!         ..FenOptions::default()
//!     }),
//!     "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"
//! );
//! # Ok::<_, echiquier::IllegalArgument>(())
//! ```

use alloc::{string::String, vec::Vec};
use core::{
    fmt::{self, Write as _},
    str::FromStr,
};

use tracing::debug;

use crate::{
    board::Board,
    castling_side::{CastlingFiles, CastlingSide},
    color::{ByColor, Color},
    errors::{FenErrorKind, InvalidFen},
    position::Position,
    role::Role,
    square::{File, Rank, Square},
    types::{Piece, Strictness},
    variant::Variant,
};

/// A parsed FEN: a position and the two move counters.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Fen {
    pub position: Position,
    /// Plies since the last capture or pawn move.
    pub halfmoves: u32,
    /// Starts at 1 and increments after each Black move.
    pub fullmoves: u32,
}

/// Options for writing a FEN.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FenOptions {
    pub halfmoves: u32,
    pub fullmoves: u32,
    /// Write Chess960 castling rights as `KQkq` when every flagged rook is
    /// the outermost rook on its side of the king.
    pub regular_fen_if_possible: bool,
    /// Prefix the FEN with `<variant>:` unless the variant is regular.
    pub with_variant: bool,
}

impl Default for FenOptions {
    fn default() -> FenOptions {
        FenOptions {
            halfmoves: 0,
            fullmoves: 1,
            regular_fen_if_possible: false,
            with_variant: false,
        }
    }
}

impl Fen {
    /// Parses a FEN for `variant`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidFen`] if the text is malformed, including move
    /// counters that do not fit in a `u32`. With
    /// [`Strictness::Strict`], also if castling letters are not in
    /// canonical order, if a castling right is not effective, if the en
    /// passant square is on the wrong rank for the side to move, or if a
    /// counter has leading zeros.
    pub fn parse(variant: Variant, text: &str, strictness: Strictness) -> Result<Fen, InvalidFen> {
        let err = |kind| InvalidFen::new(text, kind);

        let fields: Vec<&str> = text.split_ascii_whitespace().collect();
        let &[board_field, turn_field, castling_field, ep_field, halfmoves_field, fullmoves_field] =
            fields.as_slice()
        else {
            return Err(err(FenErrorKind::WrongFieldCount {
                found: fields.len(),
            }));
        };

        let board = parse_board(board_field).map_err(err)?;

        let turn = match turn_field {
            "w" => Color::White,
            "b" => Color::Black,
            _ => return Err(err(FenErrorKind::InvalidTurn)),
        };

        let mut position = Position::from_parts(board, turn, ByColor::default(), None, variant);
        position.castling = parse_castling(&position, castling_field, strictness).map_err(err)?;
        position.en_passant = parse_en_passant(ep_field, turn, strictness).map_err(err)?;
        position.invalidate();
        if strictness.is_strict() {
            check_effective_castling(&position).map_err(err)?;
        }

        Ok(Fen {
            position,
            halfmoves: parse_counter(halfmoves_field, strictness)
                .ok_or(err(FenErrorKind::InvalidHalfmoves))?,
            fullmoves: parse_counter(fullmoves_field, strictness)
                .ok_or(err(FenErrorKind::InvalidFullmoves))?,
        })
    }
}

fn parse_board(field: &str) -> Result<Board, FenErrorKind> {
    let ranks: Vec<&str> = field.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenErrorKind::WrongRankCount { found: ranks.len() });
    }

    let mut board = Board::empty();
    for (rank, text) in Rank::ALL.into_iter().rev().zip(ranks) {
        let mut file = 0;
        for ch in text.chars() {
            if let Some(empty) = ch.to_digit(10).filter(|n| (1..=8).contains(n)) {
                file += empty;
            } else if let Some(piece) = Piece::from_char(ch) {
                let sq = File::try_new(file)
                    .map(|file| Square::from_coords(file, rank))
                    .ok_or(FenErrorKind::WrongRankLength { rank })?;
                board.set_piece_at(sq, piece);
                file += 1;
            } else {
                return Err(FenErrorKind::UnexpectedBoardCharacter { ch, rank });
            }
            if file > 8 {
                return Err(FenErrorKind::WrongRankLength { rank });
            }
        }
        if file != 8 {
            return Err(FenErrorKind::WrongRankLength { rank });
        }
    }
    Ok(board)
}

/// The rook `K` or `Q` refers to: the outermost rook on that side of the
/// king, falling back to the corner.
fn outermost_rook(position: &Position, color: Color, side: CastlingSide) -> File {
    let corner = match side {
        CastlingSide::KingSide => File::H,
        CastlingSide::QueenSide => File::A,
    };
    let Some(king) = position.castling_king(color) else {
        return corner;
    };
    let mut rooks = File::ALL.into_iter().filter(|&file| {
        file != king.file()
            && CastlingSide::of_rook(king.file(), file) == side
            && position.board.piece_at(Square::from_coords(file, color.backrank()))
                == Some(Role::Rook.of(color))
    });
    match side {
        CastlingSide::KingSide => rooks.last(),
        CastlingSide::QueenSide => rooks.next(),
    }
    .unwrap_or(corner)
}

fn parse_castling(
    position: &Position,
    field: &str,
    strictness: Strictness,
) -> Result<ByColor<CastlingFiles>, FenErrorKind> {
    let mut castling = ByColor::<CastlingFiles>::default();
    if field == "-" {
        return Ok(castling);
    }

    let chess960 = position.variant.is_chess960();
    for ch in field.chars() {
        let color = Color::from_white(ch.is_ascii_uppercase());
        let file = match ch.to_ascii_lowercase() {
            'k' if chess960 => outermost_rook(position, color, CastlingSide::KingSide),
            'q' if chess960 => outermost_rook(position, color, CastlingSide::QueenSide),
            'k' => File::H,
            'q' => File::A,
            lower if chess960 => File::from_char(lower).ok_or(FenErrorKind::InvalidCastling)?,
            _ => return Err(FenErrorKind::InvalidCastling),
        };
        let flag = CastlingFiles::from_file(file);
        if strictness.is_strict() && castling.get(color).contains(flag) {
            return Err(FenErrorKind::NonCanonicalCastling);
        }
        *castling.get_mut(color) |= flag;
    }

    if strictness.is_strict()
        && !chess960
        && write_castling(position.variant, &castling, |_, _| None) != field
    {
        return Err(FenErrorKind::NonCanonicalCastling);
    }
    Ok(castling)
}

/// Every castling flag must be effective. Flags without a rook or king
/// behind them are reported before flags that only fail because the
/// position is illegal.
fn check_effective_castling(position: &Position) -> Result<(), FenErrorKind> {
    let checks: [fn(&Position, Color) -> CastlingFiles; 2] =
        [Position::exercisable_castling, Position::effective_castling];
    for effective in checks {
        for color in Color::ALL {
            let unexercisable = position.castling_files(color) - effective(position, color);
            if let Some(file) = unexercisable.files().next() {
                return Err(FenErrorKind::UnexercisableCastling { color, file });
            }
        }
    }
    Ok(())
}

fn parse_en_passant(
    field: &str,
    turn: Color,
    strictness: Strictness,
) -> Result<Option<File>, FenErrorKind> {
    if field == "-" {
        return Ok(None);
    }
    let sq = Square::from_ascii(field.as_bytes()).ok_or(FenErrorKind::InvalidEnPassant)?;
    if sq.rank() != Rank::Third && sq.rank() != Rank::Sixth {
        return Err(FenErrorKind::InvalidEnPassant);
    }
    let expected = Rank::Sixth.relative_to(turn);
    if strictness.is_strict() && sq.rank() != expected {
        return Err(FenErrorKind::WrongEnPassantRank { expected });
    }
    Ok(Some(sq.file()))
}

fn parse_counter(field: &str, strictness: Strictness) -> Option<u32> {
    if strictness.is_strict() && field.len() > 1 && field.starts_with('0') {
        return None;
    }
    btoi::btou(field.as_bytes()).ok()
}

/// Writes the castling field. `regular_letter` may replace the file letter
/// of a flag with `K` or `Q`.
fn write_castling(
    variant: Variant,
    castling: &ByColor<CastlingFiles>,
    mut regular_letter: impl FnMut(Color, File) -> Option<char>,
) -> String {
    let mut field = String::new();
    for color in Color::ALL {
        let files = *castling.get(color);
        if variant.is_chess960() {
            let letters: Option<String> = files
                .files()
                .rev()
                .map(|file| regular_letter(color, file))
                .collect();
            match letters {
                Some(letters) if !letters.is_empty() => field.push_str(&letters),
                _ => {
                    for file in files.files() {
                        field.push(color.fold_wb(file.upper_char(), file.char()));
                    }
                }
            }
        } else {
            if files.contains(CastlingFiles::H) {
                field.push(color.fold_wb('K', 'k'));
            }
            if files.contains(CastlingFiles::A) {
                field.push(color.fold_wb('Q', 'q'));
            }
        }
    }
    if field.is_empty() {
        field.push('-');
    }
    field
}

impl Position {
    /// Parses a position of `variant` from a FEN, dropping the move
    /// counters.
    ///
    /// # Errors
    ///
    /// See [`Fen::parse()`].
    pub fn from_fen(variant: Variant, fen: &str, strictness: Strictness) -> Result<Position, InvalidFen> {
        Fen::parse(variant, fen, strictness).map(|fen| fen.position)
    }

    /// Replaces the position with the one described by `fen`, keeping the
    /// current variant. Returns the halfmove clock and fullmove number.
    ///
    /// # Errors
    ///
    /// See [`Fen::parse()`]. The position is unchanged on error.
    pub fn set_fen(&mut self, fen: &str, strictness: Strictness) -> Result<(u32, u32), InvalidFen> {
        match Fen::parse(self.variant, fen, strictness) {
            Ok(parsed) => {
                *self = parsed.position;
                Ok((parsed.halfmoves, parsed.fullmoves))
            }
            Err(err) => {
                debug!(%err, "rejected fen");
                Err(err)
            }
        }
    }

    /// The FEN of the position, with counters `0 1`.
    pub fn fen(&self) -> String {
        self.fen_with(&FenOptions::default())
    }

    pub fn fen_with(&self, options: &FenOptions) -> String {
        let mut fen = String::new();
        if options.with_variant && self.variant != Variant::Regular {
            let _ = write!(fen, "{}:", self.variant);
        }

        let castling = write_castling(self.variant, &self.castling, |color, file| {
            if !options.regular_fen_if_possible {
                return None;
            }
            let king = self.castling_king(color)?;
            let side = CastlingSide::of_rook(king.file(), file);
            (outermost_rook(self, color, side) == file).then(|| match side {
                CastlingSide::KingSide => color.fold_wb('K', 'k'),
                CastlingSide::QueenSide => color.fold_wb('Q', 'q'),
            })
        });

        let _ = write!(
            fen,
            "{} {} {} ",
            self.board.board_fen(),
            self.turn.char(),
            castling
        );
        match self.en_passant {
            Some(file) => {
                let sq = Square::from_coords(file, Rank::Sixth.relative_to(self.turn));
                let _ = write!(fen, "{sq}");
            }
            None => fen.push('-'),
        }
        let _ = write!(fen, " {} {}", options.halfmoves, options.fullmoves);
        fen
    }
}

/// Writes the FEN with its counters, prefixed with the variant unless it is
/// regular chess.
impl fmt::Display for Fen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.position.fen_with(&FenOptions {
            halfmoves: self.halfmoves,
            fullmoves: self.fullmoves,
            regular_fen_if_possible: false,
            with_variant: true,
        }))
    }
}

/// Parses a relaxed FEN, optionally prefixed with `<variant>:`.
impl FromStr for Fen {
    type Err = InvalidFen;

    fn from_str(s: &str) -> Result<Fen, InvalidFen> {
        let (variant, fen) = s
            .split_once(':')
            .and_then(|(name, rest)| Some((Variant::from_name(name.trim())?, rest)))
            .unwrap_or((Variant::Regular, s));
        Fen::parse(variant, fen, Strictness::Relaxed)
    }
}
