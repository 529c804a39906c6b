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

use core::{cell::Cell, fmt, str::FromStr};

use crate::{
    bitboard::Bitboard,
    board::Board,
    castling_side::CastlingFiles,
    color::{ByColor, Color},
    errors::{Error, IllegalArgument},
    square::{File, Square},
    types::{Piece, Strictness},
    variant::Variant,
};

/// A lazily computed value.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum Cache<T> {
    Unknown,
    Known(T),
}

/// Reads `cell`, computing and storing the value on first use.
pub(crate) fn cached<T: Copy>(cell: &Cell<Cache<T>>, compute: impl FnOnce() -> T) -> T {
    match cell.get() {
        Cache::Known(value) => value,
        Cache::Unknown => {
            let value = compute();
            cell.set(Cache::Known(value));
            value
        }
    }
}

/// A chess position: piece placement, side to move, castling rights,
/// en passant file and the variant the game is played under.
///
/// Any combination of these is representable, including positions that
/// could never arise in a game. [`Position::is_legal()`] tells them apart;
/// most queries answer conservatively (no moves, no check) for illegal
/// positions.
///
/// Derived facts (legality, royal king squares, exercisable castling and
/// en passant rights) are computed on first use and cached until the next
/// mutation.
///
/// # Examples
///
/// ```
/// use echiquier::Position;
///
/// let mut pos = Position::default();
/// assert!(pos.play_notation("e4"));
/// assert!(pos.play_notation("e5"));
/// assert!(!pos.play_notation("Qh4")); // the queen cannot reach h4
/// assert_eq!(pos.moves().len(), 29);
/// ```
#[derive(Clone, Debug)]
pub struct Position {
    pub(crate) board: Board,
    pub(crate) turn: Color,
    pub(crate) castling: ByColor<CastlingFiles>,
    pub(crate) en_passant: Option<File>,
    pub(crate) variant: Variant,
    pub(crate) legal: Cell<Cache<bool>>,
    pub(crate) kings: Cell<Cache<ByColor<Option<Square>>>>,
    pub(crate) effective_castling: Cell<Cache<ByColor<CastlingFiles>>>,
    pub(crate) effective_en_passant: Cell<Cache<Option<File>>>,
}

impl Position {
    pub(crate) fn from_parts(
        board: Board,
        turn: Color,
        castling: ByColor<CastlingFiles>,
        en_passant: Option<File>,
        variant: Variant,
    ) -> Position {
        Position {
            board,
            turn,
            castling,
            en_passant,
            variant,
            legal: Cell::new(Cache::Unknown),
            kings: Cell::new(Cache::Unknown),
            effective_castling: Cell::new(Cache::Unknown),
            effective_en_passant: Cell::new(Cache::Unknown),
        }
    }

    /// The initial position of `variant`.
    ///
    /// # Errors
    ///
    /// Returns [`IllegalArgument`] for variants without a canonical initial
    /// position: no-king, white-king-only and black-king-only.
    pub fn start(variant: Variant) -> Result<Position, IllegalArgument> {
        if !variant.has_start_position() {
            return Err(IllegalArgument::new("Position::start"));
        }
        let corners = CastlingFiles::A | CastlingFiles::H;
        Ok(match variant {
            Variant::Antichess => Position::from_parts(
                Board::standard(),
                Color::White,
                ByColor::default(),
                None,
                variant,
            ),
            Variant::Horde => Position::from_parts(
                Board::horde(),
                Color::White,
                ByColor {
                    white: CastlingFiles::empty(),
                    black: corners,
                },
                None,
                variant,
            ),
            _ => Position::from_parts(
                Board::standard(),
                Color::White,
                ByColor {
                    white: corners,
                    black: corners,
                },
                None,
                variant,
            ),
        })
    }

    /// An empty board of `variant`, White to move.
    pub fn empty(variant: Variant) -> Position {
        Position::from_parts(
            Board::empty(),
            Color::White,
            ByColor::default(),
            None,
            variant,
        )
    }

    /// Resets to the initial position of regular chess.
    pub fn reset(&mut self) {
        *self = Position::default();
    }

    /// Removes all pieces and rights, switching to `variant`.
    pub fn clear(&mut self, variant: Variant) {
        *self = Position::empty(variant);
    }

    /// Forgets everything derived from the position.
    pub(crate) fn invalidate(&mut self) {
        self.legal.set(Cache::Unknown);
        self.kings.set(Cache::Unknown);
        self.effective_castling.set(Cache::Unknown);
        self.effective_en_passant.set(Cache::Unknown);
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn set_variant(&mut self, variant: Variant) {
        self.variant = variant;
        self.invalidate();
    }

    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.board.piece_at(sq)
    }

    /// Puts `piece` on `sq`, or clears the square with `None`.
    pub fn set_piece_at(&mut self, sq: Square, piece: Option<Piece>) {
        match piece {
            Some(piece) => self.board.set_piece_at(sq, piece),
            None => {
                self.board.remove_piece_at(sq);
            }
        }
        self.invalidate();
    }

    /// The side to move.
    #[inline]
    pub fn turn(&self) -> Color {
        self.turn
    }

    pub fn set_turn(&mut self, turn: Color) {
        self.turn = turn;
        self.invalidate();
    }

    /// Tests the raw castling flag of `color` for the rook on `file`.
    ///
    /// The flag may be set even if castling is not currently possible. See
    /// [`Position::effective_castling()`].
    pub fn castling(&self, color: Color, file: File) -> bool {
        self.castling.get(color).has(file)
    }

    pub fn castling_files(&self, color: Color) -> CastlingFiles {
        *self.castling.get(color)
    }

    pub fn set_castling(&mut self, color: Color, file: File, allowed: bool) {
        self.castling
            .get_mut(color)
            .set(CastlingFiles::from_file(file), allowed);
        self.invalidate();
    }

    pub fn set_castling_files(&mut self, color: Color, files: CastlingFiles) {
        *self.castling.get_mut(color) = files;
        self.invalidate();
    }

    /// The file of a pawn that just advanced two squares, as recorded.
    ///
    /// See [`Position::effective_en_passant()`] for whether it can actually
    /// be captured.
    #[inline]
    pub fn en_passant(&self) -> Option<File> {
        self.en_passant
    }

    pub fn set_en_passant(&mut self, file: Option<File>) {
        self.en_passant = file;
        self.invalidate();
    }

    /// Tests if any piece of color `by` attacks `sq`.
    ///
    /// Attacks are geometric: pinned pieces and pieces of the side not to
    /// move count as well.
    pub fn is_attacked(&self, sq: Square, by: Color) -> bool {
        self.attackers(sq, by).any()
    }

    /// All pieces of color `by` that attack `sq`.
    ///
    /// # Examples
    ///
    /// ```
    /// use echiquier::{Color, Position, Square};
    ///
    /// let pos = Position::default();
    /// let attackers = pos.attackers(Square::F3, Color::White);
    /// assert_eq!(attackers.count(), 3); // g1, e2 and g2
    /// ```
    pub fn attackers(&self, sq: Square, by: Color) -> Bitboard {
        self.board.attackers_to(sq, by, self.board.occupied())
    }
}

impl Default for Position {
    fn default() -> Position {
        Position::from_parts(
            Board::standard(),
            Color::White,
            ByColor {
                white: CastlingFiles::A | CastlingFiles::H,
                black: CastlingFiles::A | CastlingFiles::H,
            },
            None,
            Variant::Regular,
        )
    }
}

/// Positions are equal if they agree on placement, side to move, castling
/// flags, en passant file and variant.
impl PartialEq for Position {
    fn eq(&self, other: &Position) -> bool {
        self.board == other.board
            && self.turn == other.turn
            && self.castling == other.castling
            && self.en_passant == other.en_passant
            && self.variant == other.variant
    }
}

impl Eq for Position {}

/// Writes the FEN of the position, with default move counters.
impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.fen())
    }
}

/// Builds a position from a free-form description.
///
/// Accepted shapes are `start`, `empty`, a FEN, and each of these prefixed
/// with a variant name and a colon, such as `horde:start` or
/// `antichess:<fen>`. `chess960:<n>` selects the Chess960 start position
/// with Scharnagl number `n`.
///
/// # Examples
///
/// ```
/// use echiquier::{Position, Variant};
///
/// let pos: Position = "chess960:518".parse()?;
/// assert_eq!(pos.variant(), Variant::Chess960);
/// assert_eq!(pos.board(), Position::default().board());
/// # Ok::<_, echiquier::Error>(())
/// ```
impl FromStr for Position {
    type Err = Error;

    fn from_str(s: &str) -> Result<Position, Error> {
        let s = s.trim();
        let (variant, rest) = match s.split_once(':') {
            Some((name, rest)) => (
                Variant::from_name(name).ok_or(IllegalArgument::new("Position::from_str"))?,
                rest.trim(),
            ),
            None => (Variant::Regular, s),
        };

        match rest {
            "start" => Ok(Position::start(variant)?),
            "empty" => Ok(Position::empty(variant)),
            _ if variant.is_chess960()
                && !rest.is_empty()
                && rest.bytes().all(|ch| ch.is_ascii_digit()) =>
            {
                let scharnagl = btoi::btou(rest.as_bytes())
                    .map_err(|_| IllegalArgument::new("Position::from_str"))?;
                Ok(Position::chess960(scharnagl)?)
            }
            _ if rest.contains('/') => {
                Ok(Position::from_fen(variant, rest, Strictness::Relaxed)?)
            }
            _ => Err(IllegalArgument::new("Position::from_str").into()),
        }
    }
}
