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

//! Chess960 start positions by Scharnagl number.

use crate::{
    board::Board,
    castling_side::CastlingFiles,
    color::{ByColor, Color},
    errors::IllegalArgument,
    position::Position,
    role::Role,
    square::File,
    variant::Variant,
};

/// Pairs of empty-slot indexes for the two knights, among the five files
/// left after placing bishops and queen.
const KNIGHT_SLOTS: [(usize, usize); 10] = [
    (0, 1),
    (0, 2),
    (0, 3),
    (0, 4),
    (1, 2),
    (1, 3),
    (1, 4),
    (2, 3),
    (2, 4),
    (3, 4),
];

/// Decodes the back rank with Scharnagl number `scharnagl`.
///
/// Returns `None` unless `scharnagl` is in the range `0..=959`.
///
/// # Examples
///
/// ```
/// use echiquier::{chess960, Role};
///
/// let back_rank = chess960::back_rank(518).expect("valid number");
/// assert_eq!(back_rank[4], Role::King);
/// assert_eq!(back_rank[3], Role::Queen);
/// ```
pub fn back_rank(scharnagl: u32) -> Option<[Role; 8]> {
    if scharnagl > 959 {
        return None;
    }

    let mut slots: [Option<Role>; 8] = [None; 8];
    let mut n = scharnagl as usize;

    slots[(n % 4) * 2 + 1] = Some(Role::Bishop);
    n /= 4;
    slots[(n % 4) * 2] = Some(Role::Bishop);
    n /= 4;

    fill_empty(&mut slots, n % 6, Role::Queen);
    n /= 6;

    let (first, second) = KNIGHT_SLOTS[n];
    // The second knight first, so that the first index still counts the
    // same empty slots.
    fill_empty(&mut slots, second, Role::Knight);
    fill_empty(&mut slots, first, Role::Knight);

    for role in [Role::Rook, Role::King, Role::Rook] {
        fill_empty(&mut slots, 0, role);
    }

    let mut back_rank = [Role::Rook; 8];
    for (role, slot) in back_rank.iter_mut().zip(slots) {
        *role = slot?;
    }
    Some(back_rank)
}

fn fill_empty(slots: &mut [Option<Role>; 8], index: usize, role: Role) {
    if let Some(slot) = slots.iter_mut().filter(|slot| slot.is_none()).nth(index) {
        *slot = Some(role);
    }
}

impl Position {
    /// The Chess960 start position with Scharnagl number `scharnagl`.
    ///
    /// Number 518 is the standard initial position. Both colors may castle
    /// with both rooks.
    ///
    /// # Errors
    ///
    /// Returns [`IllegalArgument`] unless `scharnagl` is in the range
    /// `0..=959`.
    pub fn chess960(scharnagl: u32) -> Result<Position, IllegalArgument> {
        let back_rank = back_rank(scharnagl).ok_or(IllegalArgument::new("Position::chess960"))?;

        let rooks = File::ALL
            .into_iter()
            .zip(back_rank)
            .filter(|&(_, role)| role == Role::Rook)
            .fold(CastlingFiles::empty(), |acc, (file, _)| {
                acc | CastlingFiles::from_file(file)
            });

        Ok(Position::from_parts(
            Board::from_back_rank(&back_rank),
            Color::White,
            ByColor {
                white: rooks,
                black: rooks,
            },
            None,
            Variant::Chess960,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn letters(scharnagl: u32) -> [char; 8] {
        back_rank(scharnagl)
            .expect("valid scharnagl number")
            .map(|role| role.upper_char())
    }

    #[test]
    fn test_known_numbers() {
        assert_eq!(letters(0), ['B', 'B', 'Q', 'N', 'N', 'R', 'K', 'R']);
        assert_eq!(letters(518), ['R', 'N', 'B', 'Q', 'K', 'B', 'N', 'R']);
        assert_eq!(letters(959), ['R', 'K', 'R', 'N', 'N', 'Q', 'B', 'B']);
        assert_eq!(back_rank(960), None);
    }

    #[test]
    fn test_all_numbers() {
        for scharnagl in 0..960 {
            let back_rank = back_rank(scharnagl).expect("valid scharnagl number");
            let files_of = |wanted: Role| {
                File::ALL
                    .into_iter()
                    .zip(back_rank)
                    .filter(move |&(_, role)| role == wanted)
                    .map(|(file, _)| file)
            };

            let bishops: arrayvec::ArrayVec<File, 2> = files_of(Role::Bishop).collect();
            assert_eq!(bishops.len(), 2);
            assert_ne!(bishops[0].to_u32() % 2, bishops[1].to_u32() % 2);

            let rooks: arrayvec::ArrayVec<File, 2> = files_of(Role::Rook).collect();
            let king = files_of(Role::King).next().expect("king");
            assert!(rooks[0] < king && king < rooks[1]);
            assert_eq!(files_of(Role::Knight).count(), 2);
            assert_eq!(files_of(Role::Queen).count(), 1);
        }
    }

    #[test]
    fn test_standard_position() {
        let pos = Position::chess960(518).expect("valid scharnagl number");
        assert_eq!(pos.board(), Position::default().board());
        assert_eq!(pos.castling_files(Color::White), CastlingFiles::A | CastlingFiles::H);
        assert_eq!(pos.variant(), Variant::Chess960);
        assert!(Position::chess960(1000).is_err());
    }
}
