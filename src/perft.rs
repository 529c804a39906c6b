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

use crate::position::Position;

/// Counts legal move paths of a given length.
///
/// Paths ending early in checkmate or stalemate are not counted. Useful for
/// comparing, testing and debugging move generation correctness and
/// performance.
///
/// # Examples
///
/// ```
/// use echiquier::{perft, Position};
///
/// let pos = Position::default();
/// assert_eq!(perft(&pos, 1), 20);
/// assert_eq!(perft(&pos, 2), 400);
/// assert_eq!(perft(&pos, 3), 8902);
/// ```
pub fn perft(pos: &Position, depth: u32) -> u64 {
    if depth < 1 {
        return 1;
    }

    let moves = pos.moves();
    if depth == 1 {
        moves.len() as u64
    } else {
        moves
            .iter()
            .map(|m| {
                let mut child = pos.clone();
                child.play(m);
                perft(&child, depth - 1)
            })
            .sum()
    }
}

/// Like [`perft()`], but also prints the count below each move.
#[cfg(feature = "std")]
pub fn debug_perft(pos: &Position, depth: u32) -> u64 {
    if depth < 1 {
        return 1;
    }

    pos.moves()
        .iter()
        .map(|m| {
            let mut child = pos.clone();
            child.play(m);
            let nodes = perft(&child, depth - 1);
            std::println!("{} {}: {}", pos.uci(m), pos.san(m), nodes);
            nodes
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variant::Variant;

    #[test]
    fn test_depth_zero() {
        assert_eq!(perft(&Position::default(), 0), 1);
        assert_eq!(perft(&Position::empty(Variant::Regular), 0), 1);
    }

    #[test]
    fn test_illegal_position_has_no_paths() {
        assert_eq!(perft(&Position::empty(Variant::Regular), 1), 0);
    }
}
