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

//! Attack and ray tables.
//!
//! All tables are computed at compile time. Sliding attacks walk the
//! precomputed ray of each direction and cut it at the first blocker.
//!
//! # Example
//!
//! ```
//! use echiquier::{attacks, Bitboard, Rank, Square};
//!
//! let occupied = Bitboard::from(Rank::Sixth); // blocking pieces
//! let attacks = attacks::bishop_attacks(Square::C2, occupied);
//! // . . . . . . . .
//! // . . . . . . . .
//! // 0 0 0 0 0 0 1 0
//! // . . . . . 1 . .
//! // 1 . . . 1 . . .
//! // . 1 . 1 . . . .
//! // . . . . . . . .
//! // . 1 . 1 . . . .
//!
//! assert!(attacks.contains(Square::G6));
//! assert!(!attacks.contains(Square::H7));
//! ```

use crate::{
    bitboard::Bitboard,
    color::{ByColor, Color},
    role::Role,
    square::Square,
    types::Piece,
};

const KING_DELTAS: [i32; 8] = [9, 8, 7, 1, -9, -8, -7, -1];
const KNIGHT_DELTAS: [i32; 8] = [17, 15, 10, 6, -17, -15, -10, -6];
const WHITE_PAWN_DELTAS: [i32; 2] = [7, 9];
const BLACK_PAWN_DELTAS: [i32; 2] = [-7, -9];

// Directions with increasing square indexes first, then their opposites
// in the same order.
const RAY_DELTAS: [i32; 8] = [8, 1, 9, 7, -8, -1, -9, -7];
const ROOK_DIRECTIONS: [usize; 4] = [0, 1, 4, 5];
const BISHOP_DIRECTIONS: [usize; 4] = [2, 3, 6, 7];

const fn step_attacks(square: i32, occupied: u64, deltas: &[i32]) -> u64 {
    let mut attack = 0;

    let mut i = 0;
    while i < deltas.len() {
        let mut previous = square;
        loop {
            let sq = previous + deltas[i];
            let file_diff = (sq & 0x7) - (previous & 0x7);
            if file_diff > 2 || file_diff < -2 || sq < 0 || sq > 63 {
                break;
            }
            let bb = 1 << sq;
            attack |= bb;
            if occupied & bb != 0 {
                break;
            }
            previous = sq;
        }
        i += 1;
    }

    attack
}

const fn bootstrap(occupied: u64, deltas: &[i32]) -> [u64; 64] {
    let mut table = [0; 64];
    let mut sq = 0;
    while sq < 64 {
        table[sq] = step_attacks(sq as i32, occupied, deltas);
        sq += 1;
    }
    table
}

const fn bootstrap_rays() -> [[u64; 64]; 8] {
    let mut rays = [[0; 64]; 8];
    let mut dir = 0;
    while dir < 8 {
        rays[dir] = bootstrap(0, &[RAY_DELTAS[dir]]);
        dir += 1;
    }
    rays
}

static KNIGHT_ATTACKS: [u64; 64] = bootstrap(!0, &KNIGHT_DELTAS);
static KING_ATTACKS: [u64; 64] = bootstrap(!0, &KING_DELTAS);
static PAWN_ATTACKS: ByColor<[u64; 64]> = ByColor {
    white: bootstrap(!0, &WHITE_PAWN_DELTAS),
    black: bootstrap(!0, &BLACK_PAWN_DELTAS),
};
static RAYS: [[u64; 64]; 8] = bootstrap_rays();

#[inline]
fn ray_attacks(dir: usize, sq: Square, occupied: Bitboard) -> u64 {
    let ray = RAYS[dir][sq.to_usize()];
    let blockers = ray & occupied.0;
    if blockers == 0 {
        return ray;
    }
    let blocker = if dir < 4 {
        blockers.trailing_zeros()
    } else {
        63 - blockers.leading_zeros()
    };
    ray ^ RAYS[dir][blocker as usize]
}

/// Looks up attacks for a pawn of `color` on `sq`.
#[inline]
pub fn pawn_attacks(color: Color, sq: Square) -> Bitboard {
    Bitboard(PAWN_ATTACKS.get(color)[sq.to_usize()])
}

/// Looks up attacks for a knight on `sq`.
#[inline]
pub fn knight_attacks(sq: Square) -> Bitboard {
    Bitboard(KNIGHT_ATTACKS[sq.to_usize()])
}

/// Looks up attacks for a king on `sq`.
#[inline]
pub fn king_attacks(sq: Square) -> Bitboard {
    Bitboard(KING_ATTACKS[sq.to_usize()])
}

/// Squares a rook on `sq` attacks, up to and including the first occupied
/// square in each direction.
#[inline]
pub fn rook_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
    Bitboard(
        ROOK_DIRECTIONS
            .iter()
            .fold(0, |acc, &dir| acc | ray_attacks(dir, sq, occupied)),
    )
}

/// Squares a bishop on `sq` attacks, up to and including the first occupied
/// square in each direction.
#[inline]
pub fn bishop_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
    Bitboard(
        BISHOP_DIRECTIONS
            .iter()
            .fold(0, |acc, &dir| acc | ray_attacks(dir, sq, occupied)),
    )
}

#[inline]
pub fn queen_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
    rook_attacks(sq, occupied) | bishop_attacks(sq, occupied)
}

/// Looks up attacks for `piece` on `sq` with the given occupancy.
pub fn attacks(sq: Square, piece: Piece, occupied: Bitboard) -> Bitboard {
    match piece.role {
        Role::Pawn => pawn_attacks(piece.color, sq),
        Role::Knight => knight_attacks(sq),
        Role::Bishop => bishop_attacks(sq, occupied),
        Role::Rook => rook_attacks(sq, occupied),
        Role::Queen => queen_attacks(sq, occupied),
        Role::King => king_attacks(sq),
    }
}

fn direction(a: Square, b: Square) -> Option<usize> {
    (0..8).find(|&dir| RAYS[dir][a.to_usize()] & Bitboard::from_square(b).0 != 0)
}

/// The edge-to-edge line through `a` and `b`, or an empty set if they
/// share no rank, file or diagonal.
///
/// # Example
///
/// ```
/// use echiquier::{attacks, Square};
///
/// let ray = attacks::ray(Square::E2, Square::G4);
/// assert!(ray.contains(Square::D1));
/// assert!(ray.contains(Square::H5));
/// ```
pub fn ray(a: Square, b: Square) -> Bitboard {
    match direction(a, b) {
        Some(dir) => {
            let opposite = (dir + 4) % 8;
            Bitboard(RAYS[dir][a.to_usize()] | RAYS[opposite][a.to_usize()]).with(a)
        }
        None => Bitboard::EMPTY,
    }
}

/// The squares strictly between `a` and `b`, or an empty set if they are not
/// aligned.
pub fn between(a: Square, b: Square) -> Bitboard {
    match direction(a, b) {
        Some(dir) => {
            Bitboard(RAYS[dir][a.to_usize()] & !RAYS[dir][b.to_usize()]).without(b)
        }
        None => Bitboard::EMPTY,
    }
}

/// Tests if all three squares lie on one rank, file or diagonal.
#[inline]
pub fn aligned(a: Square, b: Square, c: Square) -> bool {
    ray(a, b).contains(c)
}
