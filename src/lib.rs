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

//! A chess rules engine: position state, legality, move generation and
//! FEN, SAN and UCI codecs, for regular chess, Chess960, Antichess, Horde
//! and king-less setups.
//!
//! # Examples
//!
//! Generate legal moves in the starting position:
//!
//! ```
//! use echiquier::Position;
//!
//! let pos = Position::default();
//! assert_eq!(pos.moves().len(), 20);
//! ```
//!
//! Play moves:
//!
//! ```
//! use echiquier::{Position, Square, Strictness};
//!
//! let mut pos = Position::default();
//! let m = pos.parse_uci("e2e4", Strictness::Strict)?;
//! pos.play(&m);
//! assert!(pos.play_notation("e5"));
//! assert_eq!(pos.fen(), "rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq - 0 1");
//! # Ok::<_, echiquier::InvalidNotation>(())
//! ```
//!
//! Detect game end conditions:
//!
//! ```
//! use echiquier::Position;
//!
//! let mut pos = Position::default();
//! for san in ["f3", "e5", "g4", "Qh4#"] {
//!     assert!(pos.play_notation(san));
//! }
//! assert!(pos.is_checkmate());
//! assert!(!pos.is_stalemate());
//! ```
//!
//! Also supports [FEN](fen), [SAN](san) and [UCI](uci) formats for
//! positions and moves.
//!
//! # Feature flags
//!
//! * `std`: Enabled by default. For `no_std` environments, this must be
//!   disabled with `default-features = false`. The crate always requires
//!   the [`alloc`](https://doc.rust-lang.org/stable/alloc/index.html) crate.
//! * `serde`: Implements [`serde::Serialize`](https://docs.rs/serde/1/serde/trait.Serialize.html)
//!   and [`serde::Deserialize`](https://docs.rs/serde/1/serde/trait.Deserialize.html) for
//!   types with unique natural representations.
//! * `nohash-hasher`: Implements
//!   [`nohash_hasher::IsEnabled`](https://docs.rs/nohash-hasher/0.2/nohash_hasher/trait.IsEnabled.html)
//!   for sensible types.
//!
//! # Logging
//!
//! Events are emitted through [`tracing`](https://docs.rs/tracing/0.1):
//! rejected positions and played moves at `TRACE`, rejected FEN and move
//! notation at `DEBUG`. The library never installs a subscriber.

#![no_std]
#![forbid(unsafe_code)]
#![warn(missing_debug_implementations)]
#![cfg_attr(docs_rs, feature(doc_auto_cfg))]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

mod castling_side;
mod color;
mod legality;
mod m;
mod movegen;
mod perft;
mod position;
mod role;
mod square;
mod types;

pub mod attacks;
pub mod bitboard;
pub mod board;
pub mod chess960;
pub mod errors;
pub mod fen;
pub mod san;
pub mod uci;
pub mod variant;

pub use bitboard::Bitboard;
pub use board::Board;
pub use castling_side::{CastlingFiles, CastlingSide};
pub use color::{ByColor, Color};
pub use errors::{Error, IllegalArgument, InvalidFen, InvalidNotation};
pub use fen::{Fen, FenOptions};
pub use m::{Move, MoveKind, MoveList};
pub use movegen::{Castle960Choice, MoveStatus, PromotionChoice};
#[cfg(feature = "std")]
pub use perft::debug_perft;
pub use perft::perft;
pub use position::Position;
pub use role::Role;
pub use san::NotationStyle;
pub use square::{File, Rank, Square};
pub use types::{Piece, Strictness};
pub use uci::UciCastling;
pub use variant::Variant;

#[cfg(feature = "nohash-hasher")]
impl nohash_hasher::IsEnabled for File {}

#[cfg(feature = "nohash-hasher")]
impl nohash_hasher::IsEnabled for Rank {}
