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

use tracing::{debug, trace};

use crate::{
    attacks,
    bitboard::Bitboard,
    board::Board,
    castling_side::{CastlingFiles, CastlingSide},
    color::Color,
    m::{Move, MoveKind, MoveList},
    position::Position,
    role::Role,
    square::{File, Rank, Square},
    types::{Piece, Strictness},
    variant::Variant,
};

/// Outcome of [`Position::is_move_legal()`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum MoveStatus {
    /// No legal move goes from the origin to the target.
    Illegal,
    /// Exactly one legal move goes from the origin to the target.
    Legal(Move),
    /// A pawn reaches the last rank. The move is legal once a promotion
    /// piece is chosen.
    Promotion(PromotionChoice),
    /// In Chess960, the king can either castle or simply step onto the
    /// target square.
    Castle960(Castle960Choice),
}

impl MoveStatus {
    #[inline]
    pub fn is_illegal(&self) -> bool {
        matches!(self, MoveStatus::Illegal)
    }
}

/// A pawn move to the last rank, waiting for its promotion piece.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PromotionChoice {
    from: Square,
    to: Square,
    pawn: Piece,
    capture: Option<Role>,
    roles: &'static [Role],
}

impl PromotionChoice {
    pub fn from(&self) -> Square {
        self.from
    }

    pub fn to(&self) -> Square {
        self.to
    }

    /// Pieces the pawn may turn into.
    pub fn roles(&self) -> &'static [Role] {
        self.roles
    }

    /// Completes the move, or `None` if the pawn may not promote to `role`.
    pub fn promote(&self, role: Role) -> Option<Move> {
        self.roles.contains(&role).then(|| {
            Move::new(
                self.from,
                self.to,
                self.pawn,
                MoveKind::Promotion {
                    promotion: role,
                    capture: self.capture,
                },
            )
        })
    }
}

/// A Chess960 king move that is also a castling move.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Castle960Choice {
    castling: Move,
    king_move: Move,
}

impl Castle960Choice {
    pub fn castling(&self) -> Move {
        self.castling
    }

    pub fn king_move(&self) -> Move {
        self.king_move
    }
}

/// Moves the pieces of `m` on `board`, without any rights bookkeeping.
pub(crate) fn apply_to_board(board: &mut Board, m: &Move) {
    board.remove_piece_at(m.from());
    match m.kind() {
        MoveKind::Castling { rook_from, rook_to } => {
            board.remove_piece_at(rook_from);
            board.set_piece_at(rook_to, Role::Rook.of(m.color()));
        }
        MoveKind::EnPassant { captured } => {
            board.remove_piece_at(captured);
        }
        MoveKind::Regular { .. } | MoveKind::Promotion { .. } => (),
    }
    board.set_piece_at(m.to(), m.final_piece());
}

impl Position {
    /// All legal moves.
    ///
    /// Empty if the position is not legal. In antichess, only captures are
    /// returned whenever a capture is available.
    ///
    /// # Examples
    ///
    /// ```
    /// use echiquier::Position;
    ///
    /// let pos = Position::default();
    /// assert_eq!(pos.moves().len(), 20);
    /// ```
    pub fn moves(&self) -> MoveList {
        if !self.is_legal() {
            return MoveList::new();
        }
        let mut moves = self.king_safe_moves();
        if self.variant.captures_are_mandatory() && moves.iter().any(Move::is_capture) {
            moves.retain(|m| m.is_capture());
        }
        moves
    }

    /// Tests if there is at least one legal move.
    pub fn has_move(&self) -> bool {
        self.is_legal() && !self.king_safe_moves().is_empty()
    }

    /// Tests if a capture is among the moves that keep the king safe.
    pub(crate) fn has_legal_capture(&self) -> bool {
        self.is_legal() && self.king_safe_moves().iter().any(Move::is_capture)
    }

    fn king_safe_moves(&self) -> MoveList {
        let mut moves = MoveList::new();
        self.gen_pseudo_legal(&mut moves);
        moves.retain(|m| self.is_king_safe_after(m));
        for side in CastlingSide::ALL {
            if let Some(m) = self.castling_move(side) {
                moves.push(m);
            }
        }
        moves
    }

    fn gen_pseudo_legal(&self, moves: &mut MoveList) {
        let us = self.turn;
        let ours = self.board.by_color(us);
        let occupied = self.board.occupied();

        for from in ours & !self.board.by_role(Role::Pawn) {
            let Some(piece) = self.board.piece_at(from) else {
                continue;
            };
            for to in attacks::attacks(from, piece, occupied) & !ours {
                moves.push(Move::new(
                    from,
                    to,
                    piece,
                    MoveKind::Regular {
                        capture: self.board.role_at(to),
                    },
                ));
            }
        }

        self.gen_pawn_moves(moves);
        self.gen_en_passant(moves);
    }

    fn gen_pawn_moves(&self, moves: &mut MoveList) {
        let us = self.turn;
        let pawn = Role::Pawn.of(us);
        let theirs = self.board.by_color(!us);
        let occupied = self.board.occupied();

        for from in self.board.by_piece(pawn) {
            for to in attacks::pawn_attacks(us, from) & theirs {
                self.push_pawn_moves(moves, from, to, self.board.role_at(to));
            }

            let Some(single) = from.offset(0, us.forward()).filter(|&sq| !occupied.contains(sq))
            else {
                continue;
            };
            self.push_pawn_moves(moves, from, single, None);

            if self.is_double_push_rank(us, from.rank()) {
                if let Some(double) =
                    single.offset(0, us.forward()).filter(|&sq| !occupied.contains(sq))
                {
                    moves.push(Move::new(
                        from,
                        double,
                        pawn,
                        MoveKind::Regular { capture: None },
                    ));
                }
            }
        }
    }

    fn is_double_push_rank(&self, color: Color, rank: Rank) -> bool {
        rank == Rank::Second.relative_to(color)
            || (self.variant.has_wide_pawn_zone(color) && rank == Rank::First.relative_to(color))
    }

    fn push_pawn_moves(&self, moves: &mut MoveList, from: Square, to: Square, capture: Option<Role>) {
        let pawn = Role::Pawn.of(self.turn);
        if to.rank() == Rank::Eighth.relative_to(self.turn) {
            for &promotion in self.variant.promotion_roles() {
                moves.push(Move::new(
                    from,
                    to,
                    pawn,
                    MoveKind::Promotion { promotion, capture },
                ));
            }
        } else {
            moves.push(Move::new(from, to, pawn, MoveKind::Regular { capture }));
        }
    }

    fn gen_en_passant(&self, moves: &mut MoveList) {
        let Some(file) = self.en_passant else {
            return;
        };
        let us = self.turn;
        let pawn = Role::Pawn.of(us);
        let to = Square::from_coords(file, Rank::Sixth.relative_to(us));
        let captured = Square::from_coords(file, Rank::Fifth.relative_to(us));
        for from in self.board.by_piece(pawn) & attacks::pawn_attacks(!us, to) {
            moves.push(Move::new(from, to, pawn, MoveKind::EnPassant { captured }));
        }
    }

    /// Tests if the royal king of the moving side is safe after `m`.
    /// Always true for sides without a royal king.
    pub(crate) fn is_king_safe_after(&self, m: &Move) -> bool {
        let us = m.color();
        if !self.variant.has_royal_king(us) {
            return true;
        }
        let mut board = self.board.clone();
        apply_to_board(&mut board, m);
        match board.by_piece(Role::King.of(us)).single_square() {
            Some(king) => board.attackers_to(king, !us, board.occupied()).is_empty(),
            None => false,
        }
    }

    /// The castling move towards `side` for the side to move, if it is
    /// legal right now.
    pub fn castling_move(&self, side: CastlingSide) -> Option<Move> {
        if !self.is_legal() {
            return None;
        }
        let us = self.turn;
        let king = self.king_square(us)?;
        let rook_file = self
            .effective_castling(us)
            .on_side(king.file(), side)
            .single_file()?;

        let rook_from = Square::from_coords(rook_file, us.backrank());
        let king_to = side.king_to(us);
        let rook_to = side.rook_to(us);

        let path = (attacks::between(king, king_to).with(king_to)
            | attacks::between(rook_from, rook_to).with(rook_to))
        .without(king)
        .without(rook_from);
        if (path & self.board.occupied()).any() {
            return None;
        }

        let occupied = self.board.occupied().without(king).without(rook_from);
        let king_path = attacks::between(king, king_to).with(king).with(king_to);
        if king_path
            .into_iter()
            .any(|sq| self.board.attackers_to(sq, !us, occupied).any())
        {
            return None;
        }

        Some(Move::new(
            king,
            king_to,
            Role::King.of(us),
            MoveKind::Castling { rook_from, rook_to },
        ))
    }

    /// Validates a single move given by its origin and target.
    ///
    /// A king moving onto the c- or g-file of its home rank castles if it
    /// may. In Chess960 a king moving onto its own castling rook castles as
    /// well.
    ///
    /// # Examples
    ///
    /// ```
    /// use echiquier::{MoveStatus, Position, Square};
    ///
    /// let pos = Position::default();
    /// assert!(matches!(pos.is_move_legal(Square::E2, Square::E4), MoveStatus::Legal(_)));
    /// assert!(pos.is_move_legal(Square::E2, Square::E5).is_illegal());
    /// ```
    pub fn is_move_legal(&self, from: Square, to: Square) -> MoveStatus {
        if from == to || !self.is_legal() {
            return MoveStatus::Illegal;
        }
        let Some(piece) = self.board.piece_at(from).filter(|piece| piece.color == self.turn) else {
            return MoveStatus::Illegal;
        };

        if piece.role == Role::King {
            if let Some(status) = self.castling_status(from, to) {
                return status;
            }
        }

        let Some(m) = self.pseudo_move(from, to, piece) else {
            return MoveStatus::Illegal;
        };
        if !self.is_king_safe_after(&m) {
            return MoveStatus::Illegal;
        }
        if self.variant.captures_are_mandatory() && !m.is_capture() && self.has_legal_capture() {
            return MoveStatus::Illegal;
        }

        match m.kind() {
            MoveKind::Promotion { capture, .. } => MoveStatus::Promotion(PromotionChoice {
                from,
                to,
                pawn: piece,
                capture,
                roles: self.variant.promotion_roles(),
            }),
            _ => MoveStatus::Legal(m),
        }
    }

    fn castling_status(&self, king: Square, to: Square) -> Option<MoveStatus> {
        let us = self.turn;
        if self.king_square(us) != Some(king) || to.rank() != us.backrank() {
            return None;
        }

        if self.variant.is_chess960() && self.board.piece_at(to) == Some(Role::Rook.of(us)) {
            let side = CastlingSide::of_rook(king.file(), to.file());
            return Some(
                match self.castling_move(side).filter(|m| m.rook_from() == Some(to)) {
                    Some(m) => MoveStatus::Legal(m),
                    None => MoveStatus::Illegal,
                },
            );
        }

        let side = match to.file() {
            File::G => CastlingSide::KingSide,
            File::C => CastlingSide::QueenSide,
            _ => return None,
        };
        let castling = self.castling_move(side)?;
        if !self.variant.is_chess960() {
            return Some(MoveStatus::Legal(castling));
        }
        let king_move = self
            .pseudo_move(king, to, Role::King.of(us))
            .filter(|m| self.is_king_safe_after(m));
        Some(match king_move {
            Some(king_move) => MoveStatus::Castle960(Castle960Choice {
                castling,
                king_move,
            }),
            None => MoveStatus::Legal(castling),
        })
    }

    /// Resolves the geometry of a non-castling move without looking at king
    /// safety. Promotions are resolved to a queen.
    fn pseudo_move(&self, from: Square, to: Square, piece: Piece) -> Option<Move> {
        if from == to || self.board.by_color(piece.color).contains(to) {
            return None;
        }
        let capture = self.board.role_at(to);
        if piece.role == Role::Pawn {
            return self.pseudo_pawn_move(from, to, piece, capture);
        }
        attacks::attacks(from, piece, self.board.occupied())
            .contains(to)
            .then(|| Move::new(from, to, piece, MoveKind::Regular { capture }))
    }

    fn pseudo_pawn_move(
        &self,
        from: Square,
        to: Square,
        pawn: Piece,
        capture: Option<Role>,
    ) -> Option<Move> {
        let us = pawn.color;
        let kind = |capture| {
            if to.rank() == Rank::Eighth.relative_to(us) {
                MoveKind::Promotion {
                    promotion: Role::Queen,
                    capture,
                }
            } else {
                MoveKind::Regular { capture }
            }
        };

        if attacks::pawn_attacks(us, from).contains(to) {
            if capture.is_some() {
                return Some(Move::new(from, to, pawn, kind(capture)));
            }
            if self.en_passant == Some(to.file()) && to.rank() == Rank::Sixth.relative_to(us) {
                let captured = Square::from_coords(to.file(), Rank::Fifth.relative_to(us));
                return Some(Move::new(from, to, pawn, MoveKind::EnPassant { captured }));
            }
            return None;
        }

        if capture.is_some() {
            return None;
        }
        let single = from.offset(0, us.forward())?;
        if to == single {
            return Some(Move::new(from, to, pawn, kind(None)));
        }
        (self.is_double_push_rank(us, from.rank())
            && !self.board.occupied().contains(single)
            && single.offset(0, us.forward()) == Some(to))
        .then(|| Move::new(from, to, pawn, MoveKind::Regular { capture: None }))
    }

    /// Plays a move produced for this position.
    ///
    /// Castling rights are lost when the king moves and when a rook leaves
    /// or is captured on its home square. The en passant file is recorded
    /// only if an opposing pawn could capture.
    pub fn play(&mut self, m: &Move) {
        let us = m.color();
        apply_to_board(&mut self.board, m);

        if m.moving_piece().role == Role::King {
            *self.castling.get_mut(us) = CastlingFiles::empty();
        }
        for sq in [m.from(), m.to()] {
            for color in Color::ALL {
                if sq.rank() == color.backrank() {
                    self.castling
                        .get_mut(color)
                        .remove(CastlingFiles::from_file(sq.file()));
                }
            }
        }

        self.en_passant = None;
        if m.moving_piece().role == Role::Pawn
            && m.from().rank() == Rank::Second.relative_to(us)
            && m.to().rank() == Rank::Fourth.relative_to(us)
        {
            let skipped = Square::from_coords(m.from().file(), Rank::Third.relative_to(us));
            if (attacks::pawn_attacks(us, skipped) & self.board.by_piece(Role::Pawn.of(!us))).any() {
                self.en_passant = Some(m.to().file());
            }
        }

        self.turn = !us;
        self.invalidate();
        trace!(%m, "played move");
    }

    /// Tests if passing the turn is allowed: the position is legal and the
    /// side to move is not in check.
    pub fn is_null_move_legal(&self) -> bool {
        self.is_legal() && !self.is_check()
    }

    /// Passes the turn, clearing the en passant file. Returns `false`
    /// without changing anything if the null move is not legal.
    pub fn play_null_move(&mut self) -> bool {
        if !self.is_null_move_legal() {
            return false;
        }
        self.en_passant = None;
        self.turn = !self.turn;
        self.invalidate();
        trace!("played null move");
        true
    }

    /// Plays a move given in SAN, or `--` for a null move.
    ///
    /// Returns `false` and leaves the position untouched if the text does
    /// not describe a legal move. Use [`Position::parse_san()`] to learn
    /// why.
    pub fn play_notation(&mut self, notation: &str) -> bool {
        let notation = notation.trim();
        if notation == "--" {
            return self.play_null_move();
        }
        match self.parse_san(notation, Strictness::Relaxed) {
            Ok(m) => {
                self.play(&m);
                true
            }
            Err(err) => {
                debug!(%err, "rejected move notation");
                false
            }
        }
    }

    /// Pieces giving check to the royal king of the side to move.
    pub fn checkers(&self) -> Bitboard {
        match self.king_square(self.turn) {
            Some(king) if self.is_legal() => self.attackers(king, !self.turn),
            _ => Bitboard::EMPTY,
        }
    }

    /// Tests if the royal king of the side to move is attacked.
    pub fn is_check(&self) -> bool {
        self.checkers().any()
    }

    /// Tests if the side to move has lost.
    ///
    /// In antichess a side without moves wins instead; this still reports
    /// `true` for it, as the game is over. In horde, White without pieces
    /// is checkmated.
    pub fn is_checkmate(&self) -> bool {
        if !self.is_legal() || self.has_move() {
            return false;
        }
        match self.variant {
            Variant::Antichess => true,
            Variant::Horde if self.turn.is_white() => {
                self.board.by_color(Color::White).is_empty()
            }
            _ => self.is_check(),
        }
    }

    /// Tests if the side to move has no moves without being checkmated.
    pub fn is_stalemate(&self) -> bool {
        if !self.is_legal() || self.has_move() {
            return false;
        }
        match self.variant {
            Variant::Antichess => false,
            Variant::Horde if self.turn.is_white() => {
                self.board.by_color(Color::White).any()
            }
            _ => !self.is_check(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fen(variant: Variant, fen: &str) -> Position {
        Position::from_fen(variant, fen, Strictness::Relaxed).expect("valid fen")
    }

    fn legal(pos: &Position, from: Square, to: Square) -> Move {
        match pos.is_move_legal(from, to) {
            MoveStatus::Legal(m) => m,
            status => panic!("expected legal move, got {status:?}"),
        }
    }

    #[test]
    fn test_illegal_position_has_no_moves() {
        let pos = fen(Variant::Regular, "4k3/8/8/8/8/8/8/8 w - - 0 1");
        assert!(pos.moves().is_empty());
        assert!(!pos.has_move());
        assert!(!pos.is_checkmate());
        assert!(!pos.is_stalemate());
        assert!(!pos.is_check());
        assert!(!pos.is_null_move_legal());
    }

    #[test]
    fn test_castling() {
        let mut pos = fen(Variant::Regular, "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        let m = legal(&pos, Square::E1, Square::G1);
        assert!(m.is_castling());
        assert_eq!(m.rook_from(), Some(Square::H1));
        assert_eq!(m.rook_to(), Some(Square::F1));
        assert_eq!(pos.moves().iter().filter(|m| m.is_castling()).count(), 2);

        pos.play(&m);
        assert_eq!(pos.piece_at(Square::G1), Some(Role::King.of(Color::White)));
        assert_eq!(pos.piece_at(Square::F1), Some(Role::Rook.of(Color::White)));
        assert!(pos.castling_files(Color::White).is_empty());
        assert!(pos.castling(Color::Black, File::A));
    }

    #[test]
    fn test_castling_through_check() {
        let pos = fen(Variant::Regular, "r3k2r/8/8/8/8/8/5r2/R3K2R w KQkq - 0 1");
        assert!(pos.is_move_legal(Square::E1, Square::G1).is_illegal());
        assert!(legal(&pos, Square::E1, Square::C1).is_castling());
        let pos = fen(Variant::Regular, "r3k2r/8/8/8/8/8/8/RN2K2R w KQkq - 0 1");
        assert!(pos.is_move_legal(Square::E1, Square::C1).is_illegal());
    }

    #[test]
    fn test_rook_capture_clears_rights() {
        let mut pos = fen(Variant::Regular, "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        let m = legal(&pos, Square::A1, Square::A8);
        pos.play(&m);
        assert!(!pos.castling(Color::White, File::A));
        assert!(!pos.castling(Color::Black, File::A));
        assert!(pos.castling(Color::Black, File::H));
    }

    #[test]
    fn test_chess960_castling_choice() {
        let pos = fen(Variant::Chess960, "4k3/8/8/8/8/8/8/RK6 w A - 0 1");
        match pos.is_move_legal(Square::B1, Square::C1) {
            MoveStatus::Castle960(choice) => {
                assert!(choice.castling().is_castling());
                assert_eq!(choice.castling().rook_to(), Some(Square::D1));
                assert!(!choice.king_move().is_castling());
            }
            status => panic!("expected castling choice, got {status:?}"),
        }
        let m = legal(&pos, Square::B1, Square::A1);
        assert!(m.is_castling());
        assert_eq!(m.to(), Square::C1);
    }

    #[test]
    fn test_chess960_king_on_castling_square() {
        let pos = fen(Variant::Chess960, "4k3/8/8/8/8/8/8/6KR w H - 0 1");
        assert!(pos.is_move_legal(Square::G1, Square::G1).is_illegal());
        assert!(pos.parse_uci("g1g1", Strictness::Relaxed).is_err());

        let m = legal(&pos, Square::G1, Square::H1);
        assert!(m.is_castling());
        assert_eq!(m.to(), Square::G1);
        assert_eq!(m.rook_to(), Some(Square::F1));
        assert_eq!(pos.uci(&m), "g1h1");
    }

    #[test]
    fn test_en_passant() {
        let mut pos = Position::default();
        for (from, to) in [
            (Square::E2, Square::E4),
            (Square::A7, Square::A6),
            (Square::E4, Square::E5),
            (Square::D7, Square::D5),
        ] {
            let m = legal(&pos, from, to);
            pos.play(&m);
        }
        assert_eq!(pos.en_passant(), Some(File::D));
        let m = legal(&pos, Square::E5, Square::D6);
        assert!(m.is_en_passant());
        pos.play(&m);
        assert_eq!(pos.piece_at(Square::D5), None);
        assert_eq!(pos.piece_at(Square::D6), Some(Role::Pawn.of(Color::White)));
    }

    #[test]
    fn test_en_passant_only_with_capturer() {
        let mut pos = Position::default();
        let m = legal(&pos, Square::E2, Square::E4);
        pos.play(&m);
        assert_eq!(pos.en_passant(), None);
    }

    #[test]
    fn test_promotion() {
        let pos = fen(Variant::Regular, "1r2k3/P7/8/8/8/8/8/4K3 w - - 0 1");
        match pos.is_move_legal(Square::A7, Square::B8) {
            MoveStatus::Promotion(choice) => {
                assert_eq!(choice.roles().len(), 4);
                assert_eq!(choice.promote(Role::King), None);
                let m = choice.promote(Role::Knight).expect("knight promotion");
                assert_eq!(m.captured_piece(), Some(Role::Rook.of(Color::Black)));
            }
            status => panic!("expected promotion, got {status:?}"),
        }
        assert_eq!(pos.moves().iter().filter(|m| m.is_promotion()).count(), 8);
    }

    #[test]
    fn test_pinned_piece() {
        let pos = fen(Variant::Regular, "4k3/4r3/8/8/8/8/4N3/4K3 w - - 0 1");
        assert!(pos.is_move_legal(Square::E2, Square::C3).is_illegal());
        assert!(pos.moves().iter().all(|m| m.from() != Square::E2));
    }

    #[test]
    fn test_antichess() {
        let pos = fen(Variant::Antichess, "8/8/8/8/8/3p4/4P3/8 w - - 0 1");
        assert_eq!(pos.moves().len(), 1);
        assert!(pos.is_move_legal(Square::E2, Square::E4).is_illegal());
        assert!(matches!(
            pos.is_move_legal(Square::E2, Square::D3),
            MoveStatus::Legal(_)
        ));

        let pos = fen(Variant::Antichess, "8/P7/8/8/8/8/8/7k w - - 0 1");
        assert_eq!(pos.moves().len(), 5);

        let pos = fen(Variant::Antichess, "8/8/8/8/8/p7/P7/8 w - - 0 1");
        assert!(pos.is_checkmate());
        assert!(!pos.is_stalemate());
    }

    #[test]
    fn test_horde() {
        let pos = Position::start(Variant::Horde).expect("horde start");
        assert_eq!(pos.moves().len(), 8);

        let pos = fen(Variant::Horde, "4k3/8/8/8/8/8/8/P7 w - - 0 1");
        assert_eq!(pos.moves().len(), 2);
        let mut after = pos.clone();
        after.play(&legal(&pos, Square::A1, Square::A3));
        assert_eq!(after.en_passant(), None);

        let pos = fen(Variant::Horde, "4k3/8/8/8/8/8/8/8 w - - 0 1");
        assert!(pos.is_checkmate());
        assert!(!pos.is_stalemate());

        let pos = fen(Variant::Horde, "4k3/8/8/8/8/p7/P7/8 w - - 0 1");
        assert!(!pos.is_checkmate());
        assert!(pos.is_stalemate());
    }

    #[test]
    fn test_stalemate() {
        let pos = fen(Variant::Regular, "7k/5Q2/6K1/8/8/8/8/8 b - - 0 1");
        assert!(pos.is_stalemate());
        assert!(!pos.is_checkmate());
        assert!(!pos.is_check());
    }

    #[test]
    fn test_null_move() {
        let mut pos = Position::default();
        assert!(pos.play_null_move());
        assert_eq!(pos.turn(), Color::Black);

        let mut pos = fen(Variant::Regular, "4k3/8/8/8/8/8/8/4KR2 b - - 0 1");
        assert!(!pos.is_check());
        let mut pos_in_check = fen(Variant::Regular, "4k3/8/8/8/8/8/8/4R1K1 b - - 0 1");
        assert!(pos_in_check.is_check());
        assert!(!pos_in_check.play_null_move());
        assert_eq!(pos_in_check.turn(), Color::Black);
        assert!(pos.play_notation("--"));
        assert_eq!(pos.turn(), Color::White);
    }

    #[test]
    fn test_play_notation() {
        let mut pos = Position::default();
        for san in ["f3", "e5", "g4", "Qh4#"] {
            assert!(pos.play_notation(san), "{san}");
        }
        assert!(pos.is_checkmate());
        assert!(!pos.play_notation("Kf2"));
    }

    #[test]
    fn test_kingless_variants() {
        let pos = fen(Variant::NoKing, "8/8/8/8/8/8/8/R6r w - - 0 1");
        assert!(pos.is_legal());
        assert!(!pos.is_check());
        assert!(pos.moves().iter().any(|m| m.to() == Square::H1));

        let pos = fen(Variant::WhiteKingOnly, "8/8/8/8/8/8/8/K6r w - - 0 1");
        assert!(pos.is_check());
    }
}
