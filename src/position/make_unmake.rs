//! Make/unmake move application, per spec §4.2.
//!
//! `make` mutates the position in place and pushes an [`UndoRecord`]; `unmake`
//! pops that record and restores the previous state exactly. Rather than
//! re-deriving the previous Zobrist key/PSQT sums/phase by reversing the
//! incremental math, the scalar aggregates that would otherwise need a
//! careful inverse are snapshotted directly into the undo record (mirroring
//! the teacher's `UndoState`, which snapshots `prev_zobrist_key` rather than
//! XOR-reversing it) — board occupancy itself is still reversed through the
//! same `place_piece`/`remove_piece` pair `make` used, so a stray mismatch
//! between the two directions cannot silently drift the board out of sync
//! with the restored scalars.

use crate::moves::{Move, MoveKind};
use crate::piece::{Color, Piece, PieceKind};
use crate::square::step;

use super::zobrist::{self, CastleRight};
use super::{Position, UndoRecord};

impl Position {
    /// Apply `mv`, which must be a pseudo-legal move generated against this
    /// exact position. Pushes the information `unmake` needs onto the
    /// history stack.
    pub fn make(&mut self, mv: Move) {
        let from = mv.from();
        let to = mv.to();
        let moving_color = self.side_to_move;
        let moved_piece = self.piece_at(from).expect("make: no piece on from-square");

        let prev_castling = self.castling;
        let prev_en_passant = self.en_passant;
        let prev_halfmove_clock = self.halfmove_clock;
        let prev_fullmove_number = self.fullmove_number;
        let prev_zobrist_key = self.zobrist_key;
        let prev_phase = self.phase;
        let prev_psqt_mg = self.psqt_mg;
        let prev_psqt_eg = self.psqt_eg;
        let prev_king_square = self.king_square;

        // Clear the old en-passant/side-to-move contribution; both get
        // re-added below in their updated form.
        if let Some(ep) = self.en_passant {
            self.zobrist_key ^= zobrist::en_passant_file_key_for_square(ep);
        }
        self.en_passant = None;

        let is_capture = matches!(mv.kind(), MoveKind::EnPassant) || self.piece_at(to).is_some();
        let mut captured = None;

        match mv.kind() {
            MoveKind::EnPassant => {
                let captured_sq = step(to, if moving_color == Color::White { -10 } else { 10 })
                    .expect("en-passant capture square is always on-board");
                let captured_piece = self.remove_piece(captured_sq);
                captured = Some((captured_sq, captured_piece));
                self.remove_piece(from);
                self.place_piece(to, moved_piece);
            }
            MoveKind::CastleKing | MoveKind::CastleQueen => {
                self.remove_piece(from);
                self.place_piece(to, moved_piece);
                let rank_row = if moving_color == Color::White { 1 } else { 8 };
                let (rook_from, rook_to) = if mv.kind() == MoveKind::CastleKing {
                    (
                        crate::square::from_file_rank(8, rank_row),
                        crate::square::from_file_rank(6, rank_row),
                    )
                } else {
                    (
                        crate::square::from_file_rank(1, rank_row),
                        crate::square::from_file_rank(4, rank_row),
                    )
                };
                let rook = self.remove_piece(rook_from);
                self.place_piece(rook_to, rook);
            }
            MoveKind::PromoteQueen
            | MoveKind::PromoteRook
            | MoveKind::PromoteBishop
            | MoveKind::PromoteKnight => {
                if let Some(existing) = self.piece_at(to) {
                    captured = Some((to, existing));
                    self.remove_piece(to);
                }
                self.remove_piece(from);
                let promoted = Piece::new(
                    moving_color,
                    mv.kind().promotion_piece().expect("promotion kind always carries a piece"),
                );
                self.place_piece(to, promoted);
            }
            MoveKind::Quiet | MoveKind::DoublePush => {
                if let Some(existing) = self.piece_at(to) {
                    captured = Some((to, existing));
                    self.remove_piece(to);
                }
                self.remove_piece(from);
                self.place_piece(to, moved_piece);
            }
        }

        if mv.kind() == MoveKind::DoublePush {
            let ep_square = step(from, if moving_color == Color::White { 10 } else { -10 })
                .expect("double push always has a valid midpoint square");
            self.en_passant = Some(ep_square);
            self.zobrist_key ^= zobrist::en_passant_file_key_for_square(ep_square);
        }

        self.update_castling_rights_after_move(moved_piece.kind, from, to, moving_color);

        if moved_piece.kind == PieceKind::Pawn || is_capture {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock += 1;
        }
        if moving_color == Color::Black {
            self.fullmove_number += 1;
        }

        self.zobrist_key ^= zobrist::side_to_move_key();
        self.side_to_move = moving_color.opposite();

        self.history.push(UndoRecord {
            mv: Some(mv),
            moved_piece: Some(moved_piece.kind),
            captured,
            prev_side_to_move: moving_color,
            prev_castling,
            prev_en_passant,
            prev_halfmove_clock,
            prev_fullmove_number,
            prev_zobrist_key,
            prev_phase,
            prev_psqt_mg,
            prev_psqt_eg,
            prev_king_square,
        });
    }

    /// Undo the most recent `make`. Panics if there is no history to pop
    /// (a caller bug, since `make`/`unmake` calls must always be paired).
    pub fn unmake(&mut self) {
        let record = self.history.pop().expect("unmake called with empty history");
        let mv = record.mv.expect("unmake: record was not a null move");
        let from = mv.from();
        let to = mv.to();
        let moving_color = record.prev_side_to_move;

        match mv.kind() {
            MoveKind::EnPassant => {
                let moved = self.remove_piece(to);
                self.place_piece(from, moved);
                let (captured_sq, captured_piece) = record.captured.expect("en-passant always captures");
                self.place_piece(captured_sq, captured_piece);
            }
            MoveKind::CastleKing | MoveKind::CastleQueen => {
                let moved = self.remove_piece(to);
                self.place_piece(from, moved);
                let rank_row = if moving_color == Color::White { 1 } else { 8 };
                let (rook_from, rook_to) = if mv.kind() == MoveKind::CastleKing {
                    (
                        crate::square::from_file_rank(8, rank_row),
                        crate::square::from_file_rank(6, rank_row),
                    )
                } else {
                    (
                        crate::square::from_file_rank(1, rank_row),
                        crate::square::from_file_rank(4, rank_row),
                    )
                };
                let rook = self.remove_piece(rook_to);
                self.place_piece(rook_from, rook);
            }
            MoveKind::PromoteQueen
            | MoveKind::PromoteRook
            | MoveKind::PromoteBishop
            | MoveKind::PromoteKnight => {
                self.remove_piece(to);
                self.place_piece(from, Piece::new(moving_color, PieceKind::Pawn));
                if let Some((sq, piece)) = record.captured {
                    self.place_piece(sq, piece);
                }
            }
            MoveKind::Quiet | MoveKind::DoublePush => {
                let moved = self.remove_piece(to);
                self.place_piece(from, moved);
                if let Some((sq, piece)) = record.captured {
                    self.place_piece(sq, piece);
                }
            }
        }

        self.side_to_move = record.prev_side_to_move;
        self.castling = record.prev_castling;
        self.en_passant = record.prev_en_passant;
        self.halfmove_clock = record.prev_halfmove_clock;
        self.fullmove_number = record.prev_fullmove_number;
        self.zobrist_key = record.prev_zobrist_key;
        self.phase = record.prev_phase;
        self.psqt_mg = record.prev_psqt_mg;
        self.psqt_eg = record.prev_psqt_eg;
        self.king_square = record.prev_king_square;
    }

    /// Apply a null move: flip the side to move without moving any piece.
    /// Used by the search core only where the spec explicitly calls for it
    /// (it does not call for null-move pruning; this exists so the history
    /// stack has a uniform push/pop shape for any future collaborator, e.g.
    /// a perft variant that wants to probe "the position after passing").
    pub fn make_null(&mut self) {
        let prev_en_passant = self.en_passant;
        let prev_zobrist_key = self.zobrist_key;
        let moving_color = self.side_to_move;

        if let Some(ep) = self.en_passant {
            self.zobrist_key ^= zobrist::en_passant_file_key_for_square(ep);
        }
        self.en_passant = None;
        self.zobrist_key ^= zobrist::side_to_move_key();
        self.side_to_move = moving_color.opposite();

        self.history.push(UndoRecord {
            mv: None,
            moved_piece: None,
            captured: None,
            prev_side_to_move: moving_color,
            prev_castling: self.castling,
            prev_en_passant,
            prev_halfmove_clock: self.halfmove_clock,
            prev_fullmove_number: self.fullmove_number,
            prev_zobrist_key,
            prev_phase: self.phase,
            prev_psqt_mg: self.psqt_mg,
            prev_psqt_eg: self.psqt_eg,
            prev_king_square: self.king_square,
        });
    }

    pub fn unmake_null(&mut self) {
        let record = self.history.pop().expect("unmake_null called with empty history");
        debug_assert!(record.mv.is_none());
        self.side_to_move = record.prev_side_to_move;
        self.en_passant = record.prev_en_passant;
        self.zobrist_key = record.prev_zobrist_key;
    }

    fn update_castling_rights_after_move(
        &mut self,
        moved_kind: PieceKind,
        from: crate::square::Square,
        to: crate::square::Square,
        moving_color: Color,
    ) {
        if moved_kind == PieceKind::King {
            match moving_color {
                Color::White => {
                    if self.castling.white_king_side {
                        self.castling.white_king_side = false;
                        self.zobrist_key ^= zobrist::castling_right_key(CastleRight::WhiteKingSide);
                    }
                    if self.castling.white_queen_side {
                        self.castling.white_queen_side = false;
                        self.zobrist_key ^= zobrist::castling_right_key(CastleRight::WhiteQueenSide);
                    }
                }
                Color::Black => {
                    if self.castling.black_king_side {
                        self.castling.black_king_side = false;
                        self.zobrist_key ^= zobrist::castling_right_key(CastleRight::BlackKingSide);
                    }
                    if self.castling.black_queen_side {
                        self.castling.black_queen_side = false;
                        self.zobrist_key ^= zobrist::castling_right_key(CastleRight::BlackQueenSide);
                    }
                }
            }
        }

        self.clear_rook_right_if_touched(from);
        self.clear_rook_right_if_touched(to);
    }

    /// A rook's castling right is lost the moment either its home square is
    /// vacated (it moved) or occupied by a capture (it was taken) — spec
    /// §3's "castling right clears if either the king or that corner's rook
    /// has moved or been captured".
    fn clear_rook_right_if_touched(&mut self, sq: crate::square::Square) {
        if sq == crate::square::from_file_rank(8, 1) && self.castling.white_king_side {
            self.castling.white_king_side = false;
            self.zobrist_key ^= zobrist::castling_right_key(CastleRight::WhiteKingSide);
        } else if sq == crate::square::from_file_rank(1, 1) && self.castling.white_queen_side {
            self.castling.white_queen_side = false;
            self.zobrist_key ^= zobrist::castling_right_key(CastleRight::WhiteQueenSide);
        } else if sq == crate::square::from_file_rank(8, 8) && self.castling.black_king_side {
            self.castling.black_king_side = false;
            self.zobrist_key ^= zobrist::castling_right_key(CastleRight::BlackKingSide);
        } else if sq == crate::square::from_file_rank(1, 8) && self.castling.black_queen_side {
            self.castling.black_queen_side = false;
            self.zobrist_key ^= zobrist::castling_right_key(CastleRight::BlackQueenSide);
        }
    }

}
