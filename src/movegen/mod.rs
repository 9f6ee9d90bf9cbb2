//! Legal move generation.
//!
//! Pseudo-legal moves are generated per piece kind directly against the
//! mailbox board, then filtered to legal moves by actually playing each one
//! and testing whether it leaves the mover's own king attacked — this
//! folds pins, discovered checks (including the en-passant double-pawn
//! case), and check evasion into one path instead of three, at the cost of
//! an extra make/unmake per candidate move. Attack detection itself walks
//! outward from the target square along each piece's move pattern ("ray
//! scanning"), used both for this legality filter and for castling safety.

pub mod perft;

use crate::moves::{Move, MoveKind, MoveList};
use crate::piece::{Color, Piece, PieceKind};
use crate::position::Position;
use crate::square::{
    from_file_rank, is_playable, step, Square, BOARD_CELLS, DIAGONAL_DELTAS, KNIGHT_DELTAS,
    ORTHOGONAL_DELTAS,
};

/// True iff any piece of `by_color` attacks `square` in `position`.
pub fn is_square_attacked(position: &Position, square: Square, by_color: Color) -> bool {
    let pawn_deltas: [i8; 2] = match by_color {
        Color::White => [-9, -11],
        Color::Black => [9, 11],
    };
    for delta in pawn_deltas {
        if let Some(from) = step(square, delta) {
            if is_playable(from) {
                if let Some(piece) = position.piece_at(from) {
                    if piece.color == by_color && piece.kind == PieceKind::Pawn {
                        return true;
                    }
                }
            }
        }
    }

    for delta in KNIGHT_DELTAS {
        if let Some(from) = step(square, delta) {
            if is_playable(from) {
                if let Some(piece) = position.piece_at(from) {
                    if piece.color == by_color && piece.kind == PieceKind::Knight {
                        return true;
                    }
                }
            }
        }
    }

    for delta in crate::square::KING_DELTAS {
        if let Some(from) = step(square, delta) {
            if is_playable(from) {
                if let Some(piece) = position.piece_at(from) {
                    if piece.color == by_color && piece.kind == PieceKind::King {
                        return true;
                    }
                }
            }
        }
    }

    for delta in ORTHOGONAL_DELTAS {
        if ray_hits(position, square, delta, by_color, &[PieceKind::Rook, PieceKind::Queen]) {
            return true;
        }
    }
    for delta in DIAGONAL_DELTAS {
        if ray_hits(position, square, delta, by_color, &[PieceKind::Bishop, PieceKind::Queen]) {
            return true;
        }
    }

    false
}

fn ray_hits(
    position: &Position,
    from: Square,
    delta: i8,
    by_color: Color,
    attacker_kinds: &[PieceKind],
) -> bool {
    let mut sq = from;
    loop {
        match step(sq, delta) {
            Some(next) if is_playable(next) => {
                sq = next;
                match position.piece_at(sq) {
                    None => continue,
                    Some(piece) => {
                        return piece.color == by_color && attacker_kinds.contains(&piece.kind);
                    }
                }
            }
            _ => return false,
        }
    }
}

pub fn in_check(position: &Position, color: Color) -> bool {
    is_square_attacked(position, position.king_square(color), color.opposite())
}

/// All fully legal moves available to the side to move.
pub fn generate_legal_moves(position: &Position) -> MoveList {
    let mut pseudo = MoveList::new();
    generate_pseudo_legal_moves(position, &mut pseudo);

    let mover = position.side_to_move;
    let mut legal = MoveList::new();
    let mut scratch = position.clone();
    for scored in pseudo.as_slice() {
        scratch.make(scored.mv);
        let left_king_in_check = in_check(&scratch, mover);
        scratch.unmake();
        if !left_king_in_check {
            legal.push_scored(scored.mv, scored.score, scored.is_capture);
        }
    }
    legal
}

pub fn is_checkmate(position: &Position) -> bool {
    in_check(position, position.side_to_move) && generate_legal_moves(position).is_empty()
}

pub fn is_stalemate(position: &Position) -> bool {
    !in_check(position, position.side_to_move) && generate_legal_moves(position).is_empty()
}

fn generate_pseudo_legal_moves(position: &Position, list: &mut MoveList) {
    let mover = position.side_to_move;
    for sq in 0..BOARD_CELLS as Square {
        if !is_playable(sq) {
            continue;
        }
        let piece = match position.piece_at(sq) {
            Some(p) if p.color == mover => p,
            _ => continue,
        };
        match piece.kind {
            PieceKind::Pawn => generate_pawn_moves(position, sq, mover, list),
            PieceKind::Knight => generate_step_moves(position, sq, mover, &KNIGHT_DELTAS, list),
            PieceKind::Bishop => generate_slider_moves(position, sq, mover, &DIAGONAL_DELTAS, list),
            PieceKind::Rook => generate_slider_moves(position, sq, mover, &ORTHOGONAL_DELTAS, list),
            PieceKind::Queen => {
                generate_slider_moves(position, sq, mover, &DIAGONAL_DELTAS, list);
                generate_slider_moves(position, sq, mover, &ORTHOGONAL_DELTAS, list);
            }
            PieceKind::King => {
                generate_step_moves(position, sq, mover, &crate::square::KING_DELTAS, list);
                generate_castling_moves(position, mover, list);
            }
        }
    }
}

fn push_scored(list: &mut MoveList, position: &Position, mv: Move, moving: Piece) {
    let is_en_passant = mv.kind() == MoveKind::EnPassant;
    let captured_value = if is_en_passant {
        Some(PieceKind::Pawn.material_value())
    } else {
        position.piece_at(mv.to()).map(|p| p.kind.material_value())
    };
    let mut score = 0;
    if let Some(victim) = captured_value {
        score += 10 * victim - moving.kind.material_value();
    }
    if let Some(promo) = mv.kind().promotion_piece() {
        score += promo.material_value();
    }
    if mv.kind().is_castle() {
        score += 50;
    }
    list.push_scored(mv, score, captured_value.is_some());
}

fn generate_pawn_moves(position: &Position, from: Square, color: Color, list: &mut MoveList) {
    let forward: i8 = if color == Color::White { 10 } else { -10 };
    let start_rank: u8 = if color == Color::White { 2 } else { 7 };
    let promotion_rank: u8 = if color == Color::White { 8 } else { 1 };
    let moving = Piece::new(color, PieceKind::Pawn);

    if let Some(single) = step(from, forward) {
        if is_playable(single) && position.piece_at(single).is_none() {
            push_pawn_advance(position, from, single, promotion_rank, moving, list);
            if crate::square::rank_of(from) == start_rank {
                if let Some(double) = step(single, forward) {
                    if is_playable(double) && position.piece_at(double).is_none() {
                        push_scored(list, position, Move::new(from, double, MoveKind::DoublePush), moving);
                    }
                }
            }
        }
    }

    let capture_deltas: [i8; 2] = if color == Color::White { [9, 11] } else { [-9, -11] };
    for delta in capture_deltas {
        let to = match step(from, delta) {
            Some(sq) if is_playable(sq) => sq,
            _ => continue,
        };
        if let Some(target) = position.piece_at(to) {
            if target.color != color {
                push_pawn_advance(position, from, to, promotion_rank, moving, list);
            }
        } else if position.en_passant == Some(to) {
            push_scored(list, position, Move::new(from, to, MoveKind::EnPassant), moving);
        }
    }
}

fn push_pawn_advance(
    position: &Position,
    from: Square,
    to: Square,
    promotion_rank: u8,
    moving: Piece,
    list: &mut MoveList,
) {
    if crate::square::rank_of(to) == promotion_rank {
        for kind in [
            MoveKind::PromoteQueen,
            MoveKind::PromoteRook,
            MoveKind::PromoteBishop,
            MoveKind::PromoteKnight,
        ] {
            push_scored(list, position, Move::new(from, to, kind), moving);
        }
    } else {
        push_scored(list, position, Move::new(from, to, MoveKind::Quiet), moving);
    }
}

fn generate_step_moves(position: &Position, from: Square, color: Color, deltas: &[i8], list: &mut MoveList) {
    let moving = position.piece_at(from).expect("from-square occupied by mover");
    for &delta in deltas {
        let to = match step(from, delta) {
            Some(sq) if is_playable(sq) => sq,
            _ => continue,
        };
        match position.piece_at(to) {
            Some(target) if target.color == color => continue,
            _ => push_scored(list, position, Move::new(from, to, MoveKind::Quiet), moving),
        }
    }
}

fn generate_slider_moves(position: &Position, from: Square, color: Color, deltas: &[i8], list: &mut MoveList) {
    let moving = position.piece_at(from).expect("from-square occupied by mover");
    for &delta in deltas {
        let mut sq = from;
        loop {
            sq = match step(sq, delta) {
                Some(next) if is_playable(next) => next,
                _ => break,
            };
            match position.piece_at(sq) {
                None => push_scored(list, position, Move::new(from, sq, MoveKind::Quiet), moving),
                Some(target) => {
                    if target.color != color {
                        push_scored(list, position, Move::new(from, sq, MoveKind::Quiet), moving);
                    }
                    break;
                }
            }
        }
    }
}

fn generate_castling_moves(position: &Position, color: Color, list: &mut MoveList) {
    let rank = if color == Color::White { 1 } else { 8 };
    let opponent = color.opposite();
    let e = from_file_rank(5, rank);
    let f = from_file_rank(6, rank);
    let g = from_file_rank(7, rank);
    let d = from_file_rank(4, rank);
    let c = from_file_rank(3, rank);
    let b = from_file_rank(2, rank);
    let moving = Piece::new(color, PieceKind::King);

    if in_check(position, color) {
        return;
    }

    if position.castling.king_side(color)
        && position.piece_at(f).is_none()
        && position.piece_at(g).is_none()
        && !is_square_attacked(position, f, opponent)
        && !is_square_attacked(position, g, opponent)
    {
        push_scored(list, position, Move::new(e, g, MoveKind::CastleKing), moving);
    }

    if position.castling.queen_side(color)
        && position.piece_at(d).is_none()
        && position.piece_at(c).is_none()
        && position.piece_at(b).is_none()
        && !is_square_attacked(position, d, opponent)
        && !is_square_attacked(position, c, opponent)
    {
        push_scored(list, position, Move::new(e, c, MoveKind::CastleQueen), moving);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn startpos_has_twenty_legal_moves() {
        let position = Position::startpos();
        assert_eq!(generate_legal_moves(&position).len(), 20);
    }

    #[test]
    fn king_cannot_move_into_check() {
        // White king on e1 is in check from the rook on e7 along the open
        // e-file; stepping to e2 would still be on that file.
        let position = Position::from_fen("4k3/4r3/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        let moves = generate_legal_moves(&position);
        assert!(moves.as_slice().iter().all(|sm| sm.mv.to() != from_file_rank(5, 2)));
    }

    #[test]
    fn pinned_queen_cannot_leave_the_pin_file() {
        // Black's queen on e6 is pinned to the king on e8 by the rook on e1,
        // so every legal queen move must stay on the e-file.
        let position = Position::from_fen("4k3/8/4q3/8/8/8/8/4R1K1 b - - 0 1").unwrap();
        let moves = generate_legal_moves(&position);
        let queen_moves: Vec<_> = moves
            .as_slice()
            .iter()
            .filter(|sm| sm.mv.from() == from_file_rank(5, 6))
            .collect();
        assert!(!queen_moves.is_empty());
        assert!(queen_moves
            .iter()
            .all(|sm| crate::square::col_of(sm.mv.to()) == crate::square::col_of(from_file_rank(5, 6))));
    }

    #[test]
    fn detects_checkmate_with_fools_mate() {
        let fools_mate =
            Position::from_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3").unwrap();
        assert!(is_checkmate(&fools_mate));
    }

    #[test]
    fn detects_stalemate() {
        let position = Position::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
        assert!(is_stalemate(&position));
    }
}
