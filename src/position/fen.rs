//! FEN (Forsyth-Edwards Notation) parsing and generation.
//!
//! Hand-rolled rather than pulled in from a crate: the spec's external
//! interface for constructing/serializing positions is exactly FEN's six
//! fields and nothing more, so a small dedicated parser keeps the surface
//! area and error reporting under our own control (see `ChessError`'s
//! `InvalidFen*` variants).

use crate::error::{ChessError, ChessResult};
use crate::piece::{Color, Piece, PieceKind};
use crate::square::{from_file_rank, parse_algebraic, to_algebraic};

use super::Position;

pub const STARTING_POSITION_FEN: &str =
    "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

pub fn parse_fen(text: &str) -> ChessResult<Position> {
    let fields: Vec<&str> = text.split_whitespace().collect();
    if fields.len() < 4 {
        return Err(ChessError::MalformedFen(text.to_owned()));
    }

    let mut position = Position::empty();
    parse_board(&mut position, fields[0])?;

    position.side_to_move = match fields[1] {
        "w" => Color::White,
        "b" => Color::Black,
        other => return Err(ChessError::InvalidSideToMove(other.to_owned())),
    };

    parse_castling(&mut position, fields[2])?;

    position.en_passant = match fields[3] {
        "-" => None,
        square => Some(
            parse_algebraic(square)
                .map_err(|_| ChessError::InvalidEnPassantSquare(square.to_owned()))?,
        ),
    };

    position.halfmove_clock = match fields.get(4) {
        Some(text) => text
            .parse()
            .map_err(|_| ChessError::InvalidFenNumber(text.to_string()))?,
        None => 0,
    };
    position.fullmove_number = match fields.get(5) {
        Some(text) => text
            .parse()
            .map_err(|_| ChessError::InvalidFenNumber(text.to_string()))?,
        None => 1,
    };

    position.zobrist_key = position.recompute_zobrist_key();
    let (mg, eg) = position.recompute_psqt_sums();
    position.set_psqt_sums_for_fen(mg, eg);

    Ok(position)
}

fn parse_board(position: &mut Position, board_field: &str) -> ChessResult<()> {
    let ranks: Vec<&str> = board_field.split('/').collect();
    if ranks.len() != 8 {
        return Err(ChessError::InvalidFenBoard(board_field.to_owned()));
    }

    // FEN lists ranks from 8 down to 1.
    for (rank_from_top, rank_text) in ranks.iter().enumerate() {
        let rank = 8 - rank_from_top as u8;
        let mut file = 1u8;
        for ch in rank_text.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                file += empty_count as u8;
                continue;
            }
            if file > 8 {
                return Err(ChessError::InvalidFenBoard(board_field.to_owned()));
            }
            let color = if ch.is_ascii_uppercase() {
                Color::White
            } else {
                Color::Black
            };
            let kind = PieceKind::from_fen_char(ch)
                .ok_or_else(|| ChessError::InvalidFenToken(ch))?;
            let sq = from_file_rank(file, rank);
            position.place_piece(sq, Piece::new(color, kind));
            file += 1;
        }
        if file != 9 {
            return Err(ChessError::InvalidFenBoard(board_field.to_owned()));
        }
    }
    Ok(())
}

fn parse_castling(position: &mut Position, field: &str) -> ChessResult<()> {
    if field == "-" {
        return Ok(());
    }
    for ch in field.chars() {
        match ch {
            'K' => position.castling.white_king_side = true,
            'Q' => position.castling.white_queen_side = true,
            'k' => position.castling.black_king_side = true,
            'q' => position.castling.black_queen_side = true,
            _ => return Err(ChessError::InvalidCastlingRights(field.to_owned())),
        }
    }
    Ok(())
}

pub fn generate_fen(position: &Position) -> String {
    let mut board = String::new();
    for rank in (1..=8u8).rev() {
        let mut empty_run = 0u8;
        for file in 1..=8u8 {
            let sq = from_file_rank(file, rank);
            match position.piece_at(sq) {
                Some(piece) => {
                    if empty_run > 0 {
                        board.push_str(&empty_run.to_string());
                        empty_run = 0;
                    }
                    board.push(piece.kind.to_fen_char(piece.color));
                }
                None => empty_run += 1,
            }
        }
        if empty_run > 0 {
            board.push_str(&empty_run.to_string());
        }
        if rank != 1 {
            board.push('/');
        }
    }

    let side = match position.side_to_move {
        Color::White => "w",
        Color::Black => "b",
    };

    let mut castling = String::new();
    if position.castling.white_king_side {
        castling.push('K');
    }
    if position.castling.white_queen_side {
        castling.push('Q');
    }
    if position.castling.black_king_side {
        castling.push('k');
    }
    if position.castling.black_queen_side {
        castling.push('q');
    }
    if castling.is_empty() {
        castling.push('-');
    }

    let en_passant = match position.en_passant {
        Some(sq) => to_algebraic(sq),
        None => "-".to_owned(),
    };

    format!(
        "{board} {side} {castling} {en_passant} {} {}",
        position.halfmove_clock, position.fullmove_number
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starting_position_round_trips() {
        let position = parse_fen(STARTING_POSITION_FEN).unwrap();
        assert_eq!(generate_fen(&position), STARTING_POSITION_FEN);
    }

    #[test]
    fn kiwipete_parses_without_error() {
        let fen = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
        let position = parse_fen(fen).unwrap();
        assert_eq!(position.side_to_move, Color::White);
        assert!(position.castling.white_king_side);
        assert!(position.castling.black_queen_side);
    }

    #[test]
    fn rejects_boards_with_wrong_rank_count() {
        let bad = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP w KQkq - 0 1";
        assert!(parse_fen(bad).is_err());
    }

    #[test]
    fn zobrist_key_is_recomputed_after_parse() {
        let position = parse_fen(STARTING_POSITION_FEN).unwrap();
        assert_eq!(position.zobrist_key, position.recompute_zobrist_key());
    }
}
