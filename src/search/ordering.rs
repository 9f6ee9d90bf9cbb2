//! Move ordering for Negamax, per spec §4.1 "Ordering" and §4.3 step 4.
//!
//! The generator already attaches a static score to every move (MVV-LVA for
//! captures, a promotion/castle bias — see `movegen::push_scored`); this
//! module layers the search-time signals on top of that score in place, so
//! the per-node move buffer never needs a second heap-allocated copy.

use crate::moves::{Move, MoveList};
use crate::square::Square;

/// Tried before everything else: the best move from a previous, shallower
/// search of this same position (the principal-variation move).
const TT_MOVE_BONUS: i32 = 1_000_000;
/// Promotes a top-`mvv_store_k` capture (spec §6 `mvv_store_k`) above the
/// killer moves, but still below the TT move.
const CAPTURE_PROMOTE_BONUS: i32 = 60_000;
/// Large enough to sort above ordinary quiet moves but well below the TT
/// move and any MVV-LVA capture score the generator already attached.
const KILLER_BONUS: i32 = 50_000;
/// Small nudge for a capture that lands on the square the opponent's last
/// move vacated into — "captures of the piece that just moved" (spec §4.3
/// step 4).
const RECAPTURE_BONUS: i32 = 20;

/// Reorder `moves` in place: TT move first, then the top `mvv_store_k`
/// captures by MVV-LVA score, then killer moves, then the rest by descending
/// static score (recapture bonus folded in throughout).
///
/// `mvv_store_k` bounds how many captures get promoted ahead of killers
/// (spec §6's "Top-K captures to promote in ordering"); captures beyond the
/// top K still sort by their own MVV-LVA score, just without the extra
/// bump, so a big capture found late in generation order is never starved
/// entirely — only de-prioritized relative to the head of the list.
pub fn order_moves_in_place(
    moves: &mut MoveList,
    tt_move: Option<Move>,
    killers: &[Move],
    recapture_square: Option<Square>,
    mvv_store_k: usize,
) {
    let slice = moves.as_mut_slice();

    let mut capture_order: Vec<usize> = slice
        .iter()
        .enumerate()
        .filter(|(_, sm)| sm.is_capture)
        .map(|(i, _)| i)
        .collect();
    capture_order.sort_by_key(|&i| std::cmp::Reverse(slice[i].score));
    let promoted: std::collections::HashSet<usize> =
        capture_order.into_iter().take(mvv_store_k).collect();

    for (i, scored) in slice.iter_mut().enumerate() {
        if Some(scored.mv) == tt_move {
            scored.score += TT_MOVE_BONUS;
            continue;
        }
        if promoted.contains(&i) {
            scored.score += CAPTURE_PROMOTE_BONUS;
        } else if let Some(rank) = killers.iter().position(|&k| k == scored.mv) {
            scored.score += KILLER_BONUS - rank as i32;
        }
        if recapture_square == Some(scored.mv.to()) {
            scored.score += RECAPTURE_BONUS;
        }
    }
    slice.sort_by(|a, b| b.score.cmp(&a.score));
}
