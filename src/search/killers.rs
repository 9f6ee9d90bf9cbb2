//! Killer-move table: per-depth quiet moves that caused a beta cutoff,
//! tried early at sibling nodes of the same depth (spec §4.3 step 5).
//!
//! New to this crate — the teacher's iterative-deepening drafts have no
//! killer table — but kept in the teacher's small-struct-with-inline-methods
//! style (cf. `search::transposition_table::TranspositionTable`).

use crate::moves::Move;

pub struct KillerTable {
    /// Indexed by remaining search depth; each slot holds at most `capacity`
    /// moves, newest first.
    slots: Vec<Vec<Move>>,
    capacity: usize,
}

impl KillerTable {
    pub fn new(depth_slots: usize, capacity: usize) -> Self {
        Self {
            slots: vec![Vec::new(); depth_slots.max(1)],
            capacity: capacity.max(1),
        }
    }

    /// Record `mv` as a killer at `depth`. FIFO eviction: the newest killer
    /// is inserted at the front and the oldest is dropped once `capacity` is
    /// exceeded. A move already recorded at this depth is not duplicated.
    pub fn record(&mut self, depth: usize, mv: Move) {
        let Some(slot) = self.slots.get_mut(depth) else {
            return;
        };
        if slot.contains(&mv) {
            return;
        }
        slot.insert(0, mv);
        slot.truncate(self.capacity);
    }

    pub fn killers_at(&self, depth: usize) -> &[Move] {
        self.slots.get(depth).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            slot.clear();
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Rebuild with a new per-depth capacity (spec §6 `num_killers`),
    /// discarding whatever killers were recorded under the old capacity.
    pub fn set_capacity(&mut self, capacity: usize) {
        *self = Self::new(self.slots.len(), capacity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::MoveKind;

    #[test]
    fn records_and_retrieves_killers_fifo_newest_first() {
        let mut table = KillerTable::new(4, 2);
        let a = Move::new(21, 31, MoveKind::Quiet);
        let b = Move::new(22, 32, MoveKind::Quiet);
        let c = Move::new(23, 33, MoveKind::Quiet);

        table.record(2, a);
        table.record(2, b);
        table.record(2, c);

        let killers = table.killers_at(2);
        assert_eq!(killers, &[c, b]);
    }

    #[test]
    fn does_not_duplicate_an_existing_killer() {
        let mut table = KillerTable::new(4, 2);
        let a = Move::new(21, 31, MoveKind::Quiet);
        table.record(3, a);
        table.record(3, a);
        assert_eq!(table.killers_at(3).len(), 1);
    }

    #[test]
    fn clear_empties_every_slot() {
        let mut table = KillerTable::new(4, 2);
        let a = Move::new(21, 31, MoveKind::Quiet);
        table.record(1, a);
        table.clear();
        assert!(table.killers_at(1).is_empty());
    }
}
