use crate::model::record::Record;
use std::mem;

const INITIAL_RESERVE_LIMIT: usize = 16 * 1024;

/// Double-buffered bounded queue of pending records.
///
/// Exactly one slot is active at any instant; the other is either empty or
/// owned by the drainer between `swap_out` and sink dispatch. The caller is
/// responsible for locking; the buffer itself is single-threaded state.
pub struct RecordBuffer {
    slots: [Vec<Record>; 2],
    active: usize,
    active_bytes: usize,
    max_records: usize,
    max_bytes: usize,
}

impl RecordBuffer {
    pub fn new(max_records: usize, max_bytes: usize) -> Self {
        // Reserve up front for the common case; a huge count threshold (used
        // when only the byte budget matters) must not preallocate.
        let reserve = max_records.min(INITIAL_RESERVE_LIMIT);
        Self {
            slots: [Vec::with_capacity(reserve), Vec::with_capacity(reserve)],
            active: 0,
            active_bytes: 0,
            max_records,
            max_bytes,
        }
    }

    /// Appends a record to the active slot and reports whether a
    /// back-pressure threshold (count or estimated bytes) was reached.
    pub fn push(&mut self, record: Record) -> bool {
        self.active_bytes += estimated_record_bytes(&record);
        self.slots[self.active].push(record);
        self.slots[self.active].len() >= self.max_records || self.active_bytes >= self.max_bytes
    }

    /// Moves out the active slot's contents and flips the selector. The slot
    /// flipped to is empty because the drainer is the only flipper.
    pub fn swap_out(&mut self) -> Vec<Record> {
        let batch = mem::take(&mut self.slots[self.active]);
        self.active = 1 - self.active;
        debug_assert!(self.slots[self.active].is_empty());
        self.active_bytes = 0;
        batch
    }

    pub fn len(&self) -> usize {
        self.slots[self.active].len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots[self.active].is_empty()
    }

    /// Estimated bytes held by the active slot.
    pub fn estimated_bytes(&self) -> usize {
        self.active_bytes
    }

    /// Index of the slot currently accepting appends (0 or 1).
    pub fn active_slot(&self) -> usize {
        self.active
    }

    pub fn max_records(&self) -> usize {
        self.max_records
    }
}

/// Byte-usage estimate for one record. Drives back-pressure only, so it does
/// not need to account for allocator overhead or spare `String` capacity.
fn estimated_record_bytes(record: &Record) -> usize {
    mem::size_of::<Record>() + record.message.len()
}
