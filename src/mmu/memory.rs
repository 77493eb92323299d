use page_replacement::{PageEvents, NO_PAGE_FRAMES};
use page_walk::{
    clear_bit, frame_number, indices, make_pte, translate, Flag, Mode, Operation,
    TranslationError, ENTRIES_PER_TABLE, LEVELS,
};

/// First physical frame number handed out for data pages.
pub const DATA_FRAME_BASE: u64 = 0x100;

type Table = Box<[u64; ENTRIES_PER_TABLE]>;

/// Page tables and data frames of a small simulated machine.
///
/// Tables live in an arena; a non-leaf entry stores the arena index of its
/// child as the frame number. Table 0 is the root. Data frames are drawn
/// from a pool of `NO_PAGE_FRAMES` frames starting at `DATA_FRAME_BASE`.
#[derive(Debug)]
pub struct SimulatedMemory {
    tables: Vec<Table>,
    free_frames: Vec<u64>,
}

impl Default for SimulatedMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatedMemory {
    pub fn new() -> Self {
        let free_frames = (DATA_FRAME_BASE..DATA_FRAME_BASE + NO_PAGE_FRAMES as u64)
            .rev()
            .collect();
        SimulatedMemory {
            tables: vec![Box::new([0; ENTRIES_PER_TABLE])],
            free_frames,
        }
    }

    pub fn table_count(&self) -> usize {
        self.tables.len()
    }

    pub fn free_frames(&self) -> usize {
        self.free_frames.len()
    }

    /// Arena index of the last level table for `virtual_address`.
    fn leaf_table(&self, virtual_address: u64) -> Option<usize> {
        let path = indices(virtual_address);
        let mut table = 0;
        for index in &path[..LEVELS - 1] {
            let entry = self.tables[table][*index as usize];
            if !Flag::Present.is_set(entry) {
                return None;
            }
            table = frame_number(entry) as usize;
        }
        Some(table)
    }

    /// Like `leaf_table`, but creates missing tables on the way down.
    fn leaf_table_mut(&mut self, virtual_address: u64) -> usize {
        let path = indices(virtual_address);
        let mut table = 0;
        for index in &path[..LEVELS - 1] {
            let entry = self.tables[table][*index as usize];
            table = if Flag::Present.is_set(entry) {
                frame_number(entry) as usize
            } else {
                self.tables.push(Box::new([0; ENTRIES_PER_TABLE]));
                let child = self.tables.len() - 1;
                self.tables[table][*index as usize] =
                    make_pte(child as u64, &[Flag::Present, Flag::ReadWrite]);
                child
            };
        }
        table
    }

    /// The leaf entry for `virtual_address`; 0 when no leaf table exists.
    pub fn pte(&self, virtual_address: u64) -> u64 {
        let leaf = indices(virtual_address)[LEVELS - 1] as usize;
        self.leaf_table(virtual_address)
            .map(|table| self.tables[table][leaf])
            .unwrap_or(0)
    }

    pub fn set_pte(&mut self, virtual_address: u64, pte: u64) {
        let leaf = indices(virtual_address)[LEVELS - 1] as usize;
        let table = self.leaf_table_mut(virtual_address);
        self.tables[table][leaf] = pte;
    }

    /// Walks the tables and checks the leaf entry for this access.
    pub fn walk(
        &self,
        virtual_address: u64,
        operation: Operation,
        mode: Mode,
    ) -> Result<u64, TranslationError> {
        translate(self.pte(virtual_address), virtual_address, operation, mode)
    }
}

impl PageEvents for SimulatedMemory {
    fn evict_page(&mut self, virtual_address: u64) {
        let pte = self.pte(virtual_address);
        if !Flag::Present.is_set(pte) {
            log::error!("Evicting {:#x}, which has no present entry", virtual_address);
            return;
        }
        self.free_frames.push(frame_number(pte));
        self.set_pte(virtual_address, clear_bit(pte, Flag::Present.bit()));
    }

    fn load_page(&mut self, virtual_address: u64) {
        let Some(frame) = self.free_frames.pop() else {
            log::error!("No free frame to load {:#x}", virtual_address);
            return;
        };
        log::debug!("Frame {:#x} now backs {:#x}", frame, virtual_address);
        self.set_pte(virtual_address, make_pte(frame, &Flag::ALL));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unmapped_address_faults() {
        let memory = SimulatedMemory::new();
        assert_eq!(memory.pte(0x1000), 0);
        assert_eq!(
            memory.walk(0x1000, Operation::Read, Mode::User),
            Err(TranslationError::PageFault {
                virtual_address: 0x1000
            })
        );
    }

    #[test]
    fn load_installs_entry() {
        let mut memory = SimulatedMemory::new();
        memory.load_page(0x4000);
        assert_eq!(memory.table_count(), 4);
        assert_eq!(memory.free_frames(), NO_PAGE_FRAMES - 1);
        assert_eq!(
            memory.walk(0x4123, Operation::Write, Mode::User),
            Ok(DATA_FRAME_BASE << 12 | 0x123)
        );
    }

    #[test]
    fn evict_clears_present_and_frees_frame() {
        let mut memory = SimulatedMemory::new();
        memory.load_page(0x4000);
        memory.evict_page(0x4000);
        assert_eq!(memory.free_frames(), NO_PAGE_FRAMES);
        let pte = memory.pte(0x4000);
        assert!(!Flag::Present.is_set(pte));
        assert_eq!(frame_number(pte), DATA_FRAME_BASE);
        assert!(memory.walk(0x4000, Operation::Read, Mode::Supervisor).is_err());
    }

    #[test]
    fn frames_are_reused() {
        let mut memory = SimulatedMemory::new();
        memory.load_page(0x1000);
        memory.load_page(0x2000);
        memory.evict_page(0x1000);
        memory.load_page(0x3000);
        assert_eq!(frame_number(memory.pte(0x3000)), DATA_FRAME_BASE);
        assert_eq!(frame_number(memory.pte(0x2000)), DATA_FRAME_BASE + 1);
    }

    #[test]
    fn pool_exhaustion_is_logged_not_fatal() {
        let mut memory = SimulatedMemory::new();
        for page in 1..=NO_PAGE_FRAMES as u64 + 1 {
            memory.load_page(page << 12);
        }
        assert_eq!(memory.free_frames(), 0);
        assert_eq!(memory.pte(9 << 12), 0);
    }

    #[test]
    fn distant_addresses_get_their_own_tables() {
        let mut memory = SimulatedMemory::new();
        memory.set_pte(0x1000, 1);
        memory.set_pte(1 << 39, 1);
        assert_eq!(memory.table_count(), 7);
    }
}
