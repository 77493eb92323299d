mod memory;

pub use memory::{SimulatedMemory, DATA_FRAME_BASE};

use page_replacement::{FrameTable, Policy, ReplacementEngine, NO_PAGE_FRAMES};
use page_walk::{canonical_page, Mode, Operation, TranslationError};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    pub translations: usize,
    pub faults: usize,
}

/// Translation backed by demand paging.
///
/// A page fault during a walk is handed to the replacement policy, which
/// loads the page (evicting another one if needed), and the walk is retried
/// once. Pages are keyed by [`canonical_page`], so addresses differing only
/// in the ignored bits above bit 47 are one page. Addresses in page 0 can
/// never be loaded and keep faulting.
#[derive(Debug)]
pub struct Mmu {
    engine: ReplacementEngine<SimulatedMemory>,
    stats: Stats,
}

impl Mmu {
    pub fn new(policy: Policy) -> Self {
        Mmu {
            engine: ReplacementEngine::new(policy, SimulatedMemory::new()),
            stats: Stats::default(),
        }
    }

    pub fn policy(&self) -> Policy {
        self.engine.policy()
    }

    pub fn frames(&self) -> &FrameTable<NO_PAGE_FRAMES> {
        self.engine.table()
    }

    pub fn memory(&self) -> &SimulatedMemory {
        self.engine.events()
    }

    pub fn stats(&self) -> Stats {
        self.stats
    }

    pub fn map(&mut self, virtual_address: u64) {
        self.engine.map(canonical_page(virtual_address));
    }

    pub fn access(&mut self, virtual_address: u64) {
        self.engine.access(canonical_page(virtual_address));
    }

    pub fn translate(
        &mut self,
        virtual_address: u64,
        operation: Operation,
        mode: Mode,
    ) -> Result<u64, TranslationError> {
        self.stats.translations += 1;
        let page = canonical_page(virtual_address);
        let walked = self.memory().walk(virtual_address, operation, mode);
        match walked {
            Err(TranslationError::PageFault { .. }) => {
                self.stats.faults += 1;
                self.engine.map(page);
                self.memory().walk(virtual_address, operation, mode)
            }
            Ok(physical) => {
                self.engine.access(page);
                Ok(physical)
            }
            Err(err) => Err(err),
        }
    }
}
