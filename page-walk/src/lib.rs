//! Virtual address decomposition and page table entry decoding.
//!
//! A virtual address is laid out, most significant first, as 16 reserved
//! bits, four 9-bit table indices and a 12-bit page offset. A page table
//! entry keeps its flags in bits 0..=2 and the physical frame number in bits
//! 12..52. Nothing here touches memory; walking the tables is up to the
//! caller.

use std::fmt;

mod address;
mod bits;
mod pte;

pub use address::{
    canonical_page, index_level_1, index_level_2, index_level_3, index_level_4, indices,
    page_base, page_offset, PageWalk,
};
pub use bits::{clear_bit, set_bit, test_bit};
pub use pte::{
    check_access, frame_number, make_pte, pte_to_physical, translate, Flag, Mode, Operation,
};

/// Number of bits of a single table index.
pub const LEVEL_INDEX_BITS: u32 = 9;
/// Number of bits of the page offset.
pub const OFFSET_BITS: u32 = 12;
/// Width of the frame number stored in an entry.
pub const FRAME_NUMBER_BITS: u32 = 40;
/// Depth of the table tree.
pub const LEVELS: usize = 4;
/// Entries per table.
pub const ENTRIES_PER_TABLE: usize = 1 << LEVEL_INDEX_BITS;
pub const PAGE_SIZE: u64 = 1 << OFFSET_BITS;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranslationError {
    /// The entry does not have the present bit set.
    PageFault { virtual_address: u64 },
    /// The entry is present but does not allow this access.
    ProtectionFault {
        virtual_address: u64,
        operation: Operation,
        mode: Mode,
    },
}

impl fmt::Display for TranslationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TranslationError::PageFault { virtual_address } => {
                write!(f, "page fault at {:#x}", virtual_address)
            }
            TranslationError::ProtectionFault {
                virtual_address,
                operation,
                mode,
            } => write!(
                f,
                "protection fault at {:#x}: {:?} not allowed in {:?} mode",
                virtual_address, operation, mode
            ),
        }
    }
}

impl std::error::Error for TranslationError {}
