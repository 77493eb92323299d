use std::fmt;

use crate::bits::low_mask;
use crate::{LEVELS, LEVEL_INDEX_BITS, OFFSET_BITS};

/// Bits of an address the tables actually decode.
const ADDRESS_BITS: u32 = OFFSET_BITS + LEVEL_INDEX_BITS * LEVELS as u32;

/// Bit offset of the index for `level` (1 is the root, 4 selects the PTE).
const fn level_shift(level: u32) -> u32 {
    OFFSET_BITS + LEVEL_INDEX_BITS * (LEVELS as u32 - level)
}

#[inline]
fn index_at(virtual_address: u64, level: u32) -> u64 {
    (virtual_address >> level_shift(level)) & low_mask(LEVEL_INDEX_BITS)
}

/// Index into the level-1 (root) table.
pub fn index_level_1(virtual_address: u64) -> u64 {
    index_at(virtual_address, 1)
}

pub fn index_level_2(virtual_address: u64) -> u64 {
    index_at(virtual_address, 2)
}

pub fn index_level_3(virtual_address: u64) -> u64 {
    index_at(virtual_address, 3)
}

/// Index into the last table level, i.e. the slot holding the PTE.
pub fn index_level_4(virtual_address: u64) -> u64 {
    index_at(virtual_address, 4)
}

/// All four table indices, root first.
pub fn indices(virtual_address: u64) -> [u64; LEVELS] {
    [
        index_level_1(virtual_address),
        index_level_2(virtual_address),
        index_level_3(virtual_address),
        index_level_4(virtual_address),
    ]
}

/// The low 12 bits of the address.
pub fn page_offset(virtual_address: u64) -> u64 {
    virtual_address & low_mask(OFFSET_BITS)
}

/// The address with its page offset cleared.
pub fn page_base(virtual_address: u64) -> u64 {
    virtual_address & !low_mask(OFFSET_BITS)
}

/// The page base with the ignored bits above bit 47 cleared as well, so
/// every alias of a page yields the same value.
pub fn canonical_page(virtual_address: u64) -> u64 {
    page_base(virtual_address) & low_mask(ADDRESS_BITS)
}

/// A virtual address split into the pieces a four level walk needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWalk {
    pub virtual_address: u64,
    pub indices: [u64; LEVELS],
    pub offset: u64,
}

impl PageWalk {
    pub fn from_raw(virtual_address: u64) -> Self {
        PageWalk {
            virtual_address,
            indices: indices(virtual_address),
            offset: page_offset(virtual_address),
        }
    }

    /// Rebuilds bits `[0, 48)` of the address from the indices and offset.
    pub fn compose(&self) -> u64 {
        self.indices
            .iter()
            .enumerate()
            .fold(self.offset, |acc, (i, index)| {
                acc | (index << level_shift(i as u32 + 1))
            })
    }
}

impl fmt::Display for PageWalk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "VA({:#x}) = (l1={}, l2={}, l3={}, l4={}, offset={:#x})",
            self.virtual_address,
            self.indices[0],
            self.indices[1],
            self.indices[2],
            self.indices[3],
            self.offset
        )
    }
}
