use crate::address::page_offset;
use crate::bits::{low_mask, set_bit, test_bit};
use crate::{TranslationError, FRAME_NUMBER_BITS, OFFSET_BITS};

/// Capability bits of a page table entry.
///
/// The discriminant is the bit position inside the 64-bit entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum Flag {
    /// The entry maps a frame that is resident in memory.
    Present = 0,
    /// Writes are allowed; read-only otherwise.
    ReadWrite = 1,
    /// Reachable from user mode; supervisor-only otherwise.
    UserSupervisor = 2,
}

impl Flag {
    pub const ALL: [Flag; 3] = [Flag::Present, Flag::ReadWrite, Flag::UserSupervisor];

    pub fn bit(self) -> u32 {
        self as u32
    }

    pub fn is_set(self, pte: u64) -> bool {
        test_bit(pte, self.bit())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Read,
    Write,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    User,
    Supervisor,
}

/// Bits `[12, 52)` of the entry.
pub fn frame_number(pte: u64) -> u64 {
    (pte >> OFFSET_BITS) & low_mask(FRAME_NUMBER_BITS)
}

/// Builds an entry for `frame` with the given flags set.
///
/// Frame numbers wider than 40 bits are truncated.
pub fn make_pte(frame: u64, flags: &[Flag]) -> u64 {
    let pte = (frame & low_mask(FRAME_NUMBER_BITS)) << OFFSET_BITS;
    flags.iter().fold(pte, |pte, flag| set_bit(pte, flag.bit()))
}

/// Reconstructs the physical address for `virtual_address` from its leaf entry.
pub fn pte_to_physical(pte: u64, virtual_address: u64) -> Result<u64, TranslationError> {
    if !Flag::Present.is_set(pte) {
        log::warn!(
            "Page fault: PTE {:#x} not present for {:#x}",
            pte,
            virtual_address
        );
        return Err(TranslationError::PageFault { virtual_address });
    }
    Ok((frame_number(pte) << OFFSET_BITS) | page_offset(virtual_address))
}

/// Checks presence first, then the write and user permissions.
pub fn check_access(
    pte: u64,
    virtual_address: u64,
    operation: Operation,
    mode: Mode,
) -> Result<(), TranslationError> {
    if !Flag::Present.is_set(pte) {
        return Err(TranslationError::PageFault { virtual_address });
    }
    let writable = operation == Operation::Read || Flag::ReadWrite.is_set(pte);
    let reachable = mode == Mode::Supervisor || Flag::UserSupervisor.is_set(pte);
    if !(writable && reachable) {
        log::debug!(
            "Protection fault: {:?} from {:?} at {:#x} (pte {:#x})",
            operation,
            mode,
            virtual_address,
            pte
        );
        return Err(TranslationError::ProtectionFault {
            virtual_address,
            operation,
            mode,
        });
    }
    Ok(())
}

/// [`check_access`] followed by [`pte_to_physical`].
pub fn translate(
    pte: u64,
    virtual_address: u64,
    operation: Operation,
    mode: Mode,
) -> Result<u64, TranslationError> {
    check_access(pte, virtual_address, operation, mode)?;
    pte_to_physical(pte, virtual_address)
}
