//! Single-bit helpers over 64-bit words.
//!
//! `n` must be in `0..64`. Larger positions are a caller error and are not
//! checked in release builds.

/// Returns `value` with bit `n` forced to 1.
#[inline]
pub fn set_bit(value: u64, n: u32) -> u64 {
    debug_assert!(n < u64::BITS, "bit position {} out of range", n);
    value | (1u64 << n)
}

/// Returns whether bit `n` of `value` is 1.
#[inline]
pub fn test_bit(value: u64, n: u32) -> bool {
    debug_assert!(n < u64::BITS, "bit position {} out of range", n);
    (value >> n) & 1 != 0
}

/// Returns `value` with bit `n` forced to 0.
#[inline]
pub fn clear_bit(value: u64, n: u32) -> u64 {
    debug_assert!(n < u64::BITS, "bit position {} out of range", n);
    value & !(1u64 << n)
}

/// Mask with the low `width` bits set.
#[inline]
pub(crate) const fn low_mask(width: u32) -> u64 {
    if width >= u64::BITS {
        u64::MAX
    } else {
        (1u64 << width) - 1
    }
}
