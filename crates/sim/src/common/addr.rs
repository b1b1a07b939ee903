//! Address decomposition into tag, set index, and block offset.
//!
//! Layout of a 64-bit address for a cache with `s` set-index bits and `b`
//! block-offset bits:
//!
//! ```text
//!  63                      s+b   s+b-1        b   b-1          0
//! +-------------------------+-----------------+----------------+
//! |           tag           |    set index    |     offset     |
//! +-------------------------+-----------------+----------------+
//! ```
//!
//! Everything here is shifts and masks. Widths of 64 are legal (`b = 64`
//! leaves no tag or set bits), so shifts go through `checked_shr` /
//! `checked_shl` rather than the raw operators.

/// The three fields of an address under a particular geometry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AddressParts {
    /// Bits above the set index.
    pub tag: u64,
    /// Selects one of the `2^s` sets.
    pub set_index: u64,
    /// Byte within the block.
    pub offset: u64,
}

/// Mask with the low `bits` bits set.
#[inline(always)]
pub fn low_mask(bits: u32) -> u64 {
    if bits >= u64::BITS {
        u64::MAX
    } else {
        (1u64 << bits) - 1
    }
}

#[inline(always)]
fn shr(value: u64, bits: u32) -> u64 {
    value.checked_shr(bits).unwrap_or(0)
}

#[inline(always)]
fn shl(value: u64, bits: u32) -> u64 {
    value.checked_shl(bits).unwrap_or(0)
}

impl AddressParts {
    /// Splits `address` for a cache with `set_bits` index bits and
    /// `block_bits` offset bits.
    ///
    /// The caller guarantees `set_bits + block_bits <= 64`.
    #[inline(always)]
    pub fn split(address: u64, set_bits: u32, block_bits: u32) -> Self {
        Self {
            tag: shr(address, set_bits + block_bits),
            set_index: shr(address, block_bits) & low_mask(set_bits),
            offset: address & low_mask(block_bits),
        }
    }

    /// Reassembles the address these parts were split from.
    pub fn compose(&self, set_bits: u32, block_bits: u32) -> u64 {
        shl(self.tag, set_bits + block_bits)
            | shl(self.set_index & low_mask(set_bits), block_bits)
            | (self.offset & low_mask(block_bits))
    }
}
