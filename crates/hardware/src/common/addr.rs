//! Address Decoding.
//!
//! This module splits linear byte addresses into the fields a cache level indexes by.
//! It provides the following:
//! 1. **Geometry:** Block size and set count of one cache level, both powers of two.
//! 2. **Decoding:** `(tag, index, offset)` extraction using shifts and masks.
//! 3. **Composition:** The inverse mapping, used to rebuild the address of an evicted block.
//!
//! For a geometry with `B`-byte blocks and `S` sets:
//! `offset = addr mod B`, `index = (addr / B) mod S`, `tag = addr / (B * S)`.

/// Fields of an address as seen by one cache level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DecodedAddr {
    /// High-order bits identifying the block within its set.
    pub tag: u32,
    /// Set index.
    pub index: u32,
    /// Byte offset within the block.
    pub offset: u32,
}

/// Block size and set count of a cache level.
///
/// Both quantities must be non-zero powers of two; [`Geometry::new`] rejects
/// anything else by returning `None`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Geometry {
    block_size: u32,
    num_sets: u32,
    offset_bits: u32,
    index_bits: u32,
}

impl Geometry {
    /// Creates a geometry for `block_size`-byte blocks spread across `num_sets` sets.
    ///
    /// # Arguments
    ///
    /// * `block_size` - Bytes per block.
    /// * `num_sets` - Number of sets in the level. `1` gives a single set.
    ///
    /// # Returns
    ///
    /// `None` if either value is zero, not a power of two, or if the two
    /// together need more than 32 address bits.
    pub fn new(block_size: u32, num_sets: u32) -> Option<Self> {
        if !block_size.is_power_of_two() || !num_sets.is_power_of_two() {
            return None;
        }
        let offset_bits = block_size.trailing_zeros();
        let index_bits = num_sets.trailing_zeros();
        if offset_bits + index_bits > u32::BITS {
            return None;
        }
        Some(Self {
            block_size,
            num_sets,
            offset_bits,
            index_bits,
        })
    }

    /// Returns the block size in bytes.
    #[inline]
    pub const fn block_size(&self) -> u32 {
        self.block_size
    }

    /// Returns the number of sets.
    #[inline]
    pub const fn num_sets(&self) -> u32 {
        self.num_sets
    }

    /// Returns the number of low address bits used as block offset.
    #[inline]
    pub const fn offset_bits(&self) -> u32 {
        self.offset_bits
    }

    /// Returns the number of address bits used as set index.
    #[inline]
    pub const fn index_bits(&self) -> u32 {
        self.index_bits
    }

    /// Splits `addr` into tag, index and offset.
    #[inline]
    pub const fn decode(&self, addr: u32) -> DecodedAddr {
        let offset = addr & (self.block_size - 1);
        let index = match addr.checked_shr(self.offset_bits) {
            Some(block) => block & (self.num_sets - 1),
            None => 0,
        };
        let tag = match addr.checked_shr(self.offset_bits + self.index_bits) {
            Some(tag) => tag,
            None => 0,
        };
        DecodedAddr { tag, index, offset }
    }

    /// Rebuilds the address whose fields are `tag`, `index` and `offset`.
    ///
    /// `index` and `offset` are masked to their field widths; tag bits that do
    /// not fit in 32 bits are discarded.
    #[inline]
    pub const fn compose(&self, tag: u32, index: u32, offset: u32) -> u32 {
        let high = match tag.checked_shl(self.offset_bits + self.index_bits) {
            Some(high) => high,
            None => 0,
        };
        let mid = match (index & (self.num_sets - 1)).checked_shl(self.offset_bits) {
            Some(mid) => mid,
            None => 0,
        };
        high | mid | (offset & (self.block_size - 1))
    }

    /// Returns the address of the first byte of the block containing `addr`.
    #[inline]
    pub const fn block_base(&self, addr: u32) -> u32 {
        addr & !(self.block_size - 1)
    }
}
