
//! Bit-level packing and unpacking, most significant bit first.
//!
//! Stream bit `i` lives in byte `i / 8`, at bit `7 - (i % 8)` of that byte.
//! The last byte of a packed stream may contain padding bits; the exact
//! bit count is always carried alongside the bytes so the padding is
//! never interpreted.

use crate::error::{Error, Result};
use bit_field::BitField;


/// Collects single bits into packed bytes.
#[derive(Debug, Clone, Default)]
pub struct BitWriter {
    bytes: Vec<u8>,
    bit_count: u64,
}

impl BitWriter {

    /// A writer without any bits in it.
    pub fn new() -> Self {
        Self::default()
    }

    /// A writer with preallocated space for roughly `byte_estimate` packed bytes.
    pub fn with_capacity(byte_estimate: usize) -> Self {
        BitWriter { bytes: Vec::with_capacity(byte_estimate), bit_count: 0 }
    }

    /// Number of bits written so far.
    pub fn bit_count(&self) -> u64 {
        self.bit_count
    }

    /// Append a single bit.
    #[inline]
    pub fn write_bit(&mut self, bit: bool) {
        let bit_in_byte = (self.bit_count % 8) as usize;

        if bit_in_byte == 0 {
            self.bytes.push(0);
        }

        if bit {
            let byte_index = self.bytes.len() - 1;
            self.bytes[byte_index].set_bit(7 - bit_in_byte, true);
        }

        self.bit_count += 1;
    }

    /// The packed bytes. Bits past `bit_count` in the last byte are zero padding.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}


/// Reads single bits back out of packed bytes.
/// Knows the exact bit count of the stream and refuses to read the padding.
#[derive(Debug, Clone)]
pub struct BitReader<'b> {
    bytes: &'b [u8],
    bit_count: u64,
    position: u64,
}

impl<'b> BitReader<'b> {

    /// The packed slice must contain at least `bit_count` bits.
    pub fn new(bytes: &'b [u8], bit_count: u64) -> Result<Self> {
        if (bytes.len() as u64).checked_mul(8).map_or(true, |bits| bits < bit_count) {
            return Err(Error::invalid("payload is shorter than its declared bit count"));
        }

        Ok(BitReader { bytes, bit_count, position: 0 })
    }

    /// Number of declared bits that have not been read yet.
    pub fn remaining_bits(&self) -> u64 {
        self.bit_count - self.position
    }

    /// Whether all declared bits have been consumed.
    pub fn is_empty(&self) -> bool {
        self.position == self.bit_count
    }

    /// Read the next bit.
    /// Reading past the declared bit count means a code was cut off mid-word.
    #[inline]
    pub fn read_bit(&mut self) -> Result<bool> {
        if self.position == self.bit_count {
            return Err(Error::invalid("bit stream ends in the middle of a code"));
        }

        let byte = self.bytes[(self.position / 8) as usize];
        let bit = byte.get_bit(7 - (self.position % 8) as usize);

        self.position += 1;
        Ok(bit)
    }
}
