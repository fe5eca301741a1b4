
//! The self-contained serialized form of a compressed stream.
//!
//! This is the only module that defines an on-disk layout. All integers are
//! little-endian. An empty input compresses to a zero-length envelope; any
//! other envelope has this layout:
//!
//! | field | type |
//! |---|---|
//! | symbol count `n`, `1 ..= 256` | `u16` |
//! | `n` × (symbol, code length `1 ..= 58`) | `u8`, `u8` |
//! | payload bit count | `u64` |
//! | packed payload, exactly `ceil(bits / 8)` bytes | `u8` × |
//!
//! Payload bit 0 is the most significant bit of payload byte 0. Bits past
//! the declared count in the final byte are undefined padding and are
//! ignored when decoding. The code lengths alone reproduce the exact code
//! table through the canonical assignment, so no side information is needed
//! to decompress.

use crate::code::{CodeDescriptors, CodeTable};
use crate::error::{Error, Result, UnitResult};
use crate::frequency::ALPHABET_SIZE;
use crate::io::{Data, Read, Write};


/// A compressed byte stream together with everything
/// needed to decompress it: the code table and the exact bit count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {

    /// The canonical code of every symbol in the alphabet.
    pub code_table: CodeTable,

    /// Exact number of payload bits. The last payload byte may carry padding.
    pub bit_count: u64,

    /// The concatenated code words, packed most significant bit first.
    pub payload: Vec<u8>,
}

impl Envelope {

    /// Number of whole bytes needed to hold `bit_count` bits.
    pub fn packed_byte_count(bit_count: u64) -> u64 {
        bit_count / 8 + if bit_count % 8 == 0 { 0 } else { 1 }
    }

    /// Serialize this envelope into the writer.
    pub fn write(&self, write: &mut impl Write) -> UnitResult {
        let descriptors = self.code_table.descriptors();

        debug_assert!(!descriptors.is_empty(), "writing envelope without any symbols");
        debug_assert!(descriptors.len() <= ALPHABET_SIZE, "more symbols than the alphabet holds");
        debug_assert_eq!(
            self.payload.len() as u64, Self::packed_byte_count(self.bit_count),
            "payload does not match its declared bit count"
        );

        (descriptors.len() as u16).write(write)?;

        for &(symbol, length) in &descriptors {
            symbol.write(write)?;
            length.write(write)?;
        }

        self.bit_count.write(write)?;
        u8::write_slice(write, &self.payload)?;

        Ok(())
    }

    /// Parse and validate a serialized envelope.
    /// Any inconsistency is reported as `Error::Invalid`;
    /// nothing is ever partially recovered from a damaged envelope.
    pub fn read(read: &mut impl Read) -> Result<Self> {
        let symbol_count = u16::read(read)? as usize;

        if symbol_count == 0 || symbol_count > ALPHABET_SIZE {
            return Err(Error::invalid("symbol count outside the alphabet"));
        }

        let mut descriptors = CodeDescriptors::new();
        for _ in 0 .. symbol_count {
            let symbol = u8::read(read)?;
            let length = u8::read(read)?;
            descriptors.push((symbol, length));
        }

        // rejects duplicate symbols, bad lengths, and non-prefix-free length sets
        let code_table = CodeTable::from_descriptors(&descriptors)?;

        let bit_count = u64::read(read)?;
        let byte_count = Self::packed_byte_count(bit_count);

        if byte_count > usize::MAX as u64 {
            return Err(Error::invalid("payload bit count overflows this platform"));
        }

        let payload = u8::read_vec(read, byte_count as usize, 1024 * 1024, None)?;

        Ok(Envelope { code_table, bit_count, payload })
    }
}
