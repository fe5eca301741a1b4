
//! Compress and decompress whole byte streams.
//!
//! Compression runs the full pipeline: count symbol frequencies, build the
//! prefix tree, derive the canonical code table, rewrite the input as packed
//! code bits, and frame everything as a self-describing envelope.
//! Decompression is the exact inverse. Both are total functions over their
//! inputs: either the complete output is produced, or an error is returned
//! and no partial output is observable.

use crate::bits::{BitReader, BitWriter};
use crate::code::{CodeTable, DecodingTree};
use crate::envelope::Envelope;
use crate::error::{Error, Result};
use crate::frequency::FrequencyTable;
use crate::tree::HuffmanTree;
use std::io::Cursor;


/// A byte vector.
pub type ByteVec = Vec<u8>;

/// A byte slice.
pub type Bytes<'s> = &'s [u8];


/// Compress the bytes into a self-contained envelope.
/// Empty input produces an empty envelope.
pub fn compress_bytes(data: Bytes<'_>) -> Result<ByteVec> {
    let frequencies = count_frequencies(data);

    let tree = match HuffmanTree::from_frequencies(&frequencies) {
        Some(tree) => tree,
        None => return Ok(ByteVec::new()), // no symbols, nothing to encode
    };

    let code_table = CodeTable::from_tree(&tree)?;
    let (payload, bit_count) = encode_payload(data, &code_table);

    let envelope = Envelope { code_table, bit_count, payload };

    let mut bytes = Cursor::new(ByteVec::new());
    envelope.write(&mut bytes)?;
    Ok(bytes.into_inner())
}

/// Reproduce the exact bytes that were compressed into the envelope.
/// An empty envelope produces empty output.
pub fn decompress_bytes(envelope_bytes: Bytes<'_>) -> Result<ByteVec> {
    if envelope_bytes.is_empty() {
        return Ok(ByteVec::new());
    }

    let mut read = Cursor::new(envelope_bytes);
    let envelope = Envelope::read(&mut read)?;

    if (read.position() as usize) != envelope_bytes.len() {
        return Err(Error::invalid("unexpected bytes after the payload"));
    }

    let decoder = DecodingTree::from_table(&envelope.code_table)?;
    let reader = BitReader::new(&envelope.payload, envelope.bit_count)?;

    decode_payload(reader, &decoder)
}


#[cfg(feature = "rayon")]
fn count_frequencies(data: Bytes<'_>) -> FrequencyTable {
    FrequencyTable::count_bytes_parallel(data)
}

#[cfg(not(feature = "rayon"))]
fn count_frequencies(data: Bytes<'_>) -> FrequencyTable {
    FrequencyTable::count_bytes(data)
}

/// Concatenate the code word of every input byte, in input order.
/// Returns the packed bytes and the exact number of code bits.
fn encode_payload(data: Bytes<'_>, code_table: &CodeTable) -> (ByteVec, u64) {
    let mut writer = BitWriter::with_capacity(data.len() / 2);

    for &byte in data {
        let code = code_table.code(byte)
            .expect("symbol missing from just-built code table bug");

        for index in 0 .. code.len {
            writer.write_bit(code.bit(index));
        }
    }

    let bit_count = writer.bit_count();
    (writer.into_bytes(), bit_count)
}

/// Walk the decoding tree once per output byte, consuming exactly
/// the declared number of bits. Pad bits are never interpreted,
/// and a bit path that leaves the tree is a corrupt payload.
fn decode_payload(mut reader: BitReader<'_>, decoder: &DecodingTree) -> Result<ByteVec> {
    let mut output = ByteVec::new();

    while !reader.is_empty() {
        let mut node = decoder;

        loop {
            match node {
                DecodingTree::Symbol(symbol) => {
                    output.push(*symbol);
                    break;
                }

                DecodingTree::Branch(children) => {
                    let bit = reader.read_bit()?;

                    node = children[bit as usize].as_ref()
                        .ok_or_else(|| Error::invalid("bit sequence matches no code"))?;
                }
            }
        }
    }

    Ok(output)
}


#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn round_trip(){
        let data = b"abracadabra".to_vec();
        let envelope = compress_bytes(&data).unwrap();
        let decompressed = decompress_bytes(&envelope).unwrap();

        assert_eq!(decompressed, data);
    }

    #[test]
    fn empty_round_trip(){
        let envelope = compress_bytes(b"").unwrap();
        assert!(envelope.is_empty());
        assert_eq!(decompress_bytes(&envelope).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn encoded_bit_count_is_the_weighted_depth_sum(){
        let data = b"abracadabra";
        let frequencies = FrequencyTable::count_bytes(data);
        let tree = HuffmanTree::from_frequencies(&frequencies).unwrap();
        let code_table = CodeTable::from_tree(&tree).unwrap();

        let (_, bit_count) = encode_payload(data, &code_table);

        let weighted_sum: u64 = code_table.entries()
            .map(|(symbol, code)| frequencies.count(symbol) * code.len as u64)
            .sum();

        assert_eq!(bit_count, weighted_sum);
        assert_eq!(bit_count, 23); // the known optimum for these frequencies
    }

    #[test]
    fn trailing_garbage_is_rejected(){
        let mut envelope = compress_bytes(b"some meaningful data").unwrap();
        envelope.push(0);

        assert!(matches!(decompress_bytes(&envelope), Err(Error::Invalid(_))));
    }
}
