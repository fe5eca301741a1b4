
//! Compress and decompress arbitrary byte streams with classic Huffman coding.
//!
//! The whole input is scanned once to collect symbol statistics, an optimal
//! prefix-free code is derived from them, and the input is rewritten as a
//! packed bit stream. The compressed form is a self-describing envelope:
//! it carries everything needed to reproduce the original bytes exactly,
//! without any side information.
//!
//! ```
//! use huffpack::prelude::*;
//!
//! let envelope = compress_bytes(b"abracadabra").unwrap();
//! let original = decompress_bytes(&envelope).unwrap();
//! assert_eq!(original, b"abracadabra");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]


pub mod io;
pub mod bits;
pub mod frequency;
pub mod tree;
pub mod code;
pub mod envelope;
pub mod codec;
pub mod error;


/// Export the most important items of this crate.
pub mod prelude {

    // main exports
    pub use crate::codec::{compress_bytes, decompress_bytes, ByteVec, Bytes};

    // core data types
    pub use crate::frequency::FrequencyTable;
    pub use crate::tree::HuffmanTree;
    pub use crate::code::{Code, CodeTable};
    pub use crate::envelope::Envelope;

    // secondary data types
    pub use crate::error::{Error, Result, UnitResult};
}
