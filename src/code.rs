
//! Canonical prefix code generation, and its inverse for decoding.
//!
//! Codes are assigned *canonically*: only the per-symbol code lengths are
//! derived from the tree, and the actual bit patterns follow deterministically
//! from the lengths alone. Because of that, an envelope only has to transmit
//! `(symbol, length)` pairs, and the decompressor rebuilds the exact same
//! table by running the same assignment.
//!
//! Canonical rule: symbols are ordered by `(length, byte value)`; the first
//! symbol receives the all-zero code, and every following symbol receives the
//! previous code incremented by one, shifted left if its code is longer.

use crate::error::{Error, Result, UnitResult};
use crate::frequency::ALPHABET_SIZE;
use crate::tree::HuffmanTree;
use smallvec::SmallVec;


/// Longest supported code word in bits. A deeper prefix tree would require
/// a pathologically skewed input of more than a terabyte.
pub const MAX_CODE_LENGTH: u8 = 58;

/// `(symbol, code length)` pairs, as stored in an envelope header.
pub type CodeDescriptors = SmallVec<[(u8, u8); 64]>;


/// One prefix-free code word of at most `MAX_CODE_LENGTH` bits,
/// stored in the least significant bits of `bits`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Code {

    /// The code word, with its first bit at position `len - 1`.
    pub bits: u64,

    /// Number of valid bits in `bits`. Never zero.
    pub len: u8,
}

impl Code {

    /// The bit at `index`, counting from the first code bit.
    #[inline]
    pub fn bit(self, index: u8) -> bool {
        debug_assert!(index < self.len, "code bit index out of range");
        (self.bits >> (self.len - 1 - index)) & 1 == 1
    }

    /// Whether this code word is a prefix of the other code word.
    /// In a valid table, this holds for no pair of distinct codes.
    pub fn is_prefix_of(self, other: Code) -> bool {
        self.len <= other.len
            && (other.bits >> (other.len - self.len)) == self.bits
    }
}


/// Maps every symbol of the alphabet to its code word.
#[derive(Clone, PartialEq, Eq)]
pub struct CodeTable {
    codes: [Option<Code>; ALPHABET_SIZE],
}

impl CodeTable {

    /// Derive the code table from a prefix tree: collect each leaf's depth
    /// as its code length, then assign canonical codes from the lengths.
    ///
    /// A tree that is a bare leaf (no branches at all) still yields a code
    /// of length one, as an empty code could never be located in a bit stream.
    pub fn from_tree(tree: &HuffmanTree) -> Result<Self> {
        let mut descriptors = CodeDescriptors::new();
        collect_leaf_depths(tree, 0, &mut descriptors)?;
        Self::from_descriptors(&descriptors)
    }

    /// Run the canonical assignment over `(symbol, length)` pairs.
    /// This is the same computation when compressing and when reading an
    /// envelope back, which is what makes the envelope self-describing.
    ///
    /// Rejects empty input, out-of-range lengths, duplicate symbols, and
    /// length sets that oversubscribe the code space (and therefore could
    /// not have come from any prefix tree).
    pub fn from_descriptors(descriptors: &[(u8, u8)]) -> Result<Self> {
        if descriptors.is_empty() {
            return Err(Error::invalid("code table without any symbols"));
        }

        let mut ordered: CodeDescriptors = descriptors.iter()
            .map(|&(symbol, len)| (len, symbol))
            .collect();

        ordered.sort_unstable();

        let mut codes = [None; ALPHABET_SIZE];
        let mut previous: Option<Code> = None;

        for &(len, symbol) in &ordered {
            if len == 0 || len > MAX_CODE_LENGTH {
                return Err(Error::invalid("code length out of range"));
            }

            if codes[symbol as usize].is_some() {
                return Err(Error::invalid("duplicate symbol in code table"));
            }

            let bits = match previous {
                None => 0,
                Some(code) => (code.bits + 1) << (len - code.len),
            };

            // a code spilling past its length means the lengths
            // violate the Kraft inequality
            if (bits >> len) != 0 {
                return Err(Error::invalid("code lengths oversubscribe the code space"));
            }

            let code = Code { bits, len };
            codes[symbol as usize] = Some(code);
            previous = Some(code);
        }

        Ok(CodeTable { codes })
    }

    /// The code word of the specified symbol, if it is part of the alphabet.
    pub fn code(&self, symbol: u8) -> Option<Code> {
        self.codes[symbol as usize]
    }

    /// Number of symbols that have a code.
    pub fn len(&self) -> usize {
        self.codes.iter().filter(|code| code.is_some()).count()
    }

    /// Whether no symbol has a code.
    pub fn is_empty(&self) -> bool {
        self.codes.iter().all(|code| code.is_none())
    }

    /// All coded symbols, ascending by byte value, with their code words.
    pub fn entries(&self) -> impl Iterator<Item = (u8, Code)> + '_ {
        self.codes.iter().enumerate()
            .filter_map(|(symbol, code)| code.map(|code| (symbol as u8, code)))
    }

    /// The `(symbol, length)` pairs an envelope stores for this table.
    pub fn descriptors(&self) -> CodeDescriptors {
        self.entries().map(|(symbol, code)| (symbol, code.len)).collect()
    }
}

impl std::fmt::Debug for CodeTable {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.debug_map()
            .entries(self.entries().map(|(symbol, code)| (symbol, (code.bits, code.len))))
            .finish()
    }
}

fn collect_leaf_depths(tree: &HuffmanTree, depth: u8, out: &mut CodeDescriptors) -> UnitResult {
    match tree {
        HuffmanTree::Leaf { symbol, .. } => {
            out.push((*symbol, depth.max(1)));
            Ok(())
        }

        HuffmanTree::Branch { left, right, .. } => {
            if depth == MAX_CODE_LENGTH {
                return Err(Error::unsupported("prefix tree deeper than the longest supported code"));
            }

            collect_leaf_depths(left, depth + 1, out)?;
            collect_leaf_depths(right, depth + 1, out)
        }
    }
}


/// The inverse of a `CodeTable`: a binary tree that is descended one bit
/// at a time until a symbol is reached. Decoding through this tree never
/// depends on any table iteration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodingTree {

    /// A complete code word has been consumed.
    Symbol(u8),

    /// One more bit selects the subtree: index 0 for a `0` bit, 1 for a `1` bit.
    /// A slot is `None` where no code continues; reaching one means the
    /// bit stream does not match any code.
    Branch(Box<[Option<DecodingTree>; 2]>),
}

impl DecodingTree {

    /// Rebuild the path-descent tree from a code table.
    pub fn from_table(table: &CodeTable) -> Result<Self> {
        let mut root = DecodingTree::Branch(Box::new([None, None]));

        for (symbol, code) in table.entries() {
            insert_code(&mut root, symbol, code, 0)?;
        }

        Ok(root)
    }
}

fn insert_code(node: &mut DecodingTree, symbol: u8, code: Code, depth: u8) -> UnitResult {
    let children = match node {
        DecodingTree::Branch(children) => children,

        // landing on an already-placed symbol means two codes share a prefix
        DecodingTree::Symbol(_) =>
            return Err(Error::invalid("code table is not prefix-free")),
    };

    let slot = &mut children[code.bit(depth) as usize];

    if depth + 1 == code.len {
        match slot {
            None => *slot = Some(DecodingTree::Symbol(symbol)),
            Some(_) => return Err(Error::invalid("code table is not prefix-free")),
        }

        Ok(())
    }
    else {
        let child = slot.get_or_insert_with(|| DecodingTree::Branch(Box::new([None, None])));
        insert_code(child, symbol, code, depth + 1)
    }
}
