
//! Symbol occurrence statistics for a byte stream.

/// Number of distinct values a symbol can take.
pub const ALPHABET_SIZE: usize = 256;


/// Counts how often each byte value occurs in an input.
///
/// The alphabet of an input is exactly the set of byte values with a
/// non-zero count. The sum of all counts equals the input length.
#[derive(Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u64; ALPHABET_SIZE],
}

impl FrequencyTable {

    /// A table with all counts at zero.
    pub fn new() -> Self {
        FrequencyTable { counts: [0; ALPHABET_SIZE] }
    }

    /// Count every byte of the input in one sequential pass.
    pub fn count_bytes(bytes: &[u8]) -> Self {
        let mut table = Self::new();

        for &byte in bytes {
            table.counts[byte as usize] += 1;
        }

        table
    }

    /// Count the input in parallel shards and merge the results.
    /// Produces exactly the same table as `count_bytes`,
    /// because merging counts is commutative and associative.
    #[cfg(feature = "rayon")]
    pub fn count_bytes_parallel(bytes: &[u8]) -> Self {
        use rayon::prelude::*;

        // below this size, the threading overhead outweighs the counting
        const SHARD_SIZE: usize = 512 * 1024;

        if bytes.len() < 2 * SHARD_SIZE {
            return Self::count_bytes(bytes);
        }

        bytes.par_chunks(SHARD_SIZE)
            .map(Self::count_bytes)
            .reduce(Self::new, Self::merged)
    }

    /// Combine the counts of two shards.
    pub fn merged(mut self, other: Self) -> Self {
        for (count, other_count) in self.counts.iter_mut().zip(other.counts.iter()) {
            *count += other_count;
        }

        self
    }

    /// How often the specified byte value occurred.
    pub fn count(&self, symbol: u8) -> u64 {
        self.counts[symbol as usize]
    }

    /// Sum of all counts. Equals the length of the counted input.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Number of distinct byte values that occurred at least once.
    pub fn distinct_symbol_count(&self) -> usize {
        self.counts.iter().filter(|&&count| count != 0).count()
    }

    /// Whether no bytes have been counted at all.
    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&count| count == 0)
    }

    /// All symbols that occurred, ascending by byte value, with their counts.
    pub fn symbols_with_counts(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts.iter().enumerate()
            .filter(|(_, &count)| count != 0)
            .map(|(symbol, &count)| (symbol as u8, count))
    }
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FrequencyTable {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.debug_map().entries(self.symbols_with_counts()).finish()
    }
}


#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn counts_match_input(){
        let table = FrequencyTable::count_bytes(b"abracadabra");

        assert_eq!(table.count(b'a'), 5);
        assert_eq!(table.count(b'b'), 2);
        assert_eq!(table.count(b'r'), 2);
        assert_eq!(table.count(b'c'), 1);
        assert_eq!(table.count(b'd'), 1);
        assert_eq!(table.count(b'z'), 0);

        assert_eq!(table.total(), 11);
        assert_eq!(table.distinct_symbol_count(), 5);
    }

    #[test]
    fn empty_input_yields_empty_table(){
        let table = FrequencyTable::count_bytes(b"");
        assert!(table.is_empty());
        assert_eq!(table.total(), 0);
        assert_eq!(table.symbols_with_counts().count(), 0);
    }

    #[test]
    fn merged_shards_equal_one_pass(){
        let bytes = b"the quick brown fox jumps over the lazy dog";
        let (front, back) = bytes.split_at(17);

        let sharded = FrequencyTable::count_bytes(front)
            .merged(FrequencyTable::count_bytes(back));

        assert_eq!(sharded, FrequencyTable::count_bytes(bytes));
    }

    #[test]
    #[cfg(feature = "rayon")]
    fn parallel_counting_equals_sequential(){
        let bytes: Vec<u8> = (0 .. 3_000_000_u32).map(|index| (index % 251) as u8).collect();

        assert_eq!(
            FrequencyTable::count_bytes_parallel(&bytes),
            FrequencyTable::count_bytes(&bytes)
        );
    }
}
