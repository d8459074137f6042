use crate::symbol::Symbol;
use std::collections::BTreeMap;

/// Occurrence count per symbol, iterated in the symbol's natural order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable<S: Symbol> {
    counts: BTreeMap<S, u64>,
}

impl<S: Symbol> Default for FrequencyTable<S> {
    fn default() -> Self {
        Self {
            counts: BTreeMap::new(),
        }
    }
}

impl<S: Symbol> FrequencyTable<S> {
    /// Count every symbol in `input`. An empty input gives an empty table.
    pub fn from_symbols(input: &[S]) -> Self {
        let mut counts = BTreeMap::new();
        for &symbol in input {
            *counts.entry(symbol).or_insert(0) += 1;
        }
        Self { counts }
    }

    pub(crate) fn insert(&mut self, symbol: S, count: u64) -> Option<u64> {
        self.counts.insert(symbol, count)
    }

    pub fn get(&self, symbol: S) -> Option<u64> {
        self.counts.get(&symbol).copied()
    }

    /// Number of distinct symbols.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts, i.e. the length of the counted input. Saturates
    /// at `u64::MAX`.
    pub fn total(&self) -> u64 {
        self.checked_total().unwrap_or(u64::MAX)
    }

    /// Sum of all counts, or `None` if it does not fit in a `u64`.
    pub fn checked_total(&self) -> Option<u64> {
        self.counts
            .values()
            .try_fold(0u64, |acc, &count| acc.checked_add(count))
    }

    pub fn iter(&self) -> impl Iterator<Item = (S, u64)> + '_ {
        self.counts.iter().map(|(&symbol, &count)| (symbol, count))
    }
}

impl<S: Symbol> FromIterator<(S, u64)> for FrequencyTable<S> {
    fn from_iter<I: IntoIterator<Item = (S, u64)>>(iter: I) -> Self {
        Self {
            counts: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(text: &str) -> Vec<char> {
        text.chars().collect()
    }

    #[test]
    fn counts_hello() {
        let table = FrequencyTable::from_symbols(&chars("hello"));
        assert_eq!(table.len(), 4);
        assert_eq!(table.get('h'), Some(1));
        assert_eq!(table.get('e'), Some(1));
        assert_eq!(table.get('l'), Some(2));
        assert_eq!(table.get('o'), Some(1));
        assert_eq!(table.get('z'), None);
        assert_eq!(table.total(), 5);
    }

    #[test]
    fn empty_input_gives_empty_table() {
        let table = FrequencyTable::<u8>::from_symbols(&[]);
        assert!(table.is_empty());
        assert_eq!(table.total(), 0);
    }

    #[test]
    fn counts_spaces_and_unicode() {
        let table = FrequencyTable::from_symbols(&chars("a a b"));
        assert_eq!(table.get(' '), Some(2));
        assert_eq!(table.get('a'), Some(2));
        assert_eq!(table.get('b'), Some(1));

        let table = FrequencyTable::from_symbols(&chars("世世a"));
        assert_eq!(table.get('世'), Some(2));
        assert_eq!(table.get('a'), Some(1));
    }

    #[test]
    fn total_saturates_on_overflow() {
        let table: FrequencyTable<u8> = [(b'a', u64::MAX), (b'b', 1)].into_iter().collect();
        assert_eq!(table.checked_total(), None);
        assert_eq!(table.total(), u64::MAX);

        let table: FrequencyTable<u8> = [(b'a', u64::MAX - 1), (b'b', 1)].into_iter().collect();
        assert_eq!(table.checked_total(), Some(u64::MAX));
    }

    #[test]
    fn independent_of_input_order() {
        let forward = FrequencyTable::from_symbols(b"abracadabra");
        let mut reversed = b"abracadabra".to_vec();
        reversed.reverse();
        assert_eq!(forward, FrequencyTable::from_symbols(&reversed));
    }

    #[test]
    fn iterates_in_symbol_order() {
        let table = FrequencyTable::from_symbols(b"cab");
        let order: Vec<u8> = table.iter().map(|(s, _)| s).collect();
        assert_eq!(order, b"abc");
    }
}
