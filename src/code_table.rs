use crate::error::{Error, Result};
use crate::frequency::FrequencyTable;
use crate::symbol::Symbol;
use crate::tree::HuffmanNode;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// An ordered sequence of bits; `false` is 0 (left) and `true` is 1 (right).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Codeword(Vec<bool>);

impl Codeword {
    pub fn bits(&self) -> &[bool] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn starts_with(&self, prefix: &Codeword) -> bool {
        self.0.starts_with(&prefix.0)
    }
}

impl From<Vec<bool>> for Codeword {
    fn from(bits: Vec<bool>) -> Self {
        Codeword(bits)
    }
}

impl fmt::Display for Codeword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.0 {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl FromStr for Codeword {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.is_empty() {
            return Err(Error::format("empty codeword"));
        }
        s.chars()
            .map(|c| match c {
                '0' => Ok(false),
                '1' => Ok(true),
                other => Err(Error::format(format!("invalid bit {other:?} in codeword"))),
            })
            .collect::<Result<Vec<bool>>>()
            .map(Codeword)
    }
}

/// Symbol to codeword mapping. No codeword is a prefix of another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixCodeTable<S: Symbol> {
    codes: BTreeMap<S, Codeword>,
}

impl<S: Symbol> Default for PrefixCodeTable<S> {
    fn default() -> Self {
        Self {
            codes: BTreeMap::new(),
        }
    }
}

impl<S: Symbol> PrefixCodeTable<S> {
    /// Derive codewords from the tree: 0 for a left edge, 1 for a right edge.
    ///
    /// Uses an explicit stack instead of recursion. A tree that is a single
    /// leaf gets the codeword `0`, since an empty codeword could not be
    /// counted on decode.
    pub fn from_tree(root: Option<&HuffmanNode<S>>) -> Self {
        let mut codes = BTreeMap::new();
        let Some(root) = root else {
            return Self { codes };
        };

        if let HuffmanNode::Leaf { symbol, .. } = root {
            codes.insert(*symbol, Codeword(vec![false]));
            return Self { codes };
        }

        let mut stack = vec![(root, Vec::new())];
        while let Some((node, path)) = stack.pop() {
            match node {
                HuffmanNode::Leaf { symbol, .. } => {
                    codes.insert(*symbol, Codeword(path));
                }
                HuffmanNode::Internal { left, right, .. } => {
                    let mut right_path = path.clone();
                    right_path.push(true);
                    stack.push((right.as_ref(), right_path));

                    let mut left_path = path;
                    left_path.push(false);
                    stack.push((left.as_ref(), left_path));
                }
            }
        }
        Self { codes }
    }

    /// Build a table from explicit pairs, rejecting duplicates and any pair
    /// that breaks the prefix-free property.
    pub fn from_pairs<I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, Codeword)>,
    {
        let mut codes = BTreeMap::new();
        for (symbol, code) in pairs {
            if code.is_empty() {
                return Err(Error::format(format!("empty codeword for {symbol:?}")));
            }
            if codes.insert(symbol, code).is_some() {
                return Err(Error::format(format!("duplicate header entry for {symbol:?}")));
            }
        }
        let table = Self { codes };
        if !table.is_prefix_free() {
            return Err(Error::format("header codewords are not prefix-free"));
        }
        Ok(table)
    }

    pub fn get(&self, symbol: S) -> Option<&Codeword> {
        self.codes.get(&symbol)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Entries in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (S, &Codeword)> + '_ {
        self.codes.iter().map(|(&symbol, code)| (symbol, code))
    }

    /// Check that no codeword is a prefix of another.
    pub fn is_prefix_free(&self) -> bool {
        // After sorting, a prefix sorts directly before some word it prefixes.
        let mut words: Vec<&Codeword> = self.codes.values().collect();
        words.sort();
        words
            .windows(2)
            .all(|pair| !pair[1].starts_with(pair[0]))
    }

    /// Total payload length before padding: Σ freq × codeword length.
    /// Saturates at `u64::MAX`.
    pub fn encoded_bit_len(&self, freqs: &FrequencyTable<S>) -> u64 {
        freqs
            .iter()
            .filter_map(|(symbol, count)| {
                self.get(symbol)
                    .map(|code| count.saturating_mul(code.len() as u64))
            })
            .fold(0u64, u64::saturating_add)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::build_tree;

    fn table_for(input: &[u8]) -> PrefixCodeTable<u8> {
        let freqs = FrequencyTable::from_symbols(input);
        PrefixCodeTable::from_tree(build_tree(&freqs).as_ref())
    }

    fn code(s: &str) -> Codeword {
        s.parse().unwrap()
    }

    #[test]
    fn empty_tree_gives_empty_table() {
        let table = PrefixCodeTable::<u8>::from_tree(None);
        assert!(table.is_empty());
    }

    #[test]
    fn single_leaf_gets_one_bit() {
        let table = table_for(b"aaaa");
        assert_eq!(table.len(), 1);
        assert_eq!(table.get(b'a'), Some(&code("0")));
    }

    #[test]
    fn hello_codewords() {
        // e and h merge first, then o with l; (e,h) is lighter so it sits left.
        let table = table_for(b"hello");
        assert_eq!(table.len(), 4);
        assert_eq!(table.get(b'e'), Some(&code("00")));
        assert_eq!(table.get(b'h'), Some(&code("01")));
        assert_eq!(table.get(b'o'), Some(&code("10")));
        assert_eq!(table.get(b'l'), Some(&code("11")));
        assert!(table.is_prefix_free());
    }

    #[test]
    fn frequent_symbols_get_shorter_codes() {
        let table = table_for(b"aaaaaaaabbbbccd");
        let a = table.get(b'a').unwrap().len();
        let d = table.get(b'd').unwrap().len();
        assert!(a < d);
        assert!(table.is_prefix_free());
    }

    #[test]
    fn bit_len_matches_sum_of_code_lengths() {
        let input = b"abracadabra";
        let freqs = FrequencyTable::from_symbols(input);
        let table = PrefixCodeTable::from_tree(build_tree(&freqs).as_ref());
        let direct: usize = input.iter().map(|&b| table.get(b).unwrap().len()).sum();
        assert_eq!(table.encoded_bit_len(&freqs), direct as u64);
    }

    #[test]
    fn bit_len_saturates_for_huge_counts() {
        let freqs: FrequencyTable<u8> = [(b'a', u64::MAX), (b'b', u64::MAX)].into_iter().collect();
        let table = PrefixCodeTable::from_pairs([(b'a', code("0")), (b'b', code("10"))]).unwrap();
        assert_eq!(table.encoded_bit_len(&freqs), u64::MAX);
    }

    #[test]
    fn codeword_text_form() {
        let c = code("0110");
        assert_eq!(c.to_string(), "0110");
        assert_eq!(c.bits(), &[false, true, true, false]);
        assert!("".parse::<Codeword>().is_err());
        assert!("012".parse::<Codeword>().is_err());
    }

    #[test]
    fn from_pairs_rejects_prefix_collisions() {
        let err = PrefixCodeTable::from_pairs([(b'a', code("0")), (b'b', code("01"))]).unwrap_err();
        assert!(err.is_format());
        assert!(PrefixCodeTable::from_pairs([(b'a', code("0")), (b'b', code("10"))]).is_ok());
    }

    #[test]
    fn from_pairs_rejects_duplicates() {
        let err = PrefixCodeTable::from_pairs([(b'a', code("0")), (b'a', code("1"))]).unwrap_err();
        assert!(err.is_format());
    }

    #[test]
    fn duplicate_codewords_are_not_prefix_free() {
        let table = PrefixCodeTable::from_pairs([(b'a', code("1"))]).unwrap();
        assert!(table.is_prefix_free());
        assert!(PrefixCodeTable::from_pairs([(b'a', code("1")), (b'b', code("1"))]).is_err());
    }
}
