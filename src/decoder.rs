use crate::code_table::PrefixCodeTable;
use crate::error::{Error, Result};
use crate::frequency::FrequencyTable;
use crate::symbol::Symbol;
use bitstream_io::{BigEndian, BitRead, BitReader};
use tracing::trace;

#[derive(Debug, Clone)]
struct TrieNode<S> {
    children: [Option<usize>; 2],
    symbol: Option<S>,
}

impl<S> TrieNode<S> {
    fn empty() -> Self {
        Self {
            children: [None, None],
            symbol: None,
        }
    }
}

/// Decoding trie rebuilt from a code table. Node 0 is the root.
#[derive(Debug, Clone)]
pub struct DecodeTrie<S: Symbol> {
    nodes: Vec<TrieNode<S>>,
}

impl<S: Symbol> DecodeTrie<S> {
    pub fn new(codes: &PrefixCodeTable<S>) -> Result<Self> {
        let mut nodes = vec![TrieNode::empty()];
        for (symbol, code) in codes.iter() {
            let mut at = 0;
            for &bit in code.bits() {
                if nodes[at].symbol.is_some() {
                    return Err(Error::format(format!(
                        "codeword for {symbol:?} extends another codeword"
                    )));
                }
                at = match nodes[at].children[usize::from(bit)] {
                    Some(next) => next,
                    None => {
                        nodes.push(TrieNode::empty());
                        let next = nodes.len() - 1;
                        nodes[at].children[usize::from(bit)] = Some(next);
                        next
                    }
                };
            }
            let leaf = &mut nodes[at];
            if at == 0 || leaf.symbol.is_some() || leaf.children != [None, None] {
                return Err(Error::format(format!(
                    "codeword for {symbol:?} collides with another codeword"
                )));
            }
            leaf.symbol = Some(symbol);
        }
        Ok(Self { nodes })
    }

    /// Walk `bit_len` bits of `payload` through the trie, emitting a symbol
    /// at every leaf.
    pub fn decode(&self, payload: &[u8], bit_len: u64) -> Result<Vec<S>> {
        let mut reader = BitReader::endian(payload, BigEndian);
        let mut output = Vec::new();
        let mut at = 0;

        for index in 0..bit_len {
            let bit = reader.read_bit()?;
            at = self.nodes[at].children[usize::from(bit)].ok_or_else(|| {
                Error::format(format!("bits up to position {index} match no codeword"))
            })?;
            if let Some(symbol) = self.nodes[at].symbol {
                output.push(symbol);
                at = 0;
            }
        }

        if at != 0 {
            return Err(Error::format("payload ends in the middle of a codeword"));
        }
        trace!(symbols = output.len(), bits = bit_len, "payload walked");
        Ok(output)
    }
}

/// Check the decoded symbols against the frequencies recorded in the header.
pub fn verify_counts<S: Symbol>(decoded: &[S], expected: &FrequencyTable<S>) -> Result<()> {
    let actual = FrequencyTable::from_symbols(decoded);
    if &actual != expected {
        return Err(Error::format(format!(
            "decoded {} symbols but the header records {}",
            actual.total(),
            expected.total()
        )));
    }
    Ok(())
}
