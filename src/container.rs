//! The self-describing container layout.
//!
//! ```text
//! --- Header-Start ---
//! <symbol>|<codeword>|<frequency>
//! ...
//! --- Header-End ---
//! Padding:<0-7>
//! --- Encoding-Start ---
//! <packed bytes>
//! --- Encoding-End ---
//! ```
//!
//! Header entries are written in ascending symbol order. The payload is
//! binary and may itself contain newlines, so it is delimited by the start
//! marker and the trailing end marker rather than by line breaks.

use crate::code_table::{Codeword, PrefixCodeTable};
use crate::decoder::{self, DecodeTrie};
use crate::encoder::{self, PackedBits};
use crate::error::{Error, Result};
use crate::frequency::FrequencyTable;
use crate::symbol::Symbol;
use crate::tree::build_tree;
use tracing::debug;

const HEADER_START: &[u8] = b"--- Header-Start ---\n";
const HEADER_END: &[u8] = b"--- Header-End ---";
const PADDING_PREFIX: &[u8] = b"Padding:";
const ENCODING_START: &[u8] = b"--- Encoding-Start ---\n";
const ENCODING_END: &[u8] = b"\n--- Encoding-End ---\n";

/// Code table, recorded frequencies, and packed payload of one container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedContainer<S: Symbol> {
    codes: PrefixCodeTable<S>,
    frequencies: FrequencyTable<S>,
    packed: PackedBits,
}

impl<S: Symbol> EncodedContainer<S> {
    /// Run the full pipeline over `input`: count, build the tree, derive
    /// codewords, and pack the payload.
    pub fn encode(input: &[S]) -> Result<Self> {
        let frequencies = FrequencyTable::from_symbols(input);
        let tree = build_tree(&frequencies);
        let codes = PrefixCodeTable::from_tree(tree.as_ref());
        let packed = encoder::pack_symbols(input, &codes)?;
        debug!(
            symbols = input.len(),
            distinct = frequencies.len(),
            payload_bytes = packed.bytes.len(),
            padding = packed.padding,
            "encoded container"
        );
        Ok(Self {
            codes,
            frequencies,
            packed,
        })
    }

    /// Recover the original symbol sequence from the payload.
    pub fn decode(&self) -> Result<Vec<S>> {
        let trie = DecodeTrie::new(&self.codes)?;
        let decoded = trie.decode(&self.packed.bytes, self.packed.bit_len())?;
        decoder::verify_counts(&decoded, &self.frequencies)?;
        debug!(symbols = decoded.len(), "decoded container");
        Ok(decoded)
    }

    pub fn codes(&self) -> &PrefixCodeTable<S> {
        &self.codes
    }

    pub fn frequencies(&self) -> &FrequencyTable<S> {
        &self.frequencies
    }

    pub fn payload(&self) -> &[u8] {
        &self.packed.bytes
    }

    pub fn padding(&self) -> u8 {
        self.packed.padding
    }

    /// Payload length in bits before padding.
    pub fn bit_len(&self) -> u64 {
        self.packed.bit_len()
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.packed.bytes.len() + 64 + self.codes.len() * 16);
        out.extend_from_slice(HEADER_START);
        // Both maps hold the same keys, so they iterate in step.
        for ((symbol, code), (_, freq)) in self.codes.iter().zip(self.frequencies.iter()) {
            symbol.write_escaped(&mut out);
            out.extend_from_slice(format!("|{code}|{freq}\n").as_bytes());
        }
        out.extend_from_slice(HEADER_END);
        out.push(b'\n');
        out.extend_from_slice(PADDING_PREFIX);
        out.extend_from_slice(format!("{}\n", self.packed.padding).as_bytes());
        out.extend_from_slice(ENCODING_START);
        out.extend_from_slice(&self.packed.bytes);
        out.extend_from_slice(ENCODING_END);
        out
    }

    /// Parse and validate a container. The payload is not decoded here.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let mut rest = bytes
            .strip_prefix(HEADER_START)
            .ok_or_else(|| Error::format("missing header start marker"))?;

        let mut pairs = Vec::new();
        let mut frequencies = FrequencyTable::default();
        loop {
            let (line, tail) = split_line(rest)
                .ok_or_else(|| Error::format("header is not terminated"))?;
            rest = tail;
            if line == HEADER_END {
                break;
            }
            let (symbol, code, freq) = parse_entry::<S>(line)?;
            if frequencies.insert(symbol, freq).is_some() {
                return Err(Error::format(format!("duplicate header entry for {symbol:?}")));
            }
            pairs.push((symbol, code));
        }
        if frequencies.checked_total().is_none() {
            return Err(Error::format("recorded frequencies overflow"));
        }
        let codes = PrefixCodeTable::from_pairs(pairs)?;

        let (line, tail) = split_line(rest).ok_or_else(|| Error::format("missing padding line"))?;
        rest = tail;
        let padding = parse_padding(line)?;

        let body = rest
            .strip_prefix(ENCODING_START)
            .ok_or_else(|| Error::format("missing encoding start marker"))?;
        let payload = body
            .strip_suffix(ENCODING_END)
            .ok_or_else(|| Error::format("missing encoding end marker"))?;

        match payload.last() {
            None if padding != 0 => {
                return Err(Error::format("padding recorded for an empty payload"));
            }
            Some(&last) if last & ((1u8 << padding) - 1) != 0 => {
                return Err(Error::format("padding bits are not zero"));
            }
            _ => {}
        }

        Ok(Self {
            codes,
            frequencies,
            packed: PackedBits {
                bytes: payload.to_vec(),
                padding,
            },
        })
    }

    pub fn summary(&self) -> ContainerSummary {
        let symbols = self.frequencies.total();
        let bits = self.bit_len();
        let entropy = if symbols == 0 {
            0.0
        } else {
            let n = symbols as f64;
            self.frequencies
                .iter()
                .map(|(_, count)| {
                    let p = count as f64 / n;
                    -p * p.log2()
                })
                .sum::<f64>()
        };
        ContainerSummary {
            entries: self.codes.len(),
            symbols,
            payload_bytes: self.packed.bytes.len(),
            padding: self.packed.padding,
            encoded_bits: bits,
            bits_per_symbol: if symbols == 0 { 0.0 } else { bits as f64 / symbols as f64 },
            entropy_bits: entropy,
        }
    }
}

/// Figures about a container, for the `inspect` command.
#[derive(Debug, Clone, PartialEq)]
pub struct ContainerSummary {
    pub entries: usize,
    pub symbols: u64,
    pub payload_bytes: usize,
    pub padding: u8,
    pub encoded_bits: u64,
    pub bits_per_symbol: f64,
    /// Shannon entropy of the recorded frequencies, in bits per symbol.
    pub entropy_bits: f64,
}

fn split_line(bytes: &[u8]) -> Option<(&[u8], &[u8])> {
    let end = bytes.iter().position(|&b| b == b'\n')?;
    Some((&bytes[..end], &bytes[end + 1..]))
}

fn parse_entry<S: Symbol>(line: &[u8]) -> Result<(S, Codeword, u64)> {
    // Codeword and frequency never contain '|', so split from the right.
    let mut fields = line.rsplitn(3, |&b| b == b'|');
    let (Some(freq), Some(code), Some(symbol)) = (fields.next(), fields.next(), fields.next())
    else {
        return Err(Error::format(format!(
            "malformed header entry {:?}",
            String::from_utf8_lossy(line)
        )));
    };

    let symbol = S::parse_escaped(symbol)?;
    let code: Codeword = std::str::from_utf8(code)
        .map_err(|_| Error::format("codeword is not ASCII"))?
        .parse()?;
    let freq = parse_number(freq)
        .filter(|&n| n > 0)
        .ok_or_else(|| Error::format(format!("invalid frequency for {symbol:?}")))?;
    Ok((symbol, code, freq))
}

fn parse_padding(line: &[u8]) -> Result<u8> {
    let digits = line
        .strip_prefix(PADDING_PREFIX)
        .ok_or_else(|| Error::format("missing padding line"))?;
    match parse_number(digits) {
        Some(n) if n <= 7 => Ok(n as u8),
        Some(n) => Err(Error::format(format!("padding {n} is outside 0..=7"))),
        None => Err(Error::format("padding is not a number")),
    }
}

fn parse_number(digits: &[u8]) -> Option<u64> {
    if digits.is_empty() || !digits.iter().all(u8::is_ascii_digit) {
        return None;
    }
    std::str::from_utf8(digits).ok()?.parse().ok()
}
