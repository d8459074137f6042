//! Alphabets a container can be built over.
//!
//! A container does not record its alphabet, so the same [`Symbol`] type has
//! to be used for encoding and decoding.

use crate::error::{Error, Result};
use std::fmt::Debug;
use std::hash::Hash;

/// An atomic unit of input.
///
/// `Ord` gives the natural order used for header layout and for tie-breaking
/// during tree construction.
pub trait Symbol: Copy + Ord + Hash + Debug {
    /// Append the header form of this symbol, with newline and `|` escaped.
    fn write_escaped(self, out: &mut Vec<u8>);

    /// Parse the header form back into a symbol.
    fn parse_escaped(field: &[u8]) -> Result<Self>;
}

impl Symbol for u8 {
    fn write_escaped(self, out: &mut Vec<u8>) {
        match self {
            b'\n' => out.extend_from_slice(b"\\n"),
            b'|' => out.extend_from_slice(b"\\|"),
            b => out.push(b),
        }
    }

    fn parse_escaped(field: &[u8]) -> Result<Self> {
        match unescape(field)? {
            [b] => Ok(*b),
            other => Err(Error::format(format!(
                "header symbol {:?} is not a single byte",
                String::from_utf8_lossy(other)
            ))),
        }
    }
}

impl Symbol for char {
    fn write_escaped(self, out: &mut Vec<u8>) {
        match self {
            '\n' => out.extend_from_slice(b"\\n"),
            '|' => out.extend_from_slice(b"\\|"),
            c => {
                let mut buf = [0u8; 4];
                out.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
            }
        }
    }

    fn parse_escaped(field: &[u8]) -> Result<Self> {
        let raw = unescape(field)?;
        let text = std::str::from_utf8(raw)
            .map_err(|e| Error::format(format!("header symbol is not valid UTF-8: {e}")))?;
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(c),
            _ => Err(Error::format(format!(
                "header symbol {text:?} is not a single character"
            ))),
        }
    }
}

// Escaped forms are exactly two bytes; anything else starting with a
// backslash is a lone backslash symbol or an unknown escape.
fn unescape(field: &[u8]) -> Result<&[u8]> {
    match field {
        [] => Err(Error::format("empty header symbol")),
        b"\\n" => Ok(&b"\n"[..]),
        b"\\|" => Ok(&b"|"[..]),
        [b'\\', next, ..] => Err(Error::format(format!(
            "invalid escape sequence \\{}",
            char::from(*next).escape_default()
        ))),
        _ if field.contains(&b'|') => Err(Error::format("unescaped '|' in header symbol")),
        _ => Ok(field),
    }
}
