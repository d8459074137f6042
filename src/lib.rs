//! # huffpack
//!
//! Static Huffman compression into a self-describing container: a textual
//! header recording each symbol's codeword and frequency, followed by the
//! packed payload.
//!
//! ```rust
//! let container = huffpack::compress_text("hello")?;
//! assert_eq!(huffpack::decompress_text(&container)?, "hello");
//! # Ok::<(), huffpack::Error>(())
//! ```
//!
//! The alphabet is chosen by the [`Symbol`] type: `char` for text, `u8` for
//! raw bytes. A container must be decoded with the alphabet it was encoded
//! with.

pub mod code_table;
pub mod container;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod frequency;
pub mod symbol;
pub mod tree;

pub use code_table::{Codeword, PrefixCodeTable};
pub use container::{ContainerSummary, EncodedContainer};
pub use error::{Error, Result};
pub use frequency::FrequencyTable;
pub use symbol::Symbol;
pub use tree::{HuffmanNode, build_tree};

/// Encode `input` into container bytes.
pub fn compress<S: Symbol>(input: &[S]) -> Result<Vec<u8>> {
    Ok(EncodedContainer::encode(input)?.to_bytes())
}

/// Decode container bytes back into the original symbols.
pub fn decompress<S: Symbol>(container: &[u8]) -> Result<Vec<S>> {
    EncodedContainer::<S>::parse(container)?.decode()
}

/// Encode text over the `char` alphabet.
pub fn compress_text(text: &str) -> Result<Vec<u8>> {
    let symbols: Vec<char> = text.chars().collect();
    compress(&symbols)
}

/// Decode a container built over the `char` alphabet back into text.
pub fn decompress_text(container: &[u8]) -> Result<String> {
    Ok(decompress::<char>(container)?.into_iter().collect())
}
