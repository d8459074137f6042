use crate::code_table::PrefixCodeTable;
use crate::error::{Error, Result};
use crate::symbol::Symbol;
use bitstream_io::{BigEndian, BitWrite, BitWriter};

/// Packed payload bytes plus the number of zero bits appended to the last
/// byte (0..=7).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedBits {
    pub bytes: Vec<u8>,
    pub padding: u8,
}

impl PackedBits {
    /// Payload length in bits, padding excluded.
    pub fn bit_len(&self) -> u64 {
        self.bytes.len() as u64 * 8 - u64::from(self.padding)
    }
}

/// Concatenate the codeword of every symbol in `input`, most significant
/// bit first, and zero-pad to a whole byte.
pub fn pack_symbols<S: Symbol>(input: &[S], codes: &PrefixCodeTable<S>) -> Result<PackedBits> {
    let mut writer = BitWriter::endian(Vec::new(), BigEndian);
    let mut bits: u64 = 0;

    for &symbol in input {
        let code = codes
            .get(symbol)
            .ok_or_else(|| Error::Encoding(format!("symbol {symbol:?} has no codeword")))?;
        for &bit in code.bits() {
            writer.write_bit(bit)?;
        }
        bits += code.len() as u64;
    }

    let padding = ((8 - bits % 8) % 8) as u8;
    writer.byte_align()?;

    Ok(PackedBits {
        bytes: writer.into_writer(),
        padding,
    })
}
