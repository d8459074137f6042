// File-level wrappers around the codec: read whole inputs, write outputs
// atomically, and record each action in the journal.

use crate::log::{self, LogEntry};
use huffpack::{EncodedContainer, Result, Symbol};
use sha2::{Digest, Sha256};
use std::{
    fs, io,
    path::{Path, PathBuf},
};
use tracing::{debug, info};

const TEMP_EXT: &str = "tmp"; // For atomic writes

/// Which alphabet to run the codec over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alphabet {
    Chars,
    Bytes,
}

// `notes.huff` -> `notes.huff.tmp`, keeping the full file name.
fn temp_path_for(path: &Path) -> io::Result<PathBuf> {
    let name = path.file_name().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{} does not name a file", path.display()),
        )
    })?;
    Ok(path.with_file_name(format!("{}.{}", name.to_string_lossy(), TEMP_EXT)))
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

// Writes to a sibling temp file first, then renames over the target. Never
// touches `input`, whether as the target or as the temp file.
fn save_output(input: &Path, path: &Path, data: &[u8]) -> io::Result<()> {
    let temp_path = temp_path_for(path)?;
    for target in [path, temp_path.as_path()] {
        if same_file(input, target) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("refusing to overwrite input {} via {}", input.display(), target.display()),
            ));
        }
    }
    fs::write(&temp_path, data)?;
    if let Err(e) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(e);
    }
    Ok(())
}

fn file_hash(data: &[u8]) -> Vec<u8> {
    Sha256::digest(data).to_vec()
}

fn read_text(path: &Path) -> io::Result<String> {
    let data = fs::read(path)?;
    String::from_utf8(data).map_err(|e| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("{} is not UTF-8 text (use --raw for binary input): {}", path.display(), e),
        )
    })
}

fn encode_symbols<S: Symbol>(symbols: &[S]) -> Result<(Vec<u8>, u64)> {
    let container = EncodedContainer::encode(symbols)?;
    Ok((container.to_bytes(), container.bit_len()))
}

pub fn compress_file(
    input: &Path,
    output: &Path,
    alphabet: Alphabet,
    verify: bool,
    journal: Option<&Path>,
) -> Result<()> {
    let (input_len, container, bits) = match alphabet {
        Alphabet::Chars => {
            let text = read_text(input)?;
            let symbols: Vec<char> = text.chars().collect();
            let (container, bits) = encode_symbols(&symbols)?;
            (text.len(), container, bits)
        }
        Alphabet::Bytes => {
            let data = fs::read(input)?;
            let (container, bits) = encode_symbols(&data)?;
            (data.len(), container, bits)
        }
    };

    if verify {
        let original = fs::read(input)?;
        let restored = decompress_bytes(&container, alphabet)?;
        if file_hash(&original) != file_hash(&restored) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "SHA-256 of round trip does not match input",
            )
            .into());
        }
        debug!("round trip verified");
    }

    save_output(input, output, &container)?;
    info!(
        input = %input.display(),
        output = %output.display(),
        input_bytes = input_len,
        output_bytes = container.len(),
        payload_bits = bits,
        "compressed"
    );
    log::log_action(
        journal,
        &LogEntry::new("compress", input, input_len as u64)
            .with_output(output, container.len() as u64),
    );
    Ok(())
}

fn decompress_bytes(container: &[u8], alphabet: Alphabet) -> Result<Vec<u8>> {
    Ok(match alphabet {
        Alphabet::Chars => huffpack::decompress_text(container)?.into_bytes(),
        Alphabet::Bytes => huffpack::decompress::<u8>(container)?,
    })
}

pub fn decompress_file(
    input: &Path,
    output: &Path,
    alphabet: Alphabet,
    journal: Option<&Path>,
) -> Result<()> {
    let container = fs::read(input)?;
    let restored = decompress_bytes(&container, alphabet)?;
    save_output(input, output, &restored)?;
    info!(
        input = %input.display(),
        output = %output.display(),
        output_bytes = restored.len(),
        "decompressed"
    );
    log::log_action(
        journal,
        &LogEntry::new("decompress", input, container.len() as u64)
            .with_output(output, restored.len() as u64),
    );
    Ok(())
}

pub fn inspect_file(input: &Path, alphabet: Alphabet, journal: Option<&Path>) -> Result<()> {
    let container = fs::read(input)?;
    let summary = match alphabet {
        Alphabet::Chars => EncodedContainer::<char>::parse(&container)?.summary(),
        Alphabet::Bytes => EncodedContainer::<u8>::parse(&container)?.summary(),
    };

    println!("Container:        {}", input.display());
    println!("Header entries:   {}", summary.entries);
    println!("Symbols:          {}", summary.symbols);
    println!("Payload bytes:    {}", summary.payload_bytes);
    println!("Padding bits:     {}", summary.padding);
    println!("Encoded bits:     {}", summary.encoded_bits);
    println!("Bits per symbol:  {:.3}", summary.bits_per_symbol);
    println!("Entropy (bits):   {:.3}", summary.entropy_bits);

    log::log_action(journal, &LogEntry::new("inspect", input, container.len() as u64));
    Ok(())
}
