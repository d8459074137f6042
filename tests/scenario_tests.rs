use huffpack::{Codeword, EncodedContainer, Error, FrequencyTable};

fn chars(text: &str) -> Vec<char> {
    text.chars().collect()
}

#[test]
fn hello_round_trip() {
    let input = chars("hello");
    let freqs = FrequencyTable::from_symbols(&input);
    assert_eq!(freqs.get('h'), Some(1));
    assert_eq!(freqs.get('e'), Some(1));
    assert_eq!(freqs.get('l'), Some(2));
    assert_eq!(freqs.get('o'), Some(1));

    let container = EncodedContainer::encode(&input).unwrap();
    assert_eq!(container.frequencies(), &freqs);

    let bytes = container.to_bytes();
    assert_eq!(huffpack::decompress_text(&bytes).unwrap(), "hello");
}

#[test]
fn empty_input() {
    let container = EncodedContainer::<char>::encode(&[]).unwrap();
    assert!(container.codes().is_empty());
    assert!(container.payload().is_empty());
    assert_eq!(container.padding(), 0);

    let bytes = container.to_bytes();
    assert_eq!(huffpack::decompress_text(&bytes).unwrap(), "");
}

#[test]
fn single_symbol_input() {
    let container = EncodedContainer::encode(&chars("aaaa")).unwrap();
    assert_eq!(container.codes().len(), 1);
    let code = container.codes().get('a').unwrap();
    assert_eq!(code, &"0".parse::<Codeword>().unwrap());
    assert_eq!(container.bit_len(), 4);

    let bytes = container.to_bytes();
    assert_eq!(huffpack::decompress_text(&bytes).unwrap(), "aaaa");
}

#[test]
fn reserved_characters_round_trip() {
    let text = "a|b\\c\n|\\n\\|\n";
    let bytes = huffpack::compress_text(text).unwrap();
    assert_eq!(huffpack::decompress_text(&bytes).unwrap(), text);
}

#[test]
fn unicode_round_trip() {
    let text = "世世a — naïve café ✓";
    let bytes = huffpack::compress_text(text).unwrap();
    assert_eq!(huffpack::decompress_text(&bytes).unwrap(), text);
}

#[test]
fn full_byte_alphabet_round_trip() {
    let input: Vec<u8> = (0..=255u8).cycle().take(256 * 3 + 17).collect();
    let bytes = huffpack::compress(&input).unwrap();
    assert_eq!(huffpack::decompress::<u8>(&bytes).unwrap(), input);
}

#[test]
fn text_container_read_as_bytes_is_rejected() {
    let bytes = huffpack::compress_text("世界").unwrap();
    let err = huffpack::decompress::<u8>(&bytes).unwrap_err();
    assert!(matches!(err, Error::Format(_)));
}

#[test]
fn corrupt_payload_is_rejected() {
    let mut bytes = huffpack::compress_text("abracadabra").unwrap();
    // Flip bits in the first payload byte.
    let marker = b"--- Encoding-Start ---\n";
    let start = bytes
        .windows(marker.len())
        .position(|w| w == marker)
        .unwrap()
        + marker.len();
    bytes[start] ^= 0xff;
    assert!(huffpack::decompress_text(&bytes).is_err());
}

#[test]
fn encoding_twice_is_identical() {
    let text = "it was the best of times, it was the worst of times";
    assert_eq!(
        huffpack::compress_text(text).unwrap(),
        huffpack::compress_text(text).unwrap()
    );
}

fn container_with_header(entries: &str, padding: u8, payload: &[u8]) -> Vec<u8> {
    let mut bytes = format!(
        "--- Header-Start ---\n{entries}--- Header-End ---\nPadding:{padding}\n--- Encoding-Start ---\n"
    )
    .into_bytes();
    bytes.extend_from_slice(payload);
    bytes.extend_from_slice(b"\n--- Encoding-End ---\n");
    bytes
}

#[test]
fn overflowing_frequencies_are_a_format_error() {
    let max = u64::MAX;
    let bytes = container_with_header(&format!("a|0|{max}\nb|1|{max}\n"), 6, &[0x40]);
    assert!(matches!(huffpack::decompress_text(&bytes), Err(Error::Format(_))));
    assert!(matches!(EncodedContainer::<char>::parse(&bytes), Err(Error::Format(_))));
}

#[test]
fn frequency_past_u64_is_a_format_error() {
    let bytes = container_with_header("a|0|18446744073709551616\n", 7, &[0x00]);
    assert!(matches!(huffpack::decompress_text(&bytes), Err(Error::Format(_))));
}

#[test]
fn long_codewords_do_not_match_short_payload() {
    // Thousands of long, prefix-free codewords and a one-byte payload.
    let mut entries = String::new();
    for i in 0..2000u32 {
        let symbol = char::from_u32(0x4e00 + i).unwrap();
        let code = format!("{}{:011b}", "1".repeat(500), i);
        entries.push_str(&format!("{symbol}|{code}|{}\n", u64::MAX / 4000));
    }
    let bytes = container_with_header(&entries, 0, &[0xff]);
    let container = EncodedContainer::<char>::parse(&bytes).unwrap();
    let summary = container.summary();
    assert_eq!(summary.entries, 2000);
    assert_eq!(summary.encoded_bits, 8);
    assert!(matches!(container.decode(), Err(Error::Format(_))));
}
