use huffcode::{
    compress, decompress, CodeTable, CodecConfig, FrequencyTable, HuffNode, HuffmanCodec,
    HuffmanError, HuffmanTree, PaddingPolicy,
};

fn count_nodes(node: &HuffNode) -> (usize, usize) {
    match node {
        HuffNode::Leaf { .. } => (1, 0),
        HuffNode::Internal { left, right, .. } => {
            let (l_leaves, l_internal) = count_nodes(left);
            let (r_leaves, r_internal) = count_nodes(right);
            (l_leaves + r_leaves, l_internal + r_internal + 1)
        }
    }
}

#[test]
fn test_abracadabra() {
    let frequencies = FrequencyTable::from_bytes(b"abracadabra");
    let expected: Vec<(u8, u64)> = vec![(b'a', 5), (b'b', 2), (b'c', 1), (b'd', 1), (b'r', 2)];
    assert_eq!(frequencies.iter().collect::<Vec<_>>(), expected);

    let tree = HuffmanTree::from_frequencies(&frequencies).unwrap();
    assert_eq!(count_nodes(&tree.root), (5, 4));

    let table = CodeTable::from_tree(&tree).unwrap();
    for (a, code_a) in table.iter() {
        for (b, code_b) in table.iter() {
            if a != b {
                assert!(!code_a.is_prefix_of(&code_b));
            }
        }
    }

    let compressed = compress(b"abracadabra").unwrap();
    assert_eq!(decompress(&compressed).unwrap(), b"abracadabra");
}

#[test]
fn test_single_symbol_input() {
    let codec = HuffmanCodec::from_bytes(b"aaaa", CodecConfig::default()).unwrap();
    let code = codec.code_table().get(b'a').unwrap();
    assert_eq!((code.bits, code.len), (0, 1));

    let compressed = compress(b"aaaa").unwrap();
    assert_eq!(decompress(&compressed).unwrap(), b"aaaa");
}

#[test]
fn test_empty_input() {
    let compressed = compress(b"").unwrap();
    // magic, length 0, zero symbols, then the legacy packing of no bits
    assert_eq!(compressed.len(), 14 + 2);
    assert_eq!(&compressed[14..], &[8, 0]);
    assert!(decompress(&compressed).unwrap().is_empty());

    let minimal = HuffmanCodec::compress(
        b"",
        CodecConfig::new().with_padding(PaddingPolicy::Minimal),
    )
    .unwrap();
    assert_eq!(&minimal[14..], &[0]);
    assert!(decompress(&minimal).unwrap().is_empty());
}

#[test]
fn test_eight_bit_payload_gets_extra_byte() {
    // two symbols, one bit each: eight input bytes make an eight-bit payload
    let input = b"abababab";
    let codec = HuffmanCodec::from_bytes(input, CodecConfig::default()).unwrap();
    assert_eq!(codec.encode(input).unwrap().len(), 8);

    let packed = codec.compress_raw(input).unwrap();
    assert_eq!(packed, vec![8, 0b0101_0101, 0]);
    assert_eq!(codec.decompress_raw(&packed).unwrap(), input);
}

#[test]
fn test_output_is_deterministic() {
    let text = b"it was the best of times, it was the worst of times";
    assert_eq!(compress(text).unwrap(), compress(text).unwrap());
}

#[test]
fn test_full_byte_alphabet() {
    let data: Vec<u8> = (0..=255u8).cycle().take(256 * 3 + 17).collect();
    let compressed = compress(&data).unwrap();
    assert_eq!(decompress(&compressed).unwrap(), data);
}

#[test]
fn test_corrupted_payload_is_rejected() {
    let text = b"the rain in spain stays mainly in the plain";
    let mut compressed = compress(text).unwrap();
    let last = compressed.len() - 1;
    compressed.truncate(last);

    let err = decompress(&compressed).unwrap_err();
    assert!(err.is_corruption(), "{err}");
}

#[test]
fn test_non_utf8_output() {
    let compressed = compress(&[0xFF, 0xFE, 0xFF]).unwrap();
    let err = HuffmanCodec::decompress_to_string(&compressed).unwrap_err();
    assert!(matches!(err, HuffmanError::InvalidUtf8(_)));
}
