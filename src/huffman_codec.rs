use std::io::{Read, Write};

use log::{debug, warn};

use crate::bit_vec::BitVec;
use crate::code_table::{CodeTable, Codeword, ReverseCodeTable};
use crate::compressed_data::CompressedData;
use crate::config::CodecConfig;
use crate::error::{HuffmanError, Result};
use crate::frequency::FrequencyTable;
use crate::hufftree::HuffmanTree;
use crate::io::{read_all, write_all};
use crate::padding;

/// Code tables derived from one frequency analysis. The same codec services
/// both directions: `compress_raw` output carries no table and can only be
/// restored by the codec that produced it, while `compress` output is
/// self-describing.
#[derive(Debug, Clone)]
pub struct HuffmanCodec {
    tree: Option<HuffmanTree>,
    encode_table: CodeTable,
    decode_table: ReverseCodeTable,
    config: CodecConfig,
}

impl HuffmanCodec {
    pub fn new(tree: HuffmanTree, config: CodecConfig) -> Result<Self> {
        let encode_table = CodeTable::from_tree(&tree)?;
        let decode_table = encode_table.reverse();
        Ok(HuffmanCodec {
            tree: Some(tree),
            encode_table,
            decode_table,
            config,
        })
    }

    /// An empty table yields a codec with no codes, which only encodes and
    /// decodes empty input.
    pub fn from_frequencies(frequencies: &FrequencyTable, config: CodecConfig) -> Result<Self> {
        if frequencies.is_empty() {
            return Ok(HuffmanCodec {
                tree: None,
                encode_table: CodeTable::default(),
                decode_table: ReverseCodeTable::default(),
                config,
            });
        }
        Self::new(HuffmanTree::from_frequencies(frequencies)?, config)
    }

    pub fn from_bytes(data: &[u8], config: CodecConfig) -> Result<Self> {
        let data = config.prepare(data);
        Self::from_frequencies(&FrequencyTable::from_bytes(data), config)
    }

    pub fn tree(&self) -> Option<&HuffmanTree> {
        self.tree.as_ref()
    }

    pub fn code_table(&self) -> &CodeTable {
        &self.encode_table
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Concatenates the code of every byte of `data`, in order.
    pub fn encode(&self, data: &[u8]) -> Result<BitVec> {
        let bit_len = self
            .encode_table
            .encoded_bit_len(&FrequencyTable::from_bytes(data));
        let mut bit_vec = BitVec::with_capacity(bit_len as usize);
        for &byte in data {
            let code = self
                .encode_table
                .get(byte)
                .ok_or(HuffmanError::UnknownSymbol { symbol: byte })?;
            bit_vec.push_bits(code.bits, code.len);
        }
        debug!("Encoded {} bytes into {} bits", data.len(), bit_vec.len());
        Ok(bit_vec)
    }

    /// Scans left to right, growing a window one bit at a time and emitting
    /// a symbol on the first window that matches a code. Fails if a window
    /// outgrows the longest code or bits are left over at the end.
    pub fn decode(&self, bits: &BitVec) -> Result<Vec<u8>> {
        let max_len = self.decode_table.max_len();
        let mut result = Vec::new();
        let mut window = Codeword::new(0, 0);
        let mut position = 0;

        for (i, bit) in bits.iter().enumerate() {
            window = Codeword::new((window.bits << 1) | bit as u64, window.len + 1);

            if let Some(symbol) = self.decode_table.get(&window) {
                result.push(symbol);
                window = Codeword::new(0, 0);
                position = i + 1;
            } else if window.len as usize >= max_len {
                warn!("No code matches bits {position}..={i}");
                return Err(HuffmanError::malformed(format!(
                    "bits {position}..={i} match no code"
                )));
            }
        }

        if window.len > 0 {
            warn!("{} trailing bits left undecoded", window.len);
            return Err(HuffmanError::malformed(format!(
                "{} trailing bits at offset {position} form no complete code",
                window.len
            )));
        }

        debug!("Decoded {} bits into {} bytes", bits.len(), result.len());
        Ok(result)
    }

    /// Encodes and packs `data` without embedding the code table.
    pub fn compress_raw(&self, data: &[u8]) -> Result<Vec<u8>> {
        let payload = self.encode(self.config.prepare(data))?;
        Ok(padding::pack(&payload, self.config.padding))
    }

    pub fn decompress_raw(&self, packed: &[u8]) -> Result<Vec<u8>> {
        let payload = padding::unpack(packed)?;
        self.decode(&payload)
    }

    /// Builds the code from `data` itself and emits the self-describing
    /// container.
    pub fn compress(data: &[u8], config: CodecConfig) -> Result<Vec<u8>> {
        let data = config.prepare(data);
        let frequencies = FrequencyTable::from_bytes(data);
        let codec = Self::from_frequencies(&frequencies, config)?;

        let payload = codec.encode(data)?;
        let compressed = CompressedData {
            original_length: data.len() as u64,
            frequencies,
            packed: padding::pack(&payload, config.padding),
        };
        Ok(compressed.serialize()?)
    }

    pub fn decompress(bytes: &[u8]) -> Result<Vec<u8>> {
        let compressed = CompressedData::deserialize(bytes)?;
        let codec = Self::from_frequencies(&compressed.frequencies, CodecConfig::default())?;

        let result = codec.decompress_raw(&compressed.packed)?;
        if result.len() as u64 != compressed.original_length {
            warn!(
                "Decoded {} bytes, header declares {}",
                result.len(),
                compressed.original_length
            );
            return Err(HuffmanError::malformed(format!(
                "expected {} bytes, got {}",
                compressed.original_length,
                result.len()
            )));
        }
        Ok(result)
    }

    pub fn decompress_to_string(bytes: &[u8]) -> Result<String> {
        Ok(String::from_utf8(Self::decompress(bytes)?)?)
    }

    /// Reads all of `input`, compresses it in memory and writes the
    /// container to `output`. Nothing is written if compression fails.
    pub fn encode_from_file<R: Read, W: Write>(
        input: R,
        output: W,
        config: CodecConfig,
    ) -> Result<()> {
        let data = read_all(input)?;
        let compressed = Self::compress(&data, config)?;
        write_all(output, &compressed)
    }

    pub fn decode_from_file<R: Read, W: Write>(input: R, output: W) -> Result<()> {
        let data = read_all(input)?;
        let decompressed = Self::decompress(&data)?;
        write_all(output, &decompressed)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::config::PaddingPolicy;

    fn codec_for(text: &str) -> HuffmanCodec {
        HuffmanCodec::from_bytes(text.as_bytes(), CodecConfig::default()).unwrap()
    }

    #[test]
    fn test_raw_roundtrip_abracadabra() {
        let codec = codec_for("abracadabra");
        let packed = codec.compress_raw(b"abracadabra").unwrap();

        // 23 payload bits, pad 1
        assert_eq!(packed[0], 1);
        assert_eq!(packed.len(), 4);
        assert_eq!(codec.decompress_raw(&packed).unwrap(), b"abracadabra");
    }

    #[test]
    fn test_abracadabra_bits() {
        let codec = codec_for("abracadabra");
        let bits = codec.encode(b"abra").unwrap();
        // a=0 b=110 r=111
        assert_eq!(bits.to_string(), "01101110");
    }

    #[test]
    fn test_single_symbol() {
        let codec = codec_for("aaaa");
        let packed = codec.compress_raw(b"aaaa").unwrap();
        assert_eq!(packed, vec![4, 0]);
        assert_eq!(codec.decompress_raw(&packed).unwrap(), b"aaaa");
    }

    #[test]
    fn test_byte_boundary_quirk() {
        // a=0 b=110 r=111 -> "abra" is exactly 8 bits
        let codec = codec_for("abracadabra");
        let packed = codec.compress_raw(b"abra").unwrap();
        assert_eq!(packed, vec![8, 0b0110_1110, 0]);
        assert_eq!(codec.decompress_raw(&packed).unwrap(), b"abra");

        let minimal = HuffmanCodec::from_bytes(
            b"abracadabra",
            CodecConfig::new().with_padding(PaddingPolicy::Minimal),
        )
        .unwrap();
        assert_eq!(minimal.compress_raw(b"abra").unwrap(), vec![0, 0b0110_1110]);
    }

    #[test]
    fn test_empty_input() {
        let codec = codec_for("");
        assert!(codec.tree().is_none());
        let packed = codec.compress_raw(b"").unwrap();
        assert_eq!(packed, vec![8, 0]);
        assert!(codec.decompress_raw(&packed).unwrap().is_empty());
    }

    #[test]
    fn test_encode_reserves_exact_bytes() {
        // one dominant symbol with a long tail of rarer ones
        let mut data = vec![b'a'; 64 * 1024];
        let (mut x, mut y) = (1usize, 1usize);
        for symbol in b'b'..=b'p' {
            data.extend(std::iter::repeat(symbol).take(x));
            (x, y) = (y, x + y);
        }

        let codec = HuffmanCodec::from_bytes(&data, CodecConfig::default()).unwrap();
        assert!(codec.code_table().max_len() > 8);

        let bits = codec.encode(&data).unwrap();
        let used = bits.len().div_ceil(8);
        let bytes = bits.into_bytes();
        assert_eq!(bytes.len(), used);
        assert_eq!(bytes.capacity(), used);
    }

    #[test]
    fn test_stray_bit_after_single_symbol_code() {
        // only code is "0"; a lone "1" matches nothing
        let codec = codec_for("aaaa");
        let err = codec.decompress_raw(&[7, 0b1000_0000]).unwrap_err();
        assert!(matches!(err, HuffmanError::MalformedInput { .. }));
    }

    #[test]
    fn test_unknown_symbol() {
        let codec = codec_for("abc");
        let err = codec.encode(b"abz").unwrap_err();
        assert!(matches!(err, HuffmanError::UnknownSymbol { symbol: b'z' }));
    }

    #[test]
    fn test_trailing_bits_rejected() {
        let codec = codec_for("abracadabra");
        // "0" then "11" : a, then an incomplete code
        let packed = vec![5, 0b0110_0000];
        let err = codec.decompress_raw(&packed).unwrap_err();
        assert!(matches!(err, HuffmanError::MalformedInput { .. }));
    }

    #[test]
    fn test_bits_against_empty_table_rejected() {
        let codec = codec_for("");
        assert!(codec.decompress_raw(&[0, 0xFF]).is_err());
    }

    #[test]
    fn test_container_roundtrip() {
        let text = "Huffman encoding is a greedy algorithm that builds optimal prefix codes.";
        let compressed = HuffmanCodec::compress(text.as_bytes(), CodecConfig::default()).unwrap();
        assert_eq!(HuffmanCodec::decompress_to_string(&compressed).unwrap(), text);
    }

    #[test]
    fn test_container_trims_when_configured() {
        let config = CodecConfig::new().with_trim_whitespace(true);
        let compressed = HuffmanCodec::compress(b"  hello  \n", config).unwrap();
        assert_eq!(HuffmanCodec::decompress(&compressed).unwrap(), b"hello");
    }

    #[test]
    fn test_container_length_mismatch() {
        let mut compressed = HuffmanCodec::compress(b"aaaa", CodecConfig::default()).unwrap();
        // one code bit of "a" per byte: 4 bits, pad 4. Claim pad 2 instead.
        let pad_index = compressed.len() - 2;
        assert_eq!(compressed[pad_index], 4);
        compressed[pad_index] = 2;
        let err = HuffmanCodec::decompress(&compressed).unwrap_err();
        assert!(matches!(err, HuffmanError::MalformedInput { .. }));
    }
}
