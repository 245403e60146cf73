//! # huffcode
//!
//! Huffman compression for byte and text streams.
//!
//! ## Quick Start
//!
//! ```rust
//! use huffcode::{CodecConfig, HuffmanCodec};
//!
//! let compressed = HuffmanCodec::compress(b"abracadabra", CodecConfig::default())?;
//! let restored = HuffmanCodec::decompress(&compressed)?;
//! assert_eq!(restored, b"abracadabra");
//! # Ok::<(), huffcode::HuffmanError>(())
//! ```
//!
//! [`HuffmanCodec::compress_raw`] produces the bare padded payload (one
//! pad-count byte followed by the packed codes) for callers that keep the
//! code table themselves.

pub mod code_table;
pub mod config;
pub mod error;
pub mod frequency;
pub mod huffman_codec;
pub mod hufftree;
pub mod io;
pub mod padding;

mod bit_vec;
mod compressed_data;
mod min_heap;

pub use bit_vec::BitVec;
pub use code_table::{CodeTable, Codeword, ReverseCodeTable};
pub use config::{CodecConfig, PaddingPolicy};
pub use error::{HuffmanError, Result};
pub use frequency::FrequencyTable;
pub use huffman_codec::HuffmanCodec;
pub use hufftree::{HuffNode, HuffmanTree};
pub use min_heap::HeapErr;

/// Compresses `data` into a self-describing container with the default
/// configuration.
pub fn compress(data: &[u8]) -> Result<Vec<u8>> {
    HuffmanCodec::compress(data, CodecConfig::default())
}

/// Restores the bytes of a container produced by [`compress`].
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    HuffmanCodec::decompress(data)
}
