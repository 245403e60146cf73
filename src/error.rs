//! Error handling for the codec.
//!
//! Every fallible operation in the crate returns [`Result`]. Failures are
//! terminal for the call that produced them; nothing is retried and no
//! partially built output is handed back.

use std::string::FromUtf8Error;

use thiserror::Error;

use crate::min_heap::HeapErr;

#[derive(Error, Debug)]
pub enum HuffmanError {
    /// The byte source could not be read or the sink could not be written.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The encoded bits do not decompose under the code table, or the
    /// padding/length metadata is inconsistent.
    #[error("Malformed input: {message}")]
    MalformedInput { message: String },

    /// The container framing is unreadable.
    #[error("Invalid header: {message}")]
    InvalidHeader { message: String },

    #[error("Byte {symbol:#04x} not in code table")]
    UnknownSymbol { symbol: u8 },

    /// A prefix tree was requested for a frequency table with no entries.
    #[error("Cannot build a prefix tree from empty input")]
    EmptyInput,

    #[error("Code length {len} exceeds the 64-bit limit")]
    CodeTooLong { len: usize },

    #[error("Decoded output is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] FromUtf8Error),

    #[error("Priority queue error: {0:?}")]
    Heap(HeapErr),
}

impl HuffmanError {
    pub fn malformed<S: Into<String>>(message: S) -> Self {
        HuffmanError::MalformedInput {
            message: message.into(),
        }
    }

    pub fn invalid_header<S: Into<String>>(message: S) -> Self {
        HuffmanError::InvalidHeader {
            message: message.into(),
        }
    }

    /// True for errors caused by the bytes handed to a decoder.
    pub fn is_corruption(&self) -> bool {
        matches!(
            self,
            HuffmanError::MalformedInput { .. }
                | HuffmanError::InvalidHeader { .. }
                | HuffmanError::CodeTooLong { .. }
        )
    }
}

impl From<HeapErr> for HuffmanError {
    fn from(e: HeapErr) -> Self {
        HuffmanError::Heap(e)
    }
}

pub type Result<T> = std::result::Result<T, HuffmanError>;
