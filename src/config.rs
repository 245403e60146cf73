//! Codec configuration.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How the packer aligns the payload to a byte boundary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PaddingPolicy {
    /// `pad = 8 - (len % 8)`. An already aligned payload still receives a
    /// full byte of padding, so `pad` is in `1..=8`.
    #[default]
    Legacy,
    /// `pad = (8 - len % 8) % 8`, so `pad` is in `0..=7`.
    Minimal,
}

impl PaddingPolicy {
    pub fn pad_for(self, bit_len: usize) -> u8 {
        let rem = (bit_len % 8) as u8;
        match self {
            PaddingPolicy::Legacy => 8 - rem,
            PaddingPolicy::Minimal => (8 - rem) % 8,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CodecConfig {
    pub padding: PaddingPolicy,
    /// Strip leading and trailing ASCII whitespace before compressing.
    /// Off by default; when on, the round trip restores the trimmed text.
    pub trim_whitespace: bool,
}

impl CodecConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_padding(mut self, padding: PaddingPolicy) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_trim_whitespace(mut self, trim: bool) -> Self {
        self.trim_whitespace = trim;
        self
    }

    pub(crate) fn prepare<'a>(&self, data: &'a [u8]) -> &'a [u8] {
        if self.trim_whitespace {
            data.trim_ascii()
        } else {
            data
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legacy_pads_aligned_payload_fully() {
        assert_eq!(PaddingPolicy::Legacy.pad_for(0), 8);
        assert_eq!(PaddingPolicy::Legacy.pad_for(8), 8);
        assert_eq!(PaddingPolicy::Legacy.pad_for(13), 3);
    }

    #[test]
    fn test_minimal_padding() {
        assert_eq!(PaddingPolicy::Minimal.pad_for(0), 0);
        assert_eq!(PaddingPolicy::Minimal.pad_for(16), 0);
        assert_eq!(PaddingPolicy::Minimal.pad_for(13), 3);
    }

    #[test]
    fn test_trim() {
        let config = CodecConfig::new().with_trim_whitespace(true);
        assert_eq!(config.prepare(b"  hi there \n"), b"hi there");
        assert_eq!(CodecConfig::default().prepare(b" x "), b" x ");
    }
}
