use std::io::{self, Cursor, Read, Write};

use crate::error::{HuffmanError, Result};
use crate::frequency::FrequencyTable;

pub const MAGIC: [u8; 4] = *b"HUF1";

/// Self-describing compressed artifact: the frequency table needed to
/// rebuild the code, the original length, and the padded payload.
///
/// Layout (integers little-endian):
/// magic `HUF1` | original length u64 | symbol count u16 |
/// (symbol u8, count u64) * count | padded buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressedData {
    pub original_length: u64,
    pub frequencies: FrequencyTable,
    pub packed: Vec<u8>,
}

impl CompressedData {
    pub fn serialize(&self) -> io::Result<Vec<u8>> {
        let mut bytes = Vec::with_capacity(14 + 9 * self.frequencies.len() + self.packed.len());

        bytes.write_all(&MAGIC)?;
        bytes.write_all(&self.original_length.to_le_bytes())?;

        // at most 256 distinct byte values
        let symbol_count = self.frequencies.len() as u16;
        bytes.write_all(&symbol_count.to_le_bytes())?;
        for (symbol, count) in self.frequencies.iter() {
            bytes.push(symbol);
            bytes.write_all(&count.to_le_bytes())?;
        }

        bytes.write_all(&self.packed)?;
        Ok(bytes)
    }

    pub fn deserialize(data: &[u8]) -> Result<CompressedData> {
        let mut cursor = Cursor::new(data);

        let mut magic = [0u8; 4];
        read_field(&mut cursor, &mut magic, "magic")?;
        if magic != MAGIC {
            return Err(HuffmanError::invalid_header(format!(
                "bad magic {magic:02x?}"
            )));
        }

        let mut original_length_bytes = [0u8; 8];
        read_field(&mut cursor, &mut original_length_bytes, "original length")?;
        let original_length = u64::from_le_bytes(original_length_bytes);

        let mut count_bytes = [0u8; 2];
        read_field(&mut cursor, &mut count_bytes, "symbol count")?;
        let count = u16::from_le_bytes(count_bytes) as usize;
        if count > 256 {
            return Err(HuffmanError::invalid_header(format!(
                "{count} symbols declared, at most 256 allowed"
            )));
        }

        let mut pairs = Vec::with_capacity(count);
        for _ in 0..count {
            let mut symbol = [0u8; 1];
            read_field(&mut cursor, &mut symbol, "symbol")?;
            let mut freq_bytes = [0u8; 8];
            read_field(&mut cursor, &mut freq_bytes, "symbol count")?;
            pairs.push((symbol[0], u64::from_le_bytes(freq_bytes)));
        }
        let frequencies = FrequencyTable::from_pairs(pairs)?;

        if frequencies.total() != original_length {
            return Err(HuffmanError::invalid_header(format!(
                "symbol counts sum to {}, header declares {} bytes",
                frequencies.total(),
                original_length
            )));
        }

        let mut packed = Vec::new();
        cursor.read_to_end(&mut packed)?;
        if packed.is_empty() {
            return Err(HuffmanError::invalid_header("missing payload"));
        }

        Ok(CompressedData {
            original_length,
            frequencies,
            packed,
        })
    }
}

fn read_field(cursor: &mut Cursor<&[u8]>, buf: &mut [u8], field: &str) -> Result<()> {
    cursor.read_exact(buf).map_err(|e| match e.kind() {
        io::ErrorKind::UnexpectedEof => {
            HuffmanError::invalid_header(format!("truncated before {field}"))
        }
        _ => HuffmanError::Io(e),
    })
}
