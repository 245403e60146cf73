/// Growable bit-string packed MSB-first into bytes. Bits past `bit_count`
/// in the last byte are always zero.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct BitVec {
    bits: Vec<u8>,
    bit_count: usize,
}

impl BitVec {
    pub fn new() -> Self {
        BitVec {
            bits: Vec::new(),
            bit_count: 0,
        }
    }

    pub fn with_capacity(bit_capacity: usize) -> Self {
        BitVec {
            bits: Vec::with_capacity(bit_capacity.div_ceil(8)),
            bit_count: 0,
        }
    }

    /// Takes the first `bit_count` bits of `bytes`; surplus bytes are
    /// dropped and surplus bits cleared.
    pub fn from_bytes(mut bytes: Vec<u8>, bit_count: usize) -> Self {
        let bit_count = bit_count.min(bytes.len() * 8);
        bytes.truncate(bit_count.div_ceil(8));

        let tail = bit_count % 8;
        if tail != 0 {
            if let Some(last) = bytes.last_mut() {
                *last &= 0xFFu8 << (8 - tail);
            }
        }
        BitVec {
            bits: bytes,
            bit_count,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bits
    }

    pub fn len(&self) -> usize {
        self.bit_count
    }

    pub fn is_empty(&self) -> bool {
        self.bit_count == 0
    }

    pub fn push_bit(&mut self, bit: bool) {
        let byte_index = self.bit_count / 8; // which byte is target?
        let bit_offset = self.bit_count % 8; // which bit position is target?

        // make a new byte if needed
        if byte_index >= self.bits.len() {
            self.bits.push(0);
        }

        if bit {
            self.bits[byte_index] |= 1 << (7 - bit_offset);
        }

        self.bit_count += 1;
    }

    /// Appends the low `bit_length` bits of `code`, most significant first.
    /// Positions past the 64th are zero.
    pub fn push_bits(&mut self, code: u64, bit_length: u8) {
        for bit_pos in (0..bit_length).rev() {
            let bit = code.checked_shr(bit_pos as u32).unwrap_or(0) & 1;
            self.push_bit(bit != 0);
        }
    }

    pub fn get(&self, index: usize) -> Option<bool> {
        if index >= self.bit_count {
            return None;
        }
        Some(self.bits[index / 8] & (1 << (7 - index % 8)) != 0)
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.bit_count).map(move |i| self.bits[i / 8] & (1 << (7 - i % 8)) != 0)
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bits
    }
}

impl std::fmt::Display for BitVec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for bit in self.iter() {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}
