//! Byte alignment of encoded payloads.
//!
//! A packed buffer is one header byte holding the pad count, followed by the
//! payload bits MSB-first with `pad` zero bits appended to reach a byte
//! boundary.

use log::debug;

use crate::bit_vec::BitVec;
use crate::config::PaddingPolicy;
use crate::error::{HuffmanError, Result};

/// Pads `payload` and prepends the pad header. The result is always
/// `(8 + payload.len() + pad) / 8` bytes long.
pub fn pack(payload: &BitVec, policy: PaddingPolicy) -> Vec<u8> {
    let pad = policy.pad_for(payload.len());
    let total_bits = 8 + payload.len() + pad as usize;

    let mut out = Vec::with_capacity(total_bits / 8);
    out.push(pad);
    out.extend_from_slice(payload.as_bytes());
    // trailing bits of the payload's last byte are already zero
    out.resize(total_bits / 8, 0);

    debug!(
        "Packed {} payload bits with pad {} into {} bytes",
        payload.len(),
        pad,
        out.len()
    );
    out
}

/// Inverse of [`pack`]: reads the pad header and drops that many bits from
/// the tail.
pub fn unpack(bytes: &[u8]) -> Result<BitVec> {
    let (&pad, body) = bytes
        .split_first()
        .ok_or_else(|| HuffmanError::malformed("missing padding header"))?;

    if pad > 8 {
        return Err(HuffmanError::malformed(format!(
            "padding header {pad} out of range 0..=8"
        )));
    }

    let available = body.len() * 8;
    let pad = pad as usize;
    if pad > available {
        return Err(HuffmanError::malformed(format!(
            "padding of {pad} bits exceeds {available} payload bits"
        )));
    }

    Ok(BitVec::from_bytes(body.to_vec(), available - pad))
}
