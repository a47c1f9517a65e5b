//! Packed (base-128) integers and strings
//!
//! Used only inside a record's attribute block. Each byte carries 7 value
//! bits, least significant group first; a set high bit means another byte
//! follows:
//! ```text
//! 300 = 0b10_0101100  ->  [0xAC, 0x02]
//! str = [len: packed int][len bytes]
//! ```
//!
//! Unlike the fixed encoding these are self-delimiting, so both readers
//! return how many bytes they consumed.

use gpass_core::{GpassError, GpassResult};

/// Longest packed integer accepted by the reader
pub const MAX_PACKED_LEN: usize = 6;

const CONTINUATION: u8 = 0x80;

/// Decode a packed integer from the start of `input`.
///
/// Returns `(bytes_consumed, value)`. Fails if the input ends before a
/// terminating byte, or if the sixth byte still has its continuation bit set.
pub fn unpack_int(input: &[u8]) -> GpassResult<(usize, u64)> {
    let mut value = 0u64;

    for (i, &c) in input.iter().take(MAX_PACKED_LEN).enumerate() {
        value |= u64::from(c & !CONTINUATION) << (7 * i);
        if c & CONTINUATION == 0 {
            return Ok((i + 1, value));
        }
    }

    if input.len() >= MAX_PACKED_LEN {
        Err(GpassError::format(format!(
            "packed integer longer than {MAX_PACKED_LEN} bytes"
        )))
    } else {
        Err(GpassError::format("truncated packed integer"))
    }
}

/// Decode a packed-length string from the start of `input`.
///
/// Returns `(bytes_consumed, string_bytes)`, where the count covers both the
/// length prefix and the body.
pub fn unpack_str(input: &[u8]) -> GpassResult<(usize, &[u8])> {
    let (cut, len) = unpack_int(input)?;
    let body = usize::try_from(len)
        .ok()
        .and_then(|len| cut.checked_add(len))
        .and_then(|end| input.get(cut..end))
        .ok_or_else(|| {
            GpassError::format(format!(
                "packed string declares {len} bytes, only {} remain",
                input.len() - cut
            ))
        })?;
    Ok((cut + body.len(), body))
}

/// Append `value` as a packed integer. Zero encodes as a single `0x00`.
pub fn pack_int(out: &mut Vec<u8>, mut value: u64) {
    loop {
        let mut c = (value & 0x7f) as u8;
        value >>= 7;
        if value > 0 {
            c |= CONTINUATION;
        }
        out.push(c);
        if value == 0 {
            break;
        }
    }
}

/// Append `data` prefixed by its packed length.
pub fn pack_str(out: &mut Vec<u8>, data: &[u8]) {
    pack_int(out, data.len() as u64);
    out.extend_from_slice(data);
}
