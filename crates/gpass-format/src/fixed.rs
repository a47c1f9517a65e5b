//! Fixed-width integers and the strings prefixed by them
//!
//! Used for the outer record stream only:
//! ```text
//! int = 4 bytes, little-endian, unsigned
//! str = [len: int][len bytes]
//! ```

use gpass_core::{GpassError, GpassResult};

/// Width of a fixed integer in bytes
pub const INT_SIZE: usize = 4;

/// Read a 4-byte little-endian unsigned integer from the start of `input`.
pub fn get_int(input: &[u8]) -> GpassResult<u32> {
    let bytes: [u8; INT_SIZE] = input
        .get(..INT_SIZE)
        .and_then(|b| b.try_into().ok())
        .ok_or_else(|| {
            GpassError::format(format!(
                "truncated fixed-length integer ({} of {INT_SIZE} bytes)",
                input.len().min(INT_SIZE)
            ))
        })?;
    Ok(u32::from_le_bytes(bytes))
}

/// Read a fixed-int-prefixed string from the start of `input`.
///
/// The caller advances past `INT_SIZE + returned.len()` bytes.
pub fn get_str(input: &[u8]) -> GpassResult<&[u8]> {
    let len = get_int(input)? as usize;
    INT_SIZE
        .checked_add(len)
        .and_then(|end| input.get(INT_SIZE..end))
        .ok_or_else(|| {
            GpassError::format(format!(
                "fixed-length string declares {len} bytes, only {} remain",
                input.len() - INT_SIZE
            ))
        })
}

/// Append `value` as a 4-byte little-endian integer.
pub fn put_int(out: &mut Vec<u8>, value: u32) {
    out.extend_from_slice(&value.to_le_bytes());
}

/// Append `data` prefixed by its fixed-int length.
///
/// Fails if `data` is longer than a fixed int can describe.
pub fn put_str(out: &mut Vec<u8>, data: &[u8]) -> GpassResult<()> {
    let len = u32::try_from(data.len()).map_err(|_| {
        GpassError::format(format!("string of {} bytes exceeds u32 length field", data.len()))
    })?;
    put_int(out, len);
    out.extend_from_slice(data);
    Ok(())
}
