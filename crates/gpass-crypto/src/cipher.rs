//! Blowfish-CBC encryption/decryption of whole GPass files
//!
//! Decrypted layout:
//! ```text
//! [magic (optional, caller-defined)][payload][n bytes of value n]
//! ```
//!
//! Padding is checked by hand rather than with a strict PKCS#7 unpadder:
//! GPass accepts a final byte of 0 as "no padding" and any pad length whose
//! bytes all match, including lengths above the block size.

use blowfish::Blowfish;
use cbc::cipher::block_padding::NoPadding;
use cbc::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use gpass_core::{GpassError, GpassResult};
use secrecy::SecretString;
use zeroize::Zeroizing;

use crate::key::{derive_key, LegacyKey};
use crate::{BLOCK_SIZE, FIXED_IV};

type BlowfishCbcEnc = cbc::Encryptor<Blowfish>;
type BlowfishCbcDec = cbc::Decryptor<Blowfish>;

/// Decrypt a GPass blob.
///
/// - `ciphertext`: must be a whole number of 8-byte blocks
/// - `magic`: when given, the plaintext must start with these bytes
///   (otherwise [`GpassError::Password`]); they are stripped from the result
///
/// Returns the plaintext with magic and padding removed.
pub fn decrypt(
    ciphertext: &[u8],
    password: &SecretString,
    magic: Option<&[u8]>,
) -> GpassResult<Zeroizing<Vec<u8>>> {
    if !ciphertext.len().is_multiple_of(BLOCK_SIZE) {
        return Err(GpassError::format(format!(
            "ciphertext length {} is not a multiple of {BLOCK_SIZE}",
            ciphertext.len()
        )));
    }

    let key = derive_key(password);
    let mut buf = Zeroizing::new(ciphertext.to_vec());
    decrypt_blocks(&key, &mut buf)?;

    let mut start = 0;
    if let Some(magic) = magic {
        if !buf.starts_with(magic) {
            tracing::debug!("magic string mismatch after decryption");
            return Err(GpassError::Password);
        }
        start = magic.len();
    }

    let end = start + padding_start(&buf[start..])?;
    Ok(Zeroizing::new(buf[start..end].to_vec()))
}

/// Encrypt `plaintext`, always appending 1..=8 bytes of PKCS#5 padding.
///
/// No magic string is added; callers that need one prepend it themselves.
pub fn encrypt(plaintext: &[u8], password: &SecretString) -> GpassResult<Vec<u8>> {
    let padlen = BLOCK_SIZE - plaintext.len() % BLOCK_SIZE;

    let mut buf = Zeroizing::new(Vec::with_capacity(plaintext.len() + padlen));
    buf.extend_from_slice(plaintext);
    buf.resize(plaintext.len() + padlen, padlen as u8);

    let key = derive_key(password);
    let encryptor = BlowfishCbcEnc::new_from_slices(key.as_bytes(), &FIXED_IV)
        .map_err(|e| GpassError::format(format!("blowfish init: {e}")))?;
    let len = buf.len();
    let ciphertext = encryptor
        .encrypt_padded_mut::<NoPadding>(&mut buf, len)
        .map_err(|e| GpassError::format(format!("blowfish encrypt: {e}")))?
        .to_vec();

    Ok(ciphertext)
}

fn decrypt_blocks(key: &LegacyKey, buf: &mut [u8]) -> GpassResult<()> {
    let decryptor = BlowfishCbcDec::new_from_slices(key.as_bytes(), &FIXED_IV)
        .map_err(|e| GpassError::format(format!("blowfish init: {e}")))?;
    decryptor
        .decrypt_padded_mut::<NoPadding>(buf)
        .map_err(|e| GpassError::format(format!("blowfish decrypt: {e}")))?;
    Ok(())
}

/// Offset at which padding begins in `data`.
///
/// A final byte `n > 0` requires the last `n` bytes to all equal `n`;
/// a final byte of 0 means nothing was padded.
fn padding_start(data: &[u8]) -> GpassResult<usize> {
    let Some(&n) = data.last() else {
        return Err(GpassError::format("decrypted data is empty, missing padding"));
    };
    let n = usize::from(n);

    if n == 0 {
        return Ok(data.len());
    }
    if n > data.len() || data[data.len() - n..].iter().any(|&b| usize::from(b) != n) {
        return Err(GpassError::format(format!("invalid padding (length byte {n})")));
    }
    Ok(data.len() - n)
}
