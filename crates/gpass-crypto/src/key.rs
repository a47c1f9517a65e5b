//! Key derivation: SHA-1 password digest → Blowfish key

use secrecy::{ExposeSecret, SecretString};
use sha1::{Digest, Sha1};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::KEY_SIZE;

/// Blowfish key for one GPass file: the raw SHA-1 digest of its password.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct LegacyKey([u8; KEY_SIZE]);

impl LegacyKey {
    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.0
    }
}

impl std::fmt::Debug for LegacyKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("LegacyKey(..)")
    }
}

/// Derive the file key as the plain SHA-1 digest of the password bytes.
///
/// This is the GPass 0.5.x scheme and is far too weak for new data; it exists
/// only so old exports can be read.
pub fn derive_key(password: &SecretString) -> LegacyKey {
    LegacyKey(Sha1::digest(password.expose_secret().as_bytes()).into())
}
