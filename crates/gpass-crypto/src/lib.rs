//! gpass-crypto: the GPass 0.5.x file cipher
//!
//! Legacy scheme, reproduced bit-for-bit for compatibility:
//! ```text
//! key        = SHA-1(password)                  (160-bit, no salt, no iterations)
//! ciphertext = Blowfish-CBC(key, FIXED_IV, plaintext || pad)
//! pad        = n copies of byte n, 1 <= n <= 8  (PKCS#5)
//! ```
//!
//! There is no MAC. The only integrity signal is an optional magic prefix the
//! caller expects at the start of the plaintext.

pub mod cipher;
pub mod key;

pub use cipher::{decrypt, encrypt};
pub use key::{derive_key, LegacyKey};

/// Blowfish block size in bytes
pub const BLOCK_SIZE: usize = 8;

/// Size of the derived key (SHA-1 digest, 160-bit)
pub const KEY_SIZE: usize = 20;

/// Initialization vector shared by every GPass file.
pub const FIXED_IV: [u8; BLOCK_SIZE] = [0x05, 0x17, 0x01, 0x7b, 0x0c, 0x03, 0x36, 0x5e];
