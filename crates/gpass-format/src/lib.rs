//! gpass-format: the GPass 0.5.x record format
//!
//! Pipeline:
//! ```text
//! file bytes → gpass_crypto::decrypt (magic + padding) → record stream → Entry list
//! ```
//!
//! The record stream mixes two unrelated integer encodings, kept in separate
//! modules so they cannot be swapped by accident:
//! - `fixed`: 4-byte little-endian ints, used by the outer records
//! - `packed`: base-128 varints, used inside each record's attribute block

pub mod export;
pub mod fixed;
pub mod import;
pub mod packed;
pub mod record;
pub mod text;

pub use export::export_entries;
pub use import::{import_data, parse_entries};
pub use record::{Attributes, RawRecord};
pub use text::{encoding_for_label, locale_encoding, normalize};

/// Magic string at the start of every decrypted GPass 0.5.x file
pub const MAGIC: &[u8] = b"GPassFile version 1.1.0";
