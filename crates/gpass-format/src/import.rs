//! Decrypt-and-parse pipeline: GPass file → `Entry` list

use encoding_rs::Encoding;
use gpass_core::{Entry, GpassResult};
use secrecy::SecretString;

use crate::record::{parse_attributes, read_record};
use crate::text::normalize;
use crate::MAGIC;

/// Decrypt a GPass 0.5.x file and return its password entries.
///
/// `encoding` is the charset the file's text was written in. Folder records
/// are parsed (to keep the stream in step) but not returned. Any structural
/// error aborts the whole import; no partial list is produced.
pub fn import_data(
    ciphertext: &[u8],
    password: &SecretString,
    encoding: &'static Encoding,
) -> GpassResult<Vec<Entry>> {
    let plaintext = gpass_crypto::decrypt(ciphertext, password, Some(MAGIC))?;
    parse_entries(&plaintext, encoding)
}

/// Parse already-decrypted record data (magic and padding removed).
pub fn parse_entries(mut plaintext: &[u8], encoding: &'static Encoding) -> GpassResult<Vec<Entry>> {
    let mut entries = Vec::new();
    let mut skipped = 0usize;

    while !plaintext.is_empty() {
        let (record, used) = read_record(plaintext)?;
        plaintext = &plaintext[used..];

        let general = record.is_general();
        let attrs = parse_attributes(record.attributes, general)?;

        if !general {
            tracing::trace!(
                id = record.id,
                entry_type = %String::from_utf8_lossy(record.entry_type),
                "skipping non-general record"
            );
            skipped += 1;
            continue;
        }

        entries.push(Entry {
            name: normalize(attrs.name, encoding),
            description: normalize(attrs.description, encoding),
            updated: attrs.modified,
            hostname: normalize(attrs.hostname, encoding),
            username: normalize(attrs.username, encoding),
            password: normalize(attrs.password, encoding),
        });
    }

    tracing::debug!(entries = entries.len(), skipped, "parsed GPass records");
    Ok(entries)
}
