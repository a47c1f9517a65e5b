//! Write-back: `Entry` list → encrypted GPass 0.5.x file

use encoding_rs::Encoding;
use gpass_core::{Entry, GpassError, GpassResult};
use secrecy::SecretString;
use zeroize::Zeroizing;

use crate::record::{encode_attributes, write_record, Attributes, RawRecord, GENERAL};
use crate::text::encode_legacy;
use crate::MAGIC;

/// Serialize `entries` as `general` records under the root folder and encrypt.
///
/// Ids are assigned 1..=n in order. Both timestamps are set to `updated` and
/// expiry is disabled, since `Entry` does not carry those fields.
pub fn export_entries(
    entries: &[Entry],
    password: &SecretString,
    encoding: &'static Encoding,
) -> GpassResult<Vec<u8>> {
    let mut plaintext = Zeroizing::new(MAGIC.to_vec());

    for (index, entry) in entries.iter().enumerate() {
        let id = u32::try_from(index + 1)
            .map_err(|_| GpassError::format("too many entries for 32-bit record ids"))?;

        let name = encode_legacy(&entry.name, encoding);
        let description = encode_legacy(&entry.description, encoding);
        let username = encode_legacy(&entry.username, encoding);
        let secret = Zeroizing::new(encode_legacy(&entry.password, encoding));
        let hostname = encode_legacy(&entry.hostname, encoding);

        let block = Zeroizing::new(encode_attributes(
            &Attributes {
                name: &name,
                description: &description,
                created: entry.updated,
                modified: entry.updated,
                expire: 0,
                expire_time: 0,
                username: &username,
                password: &secret,
                hostname: &hostname,
            },
            true,
        ));

        write_record(
            &mut plaintext,
            &RawRecord {
                id,
                parent_id: 0,
                entry_type: GENERAL,
                attributes: &block,
            },
        )?;
    }

    tracing::debug!(entries = entries.len(), bytes = plaintext.len(), "encoded GPass records");
    gpass_crypto::encrypt(&plaintext, password)
}
