//! GPass record layout
//!
//! ```text
//! record     = [id: int][parent_id: int][entry_type: str][attributes: str]   (fixed encoding)
//! attributes = [name: pstr][description: pstr]
//!              [ctime: pint][mtime: pint][expire: pint][etime: pint]
//!              ( [username: pstr][password: pstr][hostname: pstr] )?        (packed encoding)
//! ```
//!
//! The trailing credential triple is present only for `general` records.

use gpass_core::GpassResult;

use crate::fixed::{get_int, get_str, put_int, put_str, INT_SIZE};
use crate::packed::{pack_int, pack_str, unpack_int, unpack_str};

/// Entry type of a password record
pub const GENERAL: &[u8] = b"general";

/// Entry type of a folder record
pub const FOLDER: &[u8] = b"folder";

/// One undecoded record from the outer stream, borrowing from the plaintext.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawRecord<'a> {
    pub id: u32,
    pub parent_id: u32,
    pub entry_type: &'a [u8],
    pub attributes: &'a [u8],
}

impl RawRecord<'_> {
    pub fn is_general(&self) -> bool {
        self.entry_type == GENERAL
    }
}

/// Decoded attribute block. Strings are still in the legacy encoding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Attributes<'a> {
    pub name: &'a [u8],
    pub description: &'a [u8],
    pub created: u64,
    pub modified: u64,
    pub expire: u64,
    pub expire_time: u64,
    /// Empty unless the record is `general`
    pub username: &'a [u8],
    pub password: &'a [u8],
    pub hostname: &'a [u8],
}

/// Read one record from the start of `input`.
///
/// Returns the record and the number of bytes it occupied.
pub fn read_record(input: &[u8]) -> GpassResult<(RawRecord<'_>, usize)> {
    let mut pos = 0;

    let id = get_int(&input[pos..])?;
    pos += INT_SIZE;

    let parent_id = get_int(&input[pos..])?;
    pos += INT_SIZE;

    let entry_type = get_str(&input[pos..])?;
    pos += INT_SIZE + entry_type.len();

    let attributes = get_str(&input[pos..])?;
    pos += INT_SIZE + attributes.len();

    Ok((
        RawRecord {
            id,
            parent_id,
            entry_type,
            attributes,
        },
        pos,
    ))
}

/// Decode an attribute block. `general` selects whether the credential
/// fields follow the timestamps.
///
/// Bytes after the last expected field are ignored.
pub fn parse_attributes(mut data: &[u8], general: bool) -> GpassResult<Attributes<'_>> {
    let mut attrs = Attributes::default();

    attrs.name = take_str(&mut data)?;
    attrs.description = take_str(&mut data)?;
    attrs.created = take_int(&mut data)?;
    attrs.modified = take_int(&mut data)?;
    attrs.expire = take_int(&mut data)?;
    attrs.expire_time = take_int(&mut data)?;

    if general {
        attrs.username = take_str(&mut data)?;
        attrs.password = take_str(&mut data)?;
        attrs.hostname = take_str(&mut data)?;
    }

    if !data.is_empty() {
        tracing::trace!(leftover = data.len(), "ignoring trailing attribute bytes");
    }

    Ok(attrs)
}

fn take_int(data: &mut &[u8]) -> GpassResult<u64> {
    let input = *data;
    let (used, value) = unpack_int(input)?;
    *data = &input[used..];
    Ok(value)
}

fn take_str<'a>(data: &mut &'a [u8]) -> GpassResult<&'a [u8]> {
    let input = *data;
    let (used, value) = unpack_str(input)?;
    *data = &input[used..];
    Ok(value)
}

/// Encode an attribute block. The credential fields are written only when
/// `general` is set.
pub fn encode_attributes(attrs: &Attributes<'_>, general: bool) -> Vec<u8> {
    let mut out = Vec::new();
    pack_str(&mut out, attrs.name);
    pack_str(&mut out, attrs.description);
    pack_int(&mut out, attrs.created);
    pack_int(&mut out, attrs.modified);
    pack_int(&mut out, attrs.expire);
    pack_int(&mut out, attrs.expire_time);
    if general {
        pack_str(&mut out, attrs.username);
        pack_str(&mut out, attrs.password);
        pack_str(&mut out, attrs.hostname);
    }
    out
}

/// Append a record to `out` in the outer fixed-int layout.
pub fn write_record(out: &mut Vec<u8>, record: &RawRecord<'_>) -> GpassResult<()> {
    put_int(out, record.id);
    put_int(out, record.parent_id);
    put_str(out, record.entry_type)?;
    put_str(out, record.attributes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_attrs() -> Attributes<'static> {
        Attributes {
            name: b"mail",
            description: b"work account",
            created: 1_100_000_000,
            modified: 1_150_000_000,
            expire: 0,
            expire_time: 0,
            username: b"alice",
            password: b"hunter2",
            hostname: b"imap.example.org",
        }
    }

    #[test]
    fn test_read_record_fields_and_length() {
        let mut buf = Vec::new();
        write_record(
            &mut buf,
            &RawRecord {
                id: 7,
                parent_id: 3,
                entry_type: GENERAL,
                attributes: b"\x01\x02",
            },
        )
        .unwrap();
        buf.extend_from_slice(b"next");

        let (record, used) = read_record(&buf).unwrap();
        assert_eq!(record.id, 7);
        assert_eq!(record.parent_id, 3);
        assert!(record.is_general());
        assert_eq!(record.attributes, b"\x01\x02");
        assert_eq!(used, 4 + 4 + 4 + 7 + 4 + 2);
        assert_eq!(&buf[used..], b"next");
    }

    #[test]
    fn test_read_record_truncated_at_each_field() {
        let mut buf = Vec::new();
        write_record(
            &mut buf,
            &RawRecord {
                id: 1,
                parent_id: 0,
                entry_type: FOLDER,
                attributes: b"abc",
            },
        )
        .unwrap();

        for cut in 0..buf.len() {
            let err = read_record(&buf[..cut]).unwrap_err();
            assert!(err.is_format(), "cut at {cut} must be a format error");
        }
    }

    #[test]
    fn test_general_attributes() {
        let attrs = sample_attrs();
        let encoded = encode_attributes(&attrs, true);
        assert_eq!(parse_attributes(&encoded, true).unwrap(), attrs);
    }

    #[test]
    fn test_folder_attributes_have_no_credentials() {
        let attrs = sample_attrs();
        let encoded = encode_attributes(&attrs, false);
        let parsed = parse_attributes(&encoded, false).unwrap();

        assert_eq!(parsed.name, b"mail");
        assert_eq!(parsed.modified, 1_150_000_000);
        assert!(parsed.username.is_empty());
        assert!(parsed.password.is_empty());
        assert!(parsed.hostname.is_empty());
    }

    #[test]
    fn test_general_flag_reads_credentials_folder_block_lacks() {
        let encoded = encode_attributes(&sample_attrs(), false);
        let err = parse_attributes(&encoded, true).unwrap_err();
        assert!(err.is_format());
    }

    #[test]
    fn test_trailing_attribute_bytes_ignored() {
        let mut encoded = encode_attributes(&sample_attrs(), true);
        encoded.extend_from_slice(b"\x03xyz");
        assert_eq!(parse_attributes(&encoded, true).unwrap(), sample_attrs());
    }

    #[test]
    fn test_empty_attribute_block_is_format_error() {
        assert!(parse_attributes(b"", false).unwrap_err().is_format());
    }
}
