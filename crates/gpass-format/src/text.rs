//! Legacy text handling
//!
//! GPass stored strings in whatever charset the writing machine's locale
//! used, with no marker in the file. The source encoding is therefore a
//! caller-supplied parameter; [`locale_encoding`] reproduces the old
//! "ask the environment" default for callers that want it.

use encoding_rs::{Encoding, UTF_8};
use gpass_core::{GpassError, GpassResult};

/// Collapse CR/LF runs to one space, then decode from `encoding` into UTF-8.
///
/// Undecodable bytes become U+FFFD.
pub fn normalize(raw: &[u8], encoding: &'static Encoding) -> String {
    let collapsed = collapse_line_breaks(raw);
    let (text, had_errors) = encoding.decode_without_bom_handling(&collapsed);
    if had_errors {
        tracing::debug!(
            encoding = encoding.name(),
            "replaced undecodable bytes in legacy text"
        );
    }
    text.into_owned()
}

/// Encode UTF-8 text back into `encoding`, replacing unmappable characters.
pub fn encode_legacy(text: &str, encoding: &'static Encoding) -> Vec<u8> {
    let (bytes, _, had_errors) = encoding.encode(text);
    if had_errors {
        tracing::debug!(
            encoding = encoding.name(),
            "replaced unmappable characters while encoding legacy text"
        );
    }
    bytes.into_owned()
}

fn collapse_line_breaks(raw: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(raw.len());
    let mut in_break = false;
    for &b in raw {
        if b == b'\r' || b == b'\n' {
            if !in_break {
                out.push(b' ');
                in_break = true;
            }
        } else {
            out.push(b);
            in_break = false;
        }
    }
    out
}

/// Resolve a WHATWG encoding label such as `"latin1"` or `"UTF-8"`.
///
/// WHATWG maps `latin1` and `ISO-8859-1` to windows-1252, so bytes
/// 0x80..=0x9F decode to printable characters (0x80 is `€`) instead of
/// C1 control codes.
pub fn encoding_for_label(label: &str) -> GpassResult<&'static Encoding> {
    Encoding::for_label(label.trim().as_bytes())
        .ok_or_else(|| GpassError::Config(format!("unknown text encoding: {label:?}")))
}

/// Guess the encoding from `LC_ALL`, `LC_CTYPE` and `LANG`, in that order.
///
/// Falls back to UTF-8 when no variable names a recognised codeset.
pub fn locale_encoding() -> &'static Encoding {
    locale_encoding_with(|name| std::env::var(name).ok())
}

/// [`locale_encoding`] with an injectable variable lookup.
pub fn locale_encoding_with(lookup: impl Fn(&str) -> Option<String>) -> &'static Encoding {
    let locale = ["LC_ALL", "LC_CTYPE", "LANG"]
        .iter()
        .filter_map(|name| lookup(*name))
        .find(|value| !value.is_empty());

    let Some(locale) = locale else {
        return UTF_8;
    };

    // language_TERRITORY.codeset@modifier
    let codeset = locale
        .split_once('.')
        .map(|(_, rest)| rest.split('@').next().unwrap_or(rest))
        .unwrap_or("");

    match Encoding::for_label(codeset.as_bytes()) {
        Some(encoding) => encoding,
        None => {
            tracing::debug!(%locale, "no codeset in locale, assuming UTF-8");
            UTF_8
        }
    }
}
