//! KeePassX 1.x XML export
//!
//! ```xml
//! <!DOCTYPE KEEPASSX_DATABASE>
//! <database>
//!  <group>
//!   <title>GPass entries</title>
//!   <icon>1</icon>
//!    <entry>...</entry>
//!  </group>
//! </database>
//! ```
//!
//! One flat group; GPass folders are not carried over.

use anyhow::{Context, Result};
use chrono::DateTime;
use gpass_core::config::OutputConfig;
use gpass_core::Entry;

/// Render `entries` as a complete KeePassX XML document.
pub fn render(entries: &[Entry], output: &OutputConfig) -> Result<String> {
    let mut xml = String::new();
    xml.push_str("<!DOCTYPE KEEPASSX_DATABASE>\n<database>\n <group>\n");
    xml.push_str(&format!("  <title>{}</title>\n", escape(&output.group_title)));
    xml.push_str(&format!("  <icon>{}</icon>\n", output.icon));

    for entry in entries {
        write_entry(&mut xml, entry, output.icon)?;
    }

    xml.push_str(" </group>\n</database>\n");
    Ok(xml)
}

fn write_entry(xml: &mut String, entry: &Entry, icon: u32) -> Result<()> {
    let updated = format_time(entry.updated)
        .with_context(|| format!("entry {:?}: timestamp {} out of range", entry.name, entry.updated))?;

    xml.push_str("   <entry>\n");
    push_element(xml, "title", &escape(&entry.name));
    push_element(xml, "username", &escape(&entry.username));
    push_element(xml, "password", &escape(&entry.password));
    push_element(xml, "url", &escape(&entry.hostname));
    push_element(xml, "comment", &escape(&entry.description));
    push_element(xml, "icon", &icon.to_string());
    push_element(xml, "creation", &updated);
    push_element(xml, "lastaccess", &updated);
    push_element(xml, "lastmod", &updated);
    xml.push_str("   </entry>\n");
    Ok(())
}

fn push_element(xml: &mut String, tag: &str, value: &str) {
    xml.push_str(&format!("    <{tag}>{value}</{tag}>\n"));
}

/// Seconds since the epoch as a UTC `YYYY-MM-DDTHH:MM:SS` string.
fn format_time(secs: u64) -> Option<String> {
    let secs = i64::try_from(secs).ok()?;
    let time = DateTime::from_timestamp(secs, 0)?;
    Some(time.format("%Y-%m-%dT%H:%M:%S").to_string())
}

/// Escape the five XML special characters.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry() -> Entry {
        Entry {
            name: "Bank & Co".into(),
            description: "PIN <1234>".into(),
            updated: 1_234_567_890,
            hostname: "https://bank.example".into(),
            username: "o'brien".into(),
            password: "\"quoted\"".into(),
        }
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape(r#"a&b<c>d"e'f"#), "a&amp;b&lt;c&gt;d&quot;e&apos;f");
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn test_format_time_utc() {
        assert_eq!(format_time(0).as_deref(), Some("1970-01-01T00:00:00"));
        assert_eq!(format_time(1_234_567_890).as_deref(), Some("2009-02-13T23:31:30"));
        assert_eq!(format_time(u64::MAX), None);
    }

    #[test]
    fn test_render_entry() {
        let xml = render(&[entry()], &OutputConfig::default()).unwrap();

        assert!(xml.starts_with("<!DOCTYPE KEEPASSX_DATABASE>\n<database>\n"));
        assert!(xml.contains("  <title>GPass entries</title>\n"));
        assert!(xml.contains("    <title>Bank &amp; Co</title>\n"));
        assert!(xml.contains("    <username>o&apos;brien</username>\n"));
        assert!(xml.contains("    <password>&quot;quoted&quot;</password>\n"));
        assert!(xml.contains("    <url>https://bank.example</url>\n"));
        assert!(xml.contains("    <comment>PIN &lt;1234&gt;</comment>\n"));
        assert!(xml.contains("    <lastmod>2009-02-13T23:31:30</lastmod>\n"));
        assert_eq!(xml.matches("<entry>").count(), 1);
        assert!(xml.ends_with(" </group>\n</database>\n"));
    }

    #[test]
    fn test_render_uses_output_config() {
        let output = OutputConfig {
            group_title: "Old <GPass>".into(),
            icon: 7,
            ..Default::default()
        };
        let xml = render(&[entry(), entry()], &output).unwrap();

        assert!(xml.contains("  <title>Old &lt;GPass&gt;</title>\n"));
        assert_eq!(xml.matches("<icon>7</icon>").count(), 3);
        assert_eq!(xml.matches("</entry>").count(), 2);
    }

    #[test]
    fn test_render_empty() {
        let xml = render(&[], &OutputConfig::default()).unwrap();
        assert!(!xml.contains("<entry>"));
    }

    #[test]
    fn test_out_of_range_timestamp_is_error() {
        let mut bad = entry();
        bad.updated = u64::MAX;
        assert!(render(&[bad], &OutputConfig::default()).is_err());
    }
}
