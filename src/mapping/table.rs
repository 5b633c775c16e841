//! # Mapping Table
//!
//! Character → replacement associations plus the fallback string used for
//! non-ASCII characters that have no entry.
//!
//! ## File Format
//!
//! Plain UTF-8 text, one directive per line:
//!
//! ```text
//! # comment line, ignored
//! default=?
//! é=e
//! €=EUR
//! ```
//!
//! Lines are separated by any run of CR/LF characters and trimmed before
//! inspection. Blank lines and lines starting with `#` are skipped.
//! Only the first character of a key segment is used as the key.

use std::collections::BTreeMap;

use crate::error::{AsciifyError, Result};

/// Fallback replacement used when none is configured.
pub const DEFAULT_REPLACEMENT: &str = "?";

/// Prefix of the directive that sets the fallback replacement.
const DEFAULT_DIRECTIVE: &str = "default=";

/// Source name reported for bytes that did not come from a named file.
const MEMORY_SOURCE: &str = "<memory>";

/// Written at the start of files by some Windows editors.
const BYTE_ORDER_MARK: char = '\u{FEFF}';

/// # Mapping Table
///
/// Immutable snapshot of one loaded mapping file. A new load produces a new
/// table; tables are never merged.
///
/// ## Example
///
/// ```
/// use asciify::mapping::MappingTable;
///
/// let table = MappingTable::load("default=_\né=e\n".as_bytes())?;
/// assert_eq!(table.get('é'), Some("e"));
/// assert_eq!(table.default_replacement(), "_");
/// # Ok::<(), asciify::AsciifyError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingTable {
    entries: BTreeMap<char, String>,
    default_replacement: String,
}

impl Default for MappingTable {
    fn default() -> Self {
        Self::new()
    }
}

impl MappingTable {
    /// Empty table with the `?` fallback (the "no mapping" state).
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            default_replacement: DEFAULT_REPLACEMENT.to_string(),
        }
    }

    /// Parse raw mapping file bytes.
    ///
    /// # Errors
    ///
    /// Returns [`AsciifyError::Encoding`] if the bytes are not valid UTF-8.
    pub fn load(bytes: &[u8]) -> Result<Self> {
        Self::load_named(bytes, MEMORY_SOURCE)
    }

    /// Parse raw mapping file bytes, reporting `source_name` on failure.
    ///
    /// # Errors
    ///
    /// Returns [`AsciifyError::Encoding`] if the bytes are not valid UTF-8.
    pub fn load_named(bytes: &[u8], source_name: &str) -> Result<Self> {
        // A lossy decode marks every invalid sequence with U+FFFD.
        let content = String::from_utf8_lossy(bytes);
        if content.contains(char::REPLACEMENT_CHARACTER) {
            return Err(AsciifyError::Encoding {
                source_name: source_name.to_string(),
            });
        }
        Ok(Self::parse(&content))
    }

    /// Parse already decoded mapping text.
    pub fn parse(content: &str) -> Self {
        let mut entries = BTreeMap::new();
        let mut default_replacement = String::new();

        let content = content.strip_prefix(BYTE_ORDER_MARK).unwrap_or(content);
        let lines = content
            .split(['\r', '\n'])
            .filter(|line| !line.is_empty());

        for line in lines {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            if let Some(value) = trimmed.strip_prefix(DEFAULT_DIRECTIVE) {
                default_replacement = value.to_string();
                continue;
            }

            // The first `=` must have a non-empty key before it.
            let Some(eq_index) = trimmed.find('=') else {
                continue;
            };
            if eq_index == 0 {
                continue;
            }
            if let Some(key) = trimmed[..eq_index].chars().next() {
                entries.insert(key, trimmed[eq_index + 1..].to_string());
            }
        }

        if default_replacement.is_empty() {
            default_replacement = DEFAULT_REPLACEMENT.to_string();
        }

        Self {
            entries,
            default_replacement,
        }
    }

    /// Replacement for `ch`, if the table has an entry for it.
    #[inline]
    pub fn get(&self, ch: char) -> Option<&str> {
        self.entries.get(&ch).map(String::as_str)
    }

    /// Fallback for non-ASCII characters without an entry.
    #[inline]
    pub fn default_replacement(&self) -> &str {
        &self.default_replacement
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in key order.
    pub fn entries(&self) -> impl Iterator<Item = (char, &str)> {
        self.entries.iter().map(|(k, v)| (*k, v.as_str()))
    }

    /// Serialize back to the mapping file format.
    ///
    /// The `default=` line comes first, followed by one `key=value` line per
    /// entry in key order. Any table produced by [`MappingTable::load`]
    /// reloads to an equal table.
    pub fn to_map_file(&self) -> String {
        let mut out = String::new();
        out.push_str(DEFAULT_DIRECTIVE);
        out.push_str(&self.default_replacement);
        out.push('\n');
        for (key, value) in &self.entries {
            out.push(*key);
            out.push('=');
            out.push_str(value);
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_new_table_uses_question_mark() {
        let table = MappingTable::new();
        assert!(table.is_empty());
        assert_eq!(table.default_replacement(), "?");
    }

    #[test]
    fn test_basic_entries() {
        let table = MappingTable::load("é=e\n€=EUR\nß=ss\n".as_bytes()).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.get('é'), Some("e"));
        assert_eq!(table.get('€'), Some("EUR"));
        assert_eq!(table.get('ß'), Some("ss"));
        assert_eq!(table.get('ü'), None);
        assert_eq!(table.default_replacement(), "?");
    }

    #[test]
    fn test_default_directive() {
        let table = MappingTable::load(b"default=_\n").unwrap();
        assert_eq!(table.default_replacement(), "_");
        assert!(table.is_empty());
    }

    #[test]
    fn test_last_default_wins() {
        let table = MappingTable::load(b"default=a\ndefault=b\n").unwrap();
        assert_eq!(table.default_replacement(), "b");
    }

    #[test]
    fn test_empty_default_falls_back() {
        let table = MappingTable::load(b"default=\n").unwrap();
        assert_eq!(table.default_replacement(), "?");
    }

    #[test]
    fn test_comments_and_blank_lines_skipped() {
        let content = "# header\n\n   \n  # indented comment\né=e\n";
        let table = MappingTable::load(content.as_bytes()).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.get('#'), None);
    }

    #[test]
    fn test_crlf_and_cr_line_endings() {
        let table = MappingTable::load("é=e\r\nà=a\rü=ue\r\n\r\n".as_bytes()).unwrap();
        assert_eq!(table.get('é'), Some("e"));
        assert_eq!(table.get('à'), Some("a"));
        assert_eq!(table.get('ü'), Some("ue"));
    }

    #[test]
    fn test_only_first_key_char_used() {
        let table = MappingTable::load("éa=E\n".as_bytes()).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.get('é'), Some("E"));
        assert_eq!(table.get('a'), None);
    }

    #[test]
    fn test_value_keeps_everything_after_first_equals() {
        let table = MappingTable::load("≠=!=\n".as_bytes()).unwrap();
        assert_eq!(table.get('≠'), Some("!="));
    }

    #[test]
    fn test_empty_value_allowed() {
        let table = MappingTable::load("ø=\n".as_bytes()).unwrap();
        assert_eq!(table.get('ø'), Some(""));
    }

    #[test]
    fn test_lines_without_key_or_equals_ignored() {
        let table = MappingTable::load("=x\nno equals here\né=e\n".as_bytes()).unwrap();
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_lines_are_trimmed() {
        let table = MappingTable::load("   é=e  \n\tdefault=-\t\n".as_bytes()).unwrap();
        assert_eq!(table.get('é'), Some("e"));
        assert_eq!(table.default_replacement(), "-");
    }

    #[test]
    fn test_invalid_utf8_rejected() {
        let err = MappingTable::load(&[b'a', b'=', 0xFF, b'\n']).unwrap_err();
        assert!(err.is_encoding());
    }

    #[test]
    fn test_error_carries_source_name() {
        let err = MappingTable::load_named(&[0xC3], "latin.map8u").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Mapping file is not UTF-8 encoded: latin.map8u"
        );
    }

    #[test]
    fn test_to_map_file_layout() {
        let table = MappingTable::load("ü=ue\ndefault=_\né=e\n".as_bytes()).unwrap();
        assert_eq!(table.to_map_file(), "default=_\né=e\nü=ue\n");
    }

    #[test]
    fn test_serialize_reload_roundtrip() {
        let content = "# test\ndefault=*\né=e\n€=EUR\nßx=ss\nd=dee\nø= o\n";
        let table = MappingTable::load(content.as_bytes()).unwrap();
        let reloaded = MappingTable::load(table.to_map_file().as_bytes()).unwrap();
        assert_eq!(table, reloaded);
    }

    #[test]
    fn test_leading_byte_order_mark_ignored() {
        let table = MappingTable::load("\u{FEFF}é=e\nü=ue\n".as_bytes()).unwrap();
        assert_eq!(table.get('é'), Some("e"));
        assert_eq!(table.get('\u{FEFF}'), None);
        assert_eq!(table.len(), 2);

        let table = MappingTable::load("\u{FEFF}# comment=x\ndefault=_\n".as_bytes()).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.default_replacement(), "_");
    }
}
