//! # ASCII Conversion
//!
//! Converts Unicode strings to ASCII using a [`MappingTable`].
//!
//! ASCII (U+0000–U+007F) passes through unchanged. Every other code point is
//! replaced by its table entry, or by the table's default replacement when it
//! has none.

use crate::mapping::MappingTable;

/// Convert one line of text to its ASCII approximation.
///
/// - ASCII (U+0000–U+007F): copied as-is
/// - Mapped characters: replaced by the mapped string (which may be empty)
/// - Unmapped characters: replaced by the table's default replacement
///
/// ## Example
///
/// ```
/// use asciify::{convert::convert_line, mapping::MappingTable};
///
/// let table = MappingTable::load("é=e\n".as_bytes())?;
/// assert_eq!(convert_line("café ☕", &table), "cafe ?");
/// # Ok::<(), asciify::AsciifyError>(())
/// ```
pub fn convert_line(line: &str, table: &MappingTable) -> String {
    let mut out = String::with_capacity(line.len());
    for ch in line.chars() {
        if ch.is_ascii() {
            out.push(ch);
        } else {
            out.push_str(table.get(ch).unwrap_or(table.default_replacement()));
        }
    }
    out
}
