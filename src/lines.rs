//! # Batch Line Processing
//!
//! Applies conversion and template expansion to every line of a text buffer.
//!
//! Lines are split on `\n` only, so `"a\nb"` gives `["a", "b"]` and `""`
//! gives a single empty line. [`convert_all_lines`] and
//! [`transform_all_lines`] terminate every output line with `\n`;
//! [`filter_unchanged_lines`] joins without a trailing newline because its
//! result replaces the editable input.

use crate::convert::convert_line;
use crate::mapping::MappingTable;
use crate::template::{FALLBACK_TEMPLATE, expand_template};

/// Template actually applied for a configured template string.
///
/// Surrounding whitespace is dropped; a blank template becomes `$2`.
pub fn effective_template(template: &str) -> &str {
    match template.trim() {
        "" => FALLBACK_TEMPLATE,
        trimmed => trimmed,
    }
}

/// Convert every line of `text`.
pub fn convert_all_lines(text: &str, table: &MappingTable) -> String {
    let mut out = String::with_capacity(text.len() + 1);
    for line in text.split('\n') {
        out.push_str(&convert_line(line, table));
        out.push('\n');
    }
    out
}

/// Expand `template` for every line of `text` and its conversion.
///
/// ## Example
///
/// ```
/// use asciify::{lines::transform_all_lines, mapping::MappingTable};
///
/// let table = MappingTable::load("default=_\né=e\n".as_bytes())?;
/// let out = transform_all_lines("café", r#"mv "$1" "$2""#, &table);
/// assert_eq!(out, "mv \"café\" \"cafe\"\n");
/// # Ok::<(), asciify::AsciifyError>(())
/// ```
pub fn transform_all_lines(text: &str, template: &str, table: &MappingTable) -> String {
    let template = effective_template(template);
    let mut out = String::new();
    for line in text.split('\n') {
        let converted = convert_line(line, table);
        out.push_str(&expand_template(template, line, &converted));
        out.push('\n');
    }
    out
}

/// Keep only the lines that conversion would change, in their original order.
pub fn filter_unchanged_lines(text: &str, table: &MappingTable) -> String {
    text.split('\n')
        .filter(|line| convert_line(line, table) != *line)
        .collect::<Vec<_>>()
        .join("\n")
}
