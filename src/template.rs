//! # Line Templates
//!
//! Expands a one-line template with two placeholders:
//!
//! | Placeholder | Replaced by |
//! |-------------|-------------|
//! | `$1` | The original line |
//! | `$2` | The converted (ASCII) line |
//!
//! ## Escaping
//!
//! A run of N backslashes directly before a `$` is written as N/2
//! backslashes (rounded down). If N is odd the placeholder is escaped and
//! written literally:
//!
//! ```text
//! template      output (original="A", converted="B")
//! $1-$2         A-B
//! \$1           $1
//! \\$1          \A
//! \\\$1         \$1
//! cost: $5      cost: $5
//! ```
//!
//! Any other `$x`, or a trailing `$`, is copied as a single `$`.

/// Template used when the configured one is blank.
pub const FALLBACK_TEMPLATE: &str = "$2";

/// Template preset for new sessions: a shell rename command.
pub const DEFAULT_TEMPLATE: &str = r#"mv "$1" "$2""#;

/// Recognized placeholder tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Placeholder {
    Original,
    Converted,
}

impl Placeholder {
    /// Placeholder named by the character following a `$`.
    fn from_digit(byte: Option<&u8>) -> Option<Self> {
        match byte {
            Some(b'1') => Some(Self::Original),
            Some(b'2') => Some(Self::Converted),
            _ => None,
        }
    }

    fn token(self) -> &'static str {
        match self {
            Self::Original => "$1",
            Self::Converted => "$2",
        }
    }
}

/// Expand `template` for one line pair.
///
/// Single forward pass over the template, no backtracking.
///
/// ## Example
///
/// ```
/// use asciify::template::expand_template;
///
/// let cmd = expand_template(r#"mv "$1" "$2""#, "café", "cafe");
/// assert_eq!(cmd, r#"mv "café" "cafe""#);
/// ```
pub fn expand_template(template: &str, original: &str, converted: &str) -> String {
    let mut out = String::with_capacity(template.len() + original.len() + converted.len());
    let mut rest = template;

    // `$` and `\` are ASCII, so every byte index below is a char boundary.
    while let Some(dollar) = rest.find('$') {
        let literal = &rest[..dollar];
        let unescaped = literal.trim_end_matches('\\');
        let backslashes = literal.len() - unescaped.len();

        out.push_str(unescaped);
        out.extend(std::iter::repeat_n('\\', backslashes / 2));
        let escaped = backslashes % 2 == 1;

        let after = &rest[dollar + 1..];
        match Placeholder::from_digit(after.as_bytes().first()) {
            Some(placeholder) => {
                let replacement = if escaped {
                    placeholder.token()
                } else {
                    match placeholder {
                        Placeholder::Original => original,
                        Placeholder::Converted => converted,
                    }
                };
                out.push_str(replacement);
                rest = &after[1..];
            }
            None => {
                out.push('$');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}
