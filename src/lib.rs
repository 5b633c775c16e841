//! # Asciify - UTF-8 to ASCII Conversion Library
//!
//! Asciify converts text containing non-ASCII characters into an ASCII
//! approximation driven by a user-supplied mapping file, and renders each
//! line through a small template that combines the original line with its
//! conversion (for example to produce `mv` commands that rename files).
//!
//! - **Mappings**: `*.map8u` files of `char=replacement` lines
//! - **Conversion**: per-character replacement with a default fallback
//! - **Templates**: `$1` (original) / `$2` (converted) with backslash escaping
//! - **Hosts**: a CLI and an HTTP JSON API
//!
//! ## Quick Start
//!
//! ```
//! use asciify::{convert_all_lines, load_mapping, transform_all_lines};
//!
//! let table = load_mapping("default=_\né=e\n".as_bytes())?;
//!
//! assert_eq!(convert_all_lines("café", &table), "cafe\n");
//! assert_eq!(
//!     transform_all_lines("café", r#"mv "$1" "$2""#, &table),
//!     "mv \"café\" \"cafe\"\n"
//! );
//! # Ok::<(), asciify::AsciifyError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`mapping`] | Mapping tables and mapping directories |
//! | [`convert`] | Single-line conversion |
//! | [`template`] | `$1`/`$2` template expansion |
//! | [`lines`] | Batch operations over multi-line text |
//! | [`session`] | Interactive state with explicit recompute |
//! | [`selection`] | Line-range selection mirroring |
//! | [`server`] | HTTP JSON API |
//! | [`logging`] | Log configuration |
//! | [`error`] | Error types |

pub mod convert;
pub mod error;
pub mod lines;
pub mod logging;
pub mod mapping;
pub mod selection;
pub mod server;
pub mod session;
pub mod template;

// Re-exports for convenience
pub use convert::convert_line;
pub use error::AsciifyError;
pub use lines::{convert_all_lines, filter_unchanged_lines, transform_all_lines};
pub use mapping::{MappingDirectory, MappingTable, load_mapping};
pub use session::Session;
pub use template::expand_template;
