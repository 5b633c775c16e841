//! # Character Mappings
//!
//! This module loads the character mapping tables that drive conversion.
//!
//! ## Modules
//!
//! - [`table`]: The mapping table and its file format
//! - [`dir`]: Discovery of mapping files in a directory

pub mod dir;
pub mod table;

pub use dir::{MAPPING_EXTENSION, MappingDirectory};
pub use table::{DEFAULT_REPLACEMENT, MappingTable};

use crate::error::Result;

/// Load a mapping table from raw file bytes.
///
/// # Errors
///
/// Returns [`crate::AsciifyError::Encoding`] if the bytes are not valid UTF-8.
pub fn load_mapping(bytes: &[u8]) -> Result<MappingTable> {
    MappingTable::load(bytes)
}
