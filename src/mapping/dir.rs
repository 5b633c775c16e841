//! # Mapping Directory
//!
//! Discovers `*.map8u` mapping files in a single directory and loads them by
//! file name. By default the directory sits next to the executable:
//!
//! ```text
//! bin/
//! ├── asciify
//! └── mappings/
//!     ├── french.map8u
//!     └── german.map8u
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::MappingTable;
use crate::error::{AsciifyError, Result};

/// Extension of mapping files (without the dot).
pub const MAPPING_EXTENSION: &str = "map8u";

/// Name of the mapping directory next to the executable.
const MAPPING_DIR_NAME: &str = "mappings";

/// A directory of mapping files.
#[derive(Debug, Clone)]
pub struct MappingDirectory {
    path: PathBuf,
}

impl MappingDirectory {
    /// `<executable dir>/mappings`, or `./mappings` if the executable path
    /// cannot be determined.
    pub fn default_path() -> PathBuf {
        std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
            .unwrap_or_else(|| PathBuf::from("."))
            .join(MAPPING_DIR_NAME)
    }

    /// Open the directory, creating it if it does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns [`AsciifyError::MappingDir`] if the directory cannot be created.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if !path.is_dir() {
            fs::create_dir_all(&path).map_err(|e| {
                AsciifyError::MappingDir(format!("cannot create {}: {}", path.display(), e))
            })?;
            info!(
                dir = %path.display(),
                "created missing mapping directory; default conversion applies"
            );
        }
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File names of the mapping files in the directory, sorted.
    ///
    /// # Errors
    ///
    /// Returns [`AsciifyError::MappingDir`] if the directory cannot be read.
    pub fn list(&self) -> Result<Vec<String>> {
        let read_dir = fs::read_dir(&self.path).map_err(|e| {
            AsciifyError::MappingDir(format!("cannot read {}: {}", self.path.display(), e))
        })?;

        let mut names = Vec::new();
        for entry in read_dir {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(MAPPING_EXTENSION) {
                continue;
            }
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                names.push(name.to_string());
            }
        }
        names.sort();

        debug!(dir = %self.path.display(), count = names.len(), "scanned mapping directory");
        Ok(names)
    }

    /// The mapping selected at startup: the first file listed, if any.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`MappingDirectory::list`].
    pub fn initial_selection(&self) -> Result<Option<String>> {
        Ok(self.list()?.into_iter().next())
    }

    /// Load the mapping file `name` from this directory.
    ///
    /// # Errors
    ///
    /// - [`AsciifyError::MappingNotFound`] if `name` is not a listed mapping
    /// - [`AsciifyError::Io`] if the file cannot be read
    /// - [`AsciifyError::Encoding`] if the file is not valid UTF-8
    pub fn load(&self, name: &str) -> Result<MappingTable> {
        if !self.list()?.iter().any(|listed| listed == name) {
            return Err(AsciifyError::MappingNotFound(name.to_string()));
        }
        let bytes = fs::read(self.path.join(name))?;
        let table = MappingTable::load_named(&bytes, name)?;
        info!(
            mapping = name,
            entries = table.len(),
            default = table.default_replacement(),
            "loaded mapping"
        );
        Ok(table)
    }
}
