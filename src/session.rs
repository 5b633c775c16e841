//! # Conversion Session
//!
//! Application state for a host that edits text interactively: the active
//! mapping, the template, the input buffer, and the derived outputs.
//!
//! Every mutation ends with an explicit [`Session::recompute`], so the
//! published [`Outputs`] always match the current inputs.
//!
//! ## Example
//!
//! ```
//! use asciify::{mapping::MappingTable, session::Session};
//!
//! let table = MappingTable::load("default=_\né=e\n".as_bytes())?;
//! let mut session = Session::new(table);
//! session.set_input("café");
//!
//! assert_eq!(session.outputs().converted, "cafe\n");
//! assert_eq!(session.outputs().transformed, "mv \"café\" \"cafe\"\n");
//! # Ok::<(), asciify::AsciifyError>(())
//! ```

use tracing::{info, warn};

use crate::error::{AsciifyError, Result};
use crate::lines::{convert_all_lines, filter_unchanged_lines, transform_all_lines};
use crate::mapping::{MappingDirectory, MappingTable};
use crate::template::DEFAULT_TEMPLATE;

/// Derived texts published after each recompute.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outputs {
    /// Pure ASCII conversion of the input
    pub converted: String,
    /// Input rendered through the template
    pub transformed: String,
}

/// Interactive conversion state.
#[derive(Debug)]
pub struct Session {
    mappings: Option<MappingDirectory>,
    active_mapping: Option<String>,
    table: MappingTable,
    template: String,
    input: String,
    outputs: Outputs,
}

impl Session {
    /// Session over a fixed table, with no mapping directory.
    pub fn new(table: MappingTable) -> Self {
        let mut session = Self {
            mappings: None,
            active_mapping: None,
            table,
            template: DEFAULT_TEMPLATE.to_string(),
            input: String::new(),
            outputs: Outputs::default(),
        };
        session.recompute();
        session
    }

    /// Session over a mapping directory, starting with its first mapping.
    ///
    /// If the first mapping cannot be loaded the session starts with the
    /// empty table.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be scanned.
    pub fn open(mappings: MappingDirectory) -> Result<Self> {
        let initial = mappings.initial_selection()?;
        let mut session = Self::new(MappingTable::new());

        if let Some(name) = initial {
            match mappings.load(&name) {
                Ok(table) => {
                    session.table = table;
                    session.active_mapping = Some(name);
                }
                Err(e) => warn!(mapping = %name, error = %e, "initial mapping not loaded"),
            }
        } else {
            info!(dir = %mappings.path().display(), "no mapping defined");
        }

        session.mappings = Some(mappings);
        session.recompute();
        Ok(session)
    }

    /// Switch mappings. `None` selects "no mapping" (empty table, `?` default).
    ///
    /// On error the previous mapping stays active.
    ///
    /// # Errors
    ///
    /// Returns an error if the mapping cannot be found, read, or decoded, or
    /// if a name is given but the session has no mapping directory.
    pub fn select_mapping(&mut self, name: Option<&str>) -> Result<()> {
        let (table, active) = match name {
            None => (MappingTable::new(), None),
            Some(name) => {
                let Some(mappings) = &self.mappings else {
                    return Err(AsciifyError::MappingNotFound(name.to_string()));
                };
                (mappings.load(name)?, Some(name.to_string()))
            }
        };
        self.table = table;
        self.active_mapping = active;
        self.recompute();
        Ok(())
    }

    /// Replace the table directly, e.g. with one loaded from an arbitrary file.
    pub fn set_table(&mut self, table: MappingTable, name: Option<String>) {
        self.table = table;
        self.active_mapping = name;
        self.recompute();
    }

    pub fn set_input(&mut self, input: impl Into<String>) {
        self.input = input.into();
        self.recompute();
    }

    pub fn set_template(&mut self, template: impl Into<String>) {
        self.template = template.into();
        self.recompute();
    }

    /// Drop input lines that conversion leaves unchanged.
    pub fn remove_unchanged_lines(&mut self) {
        self.input = filter_unchanged_lines(&self.input, &self.table);
        self.recompute();
    }

    /// Rebuild both outputs from the current input, template and table.
    pub fn recompute(&mut self) {
        self.outputs = Outputs {
            converted: convert_all_lines(&self.input, &self.table),
            transformed: transform_all_lines(&self.input, &self.template, &self.table),
        };
    }

    pub fn outputs(&self) -> &Outputs {
        &self.outputs
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn table(&self) -> &MappingTable {
        &self.table
    }

    /// File name of the active mapping, `None` when no mapping is selected.
    pub fn active_mapping(&self) -> Option<&str> {
        self.active_mapping.as_deref()
    }

    pub fn mappings(&self) -> Option<&MappingDirectory> {
        self.mappings.as_ref()
    }
}
