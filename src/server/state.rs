//! Server state and configuration.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::warn;

use crate::error::{AsciifyError, Result};
use crate::mapping::{MappingDirectory, MappingTable};

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on (e.g., "127.0.0.1:8080")
    pub listen_addr: String,
    /// Directory holding the `*.map8u` files
    pub mappings_dir: PathBuf,
    /// Mapping to activate at startup (defaults to the first one found)
    pub initial_mapping: Option<String>,
    /// Start with no mapping selected, ignoring the directory contents
    pub no_mapping: bool,
}

/// The mapping currently used for conversions.
#[derive(Debug, Clone, Default)]
pub struct ActiveMapping {
    /// File name, `None` when no mapping is selected
    pub name: Option<String>,
    pub table: MappingTable,
}

/// Application state shared across handlers.
#[derive(Debug)]
pub struct AppState {
    pub config: ServerConfig,
    pub mappings: MappingDirectory,
    /// Replaced as a whole on every mapping change.
    active: RwLock<Arc<ActiveMapping>>,
}

impl AppState {
    /// Open the mapping directory and load the initial mapping.
    ///
    /// A mapping named in the config must load. When none is named, the
    /// first mapping in the directory is tried and a failure leaves no
    /// mapping selected.
    ///
    /// # Errors
    ///
    /// Returns an error if the mapping directory cannot be opened or scanned,
    /// or if the named startup mapping cannot be loaded.
    pub fn new(config: ServerConfig) -> Result<Self> {
        let mappings = MappingDirectory::open(&config.mappings_dir)?;

        let active = if config.no_mapping {
            ActiveMapping::default()
        } else if let Some(name) = &config.initial_mapping {
            ActiveMapping {
                name: Some(name.clone()),
                table: mappings.load(name)?,
            }
        } else {
            match mappings.initial_selection()? {
                Some(name) => match mappings.load(&name) {
                    Ok(table) => ActiveMapping {
                        name: Some(name),
                        table,
                    },
                    Err(e) => {
                        warn!(mapping = %name, error = %e, "startup mapping not loaded");
                        ActiveMapping::default()
                    }
                },
                None => ActiveMapping::default(),
            }
        };

        Ok(Self {
            config,
            mappings,
            active: RwLock::new(Arc::new(active)),
        })
    }

    /// Snapshot of the active mapping.
    pub async fn active(&self) -> Arc<ActiveMapping> {
        self.active.read().await.clone()
    }

    /// Switch to mapping `name`, or to no mapping for `None`.
    ///
    /// The new table is fully loaded before it is published, so concurrent
    /// readers see either the old or the new mapping. On error the active
    /// mapping is unchanged.
    ///
    /// # Errors
    ///
    /// Returns the load error for `name`.
    pub async fn select(&self, name: Option<String>) -> Result<Arc<ActiveMapping>> {
        let next = match name {
            None => ActiveMapping::default(),
            Some(name) => {
                // File reads happen off the async runtime.
                let mappings = self.mappings.clone();
                tokio::task::spawn_blocking(move || {
                    mappings.load(&name).map(|table| ActiveMapping {
                        name: Some(name),
                        table,
                    })
                })
                .await
                .map_err(|e| AsciifyError::Server(format!("Task error: {}", e)))??
            }
        };

        let next = Arc::new(next);
        *self.active.write().await = next.clone();
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::dir::tests::scratch_dir;
    use pretty_assertions::assert_eq;
    use std::fs;

    fn config(label: &str, initial_mapping: Option<&str>, no_mapping: bool) -> ServerConfig {
        let dir = scratch_dir(label);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("fr.map8u"), "default=_\né=e\n").unwrap();
        fs::write(dir.join("latin1.map8u"), [b'\xE9', b'=', b'e']).unwrap();
        ServerConfig {
            listen_addr: "127.0.0.1:0".to_string(),
            mappings_dir: dir,
            initial_mapping: initial_mapping.map(str::to_string),
            no_mapping,
        }
    }

    #[tokio::test]
    async fn test_first_mapping_is_active_by_default() {
        let state = AppState::new(config("state-default", None, false)).unwrap();
        let active = state.active().await;
        assert_eq!(active.name.as_deref(), Some("fr.map8u"));
        assert_eq!(active.table.default_replacement(), "_");
    }

    #[test]
    fn test_unknown_startup_mapping_is_an_error() {
        let err = AppState::new(config("state-typo", Some("typo.map8u"), false)).unwrap_err();
        assert!(matches!(err, AsciifyError::MappingNotFound(name) if name == "typo.map8u"));
    }

    #[test]
    fn test_badly_encoded_startup_mapping_is_an_error() {
        let err = AppState::new(config("state-latin1", Some("latin1.map8u"), false)).unwrap_err();
        assert!(err.is_encoding());
    }

    #[tokio::test]
    async fn test_no_mapping_ignores_directory() {
        let state = AppState::new(config("state-none", None, true)).unwrap();
        let active = state.active().await;
        assert_eq!(active.name, None);
        assert!(active.table.is_empty());
        assert_eq!(active.table.default_replacement(), "?");
    }

    #[tokio::test]
    async fn test_failed_select_keeps_active_mapping() {
        let state = AppState::new(config("state-select", Some("fr.map8u"), false)).unwrap();
        assert!(state.select(Some("latin1.map8u".to_string())).await.is_err());
        assert_eq!(state.active().await.name.as_deref(), Some("fr.map8u"));
    }
}
