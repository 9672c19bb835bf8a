//! redb-backed settings store.
//!
//! The whole [`Settings`] record is postcard-encoded and kept under a single
//! key. A database without the table or the key loads as defaults.

use super::{Settings, SettingsStore};
use crate::error::Result;
use redb::{Database, ReadableDatabase, TableDefinition, TableError};
use std::fmt;
use std::path::{Path, PathBuf};

const SETTINGS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("settings");
const SETTINGS_KEY: &str = "settings";

/// Settings persisted in a redb file.
pub struct RedbSettingsStore {
    db: Database,
    path: PathBuf,
}

impl fmt::Debug for RedbSettingsStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedbSettingsStore")
            .field("path", &self.path)
            .finish()
    }
}

impl RedbSettingsStore {
    /// Open the database at `path`, creating it if needed.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let db = Database::create(&path)?;
        tracing::debug!(path = %path.display(), "opened settings database");
        Ok(Self { db, path })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsStore for RedbSettingsStore {
    fn load(&self) -> Result<Settings> {
        let txn = self.db.begin_read()?;
        let table = match txn.open_table(SETTINGS_TABLE) {
            Ok(table) => table,
            Err(TableError::TableDoesNotExist(_)) => return Ok(Settings::default()),
            Err(e) => return Err(e.into()),
        };

        match table.get(SETTINGS_KEY)? {
            Some(bytes) => Ok(postcard::from_bytes(bytes.value())?),
            None => Ok(Settings::default()),
        }
    }

    fn save(&mut self, settings: &Settings) -> Result<()> {
        let bytes = postcard::to_allocvec(settings)?;
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(SETTINGS_TABLE)?;
            table.insert(SETTINGS_KEY, bytes.as_slice())?;
        }
        txn.commit()?;
        tracing::debug!(path = %self.path.display(), "saved settings");
        Ok(())
    }
}
