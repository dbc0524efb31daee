//! StorageEngine: owns the connection, runs migrations on open, hands out
//! transactions.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use rusqlite::Connection;
use tracing::{debug, info};

use vitality_core::config::StorageConfig;
use vitality_core::errors::{StorageError, VitalityResult};
use vitality_core::traits::{Transaction, VitalityStorage};

use crate::transaction::SqliteTransaction;
use crate::{migrations, pragmas, to_storage_err};

/// SQLite-backed [`VitalityStorage`]. A single connection serializes every
/// transaction, so writers never interleave.
pub struct StorageEngine {
    conn: Mutex<Connection>,
    db_path: Option<PathBuf>,
}

impl StorageEngine {
    /// Open (or create) a database file with default settings.
    pub fn open(path: &Path) -> VitalityResult<Self> {
        Self::open_with_config(path, &StorageConfig::default())
    }

    pub fn open_with_config(path: &Path, config: &StorageConfig) -> VitalityResult<Self> {
        let conn = Connection::open(path).map_err(|e| to_storage_err(e.to_string()))?;
        let engine = Self::initialize(conn, config, Some(path.to_path_buf()))?;
        info!(path = %path.display(), "storage opened");
        Ok(engine)
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> VitalityResult<Self> {
        let conn = Connection::open_in_memory().map_err(|e| to_storage_err(e.to_string()))?;
        Self::initialize(conn, &StorageConfig::default(), None)
    }

    fn initialize(
        conn: Connection,
        config: &StorageConfig,
        db_path: Option<PathBuf>,
    ) -> VitalityResult<Self> {
        pragmas::apply_pragmas(&conn, config)?;
        migrations::run_migrations(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
            db_path,
        })
    }

    pub fn db_path(&self) -> Option<&Path> {
        self.db_path.as_deref()
    }

    /// Current schema version.
    pub fn schema_version(&self) -> VitalityResult<u32> {
        let conn = self.lock()?;
        migrations::current_version(&conn)
    }

    fn lock(&self) -> VitalityResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|e| {
            StorageError::LockPoisoned {
                details: e.to_string(),
            }
            .into()
        })
    }
}

impl VitalityStorage for StorageEngine {
    fn begin_write(&self) -> VitalityResult<Box<dyn Transaction + '_>> {
        let tx = SqliteTransaction::begin(self.lock()?, true)?;
        debug!("write transaction started");
        Ok(Box::new(tx))
    }

    fn begin_read(&self) -> VitalityResult<Box<dyn Transaction + '_>> {
        Ok(Box::new(SqliteTransaction::begin(self.lock()?, false)?))
    }
}
