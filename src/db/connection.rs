use std::fs;
use std::path::{Path, PathBuf};

use rusqlite::Connection;
use tracing::{debug, info, warn};

use crate::error::StoreResult;

/// File name of the SQLite database inside the data directory.
pub const DATABASE_NAME: &str = "SQL_LITE_DATABASE";
/// Schema version recorded in `PRAGMA user_version`.
pub const DATABASE_VERSION: u32 = 1;
/// The single table holding every record.
pub const TABLE_NAME: &str = "SHIVANG_SQL_LITE_DATABASE_TABLE";

/// Handle to the on-disk record table.
///
/// The store only remembers where the database lives. Every operation opens a
/// fresh connection, runs one statement and closes it again before returning,
/// so nothing is shared between calls.
#[derive(Debug, Clone)]
pub struct RecordStore {
    path: PathBuf,
}

impl RecordStore {
    /// Point the store at `DATABASE_NAME` inside `dir`, creating the directory
    /// when it is missing.
    pub fn open(dir: impl AsRef<Path>) -> StoreResult<Self> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;
        Ok(Self::at_path(dir.join(DATABASE_NAME)))
    }

    /// Use an explicit database file. The parent directory must exist.
    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the table if absent and reconcile the stored schema version.
    ///
    /// A database stamped with any version other than `version` goes through
    /// [`RecordStore::upgrade`], which discards every row. A fresh file
    /// reports version 0 and is simply created.
    pub fn ensure_schema(&self, version: u32) -> StoreResult<()> {
        self.with_connection(|conn| {
            let stored = stored_version(conn)?;
            if stored != 0 && stored != version {
                warn!(from = stored, to = version, "schema version changed, recreating table");
                recreate_table(conn)?;
            } else {
                create_table(conn)?;
            }
            conn.pragma_update(None, "user_version", version)?;
            info!(path = %self.path.display(), version, "schema ready");
            Ok(())
        })
    }

    /// Destructive migration: drop the table and recreate it empty, then stamp
    /// the new version. Callers must treat this as "all data lost".
    pub fn upgrade(&self, old_version: u32, new_version: u32) -> StoreResult<()> {
        self.with_connection(|conn| {
            warn!(from = old_version, to = new_version, "dropping record table");
            recreate_table(conn)?;
            conn.pragma_update(None, "user_version", new_version)?;
            Ok(())
        })
    }

    /// Schema version currently stamped on the database file.
    pub fn schema_version(&self) -> StoreResult<u32> {
        self.with_connection(stored_version)
    }

    /// Open a connection, hand it to `op`, and close it on every exit path.
    pub(super) fn with_connection<T>(
        &self,
        op: impl FnOnce(&Connection) -> StoreResult<T>,
    ) -> StoreResult<T> {
        debug!(path = %self.path.display(), "opening connection");
        let conn = Connection::open(&self.path)?;
        let result = op(&conn);

        // A close failure only matters when the statement itself succeeded;
        // otherwise the statement's error is the one worth reporting.
        if let Err((_, err)) = conn.close() {
            if result.is_ok() {
                return Err(err.into());
            }
        }
        result
    }
}

fn stored_version(conn: &Connection) -> StoreResult<u32> {
    Ok(conn.query_row("PRAGMA user_version", [], |row| row.get(0))?)
}

fn create_table(conn: &Connection) -> StoreResult<()> {
    conn.execute(
        &format!(
            "CREATE TABLE IF NOT EXISTS {TABLE_NAME} (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT,
                age TEXT
            )"
        ),
        [],
    )?;
    Ok(())
}

fn recreate_table(conn: &Connection) -> StoreResult<()> {
    conn.execute(&format!("DROP TABLE IF EXISTS {TABLE_NAME}"), [])?;
    create_table(conn)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn table_names(store: &RecordStore) -> Vec<String> {
        let conn = Connection::open(store.path()).unwrap();
        let mut stmt = conn
            .prepare("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")
            .unwrap();
        stmt.query_map([], |row| row.get(0))
            .unwrap()
            .collect::<Result<Vec<String>, _>>()
            .unwrap()
    }

    #[test]
    fn open_creates_missing_directory() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a").join("b");
        let store = RecordStore::open(&nested).unwrap();
        assert!(nested.is_dir());
        assert_eq!(store.path(), nested.join(DATABASE_NAME));
    }

    #[test]
    fn ensure_schema_creates_table_and_stamps_version() {
        let dir = TempDir::new().unwrap();
        let store = RecordStore::open(dir.path()).unwrap();
        store.ensure_schema(DATABASE_VERSION).unwrap();

        assert!(table_names(&store).contains(&TABLE_NAME.to_string()));
        assert_eq!(store.schema_version().unwrap(), DATABASE_VERSION);
    }

    #[test]
    fn ensure_schema_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let store = RecordStore::open(dir.path()).unwrap();
        store.ensure_schema(DATABASE_VERSION).unwrap();
        store.create("Alice", "30").unwrap();

        store.ensure_schema(DATABASE_VERSION).unwrap();
        store.ensure_schema(DATABASE_VERSION).unwrap();

        assert_eq!(store.read_all().unwrap().len(), 1);
    }

    #[test]
    fn version_bump_discards_rows() {
        let dir = TempDir::new().unwrap();
        let store = RecordStore::open(dir.path()).unwrap();
        store.ensure_schema(1).unwrap();
        store.create("Alice", "30").unwrap();
        store.create("Bob", "41").unwrap();

        store.ensure_schema(2).unwrap();

        assert!(store.read_all().unwrap().is_empty());
        assert_eq!(store.schema_version().unwrap(), 2);
    }

    #[test]
    fn operations_fail_with_storage_fault_when_file_is_unreachable() {
        let dir = TempDir::new().unwrap();
        let store = RecordStore::at_path(dir.path().join("missing").join(DATABASE_NAME));

        let err = store.ensure_schema(DATABASE_VERSION).unwrap_err();
        assert!(matches!(err, crate::error::StoreError::StorageFault(_)));
    }
}
