use rusqlite::params;
use tracing::debug;

use super::connection::{RecordStore, TABLE_NAME};
use crate::error::StoreResult;
use crate::models::Record;

impl RecordStore {
    /// Insert a new row and return the id SQLite assigned to it.
    pub fn create(&self, name: &str, age: &str) -> StoreResult<i64> {
        self.with_connection(|conn| {
            conn.execute(
                &format!("INSERT INTO {TABLE_NAME} (name, age) VALUES (?1, ?2)"),
                params![name, age],
            )?;
            let id = conn.last_insert_rowid();
            debug!(id, "record created");
            Ok(id)
        })
    }

    /// Snapshot of every row in storage order. The caller has to call this
    /// again to observe later changes.
    pub fn read_all(&self) -> StoreResult<Vec<Record>> {
        self.with_connection(|conn| {
            let mut stmt =
                conn.prepare(&format!("SELECT id, name, age FROM {TABLE_NAME} ORDER BY id"))?;

            let records = stmt
                .query_map([], |row| {
                    Ok(Record {
                        id: row.get(0)?,
                        name: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
                        age: row.get(2)?,
                    })
                })?
                .collect::<Result<Vec<_>, _>>()?;

            debug!(count = records.len(), "records fetched");
            Ok(records)
        })
    }

    /// Overwrite the name of row `id`. The age column is rewritten as well and
    /// becomes NULL when `age` is `None`.
    ///
    /// Returns the affected-row count; 0 means no row carries that id.
    pub fn update(&self, id: i64, name: &str, age: Option<&str>) -> StoreResult<usize> {
        self.with_connection(|conn| {
            let updated = conn.execute(
                &format!("UPDATE {TABLE_NAME} SET name = ?1, age = ?2 WHERE id = ?3"),
                params![name, age, id],
            )?;
            debug!(id, updated, "record updated");
            Ok(updated)
        })
    }

    /// Remove row `id`, returning how many rows went away.
    pub fn delete(&self, id: i64) -> StoreResult<usize> {
        self.with_connection(|conn| {
            let deleted = conn.execute(
                &format!("DELETE FROM {TABLE_NAME} WHERE id = ?1"),
                params![id],
            )?;
            debug!(id, deleted, "record deleted");
            Ok(deleted)
        })
    }
}
