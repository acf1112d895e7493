//! Domain model mirroring the single SQLite table. The struct stays a plain
//! data holder so the store and the UI can pass snapshots around freely.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
/// One row of the records table.
pub struct Record {
    /// Primary key assigned by the store. Edit and delete flows hand this back
    /// to the persistence layer; it is the only stable identity.
    pub id: i64,
    /// User-facing name. Duplicates are allowed.
    pub name: String,
    /// Age kept as text, exactly as the caller supplied it. `None` once an
    /// update wrote the row without an age.
    pub age: Option<String>,
}

impl fmt::Display for Record {
    /// Write the record name so the type drops straight into Ratatui widgets.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
