//! Persistence module split across logical submodules.

mod connection;
mod records;

pub use connection::{RecordStore, DATABASE_NAME, DATABASE_VERSION, TABLE_NAME};
