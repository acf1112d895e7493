//! Core library surface for the Name Record Manager TUI application.
//!
//! The public modules expose a small API: the `bin` target wires them
//! together, and the integration tests drive the record store directly.
pub mod age;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod models;
pub mod ui;

/// Persistence layer: the record store and its fixed schema constants.
pub use db::{RecordStore, DATABASE_NAME, DATABASE_VERSION, TABLE_NAME};

pub use error::{StoreError, StoreResult};
pub use models::Record;

/// The interactive application entry point and state container.
pub use ui::{run_app, App};
