//! Binary entry point that glues the SQLite-backed record store to the TUI:
//! resolve paths, start logging, bootstrap the schema, take the first
//! snapshot, and drive the Ratatui event loop until the user exits.
use name_record_manager::age::RandomAge;
use name_record_manager::config::AppConfig;
use name_record_manager::logging::init_tracing;
use name_record_manager::{run_app, App, RecordStore, DATABASE_VERSION};
use tracing::info;

/// Returning a `Result` bubbles fatal problems (an unwritable data directory,
/// a storage fault mid-session) to the terminal after the UI has been torn
/// down.
fn main() -> anyhow::Result<()> {
    let config = AppConfig::resolve()?;
    init_tracing(&config.log_path())?;

    let store = RecordStore::open(config.data_dir())?;
    store.ensure_schema(DATABASE_VERSION)?;
    info!(path = %store.path().display(), "record store ready");

    let mut app = App::load(store, Box::new(RandomAge))?;
    run_app(&mut app)
}
