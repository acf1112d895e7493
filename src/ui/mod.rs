//! Ratatui front-end: four stacked sections (add, read, update, delete) over a
//! single snapshot of the record table.

mod app;
mod forms;
mod helpers;
mod sections;
mod terminal;

pub use app::App;
pub use terminal::run_app;
