use std::time::Instant;

use anyhow::{Context, Result};
use crossterm::event::KeyCode;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;
use tracing::{debug, info};

use crate::age::AgeSource;
use crate::db::RecordStore;
use crate::models::Record;

use super::forms::{CreateForm, EditDrafts, INPUT_PREFIX};
use super::helpers::{
    button_span, cursor_column, hint_line, overflow_split, section_block, window_start,
};
use super::sections::{RowSelection, Section};

/// Heading drawn above the four sections.
const APP_TITLE: &str = "Sql Lite Database Project";
/// Placeholder shown by the read section when the snapshot is empty.
const EMPTY_MESSAGE: &str = "No data to render";
/// Transient confirmation shown after a successful add.
const ADDED_MESSAGE: &str = "Data added successfully";
/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;
/// Borders plus the input, button and confirmation lines.
const CREATE_HEIGHT: u16 = 5;
/// Marker drawn in front of the selected row.
const SELECTED_MARKER: &str = "▶ ";
const UNSELECTED_MARKER: &str = "  ";

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

/// Severity levels shown in the footer.
enum StatusKind {
    Info,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Central application state shared across the TUI.
///
/// The app keeps one snapshot of the table. Every add, edit and delete goes
/// straight to the store and is followed by a full re-read that replaces the
/// snapshot; nothing is patched in place.
pub struct App {
    store: RecordStore,
    ages: Box<dyn AgeSource>,
    records: Vec<Record>,
    focus: Section,
    create: CreateForm,
    show_records: bool,
    drafts: EditDrafts,
    update_cursor: RowSelection,
    delete_cursor: RowSelection,
    status: Option<StatusMessage>,
}

impl App {
    /// Build an app with an empty snapshot.
    pub fn new(store: RecordStore, ages: Box<dyn AgeSource>) -> Self {
        Self {
            store,
            ages,
            records: Vec::new(),
            focus: Section::Create,
            create: CreateForm::default(),
            show_records: false,
            drafts: EditDrafts::default(),
            update_cursor: RowSelection::default(),
            delete_cursor: RowSelection::default(),
            status: None,
        }
    }

    /// Build the app and take the initial snapshot.
    pub fn load(store: RecordStore, ages: Box<dyn AgeSource>) -> Result<Self> {
        let mut app = Self::new(store, ages);
        app.refresh()?;
        Ok(app)
    }

    /// The last snapshot read from the store.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Dispatch a key press. Returns `true` when the user asked to quit.
    ///
    /// Storage faults are not caught here; they bubble up to the event loop.
    pub fn handle_key(&mut self, code: KeyCode) -> Result<bool> {
        match code {
            KeyCode::Tab => {
                self.focus = self.focus.next();
                return Ok(false);
            }
            KeyCode::BackTab => {
                self.focus = self.focus.previous();
                return Ok(false);
            }
            _ => {}
        }

        match self.focus {
            Section::Create => self.handle_create_key(code),
            Section::Read => self.handle_read_key(code),
            Section::Update => self.handle_update_key(code),
            Section::Delete => self.handle_delete_key(code),
        }
    }

    /// Advance timed UI state. Called once per event-loop iteration.
    pub fn tick(&mut self, now: Instant) {
        if self.create.tick(now) {
            debug!("add confirmation expired");
        }
    }

    fn handle_create_key(&mut self, code: KeyCode) -> Result<bool> {
        match code {
            KeyCode::Enter => {
                if self.create.can_submit() {
                    self.submit_new_record()?;
                }
            }
            KeyCode::Esc => self.create.name.clear(),
            KeyCode::Backspace => self.create.backspace(),
            KeyCode::Char(ch) => {
                self.create.push_char(ch);
            }
            _ => {}
        }
        Ok(false)
    }

    fn handle_read_key(&mut self, code: KeyCode) -> Result<bool> {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return Ok(true),
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.show_records = !self.show_records;
                if self.show_records {
                    self.refresh()?;
                }
            }
            _ => {}
        }
        Ok(false)
    }

    fn handle_update_key(&mut self, code: KeyCode) -> Result<bool> {
        let current = self.records.get(self.update_cursor.selected).cloned();
        let len = self.records.len();

        if let Some(record) = current.as_ref().filter(|r| self.drafts.is_editing(r.id)) {
            let id = record.id;
            match code {
                KeyCode::Enter => self.confirm_edit(id)?,
                KeyCode::Esc => {
                    self.drafts.cancel(id);
                    self.set_status("Edit cancelled.", StatusKind::Info);
                }
                KeyCode::Backspace => self.drafts.backspace(id),
                KeyCode::Char(ch) => {
                    self.drafts.push_char(id, ch);
                }
                // The cursor stays on the row being edited until it is saved
                // or cancelled.
                _ => {}
            }
            return Ok(false);
        }

        // Drafts can outlive their row's position when a delete shifts the
        // snapshot; Esc and q close them instead of quitting.
        if !self.drafts.is_empty() && matches!(code, KeyCode::Char('q') | KeyCode::Esc) {
            self.drafts.clear();
            self.set_status("Edit cancelled.", StatusKind::Info);
            return Ok(false);
        }

        match code {
            KeyCode::Char('q') | KeyCode::Esc => return Ok(true),
            KeyCode::Up => self.update_cursor.move_selection(-1, len),
            KeyCode::Down => self.update_cursor.move_selection(1, len),
            KeyCode::Enter | KeyCode::Char('e') | KeyCode::Char('E') => {
                if let Some(record) = current {
                    self.clear_status();
                    self.drafts.begin(&record);
                }
            }
            _ => {}
        }
        Ok(false)
    }

    fn handle_delete_key(&mut self, code: KeyCode) -> Result<bool> {
        let len = self.records.len();
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return Ok(true),
            KeyCode::Up => self.delete_cursor.move_selection(-1, len),
            KeyCode::Down => self.delete_cursor.move_selection(1, len),
            KeyCode::Enter | KeyCode::Delete | KeyCode::Char('d') | KeyCode::Char('D') => {
                if let Some(record) = self.records.get(self.delete_cursor.selected).cloned() {
                    self.delete_record(&record)?;
                }
            }
            _ => {}
        }
        Ok(false)
    }

    fn submit_new_record(&mut self) -> Result<()> {
        let age = self.ages.next_age();
        let id = self
            .store
            .create(&self.create.name, &age)
            .context("failed to add record")?;
        info!(id, "record added");
        self.create.mark_added(Instant::now());
        self.refresh()
    }

    fn confirm_edit(&mut self, id: i64) -> Result<()> {
        if self.drafts.draft(id).map_or(true, |draft| draft.is_empty()) {
            self.set_status("Name cannot be empty.", StatusKind::Error);
            return Ok(());
        }
        let Some(name) = self.drafts.take(id) else {
            return Ok(());
        };

        // A zero count means the row vanished meanwhile; the re-read below
        // settles the display either way.
        let updated = self
            .store
            .update(id, &name, None)
            .context("failed to update record")?;
        info!(id, updated, "record renamed");
        self.set_status("Record updated.", StatusKind::Info);
        self.refresh()
    }

    fn delete_record(&mut self, record: &Record) -> Result<()> {
        let deleted = self
            .store
            .delete(record.id)
            .context("failed to delete record")?;
        info!(id = record.id, deleted, "record deleted");
        self.set_status(format!("Deleted {}.", record.name), StatusKind::Info);
        self.refresh()
    }

    /// Replace the snapshot with a fresh read of the whole table.
    fn refresh(&mut self) -> Result<()> {
        self.records = self.store.read_all().context("failed to load records")?;
        self.drafts.retain_existing(&self.records);
        self.update_cursor.ensure_in_bounds(self.records.len());
        self.delete_cursor.ensure_in_bounds(self.records.len());
        Ok(())
    }

    fn set_status<S: Into<String>>(&mut self, text: S, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    fn clear_status(&mut self) {
        self.status = None;
    }

    fn editing_selected_row(&self) -> bool {
        self.records
            .get(self.update_cursor.selected)
            .is_some_and(|record| self.drafts.is_editing(record.id))
    }

    pub(crate) fn draw(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(CREATE_HEIGHT),
                Constraint::Fill(1),
                Constraint::Fill(1),
                Constraint::Fill(1),
                Constraint::Length(FOOTER_HEIGHT),
            ])
            .split(frame.area());

        let title = Paragraph::new(Span::styled(
            APP_TITLE,
            Style::default().add_modifier(Modifier::BOLD),
        ));
        frame.render_widget(title, chunks[0]);

        self.draw_create(frame, chunks[1]);
        self.draw_read(frame, chunks[2]);
        self.draw_update(frame, chunks[3]);
        self.draw_delete(frame, chunks[4]);
        self.draw_footer(frame, chunks[5]);
    }

    fn draw_create(&self, frame: &mut Frame, area: Rect) {
        let focused = self.focus == Section::Create;
        let block = section_block(Section::Create, focused);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut lines = vec![
            self.create.build_line(focused),
            Line::from(button_span("Add", self.create.can_submit())),
        ];
        if self.create.confirmation_visible() {
            lines.push(
                Line::from(Span::styled(
                    ADDED_MESSAGE,
                    Style::default().fg(Color::Green),
                ))
                .centered(),
            );
        }
        frame.render_widget(Paragraph::new(lines), inner);

        if focused && inner.height > 0 {
            let offset = INPUT_PREFIX.len() + self.create.value_len();
            frame.set_cursor_position((cursor_column(inner, offset), inner.y));
        }
    }

    fn draw_read(&self, frame: &mut Frame, area: Rect) {
        let block = section_block(Section::Read, self.focus == Section::Read);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let label = if self.show_records {
            "Hide Data"
        } else {
            "Fetch Data"
        };
        let mut lines = vec![Line::from(button_span(label, true))];
        if self.show_records {
            if self.records.is_empty() {
                lines.push(empty_line());
            } else {
                let capacity = (inner.height as usize).saturating_sub(lines.len());
                let (shown, hidden) = overflow_split(self.records.len(), capacity);
                lines.extend(
                    self.records
                        .iter()
                        .take(shown)
                        .map(|record| Line::from(format!("{UNSELECTED_MARKER}{record}"))),
                );
                if hidden > 0 {
                    lines.push(Line::from(Span::styled(
                        format!("{UNSELECTED_MARKER}… and {hidden} more"),
                        Style::default().fg(Color::DarkGray),
                    )));
                }
            }
        }
        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn draw_update(&self, frame: &mut Frame, area: Rect) {
        let focused = self.focus == Section::Update;
        let block = section_block(Section::Update, focused);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if self.records.is_empty() {
            return;
        }

        let selected = self.update_cursor.selected;
        let capacity = inner.height as usize;
        let start = window_start(selected, capacity, self.records.len());
        let hint_style = Style::default().fg(Color::DarkGray);

        let lines: Vec<Line> = self
            .records
            .iter()
            .enumerate()
            .skip(start)
            .take(capacity)
            .map(|(idx, record)| {
                let marker = row_marker(focused && idx == selected);
                match self.drafts.draft(record.id) {
                    Some(draft) => Line::from(vec![
                        Span::raw(marker),
                        Span::styled(draft.to_string(), Style::default().fg(Color::Yellow)),
                        Span::styled("  [Enter] save  [Esc] cancel", hint_style),
                    ]),
                    None => Line::from(vec![
                        Span::raw(marker),
                        Span::raw(record.name.clone()),
                        Span::styled("  [e] edit", hint_style),
                    ]),
                }
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), inner);

        if focused && self.editing_selected_row() && capacity > 0 {
            let id = self.records[selected].id;
            let draft_len = self
                .drafts
                .draft(id)
                .map_or(0, |draft| draft.chars().count());
            let offset = SELECTED_MARKER.chars().count() + draft_len;
            let cursor_y = inner.y + (selected - start) as u16;
            frame.set_cursor_position((cursor_column(inner, offset), cursor_y));
        }
    }

    fn draw_delete(&self, frame: &mut Frame, area: Rect) {
        let focused = self.focus == Section::Delete;
        let block = section_block(Section::Delete, focused);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if self.records.is_empty() {
            return;
        }

        let selected = self.delete_cursor.selected;
        let capacity = inner.height as usize;
        let start = window_start(selected, capacity, self.records.len());

        let lines: Vec<Line> = self
            .records
            .iter()
            .enumerate()
            .skip(start)
            .take(capacity)
            .map(|(idx, record)| {
                Line::from(vec![
                    Span::raw(row_marker(focused && idx == selected)),
                    Span::raw(record.name.clone()),
                    Span::styled("  [d] delete", Style::default().fg(Color::Red)),
                ])
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.kind.style())])
        } else {
            Line::from("")
        };

        let paragraph = Paragraph::new(vec![status_line, self.footer_instructions()])
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn footer_instructions(&self) -> Line<'static> {
        match self.focus {
            Section::Create => hint_line(&[
                ("Enter", "Add"),
                ("Esc", "Clear"),
                ("Tab", "Next section"),
                ("Ctrl+C", "Quit"),
            ]),
            Section::Read => hint_line(&[
                ("Enter", "Fetch/Hide"),
                ("Tab", "Next section"),
                ("q", "Quit"),
            ]),
            Section::Update if self.editing_selected_row() => hint_line(&[
                ("Enter", "Save"),
                ("Esc", "Cancel"),
                ("↑↓", "Navigate"),
            ]),
            Section::Update => hint_line(&[
                ("↑↓", "Navigate"),
                ("e", "Edit"),
                ("Tab", "Next section"),
                ("q", "Quit"),
            ]),
            Section::Delete => hint_line(&[
                ("↑↓", "Navigate"),
                ("d", "Delete"),
                ("Tab", "Next section"),
                ("q", "Quit"),
            ]),
        }
    }
}

fn row_marker(selected: bool) -> &'static str {
    if selected {
        SELECTED_MARKER
    } else {
        UNSELECTED_MARKER
    }
}

fn empty_line() -> Line<'static> {
    Line::from(Span::styled(
        EMPTY_MESSAGE,
        Style::default().fg(Color::DarkGray),
    ))
    .centered()
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use tempfile::TempDir;

    use super::*;
    use crate::age::FixedAge;
    use crate::db::DATABASE_VERSION;

    fn store_in(dir: &TempDir) -> RecordStore {
        let store = RecordStore::open(dir.path()).unwrap();
        store.ensure_schema(DATABASE_VERSION).unwrap();
        store
    }

    fn app_with(store: &RecordStore) -> App {
        App::load(store.clone(), Box::new(FixedAge("30".to_string()))).unwrap()
    }

    fn press_all(app: &mut App, keys: &[KeyCode]) {
        for key in keys {
            assert!(!app.handle_key(*key).unwrap());
        }
    }

    fn type_text(app: &mut App, text: &str) {
        for ch in text.chars() {
            app.handle_key(KeyCode::Char(ch)).unwrap();
        }
    }

    fn focus(app: &mut App, section: Section) {
        while app.focus != section {
            app.handle_key(KeyCode::Tab).unwrap();
        }
    }

    fn screen_text(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        terminal.draw(|frame| app.draw(frame)).unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn load_takes_initial_snapshot() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.create("Alice", "30").unwrap();

        let app = app_with(&store);
        assert_eq!(app.records().len(), 1);
    }

    #[test]
    fn enter_on_empty_input_does_nothing() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let mut app = app_with(&store);

        press_all(&mut app, &[KeyCode::Enter]);

        assert!(store.read_all().unwrap().is_empty());
        assert!(!app.create.confirmation_visible());
    }

    #[test]
    fn adding_refreshes_snapshot_and_resets_after_delay() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let mut app = app_with(&store);

        type_text(&mut app, "Alice");
        press_all(&mut app, &[KeyCode::Enter]);

        let stored = store.read_all().unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].name, "Alice");
        assert_eq!(stored[0].age.as_deref(), Some("30"));
        assert_eq!(app.records(), stored.as_slice());
        assert!(app.create.confirmation_visible());
        assert!(screen_text(&app).contains(ADDED_MESSAGE));

        app.tick(Instant::now());
        assert_eq!(app.create.name, "Alice");

        app.tick(Instant::now() + Duration::from_secs(3));
        assert!(!app.create.confirmation_visible());
        assert!(app.create.name.is_empty());
    }

    #[test]
    fn typing_q_in_create_does_not_quit() {
        let dir = TempDir::new().unwrap();
        let mut app = app_with(&store_in(&dir));
        assert!(!app.handle_key(KeyCode::Char('q')).unwrap());
        assert_eq!(app.create.name, "q");
    }

    #[test]
    fn read_toggle_fetches_on_reveal() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let mut app = app_with(&store);
        focus(&mut app, Section::Read);

        store.create("Bob", "41").unwrap();
        assert!(app.records().is_empty());

        press_all(&mut app, &[KeyCode::Enter]);
        assert!(app.show_records);
        assert_eq!(app.records().len(), 1);
        let text = screen_text(&app);
        assert!(text.contains("Hide Data"));
        assert!(text.contains("Bob"));

        press_all(&mut app, &[KeyCode::Enter]);
        assert!(!app.show_records);
        assert!(screen_text(&app).contains("Fetch Data"));
    }

    #[test]
    fn read_section_reports_empty_table() {
        let dir = TempDir::new().unwrap();
        let mut app = app_with(&store_in(&dir));
        focus(&mut app, Section::Read);
        assert!(!screen_text(&app).contains(EMPTY_MESSAGE));

        press_all(&mut app, &[KeyCode::Char(' ')]);
        assert_eq!(screen_text(&app).matches(EMPTY_MESSAGE).count(), 1);
    }

    #[test]
    fn confirming_an_edit_renames_the_row() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.create("Alice", "30").unwrap();
        let id = store.create("Bob", "41").unwrap();
        let mut app = app_with(&store);
        focus(&mut app, Section::Update);

        press_all(
            &mut app,
            &[KeyCode::Down, KeyCode::Char('e'), KeyCode::Backspace],
        );
        type_text(&mut app, "by");
        assert!(app.drafts.is_editing(id));
        press_all(&mut app, &[KeyCode::Enter]);

        assert!(!app.drafts.is_editing(id));
        let stored = store.read_all().unwrap();
        assert_eq!(stored[1].name, "Boby");
        assert_eq!(stored[1].age, None);
        assert_eq!(app.records()[1].name, "Boby");
        assert_eq!(stored[0].name, "Alice");
    }

    #[test]
    fn cancelling_an_edit_leaves_the_store_alone() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let id = store.create("Alice", "30").unwrap();
        let mut app = app_with(&store);
        focus(&mut app, Section::Update);

        press_all(&mut app, &[KeyCode::Char('e')]);
        type_text(&mut app, "xyz");
        press_all(&mut app, &[KeyCode::Esc]);

        assert!(!app.drafts.is_editing(id));
        let stored = store.read_all().unwrap();
        assert_eq!(stored[0].name, "Alice");
        assert_eq!(stored[0].age.as_deref(), Some("30"));
    }

    #[test]
    fn empty_edit_stays_open() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let id = store.create("Al", "30").unwrap();
        let mut app = app_with(&store);
        focus(&mut app, Section::Update);

        press_all(
            &mut app,
            &[
                KeyCode::Char('e'),
                KeyCode::Backspace,
                KeyCode::Backspace,
                KeyCode::Enter,
            ],
        );

        assert!(app.drafts.is_editing(id));
        assert_eq!(store.read_all().unwrap()[0].name, "Al");
    }

    #[test]
    fn arrows_do_not_leave_a_row_in_edit_mode() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let alice = store.create("Alice", "30").unwrap();
        store.create("Bob", "41").unwrap();
        let mut app = app_with(&store);
        focus(&mut app, Section::Update);

        press_all(&mut app, &[KeyCode::Char('e')]);
        type_text(&mut app, "XX");
        press_all(&mut app, &[KeyCode::Down]);
        assert_eq!(app.update_cursor.selected, 0);

        assert!(!app.handle_key(KeyCode::Esc).unwrap());
        assert!(!app.drafts.is_editing(alice));
        assert_eq!(store.read_all().unwrap()[0].name, "Alice");
    }

    #[test]
    fn esc_closes_a_draft_stranded_by_a_delete() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.create("Alice", "30").unwrap();
        let bob = store.create("Bob", "41").unwrap();
        store.create("Carol", "25").unwrap();
        let mut app = app_with(&store);

        focus(&mut app, Section::Update);
        press_all(&mut app, &[KeyCode::Down, KeyCode::Char('e')]);
        focus(&mut app, Section::Delete);
        press_all(&mut app, &[KeyCode::Char('d')]);

        // Alice is gone, so the update cursor now sits on Carol while Bob's
        // draft is still open.
        focus(&mut app, Section::Update);
        assert!(app.drafts.is_editing(bob));
        assert!(!app.editing_selected_row());

        assert!(!app.handle_key(KeyCode::Esc).unwrap());
        assert!(!app.drafts.is_editing(bob));
        assert!(app.handle_key(KeyCode::Esc).unwrap());
    }

    #[test]
    fn read_section_summarises_rows_that_do_not_fit() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        for idx in 0..12 {
            store.create(&format!("Name{idx:02}"), "30").unwrap();
        }
        let mut app = app_with(&store);
        focus(&mut app, Section::Read);
        press_all(&mut app, &[KeyCode::Enter]);

        // 30 rows leave 7 for the read panel: borders, the button, 3 names
        // and the overflow line. Update and delete each window 5 names.
        let text = screen_text(&app);
        assert_eq!(text.matches("Name02").count(), 3);
        assert_eq!(text.matches("Name03").count(), 2);
        assert!(text.contains("… and 9 more"));
    }

    #[test]
    fn long_input_keeps_the_cursor_inside_the_panel() {
        let dir = TempDir::new().unwrap();
        let mut app = app_with(&store_in(&dir));
        type_text(&mut app, &"x".repeat(300));

        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        terminal.draw(|frame| app.draw(frame)).unwrap();
        let position = terminal.get_cursor_position().unwrap();
        assert_eq!(position.x, 78);
    }

    #[test]
    fn delete_removes_selected_row() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.create("Alice", "30").unwrap();
        let bob = store.create("Bob", "41").unwrap();
        let mut app = app_with(&store);
        focus(&mut app, Section::Delete);

        press_all(&mut app, &[KeyCode::Down, KeyCode::Char('d')]);

        let stored = store.read_all().unwrap();
        assert_eq!(stored.len(), 1);
        assert!(stored.iter().all(|record| record.id != bob));
        assert_eq!(app.records().len(), 1);
        assert_eq!(app.delete_cursor.selected, 0);
    }

    #[test]
    fn deleting_a_row_drops_its_draft() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let id = store.create("Alice", "30").unwrap();
        let mut app = app_with(&store);

        focus(&mut app, Section::Update);
        press_all(&mut app, &[KeyCode::Char('e')]);
        focus(&mut app, Section::Delete);
        press_all(&mut app, &[KeyCode::Delete]);

        assert!(!app.drafts.is_editing(id));
        assert!(app.records().is_empty());
    }

    #[test]
    fn quit_keys_outside_text_input() {
        let dir = TempDir::new().unwrap();
        let mut app = app_with(&store_in(&dir));
        focus(&mut app, Section::Read);
        assert!(app.handle_key(KeyCode::Char('q')).unwrap());
        focus(&mut app, Section::Delete);
        assert!(app.handle_key(KeyCode::Esc).unwrap());
    }

    #[test]
    fn storage_fault_propagates() {
        let dir = TempDir::new().unwrap();
        let store = RecordStore::at_path(dir.path().join("missing").join("db"));
        let mut app = App::new(store, Box::new(FixedAge("30".to_string())));

        type_text(&mut app, "Alice");
        assert!(app.handle_key(KeyCode::Enter).is_err());
    }
}
