use std::collections::HashMap;
use std::time::{Duration, Instant};

use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::models::Record;

/// How long the "Data added successfully" banner stays up before the create
/// section resets itself.
pub(crate) const CONFIRMATION_DELAY: Duration = Duration::from_secs(2);

/// State of the create section: the name being composed plus the deadline of
/// the transient confirmation.
#[derive(Default, Clone)]
pub(crate) struct CreateForm {
    pub(crate) name: String,
    confirm_until: Option<Instant>,
}

impl CreateForm {
    /// Append a character, ignoring control input.
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        self.name.push(ch);
        true
    }

    pub(crate) fn backspace(&mut self) {
        self.name.pop();
    }

    /// The add button is disabled while the input is empty.
    pub(crate) fn can_submit(&self) -> bool {
        !self.name.is_empty()
    }

    /// Show the confirmation. A confirmation already on screen keeps its
    /// original deadline.
    pub(crate) fn mark_added(&mut self, now: Instant) {
        if self.confirm_until.is_none() {
            self.confirm_until = Some(now + CONFIRMATION_DELAY);
        }
    }

    pub(crate) fn confirmation_visible(&self) -> bool {
        self.confirm_until.is_some()
    }

    /// Hide the confirmation and clear the input once the deadline passed.
    /// Returns `true` when the form was reset.
    pub(crate) fn tick(&mut self, now: Instant) -> bool {
        match self.confirm_until {
            Some(deadline) if now >= deadline => {
                self.confirm_until = None;
                self.name.clear();
                true
            }
            _ => false,
        }
    }

    /// Render the input line with a placeholder when empty.
    pub(crate) fn build_line(&self, focused: bool) -> Line<'static> {
        let (display, style) = if self.name.is_empty() {
            ("<name>".to_string(), Style::default().fg(Color::DarkGray))
        } else if focused {
            (self.name.clone(), Style::default().fg(Color::Yellow))
        } else {
            (self.name.clone(), Style::default())
        };

        Line::from(vec![Span::raw(INPUT_PREFIX), Span::styled(display, style)])
    }

    pub(crate) fn value_len(&self) -> usize {
        self.name.chars().count()
    }
}

/// Prefix drawn before every editable field.
pub(crate) const INPUT_PREFIX: &str = "> ";

/// Inline edit drafts for the update section, keyed by record id. A row is in
/// edit mode exactly when it owns a draft.
#[derive(Default, Clone)]
pub(crate) struct EditDrafts {
    drafts: HashMap<i64, String>,
}

impl EditDrafts {
    /// Enter edit mode for `record`, seeding the draft with its current name.
    pub(crate) fn begin(&mut self, record: &Record) {
        self.drafts
            .entry(record.id)
            .or_insert_with(|| record.name.clone());
    }

    pub(crate) fn is_editing(&self, id: i64) -> bool {
        self.drafts.contains_key(&id)
    }

    pub(crate) fn draft(&self, id: i64) -> Option<&str> {
        self.drafts.get(&id).map(String::as_str)
    }

    pub(crate) fn push_char(&mut self, id: i64, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        match self.drafts.get_mut(&id) {
            Some(draft) => {
                draft.push(ch);
                true
            }
            None => false,
        }
    }

    pub(crate) fn backspace(&mut self, id: i64) {
        if let Some(draft) = self.drafts.get_mut(&id) {
            draft.pop();
        }
    }

    /// Leave edit mode and hand back the edited text.
    pub(crate) fn take(&mut self, id: i64) -> Option<String> {
        self.drafts.remove(&id)
    }

    /// Leave edit mode, reverting to the stored value.
    pub(crate) fn cancel(&mut self, id: i64) {
        self.drafts.remove(&id);
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.drafts.is_empty()
    }

    /// Leave edit mode on every row.
    pub(crate) fn clear(&mut self) {
        self.drafts.clear();
    }

    /// Drop drafts whose rows vanished from the latest snapshot.
    pub(crate) fn retain_existing(&mut self, records: &[Record]) {
        self.drafts
            .retain(|id, _| records.iter().any(|record| record.id == *id));
    }
}
