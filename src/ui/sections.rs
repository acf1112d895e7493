/// The four stacked panels of the main screen, in display order.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Section {
    Create,
    Read,
    Update,
    Delete,
}

impl Section {
    pub(crate) fn title(self) -> &'static str {
        match self {
            Section::Create => "Add data to SQL Lite Database",
            Section::Read => "Read data from SQL Lite Database",
            Section::Update => "Update data in SQL Lite Database",
            Section::Delete => "Delete data from SQL Lite Database",
        }
    }

    /// Tab order wraps around at both ends.
    pub(crate) fn next(self) -> Self {
        match self {
            Section::Create => Section::Read,
            Section::Read => Section::Update,
            Section::Update => Section::Delete,
            Section::Delete => Section::Create,
        }
    }

    pub(crate) fn previous(self) -> Self {
        match self {
            Section::Create => Section::Delete,
            Section::Read => Section::Create,
            Section::Update => Section::Read,
            Section::Delete => Section::Update,
        }
    }
}

/// Cursor over the snapshot rows in the update and delete sections.
#[derive(Default, Clone, Copy, Debug)]
pub(crate) struct RowSelection {
    pub(crate) selected: usize,
}

impl RowSelection {
    /// Move by `offset`, clamping to the first and last row.
    pub(crate) fn move_selection(&mut self, offset: isize, len: usize) {
        if len == 0 {
            self.selected = 0;
            return;
        }
        let last = len as isize - 1;
        let new = (self.selected as isize + offset).clamp(0, last);
        self.selected = new as usize;
    }

    /// Keep the cursor on a valid row after the snapshot shrank.
    pub(crate) fn ensure_in_bounds(&mut self, len: usize) {
        if len == 0 {
            self.selected = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }
}
