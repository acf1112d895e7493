use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders};

use super::sections::Section;

/// Bordered block for a section, highlighted when it holds focus.
pub(crate) fn section_block(section: Section, focused: bool) -> Block<'static> {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(section.title());
    if focused {
        block.border_style(Style::default().fg(Color::Yellow))
    } else {
        block
    }
}

/// Render a bracketed button label, dimmed when the action is unavailable.
pub(crate) fn button_span(label: &str, enabled: bool) -> Span<'static> {
    let style = if enabled {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    Span::styled(format!("[ {label} ]"), style)
}

/// Key hint in the footer: `[key] action`.
pub(crate) fn key_hint(key: &str, action: &str) -> Vec<Span<'static>> {
    let key_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    vec![
        Span::styled(format!("[{key}]"), key_style),
        Span::raw(format!(" {action}   ")),
    ]
}

/// Assemble several key hints into a single line.
pub(crate) fn hint_line(hints: &[(&str, &str)]) -> Line<'static> {
    Line::from(
        hints
            .iter()
            .flat_map(|(key, action)| key_hint(key, action))
            .collect::<Vec<_>>(),
    )
}

/// First row index to draw so `selected` stays inside a window of `capacity`
/// rows over a list of `len` rows.
pub(crate) fn window_start(selected: usize, capacity: usize, len: usize) -> usize {
    if capacity == 0 || len <= capacity {
        return 0;
    }
    let start = if selected >= capacity {
        selected + 1 - capacity
    } else {
        0
    };
    start.min(len - capacity)
}

/// Column for a text cursor `offset` cells into `area`, kept on the last
/// cell of the area when the text runs past its right edge.
pub(crate) fn cursor_column(area: Rect, offset: usize) -> u16 {
    let offset = u16::try_from(offset).unwrap_or(u16::MAX);
    let last = area.right().saturating_sub(1).max(area.x);
    area.x.saturating_add(offset).min(last)
}

/// Split `len` rows over `capacity` lines. When they do not all fit, the last
/// line is given up to an "and N more" summary. Returns `(shown, hidden)`.
pub(crate) fn overflow_split(len: usize, capacity: usize) -> (usize, usize) {
    if len <= capacity {
        (len, 0)
    } else {
        let shown = capacity.saturating_sub(1);
        (shown, len - shown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_follows_selection() {
        assert_eq!(window_start(0, 3, 10), 0);
        assert_eq!(window_start(2, 3, 10), 0);
        assert_eq!(window_start(3, 3, 10), 1);
        assert_eq!(window_start(9, 3, 10), 7);
        assert_eq!(window_start(5, 10, 4), 0);
        assert_eq!(window_start(5, 0, 4), 0);
    }

    #[test]
    fn cursor_column_clamps_to_the_area() {
        let area = Rect::new(1, 1, 10, 3);
        assert_eq!(cursor_column(area, 0), 1);
        assert_eq!(cursor_column(area, 4), 5);
        assert_eq!(cursor_column(area, 9), 10);
        assert_eq!(cursor_column(area, 500), 10);
        assert_eq!(cursor_column(area, usize::MAX), 10);
        let edge = Rect::new(u16::MAX - 2, 0, 2, 1);
        assert_eq!(cursor_column(edge, 70_000), u16::MAX - 1);
    }

    #[test]
    fn overflow_reserves_a_summary_line() {
        assert_eq!(overflow_split(3, 5), (3, 0));
        assert_eq!(overflow_split(5, 5), (5, 0));
        assert_eq!(overflow_split(12, 4), (3, 9));
        assert_eq!(overflow_split(2, 0), (0, 2));
    }

    #[test]
    fn disabled_button_is_dimmed() {
        let span = button_span("Add", false);
        assert_eq!(span.content, "[ Add ]");
        assert_eq!(span.style.fg, Some(Color::DarkGray));
    }
}
