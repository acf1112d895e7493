use std::io::{self, Stdout};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::error;

use super::app::App;

/// How long to wait for input before redrawing. Also bounds how late the add
/// confirmation can disappear.
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Spin up the terminal backend, enter the draw loop, and keep processing input
/// until the user quits or a storage fault aborts the loop. The terminal is
/// restored in both cases before the result is returned.
pub fn run_app(app: &mut App) -> Result<()> {
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut terminal = restore_on_error(setup_terminal(), || {
        execute!(io::stdout(), LeaveAlternateScreen)
            .context("failed to leave alternate screen")?;
        disable_raw_mode().context("failed to disable raw mode")
    })?;

    let result = event_loop(&mut terminal, app);
    if let Err(err) = &result {
        error!("event loop aborted: {err:#}");
    }

    cleanup_terminal(&mut terminal)?;
    result
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend).context("failed to create terminal backend")
}

/// Run `restore` when `result` failed. The original error wins over any
/// failure of `restore` itself.
fn restore_on_error<T>(result: Result<T>, restore: impl FnOnce() -> Result<()>) -> Result<T> {
    if result.is_err() {
        if let Err(err) = restore() {
            error!("terminal restore failed: {err:#}");
        }
    }
    result
}

fn event_loop(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        app.tick(Instant::now());
        terminal
            .draw(|frame| app.draw(frame))
            .context("failed to draw frame")?;

        if !event::poll(POLL_INTERVAL).context("event polling failed")? {
            continue;
        }
        let Event::Key(key_event) = event::read().context("failed to read event")? else {
            continue;
        };
        if key_event.kind != KeyEventKind::Press {
            continue;
        }

        if key_event.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key_event.code, KeyCode::Char('c') | KeyCode::Char('q'))
        {
            return Ok(());
        }

        if app.handle_key(key_event.code)? {
            return Ok(());
        }
    }
}

fn cleanup_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode().context("failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;
    terminal
        .show_cursor()
        .context("failed to restore cursor visibility")
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use anyhow::anyhow;

    use super::*;

    #[test]
    fn restore_runs_only_on_failure() {
        let restored = Cell::new(false);
        let value = restore_on_error(Ok(7), || {
            restored.set(true);
            Ok(())
        })
        .unwrap();
        assert_eq!(value, 7);
        assert!(!restored.get());

        let err = restore_on_error::<()>(Err(anyhow!("no alternate screen")), || {
            restored.set(true);
            Err(anyhow!("restore failed"))
        })
        .unwrap_err();
        assert!(restored.get());
        assert_eq!(err.to_string(), "no alternate screen");
    }
}
