use std::{
    io::{Stdout, Write},
    time::Duration,
};

use crossterm::{
    cursor,
    event::{self, KeyCode},
    queue,
    style::{self, Attribute, Color, Stylize},
    terminal::{self, ClearType},
};

use crate::{
    agent::Agent,
    app::Tick,
    maze::{Cell, Grid},
};

/// Blank columns between neighboring boards.
const BOARD_GAP: u16 = 2;
/// Rows above the boards: trial header and one label per board.
const HEADER_ROWS: u16 = 2;

/// Terminal cells needed to show several boards of one grid side by side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct BoardLayout {
    /// Columns from one board's left edge to the next, gap included
    board_width: u16,
    columns: u16,
    rows: u16,
}

impl BoardLayout {
    /// `None` when the boards would not fit in terminal coordinates at all.
    fn new(grid_width: u16, grid_height: u16, boards: usize) -> Option<Self> {
        let board_width = grid_width as usize * Cell::CELL_WIDTH as usize + BOARD_GAP as usize;
        let columns = boards.checked_mul(board_width)?;
        let rows = HEADER_ROWS as usize + grid_height as usize;
        Some(BoardLayout {
            board_width: u16::try_from(board_width).ok()?,
            columns: u16::try_from(columns).ok()?,
            rows: u16::try_from(rows).ok()?,
        })
    }

    fn fits(&self, term_width: u16, term_height: u16) -> bool {
        self.columns <= term_width && self.rows <= term_height
    }
}

/// Draws every agent's board side by side, one frame per tick.
pub struct Renderer {
    /// Standard output handle to write to the terminal
    stdout: Stdout,
    /// Time to wait between frames. Key presses are polled during the wait.
    tick: Duration,
}

impl Renderer {
    pub fn new(tick: Duration) -> Self {
        Self {
            stdout: std::io::stdout(),
            tick,
        }
    }

    /// Set a panic hook to restore terminal state on panic
    /// This ensures that the terminal is not left in raw mode or alternate screen on panic
    fn set_panic_hook() {
        let hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            // Ignore any errors as we are already failing
            let _ = Renderer::restore_terminal(&mut std::io::stdout());
            hook(panic_info);
        }));
    }

    /// Setup terminal in raw mode and enter alternate screen
    /// Raw mode is switched off again if entering the alternate screen fails.
    pub fn setup_terminal(&mut self) -> std::io::Result<()> {
        terminal::enable_raw_mode()?;
        Renderer::set_panic_hook();
        let stdout = &mut self.stdout;
        undo_on_err(
            || {
                queue!(
                    stdout,
                    terminal::EnterAlternateScreen,
                    terminal::Clear(ClearType::All),
                    cursor::Hide,
                    cursor::MoveTo(0, 0)
                )?;
                stdout.flush()
            },
            || {
                let _ = terminal::disable_raw_mode();
            },
        )
    }

    /// Restore terminal to original state
    /// Leave alternate screen and disable raw mode
    pub fn restore_terminal(stdout: &mut Stdout) -> std::io::Result<()> {
        queue!(stdout, terminal::LeaveAlternateScreen, cursor::Show)?;
        stdout.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Draw one frame, then wait for the tick duration.
    /// Returns [`Tick::Cancel`] if the user pressed Esc or `q` in the meantime.
    /// Waits for the user to resize the terminal while the boards do not fit.
    pub fn draw(&mut self, trial: usize, grid: &Grid, agents: &[Agent]) -> std::io::Result<Tick> {
        let layout = BoardLayout::new(grid.width(), grid.height(), agents.len());
        let mut resized = false;
        while !self.check_resize(layout)? {
            resized = true;
            if self.wait_for_tick()? == Tick::Cancel {
                return Ok(Tick::Cancel);
            }
        }
        let Some(layout) = layout else {
            return Ok(Tick::Cancel);
        };
        if resized {
            queue!(self.stdout, terminal::Clear(ClearType::All))?;
        }
        let board_width = layout.board_width;

        queue!(
            self.stdout,
            cursor::MoveTo(0, 0),
            terminal::Clear(ClearType::CurrentLine),
            style::PrintStyledContent(
                format!("Trial {} (Esc to quit)", trial + 1)
                    .with(Color::Yellow)
                    .attribute(Attribute::Bold)
            )
        )?;

        for (i, agent) in agents.iter().enumerate() {
            // i < agents.len(), so this stays within layout.columns
            let x_offset = i as u16 * board_width;
            let status = if agent.is_done() { " done" } else { "" };
            let label = format!("{}: {} steps{}", agent.kind(), agent.steps(), status);
            let label = format!("{:<width$.width$}", label, width = board_width as usize);
            queue!(
                self.stdout,
                cursor::MoveTo(x_offset, 1),
                style::PrintStyledContent(label.with(Color::Cyan))
            )?;

            let mut board = grid.clone();
            board.mark_path(agent.path());
            for y in 0..board.height() {
                queue!(self.stdout, cursor::MoveTo(x_offset, HEADER_ROWS + y))?;
                for x in 0..board.width() {
                    queue!(self.stdout, style::Print(board[(x, y)]))?;
                }
            }
        }
        self.stdout.flush()?;

        self.wait_for_tick()
    }

    /// Check if the terminal is large enough for the boards.
    /// If not, display a message asking for a resize and return Ok(false).
    fn check_resize(&mut self, layout: Option<BoardLayout>) -> std::io::Result<bool> {
        let (term_width, term_height) = terminal::size()?;
        let needed = match layout {
            Some(layout) if layout.fits(term_width, term_height) => return Ok(true),
            Some(layout) => format!("{}x{}", layout.columns, layout.rows),
            None => "beyond any terminal".to_string(),
        };
        let msg = format!(
            "Terminal size ({term_width}x{term_height}) is too small for the boards ({needed}). \
             Please resize the terminal.\r\n"
        );
        queue!(
            self.stdout,
            terminal::Clear(ClearType::All),
            cursor::MoveTo(0, 0),
            style::PrintStyledContent(msg.with(Color::Yellow).attribute(Attribute::Bold)),
            style::PrintStyledContent(
                "Press Esc to exit...\r\n"
                    .with(Color::Blue)
                    .attribute(Attribute::Bold)
            )
        )?;
        self.stdout.flush()?;
        Ok(false)
    }

    /// Sleep for one tick while watching for a quit key.
    fn wait_for_tick(&self) -> std::io::Result<Tick> {
        if !event::poll(self.tick)? {
            return Ok(Tick::Continue);
        }
        match event::read()? {
            event::Event::Key(event::KeyEvent { code, kind, .. })
                if kind == event::KeyEventKind::Press
                    && matches!(code, KeyCode::Esc | KeyCode::Char('q')) =>
            {
                tracing::debug!("[render] quit key pressed");
                Ok(Tick::Cancel)
            }
            _ => Ok(Tick::Continue),
        }
    }
}

/// Runs `f`, calling `undo` before passing on its error.
fn undo_on_err<T>(
    f: impl FnOnce() -> std::io::Result<T>,
    undo: impl FnOnce(),
) -> std::io::Result<T> {
    f().inspect_err(|_| undo())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_layout() {
        let layout = BoardLayout::new(21, 21, 4).unwrap();
        assert_eq!(layout.board_width, 44);
        assert_eq!(layout.columns, 176);
        assert_eq!(layout.rows, 23);
        assert!(layout.fits(176, 23));
        assert!(!layout.fits(175, 23));
        assert!(!layout.fits(176, 22));
    }

    #[test]
    fn test_board_layout_rejects_overflow() {
        // 10923 * 2 + 2 fits in u16 once, but not four times
        assert!(BoardLayout::new(10923, 3, 1).is_some());
        assert_eq!(BoardLayout::new(10923, 3, 4), None);
        assert_eq!(BoardLayout::new(40000, 3, 1), None);
        assert_eq!(BoardLayout::new(3, u16::MAX, 1), None);
    }

    #[test]
    fn test_undo_on_err() {
        let mut undone = false;
        let result: std::io::Result<()> =
            undo_on_err(|| Err(std::io::Error::other("no tty")), || undone = true);
        assert!(result.is_err());
        assert!(undone);

        let mut undone = false;
        assert_eq!(undo_on_err(|| Ok(3), || undone = true).unwrap(), 3);
        assert!(!undone);
    }
}
