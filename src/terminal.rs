//! Terminal abstraction using crossterm

use std::io::{self, Write};

use crossterm::{
    cursor,
    event::{self, Event, KeyEvent},
    execute, queue,
    style::{self as term_style, Attribute, Print, SetAttribute, SetForegroundColor},
    terminal::{self, ClearType},
};

use crate::error::Result;
use crate::syntax::{Color, Style};

/// Terminal wrapper for cross-platform terminal I/O
pub struct Terminal {
    /// Terminal width in columns
    cols: u16,
    /// Terminal height in rows
    rows: u16,
}

impl Terminal {
    /// Create a new terminal instance and enter raw mode
    pub fn new() -> Result<Self> {
        terminal::enable_raw_mode()?;
        let (cols, rows) = terminal::size()?;

        let mut term = Self { cols, rows };
        execute!(io::stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;
        term.clear_screen()?;
        term.flush()?;

        Ok(term)
    }

    pub fn cols(&self) -> u16 {
        self.cols
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    pub fn clear_screen(&mut self) -> Result<()> {
        queue!(io::stdout(), terminal::Clear(ClearType::All))?;
        Ok(())
    }

    /// Clear from cursor to end of line
    pub fn clear_to_eol(&mut self) -> Result<()> {
        queue!(io::stdout(), terminal::Clear(ClearType::UntilNewLine))?;
        Ok(())
    }

    /// Move cursor to position (0-indexed)
    pub fn move_cursor(&mut self, row: u16, col: u16) -> Result<()> {
        queue!(io::stdout(), cursor::MoveTo(col, row))?;
        Ok(())
    }

    /// Write a string at current cursor position
    pub fn write_str(&mut self, s: &str) -> Result<()> {
        queue!(io::stdout(), Print(s))?;
        Ok(())
    }

    /// Flush output buffer to terminal
    pub fn flush(&mut self) -> Result<()> {
        io::stdout().flush()?;
        Ok(())
    }

    pub fn set_cursor_visible(&mut self, visible: bool) -> Result<()> {
        if visible {
            queue!(io::stdout(), cursor::Show)?;
        } else {
            queue!(io::stdout(), cursor::Hide)?;
        }
        Ok(())
    }

    /// Read a key event (blocking)
    ///
    /// Resize events update the cached size and return None so the caller
    /// can redraw.
    pub fn read_key(&mut self) -> Result<Option<KeyEvent>> {
        loop {
            match event::read()? {
                Event::Key(key_event) => return Ok(Some(key_event)),
                Event::Resize(cols, rows) => {
                    self.cols = cols;
                    self.rows = rows;
                    return Ok(None);
                }
                _ => {
                    // Ignore other events (mouse, focus, paste)
                }
            }
        }
    }

    /// Set reverse video mode
    pub fn set_reverse(&mut self, enabled: bool) -> Result<()> {
        let attr = if enabled { Attribute::Reverse } else { Attribute::NoReverse };
        queue!(io::stdout(), SetAttribute(attr))?;
        Ok(())
    }

    /// Set dim/faint mode (for line numbers, inactive tabs)
    pub fn set_dim(&mut self, enabled: bool) -> Result<()> {
        let attr = if enabled { Attribute::Dim } else { Attribute::NormalIntensity };
        queue!(io::stdout(), SetAttribute(attr))?;
        Ok(())
    }

    /// Apply a highlight style; undo with `reset_attributes`
    pub fn apply_style(&mut self, style: &Style) -> Result<()> {
        if style.is_default() {
            return Ok(());
        }
        let mut out = io::stdout();
        if let Some(color) = style.fg {
            queue!(out, SetForegroundColor(to_crossterm_color(color)))?;
        }
        if style.bold {
            queue!(out, SetAttribute(Attribute::Bold))?;
        }
        if style.italic {
            queue!(out, SetAttribute(Attribute::Italic))?;
        }
        Ok(())
    }

    /// Reset all attributes
    pub fn reset_attributes(&mut self) -> Result<()> {
        queue!(io::stdout(), SetAttribute(Attribute::Reset), term_style::ResetColor)?;
        Ok(())
    }

    /// Sound the bell
    pub fn beep(&mut self) -> Result<()> {
        queue!(io::stdout(), Print('\x07'))?;
        self.flush()
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        // Restore terminal state
        let _ = execute!(io::stdout(), cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

fn to_crossterm_color(color: Color) -> term_style::Color {
    use term_style::Color as C;
    match color {
        Color::Red => C::DarkRed,
        Color::Green => C::DarkGreen,
        Color::Yellow => C::DarkYellow,
        Color::Blue => C::DarkBlue,
        Color::Cyan => C::DarkCyan,
        Color::BrightGreen => C::Green,
    }
}
