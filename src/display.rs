//! Display rendering
//!
//! Screen layout, top to bottom: tab bar, text rows (with optional line
//! number gutter), status line, message line.

use std::collections::HashMap;

use unicode_width::UnicodeWidthStr;

use crate::buffer::{Buffer, BufferId};
use crate::error::Result;
use crate::line;
use crate::session::Session;
use crate::terminal::Terminal;
use crate::view::View;

/// Rows not available for text: tab bar, status line, message line
pub const CHROME_ROWS: u16 = 3;

/// Marker shown next to names of buffers with unsaved changes
pub const DIRTY_MARKER: &str = "\u{25cf}";

const EMPTY_HINT: &str = "No file open. Ctrl+N new file, Ctrl+O open file";

/// Display state
pub struct Display {
    /// Whether a full redraw is needed
    needs_redraw: bool,
    /// Message to show in minibuffer (bottom line)
    message: Option<String>,
    /// Whether to show line numbers
    show_line_numbers: bool,
    tab_width: usize,
    /// Terminal size at the last render
    last_size: (u16, u16),
}

impl Display {
    pub fn new(show_line_numbers: bool, tab_width: usize) -> Self {
        Self {
            needs_redraw: true,
            message: None,
            show_line_numbers,
            tab_width,
            last_size: (0, 0),
        }
    }

    /// Calculate width needed for line numbers (including separator)
    fn line_number_width(&self, line_count: usize) -> usize {
        if !self.show_line_numbers {
            return 0;
        }
        gutter_width(line_count)
    }

    /// Mark that a full redraw is needed
    pub fn force_redraw(&mut self) {
        self.needs_redraw = true;
    }

    pub fn set_message(&mut self, msg: impl Into<String>) {
        self.message = Some(msg.into());
    }

    pub fn clear_message(&mut self) {
        self.message = None;
    }

    /// Number of text rows for a terminal of `rows` rows
    pub fn text_rows(rows: u16) -> usize {
        rows.saturating_sub(CHROME_ROWS) as usize
    }

    /// Render the editor display
    pub fn render(&mut self, terminal: &mut Terminal, session: &Session, views: &HashMap<BufferId, View>) -> Result<()> {
        let cols = terminal.cols() as usize;
        let rows = terminal.rows();
        if rows < CHROME_ROWS {
            return Ok(());
        }

        let size = (terminal.cols(), rows);
        if self.needs_redraw || size != self.last_size {
            terminal.clear_screen()?;
            self.last_size = size;
        }
        terminal.set_cursor_visible(false)?;

        self.render_tab_bar(terminal, session, cols)?;

        let height = Self::text_rows(rows);
        let active = session.active();
        let view = active.and_then(|b| views.get(&b.id())).cloned().unwrap_or_default();
        match active {
            Some(buffer) => self.render_text(terminal, buffer, &view, height, cols)?,
            None => self.render_empty(terminal, height, cols)?,
        }

        self.render_status_line(terminal, active, &view, rows - 2, cols)?;
        self.render_minibuffer(terminal, rows - 1, cols)?;

        if let Some(buffer) = active {
            self.position_cursor(terminal, buffer, &view, height)?;
            terminal.set_cursor_visible(true)?;
        }
        terminal.flush()?;

        self.needs_redraw = false;
        Ok(())
    }

    /// One label per buffer, the active one highlighted
    fn render_tab_bar(&self, terminal: &mut Terminal, session: &Session, cols: usize) -> Result<()> {
        terminal.move_cursor(0, 0)?;
        let active = session.active_id();
        let buffers = session.buffers();
        let labels: Vec<String> = buffers.iter().map(tab_label).collect();
        let widths: Vec<usize> = labels.iter().map(|label| label.width()).collect();
        let active_index = buffers.iter().position(|b| Some(b.id()) == active);
        let first = first_visible_tab(&widths, active_index, cols);

        let mut used = 0;
        for (buffer, label) in buffers.iter().zip(&labels).skip(first) {
            let label = truncate_to_width(label, cols.saturating_sub(used));
            if label.is_empty() {
                break;
            }
            if Some(buffer.id()) == active {
                terminal.set_reverse(true)?;
            } else {
                terminal.set_dim(true)?;
            }
            terminal.write_str(&label)?;
            terminal.reset_attributes()?;
            used += label.width();
        }
        terminal.clear_to_eol()?;
        Ok(())
    }

    fn render_text(&self, terminal: &mut Terminal, buffer: &Buffer, view: &View, height: usize, cols: usize) -> Result<()> {
        let lnum_width = self.line_number_width(buffer.line_count());
        let text_cols = cols.saturating_sub(lnum_width);

        for row_offset in 0..height {
            let screen_row = 1 + row_offset as u16;
            let line_idx = view.top_line() + row_offset;
            terminal.move_cursor(screen_row, 0)?;

            if line_idx < buffer.line_count() {
                if lnum_width > 0 {
                    let lnum_str = format!("{:>width$} ", line_idx + 1, width = lnum_width - 1);
                    terminal.set_dim(true)?;
                    terminal.write_str(&lnum_str)?;
                    terminal.set_dim(false)?;
                }
                self.render_highlighted_line(terminal, buffer, line_idx, text_cols)?;
            } else {
                // Empty line indicator (like vim's ~)
                terminal.write_str(&" ".repeat(lnum_width))?;
                terminal.set_dim(true)?;
                terminal.write_str("~")?;
                terminal.set_dim(false)?;
            }
            terminal.clear_to_eol()?;
        }
        Ok(())
    }

    /// Draw one line, styling each token slice that falls on it
    fn render_highlighted_line(&self, terminal: &mut Terminal, buffer: &Buffer, line_idx: usize, max_cols: usize) -> Result<()> {
        let content = buffer.content();
        let Some(start) = line::offset_of_line(content, line_idx) else {
            return Ok(());
        };
        let end = line::line_end(content, start);
        let tokens = buffer.tokens();
        let first = tokens.partition_point(|t| t.end <= start);

        let mut used = 0;
        for token in tokens[first..].iter().take_while(|t| t.start < end) {
            let segment = &content[token.start.max(start)..token.end.min(end)];
            let (text, width) = fit_segment(segment, max_cols - used, self.tab_width);
            if !text.is_empty() {
                terminal.apply_style(&token.kind.default_style())?;
                terminal.write_str(&text)?;
                terminal.reset_attributes()?;
            }
            used += width;
            if width < segment_width(segment, self.tab_width) {
                break;
            }
        }
        Ok(())
    }

    fn render_empty(&self, terminal: &mut Terminal, height: usize, cols: usize) -> Result<()> {
        for row_offset in 0..height {
            terminal.move_cursor(1 + row_offset as u16, 0)?;
            terminal.clear_to_eol()?;
        }
        if height == 0 {
            return Ok(());
        }
        let hint = truncate_to_width(EMPTY_HINT, cols);
        let row = 1 + (height / 2) as u16;
        let col = cols.saturating_sub(hint.width()) / 2;
        terminal.move_cursor(row, col as u16)?;
        terminal.set_dim(true)?;
        terminal.write_str(&hint)?;
        terminal.set_dim(false)?;
        Ok(())
    }

    fn render_status_line(&self, terminal: &mut Terminal, buffer: Option<&Buffer>, view: &View, row: u16, cols: usize) -> Result<()> {
        terminal.move_cursor(row, 0)?;
        terminal.set_reverse(true)?;
        let text = match buffer {
            Some(buffer) => status_line(buffer, view, cols),
            None => " ".repeat(cols),
        };
        terminal.write_str(&text)?;
        terminal.set_reverse(false)?;
        Ok(())
    }

    /// Render the minibuffer (message area)
    fn render_minibuffer(&self, terminal: &mut Terminal, row: u16, cols: usize) -> Result<()> {
        terminal.move_cursor(row, 0)?;
        if let Some(ref msg) = self.message {
            terminal.write_str(&truncate_to_width(msg, cols))?;
        }
        terminal.clear_to_eol()?;
        Ok(())
    }

    /// Position the hardware cursor at the correct location
    fn position_cursor(&self, terminal: &mut Terminal, buffer: &Buffer, view: &View, height: usize) -> Result<()> {
        let content = buffer.content();
        let (cursor_line, cursor_col) = view.position(content);
        let start = line::line_start(content, view.cursor().min(content.len()));
        let line_text = &content[start..line::line_end(content, start)];
        let display_col = line::display_col(line_text, cursor_col, self.tab_width);

        let lnum_width = self.line_number_width(buffer.line_count());
        let row_offset = cursor_line.saturating_sub(view.top_line()).min(height.saturating_sub(1));
        let screen_col = (lnum_width + display_col).min((terminal.cols() as usize).saturating_sub(1));

        terminal.move_cursor(1 + row_offset as u16, screen_col as u16)?;
        Ok(())
    }
}

/// Gutter width: at least 3 digits plus a separator space
fn gutter_width(line_count: usize) -> usize {
    line_count.max(1).to_string().len().max(3) + 1
}

/// Tab bar label, with the dirty marker when there are unsaved changes
/// Index of the first tab to draw so the active tab fits in `cols`
///
/// Tabs before the active one are dropped from the left until the run
/// from there through the active tab fits. An active tab wider than the
/// bar is drawn first and truncated.
fn first_visible_tab(widths: &[usize], active: Option<usize>, cols: usize) -> usize {
    let Some(active) = active.filter(|&i| i < widths.len()) else {
        return 0;
    };
    let mut first = 0;
    let mut span: usize = widths[..=active].iter().sum();
    while first < active && span > cols {
        span -= widths[first];
        first += 1;
    }
    first
}

pub fn tab_label(buffer: &Buffer) -> String {
    if buffer.is_dirty() {
        format!(" {} {} ", buffer.name(), DIRTY_MARKER)
    } else {
        format!(" {} ", buffer.name())
    }
}

/// Status line text, padded or truncated to `cols`
///
/// Left: name and dirty marker. Right: `Ln X, Col Y`, line count, language.
pub fn status_line(buffer: &Buffer, view: &View, cols: usize) -> String {
    let content = buffer.content();
    let (line_idx, col) = view.position(content);
    let start = line::line_start(content, view.cursor().min(content.len()));
    let char_col = content[start..start + col].chars().count();

    let left = if buffer.is_dirty() {
        format!(" {} {}", buffer.name(), DIRTY_MARKER)
    } else {
        format!(" {}", buffer.name())
    };
    let right = format!(
        "Ln {}, Col {}   {} lines   {} ",
        line_idx + 1,
        char_col + 1,
        buffer.line_count(),
        buffer.language()
    );

    let gap = cols.saturating_sub(left.width() + right.width());
    if gap == 0 {
        return truncate_to_width(&format!("{} {}", left, right), cols);
    }
    format!("{}{}{}", left, " ".repeat(gap), right)
}

/// Expand tabs in `segment` and cut it at `max_width` columns
///
/// Returns the printable text and its display width.
fn fit_segment(segment: &str, max_width: usize, tab_width: usize) -> (String, usize) {
    let mut result = String::new();
    let mut width = 0;
    for ch in segment.chars() {
        let ch_width = line::char_width(ch, tab_width);
        if width + ch_width > max_width {
            break;
        }
        if ch == '\t' {
            result.push_str(&" ".repeat(tab_width));
        } else if ch.is_control() {
            result.push('?');
        } else {
            result.push(ch);
        }
        width += ch_width;
    }
    (result, width)
}

fn segment_width(segment: &str, tab_width: usize) -> usize {
    segment.chars().map(|ch| line::char_width(ch, tab_width)).sum()
}

/// Truncate a string to fit within a display width
fn truncate_to_width(s: &str, max_width: usize) -> String {
    let mut result = String::new();
    let mut width = 0;

    for ch in s.chars() {
        let ch_width = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(1);
        if width + ch_width > max_width {
            break;
        }
        result.push(ch);
        width += ch_width;
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::Origin;
    use std::path::PathBuf;

    #[test]
    fn test_gutter_width() {
        assert_eq!(gutter_width(1), 4);
        assert_eq!(gutter_width(999), 4);
        assert_eq!(gutter_width(1000), 5);
    }

    #[test]
    fn test_first_visible_tab() {
        // Everything fits
        assert_eq!(first_visible_tab(&[10, 10, 10], Some(2), 30), 0);
        // Active tab would be cut off
        assert_eq!(first_visible_tab(&[10, 10, 10], Some(2), 15), 2);
        assert_eq!(first_visible_tab(&[10, 10, 10], Some(2), 20), 1);
        assert_eq!(first_visible_tab(&[10, 10, 10], Some(0), 15), 0);
        // Wider than the bar
        assert_eq!(first_visible_tab(&[5, 40], Some(1), 20), 1);
        assert_eq!(first_visible_tab(&[10, 10, 10], None, 15), 0);
        assert_eq!(first_visible_tab(&[], None, 15), 0);
    }

    #[test]
    fn test_tab_label_dirty_marker() {
        let mut session = Session::new();
        let id = session.create_buffer("Player.cs", "class P {}", Origin::Disk(PathBuf::from("/p/Player.cs")));
        assert_eq!(tab_label(session.get(id).unwrap()), " Player.cs ");
        session.edit_buffer(id, "class Q {}");
        assert_eq!(tab_label(session.get(id).unwrap()), " Player.cs \u{25cf} ");
    }

    #[test]
    fn test_status_line() {
        let mut session = Session::new();
        let id = session.create_buffer("foo.py", "# c\ndef f():\n    return 1", Origin::NewBlank);
        let mut view = View::default();
        view.set_cursor(8);

        let status = status_line(session.get(id).unwrap(), &view, 60);
        assert_eq!(status.width(), 60);
        assert!(status.starts_with(" foo.py "));
        assert!(status.ends_with("Ln 2, Col 5   3 lines   Python "));
    }

    #[test]
    fn test_status_line_counts_chars_not_bytes() {
        let mut session = Session::new();
        let id = session.create_buffer("a.txt", "héllo", Origin::NewBlank);
        let mut view = View::default();
        view.set_cursor(3);
        let status = status_line(session.get(id).unwrap(), &view, 80);
        assert!(status.contains("Ln 1, Col 3"));
    }

    #[test]
    fn test_status_line_truncates() {
        let mut session = Session::new();
        let id = session.create_buffer("a.txt", "", Origin::NewBlank);
        let status = status_line(session.get(id).unwrap(), &View::default(), 10);
        assert!(status.width() <= 10);
    }

    #[test]
    fn test_fit_segment() {
        assert_eq!(fit_segment("\tab", 10, 4), ("    ab".to_string(), 6));
        assert_eq!(fit_segment("abcdef", 3, 4), ("abc".to_string(), 3));
        assert_eq!(fit_segment("你好", 3, 4), ("你".to_string(), 2));
        assert_eq!(segment_width("\tab", 4), 6);
    }

    #[test]
    fn test_truncate_to_width() {
        assert_eq!(truncate_to_width("hello", 3), "hel");
        assert_eq!(truncate_to_width("你好", 3), "你");
    }
}
