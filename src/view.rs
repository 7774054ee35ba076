//! View state - cursor and scroll position of one buffer
//!
//! The cursor is a byte offset into the buffer content, always on a char
//! boundary. Movement helpers take the content they move over.

use crate::line;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct View {
    /// Cursor byte offset
    cursor: usize,
    /// First visible line
    top_line: usize,
    /// Display column kept across vertical movement
    goal_col: Option<usize>,
}

impl View {
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn top_line(&self) -> usize {
        self.top_line
    }

    /// Place the cursor; drops the goal column
    pub fn set_cursor(&mut self, pos: usize) {
        self.cursor = pos;
        self.goal_col = None;
    }

    /// Zero-based (line, byte column) of the cursor
    pub fn position(&self, text: &str) -> (usize, usize) {
        line::position_of(text, self.cursor)
    }

    /// Pull the cursor back inside `text` after outside changes
    pub fn clamp(&mut self, text: &str) {
        let mut pos = self.cursor.min(text.len());
        while !text.is_char_boundary(pos) {
            pos -= 1;
        }
        self.cursor = pos;
    }

    pub fn move_left(&mut self, text: &str) {
        self.set_cursor(line::prev_char_boundary(text, self.cursor));
    }

    pub fn move_right(&mut self, text: &str) {
        self.set_cursor(line::next_char_boundary(text, self.cursor));
    }

    pub fn move_home(&mut self, text: &str) {
        self.set_cursor(line::line_start(text, self.cursor));
    }

    pub fn move_end(&mut self, text: &str) {
        self.set_cursor(line::line_end(text, self.cursor));
    }

    pub fn move_doc_start(&mut self) {
        self.set_cursor(0);
    }

    pub fn move_doc_end(&mut self, text: &str) {
        self.set_cursor(text.len());
    }

    /// Move by `delta` lines, keeping the goal display column
    pub fn move_lines(&mut self, text: &str, delta: isize, tab_width: usize) {
        let (cur_line, col) = self.position(text);
        let start = line::line_start(text, self.cursor);
        let goal = self
            .goal_col
            .unwrap_or_else(|| line::display_col(&text[start..self.cursor], col, tab_width));

        let last_line = line::line_count(text) - 1;
        let target = cur_line.saturating_add_signed(delta).min(last_line);
        let Some(target_start) = line::offset_of_line(text, target) else {
            return;
        };
        let target_text = &text[target_start..line::line_end(text, target_start)];
        self.cursor = target_start + line::byte_at_display_col(target_text, goal, tab_width);
        self.goal_col = Some(goal);
    }

    /// Page movement: shift both cursor and scroll by a screenful
    pub fn move_page(&mut self, text: &str, delta: isize, height: usize, tab_width: usize) {
        self.move_lines(text, delta, tab_width);
        let last_line = line::line_count(text) - 1;
        self.top_line = self.top_line.saturating_add_signed(delta).min(last_line);
        self.scroll_to_cursor(text, height);
    }

    /// Adjust `top_line` so the cursor line is within `height` rows
    pub fn scroll_to_cursor(&mut self, text: &str, height: usize) {
        let (cur_line, _) = self.position(text);
        let height = height.max(1);
        if cur_line < self.top_line {
            self.top_line = cur_line;
        } else if cur_line >= self.top_line + height {
            self.top_line = cur_line + 1 - height;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(pos: usize) -> View {
        let mut view = View::default();
        view.set_cursor(pos);
        view
    }

    #[test]
    fn test_horizontal_movement() {
        let text = "aé\nb";
        let mut view = View::default();
        view.move_right(text);
        assert_eq!(view.cursor(), 1);
        view.move_right(text);
        assert_eq!(view.cursor(), 3);
        view.move_right(text);
        assert_eq!(view.cursor(), 4);
        view.move_left(text);
        assert_eq!(view.cursor(), 3);

        let mut view = View::default();
        view.move_left(text);
        assert_eq!(view.cursor(), 0);
        view.move_doc_end(text);
        view.move_right(text);
        assert_eq!(view.cursor(), text.len());
    }

    #[test]
    fn test_home_end() {
        let text = "one\ntwo three\n";
        let mut view = at(6);
        view.move_end(text);
        assert_eq!(view.cursor(), 13);
        view.move_home(text);
        assert_eq!(view.cursor(), 4);
    }

    #[test]
    fn test_vertical_keeps_goal_column() {
        let text = "abcdef\nab\nabcdef";
        let mut view = at(5);
        view.move_lines(text, 1, 4);
        assert_eq!(view.position(text), (1, 2));
        view.move_lines(text, 1, 4);
        assert_eq!(view.position(text), (2, 5));
        view.move_lines(text, -2, 4);
        assert_eq!(view.position(text), (0, 5));
    }

    #[test]
    fn test_vertical_clamps_at_edges() {
        let text = "a\nb";
        let mut view = at(0);
        view.move_lines(text, -1, 4);
        assert_eq!(view.cursor(), 0);
        view.move_lines(text, 10, 4);
        assert_eq!(view.position(text), (1, 0));
    }

    #[test]
    fn test_vertical_uses_display_columns() {
        let text = "\tx\n12345678";
        let mut view = at(1);
        view.move_lines(text, 1, 4);
        assert_eq!(view.position(text), (1, 4));
    }

    #[test]
    fn test_scroll_to_cursor() {
        let text = "0\n1\n2\n3\n4\n5\n6\n7\n8\n9";
        let mut view = View::default();
        view.move_doc_end(text);
        view.scroll_to_cursor(text, 3);
        assert_eq!(view.top_line(), 7);
        view.move_doc_start();
        view.scroll_to_cursor(text, 3);
        assert_eq!(view.top_line(), 0);
    }

    #[test]
    fn test_page_movement() {
        let text = "0\n1\n2\n3\n4\n5\n6\n7\n8\n9";
        let mut view = View::default();
        view.move_page(text, 3, 3, 4);
        assert_eq!(view.position(text).0, 3);
        assert_eq!(view.top_line(), 3);
        view.move_page(text, -3, 3, 4);
        assert_eq!(view.position(text).0, 0);
        assert_eq!(view.top_line(), 0);
    }

    #[test]
    fn test_clamp_after_shrink() {
        let mut view = at(10);
        view.clamp("é");
        assert_eq!(view.cursor(), 2);
        let mut view = at(1);
        view.clamp("é");
        assert_eq!(view.cursor(), 0);
    }
}
