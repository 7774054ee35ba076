//! Text editing commands
//!
//! Every change goes through `EditorState::insert_text` or `delete_range`,
//! which route it through the session so the buffer is marked Dirty and
//! re-highlighted.

use std::ops::Range;

use super::CommandStatus;
use crate::editor::EditorState;
use crate::error::Result;
use crate::line;

fn edited(changed: bool) -> Result<CommandStatus> {
    Ok(if changed {
        CommandStatus::Success
    } else {
        CommandStatus::Failure
    })
}

/// Split the line at the cursor
pub fn newline(editor: &mut EditorState) -> Result<CommandStatus> {
    edited(editor.insert_text("\n"))
}

/// Insert `tab-width` spaces
pub fn insert_indent(editor: &mut EditorState) -> Result<CommandStatus> {
    let indent = editor.config.indent();
    edited(editor.insert_text(&indent))
}

/// Delete the char before the cursor
pub fn delete_char_backward(editor: &mut EditorState) -> Result<CommandStatus> {
    let range = editor
        .active_cursor()
        .and_then(|(text, pos)| backward_range(text, pos));
    edited(range.is_some_and(|range| editor.delete_range(range)))
}

/// Delete the char under the cursor
pub fn delete_char_forward(editor: &mut EditorState) -> Result<CommandStatus> {
    let range = editor
        .active_cursor()
        .and_then(|(text, pos)| forward_range(text, pos));
    edited(range.is_some_and(|range| editor.delete_range(range)))
}

/// Force a full repaint
pub fn redraw_display(editor: &mut EditorState) -> Result<CommandStatus> {
    editor.display.force_redraw();
    Ok(CommandStatus::Success)
}

/// Bytes of the char before `pos`
fn backward_range(text: &str, pos: usize) -> Option<Range<usize>> {
    (pos > 0).then(|| line::prev_char_boundary(text, pos)..pos)
}

/// Bytes of the char at `pos`
fn forward_range(text: &str, pos: usize) -> Option<Range<usize>> {
    (pos < text.len()).then(|| pos..line::next_char_boundary(text, pos))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backward_range() {
        assert_eq!(backward_range("abc", 0), None);
        assert_eq!(backward_range("abc", 2), Some(1..2));
        assert_eq!(backward_range("aé", 3), Some(1..3));
        assert_eq!(backward_range("a\nb", 2), Some(1..2));
    }

    #[test]
    fn test_forward_range() {
        assert_eq!(forward_range("abc", 3), None);
        assert_eq!(forward_range("abc", 0), Some(0..1));
        assert_eq!(forward_range("éa", 0), Some(0..2));
    }
}
