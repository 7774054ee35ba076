//! Cursor movement commands

use super::CommandStatus;
use crate::editor::EditorState;
use crate::error::Result;

fn moved(has_buffer: bool) -> Result<CommandStatus> {
    Ok(if has_buffer {
        CommandStatus::Success
    } else {
        CommandStatus::Failure
    })
}

pub fn forward_char(editor: &mut EditorState) -> Result<CommandStatus> {
    moved(editor.with_view(|view, text| view.move_right(text)))
}

pub fn backward_char(editor: &mut EditorState) -> Result<CommandStatus> {
    moved(editor.with_view(|view, text| view.move_left(text)))
}

pub fn next_line(editor: &mut EditorState) -> Result<CommandStatus> {
    let tab_width = editor.config.tab_width;
    moved(editor.with_view(|view, text| view.move_lines(text, 1, tab_width)))
}

pub fn previous_line(editor: &mut EditorState) -> Result<CommandStatus> {
    let tab_width = editor.config.tab_width;
    moved(editor.with_view(|view, text| view.move_lines(text, -1, tab_width)))
}

pub fn beginning_of_line(editor: &mut EditorState) -> Result<CommandStatus> {
    moved(editor.with_view(|view, text| view.move_home(text)))
}

pub fn end_of_line(editor: &mut EditorState) -> Result<CommandStatus> {
    moved(editor.with_view(|view, text| view.move_end(text)))
}

/// Page down
pub fn scroll_down(editor: &mut EditorState) -> Result<CommandStatus> {
    page(editor, 1)
}

/// Page up
pub fn scroll_up(editor: &mut EditorState) -> Result<CommandStatus> {
    page(editor, -1)
}

fn page(editor: &mut EditorState, sign: isize) -> Result<CommandStatus> {
    let tab_width = editor.config.tab_width;
    let height = editor.text_rows().max(1);
    // Keep one line of context
    let step = height.saturating_sub(1).max(1) as isize;
    moved(editor.with_view(|view, text| view.move_page(text, sign * step, height, tab_width)))
}

pub fn beginning_of_buffer(editor: &mut EditorState) -> Result<CommandStatus> {
    moved(editor.with_view(|view, _| view.move_doc_start()))
}

pub fn end_of_buffer(editor: &mut EditorState) -> Result<CommandStatus> {
    moved(editor.with_view(|view, text| view.move_doc_end(text)))
}
