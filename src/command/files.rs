//! File and tab commands

use tracing::info;

use super::CommandStatus;
use crate::editor::EditorState;
use crate::error::Result;
use crate::file_ops;
use crate::gateway::Prompter;
use crate::prompt::Minibuffer;
use crate::session::Direction;

/// New blank tab
pub fn new_file(editor: &mut EditorState) -> Result<CommandStatus> {
    file_ops::new_file(&mut editor.session);
    Ok(CommandStatus::Success)
}

/// Open a file chosen in the minibuffer
pub fn open_file(editor: &mut EditorState) -> Result<CommandStatus> {
    let outcome = editor.with_gateway(|session, gateway| file_ops::open_file(session, gateway, None));
    Ok(editor.report(outcome))
}

/// Save the active buffer, asking for a path if it has none
pub fn save_file(editor: &mut EditorState) -> Result<CommandStatus> {
    let Some(id) = editor.session.active_id() else {
        return Ok(CommandStatus::Failure);
    };
    let outcome = editor.with_gateway(|session, gateway| file_ops::save(session, gateway, id));
    Ok(editor.report(outcome))
}

/// Save the active buffer under a new name
pub fn save_file_as(editor: &mut EditorState) -> Result<CommandStatus> {
    let Some(id) = editor.session.active_id() else {
        return Ok(CommandStatus::Failure);
    };
    let outcome = editor.with_gateway(|session, gateway| file_ops::save_as(session, gateway, id));
    Ok(editor.report(outcome))
}

/// Close the active tab
pub fn close_tab(editor: &mut EditorState) -> Result<CommandStatus> {
    let Some(id) = editor.session.active_id() else {
        return Ok(CommandStatus::Failure);
    };
    let mut prompter = Minibuffer::new(&mut editor.terminal);
    let outcome = file_ops::close(&mut editor.session, &mut prompter, id);
    editor.display.force_redraw();
    Ok(editor.report(outcome))
}

pub fn next_tab(editor: &mut EditorState) -> Result<CommandStatus> {
    cycle(editor, Direction::Forward)
}

pub fn previous_tab(editor: &mut EditorState) -> Result<CommandStatus> {
    cycle(editor, Direction::Backward)
}

fn cycle(editor: &mut EditorState, direction: Direction) -> Result<CommandStatus> {
    if editor.session.is_empty() {
        return Ok(CommandStatus::Failure);
    }
    editor.session.cycle(direction);
    Ok(CommandStatus::Success)
}

/// Exit, confirming first when there are unsaved changes
pub fn quit(editor: &mut EditorState) -> Result<CommandStatus> {
    if editor.session.has_dirty() {
        let confirmed = Minibuffer::new(&mut editor.terminal).confirm("Modified buffers exist; quit anyway?")?;
        editor.display.force_redraw();
        if !confirmed {
            return Ok(CommandStatus::Abort);
        }
        info!(open = editor.session.len(), "quitting with unsaved changes");
    }
    editor.running = false;
    Ok(CommandStatus::Success)
}
