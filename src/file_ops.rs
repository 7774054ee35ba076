//! File workflows - open, save, save as, close
//!
//! Each workflow runs against a [`Session`] and a [`FileGateway`] and reports
//! a [`FileOutcome`] for the status line. Failures leave the session
//! untouched: a failed save keeps the buffer Dirty and its old path.

use std::path::Path;

use tracing::{info, warn};

use crate::buffer::{BufferId, Origin};
use crate::gateway::{FileFilter, FileGateway, Prompter};
use crate::session::{CloseOutcome, Session};
use crate::syntax;

/// Name given to blank buffers
pub const UNTITLED: &str = "untitled";

/// What happened, phrased for the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    Done(String),
    /// Dialog dismissed, close declined, or the buffer vanished
    Cancelled,
    Failed(String),
}

/// Create a blank buffer
pub fn new_file(session: &mut Session) -> BufferId {
    session.create_buffer(UNTITLED, "", Origin::NewBlank)
}

/// Open a file into a new buffer; `hint` skips the dialog
pub fn open_file(session: &mut Session, gateway: &mut impl FileGateway, hint: Option<&Path>) -> FileOutcome {
    match gateway.open(hint) {
        Ok(Some(file)) => {
            let name = syntax::base_name(&file.path.to_string_lossy()).to_string();
            let message = format!("Opened {}", file.path.display());
            session.create_buffer(name, file.content, Origin::Disk(file.path));
            FileOutcome::Done(message)
        }
        Ok(None) => FileOutcome::Cancelled,
        Err(e) => FileOutcome::Failed(format!("Failed to open file: {}", e)),
    }
}

/// Save a buffer to its bound path, asking for one if it has none
pub fn save(session: &mut Session, gateway: &mut impl FileGateway, id: BufferId) -> FileOutcome {
    let Some(path) = session.get(id).map(|b| b.file_path().map(Path::to_path_buf)) else {
        return FileOutcome::Cancelled;
    };
    match path {
        Some(path) => write_and_mark(session, gateway, id, &path),
        None => save_as(session, gateway, id),
    }
}

/// Ask for a path and save the buffer there
pub fn save_as(session: &mut Session, gateway: &mut impl FileGateway, id: BufferId) -> FileOutcome {
    let Some(buffer) = session.get(id) else {
        return FileOutcome::Cancelled;
    };
    let filters = save_filters(buffer.extension(), buffer.language());
    let default_name = buffer.name().to_string();

    match gateway.prompt_save_path(&default_name, &filters) {
        Ok(Some(path)) => write_and_mark(session, gateway, id, &path),
        Ok(None) => FileOutcome::Cancelled,
        Err(e) => FileOutcome::Failed(format!("Failed to save file: {}", e)),
    }
}

/// Close a buffer, asking through `prompter` before discarding changes
pub fn close(session: &mut Session, prompter: &mut impl Prompter, id: BufferId) -> FileOutcome {
    let outcome = session.close(id, |buffer| {
        let question = format!("Close \"{}\" without saving?", buffer.name());
        prompter.confirm(&question).unwrap_or_else(|e| {
            warn!(buffer = %buffer.name(), error = %e, "close prompt failed, keeping buffer");
            false
        })
    });
    match outcome {
        CloseOutcome::Closed => FileOutcome::Done(String::new()),
        CloseOutcome::Kept | CloseOutcome::Missing => FileOutcome::Cancelled,
    }
}

fn write_and_mark(session: &mut Session, gateway: &mut impl FileGateway, id: BufferId, path: &Path) -> FileOutcome {
    let Some(buffer) = session.get(id) else {
        return FileOutcome::Cancelled;
    };
    let lines = buffer.line_count();
    if let Err(e) = gateway.write(path, buffer.content()) {
        return FileOutcome::Failed(format!("Failed to save file: {}", e));
    }
    info!(%id, path = %path.display(), "buffer saved");
    session.mark_saved(id, path.to_path_buf());
    FileOutcome::Done(format!("Wrote {} lines to {}", lines, path.display()))
}

/// Dialog filters for saving: the buffer's own type first, then anything
fn save_filters(extension: &str, language: &str) -> Vec<FileFilter> {
    let mut filters = Vec::with_capacity(2);
    if !extension.is_empty() {
        filters.push(FileFilter::new(&format!("{} Files", language), &[extension]));
    }
    filters.push(FileFilter::all_files());
    filters
}
