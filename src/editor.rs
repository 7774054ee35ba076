//! Editor state and main loop

use std::collections::HashMap;
use std::ops::Range;
use std::path::PathBuf;

use tracing::{debug, info, warn};

use crate::buffer::BufferId;
use crate::command::{CommandStatus, KeyTable};
use crate::config::Config;
use crate::display::Display;
use crate::error::Result;
use crate::file_ops::{self, FileOutcome};
use crate::gateway::DiskGateway;
use crate::input::{self, Key};
use crate::prompt::Minibuffer;
use crate::session::{Session, SessionEvent};
use crate::terminal::Terminal;
use crate::view::View;

/// Main editor state
pub struct EditorState {
    /// Open buffers and the active tab
    pub session: Session,
    /// Cursor and scroll state per buffer
    pub views: HashMap<BufferId, View>,
    /// Terminal interface
    pub terminal: Terminal,
    /// Display state
    pub display: Display,
    /// Key bindings
    pub keytab: KeyTable,
    pub config: Config,
    /// Whether editor is running
    pub running: bool,
    /// File named on the command line, opened once the screen is up
    pending_open: Option<PathBuf>,
}

impl EditorState {
    pub fn new(terminal: Terminal, config: Config) -> Self {
        Self {
            session: Session::new(),
            views: HashMap::new(),
            terminal,
            display: Display::new(config.line_numbers, config.tab_width),
            keytab: KeyTable::with_defaults(),
            config,
            running: true,
            pending_open: None,
        }
    }

    /// Queue an open-file request for when the editor is ready
    pub fn request_open(&mut self, path: PathBuf) {
        self.pending_open = Some(path);
    }

    /// Run the main editor loop
    pub fn run(&mut self) -> Result<()> {
        info!("editor started");
        self.display.force_redraw();
        self.render()?;

        if let Some(path) = self.pending_open.take() {
            let outcome = self.with_gateway(|session, gateway| file_ops::open_file(session, gateway, Some(&path)));
            self.report(outcome);
            self.after_command();
        }

        while self.running {
            self.render()?;

            let Some(key_event) = self.terminal.read_key()? else {
                // Resized
                self.display.force_redraw();
                self.scroll_to_cursor();
                continue;
            };
            if let Some(key) = input::translate_key(key_event) {
                self.handle_key(key)?;
            }
        }

        info!("editor exiting");
        Ok(())
    }

    fn render(&mut self) -> Result<()> {
        self.display.render(&mut self.terminal, &self.session, &self.views)
    }

    /// Handle a key press
    fn handle_key(&mut self, key: Key) -> Result<()> {
        // Clear any previous message
        self.display.clear_message();

        if let Some(cmd) = self.keytab.lookup(key) {
            match cmd(self)? {
                CommandStatus::Success | CommandStatus::Abort => {}
                CommandStatus::Failure => self.terminal.beep()?,
            }
        } else if key.is_self_insert() {
            if let Some(ch) = key.base_char() {
                let mut utf8 = [0; 4];
                self.insert_text(ch.encode_utf8(&mut utf8));
            }
        } else {
            self.terminal.beep()?;
            self.display.set_message(format!("{} is not bound", key.display_name()));
        }

        self.after_command();
        Ok(())
    }

    /// Apply queued session events and keep the cursor on screen
    fn after_command(&mut self) {
        for event in self.session.drain_events() {
            debug!(?event, "session event");
            match event {
                SessionEvent::Created(id) => {
                    self.views.insert(id, View::default());
                    self.display.force_redraw();
                }
                SessionEvent::Closed(id) => {
                    self.views.remove(&id);
                    self.display.force_redraw();
                }
                SessionEvent::Activated(_) | SessionEvent::Renamed(_) => self.display.force_redraw(),
                SessionEvent::Edited(_) | SessionEvent::Saved(_) => {}
            }
        }
        self.scroll_to_cursor();
    }

    fn scroll_to_cursor(&mut self) {
        let height = self.text_rows();
        self.with_view(|view, text| {
            view.clamp(text);
            view.scroll_to_cursor(text, height);
        });
    }

    /// Number of rows available for text
    pub fn text_rows(&self) -> usize {
        Display::text_rows(self.terminal.rows())
    }

    /// Run `f` on the active buffer's view; false if no buffer is open
    pub fn with_view(&mut self, f: impl FnOnce(&mut View, &str)) -> bool {
        let Some(buffer) = self.session.active() else {
            return false;
        };
        let view = self.views.entry(buffer.id()).or_default();
        f(view, buffer.content());
        true
    }

    /// Active buffer content and cursor offset
    pub fn active_cursor(&self) -> Option<(&str, usize)> {
        let buffer = self.session.active()?;
        let cursor = self.views.get(&buffer.id()).map_or(0, View::cursor);
        Some((buffer.content(), cursor.min(buffer.content().len())))
    }

    /// Insert text at the cursor of the active buffer
    pub fn insert_text(&mut self, text: &str) -> bool {
        let Some((_, pos)) = self.active_cursor() else {
            return false;
        };
        let Some(id) = self.session.active_id() else {
            return false;
        };
        self.session.edit_with(id, |content| content.insert_str(pos, text));
        self.views.entry(id).or_default().set_cursor(pos + text.len());
        true
    }

    /// Remove a byte range from the active buffer, leaving the cursor at its start
    pub fn delete_range(&mut self, range: Range<usize>) -> bool {
        let Some(id) = self.session.active_id() else {
            return false;
        };
        if range.is_empty() {
            return false;
        }
        let start = range.start;
        self.session.edit_with(id, |content| content.replace_range(range, ""));
        self.views.entry(id).or_default().set_cursor(start);
        true
    }

    /// Run a file workflow with a disk gateway prompting in the minibuffer
    pub fn with_gateway<R>(&mut self, f: impl FnOnce(&mut Session, &mut DiskGateway<Minibuffer<'_>>) -> R) -> R {
        let mut gateway = DiskGateway::new(Minibuffer::new(&mut self.terminal), self.config.crlf_on_save);
        let result = f(&mut self.session, &mut gateway);
        self.display.force_redraw();
        result
    }

    /// Show the outcome of a file workflow
    pub fn report(&mut self, outcome: FileOutcome) -> CommandStatus {
        match outcome {
            FileOutcome::Done(message) => {
                if !message.is_empty() {
                    self.display.set_message(message);
                }
                CommandStatus::Success
            }
            FileOutcome::Cancelled => CommandStatus::Abort,
            FileOutcome::Failed(message) => {
                warn!(%message, "file operation failed");
                self.display.set_message(message);
                CommandStatus::Failure
            }
        }
    }
}
