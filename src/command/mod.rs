//! Command dispatch system
//!
//! This module provides the key binding table and command implementations.
//! Commands are organized into submodules by category.

mod editing;
mod files;
mod navigation;

use std::collections::HashMap;

use crate::editor::EditorState;
use crate::error::Result;
use crate::input::{key_flags, special, Key};

/// Command result status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandStatus {
    Success,
    /// Nothing to act on (beeps)
    Failure,
    /// User cancelled a prompt or confirmation
    Abort,
}

/// Command function signature
pub type CommandFn = fn(&mut EditorState) -> Result<CommandStatus>;

/// Key binding entry with command function and name
struct BindingEntry {
    function: CommandFn,
    name: &'static str,
}

/// Key binding table
pub struct KeyTable {
    bindings: HashMap<u32, BindingEntry>,
}

impl KeyTable {
    /// Create an empty key table
    pub fn new() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// Create key table with default bindings
    pub fn with_defaults() -> Self {
        let mut table = Self::new();
        table.setup_defaults();
        table
    }

    /// Add a key binding with command name
    pub fn bind_named(&mut self, key: Key, cmd: CommandFn, name: &'static str) {
        self.bindings.insert(key.code(), BindingEntry { function: cmd, name });
    }

    /// Look up a command for a key
    pub fn lookup(&self, key: Key) -> Option<CommandFn> {
        self.bindings.get(&key.code()).map(|e| e.function)
    }

    /// Look up a command name for a key
    pub fn lookup_name(&self, key: Key) -> Option<&'static str> {
        self.bindings.get(&key.code()).map(|e| e.name)
    }

    /// Set up default key bindings
    fn setup_defaults(&mut self) {
        use editing::*;
        use files::*;
        use navigation::*;

        let ctrl_special = |code| Key::special(code).with(key_flags::CONTROL);

        // Files and tabs
        self.bind_named(Key::ctrl('n'), new_file, "new-file");
        self.bind_named(Key::ctrl('t'), new_file, "new-file");
        self.bind_named(Key::ctrl('o'), open_file, "open-file");
        self.bind_named(Key::ctrl('s'), save_file, "save-file");
        self.bind_named(Key::meta('s'), save_file_as, "save-file-as");
        self.bind_named(Key::ctrl('w'), close_tab, "close-tab");
        self.bind_named(ctrl_special(special::TAB), next_tab, "next-tab");
        self.bind_named(ctrl_special(special::PAGE_DOWN), next_tab, "next-tab");
        self.bind_named(
            Key::special(special::TAB).with(key_flags::CONTROL | key_flags::SHIFT),
            previous_tab,
            "previous-tab",
        );
        self.bind_named(ctrl_special(special::PAGE_UP), previous_tab, "previous-tab");
        self.bind_named(Key::ctrl('q'), quit, "quit");

        // Cursor movement
        self.bind_named(Key::special(special::RIGHT), forward_char, "forward-char");
        self.bind_named(Key::special(special::LEFT), backward_char, "backward-char");
        self.bind_named(Key::special(special::DOWN), next_line, "next-line");
        self.bind_named(Key::special(special::UP), previous_line, "previous-line");
        self.bind_named(Key::special(special::HOME), beginning_of_line, "beginning-of-line");
        self.bind_named(Key::special(special::END), end_of_line, "end-of-line");
        self.bind_named(Key::special(special::PAGE_DOWN), scroll_down, "scroll-down");
        self.bind_named(Key::special(special::PAGE_UP), scroll_up, "scroll-up");
        self.bind_named(ctrl_special(special::HOME), beginning_of_buffer, "beginning-of-buffer");
        self.bind_named(ctrl_special(special::END), end_of_buffer, "end-of-buffer");

        // Editing
        self.bind_named(Key::special(special::ENTER), newline, "newline");
        self.bind_named(Key::special(special::TAB), insert_indent, "insert-indent");
        self.bind_named(Key::special(special::BACKSPACE), delete_char_backward, "delete-backward-char");
        self.bind_named(Key::special(special::DELETE), delete_char_forward, "delete-char");

        // Screen
        self.bind_named(Key::ctrl('l'), redraw_display, "redraw-display");
    }
}

impl Default for KeyTable {
    fn default() -> Self {
        Self::with_defaults()
    }
}
