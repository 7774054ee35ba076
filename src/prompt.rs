//! Minibuffer prompts on the bottom terminal row
//!
//! Blocking line input and yes/no questions; these stand in for the
//! file dialogs and confirmation boxes of a desktop editor.

use crate::error::Result;
use crate::gateway::Prompter;
use crate::input::{self, special, Key};
use crate::terminal::Terminal;

/// Line editor state for one prompt
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromptState {
    pub prompt: String,
    pub input: String,
    pub default: Option<String>,
}

/// Result of feeding a key to a prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptStep {
    Continue,
    Done(String),
    Cancelled,
}

impl PromptState {
    pub fn new(prompt: &str, default: Option<&str>) -> Self {
        Self {
            prompt: prompt.to_string(),
            input: String::new(),
            default: default.map(str::to_string),
        }
    }

    /// Text shown in the minibuffer
    pub fn render(&self) -> String {
        match &self.default {
            Some(def) if self.input.is_empty() => format!("{} (default {}): ", self.prompt, def),
            _ => format!("{}: {}", self.prompt, self.input),
        }
    }

    pub fn handle_key(&mut self, key: Key) -> PromptStep {
        if input::is_cancel(key) {
            return PromptStep::Cancelled;
        }
        if key == Key::special(special::ENTER) {
            let value = if self.input.is_empty() {
                self.default.clone().unwrap_or_default()
            } else {
                self.input.clone()
            };
            return PromptStep::Done(value);
        }
        if key == Key::special(special::BACKSPACE) {
            self.input.pop();
        } else if key.is_self_insert() {
            if let Some(ch) = key.base_char() {
                self.input.push(ch);
            }
        }
        PromptStep::Continue
    }
}

/// Prompter drawing on the terminal's last row
pub struct Minibuffer<'a> {
    terminal: &'a mut Terminal,
}

impl<'a> Minibuffer<'a> {
    pub fn new(terminal: &'a mut Terminal) -> Self {
        Self { terminal }
    }

    fn show(&mut self, text: &str) -> Result<()> {
        let row = self.terminal.rows().saturating_sub(1);
        self.terminal.move_cursor(row, 0)?;
        self.terminal.reset_attributes()?;
        self.terminal.write_str(text)?;
        self.terminal.clear_to_eol()?;
        self.terminal.set_cursor_visible(true)?;
        self.terminal.flush()
    }

    fn next_key(&mut self) -> Result<Option<Key>> {
        Ok(self.terminal.read_key()?.and_then(input::translate_key))
    }
}

impl Prompter for Minibuffer<'_> {
    fn ask(&mut self, prompt: &str, default: Option<&str>) -> Result<Option<String>> {
        let mut state = PromptState::new(prompt, default);
        loop {
            self.show(&state.render())?;
            let Some(key) = self.next_key()? else {
                continue;
            };
            match state.handle_key(key) {
                PromptStep::Continue => {}
                PromptStep::Done(value) => return Ok(Some(value)),
                PromptStep::Cancelled => return Ok(None),
            }
        }
    }

    fn confirm(&mut self, question: &str) -> Result<bool> {
        let text = format!("{} (y or n) ", question);
        loop {
            self.show(&text)?;
            let Some(key) = self.next_key()? else {
                continue;
            };
            if input::is_cancel(key) {
                return Ok(false);
            }
            match key.base_char().filter(|_| key.is_self_insert()) {
                Some('y') | Some('Y') => return Ok(true),
                Some('n') | Some('N') => return Ok(false),
                _ => {
                    let _ = self.terminal.beep();
                }
            }
        }
    }
}
