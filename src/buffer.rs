//! Buffer representation - one open document (tab) and its metadata

use std::fmt;
use std::path::{Path, PathBuf};

use crate::line;
use crate::syntax::{self, Token};

/// Session-unique buffer identifier, never reused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BufferId(pub u64);

impl fmt::Display for BufferId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// How a buffer came into existence
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
    /// "New file": empty or scratch content, not bound to disk
    NewBlank,
    /// Loaded from the given path
    Disk(PathBuf),
}

impl Origin {
    /// Whether a buffer created this way starts Dirty
    ///
    /// Blank buffers start Clean: nothing has been typed yet, so there is
    /// nothing to lose on close.
    pub fn starts_dirty(&self) -> bool {
        false
    }
}

/// An open document
#[derive(Debug)]
pub struct Buffer {
    id: BufferId,
    /// Display name (basename only)
    name: String,
    /// Full text, LF line endings
    content: String,
    /// Lower-cased extension of `name`
    extension: String,
    /// Display label derived from `extension`
    language: &'static str,
    /// Whether buffer has unsaved changes
    dirty: bool,
    /// Bound file path (None for unsaved buffers)
    file_path: Option<PathBuf>,
    /// Classification of `content`
    tokens: Vec<Token>,
    line_count: usize,
}

impl Buffer {
    /// Create a buffer; called by the session, which owns id allocation
    pub(crate) fn new(id: BufferId, name: impl Into<String>, content: impl Into<String>, origin: Origin) -> Self {
        let dirty = origin.starts_dirty();
        let file_path = match origin {
            Origin::NewBlank => None,
            Origin::Disk(path) => Some(path),
        };
        let mut buffer = Self {
            id,
            name: String::new(),
            content: content.into(),
            extension: String::new(),
            language: syntax::detect_language_label(""),
            dirty,
            file_path,
            tokens: Vec::new(),
            line_count: 1,
        };
        buffer.rename(name.into());
        buffer
    }

    pub fn id(&self) -> BufferId {
        self.id
    }

    /// Get buffer name
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Human-readable language label ("C#", "Plain Text", ...)
    pub fn language(&self) -> &'static str {
        self.language
    }

    /// Check if buffer has unsaved changes
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Get file path if bound
    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn line_count(&self) -> usize {
        self.line_count
    }

    /// Apply an edit to the content and mark the buffer Dirty
    pub(crate) fn edit(&mut self, f: impl FnOnce(&mut String)) {
        f(&mut self.content);
        self.dirty = true;
        self.refresh();
    }

    /// Record a successful save to `path`
    ///
    /// Returns true if the binding changed and the buffer was renamed.
    pub(crate) fn mark_saved(&mut self, path: PathBuf) -> bool {
        self.dirty = false;
        if self.file_path.as_deref() == Some(path.as_path()) {
            return false;
        }
        let name = syntax::base_name(&path.to_string_lossy()).to_string();
        self.file_path = Some(path);
        self.rename(name);
        true
    }

    /// Set the name and everything derived from it
    fn rename(&mut self, name: String) {
        self.extension = syntax::extension_of(&name);
        self.language = syntax::detect_language_label(&name);
        self.name = name;
        self.refresh();
    }

    /// Re-tokenize and recount lines after a content or language change
    fn refresh(&mut self) {
        self.tokens = syntax::tokenize(&self.content, &self.extension);
        self.line_count = line::line_count(&self.content);
    }
}
