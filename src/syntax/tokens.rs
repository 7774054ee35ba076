//! Token types for syntax highlighting
//!
//! This module defines the categories the tokenizer assigns to spans of
//! source text and their default visual styles.

use super::style::{Color, Style};

/// Semantic token categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Line and block comments
    Comment,
    /// Quoted and backtick strings
    String,
    /// Numeric literals, validated only loosely
    Number,
    /// Words in the active language's keyword set
    Keyword,
    /// Capitalized identifiers and HTML tags
    Type,
    /// Well-known runtime globals (console, len, ...)
    Builtin,
    /// Everything else
    Plain,
}

impl TokenKind {
    /// Get the default terminal style for this token kind
    pub fn default_style(&self) -> Style {
        match self {
            TokenKind::Comment => Style::fg(Color::Green).with_italic(),
            TokenKind::String => Style::fg(Color::Red),
            TokenKind::Number => Style::fg(Color::BrightGreen),
            TokenKind::Keyword => Style::fg(Color::Blue).with_bold(),
            TokenKind::Type => Style::fg(Color::Cyan),
            TokenKind::Builtin => Style::fg(Color::Yellow),
            TokenKind::Plain => Style::default(),
        }
    }

    /// CSS color used by the HTML renderer (None = inherit)
    pub fn html_color(&self) -> Option<&'static str> {
        match self {
            TokenKind::Keyword => Some("#0000ff"),
            TokenKind::Type => Some("#267f99"),
            TokenKind::String => Some("#a31515"),
            TokenKind::Comment => Some("#008000"),
            TokenKind::Number => Some("#098658"),
            TokenKind::Builtin => Some("#795e26"),
            TokenKind::Plain => None,
        }
    }
}

/// A classified span of source text
///
/// Offsets are byte positions into the tokenized text and always fall on
/// char boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    /// Byte offset where this token starts (inclusive)
    pub start: usize,
    /// Byte offset where this token ends (exclusive)
    pub end: usize,
    pub kind: TokenKind,
}

impl Token {
    pub fn new(start: usize, end: usize, kind: TokenKind) -> Self {
        Self { start, end, kind }
    }

    /// The raw text of this token within `source`
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.start..self.end]
    }
}
