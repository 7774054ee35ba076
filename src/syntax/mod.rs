//! Syntax highlighting
//!
//! This module provides:
//! - Language detection (display labels, keyword families)
//! - The single-pass tokenizer
//! - Token styles for the terminal and HTML output

mod builtin;
mod html;
mod language;
mod style;
mod tokenizer;
mod tokens;

pub use html::render_document;
pub use language::{base_name, detect_language_label, extension_of};
pub use style::{Color, Style};
pub use tokenizer::tokenize;
pub use tokens::{Token, TokenKind};
