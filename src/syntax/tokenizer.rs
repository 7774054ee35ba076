//! Single-pass tokenizer
//!
//! Classifies a whole buffer in one left-to-right scan. At each position the
//! rules are tried in a fixed priority order and the first match consumes a
//! maximal span:
//!
//! 1. line comment (`//`, or `#` in Python/shell after whitespace or `{(,;`)
//! 2. block comment `/* ... */`
//! 3. quoted string, closed by the quote or an unescaped newline
//! 4. backtick string, may span lines
//! 5. number (loose: digits, hex letters, `xXuUlL_.`)
//! 6. word: keyword, type (capitalized), builtin or plain identifier
//! 7. HTML tag `<...>` (html only)
//! 8. any other single character
//!
//! The output covers the input exactly, so concatenating token texts yields
//! the original string.

use super::builtin::is_builtin;
use super::language::LanguageFamily;
use super::tokens::{Token, TokenKind};

/// Tokenize `code` using the rules for `extension`
pub fn tokenize(code: &str, extension: &str) -> Vec<Token> {
    Tokenizer::new(code, extension).run()
}

struct Tokenizer<'a> {
    src: &'a str,
    bytes: &'a [u8],
    pos: usize,
    family: LanguageFamily,
    hash_comments: bool,
    html_tags: bool,
    tokens: Vec<Token>,
}

impl<'a> Tokenizer<'a> {
    fn new(src: &'a str, extension: &str) -> Self {
        Self {
            src,
            bytes: src.as_bytes(),
            pos: 0,
            family: LanguageFamily::for_extension(extension),
            hash_comments: matches!(extension, "py" | "sh"),
            html_tags: extension == "html",
            tokens: Vec::new(),
        }
    }

    fn run(mut self) -> Vec<Token> {
        while self.pos < self.bytes.len() {
            let start = self.pos;
            let kind = self.scan();
            debug_assert!(self.pos > start);
            self.tokens.push(Token::new(start, self.pos, kind));
        }
        self.tokens
    }

    /// Consume one token starting at `self.pos` and return its kind
    fn scan(&mut self) -> TokenKind {
        let b = self.bytes[self.pos];
        let next = self.peek(1);

        if (b == b'/' && next == Some(b'/')) || self.at_hash_comment() {
            self.pos = self.find_from(self.pos, "\n").unwrap_or(self.bytes.len());
            return TokenKind::Comment;
        }

        if b == b'/' && next == Some(b'*') {
            // The opening star may also close, so `/*/` is a whole comment
            self.pos = self
                .find_from(self.pos + 1, "*/")
                .map_or(self.bytes.len(), |end| end + 2);
            return TokenKind::Comment;
        }

        if b == b'"' || b == b'\'' {
            self.skip_string(b, false);
            return TokenKind::String;
        }

        if b == b'`' {
            self.skip_string(b, true);
            return TokenKind::String;
        }

        if b.is_ascii_digit() || (b == b'.' && next.is_some_and(|c| c.is_ascii_digit())) {
            self.skip_while(is_number_byte);
            return TokenKind::Number;
        }

        if is_word_start(b) {
            let start = self.pos;
            self.skip_while(is_word_byte);
            return self.classify_word(&self.src[start..self.pos]);
        }

        if self.html_tags && b == b'<' {
            self.pos = self
                .find_from(self.pos + 1, ">")
                .map_or(self.bytes.len(), |end| end + 1);
            return TokenKind::Type;
        }

        self.pos = self.char_end(self.pos);
        TokenKind::Plain
    }

    fn classify_word(&self, word: &str) -> TokenKind {
        if self.family.is_keyword(word) {
            TokenKind::Keyword
        } else if word.as_bytes()[0].is_ascii_uppercase() {
            TokenKind::Type
        } else if is_builtin(word) {
            TokenKind::Builtin
        } else {
            TokenKind::Plain
        }
    }

    /// `#` opens a comment only at input start or after whitespace, `{`, `(`, `,` or `;`
    fn at_hash_comment(&self) -> bool {
        if !self.hash_comments || self.bytes[self.pos] != b'#' {
            return false;
        }
        match self.src[..self.pos].chars().next_back() {
            None => true,
            Some(prev) => prev.is_whitespace() || matches!(prev, '{' | '(' | ',' | ';'),
        }
    }

    /// Skip a string opened by `quote`. A backslash always consumes the next char.
    fn skip_string(&mut self, quote: u8, multiline: bool) {
        self.pos += 1;
        while self.pos < self.bytes.len() {
            match self.bytes[self.pos] {
                b'\\' => self.pos = self.char_end(self.pos + 1),
                c if c == quote => {
                    self.pos += 1;
                    return;
                }
                b'\n' if !multiline => return,
                _ => self.pos += 1,
            }
        }
    }

    fn skip_while(&mut self, pred: fn(u8) -> bool) {
        while self.pos < self.bytes.len() && pred(self.bytes[self.pos]) {
            self.pos += 1;
        }
    }

    fn peek(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.pos + offset).copied()
    }

    /// Byte offset just past the char starting at `pos`, clamped to the input
    fn char_end(&self, pos: usize) -> usize {
        self.src
            .get(pos..)
            .and_then(|rest| rest.chars().next())
            .map_or(self.bytes.len(), |ch| pos + ch.len_utf8())
    }

    fn find_from(&self, from: usize, needle: &str) -> Option<usize> {
        self.src.get(from..)?.find(needle).map(|idx| from + idx)
    }
}

fn is_number_byte(b: u8) -> bool {
    b.is_ascii_hexdigit() || matches!(b, b'x' | b'X' | b'u' | b'U' | b'l' | b'L' | b'_' | b'.')
}

fn is_word_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_' || b == b'$'
}

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'$'
}
