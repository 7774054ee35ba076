//! Input handling - key translation

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Key modifier flags
pub mod key_flags {
    pub const CONTROL: u32 = 0x1000_0000;
    pub const META: u32 = 0x2000_0000;
    /// Only recorded for special keys; shifted chars arrive already uppercased
    pub const SHIFT: u32 = 0x4000_0000;
    pub const SPEC: u32 = 0x8000_0000;
}

/// Codes for non-character keys, combined with `key_flags::SPEC`
pub mod special {
    pub const ESC: u32 = 0x1b;
    pub const ENTER: u32 = 0x0d;
    pub const TAB: u32 = 0x09;
    pub const BACKSPACE: u32 = 0x7f;
    pub const HOME: u32 = 0x47;
    pub const UP: u32 = 0x48;
    pub const PAGE_UP: u32 = 0x49;
    pub const LEFT: u32 = 0x4b;
    pub const RIGHT: u32 = 0x4d;
    pub const END: u32 = 0x4f;
    pub const DOWN: u32 = 0x50;
    pub const PAGE_DOWN: u32 = 0x51;
    pub const DELETE: u32 = 0x53;
}

const MODIFIER_MASK: u32 = 0xF000_0000;

/// Represents a key input with modifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Key(pub u32);

impl Key {
    /// Create a key from a character
    pub fn char(ch: char) -> Self {
        Key(ch as u32)
    }

    /// Create a control key (Ctrl+x)
    pub fn ctrl(ch: char) -> Self {
        Key(key_flags::CONTROL | ch.to_ascii_lowercase() as u32)
    }

    /// Create a meta key (Alt+x)
    pub fn meta(ch: char) -> Self {
        Key(key_flags::META | ch.to_ascii_lowercase() as u32)
    }

    /// Create a special key (arrows, Enter, Tab, ...)
    pub fn special(code: u32) -> Self {
        Key(key_flags::SPEC | code)
    }

    /// Add modifier flags
    pub fn with(self, flags: u32) -> Self {
        Key(self.0 | flags)
    }

    /// Get the raw key code
    pub fn code(&self) -> u32 {
        self.0
    }

    pub fn is_ctrl(&self) -> bool {
        self.0 & key_flags::CONTROL != 0
    }

    pub fn is_meta(&self) -> bool {
        self.0 & key_flags::META != 0
    }

    pub fn is_shift(&self) -> bool {
        self.0 & key_flags::SHIFT != 0
    }

    pub fn is_special(&self) -> bool {
        self.0 & key_flags::SPEC != 0
    }

    /// Get the base character (without modifiers)
    pub fn base_char(&self) -> Option<char> {
        if self.is_special() {
            return None;
        }
        char::from_u32(self.0 & !MODIFIER_MASK)
    }

    /// Check if this is a printable self-insert character
    pub fn is_self_insert(&self) -> bool {
        if self.0 & MODIFIER_MASK != 0 {
            return false;
        }
        char::from_u32(self.0).is_some_and(|ch| !ch.is_control())
    }

    /// Human-readable name, e.g. "Ctrl+S", "Alt+S", "Ctrl+Shift+Tab"
    pub fn display_name(&self) -> String {
        let mut result = String::new();
        if self.is_ctrl() {
            result.push_str("Ctrl+");
        }
        if self.is_meta() {
            result.push_str("Alt+");
        }
        if self.is_shift() {
            result.push_str("Shift+");
        }

        if self.is_special() {
            let name = match self.0 & 0xFF {
                special::ESC => "Esc",
                special::ENTER => "Enter",
                special::TAB => "Tab",
                special::BACKSPACE => "Backspace",
                special::HOME => "Home",
                special::UP => "Up",
                special::PAGE_UP => "PageUp",
                special::LEFT => "Left",
                special::RIGHT => "Right",
                special::END => "End",
                special::DOWN => "Down",
                special::PAGE_DOWN => "PageDown",
                special::DELETE => "Delete",
                n if (0x3b..=0x46).contains(&n) => return format!("{}F{}", result, n - 0x3a),
                n => return format!("{}special-0x{:02x}", result, n),
            };
            result.push_str(name);
            return result;
        }

        match self.base_char() {
            Some(' ') => result.push_str("Space"),
            Some(ch) if self.is_ctrl() || self.is_meta() => result.push(ch.to_ascii_uppercase()),
            Some(ch) => result.push(ch),
            None => result.push_str(&format!("0x{:x}", self.0 & !MODIFIER_MASK)),
        }
        result
    }
}

/// Translate a crossterm KeyEvent to our Key representation
pub fn translate_key(event: KeyEvent) -> Option<Key> {
    let KeyEvent {
        code, modifiers, kind, ..
    } = event;

    // Only process key press events, ignore release and repeat
    // This is critical on Windows where crossterm sends all event types
    if kind != KeyEventKind::Press {
        return None;
    }

    let ctrl = modifiers.contains(KeyModifiers::CONTROL);
    let alt = modifiers.contains(KeyModifiers::ALT);

    let special_key = |code: u32, shift: bool| {
        let mut key = Key::special(code);
        if ctrl {
            key = key.with(key_flags::CONTROL);
        }
        if alt {
            key = key.with(key_flags::META);
        }
        if shift {
            key = key.with(key_flags::SHIFT);
        }
        key
    };
    let shift = modifiers.contains(KeyModifiers::SHIFT);

    match code {
        KeyCode::Char(ch) => Some(if ctrl && alt {
            Key::ctrl(ch).with(key_flags::META)
        } else if ctrl {
            Key::ctrl(ch)
        } else if alt {
            Key::meta(ch)
        } else {
            Key::char(ch)
        }),
        KeyCode::Enter => Some(special_key(special::ENTER, false)),
        KeyCode::Tab => Some(special_key(special::TAB, shift)),
        KeyCode::BackTab => Some(special_key(special::TAB, true)),
        KeyCode::Backspace => Some(special_key(special::BACKSPACE, false)),
        KeyCode::Esc => Some(special_key(special::ESC, false)),
        KeyCode::Delete => Some(special_key(special::DELETE, shift)),
        KeyCode::Home => Some(special_key(special::HOME, shift)),
        KeyCode::End => Some(special_key(special::END, shift)),
        KeyCode::PageUp => Some(special_key(special::PAGE_UP, shift)),
        KeyCode::PageDown => Some(special_key(special::PAGE_DOWN, shift)),
        KeyCode::Up => Some(special_key(special::UP, shift)),
        KeyCode::Down => Some(special_key(special::DOWN, shift)),
        KeyCode::Left => Some(special_key(special::LEFT, shift)),
        KeyCode::Right => Some(special_key(special::RIGHT, shift)),
        KeyCode::F(n) => Some(special_key(0x3a + n as u32, shift)),
        _ => None,
    }
}

/// Keys that dismiss a prompt
pub fn is_cancel(key: Key) -> bool {
    key == Key::special(special::ESC) || key == Key::ctrl('g')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn test_plain_char() {
        let key = translate_key(press(KeyCode::Char('a'), KeyModifiers::NONE)).unwrap();
        assert_eq!(key, Key::char('a'));
        assert!(key.is_self_insert());
        assert_eq!(key.base_char(), Some('a'));
    }

    #[test]
    fn test_shifted_char_is_self_insert() {
        let key = translate_key(press(KeyCode::Char('A'), KeyModifiers::SHIFT)).unwrap();
        assert_eq!(key, Key::char('A'));
        assert!(key.is_self_insert());
    }

    #[test]
    fn test_ctrl_and_alt() {
        let ctrl_s = translate_key(press(KeyCode::Char('s'), KeyModifiers::CONTROL)).unwrap();
        assert_eq!(ctrl_s, Key::ctrl('s'));
        assert!(!ctrl_s.is_self_insert());

        let alt_s = translate_key(press(KeyCode::Char('s'), KeyModifiers::ALT)).unwrap();
        assert_eq!(alt_s, Key::meta('s'));
    }

    #[test]
    fn test_tab_variants() {
        let tab = translate_key(press(KeyCode::Tab, KeyModifiers::NONE)).unwrap();
        assert_eq!(tab, Key::special(special::TAB));

        let ctrl_tab = translate_key(press(KeyCode::Tab, KeyModifiers::CONTROL)).unwrap();
        assert_eq!(ctrl_tab, Key::special(special::TAB).with(key_flags::CONTROL));

        let ctrl_shift_tab = translate_key(press(
            KeyCode::BackTab,
            KeyModifiers::CONTROL | KeyModifiers::SHIFT,
        ))
        .unwrap();
        assert_eq!(
            ctrl_shift_tab,
            Key::special(special::TAB).with(key_flags::CONTROL | key_flags::SHIFT)
        );
        assert_eq!(ctrl_shift_tab.display_name(), "Ctrl+Shift+Tab");
    }

    #[test]
    fn test_release_ignored() {
        let mut event = press(KeyCode::Char('a'), KeyModifiers::NONE);
        event.kind = KeyEventKind::Release;
        assert_eq!(translate_key(event), None);
    }

    #[test]
    fn test_display_name() {
        assert_eq!(Key::ctrl('s').display_name(), "Ctrl+S");
        assert_eq!(Key::meta('s').display_name(), "Alt+S");
        assert_eq!(Key::special(special::PAGE_DOWN).with(key_flags::CONTROL).display_name(), "Ctrl+PageDown");
        assert_eq!(Key::special(0x3b).display_name(), "F1");
        assert_eq!(Key::char('x').display_name(), "x");
    }

    #[test]
    fn test_cancel_keys() {
        assert!(is_cancel(Key::special(special::ESC)));
        assert!(is_cancel(Key::ctrl('g')));
        assert!(!is_cancel(Key::char('g')));
    }
}
