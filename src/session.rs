//! Session state - the ordered set of open buffers
//!
//! The session owns every buffer, the active-buffer pointer and the id
//! allocator. Operations referring to an id that is no longer present are
//! no-ops: UI events can arrive after the buffer they target was closed.
//!
//! State changes are queued as [`SessionEvent`]s; the presentation layer
//! drains them after each input instead of being called from here.

use std::path::PathBuf;

use tracing::debug;

use crate::buffer::{Buffer, BufferId, Origin};

/// Notifications for the presentation layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    Created(BufferId),
    Activated(BufferId),
    Edited(BufferId),
    Saved(BufferId),
    /// Save As bound the buffer to a new file name
    Renamed(BufferId),
    Closed(BufferId),
}

/// Tab cycling direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// Result of a close request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseOutcome {
    Closed,
    /// Dirty buffer and the user declined to discard it
    Kept,
    /// No buffer with that id
    Missing,
}

/// All open buffers
#[derive(Debug)]
pub struct Session {
    /// Buffers in tab order
    buffers: Vec<Buffer>,
    active: Option<BufferId>,
    next_id: u64,
    events: Vec<SessionEvent>,
}

impl Session {
    pub fn new() -> Self {
        Self {
            buffers: Vec::new(),
            active: None,
            next_id: 1,
            events: Vec::new(),
        }
    }

    fn allocate_id(&mut self) -> BufferId {
        let id = BufferId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Append a new buffer and make it active
    pub fn create_buffer(&mut self, name: impl Into<String>, content: impl Into<String>, origin: Origin) -> BufferId {
        let id = self.allocate_id();
        let buffer = Buffer::new(id, name, content, origin);
        debug!(%id, name = buffer.name(), language = buffer.language(), "buffer created");
        self.buffers.push(buffer);
        self.events.push(SessionEvent::Created(id));
        self.activate(id);
        id
    }

    /// Replace a buffer's content
    pub fn edit_buffer(&mut self, id: BufferId, new_content: impl Into<String>) {
        let new_content = new_content.into();
        self.edit_with(id, move |text| *text = new_content);
    }

    /// Edit a buffer's content in place
    pub fn edit_with(&mut self, id: BufferId, f: impl FnOnce(&mut String)) {
        let Some(buffer) = self.get_mut(id) else {
            return;
        };
        let was_dirty = buffer.is_dirty();
        buffer.edit(f);
        if !was_dirty {
            debug!(%id, "buffer dirty");
        }
        self.events.push(SessionEvent::Edited(id));
    }

    /// Make a buffer active
    pub fn activate(&mut self, id: BufferId) {
        if self.get(id).is_none() {
            return;
        }
        self.active = Some(id);
        self.events.push(SessionEvent::Activated(id));
    }

    /// Close a buffer, asking `confirm` first if it has unsaved changes
    ///
    /// When the active buffer closes, the last remaining buffer becomes active.
    pub fn close(&mut self, id: BufferId, confirm: impl FnOnce(&Buffer) -> bool) -> CloseOutcome {
        let Some(idx) = self.index_of(id) else {
            return CloseOutcome::Missing;
        };
        if self.buffers[idx].is_dirty() && !confirm(&self.buffers[idx]) {
            debug!(%id, "close declined");
            return CloseOutcome::Kept;
        }

        self.buffers.remove(idx);
        debug!(%id, remaining = self.buffers.len(), "buffer closed");
        self.events.push(SessionEvent::Closed(id));

        if self.active == Some(id) {
            self.active = None;
            if let Some(last) = self.buffers.last().map(Buffer::id) {
                self.activate(last);
            }
        }
        CloseOutcome::Closed
    }

    /// Record a successful write of buffer `id` to `path`
    pub fn mark_saved(&mut self, id: BufferId, path: PathBuf) {
        let Some(buffer) = self.get_mut(id) else {
            return;
        };
        let renamed = buffer.mark_saved(path);
        debug!(%id, renamed, "buffer clean");
        self.events.push(SessionEvent::Saved(id));
        if renamed {
            self.events.push(SessionEvent::Renamed(id));
        }
    }

    /// Activate the next or previous buffer, wrapping around
    pub fn cycle(&mut self, direction: Direction) {
        let len = self.buffers.len();
        if len == 0 {
            return;
        }
        let next = match (self.active_index(), direction) {
            (Some(idx), Direction::Forward) => (idx + 1) % len,
            (Some(idx), Direction::Backward) => (idx + len - 1) % len,
            (None, Direction::Forward) => 0,
            (None, Direction::Backward) => len - 1,
        };
        let id = self.buffers[next].id();
        self.activate(id);
    }

    pub fn get(&self, id: BufferId) -> Option<&Buffer> {
        self.buffers.iter().find(|b| b.id() == id)
    }

    fn get_mut(&mut self, id: BufferId) -> Option<&mut Buffer> {
        self.buffers.iter_mut().find(|b| b.id() == id)
    }

    fn index_of(&self, id: BufferId) -> Option<usize> {
        self.buffers.iter().position(|b| b.id() == id)
    }

    fn active_index(&self) -> Option<usize> {
        self.active.and_then(|id| self.index_of(id))
    }

    pub fn active_id(&self) -> Option<BufferId> {
        self.active
    }

    pub fn active(&self) -> Option<&Buffer> {
        self.active.and_then(|id| self.get(id))
    }

    /// Buffers in tab order
    pub fn buffers(&self) -> &[Buffer] {
        &self.buffers
    }

    pub fn len(&self) -> usize {
        self.buffers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffers.is_empty()
    }

    /// Whether any buffer has unsaved changes
    pub fn has_dirty(&self) -> bool {
        self.buffers.iter().any(Buffer::is_dirty)
    }

    /// Take all events queued since the last call
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::TokenKind;

    fn disk(path: &str) -> Origin {
        Origin::Disk(PathBuf::from(path))
    }

    /// Session with clean buffers A, B, C; C is active
    fn abc() -> (Session, [BufferId; 3]) {
        let mut session = Session::new();
        let a = session.create_buffer("A.cs", "", disk("/p/A.cs"));
        let b = session.create_buffer("B.cs", "", disk("/p/B.cs"));
        let c = session.create_buffer("C.cs", "", disk("/p/C.cs"));
        session.drain_events();
        (session, [a, b, c])
    }

    fn names(session: &Session) -> Vec<&str> {
        session.buffers().iter().map(Buffer::name).collect()
    }

    #[test]
    fn test_ids_monotonic_and_never_reused() {
        let (mut session, [a, b, c]) = abc();
        assert!(a < b && b < c);
        session.close(c, |_| true);
        let d = session.create_buffer("D.cs", "", Origin::NewBlank);
        assert!(d > c);
    }

    #[test]
    fn test_create_activates_and_emits() {
        let mut session = Session::new();
        assert!(session.active().is_none());
        let id = session.create_buffer("untitled", "", Origin::NewBlank);
        assert_eq!(session.active_id(), Some(id));
        assert_eq!(
            session.drain_events(),
            vec![SessionEvent::Created(id), SessionEvent::Activated(id)]
        );
        assert!(session.drain_events().is_empty());
    }

    #[test]
    fn test_dirty_transitions() {
        let mut session = Session::new();
        let id = session.create_buffer("foo.py", "x = 1", disk("/p/foo.py"));
        assert!(!session.get(id).unwrap().is_dirty());

        session.edit_buffer(id, "x = 2");
        assert!(session.get(id).unwrap().is_dirty());

        session.mark_saved(id, PathBuf::from("/p/foo.py"));
        let buffer = session.get(id).unwrap();
        assert!(!buffer.is_dirty());
        assert_eq!(buffer.name(), "foo.py");
    }

    #[test]
    fn test_blank_buffer_starts_clean() {
        let mut session = Session::new();
        let id = session.create_buffer("untitled", "", Origin::NewBlank);
        assert!(!session.get(id).unwrap().is_dirty());
        assert_eq!(session.close(id, |_| panic!("clean buffers close without asking")), CloseOutcome::Closed);
    }

    #[test]
    fn test_edit_retokenizes_and_counts_lines() {
        let mut session = Session::new();
        let id = session.create_buffer("foo.py", "", Origin::NewBlank);
        session.edit_buffer(id, "# comment\ndef f():\n    return 1");
        let buffer = session.get(id).unwrap();
        assert_eq!(buffer.line_count(), 3);
        assert_eq!(buffer.tokens()[0].kind, TokenKind::Comment);
        assert_eq!(buffer.tokens()[0].text(buffer.content()), "# comment");
    }

    #[test]
    fn test_unknown_ids_are_noops() {
        let (mut session, [_, _, c]) = abc();
        let ghost = BufferId(99);
        session.edit_buffer(ghost, "x");
        session.activate(ghost);
        session.mark_saved(ghost, PathBuf::from("/x"));
        assert_eq!(session.close(ghost, |_| true), CloseOutcome::Missing);
        assert_eq!(session.active_id(), Some(c));
        assert!(session.drain_events().is_empty());
        assert!(!session.has_dirty());
    }

    #[test]
    fn test_activate_idempotent() {
        let (mut session, [a, _, _]) = abc();
        session.activate(a);
        let once = (session.active_id(), names(&session).join(","));
        session.activate(a);
        let twice = (session.active_id(), names(&session).join(","));
        assert_eq!(once, twice);
        assert_eq!(session.active().map(Buffer::name), Some("A.cs"));
    }

    #[test]
    fn test_cycle_wraparound() {
        let (mut session, [a, _, c]) = abc();
        session.activate(a);
        session.cycle(Direction::Forward);
        session.cycle(Direction::Forward);
        assert_eq!(session.active_id(), Some(c));

        session.activate(a);
        session.cycle(Direction::Backward);
        assert_eq!(session.active_id(), Some(c));

        session.cycle(Direction::Forward);
        assert_eq!(session.active_id(), Some(a));
    }

    #[test]
    fn test_cycle_empty_is_noop() {
        let mut session = Session::new();
        session.cycle(Direction::Forward);
        assert!(session.active_id().is_none());
        assert!(session.drain_events().is_empty());
    }

    #[test]
    fn test_close_active_last_selects_previous() {
        let (mut session, [_, b, c]) = abc();
        assert_eq!(session.close(c, |_| true), CloseOutcome::Closed);
        assert_eq!(session.active_id(), Some(b));
    }

    #[test]
    fn test_close_active_middle_selects_last() {
        let (mut session, [_, b, c]) = abc();
        session.activate(b);
        session.close(b, |_| true);
        assert_eq!(session.active_id(), Some(c));
        assert_eq!(names(&session), vec!["A.cs", "C.cs"]);
    }

    #[test]
    fn test_close_inactive_keeps_active() {
        let (mut session, [a, _, c]) = abc();
        session.close(a, |_| true);
        assert_eq!(session.active_id(), Some(c));
        assert_eq!(session.drain_events(), vec![SessionEvent::Closed(a)]);
    }

    #[test]
    fn test_close_all_leaves_no_active() {
        let (mut session, ids) = abc();
        for id in ids {
            session.close(id, |_| true);
        }
        assert!(session.is_empty());
        assert!(session.active_id().is_none());
    }

    #[test]
    fn test_close_dirty_asks() {
        let (mut session, [a, _, c]) = abc();
        session.edit_buffer(a, "changed");

        let mut asked = None;
        let outcome = session.close(a, |buffer| {
            asked = Some(buffer.name().to_string());
            false
        });
        assert_eq!(outcome, CloseOutcome::Kept);
        assert_eq!(asked.as_deref(), Some("A.cs"));
        assert_eq!(session.len(), 3);
        assert!(session.get(a).unwrap().is_dirty());

        session.activate(a);
        assert_eq!(session.close(a, |_| true), CloseOutcome::Closed);
        assert_eq!(session.active_id(), Some(c));
    }

    #[test]
    fn test_save_as_renames() {
        let mut session = Session::new();
        let id = session.create_buffer("untitled", "print(1)", Origin::NewBlank);
        session.edit_buffer(id, "print(2)");
        session.drain_events();

        session.mark_saved(id, PathBuf::from("/scripts/run.py"));
        let buffer = session.get(id).unwrap();
        assert_eq!(buffer.name(), "run.py");
        assert_eq!(buffer.language(), "Python");
        assert_eq!(buffer.file_path(), Some(std::path::Path::new("/scripts/run.py")));
        assert_eq!(
            session.drain_events(),
            vec![SessionEvent::Saved(id), SessionEvent::Renamed(id)]
        );
    }

    #[test]
    fn test_has_dirty() {
        let (mut session, [_, b, _]) = abc();
        assert!(!session.has_dirty());
        session.edit_with(b, |text| text.push('x'));
        assert!(session.has_dirty());
        assert_eq!(session.get(b).unwrap().content(), "x");
    }
}
