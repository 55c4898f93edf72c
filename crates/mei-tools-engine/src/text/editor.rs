use crate::events::{EventDispatcher, TextEvent};

use super::{Position, TextBuffer, TextView};

/// A text buffer wired to an event dispatcher.
///
/// Mutations mark the buffer dirty; `settle` emits `ContentSettled` once per
/// burst of edits. Cursor placement emits `CursorMoved` immediately.
#[derive(Debug, Default)]
pub struct SourceEditor {
    buffer: TextBuffer,
    events: EventDispatcher,
    dirty: bool,
}

impl SourceEditor {
    pub fn new(buffer: TextBuffer) -> Self {
        Self {
            buffer,
            events: EventDispatcher::new(),
            dirty: false,
        }
    }

    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    pub fn events_mut(&mut self) -> &mut EventDispatcher {
        &mut self.events
    }

    pub fn set_text(&mut self, text: &str) {
        self.buffer.set_text(text);
        self.dirty = true;
    }

    pub fn insert(&mut self, at: Position, text: &str) {
        self.buffer.insert(at, text);
        self.dirty = true;
    }

    /// Emit `ContentSettled` if anything changed since the last call.
    pub fn settle(&mut self) -> bool {
        if !self.dirty {
            return false;
        }
        self.dirty = false;
        self.events.emit(TextEvent::ContentSettled, &self.buffer);
        true
    }

    pub fn move_cursor(&mut self, position: Position) {
        self.buffer.set_cursor(position);
        self.events.emit(TextEvent::CursorMoved, &self.buffer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_settle_emits_once_per_burst() {
        let settled = Rc::new(RefCell::new(Vec::new()));
        let mut editor = SourceEditor::new(TextBuffer::from("<staff>\n</staff>"));
        let s = Rc::clone(&settled);
        editor
            .events_mut()
            .on_content_settled(move |text| s.borrow_mut().push(text.line_count()));

        editor.insert(Position::new(1, 0), "<layer/>\n");
        editor.insert(Position::new(1, 0), "<layer/>\n");
        assert!(editor.settle());
        assert!(!editor.settle());

        assert_eq!(*settled.borrow(), vec![4]);
    }

    #[test]
    fn test_move_cursor_emits_clamped_position() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut editor = SourceEditor::new(TextBuffer::from("<a/>"));
        let s = Rc::clone(&seen);
        editor
            .events_mut()
            .on_cursor_moved(move |text| s.borrow_mut().push(text.cursor()));

        editor.move_cursor(Position::new(0, 2));
        editor.move_cursor(Position::new(5, 0));

        assert_eq!(*seen.borrow(), vec![Position::new(0, 2), Position::new(0, 0)]);
    }
}
