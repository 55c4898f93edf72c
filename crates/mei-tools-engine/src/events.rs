//! Text-view notifications: one dispatcher, one explicit listener list per
//! event kind.
//!
//! Listeners run synchronously, in registration order, on the thread that
//! emits. Each one receives the text as it is at emission time.

use crate::text::TextView;

/// The two notifications a text view raises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextEvent {
    /// Edits have stopped arriving; the content is ready to re-render.
    ContentSettled,
    /// The cursor moved without a content change.
    CursorMoved,
}

/// Handle returned on registration, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

pub type Listener = Box<dyn FnMut(&dyn TextView)>;

#[derive(Default)]
pub struct EventDispatcher {
    next_id: u64,
    content_settled: Vec<(ListenerId, Listener)>,
    cursor_moved: Vec<(ListenerId, Listener)>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_content_settled(
        &mut self,
        listener: impl FnMut(&dyn TextView) + 'static,
    ) -> ListenerId {
        let id = self.allocate_id();
        self.content_settled.push((id, Box::new(listener)));
        id
    }

    pub fn on_cursor_moved(&mut self, listener: impl FnMut(&dyn TextView) + 'static) -> ListenerId {
        let id = self.allocate_id();
        self.cursor_moved.push((id, Box::new(listener)));
        id
    }

    /// Unsubscribe a listener. Returns `false` if the id was not registered.
    pub fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.len();
        self.content_settled.retain(|(lid, _)| *lid != id);
        self.cursor_moved.retain(|(lid, _)| *lid != id);
        self.len() != before
    }

    pub fn emit(&mut self, event: TextEvent, text: &dyn TextView) {
        let listeners = match event {
            TextEvent::ContentSettled => &mut self.content_settled,
            TextEvent::CursorMoved => &mut self.cursor_moved,
        };
        log::trace!("dispatching {event:?} to {} listener(s)", listeners.len());
        for (_, listener) in listeners.iter_mut() {
            listener(text);
        }
    }

    pub fn len(&self) -> usize {
        self.content_settled.len() + self.cursor_moved.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn allocate_id(&mut self) -> ListenerId {
        self.next_id += 1;
        ListenerId(self.next_id)
    }
}

impl std::fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("content_settled", &self.content_settled.len())
            .field("cursor_moved", &self.cursor_moved.len())
            .finish()
    }
}
