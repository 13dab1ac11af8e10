//! Append-only conversation history.

use super::message::ConversationMessage;

/// Holds the ordered message history and the conversation-started latch.
///
/// The store has no interior locking; it is owned behind the dispatcher's
/// lock and mutated by that single writer only. Any snapshot a reader
/// observes is a strict prefix of all appends in call order.
#[derive(Debug, Clone, Default)]
pub struct ConversationStore {
    messages: Vec<ConversationMessage>,
    started: bool,
}

impl ConversationStore {
    /// Creates an empty store with the given initial latch value.
    pub fn new(started: bool) -> Self {
        Self {
            messages: Vec::new(),
            started,
        }
    }

    /// Appends a message to the tail of the history. Never fails.
    pub fn append(&mut self, message: ConversationMessage) {
        self.messages.push(message);
    }

    /// The full history, oldest first.
    pub fn messages(&self) -> &[ConversationMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Whether the conversation has started.
    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Latches the conversation as started. One-way: within a controller
    /// lifetime only [`clear`](Self::clear) can revert it.
    pub fn mark_started(&mut self) {
        self.started = true;
    }

    /// Thread reset: drops the history and re-seeds the latch.
    pub fn clear(&mut self, started: bool) {
        self.messages.clear();
        self.started = started;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_preserves_order() {
        let mut store = ConversationStore::new(false);
        store.append(ConversationMessage::user("first"));
        store.append(ConversationMessage::system("second"));

        let messages = store.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].content.text(), "first");
        assert_eq!(messages[1].content.text(), "second");
    }

    #[test]
    fn started_latch_is_one_way() {
        let mut store = ConversationStore::new(false);
        assert!(!store.is_started());

        store.mark_started();
        assert!(store.is_started());

        // Marking again keeps it latched.
        store.mark_started();
        assert!(store.is_started());
    }

    #[test]
    fn clear_reseeds_latch_and_drops_history() {
        let mut store = ConversationStore::new(false);
        store.mark_started();
        store.append(ConversationMessage::user("old thread"));

        store.clear(false);

        assert!(store.is_empty());
        assert!(!store.is_started());
    }
}
