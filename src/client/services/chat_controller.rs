//! Chat session state: the message list of the currently open conversation,
//! its delivery states, and the client-side search over it.
//!
//! Everything here is a pure state machine; the GUI layer feeds it REST
//! results and socket events and renders whatever it holds. Fetches started
//! before a conversation switch are neutralized by a generation token: each
//! `select` bumps the generation, and `install_history` refuses a batch
//! tagged with a stale one.

use std::collections::HashMap;

use log::debug;

use crate::common::models::{ChatMessage, Conversation, DeliveryState};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightSegment {
    pub text: String,
    pub highlighted: bool,
}

#[derive(Debug, Default)]
pub struct ChatSession {
    conversation: Option<Conversation>,
    generation: u64,
    messages: Vec<ChatMessage>,
    filtered: Vec<ChatMessage>,
    search_term: String,
    /// Per-conversation preview shown in the sidebar.
    last_messages: HashMap<String, ChatMessage>,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn conversation(&self) -> Option<&Conversation> {
        self.conversation.as_ref()
    }

    pub fn conversation_id(&self) -> Option<&str> {
        self.conversation.as_ref().map(|c| c.id.as_str())
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn filtered_messages(&self) -> &[ChatMessage] {
        &self.filtered
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn last_message(&self, conversation_id: &str) -> Option<&ChatMessage> {
        self.last_messages.get(conversation_id)
    }

    /// Open `conversation`: the local list and the search-narrowed view are
    /// replaced by the next `install_history`, the search term resets.
    /// Returns the generation the history fetch must carry.
    pub fn select(&mut self, conversation: Conversation) -> u64 {
        self.generation += 1;
        self.conversation = Some(conversation);
        self.messages.clear();
        self.filtered.clear();
        self.search_term.clear();
        self.generation
    }

    /// Close the current conversation without opening another one.
    pub fn deselect(&mut self) {
        self.generation += 1;
        self.conversation = None;
        self.messages.clear();
        self.filtered.clear();
        self.search_term.clear();
    }

    /// Install a fetched message history. A batch whose `generation` is not
    /// current belongs to a conversation the user already navigated away
    /// from and is dropped.
    pub fn install_history(&mut self, generation: u64, history: Vec<ChatMessage>) -> bool {
        if generation != self.generation {
            debug!(
                "[CHAT] Dropping stale history batch (generation {} != {})",
                generation, self.generation
            );
            return false;
        }
        let mut messages: Vec<ChatMessage> = Vec::with_capacity(history.len());
        for message in history {
            if !messages.iter().any(|m| m.id == message.id) {
                messages.push(message);
            }
        }
        messages.sort_by_key(|m| m.sent_at);
        if let Some(last) = messages.last() {
            self.last_messages.insert(last.conversation_id.clone(), last.clone());
        }
        self.messages = messages;
        self.run_search();
        true
    }

    /// A live message arrived on the socket. Applied only when it belongs to
    /// the open conversation; background conversations keep no unread
    /// accounting. The sidebar preview is refreshed either way.
    pub fn apply_live_message(&mut self, conversation_id: &str, message: ChatMessage) -> bool {
        self.last_messages.insert(conversation_id.to_string(), message.clone());
        let open = match &self.conversation {
            Some(conversation) if conversation.id == conversation_id => true,
            _ => false,
        };
        if !open {
            return false;
        }
        if self.messages.iter().any(|m| m.id == message.id) {
            return false;
        }
        self.messages.push(message.clone());
        self.filtered.push(message);
        true
    }

    /// A delivery-state event arrived. Overwrites the state of the matching
    /// message in both views; a message not yet loaded is silently dropped.
    /// Events that would move a message backwards (e.g. seen -> pending) are
    /// ignored: delivery state is monotonic.
    pub fn apply_state_event(&mut self, message_id: &str, new_state: DeliveryState) -> bool {
        let mut applied = false;
        for message in self.messages.iter_mut().chain(self.filtered.iter_mut()) {
            if message.id == message_id && message.state < new_state {
                message.state = new_state;
                applied = true;
            }
        }
        if let Some(last) = self
            .last_messages
            .values_mut()
            .find(|m| m.id == message_id && m.state < new_state)
        {
            last.state = new_state;
        }
        applied
    }

    /// Remember the message a successful send created, so the sidebar
    /// preview is current without refetching.
    pub fn record_last_message(&mut self, message: ChatMessage) {
        self.last_messages.insert(message.conversation_id.clone(), message);
    }

    pub fn set_search_term(&mut self, term: String) {
        self.search_term = term;
    }

    /// Case-insensitive substring filter over the loaded list. Never hits
    /// the server; an empty term restores the full list.
    pub fn run_search(&mut self) {
        let term = self.search_term.trim().to_lowercase();
        if term.is_empty() {
            self.filtered = self.messages.clone();
        } else {
            self.filtered = self
                .messages
                .iter()
                .filter(|m| m.content.to_lowercase().contains(&term))
                .cloned()
                .collect();
        }
    }
}

/// Validate outgoing text: empty or whitespace-only input is rejected
/// before any network call is made.
pub fn sendable_text(input: &str) -> Option<&str> {
    if input.trim().is_empty() {
        None
    } else {
        Some(input)
    }
}

/// Split `content` into plain and highlighted segments, matching `term`
/// case-insensitively. An empty term yields a single plain segment.
pub fn highlight_segments(content: &str, term: &str) -> Vec<HighlightSegment> {
    let term = term.trim();
    if term.is_empty() || content.is_empty() {
        return vec![HighlightSegment { text: content.to_string(), highlighted: false }];
    }

    let content_chars: Vec<char> = content.chars().collect();
    let folded: Vec<char> = content_chars
        .iter()
        .map(|c| c.to_lowercase().next().unwrap_or(*c))
        .collect();
    let needle: Vec<char> = term
        .chars()
        .map(|c| c.to_lowercase().next().unwrap_or(c))
        .collect();

    let mut segments = Vec::new();
    let mut plain_start = 0;
    let mut i = 0;
    while i + needle.len() <= folded.len() {
        if folded[i..i + needle.len()] == needle[..] {
            if plain_start < i {
                segments.push(HighlightSegment {
                    text: content_chars[plain_start..i].iter().collect(),
                    highlighted: false,
                });
            }
            segments.push(HighlightSegment {
                text: content_chars[i..i + needle.len()].iter().collect(),
                highlighted: true,
            });
            i += needle.len();
            plain_start = i;
        } else {
            i += 1;
        }
    }
    if plain_start < content_chars.len() {
        segments.push(HighlightSegment {
            text: content_chars[plain_start..].iter().collect(),
            highlighted: false,
        });
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn conversation(id: &str) -> Conversation {
        Conversation {
            id: id.to_string(),
            participant_one_id: "u1".into(),
            participant_two_id: "u2".into(),
            created_at: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
        }
    }

    fn message(id: &str, conversation_id: &str, content: &str, minute: u32) -> ChatMessage {
        ChatMessage {
            id: id.to_string(),
            conversation_id: conversation_id.to_string(),
            sender_id: "u2".into(),
            content: content.to_string(),
            sent_at: Utc.with_ymd_and_hms(2024, 3, 1, 12, minute, 0).unwrap(),
            state: DeliveryState::Pending,
        }
    }

    #[test]
    fn live_message_appends_exactly_once_preserving_order() {
        let mut session = ChatSession::new();
        let generation = session.select(conversation("c1"));
        assert!(session.install_history(
            generation,
            vec![message("m1", "c1", "hola", 0), message("m2", "c1", "que tal", 1)],
        ));

        let incoming = message("m3", "c1", "bien", 2);
        assert!(session.apply_live_message("c1", incoming.clone()));
        let ids: Vec<&str> = session.messages().iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["m1", "m2", "m3"]);

        // Redelivery of the same id is a no-op
        assert!(!session.apply_live_message("c1", incoming));
        assert_eq!(session.messages().len(), 3);
    }

    #[test]
    fn event_for_other_conversation_is_not_applied() {
        let mut session = ChatSession::new();
        let generation_a = session.select(conversation("a"));
        session.install_history(generation_a, vec![message("m1", "a", "hola", 0)]);
        let generation_b = session.select(conversation("b"));
        session.install_history(generation_b, vec![message("m2", "b", "hey", 0)]);

        assert!(!session.apply_live_message("a", message("m3", "a", "late", 1)));
        let ids: Vec<&str> = session.messages().iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["m2"]);
    }

    #[test]
    fn state_event_updates_only_the_state_field() {
        let mut session = ChatSession::new();
        let generation = session.select(conversation("c1"));
        session.install_history(generation, vec![message("m1", "c1", "hola", 0)]);

        assert!(session.apply_state_event("m1", DeliveryState::Seen));
        let updated = &session.messages()[0];
        assert_eq!(updated.state, DeliveryState::Seen);
        assert_eq!(updated.content, "hola");
        assert_eq!(updated.sent_at, Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap());
        assert_eq!(session.filtered_messages()[0].state, DeliveryState::Seen);
    }

    #[test]
    fn state_event_for_unknown_message_is_dropped() {
        let mut session = ChatSession::new();
        let generation = session.select(conversation("c1"));
        session.install_history(generation, vec![message("m1", "c1", "hola", 0)]);
        assert!(!session.apply_state_event("missing", DeliveryState::Seen));
        assert_eq!(session.messages()[0].state, DeliveryState::Pending);
    }

    #[test]
    fn regressing_state_event_is_ignored() {
        let mut session = ChatSession::new();
        let generation = session.select(conversation("c1"));
        session.install_history(generation, vec![message("m1", "c1", "hola", 0)]);
        session.apply_state_event("m1", DeliveryState::Seen);
        assert!(!session.apply_state_event("m1", DeliveryState::Pending));
        assert_eq!(session.messages()[0].state, DeliveryState::Seen);
    }

    #[test]
    fn stale_history_batch_is_dropped() {
        let mut session = ChatSession::new();
        let stale_generation = session.select(conversation("a"));
        let generation_b = session.select(conversation("b"));

        // Fetch for "a" resolves after the user already opened "b"
        assert!(!session.install_history(stale_generation, vec![message("m1", "a", "old", 0)]));
        assert!(session.messages().is_empty());

        assert!(session.install_history(generation_b, vec![message("m2", "b", "new", 0)]));
        assert_eq!(session.messages()[0].id, "m2");
    }

    #[test]
    fn search_filters_and_empty_term_restores() {
        let mut session = ChatSession::new();
        let generation = session.select(conversation("c1"));
        session.install_history(
            generation,
            vec![
                message("m1", "c1", "Ecuaciones diferenciales", 0),
                message("m2", "c1", "nos vemos", 1),
                message("m3", "c1", "las ECUACIONES del capitulo 4", 2),
            ],
        );

        session.set_search_term("ecuaciones".into());
        session.run_search();
        let ids: Vec<&str> = session.filtered_messages().iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["m1", "m3"]);

        session.set_search_term(String::new());
        session.run_search();
        assert_eq!(session.filtered_messages().len(), 3);
    }

    #[test]
    fn select_resets_search_term() {
        let mut session = ChatSession::new();
        let generation = session.select(conversation("c1"));
        session.install_history(generation, vec![message("m1", "c1", "hola", 0)]);
        session.set_search_term("hola".into());
        session.run_search();

        session.select(conversation("c2"));
        assert_eq!(session.search_term(), "");
        assert!(session.filtered_messages().is_empty());
    }

    #[test]
    fn history_is_deduplicated_and_sorted() {
        let mut session = ChatSession::new();
        let generation = session.select(conversation("c1"));
        session.install_history(
            generation,
            vec![
                message("m2", "c1", "segundo", 5),
                message("m1", "c1", "primero", 1),
                message("m2", "c1", "segundo otra vez", 5),
            ],
        );
        let ids: Vec<&str> = session.messages().iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["m1", "m2"]);
    }

    #[test]
    fn blank_text_is_not_sendable() {
        assert_eq!(sendable_text(""), None);
        assert_eq!(sendable_text("   \n\t"), None);
        assert_eq!(sendable_text(" hola "), Some(" hola "));
    }

    #[test]
    fn highlight_wraps_case_insensitive_matches() {
        let segments = highlight_segments("Las Ecuaciones y mas ecuaciones", "ecuaciones");
        let rendered: Vec<(String, bool)> =
            segments.into_iter().map(|s| (s.text, s.highlighted)).collect();
        assert_eq!(
            rendered,
            vec![
                ("Las ".to_string(), false),
                ("Ecuaciones".to_string(), true),
                (" y mas ".to_string(), false),
                ("ecuaciones".to_string(), true),
            ]
        );
    }

    #[test]
    fn highlight_with_empty_term_is_a_single_plain_segment() {
        let segments = highlight_segments("hola", "");
        assert_eq!(segments.len(), 1);
        assert!(!segments[0].highlighted);
        assert_eq!(segments[0].text, "hola");
    }
}
