#[cfg(test)]
#[path = "chat_test.rs"]
mod chat_test;

/// First bot message shown when the page loads.
pub const WELCOME_MESSAGE: &str =
    "Hello! I'm Insight AI. Ask me about employees, clients, IT tickets, revenue, or company policies.";

/// Bot message shown after the history is cleared.
pub const CLEARED_MESSAGE: &str = "Chat history cleared. How can I help you?";

/// Bot message shown when a query cannot be answered.
pub const APOLOGY_MESSAGE: &str = "I'm sorry, I encountered an error connecting to the enterprise server.";

/// State for the chat view.
///
/// Entries render in append order, keyed by id. Messages and typing
/// indicators share the list so an indicator stays where it was shown even
/// if later messages land after it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChatState {
    pub entries: Vec<ChatEntry>,
}

/// A single chat message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatMessage {
    pub id: String,
    pub text: String,
    pub is_user: bool,
}

impl ChatMessage {
    pub fn new(text: impl Into<String>, is_user: bool) -> Self {
        Self { id: uuid::Uuid::new_v4().to_string(), text: text.into(), is_user }
    }

    /// Avatar label rendered next to the message.
    pub fn avatar(&self) -> &'static str {
        if self.is_user { "ME" } else { "AI" }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChatEntry {
    Message(ChatMessage),
    Typing { id: String },
}

impl ChatEntry {
    pub fn id(&self) -> &str {
        match self {
            Self::Message(msg) => &msg.id,
            Self::Typing { id } => id,
        }
    }
}

/// A query echoed into the history, awaiting its answer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingQuery {
    pub query: String,
    pub typing_id: String,
}

impl ChatState {
    /// Fresh state holding the welcome message.
    pub fn new() -> Self {
        let mut state = Self::default();
        state.append_message(WELCOME_MESSAGE, false);
        state
    }

    /// Append a message and return its id.
    pub fn append_message(&mut self, text: impl Into<String>, is_user: bool) -> String {
        let msg = ChatMessage::new(text, is_user);
        let id = msg.id.clone();
        self.entries.push(ChatEntry::Message(msg));
        id
    }

    /// Append a typing indicator and return the handle used to remove it.
    pub fn show_typing_indicator(&mut self) -> String {
        let id = uuid::Uuid::new_v4().to_string();
        self.entries.push(ChatEntry::Typing { id: id.clone() });
        id
    }

    /// Remove the typing indicator `id`. Returns `false` if it is already gone.
    pub fn remove_typing_indicator(&mut self, id: &str) -> bool {
        let before = self.entries.len();
        self.entries
            .retain(|entry| !matches!(entry, ChatEntry::Typing { id: typing } if typing == id));
        self.entries.len() != before
    }

    /// Empty the history, then greet again.
    pub fn clear_history(&mut self) {
        self.entries.clear();
        self.append_message(CLEARED_MESSAGE, false);
    }

    pub fn messages(&self) -> impl Iterator<Item = &ChatMessage> {
        self.entries.iter().filter_map(|entry| match entry {
            ChatEntry::Message(msg) => Some(msg),
            ChatEntry::Typing { .. } => None,
        })
    }

    /// Number of queries still waiting for an answer.
    pub fn pending_replies(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| matches!(entry, ChatEntry::Typing { .. }))
            .count()
    }
}
