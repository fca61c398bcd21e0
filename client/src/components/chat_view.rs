//! Chat view: message history, typing indicators and the composer.
//!
//! SYSTEM CONTEXT
//! ==============
//! The view owns a [`ChatController`] for its lifetime. Each send posts one
//! `/query` request; several may be in flight at once, each with its own
//! typing indicator. Answers that arrive after the view is unmounted are
//! dropped because the controller's signal has been disposed.

use leptos::prelude::*;

use crate::components::message_bubble::{MessageBubble, TypingBubble};
use crate::state::chat::{APOLOGY_MESSAGE, ChatEntry, ChatState, PendingQuery};

#[cfg(test)]
#[path = "chat_view_test.rs"]
mod chat_view_test;

/// Component-scoped handle over the chat state.
///
/// Every method is a no-op once the owning view is gone.
#[derive(Clone, Copy)]
pub struct ChatController {
    state: RwSignal<ChatState>,
}

impl ChatController {
    /// Create the controller in the current reactive owner, seeded with the
    /// welcome message.
    pub fn new() -> Self {
        Self { state: RwSignal::new(ChatState::new()) }
    }

    pub fn state(self) -> RwSignal<ChatState> {
        self.state
    }

    /// Append a message. Returns its id, or `None` after teardown.
    pub fn append_message(self, text: impl Into<String>, is_user: bool) -> Option<String> {
        let text = text.into();
        self.state.try_update(|s| s.append_message(text, is_user))
    }

    pub fn show_typing_indicator(self) -> Option<String> {
        self.state.try_update(ChatState::show_typing_indicator)
    }

    pub fn remove_typing_indicator(self, id: &str) -> bool {
        self.state.try_update(|s| s.remove_typing_indicator(id)).unwrap_or(false)
    }

    pub fn clear_history(self) {
        self.state.try_update(ChatState::clear_history);
    }

    /// Echo `raw` as a user message and show a typing indicator for it.
    /// Blank input is ignored.
    pub fn begin_query(self, raw: &str) -> Option<PendingQuery> {
        let query = raw.trim();
        if query.is_empty() {
            return None;
        }
        self.append_message(query, true)?;
        let typing_id = self.show_typing_indicator()?;
        Some(PendingQuery { query: query.to_owned(), typing_id })
    }

    /// Drop the query's typing indicator and append the answer, or the
    /// apology if the request failed.
    pub fn complete_query(self, typing_id: &str, outcome: Result<String, String>) {
        self.remove_typing_indicator(typing_id);
        let text = outcome.unwrap_or_else(|_| APOLOGY_MESSAGE.to_owned());
        self.append_message(text, false);
    }

    /// Echo `raw` as a user message and send it to the query endpoint.
    ///
    /// Returns `false` without doing anything when `raw` is blank.
    pub fn submit_query(self, raw: &str) -> bool {
        let Some(pending) = self.begin_query(raw) else {
            return false;
        };

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let outcome = crate::net::api::post_query(&pending.query).await;
            if let Err(e) = &outcome {
                log::error!("query failed: {e}");
            }
            self.complete_query(&pending.typing_id, outcome);
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = pending;

        true
    }
}

impl Default for ChatController {
    fn default() -> Self {
        Self::new()
    }
}

/// Chat view with history, clear button and an auto-growing input.
#[component]
pub fn ChatView() -> impl IntoView {
    let chat = ChatController::new();
    let state = chat.state();

    let input = RwSignal::new(String::new());
    let messages_ref = NodeRef::<leptos::html::Div>::new();
    let input_ref = NodeRef::<leptos::html::Textarea>::new();

    on_cleanup(|| {
        #[cfg(feature = "hydrate")]
        log::debug!("chat view disposed");
    });

    Effect::new(move || {
        let _ = state.with(|s| s.entries.len());

        #[cfg(feature = "hydrate")]
        {
            if let Some(el) = messages_ref.get() {
                let scroll_height = el.scroll_height();
                el.set_scroll_top(scroll_height);
            }
        }
    });

    let do_send = move || {
        if chat.submit_query(&input.get_untracked()) {
            input.set(String::new());

            #[cfg(feature = "hydrate")]
            {
                if let Some(el) = input_ref.get_untracked() {
                    crate::util::autosize::reset(&el);
                }
            }
        }
    };

    let on_input = move |ev: leptos::ev::Event| {
        input.set(event_target_value(&ev));

        #[cfg(feature = "hydrate")]
        {
            if let Some(el) = input_ref.get_untracked() {
                crate::util::autosize::fit_to_content(&el);
            }
        }
    };

    let on_keydown = move |ev: leptos::ev::KeyboardEvent| {
        if ev.key() == "Enter" && !ev.shift_key() {
            ev.prevent_default();
            do_send();
        }
    };

    let can_send = move || !input.get().trim().is_empty();

    view! {
        <section class="chat-view">
            <header class="chat-view__header">
                <div class="chat-view__title">
                    <h1>"Insight AI"</h1>
                    <span class="chat-view__subtitle">"Enterprise knowledge assistant"</span>
                </div>
                <button class="btn chat-view__clear" on:click=move |_| chat.clear_history()>
                    "Clear chat"
                </button>
            </header>

            <div class="chat-view__messages" node_ref=messages_ref>
                <For
                    each=move || state.get().entries
                    key=|entry: &ChatEntry| entry.id().to_owned()
                    children=|entry: ChatEntry| match entry {
                        ChatEntry::Message(message) => view! { <MessageBubble message=message/> }.into_any(),
                        ChatEntry::Typing { .. } => view! { <TypingBubble/> }.into_any(),
                    }
                />
            </div>

            <div class="chat-view__input-row">
                <textarea
                    class="chat-view__input"
                    rows="1"
                    placeholder="Ask about employees, clients, IT tickets, revenue or policies..."
                    node_ref=input_ref
                    prop:value=move || input.get()
                    on:input=on_input
                    on:keydown=on_keydown
                ></textarea>
                <button class="btn btn--primary chat-view__send" on:click=move |_| do_send() disabled=move || !can_send()>
                    "Send"
                </button>
            </div>
        </section>
    }
}
