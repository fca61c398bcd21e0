//! Message and typing-indicator bubbles.

use leptos::prelude::*;

use crate::state::chat::ChatMessage;
use crate::util::markup::format_bot_html;

/// One chat message. Bot text is rendered from its markup; user text is
/// shown as typed.
#[component]
pub fn MessageBubble(message: ChatMessage) -> impl IntoView {
    let avatar = message.avatar();
    let is_user = message.is_user;

    let body = if is_user {
        view! { <p>{message.text}</p> }.into_any()
    } else {
        let html = format_bot_html(&message.text);
        view! { <p inner_html=html></p> }.into_any()
    };

    view! {
        <div class="message" class:user=is_user class:bot={!is_user}>
            <div class="message-inner">
                <div class="message-avatar">{avatar}</div>
                <div class="message-content">{body}</div>
            </div>
        </div>
    }
}

/// Animated placeholder shown while an answer is pending.
#[component]
pub fn TypingBubble() -> impl IntoView {
    view! {
        <div class="message bot typing-indicator">
            <div class="message-inner">
                <div class="message-avatar">"AI"</div>
                <div class="message-content">
                    <div class="typing">
                        <div class="dot"></div>
                        <div class="dot"></div>
                        <div class="dot"></div>
                    </div>
                </div>
            </div>
        </div>
    }
}
