//! Chat page: the single route of the app.

use leptos::prelude::*;

use crate::components::chat_view::ChatView;

#[component]
pub fn ChatPage() -> impl IntoView {
    view! {
        <main class="chat-page">
            <ChatView/>
        </main>
    }
}
