use leptos::reactive::owner::Owner;

use super::*;
use crate::state::chat::{CLEARED_MESSAGE, WELCOME_MESSAGE};

fn texts(chat: ChatController) -> Vec<(String, bool)> {
    chat.state()
        .with_untracked(|s| s.messages().map(|m| (m.text.clone(), m.is_user)).collect())
}

fn owned_controller() -> (Owner, ChatController) {
    let owner = Owner::new();
    let chat = owner.with(ChatController::new);
    (owner, chat)
}

// =============================================================
// Controller operations
// =============================================================

#[test]
fn controller_starts_with_welcome() {
    let (_owner, chat) = owned_controller();
    assert_eq!(texts(chat), vec![(WELCOME_MESSAGE.to_owned(), false)]);
}

#[test]
fn append_and_typing_indicator_through_controller() {
    let (_owner, chat) = owned_controller();
    assert!(chat.append_message("hi", true).is_some());
    let typing = chat.show_typing_indicator().unwrap();
    assert_eq!(chat.state().with_untracked(ChatState::pending_replies), 1);
    assert!(chat.remove_typing_indicator(&typing));
    assert!(!chat.remove_typing_indicator(&typing));
}

#[test]
fn begin_query_ignores_blank_input() {
    let (_owner, chat) = owned_controller();
    assert!(chat.begin_query("   \n\t").is_none());
    assert!(!chat.submit_query(""));
    assert_eq!(texts(chat).len(), 1);
}

#[test]
fn begin_query_echoes_trimmed_input_and_shows_typing() {
    let (_owner, chat) = owned_controller();
    let pending = chat.begin_query("  Who works in Pune?  ").unwrap();
    assert_eq!(pending.query, "Who works in Pune?");
    assert_eq!(texts(chat)[1], ("Who works in Pune?".to_owned(), true));
    let last_id = chat.state().with_untracked(|s| s.entries.last().map(|e| e.id().to_owned()));
    assert_eq!(last_id, Some(pending.typing_id));
}

#[test]
fn user_text_is_stored_verbatim() {
    let (_owner, chat) = owned_controller();
    chat.begin_query("\u{1b}[1;31m[[x]]\u{1b}[0m").unwrap();
    assert_eq!(texts(chat)[1].0, "\u{1b}[1;31m[[x]]\u{1b}[0m");
}

#[test]
fn complete_query_replaces_typing_with_answer() {
    let (_owner, chat) = owned_controller();
    let pending = chat.begin_query("revenue?").unwrap();
    chat.complete_query(&pending.typing_id, Ok("42".to_owned()));
    assert_eq!(chat.state().with_untracked(ChatState::pending_replies), 0);
    assert_eq!(texts(chat)[1..], [("revenue?".to_owned(), true), ("42".to_owned(), false)]);
}

#[test]
fn failed_query_shows_apology() {
    let (_owner, chat) = owned_controller();
    let pending = chat.begin_query("revenue?").unwrap();
    chat.complete_query(&pending.typing_id, Err("Failed to fetch".to_owned()));
    assert_eq!(chat.state().with_untracked(ChatState::pending_replies), 0);
    assert_eq!(texts(chat).last(), Some(&(APOLOGY_MESSAGE.to_owned(), false)));
}

#[test]
fn concurrent_queries_settle_independently() {
    let (_owner, chat) = owned_controller();
    let first = chat.begin_query("first").unwrap();
    let second = chat.begin_query("second").unwrap();
    assert_eq!(chat.state().with_untracked(ChatState::pending_replies), 2);

    chat.complete_query(&second.typing_id, Ok("answer two".to_owned()));
    assert_eq!(chat.state().with_untracked(ChatState::pending_replies), 1);
    chat.complete_query(&first.typing_id, Ok("answer one".to_owned()));

    let got: Vec<_> = texts(chat).into_iter().skip(1).map(|(t, _)| t).collect();
    assert_eq!(got, vec!["first", "second", "answer two", "answer one"]);
}

#[test]
fn late_answer_after_clear_lands_after_greeting() {
    let (_owner, chat) = owned_controller();
    let pending = chat.begin_query("slow question").unwrap();
    chat.clear_history();
    assert_eq!(chat.state().with_untracked(ChatState::pending_replies), 0);

    chat.complete_query(&pending.typing_id, Ok("late".to_owned()));
    assert_eq!(
        texts(chat),
        vec![(CLEARED_MESSAGE.to_owned(), false), ("late".to_owned(), false)]
    );
}

// =============================================================
// Teardown
// =============================================================

#[test]
fn updates_after_owner_dropped_are_ignored() {
    let (owner, chat) = owned_controller();
    let pending = chat.begin_query("in flight").unwrap();
    drop(owner);

    assert!(chat.append_message("late", false).is_none());
    assert!(chat.show_typing_indicator().is_none());
    assert!(!chat.remove_typing_indicator(&pending.typing_id));
    chat.clear_history();
    chat.complete_query(&pending.typing_id, Ok("late".to_owned()));
    assert!(chat.begin_query("again").is_none());
    assert!(!chat.submit_query("again"));
    assert!(chat.state().try_with_untracked(|s| s.entries.len()).is_none());
}
