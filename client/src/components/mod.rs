//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! `chat_view` owns the chat state and composer; `message_bubble` renders
//! individual entries.

pub mod chat_view;
pub mod message_bubble;
