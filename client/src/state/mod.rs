//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is plain data mutated through small methods so the chat rules can be
//! tested without a browser; components wrap it in signals.

pub mod chat;
