//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! `markup` renders bot answers to HTML; `autosize` keeps browser-only
//! textarea handling out of the components.

pub mod autosize;
pub mod markup;
