//! Grow-with-content sizing for the chat input textarea.
//!
//! The textarea tracks its content height until [`MAX_INPUT_HEIGHT_PX`],
//! then stops growing and scrolls instead. Requires a browser environment
//! for [`fit_to_content`]; the sizing rule itself is pure.

#[cfg(test)]
#[path = "autosize_test.rs"]
mod autosize_test;

pub const MAX_INPUT_HEIGHT_PX: i32 = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputSizing {
    pub height_px: i32,
    pub scrollable: bool,
}

impl InputSizing {
    pub fn overflow_y(self) -> &'static str {
        if self.scrollable { "scroll" } else { "hidden" }
    }
}

/// Sizing for a textarea whose content measures `scroll_height` pixels.
pub fn sizing_for(scroll_height: i32) -> InputSizing {
    let height = scroll_height.max(0);
    InputSizing { height_px: height.min(MAX_INPUT_HEIGHT_PX), scrollable: height > MAX_INPUT_HEIGHT_PX }
}

/// Resize `el` to its content.
#[cfg(feature = "hydrate")]
pub fn fit_to_content(el: &web_sys::HtmlElement) {
    let style = el.style();
    // Collapse first so scroll_height reflects content, not the old height.
    let _ = style.set_property("height", "auto");
    let sizing = sizing_for(el.scroll_height());
    let _ = style.set_property("height", &format!("{}px", sizing.height_px));
    let _ = style.set_property("overflow-y", sizing.overflow_y());
}

/// Return `el` to its natural single-row height.
#[cfg(feature = "hydrate")]
pub fn reset(el: &web_sys::HtmlElement) {
    let style = el.style();
    let _ = style.set_property("height", "auto");
    let _ = style.set_property("overflow-y", "hidden");
}
