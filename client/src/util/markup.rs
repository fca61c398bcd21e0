//! Bot answer markup rendering.
//!
//! The query service formats answers for a terminal: SGR color codes
//! (`ESC[1;32m` ... `ESC[0m`), `[[file]]` source references and plain
//! newlines. [`format_bot_html`] turns that into HTML for the chat view.
//!
//! DESIGN
//! ======
//! Spans never nest: a color code while a span is open closes it first, the
//! same way a terminal replaces the active color. Any span still open at the
//! end of the text is closed, so the output is always balanced. All answer
//! text is HTML-escaped before markup is applied.

#[cfg(test)]
#[path = "markup_test.rs"]
mod markup_test;

const ESC: char = '\u{1b}';

/// Longest SGR parameter list accepted before the sequence is treated as text.
const MAX_SGR_PARAMS_LEN: usize = 16;

/// Route serving raw source documents referenced by answers.
pub const VIEW_SOURCE_PREFIX: &str = "/view_source/";

const LINK_STYLE: &str = "color: #6366f1; text-decoration: underline;";

/// Color roles carried by SGR codes in answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Header,
    Highlight,
    Alert,
    Muted,
    Info,
    Accent,
    Notice,
}

impl Tone {
    /// Map an SGR parameter list (text between `ESC[` and `m`) to a tone.
    pub fn from_sgr(params: &str) -> Option<Self> {
        match params {
            "1;32" => Some(Self::Header),
            "1;33" => Some(Self::Highlight),
            "1;31" => Some(Self::Alert),
            "1;30" => Some(Self::Muted),
            "1;34" => Some(Self::Info),
            "1;35" => Some(Self::Accent),
            "1;36" => Some(Self::Notice),
            _ => None,
        }
    }

    pub fn style(self) -> &'static str {
        match self {
            Self::Header => {
                "color: #10b981; font-weight: bold; border-bottom: 1px solid rgba(16, 185, 129, 0.2); \
                 margin-bottom: 8px; display: inline-block; width: 100%;"
            }
            Self::Highlight => "color: #38bdf8; font-weight: bold;",
            Self::Alert => "color: #ef4444; font-weight: bold;",
            Self::Muted => "color: #94a3b8; font-style: italic;",
            Self::Info => "color: #60a5fa; font-weight: bold;",
            Self::Accent => "color: #e879f9; font-weight: bold;",
            Self::Notice => "color: #22d3ee; font-weight: bold;",
        }
    }
}

/// Render a bot answer as HTML.
pub fn format_bot_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 64);
    let mut span_open = false;
    let mut rest = text;

    while let Some(ch) = rest.chars().next() {
        if ch == ESC {
            match parse_sgr(rest) {
                Some((params, consumed)) => {
                    apply_sgr(&mut out, &mut span_open, params);
                    rest = &rest[consumed..];
                }
                // Stray ESC: drop it and keep what follows as text.
                None => rest = &rest[ESC.len_utf8()..],
            }
            continue;
        }

        if ch == '[' {
            if let Some((name, consumed)) = parse_reference(rest) {
                push_source_link(&mut out, name);
                rest = &rest[consumed..];
                continue;
            }
        }

        if rest.starts_with("\r\n") {
            out.push_str("<br>");
            rest = &rest[2..];
            continue;
        }

        match ch {
            '\n' => out.push_str("<br>"),
            _ => push_escaped_char(&mut out, ch),
        }
        rest = &rest[ch.len_utf8()..];
    }

    if span_open {
        out.push_str("</span>");
    }
    out
}

/// Href for a `[[name]]` source reference.
pub fn source_href(name: &str) -> String {
    format!("{VIEW_SOURCE_PREFIX}{name}")
}

fn apply_sgr(out: &mut String, span_open: &mut bool, params: &str) {
    if params == "0" || params.is_empty() {
        if *span_open {
            out.push_str("</span>");
            *span_open = false;
        }
        return;
    }

    // Unsupported codes are dropped without touching the open span.
    let Some(tone) = Tone::from_sgr(params) else {
        return;
    };
    if *span_open {
        out.push_str("</span>");
    }
    out.push_str("<span style=\"");
    out.push_str(tone.style());
    out.push_str("\">");
    *span_open = true;
}

/// Parse `ESC[<digits and ;>m` at the start of `input`.
///
/// Returns the parameter list and the number of bytes consumed.
fn parse_sgr(input: &str) -> Option<(&str, usize)> {
    let body = input.strip_prefix(ESC)?.strip_prefix('[')?;
    let end = body
        .char_indices()
        .take(MAX_SGR_PARAMS_LEN + 1)
        .find(|(_, c)| !(c.is_ascii_digit() || *c == ';'))
        .map(|(i, _)| i)?;
    if body[end..].starts_with('m') {
        let consumed = ESC.len_utf8() + 1 + end + 1;
        Some((&body[..end], consumed))
    } else {
        None
    }
}

/// Parse `[[name]]` at the start of `input`.
///
/// The name is the shortest non-empty run up to `]]` and may not span a line
/// break or contain a control escape.
fn parse_reference(input: &str) -> Option<(&str, usize)> {
    let body = input.strip_prefix("[[")?;
    let close = body.find("]]")?;
    let name = &body[..close];
    if name.is_empty() || name.contains(['\n', '\r', ESC]) {
        return None;
    }
    Some((name, 2 + close + 2))
}

fn push_source_link(out: &mut String, name: &str) {
    out.push_str("<a href=\"");
    push_escaped(out, &source_href(name));
    out.push_str("\" target=\"_blank\" rel=\"noopener\" style=\"");
    out.push_str(LINK_STYLE);
    out.push_str("\">");
    push_escaped(out, name);
    out.push_str("</a>");
}

fn push_escaped(out: &mut String, text: &str) {
    for ch in text.chars() {
        push_escaped_char(out, ch);
    }
}

fn push_escaped_char(out: &mut String, ch: char) {
    match ch {
        '&' => out.push_str("&amp;"),
        '<' => out.push_str("&lt;"),
        '>' => out.push_str("&gt;"),
        '"' => out.push_str("&quot;"),
        '\'' => out.push_str("&#39;"),
        _ => out.push(ch),
    }
}
