//! Marker formatter for the preview bubble.
//!
//! Input is HTML-escaped first, then four global passes run in a fixed
//! order: `**bold**`, `__italic__`, `` `mono` ``, newline. The markers
//! themselves contain no escapable characters, so escaping never disturbs
//! them, and the only tags in the output are the ones inserted here.
//!
//! Patterns are non-greedy and do not span lines: a span never crosses
//! `\n`, `\r`, U+2028 or U+2029. Unbalanced or overlapping markers pass
//! through as literal text.

use std::sync::LazyLock;

use regex::Regex;

static BOLD: LazyLock<Regex> = LazyLock::new(|| compile(r"\*\*([^\r\n\u{2028}\u{2029}]*?)\*\*"));
static ITALIC: LazyLock<Regex> = LazyLock::new(|| compile(r"__([^\r\n\u{2028}\u{2029}]*?)__"));
static MONO: LazyLock<Regex> = LazyLock::new(|| compile(r"`([^\r\n\u{2028}\u{2029}]*?)`"));

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("marker pattern is a valid regex")
}

/// Render marker syntax to display markup.
#[must_use]
pub fn format_html(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    let escaped = escape_html(text);
    let bold = BOLD.replace_all(&escaped, "<b>${1}</b>");
    let italic = ITALIC.replace_all(&bold, "<i>${1}</i>");
    let mono = MONO.replace_all(&italic, r#"<code class="mono">${1}</code>"#);
    mono.replace('\n', "<br/>")
}

/// Escape text for HTML element content and quoted attribute values.
#[must_use]
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
#[path = "format_test.rs"]
mod tests;
