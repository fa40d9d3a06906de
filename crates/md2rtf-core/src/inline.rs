//! Inline span formatting.
//!
//! Text is escaped first so that literal braces and backslashes can never be confused with the
//! control words injected afterwards. Body text then goes through three substitution passes in
//! a fixed order: bold, inline code, italic. Each pass runs over the whole string produced by
//! the previous one and nothing is re-scanned by an earlier pass. Spans do not nest: the inner
//! text of a bold span is emitted as is, and a later pass may still match marker characters
//! that happen to sit inside it.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::{case::sentence_case, escape::escape_rtf};

/// Whether the text being formatted belongs to a heading paragraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InlineMode {
    /// Bold markers are stripped and the text is sentence-cased; no other spans are handled.
    Heading,
    Body,
}

struct SpanPass {
    pattern: Regex,
    open: &'static str,
    close: &'static str,
}

impl SpanPass {
    fn new(pattern: &str, open: &'static str, close: &'static str) -> Self {
        Self {
            pattern: Regex::new(pattern).expect("span pattern is valid"),
            open,
            close,
        }
    }

    fn apply(&self, text: &str) -> String {
        self.pattern
            .replace_all(text, |caps: &Captures<'_>| {
                format!("{}{}{}", self.open, &caps[1], self.close)
            })
            .into_owned()
    }
}

const BOLD_PATTERN: &str = r"\*\*(.+?)\*\*";

// The trailing space after each closing control word is required: Word drops the control
// word on import when literal text follows it directly.
static BODY_PASSES: Lazy<[SpanPass; 3]> = Lazy::new(|| {
    [
        SpanPass::new(BOLD_PATTERN, r"\cf1\f1\b1 ", r"\b0\f0\cf0 "),
        SpanPass::new(r"`(.+?)`", r"\cf2\f2 ", r"\f0\cf0 "),
        SpanPass::new(r"\*(.+?)\*", r"\i ", r"\i0 "),
    ]
});

static HEADING_BOLD: Lazy<Regex> =
    Lazy::new(|| Regex::new(BOLD_PATTERN).expect("bold pattern is valid"));

/// Escapes `text` and rewrites its Markdown spans into RTF control words.
pub fn format_inline(text: &str, mode: InlineMode) -> String {
    let escaped = escape_rtf(text);
    match mode {
        InlineMode::Heading => {
            // The paragraph style already carries the heading weight.
            let unbolded = HEADING_BOLD.replace_all(&escaped, "$1");
            sentence_case(&unbolded)
        }
        InlineMode::Body => BODY_PASSES
            .iter()
            .fold(escaped, |current, pass| pass.apply(&current)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bold_span_uses_accent_font_and_color() {
        assert_eq!(
            format_inline("a **b** c", InlineMode::Body),
            r"a \cf1\f1\b1 b\b0\f0\cf0  c"
        );
    }

    #[test]
    fn code_span_uses_monospace_font() {
        assert_eq!(
            format_inline("run `cargo` now", InlineMode::Body),
            r"run \cf2\f2 cargo\f0\cf0  now"
        );
    }

    #[test]
    fn italic_span_toggles_italics() {
        assert_eq!(
            format_inline("an *aside*", InlineMode::Body),
            r"an \i aside\i0 "
        );
    }

    #[test]
    fn spans_are_matched_non_greedily() {
        assert_eq!(
            format_inline("**a** and **b**", InlineMode::Body),
            r"\cf1\f1\b1 a\b0\f0\cf0  and \cf1\f1\b1 b\b0\f0\cf0 "
        );
    }

    #[test]
    fn unmatched_markers_stay_literal() {
        assert_eq!(format_inline("2 * 3 = 6", InlineMode::Body), "2 * 3 = 6");
        assert_eq!(format_inline("a `tick", InlineMode::Body), "a `tick");
    }

    #[test]
    fn italic_inside_bold_is_not_nested() {
        // The bold pass consumes the outer markers; the italic pass then sees the inner ones.
        assert_eq!(
            format_inline("**x *y* z**", InlineMode::Body),
            r"\cf1\f1\b1 x \i y\i0  z\b0\f0\cf0 "
        );
    }

    #[test]
    fn braces_are_escaped_before_spans() {
        assert_eq!(
            format_inline("`{}`", InlineMode::Body),
            r"\cf2\f2 \{\}\f0\cf0 "
        );
    }

    #[test]
    fn heading_strips_bold_and_sentence_cases() {
        assert_eq!(
            format_inline("The **Big** Picture", InlineMode::Heading),
            "The big picture"
        );
    }

    #[test]
    fn heading_ignores_code_and_italic() {
        assert_eq!(
            format_inline("Use *This* `Thing`", InlineMode::Heading),
            "Use *this* `thing`"
        );
    }

    // Code runs before italic, so asterisks inside a code span are still italicised.
    #[test]
    fn italic_pass_sees_code_output() {
        assert_eq!(
            format_inline("`a*b*c`", InlineMode::Body),
            r"\cf22 a\i b\i0 c0\cf0 "
        );
    }
}
