//! Structural classification of Markdown lines.
//!
//! Rules are tried in a fixed order and the first match wins:
//!
//! 1. heading (`#` to `####` followed by a space),
//! 2. compound bold list item (`- **Key**: text`),
//! 3. list item (`--` or `-` followed by a space),
//! 4. plain paragraph.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::{
    inline::InlineMode,
    styles::{
        match_prefix, StyleId, BOLD_LIST_BODY_STYLE, BOLD_LIST_HEADING_STYLE, HEADING_STYLES,
        LIST_STYLES,
    },
};

// One numeric level followed by at most one single-character sub-level, e.g. `2.`, `3) b.`.
static HEADING_NUMBERING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:[0-9]+[.)]\s*)?(?:[0-9A-Za-z_][.)]\s*)?").expect("numbering pattern is valid")
});

static BOLD_LIST_ITEM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^- \*\*(.+?)\*\*:\s*(.*)").expect("bold list pattern is valid"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    Heading {
        level: usize,
        style: StyleId,
        text: &'a str,
    },
    /// `- **Key**: text`, emitted as a heading paragraph followed by a bullet paragraph.
    BoldListItem { heading: &'a str, body: &'a str },
    ListItem {
        level: usize,
        style: StyleId,
        text: &'a str,
    },
    Paragraph { text: &'a str },
}

/// Kind tag used for conversion statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LineKindTag {
    Heading,
    BoldListItem,
    ListItem,
    Paragraph,
}

/// One output paragraph: its style, how its text is formatted, and the raw text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    pub style: StyleId,
    pub mode: InlineMode,
    pub text: &'a str,
}

impl<'a> LineKind<'a> {
    pub fn tag(&self) -> LineKindTag {
        match self {
            LineKind::Heading { .. } => LineKindTag::Heading,
            LineKind::BoldListItem { .. } => LineKindTag::BoldListItem,
            LineKind::ListItem { .. } => LineKindTag::ListItem,
            LineKind::Paragraph { .. } => LineKindTag::Paragraph,
        }
    }

    pub fn segments(&self) -> Vec<Segment<'a>> {
        match *self {
            LineKind::Heading { style, text, .. } => vec![Segment {
                style,
                mode: InlineMode::Heading,
                text,
            }],
            LineKind::BoldListItem { heading, body } => vec![
                Segment {
                    style: BOLD_LIST_HEADING_STYLE,
                    mode: InlineMode::Heading,
                    text: heading,
                },
                Segment {
                    style: BOLD_LIST_BODY_STYLE,
                    mode: InlineMode::Body,
                    text: body,
                },
            ],
            LineKind::ListItem { style, text, .. } => vec![Segment {
                style,
                mode: InlineMode::Body,
                text,
            }],
            LineKind::Paragraph { text } => vec![Segment {
                style: StyleId::NORMAL,
                mode: InlineMode::Body,
                text,
            }],
        }
    }
}

/// Classifies one line of Markdown. Blank lines yield `None`.
pub fn classify_line(line: &str) -> Option<LineKind<'_>> {
    let line = trim_line(line);
    if line.is_empty() {
        return None;
    }

    if let Some((rule, rest)) = match_prefix(&HEADING_STYLES, line) {
        return Some(LineKind::Heading {
            level: rule.prefix.len(),
            style: rule.style,
            text: strip_heading_decorations(rest),
        });
    }

    if let Some(caps) = BOLD_LIST_ITEM.captures(line) {
        if let (Some(heading), Some(body)) = (caps.get(1), caps.get(2)) {
            return Some(LineKind::BoldListItem {
                heading: heading.as_str(),
                body: body.as_str(),
            });
        }
    }

    if let Some((rule, rest)) = match_prefix(&LIST_STYLES, line) {
        return Some(LineKind::ListItem {
            level: rule.prefix.len(),
            style: rule.style,
            text: rest.trim(),
        });
    }

    Some(LineKind::Paragraph { text: line })
}

/// Trims whitespace and byte order marks, which editors and clipboards leave at the start of
/// the first line.
fn trim_line(line: &str) -> &str {
    line.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
}

/// Removes a leading numbering token (`1.`, `2) a.`) and one trailing colon.
fn strip_heading_decorations(text: &str) -> &str {
    let text = text.trim();
    let numbering_end = HEADING_NUMBERING.find(text).map_or(0, |m| m.end());
    let text = text[numbering_end..].trim();
    text.strip_suffix(':').unwrap_or(text).trim()
}
