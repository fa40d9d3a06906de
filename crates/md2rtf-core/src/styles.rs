//! Paragraph styles and the Markdown prefixes that select them.
//!
//! Style indices are shared with the destination word-processor template, which must define a
//! named style for every entry of [`STYLE_SHEET`]. Renumbering one side without the other breaks
//! pasted documents.

use std::fmt;

use serde::Serialize;

/// Index into the RTF style sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct StyleId(u8);

impl StyleId {
    pub const NORMAL: Self = Self(0);
    pub const HEADING_1: Self = Self(1);
    pub const HEADING_2: Self = Self(2);
    pub const HEADING_3: Self = Self(3);
    pub const HEADING_4: Self = Self(4);
    pub const HEADING_5: Self = Self(5);
    pub const BULLETS_1: Self = Self(6);
    pub const BULLETS_2: Self = Self(7);

    pub fn index(self) -> u8 {
        self.0
    }
}

/// Renders the paragraph style control word, e.g. `\s6`.
impl fmt::Display for StyleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\\s{}", self.0)
    }
}

pub const STYLE_SHEET: [(StyleId, &str); 8] = [
    (StyleId::NORMAL, "Normal"),
    (StyleId::HEADING_1, "Heading 1"),
    (StyleId::HEADING_2, "Heading 2"),
    (StyleId::HEADING_3, "Heading 3"),
    (StyleId::HEADING_4, "Heading 4"),
    (StyleId::HEADING_5, "Heading 5"),
    (StyleId::BULLETS_1, "Bullets level 1"),
    (StyleId::BULLETS_2, "Bullets level 2"),
];

/// A Markdown line prefix and the paragraph style it maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrefixStyle {
    pub prefix: &'static str,
    pub style: StyleId,
}

const fn rule(prefix: &'static str, style: StyleId) -> PrefixStyle {
    PrefixStyle { prefix, style }
}

/// Heading markers, longest first. Levels one to three share the top heading style because
/// generated Markdown rarely uses `#` for anything but the document title.
pub const HEADING_STYLES: [PrefixStyle; 4] = [
    rule("####", StyleId::HEADING_2),
    rule("###", StyleId::HEADING_1),
    rule("##", StyleId::HEADING_1),
    rule("#", StyleId::HEADING_1),
];

/// List markers, longest first: `--` must be tried before `-`.
pub const LIST_STYLES: [PrefixStyle; 2] = [
    rule("--", StyleId::BULLETS_2),
    rule("-", StyleId::BULLETS_1),
];

/// Style of the heading half of a `- **Key**: text` line.
pub const BOLD_LIST_HEADING_STYLE: StyleId = StyleId::HEADING_3;
/// Style of the body half of a `- **Key**: text` line.
pub const BOLD_LIST_BODY_STYLE: StyleId = StyleId::BULLETS_1;

/// Finds the first rule whose prefix, followed by a space, starts `line`.
///
/// Returns the matched rule and the remainder of the line after the separating space.
pub fn match_prefix<'a>(rules: &[PrefixStyle], line: &'a str) -> Option<(PrefixStyle, &'a str)> {
    rules.iter().find_map(|rule| {
        line.strip_prefix(rule.prefix)
            .and_then(|rest| rest.strip_prefix(' '))
            .map(|rest| (*rule, rest))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn style_renders_control_word() {
        assert_eq!(StyleId::BULLETS_2.to_string(), r"\s7");
        assert_eq!(StyleId::NORMAL.to_string(), r"\s0");
    }

    #[test]
    fn style_sheet_indices_are_contiguous() {
        for (position, (id, _)) in STYLE_SHEET.iter().enumerate() {
            assert_eq!(usize::from(id.index()), position);
        }
    }

    #[test]
    fn prefixes_are_ordered_longest_first() {
        for table in [&HEADING_STYLES[..], &LIST_STYLES[..]] {
            let lengths: Vec<usize> = table.iter().map(|rule| rule.prefix.len()).collect();
            let mut sorted = lengths.clone();
            sorted.sort_unstable_by(|a, b| b.cmp(a));
            assert_eq!(lengths, sorted);
        }
    }

    #[test]
    fn double_dash_matches_second_level() {
        let (rule, rest) = match_prefix(&LIST_STYLES, "-- Nested").expect("list match");
        assert_eq!(rule.style, StyleId::BULLETS_2);
        assert_eq!(rest, "Nested");
    }

    #[test]
    fn prefix_requires_trailing_space() {
        assert!(match_prefix(&LIST_STYLES, "-item").is_none());
        assert!(match_prefix(&HEADING_STYLES, "#hashtag").is_none());
    }

    #[test]
    fn heading_levels_map_to_template_styles() {
        let style_of = |line| match_prefix(&HEADING_STYLES, line).map(|(rule, _)| rule.style);
        assert_eq!(style_of("# A"), Some(StyleId::HEADING_1));
        assert_eq!(style_of("### A"), Some(StyleId::HEADING_1));
        assert_eq!(style_of("#### A"), Some(StyleId::HEADING_2));
        assert_eq!(style_of("##### A"), None);
    }
}
