use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use crate::{
    classify::{classify_line, LineKindTag},
    config::RtfConfig,
    inline::format_inline,
    styles::StyleId,
};

/// An RTF document under construction.
///
/// Paragraphs are appended in document order straight into the output buffer.
#[derive(Debug, Clone)]
pub struct RtfDocument {
    buffer: String,
    paragraphs: usize,
}

impl RtfDocument {
    pub fn new(config: &RtfConfig) -> Self {
        Self {
            buffer: config.preamble(),
            paragraphs: 0,
        }
    }

    /// Appends `\sN <text>\par` on its own line. `formatted` must already be escaped.
    pub fn push_paragraph(&mut self, style: StyleId, formatted: &str) {
        self.buffer.push_str(&style.to_string());
        self.buffer.push(' ');
        self.buffer.push_str(formatted);
        self.buffer.push_str("\\par \n");
        self.paragraphs += 1;
    }

    /// Separates the output of one source line from the next.
    pub fn end_line(&mut self) {
        self.buffer.push('\n');
    }

    pub fn paragraph_count(&self) -> usize {
        self.paragraphs
    }

    pub fn finish(mut self) -> String {
        self.buffer.push('}');
        self.buffer
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConversionStats {
    pub lines: usize,
    pub blank_lines: usize,
    pub paragraphs: usize,
    pub kinds: BTreeMap<&'static str, usize>,
}

impl ConversionStats {
    fn record(&mut self, tag: LineKindTag) {
        let key = match tag {
            LineKindTag::Heading => "heading",
            LineKindTag::BoldListItem => "bold_list_item",
            LineKindTag::ListItem => "list_item",
            LineKindTag::Paragraph => "paragraph",
        };
        *self.kinds.entry(key).or_default() += 1;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    pub rtf: String,
    pub stats: ConversionStats,
}

/// Converts a Markdown document and reports what was found in it.
pub fn convert(markdown: &str, config: &RtfConfig) -> Conversion {
    let mut document = RtfDocument::new(config);
    let mut stats = ConversionStats::default();

    for line in markdown.split('\n') {
        stats.lines += 1;
        let Some(kind) = classify_line(line) else {
            stats.blank_lines += 1;
            continue;
        };
        stats.record(kind.tag());
        for segment in kind.segments() {
            document.push_paragraph(segment.style, &format_inline(segment.text, segment.mode));
        }
        document.end_line();
    }

    stats.paragraphs = document.paragraph_count();
    debug!(
        target: "md2rtf_core",
        lines = stats.lines,
        blank_lines = stats.blank_lines,
        paragraphs = stats.paragraphs,
        "markdown converted"
    );

    Conversion {
        rtf: document.finish(),
        stats,
    }
}

/// Converts a Markdown document into a complete RTF document.
///
/// Never fails: any string, including the empty one, produces a well-formed document.
pub fn markdown_to_rtf(markdown: &str, config: &RtfConfig) -> String {
    convert(markdown, config).rtf
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(rtf: &str) -> &str {
        let preamble_len = RtfConfig::default().preamble().len();
        &rtf[preamble_len..rtf.len() - 1]
    }

    #[test]
    fn empty_input_yields_empty_body() {
        let rtf = markdown_to_rtf("", &RtfConfig::default());
        assert!(rtf.starts_with("{\\rtf1\\ansi\\uc1"));
        assert!(rtf.ends_with('}'));
        assert_eq!(body(&rtf), "");
    }

    #[test]
    fn paragraph_is_followed_by_blank_line() {
        let rtf = markdown_to_rtf("Hello", &RtfConfig::default());
        assert_eq!(body(&rtf), "\\s0 Hello\\par \n\n");
    }

    #[test]
    fn blank_lines_between_paragraphs_are_dropped() {
        let conversion = convert("One\n\n\n   \nTwo", &RtfConfig::default());
        assert_eq!(conversion.stats.paragraphs, 2);
        assert_eq!(conversion.stats.blank_lines, 3);
        assert_eq!(
            body(&conversion.rtf),
            "\\s0 One\\par \n\n\\s0 Two\\par \n\n"
        );
    }

    #[test]
    fn stats_count_each_kind() {
        let conversion = convert(
            "# Title\n- **Key**: value\n- item\n-- sub\ntext",
            &RtfConfig::default(),
        );
        let stats = conversion.stats;
        assert_eq!(stats.lines, 5);
        assert_eq!(stats.paragraphs, 6);
        assert_eq!(stats.kinds.get("heading"), Some(&1));
        assert_eq!(stats.kinds.get("bold_list_item"), Some(&1));
        assert_eq!(stats.kinds.get("list_item"), Some(&2));
        assert_eq!(stats.kinds.get("paragraph"), Some(&1));
    }

    #[test]
    fn crlf_input_is_handled() {
        let rtf = markdown_to_rtf("- a\r\n- b\r\n", &RtfConfig::default());
        assert_eq!(body(&rtf), "\\s6 a\\par \n\n\\s6 b\\par \n\n");
    }
}
