//! Markdown to RTF conversion for pasting into a word processor.
//!
//! Each non-blank line of Markdown is classified as a heading, a compound `- **Key**: text`
//! item, a list item or a plain paragraph, and becomes one or two RTF paragraphs that reference
//! named styles of the destination template. Inline bold, code and italic spans are rewritten
//! into character formatting.
//!
//! ```
//! use md2rtf_core::{markdown_to_rtf, RtfConfig};
//!
//! let rtf = markdown_to_rtf("## API Design Notes", &RtfConfig::default());
//! assert!(rtf.contains("\\s1 API design notes\\par"));
//! ```

pub mod case;
pub mod classify;
pub mod config;
pub mod document;
pub mod escape;
pub mod inline;
pub mod pipeline;
pub mod styles;

pub use classify::{classify_line, LineKind, LineKindTag, Segment};
pub use config::{ColorTable, ConfigError, FontTable, Rgb, RtfConfig};
pub use document::{convert, markdown_to_rtf, Conversion, ConversionStats, RtfDocument};
pub use inline::{format_inline, InlineMode};
pub use pipeline::{Input, Output, Pipeline, PipelineError};
pub use styles::{StyleId, HEADING_STYLES, LIST_STYLES, STYLE_SHEET};
