//! Fixed document tables written ahead of the converted paragraphs.
//!
//! Font and color slots are positional: body text uses `\f0`, bold spans `\f1`/`\cf1` and
//! inline code `\f2`/`\cf2`. Only the names and RGB values behind the slots are configurable.

use std::fmt::Write;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::styles::STYLE_SHEET;

pub const RTF_HEADER: &str = "{\\rtf1\\ansi\\uc1\n";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("font `{slot}` must not be empty")]
    EmptyFont { slot: &'static str },
    #[error("font `{slot}` contains reserved RTF character {found:?}: {name}")]
    ReservedCharacter {
        slot: &'static str,
        name: String,
        found: char,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Rgb {
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontTable {
    pub body: String,
    pub bold: String,
    pub monospace: String,
}

impl Default for FontTable {
    fn default() -> Self {
        Self {
            body: "Myriad".to_string(),
            bold: "Myriad Pro Semibold".to_string(),
            monospace: "Consolas".to_string(),
        }
    }
}

/// Accent colors; slot 0 stays empty so Word treats it as "automatic".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorTable {
    pub bold: Rgb,
    pub monospace: Rgb,
}

impl Default for ColorTable {
    fn default() -> Self {
        Self {
            bold: Rgb::new(49, 132, 155),
            monospace: Rgb::new(0, 112, 192),
        }
    }
}

/// Conversion settings, built once at start-up and passed to every conversion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RtfConfig {
    pub fonts: FontTable,
    pub colors: ColorTable,
    /// Print the raw input and the generated RTF around each conversion.
    pub debug: bool,
}

impl RtfConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (slot, name) in [
            ("body", &self.fonts.body),
            ("bold", &self.fonts.bold),
            ("monospace", &self.fonts.monospace),
        ] {
            if name.trim().is_empty() {
                return Err(ConfigError::EmptyFont { slot });
            }
            if let Some(found) = name.chars().find(|c| matches!(c, '\\' | '{' | '}' | ';')) {
                return Err(ConfigError::ReservedCharacter {
                    slot,
                    name: name.clone(),
                    found,
                });
            }
        }
        Ok(())
    }

    /// Header, font table, color table and style sheet, followed by a blank line.
    pub fn preamble(&self) -> String {
        let mut out = String::from(RTF_HEADER);

        out.push_str("{\\fonttbl\n");
        for (index, name) in [&self.fonts.body, &self.fonts.bold, &self.fonts.monospace]
            .into_iter()
            .enumerate()
        {
            let _ = writeln!(out, "{{\\f{index} {name};}}");
        }
        out.push_str("}\n");

        out.push_str("{\\colortbl\n{;}\n");
        for color in [self.colors.bold, self.colors.monospace] {
            let _ = writeln!(
                out,
                "{{\\red{}\\green{}\\blue{};}}",
                color.red, color.green, color.blue
            );
        }
        out.push_str("}\n");

        out.push_str("{\\stylesheet\n");
        for (style, name) in STYLE_SHEET {
            let _ = writeln!(out, "{{{style} {name};}}");
        }
        out.push_str("}\n");

        out.push('\n');
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_preamble_lists_tables() {
        let preamble = RtfConfig::default().preamble();
        assert!(preamble.starts_with("{\\rtf1\\ansi\\uc1\n{\\fonttbl\n{\\f0 Myriad;}\n"));
        assert!(preamble.contains("{\\f2 Consolas;}\n}\n"));
        assert!(preamble.contains("{\\colortbl\n{;}\n{\\red49\\green132\\blue155;}\n"));
        assert!(preamble.contains("{\\red0\\green112\\blue192;}\n}\n"));
        assert!(preamble.contains("{\\s0 Normal;}\n"));
        assert!(preamble.ends_with("{\\s7 Bullets level 2;}\n}\n\n"));
    }

    #[test]
    fn preamble_braces_balance() {
        let preamble = RtfConfig::default().preamble();
        let opens = preamble.matches('{').count();
        let closes = preamble.matches('}').count();
        // The document group stays open until the trailer.
        assert_eq!(opens, closes + 1);
    }

    #[test]
    fn custom_fonts_are_written() {
        let mut config = RtfConfig::default();
        config.fonts.monospace = "JetBrains Mono".to_string();
        assert!(config.preamble().contains("{\\f2 JetBrains Mono;}"));
    }

    #[test]
    fn reserved_characters_are_rejected() {
        let mut config = RtfConfig::default();
        config.fonts.bold = "Bad;Font".to_string();
        assert_eq!(
            config.validate(),
            Err(ConfigError::ReservedCharacter {
                slot: "bold",
                name: "Bad;Font".to_string(),
                found: ';',
            })
        );
    }

    #[test]
    fn empty_font_is_rejected() {
        let mut config = RtfConfig::default();
        config.fonts.body = "  ".to_string();
        assert_eq!(config.validate(), Err(ConfigError::EmptyFont { slot: "body" }));
    }

    #[test]
    fn defaults_validate() {
        assert!(RtfConfig::default().validate().is_ok());
    }
}
