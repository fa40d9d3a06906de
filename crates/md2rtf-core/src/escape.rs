//! RTF character escaping.

use std::fmt::Write;

/// Escapes RTF delimiters and every non-ASCII UTF-16 code unit.
///
/// Characters outside the Basic Multilingual Plane come out as two `\u` escapes, one per
/// surrogate, each carrying the unsigned 16-bit value. Word accepts this for BMP text; astral
/// characters such as emoji are a known limitation.
pub fn escape_rtf(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    let mut units = [0u16; 2];
    for ch in text.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            '{' => escaped.push_str("\\{"),
            '}' => escaped.push_str("\\}"),
            c if c.is_ascii() => escaped.push(c),
            c => {
                for unit in c.encode_utf16(&mut units).iter() {
                    let _ = write!(escaped, "\\u{unit}?");
                }
            }
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_passes_through() {
        assert_eq!(escape_rtf("Plain text, 42 * 2."), "Plain text, 42 * 2.");
    }

    #[test]
    fn delimiters_are_escaped() {
        assert_eq!(escape_rtf(r"a\b{c}"), r"a\\b\{c\}");
    }

    #[test]
    fn latin_and_cyrillic_use_decimal_code_units() {
        assert_eq!(escape_rtf("é"), r"\u233?");
        assert_eq!(escape_rtf("Да"), "\\u1044?\\u1072?");
    }

    #[test]
    fn del_character_is_not_escaped() {
        assert_eq!(escape_rtf("\u{7f}"), "\u{7f}");
        assert_eq!(escape_rtf("\u{80}"), r"\u128?");
    }

    // Astral characters are split into their surrogate halves rather than a single code point.
    #[test]
    fn astral_characters_escape_as_surrogate_pairs() {
        assert_eq!(escape_rtf("😀"), "\\u55357?\\u56832?");
    }
}
