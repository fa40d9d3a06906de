//! Heading case normalization.

/// Converts Title Case to Sentence case while keeping acronyms.
///
/// Words are separated by single spaces, so runs of spaces survive as empty words. A word
/// longer than one character that is already entirely upper-case is treated as an acronym and
/// kept verbatim. Otherwise the first word is capitalised and every other word lower-cased.
pub fn sentence_case(text: &str) -> String {
    text.split(' ')
        .enumerate()
        .map(|(index, word)| {
            if is_acronym(word) {
                word.to_string()
            } else if index == 0 {
                capitalize(word)
            } else {
                word.to_lowercase()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_acronym(word: &str) -> bool {
    word.chars().count() > 1 && word.to_uppercase() == word
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.as_str().to_lowercase().chars()).collect(),
        None => String::new(),
    }
}
