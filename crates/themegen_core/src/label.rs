//! Display names for token slugs

/// Words kept lower-case unless they open the label
const LOWERCASE_WORDS: [&str; 3] = ["of", "the", "and"];

/// Turn a slug into a human-readable label.
///
/// - `-` and `_` become spaces
/// - each word is capitalized and the rest lower-cased
/// - `of`, `the` and `and` stay lower-case after the first word
///
/// Example:
/// - `blue-grey_dark` -> `Blue Grey Dark`
/// - `state-of-the-art` -> `State of the Art`
pub fn title_case(slug: &str) -> String {
    if slug.is_empty() {
        return String::new();
    }

    let spaced = slug.replace(['-', '_'], " ").to_lowercase();
    spaced
        .split(' ')
        .enumerate()
        .map(|(i, word)| {
            if i != 0 && LOWERCASE_WORDS.contains(&word) {
                word.to_string()
            } else {
                capitalize(word)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
