//! Keyword tokenization and normalization.
//!
//! Email items do not carry authored keywords. They are derived from the
//! thread: every sender and recipient address, plus every subject and body
//! word of at least [`MIN_WORD_CHARS`] characters.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

use super::item::EmailMessage;

/// Shortest word (in characters) kept from subject and body
pub const MIN_WORD_CHARS: usize = 5;

// Unicode-aware: accented letters count as word characters.
static NON_WORD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\w\s]").expect("valid non-word regex"));

/// Strip punctuation and split into whitespace-separated tokens
pub fn split_and_clean(input: &str) -> Vec<String> {
    NON_WORD_RE
        .replace_all(input, "")
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Derive lowercase keywords from an email thread
///
/// Addresses are kept verbatim (lowercased); subject and body words must be
/// at least [`MIN_WORD_CHARS`] characters long.
pub fn email_keywords(thread: &[EmailMessage]) -> Vec<String> {
    let raw = thread.iter().flat_map(|message| {
        let addresses = std::iter::once(message.sender.clone())
            .chain(message.recipients.iter().cloned());

        let words = split_and_clean(&message.subject)
            .into_iter()
            .chain(split_and_clean(&message.body))
            .filter(|word| word.chars().count() >= MIN_WORD_CHARS);

        addresses.chain(words).collect::<Vec<_>>()
    });

    normalize_keywords(raw)
}

/// Lowercase keywords and drop duplicates, keeping first occurrence order
pub fn normalize_keywords(keywords: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut seen = HashSet::new();
    keywords
        .into_iter()
        .map(|k| k.to_lowercase())
        .filter(|k| seen.insert(k.clone()))
        .collect()
}
