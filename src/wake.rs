//! Wake word detection and command extraction
//!
//! The wake word may appear anywhere in a transcript. Everything up to and
//! including it is dropped, then leading filler ("could you", "maybe", ...)
//! is stripped so the cascade sees a bare imperative.

use crate::fuzzy::find_phrase;

/// Leading filler phrases, longest first so "could you please" wins over "could you"
const LEADING_FILLERS: &[&str] = &[
    "i would like to",
    "could you please",
    "can you please",
    "i'd like to",
    "i want to",
    "would you",
    "could you",
    "can you",
    "will you",
    "please",
    "maybe",
    "okay",
    "let's",
    "lets",
    "just",
    "and",
    "now",
    "um",
    "uh",
    "er",
    "ok",
    "so",
];

const TRAILING_FILLERS: &[&str] = &["please", "thank you", "thanks"];

pub struct WakeWord {
    phrase: String,
    words: Vec<String>,
}

impl WakeWord {
    pub fn new(phrase: &str) -> Self {
        let phrase = phrase.trim().to_lowercase();
        Self {
            words: phrase.split_whitespace().map(String::from).collect(),
            phrase,
        }
    }

    pub fn phrase(&self) -> &str {
        &self.phrase
    }

    /// Individual wake words, used as dictation filler
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Case-insensitive, typo-tolerant check for the wake word anywhere in `text`
    pub fn contains(&self, text: &str) -> bool {
        let tokens: Vec<&str> = text.split_whitespace().collect();
        find_phrase(&tokens, &self.words).is_some()
    }

    /// Command text after the wake word, filler-stripped and normalized.
    /// Without a wake word the whole transcript is filler-stripped.
    pub fn strip(&self, text: &str) -> String {
        let tokens: Vec<&str> = text.split_whitespace().collect();
        let mut start = find_phrase(&tokens, &self.words).unwrap_or(0);
        // Recognizers often repeat the wake word ("hey platform hey platform ...")
        if start > 0 {
            let n = self.words.len();
            while tokens.len() >= start + n && find_phrase(&tokens[start..start + n], &self.words).is_some() {
                start += n;
            }
        }
        strip_fillers(&normalize(&tokens[start..].join(" ")))
    }
}

/// Lowercase, collapse whitespace, drop leading commas and terminal punctuation
pub fn normalize(text: &str) -> String {
    let joined = text
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();
    joined
        .trim_start_matches([',', '.', '!', '?', ';', ':', ' '])
        .trim_end_matches(['.', '!', '?', ',', ';', ':', ' '])
        .to_string()
}

/// Remove filler phrases from both ends of an already normalized command
pub fn strip_fillers(command: &str) -> String {
    let mut text = command.trim().to_string();
    loop {
        let before = text.len();
        for filler in LEADING_FILLERS {
            if let Some(rest) = strip_word_prefix(&text, filler) {
                text = rest
                    .trim_start_matches([',', ' '])
                    .to_string();
                break;
            }
        }
        for filler in TRAILING_FILLERS {
            if let Some(rest) = strip_word_suffix(&text, filler) {
                text = rest.trim_end_matches([',', ' ']).to_string();
                break;
            }
        }
        if text.len() == before {
            return text;
        }
    }
}

fn strip_word_prefix<'a>(text: &'a str, prefix: &str) -> Option<&'a str> {
    let rest = text.strip_prefix(prefix)?;
    (rest.is_empty() || rest.starts_with([' ', ','])).then_some(rest)
}

fn strip_word_suffix<'a>(text: &'a str, suffix: &str) -> Option<&'a str> {
    let rest = text.strip_suffix(suffix)?;
    (rest.is_empty() || rest.ends_with([' ', ','])).then_some(rest)
}
