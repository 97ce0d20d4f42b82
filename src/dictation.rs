//! Dictation sub-engine - spoken letters, words and punctuation to text edits
//!
//! Used while a spelling session is active and wake-word gating is bypassed.
//! Stateless per call: the target field and the accumulated text belong to the
//! form controller that consumes the resulting `spell` intents.
//!
//! Each whitespace-separated token is tried, in order, as:
//! filler → punctuation word → backspace word → named letter → bare letter
//! → bare word → digits.

use crate::intent::{FieldName, SpellAction, SpellEdit};
use crate::wake::{WakeWord, normalize};
use std::collections::HashSet;

const FILLER_WORDS: &[&str] = &[
    "uh", "um", "er", "erm", "hmm", "letter", "okay", "ok", "please",
];

const PUNCTUATION_WORDS: &[(&str, char)] = &[
    ("dot", '.'),
    ("period", '.'),
    ("point", '.'),
    ("dash", '-'),
    ("hyphen", '-'),
    ("minus", '-'),
    ("underscore", '_'),
    ("underline", '_'),
    ("space", ' '),
    ("at", '@'),
    ("plus", '+'),
    ("hash", '#'),
    ("hashtag", '#'),
    ("pound", '#'),
    ("slash", '/'),
    ("comma", ','),
    ("exclamation", '!'),
    ("bang", '!'),
    ("question", '?'),
    ("dollar", '$'),
    ("percent", '%'),
    ("ampersand", '&'),
    ("star", '*'),
    ("asterisk", '*'),
    ("equals", '='),
    ("colon", ':'),
    ("tilde", '~'),
    ("apostrophe", '\''),
];

const BACKSPACE_WORDS: &[&str] = &["backspace", "delete", "erase"];

/// Letter names, phonetic alphabet and digit words
const NAMED_LETTERS: &[(&str, &str)] = &[
    ("ay", "a"), ("aye", "a"), ("alpha", "a"), ("alfa", "a"),
    ("bee", "b"), ("be", "b"), ("bravo", "b"),
    ("see", "c"), ("sea", "c"), ("cee", "c"), ("charlie", "c"),
    ("dee", "d"), ("delta", "d"),
    ("ee", "e"), ("echo", "e"),
    ("ef", "f"), ("eff", "f"), ("foxtrot", "f"),
    ("gee", "g"), ("jee", "g"), ("golf", "g"),
    ("aitch", "h"), ("haitch", "h"), ("hotel", "h"),
    ("eye", "i"), ("india", "i"),
    ("jay", "j"), ("juliet", "j"), ("juliett", "j"),
    ("kay", "k"), ("kilo", "k"),
    ("el", "l"), ("ell", "l"), ("lima", "l"),
    ("em", "m"), ("mike", "m"),
    ("en", "n"), ("november", "n"),
    ("oh", "o"), ("oscar", "o"),
    ("pee", "p"), ("papa", "p"),
    ("cue", "q"), ("queue", "q"), ("kew", "q"), ("quebec", "q"),
    ("ar", "r"), ("are", "r"), ("romeo", "r"),
    ("ess", "s"), ("sierra", "s"),
    ("tee", "t"), ("tea", "t"), ("tango", "t"),
    ("you", "u"), ("yu", "u"), ("uniform", "u"),
    ("vee", "v"), ("victor", "v"),
    ("double-u", "w"), ("doubleu", "w"), ("whiskey", "w"),
    ("ex", "x"), ("x-ray", "x"), ("xray", "x"),
    ("why", "y"), ("wye", "y"), ("yankee", "y"),
    ("zed", "z"), ("zee", "z"), ("zulu", "z"),
    ("zero", "0"), ("one", "1"), ("two", "2"), ("three", "3"), ("four", "4"),
    ("five", "5"), ("six", "6"), ("seven", "7"), ("eight", "8"), ("nine", "9"),
];

const STOP_PHRASES: &[&str] = &[
    "stop spelling",
    "end spelling",
    "finish spelling",
    "done spelling",
    "stop dictation",
    "done",
    "finished",
    "i'm done",
    "im done",
];

const CLEAR_PHRASES: &[&str] = &["clear field", "clear it", "clear all", "erase all", "start over"];

/// Dictation parser. Holds the filler set, which includes the wake word parts.
pub struct Dictation {
    filler: HashSet<String>,
}

impl Dictation {
    pub fn new(wake: &WakeWord) -> Self {
        let filler = FILLER_WORDS
            .iter()
            .map(|w| w.to_string())
            .chain(wake.words().iter().cloned())
            .collect();
        Self { filler }
    }

    /// Translate one transcript into a spelling edit. `None` when nothing was
    /// recognized and no backspaces were asked for.
    pub fn parse(&self, raw: &str, active_field: Option<FieldName>) -> Option<SpellEdit> {
        let text = normalize(raw);
        if text.is_empty() {
            return None;
        }
        if let Some(start) = parse_start(&text, active_field) {
            return Some(start);
        }
        if is_stop(&text) {
            return Some(SpellEdit::stop());
        }
        if CLEAR_PHRASES.contains(&text.as_str()) {
            return Some(SpellEdit {
                action: SpellAction::Append,
                field: None,
                value: None,
                backspaces: None,
                clear: Some(true),
            });
        }

        let mut value = String::new();
        // Backspaces beyond what this utterance typed reach into the field
        let mut backspaces = 0u32;
        for token in text.split_whitespace() {
            let token = clean_token(token);
            if token.is_empty() || self.filler.contains(token) {
                continue;
            }
            if let Some(c) = punctuation(token) {
                value.push(c);
            } else if BACKSPACE_WORDS.contains(&token) {
                if value.pop().is_none() {
                    backspaces += 1;
                }
            } else if let Some(letter) = named_letter(token) {
                value.push_str(letter);
            } else if is_spellable(token) {
                // Bare letters, words and digit runs all pass through as spoken
                value.push_str(token);
            }
        }

        if value.is_empty() && backspaces == 0 {
            return None;
        }
        Some(SpellEdit {
            action: SpellAction::Append,
            field: None,
            value: (!value.is_empty()).then_some(value),
            backspaces: (backspaces > 0).then_some(backspaces),
            clear: None,
        })
    }
}

/// Recognize "spell email", "start spelling my password", "spell" (active field)
pub fn parse_start(command: &str, active_field: Option<FieldName>) -> Option<SpellEdit> {
    let rest = ["start spelling", "begin spelling", "spell out", "spelling", "spell"]
        .iter()
        .find_map(|prefix| strip_word_prefix(command, prefix))?;

    let words: Vec<&str> = rest
        .split_whitespace()
        .filter(|w| !matches!(*w, "in" | "into" | "the" | "my" | "for" | "out" | "field" | "box"))
        .collect();
    if words.is_empty() {
        return Some(SpellEdit::start(active_field));
    }
    field_name(&words.join(" ")).map(|field| SpellEdit::start(Some(field)))
}

/// Map a loosely worded field name to its canonical field
pub fn field_name(spoken: &str) -> Option<FieldName> {
    let spoken = spoken.trim();
    if spoken.contains("confirm") {
        return Some(FieldName::ConfirmPassword);
    }
    if spoken.contains("identifier")
        || spoken.contains("email or username")
        || spoken.contains("login")
        || spoken == "id"
    {
        return Some(FieldName::Identifier);
    }
    if spoken.contains("email") || spoken.contains("e-mail") || spoken.contains("e mail") || spoken == "mail" {
        return Some(FieldName::Email);
    }
    if spoken.contains("password") || spoken.contains("pass word") || spoken.contains("passcode") {
        return Some(FieldName::Password);
    }
    if spoken.contains("username") || spoken.contains("user name") || spoken == "name" || spoken == "handle" {
        return Some(FieldName::Username);
    }
    None
}

pub fn is_stop(command: &str) -> bool {
    STOP_PHRASES.contains(&command)
}

fn strip_word_prefix<'a>(text: &'a str, prefix: &str) -> Option<&'a str> {
    let rest = text.strip_prefix(prefix)?;
    if rest.is_empty() {
        Some(rest)
    } else {
        rest.strip_prefix(' ')
    }
}

fn clean_token(token: &str) -> &str {
    let token = token.trim_end_matches([',', '!', '?']);
    if token.len() > 1 {
        token.trim_end_matches('.')
    } else {
        token
    }
}

fn punctuation(token: &str) -> Option<char> {
    PUNCTUATION_WORDS
        .iter()
        .find(|(word, _)| *word == token)
        .map(|(_, c)| *c)
}

fn named_letter(token: &str) -> Option<&'static str> {
    NAMED_LETTERS
        .iter()
        .find(|(name, _)| *name == token)
        .map(|(_, letter)| *letter)
}

/// Letters, digits and the characters that show up inside emails and handles
fn is_spellable(token: &str) -> bool {
    token.chars().any(|c| c.is_alphanumeric())
        && token
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '@' | '.' | '_' | '-' | '+'))
}
