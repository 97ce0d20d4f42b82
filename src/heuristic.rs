//! Server-side heuristic interpreter
//!
//! A looser, independent re-take on the client cascade for noisy transcripts.
//! Filler is removed word by word anywhere in the sentence (not only at the
//! edges), then verbs and vocabulary are spotted by presence rather than by
//! anchored phrasing. Checked in order: reset, scroll, navigate, filter tags,
//! search.

use crate::fuzzy::clean_word;
use crate::intent::{Action, FilterTags, Intent, NavTarget, ScrollDirection};
use crate::matcher::vocab::{ACCESSIBILITY_TAGS, genre, keyword_tag};
use std::collections::HashSet;

/// Superset of the client's filler: any of these words is dropped anywhere
const FILLER_WORDS: &[&str] = &[
    "hey", "platform", "please", "could", "would", "can", "you", "will", "maybe", "um", "uh", "er",
    "erm", "hmm", "like", "just", "so", "okay", "ok", "now", "the", "a", "an", "some", "me", "i",
    "want", "wanna", "to", "lets", "let's", "kindly", "thanks", "thank", "actually", "really",
    "quickly", "right", "well", "oh", "and", "then", "there", "for", "up", "games", "game", "only",
];

const NAV_VERBS: &[&str] = &["go", "open", "navigate", "take", "visit", "show", "bring", "head"];
const SEARCH_VERBS: &[&str] = &["search", "find", "look", "lookup", "hunt", "seek"];

pub struct Heuristic {
    filler: HashSet<String>,
}

impl Default for Heuristic {
    fn default() -> Self {
        Self::new(&[])
    }
}

impl Heuristic {
    /// `wake_words` are dropped as filler on top of the built-in list
    pub fn new(wake_words: &[String]) -> Self {
        let filler = FILLER_WORDS
            .iter()
            .map(|w| w.to_string())
            .chain(wake_words.iter().cloned())
            .collect();
        Self { filler }
    }

    pub fn interpret(&self, transcript: &str) -> Option<Intent> {
        // Search queries keep everything after the verb, so strip filler later
        let all: Vec<String> = transcript
            .split_whitespace()
            .map(clean_token)
            .filter(|w| !w.is_empty())
            .collect();
        let words: Vec<&str> = all
            .iter()
            .map(String::as_str)
            .filter(|w| !self.filler.contains(*w))
            .collect();
        if words.is_empty() {
            return None;
        }
        let text = words.join(" ");

        let spoken: Vec<&str> = all.iter().map(String::as_str).collect();
        let action = reset(&words, &text)
            .or_else(|| scroll(&spoken))
            .or_else(|| navigate(&words))
            .or_else(|| filter(&words, &text))
            .or_else(|| self.search(&all))?;
        Some(action.with_utterance(text))
    }

    fn search(&self, all: &[String]) -> Option<Action> {
        let verb = all.iter().position(|w| SEARCH_VERBS.contains(&w.as_str()))?;
        let query: Vec<&str> = all[verb + 1..]
            .iter()
            .map(String::as_str)
            .skip_while(|w| matches!(*w, "for" | "up" | "the" | "a" | "me"))
            .filter(|w| !matches!(*w, "please" | "thanks"))
            .collect();
        (!query.is_empty()).then(|| Action::Search {
            query: query.join(" "),
        })
    }
}

/// Lowercase and drop punctuation except inner apostrophes and hyphens
fn clean_token(word: &str) -> String {
    let kept: String = word
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, '\'' | '-'))
        .flat_map(char::to_lowercase)
        .collect();
    if kept.chars().any(char::is_alphanumeric) {
        kept.trim_matches(['\'', '-']).to_string()
    } else {
        clean_word(word)
    }
}

fn has(words: &[&str], any: &[&str]) -> bool {
    words.iter().any(|w| any.contains(w))
}

fn reset(words: &[&str], text: &str) -> Option<Action> {
    let verb = has(words, &["reset", "clear", "remove"]);
    let noun = has(words, &["filter", "filters"]);
    ((verb && noun) || text == "all" || text.contains("no filters")).then_some(Action::ResetFilters)
}

/// Runs on the unfiltered words since "up" is filler elsewhere
fn scroll(words: &[&str]) -> Option<Action> {
    if !has(words, &["scroll"]) {
        return None;
    }
    let direction = words.iter().find_map(|w| match *w {
        "up" => Some(ScrollDirection::Up),
        "top" => Some(ScrollDirection::Top),
        "bottom" => Some(ScrollDirection::Bottom),
        "down" => Some(ScrollDirection::Down),
        _ => None,
    });
    Some(Action::scroll(direction.unwrap_or(ScrollDirection::Down)))
}

fn navigate(words: &[&str]) -> Option<Action> {
    if has(words, &["back", "previous"]) {
        return Some(Action::navigate(NavTarget::Back));
    }
    if has(words, &["next", "more"]) && has(words, &["page", "results", "next"]) {
        return Some(Action::navigate(NavTarget::NextPage));
    }
    let target = words.iter().find_map(|w| NavTarget::from_spoken(w))?;
    // A bare page name counts; otherwise a navigation verb must be present
    (words.len() == 1 || has(words, NAV_VERBS)).then(|| Action::navigate(target))
}

/// Genres and accessibility tags spotted anywhere, in spoken order
fn filter(words: &[&str], text: &str) -> Option<Action> {
    let mut tags: Vec<String> = Vec::new();
    let mut i = 0;
    while i < words.len() {
        // Longest n-gram first so "color blind mode" beats "color"
        let hit = (1..=3).rev().find_map(|n| {
            let phrase = words.get(i..i + n)?.join(" ");
            accessibility(&phrase).or_else(|| genre(&phrase)).map(|tag| (n, tag))
        });
        match hit {
            Some((n, tag)) => {
                if !tags.iter().any(|t| t == tag) {
                    tags.push(tag.to_string());
                }
                i += n;
            }
            None => i += 1,
        }
    }
    if tags.is_empty() {
        if let Some(tag) = keyword_tag(text) {
            tags.push(tag.to_string());
        }
    }
    FilterTags::from_segments(tags).map(Action::Filter)
}

fn accessibility(phrase: &str) -> Option<&'static str> {
    ACCESSIBILITY_TAGS
        .iter()
        .find(|(variants, _)| variants.contains(&phrase))
        .map(|(_, canonical)| *canonical)
}
