//! Keyword fallbacks for noisy input
//!
//! Tried only after every pattern family has failed. These look for loose
//! substrings anywhere in the command instead of anchored phrasings.

use super::vocab::keyword_tag;
use crate::intent::{Action, SettingKind};

type Fallback = fn(&str) -> Option<Action>;

const CHAIN: &[(&str, Fallback)] = &[
    ("text-size", text_size),
    ("button-size", button_size),
    ("spacing", spacing),
    ("keyword-filter", keyword_filter),
];

pub fn resolve(command: &str) -> Option<(&'static str, Action)> {
    CHAIN
        .iter()
        .find_map(|(name, fallback)| fallback(command).map(|action| (*name, action)))
}

const EXTRA_LARGE_WORDS: &[&str] = &["extra large", "extra-large", "extra big", "huge", "biggest", "largest"];

fn contains_any(text: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| text.contains(n))
}

fn text_size(command: &str) -> Option<Action> {
    if !contains_any(command, &["text", "font", "writing"]) {
        return None;
    }
    let value = if contains_any(command, EXTRA_LARGE_WORDS) {
        "extra-large"
    } else if contains_any(command, &["small", "tiny", "decrease", "reduce"]) {
        "small"
    } else if contains_any(command, &["large", "big", "increase"]) {
        "large"
    } else if contains_any(command, &["normal", "default", "medium", "regular", "reset"]) {
        "normal"
    } else {
        return None;
    };
    Some(Action::settings(SettingKind::TextSize, value))
}

fn button_size(command: &str) -> Option<Action> {
    if !command.contains("button") {
        return None;
    }
    // "extra large" has to be checked before the plain large/normal words
    if contains_any(command, EXTRA_LARGE_WORDS) {
        return Some(Action::settings(SettingKind::ButtonSize, "extra-large"));
    }
    let value = if contains_any(command, &["large", "big"]) {
        "large"
    } else if contains_any(command, &["normal", "default", "regular", "medium", "small"]) {
        "normal"
    } else {
        return None;
    };
    Some(Action::settings(SettingKind::ButtonSize, value))
}

fn spacing(command: &str) -> Option<Action> {
    if !command.contains("spacing") {
        return None;
    }
    let value = if contains_any(command, &["tight", "snug", "wider"]) {
        "snug"
    } else if contains_any(command, &["roomy", "normal"]) {
        "roomy"
    } else {
        "airy"
    };
    Some(Action::settings(SettingKind::Spacing, value))
}

fn keyword_filter(command: &str) -> Option<Action> {
    if !contains_any(command, &["filter", "apply"]) {
        return None;
    }
    keyword_tag(command).map(Action::filter)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value(command: &str) -> Option<(&'static str, Action)> {
        resolve(command)
    }

    #[test]
    fn test_text_size() {
        assert_eq!(
            value("can the text be tiny"),
            Some(("text-size", Action::settings(SettingKind::TextSize, "small")))
        );
        assert_eq!(
            value("font size extra large"),
            Some(("text-size", Action::settings(SettingKind::TextSize, "extra-large")))
        );
        assert_eq!(value("text thing"), None);
    }

    #[test]
    fn test_button_extra_large_before_large() {
        assert_eq!(
            value("make buttons extra large"),
            Some(("button-size", Action::settings(SettingKind::ButtonSize, "extra-large")))
        );
        assert_eq!(
            value("bigger buttons"),
            Some(("button-size", Action::settings(SettingKind::ButtonSize, "large")))
        );
        assert_eq!(
            value("default button size"),
            Some(("button-size", Action::settings(SettingKind::ButtonSize, "normal")))
        );
    }

    #[test]
    fn test_spacing_mapping() {
        let spacing = |v: &str| Some(("spacing", Action::settings(SettingKind::Spacing, v)));
        assert_eq!(value("tight spacing"), spacing("snug"));
        assert_eq!(value("wider spacing"), spacing("snug"));
        assert_eq!(value("normal spacing"), spacing("roomy"));
        assert_eq!(value("more spacing"), spacing("airy"));
    }

    #[test]
    fn test_keyword_filter_needs_trigger() {
        assert_eq!(
            value("umm one handed filter thing"),
            Some(("keyword-filter", Action::filter("One-Handed")))
        );
        assert_eq!(
            value("apply colour blind stuff"),
            Some(("keyword-filter", Action::filter("Colourblind Mode")))
        );
        assert_eq!(value("one handed games are cool"), None);
    }
}
