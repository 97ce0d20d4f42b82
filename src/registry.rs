//! Command registry - fixed utterances mapped straight to intents
//!
//! Checked before any pattern family so that fixed phrases are never
//! reinterpreted loosely. Matching is exact after lower-casing, trimming and
//! whitespace collapsing. Extra entries can be added from config.

use crate::error::TableError;
use crate::intent::{
    Action, AuthAction, HomeSection, LibraryView, NavTarget, ScrollDirection,
};
use crate::wake::normalize;
use serde::Deserialize;
use std::collections::HashMap;

/// One registry row: every utterance resolves to the same intent
#[derive(Debug, Clone, Deserialize)]
pub struct RegisteredEntry {
    pub utterances: Vec<String>,
    pub intent: Action,
}

impl RegisteredEntry {
    pub fn new(utterances: &[&str], intent: Action) -> Self {
        Self {
            utterances: utterances.iter().map(|u| u.to_string()).collect(),
            intent,
        }
    }
}

pub struct Registry {
    entries: Vec<RegisteredEntry>,
    index: HashMap<String, usize>,
}

impl Registry {
    /// Build and validate a registry. Any defect fails the whole table.
    pub fn new(entries: Vec<RegisteredEntry>) -> Result<Self, TableError> {
        let mut index = HashMap::new();
        for (i, entry) in entries.iter().enumerate() {
            if entry.utterances.is_empty() {
                return Err(TableError::EmptyEntry { index: i });
            }
            for utterance in &entry.utterances {
                let key = normalize(utterance);
                if key.is_empty() {
                    return Err(TableError::BlankUtterance { index: i });
                }
                if let Some(&first) = index.get(&key) {
                    return Err(TableError::DuplicateUtterance {
                        utterance: key,
                        first,
                        second: i,
                    });
                }
                index.insert(key, i);
            }
        }
        Ok(Self { entries, index })
    }

    /// Built-in shortcuts followed by `extra` (usually from config)
    pub fn with_builtin(extra: Vec<RegisteredEntry>) -> Result<Self, TableError> {
        let mut entries = builtin_entries();
        entries.extend(extra);
        Self::new(entries)
    }

    pub fn builtin() -> Result<Self, TableError> {
        Self::with_builtin(Vec::new())
    }

    pub fn lookup(&self, command: &str) -> Option<&Action> {
        let i = self.index.get(&normalize(command))?;
        Some(&self.entries[*i].intent)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn builtin_entries() -> Vec<RegisteredEntry> {
    use RegisteredEntry as E;
    vec![
        E::new(&["home", "go home", "home page", "homepage"], Action::navigate(NavTarget::Home)),
        E::new(&["search", "search page"], Action::navigate(NavTarget::Search)),
        E::new(
            &["settings", "preferences", "accessibility settings"],
            Action::navigate(NavTarget::Settings),
        ),
        E::new(&["profile", "my profile", "my account"], Action::navigate(NavTarget::Profile)),
        E::new(&["back", "go back"], Action::navigate(NavTarget::Back)),
        E::new(&["next", "next page"], Action::navigate(NavTarget::NextPage)),
        E::new(
            &["library", "my library", "my games", "open library", "open my library"],
            Action::Library { view: LibraryView::All },
        ),
        E::new(
            &["watchlist", "my watchlist", "open watchlist", "show my watchlist"],
            Action::Library { view: LibraryView::Watchlist },
        ),
        E::new(&["my reviews", "show my reviews"], Action::Library { view: LibraryView::Reviews }),
        E::new(
            &["following", "show following", "who am i following"],
            Action::Library { view: LibraryView::Following },
        ),
        E::new(&["log in", "login", "sign in"], Action::Auth { action: AuthAction::Login }),
        E::new(&["log out", "logout", "sign out"], Action::Auth { action: AuthAction::Logout }),
        E::new(
            &["sign up", "register", "create account", "create an account"],
            Action::Auth { action: AuthAction::Register },
        ),
        E::new(
            &["featured", "featured games", "show featured", "show featured games"],
            Action::Home { section: HomeSection::Featured },
        ),
        E::new(
            &["new releases", "show new releases", "what's new", "whats new"],
            Action::Home { section: HomeSection::NewReleases },
        ),
        E::new(
            &["trending", "trending games", "show trending", "what's trending"],
            Action::Home { section: HomeSection::Trending },
        ),
        E::new(&["top of page", "back to top"], Action::scroll(ScrollDirection::Top)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_is_valid() {
        let registry = Registry::builtin().unwrap();
        assert!(!registry.is_empty());
    }

    #[test]
    fn test_lookup_normalizes() {
        let registry = Registry::builtin().unwrap();
        assert_eq!(
            registry.lookup("  Go   HOME. "),
            Some(&Action::navigate(NavTarget::Home))
        );
        assert_eq!(
            registry.lookup("my watchlist"),
            Some(&Action::Library { view: LibraryView::Watchlist })
        );
        assert_eq!(registry.lookup("go home now"), None);
    }

    #[test]
    fn test_duplicate_utterance_fails() {
        let entries = vec![
            RegisteredEntry::new(&["home"], Action::navigate(NavTarget::Home)),
            RegisteredEntry::new(&["Home"], Action::navigate(NavTarget::Search)),
        ];
        assert!(matches!(
            Registry::new(entries),
            Err(TableError::DuplicateUtterance { first: 0, second: 1, .. })
        ));
    }

    #[test]
    fn test_empty_and_blank_fail() {
        let entries = vec![RegisteredEntry::new(&[], Action::ResetFilters)];
        assert!(matches!(Registry::new(entries), Err(TableError::EmptyEntry { index: 0 })));

        let entries = vec![RegisteredEntry::new(&["  "], Action::ResetFilters)];
        assert!(matches!(Registry::new(entries), Err(TableError::BlankUtterance { index: 0 })));
    }

    #[test]
    fn test_extra_entries_from_config() {
        let extra: RegisteredEntry = toml::from_str(
            r#"
            utterances = ["clear everything"]
            intent = { type = "reset-filters" }
            "#,
        )
        .unwrap();
        let registry = Registry::with_builtin(vec![extra]).unwrap();
        assert_eq!(registry.lookup("clear everything"), Some(&Action::ResetFilters));
    }

    #[test]
    fn test_extra_entry_cannot_shadow_builtin() {
        let extra = RegisteredEntry::new(&["go home"], Action::ResetFilters);
        assert!(Registry::with_builtin(vec![extra]).is_err());
    }
}
