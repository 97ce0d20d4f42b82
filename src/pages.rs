//! Page controllers subscribed to the dispatch bus
//!
//! Each page keeps its own view state and claims the intents it handles.
//! Anything a page ignores falls through to the shell defaults.

use crate::dispatch::{Subscriber, VoiceEvent};
use crate::intent::{
    Action, AuthAction, FieldName, FilterTags, GameAction, HomeSection, SettingKind, SortKey,
    SpellAction, SpellEdit,
};
use std::collections::HashMap;

// ============================================================================
// Catalog
// ============================================================================

/// Browse view: search query, active tag filters, sort order, selected card
#[derive(Debug, Default)]
pub struct CatalogPage {
    pub query: Option<String>,
    pub tags: Vec<String>,
    pub sort: Option<SortKey>,
    pub section: Option<HomeSection>,
    pub opened_card: Option<usize>,
}

impl CatalogPage {
    fn add_tags(&mut self, filter: &FilterTags) {
        for tag in filter.tags() {
            if !self.tags.iter().any(|t| t.eq_ignore_ascii_case(tag)) {
                self.tags.push(tag.to_string());
            }
        }
    }
}

impl Subscriber for CatalogPage {
    fn on_intent(&mut self, event: &mut VoiceEvent<'_>) {
        match &event.intent().action {
            Action::Search { query } => self.query = Some(query.clone()),
            Action::Filter(filter) => self.add_tags(filter),
            Action::ResetFilters => {
                self.tags.clear();
                self.query = None;
            }
            Action::Sort { by } => self.sort = Some(*by),
            Action::Home { section } => self.section = Some(*section),
            Action::GameCard { index } => self.opened_card = Some(*index),
            _ => return,
        }
        event.prevent_default();
    }
}

// ============================================================================
// Game detail
// ============================================================================

/// Detail view for one game. Only claims game actions while a game is open.
#[derive(Debug, Default)]
pub struct GameDetailPage {
    pub open_game: Option<String>,
    pub on_watchlist: bool,
    pub following: bool,
    pub reviews_open: bool,
    pub composing_review: bool,
}

impl GameDetailPage {
    pub fn open(game: impl Into<String>) -> Self {
        Self {
            open_game: Some(game.into()),
            ..Default::default()
        }
    }
}

impl Subscriber for GameDetailPage {
    fn on_intent(&mut self, event: &mut VoiceEvent<'_>) {
        let Action::Game { action } = &event.intent().action else {
            return;
        };
        if self.open_game.is_none() {
            return;
        }
        match action {
            GameAction::Favourites => self.on_watchlist = true,
            GameAction::Unfavourite => self.on_watchlist = false,
            GameAction::Reviews => self.reviews_open = true,
            GameAction::WriteReview => self.composing_review = true,
            GameAction::Follow => self.following = !self.following,
        }
        event.prevent_default();
    }
}

// ============================================================================
// Account form
// ============================================================================

/// Login/registration form fed by dictation
#[derive(Debug, Default)]
pub struct AccountForm {
    fields: HashMap<FieldName, String>,
    active: Option<FieldName>,
    pub submitted: Option<HashMap<FieldName, String>>,
}

impl AccountForm {
    pub fn value(&self, field: FieldName) -> &str {
        self.fields.get(&field).map(String::as_str).unwrap_or("")
    }

    pub fn active_field(&self) -> Option<FieldName> {
        self.active
    }

    pub fn apply(&mut self, edit: &SpellEdit) {
        match edit.action {
            SpellAction::Start => {
                if edit.field.is_some() {
                    self.active = edit.field;
                }
                if edit.clear == Some(true) {
                    self.clear_active();
                }
            }
            SpellAction::Stop => self.active = None,
            SpellAction::Append => {
                let Some(field) = self.active else {
                    tracing::debug!("spelling with no active field, dropped");
                    return;
                };
                if edit.clear == Some(true) {
                    self.clear_active();
                }
                let buffer = self.fields.entry(field).or_default();
                for _ in 0..edit.backspaces.unwrap_or(0) {
                    buffer.pop();
                }
                if let Some(value) = &edit.value {
                    buffer.push_str(value);
                }
            }
        }
    }

    fn clear_active(&mut self) {
        if let Some(field) = self.active {
            self.fields.insert(field, String::new());
        }
    }
}

impl Subscriber for AccountForm {
    fn on_intent(&mut self, event: &mut VoiceEvent<'_>) {
        match &event.intent().action {
            Action::Spell(edit) => self.apply(edit),
            Action::Auth {
                action: AuthAction::Submit,
            } => {
                self.active = None;
                self.submitted = Some(self.fields.clone());
            }
            _ => return,
        }
        event.prevent_default();
    }
}

// ============================================================================
// Preferences
// ============================================================================

/// Accessibility preferences: text size, button size, spacing, contrast
#[derive(Debug)]
pub struct PreferencesPanel {
    pub text_size: String,
    pub button_size: String,
    pub spacing: String,
    pub contrast: String,
}

impl Default for PreferencesPanel {
    fn default() -> Self {
        Self {
            text_size: "normal".into(),
            button_size: "normal".into(),
            spacing: "roomy".into(),
            contrast: "normal".into(),
        }
    }
}

impl Subscriber for PreferencesPanel {
    fn on_intent(&mut self, event: &mut VoiceEvent<'_>) {
        let Action::Settings { setting, value } = &event.intent().action else {
            return;
        };
        let slot = match setting {
            SettingKind::TextSize => &mut self.text_size,
            SettingKind::ButtonSize => &mut self.button_size,
            SettingKind::Spacing => &mut self.spacing,
            SettingKind::Contrast => &mut self.contrast,
        };
        *slot = value.clone();
        event.prevent_default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::DispatchBus;
    use crate::intent::{Intent, NavTarget};
    use std::sync::{Arc, Mutex};

    fn spell(edit: SpellEdit) -> Intent {
        Action::Spell(edit).with_utterance("")
    }

    #[test]
    fn test_dictation_accumulates() {
        let mut form = AccountForm::default();
        form.apply(&SpellEdit::start(Some(FieldName::Email)));
        form.apply(&SpellEdit::append("user"));
        form.apply(&SpellEdit::append("@example.com"));
        assert_eq!(form.value(FieldName::Email), "user@example.com");
    }

    #[test]
    fn test_start_clears_and_backspaces_trim() {
        let mut form = AccountForm::default();
        form.apply(&SpellEdit::start(Some(FieldName::Username)));
        form.apply(&SpellEdit::append("playerx"));
        form.apply(&SpellEdit {
            backspaces: Some(1),
            ..SpellEdit::append("1")
        });
        assert_eq!(form.value(FieldName::Username), "player1");

        form.apply(&SpellEdit::start(Some(FieldName::Username)));
        assert_eq!(form.value(FieldName::Username), "");
    }

    #[test]
    fn test_append_without_active_field_is_dropped() {
        let mut form = AccountForm::default();
        form.apply(&SpellEdit::append("lost"));
        assert_eq!(form.value(FieldName::Email), "");
    }

    #[test]
    fn test_form_claims_spell_and_submit() {
        let form = Arc::new(Mutex::new(AccountForm::default()));
        let mut bus = DispatchBus::default();
        bus.subscribe(form.clone());

        assert!(bus.dispatch(&spell(SpellEdit::start(Some(FieldName::Password)))));
        assert!(bus.dispatch(&spell(SpellEdit::append("hunter2"))));
        assert!(bus.dispatch(&Action::Auth { action: AuthAction::Submit }.with_utterance("submit")));
        assert!(!bus.dispatch(&Action::navigate(NavTarget::Home).with_utterance("home")));

        let form = form.lock().unwrap();
        let submitted = form.submitted.as_ref().unwrap();
        assert_eq!(submitted[&FieldName::Password], "hunter2");
    }

    #[test]
    fn test_catalog_merges_tags() {
        let catalog = Arc::new(Mutex::new(CatalogPage::default()));
        let mut bus = DispatchBus::default();
        bus.subscribe(catalog.clone());

        bus.dispatch(&Action::filter("Motor").with_utterance("filter by motor"));
        bus.dispatch(
            &Action::Filter(FilterTags::Many {
                tags: vec!["motor".into(), "Puzzle".into()],
            })
            .with_utterance("apply filters motor and puzzle"),
        );
        assert_eq!(catalog.lock().unwrap().tags, ["Motor", "Puzzle"]);

        bus.dispatch(&Action::ResetFilters.with_utterance("reset filters"));
        assert!(catalog.lock().unwrap().tags.is_empty());
    }

    #[test]
    fn test_game_page_claims_only_when_open() {
        let mut bus = DispatchBus::default();
        bus.subscribe(GameDetailPage::default());
        let favourite = Action::Game {
            action: GameAction::Favourites,
        }
        .with_utterance("add to watchlist");
        assert!(!bus.dispatch(&favourite));

        let page = Arc::new(Mutex::new(GameDetailPage::open("celeste")));
        bus.subscribe(page.clone());
        assert!(bus.dispatch(&favourite));
        assert!(page.lock().unwrap().on_watchlist);
    }

    #[test]
    fn test_preferences() {
        let prefs = Arc::new(Mutex::new(PreferencesPanel::default()));
        let mut bus = DispatchBus::default();
        bus.subscribe(prefs.clone());
        assert!(bus.dispatch(
            &Action::settings(SettingKind::ButtonSize, "extra-large").with_utterance("huge buttons")
        ));
        assert_eq!(prefs.lock().unwrap().button_size, "extra-large");
    }
}
