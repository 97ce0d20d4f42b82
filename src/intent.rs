//! Intents - the structured result of interpreting one spoken command
//!
//! An [`Intent`] is a tagged [`Action`] plus the filler-stripped utterance it
//! came from. The JSON shape is flat and shared with the remote interpreter:
//!
//! ```json
//! {"type": "filter", "tag": "Motor", "utterance": "filter by motor"}
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// A resolved command. Created once by a matcher, never edited afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Intent {
    #[serde(flatten)]
    pub action: Action,
    /// Normalized command text, kept for diagnostics
    #[serde(default)]
    pub utterance: String,
}

impl Intent {
    pub fn new(action: Action, utterance: impl Into<String>) -> Self {
        Self {
            action,
            utterance: utterance.into(),
        }
    }

    /// Spell intents belong to the dictation sub-session
    pub fn is_dictation(&self) -> bool {
        matches!(self.action, Action::Spell(_))
    }

    pub fn spell(&self) -> Option<&SpellEdit> {
        match &self.action {
            Action::Spell(edit) => Some(edit),
            _ => None,
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.action)
    }
}

/// Tagged intent payload. Each variant carries only the fields its tag needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Action {
    Navigate { target: NavTarget },
    Search { query: String },
    Filter(FilterTags),
    ResetFilters,
    Scroll { direction: ScrollDirection },
    Ui { action: UiAction },
    Game { action: GameAction },
    GameCard { index: usize },
    Settings { setting: SettingKind, value: String },
    Sort { by: SortKey },
    Spell(SpellEdit),
    Library { view: LibraryView },
    Auth { action: AuthAction },
    Home { section: HomeSection },
}

impl Action {
    pub fn with_utterance(self, utterance: impl Into<String>) -> Intent {
        Intent::new(self, utterance)
    }

    /// Tag name as it appears on the wire
    pub fn kind(&self) -> &'static str {
        match self {
            Action::Navigate { .. } => "navigate",
            Action::Search { .. } => "search",
            Action::Filter(_) => "filter",
            Action::ResetFilters => "reset-filters",
            Action::Scroll { .. } => "scroll",
            Action::Ui { .. } => "ui",
            Action::Game { .. } => "game",
            Action::GameCard { .. } => "game-card",
            Action::Settings { .. } => "settings",
            Action::Sort { .. } => "sort",
            Action::Spell(_) => "spell",
            Action::Library { .. } => "library",
            Action::Auth { .. } => "auth",
            Action::Home { .. } => "home",
        }
    }

    pub fn filter(tag: impl Into<String>) -> Self {
        Action::Filter(FilterTags::One { tag: tag.into() })
    }

    pub fn navigate(target: NavTarget) -> Self {
        Action::Navigate { target }
    }

    pub fn scroll(direction: ScrollDirection) -> Self {
        Action::Scroll { direction }
    }

    pub fn settings(setting: SettingKind, value: &str) -> Self {
        Action::Settings {
            setting,
            value: value.to_string(),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Navigate { target } => write!(f, "navigate → {}", target.as_str()),
            Action::Search { query } => write!(f, "search \"{}\"", query),
            Action::Filter(FilterTags::One { tag }) => write!(f, "filter {}", tag),
            Action::Filter(FilterTags::Many { tags }) => write!(f, "filter {}", tags.join(" + ")),
            Action::ResetFilters => write!(f, "reset filters"),
            Action::Scroll { direction } => write!(f, "scroll {:?}", direction),
            Action::Ui { action } => write!(f, "ui {:?}", action),
            Action::Game { action } => write!(f, "game {:?}", action),
            Action::GameCard { index } => write!(f, "open game #{}", index),
            Action::Settings { setting, value } => write!(f, "{:?} = {}", setting, value),
            Action::Sort { by } => write!(f, "sort by {:?}", by),
            Action::Spell(edit) => write!(f, "spell {:?}", edit.action),
            Action::Library { view } => write!(f, "library {:?}", view),
            Action::Auth { action } => write!(f, "auth {:?}", action),
            Action::Home { section } => write!(f, "home {:?}", section),
        }
    }
}

/// `tag` XOR `tags`. Consumers branch on the singular vs. plural field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterTags {
    One { tag: String },
    Many { tags: Vec<String> },
}

impl FilterTags {
    /// One segment gives `{tag}`, more than one gives `{tags}`, none gives nothing
    pub fn from_segments(mut segments: Vec<String>) -> Option<Self> {
        match segments.len() {
            0 => None,
            1 => segments.pop().map(|tag| FilterTags::One { tag }),
            _ => Some(FilterTags::Many { tags: segments }),
        }
    }

    pub fn tags(&self) -> Vec<&str> {
        match self {
            FilterTags::One { tag } => vec![tag.as_str()],
            FilterTags::Many { tags } => tags.iter().map(String::as_str).collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NavTarget {
    Home,
    Search,
    Settings,
    Profile,
    Back,
    NextPage,
}

impl NavTarget {
    pub fn as_str(&self) -> &'static str {
        match self {
            NavTarget::Home => "home",
            NavTarget::Search => "search",
            NavTarget::Settings => "settings",
            NavTarget::Profile => "profile",
            NavTarget::Back => "back",
            NavTarget::NextPage => "next-page",
        }
    }

    /// Spoken page name → target
    pub fn from_spoken(word: &str) -> Option<Self> {
        match word {
            "home" | "homepage" | "home page" | "start" => Some(NavTarget::Home),
            "search" | "search page" => Some(NavTarget::Search),
            "settings" | "preferences" | "options" => Some(NavTarget::Settings),
            "profile" | "account" | "my profile" | "my account" => Some(NavTarget::Profile),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScrollDirection {
    Up,
    Down,
    Top,
    Bottom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UiAction {
    OpenMenu,
    CloseMenu,
    CloseDialog,
    FocusSearch,
    Help,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GameAction {
    Favourites,
    Unfavourite,
    Reviews,
    WriteReview,
    Follow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SettingKind {
    TextSize,
    ButtonSize,
    Spacing,
    Contrast,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    Rating,
    Newest,
    Oldest,
    Name,
    Popular,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LibraryView {
    All,
    Watchlist,
    Reviews,
    Following,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AuthAction {
    Login,
    Logout,
    Register,
    Submit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HomeSection {
    Featured,
    NewReleases,
    Trending,
}

/// Form fields a dictation session can target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldName {
    Email,
    Password,
    Username,
    Identifier,
    ConfirmPassword,
}

impl FieldName {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldName::Email => "email",
            FieldName::Password => "password",
            FieldName::Username => "username",
            FieldName::Identifier => "identifier",
            FieldName::ConfirmPassword => "confirm-password",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SpellAction {
    Start,
    Append,
    Stop,
}

/// Payload of a `spell` intent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpellEdit {
    pub action: SpellAction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<FieldName>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backspaces: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clear: Option<bool>,
}

impl SpellEdit {
    /// Start a session on `field`, clearing whatever it held
    pub fn start(field: Option<FieldName>) -> Self {
        Self {
            action: SpellAction::Start,
            field,
            value: None,
            backspaces: None,
            clear: Some(true),
        }
    }

    pub fn stop() -> Self {
        Self {
            action: SpellAction::Stop,
            field: None,
            value: None,
            backspaces: None,
            clear: None,
        }
    }

    pub fn append(value: impl Into<String>) -> Self {
        Self {
            action: SpellAction::Append,
            field: None,
            value: Some(value.into()),
            backspaces: None,
            clear: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_single_tag_shape() {
        let intent = Action::filter("Motor").with_utterance("filter by motor");
        assert_eq!(
            serde_json::to_value(&intent).unwrap(),
            json!({"type": "filter", "tag": "Motor", "utterance": "filter by motor"})
        );
    }

    #[test]
    fn test_many_tags_shape() {
        let tags = FilterTags::from_segments(vec!["a".into(), "b".into()]).unwrap();
        let intent = Action::Filter(tags).with_utterance("apply filters a and b");
        let value = serde_json::to_value(&intent).unwrap();
        assert_eq!(value["tags"], json!(["a", "b"]));
        assert!(value.get("tag").is_none());
    }

    #[test]
    fn test_from_segments_empty() {
        assert_eq!(FilterTags::from_segments(Vec::new()), None);
    }

    #[test]
    fn test_unit_and_kebab_variants() {
        let intent = Action::ResetFilters.with_utterance("reset filters");
        assert_eq!(
            serde_json::to_value(&intent).unwrap(),
            json!({"type": "reset-filters", "utterance": "reset filters"})
        );

        let intent = Action::navigate(NavTarget::NextPage).with_utterance("next page");
        assert_eq!(
            serde_json::to_value(&intent).unwrap(),
            json!({"type": "navigate", "target": "next-page", "utterance": "next page"})
        );
    }

    #[test]
    fn test_spell_skips_absent_fields() {
        let intent = Action::Spell(SpellEdit::start(Some(FieldName::Email))).with_utterance("spell email");
        assert_eq!(
            serde_json::to_value(&intent).unwrap(),
            json!({"type": "spell", "action": "start", "field": "email", "clear": true, "utterance": "spell email"})
        );
    }

    #[test]
    fn test_parse_remote_payload() {
        let intent: Intent = serde_json::from_value(json!({
            "type": "filter",
            "tags": ["Puzzle", "Motor"],
            "utterance": "puzzle motor"
        }))
        .unwrap();
        assert_eq!(
            intent.action,
            Action::Filter(FilterTags::Many {
                tags: vec!["Puzzle".into(), "Motor".into()]
            })
        );

        let intent: Intent = serde_json::from_value(json!({"type": "scroll", "direction": "down"})).unwrap();
        assert_eq!(intent.action, Action::scroll(ScrollDirection::Down));
        assert_eq!(intent.utterance, "");
    }

    #[test]
    fn test_unknown_type_rejected() {
        let result: Result<Intent, _> = serde_json::from_value(json!({"type": "dance"}));
        assert!(result.is_err());
    }
}
