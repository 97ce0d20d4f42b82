//! Matcher family tables
//!
//! Patterns run against normalized commands (lowercase, single spaces, no
//! terminal punctuation) and are anchored at both ends.

use super::RuleRow;
use super::vocab::{canonical_tag, genre};
use crate::dictation::parse_start;
use crate::intent::{
    Action, AuthAction, FilterTags, GameAction, NavTarget, ScrollDirection, SettingKind, SortKey,
    SpellEdit, UiAction,
};
use regex::{Captures, Regex};
use std::sync::LazyLock;

pub const NAVIGATION: &[RuleRow] = &[
    (
        "go-to",
        r"^(?:go|take me|bring me|navigate|head)(?: back)? to(?: the| my)? (.+?)(?: page| screen)?$",
        nav_to,
    ),
    (
        "open",
        r"^(?:open|show|show me|view)(?: the| my)? (home|homepage|search|settings|preferences|options|profile|account)(?: page| screen)?$",
        nav_to,
    ),
    (
        "back",
        r"^(?:(?:go )?back(?: a page| one page)?|previous(?: page)?|last page)$",
        |_| Some(Action::navigate(NavTarget::Back)),
    ),
    (
        "next",
        r"^(?:(?:next|more)(?: page| results)?|(?:show|load) more(?: results| games)?)$",
        |_| Some(Action::navigate(NavTarget::NextPage)),
    ),
];

pub const SEARCH: &[RuleRow] = &[
    // Genre browse runs first so "show puzzle games" filters instead of searching
    (
        "genre-browse",
        r"^(?:show|find|browse|list|search(?: for)?|look(?: for| up)?|hunt(?: for)?)(?: me)?(?: some| all| the)? (.+?)(?: games?)?$",
        |c| genre(&c[1]).map(Action::filter),
    ),
    (
        "search-catalog",
        r"^(?:search|look in|look through)(?: the)? (?:catalog|catalogue|store) for (.+)$",
        search,
    ),
    ("search-for", r"^(?:search|look|hunt)(?: for| up)? (.+)$", search),
    ("find", r"^find(?: me)? (.+)$", search),
];

pub const FILTER: &[RuleRow] = &[
    (
        "toggle",
        r"^(?:filter (?:by|for|on)|show(?: me)?(?: only)?|only show)(?: the)? (.+?)(?: games?| mode| filter| friendly)?$",
        |c| canonical_tag(&c[1]).map(Action::filter),
    ),
    (
        "reset",
        r"^(?:(?:reset|clear|remove)(?: all)?(?: the)?(?: my)? filters?|(?:show )?all games|no filters?)$",
        |_| Some(Action::ResetFilters),
    ),
    (
        "capture",
        r"^(?:(?:apply|add|use|set)(?: the)? filters?(?: for| of| to)?|filter (?:by|for|on|with)) (.+)$",
        capture_tags,
    ),
    (
        "sort",
        r"^(?:sort|order)(?: the)?(?: games| results| list)?(?: by)? (.+)$",
        |c| sort_key(&c[1]).map(|by| Action::Sort { by }),
    ),
];

pub const PAGE_ACTIONS: &[RuleRow] = &[
    (
        "favourite",
        r"^(?:(?:add|save|put)(?: this| it| the game)?(?: game)? to(?: my)? (?:watchlist|watch list|favourites|favorites|wishlist)|(?:favourite|favorite)(?: this| it)?(?: game)?)$",
        |_| game(GameAction::Favourites),
    ),
    (
        "unfavourite",
        r"^(?:(?:remove|delete|take)(?: this| it| the game)?(?: game)? (?:from|off|out of)(?: my)? (?:watchlist|watch list|favourites|favorites|wishlist)|(?:unfavourite|unfavorite)(?: this| it)?)$",
        |_| game(GameAction::Unfavourite),
    ),
    (
        "write-review",
        r"^(?:write|leave|add|post)(?: a| my)? review$",
        |_| game(GameAction::WriteReview),
    ),
    (
        "reviews",
        r"^(?:(?:open|show|read|see|view)(?: the)? reviews|reviews)$",
        |_| game(GameAction::Reviews),
    ),
    (
        "follow",
        r"^follow(?: this)?(?: game| developer| studio)?$",
        |_| game(GameAction::Follow),
    ),
    (
        "scroll",
        r"^(?:scroll|page|move) (up|down)(?: a bit| more)?$",
        |c| scroll_direction(&c[1]).map(Action::scroll),
    ),
    (
        "scroll-edge",
        r"^(?:scroll|go|jump|skip)(?: all the way)?(?: to)?(?: the)? (top|bottom)(?: of(?: the)? page)?$",
        |c| scroll_direction(&c[1]).map(Action::scroll),
    ),
    (
        "game-card",
        r"^(?:(?:open|select|choose|pick|show)(?: the)? (\w+) (?:game|card|result|one)|(?:open|select) (?:game|card|result|number) (\w+))$",
        |c| {
            let spoken = c.get(1).or_else(|| c.get(2))?;
            ordinal(spoken.as_str()).map(|index| Action::GameCard { index })
        },
    ),
    (
        "spell-start",
        r"^(?:(?:start|begin) )?spell(?:ing)?(?: .+)?$",
        |c| parse_start(&c[0], None).map(Action::Spell),
    ),
    (
        "spell-stop",
        r"^(?:stop|end|finish|done) spelling$",
        |_| Some(Action::Spell(SpellEdit::stop())),
    ),
    (
        "open-menu",
        r"^(?:open|show)(?: the)? (?:menu|navigation)$",
        |_| ui(UiAction::OpenMenu),
    ),
    (
        "close-menu",
        r"^(?:close|hide)(?: the)? (?:menu|navigation)$",
        |_| ui(UiAction::CloseMenu),
    ),
    (
        "close-dialog",
        r"^(?:(?:close|dismiss)(?: the| this)? (?:dialog|popup|modal|window)|cancel)$",
        |_| ui(UiAction::CloseDialog),
    ),
    (
        "focus-search",
        r"^(?:focus|go to|select)(?: the)? search (?:bar|box|field)$",
        |_| ui(UiAction::FocusSearch),
    ),
    (
        "help",
        r"^(?:help|what can i say|show(?: the)? commands|voice commands)$",
        |_| ui(UiAction::Help),
    ),
    (
        "contrast",
        r"^(?:(?:turn on|enable|switch on|use) )?high contrast(?: mode)?(?: (on|off))?$",
        |c| {
            let value = match c.get(1).map(|m| m.as_str()) {
                Some("off") => "normal",
                _ => "high",
            };
            Some(Action::settings(SettingKind::Contrast, value))
        },
    ),
    (
        "contrast-off",
        r"^(?:(?:turn off|disable|switch off) high contrast(?: mode)?|normal contrast)$",
        |_| Some(Action::settings(SettingKind::Contrast, "normal")),
    ),
    (
        "submit",
        r"^(?:submit|send)(?: the)?(?: form)?$",
        |_| Some(Action::Auth { action: AuthAction::Submit }),
    ),
];

/// Segment separator for the generic capture: a comma or the word "and"
static TAG_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*(?:,|\band\b)\s*").expect("static separator pattern"));

fn nav_to(c: &Captures<'_>) -> Option<Action> {
    NavTarget::from_spoken(&c[1]).map(Action::navigate)
}

fn search(c: &Captures<'_>) -> Option<Action> {
    let query = c[1].trim();
    (!query.is_empty()).then(|| Action::Search {
        query: query.to_string(),
    })
}

/// Split the remainder into raw segments. No segments means no intent.
fn capture_tags(c: &Captures<'_>) -> Option<Action> {
    let segments = split_tags(&c[1]);
    FilterTags::from_segments(segments).map(Action::Filter)
}

pub fn split_tags(remainder: &str) -> Vec<String> {
    TAG_SEPARATOR
        .split(remainder)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

fn sort_key(spoken: &str) -> Option<SortKey> {
    match spoken.trim() {
        "rating" | "ratings" | "top rated" | "highest rated" | "best" | "score" => Some(SortKey::Rating),
        "newest" | "new" | "latest" | "release date" | "most recent" | "date" => Some(SortKey::Newest),
        "oldest" | "old" | "earliest" => Some(SortKey::Oldest),
        "name" | "title" | "alphabetical" | "alphabetically" | "a to z" => Some(SortKey::Name),
        "popular" | "popularity" | "most popular" => Some(SortKey::Popular),
        _ => None,
    }
}

fn scroll_direction(spoken: &str) -> Option<ScrollDirection> {
    match spoken {
        "up" => Some(ScrollDirection::Up),
        "down" => Some(ScrollDirection::Down),
        "top" => Some(ScrollDirection::Top),
        "bottom" => Some(ScrollDirection::Bottom),
        _ => None,
    }
}

/// "third", "3rd", "three", "3" → 3. Card positions are 1-based as spoken.
fn ordinal(spoken: &str) -> Option<usize> {
    const WORDS: &[(&str, &str, usize)] = &[
        ("first", "one", 1),
        ("second", "two", 2),
        ("third", "three", 3),
        ("fourth", "four", 4),
        ("fifth", "five", 5),
        ("sixth", "six", 6),
        ("seventh", "seven", 7),
        ("eighth", "eight", 8),
        ("ninth", "nine", 9),
        ("tenth", "ten", 10),
    ];
    if let Some((_, _, n)) = WORDS.iter().find(|(ord, card, _)| *ord == spoken || *card == spoken) {
        return Some(*n);
    }
    let digits = spoken.trim_end_matches(|c: char| c.is_ascii_alphabetic());
    digits.parse().ok().filter(|n| *n > 0)
}

fn game(action: GameAction) -> Option<Action> {
    Some(Action::Game { action })
}

fn ui(action: UiAction) -> Option<Action> {
    Some(Action::Ui { action })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_tags() {
        assert_eq!(split_tags("color blind mode and high contrast"), ["color blind mode", "high contrast"]);
        assert_eq!(split_tags("puzzle,motor , indie"), ["puzzle", "motor", "indie"]);
        assert_eq!(split_tags("motor"), ["motor"]);
        assert!(split_tags(" , and ").is_empty());
    }

    #[test]
    fn test_and_inside_word_is_not_a_separator() {
        assert_eq!(split_tags("one handed and brandy"), ["one handed", "brandy"]);
    }

    #[test]
    fn test_ordinal() {
        assert_eq!(ordinal("first"), Some(1));
        assert_eq!(ordinal("three"), Some(3));
        assert_eq!(ordinal("3rd"), Some(3));
        assert_eq!(ordinal("12"), Some(12));
        assert_eq!(ordinal("0"), None);
        assert_eq!(ordinal("last"), None);
    }

    #[test]
    fn test_sort_key() {
        assert_eq!(sort_key("top rated"), Some(SortKey::Rating));
        assert_eq!(sort_key("a to z"), Some(SortKey::Name));
        assert_eq!(sort_key("vibes"), None);
    }
}
