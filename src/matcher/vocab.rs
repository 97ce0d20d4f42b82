//! Canonical tag vocabulary shared by the matcher families
//!
//! Each entry maps the spoken variants of a tag to the catalog's canonical
//! spelling. Variants are lowercase and compared after trimming.

/// Catalog genres
pub const GENRES: &[(&[&str], &str)] = &[
    (&["action"], "Action"),
    (&["adventure"], "Adventure"),
    (&["puzzle", "puzzles", "puzzler"], "Puzzle"),
    (&["platformer", "platformers", "platforming"], "Platformer"),
    (&["rpg", "role playing", "role-playing", "roleplaying"], "RPG"),
    (&["strategy"], "Strategy"),
    (&["racing", "driving"], "Racing"),
    (&["sports", "sport"], "Sports"),
    (&["shooter", "shooters", "shooting", "fps"], "Shooter"),
    (&["simulation", "sim", "sims"], "Simulation"),
    (&["horror", "scary"], "Horror"),
    (&["fighting", "fighter"], "Fighting"),
    (&["indie"], "Indie"),
    (&["casual"], "Casual"),
    (&["rhythm", "music"], "Rhythm"),
    (&["family", "kids"], "Family"),
];

/// Accessibility tags
pub const ACCESSIBILITY_TAGS: &[(&[&str], &str)] = &[
    (&["motor", "motor friendly", "motor accessible"], "Motor"),
    (
        &[
            "colour blind",
            "color blind",
            "colourblind",
            "colorblind",
            "colour blind mode",
            "color blind mode",
            "colourblind mode",
            "colorblind mode",
        ],
        "Colourblind Mode",
    ),
    (
        &["one hand", "one handed", "one-handed", "single hand", "single handed"],
        "One-Handed",
    ),
    (&["high contrast"], "High Contrast"),
    (&["subtitles", "captions", "closed captions"], "Subtitles"),
    (&["screen reader", "screen reader support"], "Screen Reader"),
    (&["hearing", "deaf", "hard of hearing"], "Hearing"),
    (&["vision", "visual", "low vision"], "Vision"),
    (&["dyslexia", "dyslexic", "dyslexia friendly"], "Dyslexia Friendly"),
    (
        &["remappable controls", "remapping", "control remapping", "remap"],
        "Remappable Controls",
    ),
];

/// Forgiving keyword table: substring → tag, first entry wins
pub const KEYWORD_SYNONYMS: &[(&str, &str)] = &[
    ("colour blind", "Colourblind Mode"),
    ("color blind", "Colourblind Mode"),
    ("colourblind", "Colourblind Mode"),
    ("colorblind", "Colourblind Mode"),
    ("one hand", "One-Handed"),
    ("single hand", "One-Handed"),
    ("high contrast", "High Contrast"),
    ("subtitle", "Subtitles"),
    ("caption", "Subtitles"),
    ("screen reader", "Screen Reader"),
    ("dyslexi", "Dyslexia Friendly"),
    ("motor", "Motor"),
    ("hearing", "Hearing"),
    ("deaf", "Hearing"),
    ("low vision", "Vision"),
    ("remap", "Remappable Controls"),
];

fn lookup(table: &[(&[&str], &'static str)], phrase: &str) -> Option<&'static str> {
    let phrase = phrase.trim();
    let phrase = phrase.strip_prefix("the ").unwrap_or(phrase);
    table
        .iter()
        .find(|(variants, _)| variants.contains(&phrase))
        .map(|(_, canonical)| *canonical)
}

/// Exact genre lookup ("puzzle" → "Puzzle")
pub fn genre(phrase: &str) -> Option<&'static str> {
    lookup(GENRES, phrase)
}

/// Exact lookup across accessibility tags then genres
pub fn canonical_tag(phrase: &str) -> Option<&'static str> {
    lookup(ACCESSIBILITY_TAGS, phrase).or_else(|| genre(phrase))
}

/// First synonym contained anywhere in `text`
pub fn keyword_tag(text: &str) -> Option<&'static str> {
    KEYWORD_SYNONYMS
        .iter()
        .find(|(needle, _)| text.contains(needle))
        .map(|(_, tag)| *tag)
}
