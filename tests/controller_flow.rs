//! End-to-end controller tests: transcripts in, page state out
//!
//! Pages are shared with the bus through `Arc<Mutex<_>>` so each test can
//! inspect what a command actually changed.

use handsfree::controller::{Controller, Outcome, WAKE_WINDOW};
use handsfree::dispatch::DispatchBus;
use handsfree::intent::{Action, FieldName, FilterTags, NavTarget};
use handsfree::matcher::Cascade;
use handsfree::pages::{AccountForm, CatalogPage, GameDetailPage, PreferencesPanel};
use handsfree::render::{FeedbackEvent, RecordingFeedback};
use handsfree::shell::{AppShell, Route};
use handsfree::transcript::Transcript;
use handsfree::wake::WakeWord;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

struct Harness {
    controller: Controller,
    feedback: RecordingFeedback,
    catalog: Arc<Mutex<CatalogPage>>,
    detail: Arc<Mutex<GameDetailPage>>,
    form: Arc<Mutex<AccountForm>>,
    prefs: Arc<Mutex<PreferencesPanel>>,
    now: Instant,
}

impl Harness {
    fn new() -> Self {
        let catalog = Arc::new(Mutex::new(CatalogPage::default()));
        let detail = Arc::new(Mutex::new(GameDetailPage::open("celeste")));
        let form = Arc::new(Mutex::new(AccountForm::default()));
        let prefs = Arc::new(Mutex::new(PreferencesPanel::default()));

        let mut bus = DispatchBus::new(AppShell::new(1000.0));
        bus.subscribe(catalog.clone());
        bus.subscribe(detail.clone());
        bus.subscribe(form.clone());
        bus.subscribe(prefs.clone());

        let feedback = RecordingFeedback::new();
        let controller = Controller::new(
            WakeWord::new("hey platform"),
            Cascade::builtin().unwrap(),
            bus,
            Box::new(feedback.clone()),
        )
        .with_remote(false);

        Self {
            controller,
            feedback,
            catalog,
            detail,
            form,
            prefs,
            now: Instant::now(),
        }
    }

    /// Hear `text` after `after_ms` more milliseconds
    fn say(&mut self, after_ms: u64, text: &str) -> Outcome {
        self.now += Duration::from_millis(after_ms);
        self.controller.on_transcript(&Transcript::at(text, self.now))
    }
}

fn action(outcome: &Outcome) -> Option<&Action> {
    match outcome {
        Outcome::Dispatched { intent, .. } => Some(&intent.action),
        _ => None,
    }
}

#[test]
fn test_wake_word_and_filter_reach_catalog() {
    let mut h = Harness::new();
    let outcome = h.say(0, "Hey platform, filter by motor");
    assert_eq!(action(&outcome), Some(&Action::filter("Motor")));
    assert!(matches!(outcome, Outcome::Dispatched { claimed: true, restart: true, .. }));
    assert_eq!(h.catalog.lock().unwrap().tags, ["Motor"]);

    let announced = h.feedback.events().into_iter().any(|e| {
        matches!(e, FeedbackEvent::Command { ref utterance, .. } if utterance == "filter by motor")
    });
    assert!(announced);
}

#[test]
fn test_generic_filters_merge_on_catalog() {
    let mut h = Harness::new();
    let outcome = h.say(0, "hey platform apply filters color blind mode and high contrast");
    assert_eq!(
        action(&outcome),
        Some(&Action::Filter(FilterTags::Many {
            tags: vec!["color blind mode".into(), "high contrast".into()]
        }))
    );
    h.say(3000, "hey platform show puzzle games");
    assert_eq!(
        h.catalog.lock().unwrap().tags,
        ["color blind mode", "high contrast", "Puzzle"]
    );
}

#[test]
fn test_commands_without_wake_word_never_dispatch() {
    let mut h = Harness::new();
    assert_eq!(h.say(0, "go to settings"), Outcome::Ignored);
    assert_eq!(h.say(100, "scroll down"), Outcome::Ignored);
    assert_eq!(h.controller.bus().shell().route(), Route::Home);
    assert_eq!(h.controller.bus().shell().scroll_offset(), 0.0);
}

#[test]
fn test_window_collapses_after_a_command() {
    let mut h = Harness::new();
    assert_eq!(h.say(0, "hey platform"), Outcome::Awake);
    let outcome = h.say(800, "open settings");
    assert_eq!(action(&outcome), Some(&Action::navigate(NavTarget::Settings)));
    assert_eq!(h.controller.bus().shell().route(), Route::Settings);

    // Same window, but the first command closed it
    assert_eq!(h.say(200, "go home"), Outcome::Ignored);
    assert_eq!(h.controller.bus().shell().route(), Route::Settings);
}

#[test]
fn test_window_refresh_keeps_session_alive() {
    let mut h = Harness::new();
    h.say(0, "hey platform");
    h.say(2000, "hey platform");
    // 4000 ms after the first wake, 2000 after the refresh
    let outcome = h.say(2000, "scroll down");
    assert_eq!(action(&outcome), Some(&Action::scroll(handsfree::intent::ScrollDirection::Down)));
    assert_eq!(h.controller.bus().shell().scroll_offset(), 800.0);
}

#[test]
fn test_window_expiry() {
    let mut h = Harness::new();
    h.say(0, "hey platform");
    assert_eq!(h.say(WAKE_WINDOW.as_millis() as u64, "scroll down"), Outcome::Ignored);
}

#[test]
fn test_unmatched_without_remote_reports_no_match() {
    let mut h = Harness::new();
    assert_eq!(h.say(0, "hey platform sing me a song"), Outcome::NoMatch);
    assert!(
        h.feedback
            .statuses()
            .iter()
            .any(|s| s == "No command matched \"sing me a song\"")
    );
}

#[test]
fn test_game_actions_claimed_by_detail_page() {
    let mut h = Harness::new();
    h.say(0, "hey platform add to watchlist");
    h.say(100, "hey platform follow this game");
    let detail = h.detail.lock().unwrap();
    assert!(detail.on_watchlist);
    assert!(detail.following);
}

#[test]
fn test_settings_claimed_by_preferences() {
    let mut h = Harness::new();
    h.say(0, "hey platform make the text a bit bigger");
    h.say(100, "hey platform turn on high contrast");
    let prefs = h.prefs.lock().unwrap();
    assert_eq!(prefs.text_size, "large");
    assert_eq!(prefs.contrast, "high");
}

#[test]
fn test_dictation_fills_email_field() {
    let mut h = Harness::new();
    let outcome = h.say(0, "hey platform spell email");
    assert!(matches!(outcome, Outcome::Dispatched { restart: false, .. }));
    assert!(h.controller.is_dictating());
    assert!(h.feedback.statuses().iter().any(|s| s == "Spelling email"));

    // No wake word needed, and the window does not matter while spelling
    h.say(10_000, "user");
    h.say(10_000, "at example dot com");
    assert_eq!(h.form.lock().unwrap().value(FieldName::Email), "user@example.com");

    let outcome = h.say(100, "done");
    assert!(matches!(outcome, Outcome::Dispatched { restart: false, .. }));
    assert!(!h.controller.is_dictating());
    assert_eq!(h.form.lock().unwrap().active_field(), None);

    // Back to wake-word gating
    assert_eq!(h.say(100, "scroll down"), Outcome::Ignored);
}

#[test]
fn test_dictation_backspace_and_unrecognized_speech() {
    let mut h = Harness::new();
    h.say(0, "hey platform spell username");
    h.say(100, "player x");
    h.say(100, "backspace one");
    assert_eq!(h.say(100, "???"), Outcome::NoMatch);
    assert!(h.controller.is_dictating());
    h.say(100, "stop spelling");
    assert_eq!(h.form.lock().unwrap().value(FieldName::Username), "player1");
}

#[test]
fn test_unclaimed_navigation_falls_to_shell() {
    let mut h = Harness::new();
    h.say(0, "hey platform open the search page");
    h.say(100, "hey platform show more results");
    assert_eq!(h.controller.bus().shell().route(), Route::Search);
    assert_eq!(h.controller.bus().shell().page(), 2);

    h.say(100, "hey platform go back");
    assert_eq!(h.controller.bus().shell().route(), Route::Home);
}
