//! Session controller - wake-word gating, awake window, dictation mode
//!
//! Owns all session state and is its only writer. Time is passed in with
//! each transcript, so the state machine itself never sleeps or spawns;
//! the async runner in [`crate::session`] performs the remote call and the
//! recognizer restart that an [`Outcome`] asks for.

use crate::dictation::Dictation;
use crate::dispatch::DispatchBus;
use crate::intent::{Action, FieldName, Intent, SpellAction};
use crate::matcher::Cascade;
use crate::render::Feedback;
use crate::transcript::Transcript;
use crate::wake::{WakeWord, normalize};
use std::time::{Duration, Instant};

pub const WAKE_WINDOW: Duration = Duration::from_millis(2500);

/// An active spelling session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DictationSession {
    pub field: Option<FieldName>,
}

/// Mutable session state. Starts idle with no dictation.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub awake_until: Option<Instant>,
    pub dictation: Option<DictationSession>,
}

impl SessionState {
    pub fn is_awake(&self, now: Instant) -> bool {
        self.awake_until.is_some_and(|until| now < until)
    }
}

/// What handling one transcript led to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// An intent was dispatched. `restart` asks for a recognizer restart.
    Dispatched {
        intent: Intent,
        claimed: bool,
        restart: bool,
    },
    /// Local matching failed inside the awake window: ask the remote
    /// interpreter and report back through [`Controller::on_remote_result`]
    Remote { transcript: String },
    /// Wake word heard with no command yet
    Awake,
    /// Not awake and no wake word: never reached the matcher
    Ignored,
    /// Considered but nothing resolved
    NoMatch,
}

pub struct Controller {
    wake: WakeWord,
    wake_window: Duration,
    cascade: Cascade,
    dictation: Dictation,
    remote_enabled: bool,
    state: SessionState,
    bus: DispatchBus,
    feedback: Box<dyn Feedback>,
}

impl Controller {
    pub fn new(wake: WakeWord, cascade: Cascade, bus: DispatchBus, feedback: Box<dyn Feedback>) -> Self {
        Self {
            dictation: Dictation::new(&wake),
            wake,
            wake_window: WAKE_WINDOW,
            cascade,
            remote_enabled: true,
            state: SessionState::default(),
            bus,
            feedback,
        }
    }

    pub fn with_wake_window(mut self, window: Duration) -> Self {
        self.wake_window = window;
        self
    }

    pub fn with_remote(mut self, enabled: bool) -> Self {
        self.remote_enabled = enabled;
        self
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn bus(&self) -> &DispatchBus {
        &self.bus
    }

    pub fn bus_mut(&mut self) -> &mut DispatchBus {
        &mut self.bus
    }

    pub fn is_dictating(&self) -> bool {
        self.state.dictation.is_some()
    }

    /// Status text from the transcript source
    pub fn on_status(&mut self, message: &str) {
        self.feedback.update_status(message);
    }

    pub fn clear_status(&mut self) {
        self.feedback.clear_status();
    }

    pub fn on_transcript(&mut self, transcript: &Transcript) -> Outcome {
        let now = transcript.at;
        let text = transcript.text.as_str();

        if let Some(session) = self.state.dictation {
            return self.on_dictation(text, session);
        }

        let heard = self.wake.contains(text);
        if heard {
            // Refresh, never extend: the window restarts from now
            self.state.awake_until = Some(now + self.wake_window);
        }

        let awake = self.state.is_awake(now);
        if !awake && !heard {
            tracing::debug!(text, "ignored, not awake");
            self.feedback
                .update_status(&format!("Say \"{}\" first", self.wake.phrase()));
            return Outcome::Ignored;
        }

        let command = if heard { self.wake.strip(text) } else { normalize(text) };
        if command.is_empty() {
            self.feedback.update_status("Awake, listening for a command");
            return Outcome::Awake;
        }
        self.feedback.update_status(&format!("Heard \"{}\"", command));

        let mut intent = self.cascade.resolve(&command);
        if intent.is_none() && awake {
            // A bare command inside the window is read as if the wake word preceded it
            let retry = self.wake.strip(&format!("{} {}", self.wake.phrase(), text));
            if retry != command {
                intent = self.cascade.resolve(&retry);
            }
        }

        match intent {
            Some(intent) => self.dispatch(intent),
            None if awake && self.remote_enabled => {
                tracing::debug!(command, "no local match, asking remote interpreter");
                self.feedback.update_status(&format!("Thinking about \"{}\"", command));
                Outcome::Remote {
                    transcript: text.to_string(),
                }
            }
            None => self.no_match(&command),
        }
    }

    /// Result of a remote interpret call started by [`Outcome::Remote`].
    /// A late result is still dispatched even if the window has since expired.
    pub fn on_remote_result(&mut self, transcript: &str, intent: Option<Intent>) -> Outcome {
        match intent {
            Some(intent) if self.state.dictation.is_some() && !intent.is_dictation() => {
                // Spelling started while the call was in flight; the result is stale
                tracing::info!(transcript, "dropped remote {} during dictation", intent);
                Outcome::NoMatch
            }
            Some(intent) => self.dispatch(intent),
            None => self.no_match(&normalize(transcript)),
        }
    }

    fn on_dictation(&mut self, text: &str, session: DictationSession) -> Outcome {
        let Some(edit) = self.dictation.parse(text, session.field) else {
            self.feedback.update_status("Spelling: didn't catch that");
            return Outcome::NoMatch;
        };
        let intent = Action::Spell(edit).with_utterance(normalize(text));
        self.dispatch(intent)
    }

    fn dispatch(&mut self, intent: Intent) -> Outcome {
        let dictation_mode = self.state.dictation.is_some();
        if !dictation_mode {
            // Any resolved command closes the window
            self.state.awake_until = None;
        }

        if let Some(edit) = intent.spell() {
            match edit.action {
                SpellAction::Start => {
                    let field = edit.field.or(self.state.dictation.and_then(|s| s.field));
                    self.state.dictation = Some(DictationSession { field });
                }
                SpellAction::Stop => self.state.dictation = None,
                SpellAction::Append => {}
            }
        }

        let claimed = self.bus.dispatch(&intent);
        tracing::info!(claimed, utterance = %intent.utterance, "dispatched {}", intent);
        self.feedback.announce_command(&intent);
        if let Some(session) = self.state.dictation {
            let field = session.field.map_or("field", |f| f.as_str());
            self.feedback.update_status(&format!("Spelling {}", field));
        }

        let restart = !intent.is_dictation();
        Outcome::Dispatched {
            intent,
            claimed,
            restart,
        }
    }

    fn no_match(&mut self, command: &str) -> Outcome {
        tracing::debug!(command, "no match");
        self.feedback
            .update_status(&format!("No command matched \"{}\"", command));
        Outcome::NoMatch
    }
}
