//! Feedback surface - the status line the controller reports through
//!
//! The controller talks to a [`Feedback`]; the terminal implementation
//! forwards events over a channel to a [`Renderer`] that owns stdout.

use crate::intent::Intent;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{self, ClearType};
use crossterm::{cursor, queue};
use std::io::{Write, stdout};
use std::sync::{Arc, Mutex};

pub trait Feedback: Send {
    /// Show a status message. Repeating the current message is a no-op.
    fn update_status(&mut self, message: &str);

    /// Report a resolved command
    fn announce_command(&mut self, intent: &Intent);

    /// Blank the status line
    fn clear_status(&mut self);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedbackEvent {
    Status(String),
    Command { summary: String, utterance: String },
    Clear,
}

/// Tracks the visible status so repeats can be dropped
#[derive(Default)]
struct LastStatus(Option<String>);

impl LastStatus {
    /// True when `message` differs from what is showing
    fn replace(&mut self, message: &str) -> bool {
        if self.0.as_deref() == Some(message) {
            return false;
        }
        self.0 = Some(message.to_string());
        true
    }

    fn reset(&mut self) -> bool {
        self.0.take().is_some()
    }
}

/// Terminal feedback: sends events to a [`Renderer`]
pub struct StatusLine {
    tx: flume::Sender<FeedbackEvent>,
    last: LastStatus,
}

impl StatusLine {
    pub fn new() -> (Self, flume::Receiver<FeedbackEvent>) {
        let (tx, rx) = flume::unbounded();
        (
            Self {
                tx,
                last: LastStatus::default(),
            },
            rx,
        )
    }
}

impl Feedback for StatusLine {
    fn update_status(&mut self, message: &str) {
        if self.last.replace(message) {
            let _ = self.tx.send(FeedbackEvent::Status(message.to_string()));
        }
    }

    fn announce_command(&mut self, intent: &Intent) {
        self.last.reset();
        let _ = self.tx.send(FeedbackEvent::Command {
            summary: intent.to_string(),
            utterance: intent.utterance.clone(),
        });
    }

    fn clear_status(&mut self) {
        if self.last.reset() {
            let _ = self.tx.send(FeedbackEvent::Clear);
        }
    }
}

/// Draws feedback events on the terminal
pub struct Renderer {
    color: bool,
}

impl Renderer {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    pub fn handle(&mut self, event: FeedbackEvent) {
        let mut out = stdout();
        let _ = self.draw(&mut out, event);
        out.flush().ok();
    }

    fn draw(&self, out: &mut impl Write, event: FeedbackEvent) -> std::io::Result<()> {
        queue!(out, cursor::MoveToColumn(0), terminal::Clear(ClearType::CurrentLine))?;
        match event {
            FeedbackEvent::Status(message) => {
                self.colored(out, Color::DarkGrey, &message)?;
            }
            FeedbackEvent::Command { summary, utterance } => {
                let stamp = chrono::Local::now().format("%H:%M:%S");
                self.colored(out, Color::DarkGrey, &format!("{} ", stamp))?;
                self.colored(out, Color::Green, &format!("✓ {}", summary))?;
                if !utterance.is_empty() {
                    self.colored(out, Color::DarkGrey, &format!("  \"{}\"", utterance))?;
                }
                queue!(out, Print("\r\n"))?;
            }
            FeedbackEvent::Clear => {}
        }
        Ok(())
    }

    fn colored(&self, out: &mut impl Write, color: Color, text: &str) -> std::io::Result<()> {
        if self.color {
            queue!(out, SetForegroundColor(color), Print(text), ResetColor)
        } else {
            queue!(out, Print(text))
        }
    }
}

/// In-memory feedback for tests and headless runs. Clones share one log.
#[derive(Clone, Default)]
pub struct RecordingFeedback {
    events: Arc<Mutex<Vec<FeedbackEvent>>>,
    last: Arc<Mutex<LastStatus>>,
}

impl RecordingFeedback {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<FeedbackEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }

    pub fn statuses(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                FeedbackEvent::Status(s) => Some(s),
                _ => None,
            })
            .collect()
    }

    fn push(&self, event: FeedbackEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }

    fn with_last<T>(&self, f: impl FnOnce(&mut LastStatus) -> T) -> Option<T> {
        self.last.lock().ok().map(|mut last| f(&mut last))
    }
}

impl Feedback for RecordingFeedback {
    fn update_status(&mut self, message: &str) {
        if self.with_last(|last| last.replace(message)) == Some(true) {
            self.push(FeedbackEvent::Status(message.to_string()));
        }
    }

    fn announce_command(&mut self, intent: &Intent) {
        self.with_last(LastStatus::reset);
        self.push(FeedbackEvent::Command {
            summary: intent.to_string(),
            utterance: intent.utterance.clone(),
        });
    }

    fn clear_status(&mut self) {
        if self.with_last(LastStatus::reset) == Some(true) {
            self.push(FeedbackEvent::Clear);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intent::{Action, NavTarget};

    #[test]
    fn test_repeated_status_is_noop() {
        let mut feedback = RecordingFeedback::new();
        feedback.update_status("Listening");
        feedback.update_status("Listening");
        feedback.update_status("Awake");
        feedback.update_status("Listening");
        assert_eq!(feedback.statuses(), ["Listening", "Awake", "Listening"]);
    }

    #[test]
    fn test_command_resets_status() {
        let mut feedback = RecordingFeedback::new();
        feedback.update_status("Awake");
        feedback.announce_command(&Action::navigate(NavTarget::Home).with_utterance("go home"));
        feedback.update_status("Awake");
        assert_eq!(feedback.statuses(), ["Awake", "Awake"]);
    }

    #[test]
    fn test_clear_only_when_showing() {
        let mut feedback = RecordingFeedback::new();
        feedback.clear_status();
        feedback.update_status("Awake");
        feedback.clear_status();
        feedback.clear_status();
        assert_eq!(
            feedback.events(),
            [FeedbackEvent::Status("Awake".into()), FeedbackEvent::Clear]
        );
    }

    #[test]
    fn test_status_line_sends_events() {
        let (mut status, rx) = StatusLine::new();
        status.update_status("Listening");
        status.update_status("Listening");
        status.announce_command(&Action::ResetFilters.with_utterance("reset filters"));
        let events: Vec<_> = rx.try_iter().collect();
        assert_eq!(events.len(), 2);
        assert_eq!(
            events[1],
            FeedbackEvent::Command {
                summary: "reset filters".into(),
                utterance: "reset filters".into()
            }
        );
    }

    #[test]
    fn test_renderer_plain_output() {
        let renderer = Renderer::new(false);
        let mut buf = Vec::new();
        renderer
            .draw(&mut buf, FeedbackEvent::Status("Say \"hey platform\" first".into()))
            .unwrap();
        let text = String::from_utf8_lossy(&buf);
        assert!(text.contains("Say \"hey platform\" first"));
    }
}
