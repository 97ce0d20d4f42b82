//! Transcript source - wraps a blocking recognizer in a background thread
//!
//! Final transcripts and coarse status messages flow out over a channel.
//! Transient recognizer errors are retried after a short delay; fatal ones
//! end the source. While stopped, transcripts are read and discarded so a
//! restart never delivers text that was buffered during the pause.

use crate::error::SourceError;
use std::io::BufRead;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// One finalized utterance and when it arrived
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript {
    pub text: String,
    pub at: Instant,
}

impl Transcript {
    pub fn new(text: impl Into<String>) -> Self {
        Self::at(text, Instant::now())
    }

    pub fn at(text: impl Into<String>, at: Instant) -> Self {
        Self {
            text: text.into(),
            at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceEvent {
    Transcript(Transcript),
    Status(String),
}

/// A speech recognizer that yields finalized text
pub trait Recognizer: Send + 'static {
    /// Block for the next transcript. `Ok(None)` means the input has ended.
    fn next_transcript(&mut self) -> Result<Option<String>, SourceError>;
}

/// Reads one transcript per line, e.g. from stdin or an external recognizer's pipe
pub struct LineRecognizer<R> {
    reader: R,
}

impl<R: BufRead> LineRecognizer<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead + Send + 'static> Recognizer for LineRecognizer<R> {
    fn next_transcript(&mut self) -> Result<Option<String>, SourceError> {
        let mut line = String::new();
        loop {
            line.clear();
            match self.reader.read_line(&mut line) {
                Ok(0) => return Ok(None),
                Ok(_) => {
                    let text = line.trim();
                    if !text.is_empty() {
                        return Ok(Some(text.to_string()));
                    }
                }
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => {
                    return Err(SourceError::Transient(e.to_string()));
                }
                Err(e) => return Err(SourceError::Fatal(e.to_string())),
            }
        }
    }
}

/// Handle to the recognizer thread
pub struct TranscriptSource {
    listening: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl TranscriptSource {
    /// Start `recognizer` on its own thread, listening immediately
    pub fn spawn(
        mut recognizer: impl Recognizer,
        retry_delay: Duration,
    ) -> (Self, flume::Receiver<SourceEvent>) {
        let (tx, rx) = flume::unbounded();
        let listening = Arc::new(AtomicBool::new(true));
        let flag = Arc::clone(&listening);

        let handle = thread::spawn(move || {
            let _ = tx.send(SourceEvent::Status("Listening".into()));
            loop {
                let event = match recognizer.next_transcript() {
                    Ok(Some(text)) => {
                        if !flag.load(Ordering::SeqCst) {
                            tracing::debug!(text, "discarded transcript while stopped");
                            continue;
                        }
                        SourceEvent::Transcript(Transcript::new(text))
                    }
                    Ok(None) => {
                        let _ = tx.send(SourceEvent::Status("Input closed".into()));
                        break;
                    }
                    Err(SourceError::Transient(reason)) => {
                        tracing::warn!("recognizer interrupted: {}, restarting", reason);
                        let _ = tx.send(SourceEvent::Status("Reconnecting microphone".into()));
                        thread::sleep(retry_delay);
                        SourceEvent::Status("Listening".into())
                    }
                    Err(SourceError::Fatal(reason)) => {
                        tracing::error!("recognizer stopped: {}", reason);
                        let _ = tx.send(SourceEvent::Status(format!("Voice input unavailable: {}", reason)));
                        break;
                    }
                };
                if tx.send(event).is_err() {
                    break;
                }
            }
        });

        (
            Self {
                listening,
                handle: Some(handle),
            },
            rx,
        )
    }

    /// Pause delivery; anything recognized until [`start`](Self::start) is dropped
    pub fn stop(&self) {
        self.listening.store(false, Ordering::SeqCst);
    }

    pub fn start(&self) {
        self.listening.store(true, Ordering::SeqCst);
    }

    pub fn is_listening(&self) -> bool {
        self.listening.load(Ordering::SeqCst)
    }

    /// Whether the recognizer thread has exited
    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().is_none_or(JoinHandle::is_finished)
    }
}
