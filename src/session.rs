//! Voice session runner - drives the controller from the transcript source
//!
//! Single task, strictly in arrival order. The only concurrent work is the
//! remote interpret call, which runs on its own task and reports back over a
//! channel, plus two timers: the post-command recognizer restart and the
//! status auto-clear.

use crate::controller::{Controller, Outcome};
use crate::intent::Intent;
use crate::remote::RemoteInterpreter;
use crate::transcript::{SourceEvent, TranscriptSource};
use std::time::Duration;
use tokio::time::Instant;

/// Pause/resume control over whatever produces transcripts
pub trait SourceControl {
    fn stop(&self);
    fn start(&self);
}

impl SourceControl for TranscriptSource {
    fn stop(&self) {
        TranscriptSource::stop(self);
    }

    fn start(&self) {
        TranscriptSource::start(self);
    }
}

pub struct VoiceSession {
    controller: Controller,
    remote: Option<RemoteInterpreter>,
    restart_delay: Duration,
    status_clear: Duration,
}

impl VoiceSession {
    pub fn new(controller: Controller, remote: Option<RemoteInterpreter>) -> Self {
        Self {
            controller,
            remote,
            restart_delay: Duration::from_millis(250),
            status_clear: Duration::from_millis(4000),
        }
    }

    pub fn with_timing(mut self, restart_delay: Duration, status_clear: Duration) -> Self {
        self.restart_delay = restart_delay;
        self.status_clear = status_clear;
        self
    }

    /// Run until `shutdown` fires, or the source closes and no remote call is
    /// still in flight. Hands the controller back for inspection.
    pub async fn run(
        mut self,
        source: &dyn SourceControl,
        events: flume::Receiver<SourceEvent>,
        shutdown: flume::Receiver<()>,
    ) -> Controller {
        let (remote_tx, remote_rx) = flume::unbounded::<(String, Option<Intent>)>();
        let mut in_flight = 0usize;
        let mut source_closed = false;
        let mut restart_deadline: Option<Instant> = None;
        let mut clear_deadline: Option<Instant> = None;

        loop {
            if source_closed && in_flight == 0 {
                break;
            }

            let restart_fut = async move {
                match restart_deadline {
                    Some(deadline) => tokio::time::sleep_until(deadline).await,
                    None => std::future::pending::<()>().await,
                }
            };
            let clear_fut = async move {
                match clear_deadline {
                    Some(deadline) => tokio::time::sleep_until(deadline).await,
                    None => std::future::pending::<()>().await,
                }
            };

            let outcome = tokio::select! {
                biased;

                Ok(()) = shutdown.recv_async() => break,

                Ok((transcript, intent)) = remote_rx.recv_async() => {
                    in_flight -= 1;
                    self.controller.on_remote_result(&transcript, intent)
                }

                event = events.recv_async(), if !source_closed => match event {
                    Ok(SourceEvent::Transcript(t)) => self.controller.on_transcript(&t),
                    Ok(SourceEvent::Status(message)) => {
                        self.controller.on_status(&message);
                        continue;
                    }
                    Err(_) => {
                        source_closed = true;
                        continue;
                    }
                },

                _ = restart_fut, if restart_deadline.is_some() => {
                    restart_deadline = None;
                    source.start();
                    continue;
                }

                _ = clear_fut, if clear_deadline.is_some() => {
                    clear_deadline = None;
                    self.controller.clear_status();
                    continue;
                }
            };

            match outcome {
                Outcome::Dispatched { restart, .. } => {
                    let now = Instant::now();
                    if restart {
                        // Stop then start so the next utterance gets a fresh buffer
                        source.stop();
                        restart_deadline = Some(now + self.restart_delay);
                    }
                    clear_deadline = Some(now + self.status_clear);
                }
                Outcome::Remote { transcript } => match self.remote.clone() {
                    Some(remote) => {
                        in_flight += 1;
                        let tx = remote_tx.clone();
                        tokio::spawn(async move {
                            let intent = remote.interpret(&transcript).await;
                            let _ = tx.send((transcript, intent));
                        });
                    }
                    None => {
                        self.controller.on_remote_result(&transcript, None);
                        clear_deadline = Some(Instant::now() + self.status_clear);
                    }
                },
                Outcome::Ignored | Outcome::NoMatch => {
                    clear_deadline = Some(Instant::now() + self.status_clear);
                }
                Outcome::Awake => {}
            }
        }

        if restart_deadline.is_some() {
            source.start();
        }
        self.controller
    }
}
