//! Error types for the voice pipeline
//!
//! Per-transcript processing never fails: only load-time table defects and
//! transcript-source faults surface as errors. Remote fallback errors are
//! logged and swallowed by the client.

/// A defect in a static lookup or matcher table. Fatal at load time.
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("registered command #{index} has no utterances")]
    EmptyEntry { index: usize },

    #[error("registered command #{index} has a blank utterance")]
    BlankUtterance { index: usize },

    #[error("utterance \"{utterance}\" is registered by commands #{first} and #{second}")]
    DuplicateUtterance {
        utterance: String,
        first: usize,
        second: usize,
    },

    #[error("matcher {family}/{rule} has an invalid pattern: {source}")]
    Pattern {
        family: &'static str,
        rule: &'static str,
        #[source]
        source: regex::Error,
    },
}

/// Remote fallback failure. Callers treat every variant as "no match".
#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    #[error("interpreter timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("interpreter request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("interpreter returned HTTP {status}")]
    Status { status: u16 },

    #[error("interpreter returned a malformed payload: {0}")]
    Payload(#[source] reqwest::Error),
}

/// Failure reported by the speech recognizer behind the transcript source
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// Worth restarting the recognizer for (network blip, no-speech timeout)
    #[error("recognizer interrupted: {0}")]
    Transient(String),

    /// Recognizer cannot continue (permission denied, input closed)
    #[error("recognizer unavailable: {0}")]
    Fatal(String),
}
