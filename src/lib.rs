//! Hands-free voice control for the game catalog
//!
//! Transcripts flow from a [`transcript::TranscriptSource`] into the
//! [`controller::Controller`], which gates them on the wake word, resolves
//! them through the [`matcher::Cascade`] (or the dictation engine while
//! spelling), optionally asks the [`remote::RemoteInterpreter`], and hands
//! the resulting [`intent::Intent`] to the [`dispatch::DispatchBus`].

pub mod config;
pub mod controller;
pub mod dictation;
pub mod dispatch;
pub mod error;
pub mod fuzzy;
pub mod heuristic;
pub mod intent;
pub mod matcher;
pub mod pages;
pub mod registry;
pub mod remote;
pub mod render;
pub mod server;
pub mod session;
pub mod shell;
pub mod transcript;
pub mod wake;

pub use controller::{Controller, Outcome};
pub use intent::{Action, Intent};
pub use matcher::Cascade;
