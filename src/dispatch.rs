//! Dispatch bus - one cancelable broadcast per resolved intent
//!
//! Every subscriber sees every intent, in subscription order. Any subscriber
//! may claim the event; a claimed event skips the shell's built-in default.

use crate::intent::Intent;
use crate::shell::AppShell;
use std::sync::{Arc, Mutex};

/// The broadcast payload handed to each subscriber
pub struct VoiceEvent<'a> {
    intent: &'a Intent,
    claimed: bool,
}

impl<'a> VoiceEvent<'a> {
    pub fn intent(&self) -> &'a Intent {
        self.intent
    }

    /// Claim the intent so the default handling is skipped
    pub fn prevent_default(&mut self) {
        self.claimed = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.claimed
    }
}

pub trait Subscriber: Send {
    fn on_intent(&mut self, event: &mut VoiceEvent<'_>);
}

/// Shared page controllers stay inspectable by their owner after subscribing
impl<T: Subscriber> Subscriber for Arc<Mutex<T>> {
    fn on_intent(&mut self, event: &mut VoiceEvent<'_>) {
        if let Ok(mut inner) = self.lock() {
            inner.on_intent(event);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionId(u64);

pub struct DispatchBus {
    subscribers: Vec<(SubscriptionId, Box<dyn Subscriber>)>,
    next_id: u64,
    shell: AppShell,
}

impl Default for DispatchBus {
    fn default() -> Self {
        Self::new(AppShell::default())
    }
}

impl DispatchBus {
    pub fn new(shell: AppShell) -> Self {
        Self {
            subscribers: Vec::new(),
            next_id: 0,
            shell,
        }
    }

    pub fn subscribe(&mut self, subscriber: impl Subscriber + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(subscriber)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    pub fn shell(&self) -> &AppShell {
        &self.shell
    }

    /// Broadcast `intent`; returns whether any subscriber claimed it
    pub fn dispatch(&mut self, intent: &Intent) -> bool {
        let mut event = VoiceEvent {
            intent,
            claimed: false,
        };
        for (_, subscriber) in &mut self.subscribers {
            subscriber.on_intent(&mut event);
        }

        let claimed = event.default_prevented();
        if !claimed {
            let handled = self.shell.apply_default(&intent.action);
            tracing::debug!(handled, "unclaimed {}", intent);
        }
        claimed
    }
}
