// ABOUTME: Global speech arbiter: at most one in-flight utterance across all controls.
// ABOUTME: Requesting speech cancels whatever else is playing; no queueing, no timeouts.

use crate::backend::{SpeechBackend, UtteranceId};

/// Wraps a backend and enforces the single-channel invariant: issuing a
/// new request first cancels any in-flight utterance, so two utterances
/// never overlap no matter how many controls share the arbiter.
pub struct SpeechArbiter {
    backend: Box<dyn SpeechBackend>,
    active: Option<UtteranceId>,
}

impl SpeechArbiter {
    pub fn new(backend: Box<dyn SpeechBackend>) -> Self {
        Self {
            backend,
            active: None,
        }
    }

    /// Request speech for `text`, cancelling any other in-flight
    /// utterance first. Returns the handle whose completion the caller
    /// should wait for.
    pub fn request_speak(&mut self, text: &str) -> UtteranceId {
        if self.active.is_some() {
            self.backend.cancel_all();
        }
        let id = self.backend.speak(text);
        self.active = Some(id);
        id
    }

    /// Cancel everything, immediately and unconditionally.
    pub fn cancel_all(&mut self) {
        self.backend.cancel_all();
        self.active = None;
    }

    /// The utterance still awaiting completion, if any.
    pub fn active(&self) -> Option<UtteranceId> {
        self.active
    }

    /// Record a completion event. Returns true when `id` was the active
    /// utterance; stale ids (already cancelled or superseded) return
    /// false and change nothing.
    pub fn finish(&mut self, id: UtteranceId) -> bool {
        if self.active == Some(id) {
            self.active = None;
            true
        } else {
            false
        }
    }
}
