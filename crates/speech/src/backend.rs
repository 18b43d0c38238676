// ABOUTME: The speech backend seam: opaque effectful synthesis service.
// ABOUTME: Backends hand out utterance handles; completion arrives as an external event.

/// Opaque handle for one requested utterance. Completion is reported back
/// to the player by the host environment with this id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UtteranceId(pub u64);

/// The synthesis collaborator. Implementations are free to do anything
/// from driving a real TTS engine to printing lines; the player only
/// relies on the two calls below.
///
/// `speak` must return immediately with a fresh handle. `cancel_all`
/// stops every queued and active utterance system-wide, unconditionally;
/// cancelled utterances never complete.
pub trait SpeechBackend {
    fn speak(&mut self, text: &str) -> UtteranceId;
    fn cancel_all(&mut self);
}

/// Backend for hosts without speech synthesis: handles are issued so the
/// rest of the machinery (extraction included) still runs, but nothing
/// ever completes and no audio is produced.
#[derive(Debug, Default)]
pub struct NullBackend {
    next: u64,
}

impl NullBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SpeechBackend for NullBackend {
    fn speak(&mut self, _text: &str) -> UtteranceId {
        self.next += 1;
        UtteranceId(self.next)
    }

    fn cancel_all(&mut self) {}
}
