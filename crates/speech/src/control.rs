// ABOUTME: Per-region play control: the Idle / SpeakingTitle / SpeakingContent machine.
// ABOUTME: Text is pulled from a TextSource at speak time, never stored ahead.

use crate::backend::UtteranceId;

/// Supplies the spoken text for one region on demand, so extraction
/// happens when the user asks for speech, not when the page is scanned.
pub trait TextSource {
    fn title_text(&self) -> String;
    fn content_text(&self) -> Option<String>;
}

/// Visible state of one control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ControlState {
    #[default]
    Idle,
    SpeakingTitle,
    SpeakingContent,
}

/// One play/stop control bound to a claimed region.
pub struct Control<'doc> {
    claim: u32,
    source: Box<dyn TextSource + 'doc>,
    state: ControlState,
    utterance: Option<UtteranceId>,
}

impl<'doc> Control<'doc> {
    pub fn new(claim: u32, source: Box<dyn TextSource + 'doc>) -> Self {
        Self {
            claim,
            source,
            state: ControlState::Idle,
            utterance: None,
        }
    }

    pub fn claim(&self) -> u32 {
        self.claim
    }

    pub fn state(&self) -> ControlState {
        self.state
    }

    pub fn is_speaking(&self) -> bool {
        self.state != ControlState::Idle
    }

    pub(crate) fn source(&self) -> &dyn TextSource {
        self.source.as_ref()
    }

    pub(crate) fn utterance(&self) -> Option<UtteranceId> {
        self.utterance
    }

    pub(crate) fn set_speaking(&mut self, state: ControlState, utterance: UtteranceId) {
        self.state = state;
        self.utterance = Some(utterance);
    }

    pub(crate) fn reset(&mut self) {
        self.state = ControlState::Idle;
        self.utterance = None;
    }
}

/// A fixed source for controls that do not read out of a document.
#[derive(Debug, Clone)]
pub struct StaticSource {
    pub title: String,
    pub content: Option<String>,
}

impl TextSource for StaticSource {
    fn title_text(&self) -> String {
        self.title.clone()
    }

    fn content_text(&self) -> Option<String> {
        self.content.clone()
    }
}
