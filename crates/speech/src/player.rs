// ABOUTME: The player: routes clicks and completion events across all controls.
// ABOUTME: Title speech chains into content speech; any click stops everything else.

use scraper::Html;

use crate::arbiter::SpeechArbiter;
use crate::backend::{SpeechBackend, UtteranceId};
use crate::control::{Control, ControlState, TextSource};
use crate::source::DocumentRegion;

/// Owns every control on the page plus the shared arbiter, and drives the
/// whole state machine from two inputs: a click on a control, and the
/// completion of an utterance.
pub struct Player<'doc> {
    arbiter: SpeechArbiter,
    controls: Vec<Control<'doc>>,
}

impl<'doc> Player<'doc> {
    pub fn new(backend: Box<dyn SpeechBackend>) -> Self {
        Self {
            arbiter: SpeechArbiter::new(backend),
            controls: Vec::new(),
        }
    }

    /// Build a player with one control per scanned region.
    pub fn from_scan(
        doc: &'doc Html,
        result: &readaloud_scan::ScanResult,
        backend: Box<dyn SpeechBackend>,
    ) -> Self {
        let mut player = Self::new(backend);
        for region in result.regions() {
            player.add_control(region.claim(), Box::new(DocumentRegion::new(doc, *region)));
        }
        player
    }

    pub fn add_control(&mut self, claim: u32, source: Box<dyn TextSource + 'doc>) {
        self.controls.push(Control::new(claim, source));
    }

    pub fn controls(&self) -> &[Control<'doc>] {
        &self.controls
    }

    pub fn state(&self, claim: u32) -> Option<ControlState> {
        self.find(claim).map(Control::state)
    }

    /// The utterance the player is currently waiting on, if any.
    pub fn active_utterance(&self) -> Option<UtteranceId> {
        self.arbiter.active()
    }

    /// Handle a click on the control for `claim`.
    ///
    /// Every other speaking control flips to idle first (its utterance is
    /// cancelled); a click on a speaking control is a stop; a click on an
    /// idle control starts the title phase. Unknown claims do nothing.
    pub fn click(&mut self, claim: u32) {
        self.stop_others(claim);

        let Some(index) = self.index_of(claim) else {
            return;
        };

        if self.controls[index].is_speaking() {
            self.arbiter.cancel_all();
            self.controls[index].reset();
            return;
        }

        let title = self.controls[index].source().title_text();
        if title.trim().is_empty() {
            // nothing to announce; fall through to the content phase
            self.start_content(index);
            return;
        }

        log::debug!("speak title: {}", title);
        let id = self.arbiter.request_speak(&title);
        self.controls[index].set_speaking(ControlState::SpeakingTitle, id);
    }

    /// Handle a completion event for `id`.
    ///
    /// A finished title chains into the content phase; finished content
    /// returns the control to idle. Stale ids are ignored, which is what
    /// makes cancellation safe: a cancelled utterance's completion never
    /// arrives, and a superseded one no longer matches.
    pub fn utterance_finished(&mut self, id: UtteranceId) {
        if !self.arbiter.finish(id) {
            return;
        }
        let Some(index) = self
            .controls
            .iter()
            .position(|c| c.utterance() == Some(id))
        else {
            return;
        };

        match self.controls[index].state() {
            ControlState::SpeakingTitle => self.start_content(index),
            ControlState::SpeakingContent => self.controls[index].reset(),
            ControlState::Idle => {}
        }
    }

    /// Page-unload semantics: cancel all speech and idle every control.
    pub fn shutdown(&mut self) {
        self.arbiter.cancel_all();
        for control in &mut self.controls {
            control.reset();
        }
    }

    fn start_content(&mut self, index: usize) {
        let content = self.controls[index].source().content_text();
        match content {
            Some(text) if !text.trim().is_empty() => {
                log::debug!("speak content: {}", text);
                let id = self.arbiter.request_speak(&text);
                self.controls[index].set_speaking(ControlState::SpeakingContent, id);
            }
            _ => self.controls[index].reset(),
        }
    }

    fn stop_others(&mut self, claim: u32) {
        let mut cancelled = false;
        for control in &mut self.controls {
            if control.claim() != claim && control.is_speaking() {
                control.reset();
                cancelled = true;
            }
        }
        if cancelled {
            self.arbiter.cancel_all();
        }
    }

    fn find(&self, claim: u32) -> Option<&Control<'doc>> {
        self.controls.iter().find(|c| c.claim() == claim)
    }

    fn index_of(&self, claim: u32) -> Option<usize> {
        self.controls.iter().position(|c| c.claim() == claim)
    }
}
