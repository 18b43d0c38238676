// ABOUTME: Main library entry point for the readaloud speech layer.
// ABOUTME: Re-exports the public API: Player, Control, SpeechArbiter, SpeechBackend.

//! readaloud-speech - play/stop controls over scanned document regions.
//!
//! The player binds one control to each claimed region and drives a small
//! state machine per control: a click speaks the region's title, the
//! title's completion chains into the content, and the content's
//! completion returns to idle. A shared arbiter guarantees that at most
//! one utterance is in flight across the whole page; any new request or
//! stop cancels whatever else was playing.
//!
//! Synthesis itself sits behind the [`SpeechBackend`] trait. The host
//! environment reports utterance completion by calling
//! [`Player::utterance_finished`]; that single event type is the only
//! thing that advances a control past the title phase.

pub mod arbiter;
pub mod backend;
pub mod control;
pub mod player;
pub mod source;

pub use crate::arbiter::SpeechArbiter;
pub use crate::backend::{NullBackend, SpeechBackend, UtteranceId};
pub use crate::control::{Control, ControlState, StaticSource, TextSource};
pub use crate::player::Player;
pub use crate::source::DocumentRegion;
