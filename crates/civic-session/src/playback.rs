//! Exclusive speech playback for one view.
//!
//! ```text
//! idle → loading → playing → idle
//!          ↑  play / stop  ↓
//! ```
//!
//! Every `play` and `stop` bumps a generation counter. A speech request that
//! completes after its generation was superseded is discarded without
//! touching the sink, so at most one buffer is ever audible.

use std::sync::Arc;

use civic_core::entities::Stakeholder;
use civic_core::media::AudioBuffer;
use civic_gemini::AnalysisService;
use tokio::sync::Mutex;

use crate::error::SessionError;

/// Audio output.
///
/// `start` begins playing and returns without waiting for the end. The
/// player never calls `start` while a previous buffer may still be audible
/// without calling `stop` first.
pub trait AudioSink: Send + Sync {
    /// Begin output of `audio`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Sink`] if the buffer cannot be played.
    fn start(&self, audio: &AudioBuffer) -> Result<(), SessionError>;

    /// Halt output. Must be idempotent.
    fn stop(&self);
}

/// What a playback is reading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpeechTarget {
    /// Report text in the narration voice.
    Narration,
    /// A stakeholder's concern, by group name.
    Stakeholder(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PlaybackState {
    #[default]
    Idle,
    Loading(SpeechTarget),
    Playing(SpeechTarget),
}

impl PlaybackState {
    /// The target that is loading or playing.
    #[must_use]
    pub const fn target(&self) -> Option<&SpeechTarget> {
        match self {
            Self::Idle => None,
            Self::Loading(target) | Self::Playing(target) => Some(target),
        }
    }
}

/// A claim on the playback slot, issued by [`SpeechPlayer::begin`].
#[derive(Debug)]
#[must_use = "a ticket does nothing until it is loaded"]
pub struct SpeechTicket {
    generation: u64,
}

#[derive(Debug, Default)]
struct Slot {
    generation: u64,
    state: PlaybackState,
}

/// One playback surface: at most one request loading or playing at a time.
pub struct SpeechPlayer<S: AnalysisService + ?Sized, K: AudioSink + ?Sized> {
    service: Arc<S>,
    sink: Arc<K>,
    slot: Arc<Mutex<Slot>>,
}

impl<S: AnalysisService + ?Sized, K: AudioSink + ?Sized> Clone for SpeechPlayer<S, K> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            sink: Arc::clone(&self.sink),
            slot: Arc::clone(&self.slot),
        }
    }
}

impl<S, K> SpeechPlayer<S, K>
where
    S: AnalysisService + ?Sized + 'static,
    K: AudioSink + ?Sized + 'static,
{
    #[must_use]
    pub fn new(service: Arc<S>, sink: Arc<K>) -> Self {
        Self {
            service,
            sink,
            slot: Arc::new(Mutex::new(Slot::default())),
        }
    }

    pub async fn state(&self) -> PlaybackState {
        self.slot.lock().await.state.clone()
    }

    /// Role-play a stakeholder's concern.
    ///
    /// Returns `Ok(true)` if this request ended up playing, `Ok(false)` if it
    /// produced no audio or was superseded while loading.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Sink`] if the sink rejects the buffer.
    pub async fn play_stakeholder(&self, stakeholder: &Stakeholder) -> Result<bool, SessionError> {
        let ticket = self
            .begin(SpeechTarget::Stakeholder(stakeholder.group.clone()))
            .await;
        self.load_stakeholder(ticket, stakeholder).await
    }

    /// Read `text` aloud in the narration voice.
    ///
    /// # Errors
    ///
    /// See [`Self::play_stakeholder`].
    pub async fn narrate(&self, text: &str) -> Result<bool, SessionError> {
        let ticket = self.begin(SpeechTarget::Narration).await;
        self.load_narration(ticket, text).await
    }

    /// Supersede whatever is active and enter `Loading` for `target`.
    ///
    /// Tickets are ordered by the call to `begin`, not by when their audio
    /// arrives: only the most recent ticket can ever reach `Playing`. Callers
    /// that load in a background task take the ticket before spawning.
    pub async fn begin(&self, target: SpeechTarget) -> SpeechTicket {
        let mut slot = self.slot.lock().await;
        if matches!(slot.state, PlaybackState::Playing(_)) {
            self.sink.stop();
        }
        slot.generation += 1;
        tracing::debug!(?target, generation = slot.generation, "speech loading");
        slot.state = PlaybackState::Loading(target);
        SpeechTicket {
            generation: slot.generation,
        }
    }

    /// Fetch a stakeholder's speech for `ticket` and play it if the ticket is
    /// still the latest.
    ///
    /// # Errors
    ///
    /// See [`Self::play_stakeholder`].
    pub async fn load_stakeholder(
        &self,
        ticket: SpeechTicket,
        stakeholder: &Stakeholder,
    ) -> Result<bool, SessionError> {
        let audio = self.service.generate_stakeholder_speech(stakeholder).await;
        self.finish(ticket.generation, audio).await
    }

    /// Fetch narration of `text` for `ticket`.
    ///
    /// # Errors
    ///
    /// See [`Self::play_stakeholder`].
    pub async fn load_narration(&self, ticket: SpeechTicket, text: &str) -> Result<bool, SessionError> {
        let audio = self.service.generate_speech(text).await;
        self.finish(ticket.generation, audio).await
    }

    /// Stop any loading or playing request. Safe to call in any state.
    pub async fn stop(&self) {
        let mut slot = self.slot.lock().await;
        slot.generation += 1;
        if matches!(slot.state, PlaybackState::Playing(_)) {
            self.sink.stop();
        }
        slot.state = PlaybackState::Idle;
    }

    async fn finish(&self, ticket: u64, audio: Option<AudioBuffer>) -> Result<bool, SessionError> {
        let mut slot = self.slot.lock().await;
        if slot.generation != ticket {
            tracing::debug!(ticket, current = slot.generation, "discarding superseded speech");
            return Ok(false);
        }
        let PlaybackState::Loading(target) = slot.state.clone() else {
            return Ok(false);
        };
        let Some(audio) = audio else {
            slot.state = PlaybackState::Idle;
            return Ok(false);
        };

        if let Err(e) = self.sink.start(&audio) {
            slot.state = PlaybackState::Idle;
            return Err(e);
        }
        slot.state = PlaybackState::Playing(target);
        drop(slot);

        self.schedule_end(ticket, audio.duration());
        Ok(true)
    }

    /// Return to `Idle` once the buffer has played out, unless superseded.
    fn schedule_end(&self, ticket: u64, duration: std::time::Duration) {
        let slot = Arc::clone(&self.slot);
        tokio::spawn(async move {
            tokio::time::sleep(duration).await;
            let mut slot = slot.lock().await;
            if slot.generation == ticket && matches!(slot.state, PlaybackState::Playing(_)) {
                slot.state = PlaybackState::Idle;
            }
        });
    }
}
