//! Scripted capabilities for session tests.
//!
//! Analysis results are queued up front. Image and speech requests block on a
//! oneshot gate the test holds, so completion order is under test control.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use civic_core::entities::{PolicyAnalysis, Stakeholder};
use civic_core::ids::new_analysis_id;
use civic_core::media::{AudioBuffer, GeneratedImage};
use civic_core::request::AnalysisRequest;
use civic_core::testing::sample_analysis;
use civic_gemini::{AnalysisError, AnalysisService};
use civic_session::{AudioSink, SessionError};
use tokio::sync::oneshot;

/// An analysis with a fresh id and a prompt derived from its title.
pub fn analysis(title: &str) -> PolicyAnalysis {
    let mut analysis = sample_analysis(&new_analysis_id(), title);
    analysis.visualization_prompt = format!("prompt for {title}");
    analysis
}

pub fn image(tag: &str) -> GeneratedImage {
    GeneratedImage {
        mime_type: "image/png".into(),
        data: tag.into(),
    }
}

pub fn audio(samples: usize) -> AudioBuffer {
    AudioBuffer {
        sample_rate: 24_000,
        channels: 1,
        samples: vec![0; samples],
    }
}

/// Let spawned tasks on the current-thread runtime run to their next await.
pub async fn settle() {
    for _ in 0..16 {
        tokio::task::yield_now().await;
    }
}

#[derive(Default)]
pub struct ScriptedService {
    analyses: Mutex<VecDeque<Result<PolicyAnalysis, AnalysisError>>>,
    analysis_gate: Mutex<Option<oneshot::Receiver<()>>>,
    images: Mutex<HashMap<String, oneshot::Receiver<Option<GeneratedImage>>>>,
    speech: Mutex<HashMap<String, oneshot::Receiver<Option<AudioBuffer>>>>,
    pub analyze_calls: AtomicUsize,
    pub image_calls: AtomicUsize,
}

impl ScriptedService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, result: Result<PolicyAnalysis, AnalysisError>) {
        self.analyses.lock().unwrap().push_back(result);
    }

    /// Hold the next `analyze` call until the returned sender fires.
    pub fn gate_analysis(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        *self.analysis_gate.lock().unwrap() = Some(rx);
        tx
    }

    /// Hold the image request for `prompt` until the returned sender fires.
    pub fn gate_image(&self, prompt: &str) -> oneshot::Sender<Option<GeneratedImage>> {
        let (tx, rx) = oneshot::channel();
        self.images.lock().unwrap().insert(prompt.to_string(), rx);
        tx
    }

    /// Hold speech for `key` (stakeholder group or narration text).
    pub fn gate_speech(&self, key: &str) -> oneshot::Sender<Option<AudioBuffer>> {
        let (tx, rx) = oneshot::channel();
        self.speech.lock().unwrap().insert(key.to_string(), rx);
        tx
    }

    async fn speech_for(&self, key: &str) -> Option<AudioBuffer> {
        let gate = self.speech.lock().unwrap().remove(key);
        match gate {
            Some(rx) => rx.await.ok().flatten(),
            None => None,
        }
    }

    pub fn analyze_calls(&self) -> usize {
        self.analyze_calls.load(Ordering::SeqCst)
    }

    pub fn image_calls(&self) -> usize {
        self.image_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AnalysisService for ScriptedService {
    async fn analyze(&self, _request: &AnalysisRequest) -> Result<PolicyAnalysis, AnalysisError> {
        self.analyze_calls.fetch_add(1, Ordering::SeqCst);
        let gate = self.analysis_gate.lock().unwrap().take();
        if let Some(rx) = gate {
            let _ = rx.await;
        }
        self.analyses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(AnalysisError::Upstream("no scripted result".into())))
    }

    async fn generate_image(&self, prompt: &str) -> Option<GeneratedImage> {
        self.image_calls.fetch_add(1, Ordering::SeqCst);
        let gate = self.images.lock().unwrap().remove(prompt);
        match gate {
            Some(rx) => rx.await.ok().flatten(),
            None => None,
        }
    }

    async fn generate_speech(&self, text: &str) -> Option<AudioBuffer> {
        self.speech_for(text).await
    }

    async fn generate_stakeholder_speech(&self, stakeholder: &Stakeholder) -> Option<AudioBuffer> {
        self.speech_for(&stakeholder.group).await
    }
}

/// Records what the player asks of the audio output.
#[derive(Default)]
pub struct RecordingSink {
    active: AtomicBool,
    pub started: Mutex<Vec<usize>>,
    pub overlaps: AtomicUsize,
    pub stops: AtomicUsize,
}

impl RecordingSink {
    pub fn started(&self) -> Vec<usize> {
        self.started.lock().unwrap().clone()
    }

    pub fn overlaps(&self) -> usize {
        self.overlaps.load(Ordering::SeqCst)
    }

    pub fn stops(&self) -> usize {
        self.stops.load(Ordering::SeqCst)
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }
}

impl AudioSink for RecordingSink {
    fn start(&self, audio: &AudioBuffer) -> Result<(), SessionError> {
        if self.active.swap(true, Ordering::SeqCst) {
            self.overlaps.fetch_add(1, Ordering::SeqCst);
        }
        self.started.lock().unwrap().push(audio.samples.len());
        Ok(())
    }

    fn stop(&self) {
        self.active.store(false, Ordering::SeqCst);
        self.stops.fetch_add(1, Ordering::SeqCst);
    }
}
