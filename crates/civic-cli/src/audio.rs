//! File-backed audio output for terminals without a sound device.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use civic_core::media::AudioBuffer;
use civic_session::{AudioSink, SessionError};

/// Writes every started buffer to a numbered WAV file in `dir`.
///
/// "Playing" lasts from `start` until `stop` or the buffer's duration, as
/// tracked by the speech player; the file itself is left on disk.
#[derive(Debug)]
pub struct WavFileSink {
    dir: PathBuf,
    state: Mutex<SinkState>,
}

#[derive(Debug, Default)]
struct SinkState {
    written: u32,
    active: Option<PathBuf>,
    last: Option<PathBuf>,
}

impl WavFileSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            state: Mutex::new(SinkState::default()),
        }
    }

    /// Path of the most recently written file.
    pub fn last_written(&self) -> Option<PathBuf> {
        self.state.lock().ok().and_then(|state| state.last.clone())
    }
}

impl AudioSink for WavFileSink {
    fn start(&self, audio: &AudioBuffer) -> Result<(), SessionError> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| SessionError::Sink("audio sink state poisoned".to_string()))?;
        state.written += 1;
        let path = self.dir.join(format!("speech-{:03}.wav", state.written));
        write_wav(audio, &path)?;

        tracing::info!(
            path = %path.display(),
            seconds = audio.duration().as_secs_f32(),
            "speech written"
        );
        state.active = Some(path.clone());
        state.last = Some(path);
        Ok(())
    }

    fn stop(&self) {
        if let Ok(mut state) = self.state.lock() {
            if let Some(path) = state.active.take() {
                tracing::debug!(path = %path.display(), "speech stopped");
            }
        }
    }
}

/// Encode `audio` as a WAV file at `path`.
pub fn write_wav(audio: &AudioBuffer, path: &Path) -> Result<(), SessionError> {
    std::fs::write(path, audio.to_wav())
        .map_err(|e| SessionError::Sink(format!("failed to write {}: {e}", path.display())))
}
