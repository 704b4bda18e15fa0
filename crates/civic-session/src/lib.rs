//! # civic-session
//!
//! One Civic Architect session: the analysis state machine, the result store
//! it alone writes, and exclusive speech playback.
//!
//! - [`AnalysisOrchestrator`] drives `Idle → Analyzing → Results | Error`
//!   plus `About`, and launches the best-effort image request.
//! - [`ResultStore`] holds history (most recent first), the current result,
//!   and the current image.
//! - [`SpeechPlayer`] keeps at most one speech request loading or playing.
//!
//! Late background results are discarded by identity check, not by
//! cancelling the network call.

mod error;
mod form;
mod orchestrator;
mod playback;
mod store;

pub use error::SessionError;
pub use form::InputForm;
pub use orchestrator::{AnalysisOrchestrator, SessionView};
pub use playback::{AudioSink, PlaybackState, SpeechPlayer, SpeechTarget, SpeechTicket};
pub use store::ResultStore;
