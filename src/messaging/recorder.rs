//! Voice-note recorder.
//!
//! DESIGN
//! ======
//! Capture hardware sits behind [`AudioCapture`] so the recorder's state
//! machine can run against a mock or a file. While recording, a 1 s
//! [`RepeatingTask`] bumps `recording_secs`; stopping or cancelling tears
//! the ticker down before the capture is closed.
//!
//! ERROR HANDLING
//! ==============
//! A capture that fails to start (no microphone, permission denied) is
//! logged and surfaced to the caller; the recorder stays idle.

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::ticker::{RepeatingTask, TickerError};

pub const VOICE_MIME_TYPE: &str = "audio/webm";
const TICK: Duration = Duration::from_secs(1);

#[derive(Debug, thiserror::Error)]
pub enum RecorderError {
    #[error("microphone access denied: {0}")]
    PermissionDenied(String),
    #[error("capture device error: {0}")]
    Device(String),
    #[error("ticker error: {0}")]
    Ticker(#[from] TickerError),
}

impl crate::error::ErrorCode for RecorderError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::PermissionDenied(_) => "E_MIC_PERMISSION",
            Self::Device(_) => "E_CAPTURE_DEVICE",
            Self::Ticker(_) => "E_TICKER",
        }
    }
}

/// Audio source. `stop` hands back everything captured since `start`.
#[async_trait]
pub trait AudioCapture: Send {
    async fn start(&mut self) -> Result<(), RecorderError>;
    async fn stop(&mut self) -> Result<Vec<u8>, RecorderError>;
    fn cancel(&mut self);
}

/// A finished recording, ready to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceClip {
    pub bytes: Vec<u8>,
    pub file_name: String,
    pub mime_type: &'static str,
}

impl VoiceClip {
    /// Clip named `voice-message-<recorded_at_ms>.webm`.
    #[must_use]
    pub fn new(bytes: Vec<u8>, recorded_at_ms: i64) -> Self {
        Self { bytes, file_name: format!("voice-message-{recorded_at_ms}.webm"), mime_type: VOICE_MIME_TYPE }
    }
}

pub struct VoiceRecorder<C: AudioCapture> {
    capture: C,
    recording_secs: Arc<AtomicU64>,
    ticker: Option<RepeatingTask>,
}

impl<C: AudioCapture> VoiceRecorder<C> {
    #[must_use]
    pub fn new(capture: C) -> Self {
        Self { capture, recording_secs: Arc::new(AtomicU64::new(0)), ticker: None }
    }

    #[must_use]
    pub fn is_recording(&self) -> bool {
        self.ticker.is_some()
    }

    /// Whole seconds since the current recording started.
    #[must_use]
    pub fn recording_secs(&self) -> u64 {
        self.recording_secs.load(Ordering::Relaxed)
    }

    /// Begin capturing. A no-op while already recording.
    ///
    /// # Errors
    ///
    /// Returns the capture's error if it cannot start, or a ticker error
    /// when no tokio runtime is available.
    pub async fn start(&mut self) -> Result<(), RecorderError> {
        if self.is_recording() {
            return Ok(());
        }
        if let Err(e) = self.capture.start().await {
            warn!(error = %e, "recorder: could not start capture");
            return Err(e);
        }

        self.recording_secs.store(0, Ordering::Relaxed);
        let secs = self.recording_secs.clone();
        match RepeatingTask::spawn(TICK, move || {
            secs.fetch_add(1, Ordering::Relaxed);
        }) {
            Ok(task) => {
                self.ticker = Some(task);
                info!("recorder: started");
                Ok(())
            }
            Err(e) => {
                self.capture.cancel();
                Err(e.into())
            }
        }
    }

    /// Finish the recording. Returns `None` when nothing was recording.
    ///
    /// # Errors
    ///
    /// Returns the capture's error if the recording cannot be collected.
    pub async fn stop(&mut self) -> Result<Option<VoiceClip>, RecorderError> {
        let Some(mut ticker) = self.ticker.take() else {
            return Ok(None);
        };
        ticker.cancel();
        let bytes = self.capture.stop().await?;
        info!(secs = self.recording_secs(), bytes = bytes.len(), "recorder: stopped");
        Ok(Some(VoiceClip::new(bytes, crate::now_ms())))
    }

    /// Throw the current recording away.
    pub fn cancel(&mut self) {
        if let Some(mut ticker) = self.ticker.take() {
            ticker.cancel();
            self.capture.cancel();
            info!("recorder: cancelled");
        }
    }
}

/// Time display for the recording indicator: `MM:SS`.
#[must_use]
pub fn format_recording_time(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

// =============================================================================
// FILE CAPTURE
// =============================================================================

/// Capture source that "records" an existing audio file, for terminals
/// without a microphone.
pub struct FileCapture {
    path: PathBuf,
    open: bool,
}

impl FileCapture {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), open: false }
    }
}

#[async_trait]
impl AudioCapture for FileCapture {
    async fn start(&mut self) -> Result<(), RecorderError> {
        let meta = tokio::fs::metadata(&self.path)
            .await
            .map_err(|e| RecorderError::Device(format!("{}: {e}", self.path.display())))?;
        if !meta.is_file() {
            return Err(RecorderError::Device(format!("{} is not a file", self.path.display())));
        }
        self.open = true;
        Ok(())
    }

    async fn stop(&mut self) -> Result<Vec<u8>, RecorderError> {
        if !self.open {
            return Err(RecorderError::Device("capture was not started".into()));
        }
        self.open = false;
        tokio::fs::read(&self.path)
            .await
            .map_err(|e| RecorderError::Device(format!("{}: {e}", self.path.display())))
    }

    fn cancel(&mut self) {
        self.open = false;
    }
}

#[cfg(test)]
#[path = "recorder_test.rs"]
mod tests;
