//! Pipeline error taxonomy.

use thiserror::Error;

pub type PipelineResult<T> = Result<T, PipelineError>;

/// Errors surfaced by the batch coordinator, split into fatal (the run
/// cannot produce a report at all) and non-fatal (a single component or
/// window degrades, siblings continue).
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("source unavailable: {0}")]
    SourceUnavailable(String),

    #[error("media invalid: {0}")]
    MediaInvalid(String),

    #[error("transcription failed: {0}")]
    TranscriptionFailed(String),

    #[error("grading degraded: {0}")]
    GradingDegraded(String),

    #[error("scene detection failed: {0}")]
    SceneDetectionFailed(String),

    #[error("render failed for window {window_id}: {message}")]
    RenderFailed { window_id: String, message: String },

    #[error("configuration error: {0}")]
    ConfigError(String),

    #[error("media error: {0}")]
    Media(#[from] vclip_media::MediaError),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl PipelineError {
    pub fn source_unavailable(msg: impl Into<String>) -> Self {
        Self::SourceUnavailable(msg.into())
    }

    pub fn media_invalid(msg: impl Into<String>) -> Self {
        Self::MediaInvalid(msg.into())
    }

    pub fn transcription_failed(msg: impl Into<String>) -> Self {
        Self::TranscriptionFailed(msg.into())
    }

    pub fn grading_degraded(msg: impl Into<String>) -> Self {
        Self::GradingDegraded(msg.into())
    }

    pub fn scene_detection_failed(msg: impl Into<String>) -> Self {
        Self::SceneDetectionFailed(msg.into())
    }

    pub fn render_failed(window_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::RenderFailed {
            window_id: window_id.into(),
            message: message.into(),
        }
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    /// Fatal errors abort the whole run; non-fatal errors degrade a single
    /// component or window and let the coordinator continue.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            PipelineError::SourceUnavailable(_)
                | PipelineError::MediaInvalid(_)
                | PipelineError::TranscriptionFailed(_)
                | PipelineError::ConfigError(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_and_media_errors_are_fatal() {
        assert!(PipelineError::source_unavailable("no stream").is_fatal());
        assert!(PipelineError::media_invalid("no video track").is_fatal());
        assert!(PipelineError::transcription_failed("timed out").is_fatal());
    }

    #[test]
    fn degraded_and_render_errors_are_non_fatal() {
        assert!(!PipelineError::grading_degraded("malformed json").is_fatal());
        assert!(!PipelineError::scene_detection_failed("ffmpeg missing").is_fatal());
        assert!(!PipelineError::render_failed("window_003", "timeout").is_fatal());
    }
}
