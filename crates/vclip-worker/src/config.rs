//! Pipeline configuration, loaded from environment variables.

use std::time::Duration;

use vclip_models::encoding::Quality;

/// Run-scoped configuration threaded through the batch coordinator.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Grader concurrency cap (bounded calls to the chat back-end).
    pub grader_concurrency: usize,
    /// Render concurrency cap (bounded ffmpeg encode passes).
    pub render_concurrency: usize,
    /// Scratch directory for per-run intermediate files.
    pub work_dir: String,
    /// Output directory for the final clips and report.
    pub output_dir: String,
    /// Default top-K clips to render.
    pub default_top_k: usize,
    /// Default render quality tier.
    pub default_quality: Quality,
    /// Transcription back-end base URL.
    pub transcription_base_url: String,
    /// Chat grader back-end base URL.
    pub grader_base_url: String,
    /// Transcription request timeout.
    pub transcription_timeout: Duration,
    /// Cogency grading request timeout.
    pub grading_timeout: Duration,
    /// Extract-pass subprocess timeout.
    pub extract_timeout: Duration,
    /// Caption burn-in pass subprocess timeout.
    pub caption_timeout: Duration,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            grader_concurrency: 4,
            render_concurrency: 2,
            work_dir: "/tmp/vclip".to_string(),
            output_dir: "./clips".to_string(),
            default_top_k: 5,
            default_quality: Quality::Medium,
            transcription_base_url: "http://localhost:8000".to_string(),
            grader_base_url: "http://localhost:8001".to_string(),
            transcription_timeout: Duration::from_secs(600),
            grading_timeout: Duration::from_secs(30),
            extract_timeout: Duration::from_secs(300),
            caption_timeout: Duration::from_secs(600),
        }
    }
}

impl PipelineConfig {
    /// Build configuration from environment variables, falling back to
    /// hardcoded defaults for anything unset or unparseable. Call
    /// `dotenvy::dotenv()` before this to load a `.env` file first.
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            grader_concurrency: env_parsed("PIPELINE_GRADER_CONCURRENCY", default.grader_concurrency),
            render_concurrency: env_parsed("PIPELINE_RENDER_CONCURRENCY", default.render_concurrency),
            work_dir: std::env::var("PIPELINE_WORK_DIR").unwrap_or(default.work_dir),
            output_dir: std::env::var("PIPELINE_OUTPUT_DIR").unwrap_or(default.output_dir),
            default_top_k: env_parsed("PIPELINE_DEFAULT_TOP_K", default.default_top_k),
            default_quality: std::env::var("PIPELINE_DEFAULT_QUALITY")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(default.default_quality),
            transcription_base_url: std::env::var("PIPELINE_TRANSCRIPTION_URL")
                .unwrap_or(default.transcription_base_url),
            grader_base_url: std::env::var("PIPELINE_GRADER_URL").unwrap_or(default.grader_base_url),
            transcription_timeout: Duration::from_secs(env_parsed(
                "PIPELINE_TRANSCRIPTION_TIMEOUT_SECS",
                default.transcription_timeout.as_secs(),
            )),
            grading_timeout: Duration::from_secs(env_parsed(
                "PIPELINE_GRADING_TIMEOUT_SECS",
                default.grading_timeout.as_secs(),
            )),
            extract_timeout: Duration::from_secs(env_parsed(
                "PIPELINE_EXTRACT_TIMEOUT_SECS",
                default.extract_timeout.as_secs(),
            )),
            caption_timeout: Duration::from_secs(env_parsed(
                "PIPELINE_CAPTION_TIMEOUT_SECS",
                default.caption_timeout.as_secs(),
            )),
        }
    }
}

fn env_parsed<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_spec_caps() {
        let config = PipelineConfig::default();
        assert_eq!(config.grader_concurrency, 4);
        assert_eq!(config.render_concurrency, 2);
        assert_eq!(config.default_top_k, 5);
        assert_eq!(config.default_quality, Quality::Medium);
    }
}
