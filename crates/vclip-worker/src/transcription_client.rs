//! Transcription back-end client: multipart POST of a WAV file, expecting
//! a verbose-JSON response with word-level timestamps.

use std::path::Path;
use std::time::Duration;

use reqwest::multipart::{Form, Part};
use reqwest::Client;

use vclip_models::transcript::AsrResponse;

use crate::error::{PipelineError, PipelineResult};

pub struct TranscriptionClient {
    client: Client,
    base_url: String,
    model: String,
    timeout: Duration,
}

impl TranscriptionClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            model: "whisper-1".to_string(),
            timeout,
        }
    }

    /// Health probe for `--health-check`.
    pub async fn health_check(&self) -> bool {
        let url = format!("{}/health", self.base_url.trim_end_matches('/'));
        matches!(self.client.get(&url).timeout(self.timeout).send().await, Ok(resp) if resp.status().is_success())
    }

    /// Transcribe a 16 kHz mono WAV file. Fails fatally (`TranscriptionFailed`)
    /// on any non-200 response, timeout, or malformed reply.
    pub async fn transcribe(&self, audio_path: &Path) -> PipelineResult<AsrResponse> {
        let url = format!(
            "{}/v1/audio/transcriptions",
            self.base_url.trim_end_matches('/')
        );

        let bytes = tokio::fs::read(audio_path).await?;
        let file_name = audio_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "audio.wav".to_string());

        let part = Part::bytes(bytes).file_name(file_name).mime_str("audio/wav")
            .map_err(|e| PipelineError::transcription_failed(e.to_string()))?;

        let form = Form::new()
            .text("model", self.model.clone())
            .text("response_format", "verbose_json")
            .text("timestamp_granularities[]", "word")
            .text("timestamp_granularities[]", "segment")
            .part("file", part);

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| PipelineError::transcription_failed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(PipelineError::transcription_failed(format!(
                "transcription backend returned {}",
                response.status()
            )));
        }

        response
            .json::<AsrResponse>()
            .await
            .map_err(|e| PipelineError::transcription_failed(e.to_string()))
    }
}
