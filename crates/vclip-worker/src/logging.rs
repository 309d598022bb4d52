//! Structured run logging utilities.
//!
//! Provides consistent, structured logging for a pipeline run with tracing
//! spans and contextual information.

use tracing::{error, info, warn, Span};

/// Run logger for structured logging with consistent formatting.
///
/// Provides a simple interface for logging run lifecycle events with
/// automatic contextual information (run ID, stage name).
#[derive(Debug, Clone)]
pub struct RunLogger {
    run_id: String,
    stage: String,
}

impl RunLogger {
    /// Create a new run logger for a specific run and stage.
    ///
    /// # Arguments
    /// * `run_id` - The unique identifier for the run
    /// * `stage` - The pipeline stage (e.g., "window_generation", "render")
    pub fn new(run_id: &str, stage: &str) -> Self {
        Self {
            run_id: run_id.to_string(),
            stage: stage.to_string(),
        }
    }

    /// Log the start of a stage.
    pub fn log_start(&self, message: &str) {
        info!(
            run_id = %self.run_id,
            stage = %self.stage,
            "stage started: {}", message
        );
    }

    /// Log a progress update during a stage.
    pub fn log_progress(&self, message: &str) {
        info!(
            run_id = %self.run_id,
            stage = %self.stage,
            "stage progress: {}", message
        );
    }

    /// Log a warning during a stage.
    pub fn log_warning(&self, message: &str) {
        warn!(
            run_id = %self.run_id,
            stage = %self.stage,
            "stage warning: {}", message
        );
    }

    /// Log an error during a stage.
    pub fn log_error(&self, message: &str) {
        error!(
            run_id = %self.run_id,
            stage = %self.stage,
            "stage error: {}", message
        );
    }

    /// Log the completion of a stage.
    pub fn log_completion(&self, message: &str) {
        info!(
            run_id = %self.run_id,
            stage = %self.stage,
            "stage completed: {}", message
        );
    }

    /// Create a tracing span for this stage.
    pub fn create_span(&self) -> Span {
        tracing::info_span!(
            "stage",
            run_id = %self.run_id,
            stage = %self.stage
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_span_carries_run_id_and_stage_fields() {
        let logger = RunLogger::new("run-abc123", "render");
        let span = logger.create_span();
        assert_eq!(span.metadata().map(|m| m.name()), Some("stage"));
    }
}
