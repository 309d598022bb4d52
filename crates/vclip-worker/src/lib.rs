#![deny(unreachable_patterns)]
//! Clip selection and rendering pipeline.
//!
//! This crate provides:
//! - Window generation from scene cuts and transcript sentences
//! - Keyphrase extraction and information-density scoring
//! - A cogency grader client and a transcription back-end client
//! - The hybrid ranker and top-K selection
//! - The batch coordinator tying every stage together
//! - Report and CSV emission

pub mod config;
pub mod coordinator;
pub mod density;
pub mod error;
pub mod fetcher;
pub mod grader;
pub mod keyphrase;
pub mod logging;
pub mod ranker;
pub mod report;
pub mod transcript;
pub mod transcription_client;
pub mod windows;

pub use config::PipelineConfig;
pub use coordinator::{run_pipeline, SourceInput};
pub use error::{PipelineError, PipelineResult};
pub use grader::CogencyGrader;
pub use logging::RunLogger;
pub use transcription_client::TranscriptionClient;
