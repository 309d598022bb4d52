//! Shared data models for the clip selection and rendering pipeline.
//!
//! This crate provides the Serde-serializable types shared between the
//! media-tooling crate and the pipeline worker: time ranges, transcript
//! shapes, candidate windows, score breakdowns, ranked/rendered clips,
//! encoding quality tiers, and the run report.

pub mod clip;
pub mod encoding;
pub mod report;
pub mod score;
pub mod time;
pub mod transcript;
pub mod window;

pub use clip::{RankedClip, RenderedClip};
pub use encoding::{EncodingConfig, Quality};
pub use report::{DegradedCounts, RunReport, ScoreCsvRow, VideoSummary};
pub use score::{as_map, DensityMetrics, GraderResult, ScoreBreakdown, ScoreComponents};
pub use time::{TimeRange, TimeRangeError};
pub use transcript::{AsrResponse, AsrSegment, AsrWord, Sentence, WordToken};
pub use window::Window;
