#![deny(unreachable_patterns)]
//! FFmpeg/ffprobe CLI wrapper for the clip selection and rendering pipeline.
//!
//! This crate provides:
//! - Type-safe FFmpeg command building
//! - Progress parsing from `-progress pipe:2`
//! - Cancellation and timeout support via tokio
//! - Scene-cut detection via frame-content-delta
//! - The 9:16 render orchestrator (extract+reframe, caption, burn-in)

pub mod command;
pub mod error;
pub mod filters;
pub mod probe;
pub mod progress;
pub mod render;
pub mod scene;
pub mod srt;

pub use command::{check_ffmpeg, check_ffprobe, hw_encoder_available, FfmpegCommand, FfmpegRunner};
pub use error::{MediaError, MediaResult};
pub use filters::{build_caption_filter, build_reframe_filter};
pub use probe::{get_duration, probe_video, VideoInfo};
pub use progress::{FfmpegProgress, ProgressCallback};
pub use render::{render_clip, run_work_dir};
pub use scene::{detect_scene_cuts, DEFAULT_CONTENT_THRESHOLD};
pub use srt::{rebase_segments, seconds_to_srt_time, write_srt, Cue};
