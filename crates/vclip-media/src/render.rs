//! Render orchestrator: extract+reframe, caption preparation, and burn-in.

use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::info;
use vclip_models::encoding::{EncodingConfig, Quality};
use vclip_models::window::Window;

use crate::command::{hw_encoder_available, FfmpegCommand, FfmpegRunner};
use crate::error::MediaResult;
use crate::filters::{build_caption_filter, build_reframe_filter};
use crate::probe::probe_video;
use crate::srt::{rebase_segments, write_srt};

/// Render one window to a captioned, 9:16 clip at `output_path`.
///
/// Runs two FFmpeg passes: extract+reframe into a temp file, then burn in
/// captions from the rebased transcript into `output_path`. The temp file is
/// removed after a successful second pass; on failure it is best-effort
/// cleaned up and the error is surfaced tagged with the window id.
pub async fn render_clip(
    source: impl AsRef<Path>,
    window: &Window,
    quality: Quality,
    work_dir: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    extract_timeout: Duration,
    caption_timeout: Duration,
) -> MediaResult<()> {
    let source = source.as_ref();
    let work_dir = work_dir.as_ref();
    let output_path = output_path.as_ref();

    let result = render_clip_inner(
        source,
        window,
        quality,
        work_dir,
        output_path,
        extract_timeout,
        caption_timeout,
    )
    .await;
    if let Err(ref err) = result {
        tracing::warn!(window_id = %window.id, error = %err, "render failed");
    }
    result
}

async fn render_clip_inner(
    source: &Path,
    window: &Window,
    quality: Quality,
    work_dir: &Path,
    output_path: &Path,
    extract_timeout: Duration,
    caption_timeout: Duration,
) -> MediaResult<()> {
    tokio::fs::create_dir_all(work_dir).await?;
    let temp_path = work_dir.join(format!("{}.extract.mp4", window.id));
    let srt_path = work_dir.join(format!("{}.srt", window.id));

    let hw_available = hw_encoder_available().await;
    let encoding = EncodingConfig::for_quality(quality, hw_available);

    let extract_result = extract_and_reframe(source, window, &encoding, &temp_path, extract_timeout).await;
    if let Err(err) = extract_result {
        let _ = tokio::fs::remove_file(&temp_path).await;
        return Err(err);
    }

    let cues = rebase_segments(&window.segments, window.start(), window.duration());
    tokio::fs::write(&srt_path, write_srt(&cues)).await?;

    let burn_result = burn_captions(&temp_path, &srt_path, &encoding, output_path, caption_timeout).await;
    let _ = tokio::fs::remove_file(&temp_path).await;
    let _ = tokio::fs::remove_file(&srt_path).await;

    burn_result?;
    info!(window_id = %window.id, output = %output_path.display(), "render complete");
    Ok(())
}

async fn extract_and_reframe(
    source: &Path,
    window: &Window,
    encoding: &EncodingConfig,
    temp_path: &Path,
    timeout: Duration,
) -> MediaResult<()> {
    let info = probe_video(source).await?;
    let filter = build_reframe_filter(info.width, info.height);

    let cmd = FfmpegCommand::new(source, temp_path)
        .seek(window.start())
        .duration(window.duration())
        .video_filter(filter)
        .output_args(encoding.to_ffmpeg_args());

    let runner = FfmpegRunner::new().with_timeout(timeout.as_secs());
    runner.run(&cmd).await
}

async fn burn_captions(
    temp_path: &Path,
    srt_path: &Path,
    encoding: &EncodingConfig,
    output_path: &Path,
    timeout: Duration,
) -> MediaResult<()> {
    let filter = build_caption_filter(&srt_path.to_string_lossy());

    let cmd = FfmpegCommand::new(temp_path, output_path)
        .video_filter(filter)
        .output_args(encoding.to_ffmpeg_args_video_only());

    let runner = FfmpegRunner::new().with_timeout(timeout.as_secs());
    runner.run(&cmd).await
}

/// Work directory root for one run's intermediate render artifacts.
pub fn run_work_dir(base: impl AsRef<Path>, run_id: &str) -> PathBuf {
    base.as_ref().join(format!("run-{run_id}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_work_dir_namespaces_by_run_id() {
        let dir = run_work_dir("/tmp/vclip", "abc123");
        assert_eq!(dir, PathBuf::from("/tmp/vclip/run-abc123"));
    }
}
