//! Minimal media source fetcher.
//!
//! The real streaming fetcher (resolving a remote URL to a local video
//! file) is an external collaborator. This module ships a local-file
//! fetcher sufficient to drive the pipeline end to end against a
//! pre-downloaded source: it accepts a local path or a `file://` URL,
//! probes it, and extracts a 16 kHz mono WAV for the transcription back end.

use std::path::{Path, PathBuf};

use tokio::process::Command;
use url::Url;

use vclip_media::command::check_ffmpeg;
use vclip_media::probe::{probe_video, VideoInfo};

use crate::coordinator::SourceInput;
use crate::error::{PipelineError, PipelineResult};

/// Resolve `source` (a local path or `file://` URL) to a `SourceInput`,
/// extracting a 16 kHz mono WAV into `work_dir` along the way.
pub async fn fetch(source: &str, work_dir: &Path) -> PipelineResult<(SourceInput, VideoInfo)> {
    let video_path = resolve_local_path(source)?;
    if !video_path.exists() {
        return Err(PipelineError::source_unavailable(format!(
            "source file not found: {}",
            video_path.display()
        )));
    }

    let info = probe_video(&video_path)
        .await
        .map_err(|e| PipelineError::media_invalid(e.to_string()))?;

    let video_id = video_path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "source".to_string());

    tokio::fs::create_dir_all(work_dir).await?;
    let audio_path = work_dir.join(format!("{video_id}.wav"));
    extract_audio(&video_path, &audio_path).await?;

    Ok((
        SourceInput {
            video_id,
            video_path,
            audio_path,
        },
        info,
    ))
}

fn resolve_local_path(source: &str) -> PipelineResult<PathBuf> {
    if let Ok(url) = Url::parse(source) {
        if url.scheme() == "file" {
            return url
                .to_file_path()
                .map_err(|_| PipelineError::source_unavailable(format!("invalid file url: {source}")));
        }
        if url.scheme() != "" && url.scheme() != "file" {
            return Err(PipelineError::source_unavailable(format!(
                "remote fetching is not supported by this local fetcher: {source}"
            )));
        }
    }
    Ok(PathBuf::from(source))
}

async fn extract_audio(video_path: &Path, audio_path: &Path) -> PipelineResult<()> {
    let ffmpeg = check_ffmpeg().map_err(|e| PipelineError::media_invalid(e.to_string()))?;

    let status = Command::new(ffmpeg)
        .args(["-y", "-i"])
        .arg(video_path)
        .args(["-vn", "-ac", "1", "-ar", "16000", "-f", "wav"])
        .arg(audio_path)
        .stdin(std::process::Stdio::null())
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::piped())
        .status()
        .await?;

    if !status.success() {
        return Err(PipelineError::media_invalid(format!(
            "audio extraction failed for {}",
            video_path.display()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_plain_path_unchanged() {
        let path = resolve_local_path("/tmp/video.mp4").unwrap();
        assert_eq!(path, PathBuf::from("/tmp/video.mp4"));
    }

    #[test]
    fn resolves_file_url_to_path() {
        let path = resolve_local_path("file:///tmp/video.mp4").unwrap();
        assert_eq!(path, PathBuf::from("/tmp/video.mp4"));
    }

    #[test]
    fn rejects_remote_schemes() {
        assert!(resolve_local_path("https://example.com/video.mp4").is_err());
    }
}
