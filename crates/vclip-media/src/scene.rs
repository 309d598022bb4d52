//! Scene-cut detection via FFmpeg's frame-content-delta filter.

use regex::Regex;
use std::path::Path;
use std::process::Stdio;
use std::sync::OnceLock;
use tokio::process::Command;
use tracing::warn;

pub const DEFAULT_CONTENT_THRESHOLD: f64 = 30.0;

fn pts_time_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"pts_time:(\d+(?:\.\d+)?)").expect("valid regex"))
}

/// Detect scene-cut timestamps in `path` using ffmpeg's `select='gt(scene,threshold)'`
/// combined with `showinfo`, parsing `pts_time` values off stderr.
///
/// The `content_threshold` is on a 0-100 scale in the source domain's
/// convention but passed to ffmpeg's `scene` metric as a fraction in
/// `[0, 1]`; higher values mean fewer, more decisive cuts.
///
/// Never fails the caller: any tool-missing, non-zero-exit, or
/// no-parseable-output condition degrades to an empty list.
pub async fn detect_scene_cuts(path: impl AsRef<Path>, content_threshold: f64) -> Vec<f64> {
    match detect_scene_cuts_inner(path.as_ref(), content_threshold).await {
        Ok(cuts) => cuts,
        Err(err) => {
            warn!(error = %err, "scene detection degraded to empty list");
            Vec::new()
        }
    }
}

async fn detect_scene_cuts_inner(
    path: &Path,
    content_threshold: f64,
) -> Result<Vec<f64>, std::io::Error> {
    let ffmpeg = which::which("ffmpeg")
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e))?;

    let threshold_fraction = (content_threshold / 100.0).clamp(0.0, 1.0);
    let filter = format!("select='gt(scene,{threshold_fraction})',showinfo");

    let output = Command::new(ffmpeg)
        .args(["-i"])
        .arg(path)
        .args(["-vf", &filter, "-f", "null", "-"])
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .output()
        .await?;

    let stderr = String::from_utf8_lossy(&output.stderr);
    let mut cuts: Vec<f64> = pts_time_re()
        .captures_iter(&stderr)
        .filter_map(|c| c.get(1)?.as_str().parse::<f64>().ok())
        .filter(|&t| t > 0.0)
        .collect();

    cuts.sort_by(|a, b| a.partial_cmp(b).unwrap());
    cuts.dedup();
    Ok(cuts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pts_time_regex_extracts_values() {
        let line = "[Parsed_showinfo_1 @ 0x1234] n:3 pts:123 pts_time:4.125 duration:0.04";
        let caps = pts_time_re().captures(line).unwrap();
        assert_eq!(&caps[1], "4.125");
    }

    #[tokio::test]
    async fn missing_file_degrades_to_empty_list() {
        let cuts = detect_scene_cuts("/nonexistent/path/does-not-exist.mp4", 30.0).await;
        assert!(cuts.is_empty());
    }
}
