//! Batch coordinator: runs the full per-video pipeline sequence.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::warn;

use vclip_media::probe::probe_video;
use vclip_media::render::render_clip;
use vclip_media::scene::{detect_scene_cuts, DEFAULT_CONTENT_THRESHOLD};
use vclip_models::clip::{RankedClip, RenderedClip};
use vclip_models::encoding::Quality;
use vclip_models::report::{DegradedCounts, RunReport, VideoSummary};
use vclip_models::window::Window;

use crate::config::PipelineConfig;
use crate::density::{calculate_density, TfIdfModel};
use crate::error::{PipelineError, PipelineResult};
use crate::grader::CogencyGrader;
use crate::keyphrase::extract_keyphrases;
use crate::logging::RunLogger;
use crate::ranker::{rank_top_k, score_window, WindowScoreInputs};
use crate::report::{write_report, write_scores_csv};
use crate::transcript::align_sentences;
use crate::transcription_client::TranscriptionClient;
use crate::windows::{generate_windows, WindowParams};
use vclip_models::transcript::AsrResponse;

/// One video to process, already fetched to local disk by the (external)
/// media fetcher.
pub struct SourceInput {
    pub video_id: String,
    pub video_path: PathBuf,
    pub audio_path: PathBuf,
}

/// Run the full pipeline for one source video: probe, scene/transcript
/// analysis, window generation, scoring, top-K selection, rendering, and
/// report emission.
pub async fn run_pipeline(
    source: SourceInput,
    config: &PipelineConfig,
    top_k: usize,
    quality: Quality,
) -> PipelineResult<RunReport> {
    let logger = RunLogger::new(&source.video_id, "coordinator");
    let _span = logger.create_span().entered();
    logger.log_start("probing source video");

    let info = probe_video(&source.video_path).await?;

    let transcription_client =
        TranscriptionClient::new(config.transcription_base_url.clone(), config.transcription_timeout);
    let grader = Arc::new(CogencyGrader::new(
        config.grader_base_url.clone(),
        config.grading_timeout,
    ));

    let video_path = source.video_path.clone();
    let audio_path = source.audio_path.clone();
    let (scene_cuts, asr) = tokio::join!(
        detect_scene_cuts(video_path, DEFAULT_CONTENT_THRESHOLD),
        transcription_client.transcribe(&audio_path),
    );
    let asr: AsrResponse = asr?;
    let sentences = align_sentences(&asr);

    let scene_detection_degraded = scene_cuts.is_empty();
    if scene_detection_degraded {
        logger.log_warning(&PipelineError::scene_detection_failed(
            "no scene cuts detected, snapping disabled",
        )
        .to_string());
    }

    let windows = generate_windows(info.duration, &scene_cuts, &sentences, WindowParams::default());
    logger.log_progress(&format!("generated {} windows", windows.len()));

    let corpus: Vec<String> = windows.iter().map(|w| w.text()).collect();
    let tfidf = Arc::new(TfIdfModel::fit(&corpus));

    let scored = score_all_windows(
        windows,
        tfidf,
        grader.clone(),
        config.grader_concurrency,
        scene_detection_degraded,
        &logger,
    )
    .await;

    let ranked = rank_top_k(scored, top_k);
    logger.log_progress(&format!("ranked top {} windows", ranked.len()));

    tokio::fs::create_dir_all(&config.output_dir).await?;
    let (rendered, render_failures) = render_top_k(
        &source.video_path,
        &ranked,
        quality,
        Path::new(&config.work_dir),
        Path::new(&config.output_dir),
        config.render_concurrency,
        config.extract_timeout,
        config.caption_timeout,
        &logger,
    )
    .await;

    let degraded_grader = scored_degraded_count(&ranked);

    let mut report = RunReport::new(
        VideoSummary {
            video_id: source.video_id.clone(),
            duration_s: info.duration,
            width: info.width,
            height: info.height,
            fps: info.fps,
        },
        ranked.len(),
    );
    report.degraded = DegradedCounts {
        grader_degraded: degraded_grader,
        scene_detection_degraded: if scene_detection_degraded { 1 } else { 0 },
        render_failed: render_failures,
    };
    report.clips = rendered.clone();

    write_report(Path::new(&config.output_dir), &report).await?;
    write_scores_csv(Path::new(&config.output_dir), &source.video_id, &ranked, &rendered).await?;

    logger.log_completion(&format!(
        "run complete: {} rendered, {} failed",
        rendered.len(),
        render_failures
    ));

    Ok(report)
}

async fn score_all_windows(
    windows: Vec<Window>,
    tfidf: Arc<TfIdfModel>,
    grader: Arc<CogencyGrader>,
    grader_concurrency: usize,
    scene_detection_degraded: bool,
    logger: &RunLogger,
) -> Vec<(Window, vclip_models::score::ScoreBreakdown)> {
    let semaphore = Arc::new(Semaphore::new(grader_concurrency.max(1)));
    let mut tasks = JoinSet::new();

    for window in windows {
        let tfidf = tfidf.clone();
        let grader = grader.clone();
        let semaphore = semaphore.clone();

        tasks.spawn(async move {
            let text = window.text();
            if text.trim().is_empty() {
                let score = score_window(WindowScoreInputs {
                    window: &window,
                    keyphrases: vec![],
                    density: Default::default(),
                    grader: None,
                    scene_detection_degraded,
                });
                return (window, score);
            }

            let keyphrases = extract_keyphrases(&text);
            let density = calculate_density(&text, &tfidf);

            let permit = semaphore.acquire_owned().await.ok();
            let grader_result = grader.grade(&text).await;
            drop(permit);

            let score = score_window(WindowScoreInputs {
                window: &window,
                keyphrases,
                density,
                grader: Some(grader_result),
                scene_detection_degraded,
            });
            (window, score)
        });
    }

    let mut results = Vec::new();
    while let Some(res) = tasks.join_next().await {
        match res {
            Ok(pair) => {
                if pair.1.components.grader.as_ref().is_some_and(|g| g.degraded) {
                    logger.log_warning(
                        &PipelineError::grading_degraded(format!("window {}", pair.0.id)).to_string(),
                    );
                }
                results.push(pair);
            }
            Err(err) => warn!(error = %err, "window scoring task panicked"),
        }
    }
    results.sort_by(|(a, _), (b, _)| a.start().partial_cmp(&b.start()).unwrap());
    results
}

#[allow(clippy::too_many_arguments)]
async fn render_top_k(
    source: &Path,
    ranked: &[RankedClip],
    quality: Quality,
    work_dir: &Path,
    output_dir: &Path,
    render_concurrency: usize,
    extract_timeout: std::time::Duration,
    caption_timeout: std::time::Duration,
    logger: &RunLogger,
) -> (Vec<RenderedClip>, usize) {
    let semaphore = Arc::new(Semaphore::new(render_concurrency.max(1)));
    let mut tasks = JoinSet::new();

    for clip in ranked {
        let source = source.to_path_buf();
        let work_dir = work_dir.to_path_buf();
        let output_dir = output_dir.to_path_buf();
        let semaphore = semaphore.clone();
        let clip = clip.clone();
        let logger = logger.clone();

        tasks.spawn(async move {
            let _permit = semaphore.acquire_owned().await.ok();
            let filename = RenderedClip::filename_for(clip.rank, &clip.window.id);
            let output_path = output_dir.join(&filename);

            match render_clip(
                &source,
                &clip.window,
                quality,
                &work_dir,
                &output_path,
                extract_timeout,
                caption_timeout,
            )
            .await
            {
                Ok(()) => Some(RenderedClip {
                    ranked: clip,
                    output_path: output_path.to_string_lossy().to_string(),
                    filename,
                }),
                Err(err) => {
                    let pipeline_err = PipelineError::render_failed(clip.window.id.clone(), err.to_string());
                    logger.log_warning(&pipeline_err.to_string());
                    None
                }
            }
        });
    }

    let mut rendered = Vec::new();
    let mut failures = 0;
    while let Some(res) = tasks.join_next().await {
        match res {
            Ok(Some(clip)) => rendered.push(clip),
            Ok(None) => failures += 1,
            Err(err) => {
                logger.log_error(&format!("render task panicked: {err}"));
                failures += 1;
            }
        }
    }
    rendered.sort_by_key(|c| c.ranked.rank);
    (rendered, failures)
}

fn scored_degraded_count(ranked: &[RankedClip]) -> usize {
    ranked
        .iter()
        .filter(|c| {
            c.scores
                .components
                .grader
                .as_ref()
                .map(|g| g.degraded)
                .unwrap_or(false)
        })
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_input_holds_paths_by_value() {
        let source = SourceInput {
            video_id: "abc".to_string(),
            video_path: PathBuf::from("/tmp/video.mp4"),
            audio_path: PathBuf::from("/tmp/audio.wav"),
        };
        assert_eq!(source.video_id, "abc");
    }
}
