//! Top-level run report, serialized to `report.json` alongside a `scores.csv`.

use serde::{Deserialize, Serialize};

use crate::clip::RenderedClip;

/// Probed facts about the source video, echoed into the report for context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoSummary {
    pub video_id: String,
    pub duration_s: f64,
    pub width: u32,
    pub height: u32,
    pub fps: f64,
}

/// Counts of components that fell back to a degraded default during the run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DegradedCounts {
    pub grader_degraded: usize,
    pub scene_detection_degraded: usize,
    pub render_failed: usize,
}

/// The document written to `<output_dir>/report.json` at the end of a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub video: VideoSummary,
    pub window_count: usize,
    pub degraded: DegradedCounts,
    pub clips: Vec<RenderedClip>,
}

impl RunReport {
    pub fn new(video: VideoSummary, window_count: usize) -> Self {
        Self {
            video,
            window_count,
            degraded: DegradedCounts::default(),
            clips: Vec::new(),
        }
    }
}

/// One row of `scores.csv`, one per top-K candidate window whether or not
/// its render succeeded.
#[derive(Debug, Clone, Serialize)]
pub struct ScoreCsvRow {
    pub video_id: String,
    pub rank: usize,
    pub window_id: String,
    pub start_time: f64,
    pub end_time: f64,
    pub duration: f64,
    pub words: usize,
    pub keyphrases: String,
    pub keyphrase_score: f64,
    pub density_score: f64,
    pub cogency_score: f64,
    pub cogency_raw: u8,
    pub quotes: String,
    pub quote_count: usize,
    pub salient_terms: String,
    pub scene_cuts: usize,
    pub scene_penalty: f64,
    pub filler_penalty: f64,
    pub final_score: f64,
    pub file_path: String,
    pub text_preview: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_report_starts_with_no_clips_and_zero_degraded_counts() {
        let report = RunReport::new(
            VideoSummary {
                video_id: "abc123".into(),
                duration_s: 600.0,
                width: 1920,
                height: 1080,
                fps: 30.0,
            },
            42,
        );
        assert_eq!(report.window_count, 42);
        assert!(report.clips.is_empty());
        assert_eq!(report.degraded.grader_degraded, 0);
        assert_eq!(report.degraded.render_failed, 0);
    }
}
