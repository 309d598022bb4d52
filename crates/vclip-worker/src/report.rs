//! Report and CSV writer: serializes the run's outcome to `report.json` and
//! `scores.csv`.

use std::path::Path;

use vclip_models::clip::{RankedClip, RenderedClip};
use vclip_models::report::{RunReport, ScoreCsvRow};

use crate::error::PipelineResult;

/// Write `report.json` to `output_dir`.
pub async fn write_report(output_dir: &Path, report: &RunReport) -> PipelineResult<()> {
    let path = output_dir.join("report.json");
    let body = serde_json::to_string_pretty(report)?;
    tokio::fs::write(path, body).await?;
    Ok(())
}

/// Write `scores.csv` to `output_dir`, one row per top-K candidate window
/// whether or not its render succeeded.
pub async fn write_scores_csv(
    output_dir: &Path,
    video_id: &str,
    ranked: &[RankedClip],
    rendered: &[RenderedClip],
) -> PipelineResult<()> {
    let path = output_dir.join("scores.csv");
    let mut writer = csv_writer();

    for clip in ranked {
        let file_path = rendered
            .iter()
            .find(|r| r.ranked.window.id == clip.window.id)
            .map(|r| r.output_path.clone())
            .unwrap_or_default();

        let row = to_csv_row(video_id, clip, file_path);
        writer.push_str(&serialize_row(&row));
        writer.push('\n');
    }

    tokio::fs::write(path, writer).await?;
    Ok(())
}

fn csv_writer() -> String {
    let header = [
        "video_id",
        "rank",
        "window_id",
        "start_time",
        "end_time",
        "duration",
        "words",
        "keyphrases",
        "keyphrase_score",
        "density_score",
        "cogency_score",
        "cogency_raw",
        "quotes",
        "quote_count",
        "salient_terms",
        "scene_cuts",
        "scene_penalty",
        "filler_penalty",
        "final_score",
        "file_path",
        "text_preview",
    ];
    format!("{}\n", header.join(","))
}

fn to_csv_row(video_id: &str, clip: &RankedClip, file_path: String) -> ScoreCsvRow {
    let grader = clip.scores.components.grader.clone();
    let text = clip.window.text();
    let preview: String = text.chars().take(120).collect();

    ScoreCsvRow {
        video_id: video_id.to_string(),
        rank: clip.rank,
        window_id: clip.window.id.clone(),
        start_time: clip.window.start(),
        end_time: clip.window.end(),
        duration: clip.window.duration(),
        words: clip.scores.components.word_count,
        keyphrases: join_phrases(&clip.scores.components.keyphrases),
        keyphrase_score: clip.scores.keyphrase,
        density_score: clip.scores.density,
        cogency_score: clip.scores.cogency,
        cogency_raw: grader.as_ref().map(|g| g.cogency).unwrap_or(0),
        quotes: grader
            .as_ref()
            .map(|g| g.quotes.join("; "))
            .unwrap_or_default(),
        quote_count: grader.as_ref().map(|g| g.quotes.len()).unwrap_or(0),
        salient_terms: grader
            .as_ref()
            .map(|g| g.salient_terms.join("; "))
            .unwrap_or_default(),
        scene_cuts: clip.window.scene_cuts_inside.len(),
        scene_penalty: clip.scores.scene_penalty,
        filler_penalty: clip.scores.filler_penalty,
        final_score: clip.scores.final_score,
        file_path,
        text_preview: preview,
    }
}

fn join_phrases(phrases: &[(String, f64)]) -> String {
    phrases
        .iter()
        .map(|(p, _)| p.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

fn serialize_row(row: &ScoreCsvRow) -> String {
    [
        csv_escape(&row.video_id),
        row.rank.to_string(),
        csv_escape(&row.window_id),
        row.start_time.to_string(),
        row.end_time.to_string(),
        row.duration.to_string(),
        row.words.to_string(),
        csv_escape(&row.keyphrases),
        row.keyphrase_score.to_string(),
        row.density_score.to_string(),
        row.cogency_score.to_string(),
        row.cogency_raw.to_string(),
        csv_escape(&row.quotes),
        row.quote_count.to_string(),
        csv_escape(&row.salient_terms),
        row.scene_cuts.to_string(),
        row.scene_penalty.to_string(),
        row.filler_penalty.to_string(),
        row.final_score.to_string(),
        csv_escape(&row.file_path),
        csv_escape(&row.text_preview),
    ]
    .join(",")
}

fn csv_escape(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_escape_quotes_values_with_commas() {
        assert_eq!(csv_escape("a, b"), "\"a, b\"");
        assert_eq!(csv_escape("plain"), "plain");
        assert_eq!(csv_escape("has \"quotes\""), "\"has \"\"quotes\"\"\"");
    }

    #[test]
    fn header_contains_exactly_the_spec_columns() {
        let header = csv_writer();
        let first_line = header.lines().next().unwrap();
        assert_eq!(
            first_line,
            "video_id,rank,window_id,start_time,end_time,duration,words,keyphrases,\
keyphrase_score,density_score,cogency_score,cogency_raw,quotes,quote_count,\
salient_terms,scene_cuts,scene_penalty,filler_penalty,final_score,file_path,text_preview"
        );
    }
}
