//! Hybrid ranker: fuses keyphrase coverage, density, cogency, quotes, scene
//! cuts, and filler words into one final score per window, then sorts and
//! takes the top-K.

use std::sync::OnceLock;

use regex::Regex;

use vclip_models::clip::RankedClip;
use vclip_models::score::{DensityMetrics, GraderResult, ScoreBreakdown, ScoreComponents};
use vclip_models::window::Window;

const W_KEYPHRASE: f64 = 0.35;
const W_DENSITY: f64 = 0.20;
const W_COGENCY: f64 = 0.25;
const W_QUOTE: f64 = 0.10;
const W_SCENE_PENALTY: f64 = 0.05;
const W_FILLER_PENALTY: f64 = 0.05;

fn filler_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"\b(um|uh|er|ah|like|you know|sort of|kind of|basically|actually|literally|\
obviously|i mean|i think|i guess|i suppose)\b",
        )
        .expect("valid regex")
    })
}

/// Inputs already computed upstream (keyphrases, density, grader result)
/// for one window.
pub struct WindowScoreInputs<'a> {
    pub window: &'a Window,
    pub keyphrases: Vec<(String, f64)>,
    pub density: DensityMetrics,
    pub grader: Option<GraderResult>,
    pub scene_detection_degraded: bool,
}

/// Score a single window. Empty-text windows short-circuit to a zero score
/// without having called the grader (caller is expected to have skipped it).
pub fn score_window(inputs: WindowScoreInputs<'_>) -> ScoreBreakdown {
    let text = inputs.window.text();
    if text.trim().is_empty() {
        return ScoreBreakdown::empty();
    }

    let word_count = text.split_whitespace().count().max(1);

    let keyphrase_score = keyphrase_coverage(&text, &inputs.keyphrases);
    let density_score = density_score(&inputs.density);

    let grader = inputs.grader.unwrap_or_else(GraderResult::degraded_default);
    let cogency_score = grader.cogency as f64 / 5.0;
    let quote_bonus = (0.1 * grader.quotes.len() as f64).min(1.0);

    let scene_penalty = (0.1 * inputs.window.scene_cuts_inside.len() as f64).min(1.0);
    let filler_count = filler_regex().find_iter(&text.to_lowercase()).count();
    let filler_penalty = (2.0 * filler_count as f64 / word_count as f64).min(1.0);

    let final_score = (W_KEYPHRASE * keyphrase_score
        + W_DENSITY * density_score
        + W_COGENCY * cogency_score
        + W_QUOTE * quote_bonus
        - W_SCENE_PENALTY * scene_penalty
        - W_FILLER_PENALTY * filler_penalty)
        .max(0.0);

    let mut errors = Vec::new();
    if grader.degraded {
        errors.push("grading degraded: cogency grader unreachable or returned malformed JSON".to_string());
    }
    if inputs.scene_detection_degraded {
        errors.push("scene detection degraded: scene cuts unavailable, snapping disabled".to_string());
    }

    ScoreBreakdown {
        final_score,
        keyphrase: keyphrase_score,
        density: density_score,
        cogency: cogency_score,
        quote_bonus,
        scene_penalty,
        filler_penalty,
        components: ScoreComponents {
            keyphrases: inputs.keyphrases,
            density: inputs.density,
            grader: Some(grader),
            word_count,
            errors,
        },
    }
}

/// `Σ over phrases of importance · min(occurrences/3, 1)`, then `/ phrase count`.
fn keyphrase_coverage(text: &str, keyphrases: &[(String, f64)]) -> f64 {
    if keyphrases.is_empty() {
        return 0.0;
    }
    let lowered = text.to_lowercase();
    let sum: f64 = keyphrases
        .iter()
        .map(|(phrase, importance)| {
            let occurrences = lowered.matches(&phrase.to_lowercase()).count() as f64;
            importance.clamp(0.0, 1.0) * (occurrences / 3.0).min(1.0)
        })
        .sum();
    (sum / keyphrases.len() as f64).clamp(0.0, 1.0)
}

fn density_score(d: &DensityMetrics) -> f64 {
    let score = 0.30 * d.lexical_diversity
        + 0.20 * (d.entropy / 5.0).min(1.0)
        + 0.20 * d.tfidf_mean
        + 0.15 * d.content_word_ratio
        + 0.15 * (d.avg_word_length / 6.0).min(1.0);
    score.clamp(0.0, 1.0)
}

/// Sort windows by `final_score` descending, ties broken by `start_time`
/// ascending, then `window_id` lexicographic, and take the top `k`.
pub fn rank_top_k(mut scored: Vec<(Window, ScoreBreakdown)>, k: usize) -> Vec<RankedClip> {
    scored.sort_by(|(wa, sa), (wb, sb)| {
        sb.final_score
            .partial_cmp(&sa.final_score)
            .unwrap()
            .then_with(|| wa.start().partial_cmp(&wb.start()).unwrap())
            .then_with(|| wa.id.cmp(&wb.id))
    });

    scored
        .into_iter()
        .take(k)
        .enumerate()
        .map(|(i, (window, scores))| RankedClip {
            window,
            scores,
            rank: i + 1,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use vclip_models::time::TimeRange;

    fn window(id: &str, start: f64, end: f64) -> Window {
        Window {
            id: id.to_string(),
            range: TimeRange::new(start, end).unwrap(),
            scene_cuts_inside: vec![],
            segments: vec![],
        }
    }

    #[test]
    fn empty_window_text_short_circuits_to_zero() {
        let w = window("window_000", 0.0, 90.0);
        let score = score_window(WindowScoreInputs {
            window: &w,
            keyphrases: vec![],
            density: DensityMetrics::default(),
            grader: None,
            scene_detection_degraded: false,
        });
        assert_eq!(score.final_score, 0.0);
    }

    #[test]
    fn final_score_is_never_negative() {
        let mut w = window("window_000", 0.0, 90.0);
        w.segments = vec![vclip_models::transcript::Sentence {
            text: "um uh like you know basically actually".to_string(),
            start: 0.0,
            end: 5.0,
            words: vec![],
        }];
        let score = score_window(WindowScoreInputs {
            window: &w,
            keyphrases: vec![],
            density: DensityMetrics::default(),
            grader: Some(GraderResult::degraded_default()),
            scene_detection_degraded: false,
        });
        assert!(score.final_score >= 0.0);
    }

    #[test]
    fn degraded_grader_and_scene_detection_are_recorded_as_errors() {
        let mut w = window("window_000", 0.0, 90.0);
        w.segments = vec![vclip_models::transcript::Sentence {
            text: "a normal sentence with content".to_string(),
            start: 0.0,
            end: 5.0,
            words: vec![],
        }];
        let score = score_window(WindowScoreInputs {
            window: &w,
            keyphrases: vec![],
            density: DensityMetrics::default(),
            grader: Some(GraderResult::degraded_default()),
            scene_detection_degraded: true,
        });
        assert_eq!(score.components.errors.len(), 2);
    }

    #[test]
    fn ties_break_by_start_then_window_id() {
        let w1 = window("window_001", 10.0, 100.0);
        let w2 = window("window_000", 5.0, 95.0);
        let w3 = window("window_002", 5.0, 95.0);
        let score = ScoreBreakdown {
            final_score: 0.5,
            keyphrase: 0.0,
            density: 0.0,
            cogency: 0.0,
            quote_bonus: 0.0,
            scene_penalty: 0.0,
            filler_penalty: 0.0,
            components: ScoreComponents::default(),
        };
        let scored = vec![
            (w1.clone(), score.clone()),
            (w2.clone(), score.clone()),
            (w3.clone(), score.clone()),
        ];
        let ranked = rank_top_k(scored, 3);
        assert_eq!(ranked[0].window.id, "window_000");
        assert_eq!(ranked[1].window.id, "window_002");
        assert_eq!(ranked[2].window.id, "window_001");
    }

    #[test]
    fn top_k_truncates_and_assigns_one_based_rank() {
        let score_of = |v: f64| ScoreBreakdown {
            final_score: v,
            keyphrase: 0.0,
            density: 0.0,
            cogency: 0.0,
            quote_bonus: 0.0,
            scene_penalty: 0.0,
            filler_penalty: 0.0,
            components: ScoreComponents::default(),
        };
        let scored = vec![
            (window("window_000", 0.0, 90.0), score_of(0.2)),
            (window("window_001", 15.0, 105.0), score_of(0.9)),
            (window("window_002", 30.0, 120.0), score_of(0.5)),
        ];
        let ranked = rank_top_k(scored, 2);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].window.id, "window_001");
        assert_eq!(ranked[0].rank, 1);
        assert_eq!(ranked[1].window.id, "window_002");
        assert_eq!(ranked[1].rank, 2);
    }
}
