//! Scoring types produced by the hybrid ranker and the cogency grader.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Verdict from the cogency grader, either a live grade or the degraded default.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraderResult {
    pub cogency: u8,
    pub quotes: Vec<String>,
    pub salient_terms: Vec<String>,
    pub degraded: bool,
}

impl GraderResult {
    /// The degraded default substituted whenever the grader is unreachable
    /// or returns malformed JSON.
    pub fn degraded_default() -> Self {
        Self {
            cogency: 1,
            quotes: Vec::new(),
            salient_terms: Vec::new(),
            degraded: true,
        }
    }
}

/// Information-density sub-metrics for a window's text.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DensityMetrics {
    pub lexical_diversity: f64,
    pub entropy: f64,
    pub tfidf_mean: f64,
    pub tfidf_max: f64,
    pub content_word_ratio: f64,
    pub avg_word_length: f64,
}

/// Extra, non-scoring context attached to a window's score for the report/log.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreComponents {
    pub keyphrases: Vec<(String, f64)>,
    pub density: DensityMetrics,
    pub grader: Option<GraderResult>,
    pub word_count: usize,
    pub errors: Vec<String>,
}

/// Fused score for one window, every field clamped to `[0, 1]` except penalties
/// which are bounded non-negative by construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub final_score: f64,
    pub keyphrase: f64,
    pub density: f64,
    pub cogency: f64,
    pub quote_bonus: f64,
    pub scene_penalty: f64,
    pub filler_penalty: f64,
    pub components: ScoreComponents,
}

impl ScoreBreakdown {
    /// The zero score used for windows with no transcript text at all; the
    /// grader is never called in this case.
    pub fn empty() -> Self {
        Self {
            final_score: 0.0,
            keyphrase: 0.0,
            density: 0.0,
            cogency: 0.0,
            quote_bonus: 0.0,
            scene_penalty: 0.0,
            filler_penalty: 0.0,
            components: ScoreComponents::default(),
        }
    }
}

/// Flattened sub-score map, kept for callers that want a generic lookup
/// rather than named fields (used by the CSV writer).
pub fn as_map(scores: &ScoreBreakdown) -> BTreeMap<&'static str, f64> {
    let mut map = BTreeMap::new();
    map.insert("final", scores.final_score);
    map.insert("keyphrase", scores.keyphrase);
    map.insert("density", scores.density);
    map.insert("cogency", scores.cogency);
    map.insert("quote_bonus", scores.quote_bonus);
    map.insert("scene_penalty", scores.scene_penalty);
    map.insert("filler_penalty", scores.filler_penalty);
    map
}
