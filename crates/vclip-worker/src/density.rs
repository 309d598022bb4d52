//! Density analyzer: per-window lexical and information-density metrics,
//! including a corpus-fitted TF-IDF model (1-2 grams, max 1000 features).

use std::collections::HashMap;

use vclip_models::score::DensityMetrics;

const MAX_FEATURES: usize = 1000;

fn stop_words() -> &'static [&'static str] {
    &[
        "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
        "is", "are", "was", "were", "be", "been", "being", "have", "has", "had", "do", "does",
        "did", "will", "would", "could", "should", "may", "might", "can", "this", "that",
        "these", "those",
    ]
}

/// A TF-IDF model fitted once across every window's text in the current run.
/// Corpus = this video only, matching the source behavior exactly.
pub struct TfIdfModel {
    vocabulary: Vec<String>,
    idf: HashMap<String, f64>,
}

impl TfIdfModel {
    /// Fit on a corpus of per-window texts. Must be called exactly once per
    /// run, before any `score` call.
    pub fn fit(documents: &[String]) -> Self {
        let doc_grams: Vec<Vec<String>> = documents.iter().map(|d| ngrams(d)).collect();
        let n_docs = doc_grams.len().max(1) as f64;

        let mut doc_freq: HashMap<String, usize> = HashMap::new();
        for grams in &doc_grams {
            let unique: std::collections::HashSet<&String> = grams.iter().collect();
            for term in unique {
                *doc_freq.entry(term.clone()).or_insert(0) += 1;
            }
        }

        let mut terms: Vec<(String, usize)> = doc_freq.into_iter().collect();
        terms.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        terms.truncate(MAX_FEATURES);

        let idf: HashMap<String, f64> = terms
            .iter()
            .map(|(term, df)| {
                let idf_value = (n_docs / (*df as f64 + 1.0)).ln() + 1.0;
                (term.clone(), idf_value)
            })
            .collect();

        let vocabulary = terms.into_iter().map(|(t, _)| t).collect();

        Self { vocabulary, idf }
    }

    /// TF-IDF weights for `text`'s terms restricted to the fitted vocabulary.
    fn weights(&self, text: &str) -> Vec<f64> {
        let grams = ngrams(text);
        if grams.is_empty() {
            return Vec::new();
        }
        let mut tf: HashMap<String, f64> = HashMap::new();
        for g in &grams {
            *tf.entry(g.clone()).or_insert(0.0) += 1.0;
        }
        let total = grams.len() as f64;

        self.vocabulary
            .iter()
            .filter_map(|term| {
                let count = tf.get(term)?;
                let idf = self.idf.get(term)?;
                Some((count / total) * idf)
            })
            .collect()
    }
}

fn ngrams(text: &str) -> Vec<String> {
    let tokens: Vec<String> = text
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty() && !stop_words().contains(w))
        .map(|w| w.to_string())
        .collect();

    let mut grams = tokens.clone();
    for window in tokens.windows(2) {
        grams.push(format!("{} {}", window[0], window[1]));
    }
    grams
}

const CONTENT_STOP_WORDS: [&str; 30] = [
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by", "is",
    "are", "was", "were", "be", "been", "being", "have", "has", "had", "do", "does", "did",
    "will", "would", "could",
];

/// Compute density metrics for `text` against a fitted TF-IDF model.
pub fn calculate_density(text: &str, tfidf: &TfIdfModel) -> DensityMetrics {
    if text.trim().is_empty() {
        return DensityMetrics::default();
    }

    let words: Vec<String> = text
        .to_lowercase()
        .split_whitespace()
        .map(|w| w.to_string())
        .collect();

    if words.is_empty() {
        return DensityMetrics::default();
    }

    let unique: std::collections::HashSet<&String> = words.iter().collect();
    let lexical_diversity = unique.len() as f64 / words.len() as f64;

    let mut counts: HashMap<&str, usize> = HashMap::new();
    for w in &words {
        *counts.entry(w.as_str()).or_insert(0) += 1;
    }
    let total = words.len() as f64;
    let entropy = -counts
        .values()
        .map(|&c| {
            let p = c as f64 / total;
            p * p.log2()
        })
        .sum::<f64>();

    let tfidf_weights = tfidf.weights(text);
    let (tfidf_mean, tfidf_max) = if tfidf_weights.is_empty() {
        (0.0, 0.0)
    } else {
        let sum: f64 = tfidf_weights.iter().sum();
        let max = tfidf_weights.iter().cloned().fold(0.0_f64, f64::max);
        (sum / tfidf_weights.len() as f64, max)
    };

    let content_words = words
        .iter()
        .filter(|w| !CONTENT_STOP_WORDS.contains(&w.as_str()))
        .count();
    let content_word_ratio = content_words as f64 / words.len() as f64;

    let avg_word_length = words.iter().map(|w| w.len() as f64).sum::<f64>() / words.len() as f64;

    DensityMetrics {
        lexical_diversity,
        entropy,
        tfidf_mean,
        tfidf_max,
        content_word_ratio,
        avg_word_length,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_yields_zeroed_metrics() {
        let model = TfIdfModel::fit(&["some document".to_string()]);
        let metrics = calculate_density("", &model);
        assert_eq!(metrics.lexical_diversity, 0.0);
        assert_eq!(metrics.entropy, 0.0);
    }

    #[test]
    fn all_unique_words_have_diversity_one() {
        let model = TfIdfModel::fit(&["alpha beta gamma".to_string()]);
        let metrics = calculate_density("alpha beta gamma", &model);
        assert_eq!(metrics.lexical_diversity, 1.0);
    }

    #[test]
    fn repeated_word_lowers_diversity_and_raises_nonzero_entropy() {
        let model = TfIdfModel::fit(&["alpha alpha beta".to_string()]);
        let metrics = calculate_density("alpha alpha beta", &model);
        assert!(metrics.lexical_diversity < 1.0);
        assert!(metrics.entropy > 0.0);
    }

    #[test]
    fn tfidf_fit_is_corpus_scoped_to_current_run() {
        let docs = vec![
            "machine learning models".to_string(),
            "cooking pasta recipes".to_string(),
        ];
        let model = TfIdfModel::fit(&docs);
        let metrics = calculate_density("machine learning models", &model);
        assert!(metrics.tfidf_mean > 0.0);
    }
}
