//! Keyphrase extractor: fuses an embedding-style and a statistical (YAKE-style)
//! extraction pass into one scored phrase list.

use std::collections::HashMap;

const EMBEDDING_TOP_K: usize = 15;
const STATISTICAL_TOP_K: usize = 20;
const YAKE_EPSILON: f64 = 1e-6;

fn stop_words() -> &'static [&'static str] {
    &[
        "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
        "is", "are", "was", "were", "be", "been", "being", "have", "has", "had", "do", "does",
        "did", "will", "would", "could", "should", "may", "might", "can", "this", "that",
        "these", "those",
    ]
}

/// Extract and fuse keyphrases from `text`. Pure, never panics; empty text
/// yields an empty list.
pub fn extract_keyphrases(text: &str) -> Vec<(String, f64)> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    let tokens = tokenize(text);
    if tokens.is_empty() {
        return Vec::new();
    }

    let embedding = embedding_candidates(&tokens);
    let statistical = statistical_candidates(&tokens);

    fuse(embedding, statistical)
}

fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(|w| w.to_string())
        .collect()
}

fn ngrams(tokens: &[String], min_n: usize, max_n: usize) -> Vec<String> {
    let mut phrases = Vec::new();
    for n in min_n..=max_n {
        if tokens.len() < n {
            continue;
        }
        for window in tokens.windows(n) {
            if window.iter().any(|t| stop_words().contains(&t.as_str())) {
                continue;
            }
            phrases.push(window.join(" "));
        }
    }
    phrases
}

/// Bag-of-words TF cosine similarity between a candidate phrase and the
/// full document, standing in for a learned contextual encoder.
fn embedding_candidates(tokens: &[String]) -> Vec<(String, f64)> {
    let doc_tf = term_frequencies(tokens);
    let candidates = ngrams(tokens, 1, 3);

    let mut scores: HashMap<String, f64> = HashMap::new();
    for phrase in candidates {
        let phrase_tokens: Vec<String> = phrase.split(' ').map(|s| s.to_string()).collect();
        let phrase_tf = term_frequencies(&phrase_tokens);
        let score = cosine_similarity(&phrase_tf, &doc_tf);
        scores
            .entry(phrase)
            .and_modify(|s| *s = s.max(score))
            .or_insert(score);
    }

    top_n(scores, EMBEDDING_TOP_K)
}

/// YAKE-style statistical scoring: rewards phrases that appear early and
/// repeatedly. Lower raw score is better; inverted to `1/(s+eps)`.
fn statistical_candidates(tokens: &[String]) -> Vec<(String, f64)> {
    let candidates = ngrams(tokens, 1, 3);
    let total = tokens.len().max(1) as f64;

    let mut positions: HashMap<String, Vec<usize>> = HashMap::new();
    for (i, phrase) in candidates.iter().enumerate() {
        positions.entry(phrase.clone()).or_default().push(i);
    }

    let mut raw_scores: HashMap<String, f64> = HashMap::new();
    for (phrase, occurrences) in &positions {
        let frequency = occurrences.len() as f64;
        let mean_position = occurrences.iter().map(|&p| p as f64).sum::<f64>() / frequency;
        let position_factor = (mean_position + 1.0) / total;
        // Lower is better: frequent, early-occurring phrases score lowest.
        let raw = position_factor / frequency;
        raw_scores.insert(phrase.clone(), raw);
    }

    let inverted: HashMap<String, f64> = raw_scores
        .into_iter()
        .map(|(k, v)| (k, 1.0 / (v + YAKE_EPSILON)))
        .collect();

    top_n(inverted, STATISTICAL_TOP_K)
}

fn fuse(embedding: Vec<(String, f64)>, statistical: Vec<(String, f64)>) -> Vec<(String, f64)> {
    let mut combined: HashMap<String, f64> = HashMap::new();
    for (phrase, score) in embedding {
        combined.insert(phrase, score);
    }
    for (phrase, score) in statistical {
        combined
            .entry(phrase)
            .and_modify(|s| *s = (*s + score) / 2.0)
            .or_insert(score * 0.5);
    }

    let mut result: Vec<(String, f64)> = combined.into_iter().collect();
    result.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap().then_with(|| a.0.cmp(&b.0)));
    result
}

fn term_frequencies(tokens: &[String]) -> HashMap<String, f64> {
    let mut counts: HashMap<String, f64> = HashMap::new();
    for t in tokens {
        *counts.entry(t.clone()).or_insert(0.0) += 1.0;
    }
    let total = tokens.len().max(1) as f64;
    for v in counts.values_mut() {
        *v /= total;
    }
    counts
}

fn cosine_similarity(a: &HashMap<String, f64>, b: &HashMap<String, f64>) -> f64 {
    let dot: f64 = a.iter().map(|(k, v)| v * b.get(k).copied().unwrap_or(0.0)).sum();
    let norm_a: f64 = a.values().map(|v| v * v).sum::<f64>().sqrt();
    let norm_b: f64 = b.values().map(|v| v * v).sum::<f64>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}

fn top_n(scores: HashMap<String, f64>, n: usize) -> Vec<(String, f64)> {
    let mut items: Vec<(String, f64)> = scores.into_iter().collect();
    items.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap().then_with(|| a.0.cmp(&b.0)));
    items.truncate(n);
    items
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_yields_empty_list() {
        assert!(extract_keyphrases("").is_empty());
        assert!(extract_keyphrases("   ").is_empty());
    }

    #[test]
    fn repeated_phrase_ranks_above_one_off_words() {
        let text = "machine learning is powerful. machine learning drives growth. \
                     the weather today is nice.";
        let phrases = extract_keyphrases(text);
        assert!(!phrases.is_empty());
        let top_phrase = &phrases[0].0;
        assert!(top_phrase.contains("machine") || top_phrase.contains("learning"));
    }

    #[test]
    fn stop_word_only_ngrams_are_excluded() {
        let phrases = extract_keyphrases("the a an and or but");
        assert!(phrases.is_empty());
    }

    #[test]
    fn never_panics_on_single_word() {
        let phrases = extract_keyphrases("hello");
        assert_eq!(phrases.len(), 1);
        assert_eq!(phrases[0].0, "hello");
    }
}
