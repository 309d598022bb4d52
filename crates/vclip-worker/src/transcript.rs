//! Transcript aligner: groups ASR words into sentences.

use vclip_models::transcript::{AsrResponse, Sentence, WordToken};

/// Align a raw ASR response into sentences.
///
/// Iterates words across all segments in order, buffering them until a word
/// whose text ends with `.`, `!`, or `?` is seen, then flushes the buffer as
/// a finalized sentence with `start` = first word's start and `end` = last
/// word's end. Any trailing words without terminal punctuation are flushed
/// as a final sentence. Pure and deterministic.
pub fn align_sentences(asr: &AsrResponse) -> Vec<Sentence> {
    let tokens: Vec<WordToken> = asr
        .segments
        .iter()
        .flat_map(|seg| seg.words.iter().cloned())
        .map(|w| w.into_token())
        .collect();

    align_tokens(&tokens)
}

fn align_tokens(tokens: &[WordToken]) -> Vec<Sentence> {
    let mut sentences = Vec::new();
    let mut buffer: Vec<&WordToken> = Vec::new();

    for token in tokens {
        buffer.push(token);
        if ends_sentence(&token.text) {
            sentences.push(flush(&buffer));
            buffer.clear();
        }
    }

    if !buffer.is_empty() {
        sentences.push(flush(&buffer));
    }

    sentences
}

fn ends_sentence(word: &str) -> bool {
    word.trim_end()
        .chars()
        .last()
        .is_some_and(|c| matches!(c, '.' | '!' | '?'))
}

fn flush(buffer: &[&WordToken]) -> Sentence {
    let text = buffer
        .iter()
        .map(|w| w.text.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    let start = buffer.first().map(|w| w.start).unwrap_or(0.0);
    let end = buffer.last().map(|w| w.end).unwrap_or(0.0);
    Sentence {
        text,
        start,
        end,
        words: buffer.iter().map(|&w| w.clone()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(text: &str, start: f64, end: f64) -> WordToken {
        WordToken {
            text: text.to_string(),
            start,
            end,
            confidence: 1.0,
        }
    }

    #[test]
    fn splits_on_terminal_punctuation() {
        let tokens = vec![
            token("Hello", 0.0, 0.5),
            token("world.", 0.5, 1.0),
            token("Goodbye", 2.0, 2.4),
            token("now!", 2.4, 2.8),
        ];
        let sentences = align_tokens(&tokens);
        assert_eq!(sentences.len(), 2);
        assert_eq!(sentences[0].text, "Hello world.");
        assert_eq!(sentences[0].start, 0.0);
        assert_eq!(sentences[0].end, 1.0);
        assert_eq!(sentences[1].text, "Goodbye now!");
    }

    #[test]
    fn trailing_words_without_punctuation_flush_as_final_sentence() {
        let tokens = vec![
            token("Hello.", 0.0, 0.5),
            token("trailing", 1.0, 1.4),
            token("words", 1.4, 1.8),
        ];
        let sentences = align_tokens(&tokens);
        assert_eq!(sentences.len(), 2);
        assert_eq!(sentences[1].text, "trailing words");
        assert_eq!(sentences[1].end, 1.8);
    }

    #[test]
    fn empty_input_yields_no_sentences() {
        assert!(align_tokens(&[]).is_empty());
    }
}
