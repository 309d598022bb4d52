//! Transcript types: the raw ASR wire shape and the aligned `Sentence` model.

use serde::{Deserialize, Serialize};

/// A single transcribed word with timing and confidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordToken {
    pub text: String,
    pub start: f64,
    pub end: f64,
    pub confidence: f64,
}

/// A sentence: the maximal run of words terminated by `.`, `!`, or `?`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sentence {
    pub text: String,
    pub start: f64,
    pub end: f64,
    pub words: Vec<WordToken>,
}

impl Sentence {
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// Raw reply from the transcription back-end (`POST /v1/audio/transcriptions`).
#[derive(Debug, Clone, Deserialize)]
pub struct AsrResponse {
    pub text: String,
    pub language: Option<String>,
    pub duration: Option<f64>,
    pub segments: Vec<AsrSegment>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AsrSegment {
    pub id: i64,
    pub start: f64,
    pub end: f64,
    pub text: String,
    #[serde(default)]
    pub words: Vec<AsrWord>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AsrWord {
    pub word: String,
    pub start: f64,
    pub end: f64,
    #[serde(default = "default_probability")]
    pub probability: f64,
}

fn default_probability() -> f64 {
    1.0
}

impl AsrWord {
    pub fn into_token(self) -> WordToken {
        WordToken {
            text: self.word,
            start: self.start,
            end: self.end,
            confidence: self.probability.clamp(0.0, 1.0),
        }
    }
}
