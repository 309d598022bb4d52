//! Candidate clip windows.

use serde::{Deserialize, Serialize};

use crate::time::TimeRange;
use crate::transcript::Sentence;

/// A candidate clip region on the source timeline.
///
/// Created once by the window generator and never mutated afterward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Window {
    pub id: String,
    pub range: TimeRange,
    pub scene_cuts_inside: Vec<f64>,
    pub segments: Vec<Sentence>,
}

impl Window {
    pub fn id_for_index(index: usize) -> String {
        format!("window_{index:03}")
    }

    /// Concatenated transcript text for this window, in segment order.
    pub fn text(&self) -> String {
        self.segments
            .iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn start(&self) -> f64 {
        self.range.start
    }

    pub fn end(&self) -> f64 {
        self.range.end
    }

    pub fn duration(&self) -> f64 {
        self.range.duration()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_is_zero_padded() {
        assert_eq!(Window::id_for_index(0), "window_000");
        assert_eq!(Window::id_for_index(12), "window_012");
    }

    #[test]
    fn text_joins_segments_with_space() {
        let w = Window {
            id: "window_000".into(),
            range: TimeRange::new(0.0, 90.0).unwrap(),
            scene_cuts_inside: vec![],
            segments: vec![
                Sentence {
                    text: "Hello world.".into(),
                    start: 10.0,
                    end: 12.0,
                    words: vec![],
                },
                Sentence {
                    text: "Goodbye.".into(),
                    start: 20.0,
                    end: 21.0,
                    words: vec![],
                },
            ],
        };
        assert_eq!(w.text(), "Hello world. Goodbye.");
    }
}
