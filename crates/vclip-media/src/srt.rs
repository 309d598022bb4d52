//! Subtitle (SRT) writing for the caption burn-in pass.

use std::fmt::Write as _;

use vclip_models::Sentence;

/// One subtitle cue, already rebased to window-local time.
#[derive(Debug, Clone, PartialEq)]
pub struct Cue {
    pub start: f64,
    pub end: f64,
    pub text: String,
}

/// Rebase segment times to window-local (`seg.start - window_start`), clamp
/// to `[0, window_duration]`, and drop segments whose rebased duration is
/// `<= 0`.
pub fn rebase_segments(segments: &[Sentence], window_start: f64, window_duration: f64) -> Vec<Cue> {
    segments
        .iter()
        .filter_map(|s| {
            let start = (s.start - window_start).clamp(0.0, window_duration);
            let end = (s.end - window_start).clamp(0.0, window_duration);
            if end - start <= 0.0 {
                return None;
            }
            Some(Cue {
                start,
                end,
                text: s.text.clone(),
            })
        })
        .collect()
}

/// Render cues as an SRT document.
pub fn write_srt(cues: &[Cue]) -> String {
    let mut out = String::new();
    for (i, cue) in cues.iter().enumerate() {
        let _ = writeln!(out, "{}", i + 1);
        let _ = writeln!(
            out,
            "{} --> {}",
            seconds_to_srt_time(cue.start),
            seconds_to_srt_time(cue.end)
        );
        let _ = writeln!(out, "{}", cue.text);
        let _ = writeln!(out);
    }
    out
}

/// Format seconds as `HH:MM:SS,mmm`.
pub fn seconds_to_srt_time(seconds: f64) -> String {
    let total_ms = (seconds * 1000.0).round() as i64;
    let ms = total_ms.rem_euclid(1000);
    let total_secs = total_ms.div_euclid(1000);
    let secs = total_secs.rem_euclid(60);
    let total_mins = total_secs.div_euclid(60);
    let mins = total_mins.rem_euclid(60);
    let hours = total_mins.div_euclid(60);
    format!("{hours:02}:{mins:02}:{secs:02},{ms:03}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_srt_timestamps() {
        assert_eq!(seconds_to_srt_time(0.0), "00:00:00,000");
        assert_eq!(seconds_to_srt_time(61.5), "00:01:01,500");
        assert_eq!(seconds_to_srt_time(3661.25), "01:01:01,250");
    }

    #[test]
    fn rebase_drops_zero_duration_segments() {
        let segments = vec![
            Sentence {
                text: "kept".into(),
                start: 10.0,
                end: 12.0,
                words: vec![],
            },
            Sentence {
                text: "dropped".into(),
                start: 200.0,
                end: 201.0,
                words: vec![],
            },
        ];
        let cues = rebase_segments(&segments, 5.0, 90.0);
        assert_eq!(cues.len(), 1);
        assert_eq!(cues[0].text, "kept");
        assert!((cues[0].start - 5.0).abs() < 1e-9);
        assert!((cues[0].end - 7.0).abs() < 1e-9);
    }

    #[test]
    fn rebase_clamps_to_window_bounds() {
        let segments = vec![Sentence {
            text: "spans edge".into(),
            start: -5.0,
            end: 95.0,
            words: vec![],
        }];
        let cues = rebase_segments(&segments, 0.0, 90.0);
        assert_eq!(cues.len(), 1);
        assert_eq!(cues[0].start, 0.0);
        assert_eq!(cues[0].end, 90.0);
    }

    #[test]
    fn write_srt_produces_numbered_blocks() {
        let cues = vec![Cue {
            start: 0.0,
            end: 1.0,
            text: "hi".into(),
        }];
        let doc = write_srt(&cues);
        assert!(doc.starts_with("1\n00:00:00,000 --> 00:00:01,000\nhi\n"));
    }
}
