//! Window generator: slides candidate clip windows over the source timeline,
//! snapping to scene cuts and attaching overlapping transcript sentences.

use vclip_models::time::TimeRange;
use vclip_models::transcript::Sentence;
use vclip_models::window::Window;

#[derive(Debug, Clone, Copy)]
pub struct WindowParams {
    pub window_dur: f64,
    pub stride: f64,
    pub snap_threshold: f64,
    pub min_ratio: f64,
}

impl Default for WindowParams {
    fn default() -> Self {
        Self {
            window_dur: 90.0,
            stride: 15.0,
            snap_threshold: 5.0,
            min_ratio: 0.8,
        }
    }
}

/// Generate candidate windows over a video of duration `duration_s`.
///
/// `scene_cuts` must be sorted ascending. `sentences` must be sorted by
/// `start` ascending; the same full sentence list is considered for every
/// window.
pub fn generate_windows(
    duration_s: f64,
    scene_cuts: &[f64],
    sentences: &[Sentence],
    params: WindowParams,
) -> Vec<Window> {
    if duration_s <= 0.0 {
        return Vec::new();
    }
    if duration_s <= params.window_dur {
        return vec![build_window(0, 0.0, duration_s, scene_cuts, sentences)];
    }

    let mut windows = Vec::new();
    let mut t = 0.0;
    let mut index = 0;

    while t <= duration_s - params.window_dur {
        let candidate_start = t;
        let candidate_end = t + params.window_dur;

        let mut start = snap(candidate_start, scene_cuts, params.snap_threshold).unwrap_or(candidate_start);
        let mut end = snap(candidate_end, scene_cuts, params.snap_threshold).unwrap_or(candidate_end);

        if end - start < params.window_dur * params.min_ratio {
            start = candidate_start;
            end = candidate_end;
        }

        end = end.min(duration_s);

        windows.push(build_window(index, start, end, scene_cuts, sentences));
        t += params.stride;
        index += 1;
    }

    windows
}

fn snap(target: f64, scene_cuts: &[f64], threshold: f64) -> Option<f64> {
    let nearest = scene_cuts
        .iter()
        .copied()
        .min_by(|a, b| (a - target).abs().partial_cmp(&(b - target).abs()).unwrap())?;
    if (nearest - target).abs() <= threshold {
        Some(nearest)
    } else {
        None
    }
}

fn build_window(index: usize, start: f64, end: f64, scene_cuts: &[f64], sentences: &[Sentence]) -> Window {
    let range = TimeRange::new(start, end).unwrap_or(TimeRange { start, end: start + 0.001 });

    let scene_cuts_inside: Vec<f64> = scene_cuts
        .iter()
        .copied()
        .filter(|&c| c >= start && c <= end)
        .collect();

    let segments: Vec<Sentence> = sentences
        .iter()
        .filter(|s| {
            let sentence_dur = (s.end - s.start).max(f64::EPSILON);
            let overlap = range.overlap(&TimeRange { start: s.start, end: s.end });
            overlap / sentence_dur > 0.5
        })
        .cloned()
        .collect();

    Window {
        id: Window::id_for_index(index),
        range,
        scene_cuts_inside,
        segments,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sentence(text: &str, start: f64, end: f64) -> Sentence {
        Sentence {
            text: text.to_string(),
            start,
            end,
            words: vec![],
        }
    }

    #[test]
    fn short_video_emits_single_window() {
        let windows = generate_windows(40.0, &[], &[], WindowParams::default());
        assert_eq!(windows.len(), 1);
        assert_eq!(windows[0].start(), 0.0);
        assert_eq!(windows[0].end(), 40.0);
    }

    #[test]
    fn exact_window_duration_emits_single_window() {
        let windows = generate_windows(90.0, &[], &[], WindowParams::default());
        assert_eq!(windows.len(), 1);
        assert_eq!(windows[0].start(), 0.0);
        assert_eq!(windows[0].end(), 90.0);
    }

    #[test]
    fn zero_duration_emits_no_windows() {
        let windows = generate_windows(0.0, &[], &[], WindowParams::default());
        assert!(windows.is_empty());
    }

    #[test]
    fn windows_strictly_increase_in_start() {
        let windows = generate_windows(300.0, &[], &[], WindowParams::default());
        for pair in windows.windows(2) {
            assert!(pair[1].start() > pair[0].start());
        }
    }

    #[test]
    fn snaps_to_nearby_scene_cut() {
        let cuts = vec![3.0];
        let params = WindowParams::default();
        let windows = generate_windows(300.0, &cuts, &[], params);
        assert_eq!(windows[0].start(), 3.0);
    }

    #[test]
    fn reverts_both_bounds_when_snap_shrinks_below_min_ratio() {
        // snap_threshold large enough to always snap to the single cut at 70,
        // which would shrink [0,90] down to [70,90] -- far under the 0.8 ratio.
        let cuts = vec![70.0];
        let params = WindowParams {
            window_dur: 90.0,
            stride: 15.0,
            snap_threshold: 70.0,
            min_ratio: 0.8,
        };
        let windows = generate_windows(300.0, &cuts, &[], params);
        // first window's candidate is [0, 90]; start snaps to 70 (within threshold
        // of 0), end does not snap (no cut near 90 within threshold of 20... but
        // threshold is 70 so it also snaps to 70) -- forcing a revert either way.
        assert_eq!(windows[0].start(), 0.0);
        assert_eq!(windows[0].end(), 90.0);
    }

    #[test]
    fn attaches_sentences_with_majority_overlap() {
        let sentences = vec![
            sentence("mostly inside", 85.0, 95.0),
            sentence("mostly outside", 88.0, 200.0),
        ];
        let windows = generate_windows(300.0, &[], &sentences, WindowParams::default());
        let first = &windows[0];
        assert!(first.segments.iter().any(|s| s.text == "mostly inside"));
        assert!(!first.segments.iter().any(|s| s.text == "mostly outside"));
    }

    #[test]
    fn window_ids_are_zero_padded_sequential() {
        let windows = generate_windows(300.0, &[], &[], WindowParams::default());
        assert_eq!(windows[0].id, "window_000");
        assert_eq!(windows[1].id, "window_001");
    }
}
